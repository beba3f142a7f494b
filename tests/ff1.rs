mod tests {
    mod ff1 {
        use radix_fpe::ff1;
        use radix_fpe::numeral;
        use radix_fpe::result::Result;
        use radix_fpe::RoundSchedule;

        const KEY128: &str = "2b7e151628aed2a6abf7158809cf4f3c";
        const KEY192: &str =
            "2b7e151628aed2a6abf7158809cf4f3cef4359d8d580aa4f";
        const KEY256: &str =
            "2b7e151628aed2a6abf7158809cf4f3cef4359d8d580aa4f7f036d6f04fc6a94";

        fn test_ff1(
            key_hex: &str,
            opt_t: Option<&[u8]>,
            pt: &str,
            ct: &str,
            r: u32,
            opt_a: Option<&str>,
        ) -> Result<()> {
            let k = hex::decode(key_hex).unwrap();
            let ff1 = ff1::FF1::new(&k, opt_t, r, opt_a)?;

            let out = ff1.encrypt(pt, None)?;
            assert!(ct == out, "encrypt: \"{}\" != \"{}\"", ct, out);

            let out = ff1.decrypt(ct, None)?;
            assert!(pt == out, "decrypt: \"{}\" != \"{}\"", pt, out);

            assert!(ct == ff1::encrypt(&k, opt_t, pt, r, opt_a)?);
            assert!(pt == ff1::decrypt(&k, opt_t, ct, r, opt_a)?);

            Ok(())
        }

        #[test]
        fn nist1() -> Result<()> {
            test_ff1(KEY128, None, "0123456789", "2433477484", 10, None)
        }

        #[test]
        fn nist2() -> Result<()> {
            test_ff1(
                KEY128,
                Some(&[
                    0x39, 0x38, 0x37, 0x36, 0x35, 0x34, 0x33, 0x32, 0x31,
                    0x30,
                ]),
                "0123456789",
                "6124200773",
                10,
                None,
            )
        }

        #[test]
        fn nist3() -> Result<()> {
            test_ff1(
                KEY128,
                Some(&[
                    0x37, 0x37, 0x37, 0x37, 0x70, 0x71, 0x72, 0x73, 0x37,
                    0x37, 0x37,
                ]),
                "0123456789abcdefghi",
                "a9tv40mll9kdu509eum",
                36,
                None,
            )
        }

        #[test]
        fn nist4() -> Result<()> {
            test_ff1(KEY192, None, "0123456789", "2830668132", 10, None)
        }

        #[test]
        fn nist5() -> Result<()> {
            test_ff1(
                KEY192,
                Some(&[
                    0x39, 0x38, 0x37, 0x36, 0x35, 0x34, 0x33, 0x32, 0x31,
                    0x30,
                ]),
                "0123456789",
                "2496655549",
                10,
                None,
            )
        }

        #[test]
        fn nist6() -> Result<()> {
            test_ff1(
                KEY192,
                Some(&[
                    0x37, 0x37, 0x37, 0x37, 0x70, 0x71, 0x72, 0x73, 0x37,
                    0x37, 0x37,
                ]),
                "0123456789abcdefghi",
                "xbj3kv35jrawxv32ysr",
                36,
                None,
            )
        }

        #[test]
        fn nist7() -> Result<()> {
            test_ff1(KEY256, None, "0123456789", "6657667009", 10, None)
        }

        #[test]
        fn nist8() -> Result<()> {
            test_ff1(
                KEY256,
                Some(&[
                    0x39, 0x38, 0x37, 0x36, 0x35, 0x34, 0x33, 0x32, 0x31,
                    0x30,
                ]),
                "0123456789",
                "1001623463",
                10,
                None,
            )
        }

        #[test]
        fn nist9() -> Result<()> {
            test_ff1(
                KEY256,
                Some(&[
                    0x37, 0x37, 0x37, 0x37, 0x70, 0x71, 0x72, 0x73, 0x37,
                    0x37, 0x37,
                ]),
                "0123456789abcdefghi",
                "xs8a0azh2avyalyzuwd",
                36,
                None,
            )
        }

        #[test]
        fn digit_surface_matches_string_surface() -> Result<()> {
            let k = hex::decode(KEY128).unwrap();
            let ff1 = ff1::FF1::new(&k, None, 10, None)?;

            let pt: Vec<u16> = (0..10).collect();
            let ct = ff1.encrypt_digits(&pt, None)?;
            assert_eq!(ct, [2, 4, 3, 3, 4, 7, 7, 4, 8, 4]);

            assert_eq!(ff1.decrypt_digits(&ct, None)?, pt);
            Ok(())
        }

        #[test]
        fn byte_adapter_matches_digit_surface() -> Result<()> {
            let k = hex::decode(KEY128).unwrap();
            let ff1 = ff1::FF1::new(&k, None, 10, None)?;

            let pt: Vec<u16> = (0..10).collect();
            let packed = numeral::numeral_string_to_bytes(&pt);

            let ct = ff1.encrypt_bytes(&packed, None)?;
            assert_eq!(ct.len(), packed.len());
            assert_eq!(
                numeral::bytes_to_numeral_string(&ct),
                ff1.encrypt_digits(&pt, None)?
            );

            assert_eq!(ff1.decrypt_bytes(&ct, None)?, packed);
            Ok(())
        }

        #[test]
        fn tweak_length_bounds() -> Result<()> {
            let k = hex::decode(KEY128).unwrap();

            let ff1 = ff1::FF1::new(&k, Some(&[]), 10, None)?;
            let a = ff1.encrypt("0123456789", None)?;

            let long = vec![0u8; 1 << 16];
            let ff1 = ff1::FF1::new(&k, Some(&long), 10, None)?;
            let b = ff1.encrypt("0123456789", None)?;
            assert_ne!(a, b);

            let too_long = vec![0u8; (1 << 16) + 1];
            assert!(ff1::FF1::new(&k, Some(&too_long), 10, None).is_err());
            Ok(())
        }

        #[test]
        fn tweak_sensitivity() -> Result<()> {
            let k = hex::decode(KEY128).unwrap();
            let ff1 = ff1::FF1::new(&k, None, 10, None)?;

            let a = ff1.encrypt("0123456789", Some(&[1, 2, 3]))?;
            let b = ff1.encrypt("0123456789", Some(&[1, 2, 4]))?;
            assert_ne!(a, b);
            Ok(())
        }

        #[test]
        fn per_call_tweak_matches_default_tweak() -> Result<()> {
            let k = hex::decode(KEY128).unwrap();
            let twk = [0x39, 0x38, 0x37];

            let with_default = ff1::FF1::new(&k, Some(&twk), 10, None)?;
            let without = ff1::FF1::new(&k, None, 10, None)?;

            assert_eq!(
                with_default.encrypt("0123456789", None)?,
                without.encrypt("0123456789", Some(&twk))?
            );
            Ok(())
        }

        #[test]
        fn set_tweak_revalidates() -> Result<()> {
            let k = hex::decode(KEY128).unwrap();
            let twk = [0x39, 0x38, 0x37];

            let mut ff1 = ff1::FF1::new(&k, None, 10, None)?;
            ff1.set_tweak(&twk)?;
            assert_eq!(
                ff1.encrypt("0123456789", None)?,
                ff1.encrypt("0123456789", Some(&twk))?
            );

            assert!(ff1.set_tweak(&vec![0u8; (1 << 16) + 1]).is_err());
            Ok(())
        }

        #[test]
        fn set_radix_revalidates() -> Result<()> {
            let k = hex::decode(KEY128).unwrap();
            let mut ff1 = ff1::FF1::new(&k, None, 10, None)?;

            ff1.set_radix(36)?;
            let ct = ff1.encrypt("0123456789abcdefghi", None)?;
            assert_eq!(ff1.decrypt(&ct, None)?, "0123456789abcdefghi");

            assert!(ff1.set_radix(1).is_err());
            Ok(())
        }

        #[test]
        fn extended_schedule_round_trip() -> Result<()> {
            let k = hex::decode(KEY128).unwrap();

            let standard = ff1::FF1::new(&k, None, 10, None)?;
            let extended = ff1::FF1::new_extended(&k, None, 10, None)?;

            assert_eq!(standard.round_schedule(), RoundSchedule::Standard);
            assert_eq!(extended.round_schedule(), RoundSchedule::Extended);
            assert_eq!(standard.rounds_for(10), 10);
            assert_eq!(extended.rounds_for(10), 30);
            assert_eq!(extended.rounds_for(32), 12);

            let ct = extended.encrypt("0123456789", None)?;
            assert_eq!(extended.decrypt(&ct, None)?, "0123456789");

            // the two schedules do not interoperate
            assert_ne!(ct, standard.encrypt("0123456789", None)?);
            Ok(())
        }

        #[test]
        fn large_radix_long_output() -> Result<()> {
            // radix 2**16 with a 20-numeral input drives the round
            // function output past one block, exercising the counter
            // expansion
            let k = hex::decode(KEY256).unwrap();
            let ff1 = ff1::FF1::new(&k, Some(&[0xAA, 0xBB]), 1 << 16, None)?;

            let pt: Vec<u16> =
                (0..20).map(|i| (i * 3301 + 17) as u16).collect();
            let ct = ff1.encrypt_digits(&pt, None)?;
            assert_eq!(ct.len(), pt.len());
            assert_ne!(ct, pt);
            assert_eq!(ff1.decrypt_digits(&ct, None)?, pt);
            Ok(())
        }

        #[test]
        fn minimum_length_boundary() -> Result<()> {
            let k = hex::decode(KEY128).unwrap();

            // radix 10: a two-numeral domain holds exactly 100 values,
            // right on the floor
            let ff1 = ff1::FF1::new(&k, None, 10, None)?;
            let ct = ff1.encrypt_digits(&[4, 2], None)?;
            assert_eq!(ff1.decrypt_digits(&ct, None)?, [4, 2]);

            // radix 9 falls below it
            let ff1 = ff1::FF1::new(&k, None, 9, None)?;
            assert!(ff1.encrypt_digits(&[4, 2], None).is_err());
            Ok(())
        }

        #[test]
        fn format_preservation() -> Result<()> {
            let k = hex::decode(KEY128).unwrap();
            let ff1 = ff1::FF1::new(&k, None, 7, None)?;

            let pt: Vec<u16> = (0..24).map(|i| i % 7).collect();
            let ct = ff1.encrypt_digits(&pt, None)?;
            assert_eq!(ct.len(), pt.len());
            assert!(ct.iter().all(|&d| d < 7));
            Ok(())
        }
    }
}
