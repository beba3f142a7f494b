//! The FF3 algorithm
//!
//! FF3's round function is a single AES call over a reversed block, so
//! its tweak is small and fixed: 8 bytes in the NIST-specified form,
//! 6 bytes in the extended form. All three AES key sizes work.
//!
//! An [`FF3`] value is a reusable context: key schedule, default tweak,
//! radix, and optional alphabet are fixed at construction, after which
//! any number of inputs can be encrypted or decrypted through it.
//!
//! [`FF3::new`] gives the eight rounds of SP 800-38G, with the tweak
//! split 4/4 and the round index XORed into the active half.
//! [`FF3::new_extended`] incorporates the fix for the Durak–Vaudenay
//! attack: a 6-byte tweak split 3/3, the round index in a byte of its
//! own rather than mixed into tweak bytes, and the length-dependent
//! round schedule of extended FF1. A ciphertext from one variant
//! cannot be decrypted by the other.
//!
//! # Key convention
//!
//! FF3 runs AES under the byte-reversed key. That reversal is the
//! caller's responsibility: construct the context with the key already
//! reversed, e.g. through [`crate::numeral::rev_b`]. The library never
//! reverses a key on its own.
//!
//! # Example
//! ```rust
//! // the first FF3 sample from SP 800-38G; note the key reversal
//! let key = radix_fpe::numeral::rev_b(&[
//!     0xef, 0x43, 0x59, 0xd8, 0xd5, 0x80, 0xaa, 0x4f,
//!     0x7f, 0x03, 0x6d, 0x6f, 0x04, 0xfc, 0x6a, 0x94,
//! ]);
//! let ff3 = radix_fpe::ff3::FF3::new(
//!     &key,
//!     Some(&[0xd8, 0xe7, 0x92, 0x0a, 0xfa, 0x33, 0x0a, 0x73]),
//!     10,
//!     None,
//! ).unwrap();
//!
//! let ct = ff3.encrypt("890121234567890000", None).unwrap();
//! assert!(ct == "750918814058654607");
//!
//! let pt = ff3.decrypt(&ct, None).unwrap();
//! assert!(pt == "890121234567890000");
//! ```

use crate::ffx;
use crate::numeral;
use crate::result::Result;

use byteorder::ByteOrder;
use num_bigint::BigInt;
use num_traits::Euclid;

const FF3_ROUNDS: usize = 8;

/// The FF3 context structure
pub struct FF3 {
    ffx: ffx::FFX,
}

impl FF3 {
    /// Create an FF3 context following SP 800-38G
    ///
    /// The key must be 16, 24, or 32 bytes, already byte-reversed (see
    /// the module documentation).
    ///
    /// The default tweak is optional but, when given, must be exactly
    /// 8 bytes. A context built without one can only transform when a
    /// per-call tweak is supplied.
    ///
    /// The radix may be anything in `[2, 65536]`; the maximum input
    /// length shrinks as the radix grows.
    pub fn new(
        key: &[u8],
        opt_twk: Option<&[u8]>,
        radix: u32,
        opt_alpha: Option<&str>,
    ) -> Result<Self> {
        Self::with_schedule(
            key,
            opt_twk,
            radix,
            opt_alpha,
            ffx::RoundSchedule::Standard,
        )
    }

    /// Create an FF3 context with the modified tweak expansion and the
    /// extended round schedule
    ///
    /// The tweak must be exactly 6 bytes. Not interoperable with
    /// [`FF3::new`].
    pub fn new_extended(
        key: &[u8],
        opt_twk: Option<&[u8]>,
        radix: u32,
        opt_alpha: Option<&str>,
    ) -> Result<Self> {
        Self::with_schedule(
            key,
            opt_twk,
            radix,
            opt_alpha,
            ffx::RoundSchedule::Extended,
        )
    }

    fn with_schedule(
        key: &[u8],
        opt_twk: Option<&[u8]>,
        radix: u32,
        opt_alpha: Option<&str>,
        schedule: ffx::RoundSchedule,
    ) -> Result<Self> {
        // each variant pins its own tweak size
        let twk_len = match schedule {
            ffx::RoundSchedule::Standard => 8,
            ffx::RoundSchedule::Extended => 6,
        };

        Ok(FF3 {
            ffx: ffx::FFX::new(
                key,
                opt_twk,
                Self::max_text_len(radix),
                twk_len,
                twk_len,
                radix,
                opt_alpha,
                schedule,
            )?,
        })
    }

    // each half must stay below 2**96, so an input can hold at most
    // 2 * floor(96 / log2(radix)) numerals
    fn max_text_len(radix: u32) -> usize {
        2 * ((96f64 / (radix as f64).log2()).floor() as usize)
    }

    /// The round schedule this context carries.
    pub fn round_schedule(&self) -> ffx::RoundSchedule {
        self.ffx.schedule()
    }

    /// The number of Feistel rounds run for an input of length `n`.
    pub fn rounds_for(&self, n: usize) -> usize {
        self.ffx.schedule().rounds(FF3_ROUNDS, n)
    }

    /// Replace the default tweak, re-validating its length against the
    /// variant.
    pub fn set_tweak(&mut self, twk: &[u8]) -> Result<()> {
        self.ffx.set_tweak(twk)
    }

    /// Replace the radix, re-deriving the maximum input length.
    pub fn set_radix(&mut self, radix: u32) -> Result<()> {
        self.ffx.set_radix(radix, Self::max_text_len(radix))
    }

    fn cipher_digits(
        &self,
        inp: &[u16],
        opt_twk: Option<&[u8]>,
        which: ffx::CipherType,
    ) -> Result<Vec<u16>> {
        let ffx = &self.ffx;
        let radix = ffx.radix();

        let n = inp.len();
        ffx.validate_text_length(n)?;
        ffx.validate_digits(inp)?;

        let t = ffx.tweak(opt_twk);
        ffx.validate_tweak_length(t.len())?;

        let rounds = ffx.schedule().rounds(FF3_ROUNDS, n);

        // (step 1); ff3 gives the odd digit to the left half, the
        // opposite of ff1
        let v = n / 2;
        let u = n - v;

        // ff3 reads both halves in reversed digit order everywhere they
        // feed the round function. reversing them once on entry (and
        // once more on exit) makes every in-round reversal a no-op
        // (step 2)
        let a = numeral::rev(&inp[..u]);
        let b = numeral::rev(&inp[u..]);

        // (step 3) tweak halves, tw[0] left and tw[1] right. the nist
        // split is 4/4 with the round index later xor'd over the active
        // half; the extended split is 3/3 with byte 3 of the round
        // input reserved for the index
        let mut tw: [[u8; 4]; 2] = [[0; 4]; 2];
        match ffx.schedule() {
            ffx::RoundSchedule::Standard => {
                tw[0].copy_from_slice(&t[..4]);
                tw[1].copy_from_slice(&t[4..]);
            }
            ffx::RoundSchedule::Extended => {
                tw[0][..3].copy_from_slice(&t[..3]);
                tw[1][..3].copy_from_slice(&t[3..]);
            }
        }

        // the modulus alternates between radix**u and radix**v, so both
        // are computed up front and swapped as the rounds go
        // (step 4v, partial)
        let mut mv: BigInt = radix.into();
        mv = mv.pow(v as u32);
        let mut mu = mv.clone();
        if v != u {
            mu *= radix;
        }

        // with the reversals hoisted out, the halves live as numbers
        // for the whole loop
        let mut na = numeral::num_radix(&a, radix);
        let mut nb = numeral::num_radix(&b, radix);

        // decryption is the same loop walked from the far end: start
        // from the state encryption finished in (halves, moduli, and
        // tweak halves all swapped) and count the round index down
        if let ffx::CipherType::Decrypt = which {
            std::mem::swap(&mut na, &mut nb);
            std::mem::swap(&mut mu, &mut mv);

            let (t0, t1) = tw.split_at_mut(1);
            std::mem::swap(&mut t0[0], &mut t1[0]);
        }

        for i in 0..rounds {
            let mut p: [[u8; 16]; 2] = [[0; 16]; 2];

            // even rounds take the right tweak half, odd rounds the left
            let w = &tw[(i + 1) % 2];
            let j = match which {
                ffx::CipherType::Encrypt => i,
                ffx::CipherType::Decrypt => rounds - 1 - i,
            };

            // (step 4i, 4ii)
            match ffx.schedule() {
                ffx::RoundSchedule::Standard => {
                    p[0][..4].copy_from_slice(w);
                    let x = byteorder::BigEndian::read_u32(&p[0][..4]);
                    byteorder::BigEndian::write_u32(
                        &mut p[0][..4],
                        x ^ j as u32,
                    );
                }
                ffx::RoundSchedule::Extended => {
                    p[0][..3].copy_from_slice(&w[..3]);
                    p[0][3] = j as u8;
                }
            }

            p[0][4..16].copy_from_slice(&numeral::as_b_bytes(&nb, 12)?);

            // ciph writes to a separate buffer, so the round input gets
            // a sibling block to receive the output; both are reversed
            // around the aes call per the algorithm (step 4iii)
            p[0].reverse();
            {
                let (p0, p1) = p.split_at_mut(1);
                ffx.ciph(&p0[0], &mut p1[0])?;
            }
            p[1].reverse();

            // (step 4iv)
            let y = numeral::num(&p[1]);

            // one half absorbs y modulo the current modulus, then the
            // halves and moduli both rotate (steps 4v-4viii; the
            // in-round reversal of step 4vi was hoisted out above)
            match which {
                ffx::CipherType::Encrypt => na += y,
                ffx::CipherType::Decrypt => na -= y,
            }
            na = na.rem_euclid(&mu);
            std::mem::swap(&mut mu, &mut mv);
            std::mem::swap(&mut na, &mut nb);
        }

        // undo the starting swap so the halves sit in output order
        if let ffx::CipherType::Decrypt = which {
            std::mem::swap(&mut na, &mut nb);
        }

        // back to digits, and back to the caller's digit order (step 5)
        let mut a = numeral::str_m_radix(radix, u, &na)?;
        let mut b = numeral::str_m_radix(radix, v, &nb)?;
        a.reverse();
        b.reverse();

        Ok([a, b].concat())
    }

    // the string surface is the digit surface wrapped in alphabet
    // conversions
    fn cipher_string(
        &self,
        inp_s: &str,
        opt_twk: Option<&[u8]>,
        which: ffx::CipherType,
    ) -> Result<String> {
        let inp = self.ffx.digits_from_str(inp_s)?;
        let out = self.cipher_digits(&inp, opt_twk, which)?;
        self.ffx.str_from_digits(&out)
    }

    /// Encrypt a numeral string
    ///
    /// Each digit of the input must be less than the radix; the output
    /// has the same length over the same radix. A tweak supplied here
    /// overrides the context default for this call.
    pub fn encrypt_digits(
        &self,
        pt: &[u16],
        twk: Option<&[u8]>,
    ) -> Result<Vec<u16>> {
        self.cipher_digits(pt, twk, ffx::CipherType::Encrypt)
    }

    /// Decrypt a numeral string
    pub fn decrypt_digits(
        &self,
        ct: &[u16],
        twk: Option<&[u8]>,
    ) -> Result<Vec<u16>> {
        self.cipher_digits(ct, twk, ffx::CipherType::Decrypt)
    }

    /// Encrypt a numeral string serialized as two big-endian bytes per
    /// numeral
    ///
    /// The output uses the same serialization and is exactly as long as
    /// the input. A trailing unpaired byte is ignored.
    pub fn encrypt_bytes(
        &self,
        pt: &[u8],
        twk: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        let inp = numeral::bytes_to_numeral_string(pt);
        let out = self.cipher_digits(&inp, twk, ffx::CipherType::Encrypt)?;
        Ok(numeral::numeral_string_to_bytes(&out))
    }

    /// Decrypt a numeral string serialized as two big-endian bytes per
    /// numeral
    pub fn decrypt_bytes(
        &self,
        ct: &[u8],
        twk: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        let inp = numeral::bytes_to_numeral_string(ct);
        let out = self.cipher_digits(&inp, twk, ffx::CipherType::Decrypt)?;
        Ok(numeral::numeral_string_to_bytes(&out))
    }

    /// Encrypt a string over this context's alphabet
    ///
    /// A tweak supplied here overrides the context default for this
    /// call.
    pub fn encrypt(&self, pt: &str, twk: Option<&[u8]>) -> Result<String> {
        self.cipher_string(pt, twk, ffx::CipherType::Encrypt)
    }

    /// Decrypt a string over this context's alphabet
    ///
    /// The tweak, whether the context default or a per-call override,
    /// must match the one used during encryption.
    pub fn decrypt(&self, ct: &str, twk: Option<&[u8]>) -> Result<String> {
        self.cipher_string(ct, twk, ffx::CipherType::Decrypt)
    }
}

/// One-shot encryption under a throwaway context.
pub fn encrypt(
    key: &[u8],
    twk: Option<&[u8]>,
    pt: &str,
    radix: u32,
    alpha: Option<&str>,
) -> Result<String> {
    FF3::new(key, None, radix, alpha)?.encrypt(pt, twk)
}

/// One-shot decryption under a throwaway context.
pub fn decrypt(
    key: &[u8],
    twk: Option<&[u8]>,
    ct: &str,
    radix: u32,
    alpha: Option<&str>,
) -> Result<String> {
    FF3::new(key, None, radix, alpha)?.decrypt(ct, twk)
}
