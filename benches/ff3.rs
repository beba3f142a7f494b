extern crate bencher;

const TWEAK: [u8; 8] = [0; 8];

fn context(b: &mut bencher::Bencher) {
    b.iter(|| {
        radix_fpe::ff3::FF3::new(&[0; 32], Some(&TWEAK), 26, None).unwrap()
    });
}

fn encrypt(b: &mut bencher::Bencher) {
    let ff3 =
        radix_fpe::ff3::FF3::new(&[0; 32], Some(&TWEAK), 26, None).unwrap();
    b.iter(|| ff3.encrypt("0123456789", None));
}

fn decrypt(b: &mut bencher::Bencher) {
    let ff3 =
        radix_fpe::ff3::FF3::new(&[0; 32], Some(&TWEAK), 26, None).unwrap();
    let ct = ff3.encrypt("0123456789", None).unwrap();
    b.iter(|| ff3.decrypt(&ct, None));
}

bencher::benchmark_group!(benches, context, encrypt, decrypt);
bencher::benchmark_main!(benches);
