//! Format-preserving encryption with FF1 and FF3
//!
//! The two Feistel modes of NIST SP 800-38G map a numeral string (a
//! sequence of digits, each below some radix) to a ciphertext numeral
//! string of the same length over the same radix. Nothing about the
//! shape of the data changes; only the digit values do.
//!
//! Digits are `u16` values, which lets the radix run up to 2^16. On top
//! of the digit-level interface sits a string layer: a context can
//! carry an alphabet mapping symbols to digit values, and without an
//! explicit alphabet, radixes up to 62 draw on a built-in one (`0`
//! through `9`, then `a` through `z`, then `A` through `Z`). Larger
//! radixes stay reachable through digits. A third surface accepts the
//! numeral string packed two big-endian bytes per digit.
//!
//! Besides the NIST round counts, each mode offers an `extended`
//! variant that spends more Feistel rounds on short inputs; extended
//! FF3 additionally reworks how the tweak and round index enter the
//! round function. A ciphertext produced under one variant cannot be
//! decrypted under the other.
//!
//! Transforms leave no state behind in the context, so one context may
//! serve several threads at once.
//!
//! # Example
//! ```rust
//! // AES-128 key from the SP 800-38G FF1 sample data
//! let ff1 = radix_fpe::ff1::FF1::new(
//!     &[
//!         0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6,
//!         0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f, 0x3c,
//!     ],
//!     None, // no default tweak; the empty tweak applies
//!     10,
//!     None, // decimal digits come from the built-in alphabet
//! ).unwrap();
//!
//! let ct = ff1.encrypt("0123456789", None).unwrap();
//! assert!(ct == "2433477484");
//!
//! let pt = ff1.decrypt(&ct, None).unwrap();
//! assert!(pt == "0123456789");
//! ```

pub(crate) mod aes;
pub(crate) mod alphabet;
pub mod error;
pub mod ff1;
pub mod ff3;
pub(crate) mod ffx;
pub mod numeral;

pub use ffx::RoundSchedule;

/// The crate-wide result alias
pub mod result {
    /// `Result` carrying [`crate::error::Error`] on failure
    pub type Result<T> = std::result::Result<T, crate::error::Error>;
}
