//! Conversions between numeral strings, integers, and byte strings
//!
//! A numeral string is a sequence of `u16` digits, most significant first,
//! each less than the radix. These functions are the leaf operations the
//! Feistel drivers are built from; they are also part of the public
//! surface so that callers can prepare inputs (in particular, `rev_b` for
//! the FF3 key convention).

use crate::error::Error;
use crate::result::Result;

use byteorder::ByteOrder;
use num_bigint::{BigInt, Sign};
use num_traits::{ToPrimitive, Zero};

/// The integer a numeral string represents: `x[0]*r^(n-1) + ... + x[n-1]`.
///
/// An empty string represents zero.
pub fn num_radix(x: &[u16], radix: u32) -> BigInt {
    let mut acc = BigInt::zero();
    for &d in x {
        acc *= radix;
        acc += BigInt::from(d);
    }
    acc
}

/// The inverse of [`num_radix`] on `[0, radix^m)`: exactly `m` digits,
/// most significant first, zero-padded on the left.
pub fn str_m_radix(radix: u32, m: usize, x: &BigInt) -> Result<Vec<u16>> {
    if !(2..=(1 << 16)).contains(&radix) {
        return Err(Error::new(&format!(
            "invalid radix; expected between 2 and 65536, got {}",
            radix
        )));
    }
    if x.sign() == Sign::Minus {
        return Err(Error::new("cannot encode a negative value as numerals"));
    }

    let r = BigInt::from(radix);
    let mut q = x.clone();
    let mut out = vec![0u16; m];
    for i in (0..m).rev() {
        let d = &q % &r;
        q /= &r;
        out[i] = d.to_u16().unwrap();
    }

    if !q.is_zero() {
        return Err(Error::new(&format!(
            "value does not fit in {} numerals of radix {}",
            m, radix
        )));
    }

    Ok(out)
}

/// Interprets a byte string as a big-endian unsigned integer.
pub fn num(b: &[u8]) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, b)
}

/// Encodes a nonnegative integer as exactly `b` big-endian bytes,
/// zero-padded on the left. The value must be less than `256^b`.
pub fn as_b_bytes(x: &BigInt, b: usize) -> Result<Vec<u8>> {
    if x.sign() == Sign::Minus {
        return Err(Error::new("cannot encode a negative value as bytes"));
    }
    if x.is_zero() {
        return Ok(vec![0; b]);
    }

    // resizing the little-endian form pads on the high side for free;
    // one reversal then yields the left-padded big-endian encoding
    let (_, mut v) = x.to_bytes_le();
    if v.len() > b {
        return Err(Error::new(&format!(
            "value does not fit in {} bytes",
            b
        )));
    }
    v.resize(b, 0);
    v.reverse();
    Ok(v)
}

/// Reverses a numeral string into a fresh buffer.
pub fn rev(x: &[u16]) -> Vec<u16> {
    let mut out = x.to_vec();
    out.reverse();
    out
}

/// Reverses a byte string into a fresh buffer.
///
/// FF3 requires the block cipher to be keyed with the byte-reversed user
/// key; this is the helper callers apply to the key before constructing
/// an [`crate::ff3::FF3`] context.
pub fn rev_b(b: &[u8]) -> Vec<u8> {
    let mut out = b.to_vec();
    out.reverse();
    out
}

/// Whether every digit of `x` is less than `radix`.
pub fn is_numeral_string_valid(x: &[u16], radix: u32) -> bool {
    x.iter().all(|&d| u32::from(d) < radix)
}

/// Serializes a numeral string as two big-endian bytes per numeral.
pub fn numeral_string_to_bytes(x: &[u16]) -> Vec<u8> {
    let mut out = vec![0u8; 2 * x.len()];
    for (i, &d) in x.iter().enumerate() {
        byteorder::BigEndian::write_u16(&mut out[2 * i..2 * i + 2], d);
    }
    out
}

/// The inverse of [`numeral_string_to_bytes`]. A trailing unpaired byte
/// is ignored; the result holds `len / 2` numerals.
pub fn bytes_to_numeral_string(b: &[u8]) -> Vec<u16> {
    let mut out = Vec::with_capacity(b.len() / 2);
    for pair in b.chunks_exact(2) {
        out.push(byteorder::BigEndian::read_u16(pair));
    }
    out
}
