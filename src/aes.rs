use crate::error::Error;
use crate::result::Result;

use aes::cipher::BlockEncryptMut;
use aes::cipher::KeyIvInit;

const BLOCK_SIZE: usize = 16;
const ZERO_IV: [u8; BLOCK_SIZE] = [0u8; BLOCK_SIZE];

#[derive(Clone)]
enum Chain {
    Aes128(cbc::Encryptor<aes::Aes128>),
    Aes192(cbc::Encryptor<aes::Aes192>),
    Aes256(cbc::Encryptor<aes::Aes256>),
}

// runs one expression against whichever encryptor the key size selected
macro_rules! each_chain {
    ($chain:expr, $enc:ident => $body:expr) => {
        match $chain {
            Chain::Aes128($enc) => $body,
            Chain::Aes192($enc) => $body,
            Chain::Aes256($enc) => $body,
        }
    };
}

impl Chain {
    // one cbc step; the encryptor carries the running chain value
    fn step(&mut self, src: &[u8], dst: &mut [u8]) {
        each_chain!(self, e => e.encrypt_block_b2b_mut(src.into(), dst.into()))
    }
}

/// A chaining capability over AES with a fixed all-zero IV.
///
/// The IV is baked in at construction and every call works on a clone,
/// so no chaining state outlives a call and a `Cipher` may serve
/// several threads at once.
#[derive(Clone)]
pub struct Cipher {
    chain: Chain,
}

impl Cipher {
    pub fn new(key: &[u8]) -> Result<Cipher> {
        let iv = ZERO_IV.as_slice();
        let chain = match key.len() {
            16 => Chain::Aes128(cbc::Encryptor::new(key.into(), iv.into())),
            24 => Chain::Aes192(cbc::Encryptor::new(key.into(), iv.into())),
            32 => Chain::Aes256(cbc::Encryptor::new(key.into(), iv.into())),
            n => {
                return Err(Error::new(&format!(
                    "invalid key length; expected 16, 24, or 32 bytes, got {}",
                    n
                )))
            }
        };

        Ok(Cipher { chain })
    }

    /// CBC-MAC under the zero IV: encrypts `src` in CBC mode and leaves
    /// the final ciphertext block in `dst`. `src` must be a positive
    /// multiple of the block size and `dst` exactly one block.
    pub fn mac(&self, src: &[u8], dst: &mut [u8]) -> Result<()> {
        if src.is_empty() || src.len() % BLOCK_SIZE != 0 {
            return Err(Error::new(&format!(
                "chaining input must be a positive multiple of {} bytes, got {}",
                BLOCK_SIZE,
                src.len()
            )));
        }
        if dst.len() != BLOCK_SIZE {
            return Err(Error::new(&format!(
                "chaining output must be exactly {} bytes, got {}",
                BLOCK_SIZE,
                dst.len()
            )));
        }

        let mut chain = self.chain.clone();
        for blk in src.chunks_exact(BLOCK_SIZE) {
            chain.step(blk, dst);
        }

        Ok(())
    }

    /// One application of the raw block permutation to the first block
    /// of `src`: CBC under the zero IV degenerates to plain AES on a
    /// single block.
    pub fn encrypt_one(&self, src: &[u8], dst: &mut [u8]) -> Result<()> {
        if src.len() < BLOCK_SIZE {
            return Err(Error::new(&format!(
                "block input must hold at least {} bytes, got {}",
                BLOCK_SIZE,
                src.len()
            )));
        }
        self.mac(&src[..BLOCK_SIZE], dst)
    }

    pub fn block_size(&self) -> usize {
        BLOCK_SIZE
    }
}
