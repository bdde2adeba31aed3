//! AES-CTR symmetric layer: random IV prefix, no AEAD tag (the MAC is
//! computed separately over the wire frame by [`crate::mac`]).
//!
//! Dispatches AES-128/192/256 by `EciesParams::key_len`, driving the
//! `aes`/`ctr` cipher traits directly rather than through a higher-level
//! AEAD wrapper.

use aes::{Aes128, Aes192, Aes256};
use ctr::cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;
use rand_core::CryptoRngCore;

use crate::error::{Error, Result};
use crate::params::EciesParams;

type Aes128Ctr = Ctr128BE<Aes128>;
type Aes192Ctr = Ctr128BE<Aes192>;
type Aes256Ctr = Ctr128BE<Aes256>;

/// Encrypts `plaintext` under `key` (`Ke`, length `params.key_len`), with a
/// fresh random IV of `params.block_size` bytes prepended to the output.
pub fn sym_encrypt(
    rng: &mut impl CryptoRngCore,
    params: EciesParams,
    key: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    if key.len() != params.key_len {
        return Err(Error::InvalidMessage);
    }

    let mut iv = vec![0u8; params.block_size];
    rng.fill_bytes(&mut iv);

    let mut buf = plaintext.to_vec();
    apply_keystream(params, key, &iv, &mut buf)?;

    let mut out = Vec::with_capacity(iv.len() + buf.len());
    out.extend_from_slice(&iv);
    out.append(&mut buf);
    Ok(out)
}

/// Inverse of [`sym_encrypt`]: splits the leading IV off `blob` and decrypts
/// the remainder under `key`.
///
/// Fails with [`Error::InvalidMessage`] if `blob` is shorter than a single IV.
pub fn sym_decrypt(params: EciesParams, key: &[u8], blob: &[u8]) -> Result<Vec<u8>> {
    if key.len() != params.key_len {
        return Err(Error::InvalidMessage);
    }
    if blob.len() < params.block_size {
        return Err(Error::InvalidMessage);
    }

    let (iv, ciphertext) = blob.split_at(params.block_size);
    let mut buf = ciphertext.to_vec();
    apply_keystream(params, key, iv, &mut buf)?;
    Ok(buf)
}

fn apply_keystream(params: EciesParams, key: &[u8], iv: &[u8], buf: &mut [u8]) -> Result<()> {
    match params.key_len {
        16 => {
            let mut cipher = Aes128Ctr::new_from_slices(key, iv)
                .map_err(|_| Error::InvalidMessage)?;
            cipher.apply_keystream(buf);
        }
        24 => {
            let mut cipher = Aes192Ctr::new_from_slices(key, iv)
                .map_err(|_| Error::InvalidMessage)?;
            cipher.apply_keystream(buf);
        }
        32 => {
            let mut cipher = Aes256Ctr::new_from_slices(key, iv)
                .map_err(|_| Error::InvalidMessage)?;
            cipher.apply_keystream(buf);
        }
        other => {
            return Err(Error::UnsupportedParameters(format!(
                "unsupported AES key length: {other} bytes"
            )))
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::HashAlg;
    use rand_core::OsRng;

    fn params(key_len: usize) -> EciesParams {
        EciesParams {
            hash: HashAlg::Sha256,
            key_len,
            block_size: 16,
        }
    }

    #[test]
    fn round_trips_for_every_key_length() {
        for key_len in [16, 24, 32] {
            let p = params(key_len);
            let key = vec![0x42u8; key_len];
            let plaintext = b"the quick brown fox jumps over the lazy dog";

            let ciphertext = sym_encrypt(&mut OsRng, p, &key, plaintext).unwrap();
            assert_eq!(ciphertext.len(), p.block_size + plaintext.len());

            let decrypted = sym_decrypt(p, &key, &ciphertext).unwrap();
            assert_eq!(decrypted, plaintext);
        }
    }

    #[test]
    fn iv_is_randomized_between_calls() {
        let p = params(16);
        let key = vec![0x11u8; 16];
        let a = sym_encrypt(&mut OsRng, p, &key, b"same message").unwrap();
        let b = sym_encrypt(&mut OsRng, p, &key, b"same message").unwrap();
        assert_ne!(a[..p.block_size], b[..p.block_size]);
    }

    #[test]
    fn truncated_blob_is_rejected() {
        let p = params(16);
        let key = vec![0x11u8; 16];
        assert!(matches!(
            sym_decrypt(p, &key, &[0u8; 4]),
            Err(Error::InvalidMessage)
        ));
    }
}
