//! ECIES encrypt/decrypt orchestration and wire-frame (de)serialization.
//!
//! Orchestration shape: resolve params, mint an ephemeral keypair, run ECDH,
//! derive key material through the KDF, symmetric-encrypt, then tag.

use rand_core::CryptoRngCore;
use sha2::{Digest, Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::kdf::concat_kdf;
use crate::keys::{self, KeyProvider, PublicKey};
use crate::mac::{message_tag, verify_tag};
use crate::params::HashAlg;
use crate::symmetric::{sym_decrypt, sym_encrypt};

fn hash_once(hash: HashAlg, data: &[u8]) -> Vec<u8> {
    match hash {
        HashAlg::Sha256 => Sha256::digest(data).to_vec(),
        HashAlg::Sha384 => Sha384::digest(data).to_vec(),
        HashAlg::Sha512 => Sha512::digest(data).to_vec(),
    }
}

/// Encrypts `m` to `pub_key`, binding the optional context `s1` (into the
/// KDF) and `s2` (into the tag).
pub fn encrypt(
    rng: &mut impl CryptoRngCore,
    pub_key: &PublicKey,
    m: &[u8],
    s1: &[u8],
    s2: &[u8],
) -> Result<Vec<u8>> {
    tracing::debug!(curve = %pub_key.curve(), plaintext_len = m.len(), "ecies encrypt");

    let params = pub_key.resolve_params()?;

    // Step 2-3: ephemeral keypair on the same curve, ECDH against pub_key.
    let ephemeral = keys::generate_ephemeral(rng, pub_key.curve())?;
    let z = ephemeral.generate_shared(pub_key)?;

    // Step 4-5: K = concatKDF(hash, z, S1, 2*KeyLen); Km = hash(Km_raw).
    let k = concat_kdf(params.hash, &z, s1, 2 * params.key_len)?;
    let (ke, km_raw) = k.split_at(params.key_len);
    let km = Zeroizing::new(hash_once(params.hash, km_raw));

    // Step 6: em = IV || CTR(Ke, IV, m).
    let em = sym_encrypt(rng, params, ke, m)?;
    if em.len() < params.block_size {
        // Unreachable given sym_encrypt always prepends a full IV; kept as a
        // real, non-compiled-out check rather than a debug assertion.
        tracing::debug!(result = "error", "ecies encrypt");
        return Err(Error::InvalidMessage);
    }

    // Step 7: tag over em || S2.
    let tag = message_tag(params.hash, &km, &em, s2);

    // Step 8-9: Rb || em || d.
    let r_point = ephemeral.public().to_uncompressed();
    let mut out = Vec::with_capacity(r_point.len() + em.len() + tag.len());
    out.extend_from_slice(&r_point);
    out.extend_from_slice(&em);
    out.extend_from_slice(&tag);

    tracing::debug!(result = "ok", ciphertext_len = out.len(), "ecies encrypt");
    Ok(out)
}

/// Decrypts `ct` using `key`'s ECDH capability, requiring the same `s1`/`s2`
/// the sender used.
pub fn decrypt(
    key: &impl KeyProvider,
    ct: &[u8],
    s1: &[u8],
    s2: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    tracing::debug!(ciphertext_len = ct.len(), "ecies decrypt");

    if ct.is_empty() {
        tracing::debug!(result = "error", "ecies decrypt");
        return Err(Error::InvalidMessage);
    }

    let own_public = key.public();
    let params = own_public.resolve_params()?;
    let curve = own_public.curve();

    let k_len = keys::field_len(curve);
    let h_len = params.hash.output_len();

    // Step 4: dispatch on the leading byte to find where the point ends.
    let m_start = match ct[0] {
        0x02 | 0x03 => 1 + k_len,
        0x04 => 1 + 2 * k_len,
        other => {
            tracing::debug!(result = "error", "ecies decrypt");
            return Err(Error::InvalidPublicKey(format!(
                "unrecognized leading byte: 0x{other:02x}"
            )));
        }
    };

    // Step 5.
    if ct.len() < m_start + h_len + 1 {
        tracing::debug!(result = "error", "ecies decrypt");
        return Err(Error::InvalidMessage);
    }

    // Step 6.
    let m_end = ct.len() - h_len;
    let point = &ct[..m_start];
    let body = &ct[m_start..m_end];
    let tag = &ct[m_end..];

    // Step 7.
    let r_pub = PublicKey::from_sec1_bytes(curve, point, None)?;

    // Step 8.
    let z = key.generate_shared(&r_pub)?;

    // Step 9.
    let k = concat_kdf(params.hash, &z, s1, 2 * params.key_len)?;
    let (ke, km_raw) = k.split_at(params.key_len);
    let km = Zeroizing::new(hash_once(params.hash, km_raw));

    // Step 10-11: constant-time tag compare.
    let expected_tag = message_tag(params.hash, &km, body, s2);
    if !verify_tag(&expected_tag, tag) {
        tracing::debug!(result = "error", "ecies decrypt");
        return Err(Error::InvalidMessage);
    }

    // Step 12.
    let plaintext = sym_decrypt(params, ke, body)?;
    tracing::debug!(result = "ok", plaintext_len = plaintext.len(), "ecies decrypt");
    Ok(Zeroizing::new(plaintext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::generate_key;
    use crate::params::Curve;
    use rand_core::OsRng;

    #[test]
    fn round_trips_empty_and_nonempty_plaintext() {
        for curve in [Curve::P256, Curve::P384, Curve::P521] {
            let key = generate_key(&mut OsRng, curve, None).unwrap();

            for m in [&b""[..], b"hello", b"the quick brown fox"] {
                let ct = encrypt(&mut OsRng, key.public(), m, b"", b"").unwrap();
                let pt = decrypt(&key, &ct, b"", b"").unwrap();
                assert_eq!(pt.as_slice(), m);
            }
        }
    }

    #[test]
    fn tampering_any_byte_breaks_decryption() {
        let key = generate_key(&mut OsRng, Curve::P256, None).unwrap();
        let ct = encrypt(&mut OsRng, key.public(), b"hello", b"", b"").unwrap();

        for i in 0..ct.len() {
            let mut tampered = ct.clone();
            tampered[i] ^= 0x01;
            assert!(decrypt(&key, &tampered, b"", b"").is_err());
        }
    }

    #[test]
    fn mismatched_shared_info_is_rejected() {
        let key = generate_key(&mut OsRng, Curve::P256, None).unwrap();
        let ct = encrypt(&mut OsRng, key.public(), b"hello", b"ctx-v1", b"").unwrap();
        assert!(matches!(
            decrypt(&key, &ct, b"ctx-v2", b""),
            Err(Error::InvalidMessage)
        ));
    }

    #[test]
    fn output_length_matches_point_iv_plaintext_tag_sum() {
        let key = generate_key(&mut OsRng, Curve::P256, None).unwrap();
        let ct = encrypt(&mut OsRng, key.public(), b"hello", b"", b"").unwrap();
        // point_len(65) + BlockSize(16) + len(m)(5) + hash.Size(32) == 118
        assert_eq!(ct.len(), 65 + 16 + 5 + 32);
    }

    #[test]
    fn repeated_encryption_is_nondeterministic() {
        let key = generate_key(&mut OsRng, Curve::P256, None).unwrap();
        let a = encrypt(&mut OsRng, key.public(), b"hello", b"", b"").unwrap();
        let b = encrypt(&mut OsRng, key.public(), b"hello", b"", b"").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn truncated_ciphertext_is_rejected() {
        let key = generate_key(&mut OsRng, Curve::P256, None).unwrap();
        let ct = encrypt(&mut OsRng, key.public(), b"hello", b"", b"").unwrap();
        let too_short = &ct[..65 + 32];
        assert!(matches!(
            decrypt(&key, too_short, b"", b""),
            Err(Error::InvalidMessage)
        ));
    }

    #[test]
    fn unrecognized_leading_byte_is_rejected() {
        let key = generate_key(&mut OsRng, Curve::P256, None).unwrap();
        let mut ct = encrypt(&mut OsRng, key.public(), b"hello", b"", b"").unwrap();
        ct[0] = 0x05;
        assert!(matches!(
            decrypt(&key, &ct, b"", b""),
            Err(Error::InvalidPublicKey(_))
        ));
    }

    #[test]
    fn empty_ciphertext_is_rejected() {
        let key = generate_key(&mut OsRng, Curve::P256, None).unwrap();
        assert!(matches!(decrypt(&key, &[], b"", b""), Err(Error::InvalidMessage)));
    }
}
