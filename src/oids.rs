//! OID registry used by [`crate::serialize`]'s ASN.1 structures.
//!
//! A fixed registry: ANSI X9.62 curve OIDs, and a SECG `1.3.132.1.*` arc for
//! the KDF/symmetric/MAC suite this crate's custom supplemented SPKI
//! advertises. Nothing here is derived or configurable; it is transcribed
//! once and referenced by name everywhere else.

use der::asn1::ObjectIdentifier;

use crate::params::{Curve, HashAlg};

/// `id-ecPublicKeySupplemented`, used in place of the stock `id-ecPublicKey`
/// as the `Algorithm` OID of this crate's public-key SPKI.
pub const ID_EC_PUBLIC_KEY_SUPPLEMENTED: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.2.0");

/// NIST P-224 (ANSI X9.62 `prime224v1` via SECG). Recognized for parsing
/// only; `params::for_curve` never returns `Some` for it.
pub const P224_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.33");
/// NIST P-256.
pub const P256_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
/// NIST P-384.
pub const P384_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");
/// NIST P-521.
pub const P521_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.35");

/// SECG ECDH-with-SHA224 KDF OID (`{1,3,132,1,11,0}`).
pub const ECDH_SHA224_KDF_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.1.11.0");
/// SECG ECDH-with-SHA256 KDF OID.
pub const ECDH_SHA256_KDF_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.1.11.1");
/// SECG ECDH-with-SHA384 KDF OID.
pub const ECDH_SHA384_KDF_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.1.11.2");
/// SECG ECDH-with-SHA512 KDF OID.
pub const ECDH_SHA512_KDF_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.1.11.3");

/// SECG NIST concatenation KDF OID (`{1,3,132,1,17,1}`) — the construction
/// this crate's [`crate::kdf::concat_kdf`] implements.
pub const CONCAT_KDF_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.1.17.1");

/// SECG AES-128-CTR-in-ECIES OID.
pub const AES128_CTR_ECIES_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.1.21.0");
/// SECG AES-192-CTR-in-ECIES OID.
pub const AES192_CTR_ECIES_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.1.21.1");
/// SECG AES-256-CTR-in-ECIES OID.
pub const AES256_CTR_ECIES_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.1.21.2");

/// SECG full-length HMAC OID (`{1,3,132,1,22}`).
pub const HMAC_FULL_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.1.22");

/// Maps a [`Curve`] to its named-curve OID. Unlike [`curve_from_oid`] this is
/// total: every `Curve` variant, including `P224`, has a registered OID.
pub fn curve_oid(curve: Curve) -> ObjectIdentifier {
    match curve {
        Curve::P224 => P224_OID,
        Curve::P256 => P256_OID,
        Curve::P384 => P384_OID,
        Curve::P521 => P521_OID,
    }
}

/// Inverse of [`curve_oid`]; `None` for any OID outside this registry.
pub fn curve_from_oid(oid: &ObjectIdentifier) -> Option<Curve> {
    match *oid {
        P224_OID => Some(Curve::P224),
        P256_OID => Some(Curve::P256),
        P384_OID => Some(Curve::P384),
        P521_OID => Some(Curve::P521),
        _ => None,
    }
}

/// The ECDH-with-SHAx KDF OID matching `hash`.
pub fn kdf_algorithm_oid(hash: HashAlg) -> ObjectIdentifier {
    match hash {
        HashAlg::Sha256 => ECDH_SHA256_KDF_OID,
        HashAlg::Sha384 => ECDH_SHA384_KDF_OID,
        HashAlg::Sha512 => ECDH_SHA512_KDF_OID,
    }
}

/// The AES-CTR-in-ECIES OID matching a symmetric key length in bytes.
pub fn symmetric_algorithm_oid(key_len: usize) -> Option<ObjectIdentifier> {
    match key_len {
        16 => Some(AES128_CTR_ECIES_OID),
        24 => Some(AES192_CTR_ECIES_OID),
        32 => Some(AES256_CTR_ECIES_OID),
        _ => None,
    }
}

/// Inverse of [`symmetric_algorithm_oid`]; `None` for any OID outside the
/// AES-CTR-in-ECIES arc.
pub fn key_len_from_symmetric_oid(oid: &ObjectIdentifier) -> Option<usize> {
    match *oid {
        AES128_CTR_ECIES_OID => Some(16),
        AES192_CTR_ECIES_OID => Some(24),
        AES256_CTR_ECIES_OID => Some(32),
        _ => None,
    }
}

/// Inverse of [`kdf_algorithm_oid`]; `None` for any OID outside the
/// ECDH-with-SHAx KDF arc this crate's `HashAlg` can represent (SHA-224 is
/// recognized by the wider SECG registry but has no `HashAlg` variant).
pub fn hash_from_kdf_algorithm_oid(oid: &ObjectIdentifier) -> Option<HashAlg> {
    match *oid {
        ECDH_SHA256_KDF_OID => Some(HashAlg::Sha256),
        ECDH_SHA384_KDF_OID => Some(HashAlg::Sha384),
        ECDH_SHA512_KDF_OID => Some(HashAlg::Sha512),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_oid_round_trips() {
        for curve in [Curve::P224, Curve::P256, Curve::P384, Curve::P521] {
            let oid = curve_oid(curve);
            assert_eq!(curve_from_oid(&oid), Some(curve));
        }
    }

    #[test]
    fn unknown_oid_has_no_curve() {
        let unrelated = ObjectIdentifier::new_unwrap("1.2.3.4.5");
        assert_eq!(curve_from_oid(&unrelated), None);
    }

    #[test]
    fn symmetric_oid_covers_all_three_aes_variants() {
        assert_eq!(symmetric_algorithm_oid(16), Some(AES128_CTR_ECIES_OID));
        assert_eq!(symmetric_algorithm_oid(24), Some(AES192_CTR_ECIES_OID));
        assert_eq!(symmetric_algorithm_oid(32), Some(AES256_CTR_ECIES_OID));
        assert_eq!(symmetric_algorithm_oid(20), None);
    }

    #[test]
    fn symmetric_oid_round_trips() {
        for key_len in [16, 24, 32] {
            let oid = symmetric_algorithm_oid(key_len).unwrap();
            assert_eq!(key_len_from_symmetric_oid(&oid), Some(key_len));
        }
    }

    #[test]
    fn kdf_oid_round_trips() {
        for hash in [HashAlg::Sha256, HashAlg::Sha384, HashAlg::Sha512] {
            let oid = kdf_algorithm_oid(hash);
            assert_eq!(hash_from_kdf_algorithm_oid(&oid), Some(hash));
        }
    }
}
