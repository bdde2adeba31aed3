//! ECIES parameter table: curve/hash combinations and their derived symmetric
//! key and MAC lengths.
//!
//! Maps a named curve to the hash, symmetric key length, and block size used
//! for ECIES operations on that curve.

use std::fmt;

/// An elliptic curve recognized by this crate.
///
/// `P224` is kept only so key import can recognize and name the curve before
/// rejecting it — it is never a valid argument to [`crate::keys::generate_key`]
/// or [`for_curve`]'s `Some` branch (below 128-bit security, out of scope for
/// this crate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    /// NIST P-224. Recognized for parsing, always rejected downstream.
    P224,
    /// NIST P-256.
    P256,
    /// NIST P-384.
    P384,
    /// NIST P-521.
    P521,
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::P224 => write!(f, "P-224"),
            Self::P256 => write!(f, "P-256"),
            Self::P384 => write!(f, "P-384"),
            Self::P521 => write!(f, "P-521"),
        }
    }
}

/// The hash algorithm bound to a curve's default `ECIESParams`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlg {
    /// SHA-256.
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
}

impl HashAlg {
    /// The hash's digest length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// The hash's input block size in bytes, used by the concatenation KDF's
    /// reference iteration count — not the digest length.
    pub fn block_len(self) -> usize {
        match self {
            Self::Sha256 => 64,
            Self::Sha384 | Self::Sha512 => 128,
        }
    }
}

/// Immutable, per-curve ECIES parameters.
///
/// `cipher` and `block_size` are implied rather than stored as a constructor
/// value: this crate always pairs AES with a 16-byte block regardless of key
/// length, so the symmetric layer only needs `key_len` and `block_size` to
/// pick the right AES variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EciesParams {
    /// Hash used by the KDF and MAC.
    pub hash: HashAlg,
    /// Symmetric sub-key length in bytes (16/24/32 for AES-128/192/256).
    pub key_len: usize,
    /// IV length in bytes; equal to the cipher's block size (16 for AES).
    pub block_size: usize,
}

/// Looks up the default `ECIESParams` for `curve`.
///
/// Returns `None` for curves with no default — currently only [`Curve::P224`],
/// whose rejection is how callers observe that P-224 is explicitly refused.
pub fn for_curve(curve: Curve) -> Option<EciesParams> {
    match curve {
        Curve::P224 => None,
        Curve::P256 => Some(EciesParams {
            hash: HashAlg::Sha256,
            key_len: 16,
            block_size: 16,
        }),
        Curve::P384 => Some(EciesParams {
            hash: HashAlg::Sha384,
            key_len: 24,
            block_size: 16,
        }),
        Curve::P521 => Some(EciesParams {
            hash: HashAlg::Sha512,
            key_len: 32,
            block_size: 16,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_table() {
        let p256 = for_curve(Curve::P256).unwrap();
        assert_eq!(p256.hash, HashAlg::Sha256);
        assert_eq!(p256.key_len, 16);
        assert_eq!(p256.block_size, 16);

        let p384 = for_curve(Curve::P384).unwrap();
        assert_eq!(p384.hash, HashAlg::Sha384);
        assert_eq!(p384.key_len, 24);
        assert_eq!(p384.block_size, 16);

        let p521 = for_curve(Curve::P521).unwrap();
        assert_eq!(p521.hash, HashAlg::Sha512);
        assert_eq!(p521.key_len, 32);
        assert_eq!(p521.block_size, 16);
    }

    #[test]
    fn p224_has_no_default_params() {
        assert!(for_curve(Curve::P224).is_none());
    }

    #[test]
    fn hash_output_lengths() {
        assert_eq!(HashAlg::Sha256.output_len(), 32);
        assert_eq!(HashAlg::Sha384.output_len(), 48);
        assert_eq!(HashAlg::Sha512.output_len(), 64);
    }
}
