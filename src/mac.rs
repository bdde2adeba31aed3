//! HMAC tag computation and constant-time verification.
//!
//! Grounded on `jwe/algorithms.rs::create_hmac`/`encrypt_aes_cbc_hmac`'s
//! `Hmac<Sha512>` usage, generalized over the hash choice; the constant-time
//! compare follows the `subtle::ConstantTimeEq` pattern used throughout the
//! retrieval pack (e.g. `nccgroup-fips203`, `bwesterb-ibe`).

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

use crate::params::HashAlg;

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// Computes the message tag over `msg || s2`, using `km` directly as the
/// HMAC key. The single "hash `Km_raw` once" step of spec §4.6 step 5 already
/// happened at the call site in `pipeline`; `km` here is that already-hashed
/// value, so hashing it again would produce `hash(hash(Km_raw))` and break
/// interop with any spec-conformant peer.
pub fn message_tag(hash: HashAlg, km: &[u8], msg: &[u8], s2: &[u8]) -> Vec<u8> {
    match hash {
        HashAlg::Sha256 => {
            let mut mac =
                HmacSha256::new_from_slice(km).expect("HMAC accepts keys of any length");
            mac.update(msg);
            mac.update(s2);
            mac.finalize().into_bytes().to_vec()
        }
        HashAlg::Sha384 => {
            let mut mac =
                HmacSha384::new_from_slice(km).expect("HMAC accepts keys of any length");
            mac.update(msg);
            mac.update(s2);
            mac.finalize().into_bytes().to_vec()
        }
        HashAlg::Sha512 => {
            let mut mac =
                HmacSha512::new_from_slice(km).expect("HMAC accepts keys of any length");
            mac.update(msg);
            mac.update(s2);
            mac.finalize().into_bytes().to_vec()
        }
    }
}

/// Compares two tags without leaking timing information about where (or
/// whether) they differ.
pub fn verify_tag(expected: &[u8], actual: &[u8]) -> bool {
    if expected.len() != actual.len() {
        return false;
    }
    expected.ct_eq(actual).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_is_deterministic() {
        let a = message_tag(HashAlg::Sha256, b"km", b"msg", b"s2");
        let b = message_tag(HashAlg::Sha256, b"km", b"msg", b"s2");
        assert_eq!(a, b);
    }

    #[test]
    fn tag_length_matches_hash_output() {
        assert_eq!(message_tag(HashAlg::Sha256, b"k", b"m", b"s").len(), 32);
        assert_eq!(message_tag(HashAlg::Sha384, b"k", b"m", b"s").len(), 48);
        assert_eq!(message_tag(HashAlg::Sha512, b"k", b"m", b"s").len(), 64);
    }

    #[test]
    fn tag_changes_with_message_or_shared_info() {
        let base = message_tag(HashAlg::Sha256, b"km", b"msg-a", b"s2");
        let diff_msg = message_tag(HashAlg::Sha256, b"km", b"msg-b", b"s2");
        let diff_s2 = message_tag(HashAlg::Sha256, b"km", b"msg-a", b"s2-b");
        let diff_km = message_tag(HashAlg::Sha256, b"km-b", b"msg-a", b"s2");
        assert_ne!(base, diff_msg);
        assert_ne!(base, diff_s2);
        assert_ne!(base, diff_km);
    }

    #[test]
    fn verify_tag_rejects_mismatches() {
        let tag = message_tag(HashAlg::Sha256, b"km", b"msg", b"s2");
        let mut corrupted = tag.clone();
        corrupted[0] ^= 0xff;

        assert!(verify_tag(&tag, &tag));
        assert!(!verify_tag(&tag, &corrupted));
        assert!(!verify_tag(&tag, &tag[..tag.len() - 1]));
    }

    /// Best-effort smoke test only: true constant-time verification needs
    /// instruction-level timing tools this crate does not attempt to
    /// reproduce. This just checks early-mismatch and late-mismatch tags
    /// both come back `false` via the same code path.
    #[test]
    fn mismatch_position_does_not_change_result() {
        let tag = message_tag(HashAlg::Sha256, b"km", b"msg", b"s2");
        let mut early = tag.clone();
        early[0] ^= 0xff;
        let mut late = tag.clone();
        let last = late.len() - 1;
        late[last] ^= 0xff;

        assert!(!verify_tag(&tag, &early));
        assert!(!verify_tag(&tag, &late));
    }
}
