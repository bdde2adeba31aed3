//! Elliptic Curve Integrated Encryption Scheme (ECIES) over NIST P-256,
//! P-384, and P-521, as described in SEC 1 §5.1 and NIST SP 800-56A/C.
//!
//! This crate provides:
//! - Ephemeral-key generation and fixed-width ECDH ([`keys`]).
//! - The NIST SP 800-56C concatenation KDF ([`kdf`]).
//! - An AES-CTR symmetric layer with a random IV prefix ([`symmetric`]).
//! - HMAC tag computation and constant-time verification ([`mac`]).
//! - End-to-end `encrypt`/`decrypt` orchestration and wire-frame parsing
//!   ([`pipeline`]).
//! - DER/PEM import and export of ECIES keys, plus ECDSA interop
//!   ([`serialize`], [`oids`]).
//!
//! The crate carries no algorithm identifier on the wire: sender and
//! receiver must agree on curve and parameters out of band. See each
//! module's documentation for the wire layout and error conditions.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod kdf;
pub mod keys;
pub mod mac;
pub mod oids;
pub mod params;
pub mod pipeline;
pub mod serialize;
pub mod symmetric;


pub use error::{Error, Result};
pub use keys::{generate_key, KeyProvider, PrivateKey, PublicKey};
pub use params::{Curve, EciesParams, HashAlg};
pub use pipeline::{decrypt, encrypt};
pub use serialize::{
    export_private_pem, export_public_pem, import_private_auto, import_private_pem,
    import_public_auto, import_public_pem, marshal_private, marshal_public,
    public_from_ecdsa_der, public_to_ecdsa_der, unmarshal_private, unmarshal_public,
};
