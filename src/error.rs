//! Error types for the ECIES library.

use thiserror::Error;

/// Error type for ECIES operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Curves mismatch between the two sides of a key agreement, or a
    /// recovered point was not on the expected curve.
    #[error("invalid curve: {0}")]
    InvalidCurve(String),

    /// A public key was malformed, used an unrecognized leading byte, or
    /// failed to parse.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// A private key was malformed or carried an unexpected version.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// No `ECIESParams` default exists for the curve, or the caller supplied
    /// parameters the pipeline refuses (e.g. P-224).
    #[error("unsupported ECIES parameters: {0}")]
    UnsupportedParameters(String),

    /// ECDH produced the point at infinity.
    #[error("shared key is point at infinity")]
    SharedKeyIsPointAtInfinity,

    /// The ECDH shared secret exceeded the size this crate handles.
    #[error("shared key too big")]
    SharedKeyTooBig,

    /// The concatenation KDF was asked for more output than SP 800-56C allows.
    #[error("key data too long")]
    KeyDataTooLong,

    /// The ciphertext was truncated, malformed, or its tag did not verify.
    #[error("invalid message")]
    InvalidMessage,

    /// A DER or PEM import failed.
    #[error("import failed: {0}")]
    Import(String),
}

impl From<der::Error> for Error {
    fn from(err: der::Error) -> Self {
        Error::Import(format!("DER error: {err}"))
    }
}

impl From<pkcs8::Error> for Error {
    fn from(err: pkcs8::Error) -> Self {
        Error::Import(format!("PKCS#8 error: {err}"))
    }
}

impl From<spki::Error> for Error {
    fn from(err: spki::Error) -> Self {
        Error::Import(format!("SPKI error: {err}"))
    }
}

impl From<pem_rfc7468::Error> for Error {
    fn from(err: pem_rfc7468::Error) -> Self {
        Error::Import(format!("PEM error: {err}"))
    }
}

/// Result type for ECIES operations.
pub type Result<T> = std::result::Result<T, Error>;
