//! Key pair handling and ECDH.
//!
//! Dispatches ECDH and point (de)serialization per curve, wrapping typed
//! `PublicKey`/`PrivateKey` values bound to an optional [`EciesParams`].

use elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::params::{self, Curve, EciesParams};

/// Number of bits in the curve's field order.
pub fn bit_size(curve: Curve) -> usize {
    match curve {
        Curve::P224 => 224,
        Curve::P256 => 256,
        Curve::P384 => 384,
        Curve::P521 => 521,
    }
}

/// `⌈bitsize/8⌉`: the fixed width of a single field element (a coordinate,
/// or the ECDH shared secret) for `curve`.
pub fn field_len(curve: Curve) -> usize {
    (bit_size(curve) + 7) / 8
}

/// Length in bytes of an uncompressed SEC1 point (`0x04 || X || Y`) on `curve`.
pub fn uncompressed_point_len(curve: Curve) -> usize {
    1 + 2 * field_len(curve)
}

#[derive(Debug, Clone)]
enum CurvePoint {
    P256(p256::PublicKey),
    P384(p384::PublicKey),
    P521(p521::PublicKey),
}

/// A public key: a curve identity plus a point, plus an optional bound
/// [`EciesParams`].
#[derive(Debug, Clone)]
pub struct PublicKey {
    point: CurvePoint,
    params: Option<EciesParams>,
}

impl PublicKey {
    /// The curve this key lives on.
    pub fn curve(&self) -> Curve {
        match self.point {
            CurvePoint::P256(_) => Curve::P256,
            CurvePoint::P384(_) => Curve::P384,
            CurvePoint::P521(_) => Curve::P521,
        }
    }

    /// The bound parameters, if any were set at key creation.
    pub fn params(&self) -> Option<EciesParams> {
        self.params
    }

    /// Resolves this key's effective parameters: the bound value if present,
    /// otherwise the curve default.
    pub fn resolve_params(&self) -> Result<EciesParams> {
        if let Some(p) = self.params {
            return Ok(p);
        }
        params::for_curve(self.curve())
            .ok_or_else(|| Error::UnsupportedParameters(self.curve().to_string()))
    }

    /// Encodes this key as an uncompressed SEC1 point (`0x04 || X || Y`).
    pub fn to_uncompressed(&self) -> Vec<u8> {
        match &self.point {
            CurvePoint::P256(k) => k.to_encoded_point(false).as_bytes().to_vec(),
            CurvePoint::P384(k) => k.to_encoded_point(false).as_bytes().to_vec(),
            CurvePoint::P521(k) => k.to_encoded_point(false).as_bytes().to_vec(),
        }
    }

    /// Parses a SEC1-encoded point (compressed or uncompressed) on `curve`,
    /// binding `params` to the result.
    ///
    /// Splits encoding validation from the on-curve check, per decrypt step 7
    /// of §4.6: a malformed encoding is [`Error::InvalidPublicKey`], while a
    /// well-formed encoding whose coordinates are not on `curve` is the
    /// distinct [`Error::InvalidCurve`].
    pub fn from_sec1_bytes(
        curve: Curve,
        bytes: &[u8],
        params: Option<EciesParams>,
    ) -> Result<Self> {
        let point = match curve {
            Curve::P224 => {
                return Err(Error::UnsupportedParameters(Curve::P224.to_string()));
            }
            Curve::P256 => {
                let encoded = p256::EncodedPoint::from_bytes(bytes)
                    .map_err(|e| Error::InvalidPublicKey(e.to_string()))?;
                let affine: Option<p256::AffinePoint> =
                    Option::from(p256::AffinePoint::from_encoded_point(&encoded));
                let affine =
                    affine.ok_or_else(|| Error::InvalidCurve("point not on curve".into()))?;
                CurvePoint::P256(
                    p256::PublicKey::from_affine(affine)
                        .map_err(|e| Error::InvalidPublicKey(e.to_string()))?,
                )
            }
            Curve::P384 => {
                let encoded = p384::EncodedPoint::from_bytes(bytes)
                    .map_err(|e| Error::InvalidPublicKey(e.to_string()))?;
                let affine: Option<p384::AffinePoint> =
                    Option::from(p384::AffinePoint::from_encoded_point(&encoded));
                let affine =
                    affine.ok_or_else(|| Error::InvalidCurve("point not on curve".into()))?;
                CurvePoint::P384(
                    p384::PublicKey::from_affine(affine)
                        .map_err(|e| Error::InvalidPublicKey(e.to_string()))?,
                )
            }
            Curve::P521 => {
                let encoded = p521::EncodedPoint::from_bytes(bytes)
                    .map_err(|e| Error::InvalidPublicKey(e.to_string()))?;
                let affine: Option<p521::AffinePoint> =
                    Option::from(p521::AffinePoint::from_encoded_point(&encoded));
                let affine =
                    affine.ok_or_else(|| Error::InvalidCurve("point not on curve".into()))?;
                CurvePoint::P521(
                    p521::PublicKey::from_affine(affine)
                        .map_err(|e| Error::InvalidPublicKey(e.to_string()))?,
                )
            }
        };
        Ok(Self { point, params })
    }

    /// Constructs a [`PublicKey`] directly from a typed `p256` key, binding
    /// `params`. Used by [`crate::serialize`]'s ECDSA interop import.
    pub(crate) fn from_p256(key: p256::PublicKey, params: Option<EciesParams>) -> Self {
        Self {
            point: CurvePoint::P256(key),
            params,
        }
    }

    /// As [`Self::from_p256`], for `p384`.
    pub(crate) fn from_p384(key: p384::PublicKey, params: Option<EciesParams>) -> Self {
        Self {
            point: CurvePoint::P384(key),
            params,
        }
    }

    /// As [`Self::from_p256`], for `p521`.
    pub(crate) fn from_p521(key: p521::PublicKey, params: Option<EciesParams>) -> Self {
        Self {
            point: CurvePoint::P521(key),
            params,
        }
    }

    pub(crate) fn as_p256(&self) -> Result<&p256::PublicKey> {
        match &self.point {
            CurvePoint::P256(k) => Ok(k),
            _ => Err(Error::InvalidCurve("expected P-256".into())),
        }
    }

    pub(crate) fn as_p384(&self) -> Result<&p384::PublicKey> {
        match &self.point {
            CurvePoint::P384(k) => Ok(k),
            _ => Err(Error::InvalidCurve("expected P-384".into())),
        }
    }

    pub(crate) fn as_p521(&self) -> Result<&p521::PublicKey> {
        match &self.point {
            CurvePoint::P521(k) => Ok(k),
            _ => Err(Error::InvalidCurve("expected P-521".into())),
        }
    }

    pub(crate) fn p256_affine(&self) -> Result<&p256::AffinePoint> {
        match &self.point {
            CurvePoint::P256(k) => Ok(k.as_affine()),
            _ => Err(Error::InvalidCurve("expected P-256".into())),
        }
    }

    pub(crate) fn p384_affine(&self) -> Result<&p384::AffinePoint> {
        match &self.point {
            CurvePoint::P384(k) => Ok(k.as_affine()),
            _ => Err(Error::InvalidCurve("expected P-384".into())),
        }
    }

    pub(crate) fn p521_affine(&self) -> Result<&p521::AffinePoint> {
        match &self.point {
            CurvePoint::P521(k) => Ok(k.as_affine()),
            _ => Err(Error::InvalidCurve("expected P-521".into())),
        }
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_uncompressed() == other.to_uncompressed() && self.params == other.params
    }
}

#[derive(Clone)]
enum CurveSecret {
    P256(p256::SecretKey),
    P384(p384::SecretKey),
    P521(p521::SecretKey),
}

/// A private key: a [`PublicKey`] together with the scalar `D` that produced
/// it. `D` is never exposed directly; only [`KeyProvider`]
/// operations are public, so an opaque (e.g. HSM-backed) implementation of
/// the same capability can stand in without ever materializing `D`.
#[derive(Clone)]
pub struct PrivateKey {
    secret: CurveSecret,
    public: PublicKey,
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

impl PrivateKey {
    /// The associated public key.
    pub fn public(&self) -> &PublicKey {
        &self.public
    }

    /// Performs ECDH with `peer`, returning the shared x-coordinate
    /// left-padded to exactly `⌈bitsize/8⌉` bytes.
    ///
    /// Fails with [`Error::InvalidCurve`] if `peer` is on a different curve,
    /// and with [`Error::SharedKeyIsPointAtInfinity`] in the (practically
    /// unreachable, given on-curve non-identity typed inputs) degenerate case.
    pub fn generate_shared(&self, peer: &PublicKey) -> Result<Zeroizing<Vec<u8>>> {
        let raw = match (&self.secret, &peer.point) {
            (CurveSecret::P256(sk), CurvePoint::P256(_)) => {
                let affine = peer.p256_affine()?;
                let shared = p256::ecdh::diffie_hellman(sk.to_nonzero_scalar(), affine);
                shared.raw_secret_bytes().to_vec()
            }
            (CurveSecret::P384(sk), CurvePoint::P384(_)) => {
                let affine = peer.p384_affine()?;
                let shared = p384::ecdh::diffie_hellman(sk.to_nonzero_scalar(), affine);
                shared.raw_secret_bytes().to_vec()
            }
            (CurveSecret::P521(sk), CurvePoint::P521(_)) => {
                let affine = peer.p521_affine()?;
                let shared = p521::ecdh::diffie_hellman(sk.to_nonzero_scalar(), affine);
                shared.raw_secret_bytes().to_vec()
            }
            _ => {
                return Err(Error::InvalidCurve(format!(
                    "cannot agree {} private key with {} public key",
                    self.public.curve(),
                    peer.curve()
                )))
            }
        };

        if raw.iter().all(|b| *b == 0) {
            return Err(Error::SharedKeyIsPointAtInfinity);
        }

        Ok(Zeroizing::new(raw))
    }
}

impl PrivateKey {
    /// The raw scalar `D`, fixed-width per curve. Used only by
    /// [`crate::serialize`] to build the private-key DER encoding; never
    /// logged and always returned zeroizing.
    pub(crate) fn secret_scalar_bytes(&self) -> Zeroizing<Vec<u8>> {
        match &self.secret {
            CurveSecret::P256(sk) => Zeroizing::new(sk.to_bytes().to_vec()),
            CurveSecret::P384(sk) => Zeroizing::new(sk.to_bytes().to_vec()),
            CurveSecret::P521(sk) => Zeroizing::new(sk.to_bytes().to_vec()),
        }
    }
}

/// Reconstructs a [`PrivateKey`] from a raw scalar `D` on `curve`, binding
/// `params` (or the curve default). Used only by [`crate::serialize`]'s DER
/// import path — callers building fresh keys should use [`generate_key`].
pub(crate) fn private_key_from_scalar(
    curve: Curve,
    bytes: &[u8],
    params: Option<EciesParams>,
) -> Result<PrivateKey> {
    let resolved = match params {
        Some(p) => Some(p),
        None => params::for_curve(curve),
    };

    let secret = match curve {
        Curve::P224 => {
            return Err(Error::InvalidPrivateKey(format!(
                "{} keys are not supported",
                Curve::P224
            )))
        }
        Curve::P256 => CurveSecret::P256(
            p256::SecretKey::from_slice(bytes).map_err(|e| Error::InvalidPrivateKey(e.to_string()))?,
        ),
        Curve::P384 => CurveSecret::P384(
            p384::SecretKey::from_slice(bytes).map_err(|e| Error::InvalidPrivateKey(e.to_string()))?,
        ),
        Curve::P521 => CurveSecret::P521(
            p521::SecretKey::from_slice(bytes).map_err(|e| Error::InvalidPrivateKey(e.to_string()))?,
        ),
    };

    let point = match &secret {
        CurveSecret::P256(sk) => CurvePoint::P256(sk.public_key()),
        CurveSecret::P384(sk) => CurvePoint::P384(sk.public_key()),
        CurveSecret::P521(sk) => CurvePoint::P521(sk.public_key()),
    };

    Ok(PrivateKey {
        secret,
        public: PublicKey {
            point,
            params: resolved,
        },
    })
}

/// Anything that can produce its [`PublicKey`] and perform ECDH against a
/// peer's public key, without necessarily exposing its private scalar.
/// A local [`PrivateKey`] satisfies it directly; a hardware-backed key can
/// implement it without ever bringing `D` into process memory.
pub trait KeyProvider {
    /// This key's public half.
    fn public(&self) -> &PublicKey;

    /// ECDH against `peer`, returning the shared secret exactly as
    /// [`PrivateKey::generate_shared`] does.
    fn generate_shared(&self, peer: &PublicKey) -> Result<Zeroizing<Vec<u8>>>;
}

impl KeyProvider for PrivateKey {
    fn public(&self) -> &PublicKey {
        self.public()
    }

    fn generate_shared(&self, peer: &PublicKey) -> Result<Zeroizing<Vec<u8>>> {
        PrivateKey::generate_shared(self, peer)
    }
}

/// Generates a fresh private key on `curve`, binding `params` (or the curve
/// default) to the resulting public key.
///
/// Fails with [`Error::UnsupportedParameters`] if `params` is `None` and
/// `curve` has no default (P-224, or any curve requested via `params` that
/// names a key length the curve's scalar field cannot support).
pub fn generate_key(
    rng: &mut impl CryptoRngCore,
    curve: Curve,
    params: Option<EciesParams>,
) -> Result<PrivateKey> {
    let resolved = match params {
        Some(p) => Some(p),
        None => Some(
            params::for_curve(curve)
                .ok_or_else(|| Error::UnsupportedParameters(curve.to_string()))?,
        ),
    };

    let secret = match curve {
        Curve::P224 => return Err(Error::UnsupportedParameters(Curve::P224.to_string())),
        Curve::P256 => CurveSecret::P256(p256::SecretKey::random(rng)),
        Curve::P384 => CurveSecret::P384(p384::SecretKey::random(rng)),
        Curve::P521 => CurveSecret::P521(p521::SecretKey::random(rng)),
    };

    let point = match &secret {
        CurveSecret::P256(sk) => CurvePoint::P256(sk.public_key()),
        CurveSecret::P384(sk) => CurvePoint::P384(sk.public_key()),
        CurveSecret::P521(sk) => CurvePoint::P521(sk.public_key()),
    };

    Ok(PrivateKey {
        secret,
        public: PublicKey {
            point,
            params: resolved,
        },
    })
}

/// Generates an ephemeral key pair on the same curve as `template`, used by
/// the encrypt path for the per-message `R` key.
pub(crate) fn generate_ephemeral(
    rng: &mut impl CryptoRngCore,
    curve: Curve,
) -> Result<PrivateKey> {
    generate_key(rng, curve, params::for_curve(curve))
}
