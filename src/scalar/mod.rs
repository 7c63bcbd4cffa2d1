//! Private-key scalars for secp256k1 and the two ways of producing them:
//! rejection sampling from a CSPRNG, and a fixed corpus of boundary values.
// • n = 0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141

use primitive_types::U256;
use rand::CryptoRng;
use tracing::{debug, warn};

use crate::error::Error;

pub const SCALAR_SIZE: usize = 32;

/// Upper bound on rejection-sampling draws for a single scalar.
pub const MAX_SAMPLING_ATTEMPTS: usize = 128;

/// Order of the secp256k1 generator point.
pub const CURVE_ORDER: U256 = U256([
    0xBFD25E8CD0364141, // least significant limb
    0xBAAEDCE6AF48A03B,
    0xFFFFFFFFFFFFFFFE,
    0xFFFFFFFFFFFFFFFF, // most significant limb
]);

/// A private key in the range `(0, n)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Scalar(U256);

impl Scalar {
    pub fn new(value: U256) -> Result<Self, Error> {
        if value.is_zero() || value >= CURVE_ORDER {
            return Err(Error::InvalidScalar(hex::encode(value.to_big_endian())));
        }
        Ok(Self(value))
    }

    /// Reads `bytes` as a big-endian integer.
    pub fn from_bytes(bytes: &[u8; SCALAR_SIZE]) -> Result<Self, Error> {
        Self::new(U256::from_big_endian(bytes))
    }

    pub fn to_bytes(&self) -> [u8; SCALAR_SIZE] {
        self.0.to_big_endian()
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }
}

/// Draws 32 bytes at a time until one lands in `(0, n)`.
///
/// Gives up with [`Error::SamplingExhausted`] after `max_attempts` draws. With a
/// working RNG the first draw is accepted with probability `1 - 2^-127`.
pub fn random_scalar<R: CryptoRng + ?Sized>(
    rng: &mut R,
    max_attempts: usize,
) -> Result<Scalar, Error> {
    for attempt in 1..=max_attempts {
        let mut candidate = [0u8; SCALAR_SIZE];
        rng.fill_bytes(&mut candidate);
        match Scalar::from_bytes(&candidate) {
            Ok(scalar) => return Ok(scalar),
            Err(err) => debug!(attempt, %err, "rejected scalar candidate"),
        }
    }
    Err(Error::SamplingExhausted(max_attempts))
}

/// Raw boundary-value keys, in output order.
pub fn edge_case_candidates() -> [[u8; SCALAR_SIZE]; 6] {
    let mut one = [0u8; SCALAR_SIZE];
    one[31] = 1;
    let mut two = [0u8; SCALAR_SIZE];
    two[31] = 2;
    let mut small = [0u8; SCALAR_SIZE];
    small[31] = 0x42;
    let mut high_byte = [0xffu8; SCALAR_SIZE];
    high_byte[0] = 0x7f;

    [
        one,
        two,
        small,
        high_byte,
        (CURVE_ORDER - U256::one()).to_big_endian(),
        (CURVE_ORDER - U256::from(2u8)).to_big_endian(),
    ]
}

/// Keeps the candidates that are valid scalars. Invalid ones are logged and dropped.
pub fn validate_candidates(candidates: &[[u8; SCALAR_SIZE]]) -> Vec<Scalar> {
    candidates
        .iter()
        .filter_map(|candidate| match Scalar::from_bytes(candidate) {
            Ok(scalar) => Some(scalar),
            Err(err) => {
                warn!(%err, "skipping edge-case key");
                None
            }
        })
        .collect()
}

pub fn edge_case_scalars() -> Vec<Scalar> {
    validate_candidates(&edge_case_candidates())
}
