use k256::ecdsa::SigningKey;
use primitive_types::U256;

use super::{
    COMPRESSED_PUBKEY_SIZE, PublicKeyEncodings, RECOVERABLE_SIGNATURE_SIZE, Secp256k1Backend,
    UNCOMPRESSED_PUBKEY_SIZE,
};
use crate::{
    digest::Digest,
    error::Error,
    scalar::{CURVE_ORDER, SCALAR_SIZE},
};

/// RustCrypto's pure-Rust secp256k1 (`k256`).
#[derive(Debug, Default, Clone, Copy)]
pub struct K256Backend;

impl K256Backend {
    fn signing_key(privkey: &[u8; SCALAR_SIZE]) -> Result<SigningKey, k256::ecdsa::Error> {
        SigningKey::from_slice(privkey)
    }
}

/// RFC 6979 bits2octets: the digest taken mod `n`.
///
/// `k256` feeds the raw prehash into its nonce HMAC, so a digest at or above
/// `n` yields a different `k` than libsecp256k1 unless it is reduced first.
/// One subtraction suffices since `2^256 < 2n`.
fn reduce_digest(digest: &Digest) -> Digest {
    let z = U256::from_big_endian(digest);
    if z >= CURVE_ORDER {
        (z - CURVE_ORDER).to_big_endian()
    } else {
        *digest
    }
}

impl Secp256k1Backend for K256Backend {
    fn name(&self) -> &'static str {
        "k256"
    }

    fn sign_recoverable(
        &self,
        privkey: &[u8; SCALAR_SIZE],
        digest: &Digest,
    ) -> Result<[u8; RECOVERABLE_SIGNATURE_SIZE], Error> {
        let signing_key =
            Self::signing_key(privkey).map_err(|e| Error::SigningFailure(e.to_string()))?;
        let (signature, recovery_id) = signing_key
            .sign_prehash_recoverable(&reduce_digest(digest))
            .map_err(|e| Error::SigningFailure(e.to_string()))?;

        let mut out = [0u8; RECOVERABLE_SIGNATURE_SIZE];
        out[..64].copy_from_slice(&signature.to_bytes());
        out[64] = recovery_id.to_byte();
        Ok(out)
    }

    fn derive_public_key(&self, privkey: &[u8; SCALAR_SIZE]) -> Result<PublicKeyEncodings, Error> {
        let signing_key =
            Self::signing_key(privkey).map_err(|e| Error::KeyDerivationFailure(e.to_string()))?;
        let verifying_key = signing_key.verifying_key();

        let compressed: [u8; COMPRESSED_PUBKEY_SIZE] = verifying_key
            .to_encoded_point(true)
            .as_bytes()
            .try_into()
            .map_err(|_| Error::KeyDerivationFailure("unexpected compressed length".into()))?;
        let uncompressed: [u8; UNCOMPRESSED_PUBKEY_SIZE] = verifying_key
            .to_encoded_point(false)
            .as_bytes()
            .try_into()
            .map_err(|_| Error::KeyDerivationFailure("unexpected uncompressed length".into()))?;

        Ok(PublicKeyEncodings {
            compressed,
            uncompressed,
        })
    }
}
