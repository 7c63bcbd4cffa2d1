use secp256k1::{All, Message, PublicKey, Secp256k1, SecretKey};

use super::{PublicKeyEncodings, RECOVERABLE_SIGNATURE_SIZE, Secp256k1Backend};
use crate::{digest::Digest, error::Error, scalar::SCALAR_SIZE};

/// Bitcoin Core's libsecp256k1 through the `secp256k1` bindings.
pub struct LibSecp256k1Backend {
    secp: Secp256k1<All>,
}

impl Default for LibSecp256k1Backend {
    fn default() -> Self {
        Self {
            secp: Secp256k1::new(),
        }
    }
}

impl Secp256k1Backend for LibSecp256k1Backend {
    fn name(&self) -> &'static str {
        "libsecp256k1"
    }

    fn sign_recoverable(
        &self,
        privkey: &[u8; SCALAR_SIZE],
        digest: &Digest,
    ) -> Result<[u8; RECOVERABLE_SIGNATURE_SIZE], Error> {
        let secret =
            SecretKey::from_slice(privkey).map_err(|e| Error::SigningFailure(e.to_string()))?;
        let message = Message::from_digest(*digest);
        let (recovery_id, compact) = self
            .secp
            .sign_ecdsa_recoverable(&message, &secret)
            .serialize_compact();

        let v = u8::try_from(recovery_id.to_i32())
            .map_err(|_| Error::SigningFailure("recovery id out of range".into()))?;
        let mut out = [0u8; RECOVERABLE_SIGNATURE_SIZE];
        out[..64].copy_from_slice(&compact);
        out[64] = v;
        Ok(out)
    }

    fn derive_public_key(&self, privkey: &[u8; SCALAR_SIZE]) -> Result<PublicKeyEncodings, Error> {
        let secret =
            SecretKey::from_slice(privkey).map_err(|e| Error::KeyDerivationFailure(e.to_string()))?;
        let public = PublicKey::from_secret_key(&self.secp, &secret);
        Ok(PublicKeyEncodings {
            compressed: public.serialize(),
            uncompressed: public.serialize_uncompressed(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        backend::K256Backend,
        digest::{fixed_digests, random_digest},
        scalar::{CURVE_ORDER, MAX_SAMPLING_ATTEMPTS, edge_case_scalars, random_scalar},
    };
    use primitive_types::U256;
    use rand::{SeedableRng, rngs::StdRng};

    // k256 signs the reduced digest, so digests at or above n must agree too.
    #[test]
    fn test_matches_k256() {
        let libsecp = LibSecp256k1Backend::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut keys = edge_case_scalars();
        for _ in 0..20 {
            keys.push(random_scalar(&mut rng, MAX_SAMPLING_ATTEMPTS).unwrap());
        }
        let mut digests = fixed_digests().to_vec();
        digests.push(CURVE_ORDER.to_big_endian());
        digests.push((CURVE_ORDER + U256::one()).to_big_endian());
        digests.push(random_digest(&mut rng));

        for scalar in keys {
            let privkey = scalar.to_bytes();
            assert_eq!(
                libsecp.derive_public_key(&privkey).unwrap(),
                K256Backend.derive_public_key(&privkey).unwrap()
            );
            for digest in &digests {
                assert_eq!(
                    libsecp.sign_recoverable(&privkey, digest).unwrap(),
                    K256Backend.sign_recoverable(&privkey, digest).unwrap(),
                    "privkey {} digest {}",
                    hex::encode(privkey),
                    hex::encode(digest)
                );
            }
        }
    }
}
