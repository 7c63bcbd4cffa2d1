//! The signing capability the generator records outputs from.
//!
//! Curve arithmetic, RFC 6979 nonce derivation and signature encoding all
//! live behind [`Secp256k1Backend`]; the rest of the crate only moves bytes.

pub mod libsecp;
pub mod rustcrypto;

use crate::{digest::Digest, error::Error, scalar::SCALAR_SIZE};

pub use self::libsecp::LibSecp256k1Backend;
pub use self::rustcrypto::K256Backend;

pub const COMPRESSED_PUBKEY_SIZE: usize = 33;
pub const UNCOMPRESSED_PUBKEY_SIZE: usize = 65;
/// `r (32) || s (32) || v (1)`
pub const RECOVERABLE_SIGNATURE_SIZE: usize = 65;

/// Backend used by the generator binary: the same libsecp256k1 the
/// fixtures are named after.
pub type DefaultBackend = LibSecp256k1Backend;

/// Both SEC1 encodings of one public point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKeyEncodings {
    pub compressed: [u8; COMPRESSED_PUBKEY_SIZE],
    pub uncompressed: [u8; UNCOMPRESSED_PUBKEY_SIZE],
}

pub trait Secp256k1Backend {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Signs `digest` as-is (no further hashing) with an RFC 6979 nonce and
    /// returns `r || s || v`. Must be deterministic for identical inputs.
    fn sign_recoverable(
        &self,
        privkey: &[u8; SCALAR_SIZE],
        digest: &Digest,
    ) -> Result<[u8; RECOVERABLE_SIGNATURE_SIZE], Error>;

    fn derive_public_key(&self, privkey: &[u8; SCALAR_SIZE]) -> Result<PublicKeyEncodings, Error>;
}

impl<B: Secp256k1Backend + ?Sized> Secp256k1Backend for &B {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn sign_recoverable(
        &self,
        privkey: &[u8; SCALAR_SIZE],
        digest: &Digest,
    ) -> Result<[u8; RECOVERABLE_SIGNATURE_SIZE], Error> {
        (**self).sign_recoverable(privkey, digest)
    }

    fn derive_public_key(&self, privkey: &[u8; SCALAR_SIZE]) -> Result<PublicKeyEncodings, Error> {
        (**self).derive_public_key(privkey)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct KnownAnswer {
        digest: Digest,
        r: &'static str,
        s: &'static str,
        v: u8,
    }

    // Key 1, RFC 6979 with HMAC-SHA256, low-s.
    fn key_one_answers() -> [KnownAnswer; 2] {
        [
            KnownAnswer {
                digest: [0x00; 32],
                r: "a0b37f8fba683cc68f6574cd43b39f0343a50008bf6ccea9d13231d9e7e2e1e4",
                s: "11edc8d307254296264aebfc3dc76cd8b668373a072fd64665b50000e9fcce52",
                v: 1,
            },
            // digest above n: the nonce is derived from the reduced digest
            KnownAnswer {
                digest: [0xff; 32],
                r: "7cb38cc5712e9e11a767615f6080dbc111c9cdd613eb98999fd92a86bafd4540",
                s: "7923ca1f4d03471d2866f776ef8a6d3cac099b427331aeb245aa9dafeddcf115",
                v: 0,
            },
        ]
    }

    fn check_known_answers<B: Secp256k1Backend>(backend: &B) {
        let mut privkey = [0u8; SCALAR_SIZE];
        privkey[31] = 1;
        for answer in key_one_answers() {
            let raw = backend.sign_recoverable(&privkey, &answer.digest).unwrap();
            assert_eq!(hex::encode(&raw[..32]), answer.r, "{} r", backend.name());
            assert_eq!(hex::encode(&raw[32..64]), answer.s, "{} s", backend.name());
            assert_eq!(raw[64], answer.v, "{} v", backend.name());
        }
    }

    #[test]
    fn test_libsecp256k1_known_answers() {
        check_known_answers(&LibSecp256k1Backend::default());
    }

    #[test]
    fn test_k256_known_answers() {
        check_known_answers(&K256Backend);
    }

    #[test]
    fn test_sample_digest_known_answer() {
        let mut privkey = [0u8; SCALAR_SIZE];
        privkey[31] = 0x42;
        let digest = crate::digest::fixed_digests()[4];
        let raw = DefaultBackend::default()
            .sign_recoverable(&privkey, &digest)
            .unwrap();
        assert_eq!(
            hex::encode(raw),
            "4736df54bad3f98651c2cb6ed85b6f50bde6957237d059f6174e25dfc6214a92\
             3c364fc0f7dd732d3ad17c607bdb1403649a0fd1373f75101561f0730e21c252\
             01"
        );
    }
}
