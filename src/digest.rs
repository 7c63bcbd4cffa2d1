//! Message digests. A digest is 32 opaque bytes handed to the signer as an
//! already-hashed message; it is allowed to exceed the group order.

use rand::CryptoRng;

use crate::utils::sha256::sha256;

pub const DIGEST_SIZE: usize = 32;

pub type Digest = [u8; DIGEST_SIZE];

/// The digests every edge-case key is signed against, in output order.
///
/// The all-`0xff` digest is numerically larger than `n`, which forces the
/// signer's nonce derivation through its modular reduction path.
pub fn fixed_digests() -> [Digest; 5] {
    let mut sequential = [0u8; DIGEST_SIZE];
    for (i, byte) in sequential.iter_mut().enumerate() {
        *byte = (i % 256) as u8;
    }

    [
        [0x00; DIGEST_SIZE],
        [0xff; DIGEST_SIZE],
        sequential,
        sha256(b"test"),
        sha256(b"sample"),
    ]
}

pub fn random_digest<R: CryptoRng + ?Sized>(rng: &mut R) -> Digest {
    let mut digest = [0u8; DIGEST_SIZE];
    rng.fill_bytes(&mut digest);
    digest
}
