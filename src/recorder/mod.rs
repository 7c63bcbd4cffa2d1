//! Turns one (private key, digest) pair into one [`SignatureRecord`].

mod hex_bytes;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    backend::{COMPRESSED_PUBKEY_SIZE, Secp256k1Backend, UNCOMPRESSED_PUBKEY_SIZE},
    digest::{DIGEST_SIZE, Digest},
    error::Error,
    scalar::{SCALAR_SIZE, Scalar},
};

const COMPONENT_SIZE: usize = 32;

/// One reference signature. Field order here is the field order in the artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    #[serde(with = "hex_bytes")]
    privkey: [u8; SCALAR_SIZE],
    #[serde(with = "hex_bytes")]
    msghash: [u8; DIGEST_SIZE],
    #[serde(with = "hex_bytes")]
    r: [u8; COMPONENT_SIZE],
    #[serde(with = "hex_bytes")]
    s: [u8; COMPONENT_SIZE],
    v: u8,
    #[serde(with = "hex_bytes")]
    pubkey_compressed: [u8; COMPRESSED_PUBKEY_SIZE],
    #[serde(with = "hex_bytes")]
    pubkey_uncompressed: [u8; UNCOMPRESSED_PUBKEY_SIZE],
}

impl SignatureRecord {
    pub fn privkey(&self) -> &[u8; SCALAR_SIZE] {
        &self.privkey
    }

    pub fn msghash(&self) -> &Digest {
        &self.msghash
    }

    pub fn r(&self) -> &[u8; COMPONENT_SIZE] {
        &self.r
    }

    pub fn s(&self) -> &[u8; COMPONENT_SIZE] {
        &self.s
    }

    pub fn v(&self) -> u8 {
        self.v
    }

    pub fn pubkey_compressed(&self) -> &[u8; COMPRESSED_PUBKEY_SIZE] {
        &self.pubkey_compressed
    }

    pub fn pubkey_uncompressed(&self) -> &[u8; UNCOMPRESSED_PUBKEY_SIZE] {
        &self.pubkey_uncompressed
    }

    /// Re-checks this record against `backend`: key range, recovery id, and
    /// bit-exact reproduction of the public keys and the signature.
    pub fn audit<B: Secp256k1Backend + ?Sized>(&self, backend: &B) -> Result<(), Error> {
        let scalar = Scalar::from_bytes(&self.privkey)?;
        if self.v > 1 {
            return Err(Error::AuditFailure(format!(
                "recovery id {} not in {{0, 1}}",
                self.v
            )));
        }

        let replayed = Recorder::new(backend).record(&scalar, &self.msghash)?;
        if replayed.pubkey_compressed != self.pubkey_compressed
            || replayed.pubkey_uncompressed != self.pubkey_uncompressed
        {
            return Err(Error::AuditFailure(format!(
                "public key mismatch for privkey {}",
                hex::encode(self.privkey)
            )));
        }
        if replayed != *self {
            return Err(Error::AuditFailure(format!(
                "signature mismatch for privkey {} msghash {}",
                hex::encode(self.privkey),
                hex::encode(self.msghash)
            )));
        }
        Ok(())
    }
}

pub struct Recorder<B> {
    backend: B,
}

impl<B: Secp256k1Backend> Recorder<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Signs `digest` with `privkey` and records the backend output untouched:
    /// no low-s normalization or other rewriting of `r` and `s`.
    pub fn record(&self, privkey: &Scalar, digest: &Digest) -> Result<SignatureRecord, Error> {
        let privkey = privkey.to_bytes();
        let signature = self.backend.sign_recoverable(&privkey, digest)?;
        let public_key = self.backend.derive_public_key(&privkey)?;

        let mut r = [0u8; COMPONENT_SIZE];
        r.copy_from_slice(&signature[..COMPONENT_SIZE]);
        let mut s = [0u8; COMPONENT_SIZE];
        s.copy_from_slice(&signature[COMPONENT_SIZE..2 * COMPONENT_SIZE]);
        let v = signature[2 * COMPONENT_SIZE];
        if v > 1 {
            return Err(Error::SigningFailure(format!(
                "{} returned recovery id {v}",
                self.backend.name()
            )));
        }

        let record = SignatureRecord {
            privkey,
            msghash: *digest,
            r,
            s,
            v,
            pubkey_compressed: public_key.compressed,
            pubkey_uncompressed: public_key.uncompressed,
        };
        debug!(
            backend = self.backend.name(),
            privkey = %hex::encode(record.privkey),
            msghash = %hex::encode(record.msghash),
            v,
            "recorded signature"
        );
        Ok(record)
    }
}
