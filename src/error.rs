use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Scalar 0x{0} not in range (0, n)")]
    InvalidScalar(String),
    #[error("No valid scalar after {0} sampling attempts")]
    SamplingExhausted(usize),
    #[error("Signing failed: {0}")]
    SigningFailure(String),
    #[error("Public key derivation failed: {0}")]
    KeyDerivationFailure(String),
    #[error("Cannot write vectors to {path}")]
    SerializationFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Vector audit failed: {0}")]
    AuditFailure(String),
    #[error("Malformed vector artifact: {0}")]
    MalformedArtifact(String),
}
