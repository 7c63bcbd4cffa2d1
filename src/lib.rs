//! Reference test-vector generator for ECDSA over secp256k1.
//!
//! Private keys come from [`scalar`], digests from [`digest`]; each pair is
//! signed by a [`backend::Secp256k1Backend`] and captured as a
//! [`recorder::SignatureRecord`]. [`driver::generate`] ties the pieces together.

pub mod backend;
pub mod digest;
pub mod driver;
pub mod error;
pub mod recorder;
pub mod scalar;
mod utils;

pub use error::Error;
