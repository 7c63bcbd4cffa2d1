//! Serde adapter for fixed-size byte arrays stored as lowercase hex strings.

use serde::{Deserialize, Deserializer, Serializer, de};

pub fn serialize<S, const N: usize>(bytes: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&hex::encode(bytes))
}

pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let bytes = hex::decode(&s).map_err(de::Error::custom)?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| de::Error::invalid_length(b.len(), &format!("{N} bytes").as_str()))
}
