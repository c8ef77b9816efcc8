//! Serializes a byte buffer as a standard base64 string.

use base64ct::{Base64, Encoding};
use serde::de::{Error, Unexpected};
use serde::{Deserializer, Serializer};
use std::fmt::Formatter;

pub fn serialize<S: Serializer>(data: impl AsRef<[u8]>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&Base64::encode_string(data.as_ref()))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    struct Base64Visitor;

    impl serde::de::Visitor<'_> for Base64Visitor {
        type Value = Vec<u8>;

        fn expecting(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a base64 encoded string")
        }

        fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
            Base64::decode_vec(v).map_err(|_| Error::invalid_value(Unexpected::Str(v), &self))
        }
    }

    deserializer.deserialize_str(Base64Visitor)
}
