//! `serde` support for [`Value`](crate::Value) and [`Mapping`](crate::Mapping).
//!
//! This is what lets text codecs such as `serde_json` and `serde_yaml`
//! encode and decode dynamic values directly.
//!
//! Decoding goes through `deserialize_any`, so it only works with
//! self-describing formats.

mod de;
mod ser;
