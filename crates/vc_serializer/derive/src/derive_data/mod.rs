//! Parsing of the derive input into properties and attributes.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod serial_derive;
mod version_lit;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{DefaultAttr, FieldAttributes, OrderAttr, TypeAttributes, VariantAttributes};
pub(crate) use serial_derive::{EnumVariant, SerialDerive, SerialEnum, SerialStruct, StructField};
pub(crate) use version_lit::VersionLit;
