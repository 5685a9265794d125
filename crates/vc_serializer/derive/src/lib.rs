//! See [`Serializable`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static SERIAL_ATTRIBUTE_NAME: &str = "serial";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Serializable Derivation
///
/// `#[derive(Serializable)]` describes a type to the serializer.
///
/// For structs with named fields it implements:
///
/// - `SerializableObject` and `Serializable`
/// - `DeserializableObject` and `Deserializable`
///
/// The properties are collected once, on first use, into a static
/// `ObjectInfo`. Each exposed field is one property, its slot is its
/// position among the exposed fields.
///
/// Enums with unit variants only are written as the variant name.
///
/// ## Type Attributes
///
/// ```rust, ignore
/// #[derive(Serializable)]
/// #[serial(rename_all = "camelCase", order = ["id", "name"])]
/// struct User { /* ... */ }
/// ```
///
/// - `rename_all = "..."`: naming strategy for wire names, one of
///   `identity`, `camelCase`, `PascalCase`, `snake_case`, `kebab-case`,
///   `SCREAMING_SNAKE_CASE`. Explicit `rename`s win.
/// - `order = "declaration" | "alphabetical"` or `order = ["b", "a"]`:
///   serialization order. A custom list must name every serializable
///   property exactly once.
/// - `policy = "all" | "none"`: with `none`, only fields marked `expose`
///   are properties. Defaults to `all`.
/// - `type_path = "..."`: overrides the type path used in errors.
/// - `pre_serialize = "method"`, `post_serialize = "method"`: `&self`
///   hooks around serialization.
/// - `post_deserialize = "method"`: `&mut self` hook after construction.
/// - `virtual_property = "method"`: a serialize-only property named after
///   and produced by a `&self` method. Repeatable.
/// - `serialize = false`, `deserialize = false`: leave out one direction.
///
/// ## Field Attributes
///
/// - `rename = "..."`, `alias = "..."` (repeatable).
/// - `groups = ["a", "b"]`: groups of the property, `default` if absent.
/// - `since = "1.0.0"`, `until = "2.0.0"`: inclusive version window.
/// - `skip_when_empty`: leave out default-valued content.
/// - `skip`: not a property; `expose`: a property under `policy = "none"`.
/// - `skip_serializing`, `skip_deserializing`.
/// - `default` or `default = "path::to::fn"`: value when the property is
///   absent. Required for skipped fields whose type is not `Default`.
/// - `path = "a.b[0]"`: read from a nested location first.
/// - `converter = "Type"`: a `Converter<FieldType>` for both directions.
/// - `accessor = "method"`: serialize the return value of a `&self` method
///   instead of the field.
///
/// Enum variants accept `rename` and `alias`.
///
/// Invalid versions, paths and naming strategies are compile errors, and
/// so is a custom order that is not a permutation of the serialized
/// properties.
#[proc_macro_derive(Serializable, attributes(serial))]
pub fn derive_serializable(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    impls::match_serial_impls(&ast)
}
