use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Generics, Ident, Type};

use super::{FieldAttributes, OrderAttr, TypeAttributes, VariantAttributes};

// -----------------------------------------------------------------------------
// SerialMeta

/// Everything shared by struct and enum derives.
pub(crate) struct SerialMeta<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub attrs: TypeAttributes,
    pub crate_path: syn::Path,
}

impl SerialMeta<'_> {
    /// `"my_crate::module::Name"`, or the `type_path` override.
    pub fn type_path(&self) -> TokenStream {
        match &self.attrs.type_path {
            Some(path) => quote!(#path),
            None => {
                let ident = self.ident;
                quote!(::core::concat!(::core::module_path!(), "::", ::core::stringify!(#ident)))
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Struct

pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
    /// Position in the `ObjectInfo`, `None` if the field is not a property.
    pub slot: Option<usize>,
}

impl StructField<'_> {
    /// Internal property name, the field name without `r#`.
    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }

    pub fn serializes(&self) -> bool {
        self.slot.is_some() && !self.attrs.skip_serializing
    }

    pub fn deserializes(&self) -> bool {
        self.slot.is_some() && !self.attrs.skip_deserializing
    }
}

pub(crate) struct SerialStruct<'a> {
    pub meta: SerialMeta<'a>,
    pub fields: Vec<StructField<'a>>,
}

impl SerialStruct<'_> {
    /// Slot of the first virtual property.
    pub fn virtual_offset(&self) -> usize {
        self.fields.iter().filter(|f| f.slot.is_some()).count()
    }
}

// -----------------------------------------------------------------------------
// Enum

pub(crate) struct EnumVariant<'a> {
    pub ident: &'a Ident,
    pub attrs: VariantAttributes,
}

pub(crate) struct SerialEnum<'a> {
    pub meta: SerialMeta<'a>,
    pub variants: Vec<EnumVariant<'a>>,
}

// -----------------------------------------------------------------------------
// SerialDerive

pub(crate) enum SerialDerive<'a> {
    Struct(SerialStruct<'a>),
    Enum(SerialEnum<'a>),
}

impl<'a> SerialDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let meta = SerialMeta {
            ident: &input.ident,
            generics: &input.generics,
            attrs,
            crate_path: crate::path::vc_serializer(),
        };

        match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => {
                    let mut next_slot = 0;
                    let fields = fields
                        .named
                        .iter()
                        .map(|field| {
                            let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
                            let exposed = if meta.attrs.expose_none {
                                attrs.expose.is_some()
                            } else {
                                attrs.skip.is_none()
                            };
                            let slot = exposed.then(|| {
                                next_slot += 1;
                                next_slot - 1
                            });
                            Ok(StructField {
                                // named fields always have an ident
                                ident: field.ident.as_ref().unwrap_or(&input.ident),
                                ty: &field.ty,
                                attrs,
                                slot,
                            })
                        })
                        .collect::<syn::Result<Vec<_>>>()?;

                    let this = SerialStruct { meta, fields };
                    validate_order(&this)?;
                    Ok(Self::Struct(this))
                }
                _ => Err(syn::Error::new_spanned(
                    &input.ident,
                    "`Serializable` can only be derived for structs with named fields",
                )),
            },
            Data::Enum(data) => {
                let variants = data
                    .variants
                    .iter()
                    .map(|variant| {
                        if !matches!(variant.fields, Fields::Unit) {
                            return Err(syn::Error::new_spanned(
                                variant,
                                "`Serializable` enums must have unit variants only",
                            ));
                        }
                        Ok(EnumVariant {
                            ident: &variant.ident,
                            attrs: VariantAttributes::parse_attrs(&variant.attrs)?,
                        })
                    })
                    .collect::<syn::Result<Vec<_>>>()?;
                Ok(Self::Enum(SerialEnum { meta, variants }))
            }
            Data::Union(_) => Err(syn::Error::new_spanned(
                &input.ident,
                "`Serializable` cannot be derived for unions",
            )),
        }
    }
}

/// Custom orders must name every serialized property exactly once.
fn validate_order(this: &SerialStruct<'_>) -> syn::Result<()> {
    let OrderAttr::Custom(names) = &this.meta.attrs.order else {
        return Ok(());
    };

    let serialized: Vec<String> = this
        .fields
        .iter()
        .filter(|f| f.serializes())
        .map(StructField::name)
        .chain(this.meta.attrs.virtual_properties.iter().map(|m| m.unraw().to_string()))
        .collect();
    let skipped: BTreeSet<String> = this
        .fields
        .iter()
        .filter(|f| f.slot.is_some() && !f.serializes())
        .map(StructField::name)
        .collect();

    let mut errors = Vec::new();

    let mut seen = BTreeSet::new();
    for lit in names {
        let name = lit.value();
        if skipped.contains(&name) {
            errors.push(syn::Error::new(
                lit.span(),
                format!("property `{name}` is not serialized and cannot appear in order"),
            ));
        } else if !serialized.contains(&name) {
            errors.push(syn::Error::new(lit.span(), format!("unknown property `{name}` in order")));
        } else if !seen.insert(name.clone()) {
            errors.push(syn::Error::new(lit.span(), format!("property `{name}` listed twice in order")));
        }
    }

    for name in serialized.iter().filter(|name| !seen.contains(*name)) {
        errors.push(syn::Error::new_spanned(
            this.meta.ident,
            format!("custom order does not list property `{name}`"),
        ));
    }

    match errors.into_iter().reduce(|mut all, error| {
        all.combine(error);
        all
    }) {
        Some(errors) => Err(errors),
        None => Ok(()),
    }
}
