//! Code generation.

// -----------------------------------------------------------------------------
// Modules

mod enum_kind;
mod object_info;
mod struct_de;
mod struct_ser;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, Generics};

use crate::derive_data::SerialDerive;

/// Provided for `#[derive(Serializable)]`.
pub(crate) fn match_serial_impls(ast: &DeriveInput) -> TokenStream {
    let serial_derive = match SerialDerive::from_input(ast) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    let serial_impls: proc_macro2::TokenStream = match serial_derive {
        SerialDerive::Struct(info) => {
            let object_info = object_info::impl_object_info(&info);
            let ser = struct_ser::impl_struct_ser(&info);
            let de = struct_de::impl_struct_de(&info);
            quote! {
                #object_info
                #ser
                #de
            }
        }
        SerialDerive::Enum(info) => enum_kind::impl_enum(&info),
    };

    TokenStream::from(quote! {
        const _: () = {
            #serial_impls
        };
    })
}

/// The where clause of `generics` with `bound` added to every type parameter.
pub(crate) fn where_with_bound(
    generics: &Generics,
    bound: &proc_macro2::TokenStream,
) -> proc_macro2::TokenStream {
    let params = generics.type_params().map(|param| &param.ident);
    let existing = generics.where_clause.as_ref().map(|clause| &clause.predicates);
    quote! {
        where #( #params: #bound, )* #existing
    }
}
