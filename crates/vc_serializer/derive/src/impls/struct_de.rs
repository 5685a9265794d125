use proc_macro2::TokenStream;
use quote::quote;

use super::where_with_bound;
use crate::derive_data::{DefaultAttr, SerialStruct, StructField};
use crate::path;

/// Implements `DeserializableObject` and `Deserializable`.
pub(crate) fn impl_struct_de(info: &SerialStruct<'_>) -> TokenStream {
    let meta = &info.meta;
    if !meta.attrs.impl_deserialize {
        return TokenStream::new();
    }

    let vc_serializer = &meta.crate_path;
    let info_ = path::info_(vc_serializer);
    let de_ = path::de_(vc_serializer);
    let value_ = path::value_(vc_serializer);
    let error_ = path::error_(vc_serializer);
    let result_ = path::result_();

    let inits = info.fields.iter().map(|field| {
        let ident = field.ident;
        let value = field_init(field);
        quote!(#ident: #value)
    });

    let post_deserialize = meta.attrs.post_deserialize.as_ref().map(|method| {
        quote! {
            #[inline]
            fn post_deserialize(&mut self) {
                self.#method();
            }
        }
    });

    let ident = meta.ident;
    let (impl_generics, ty_generics, _) = meta.generics.split_for_impl();
    let where_clause = where_with_bound(meta.generics, &quote!(#de_::Deserializable));

    quote! {
        impl #impl_generics #de_::DeserializableObject for #ident #ty_generics #where_clause {
            #[inline]
            fn object_info() -> &'static #info_::ObjectInfo {
                __object_info()
            }

            #[allow(unused_variables)]
            fn apply(
                navigator: &mut #de_::DeserializationNavigator<'_>,
                properties: #de_::PropertyValues<'_>,
            ) -> #result_<Self, #error_> {
                #result_::Ok(Self {
                    #(#inits,)*
                })
            }

            #post_deserialize
        }

        impl #impl_generics #de_::Deserializable for #ident #ty_generics #where_clause {
            #[inline]
            fn deserialize_with(
                navigator: &mut #de_::DeserializationNavigator<'_>,
                data: &#value_::Value,
            ) -> #result_<Self, #error_> {
                navigator.visit_object(data)
            }
        }
    }
}

/// The expression assigned to one field in `apply`.
///
/// Properties go through `properties.required` / `or_default` (or their
/// converter forms); everything else gets its default.
fn field_init(field: &StructField<'_>) -> TokenStream {
    let ty = field.ty;
    let default_ = path::default_();

    let default = match &field.attrs.default {
        DefaultAttr::None => None,
        DefaultAttr::Trait => Some(quote!(<#ty as #default_>::default)),
        DefaultAttr::Path(path) => Some(quote!(#path)),
    };

    let Some(slot) = field.slot.filter(|_| field.deserializes()) else {
        return match default {
            Some(default) => quote!(#default()),
            None => quote!(<#ty as #default_>::default()),
        };
    };

    match (&field.attrs.converter, default) {
        (Some(converter), None) => {
            quote!(properties.convert_required::<#converter, #ty>(navigator, #slot)?)
        }
        (Some(converter), Some(default)) => {
            quote!(properties.convert_or_default::<#converter, #ty>(navigator, #slot, #default)?)
        }
        (None, None) => quote!(properties.required::<#ty>(navigator, #slot)?),
        (None, Some(default)) => {
            quote!(properties.or_default::<#ty>(navigator, #slot, #default)?)
        }
    }
}
