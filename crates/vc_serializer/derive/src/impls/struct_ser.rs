use proc_macro2::TokenStream;
use quote::quote;

use super::where_with_bound;
use crate::derive_data::SerialStruct;
use crate::path;

/// Implements `SerializableObject` and `Serializable`.
pub(crate) fn impl_struct_ser(info: &SerialStruct<'_>) -> TokenStream {
    let meta = &info.meta;
    if !meta.attrs.impl_serialize {
        return TokenStream::new();
    }

    let vc_serializer = &meta.crate_path;
    let info_ = path::info_(vc_serializer);
    let ser_ = path::ser_(vc_serializer);
    let value_ = path::value_(vc_serializer);
    let error_ = path::error_(vc_serializer);
    let option_ = path::option_();
    let result_ = path::result_();

    let field_arms = info.fields.iter().filter(|f| f.serializes()).map(|field| {
        let slot = field.slot;
        let ident = field.ident;
        let ty = field.ty;
        let value = match (&field.attrs.converter, &field.attrs.accessor) {
            (Some(converter), _) => {
                quote!(#ser_::FieldValue::converted::<#converter, #ty>(&self.#ident))
            }
            (None, Some(accessor)) => quote!(#ser_::FieldValue::owned(self.#accessor())),
            (None, None) => quote!(#ser_::FieldValue::borrowed(&self.#ident)),
        };
        quote! {
            #slot => #option_::Some(#value),
        }
    });

    let offset = info.virtual_offset();
    let virtual_arms = meta
        .attrs
        .virtual_properties
        .iter()
        .enumerate()
        .map(|(index, method)| {
            let slot = offset + index;
            quote! {
                #slot => #option_::Some(#ser_::FieldValue::owned(self.#method())),
            }
        });

    let pre_serialize = meta.attrs.pre_serialize.as_ref().map(|method| {
        quote! {
            #[inline]
            fn pre_serialize(&self) {
                self.#method();
            }
        }
    });
    let post_serialize = meta.attrs.post_serialize.as_ref().map(|method| {
        quote! {
            #[inline]
            fn post_serialize(&self) {
                self.#method();
            }
        }
    });

    let ident = meta.ident;
    let (impl_generics, ty_generics, _) = meta.generics.split_for_impl();
    let where_clause = where_with_bound(meta.generics, &quote!(#ser_::Serializable));

    quote! {
        impl #impl_generics #ser_::SerializableObject for #ident #ty_generics #where_clause {
            #[inline]
            fn object_info(&self) -> &'static #info_::ObjectInfo {
                __object_info()
            }

            fn property_value(
                &self,
                property: &#info_::PropertyMetadata,
            ) -> #option_<#ser_::FieldValue<'_>> {
                match property.slot() {
                    #(#field_arms)*
                    #(#virtual_arms)*
                    _ => #option_::None,
                }
            }

            #pre_serialize
            #post_serialize
        }

        impl #impl_generics #ser_::Serializable for #ident #ty_generics #where_clause {
            #[inline]
            fn serialize_with(
                &self,
                navigator: &mut #ser_::SerializationNavigator<'_>,
            ) -> #result_<#value_::Value, #error_> {
                navigator.visit_object(self)
            }
        }
    }
}
