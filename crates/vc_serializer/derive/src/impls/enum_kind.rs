use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{EnumVariant, SerialEnum};
use crate::path;

/// Unit enums are written as their variant name.
///
/// With `rename_all` the name is computed by the `NamingStrategy` at
/// runtime, otherwise it is a literal.
pub(crate) fn impl_enum(info: &SerialEnum<'_>) -> TokenStream {
    let ser = impl_enum_ser(info);
    let de = impl_enum_de(info);
    quote! {
        #ser
        #de
    }
}

fn variant_name(info: &SerialEnum<'_>, variant: &EnumVariant<'_>) -> TokenStream {
    if let Some(rename) = &variant.attrs.rename {
        return quote!(#rename);
    }
    let name = variant.ident.to_string();
    match &info.meta.attrs.rename_all {
        Some(strategy) => {
            let info_ = path::info_(&info.meta.crate_path);
            quote!(#info_::NamingStrategy::#strategy.apply(#name))
        }
        None => quote!(#name),
    }
}

fn impl_enum_ser(info: &SerialEnum<'_>) -> TokenStream {
    let meta = &info.meta;
    if !meta.attrs.impl_serialize {
        return TokenStream::new();
    }

    let vc_serializer = &meta.crate_path;
    let ser_ = path::ser_(vc_serializer);
    let value_ = path::value_(vc_serializer);
    let error_ = path::error_(vc_serializer);
    let result_ = path::result_();

    let arms = info.variants.iter().map(|variant| {
        let ident = variant.ident;
        let name = variant_name(info, variant);
        quote! {
            Self::#ident => navigator.visit_string(&#name),
        }
    });

    let ident = meta.ident;
    let (impl_generics, ty_generics, where_clause) = meta.generics.split_for_impl();

    quote! {
        impl #impl_generics #ser_::Serializable for #ident #ty_generics #where_clause {
            fn serialize_with(
                &self,
                navigator: &mut #ser_::SerializationNavigator<'_>,
            ) -> #result_<#value_::Value, #error_> {
                #result_::Ok(match *self {
                    #(#arms)*
                })
            }
        }
    }
}

fn impl_enum_de(info: &SerialEnum<'_>) -> TokenStream {
    let meta = &info.meta;
    if !meta.attrs.impl_deserialize {
        return TokenStream::new();
    }

    let vc_serializer = &meta.crate_path;
    let de_ = path::de_(vc_serializer);
    let value_ = path::value_(vc_serializer);
    let error_ = path::error_(vc_serializer);
    let result_ = path::result_();

    let checks = info.variants.iter().map(|variant| {
        let ident = variant.ident;
        let name = variant_name(info, variant);
        let aliases = &variant.attrs.aliases;
        quote! {
            if text == #name #( || text == #aliases )* {
                return #result_::Ok(Self::#ident);
            }
        }
    });

    let ident = meta.ident;
    let expected = if meta.attrs.rename_all.is_some() {
        format!("a variant of `{ident}`")
    } else {
        let names: Vec<String> = info
            .variants
            .iter()
            .map(|variant| match &variant.attrs.rename {
                Some(rename) => format!("`{}`", rename.value()),
                None => format!("`{}`", variant.ident),
            })
            .collect();
        format!("one of {}", names.join(", "))
    };

    let (impl_generics, ty_generics, where_clause) = meta.generics.split_for_impl();

    quote! {
        impl #impl_generics #de_::Deserializable for #ident #ty_generics #where_clause {
            fn deserialize_with(
                navigator: &mut #de_::DeserializationNavigator<'_>,
                data: &#value_::Value,
            ) -> #result_<Self, #error_> {
                let text = navigator.read_string(data)?;
                let text: &str = &text;
                #(#checks)*
                #result_::Err(navigator.invalid_value(#expected, text))
            }
        }
    }
}
