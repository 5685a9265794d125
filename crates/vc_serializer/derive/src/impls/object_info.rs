use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use vc_value::Segment;

use crate::derive_data::{OrderAttr, SerialStruct, StructField};
use crate::path;

/// Generates `fn __object_info() -> &'static ObjectInfo`, backed by a
/// static cell.
///
/// The function is not generic, so every instantiation of a generic type
/// shares one descriptor. Nothing is emitted when neither trait is
/// implemented.
pub(crate) fn impl_object_info(info: &SerialStruct<'_>) -> TokenStream {
    let meta = &info.meta;
    if !meta.attrs.impl_serialize && !meta.attrs.impl_deserialize {
        return TokenStream::new();
    }

    let vc_serializer = &meta.crate_path;
    let info_ = path::info_(vc_serializer);

    let type_path = meta.type_path();

    let properties = info
        .fields
        .iter()
        .filter(|field| field.slot.is_some())
        .map(|field| property_expr(field, vc_serializer));

    let virtuals = meta.attrs.virtual_properties.iter().map(|method| {
        let name = method.unraw().to_string();
        quote! {
            #info_::PropertyMetadata::new(#name).skip_deserializing()
        }
    });

    let order = match &meta.attrs.order {
        OrderAttr::Declaration => quote!(#info_::PropertyOrder::Declaration),
        OrderAttr::Alphabetical => quote!(#info_::PropertyOrder::Alphabetical),
        OrderAttr::Custom(names) => quote!(#info_::PropertyOrder::custom([#(#names),*])),
    };

    let naming = meta
        .attrs
        .rename_all
        .as_ref()
        .map(|variant| quote!(.naming(#info_::NamingStrategy::#variant)));

    quote! {
        fn __object_info() -> &'static #info_::ObjectInfo {
            static CELL: #info_::ObjectInfoCell = #info_::ObjectInfoCell::new();
            CELL.get_or_build(|| {
                #info_::ObjectInfo::builder(#type_path)
                    #( .property(#properties) )*
                    #( .property(#virtuals) )*
                    .order(#order)
                    #naming
                    .build()
            })
        }
    }
}

fn property_expr(field: &StructField<'_>, vc_serializer: &syn::Path) -> TokenStream {
    let info_ = path::info_(vc_serializer);
    let value_ = path::value_(vc_serializer);
    let version_ = path::version_(vc_serializer);

    let attrs = &field.attrs;
    let name = field.name();

    let rename = attrs.rename.iter().map(|lit| quote!(.rename(#lit)));
    let aliases = (!attrs.aliases.is_empty()).then(|| {
        let aliases = &attrs.aliases;
        quote!(.aliases([#(#aliases),*]))
    });
    let groups = (!attrs.groups.is_empty()).then(|| {
        let groups = &attrs.groups;
        quote!(.groups([#(#groups),*]))
    });
    let since = attrs.since.as_ref().map(|v| {
        let v = v.to_tokens_with(&version_);
        quote!(.since(#v))
    });
    let until = attrs.until.as_ref().map(|v| {
        let v = v.to_tokens_with(&version_);
        quote!(.until(#v))
    });
    let skip_when_empty = attrs.skip_when_empty.then(|| quote!(.skip_when_empty()));
    let path = attrs.path.as_ref().map(|(_, segments)| {
        let segments = segments.iter().map(|segment| match segment {
            Segment::Key(key) => {
                let key: &str = key;
                quote!(#value_::Segment::key(#key))
            }
            Segment::Index(index) => quote!(#value_::Segment::index(#index)),
        });
        quote!(.path(#value_::ValuePath::from_segments([#(#segments),*])))
    });
    let skip_serializing = attrs.skip_serializing.then(|| quote!(.skip_serializing()));
    let skip_deserializing = attrs
        .skip_deserializing
        .then(|| quote!(.skip_deserializing()));

    quote! {
        #info_::PropertyMetadata::new(#name)
            #(#rename)*
            #aliases
            #groups
            #since
            #until
            #skip_when_empty
            #path
            #skip_serializing
            #skip_deserializing
    }
}
