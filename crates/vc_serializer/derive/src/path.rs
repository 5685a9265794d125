//! Paths into `vc_serializer`, resolved once per derive.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `vc_serializer` crate.
///
/// 1. For crates that depend on `vc_serializer`, `::vc_serializer` is returned.
/// 2. For crates that depend on `vc_serial`, `::vc_serial::serializer` is returned.
/// 3. Otherwise `::vc_serializer` is returned, which may be incorrect.
///
/// Reading the manifest is not free, so the path is resolved once per
/// derive and passed around.
pub(crate) fn vc_serializer() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_serializer"))
}

// -----------------------------------------------------------------------------
// Internal API

#[inline(always)]
pub(crate) fn info_(path: &syn::Path) -> TokenStream {
    quote! { #path::info }
}

#[inline(always)]
pub(crate) fn value_(path: &syn::Path) -> TokenStream {
    quote! { #path::value }
}

#[inline(always)]
pub(crate) fn ser_(path: &syn::Path) -> TokenStream {
    quote! { #path::ser }
}

#[inline(always)]
pub(crate) fn de_(path: &syn::Path) -> TokenStream {
    quote! { #path::de }
}

#[inline(always)]
pub(crate) fn error_(path: &syn::Path) -> TokenStream {
    quote! { #path::Error }
}

#[inline(always)]
pub(crate) fn version_(path: &syn::Path) -> TokenStream {
    quote! { #path::Version }
}

#[inline(always)]
pub(crate) fn option_() -> TokenStream {
    quote! { ::core::option::Option }
}

#[inline(always)]
pub(crate) fn result_() -> TokenStream {
    quote! { ::core::result::Result }
}

#[inline(always)]
pub(crate) fn default_() -> TokenStream {
    quote! { ::core::default::Default }
}
