use proc_macro2::TokenStream;
use quote::quote;
use syn::LitStr;

/// A version literal checked at compile time, e.g. `since = "2.0.0-rc.1"`.
#[derive(Debug)]
pub(crate) struct VersionLit {
    major: u64,
    minor: u64,
    patch: u64,
    pre: Option<String>,
    build: Option<String>,
}

impl VersionLit {
    pub fn parse(lit: &LitStr) -> syn::Result<Self> {
        let text = lit.value();
        let error = |message: &str| {
            syn::Error::new(lit.span(), format!("invalid version `{text}`: {message}"))
        };

        let (rest, build) = match text.split_once('+') {
            Some((rest, build)) => (rest, Some(build)),
            None => (text.as_str(), None),
        };
        let (core, pre) = match rest.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (rest, None),
        };

        let numbers = core
            .split('.')
            .map(|part| {
                let valid = !part.is_empty()
                    && part.bytes().all(|b| b.is_ascii_digit())
                    && (part.len() == 1 || !part.starts_with('0'));
                if !valid {
                    return Err(error("expected `MAJOR.MINOR.PATCH`"));
                }
                part.parse::<u64>().map_err(|_| error("numeric field overflows u64"))
            })
            .collect::<syn::Result<Vec<_>>>()?;
        let &[major, minor, patch] = numbers.as_slice() else {
            return Err(error("expected `MAJOR.MINOR.PATCH`"));
        };

        let valid_ident = |s: &str| {
            s.split('.').all(|id| {
                !id.is_empty() && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
            })
        };
        if pre.is_some_and(|pre| !valid_ident(pre)) {
            return Err(error("invalid pre-release identifier"));
        }
        if build.is_some_and(|build| !valid_ident(build)) {
            return Err(error("invalid build metadata"));
        }

        Ok(Self {
            major,
            minor,
            patch,
            pre: pre.map(String::from),
            build: build.map(String::from),
        })
    }

    /// `Version::new(..)` with `.with_pre(..)` / `.with_build(..)` as needed.
    pub fn to_tokens_with(&self, version_: &TokenStream) -> TokenStream {
        let Self {
            major,
            minor,
            patch,
            ..
        } = self;
        let pre = self.pre.iter().map(|pre| quote!(.with_pre(#pre)));
        let build = self.build.iter().map(|build| quote!(.with_build(#build)));
        quote! {
            #version_::new(#major, #minor, #patch) #(#pre)* #(#build)*
        }
    }
}
