use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::parse::Parse;
use syn::{Attribute, ExprPath, Ident, LitBool, LitStr, Token, Type};
use vc_value::{Segment, ValuePath};

use super::VersionLit;
use crate::SERIAL_ATTRIBUTE_NAME;

/// Names accepted by `rename_all`, paired with `NamingStrategy` variants.
const NAMING_STRATEGIES: &[(&str, &str)] = &[
    ("identity", "Identity"),
    ("camelCase", "CamelCase"),
    ("PascalCase", "PascalCase"),
    ("snake_case", "SnakeCase"),
    ("kebab-case", "KebabCase"),
    ("SCREAMING_SNAKE_CASE", "ScreamingSnakeCase"),
];

fn for_each_serial_attr(
    attrs: &[Attribute],
    mut f: impl FnMut(ParseNestedMeta) -> syn::Result<()>,
) -> syn::Result<()> {
    for attr in attrs {
        if attr.path().is_ident(SERIAL_ATTRIBUTE_NAME) {
            attr.parse_nested_meta(&mut f)?;
        }
    }
    Ok(())
}

fn parse_str(meta: &ParseNestedMeta) -> syn::Result<LitStr> {
    meta.value()?.parse()
}

fn parse_ident(meta: &ParseNestedMeta) -> syn::Result<Ident> {
    parse_str(meta)?.parse()
}

fn parse_bool(meta: &ParseNestedMeta) -> syn::Result<bool> {
    Ok(meta.value()?.parse::<LitBool>()?.value)
}

/// `key = "a"` or `key = ["a", "b"]`.
fn parse_str_list(meta: &ParseNestedMeta) -> syn::Result<Vec<LitStr>> {
    let value = meta.value()?;
    if !value.peek(syn::token::Bracket) {
        return Ok(vec![value.parse()?]);
    }
    let content;
    syn::bracketed!(content in value);
    let list = content.parse_terminated(<LitStr as Parse>::parse, Token![,])?;
    Ok(list.into_iter().collect())
}

// -----------------------------------------------------------------------------
// Type attributes

/// Value of `#[serial(order = ...)]`.
#[derive(Debug, Default)]
pub(crate) enum OrderAttr {
    #[default]
    Declaration,
    Alphabetical,
    Custom(Vec<LitStr>),
}

/// Type-level `#[serial(...)]` attributes.
#[derive(Debug)]
pub(crate) struct TypeAttributes {
    /// `NamingStrategy` variant selected by `rename_all`.
    pub rename_all: Option<Ident>,
    pub order: OrderAttr,
    /// `policy = "none"`: only `expose` fields are properties.
    pub expose_none: bool,
    pub type_path: Option<LitStr>,
    pub pre_serialize: Option<Ident>,
    pub post_serialize: Option<Ident>,
    pub post_deserialize: Option<Ident>,
    pub virtual_properties: Vec<Ident>,
    pub impl_serialize: bool,
    pub impl_deserialize: bool,
}

impl Default for TypeAttributes {
    fn default() -> Self {
        Self {
            rename_all: None,
            order: OrderAttr::Declaration,
            expose_none: false,
            type_path: None,
            pre_serialize: None,
            post_serialize: None,
            post_deserialize: None,
            virtual_properties: Vec::new(),
            impl_serialize: true,
            impl_deserialize: true,
        }
    }
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for_each_serial_attr(attrs, |meta| this.parse_meta(&meta))?;
        Ok(this)
    }

    fn parse_meta(&mut self, meta: &ParseNestedMeta) -> syn::Result<()> {
        let path = &meta.path;
        if path.is_ident("rename_all") {
            let lit = parse_str(meta)?;
            let name = lit.value();
            let Some((_, variant)) = NAMING_STRATEGIES.iter().find(|(n, _)| *n == name) else {
                let names: Vec<_> = NAMING_STRATEGIES.iter().map(|(n, _)| *n).collect();
                return Err(syn::Error::new(
                    lit.span(),
                    format!("unknown naming strategy `{name}`, expected one of: {}", names.join(", ")),
                ));
            };
            self.rename_all = Some(Ident::new(variant, lit.span()));
        } else if path.is_ident("order") {
            let value = meta.value()?;
            self.order = if value.peek(syn::token::Bracket) {
                let content;
                syn::bracketed!(content in value);
                let names = content.parse_terminated(<LitStr as Parse>::parse, Token![,])?;
                OrderAttr::Custom(names.into_iter().collect())
            } else {
                let lit: LitStr = value.parse()?;
                match lit.value().as_str() {
                    "declaration" => OrderAttr::Declaration,
                    "alphabetical" => OrderAttr::Alphabetical,
                    other => {
                        return Err(syn::Error::new(
                            lit.span(),
                            format!(
                                "unknown order `{other}`, expected `declaration`, `alphabetical` or a list of names"
                            ),
                        ));
                    }
                }
            };
        } else if path.is_ident("policy") {
            let lit = parse_str(meta)?;
            self.expose_none = match lit.value().as_str() {
                "all" => false,
                "none" => true,
                other => {
                    return Err(syn::Error::new(
                        lit.span(),
                        format!("unknown policy `{other}`, expected `all` or `none`"),
                    ));
                }
            };
        } else if path.is_ident("type_path") {
            self.type_path = Some(parse_str(meta)?);
        } else if path.is_ident("pre_serialize") {
            self.pre_serialize = Some(parse_ident(meta)?);
        } else if path.is_ident("post_serialize") {
            self.post_serialize = Some(parse_ident(meta)?);
        } else if path.is_ident("post_deserialize") {
            self.post_deserialize = Some(parse_ident(meta)?);
        } else if path.is_ident("virtual_property") {
            self.virtual_properties.push(parse_ident(meta)?);
        } else if path.is_ident("serialize") {
            self.impl_serialize = parse_bool(meta)?;
        } else if path.is_ident("deserialize") {
            self.impl_deserialize = parse_bool(meta)?;
        } else {
            return Err(meta.error("unknown type attribute"));
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Field attributes

/// Value of `#[serial(default)]` / `#[serial(default = "path")]`.
#[derive(Debug, Default)]
pub(crate) enum DefaultAttr {
    #[default]
    None,
    Trait,
    Path(ExprPath),
}

/// Field-level `#[serial(...)]` attributes.
#[derive(Debug, Default)]
pub(crate) struct FieldAttributes {
    pub rename: Option<LitStr>,
    pub aliases: Vec<LitStr>,
    pub groups: Vec<LitStr>,
    pub since: Option<VersionLit>,
    pub until: Option<VersionLit>,
    pub skip_when_empty: bool,
    pub skip: Option<Span>,
    pub expose: Option<Span>,
    pub skip_serializing: bool,
    pub skip_deserializing: bool,
    pub default: DefaultAttr,
    /// The literal and its parsed segments.
    pub path: Option<(LitStr, Vec<Segment<'static>>)>,
    pub converter: Option<Type>,
    pub accessor: Option<Ident>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for_each_serial_attr(attrs, |meta| this.parse_meta(&meta))?;

        if let (Some(skip), Some(_)) = (this.skip, this.expose) {
            return Err(syn::Error::new(skip, "`skip` and `expose` are mutually exclusive"));
        }
        if let (Some(_), Some(accessor)) = (&this.converter, &this.accessor) {
            return Err(syn::Error::new(
                accessor.span(),
                "`accessor` cannot be combined with `converter`",
            ));
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: &ParseNestedMeta) -> syn::Result<()> {
        let path = &meta.path;
        if path.is_ident("rename") {
            self.rename = Some(parse_str(meta)?);
        } else if path.is_ident("alias") {
            self.aliases.extend(parse_str_list(meta)?);
        } else if path.is_ident("groups") {
            self.groups.extend(parse_str_list(meta)?);
        } else if path.is_ident("since") {
            self.since = Some(VersionLit::parse(&parse_str(meta)?)?);
        } else if path.is_ident("until") {
            self.until = Some(VersionLit::parse(&parse_str(meta)?)?);
        } else if path.is_ident("skip_when_empty") {
            self.skip_when_empty = true;
        } else if path.is_ident("skip") {
            self.skip = Some(ident_span(path));
        } else if path.is_ident("expose") {
            self.expose = Some(ident_span(path));
        } else if path.is_ident("skip_serializing") {
            self.skip_serializing = true;
        } else if path.is_ident("skip_deserializing") {
            self.skip_deserializing = true;
        } else if path.is_ident("default") {
            self.default = if meta.input.peek(Token![=]) {
                DefaultAttr::Path(parse_str(meta)?.parse()?)
            } else {
                DefaultAttr::Trait
            };
        } else if path.is_ident("path") {
            let lit = parse_str(meta)?;
            let parsed = ValuePath::parse(&lit.value())
                .map_err(|err| syn::Error::new(lit.span(), err.to_string()))?;
            if parsed.is_empty() {
                return Err(syn::Error::new(lit.span(), "`path` must not be empty"));
            }
            self.path = Some((lit, parsed.segments().to_vec()));
        } else if path.is_ident("converter") {
            self.converter = Some(parse_str(meta)?.parse()?);
        } else if path.is_ident("accessor") {
            self.accessor = Some(parse_ident(meta)?);
        } else {
            return Err(meta.error("unknown field attribute"));
        }
        Ok(())
    }
}

fn ident_span(path: &syn::Path) -> Span {
    path.get_ident().map_or_else(Span::call_site, Ident::span)
}

// -----------------------------------------------------------------------------
// Variant attributes

/// `#[serial(...)]` attributes of a unit enum variant.
#[derive(Debug, Default)]
pub(crate) struct VariantAttributes {
    pub rename: Option<LitStr>,
    pub aliases: Vec<LitStr>,
}

impl VariantAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for_each_serial_attr(attrs, |meta| {
            if meta.path.is_ident("rename") {
                this.rename = Some(parse_str(&meta)?);
            } else if meta.path.is_ident("alias") {
                this.aliases.extend(parse_str_list(&meta)?);
            } else {
                return Err(meta.error("unknown variant attribute, expected `rename` or `alias`"));
            }
            Ok(())
        })?;
        Ok(this)
    }
}
