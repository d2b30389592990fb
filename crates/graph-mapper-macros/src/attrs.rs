//! Attribute parsing for the graph mapper derives.

use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr, Path};

/// Parsed `#[graph_mapper(...)]` attributes on a type.
#[derive(Debug, Default)]
pub struct TypeAttrs {
    /// Override class name (default: Rust type name)
    pub name: Option<String>,
    pub kind: Option<KindAttr>,
    /// Methods declared by an interface
    pub methods: Vec<String>,
    methods_span: Option<Span>,
}

/// Class kind attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindAttr {
    Abstract,
    Interface,
    Union,
}

/// Parsed `#[graph_mapper(...)]` attributes on a field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Register a getter
    pub get: bool,
    /// Register a setter
    pub set: bool,
    /// Override accessor name
    pub name: Option<String>,
    /// Element class of a polymorphic setter
    pub class: Option<Path>,
    /// Field holds the superclass part
    pub base: bool,
}

fn is_graph_mapper(attr: &Attribute) -> bool {
    attr.path().is_ident("graph_mapper")
}

fn unknown(meta: &syn::meta::ParseNestedMeta<'_>, what: &str) -> syn::Error {
    meta.error(format!(
        "unknown graph_mapper {what}attribute: {}",
        meta.path.get_ident().map(|i| i.to_string()).unwrap_or_default()
    ))
}

impl TypeAttrs {
    /// Parse attributes from a list of `#[graph_mapper(...)]` attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs.iter().filter(|a| is_graph_mapper(a)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    result.name = Some(value.value());
                } else if meta.path.is_ident("abstract") {
                    result.set_kind(KindAttr::Abstract, &meta)?;
                } else if meta.path.is_ident("interface") {
                    result.set_kind(KindAttr::Interface, &meta)?;
                } else if meta.path.is_ident("union") {
                    result.set_kind(KindAttr::Union, &meta)?;
                } else if meta.path.is_ident("methods") {
                    result.methods_span = Some(meta.path.span());
                    let value: LitStr = meta.value()?.parse()?;
                    result.methods = value
                        .value()
                        .split(',')
                        .map(|m| m.trim().to_string())
                        .filter(|m| !m.is_empty())
                        .collect();
                } else {
                    return Err(unknown(&meta, ""));
                }
                Ok(())
            })?;
        }

        if let Some(span) = result.methods_span.filter(|_| result.kind != Some(KindAttr::Interface)) {
            return Err(syn::Error::new(span, "`methods` is only valid together with `interface`"));
        }

        Ok(result)
    }

    fn set_kind(&mut self, kind: KindAttr, meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<()> {
        if self.kind.is_some() {
            return Err(meta.error("only one of `abstract`, `interface` or `union` may be given"));
        }
        self.kind = Some(kind);
        Ok(())
    }
}

impl FieldAttrs {
    /// Parse attributes from a list of `#[graph_mapper(...)]` attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs.iter().filter(|a| is_graph_mapper(a)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("get") {
                    result.get = true;
                } else if meta.path.is_ident("set") {
                    result.set = true;
                } else if meta.path.is_ident("base") {
                    result.base = true;
                } else if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    result.name = Some(value.value());
                } else if meta.path.is_ident("class") {
                    result.class = Some(meta.value()?.parse()?);
                } else {
                    return Err(unknown(&meta, "field "));
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}
