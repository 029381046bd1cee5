//! Attribute parsing for the Record derive macro.
//!
//! Two forms of `#[filter(...)]` are understood:
//!
//! - on fields, a single string literal holding the field tag:
//!   `#[filter("name,omitempty")]`;
//! - on the struct, `#[filter(collection = "users")]`, which names the collection
//!   the record targets.

use syn::{
    Attribute, Error, Expr, ExprLit, Lit, LitStr, Meta, Result, Token,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
};

const ATTRIBUTE: &str = "filter";

/// Field-level attribute: `#[filter("tag")]`.
#[derive(Debug, Clone, Default)]
pub struct FieldAttr {
    /// The raw tag string. Empty when the field carries no attribute.
    pub tag: String,
}

impl Parse for FieldAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let tag: LitStr = input
            .parse()
            .map_err(|e| Error::new(e.span(), "expected a tag string, e.g. #[filter(\"name,omitempty\")]"))?;

        if !input.is_empty() {
            return Err(Error::new(input.span(), "unexpected tokens after the tag string"));
        }

        Ok(FieldAttr { tag: tag.value() })
    }
}

/// Container-level attribute: `#[filter(collection = "...")]`.
#[derive(Debug, Clone, Default)]
pub struct ContainerAttr {
    /// Collection targeted by the record, if any.
    pub collection: Option<String>,
}

impl Parse for ContainerAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = ContainerAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::NameValue(nv) if nv.path.is_ident("collection") => {
                    let Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) = &nv.value else {
                        return Err(Error::new(nv.value.span(), "collection must be a string literal"));
                    };

                    if s.value().is_empty() {
                        return Err(Error::new(s.span(), "collection name must not be empty"));
                    }

                    attr.collection = Some(s.value());
                }
                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown filter attribute. Expected: collection = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extracts the `#[filter("...")]` tag of a field.
pub fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttr> {
    let mut found = attrs.iter().filter(|attr| attr.path().is_ident(ATTRIBUTE));

    let Some(attr) = found.next() else {
        return Ok(FieldAttr::default());
    };

    if let Some(duplicate) = found.next() {
        return Err(Error::new(duplicate.span(), "a field may carry only one filter tag"));
    }

    attr.parse_args::<FieldAttr>()
}

/// Extracts the `#[filter(...)]` options of the struct itself.
pub fn parse_container_attrs(attrs: &[Attribute]) -> Result<ContainerAttr> {
    let mut container = ContainerAttr::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident(ATTRIBUTE)) {
        let parsed = attr.parse_args::<ContainerAttr>()?;
        if parsed.collection.is_some() {
            container.collection = parsed.collection;
        }
    }

    Ok(container)
}
