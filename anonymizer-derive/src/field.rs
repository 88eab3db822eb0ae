//! Parsing of `#[tabular(...)]` field attributes.
//!
//! Maps attribute syntax to the column a field becomes, and produces
//! structured errors for invalid forms.

use syn::{spanned::Spanned, Attribute, LitStr, Meta, Result};

/// How a field is laid out as a column.
///
/// | Attribute | Effect |
/// |-----------|--------|
/// | None | Plain column named after the field |
/// | `pii` | Column flagged as personally identifying |
/// | `quasi_identifier` | Column flagged as a grouping key |
/// | `rename = "..."` | Column name override |
/// | `skip` | No column at all |
#[derive(Clone, Debug, Default)]
pub(crate) struct FieldOptions {
    pub(crate) pii: bool,
    pub(crate) quasi_identifier: bool,
    pub(crate) rename: Option<LitStr>,
    pub(crate) skip: bool,
}

fn set_flag(flag: &mut bool, name: &str, meta: &syn::meta::ParseNestedMeta<'_>) -> Result<()> {
    if *flag {
        return Err(meta.error(format!("duplicate `{name}` option")));
    }
    *flag = true;
    Ok(())
}

pub(crate) fn parse_field_options(attrs: &[Attribute]) -> Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in attrs {
        if !attr.path().is_ident("tabular") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "expected field options (e.g., #[tabular(pii)])",
                ));
            }
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("pii") {
                        set_flag(&mut options.pii, "pii", &meta)
                    } else if meta.path.is_ident("quasi_identifier") {
                        set_flag(&mut options.quasi_identifier, "quasi_identifier", &meta)
                    } else if meta.path.is_ident("skip") {
                        set_flag(&mut options.skip, "skip", &meta)
                    } else if meta.path.is_ident("rename") {
                        if options.rename.is_some() {
                            return Err(meta.error("duplicate `rename` option"));
                        }
                        let name: LitStr = meta.value()?.parse()?;
                        if name.value().is_empty() {
                            return Err(syn::Error::new(name.span(), "column name cannot be empty"));
                        }
                        options.rename = Some(name);
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown field option `{}`; expected `pii`, `quasi_identifier`, \
                             `rename` or `skip`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[tabular]",
                ));
            }
        }
    }

    if options.skip && (options.pii || options.quasi_identifier || options.rename.is_some()) {
        return Err(syn::Error::new(
            attrs
                .iter()
                .find(|attr| attr.path().is_ident("tabular"))
                .map_or_else(proc_macro2::Span::call_site, Spanned::span),
            "`skip` cannot be combined with other #[tabular] options",
        ));
    }

    Ok(options)
}
