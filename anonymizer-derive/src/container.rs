//! `#[tabular(...)]` options on the record type itself.

use syn::{Attribute, Result};

/// Record-level options.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// The caller provides `Debug`; none is generated.
    pub(crate) skip_debug: bool,
}

/// Collects the options of every `#[tabular(...)]` attribute on the type.
///
/// Only the list form is accepted, and each option may appear once.
pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("tabular")) {
        attr.meta.require_list()?.parse_nested_meta(|meta| {
            if !meta.path.is_ident("skip_debug") {
                let option = meta
                    .path
                    .get_ident()
                    .map_or_else(|| "?".to_string(), ToString::to_string);
                return Err(meta.error(format!(
                    "unknown container option `{option}`; expected `skip_debug`"
                )));
            }
            if options.skip_debug {
                return Err(meta.error("duplicate `skip_debug` option"));
            }
            options.skip_debug = true;
            Ok(())
        })?;
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::{Attribute, DeriveInput};

    use super::parse_container_options;

    fn record_attrs(tokens: proc_macro2::TokenStream) -> Vec<Attribute> {
        let input: DeriveInput = syn::parse2(quote! {
            #tokens
            struct Row { id: i64 }
        })
        .expect("should parse as DeriveInput");
        input.attrs
    }

    #[test]
    fn defaults_without_attributes() {
        let options = parse_container_options(&record_attrs(quote! {})).unwrap();
        assert!(!options.skip_debug);
    }

    #[test]
    fn skip_debug_is_read() {
        let attrs = record_attrs(quote! { #[derive(Clone)] #[tabular(skip_debug)] });
        assert!(parse_container_options(&attrs).unwrap().skip_debug);
    }

    #[test]
    fn field_options_are_rejected_on_the_type() {
        let err = parse_container_options(&record_attrs(quote! { #[tabular(pii)] })).unwrap_err();
        assert!(err.to_string().contains("unknown container option `pii`"));
    }

    #[test]
    fn repeated_skip_debug_is_rejected() {
        let attrs = record_attrs(quote! {
            #[tabular(skip_debug)]
            #[tabular(skip_debug)]
        });
        let err = parse_container_options(&attrs).unwrap_err();
        assert!(err.to_string().contains("duplicate `skip_debug`"));
    }

    #[test]
    fn bare_and_name_value_forms_are_rejected() {
        assert!(parse_container_options(&record_attrs(quote! { #[tabular] })).is_err());
        assert!(parse_container_options(&record_attrs(quote! { #[tabular = "x"] })).is_err());
    }
}
