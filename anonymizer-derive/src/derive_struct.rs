//! Struct-specific `Record` derivation.
//!
//! This module turns named fields into schema entries and cell conversions,
//! and collects the field types that need `where` bounds.

use proc_macro2::{Ident, TokenStream};
use quote::{quote, quote_spanned};
use syn::{spanned::Spanned, DataStruct, Fields, LitStr, Result};

use crate::{crate_path, field::parse_field_options, generics::uses_generics};

pub(crate) struct StructDeriveOutput {
    pub(crate) schema: Vec<TokenStream>,
    pub(crate) cells: Vec<TokenStream>,
    pub(crate) bindings: Vec<Ident>,
    pub(crate) value_bound_types: Vec<syn::Type>,
    pub(crate) debug_body: TokenStream,
    pub(crate) debug_bound_types: Vec<syn::Type>,
}

pub(crate) fn derive_struct(
    name: &Ident,
    data: DataStruct,
    generics: &syn::Generics,
) -> Result<StructDeriveOutput> {
    let fields = match data.fields {
        Fields::Named(fields) => fields,
        Fields::Unnamed(fields) => {
            return Err(syn::Error::new(
                fields.span(),
                "`Tabular` requires named fields; tuple structs have no column names",
            ));
        }
        Fields::Unit => {
            return Err(syn::Error::new(
                name.span(),
                "`Tabular` cannot be derived for unit structs",
            ));
        }
    };

    let column_spec = crate_path("ColumnSpec");
    let value_path = crate_path("Value");
    let redacted_marker = crate_path("REDACTED_MARKER");

    let mut seen: Vec<String> = Vec::new();
    let mut schema = Vec::new();
    let mut cells = Vec::new();
    let mut bindings = Vec::new();
    let mut value_bound_types = Vec::new();
    let mut debug_fields = Vec::new();
    let mut debug_bound_types = Vec::new();
    let mut has_skipped = false;

    for field in fields.named {
        let span = field.span();
        let options = parse_field_options(&field.attrs)?;
        let ident = field.ident.expect("named field should have an identifier");
        if options.skip {
            has_skipped = true;
            continue;
        }

        let raw = ident.to_string();
        let field_name = LitStr::new(raw.strip_prefix("r#").unwrap_or(&raw), ident.span());
        let column = options.rename.unwrap_or_else(|| field_name.clone());
        if seen.contains(&column.value()) {
            return Err(syn::Error::new(
                column.span(),
                format!("duplicate column name `{}`", column.value()),
            ));
        }
        seen.push(column.value());

        let pii = options.pii;
        let quasi_identifier = options.quasi_identifier;
        schema.push(quote_spanned! { span =>
            #column_spec::new(#column, #pii, #quasi_identifier)
        });
        cells.push(quote_spanned! { span =>
            ::core::convert::Into::<#value_path>::into(#ident)
        });

        if uses_generics(&field.ty, generics) {
            value_bound_types.push(field.ty.clone());
            if !pii {
                debug_bound_types.push(field.ty.clone());
            }
        }
        debug_fields.push(if pii {
            quote_spanned! { span =>
                debug.field(#field_name, &#redacted_marker);
            }
        } else {
            quote_spanned! { span =>
                debug.field(#field_name, #ident);
            }
        });
        bindings.push(ident);
    }

    let finish = if has_skipped {
        quote! { debug.finish_non_exhaustive() }
    } else {
        quote! { debug.finish() }
    };

    Ok(StructDeriveOutput {
        schema,
        cells,
        debug_body: quote! {
            let Self { #(#bindings,)* .. } = self;
            let mut debug = f.debug_struct(stringify!(#name));
            #(#debug_fields)*
            #finish
        },
        bindings,
        value_bound_types,
        debug_bound_types,
    })
}
