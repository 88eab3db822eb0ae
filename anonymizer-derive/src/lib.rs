//! Derive macros for `anonymizer`.
//!
//! This crate generates the code behind `#[derive(Tabular)]`. It:
//! - reads `#[tabular(...)]` container and field attributes
//! - emits a `Record` implementation (column schema plus cell conversion)
//! - emits a `Debug` implementation that hides PII fields
//!
//! It does **not** define datasets, markers or the anonymization passes.
//! Those live in the main `anonymizer` crate.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod container;
mod derive_struct;
mod field;
mod generics;
use container::{parse_container_options, ContainerOptions};
use derive_struct::{derive_struct, StructDeriveOutput};
use generics::{add_debug_bounds, add_value_bounds};

/// Derives `anonymizer::Record` (and `Debug`) for structs with named fields.
///
/// # Container Attributes
///
/// - `#[tabular(skip_debug)]` - Opt out of `Debug` impl generation. Use this when the type
///   needs a custom `Debug` implementation or already derives `Debug`.
///
/// # Field Attributes
///
/// - **No annotation**: the field becomes a plain column named after the field.
/// - `#[tabular(pii)]`: the column holds personally identifying information. Configs built with
///   `AnonymizationConfig::for_record` redact it.
/// - `#[tabular(quasi_identifier)]`: the column is part of the k-anonymity grouping key.
/// - `#[tabular(rename = "...")]`: overrides the column name.
/// - `#[tabular(skip)]`: the field is left out of the row. Cannot be combined with other options.
///
/// Every column field must implement `Into<anonymizer::Value>`: strings, every primitive
/// integer, `bool` (as `0`/`1`), floats, and `Option` of those. Integers outside the `i64`
/// range are stored as decimal text. Duplicate column names, enums, unions, tuple structs
/// and unit structs are rejected at compile time.
///
/// # Additional Generated Impls
///
/// - `Debug`: PII fields print as `"REDACTED"`; skipped fields are omitted.
#[proc_macro_derive(Tabular, attributes(tabular))]
pub fn derive_tabular(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the anonymizer crate root.
///
/// Handles crate renaming (e.g., `anon = { package = "anonymizer", ... }`)
/// and internal usage (when the derive is used inside the anonymizer crate).
fn crate_root() -> TokenStream {
    match crate_name("anonymizer") {
        Ok(FoundCrate::Itself) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::anonymizer },
    }
}

fn crate_path(item: &str) -> TokenStream {
    let root = crate_root();
    let item_ident = syn::parse_str::<syn::Path>(item).expect("anonymizer crate path should parse");
    quote! { #root::#item_ident }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let ContainerOptions { skip_debug } = parse_container_options(&attrs)?;

    let StructDeriveOutput {
        schema,
        cells,
        bindings,
        value_bound_types,
        debug_body,
        debug_bound_types,
    } = match data {
        Data::Struct(data) => derive_struct(&ident, data, &generics)?,
        Data::Enum(e) => {
            return Err(syn::Error::new(
                e.enum_token.span(),
                "`Tabular` cannot be derived for enums; a row needs a fixed set of columns",
            ));
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Tabular` cannot be derived for unions",
            ));
        }
    };

    let crate_root = crate_root();

    let record_generics = add_value_bounds(generics.clone(), &value_bound_types);
    let (impl_generics, ty_generics, where_clause) = record_generics.split_for_impl();
    let debug_generics = add_debug_bounds(generics, &debug_bound_types);
    let (debug_impl_generics, debug_ty_generics, debug_where_clause) =
        debug_generics.split_for_impl();

    let debug_impl = if skip_debug {
        quote! {}
    } else {
        quote! {
            impl #debug_impl_generics ::core::fmt::Debug for #ident #debug_ty_generics #debug_where_clause {
                #[allow(unused_variables)]
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    #debug_body
                }
            }
        }
    };

    Ok(quote! {
        impl #impl_generics #crate_root::Record for #ident #ty_generics #where_clause {
            fn schema() -> &'static [#crate_root::ColumnSpec] {
                const SCHEMA: &[#crate_root::ColumnSpec] = &[#(#schema),*];
                SCHEMA
            }

            fn into_cells(self) -> ::std::vec::Vec<#crate_root::Value> {
                let Self { #(#bindings,)* .. } = self;
                ::std::vec![#(#cells),*]
            }
        }

        #debug_impl
    })
}
