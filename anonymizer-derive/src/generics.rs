//! Generic type parameter handling and `where` clause management.
//!
//! Bounds are added per field type rather than per parameter: a field of
//! type `Option<T>` yields `Option<T>: Into<Value>`, which is what the
//! generated code actually needs, instead of a stricter `T: Into<Value>`.
//!
//! ## PhantomData Handling
//!
//! `PhantomData<T>` does not count as a use of `T`. Such fields are normally
//! `#[tabular(skip)]`ped, and `T` should not pick up a bound from them.

use syn::{parse_quote, Ident};

use crate::crate_path;

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    if let syn::Type::Path(path) = ty {
        if let Some(segment) = path.path.segments.last() {
            if segment.ident == "PhantomData" {
                return;
            }

            if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                for arg in &args.args {
                    if let syn::GenericArgument::Type(inner_ty) = arg {
                        collect_generics_from_type(inner_ty, generics, result);
                    }
                }
            }

            for param in generics.type_params() {
                if segment.ident == param.ident && !result.iter().any(|g| g == &param.ident) {
                    result.push(param.ident.clone());
                }
            }
        }
    }
}

/// Returns `true` if `ty` mentions any type parameter of `generics`.
pub(crate) fn uses_generics(ty: &syn::Type, generics: &syn::Generics) -> bool {
    let mut used = Vec::new();
    collect_generics_from_type(ty, generics, &mut used);
    !used.is_empty()
}

/// Adds `Ty: Into<Value>` for every generic column type.
pub(crate) fn add_value_bounds(mut generics: syn::Generics, types: &[syn::Type]) -> syn::Generics {
    let value_path = crate_path("Value");
    let where_clause = generics.make_where_clause();
    for ty in types {
        where_clause
            .predicates
            .push(parse_quote!(#ty: ::core::convert::Into<#value_path>));
    }
    generics
}

/// Adds `Ty: Debug` for every generic type printed by the `Debug` impl.
pub(crate) fn add_debug_bounds(mut generics: syn::Generics, types: &[syn::Type]) -> syn::Generics {
    let where_clause = generics.make_where_clause();
    for ty in types {
        where_clause
            .predicates
            .push(parse_quote!(#ty: ::core::fmt::Debug));
    }
    generics
}
