//! Anonymization of tabular data.
//!
//! The crate works on an in-memory [`Dataset`] and provides four operations:
//! - [`detect_pii`]: flag columns whose name contains a PII keyword
//! - [`redact`]: overwrite whole columns with [`REDACTED_MARKER`]
//! - [`enforce_k_anonymity`]: suppress quasi-identifiers of rows in groups
//!   smaller than `k`
//! - [`score_individualization`]: count quasi-identifier tuples held by a
//!   single row
//!
//! [`Anonymizer`] chains them into one configurable run and returns an
//! [`AnonymizationReport`]. Typed rows can be declared with
//! `#[derive(Tabular)]`, which also records which fields are PII and which
//! are quasi-identifiers.
//!
//! Redaction and suppression mutate a caller-owned table in place, after
//! validating every input: a call that returns an error has not touched the
//! table. The [`Anonymizer`] never mutates its input and works on a copy.
//!
//! What this crate does not do:
//! - read or write files, or fetch datasets
//! - inspect cell contents to decide what is PII
//! - re-check the group formed by suppressed rows against `k`
//!
//! Integrations are behind feature flags: `serde` for (de)serializing
//! datasets, configuration and reports, `slog` for structured logging.

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

pub use anonymizer_derive::Tabular;

#[allow(unused_extern_crates)]
extern crate self as anonymizer;

// Module declarations
mod anonymization;
mod dataset;
mod detection;
mod error;
mod record;
#[cfg(feature = "slog")]
pub mod slog;

// Re-exports
pub use anonymization::{
    enforce_k_anonymity, group_rows, redact, redact_with_policy, score_individualization,
    AnonymizationConfig, AnonymizationReport, Anonymized, Anonymizer, CellRedactionPolicy,
    ColumnSelection, Grouping, KeepConfig, MaskConfig, QuasiIdentifiers, DEFAULT_K,
    REDACTED_MARKER, SUPPRESSED_MARKER,
};
pub use dataset::{Column, Dataset, Value};
pub use detection::{detect_pii, KeywordSet, PiiDetector, DEFAULT_PII_KEYWORDS};
pub use error::{AnonymizeError, Result};
pub use record::{ColumnSpec, Record};
