//! Redaction, k-anonymity and the pipeline that ties them together.
//!
//! - **`policy`**: how a cell is rewritten, and the fixed markers
//! - **`redact`**: column-wide redaction
//! - **`k_anonymity`**: grouping, suppression and the individualization score
//! - **`pipeline`**: configuration, the `Anonymizer` and its report
//!
//! Column detection lives in `crate::detection`.

mod k_anonymity;
mod pipeline;
mod policy;
mod redact;

pub use k_anonymity::{enforce_k_anonymity, group_rows, score_individualization, Grouping};
pub use pipeline::{
    AnonymizationConfig, AnonymizationReport, Anonymized, Anonymizer, ColumnSelection,
    QuasiIdentifiers, DEFAULT_K,
};
pub use policy::{
    CellRedactionPolicy, KeepConfig, MaskConfig, REDACTED_MARKER, SUPPRESSED_MARKER,
};
pub use redact::{redact, redact_with_policy};
