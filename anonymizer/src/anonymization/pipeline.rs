//! The end-to-end anonymization run.
//!
//! [`Anonymizer::anonymize`] chains the building blocks the way an interactive
//! tool would: pick the columns (detected or chosen by the caller), redact
//! them, then optionally enforce k-anonymity and score the residual risk. The
//! input dataset is never modified; the run works on a copy.

use std::fmt;

use super::{
    k_anonymity::{enforce_k_anonymity, score_individualization},
    policy::CellRedactionPolicy,
    redact::redact_with_policy,
};
use crate::{
    dataset::Dataset,
    detection::{KeywordSet, PiiDetector},
    error::{AnonymizeError, Result},
    record::Record,
};

/// Threshold suggested when a caller enables k-anonymity without picking one.
pub const DEFAULT_K: usize = 2;

#[cfg(feature = "slog")]
macro_rules! log {
    ($anonymizer:expr, $level:ident, $($args:tt)+) => {
        if let Some(logger) = &$anonymizer.logger {
            slog::$level!(logger, $($args)+);
        }
    };
}

#[cfg(not(feature = "slog"))]
macro_rules! log {
    ($anonymizer:expr, $level:ident, $($args:tt)+) => {};
}

/// Which columns get redacted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ColumnSelection {
    /// Flag columns with the configured [`KeywordSet`].
    #[default]
    Detect,
    /// Use exactly these columns and skip detection. An empty list falls back
    /// to [`ColumnSelection::Detect`].
    Explicit(Vec<String>),
}

/// Which columns form the k-anonymity grouping key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QuasiIdentifiers {
    /// Group by the redacted columns.
    #[default]
    SameAsRedacted,
    /// Group by these columns.
    Explicit(Vec<String>),
}

/// Settings for one [`Anonymizer`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnonymizationConfig {
    columns: ColumnSelection,
    k_anonymity: Option<usize>,
    quasi_identifiers: QuasiIdentifiers,
    keywords: KeywordSet,
    policy: CellRedactionPolicy,
}

impl AnonymizationConfig {
    /// Detection on, k-anonymity off, full redaction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Redacts the record's `pii` fields and groups by its
    /// `quasi_identifier` fields, if it declares any. A record without `pii`
    /// fields falls back to keyword detection.
    #[must_use]
    pub fn for_record<R: Record>() -> Self {
        let quasi_identifiers = R::quasi_identifiers();
        let config = Self::new().with_columns(R::pii_columns());
        if quasi_identifiers.is_empty() {
            config
        } else {
            config.with_quasi_identifiers(quasi_identifiers)
        }
    }

    /// Redacts exactly these columns instead of detecting them.
    ///
    /// An empty list keeps keyword detection on.
    #[must_use]
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = ColumnSelection::Explicit(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Switches back to keyword detection.
    #[must_use]
    pub fn detect_columns(mut self) -> Self {
        self.columns = ColumnSelection::Detect;
        self
    }

    /// Enables k-anonymity with threshold `k`.
    #[must_use]
    pub fn with_k_anonymity(mut self, k: usize) -> Self {
        self.k_anonymity = Some(k);
        self
    }

    /// Disables k-anonymity.
    #[must_use]
    pub fn without_k_anonymity(mut self) -> Self {
        self.k_anonymity = None;
        self
    }

    /// Groups by these columns instead of the redacted ones.
    #[must_use]
    pub fn with_quasi_identifiers<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.quasi_identifiers =
            QuasiIdentifiers::Explicit(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Uses a custom keyword set for detection.
    #[must_use]
    pub fn with_keywords(mut self, keywords: KeywordSet) -> Self {
        self.keywords = keywords;
        self
    }

    /// Uses a custom cell policy for redaction.
    #[must_use]
    pub fn with_policy(mut self, policy: CellRedactionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// How redacted columns are chosen.
    pub fn columns(&self) -> &ColumnSelection {
        &self.columns
    }

    /// The k-anonymity threshold, if enabled.
    pub fn k_anonymity(&self) -> Option<usize> {
        self.k_anonymity
    }

    /// How the grouping key is chosen.
    pub fn quasi_identifiers(&self) -> &QuasiIdentifiers {
        &self.quasi_identifiers
    }

    /// Keywords used for detection.
    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// Policy applied to redacted cells.
    pub fn policy(&self) -> &CellRedactionPolicy {
        &self.policy
    }
}

/// Diagnostics of one anonymization run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnonymizationReport {
    /// Columns that were redacted, in resolution order.
    pub redacted_columns: Vec<String>,
    /// Whether the columns came from keyword detection.
    pub columns_detected: bool,
    /// The threshold used, when k-anonymity ran.
    pub k: Option<usize>,
    /// The grouping key used, when k-anonymity ran.
    pub quasi_identifiers: Vec<String>,
    /// Rows whose quasi-identifiers were suppressed, ascending.
    pub suppressed_rows: Vec<usize>,
    /// Groups of size one left after suppression, when k-anonymity ran.
    pub individualized: Option<usize>,
}

impl fmt::Display for AnonymizationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns_detected && self.redacted_columns.is_empty() {
            writeln!(f, "No PII columns detected automatically.")?;
        }
        if let Some(k) = self.k {
            writeln!(
                f,
                "Applied k-anonymity (k={k}). Rows suppressed: {}",
                self.suppressed_rows.len()
            )?;
        }
        if let Some(individualized) = self.individualized {
            writeln!(f, "Number of unique individuals (i): {individualized}")?;
        }
        writeln!(f, "Anonymised columns: {:?}", self.redacted_columns)?;
        f.write_str("Data anonymisation complete!")
    }
}

/// The output of [`Anonymizer::anonymize`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Anonymized {
    report: AnonymizationReport,
    dataset: Dataset,
}

impl Anonymized {
    /// The transformed copy of the input.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// What the run did.
    pub fn report(&self) -> &AnonymizationReport {
        &self.report
    }

    /// Splits into the transformed dataset and the report.
    pub fn into_parts(self) -> (Dataset, AnonymizationReport) {
        (self.dataset, self.report)
    }
}

/// Runs the configured redaction and k-anonymity passes over datasets.
#[derive(Clone, Default)]
pub struct Anonymizer {
    config: AnonymizationConfig,
    detector: PiiDetector,
    #[cfg(feature = "slog")]
    logger: Option<slog::Logger>,
}

impl Anonymizer {
    /// Builds an anonymizer, with a detector over the config's keywords.
    #[must_use]
    pub fn new(config: AnonymizationConfig) -> Self {
        let detector = PiiDetector::new(config.keywords().clone());
        Self {
            config,
            detector,
            #[cfg(feature = "slog")]
            logger: None,
        }
    }

    /// Logs each step of [`Anonymizer::anonymize`] to `logger`.
    #[cfg(feature = "slog")]
    #[must_use]
    pub fn with_logger(mut self, logger: slog::Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The settings this anonymizer runs with.
    pub fn config(&self) -> &AnonymizationConfig {
        &self.config
    }

    /// Anonymizes a copy of `dataset`.
    ///
    /// When detection finds no PII column the run still succeeds, with an
    /// empty [`AnonymizationReport::redacted_columns`]. k-anonymity then only
    /// has an effect if explicit quasi-identifiers were configured.
    ///
    /// # Errors
    ///
    /// [`AnonymizeError::InvalidThreshold`] for a zero threshold and
    /// [`AnonymizeError::InvalidColumn`] for an unknown explicit column or
    /// quasi-identifier.
    pub fn anonymize(&self, dataset: &Dataset) -> Result<Anonymized> {
        if let Some(0) = self.config.k_anonymity() {
            return Err(AnonymizeError::InvalidThreshold { k: 0 });
        }

        let (redacted_columns, columns_detected) = match self.config.columns() {
            ColumnSelection::Explicit(columns) if !columns.is_empty() => (columns.clone(), false),
            _ => (self.detector.detect_in(dataset), true),
        };
        if columns_detected && redacted_columns.is_empty() {
            log!(self, warn, "no PII columns detected automatically";
                "columns" => dataset.column_count());
        }

        let mut anonymized = dataset.clone();
        redact_with_policy(&mut anonymized, &redacted_columns, self.config.policy())?;
        log!(self, debug, "redacted columns";
            "columns" => ?redacted_columns, "detected" => columns_detected);

        let mut report = AnonymizationReport {
            redacted_columns,
            columns_detected,
            ..AnonymizationReport::default()
        };

        if let Some(k) = self.config.k_anonymity() {
            let quasi_identifiers = match self.config.quasi_identifiers() {
                QuasiIdentifiers::SameAsRedacted => report.redacted_columns.clone(),
                QuasiIdentifiers::Explicit(columns) => columns.clone(),
            };
            report.suppressed_rows = enforce_k_anonymity(&mut anonymized, k, &quasi_identifiers)?;
            let individualized = score_individualization(&anonymized, &quasi_identifiers)?;
            log!(self, info, "applied k-anonymity";
                "k" => k,
                "suppressed" => report.suppressed_rows.len(),
                "individualized" => individualized);
            report.k = Some(k);
            report.individualized = Some(individualized);
            report.quasi_identifiers = quasi_identifiers;
        }

        log!(self, info, "anonymization complete"; "report" => &report);
        Ok(Anonymized {
            report,
            dataset: anonymized,
        })
    }
}

impl fmt::Debug for Anonymizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Anonymizer");
        debug.field("config", &self.config);
        #[cfg(feature = "slog")]
        debug.field("logger", &self.logger.is_some());
        debug.finish_non_exhaustive()
    }
}
