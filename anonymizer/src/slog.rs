//! Adapters for emitting anonymization output through `slog`.
//!
//! Only derived artifacts are loggable: the [`AnonymizationReport`] and the
//! [`Anonymized`] table. `Dataset` deliberately has no `slog::Value` impl, so
//! raw input cannot be logged by accident through this crate.
//!
//! Values are serialized to `serde_json::Value` and emitted via `slog`'s
//! nested-value support. Serialization failures are logged as a placeholder
//! string rather than returned to `slog` as errors.

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::anonymization::{AnonymizationReport, Anonymized};

/// A `slog::Value` holding an owned JSON payload.
pub struct LoggedJson {
    value: JsonValue,
}

impl LoggedJson {
    /// Serializes `value`, falling back to a JSON string on failure.
    pub fn new<T: Serialize>(value: &T) -> Self {
        let value = serde_json::to_value(value).unwrap_or_else(|_| {
            JsonValue::String("Failed to serialize anonymization output".to_string())
        });
        Self { value }
    }

    /// The captured payload.
    pub fn as_json(&self) -> &JsonValue {
        &self.value
    }
}

impl SlogValue for LoggedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

impl SlogValue for AnonymizationReport {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        SlogValue::serialize(&LoggedJson::new(self), record, key, serializer)
    }
}

impl SlogValue for Anonymized {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        SlogValue::serialize(&LoggedJson::new(self), record, key, serializer)
    }
}
