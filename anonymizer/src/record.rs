//! Typed rows.
//!
//! [`Record`] is normally implemented with `#[derive(Tabular)]`, which reads
//! `#[tabular(...)]` field attributes:
//!
//! | Attribute | Effect |
//! |-----------|--------|
//! | None | Plain column named after the field |
//! | `#[tabular(pii)]` | Column is redacted by schema-driven configs |
//! | `#[tabular(quasi_identifier)]` | Column takes part in k-anonymity grouping |
//! | `#[tabular(rename = "...")]` | Overrides the column name |
//! | `#[tabular(skip)]` | Field is not turned into a column |
//!
//! Field types convert through `Into<Value>`.

use crate::{
    dataset::{Dataset, Value},
    error::Result,
};

/// Schema entry for one column of a [`Record`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSpec {
    name: &'static str,
    pii: bool,
    quasi_identifier: bool,
}

impl ColumnSpec {
    /// Creates a schema entry.
    #[must_use]
    pub const fn new(name: &'static str, pii: bool, quasi_identifier: bool) -> Self {
        Self {
            name,
            pii,
            quasi_identifier,
        }
    }

    /// Column name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the column holds personally identifying information.
    pub const fn is_pii(&self) -> bool {
        self.pii
    }

    /// Whether the column is a quasi-identifier.
    pub const fn is_quasi_identifier(&self) -> bool {
        self.quasi_identifier
    }
}

/// A type that can be laid out as one dataset row.
pub trait Record {
    /// The columns produced by [`Record::into_cells`], in order.
    fn schema() -> &'static [ColumnSpec];

    /// Converts the record into cells, one per schema entry.
    fn into_cells(self) -> Vec<Value>;

    /// Names of the columns marked `pii`.
    fn pii_columns() -> Vec<String> {
        Self::schema()
            .iter()
            .filter(|spec| spec.is_pii())
            .map(|spec| spec.name().to_owned())
            .collect()
    }

    /// Names of the columns marked `quasi_identifier`.
    fn quasi_identifiers() -> Vec<String> {
        Self::schema()
            .iter()
            .filter(|spec| spec.is_quasi_identifier())
            .map(|spec| spec.name().to_owned())
            .collect()
    }
}

impl Dataset {
    /// Lays out records as rows, with one column per schema entry.
    ///
    /// # Errors
    ///
    /// The derive rejects duplicate column names at compile time, so this only
    /// fails for a hand-written [`Record`] whose schema repeats a name or whose
    /// rows do not match the schema length.
    pub fn from_records<R, I>(records: I) -> Result<Self>
    where
        R: Record,
        I: IntoIterator<Item = R>,
    {
        let mut dataset = Self::with_columns(R::schema().iter().map(ColumnSpec::name))?;
        for record in records {
            dataset.push_row(record.into_cells())?;
        }
        Ok(dataset)
    }
}
