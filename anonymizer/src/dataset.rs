//! In-memory tabular data: cells, named columns and positional rows.
//!
//! A [`Dataset`] is column-oriented. Every column has the same length and a
//! row is the set of cells sharing an index across all columns. Column names
//! are unique; construction rejects duplicates and ragged input instead of
//! padding or truncating.
//!
//! The engine never reads or writes files. Loaders (CSV, spreadsheets, HTTP)
//! live outside this crate and hand over a materialized `Dataset`.

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use crate::error::{AnonymizeError, Result};

/// A single cell.
///
/// Equality and hashing are total so cells can key groups: floats compare by
/// bit pattern after folding `-0.0` into `0.0` and every NaN into one NaN.
/// Values of different variants never compare equal, so `Integer(1)` and
/// `Float(1.0)` land in different groups.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// Free text, including the redaction and suppression markers.
    Text(String),
    /// Whole numbers.
    Integer(i64),
    /// Floating point numbers.
    Float(f64),
    /// An absent cell.
    Missing,
}

impl Value {
    /// Builds a [`Value::Text`] cell.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns `true` for [`Value::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Returns the text payload of a [`Value::Text`] cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    fn float_key(value: f64) -> u64 {
        if value.is_nan() {
            f64::NAN.to_bits()
        } else if value == 0.0 {
            0.0_f64.to_bits()
        } else {
            value.to_bits()
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => Self::float_key(*a) == Self::float_key(*b),
            (Self::Missing, Self::Missing) => true,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Text(text) => text.hash(state),
            Self::Integer(number) => number.hash(state),
            Self::Float(number) => Self::float_key(*number).hash(state),
            Self::Missing => {}
        }
    }
}

/// Renders the cell the way an exported table would show it; missing cells
/// render as an empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(number) => write!(f, "{number}"),
            Self::Float(number) => write!(f, "{number}"),
            Self::Missing => Ok(()),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Integer(i64::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide_integer {
    ($($ty:ty),*) => {
        $(
            /// Values beyond `i64::MAX` become their decimal text.
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    i64::try_from(value)
                        .map_or_else(|_| Self::Text(value.to_string()), Self::Integer)
                }
            }
        )*
    };
}

impl_from_wide_integer!(u64, usize, i128, u128, isize);

/// Booleans are stored as `0` and `1`.
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// A named, ordered sequence of cells.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    /// The column name as supplied at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The cells, in row order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// An ordered collection of equally long, uniquely named columns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Column>", into = "Vec<Column>"))]
pub struct Dataset {
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    /// Creates a dataset with no columns and no rows.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty dataset with the given column names.
    pub fn with_columns<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dataset = Self::new();
        for name in names {
            dataset.push_column(name, Vec::new())?;
        }
        Ok(dataset)
    }

    /// Builds a dataset from `(name, values)` pairs.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<Value>)>,
        S: Into<String>,
    {
        let mut dataset = Self::new();
        for (name, values) in columns {
            dataset.push_column(name, values)?;
        }
        Ok(dataset)
    }

    /// Builds a dataset from column names and row-major cells.
    pub fn from_rows<N, S, R, V>(names: N, rows: R) -> Result<Self>
    where
        N: IntoIterator<Item = S>,
        S: Into<String>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut dataset = Self::with_columns(names)?;
        for row in rows {
            dataset.push_row(row)?;
        }
        Ok(dataset)
    }

    /// Appends a column. Its length must match the current row count unless
    /// the dataset has no columns yet.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> Result<()> {
        let name = name.into();
        if self.column_index(&name).is_some() {
            return Err(AnonymizeError::DuplicateColumn { column: name });
        }
        if (!self.columns.is_empty() || self.rows > 0) && values.len() != self.rows {
            return Err(AnonymizeError::RowLengthMismatch {
                expected: self.rows,
                found: values.len(),
            });
        }
        self.rows = values.len();
        self.columns.push(Column { name, values });
        Ok(())
    }

    /// Appends a row. It must carry exactly one cell per column.
    pub fn push_row<R, V>(&mut self, row: R) -> Result<()>
    where
        R: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let cells: Vec<Value> = row.into_iter().map(Into::into).collect();
        if cells.len() != self.columns.len() {
            return Err(AnonymizeError::RowLengthMismatch {
                expected: self.columns.len(),
                found: cells.len(),
            });
        }
        for (column, cell) in self.columns.iter_mut().zip(cells) {
            column.values.push(cell);
        }
        self.rows += 1;
        Ok(())
    }

    /// Column names in table order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(Column::name)
    }

    /// All columns in table order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Position of the column with the exact given name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Returns `true` when the dataset holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Reads a single cell.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        self.column(column)?.values.get(row)
    }

    /// Returns the cells of one row in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.rows {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|column| &column.values[index])
                .collect(),
        )
    }

    /// Iterates rows in order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Value>> + '_ {
        (0..self.rows).filter_map(|index| self.row(index))
    }

    /// Resolves names to column positions, failing on the first unknown name.
    pub(crate) fn resolve_columns<S>(&self, names: &[S]) -> Result<Vec<usize>>
    where
        S: AsRef<str>,
    {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.column_index(name)
                    .ok_or_else(|| AnonymizeError::invalid_column(name))
            })
            .collect()
    }

    pub(crate) fn values_at(&self, column: usize) -> &[Value] {
        &self.columns[column].values
    }

    pub(crate) fn values_at_mut(&mut self, column: usize) -> &mut [Value] {
        &mut self.columns[column].values
    }
}

impl TryFrom<Vec<Column>> for Dataset {
    type Error = AnonymizeError;

    fn try_from(columns: Vec<Column>) -> Result<Self> {
        Self::from_columns(
            columns
                .into_iter()
                .map(|Column { name, values }| (name, values)),
        )
    }
}

impl From<Dataset> for Vec<Column> {
    fn from(dataset: Dataset) -> Self {
        dataset.columns
    }
}
