//! Quasi-identifier grouping, k-anonymity suppression and the
//! individualization score.
//!
//! Groups are always derived from the current state of the table. Nothing is
//! cached: any write to the dataset invalidates a previously computed
//! [`Grouping`].

use std::collections::HashMap;

use super::policy::SUPPRESSED_MARKER;
use crate::{
    dataset::{Dataset, Value},
    error::{AnonymizeError, Result},
};

/// A partition of row indices by their quasi-identifier tuple.
///
/// Group ids are assigned in order of first appearance. Missing cells take
/// part in the tuple like any other value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grouping {
    row_groups: Vec<usize>,
    sizes: Vec<usize>,
}

impl Grouping {
    /// Number of distinct tuples.
    pub fn group_count(&self) -> usize {
        self.sizes.len()
    }

    /// Size of each group, indexed by group id.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Group id of a row.
    pub fn group_of(&self, row: usize) -> Option<usize> {
        self.row_groups.get(row).copied()
    }

    /// Row indices of every group, indexed by group id.
    pub fn groups(&self) -> Vec<Vec<usize>> {
        let mut groups: Vec<Vec<usize>> = self
            .sizes
            .iter()
            .map(|size| Vec::with_capacity(*size))
            .collect();
        for (row, group) in self.row_groups.iter().enumerate() {
            groups[*group].push(row);
        }
        groups
    }

    /// Size of the smallest group, i.e. the k the table currently satisfies.
    pub fn smallest_group(&self) -> Option<usize> {
        self.sizes.iter().copied().min()
    }

    /// Number of groups with exactly one member.
    pub fn singleton_count(&self) -> usize {
        self.sizes.iter().filter(|size| **size == 1).count()
    }

    /// Rows whose group holds fewer than `k` members, in ascending order.
    pub fn undersized_rows(&self, k: usize) -> Vec<usize> {
        self.row_groups
            .iter()
            .enumerate()
            .filter(|(_, group)| self.sizes[**group] < k)
            .map(|(row, _)| row)
            .collect()
    }
}

/// Partitions the rows of `dataset` by the values of `quasi_identifiers`.
///
/// An empty identifier list puts every row into a single group.
///
/// # Errors
///
/// Returns [`AnonymizeError::InvalidColumn`] for an unknown column.
pub fn group_rows<S>(dataset: &Dataset, quasi_identifiers: &[S]) -> Result<Grouping>
where
    S: AsRef<str>,
{
    let columns = dataset.resolve_columns(quasi_identifiers)?;
    Ok(group_by_columns(dataset, &columns))
}

fn group_by_columns(dataset: &Dataset, columns: &[usize]) -> Grouping {
    let mut ids: HashMap<Vec<&Value>, usize> = HashMap::new();
    let mut grouping = Grouping {
        row_groups: Vec::with_capacity(dataset.row_count()),
        sizes: Vec::new(),
    };
    for row in 0..dataset.row_count() {
        let key: Vec<&Value> = columns
            .iter()
            .map(|column| &dataset.values_at(*column)[row])
            .collect();
        let next = grouping.sizes.len();
        let group = *ids.entry(key).or_insert(next);
        if group == next {
            grouping.sizes.push(0);
        }
        grouping.sizes[group] += 1;
        grouping.row_groups.push(group);
    }
    grouping
}

/// Suppresses every row whose quasi-identifier tuple is shared by fewer than
/// `k` rows, and returns the suppressed row indices in ascending order.
///
/// Each quasi-identifier cell of a suppressed row is overwritten with
/// [`SUPPRESSED_MARKER`]. An empty identifier list or `k == 1` leaves the table
/// unchanged. A `k` larger than the row count suppresses every row.
///
/// Suppressed rows end up sharing one all-`SUPPRESSED` tuple, and that group
/// is not checked against `k` again: a single suppressed row remains an
/// individualized group. Use [`score_individualization`] to observe it.
///
/// # Errors
///
/// [`AnonymizeError::InvalidThreshold`] when `k` is zero, checked before
/// anything else, and [`AnonymizeError::InvalidColumn`] for an unknown
/// column. The table is untouched on error.
pub fn enforce_k_anonymity<S>(
    dataset: &mut Dataset,
    k: usize,
    quasi_identifiers: &[S],
) -> Result<Vec<usize>>
where
    S: AsRef<str>,
{
    if k == 0 {
        return Err(AnonymizeError::InvalidThreshold { k });
    }
    if quasi_identifiers.is_empty() {
        return Ok(Vec::new());
    }

    let columns = dataset.resolve_columns(quasi_identifiers)?;
    let suppressed = group_by_columns(dataset, &columns).undersized_rows(k);
    for column in columns {
        let values = dataset.values_at_mut(column);
        for row in &suppressed {
            values[*row] = Value::text(SUPPRESSED_MARKER);
        }
    }
    Ok(suppressed)
}

/// Counts quasi-identifier tuples held by exactly one row.
///
/// The grouping is recomputed on the table as it is now, so running it after
/// [`enforce_k_anonymity`] measures the residual risk. Returns 0 for an empty
/// identifier list.
///
/// # Errors
///
/// Returns [`AnonymizeError::InvalidColumn`] for an unknown column.
pub fn score_individualization<S>(dataset: &Dataset, quasi_identifiers: &[S]) -> Result<usize>
where
    S: AsRef<str>,
{
    if quasi_identifiers.is_empty() {
        return Ok(0);
    }
    Ok(group_rows(dataset, quasi_identifiers)?.singleton_count())
}

#[cfg(test)]
mod tests {
    use super::{enforce_k_anonymity, group_rows, score_individualization};
    use crate::{
        anonymization::policy::SUPPRESSED_MARKER,
        dataset::{Dataset, Value},
        AnonymizeError,
    };

    fn visitors() -> Dataset {
        Dataset::from_rows(
            ["zip", "age", "visits"],
            [
                vec![Value::text("90210"), Value::from(30), Value::from(4)],
                vec![Value::text("90210"), Value::from(30), Value::from(1)],
                vec![Value::text("10001"), Value::from(40), Value::from(9)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn grouping_follows_first_appearance() {
        let grouping = group_rows(&visitors(), &["zip", "age"]).unwrap();
        assert_eq!(grouping.group_count(), 2);
        assert_eq!(grouping.sizes(), &[2, 1]);
        assert_eq!(grouping.groups(), vec![vec![0, 1], vec![2]]);
        assert_eq!(grouping.group_of(2), Some(1));
        assert_eq!(grouping.smallest_group(), Some(1));
        assert_eq!(grouping.singleton_count(), 1);
    }

    #[test]
    fn missing_cells_share_a_group() {
        let dataset = Dataset::from_rows(
            ["zip"],
            [vec![Value::Missing], vec![Value::Missing], vec![Value::text("1")]],
        )
        .unwrap();
        let grouping = group_rows(&dataset, &["zip"]).unwrap();
        assert_eq!(grouping.sizes(), &[2, 1]);
    }

    #[test]
    fn undersized_group_is_suppressed() {
        let mut dataset = visitors();
        let suppressed = enforce_k_anonymity(&mut dataset, 2, &["zip", "age"]).unwrap();
        assert_eq!(suppressed, vec![2]);
        assert_eq!(dataset.cell(2, "zip"), Some(&Value::text(SUPPRESSED_MARKER)));
        assert_eq!(dataset.cell(2, "age"), Some(&Value::text(SUPPRESSED_MARKER)));
        assert_eq!(dataset.cell(2, "visits"), Some(&Value::Integer(9)));
        assert_eq!(dataset.cell(0, "zip"), Some(&Value::text("90210")));
    }

    #[test]
    fn lone_suppressed_row_still_counts_as_individualized() {
        let mut dataset = visitors();
        enforce_k_anonymity(&mut dataset, 2, &["zip", "age"]).unwrap();
        assert_eq!(score_individualization(&dataset, &["zip", "age"]).unwrap(), 1);
    }

    #[test]
    fn zero_threshold_is_rejected_before_column_lookup() {
        let mut dataset = visitors();
        let err = enforce_k_anonymity(&mut dataset, 0, &["nope"]).unwrap_err();
        assert_eq!(err, AnonymizeError::InvalidThreshold { k: 0 });
        assert_eq!(dataset, visitors());
    }

    #[test]
    fn unknown_quasi_identifier_is_rejected() {
        let mut dataset = visitors();
        let err = enforce_k_anonymity(&mut dataset, 5, &["zip", "city"]).unwrap_err();
        assert_eq!(
            err,
            AnonymizeError::InvalidColumn {
                column: "city".into()
            }
        );
        assert_eq!(dataset, visitors());
    }

    #[test]
    fn empty_quasi_identifiers_are_a_no_op() {
        let mut dataset = visitors();
        let suppressed = enforce_k_anonymity::<&str>(&mut dataset, 10, &[]).unwrap();
        assert!(suppressed.is_empty());
        assert_eq!(dataset, visitors());
        assert_eq!(score_individualization::<&str>(&dataset, &[]).unwrap(), 0);
    }

    #[test]
    fn empty_dataset_has_nothing_to_suppress() {
        let mut dataset = Dataset::with_columns(["zip"]).unwrap();
        assert!(enforce_k_anonymity(&mut dataset, 3, &["zip"])
            .unwrap()
            .is_empty());
        assert_eq!(score_individualization(&dataset, &["zip"]).unwrap(), 0);
    }
}
