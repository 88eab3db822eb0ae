//! Column-wide redaction.

use super::policy::CellRedactionPolicy;
use crate::{dataset::Dataset, error::Result};

/// Overwrites every cell of each named column with the redaction marker.
///
/// All rows are rewritten, including missing cells. Other columns are left
/// untouched and redacting twice is the same as redacting once.
///
/// # Errors
///
/// Returns [`AnonymizeError::InvalidColumn`](crate::AnonymizeError::InvalidColumn)
/// if any name is unknown. Names are resolved before the first write.
pub fn redact<S>(dataset: &mut Dataset, columns: &[S]) -> Result<()>
where
    S: AsRef<str>,
{
    redact_with_policy(dataset, columns, &CellRedactionPolicy::default_full())
}

/// Like [`redact`], rewriting each cell through `policy`.
pub fn redact_with_policy<S>(
    dataset: &mut Dataset,
    columns: &[S],
    policy: &CellRedactionPolicy,
) -> Result<()>
where
    S: AsRef<str>,
{
    let targets = dataset.resolve_columns(columns)?;
    for target in targets {
        for cell in dataset.values_at_mut(target) {
            *cell = policy.apply_to(cell);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{redact, redact_with_policy};
    use crate::{
        anonymization::policy::{CellRedactionPolicy, REDACTED_MARKER},
        dataset::{Dataset, Value},
        AnonymizeError,
    };

    fn accounts() -> Dataset {
        Dataset::from_rows(
            ["SSN", "plan"],
            [
                vec![Value::from(123), Value::text("basic")],
                vec![Value::from(456), Value::text("pro")],
                vec![Value::Missing, Value::text("basic")],
            ],
        )
        .unwrap()
    }

    #[test]
    fn every_cell_of_the_column_is_replaced() {
        let mut dataset = accounts();
        redact(&mut dataset, &["SSN"]).unwrap();
        assert!(dataset
            .column("SSN")
            .unwrap()
            .values()
            .iter()
            .all(|cell| cell == &Value::text(REDACTED_MARKER)));
        assert_eq!(dataset.column("plan"), accounts().column("plan"));
    }

    #[test]
    fn unknown_column_leaves_the_table_untouched() {
        let mut dataset = accounts();
        let err = redact(&mut dataset, &["SSN", "email"]).unwrap_err();
        assert_eq!(
            err,
            AnonymizeError::InvalidColumn {
                column: "email".into()
            }
        );
        assert_eq!(dataset, accounts());
    }

    #[test]
    fn custom_policy_is_applied_per_cell() {
        let mut dataset = accounts();
        redact_with_policy(&mut dataset, &["SSN"], &CellRedactionPolicy::keep_last(1)).unwrap();
        assert_eq!(dataset.cell(0, "SSN"), Some(&Value::text("**3")));
        assert_eq!(dataset.cell(2, "SSN"), Some(&Value::text(REDACTED_MARKER)));
    }

    #[test]
    fn redacting_twice_with_a_partial_policy_is_stable() {
        let policy = CellRedactionPolicy::keep_first(2);
        let mut once = accounts();
        redact_with_policy(&mut once, &["SSN"], &policy).unwrap();
        let mut twice = once.clone();
        redact_with_policy(&mut twice, &["SSN"], &policy).unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice.cell(0, "SSN"), Some(&Value::text("12*")));
        assert_eq!(twice.cell(2, "SSN"), Some(&Value::text(REDACTED_MARKER)));
    }

    #[test]
    fn empty_column_list_is_a_no_op() {
        let mut dataset = accounts();
        redact::<&str>(&mut dataset, &[]).unwrap();
        assert_eq!(dataset, accounts());
    }
}
