//! Tests for `#[derive(Tabular)]` records.
//!
//! These tests verify that the generated schema matches the field
//! attributes, that records lay out as dataset rows, and that the generated
//! `Debug` impl hides PII fields.

use std::marker::PhantomData;

use anonymizer::{
    AnonymizationConfig, Anonymizer, ColumnSelection, ColumnSpec, Dataset, QuasiIdentifiers,
    Record, Tabular, Value, REDACTED_MARKER, SUPPRESSED_MARKER,
};

#[derive(Clone, Tabular)]
struct Patient {
    #[tabular(pii)]
    name: String,
    #[tabular(pii, rename = "E-mail")]
    email: Option<String>,
    #[tabular(quasi_identifier)]
    zip: String,
    #[tabular(quasi_identifier)]
    age: u8,
    diagnosis_code: i32,
    #[tabular(skip)]
    #[allow(dead_code)]
    cache: Vec<u8>,
}

fn patient(name: &str, zip: &str, age: u8, code: i32) -> Patient {
    Patient {
        name: name.into(),
        email: Some(format!("{}@clinic.test", name.to_lowercase())),
        zip: zip.into(),
        age,
        diagnosis_code: code,
        cache: Vec::new(),
    }
}

#[test]
fn test_schema_follows_field_attributes() {
    assert_eq!(
        Patient::schema(),
        &[
            ColumnSpec::new("name", true, false),
            ColumnSpec::new("E-mail", true, false),
            ColumnSpec::new("zip", false, true),
            ColumnSpec::new("age", false, true),
            ColumnSpec::new("diagnosis_code", false, false),
        ]
    );
    assert_eq!(Patient::pii_columns(), ["name", "E-mail"]);
    assert_eq!(Patient::quasi_identifiers(), ["zip", "age"]);
}

#[test]
fn test_records_become_rows() {
    let mut without_email = patient("Cy", "10001", 40, 3);
    without_email.email = None;
    let dataset = Dataset::from_records([patient("Ann", "90210", 30, 1), without_email]).unwrap();

    assert_eq!(dataset.row_count(), 2);
    assert_eq!(
        dataset.column_names().collect::<Vec<_>>(),
        ["name", "E-mail", "zip", "age", "diagnosis_code"]
    );
    assert_eq!(dataset.cell(0, "E-mail"), Some(&Value::text("ann@clinic.test")));
    assert_eq!(dataset.cell(1, "E-mail"), Some(&Value::Missing));
    assert_eq!(dataset.cell(1, "age"), Some(&Value::Integer(40)));
}

#[test]
fn test_config_from_record_schema() {
    let config = AnonymizationConfig::for_record::<Patient>();
    assert_eq!(
        config.columns(),
        &ColumnSelection::Explicit(vec!["name".into(), "E-mail".into()])
    );
    assert_eq!(
        config.quasi_identifiers(),
        &QuasiIdentifiers::Explicit(vec!["zip".into(), "age".into()])
    );

    let dataset = Dataset::from_records([
        patient("Ann", "90210", 30, 1),
        patient("Bob", "90210", 30, 2),
        patient("Cy", "10001", 40, 3),
    ])
    .unwrap();
    let anonymized = Anonymizer::new(config.with_k_anonymity(2))
        .anonymize(&dataset)
        .unwrap();

    let output = anonymized.dataset();
    assert_eq!(output.cell(0, "name"), Some(&Value::text(REDACTED_MARKER)));
    assert_eq!(output.cell(2, "zip"), Some(&Value::text(SUPPRESSED_MARKER)));
    assert_eq!(output.cell(2, "diagnosis_code"), Some(&Value::Integer(3)));
    assert_eq!(anonymized.report().suppressed_rows, vec![2]);
}

#[test]
fn test_debug_hides_pii_fields() {
    let rendered = format!("{:?}", patient("Ann", "90210", 30, 1));
    assert!(rendered.starts_with("Patient {"));
    assert!(!rendered.contains("Ann"));
    assert!(!rendered.contains("ann@clinic.test"));
    assert!(rendered.contains("\"REDACTED\""));
    assert!(rendered.contains("zip: \"90210\""));
    // Skipped fields are left out.
    assert!(!rendered.contains("cache"));
    assert!(rendered.ends_with(".. }"));
}

#[test]
fn test_generic_record() {
    #[derive(Tabular)]
    struct Measurement<T, M> {
        #[tabular(quasi_identifier)]
        site: &'static str,
        reading: Option<T>,
        #[tabular(skip)]
        _unit: PhantomData<M>,
    }

    struct Celsius;

    let dataset = Dataset::from_records([
        Measurement::<f64, Celsius> {
            site: "north",
            reading: Some(20.5),
            _unit: PhantomData,
        },
        Measurement {
            site: "south",
            reading: None,
            _unit: PhantomData,
        },
    ])
    .unwrap();

    assert_eq!(dataset.cell(0, "reading"), Some(&Value::Float(20.5)));
    assert_eq!(dataset.cell(1, "reading"), Some(&Value::Missing));
    assert_eq!(Measurement::<f64, Celsius>::quasi_identifiers(), ["site"]);
}

#[test]
fn test_raw_identifier_and_skip_debug() {
    #[derive(Tabular)]
    #[tabular(skip_debug)]
    struct Event {
        r#type: String,
    }

    impl std::fmt::Debug for Event {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("Event")
        }
    }

    assert_eq!(Event::schema()[0].name(), "type");
    let event = Event {
        r#type: "login".into(),
    };
    assert_eq!(format!("{event:?}"), "Event");
    assert_eq!(event.into_cells(), vec![Value::text("login")]);
}

#[test]
fn test_counts_and_flags_become_integer_cells() {
    #[derive(Tabular)]
    struct Account {
        logins: usize,
        bytes: u64,
        #[tabular(quasi_identifier)]
        verified: bool,
    }

    let dataset = Dataset::from_records([
        Account {
            logins: 12,
            bytes: u64::MAX,
            verified: true,
        },
        Account {
            logins: 0,
            bytes: 5,
            verified: false,
        },
    ])
    .unwrap();

    assert_eq!(dataset.cell(0, "logins"), Some(&Value::Integer(12)));
    assert_eq!(
        dataset.cell(0, "bytes"),
        Some(&Value::text("18446744073709551615"))
    );
    assert_eq!(dataset.cell(1, "bytes"), Some(&Value::Integer(5)));
    assert_eq!(dataset.cell(0, "verified"), Some(&Value::Integer(1)));
    assert_eq!(dataset.cell(1, "verified"), Some(&Value::Integer(0)));
}
