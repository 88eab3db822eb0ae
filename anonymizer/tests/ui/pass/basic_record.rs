//! A plain record with every kind of field option.

use anonymizer::{Dataset, Record, Tabular, Value};

#[derive(Tabular)]
struct Visit {
    #[tabular(pii)]
    email: String,
    #[tabular(quasi_identifier, rename = "Zip Code")]
    zip: String,
    visits: u32,
    #[tabular(skip)]
    _note: (),
}

fn main() {
    let dataset = Dataset::from_records([Visit {
        email: "a@x.io".into(),
        zip: "90210".into(),
        visits: 3,
        _note: (),
    }])
    .unwrap();
    assert_eq!(dataset.cell(0, "Zip Code"), Some(&Value::text("90210")));
    assert_eq!(Visit::pii_columns(), ["email"]);
}
