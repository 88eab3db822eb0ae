//! A generic record whose column types carry their own bounds.

use anonymizer::{Record, Tabular, Value};

#[derive(Tabular)]
struct Reading<T> {
    #[tabular(quasi_identifier)]
    sensor: String,
    value: Option<T>,
}

fn cells<R: Record>(record: R) -> Vec<Value> {
    record.into_cells()
}

fn main() {
    let reading = Reading {
        sensor: "s-1".to_string(),
        value: Some(4_i64),
    };
    assert_eq!(format!("{reading:?}"), "Reading { sensor: \"s-1\", value: Some(4) }");
    assert_eq!(cells(reading), vec![Value::text("s-1"), Value::Integer(4)]);
}
