use std::collections::BTreeMap;
use std::fs;

use fabrica_core::{FieldValue, Locale};
use fabrica_generate::errors::FieldError;
use fabrica_generate::keys::{self, Key};
use fabrica_generate::output::{write_csv, write_json};
use fabrica_generate::{FieldEngine, Record, Schema, Seed};

fn engine(seed: u64) -> FieldEngine {
    FieldEngine::new(Locale::En, Seed::Number(seed)).unwrap()
}

fn account_schema(seed: u64) -> Schema<impl FnMut(&mut FieldEngine) -> fabrica_generate::Result<Record>> {
    Schema::new(engine(seed), |engine| {
        let mut record = Record::new();
        record.insert("id".to_string(), engine.value("numeric.increment")?);
        record.insert(
            "email".to_string(),
            engine.perform("person.email", None, Some(&keys::lowercase()))?,
        );
        record.insert("name".to_string(), engine.value("person.full_name")?);
        Ok(record)
    })
}

#[test]
fn create_builds_the_requested_count() {
    let mut schema = account_schema(42);
    let records = schema.create(5).unwrap();
    assert_eq!(records.len(), 5);
    for record in &records {
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, ["email", "id", "name"]);
    }
}

#[test]
fn create_rejects_zero() {
    let mut schema = account_schema(42);
    let err = schema.create(0).unwrap_err();
    assert!(matches!(err, FieldError::NonPositiveCount { .. }));
}

#[test]
fn iterator_yields_exactly_count_then_stops() {
    let mut schema = account_schema(42);
    let iterator = schema.iterator(3).unwrap();
    assert_eq!(iterator.size_hint(), (3, Some(3)));
    let records: Vec<Record> = iterator.collect::<fabrica_generate::Result<_>>().unwrap();
    assert_eq!(records.len(), 3);

    assert!(matches!(
        schema.iterator(0),
        Err(FieldError::NonPositiveCount { .. })
    ));
}

#[test]
fn looped_never_stops_on_its_own() {
    let mut schema = account_schema(42);
    let records: Vec<Record> = schema
        .looped()
        .take(7)
        .collect::<fabrica_generate::Result<_>>()
        .unwrap();
    assert_eq!(records.len(), 7);
}

#[test]
fn equal_seeds_build_equal_batches_across_modes() {
    let eager = account_schema(42).create(4).unwrap();
    let mut lazy_schema = account_schema(42);
    let lazy: Vec<Record> = lazy_schema
        .iterator(4)
        .unwrap()
        .collect::<fabrica_generate::Result<_>>()
        .unwrap();
    assert_eq!(eager, lazy);
}

#[test]
fn increments_and_lowercased_emails_flow_through_records() {
    let mut schema = account_schema(42);
    let records = schema.create(2).unwrap();

    assert_eq!(records[0].get("id"), Some(&FieldValue::Int(1)));
    assert_eq!(records[1].get("id"), Some(&FieldValue::Int(2)));

    for record in &records {
        let email = record.get("email").unwrap().as_str().unwrap();
        assert!(email.contains('@'));
        assert_eq!(email, email.to_lowercase());
    }
}

#[test]
fn seeded_keys_share_the_engine_stream() {
    // A key that draws from the stream must advance the same stream the
    // engine uses, so a later field diverges from an engine whose key
    // did not draw.
    let drawing = Key::map_seeded(|value, random| {
        random.randint(0, 1_000_000);
        value
    });
    let inert = Key::map(|value| value);

    let mut with_draw = engine(9);
    with_draw.perform("person.first_name", None, Some(&drawing)).unwrap();
    let after_draw = with_draw.value("numeric.integer_number").unwrap();

    let mut without_draw = engine(9);
    without_draw.perform("person.first_name", None, Some(&inert)).unwrap();
    let after_inert = without_draw.value("numeric.integer_number").unwrap();

    assert_ne!(after_draw, after_inert);
}

#[test]
fn fieldset_defaults_to_ten_and_rejects_zero() {
    let mut engine = engine(5);
    let defaulted = engine.fieldset("word", None, None, None).unwrap();
    match defaulted {
        FieldValue::List(items) => assert_eq!(items.len(), 10),
        other => panic!("expected a list, got {other:?}"),
    }

    let sized = engine.fieldset("word", Some(3), None, None).unwrap();
    match sized {
        FieldValue::List(items) => assert_eq!(items.len(), 3),
        other => panic!("expected a list, got {other:?}"),
    }

    assert!(matches!(
        engine.fieldset("word", Some(0), None, None),
        Err(FieldError::NonPositiveCount { .. })
    ));
}

#[test]
fn csv_export_round_trips_header_and_rows() {
    let mut schema = account_schema(11);
    let records = schema.create(3).unwrap();

    let path = std::env::temp_dir().join(format!("fabrica_csv_{}.csv", std::process::id()));
    let bytes = write_csv(&path, &records).unwrap();
    let contents = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(bytes, contents.len() as u64);
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("email,id,name"));
    assert_eq!(lines.count(), 3);
}

#[test]
fn csv_export_rejects_empty_batches() {
    let path = std::env::temp_dir().join("fabrica_empty.csv");
    let err = write_csv(&path, &[]).unwrap_err();
    assert!(matches!(err, FieldError::EmptyExport));
}

#[test]
fn json_export_is_a_readable_array() {
    let mut schema = account_schema(11);
    let records = schema.create(2).unwrap();

    let path = std::env::temp_dir().join(format!("fabrica_json_{}.json", std::process::id()));
    let bytes = write_json(&path, &records).unwrap();
    let contents = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(bytes, contents.len() as u64);
    let parsed: Vec<BTreeMap<String, serde_json::Value>> =
        serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed.len(), 2);
    assert!(parsed[0].contains_key("email"));
}

#[test]
fn schema_engine_stays_accessible() {
    let mut schema = account_schema(1);
    schema
        .engine_mut()
        .register_alias("login", "person.email")
        .unwrap();
    assert!(schema.engine_mut().value("login").is_ok());

    let engine = schema.into_engine();
    assert_eq!(engine.locale(), Locale::En);
}
