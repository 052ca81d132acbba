//! Unit tests for the populator against hand-written schemas.

use std::collections::HashMap;

use rstest::{fixture, rstest};

use super::{Populator, compose_key};
use crate::coerce::BoolPolicy;
use crate::error::TaggedError;
use crate::schema::{Annotation, Field, Slot, Tag, TaggedConfig};

#[derive(Debug, Default, PartialEq)]
struct Leaves {
    name: String,
    port: i64,
    debug: bool,
    label: String,
}

impl TaggedConfig for Leaves {
    fn fields() -> &'static [Field<Self>] {
        const FIELDS: &[Field<Leaves>] = &[
            Field::new(
                "name",
                &[Annotation::new("env", "NAME"), Annotation::new("docker", "APP_NAME")],
                Slot::Text(|record| &mut record.name),
            ),
            Field::new(
                "port",
                &[Annotation::new("env", "PORT"), Annotation::new("docker", "APP_PORT")],
                Slot::Integer(|record, raw| {
                    record.port = raw.parse()?;
                    Ok(())
                }),
            ),
            Field::new(
                "debug",
                &[Annotation::new("env", "DEBUG")],
                Slot::Flag(|record| &mut record.debug),
            ),
            Field::new(
                "label",
                &[Annotation::new("env", "LABEL")],
                Slot::Text(|record| &mut record.label),
            ),
        ];
        FIELDS
    }
}

#[derive(Debug, Default, PartialEq)]
struct Outer {
    leaves: Leaves,
    flat: Leaves,
    untouched: String,
}

impl TaggedConfig for Outer {
    fn fields() -> &'static [Field<Self>] {
        const FIELDS: &[Field<Outer>] = &[
            Field::new(
                "leaves",
                &[Annotation::new("env", "SERVER")],
                Slot::Record(|record, populator, prefix| {
                    populator.populate_at(&mut record.leaves, prefix)
                }),
            ),
            Field::new(
                "flat",
                &[],
                Slot::Record(|record, populator, prefix| {
                    populator.populate_at(&mut record.flat, prefix)
                }),
            ),
            Field::new("untouched", &[], Slot::Skip),
        ];
        FIELDS
    }
}

#[derive(Debug, Default)]
struct WithRatio {
    name: String,
    ratio: f64,
    after: String,
}

impl TaggedConfig for WithRatio {
    fn fields() -> &'static [Field<Self>] {
        const FIELDS: &[Field<WithRatio>] = &[
            Field::new(
                "name",
                &[Annotation::new("env", "NAME")],
                Slot::Text(|record| &mut record.name),
            ),
            Field::new(
                "ratio",
                &[Annotation::new("env", "RATIO")],
                Slot::Unsupported { type_name: "f64" },
            ),
            Field::new(
                "after",
                &[Annotation::new("env", "AFTER")],
                Slot::Text(|record| &mut record.after),
            ),
        ];
        FIELDS
    }
}

fn source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

#[fixture]
fn full() -> HashMap<String, String> {
    source(&[
        ("NAME", "api"),
        ("PORT", "8080"),
        ("DEBUG", "true"),
        ("LABEL", "blue"),
    ])
}

#[rstest]
fn assigns_every_leaf_from_a_full_source(full: HashMap<String, String>) {
    let mut leaves = Leaves::default();
    Populator::new(&full, Tag::ENV)
        .populate(&mut leaves)
        .expect("populate");
    assert_eq!(
        leaves,
        Leaves {
            name: "api".into(),
            port: 8080,
            debug: true,
            label: "blue".into(),
        }
    );
}

#[rstest]
fn absent_integer_aborts_before_later_siblings() {
    let values = source(&[("NAME", "api"), ("DEBUG", "true"), ("LABEL", "blue")]);
    let mut leaves = Leaves::default();
    let err = Populator::new(&values, Tag::ENV)
        .populate(&mut leaves)
        .expect_err("missing integer must fail");

    match err {
        TaggedError::TypeCoercion {
            field,
            key,
            value,
            expected,
            ..
        } => {
            assert_eq!(field, "port");
            assert_eq!(key, "PORT");
            assert_eq!(value, "");
            assert_eq!(expected, "integer");
        }
        other => panic!("expected TypeCoercion, got {other:?}"),
    }
    assert_eq!(leaves.name, "api", "earlier fields keep their values");
    assert!(!leaves.debug, "later fields stay untouched");
    assert_eq!(leaves.label, "");
}

#[rstest]
#[case::absent(None)]
#[case::malformed(Some("yes"))]
#[case::wrong_case(Some("tRUE"))]
fn lenient_boolean_defaults_to_false_and_continues(#[case] raw: Option<&str>) {
    let mut values = source(&[("NAME", "api"), ("PORT", "1"), ("LABEL", "blue")]);
    if let Some(raw) = raw {
        values.insert("DEBUG".into(), raw.into());
    }
    let mut leaves = Leaves {
        debug: true,
        ..Leaves::default()
    };
    Populator::new(&values, Tag::ENV)
        .debug(true)
        .populate(&mut leaves)
        .expect("lenient booleans never fail");
    assert!(!leaves.debug);
    assert_eq!(leaves.label, "blue", "population continued past the flag");
}

#[rstest]
fn strict_boolean_fails_fast() {
    let values = source(&[("NAME", "api"), ("PORT", "1"), ("DEBUG", "yes"), ("LABEL", "blue")]);
    let mut leaves = Leaves::default();
    let err = Populator::new(&values, Tag::ENV)
        .booleans(BoolPolicy::Strict)
        .populate(&mut leaves)
        .expect_err("strict booleans fail");
    assert!(
        matches!(&err, TaggedError::TypeCoercion { field, expected: "boolean", .. } if field == "debug"),
        "unexpected error {err:?}"
    );
    assert_eq!(leaves.label, "");
}

#[rstest]
fn absent_string_overwrites_with_empty() {
    let values = source(&[("PORT", "1")]);
    let mut leaves = Leaves {
        name: "preset".into(),
        ..Leaves::default()
    };
    Populator::new(&values, Tag::ENV)
        .populate(&mut leaves)
        .expect("populate");
    assert_eq!(leaves.name, "");
}

#[rstest]
fn nested_keys_compose_with_parent_prefix() {
    let values = source(&[
        ("SERVER_NAME", "api"),
        ("SERVER_PORT", "8080"),
        ("SERVER_DEBUG", "true"),
        ("SERVER_LABEL", "blue"),
        ("NAME", "flat"),
        ("PORT", "9090"),
    ]);
    let mut outer = Outer {
        untouched: "keep".into(),
        ..Outer::default()
    };
    Populator::new(&values, Tag::ENV)
        .populate(&mut outer)
        .expect("populate");

    assert_eq!(outer.leaves.port, 8080);
    assert!(outer.leaves.debug);
    assert_eq!(outer.leaves.label, "blue");
    assert_eq!(outer.flat.name, "flat", "unannotated record inherits prefix");
    assert_eq!(outer.flat.port, 9090);
    assert_eq!(outer.untouched, "keep", "skipped field is never written");
}

#[rstest]
fn nested_failure_names_dotted_path() {
    let values = source(&[("SERVER_PORT", "eighty")]);
    let mut outer = Outer::default();
    let err = Populator::new(&values, Tag::ENV)
        .populate(&mut outer)
        .expect_err("bad nested integer");
    assert_eq!(err.field_path(), Some("leaves.port"));
    assert!(err.to_string().contains("SERVER_PORT"));
    assert!(err.to_string().contains("'eighty'"));
}

#[rstest]
fn repeated_population_is_idempotent(full: HashMap<String, String>) {
    let populator = Populator::new(&full, Tag::ENV);
    let mut first = Leaves::default();
    populator.populate(&mut first).expect("first pass");
    let mut second = Leaves::default();
    populator.populate(&mut second).expect("second pass");
    populator.populate(&mut second).expect("third pass");
    assert_eq!(first, second);
}

#[rstest]
fn tag_selects_annotation() {
    let values = source(&[("APP_NAME", "docker-api"), ("APP_PORT", "7000"), ("NAME", "env-api")]);
    let mut leaves = Leaves::default();
    Populator::new(&values, Tag::DOCKER)
        .populate(&mut leaves)
        .expect("populate");
    assert_eq!(leaves.name, "docker-api");
    assert_eq!(leaves.port, 7000);
    assert_eq!(leaves.label, "", "no docker annotation reads as absent");
}

#[rstest]
fn unsupported_type_stops_population() {
    let values = source(&[("NAME", "n"), ("RATIO", "0.5"), ("AFTER", "a")]);
    let mut record = WithRatio::default();
    let err = Populator::new(&values, Tag::ENV)
        .populate(&mut record)
        .expect_err("f64 is unsupported");
    assert!(matches!(
        &err,
        TaggedError::UnsupportedFieldType { field, type_name: "f64" } if field == "ratio"
    ));
    assert_eq!(record.name, "n");
    assert_eq!(record.after, "");
    assert!(record.ratio.abs() < f64::EPSILON);
}

#[rstest]
#[case("", "PORT", "PORT")]
#[case("SERVER", "PORT", "SERVER_PORT")]
#[case("APP_SERVER", "TLS", "APP_SERVER_TLS")]
fn compose_key_joins_with_underscore(
    #[case] prefix: &str,
    #[case] annotation: &str,
    #[case] expected: &str,
) {
    assert_eq!(compose_key(prefix, annotation), expected);
}
