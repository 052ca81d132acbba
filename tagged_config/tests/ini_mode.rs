//! INI mode: mapping files onto records through the `config` crate.
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface configuration mistakes"
)]

use std::fs;
use std::path::PathBuf;

use anyhow::{Result, ensure};
use rstest::{fixture, rstest};
use serde::{Deserialize, Serialize};
use tagged_config::{
    LoadOptions, Mode, TaggedConfig, TaggedError, initialize_config, initialize_ini_config,
};

#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize, TaggedConfig)]
struct Cache {
    #[tagged(env = "CACHE_URL")]
    url: String,
    #[tagged(env = "CACHE_TTL")]
    ttl: u32,
}

#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize, TaggedConfig)]
struct Gateway {
    #[tagged(env = "GATEWAY_NAME")]
    name: String,
    #[tagged(env = "GATEWAY_STRICT")]
    strict: bool,
    #[tagged(env = "GATEWAY_CACHE")]
    cache: Cache,
}

struct IniFile {
    _dir: tempfile::TempDir,
    path: PathBuf,
}

fn ini_file(contents: &str) -> IniFile {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("gateway.ini");
    fs::write(&path, contents).expect("write ini");
    IniFile { _dir: dir, path }
}

#[fixture]
fn complete() -> IniFile {
    ini_file("name = edge\nstrict = true\n\n[cache]\nurl = redis://cache:6379\nttl = 300\n")
}

#[rstest]
fn sections_populate_nested_records(complete: IniFile) -> Result<()> {
    let mut gateway = Gateway::default();
    initialize_ini_config(&mut gateway, Some(complete.path.as_path()))?;
    ensure!(
        gateway
            == Gateway {
                name: "edge".into(),
                strict: true,
                cache: Cache {
                    url: "redis://cache:6379".into(),
                    ttl: 300,
                },
            },
        "unexpected record {gateway:?}"
    );
    Ok(())
}

#[rstest]
fn explicit_ini_mode_uses_the_configured_path(complete: IniFile) -> Result<()> {
    let options = LoadOptions::new()
        .mode(Mode::Ini)
        .ini_path(&complete.path)
        .debug(true);
    let mut gateway = Gateway::default();
    initialize_config(&mut gateway, &options)?;
    ensure!(gateway.cache.ttl == 300, "ttl: {}", gateway.cache.ttl);
    Ok(())
}

#[rstest]
fn keys_missing_from_the_file_keep_current_values() -> Result<()> {
    let file = ini_file("[cache]\nttl = 60\n");
    let mut gateway = Gateway {
        name: "preset".into(),
        ..Gateway::default()
    };
    initialize_ini_config(&mut gateway, Some(file.path.as_path()))?;
    ensure!(gateway.name == "preset", "name: {}", gateway.name);
    ensure!(gateway.cache.ttl == 60, "ttl: {}", gateway.cache.ttl);
    Ok(())
}

#[rstest]
fn missing_file_is_unreadable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.ini");
    let mut gateway = Gateway::default();
    let err =
        initialize_ini_config(&mut gateway, Some(path.as_path())).expect_err("missing file");
    assert!(
        matches!(&err, TaggedError::UnreadableSource { path: p, .. } if p == &path),
        "unexpected error {err:?}"
    );
}

#[rstest]
fn unconvertible_values_are_malformed() {
    let file = ini_file("[cache]\nttl = forever\n");
    let mut gateway = Gateway::default();
    let err = initialize_ini_config(&mut gateway, Some(file.path.as_path()))
        .expect_err("bad ttl");
    assert!(
        matches!(&err, TaggedError::MalformedSource { path, .. } if path == &file.path),
        "unexpected error {err:?}"
    );
    assert_eq!(gateway, Gateway::default(), "record must stay untouched");
}

#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize, TaggedConfig)]
struct Ledger {
    #[tagged(env = "LEDGER_ID")]
    id: u128,
    #[tagged(env = "LEDGER_OFFSET")]
    offset: i128,
    #[tagged(env = "LEDGER_LIMIT")]
    limit: u64,
    #[tagged(env = "LEDGER_LABEL")]
    label: String,
}

#[rstest]
fn wide_integer_fields_read_from_the_file() -> Result<()> {
    let file = ini_file("id = 5\noffset = -7\n");
    let mut ledger = Ledger::default();
    initialize_ini_config(&mut ledger, Some(file.path.as_path()))?;
    ensure!(ledger.id == 5, "id: {}", ledger.id);
    ensure!(ledger.offset == -7, "offset: {}", ledger.offset);
    Ok(())
}

#[rstest]
fn unsigned_presets_above_i64_survive_seeding() -> Result<()> {
    let file = ini_file("label = audit\n");
    let mut ledger = Ledger {
        limit: u64::MAX,
        ..Ledger::default()
    };
    initialize_ini_config(&mut ledger, Some(file.path.as_path()))?;
    ensure!(ledger.limit == u64::MAX, "limit: {}", ledger.limit);
    ensure!(ledger.label == "audit", "label: {}", ledger.label);
    Ok(())
}

#[rstest]
fn file_values_above_i64_are_accepted() -> Result<()> {
    let file = ini_file(&format!("limit = {}\nid = {}\n", u64::MAX, u128::MAX));
    let mut ledger = Ledger::default();
    initialize_ini_config(&mut ledger, Some(file.path.as_path()))?;
    ensure!(ledger.limit == u64::MAX, "limit: {}", ledger.limit);
    ensure!(ledger.id == u128::MAX, "id: {}", ledger.id);
    Ok(())
}
