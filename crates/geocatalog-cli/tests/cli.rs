//! Integration tests for the geocatalog CLI.
//!
//! Each test points the binary at fresh databases in a temporary directory
//! and checks stdout (JSON or text), stderr and the exit status.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("geocatalog-cli");
        cmd.env("RUST_LOG", "error")
            .env("NO_COLOR", "1")
            .env_remove("GEOCATALOG_SQLITE_PATH")
            .env_remove("GEOCATALOG_DOCUMENTS_PATH")
            .arg("--sqlite-path")
            .arg(self.dir.path().join("hierarchy.db"))
            .arg("--documents-path")
            .arg(self.dir.path().join("documents.db"));
        cmd
    }

    /// Run with `--format json` and parse stdout.
    fn json(&self, args: &[&str]) -> Value {
        let output = self
            .cmd()
            .args(["--format", "json"])
            .args(args)
            .output()
            .expect("run geocatalog-cli");
        assert!(
            output.status.success(),
            "{args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("stdout is JSON")
    }

    fn seed(&self) {
        self.json(&["state", "add", "Paraíba"]);
        self.json(&["city", "add", "João Pessoa", "--state-id", "1"]);
        for (name, lat, lon) in [
            ("Farol do Cabo Branco", "-7.148", "-34.797"),
            ("Marco Zero", "-8.063", "-34.871"),
            ("Ponta do Seixas", "-7.155", "-34.793"),
        ] {
            let city = if name == "Marco Zero" { "Recife" } else { "João Pessoa" };
            self.json(&[
                "place",
                "add",
                "--name",
                name,
                "--city",
                city,
                &format!("--lat={lat}"),
                &format!("--lon={lon}"),
            ]);
        }
    }
}

#[test]
fn state_add_is_idempotent() {
    let env = TestEnv::new();

    let first = env.json(&["state", "add", "Paraíba"]);
    let again = env.json(&["state", "add", "  Paraíba "]);

    assert_eq!(first["estado_id"], 1);
    assert_eq!(first["nome"], "Paraíba");
    assert_eq!(again["estado_id"], 1);

    let list = env.json(&["state", "list"]);
    assert_eq!(list["count"], 1);
    assert_eq!(list["states"][0]["nome"], "Paraíba");
}

#[test]
fn state_list_keeps_creation_order() {
    let env = TestEnv::new();
    env.json(&["state", "add", "Pernambuco"]);
    env.json(&["state", "add", "Bahia"]);

    let list = env.json(&["state", "list"]);
    assert_eq!(list["states"][0]["nome"], "Pernambuco");
    assert_eq!(list["states"][0]["id"], 1);
    assert_eq!(list["states"][1]["nome"], "Bahia");
}

#[test]
fn city_add_requires_known_state() {
    let env = TestEnv::new();

    env.cmd()
        .args(["city", "add", "Recife", "--state-id", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown state id: 42"));
}

#[test]
fn city_list_includes_state_name() {
    let env = TestEnv::new();
    env.seed();

    let list = env.json(&["city", "list"]);
    assert_eq!(list["count"], 1);
    assert_eq!(list["cities"][0]["cidade"], "João Pessoa");
    assert_eq!(list["cities"][0]["estado"], "Paraíba");
}

#[test]
fn place_add_returns_id_and_lists_in_order() {
    let env = TestEnv::new();
    env.seed();

    let all = env.json(&["place", "list"]);
    assert_eq!(all["count"], 3);
    let names: Vec<&str> = all["places"]
        .as_array()
        .expect("places array")
        .iter()
        .map(|p| p["nome_local"].as_str().expect("name"))
        .collect();
    assert_eq!(
        names,
        vec!["Farol do Cabo Branco", "Marco Zero", "Ponta do Seixas"]
    );
    assert!(all["places"][0]["_id"].is_string());

    let recife = env.json(&["place", "list", "--city", "Recife"]);
    assert_eq!(recife["count"], 1);
    assert_eq!(recife["places"][0]["nome_local"], "Marco Zero");
}

#[test]
fn place_list_by_city_id() {
    let env = TestEnv::new();
    env.seed();

    let city = env.json(&["place", "list", "--city-id", "1"]);
    assert_eq!(city["cidade"], "João Pessoa");
    assert_eq!(city["estado_id"], 1);
    assert_eq!(city["locais"].as_array().map(Vec::len), Some(2));

    env.cmd()
        .args(["place", "list", "--city-id", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown city id: 999"));
}

#[test]
fn place_add_rejects_out_of_range_coordinates() {
    let env = TestEnv::new();

    env.cmd()
        .args([
            "place", "add", "--name", "Longe", "--city", "x", "--lat", "91", "--lon", "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid coordinates"));

    let list = env.json(&["place", "list"]);
    assert_eq!(list["count"], 0);
}

#[test]
fn nearby_ranks_by_distance() {
    let env = TestEnv::new();
    env.seed();

    let result = env.json(&["nearby", "--lat=-7.148", "--lon=-34.797"]);
    let places = result.as_array().expect("results array");
    assert_eq!(places.len(), 2);
    assert_eq!(places[0]["nome_local"], "Farol do Cabo Branco");
    assert_eq!(places[0]["distancia_km"], 0.0);
    assert_eq!(places[1]["nome_local"], "Ponta do Seixas");

    let wide = env.json(&[
        "nearby",
        "--lat=-7.148",
        "--lon=-34.797",
        "--radius-km",
        "500",
    ]);
    assert_eq!(wide.as_array().map(Vec::len), Some(3));
    assert_eq!(wide[2]["nome_local"], "Marco Zero");
}

#[test]
fn nearby_accepts_space_separated_negative_values() {
    let env = TestEnv::new();
    env.seed();

    env.cmd()
        .args([
            "nearby",
            "--lat",
            "-7.148",
            "--lon",
            "-34.797",
            "--radius-km",
            "0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 3 place(s)"))
        .stdout(predicate::str::contains("Farol do Cabo Branco"));
}

#[test]
fn nearby_rejects_negative_radius() {
    let env = TestEnv::new();
    env.seed();

    env.cmd()
        .args(["nearby", "--lat=0", "--lon=0", "--radius-km=-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid search radius"));
}

#[test]
fn text_output_lists_states() {
    let env = TestEnv::new();
    env.seed();

    env.cmd()
        .args(["state", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("States (1)"))
        .stdout(predicate::str::contains("Paraíba"))
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn databases_are_created_on_first_write() {
    let env = TestEnv::new();
    env.json(&["state", "add", "Bahia"]);

    assert!(env.dir.path().join("hierarchy.db").exists());
    assert!(env.dir.path().join("documents.db").exists());
}

#[test]
fn read_commands_require_existing_databases() {
    let env = TestEnv::new();

    for args in [
        vec!["state", "list"],
        vec!["city", "list"],
        vec!["place", "list"],
        vec!["nearby", "--lat=0", "--lon=0"],
    ] {
        env.cmd()
            .args(&args)
            .assert()
            .failure()
            .stderr(predicate::str::contains("database not found"));
    }

    assert!(!env.dir.path().join("hierarchy.db").exists());
    assert!(!env.dir.path().join("documents.db").exists());
}
