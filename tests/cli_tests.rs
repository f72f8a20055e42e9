#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn run(args: &[&str]) -> Output {
    let exe = env!("CARGO_BIN_EXE_rpcgate-gen");
    Command::new(exe)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run cli")
}

#[test]
fn test_cli_generate_writes_units() {
    let dir = TempDir::new().unwrap();
    let descriptors = fixture("users.yaml");
    let out = run(&[
        "generate",
        "--descriptors",
        descriptors.to_str().unwrap(),
        "--out",
        dir.path().to_str().unwrap(),
        "--impl",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let unit = fs::read_to_string(dir.path().join("users_rpcgate.rs")).unwrap();
    assert!(unit.contains("pub struct UsersDesc<S>"));
    assert!(dir.path().join("users_impl.rs").exists());
}

#[test]
fn test_cli_scaffold_needs_force() {
    let dir = TempDir::new().unwrap();
    let descriptors = fixture("users.yaml");
    let args = [
        "generate",
        "--descriptors",
        descriptors.to_str().unwrap(),
        "--out",
        dir.path().to_str().unwrap(),
        "--impl",
    ];
    assert!(run(&args).status.success());

    let scaffold = dir.path().join("users_impl.rs");
    fs::write(&scaffold, "// mine\n").unwrap();
    let out = run(&args);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Skipped existing scaffold"));
    assert_eq!(fs::read_to_string(&scaffold).unwrap(), "// mine\n");

    let mut forced = args.to_vec();
    forced.push("--force");
    assert!(run(&forced).status.success());
    assert_ne!(fs::read_to_string(&scaffold).unwrap(), "// mine\n");
}

#[test]
fn test_cli_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let descriptors = fixture("users.yaml");
    let out = run(&[
        "generate",
        "--descriptors",
        descriptors.to_str().unwrap(),
        "--out",
        dir.path().to_str().unwrap(),
        "--dry-run",
    ]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Would write"));
    assert!(!dir.path().join("users_rpcgate.rs").exists());
}

#[test]
fn test_cli_config_file_alongside_descriptors() {
    let dir = TempDir::new().unwrap();
    fs::copy(fixture("users.json"), dir.path().join("api.json")).unwrap();
    fs::write(
        dir.path().join("rpcgate.toml"),
        "runtime_crate = \"crate::rt\"\nrouter = \"advanced\"\n",
    )
    .unwrap();
    let out_dir = dir.path().join("gen");
    let out = run(&[
        "generate",
        "--descriptors",
        dir.path().join("api.json").to_str().unwrap(),
        "--out",
        out_dir.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let unit = fs::read_to_string(out_dir.join("users_rpcgate.rs")).unwrap();
    assert!(unit.contains("use crate::rt;"));
    assert!(unit.contains("rt::Mux::Advanced(router) => router,"));
}

#[test]
fn test_cli_generate_fails_on_invalid_model() {
    let dir = TempDir::new().unwrap();
    let descriptors = fixture("broken.yaml");
    let out = run(&[
        "generate",
        "--descriptors",
        descriptors.to_str().unwrap(),
        "--out",
        dir.path().to_str().unwrap(),
    ]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("path_param_mismatch"));
}

#[test]
fn test_cli_lint_exit_codes() {
    let broken = fixture("broken.yaml");
    let out = run(&["lint", "--descriptors", broken.to_str().unwrap()]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("1 error(s)"));

    let out = run(&["lint", "--descriptors", broken.to_str().unwrap(), "--fail-on-error"]);
    assert!(!out.status.success());

    let clean = fixture("users.yaml");
    let out = run(&["lint", "--descriptors", clean.to_str().unwrap(), "--fail-on-error"]);
    assert!(out.status.success());
}

#[test]
fn test_cli_inspect() {
    let descriptors = fixture("users.yaml");
    let out = run(&["inspect", "--descriptors", descriptors.to_str().unwrap()]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("api/users.proto"));
    assert!(stdout.contains(
        "  Users.ListUsers#1 GET /v1/orgs/{org_id}/users -> /v1/orgs/{}/users [query(-org_id) -> path(org_id)]"
    ));
}
