#![allow(clippy::unwrap_used, clippy::expect_used)]

use rpcgate::descriptor::{load_descriptors, BodyPolicy, FieldType};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_yaml_with_blob() {
    let files = load_descriptors(&fixture("users.yaml")).unwrap();
    assert_eq!(files.len(), 1);
    let file = &files[0];
    assert_eq!(file.name, "api/users.proto");
    assert_eq!(file.stem(), "users");
    assert_eq!(
        file.swagger.as_deref(),
        Some(fs::read(fixture("users.swagger.json")).unwrap().as_slice())
    );
    assert_eq!(file.bindings().count(), 5);

    let update = &file.services[0].methods[2];
    assert_eq!(update.name, "UpdateUser");
    assert_eq!(update.bindings[0].body, BodyPolicy::Field("user".to_string()));

    let by_org = &file.services[0].methods[3].bindings[1];
    assert_eq!(by_org.index, 1);
    assert_eq!(by_org.path_params[0].ty, FieldType::Int64);
}

#[test]
fn test_load_json() {
    let files = load_descriptors(&fixture("users.json")).unwrap();
    assert_eq!(files[0].services[0].methods[0].bindings[0].path.router_form(), "/v1/users/{id}");
    assert!(files[0].swagger.is_none());
}

#[test]
fn test_missing_blob_is_error() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("api.yaml");
    fs::write(
        &doc,
        "files:\n  - name: a.proto\n    swagger: missing.json\n    services: []\n",
    )
    .unwrap();
    let err = load_descriptors(&doc).unwrap_err();
    assert!(format!("{:#}", err).contains("missing.json"));
}

#[test]
fn test_unknown_verb_is_error() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("api.yaml");
    fs::write(
        &doc,
        r#"
files:
  - name: a.proto
    services:
      - name: A
        methods:
          - name: Get
            request: Req
            response: Resp
            bindings:
              - { method: FETCH, path: /v1/a }
"#,
    )
    .unwrap();
    assert!(load_descriptors(&doc).is_err());
}
