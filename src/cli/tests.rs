#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Unit tests for CLI commands

use crate::binding::RouterTarget;
use crate::cli::{inspect_lines, Cli, Commands};
use crate::descriptor::{build_files, RawDocument};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_generate_defaults() {
    let cli = Cli::try_parse_from(["rpcgate-gen", "generate", "--descriptors", "api.yaml"]).unwrap();
    assert!(!cli.verbose);
    match cli.command {
        Commands::Generate {
            descriptors,
            out,
            config,
            impl_,
            force,
            dry_run,
            router,
            runtime_crate,
            proto_module,
            format,
        } => {
            assert_eq!(descriptors, PathBuf::from("api.yaml"));
            assert_eq!(out, PathBuf::from("."));
            assert!(config.is_none());
            assert!(!impl_ && !force && !dry_run && !format);
            assert!(router.is_none());
            assert!(runtime_crate.is_none());
            assert!(proto_module.is_none());
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_generate_with_flags() {
    let cli = Cli::try_parse_from([
        "rpcgate-gen",
        "-v",
        "generate",
        "-d",
        "api.yaml",
        "--out",
        "gen",
        "--impl",
        "--force",
        "--dry-run",
        "--router",
        "basic",
        "--runtime-crate",
        "crate::rt",
    ])
    .unwrap();
    assert!(cli.verbose);
    match cli.command {
        Commands::Generate {
            out,
            impl_,
            force,
            dry_run,
            router,
            runtime_crate,
            ..
        } => {
            assert_eq!(out, PathBuf::from("gen"));
            assert!(impl_ && force && dry_run);
            assert_eq!(router, Some(RouterTarget::Basic));
            assert_eq!(runtime_crate.as_deref(), Some("crate::rt"));
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_generate_rejects_unknown_router() {
    let res = Cli::try_parse_from([
        "rpcgate-gen",
        "generate",
        "-d",
        "api.yaml",
        "--router",
        "fancy",
    ]);
    assert!(res.is_err());
}

#[test]
fn test_lint_command_with_flags() {
    let cli = Cli::try_parse_from([
        "rpcgate-gen",
        "lint",
        "--descriptors",
        "api.yaml",
        "--fail-on-error",
        "--errors-only",
    ])
    .unwrap();

    match cli.command {
        Commands::Lint {
            descriptors,
            fail_on_error,
            errors_only,
        } => {
            assert_eq!(descriptors.to_string_lossy(), "api.yaml");
            assert!(fail_on_error);
            assert!(errors_only);
        }
        _ => panic!("Expected Lint command"),
    }
}

#[test]
fn test_descriptors_required() {
    assert!(Cli::try_parse_from(["rpcgate-gen", "inspect"]).is_err());
}

#[test]
fn test_inspect_lines() {
    let doc: RawDocument = serde_yaml::from_str(
        r#"
files:
  - name: api/users.proto
    services:
      - name: Users
        methods:
          - name: GetUser
            request: GetUserRequest
            response: User
            bindings:
              - method: GET
                path: /v1/users/{id}
                path_params: [{ field: id, type: string }]
          - name: CreateUser
            request: CreateUserRequest
            response: User
            bindings:
              - method: POST
                path: /v1/users
                body: "*"
"#,
    )
    .unwrap();
    let files = build_files(&doc, vec![None]).unwrap();
    let lines = inspect_lines(&files);
    assert_eq!(
        lines,
        vec![
            "api/users.proto".to_string(),
            "  Users.GetUser#0 GET /v1/users/{id} -> /v1/users/{} [query(-id) -> path(id)]"
                .to_string(),
            "  Users.CreateUser#0 POST /v1/users -> /v1/users [body]".to_string(),
        ]
    );
}
