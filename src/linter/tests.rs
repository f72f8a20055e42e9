#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Unit tests for the descriptor linter

use crate::descriptor::{build_files, RawDocument};
use crate::linter::{has_errors, lint_files, LintIssue, LintSeverity};

/// Helper to build a model from YAML and lint it
fn lint_yaml(content: &str) -> Vec<LintIssue> {
    let doc: RawDocument = serde_yaml::from_str(content).expect("parse descriptors");
    let blobs = vec![None; doc.files.len()];
    let files = build_files(&doc, blobs).expect("build descriptors");
    lint_files(&files)
}

fn of_kind<'a>(issues: &'a [LintIssue], kind: &str) -> Vec<&'a LintIssue> {
    issues.iter().filter(|i| i.kind == kind).collect()
}

#[test]
fn test_lint_clean_model() {
    let issues = lint_yaml(
        r#"
files:
  - name: users.proto
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
    );
    assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
    assert!(!has_errors(&issues));
}

#[test]
fn test_lint_path_param_mismatch() {
    let issues = lint_yaml(
        r#"
files:
  - name: users.proto
    services:
      - name: Users
        methods:
          - name: GetUser
            request: GetUserRequest
            response: User
            bindings:
              - method: GET
                path: /v1/users/{id}
                path_params: [{ field: user_id, type: string }]
"#,
    );
    let mismatch = of_kind(&issues, "path_param_mismatch");
    assert_eq!(mismatch.len(), 1);
    assert_eq!(mismatch[0].severity, LintSeverity::Error);
    assert_eq!(mismatch[0].location, "users.proto:Users.GetUser#0");
    assert!(mismatch[0].suggestion.is_some());
    assert!(has_errors(&issues));
}

#[test]
fn test_lint_path_param_order_matters() {
    let issues = lint_yaml(
        r#"
files:
  - name: posts.proto
    services:
      - name: Posts
        methods:
          - name: GetPost
            request: GetPostRequest
            response: Post
            bindings:
              - method: GET
                path: /v1/users/{user}/posts/{post}
                path_params:
                  - { field: post, type: int64 }
                  - { field: user, type: string }
"#,
    );
    assert_eq!(of_kind(&issues, "path_param_mismatch").len(), 1);
}

#[test]
fn test_lint_unsupported_and_nested_path_params() {
    let issues = lint_yaml(
        r#"
files:
  - name: blobs.proto
    services:
      - name: Blobs
        methods:
          - name: GetBlob
            request: GetBlobRequest
            response: Blob
            bindings:
              - method: GET
                path: /v1/blobs/{digest}/{owner.id}
                path_params:
                  - { field: digest, type: bytes }
                  - { field: owner.id, type: string }
"#,
    );
    let unsupported = of_kind(&issues, "unsupported_path_param_type");
    assert_eq!(unsupported.len(), 1);
    assert!(unsupported[0].message.contains("digest"));
    assert_eq!(of_kind(&issues, "nested_path_param").len(), 1);
}

#[test]
fn test_lint_path_and_body_field_is_warning() {
    let issues = lint_yaml(
        r#"
files:
  - name: users.proto
    services:
      - name: Users
        methods:
          - name: UpdateUser
            request: UpdateUserRequest
            response: User
            bindings:
              - method: PATCH
                path: /v1/users/{id}
                path_params: [{ field: id, type: string }]
                body: id
"#,
    );
    let overlap = of_kind(&issues, "path_and_body_field");
    assert_eq!(overlap.len(), 1);
    assert_eq!(overlap[0].severity, LintSeverity::Warning);
    assert!(!has_errors(&issues));
}

#[test]
fn test_lint_wildcard_on_get_is_info() {
    let issues = lint_yaml(
        r#"
files:
  - name: search.proto
    services:
      - name: Search
        methods:
          - name: Query
            request: QueryRequest
            response: QueryResponse
            bindings:
              - method: GET
                path: /v1/search
                explicit_params: ["*"]
"#,
    );
    let wildcard = of_kind(&issues, "wildcard_with_query");
    assert_eq!(wildcard.len(), 1);
    assert_eq!(wildcard[0].severity, LintSeverity::Info);
}

#[test]
fn test_lint_duplicates() {
    let issues = lint_yaml(
        r#"
files:
  - name: users.proto
    services:
      - name: Users
        methods:
          - name: ListUsers
            request: ListUsersRequest
            response: ListUsersResponse
            bindings:
              - { method: GET, path: /v1/users }
          - name: ListUsers
            request: ListUsersRequest
            response: ListUsersResponse
            bindings:
              - { method: GET, path: /v1/users }
      - name: Users
        methods: []
"#,
    );
    assert_eq!(of_kind(&issues, "duplicate_service").len(), 1);
    assert_eq!(of_kind(&issues, "duplicate_method").len(), 1);
    let routes = of_kind(&issues, "duplicate_route");
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].severity, LintSeverity::Warning);
}

#[test]
fn test_issue_display() {
    let issue = LintIssue::error("users.proto:Users.GetUser#0", "path_param_mismatch", "bad")
        .with_suggestion("fix it");
    assert_eq!(
        issue.to_string(),
        "[error] users.proto:Users.GetUser#0 (path_param_mismatch): bad - fix it"
    );
}

#[test]
fn test_severity_ordering() {
    assert!(LintSeverity::Error < LintSeverity::Warning);
    assert!(LintSeverity::Warning < LintSeverity::Info);
}

#[test]
fn test_report_groups_by_severity() {
    let issues = vec![
        LintIssue::new("a", LintSeverity::Warning, "duplicate_route", "dup"),
        LintIssue::error("b", "path_param_mismatch", "bad").with_suggestion("fix"),
    ];
    let report = crate::linter::render_lint_report(&issues);
    assert!(report.contains("1 error(s), 1 warning(s), 0 info(s)"));
    let errors = report.find("Errors").unwrap();
    let warnings = report.find("Warnings").unwrap();
    assert!(errors < warnings);
    assert!(report.contains("💡 Suggestion: fix"));
    assert!(!report.contains("Info:"));
}

#[test]
fn test_report_empty() {
    assert!(crate::linter::render_lint_report(&[]).contains("No lint issues"));
}

#[test]
fn test_lint_binding_identifier_collision() {
    let issues = lint_yaml(
        r#"
files:
  - name: users.proto
    services:
      - name: UserService
        methods:
          - name: Get
            request: GetRequest
            response: User
            bindings:
              - { method: GET, path: /v1/users }
      - name: User
        methods:
          - name: ServiceGet
            request: GetRequest
            response: User
            bindings:
              - { method: GET, path: /v2/users }
"#,
    );
    let collisions = of_kind(&issues, "identifier_collision");
    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].severity, LintSeverity::Error);
    assert_eq!(collisions[0].location, "users.proto:User.ServiceGet#0");
    assert!(collisions[0].message.contains("PATTERN_USER_SERVICE_GET_0"));
    assert!(has_errors(&issues));
}

#[test]
fn test_lint_service_and_method_identifier_collision() {
    let issues = lint_yaml(
        r#"
files:
  - name: users.proto
    services:
      - name: Users
        methods:
          - name: GetUser
            request: GetUserRequest
            response: User
          - name: get_user
            request: GetUserRequest
            response: User
      - name: users
        methods: []
"#,
    );
    let collisions = of_kind(&issues, "identifier_collision");
    assert_eq!(collisions.len(), 2);
    assert!(collisions.iter().any(|i| i.message.contains("`get_user`")));
    assert!(collisions.iter().any(|i| i.message.contains("`UsersDesc`")));
    assert!(of_kind(&issues, "duplicate_service").is_empty());
}
