//! # Descriptor Linter
//!
//! Checks a descriptor model for bindings the generator cannot turn into a
//! consistent route / path builder / unmarshaler triple.
//!
//! ## Checks Performed
//!
//! 1. **duplicate_service** / **duplicate_method** - names feed generated identifiers
//! 2. **path_param_mismatch** - placeholders and declared path params must agree, in order
//! 3. **unsupported_path_param_type** - bytes, message and group fields cannot be path segments
//! 4. **nested_path_param** - dotted field paths are not bound from the path
//! 5. **path_and_body_field** - a body field that is also path-bound is overwritten by the path
//! 6. **wildcard_with_query** - wildcard bindings (query string ignored) on verbs that usually carry no body
//! 7. **duplicate_route** - two bindings sharing verb and pattern in one file
//! 8. **identifier_collision** - distinct names that generate the same Rust item
//!    (`UserService.Get` and `User.ServiceGet` both give `PATTERN_USER_SERVICE_GET_0`)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rpcgate::linter::{lint_files, LintSeverity};
//!
//! for issue in lint_files(&files) {
//!     eprintln!("{}", issue);
//! }
//! ```

use crate::descriptor::{BodyPolicy, Binding, ExplicitParams, FileDescriptor};
use crate::generator::{method_fn_name, BindingNames, ServiceNames};
use http::Method;
use std::collections::{HashMap, HashSet};
use std::fmt;

#[cfg(test)]
mod tests;

/// Severity level for lint issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LintSeverity {
    /// Error - Will cause code generation to fail
    Error,
    /// Warning - Generated code works but probably not as intended
    Warning,
    /// Info - Best practice suggestion
    Info,
}

impl fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintSeverity::Error => write!(f, "error"),
            LintSeverity::Warning => write!(f, "warning"),
            LintSeverity::Info => write!(f, "info"),
        }
    }
}

/// A lint issue found in a descriptor model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    /// Where the issue occurred (e.g., "users.proto:Users.GetUser#0")
    pub location: String,
    pub severity: LintSeverity,
    /// Type of lint issue (e.g., "path_param_mismatch")
    pub kind: String,
    pub message: String,
    /// Optional suggestion for how to fix it
    pub suggestion: Option<String>,
}

impl LintIssue {
    pub fn new(
        location: impl Into<String>,
        severity: LintSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LintIssue {
            location: location.into(),
            severity,
            kind: kind.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn error(
        location: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(location, LintSeverity::Error, kind, message)
    }

    /// Add a suggestion for fixing the issue
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}): {}",
            self.severity, self.location, self.kind, self.message
        )?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " - {}", suggestion)?;
        }
        Ok(())
    }
}

/// Location string for a binding: `file:Service.Method#index`.
pub fn binding_location(file: &str, service: &str, method: &str, index: usize) -> String {
    format!("{}:{}.{}#{}", file, service, method, index)
}

/// Whether any issue would block generation.
pub fn has_errors(issues: &[LintIssue]) -> bool {
    issues.iter().any(|i| i.severity == LintSeverity::Error)
}

/// Human-readable lint report, grouped by severity.
pub fn render_lint_report(issues: &[LintIssue]) -> String {
    if issues.is_empty() {
        return "✅ No lint issues found!\n".to_string();
    }
    let count = |sev: LintSeverity| issues.iter().filter(|i| i.severity == sev).count();
    let mut out = format!(
        "📋 Lint Results: {} error(s), {} warning(s), {} info(s)\n",
        count(LintSeverity::Error),
        count(LintSeverity::Warning),
        count(LintSeverity::Info)
    );
    for (severity, heading) in [
        (LintSeverity::Error, "❌ Errors (must fix):"),
        (LintSeverity::Warning, "⚠️  Warnings (should fix):"),
        (LintSeverity::Info, "ℹ️  Info:"),
    ] {
        let group: Vec<&LintIssue> = issues.iter().filter(|i| i.severity == severity).collect();
        if group.is_empty() {
            continue;
        }
        out.push('\n');
        out.push_str(heading);
        out.push('\n');
        for issue in group {
            out.push_str(&format!("   [{}] {}\n", issue.kind, issue.location));
            out.push_str(&format!("      {}\n", issue.message));
            if let Some(suggestion) = &issue.suggestion {
                out.push_str(&format!("      💡 Suggestion: {}\n", suggestion));
            }
        }
    }
    out
}

pub fn print_lint_issues(issues: &[LintIssue]) {
    print!("{}", render_lint_report(issues));
}

/// Lint every file of a descriptor model.
pub fn lint_files(files: &[FileDescriptor]) -> Vec<LintIssue> {
    let mut issues = Vec::new();
    for file in files {
        lint_file(&mut issues, file);
    }
    issues
}

fn lint_file(issues: &mut Vec<LintIssue>, file: &FileDescriptor) {
    let mut services = HashSet::new();
    for svc in &file.services {
        if !services.insert(svc.name.as_str()) {
            issues.push(
                LintIssue::error(
                    format!("{}:{}", file.name, svc.name),
                    "duplicate_service",
                    format!("service '{}' is declared more than once", svc.name),
                )
                .with_suggestion("service names become type names in the generated unit"),
            );
        }
        let mut methods = HashSet::new();
        for m in &svc.methods {
            if !methods.insert(m.name.as_str()) {
                issues.push(LintIssue::error(
                    format!("{}:{}.{}", file.name, svc.name, m.name),
                    "duplicate_method",
                    format!("method '{}' is declared more than once", m.name),
                ));
            }
        }
    }

    lint_identifiers(issues, file);

    let mut routes: HashSet<(Method, &str)> = HashSet::new();
    for (svc, m, b) in file.bindings() {
        let location = binding_location(&file.name, &svc.name, &m.name, b.index);
        lint_binding(issues, &location, b);
        if !routes.insert((b.method.clone(), b.path.router_form())) {
            issues.push(LintIssue::new(
                &location,
                LintSeverity::Warning,
                "duplicate_route",
                format!(
                    "{} {} is already bound by another method; the router keeps only one",
                    b.method,
                    b.path.router_form()
                ),
            ));
        }
    }
}

/// Generated identifiers must stay unique per unit. Identical source names are
/// already reported as duplicates and are skipped here.
fn lint_identifiers(issues: &mut Vec<LintIssue>, file: &FileDescriptor) {
    let mut collision = |location: String, ident: &str, first: &str, second: &str| {
        issues.push(
            LintIssue::error(
                location,
                "identifier_collision",
                format!(
                    "'{}' and '{}' both generate `{}`",
                    first, second, ident
                ),
            )
            .with_suggestion("rename one of them so the snake_case forms differ"),
        );
    };

    let mut service_items: HashMap<String, &str> = HashMap::new();
    let mut binding_items: HashMap<String, String> = HashMap::new();
    for svc in &file.services {
        let names = ServiceNames::new(svc);
        for ident in [&names.desc, &names.server_mod] {
            match service_items.get(ident.as_str()) {
                Some(first) if *first != svc.name => {
                    collision(format!("{}:{}", file.name, svc.name), ident, first, &svc.name);
                    break;
                }
                Some(_) => {}
                None => {
                    service_items.insert(ident.clone(), &svc.name);
                }
            }
        }

        let mut method_items: HashMap<String, &str> = HashMap::new();
        for m in &svc.methods {
            let fn_name = method_fn_name(m);
            match method_items.get(fn_name.as_str()) {
                Some(first) if *first != m.name => collision(
                    format!("{}:{}.{}", file.name, svc.name, m.name),
                    &fn_name,
                    first,
                    &m.name,
                ),
                Some(_) => {}
                None => {
                    method_items.insert(fn_name, &m.name);
                }
            }

            for b in &m.bindings {
                let label = format!("{}.{}#{}", svc.name, m.name, b.index);
                let pattern = BindingNames::new(svc, m, b).pattern;
                match binding_items.get(&pattern) {
                    Some(first) if *first != label => {
                        let first = first.clone();
                        collision(
                            binding_location(&file.name, &svc.name, &m.name, b.index),
                            &pattern,
                            &first,
                            &label,
                        );
                    }
                    Some(_) => {}
                    None => {
                        binding_items.insert(pattern, label);
                    }
                }
            }
        }
    }
}

fn lint_binding(issues: &mut Vec<LintIssue>, location: &str, b: &Binding) {
    let placeholders: Vec<&str> = b.path.param_names().collect();
    let declared: Vec<&str> = b.path_params.iter().map(|p| p.field.as_str()).collect();
    if placeholders != declared {
        issues.push(
            LintIssue::error(
                location,
                "path_param_mismatch",
                format!(
                    "template {} has placeholders [{}] but path params are [{}]",
                    b.path.router_form(),
                    placeholders.join(", "),
                    declared.join(", ")
                ),
            )
            .with_suggestion("declare exactly one path param per placeholder, in template order"),
        );
    }

    for param in &b.path_params {
        if param.field.contains('.') {
            issues.push(LintIssue::error(
                location,
                "nested_path_param",
                format!("path param '{}' targets a nested field", param.field),
            ));
        }
        if param.ty.rust_arg_type().is_none() {
            issues.push(LintIssue::error(
                location,
                "unsupported_path_param_type",
                format!(
                    "path param '{}' has type {} which cannot be rendered into a path",
                    param.field, param.ty
                ),
            ));
        }
    }

    if let BodyPolicy::Field(body_field) = &b.body {
        if b.path_params.iter().any(|p| &p.field == body_field) {
            issues.push(LintIssue::new(
                location,
                LintSeverity::Warning,
                "path_and_body_field",
                format!(
                    "field '{}' is bound from both body and path; the path value wins",
                    body_field
                ),
            ));
        }
    }

    if b.explicit_params == ExplicitParams::Wildcard
        && matches!(b.method, Method::GET | Method::DELETE | Method::HEAD)
    {
        issues.push(LintIssue::new(
            location,
            LintSeverity::Info,
            "wildcard_with_query",
            format!(
                "{} binding uses the wildcard marker: query keys are ignored and clients rarely send a body with {}",
                b.method, b.method
            ),
        ));
    }
}
