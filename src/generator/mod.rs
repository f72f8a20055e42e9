//! # Generator Module
//!
//! Turns a validated descriptor model into source units, one pair per input
//! file:
//!
//! - **Descriptor unit** (`<stem>_rpcgate.rs`) - regenerated on every run. Holds,
//!   per service, the descriptor type (`<Svc>Desc` with `new`, `register_grpc`,
//!   `swagger_def` and `register_http`), the documentation blob, the HTTP client
//!   (`<Svc>HttpClient`) and, per binding, the route pattern, the client path
//!   builder and the request unmarshaler.
//! - **Implementation scaffold** (`<stem>_impl.rs`) - a constructor and a
//!   not-implemented stub per RPC, rendered from an Askama template. Written once
//!   and left alone afterwards unless `--force` is given.
//!
//! ## Architecture
//!
//! ```text
//! FileDescriptor ─┬─ lint_files ── check_router_target
//!                 ├─ registrar  (Desc type, register_http per RouterTarget)
//!                 ├─ docs       (SWAGGER_DEF byte literal)
//!                 ├─ client     (HttpClient)
//!                 └─ unmarshal  (PATTERN_*, *_builder, unmarshaler_*)
//! ```
//!
//! Every rule is a pure function from a descriptor node to text. Rules receive
//! the unit's [`ImportContext`] and never share a buffer; the unit assembler
//! concatenates their output in a fixed order, so generating twice from the
//! same model yields identical bytes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rpcgate::config::GeneratorConfig;
//! use rpcgate::descriptor::load_descriptors;
//! use rpcgate::generator::{generate, write_outputs, WriteOptions};
//!
//! let files = load_descriptors(Path::new("api/users.yaml"))?;
//! let units = generate(&files, &GeneratorConfig::default())?;
//! write_outputs(Path::new("src/gen"), &units, WriteOptions::default())?;
//! ```

mod client;
mod context;
mod docs;
mod naming;
mod project;
mod registrar;
mod templates;
mod unit;
mod unmarshal;
mod writer;


use tracing::{debug, info};

use crate::binding::check_router_target;
use crate::config::GeneratorConfig;
use crate::descriptor::FileDescriptor;
use crate::error::GenerateError;
use crate::linter::{has_errors, lint_files, LintSeverity};

pub use context::ImportContext;
pub use docs::byte_literal;
pub use naming::{method_fn_name, to_snake_case, BindingNames, ServiceNames};
pub use project::{
    descriptor_module_name, format_outputs, scaffold_module_name, write_outputs, GeneratedFile,
    UnitKind, WriteOptions, WriteReport,
};
pub use templates::render_impl_unit;
pub use unit::{render_descriptor_unit, GENERATED_HEADER};

/// Generate every output unit for `files`.
///
/// Lints the model first and refuses to generate while any error-severity
/// issue remains; warnings are logged and generation proceeds. A basic-only
/// router target additionally rejects path-parameter bindings.
///
/// # Errors
///
/// - [`GenerateError::Invalid`] with every error-severity lint issue
/// - [`GenerateError::PathParamsUnsupported`] for `RouterTarget::Basic`
/// - [`GenerateError::Render`] if the scaffold template fails
pub fn generate(
    files: &[FileDescriptor],
    config: &GeneratorConfig,
) -> Result<Vec<GeneratedFile>, GenerateError> {
    let issues = lint_files(files);
    for issue in &issues {
        match issue.severity {
            LintSeverity::Error => debug!(issue = %issue, "Lint error"),
            LintSeverity::Warning => tracing::warn!(issue = %issue, "Lint warning"),
            LintSeverity::Info => debug!(issue = %issue, "Lint info"),
        }
    }
    if has_errors(&issues) {
        return Err(GenerateError::Invalid(
            issues
                .into_iter()
                .filter(|i| i.severity == LintSeverity::Error)
                .collect(),
        ));
    }
    check_router_target(files, config.router)?;

    let mut out = Vec::with_capacity(files.len() * 2);
    for file in files {
        let desc_path = config
            .desc_path
            .join(format!("{}.rs", descriptor_module_name(file)));
        out.push(GeneratedFile {
            path: desc_path,
            kind: UnitKind::Descriptor,
            contents: render_descriptor_unit(file, config),
        });
        if config.emit_impl {
            let impl_path = config
                .impl_path
                .join(format!("{}.rs", scaffold_module_name(file)));
            out.push(GeneratedFile {
                path: impl_path,
                kind: UnitKind::Scaffold,
                contents: render_impl_unit(file, config)?,
            });
        }
        debug!(
            file = %file.name,
            services = file.services.len(),
            bindings = file.bindings().count(),
            "Generated units"
        );
    }
    info!(
        files = files.len(),
        units = out.len(),
        router = %config.router,
        "Generation complete"
    );
    Ok(out)
}
