//! # rpcgate
//!
//! **rpcgate** is a binding compiler for RPC services annotated with HTTP
//! bindings. From a descriptor model (services, methods, and per-method HTTP
//! verb + path template + body policy) it writes Rust source that:
//!
//! - registers each service on a gRPC server,
//! - exposes each binding as an HTTP route that decodes the request from
//!   query, body and path, calls the gRPC implementation and encodes the
//!   response with a negotiated marshaler,
//! - calls the same RPCs over HTTP from a typed client,
//! - serves the embedded OpenAPI document, optionally rewritten.
//!
//! ## Architecture
//!
//! - **[`descriptor`]** - Descriptor document loading and the validated model
//! - **[`binding`]** - Path templates, per-binding decode plans and router targets
//! - **[`linter`]** - Model checks with severity, location and suggestions
//! - **[`generator`]** - Emission rules, unit assembly, scaffold template and file output
//! - **[`config`]** - `rpcgate.toml` generator options
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `rpcgate-gen` command line
//!
//! ### Generation Flow
//!
//! ```text
//! descriptors.yaml ── load_descriptors ── lint_files ── generate ── write_outputs
//!        │                                                 │
//!   swagger blobs                              <stem>_rpcgate.rs (always)
//!                                              <stem>_impl.rs   (once, --impl)
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! rpcgate-gen generate --descriptors api/users.yaml --out src/gen --impl
//! ```
//!
//! Or from a build script:
//!
//! ```rust,ignore
//! use rpcgate::{generate, load_descriptors, GeneratorConfig};
//!
//! let files = load_descriptors(Path::new("api/users.yaml"))?;
//! for unit in generate(&files, &GeneratorConfig::default())? {
//!     std::fs::write(out_dir.join(&unit.path), unit.contents)?;
//! }
//! ```
//!
//! ## Generated Code
//!
//! Generated units import the runtime crate as `rt` and the proto module as
//! `pb`. A unit built against an incompatible runtime fails to compile on
//! its `rt::IS_VERSION_1` assertion.

pub mod binding;
pub mod cli;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod generator;
pub mod linter;
pub mod logging;

pub use binding::{BindingPlan, PathTemplate, RouterTarget};
pub use config::GeneratorConfig;
pub use descriptor::{load_descriptors, FileDescriptor};
pub use error::GenerateError;
pub use generator::{generate, write_outputs, GeneratedFile, WriteOptions};
pub use linter::{lint_files, LintIssue, LintSeverity};
