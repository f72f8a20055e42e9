//! # CLI Module
//!
//! Command-line front end of the `rpcgate-gen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate descriptor units (and, with `--impl`, implementation scaffolds):
//!
//! ```bash
//! rpcgate-gen generate --descriptors api/users.yaml --out src/gen --impl
//! ```
//!
//! Options:
//! - `--descriptors <FILE>` - Descriptor document, YAML or JSON (required)
//! - `--out <DIR>` - Output directory (default: `.`)
//! - `--config <FILE>` - Generator config; `rpcgate.toml` next to the document is used otherwise
//! - `--impl` - Also write `<stem>_impl.rs` scaffolds
//! - `--force` - Overwrite existing scaffolds
//! - `--dry-run` - List what would be written
//! - `--router <probe|advanced|basic>` - Router capability to target
//! - `--runtime-crate <PATH>` / `--proto-module <PATH>` - Import roots of generated code
//! - `--format` - Run rustfmt over written files
//!
//! ### `lint`
//!
//! ```bash
//! rpcgate-gen lint --descriptors api/users.yaml --fail-on-error
//! ```
//!
//! ### `inspect`
//!
//! Print every binding with its router form, interpolation form and decode plan:
//!
//! ```bash
//! rpcgate-gen inspect --descriptors api/users.yaml
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{inspect_lines, run_cli, Cli, Commands};
