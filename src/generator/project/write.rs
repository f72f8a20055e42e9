use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use crate::descriptor::FileDescriptor;
use crate::generator::naming::{sanitize_rust_identifier, to_snake_case};

/// Which of the two per-file units a generated file is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// Regenerated on every run
    Descriptor,
    /// Written once; user-owned afterwards
    Scaffold,
}

/// One rendered output unit, not yet on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output directory
    pub path: PathBuf,
    pub kind: UnitKind,
    pub contents: String,
}

/// Write behaviour of [`write_outputs`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Overwrite existing scaffold units
    pub force: bool,
    /// Report what would be written without touching the disk
    pub dry_run: bool,
}

/// Outcome of [`write_outputs`], paths relative to the output directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    /// Scaffold units left alone because they already exist
    pub skipped: Vec<PathBuf>,
}

fn module_stem(file: &FileDescriptor) -> String {
    sanitize_rust_identifier(&to_snake_case(file.stem()))
}

/// `users.proto` → `users_rpcgate`
pub fn descriptor_module_name(file: &FileDescriptor) -> String {
    format!("{}_rpcgate", module_stem(file))
}

/// `users.proto` → `users_impl`
pub fn scaffold_module_name(file: &FileDescriptor) -> String {
    format!("{}_impl", module_stem(file))
}

/// Write generated units below `out_dir`.
///
/// Descriptor units are always written. Scaffold units are written only
/// when absent, unless `force` is set.
pub fn write_outputs(
    out_dir: &Path,
    files: &[GeneratedFile],
    options: WriteOptions,
) -> anyhow::Result<WriteReport> {
    let mut report = WriteReport::default();
    for file in files {
        let target = out_dir.join(&file.path);
        if file.kind == UnitKind::Scaffold && target.exists() && !options.force {
            info!(path = %target.display(), "Scaffold exists, skipping (use --force to overwrite)");
            report.skipped.push(file.path.clone());
            continue;
        }
        if options.dry_run {
            info!(path = %target.display(), bytes = file.contents.len(), "Would write");
            report.written.push(file.path.clone());
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(&target, &file.contents)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        debug!(path = %target.display(), bytes = file.contents.len(), kind = ?file.kind, "Wrote unit");
        report.written.push(file.path.clone());
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use tempfile::TempDir;

    fn unit(path: &str, kind: UnitKind, contents: &str) -> GeneratedFile {
        GeneratedFile {
            path: PathBuf::from(path),
            kind,
            contents: contents.to_string(),
        }
    }

    #[test]
    fn test_module_names() {
        let file = FileDescriptor {
            name: "api/user-service.proto".to_string(),
            services: vec![],
            swagger: None,
        };
        assert_eq!(descriptor_module_name(&file), "user_service_rpcgate");
        assert_eq!(scaffold_module_name(&file), "user_service_impl");
    }

    #[test]
    fn test_scaffold_not_overwritten_without_force() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("users_impl.rs"), "// mine").unwrap();
        let files = vec![
            unit("users_rpcgate.rs", UnitKind::Descriptor, "// generated"),
            unit("users_impl.rs", UnitKind::Scaffold, "// scaffold"),
        ];

        let report = write_outputs(dir.path(), &files, WriteOptions::default()).unwrap();
        assert_eq!(report.written, vec![PathBuf::from("users_rpcgate.rs")]);
        assert_eq!(report.skipped, vec![PathBuf::from("users_impl.rs")]);
        assert_eq!(
            fs::read_to_string(dir.path().join("users_impl.rs")).unwrap(),
            "// mine"
        );

        let forced = WriteOptions {
            force: true,
            ..Default::default()
        };
        write_outputs(dir.path(), &files, forced).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("users_impl.rs")).unwrap(),
            "// scaffold"
        );
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let files = vec![unit("gen/users_rpcgate.rs", UnitKind::Descriptor, "x")];
        let options = WriteOptions {
            dry_run: true,
            ..Default::default()
        };
        let report = write_outputs(dir.path(), &files, options).unwrap();
        assert_eq!(report.written.len(), 1);
        assert!(!dir.path().join("gen").exists());
    }

    #[test]
    fn test_creates_sub_directories() {
        let dir = TempDir::new().unwrap();
        let files = vec![unit("gen/users_rpcgate.rs", UnitKind::Descriptor, "x")];
        write_outputs(dir.path(), &files, WriteOptions::default()).unwrap();
        assert!(dir.path().join("gen/users_rpcgate.rs").exists());
    }
}
