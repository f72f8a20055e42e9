use std::path::Path;
use std::process::Command;

/// Environment variable naming the formatter binary.
pub const RUSTFMT_BIN_ENV: &str = "RPCGATE_RUSTFMT_BIN";

/// Run rustfmt over the written units.
pub fn format_outputs(paths: &[impl AsRef<Path>]) -> anyhow::Result<()> {
    if paths.is_empty() {
        return Ok(());
    }
    // Allow tests to override the rustfmt binary path without mutating PATH
    let rustfmt_bin = std::env::var(RUSTFMT_BIN_ENV).unwrap_or_else(|_| "rustfmt".to_string());

    let mut cmd = Command::new(&rustfmt_bin);
    cmd.arg("--edition").arg("2021");
    for path in paths {
        cmd.arg(path.as_ref());
    }
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("{} failed with {}", rustfmt_bin, status);
    }
    Ok(())
}
