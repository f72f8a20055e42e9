use crate::binding::{BindingPlan, RouterTarget};
use crate::config::{load_generator_config, ConfigOverrides};
use crate::descriptor::{load_descriptors, FileDescriptor};
use crate::generator::{format_outputs, generate, write_outputs, WriteOptions};
use crate::linter::{has_errors, lint_files, print_lint_issues, LintSeverity};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface for the rpcgate binding compiler
#[derive(Parser, Debug)]
#[command(name = "rpcgate-gen")]
#[command(about = "Generate gRPC registrars, HTTP gateways and HTTP clients from RPC descriptors", long_about = None)]
pub struct Cli {
    /// Log at debug level (overrides RPCGATE_LOG_LEVEL when it is quieter)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate descriptor units (and optionally implementation scaffolds)
    Generate {
        /// Path to the descriptor document (YAML or JSON)
        #[arg(short, long)]
        descriptors: PathBuf,

        /// Output directory for generated units
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Path to the generator config (rpcgate.toml)
        /// If not provided, will auto-detect alongside the descriptor document
        #[arg(long)]
        config: Option<PathBuf>,

        /// Also emit the implementation scaffold
        #[arg(long = "impl", default_value_t = false)]
        impl_: bool,

        /// Overwrite existing scaffolds
        #[arg(short, long, default_value_t = false)]
        force: bool,

        /// Show what would be written without touching the filesystem
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Router capability the HTTP registration targets
        #[arg(long, value_enum)]
        router: Option<RouterTarget>,

        /// Crate path imported as `rt` in generated code
        #[arg(long)]
        runtime_crate: Option<String>,

        /// Module path of the prost/tonic generated types
        #[arg(long)]
        proto_module: Option<String>,

        /// Run rustfmt over written units
        #[arg(long, default_value_t = false)]
        format: bool,
    },
    /// Lint a descriptor document for binding issues
    Lint {
        /// Path to the descriptor document (YAML or JSON)
        #[arg(short, long)]
        descriptors: PathBuf,

        /// Exit with error code if any errors are found
        #[arg(long, default_value_t = false)]
        fail_on_error: bool,

        /// Show only errors (hide warnings and info)
        #[arg(long, default_value_t = false)]
        errors_only: bool,
    },
    /// Print every binding with its route forms and decode plan
    Inspect {
        /// Path to the descriptor document (YAML or JSON)
        #[arg(short, long)]
        descriptors: PathBuf,
    },
}

/// One line per binding, grouped under its file.
///
/// ```text
/// users.proto
///   Users.GetUser#0 GET /v1/users/{id} -> /v1/users/{} [query(-id) -> path(id)]
/// ```
pub fn inspect_lines(files: &[FileDescriptor]) -> Vec<String> {
    let mut lines = Vec::new();
    for file in files {
        lines.push(file.name.clone());
        for (svc, method, binding) in file.bindings() {
            lines.push(format!(
                "  {}.{}#{} {} {} -> {} [{}]",
                svc.name,
                method.name,
                binding.index,
                binding.method,
                binding.path.router_form(),
                binding.path.interpolation_form(),
                BindingPlan::for_binding(binding)
            ));
        }
    }
    lines
}

/// Execute a parsed command line.
pub fn run_cli(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
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
            let files = load_descriptors(&descriptors)?;
            let config = load_generator_config(
                config.as_deref(),
                &descriptors,
                ConfigOverrides {
                    runtime_crate,
                    proto_module,
                    router,
                    emit_impl: impl_,
                    format,
                },
            )?;
            let units = generate(&files, &config)?;
            let report = write_outputs(&out, &units, WriteOptions { force, dry_run })?;

            let verb = if dry_run { "Would write" } else { "Wrote" };
            for path in &report.written {
                println!("{}: {}", verb, out.join(path).display());
            }
            for path in &report.skipped {
                println!("Skipped existing scaffold: {}", out.join(path).display());
            }
            if config.format && !dry_run {
                let written: Vec<PathBuf> = report.written.iter().map(|p| out.join(p)).collect();
                format_outputs(&written)?;
            }
            Ok(())
        }
        Commands::Lint {
            descriptors,
            fail_on_error,
            errors_only,
        } => {
            let files = load_descriptors(&descriptors)?;
            let mut issues = lint_files(&files);
            if errors_only {
                issues.retain(|i| i.severity == LintSeverity::Error);
            }
            print_lint_issues(&issues);
            if fail_on_error && has_errors(&issues) {
                let count = issues
                    .iter()
                    .filter(|i| i.severity == LintSeverity::Error)
                    .count();
                return Err(format!("lint found {} error(s)", count).into());
            }
            Ok(())
        }
        Commands::Inspect { descriptors } => {
            let files = load_descriptors(&descriptors)?;
            for line in inspect_lines(&files) {
                println!("{}", line);
            }
            Ok(())
        }
    }
}
