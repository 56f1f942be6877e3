use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Repo-health reports for JavaScript/TypeScript projects
#[derive(Parser, Debug)]
#[command(name = "depsight")]
#[command(version)]
#[command(
    about = "Dependency health, security audit, import usage and upgrade-risk reports for JavaScript/TypeScript projects",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the project directory (defaults to current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Config file (defaults to depsight.config.yml in the project directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Timeout for each package-manager command, in milliseconds
    #[arg(long, global = true, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Log filter written to stderr (e.g. warn, debug, depsight=trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Write the JSON report to a file instead of stdout
    #[arg(short, long, global = true, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Hide the progress spinner
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print the full error chain on failure
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Detect which package manager governs the project
    Detect,

    /// List outdated dependencies
    Deps,

    /// Run the package manager's security audit
    Audit,

    /// Find every import of a package
    Usage {
        /// Package name, e.g. lodash or @scope/pkg
        package: String,
    },

    /// Score overall project quality
    Quality,

    /// Assess the risk of upgrading a package
    Risk {
        /// Package name, e.g. react
        package: String,

        /// Current version (defaults to the version declared in package.json)
        #[arg(long)]
        from: Option<String>,

        /// Target version (defaults to the latest published version)
        #[arg(long)]
        to: Option<String>,
    },

    /// List open Dependabot pull requests
    Dependabot,
}

impl Command {
    /// Name used for the root logging span.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Detect => "detect",
            Command::Deps => "deps",
            Command::Audit => "audit",
            Command::Usage { .. } => "usage",
            Command::Quality => "quality",
            Command::Risk { .. } => "risk",
            Command::Dependabot => "dependabot",
        }
    }
}

impl Args {
    /// Parses the process arguments, leaving exit handling to the caller.
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}
