use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "icp",
    about = "Validate interactive content submissions and packages",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Controller configuration (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate an activity form submission
    Validate(ValidateArgs),
    /// Show the initial form values for new or existing content
    Defaults(DefaultsArgs),
    /// Parse a library reference and optionally resolve it
    ParseLibrary(ParseLibraryArgs),
    /// Run the package checks on a content package file
    InspectPackage(InspectPackageArgs),
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Submission payload (JSON)
    #[arg(long)]
    pub submission: PathBuf,
    /// Installed libraries (JSON array)
    #[arg(long)]
    pub registry: Option<PathBuf>,
    /// Package file to attach as the uploaded draft
    #[arg(long)]
    pub package: Option<PathBuf>,
    /// Directory that receives staged packages
    #[arg(long)]
    pub staging_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct DefaultsArgs {
    /// Installed libraries (JSON array)
    #[arg(long)]
    pub registry: Option<PathBuf>,
    /// Content being edited (JSON)
    #[arg(long)]
    pub existing: Option<PathBuf>,
    /// Stored maximum grade of the content being edited
    #[arg(long)]
    pub max_grade: Option<f64>,
    #[arg(long, default_value = "1")]
    pub course: u64,
}

#[derive(Args)]
pub struct ParseLibraryArgs {
    /// Reference in `name major.minor` form
    pub reference: String,
    /// Installed libraries (JSON array) to resolve against
    #[arg(long)]
    pub registry: Option<PathBuf>,
}

#[derive(Args)]
pub struct InspectPackageArgs {
    pub package: PathBuf,
    /// Installed libraries (JSON array)
    #[arg(long)]
    pub registry: Option<PathBuf>,
    /// Keep the staged copy instead of discarding it
    #[arg(long)]
    pub keep: bool,
    /// Directory that receives staged packages
    #[arg(long)]
    pub staging_dir: Option<PathBuf>,
}
