//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Write message catalogs, optionally rewrite sources in place
//! - `check`: Run extraction without writing anything
//! - `init`: Create a default `.intlrc.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::core::ProjectOverrides;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Arguments shared by `extract` and `check`.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project directory; the config file is searched from here
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Catalog output directory (overrides config file)
    #[arg(long)]
    pub messages_dir: Option<PathBuf>,

    /// Apply the transformation this many times to each file
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub passes: Option<u16>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Extraction policy flags. Each one overrides the config file.
#[derive(Debug, Clone, Args)]
pub struct PolicyArgs {
    /// Fail when a message has no description
    #[arg(long)]
    pub enforce_descriptions: bool,

    /// Remove defaultMessage from rewritten declarations
    #[arg(long)]
    pub remove_default_message: bool,

    /// Record file and position of each message in the catalog
    #[arg(long)]
    pub extract_source_location: bool,

    /// Also extract from formatMessage({ ... }) calls
    #[arg(long)]
    pub extract_from_format_message_call: bool,

    /// Module the message API is imported from
    #[arg(long, value_name = "NAME")]
    pub module_source_name: Option<String>,

    /// Extra component names to treat like FormattedMessage
    #[arg(long = "additional-component-name", value_name = "NAME", value_delimiter = ',')]
    pub additional_component_names: Vec<String>,

    /// Pattern for generated ids, e.g. [sha512:contenthash:base64:6]
    #[arg(long, value_name = "PATTERN")]
    pub id_interpolation_pattern: Option<String>,
}

#[derive(Debug, Parser)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Rewrite source files in place
    #[arg(long)]
    pub write: bool,
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract message descriptors into per-file JSON catalogs
    Extract(ExtractArgs),
    /// Validate message declarations without writing anything
    Check(CheckArgs),
    /// Initialize a new .intlrc.json configuration file
    Init,
}

pub fn overrides(common: &CommonArgs, policy: &PolicyArgs) -> ProjectOverrides {
    ProjectOverrides {
        source_root: common.source_root.clone(),
        messages_dir: common.messages_dir.clone(),
        passes: common.passes.map(usize::from),
        module_source_name: policy.module_source_name.clone(),
        additional_component_names: policy.additional_component_names.clone(),
        enforce_descriptions: policy.enforce_descriptions.then_some(true),
        remove_default_message: policy.remove_default_message.then_some(true),
        extract_source_location: policy.extract_source_location.then_some(true),
        extract_from_format_message_call: policy.extract_from_format_message_call.then_some(true),
        id_interpolation_pattern: policy.id_interpolation_pattern.clone(),
    }
}
