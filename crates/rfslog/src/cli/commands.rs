//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Decode command arguments.
#[derive(Debug, Args)]
pub struct DecodeCommand {
    /// Flash dump to decode (defaults to `input.path` from the config)
    pub input: Option<PathBuf>,

    /// Directory for the three logs (defaults to `output.directory`)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Line format of the logs (defaults to `output.format`)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Print the decode summary as JSON on stdout
    #[arg(long)]
    pub summary_json: bool,
}

/// Frames command arguments.
#[derive(Debug, Args)]
pub struct FramesCommand {
    /// Flash dump to list (defaults to `input.path` from the config)
    pub input: Option<PathBuf>,

    /// Stop after this many frames
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Fields command arguments.
#[derive(Debug, Args)]
pub struct FieldsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Log format argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Tab-separated text lines
    Text,
    /// One JSON object per line
    Json,
}

impl From<FormatArg> for crate::config::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_format_arg_conversion() {
        assert_eq!(OutputFormat::from(FormatArg::Text), OutputFormat::Text);
        assert_eq!(OutputFormat::from(FormatArg::Json), OutputFormat::Json);
    }

    #[test]
    fn test_decode_command_debug() {
        let cmd = DecodeCommand {
            input: Some(PathBuf::from("FLASH.DMP")),
            output_dir: None,
            format: None,
            summary_json: true,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("FLASH.DMP"));
        assert!(debug_str.contains("summary_json"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        assert!(format!("{cmd:?}").contains("Show"));
    }
}
