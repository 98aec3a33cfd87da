//! Command-line interface module

use clap::{Args as ClapArgs, Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use std::time::Duration;

use crate::conversion::config::parse_size;
use crate::conversion::{ConversionConfig, ConversionResult};
use crate::error::{ConversionError, ConversionErrorKind};
use crate::raster::ImageBatchOptions;

pub mod path_mapping;

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "retroconv")]
#[command(about = "Convert legacy XML configuration to TOML and bitmap folders to PNG")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Convert XML configuration files to sibling TOML files
    Config(ConfigArgs),
    /// Convert every image in a folder to PNG
    Images(ImageArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ConfigArgs {
    /// XML files or directories containing XML files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output file path (single input file only; default: sibling .toml)
    #[arg(short, long, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print TOML to standard output instead of writing files
    #[arg(long)]
    pub stdout: bool,

    /// Keep every value as a string
    #[arg(long)]
    pub no_infer: bool,

    /// Recursively process directories
    #[arg(long)]
    pub recursive: bool,

    /// Continue converting other files when one file fails
    #[arg(long)]
    pub continue_on_error: bool,

    /// Output conversion statistics
    #[arg(long)]
    pub stats: bool,

    /// Maximum source size (e.g., 100MB, default: 100MB)
    #[arg(long)]
    pub memory_limit: Option<String>,

    /// Skip re-parsing the output to check it against the source
    #[arg(long)]
    pub no_validate: bool,

    /// Comment written at the top of every TOML file
    #[arg(long, value_name = "TEXT")]
    pub header: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ImageArgs {
    /// Folder containing the images
    pub folder: PathBuf,

    /// Also convert images in sub-folders
    #[arg(long)]
    pub recursive: bool,

    /// Continue converting other files when one file fails
    #[arg(long)]
    pub continue_on_error: bool,
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub conversion_config: ConversionConfig,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> ConversionResult<Self> {
        let conversion_config = match &args.command {
            Commands::Config(config_args) => Self::create_conversion_config(config_args)?,
            Commands::Images(_) => ConversionConfig::default(),
        };

        Ok(Self {
            args,
            conversion_config,
        })
    }

    /// Create conversion configuration from CLI arguments
    fn create_conversion_config(args: &ConfigArgs) -> ConversionResult<ConversionConfig> {
        let memory_limit = match &args.memory_limit {
            Some(limit) => parse_size(limit).map_err(|e| {
                ConversionError::conversion(ConversionErrorKind::configuration(e))
            })?,
            None => ConversionConfig::default().memory_limit,
        };

        let config = ConversionConfig::default()
            .with_memory_limit(memory_limit)
            .with_type_inference(!args.no_infer)
            .with_validation(!args.no_validate)
            .with_header_comment(args.header.clone());

        // Validate configuration
        config
            .validate()
            .map_err(|e| ConversionError::conversion(ConversionErrorKind::configuration(e)))?;

        Ok(config)
    }

    /// Image batch options, if the images subcommand was chosen
    pub fn image_options(&self) -> Option<ImageBatchOptions> {
        match &self.args.command {
            Commands::Images(args) => Some(ImageBatchOptions {
                recursive: args.recursive,
                continue_on_error: args.continue_on_error,
                ..ImageBatchOptions::default()
            }),
            Commands::Config(_) => None,
        }
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.args.verbose
    }

    /// Default log filter when RUST_LOG is unset
    pub fn log_level(&self) -> &'static str {
        if self.args.verbose {
            "debug"
        } else if self.args.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a file size in human-readable format
    pub fn format_file_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.1} {}", size, UNITS[unit_index])
        }
    }

    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else if total_millis < 60_000 {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        } else {
            let minutes = total_millis / 60_000;
            let seconds = (total_millis % 60_000) / 1000;
            format!("{}m {}s", minutes, seconds)
        }
    }

    /// Create a progress bar for file processing
    pub fn create_progress_bar(total: u64, quiet: bool) -> indicatif::ProgressBar {
        if quiet {
            return indicatif::ProgressBar::hidden();
        }
        let pb = indicatif::ProgressBar::new(total);
        let style = indicatif::ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}",
            )
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            println!("{} {}", style("✓").green(), message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    /// Show a warning message (if not in quiet mode)
    pub fn show_warning(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("{} {}", style("⚠").yellow(), message);
        }
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &ConversionError) {
    CliUtils::show_error(&error.user_message());

    // Provide helpful suggestions
    match error {
        ConversionError::ParseError(_) => {
            eprintln!(
                "\nTip: settings must be attributes or child elements of sections under <config>"
            );
        }
        ConversionError::Conversion { kind, .. } => match kind {
            ConversionErrorKind::SourceTooLarge { .. } => {
                eprintln!("\nTip: Use --memory-limit to increase the size allowance");
            }
            ConversionErrorKind::KeyCollision { .. } => {
                eprintln!(
                    "\nTip: rename one of the keys in the source; both map to the same TOML key"
                );
            }
            ConversionErrorKind::OutputConflict { .. } => {
                eprintln!("\nTip: rename one of the sources so each PNG has its own name");
            }
            ConversionErrorKind::ImageDecode { .. } => {
                eprintln!("\nTip: Use --continue-on-error to skip files that are not images");
            }
            _ => {}
        },
        ConversionError::Other(_) => {}
    }
}
