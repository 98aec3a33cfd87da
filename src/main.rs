use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use retroconv::cli::{handle_error, Args, CliConfig, CliUtils, Commands, ConfigArgs, ImageArgs};
use retroconv::conversion::batch::convert_batch_files;
use retroconv::conversion::stats::ConversionStatistics;
use retroconv::error::{ConversionError, ConversionErrorKind};
use retroconv::parser::directory::find_xml_files;
use retroconv::parser::ConfigSource;
use retroconv::raster::convert_image_folder_with_progress;
use retroconv::{ConversionEngine, ConversionResult};

/// Input name that reads XML from standard input
const STDIN_INPUT: &str = "-";

fn main() -> Result<()> {
    let args = Args::parse();
    let cli = match CliConfig::from_args(args) {
        Ok(cli) => cli,
        Err(e) => {
            handle_error(&e);
            std::process::exit(1);
        }
    };

    init_logging(cli.log_level());

    let result = match &cli.args.command {
        Commands::Config(config_args) => run_config(&cli, config_args),
        Commands::Images(image_args) => run_images(&cli, image_args),
    };

    if let Err(e) = result {
        handle_error(&e);
        std::process::exit(1);
    }

    Ok(())
}

/// Install the stderr subscriber; RUST_LOG overrides the flag-derived level
fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("retroconv={}", default_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_config(cli: &CliConfig, args: &ConfigArgs) -> ConversionResult<()> {
    let engine = ConversionEngine::new(cli.conversion_config.clone());
    let quiet = cli.is_quiet();

    if args.inputs.len() == 1 && args.inputs[0].as_os_str() == STDIN_INPUT {
        return convert_stdin(&engine, args, quiet);
    }

    let inputs = collect_inputs(&args.inputs, args.recursive)?;
    if inputs.is_empty() {
        CliUtils::show_warning("No XML files found", quiet);
        return Ok(());
    }

    if let Some(output) = &args.output {
        if inputs.len() != 1 {
            let message = format!(
                "--output requires exactly one input file, found {}",
                inputs.len()
            );
            return Err(ConversionError::conversion(ConversionErrorKind::configuration(
                message,
            )));
        }
        ensure_parent_dir(output)?;
        let converted = engine.convert_file(&inputs[0], output)?;
        CliUtils::show_success(
            &format!(
                "{} -> {}",
                converted.input_path.display(),
                converted.output_path.display()
            ),
            quiet,
        );
        if args.stats {
            let mut statistics = ConversionStatistics::new();
            statistics.record(&converted.data.metadata);
            output_statistics(&statistics, quiet, false);
        }
        return Ok(());
    }

    if args.stdout {
        return print_conversions(&engine, &inputs, args, quiet);
    }

    let start = Instant::now();
    let report = convert_batch_files(&inputs, engine.config(), args.continue_on_error)?;

    for converted in &report.converted {
        CliUtils::show_success(
            &format!(
                "{} -> {}",
                converted.input_path.display(),
                converted.output_path.display()
            ),
            quiet,
        );
    }
    for (path, error) in &report.failed {
        CliUtils::show_error(&format!("{}: {}", path.display(), error.user_message()));
    }
    tracing::debug!(elapsed = %CliUtils::format_duration(start.elapsed()), "batch finished");

    if args.stats {
        output_statistics(&report.statistics, quiet, false);
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(batch_failed(report.failed.len(), inputs.len()))
    }
}

/// Expand directories into the XML files they hold
fn collect_inputs(inputs: &[PathBuf], recursive: bool) -> ConversionResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let found =
                find_xml_files(input, recursive).map_err(|e| ConversionError::io(e, input))?;
            tracing::debug!(dir = %input.display(), count = found.len(), "found XML files");
            files.extend(found);
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(ConversionError::conversion(ConversionErrorKind::io(
                "Input path does not exist".to_string(),
                Some(input.clone()),
            )));
        }
    }
    Ok(files)
}

fn convert_stdin(
    engine: &ConversionEngine,
    args: &ConfigArgs,
    quiet: bool,
) -> ConversionResult<()> {
    let data = engine.convert_from_source(&ConfigSource::Stdin)?;

    match &args.output {
        Some(output) => {
            ensure_parent_dir(output)?;
            retroconv::conversion::output::write_output(
                output,
                data.content.as_bytes(),
                engine.config().atomic_write,
            )?;
        }
        None => print!("{}", data.content),
    }

    if args.stats {
        let mut statistics = ConversionStatistics::new();
        statistics.record(&data.metadata);
        output_statistics(&statistics, quiet, true);
    }
    Ok(())
}

/// Print each conversion to stdout instead of writing sibling files
fn print_conversions(
    engine: &ConversionEngine,
    inputs: &[PathBuf],
    args: &ConfigArgs,
    quiet: bool,
) -> ConversionResult<()> {
    let mut statistics = ConversionStatistics::new();
    let mut failures = 0;

    for input in inputs {
        match engine.convert_from_source(&ConfigSource::File(input.clone())) {
            Ok(data) => {
                if inputs.len() > 1 {
                    println!("# {}", input.display());
                }
                print!("{}", data.content);
                statistics.record(&data.metadata);
            }
            Err(e) if args.continue_on_error => {
                CliUtils::show_error(&format!("{}: {}", input.display(), e.user_message()));
                statistics.record_failure();
                failures += 1;
            }
            Err(e) => return Err(e),
        }
    }

    if args.stats {
        output_statistics(&statistics, quiet, true);
    }

    if failures == 0 {
        Ok(())
    } else {
        Err(batch_failed(failures, inputs.len()))
    }
}

fn run_images(cli: &CliConfig, args: &ImageArgs) -> ConversionResult<()> {
    let quiet = cli.is_quiet();
    let Some(options) = cli.image_options() else {
        return Ok(());
    };

    let pb = CliUtils::create_progress_bar(0, quiet);
    let report =
        convert_image_folder_with_progress(&args.folder, &options, &|index, total, path| {
            pb.set_length(total as u64);
            pb.set_position(index.saturating_sub(1) as u64);
            pb.set_message(file_label(path));
        });
    pb.finish_and_clear();
    let report = report?;

    for converted in &report.converted {
        CliUtils::show_success(
            &format!(
                "{} -> {} ({}x{})",
                converted.input_path.display(),
                converted.output_path.display(),
                converted.width,
                converted.height
            ),
            quiet,
        );
    }
    for (path, error) in &report.failed {
        CliUtils::show_error(&format!("{}: {}", path.display(), error.user_message()));
    }
    if !quiet && !report.skipped.is_empty() {
        println!("Skipped {} PNG file(s)", report.skipped.len());
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(batch_failed(
            report.failed.len(),
            report.failed.len() + report.converted.len(),
        ))
    }
}

/// Create the directory an explicit `--output` path points into
fn ensure_parent_dir(path: &Path) -> ConversionResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| ConversionError::io(e, parent))
        }
        _ => Ok(()),
    }
}

fn batch_failed(failed: usize, total: usize) -> ConversionError {
    ConversionError::conversion(ConversionErrorKind::BatchFailed { failed, total })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Statistics go to stderr when stdout carries TOML
fn output_statistics(statistics: &ConversionStatistics, quiet: bool, to_stderr: bool) {
    if quiet {
        return;
    }

    let mut lines = vec![String::from("\nConversion Statistics:")];
    lines.extend(statistics.summary_lines());
    lines.push(format!(
        "Output total: {}",
        CliUtils::format_file_size(statistics.output_size_bytes)
    ));

    for line in lines {
        if to_stderr {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}
