use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use slog::{error, info, Level, Logger};

use lowpass_fft::config::{ConfigError, PipelineConfig};
use lowpass_fft::pipeline::Pipeline;
use lowpass_fft::plot::{NullVisualizer, PngVisualizer, Visualizer};
use lowpass_fft::utils;
use lowpass_fft::wav::WavFileWriter;

/// Removes everything above a cutoff frequency from an audio clip using an FFT brick-wall mask.
///
/// With no arguments, filters `guitar_riff.mp3` at 1000 Hz into `guitar_riff_filtered.wav`.
#[derive(Parser, Debug)]
#[command(name = "lowpass-fft", version)]
struct Cli {
    /// JSON config file; the flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Audio file to filter
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// WAV file to write
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Cutoff frequency in Hz
    #[arg(short, long, allow_negative_numbers = true)]
    cutoff: Option<f64>,

    /// Directory for the diagnostic PNG plots
    #[arg(long, conflicts_with = "no_plots")]
    plot_dir: Option<PathBuf>,

    /// Skip rendering plots
    #[arg(long)]
    no_plots: bool,

    /// Log debug records too
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn log_level(&self) -> Level {
        if self.verbose { Level::Debug } else { Level::Info }
    }

    fn into_config(self) -> Result<PipelineConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(input) = self.input {
            config.input_path = input;
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if let Some(cutoff) = self.cutoff {
            config.cutoff_hz = cutoff;
        }
        if self.no_plots {
            config.plot_dir = None;
        } else if let Some(dir) = self.plot_dir {
            config.plot_dir = Some(dir);
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();
    let logger = utils::get_logger(cli.log_level());

    if let Err(e) = run(cli, &logger) {
        error!(logger, "run failed";
            "error" => format!("{:#}", e),
            "stack_trace" => utils::stack_trace());
        eprintln!("{}", format!("Error: {:#}", e).yellow());
        process::exit(1);
    }
}

fn run(cli: Cli, logger: &Logger) -> anyhow::Result<()> {
    let config = cli.into_config().context("invalid configuration")?;

    let visualizer: Box<dyn Visualizer> = match &config.plot_dir {
        Some(dir) => Box::new(
            PngVisualizer::new(dir)
                .with_context(|| format!("failed to create plot directory {}", dir.display()))?,
        ),
        None => Box::new(NullVisualizer),
    };

    let mut pipeline = Pipeline::new(config, logger, visualizer, Box::new(WavFileWriter));
    let report = pipeline.run()?;
    let report_json = serde_json::to_string(&report)?;
    info!(logger, "run complete"; "report" => report_json);

    let mut summary = format!(
        "{} samples at {} Hz, {} bins above {} Hz removed -> {}",
        report.samples,
        report.sample_rate,
        report.masked_bins,
        report.cutoff_hz,
        report.output_path.display()
    );
    if let Some(dir) = &pipeline.config().plot_dir {
        summary.push_str(&format!(" (plots in {})", dir.display()));
    }
    println!("{}", summary.green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_reproduce_defaults() {
        let config = Cli::parse_from(["lowpass-fft"]).into_config().unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, r#"{"input_path": "a.flac", "cutoff_hz": 500.0}"#).unwrap();

        let cli = Cli::parse_from([
            "lowpass-fft",
            "--config",
            path.to_str().unwrap(),
            "--cutoff",
            "-20",
            "--no-plots",
        ]);
        let config = cli.into_config().unwrap();
        assert_eq!(config.input_path, PathBuf::from("a.flac"));
        assert_eq!(config.cutoff_hz, -20.0);
        assert_eq!(config.plot_dir, None);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let cli = Cli::parse_from(["lowpass-fft", "-i", "same.wav", "-o", "same.wav"]);
        assert!(matches!(
            cli.into_config(),
            Err(ConfigError::OutputOverwritesInput(_))
        ));
        assert!(Cli::try_parse_from(["lowpass-fft", "--no-plots", "--plot-dir", "x"]).is_err());
    }
}
