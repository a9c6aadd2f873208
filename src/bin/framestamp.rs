use std::{path::PathBuf, process::ExitCode};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use framestamp::{
    FfmpegProber, SampleError, SampleOptions, VideoProber, VideoSampler, set_ffmpeg_verbose,
};

const CLI_AFTER_HELP: &str = "Examples:\n  framestamp sample timelapse.mp4 --out frames --interval 2\n  framestamp sample dashcam.mp4 --out frames --interval 1 --start-time 1577836800000\n  framestamp probe timelapse.mp4 --json\n  framestamp completions zsh > _framestamp";

#[derive(Debug, Parser)]
#[command(
    name = "framestamp",
    version,
    about = "Sample video frames and stamp them with capture times",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Show additional logging output, including FFmpeg's own.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract frames at a computed rate and stamp their capture times.
    #[command(
        about = "Sample a video into timestamped frames",
        after_help = "Examples:\n  framestamp sample timelapse.mp4 --out frames --interval 2\n  framestamp sample gopro.mp4 --out frames --interval 5 --duration-ratio 1.001"
    )]
    Sample {
        /// Input video path.
        video: PathBuf,

        /// Import directory that receives the sampled frames. Must exist.
        #[arg(long)]
        out: PathBuf,

        /// Sampling interval in seconds between consecutive frames.
        #[arg(long)]
        interval: f64,

        /// Explicit sequence start time, milliseconds since the UNIX epoch.
        /// Defaults to the video's creation-time metadata.
        #[arg(long)]
        start_time: Option<i64>,

        /// Correction factor for drift between nominal and actual video
        /// duration.
        #[arg(long, default_value_t = 1.0)]
        duration_ratio: f64,
    },

    /// Print a video's container-reported metrics (alias: info).
    #[command(
        about = "Probe a video's metrics",
        visible_alias = "info",
        after_help = "Examples:\n  framestamp probe timelapse.mp4\n  framestamp probe timelapse.mp4 --json"
    )]
    Probe {
        /// Input video path.
        video: PathBuf,

        /// Output the probe as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
    set_ffmpeg_verbose(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {error}", "error:".red().bold());
            if let SampleError::IncompatibleSampleRate {
                likely_interval, ..
            } = &error
            {
                eprintln!(
                    "{} retry with --interval {likely_interval} or larger",
                    "hint:".yellow().bold()
                );
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), SampleError> {
    match cli.command {
        Commands::Sample {
            video,
            out,
            interval,
            start_time,
            duration_ratio,
        } => sample(video, out, interval, start_time, duration_ratio),
        Commands::Probe { video, json } => probe(video, json),
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
            Ok(())
        }
    }
}

fn sample(
    video: PathBuf,
    out: PathBuf,
    interval: f64,
    start_time: Option<i64>,
    duration_ratio: f64,
) -> Result<(), SampleError> {
    let mut options = SampleOptions::new(interval).with_duration_ratio(duration_ratio);
    if let Some(milliseconds) = start_time {
        options = options.with_start_time_ms(milliseconds);
    }

    let spinner = ProgressBar::new_spinner().with_message(format!(
        "Sampling {} every {interval}s",
        video.display()
    ));
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("static template is valid"),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));

    let result = VideoSampler::new().sample(&video, &out, &options);
    spinner.finish_and_clear();
    let summary = result?;

    if summary.skipped_extraction {
        println!(
            "{} frames already present in {}, extraction skipped",
            "note:".yellow().bold(),
            out.display(),
        );
    } else {
        println!(
            "Extracted {} frames at {:.6} fps",
            summary.frames_extracted,
            summary.resolved_rate.unwrap_or_default(),
        );
    }
    println!(
        "Sequence starts at {}",
        summary.start_time.format("%Y-%m-%d %H:%M:%S%.6f UTC"),
    );

    if summary.report.is_complete() {
        println!(
            "{} {} frames stamped",
            "ok:".green().bold(),
            summary.report.written,
        );
    } else {
        println!("{} {}", "partial:".yellow().bold(), summary.report);
    }
    Ok(())
}

fn probe(video: PathBuf, as_json: bool) -> Result<(), SampleError> {
    let probe = FfmpegProber.probe(&video)?;

    if as_json {
        let value = json!({
            "duration_seconds": probe.duration,
            "frame_count": probe.frame_count,
            "frame_rate": probe.frame_rate,
            "creation_time": probe.creation_time,
            "meta_duration_seconds": probe.meta_duration,
        });
        println!("{}", serde_json::to_string_pretty(&value).expect("probe serializes"));
        return Ok(());
    }

    println!("{}", video.display().to_string().bold());
    println!("  duration:      {:.3}s", probe.duration);
    println!("  frames:        {}", probe.frame_count);
    println!("  frame rate:    {:.3} fps", probe.frame_rate);
    println!(
        "  creation time: {}",
        probe.creation_time.as_deref().unwrap_or("(none)"),
    );
    match probe.meta_duration {
        Some(meta) => println!("  meta duration: {meta:.3}s"),
        None => println!("  meta duration: (no meta stream)"),
    }
    Ok(())
}
