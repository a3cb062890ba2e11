//! poremetrics CLI - pore-structure metric extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use poremetrics::detect::detect_report_from_path;
use poremetrics::{
    load_input, render, AnalysisTally, ExtractionResult, Extractor, JsonFormat, PoreMetrics,
    ReportInput, SurfaceAreaLabel, WindowShape,
};

#[derive(Parser)]
#[command(name = "poremetrics")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract BET surface areas, pore volumes and NLDFT D10/D90 from adsorption reports", long_about = None)]
struct Cli {
    /// Input report (extracted text, or a .json grid document)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Match keywords as whole words only
    #[arg(long, global = true)]
    strict: bool,

    /// Distance discount for anchors after the reference position
    #[arg(long, global = true, value_name = "FACTOR")]
    discount: Option<f64>,

    /// Shape of the value search window around an anchor
    #[arg(long, global = true, value_enum)]
    window: Option<WindowMode>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one report
    #[command(alias = "a")]
    Analyze {
        /// Input report (extracted text, or a .json grid document)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output the full result as JSON
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,

        /// Also write the distribution series as CSV
        #[arg(long, value_name = "PATH")]
        csv: Option<PathBuf>,
    },

    /// Analyze many reports in parallel
    Batch {
        /// Input reports
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Directory for one JSON result per report
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Print the tally as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which report sections a file contains
    Info {
        /// Input report
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum WindowMode {
    /// Half the window on each side of the anchor (default)
    Centered,
    /// Half before the anchor, the full window after it
    Trailing,
}

impl From<WindowMode> for WindowShape {
    fn from(mode: WindowMode) -> Self {
        match mode {
            WindowMode::Centered => WindowShape::Centered,
            WindowMode::Trailing => WindowShape::Trailing,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let extractor = build_extractor(&cli);

    let result = match cli.command {
        Some(Commands::Analyze {
            input,
            output,
            json,
            compact,
            csv,
        }) => cmd_analyze(
            &extractor,
            &input,
            output.as_deref(),
            output_format(json, compact),
            csv.as_deref(),
        ),
        Some(Commands::Batch {
            inputs,
            output,
            json,
        }) => cmd_batch(&extractor, &inputs, output.as_deref(), json),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: analyze if input is provided
            if let Some(input) = cli.input {
                cmd_analyze(&extractor, &input, None, None, None)
            } else {
                println!("{}", "Usage: poremetrics <FILE>".yellow());
                println!("       poremetrics --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_extractor(cli: &Cli) -> Extractor {
    let mut builder = PoreMetrics::new();
    if cli.strict {
        builder = builder.strict_keywords();
    }
    if let Some(discount) = cli.discount {
        builder = builder.with_discount(discount);
    }
    if let Some(window) = cli.window {
        builder = builder.with_window_shape(window.into());
    }
    builder.build()
}

fn output_format(json: bool, compact: bool) -> Option<JsonFormat> {
    match (json, compact) {
        (false, _) => None,
        (true, false) => Some(JsonFormat::Pretty),
        (true, true) => Some(JsonFormat::Compact),
    }
}

fn cmd_analyze(
    extractor: &Extractor,
    input: &Path,
    output: Option<&Path>,
    json: Option<JsonFormat>,
    csv: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = load_input(input)?;
    let result = extractor.extract(&report);
    log::debug!(
        "{}: success={} samples={}",
        input.display(),
        result.success,
        result.distribution.len()
    );

    let rendered = match json {
        Some(format) => render::to_json(&result, format)?,
        None => render::to_text(&result)?,
    };

    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else if json.is_some() {
        println!("{}", rendered);
    } else {
        print_summary(input, &result, &rendered);
    }

    if let Some(path) = csv {
        render::write_csv(&result.distribution, path)?;
        println!(
            "{} {} ({} samples)",
            "Saved to".green(),
            path.display(),
            result.distribution.len()
        );
    }

    if result.success {
        Ok(())
    } else {
        Err(result.error_message().into())
    }
}

fn print_summary(input: &Path, result: &ExtractionResult, rendered: &str) {
    println!("{}", "Pore Structure Report".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    if !result.success {
        return;
    }

    let resolved = result.scalars.surface_areas.resolved_count();
    println!(
        "{}: {}/{}",
        "Surface areas".bold(),
        resolved,
        SurfaceAreaLabel::ALL.len()
    );
    println!();
    println!("{}", rendered);
}

fn cmd_batch(
    extractor: &Extractor,
    inputs: &[PathBuf],
    output: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = output {
        fs::create_dir_all(dir)?;
    }

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("Analyzing...");

    let outcomes: Vec<(PathBuf, Result<ExtractionResult, String>)> = inputs
        .par_iter()
        .map(|path| {
            let outcome = load_input(path)
                .map(|report: ReportInput| extractor.extract(&report))
                .map_err(|e| e.to_string());
            pb.inc(1);
            (path.clone(), outcome)
        })
        .collect();

    pb.finish_with_message("Done!");

    let mut tally = AnalysisTally::new();
    for (path, outcome) in &outcomes {
        match outcome {
            Ok(result) => {
                tally = tally.record(result, Utc::now());
                if let Some(dir) = output {
                    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
                    let json = render::to_json(result, JsonFormat::Pretty)?;
                    fs::write(dir.join(format!("{}.json", stem)), json)?;
                }
                if result.success {
                    println!(
                        "  {} {}  D10 {:.4}  D90 {:.4}  ratio {:.4}",
                        "✓".green(),
                        path.display(),
                        result.metrics.d10,
                        result.metrics.d90,
                        result.metrics.d90_d10_ratio
                    );
                } else {
                    println!(
                        "  {} {}  {}",
                        "✗".red(),
                        path.display(),
                        result.error_message().dimmed()
                    );
                }
            }
            Err(message) => {
                println!("  {} {}  {}", "!".yellow(), path.display(), message.dimmed());
            }
        }
    }

    println!();
    if json {
        println!("{}", serde_json::to_string_pretty(&tally)?);
    } else {
        println!("{}", "Tally".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}: {}", "Succeeded".bold(), tally.total_analysis_count);
        println!("{}: {}", "Failed".bold(), tally.failed_count);
        let unreadable = outcomes.iter().filter(|(_, o)| o.is_err()).count();
        if unreadable > 0 {
            println!("{}: {}", "Unreadable".bold(), unreadable);
        }
        if let Some(at) = tally.last_updated {
            println!("{}: {}", "Last updated".bold(), at.to_rfc3339());
        }
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let profile = detect_report_from_path(input)?;

    println!("{}", "Report Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), profile.format);
    println!("{}: {}", "Report".bold(), yes_no(profile.is_report));

    println!();
    println!("{}", "Sections".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Surface areas".bold(), yes_no(profile.has_surface_section));
    println!(
        "{}: {}",
        "NLDFT table".bold(),
        yes_no(profile.has_distribution_table)
    );
    println!(
        "{}: {}",
        "Total pore volume".bold(),
        yes_no(profile.has_total_pore_volume)
    );
    println!(
        "{}: {}",
        "Pore volume percentages".bold(),
        yes_no(profile.has_percentage_section)
    );
    println!(
        "{}: {}",
        "Most-probable diameter".bold(),
        yes_no(profile.has_most_probable_diameter)
    );

    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn cmd_version() {
    println!("{} {}", "poremetrics".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Pore-structure metric extraction tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/poremetrics".dimmed());
    println!("License: MIT");
}
