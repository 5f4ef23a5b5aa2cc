//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the forecast pipeline
//! - prints the summary, trend equations, and optional table/preview
//! - writes the SVG chart and optional exports

use clap::Parser;

use crate::chart::TrendChart;
use crate::cli::{Command, RunArgs, SampleArgs};
use crate::data::SampleConfig;
use crate::domain::{ForecastConfig, SeriesKind, TrendFile, TrendSeries};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `fxt` binary.
pub fn run() -> Result<(), AppError> {
    // We want `fxt` and `fxt --ascii` to behave like `fxt run ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_run(args, OutputMode::Full),
        Command::Table(args) => handle_run(args, OutputMode::TableOnly),
        Command::Sample(args) => handle_sample(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    TableOnly,
}

fn handle_run(args: RunArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = forecast_config_from_args(&args);
    let run = pipeline::run_forecast(&config)?;

    // Print terminal output.
    match mode {
        OutputMode::Full => {
            println!("{}", crate::report::format_run_summary(&run, &config));
            println!(
                "{}",
                crate::report::format_trend_equation(SeriesKind::Buy, &run.buy_trend)
            );
            println!(
                "{}",
                crate::report::format_trend_equation(SeriesKind::Sell, &run.sell_trend)
            );
        }
        OutputMode::TableOnly => {
            print!("{}", crate::report::format_monthly_table(&run.merged));
        }
    }

    if mode == OutputMode::Full && config.ascii {
        println!();
        print!(
            "{}",
            crate::plot::render_ascii_chart(&run.merged, config.ascii_width, config.ascii_height)
        );
    }

    if mode == OutputMode::Full && config.chart {
        let chart = TrendChart::from_points(&run.merged, &config);
        chart.render_svg(&config.chart_path, (config.chart_width, config.chart_height))?;
        println!("\nChart written to {}", config.chart_path.display());
    }

    // Optional exports.
    if let Some(path) = &config.export_table {
        crate::io::export::write_table_csv(path, &run.merged)?;
    }
    if let Some(path) = &config.export_trend {
        let trend = TrendFile {
            tool: "fxt".to_string(),
            cutoff: config.cutoff,
            forecast_start: config.forecast_start,
            forecast_end: config.forecast_end,
            buy: TrendSeries {
                fit: run.buy_trend,
                points: run.buy_points.clone(),
            },
            sell: TrendSeries {
                fit: run.sell_trend,
                points: run.sell_points.clone(),
            },
        };
        crate::io::trend::write_trend_json(path, &trend)?;
    }

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        out: args.out,
        start: args.start,
        end: args.end,
        seed: args.seed,
        start_level: args.start_level,
        drift: args.drift,
        vol: args.vol,
        spread: args.spread,
        gap_prob: args.gap_prob,
        blank_prob: args.blank_prob,
    };
    let rows = crate::data::write_sample_csv(&config)?;
    println!("Wrote {rows} rows to {}", config.out.display());
    Ok(())
}

pub fn forecast_config_from_args(args: &RunArgs) -> ForecastConfig {
    ForecastConfig {
        input_path: args.input.clone(),
        cutoff: args.cutoff,
        forecast_start: args.forecast_start,
        forecast_end: args.forecast_end,
        chart_path: args.chart.clone(),
        chart: !args.no_chart,
        chart_width: args.width,
        chart_height: args.height,
        y_min: args.y_min,
        y_max: args.y_max,
        title: args.title.clone(),
        annotation_symbol: args.symbol.clone(),
        ascii: args.ascii,
        ascii_width: args.ascii_width,
        ascii_height: args.ascii_height,
        export_table: args.export_table.clone(),
        export_trend: args.export_trend.clone(),
    }
}

/// Rewrite argv so `fxt` defaults to `fxt run`.
///
/// Rules:
/// - `fxt`                      -> `fxt run`
/// - `fxt --ascii ...`          -> `fxt run --ascii ...`
/// - `fxt --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "table" | "sample");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "run flags".
    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
