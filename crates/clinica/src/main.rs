use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clinica_core::reports::{
    build_attention_timeline, build_priority_timeline, build_wait_time_report,
};
use clinica_core::ReportConfig;
use clinica_parser::{load_admissions, load_progress_notes, Admission, ProgressNote};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Outpatient and urgent-care wait and attention reports", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Admissions extract (tab-separated, Latin-1)
    #[arg(long, global = true)]
    admissions: Option<PathBuf>,
    /// Progress-note extract (tab-separated, Latin-1)
    #[arg(long, global = true)]
    notes: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Wait from arrival to consultation, with notes written meanwhile and averages
    WaitTimes(WaitTimesArgs),
    /// Per-clinician attention timeline with overlapping patients on separate slots
    AttentionTimeline(TimelineArgs),
    /// Consultation timeline of the priority-urgency service
    PriorityTimeline(TimelineArgs),
}

#[derive(Args, Debug, Default)]
struct WaitTimesArgs {
    /// Keep this clinician's name and replace every other one with a pseudonym
    #[arg(long)]
    visible_clinician: Option<String>,
    /// Also write the report table as a tab-separated file
    #[arg(long)]
    export: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
struct TimelineArgs {
    /// Chart HTML output path
    #[arg(long)]
    output: Option<PathBuf>,
    /// Also write the plotly figure as JSON
    #[arg(long)]
    figure_json: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = ReportConfig::load(cli.config.as_deref())
        .context("failed to load report configuration")?;
    config.apply_env();
    if let Some(path) = cli.admissions {
        config.admissions_path = path;
    }
    if let Some(path) = cli.notes {
        config.notes_path = path;
    }

    match cli.command {
        Command::WaitTimes(args) => handle_wait_times(config, args),
        Command::AttentionTimeline(args) => handle_attention_timeline(&config, args),
        Command::PriorityTimeline(args) => handle_priority_timeline(&config, args),
    }
}

fn load_extracts(config: &ReportConfig) -> Result<(Vec<Admission>, Vec<ProgressNote>)> {
    let admissions = load_admissions(&config.admissions_path).with_context(|| {
        format!(
            "failed to load admissions from {}",
            config.admissions_path.display()
        )
    })?;
    let notes = load_progress_notes(&config.notes_path).with_context(|| {
        format!(
            "failed to load progress notes from {}",
            config.notes_path.display()
        )
    })?;
    Ok((admissions, notes))
}

fn handle_wait_times(mut config: ReportConfig, args: WaitTimesArgs) -> Result<()> {
    if let Some(name) = args.visible_clinician {
        config.visible_clinician = Some(name);
    }
    let (admissions, notes) = load_extracts(&config)?;
    let report = build_wait_time_report(&admissions, &notes, &config)?;

    let table = report.table();
    println!("{}", table.render());

    println!("\nPROMEDIO GENERAL DE MINUTOS DE ESPERA:");
    match report.overall_mean {
        Some(mean) => println!("{mean}"),
        None => println!("sin datos"),
    }

    println!("\nPROMEDIO DE MINUTOS DE ESPERA POR MÉDICO:");
    println!("{}", report.averages_table().render());

    if let Some(path) = args.export {
        table
            .export_tsv(&path)
            .with_context(|| format!("failed to export report to {}", path.display()))?;
        info!(path = %path.display(), rows = table.len(), "exported wait-time report");
    }

    Ok(())
}

fn handle_attention_timeline(config: &ReportConfig, args: TimelineArgs) -> Result<()> {
    let (admissions, notes) = load_extracts(config)?;
    let timeline = build_attention_timeline(&admissions, &notes, config)?;

    println!("{}", timeline.lane_table().render());
    write_chart(
        &timeline.chart(),
        args.output
            .unwrap_or_else(|| PathBuf::from("attention_timeline.html")),
        args.figure_json,
    )
}

fn handle_priority_timeline(config: &ReportConfig, args: TimelineArgs) -> Result<()> {
    let (admissions, notes) = load_extracts(config)?;
    let timeline = build_priority_timeline(&admissions, &notes, config);

    println!("{}", timeline.table().render());
    write_chart(
        &timeline.chart(),
        args.output
            .unwrap_or_else(|| PathBuf::from("priority_timeline.html")),
        args.figure_json,
    )
}

fn write_chart(
    chart: &clinica_core::chart::TimelineChart,
    output: PathBuf,
    figure_json: Option<PathBuf>,
) -> Result<()> {
    chart
        .write_html(&output)
        .with_context(|| format!("failed to write chart to {}", output.display()))?;
    info!(path = %output.display(), bars = chart.bars.len(), "wrote timeline chart");
    println!("Chart written to {}", output.display());

    if let Some(path) = figure_json {
        chart
            .write_figure_json(&path)
            .with_context(|| format!("failed to write figure JSON to {}", path.display()))?;
        info!(path = %path.display(), "wrote figure JSON");
    }
    Ok(())
}
