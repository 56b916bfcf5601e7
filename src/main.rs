use aggregator::{BreakdownEntry, ChartConfig, ChartPoint, Dimension, Metric, breakdown};
use analytics::{AnalyticsEngine, WagerMetrics, consolidate_units};
use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use core_types::WagerLeg;
use ranking::{RankedStrategy, RankingScorer, StrategySnapshot};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// The main entry point for the WagerLens analytics CLI.
fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; WAGERLENS_* overrides are optional.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = configuration::load_config().context("Failed to load configuration")?;
    let _guard = configuration::init_tracing(&config.logging)
        .context("Failed to initialise logging")?;

    match cli.command {
        Commands::Metrics(args) => handle_metrics(args),
        Commands::Breakdown(args) => handle_breakdown(args),
        Commands::Chart(args) => handle_chart(args),
        Commands::Rank(args) => {
            let scorer = RankingScorer::new(config.ranking)?;
            handle_rank(args, &scorer)
        }
        Commands::Catalog(args) => handle_catalog(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Performance analytics for a sports-betting wager history.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summary metrics for a wager snapshot.
    Metrics(MetricsArgs),
    /// Group consolidated wagers by one dimension.
    Breakdown(BreakdownArgs),
    /// Reduce raw legs to one metric per bucket of a dimension.
    Chart(ChartArgs),
    /// Score and order marketplace strategies.
    Rank(RankArgs),
    /// List the available dimensions and metrics.
    Catalog(CatalogArgs),
}

#[derive(Parser)]
struct MetricsArgs {
    /// JSON file containing an array of wager legs.
    #[arg(long)]
    input: PathBuf,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct BreakdownArgs {
    /// JSON file containing an array of wager legs.
    #[arg(long)]
    input: PathBuf,

    #[arg(long, value_enum)]
    dimension: Dimension,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ChartArgs {
    /// JSON file containing an array of wager legs.
    #[arg(long)]
    input: PathBuf,

    #[arg(long, value_enum)]
    dimension: Dimension,

    #[arg(long, value_enum)]
    metric: Metric,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct RankArgs {
    /// JSON file containing an array of strategy snapshots.
    #[arg(long)]
    input: PathBuf,

    /// Reference time for longevity (RFC 3339). Defaults to now.
    #[arg(long)]
    now: Option<DateTime<Utc>>,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct CatalogArgs {
    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_metrics(args: MetricsArgs) -> anyhow::Result<()> {
    let legs: Vec<WagerLeg> = read_json(&args.input)?;
    let units = consolidate_units(&legs);
    let metrics = AnalyticsEngine::new().calculate(&units).rounded();

    if args.json {
        return print_json(&metrics);
    }
    println!("{}", metrics_table(&metrics));
    Ok(())
}

fn handle_breakdown(args: BreakdownArgs) -> anyhow::Result<()> {
    let legs: Vec<WagerLeg> = read_json(&args.input)?;
    let units = consolidate_units(&legs);
    let entries = breakdown(&units, args.dimension);

    if args.json {
        return print_json(&entries);
    }
    println!("{}", breakdown_table(args.dimension, &entries));
    Ok(())
}

fn handle_chart(args: ChartArgs) -> anyhow::Result<()> {
    let legs: Vec<WagerLeg> = read_json(&args.input)?;
    let config = ChartConfig {
        dimension: args.dimension,
        metric: args.metric,
    };
    let points = config.apply(&legs);

    if args.json {
        return print_json(&points);
    }
    println!("{}", chart_table(&config, &points));
    Ok(())
}

fn handle_rank(args: RankArgs, scorer: &RankingScorer) -> anyhow::Result<()> {
    let strategies: Vec<StrategySnapshot> = read_json(&args.input)?;
    let now = args.now.unwrap_or_else(Utc::now);
    let ranked = scorer.rank(strategies, now);

    if args.json {
        return print_json(&ranked);
    }
    println!("{}", ranking_table(&ranked));
    Ok(())
}

#[derive(Serialize)]
struct CatalogEntry {
    kind: &'static str,
    key: &'static str,
    label: &'static str,
}

fn handle_catalog(args: CatalogArgs) -> anyhow::Result<()> {
    let entries: Vec<CatalogEntry> = Dimension::ALL
        .iter()
        .map(|d| CatalogEntry {
            kind: "dimension",
            key: d.key(),
            label: d.label(),
        })
        .chain(Metric::ALL.iter().map(|m| CatalogEntry {
            kind: "metric",
            key: m.key(),
            label: m.label(),
        }))
        .collect();

    if args.json {
        return print_json(&entries);
    }
    let mut table = new_table();
    table.set_header(vec!["Kind", "Key", "Label"]);
    for entry in &entries {
        table.add_row(vec![entry.kind, entry.key, entry.label]);
    }
    println!("{table}");
    Ok(())
}

// ==============================================================================
// I/O Helpers
// ==============================================================================

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    tracing::debug!(path = %path.display(), "Loaded input file.");
    Ok(value)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn metrics_table(metrics: &WagerMetrics) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Metric", "Value"]);
    let rows = [
        ("Total Bets", metrics.total_bets.to_string()),
        ("Straight Bets", metrics.straight_count.to_string()),
        ("Parlays", metrics.parlay_count.to_string()),
        ("Void Legs", metrics.void_count.to_string()),
        ("Wins", metrics.wins.to_string()),
        ("Losses", metrics.losses.to_string()),
        ("Win Rate", format!("{}%", metrics.win_rate)),
        ("Total Profit", metrics.total_profit.to_string()),
        ("Total Staked", metrics.total_stake.to_string()),
        ("ROI", format!("{}%", metrics.roi)),
        ("Average Stake", metrics.avg_stake.to_string()),
        ("Biggest Win", metrics.biggest_win.to_string()),
        ("Biggest Loss", metrics.biggest_loss.to_string()),
        (
            "Current Streak",
            format!("{} {}", metrics.current_streak, metrics.streak_type.as_str()),
        ),
    ];
    for (name, value) in rows {
        table.add_row(vec![name.to_string(), value]);
    }
    table
}

fn breakdown_table(dimension: Dimension, entries: &[BreakdownEntry]) -> Table {
    let mut table = new_table();
    table.set_header(vec![dimension.label(), "Bets", "Wins", "Win Rate", "Profit", "Staked", "ROI"]);
    for entry in entries {
        table.add_row(vec![
            entry.key.clone(),
            entry.count.to_string(),
            entry.wins.to_string(),
            format!("{}%", entry.win_rate().round_dp(2)),
            entry.profit.round_dp(2).to_string(),
            entry.staked.round_dp(2).to_string(),
            format!("{}%", entry.roi().round_dp(2)),
        ]);
    }
    table
}

fn chart_table(config: &ChartConfig, points: &[ChartPoint]) -> Table {
    let mut table = new_table();
    table.set_header(vec![config.dimension.label(), config.metric.label(), "Legs"]);
    for point in points {
        table.add_row(vec![
            point.label.clone(),
            point.value.round_dp(2).to_string(),
            point.count.to_string(),
        ]);
    }
    table
}

fn ranking_table(ranked: &[RankedStrategy]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "#", "Strategy", "Score", "ROI", "Win Rate", "Volume", "Longevity", "Subscribers",
    ]);
    for entry in ranked {
        let name = if entry.name.is_empty() {
            entry.strategy_id.clone()
        } else {
            entry.name.clone()
        };
        let s = &entry.score;
        table.add_row(vec![
            entry.rank.to_string(),
            name,
            s.total.to_string(),
            s.roi_score.round_dp(2).to_string(),
            s.winrate_score.round_dp(2).to_string(),
            s.volume_score.round_dp(2).to_string(),
            s.longevity_score.round_dp(2).to_string(),
            s.subscriber_score.round_dp(2).to_string(),
        ]);
    }
    table
}
