use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, ValueEnum};

use finsight::{
    AnalysisConfig, Dashboard, Error, Goal, format_currency, format_percentage,
    import::load_transactions, parse_goals_json, setup_logging,
};

/// Summarise transactions and savings goals for the finance dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the transactions, either CSV (`.csv`) or JSON.
    #[arg(long)]
    transactions: PathBuf,

    /// File path to the savings goals as JSON.
    #[arg(long)]
    goals: Option<PathBuf>,

    /// File path to a JSON config for the analysis.
    #[arg(long)]
    config: Option<PathBuf>,

    /// How to print the dashboard.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log more detail, repeat for debug logs.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// A plain text report.
    Text,
    /// The dashboard data as JSON.
    Json,
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.verbose);

    match run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String, Error> {
    let config = match &args.config {
        Some(path) => AnalysisConfig::from_path(path)?,
        None => AnalysisConfig::default(),
    };

    let report = load_transactions(&args.transactions)?;
    for error in &report.errors {
        tracing::warn!("Skipping transaction: {error}");
    }

    let goals = match &args.goals {
        Some(path) => load_goals(path)?,
        None => Vec::new(),
    };

    let dashboard = Dashboard::build(&report.transactions, &goals, &config);

    match args.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&dashboard)?),
        OutputFormat::Text => Ok(render_text(&dashboard, &config)),
    }
}

fn load_goals(path: &Path) -> Result<Vec<Goal>, Error> {
    let goals = parse_goals_json(&fs::read_to_string(path)?)?;

    for goal in &goals {
        if let Err(error) = goal.validate() {
            tracing::warn!("{error}");
        }
    }

    tracing::info!("Loaded {} goals from {}", goals.len(), path.display());
    Ok(goals)
}

fn render_text(dashboard: &Dashboard, config: &AnalysisConfig) -> String {
    let currency = |amount: f64| format_currency(amount, &config.currency_symbol);
    let summary = &dashboard.summary;

    let mut lines = vec![
        "Summary".to_owned(),
        format!("  Total income:    {}", currency(summary.total_income)),
        format!("  Total expenses:  {}", currency(summary.total_expense)),
        format!("  Net savings:     {}", currency(summary.net_savings)),
        format!("  Savings rate:    {}", format_percentage(summary.savings_rate)),
    ];

    if dashboard.has_chart_data() {
        lines.push(String::new());
        lines.push("Income vs expenses".to_owned());
        for bucket in &dashboard.daily {
            lines.push(format!(
                "  {} {}  income {}  expenses {}",
                bucket.label(),
                bucket.date.year(),
                currency(bucket.income),
                currency(bucket.expense)
            ));
        }

        if !dashboard.categories.is_empty() {
            lines.push(String::new());
            lines.push("Spending by category".to_owned());
            for share in &dashboard.categories {
                lines.push(format!(
                    "  {:<24} {:>14} {:>7}",
                    share.category,
                    currency(share.amount),
                    format_percentage(share.percent_of_total)
                ));
            }
        }
    }

    lines.push(String::new());
    lines.push("Savings goals".to_owned());
    if dashboard.goals.is_empty() {
        lines.push("  No goals yet.".to_owned());
    }
    for goal in &dashboard.goals {
        lines.push(format!(
            "  {}: {} / {} by {}, {} complete",
            goal.title,
            currency(goal.current_amount),
            currency(goal.target_amount),
            goal.target_date,
            format_percentage(goal.progress.unclamped_percent)
        ));
    }

    for (title, entries) in [
        ("Insights", &dashboard.insights.insights),
        ("Recommendations", &dashboard.insights.recommendations),
    ] {
        if entries.is_empty() {
            continue;
        }

        lines.push(String::new());
        lines.push(title.to_owned());
        lines.extend(entries.iter().map(|entry| format!("  - {entry}")));
    }

    lines.join("\n")
}
