mod cli;
mod core;

use clap::{Parser, Subcommand};

use crate::cli::stats_cmd::StatsOverrides;
use crate::core::config::AppConfig;
use crate::core::i18n::Lang;
use crate::core::kind::ResourceKind;

#[derive(Parser)]
#[command(name = "bobo-stats", about = "AWS queue, table and cost reports for chat", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text|json)
    #[arg(short, long, global = true)]
    format: Option<String>,

    /// Shorthand for --format json
    #[arg(short = 'j', long = "json", global = true)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Reply language (en|ja)
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Chart service endpoint for single-resource reports
    #[arg(long, global = true)]
    chart_endpoint: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
struct StatsArgs {
    /// Substring of the resource name; an exact name selects one resource
    query: Option<String>,

    /// Match count above which only names are listed
    #[arg(long)]
    max_border: Option<usize>,

    /// Metric to fetch for a single resource (repeatable)
    #[arg(short, long = "metric")]
    metrics: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// SQS queue stats
    Sqs(StatsArgs),
    /// DynamoDB table stats
    #[command(alias = "ddb")]
    Dynamodb(StatsArgs),
    /// Estimated AWS costs for one day
    Cost {
        /// Day to report (YYYY-MM-DD, default: yesterday in UTC)
        date: Option<String>,

        /// Billed service to break out (repeatable)
        #[arg(short, long = "service")]
        services: Vec<String>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Generate default config file
    Init,
    /// Validate config file
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("{}, using defaults", e);
            AppConfig::default()
        }
    };

    let output_opts = cli::output::OutputOptions {
        format: if cli.json {
            cli::output::OutputFormat::Json
        } else {
            cli::output::OutputFormat::from_name(
                cli.format
                    .as_deref()
                    .unwrap_or(&config.settings.default_format),
            )
        },
        pretty: cli.pretty,
        use_color: cli::output::detect_color(!cli.no_color, &config.settings.color),
        verbose: cli.verbose,
    };

    let lang = match cli.lang.as_deref() {
        Some(code) => Lang::from_code(code),
        None => config.lang(),
    };

    let failed = match cli.command {
        Commands::Sqs(args) => {
            run_stats(ResourceKind::Queue, args, cli.chart_endpoint, &config, lang, &output_opts)
                .await?
        }
        Commands::Dynamodb(args) => {
            run_stats(ResourceKind::Table, args, cli.chart_endpoint, &config, lang, &output_opts)
                .await?
        }
        Commands::Cost { date, services } => {
            cli::cost_cmd::run(date, services, &config, lang, &output_opts).await?
        }
        Commands::Config { action } => {
            match action {
                ConfigAction::Init => cli::config_cmd::init(&output_opts)?,
                ConfigAction::Check => cli::config_cmd::check(&output_opts)?,
            }
            false
        }
    };

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_stats(
    kind: ResourceKind,
    args: StatsArgs,
    chart_endpoint: Option<String>,
    config: &AppConfig,
    lang: Lang,
    opts: &cli::output::OutputOptions,
) -> anyhow::Result<bool> {
    let overrides = StatsOverrides {
        max_border: args.max_border,
        metrics: args.metrics,
        chart_endpoint,
    };
    cli::stats_cmd::run(kind, args.query, &overrides, config, lang, opts).await
}
