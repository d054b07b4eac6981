mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rmc",
    version,
    about = "Moisture correction and batch consumption checks for ready-mix concrete"
)]
struct Cli {
    /// Log debug detail to stderr (RMC_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Correct trial mix recipes for measured aggregate moisture
    Correct {
        /// Recipe book JSON file
        #[arg(short, long, env = "RMC_RECIPES", value_name = "FILE")]
        recipes: PathBuf,

        /// Trial mix number(s) to correct
        #[arg(short, long = "tm", value_name = "TM", required = true)]
        tm: Vec<String>,

        /// Sand moisture (%)
        #[arg(long, default_value = "")]
        sand: String,

        /// 10mm aggregate moisture (%)
        #[arg(long = "ten", default_value = "")]
        ten_mm: String,

        /// 20mm aggregate moisture (%)
        #[arg(long = "twenty", default_value = "")]
        twenty_mm: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Decimal places in the table
        #[arg(long, default_value_t = 2)]
        precision: u32,

        /// Also list components with zero weight
        #[arg(long)]
        show_zero: bool,
    },
    /// Compare a weighed net mass against the theoretical batch mass
    Deviation {
        #[arg(short, long, env = "RMC_RECIPES", value_name = "FILE")]
        recipes: PathBuf,

        #[arg(short, long = "tm", value_name = "TM")]
        tm: String,

        /// Batched volume (m³)
        #[arg(short, long)]
        quantity: String,

        /// Net weight (kg)
        #[arg(short, long)]
        net: String,

        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Record a weighbridge entry for a transit mixer load
    Weigh {
        #[arg(short, long, env = "RMC_RECIPES", value_name = "FILE")]
        recipes: PathBuf,

        /// Tare weight JSON file
        #[arg(long, env = "RMC_TARES", value_name = "FILE")]
        tares: PathBuf,

        #[arg(short, long = "tm", value_name = "TM")]
        tm: String,

        /// Miller (transit mixer) number
        #[arg(short, long)]
        miller: String,

        /// Batched volume (m³)
        #[arg(short, long)]
        quantity: String,

        /// Gross weight (kg)
        #[arg(short, long)]
        gross: String,

        /// Append the entry to this weightment log
        #[arg(long, value_name = "FILE")]
        log: Option<PathBuf>,

        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Manage miller tare weights
    Tare {
        #[command(subcommand)]
        action: TareAction,
    },
    /// Inspect and prune the weightment log
    Log {
        #[command(subcommand)]
        action: LogAction,
    },
    /// Inspect recipe books
    Recipes {
        #[command(subcommand)]
        action: RecipesAction,
    },
}

#[derive(Subcommand)]
enum TareAction {
    /// Record or update the tare weight of a miller
    Set {
        #[arg(long, env = "RMC_TARES", value_name = "FILE")]
        tares: PathBuf,
        miller: String,
        weight: String,
    },
    /// List recorded tare weights
    List {
        #[arg(long, env = "RMC_TARES", value_name = "FILE")]
        tares: PathBuf,
    },
}

#[derive(Subcommand)]
enum LogAction {
    /// List entries, newest first
    List {
        #[arg(long, value_name = "FILE")]
        log: PathBuf,

        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Delete one or more entries by id
    Delete {
        #[arg(long, value_name = "FILE")]
        log: PathBuf,

        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Subcommand)]
enum RecipesAction {
    /// List the recipes in a book
    List {
        file: PathBuf,
    },
    /// Validate a recipe book file
    Validate {
        file: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("RMC_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Correct {
            recipes,
            tm,
            sand,
            ten_mm,
            twenty_mm,
            output,
            precision,
            show_zero,
        } => commands::correct::run(
            recipes,
            tm,
            [("Sand", sand), ("10mm", ten_mm), ("20mm", twenty_mm)],
            &output,
            precision,
            show_zero,
        ),
        Commands::Deviation {
            recipes,
            tm,
            quantity,
            net,
            output,
        } => commands::weigh::deviation(recipes, &tm, &quantity, &net, &output),
        Commands::Weigh {
            recipes,
            tares,
            tm,
            miller,
            quantity,
            gross,
            log,
            output,
        } => commands::weigh::run(
            recipes, tares, &tm, &miller, &quantity, &gross, log, &output,
        ),
        Commands::Tare { action } => match action {
            TareAction::Set {
                tares,
                miller,
                weight,
            } => commands::tare::set(&tares, &miller, &weight),
            TareAction::List { tares } => commands::tare::list(&tares),
        },
        Commands::Log { action } => match action {
            LogAction::List { log, output } => commands::log::list(&log, &output),
            LogAction::Delete { log, ids } => commands::log::delete(&log, &ids),
        },
        Commands::Recipes { action } => match action {
            RecipesAction::List { file } => commands::recipes::list(&file),
            RecipesAction::Validate { file } => commands::recipes::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
