//! Position Calculator CLI
//!
//! Sizes a trade from the accepted loss, stop-loss distance and fees, and
//! prints margin, take-profit levels and P&L in German or US number format.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info, Level};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::FmtSubscriber;

use position_calc::{
    parse_number, CalculationInput, FeeSide, Language, NumberLocale, PositionCalculator,
    Settings, Summary, TakeProfitMode, TradeDirection, MAX_LEVERAGE, MIN_LEVERAGE,
};

/// Position sizing calculator CLI.
#[derive(Parser)]
#[command(name = "poscalc")]
#[command(about = "Size positions by accepted loss, stop distance and fees", long_about = None)]
struct Cli {
    /// Settings file path (defaults to the user config directory)
    #[arg(long, env = "POSCALC_SETTINGS")]
    settings: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate position size, stop/target prices and P&L
    Calc(CalcArgs),

    /// Show stored settings, or change them
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args)]
struct CalcArgs {
    /// Trade direction (long, short)
    #[arg(short, long, default_value = "long")]
    direction: TradeDirection,

    /// Entry price
    #[arg(short, long, allow_hyphen_values = true)]
    entry: String,

    /// Maximum accepted loss at the stop, fees included
    #[arg(short, long, allow_hyphen_values = true)]
    max_loss: String,

    /// Stop-loss distance in percent of the entry price
    #[arg(short, long, allow_hyphen_values = true)]
    stop_loss: String,

    /// Leverage (1-125), defaults to the stored value
    #[arg(short = 'x', long)]
    leverage: Option<u32>,

    /// Fee tier of the entry order (maker, taker)
    #[arg(long, default_value = "taker")]
    entry_side: FeeSide,

    /// Fee tier of the exit order (maker, taker)
    #[arg(long, default_value = "taker")]
    exit_side: FeeSide,

    /// How take-profit targets are given (r-multiple, percent)
    #[arg(long, default_value = "r-multiple")]
    tp_mode: TakeProfitMode,

    /// First take-profit target (R or %)
    #[arg(long, allow_hyphen_values = true)]
    tp1: Option<String>,

    /// Second take-profit target (R or %)
    #[arg(long, allow_hyphen_values = true)]
    tp2: Option<String>,

    /// Third take-profit target (R or %)
    #[arg(long, allow_hyphen_values = true)]
    tp3: Option<String>,

    /// Number format for input and output (german, us), defaults to the stored value
    #[arg(short, long)]
    format: Option<NumberLocale>,

    /// Print the input and result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Update stored settings
    Set {
        /// Maker fee in percent
        #[arg(long)]
        maker: Option<String>,

        /// Taker fee in percent
        #[arg(long)]
        taker: Option<String>,

        /// Number format (german, us)
        #[arg(long)]
        format: Option<NumberLocale>,

        /// Interface language (german, english)
        #[arg(long)]
        language: Option<Language>,

        /// Default leverage (1-125)
        #[arg(long)]
        leverage: Option<u32>,
    },

    /// Restore default settings
    Reset,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(log_level).into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let settings_path = cli.settings.unwrap_or_else(Settings::default_path);
    let settings = Settings::load(&settings_path)?;

    match cli.command {
        Commands::Calc(args) => run_calc(args, &settings)?,

        Commands::Config { action: None } => print_config(&settings, &settings_path),

        Commands::Config {
            action:
                Some(ConfigAction::Set {
                    maker,
                    taker,
                    format,
                    language,
                    leverage,
                }),
        } => {
            let mut updated = settings.clone();
            if let Some(format) = format {
                updated.number_format = format;
            }
            let locale = updated.number_format;

            if let Some(text) = maker {
                updated.fees.maker_fee_percent = parse_fee("maker fee", &text, locale)?;
            }
            if let Some(text) = taker {
                updated.fees.taker_fee_percent = parse_fee("taker fee", &text, locale)?;
            }
            if let Some(language) = language {
                updated.language = language;
            }
            if let Some(leverage) = leverage {
                if !(MIN_LEVERAGE..=MAX_LEVERAGE).contains(&leverage) {
                    anyhow::bail!(
                        "Leverage must be between {} and {} (got {})",
                        MIN_LEVERAGE,
                        MAX_LEVERAGE,
                        leverage
                    );
                }
                updated.leverage = leverage;
            }

            updated.save(&settings_path)?;
            print_config(&updated, &settings_path);
        }

        Commands::Config {
            action: Some(ConfigAction::Reset),
        } => {
            let defaults = Settings::default();
            defaults.save(&settings_path)?;
            println!("Settings reset to defaults.");
            print_config(&defaults, &settings_path);
        }
    }

    Ok(())
}

fn run_calc(args: CalcArgs, settings: &Settings) -> Result<()> {
    let locale = args.format.unwrap_or(settings.number_format);
    let number = |label: &str, text: &str| -> Result<Decimal> {
        parse_number(text, locale).with_context(|| format!("Invalid {}", label))
    };

    let entry_price = number("entry price", &args.entry)?;
    let max_loss = number("max loss", &args.max_loss)?;
    let stop_loss_percent = number("stop-loss percent", &args.stop_loss)?;

    let mut targets = args.tp_mode.default_targets();
    let given = [&args.tp1, &args.tp2, &args.tp3];
    for (i, (target, text)) in targets.iter_mut().zip(given).enumerate() {
        if let Some(text) = text {
            *target = number(&format!("take-profit target {}", i + 1), text)?;
        }
    }

    let (entry_fee, exit_fee) = settings.fees.resolve(args.entry_side, args.exit_side);
    let leverage = args.leverage.unwrap_or(settings.leverage);

    let input = CalculationInput::new(args.direction, entry_price, max_loss, stop_loss_percent)
        .with_leverage(leverage)
        .with_fees(entry_fee, exit_fee)
        .with_take_profit(args.tp_mode, targets);
    debug!(?input, "Calculating position");

    let result = PositionCalculator::calculate(&input)?;
    info!(
        nominal = %result.nominal_value,
        margin = %result.margin_required,
        "Position calculated"
    );

    if args.json {
        let output = serde_json::json!({ "input": input, "result": result });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", Summary::new(&input, &result, locale));
    }

    Ok(())
}

fn parse_fee(label: &str, text: &str, locale: NumberLocale) -> Result<Decimal> {
    let fee = parse_number(text, locale).with_context(|| format!("Invalid {}", label))?;
    if fee < Decimal::ZERO {
        anyhow::bail!("{} must not be negative (got {})", label, fee);
    }
    Ok(fee)
}

fn print_config(settings: &Settings, path: &Path) {
    let locale = settings.number_format;
    let fee = |value| position_calc::format_number(value, 3, locale);

    println!("\n=== Calculator Settings ===\n");
    println!("File:           {}", path.display());
    println!("Maker Fee:      {}%", fee(settings.fees.maker_fee_percent));
    println!("Taker Fee:      {}%", fee(settings.fees.taker_fee_percent));
    println!("Number Format:  {}", settings.number_format);
    println!("Language:       {}", settings.language);
    println!("Leverage:       {}×", settings.leverage);
}
