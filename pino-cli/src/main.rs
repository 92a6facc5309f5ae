use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};

use pino_core::{Entry, ParseOutcome, SettlementRates, aggregate};
use pino_ingest::{parse_expense_text, parse_plain_text};
use pino_report::{
    build_statement, calculation_date, export_all, export_one, render_listing_text,
    render_statement_text, write_listing_csv,
};

mod config;

#[derive(Parser, Debug)]
#[command(name = "pino", version, about = "PINO transportation-expense settlement CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InputFormat {
    /// 【ピノ】-delimited blocks
    Pino,
    /// Legacy `<name>様` section format
    Plain,
}

#[derive(Args, Clone, Copy, Debug)]
struct RateArgs {
    /// Override the configured yen-per-kilometer rate
    #[arg(long)]
    rate_per_km: Option<f64>,

    /// Override the configured daily driving allowance
    #[arg(long)]
    daily_allowance: Option<i64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse pasted expense text and print the entry listing
    Parse {
        /// Input file (reads stdin when omitted)
        input: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "pino")]
        format: InputFormat,

        /// Print the full parse result as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Also write the listing rows to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        #[command(flatten)]
        rates: RateArgs,
    },

    /// Render per-person settlement statements to the terminal
    Report {
        /// Input file (reads stdin when omitted)
        input: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "pino")]
        format: InputFormat,

        /// Only this person's statement
        #[arg(long)]
        person: Option<String>,

        #[command(flatten)]
        rates: RateArgs,
    },

    /// Write per-person statement images (SVG)
    Export {
        /// Input file (reads stdin when omitted)
        input: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "pino")]
        format: InputFormat,

        /// Output directory (defaults to the configured one)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Only this person's statement
        #[arg(long)]
        person: Option<String>,

        /// Abort the batch on the first per-person failure
        #[arg(long)]
        halt_on_error: bool,

        #[command(flatten)]
        rates: RateArgs,
    },

    /// Write a default config file to ~/.pino/config.toml
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = config::load_config()?;

    match cli.command {
        Command::Parse {
            input,
            format,
            json,
            csv,
            rates,
        } => {
            let outcome = parse_to_outcome(input.as_deref(), format, &cfg, rates)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print!("{}", render_listing_text(&outcome.listing()));
            }

            if let Some(path) = csv {
                write_listing_csv(&path, &outcome.listing())?;
                println!("Wrote {}", path.display());
            }
        }

        Command::Report {
            input,
            format,
            person,
            rates,
        } => {
            let outcome = parse_to_outcome(input.as_deref(), format, &cfg, rates)?;
            if outcome.by_person.is_empty() {
                bail!("no entries recognized in input");
            }

            let statement_options = cfg.statement_options();
            let (display_date, _) = calculation_date();

            match person {
                Some(name) => {
                    let Some(agg) = outcome.by_person.get(&name) else {
                        bail!("no entries for {name}");
                    };
                    let statement = build_statement(&name, agg, &statement_options, &display_date);
                    print!("{}", render_statement_text(&statement));
                }
                None => {
                    for (name, agg) in &outcome.by_person {
                        let statement =
                            build_statement(name, agg, &statement_options, &display_date);
                        print!("{}", render_statement_text(&statement));
                        println!();
                    }
                }
            }
        }

        Command::Export {
            input,
            format,
            out_dir,
            person,
            halt_on_error,
            rates,
        } => {
            let outcome = parse_to_outcome(input.as_deref(), format, &cfg, rates)?;
            if outcome.by_person.is_empty() {
                bail!("no entries recognized in input");
            }

            let statement_options = cfg.statement_options();
            let mut export_options = cfg.export_options();
            if let Some(dir) = out_dir {
                export_options.out_dir = dir;
            }
            if halt_on_error {
                export_options.halt_on_error = true;
            }

            match person {
                Some(name) => {
                    let Some(agg) = outcome.by_person.get(&name) else {
                        bail!("no entries for {name}");
                    };
                    let path =
                        export_one(&name, agg, &statement_options, &export_options.out_dir)?;
                    println!("Wrote {}", path.display());
                }
                None => {
                    let written =
                        export_all(&outcome, &statement_options, &export_options).await?;
                    println!(
                        "Exported {} statements to {}",
                        written.len(),
                        export_options.out_dir.display()
                    );
                }
            }
        }

        Command::InitConfig => {
            config::init_config()?;
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("read {}", p.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read stdin")?;
            Ok(buf)
        }
    }
}

fn parse_entries(text: &str, format: InputFormat) -> Result<Vec<Entry>> {
    Ok(match format {
        InputFormat::Pino => parse_expense_text(text)?,
        InputFormat::Plain => parse_plain_text(text),
    })
}

fn parse_to_outcome(
    input: Option<&Path>,
    format: InputFormat,
    cfg: &config::Config,
    overrides: RateArgs,
) -> Result<ParseOutcome> {
    let text = read_input(input)?;
    let entries = parse_entries(&text, format)?;

    let mut rates: SettlementRates = cfg.rates();
    if let Some(rate) = overrides.rate_per_km {
        rates.rate_per_km = rate;
    }
    if let Some(allowance) = overrides.daily_allowance {
        rates.daily_allowance = allowance;
    }

    Ok(aggregate(entries, &rates))
}
