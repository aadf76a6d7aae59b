use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use blockdate::{
    Clock, DateField, FieldOptions, FixedClock, LocaleResolver, SystemClock,
    io::{
        DocumentFormat, field_options_from_str, messages_from_value, read_document,
        serialize_value, symbol_tables_from_value,
    },
    parse_canonical, validate,
};

#[derive(Debug, Parser)]
#[command(
    name = "blockdate",
    version,
    about = "Check calendar dates and date-field settings"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the canonical form of each date, or "invalid"
    Validate {
        #[arg(value_name = "DATE", required = true)]
        dates: Vec<String>,
    },
    /// Build a date field from block options and print its serialized value
    Field {
        /// Options source: file path, inline payload, or "-" for stdin
        #[arg(short = 'c', long = "config", value_name = "SOURCE")]
        config: Option<String>,

        /// Date to use as "today" instead of the local clock
        #[arg(long = "today", value_name = "DATE")]
        today: Option<String>,

        /// Emit compact JSON rather than pretty formatting
        #[arg(long = "no-pretty")]
        no_pretty: bool,
    },
    /// Pick the calendar locale from symbol tables and a message catalog
    Locale {
        /// Symbol tables document keyed by table name
        #[arg(long = "symbols", value_name = "PATH")]
        symbols: PathBuf,

        /// Message catalog document
        #[arg(long = "messages", value_name = "PATH")]
        messages: PathBuf,
    },
}

#[derive(Debug)]
enum InputSource {
    File(PathBuf),
    Stdin,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Validate { dates } => run_validate(&dates),
        Command::Field {
            config,
            today,
            no_pretty,
        } => run_field(config.as_deref(), today.as_deref(), !no_pretty),
        Command::Locale { symbols, messages } => run_locale(&symbols, &messages),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("blockdate={level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run_validate(dates: &[String]) -> Result<()> {
    let mut invalid = 0usize;
    for raw in dates {
        match validate(Some(raw)) {
            Some(canonical) => println!("{raw}\t{canonical}"),
            None => {
                invalid += 1;
                println!("{raw}\tinvalid");
            }
        }
    }
    if invalid > 0 {
        return Err(eyre!("{invalid} of {} date(s) invalid", dates.len()));
    }
    Ok(())
}

fn run_field(config: Option<&str>, today: Option<&str>, pretty: bool) -> Result<()> {
    let options = match config {
        Some(source) => load_options(source)?,
        None => FieldOptions::default(),
    };

    let clock: Box<dyn Clock> = match today {
        Some(raw) => {
            let date = parse_canonical(raw)
                .ok_or_else(|| eyre!("--today expects a YYYY-MM-DD date, got '{raw}'"))?;
            Box::new(FixedClock(date))
        }
        None => Box::new(SystemClock),
    };

    let field = DateField::from_options(&options, clock.as_ref());
    if options.date.is_some() && field.value() != options.date.as_deref() {
        debug!(requested = ?options.date, "configured date rejected; using today");
    }
    let value = serde_json::to_value(field.to_options()).wrap_err("failed to encode field")?;
    let payload = serialize_value(&value, DocumentFormat::Json, pretty).map_err(Report::msg)?;
    println!("{payload}");
    Ok(())
}

fn run_locale(symbols: &Path, messages: &Path) -> Result<()> {
    let symbols = read_document(symbols)
        .and_then(symbol_tables_from_value)
        .map_err(Report::msg)?;
    let messages = read_document(messages)
        .and_then(messages_from_value)
        .map_err(Report::msg)?;
    let resolver = LocaleResolver::new(Arc::new(symbols), Arc::new(messages));
    resolver.resolve();
    match resolver.state().active_name() {
        Some(name) => println!("{name}"),
        None => println!("none (English)"),
    }
    Ok(())
}

fn load_options(source: &str) -> Result<FieldOptions> {
    if source == "-" {
        let contents = read_from_source(&InputSource::Stdin)?;
        return parse_options(&contents, DocumentFormat::Json, "config");
    }

    let path = PathBuf::from(source);
    let format = DocumentFormat::from_path(&path).unwrap_or(DocumentFormat::Json);
    match read_from_source(&InputSource::File(path.clone())) {
        Ok(contents) => parse_options(&contents, format, "config"),
        Err(err) => {
            if is_not_found(&err) {
                return parse_options(source, DocumentFormat::Json, "inline config");
            }
            Err(err.wrap_err(format!("failed to load config from {}", path.display())))
        }
    }
}

fn read_from_source(source: &InputSource) -> Result<String> {
    match source {
        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .wrap_err("failed to read from stdin")?;
            Ok(buffer)
        }
        InputSource::File(path) => fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read file {}", path.display())),
    }
}

fn is_not_found(err: &Report) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|io_err| io_err.kind() == io::ErrorKind::NotFound)
}

fn parse_options(contents: &str, format: DocumentFormat, label: &str) -> Result<FieldOptions> {
    field_options_from_str(contents, format)
        .map_err(|err| Report::msg(format!("failed to parse {label} as {format}: {err:#}")))
}
