//! Purpose: `pagedecode` CLI entry point.
//! Role: Binary crate root; parses args, runs decode commands, emits JSON on stdout.
//! Invariants: Decoded envelopes are printed to stdout; diagnostics go to stderr only.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
//! Invariants: Captured element failures are report data and never change the exit code.
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::{
    Args, CommandFactory, Parser, Subcommand, ValueEnum, ValueHint,
    error::ErrorKind as ClapErrorKind,
};
use clap_complete::aot::Shell;
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::EnvFilter;

mod color_json;
mod command_dispatch;
mod envelope_json;

use color_json::colorize_report;
use envelope_json::{error_causes, error_detail_json, error_message};
use pagedecode::api::{
    Context, DEFAULT_DATE_LOCALE, DateParsingPolicy, DecodeOptions, Error, ErrorKind, shape,
    to_exit_code,
};

/// Envelope whose double-generic decode (envelope of outcomes) is the regression case.
const REPRO_DOCUMENT: &str = r#"{"values": [], "pagelen": 10, "size": 0, "page": 1}"#;

type ElementShape = Box<dyn Fn(&Value, &Context) -> Result<Value, Error>>;

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint("Try `pagedecode --help`."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    command_dispatch::dispatch_command(cli.command, color_mode)
        .map_err(add_decode_hint)
        .map_err(add_io_hint)
        .map_err(|err| (err, color_mode))
}

#[derive(Parser)]
#[command(
    name = "pagedecode",
    version,
    about = "Decode paginated JSON envelopes, one outcome per element",
    long_about = None,
    after_help = r#"EXAMPLES
  $ pagedecode repro
  $ pagedecode decode page.json --shape string --outcome --pretty
  $ curl -s "$API/repositories" | pagedecode decode --shape any --outcome

Elements decoded with --outcome that fail become {"failure": {...}} entries
instead of aborting the whole decode."#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        help = "Colorize pretty output and terminal errors"
    )]
    color: ColorMode,
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Decode a paginated envelope from a file or stdin")]
    Decode(DecodeArgs),
    #[command(
        about = "Decode the reproduction document as an envelope of string outcomes",
        long_about = "Decodes {\"values\": [], \"pagelen\": 10, \"size\": 0, \"page\": 1} with \
                      element shape outcome(string) and the default date policy."
    )]
    Repro {
        #[arg(long, help = "Pretty-print the decoded envelope")]
        pretty: bool,
    },
    #[command(about = "Generate shell completions")]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

#[derive(Args)]
struct DecodeArgs {
    #[arg(
        help = "Envelope JSON file (`-` or omitted reads stdin)",
        value_hint = ValueHint::FilePath
    )]
    input: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "any", help = "Element shape")]
    shape: ShapeArg,
    #[arg(
        long,
        help = "Capture element decode failures as outcomes instead of failing"
    )]
    outcome: bool,
    #[arg(
        long,
        value_name = "PATTERN",
        conflicts_with_all = ["rfc3339", "unix_seconds"],
        help = "Date format (time format description) for --shape date"
    )]
    date_format: Option<String>,
    #[arg(
        long,
        value_name = "LOCALE",
        default_value = DEFAULT_DATE_LOCALE,
        help = "Locale recorded with --date-format"
    )]
    date_locale: String,
    #[arg(long, conflicts_with = "unix_seconds", help = "Parse dates as RFC 3339")]
    rfc3339: bool,
    #[arg(long, help = "Parse dates as unix timestamps in seconds")]
    unix_seconds: bool,
    #[arg(long, help = "Pretty-print the decoded envelope")]
    pretty: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ShapeArg {
    String,
    Integer,
    Number,
    Boolean,
    Any,
    Date,
}

fn decode_options(args: &DecodeArgs) -> Result<DecodeOptions, Error> {
    let dates = if args.rfc3339 {
        DateParsingPolicy::Rfc3339
    } else if args.unix_seconds {
        DateParsingPolicy::UnixSeconds
    } else if let Some(pattern) = &args.date_format {
        DateParsingPolicy::formatted(args.date_locale.as_str(), pattern.as_str())?
    } else {
        DateParsingPolicy::default()
    };
    Ok(DecodeOptions::new().with_dates(dates))
}

fn element_shape(kind: ShapeArg) -> ElementShape {
    match kind {
        ShapeArg::String => Box::new(shape::map(shape::string, Value::String)),
        ShapeArg::Integer => Box::new(shape::map(shape::integer, Value::from)),
        ShapeArg::Number => Box::new(shape::map(shape::number, Value::from)),
        ShapeArg::Boolean => Box::new(shape::map(shape::boolean, Value::Bool)),
        ShapeArg::Any => Box::new(shape::any),
        ShapeArg::Date => Box::new(|value: &Value, ctx: &Context| -> Result<Value, Error> {
            let date = shape::date(value, ctx)?;
            date.format(&Rfc3339).map(Value::String).map_err(|err| {
                Error::new(ErrorKind::Internal)
                    .with_message("decoded date cannot be rendered as RFC 3339")
                    .with_path(ctx.path().clone())
                    .with_source(err)
            })
        }),
    }
}

fn read_input(input: Option<&Path>) -> Result<Vec<u8>, Error> {
    match input {
        None => read_stdin(),
        Some(path) if path == Path::new("-") => read_stdin(),
        Some(path) => std::fs::read(path).map_err(|err| {
            let kind = if err.kind() == io::ErrorKind::NotFound {
                ErrorKind::NotFound
            } else {
                ErrorKind::Io
            };
            Error::new(kind)
                .with_message(format!("failed to read {}", path.display()))
                .with_source(err)
        }),
    }
}

fn read_stdin() -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    io::stdin().read_to_end(&mut buf).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to read stdin")
            .with_source(err)
    })?;
    Ok(buf)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn emit_json(value: &Value, pretty: bool, color_mode: ColorMode) {
    let use_color = color_mode.use_color(io::stdout().is_terminal());
    let json = if pretty {
        colorize_report(value, use_color)
    } else {
        serde_json::to_string(value)
            .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string())
    };
    println!("{json}");
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = serde_json::json!({ "error": error_detail_json(err) });
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = vec![format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    )];
    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(path) = err.path() {
        lines.push(format!(
            "{} {path}",
            colorize_label("at:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(cause) = error_causes(err).first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }
    lines.join("\n")
}

fn add_decode_hint(err: Error) -> Error {
    if err.hint().is_some() {
        return err;
    }
    match err.kind() {
        ErrorKind::MissingField => err.with_hint(
            "Envelopes need `pagelen` (integer) and `values` (array) at the top level.",
        ),
        ErrorKind::TypeMismatch | ErrorKind::DataCorrupted => err.with_hint(
            "Use --outcome to keep decoding past element failures, or pick another --shape.",
        ),
        _ => err,
    }
}

fn add_io_hint(err: Error) -> Error {
    if err.hint().is_some() {
        return err;
    }
    match err.kind() {
        ErrorKind::NotFound => err.with_hint("Check the input path, or pipe the document on stdin."),
        ErrorKind::Io => err.with_hint("I/O error. Check the path and permissions."),
        _ => err,
    }
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}
