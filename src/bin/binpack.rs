//! binpack CLI: pack JSON values to bytes and back.

use std::io::{IsTerminal, Read, Write};
use std::process;

use binpack::json::{values_from_json, values_to_json_for};
use binpack::{ErrorCategory, ExtraArguments, Format, PackOptions, UnterminatedStrings, Utf8Policy};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "binpack", version, about = "Format-string driven binary packing")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    options: OptionArgs,

    /// More log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Pack a JSON array of values
    Pack(PackArgs),
    /// Unpack bytes to a JSON array of values
    Unpack(UnpackArgs),
    /// Predict or compute the packed size
    Size(SizeArgs),
}

#[derive(Args)]
struct OptionArgs {
    /// Ignore values beyond the last field instead of failing
    #[arg(long, global = true)]
    ignore_extra: bool,

    /// Accept a `z` string that runs to the end of the input
    #[arg(long, global = true)]
    lenient_strings: bool,

    /// Replace invalid UTF-8 with U+FFFD instead of failing
    #[arg(long, global = true)]
    lossy_utf8: bool,
}

impl OptionArgs {
    fn to_options(&self) -> PackOptions {
        let mut opts = PackOptions::default();
        if self.ignore_extra {
            opts = opts.with_extra_arguments(ExtraArguments::Ignore);
        }
        if self.lenient_strings {
            opts = opts.with_unterminated_strings(UnterminatedStrings::Accept);
        }
        if self.lossy_utf8 {
            opts = opts.with_invalid_utf8(Utf8Policy::Lossy);
        }
        opts
    }
}

#[derive(Args)]
struct PackArgs {
    /// Format string
    #[arg(short, long)]
    format: String,

    /// JSON array of values (- = stdin)
    values: String,

    /// Write raw bytes to this file instead of printing hex (- = stdout)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Args)]
struct UnpackArgs {
    /// Format string
    #[arg(short, long)]
    format: String,

    /// Input as hex digits (whitespace allowed)
    #[arg(long, conflicts_with = "input", required_unless_present = "input")]
    hex: Option<String>,

    /// Input file (- = stdin)
    #[arg(short, long)]
    input: Option<String>,

    /// Start offset in the input
    #[arg(long, default_value_t = 0)]
    offset: usize,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct SizeArgs {
    /// Format string
    #[arg(short, long)]
    format: String,

    /// JSON array of values; without it only the prediction is printed
    values: Option<String>,
}

/// Fehlermeldung plus Exit-Code.
struct Failure {
    message: String,
    code: i32,
}

impl Failure {
    fn usage(message: impl Into<String>) -> Self {
        Self { message: message.into(), code: 1 }
    }
}

impl From<binpack::Error> for Failure {
    fn from(e: binpack::Error) -> Self {
        let code = match e.category() {
            ErrorCategory::Data => 2,
            _ => 1,
        };
        Self { message: e.to_string(), code }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Fehler: {}", e.message);
        process::exit(e.code);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<(), Failure> {
    let opts = cli.options.to_options();
    match cli.command {
        Command::Pack(args) => run_pack(args, &opts),
        Command::Unpack(args) => run_unpack(args, &opts),
        Command::Size(args) => run_size(args, &opts),
    }
}

fn run_pack(args: PackArgs, opts: &PackOptions) -> Result<(), Failure> {
    let format = Format::parse(&args.format)?;
    let values = parse_values(&format, &args.values)?;
    let bytes = format.pack_with_options(&values, opts)?;

    match args.output.as_deref() {
        None => print_line(&hex::encode(&bytes)),
        Some("-") => std::io::stdout()
            .write_all(&bytes)
            .map_err(|e| Failure::usage(format!("Schreibfehler: {e}"))),
        Some(path) => write_file(path, &bytes),
    }
}

fn run_unpack(args: UnpackArgs, opts: &PackOptions) -> Result<(), Failure> {
    let format = Format::parse(&args.format)?;
    let data = match (&args.hex, &args.input) {
        (Some(digits), _) => decode_hex(digits)?,
        (None, Some(path)) => read_input(path)?,
        (None, None) => return Err(Failure::usage("--hex oder --input erforderlich")),
    };
    let result = format.unpack_with_options(&data, args.offset, opts)?;

    let doc = serde_json::json!({
        "values": values_to_json_for(&format, &result.values),
        "next_offset": result.next_offset,
    });
    print_json(&doc, args.pretty)
}

fn run_size(args: SizeArgs, opts: &PackOptions) -> Result<(), Failure> {
    let format = Format::parse(&args.format)?;
    let doc = match args.values.as_deref() {
        Some(raw) => {
            let values = parse_values(&format, raw)?;
            serde_json::json!({ "size": format.compute_size_with_options(&values, opts)? })
        }
        None => {
            let prediction = format.predict_size();
            serde_json::json!({
                "fixed_bytes": prediction.fixed_bytes,
                "variable_fields": prediction.variable_fields,
                "exact": prediction.exact,
            })
        }
    };
    print_json(&doc, false)
}

fn parse_values(format: &Format, raw: &str) -> Result<Vec<binpack::Value>, Failure> {
    let text = if raw == "-" {
        String::from_utf8(read_input("-")?).map_err(|e| Failure::usage(format!("UTF-8-Fehler: {e}")))?
    } else {
        raw.to_owned()
    };
    let json: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| Failure::usage(format!("JSON-Parse-Fehler: {e}")))?;
    values_from_json(format, &json).map_err(|e| Failure::usage(format!("JSON-Wert-Fehler: {e}")))
}

fn decode_hex(digits: &str) -> Result<Vec<u8>, Failure> {
    let compact: String = digits.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    hex::decode(compact).map_err(|e| Failure::usage(format!("Hex-Fehler: {e}")))
}

fn read_input(path: &str) -> Result<Vec<u8>, Failure> {
    if path == "-" {
        if std::io::stdin().is_terminal() {
            eprintln!("Lese von stdin (Ctrl+D zum Beenden)...");
        }
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .map_err(|e| Failure::usage(format!("Lesefehler (stdin): {e}")))?;
        Ok(buf)
    } else {
        std::fs::read(path).map_err(|e| Failure::usage(format!("Lesefehler '{path}': {e}")))
    }
}

/// Schreibt über eine tmp-Datei, damit bei Fehlern kein halbes Ziel bleibt.
fn write_file(path: &str, bytes: &[u8]) -> Result<(), Failure> {
    let tmp_path = format!("{path}.tmp");
    if let Err(e) = std::fs::write(&tmp_path, bytes) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(Failure::usage(format!("Schreibfehler '{tmp_path}': {e}")));
    }
    std::fs::rename(&tmp_path, path).map_err(|e| Failure::usage(format!("Rename-Fehler: {e}")))
}

fn print_json(doc: &serde_json::Value, pretty: bool) -> Result<(), Failure> {
    let text = if pretty {
        serde_json::to_string_pretty(doc)
    } else {
        serde_json::to_string(doc)
    }
    .map_err(|e| Failure::usage(format!("JSON-Encode-Fehler: {e}")))?;
    print_line(&text)
}

fn print_line(text: &str) -> Result<(), Failure> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{text}").map_err(|e| Failure::usage(format!("Schreibfehler: {e}")))
}
