use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use clap::Parser;
use jason::{KeyPolicy, ParseOptions, TrailingContent};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "jason", version, about = "Parse a document of the jason dialect")]
struct Args {
    /// Input file path. Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// JSON indentation size; 0 prints compact output (default: 2).
    #[arg(long, value_name = "number", default_value_t = 2)]
    indent: usize,

    /// Keep literals and numbers as strings instead of typed JSON.
    #[arg(long)]
    raw: bool,

    /// Only check that the input parses; print nothing on success.
    #[arg(long)]
    check: bool,

    /// Maximum container nesting depth (capped at 256).
    #[arg(long = "max-depth", value_name = "number")]
    max_depth: Option<usize>,

    /// Reject anything but whitespace after the first value.
    #[arg(long = "strict-trailing")]
    strict_trailing: bool,

    /// Accept literal and number object keys by their text.
    #[arg(long = "coerce-keys")]
    coerce_keys: bool,
}

#[derive(Debug)]
enum InputSource {
    Stdin,
    File(String),
}

fn main() {
    if let Err(err) = run() {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let (input_text, input_source) = read_input(args.input.as_deref())?;
    let options = parse_options(&args);

    if args.check {
        jason::validate_str_with_options(&input_text, &options)?;
        return Ok(());
    }

    let value = jason::parse_with_options(&input_text, &options)?;
    let output_target = OutputTarget::from_arg(args.output.as_deref());

    with_output_writer(output_target.path(), |writer| {
        if args.raw {
            write_json(writer, &value, args.indent)
        } else {
            write_json(writer, &value.to_json(), args.indent)
        }
    })?;
    if let OutputTarget::File(path) = &output_target {
        report_status(&input_source, path);
    }
    Ok(())
}

fn parse_options(args: &Args) -> ParseOptions {
    let mut options = ParseOptions::new();
    if let Some(max_depth) = args.max_depth {
        options = options.with_max_depth(max_depth);
    }
    if args.strict_trailing {
        options = options.with_trailing(TrailingContent::Reject);
    }
    if args.coerce_keys {
        options = options.with_key_policy(KeyPolicy::Coerce);
    }
    options
}

fn read_input(input: Option<&str>) -> Result<(String, InputSource), Box<dyn Error>> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok((buf, InputSource::Stdin))
        }
        Some(path) => {
            let buf = fs::read_to_string(path)?;
            Ok((buf, InputSource::File(path.to_string())))
        }
    }
}

#[derive(Clone, Debug)]
enum OutputTarget {
    Stdout,
    File(String),
}

impl OutputTarget {
    fn from_arg(output: Option<&str>) -> Self {
        match output {
            Some(path) if path != "-" => OutputTarget::File(path.to_string()),
            _ => OutputTarget::Stdout,
        }
    }

    fn path(&self) -> Option<&str> {
        match self {
            OutputTarget::Stdout => None,
            OutputTarget::File(path) => Some(path.as_str()),
        }
    }
}

fn with_output_writer<F>(path: Option<&str>, f: F) -> Result<(), Box<dyn Error>>
where
    F: FnOnce(&mut dyn Write) -> Result<(), Box<dyn Error>>,
{
    match path {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            f(&mut file)
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            f(&mut handle)
        }
    }
}

fn write_json<T: Serialize>(
    writer: &mut dyn Write,
    value: &T,
    indent: usize,
) -> Result<(), Box<dyn Error>> {
    if indent == 0 {
        serde_json::to_writer(writer, value)?;
        return Ok(());
    }

    let indent_bytes = vec![b' '; indent];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent_bytes);
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    value.serialize(&mut serializer)?;
    Ok(())
}

fn report_status(input_source: &InputSource, output_path: &str) {
    let input_label = match input_source {
        InputSource::Stdin => "stdin".to_string(),
        InputSource::File(path) => display_path(path),
    };
    let output_label = display_path(output_path);
    println!("✔ Parsed {input_label} → {output_label}");
}

fn display_path(path: &str) -> String {
    let path = Path::new(path);
    let Ok(cwd) = std::env::current_dir() else {
        return path.to_string_lossy().into_owned();
    };
    match path.strip_prefix(&cwd) {
        Ok(rel) => rel.to_string_lossy().into_owned(),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}
