//! `jsonify` - decode and re-encode op-tagged operations and plain payloads.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use jsonify_codec::{
    operation_codec, record, MediumPayload, Operation, OperationCodec, ShortPayload,
};
use jsonify_value::{stringify_with, JsonValue, StringifyOptions};
use tracing_subscriber::EnvFilter;

const SAMPLE_OPERATION: &str = r#"{
 "op" : "add",
 "left" : 1,
 "right" : 2
}"#;

const SAMPLE_ARRAY: &str = r#"[
    {
     "op" : "add",
     "left" : 1,
     "right" : 2
    },
    {
     "op" : "inc",
     "operand" : 3
    }
]"#;

#[derive(Parser)]
#[command(
    name = "jsonify",
    version,
    about = "Decode and re-encode op-tagged JSON operations and payloads",
    after_help = r#"EXAMPLES
  $ echo '{"op":"add","left":1,"right":2}' | jsonify decode
  Add(left=1, right=2)
  $ jsonify encode --as operations --pretty 2 ops.json
  $ jsonify demo

Set RUST_LOG=debug for codec diagnostics on stderr."#,
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a document and print each value, one per line
    Decode {
        #[arg(long = "as", value_enum, default_value = "operation", help = "Shape of the document")]
        shape: Shape,
        #[arg(help = "Input file (default: stdin, or `-`)", value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },
    /// Decode a document and write it back as canonical JSON
    Encode {
        #[arg(long = "as", value_enum, default_value = "operation", help = "Shape of the document")]
        shape: Shape,
        #[arg(long, value_name = "SPACES", help = "Pretty-print with this indentation")]
        pretty: Option<usize>,
        #[arg(long, help = "Escape <, >, &, = and ' for embedding in HTML")]
        escape_html: bool,
        #[arg(help = "Input file (default: stdin, or `-`)", value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },
    /// Decode the bundled sample operation and sample array
    Demo,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Shape {
    /// One tagged operation object
    Operation,
    /// An array of tagged operation objects
    Operations,
    /// One MediumPayload object
    Medium,
    /// One ShortPayload object
    Short,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run(command: Command) -> Result<()> {
    let codec = operation_codec().context("operation codec configuration")?;
    let mut stdout = io::stdout().lock();
    match command {
        Command::Decode { shape, file } => {
            let text = read_input(file.as_deref())?;
            tracing::debug!(?shape, bytes = text.len(), "decoding");
            for line in decode_lines(&codec, shape, &text)? {
                writeln!(stdout, "{line}")?;
            }
        }
        Command::Encode {
            shape,
            pretty,
            escape_html,
            file,
        } => {
            let text = read_input(file.as_deref())?;
            let options = StringifyOptions {
                escape_html,
                indent: pretty,
            };
            tracing::debug!(?shape, ?options, "re-encoding");
            let value = reencode(&codec, shape, &text)?;
            writeln!(stdout, "{}", stringify_with(&value, &options))?;
        }
        Command::Demo => {
            let operation = codec
                .decode(SAMPLE_OPERATION)
                .context("decoding sample operation")?;
            let operations = codec
                .decode_all(SAMPLE_ARRAY)
                .context("decoding sample array")?;
            writeln!(stdout, "{operation}")?;
            writeln!(stdout, "{}", list(&operations))?;
        }
    }
    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        None => read_stdin(),
        Some(path) if path == Path::new("-") => read_stdin(),
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
    }
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("reading stdin")?;
    Ok(text)
}

fn decode_lines(codec: &OperationCodec, shape: Shape, text: &str) -> Result<Vec<String>> {
    let lines = match shape {
        Shape::Operation => vec![codec.decode(text)?.to_string()],
        Shape::Operations => codec
            .decode_all(text)?
            .iter()
            .map(Operation::to_string)
            .collect(),
        Shape::Medium => vec![record::decode::<MediumPayload>(text)?.to_string()],
        Shape::Short => vec![record::decode::<ShortPayload>(text)?.to_string()],
    };
    Ok(lines)
}

fn reencode(codec: &OperationCodec, shape: Shape, text: &str) -> Result<JsonValue> {
    let value = match shape {
        Shape::Operation => codec.encode_value(&codec.decode(text)?)?,
        Shape::Operations => codec.encode_all_value(&codec.decode_all(text)?)?,
        Shape::Medium => record::encode_value(&record::decode::<MediumPayload>(text)?),
        Shape::Short => record::encode_value(&record::decode::<ShortPayload>(text)?),
    };
    Ok(value)
}

fn list(operations: &[Operation]) -> String {
    let items: Vec<String> = operations.iter().map(Operation::to_string).collect();
    format!("[{}]", items.join(", "))
}
