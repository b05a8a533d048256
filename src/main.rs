//! Command-line front end: encode or decode stdin or a single argument.
//!
//! ```text
//! $ scramble --encode foo
//! [124807030]
//! $ echo -n foo | scramble -e | scramble -d
//! foo
//! ```

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::{ArgAction, ArgGroup, Parser};
use tracing::{debug, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "scramble",
    version,
    about = "Encode bytes to bit-plane list text and back",
    long_about = "Encode bytes to bit-plane list text and back.

Reads TEXT when given, otherwise stdin. Output is written to stdout without a
trailing newline so the command composes with pipes."
)]
#[command(group(ArgGroup::new("mode").required(true).args(["encode", "decode"])))]
struct Cli {
    #[arg(short = 'e', long = "encode", action = ArgAction::SetTrue, help = "Encode raw input into list text")]
    encode: bool,
    #[arg(short = 'd', long = "decode", action = ArgAction::SetTrue, help = "Decode list text into raw bytes")]
    decode: bool,
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help = "Log to stderr; repeat for more detail"
    )]
    verbose: u8,
    #[arg(value_name = "TEXT", help = "Input to process instead of stdin")]
    text: Option<String>,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

fn init_logging(level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> scramble::Result<scramble::Totals> {
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    let stdin = io::stdin();

    let totals = match (&cli.text, cli.encode) {
        (Some(text), true) => scramble::encode(text.as_bytes(), &mut writer)?,
        (Some(text), false) => scramble::decode(text.as_bytes(), &mut writer)?,
        (None, true) => scramble::encode(stdin.lock(), &mut writer)?,
        (None, false) => scramble::decode(stdin.lock(), &mut writer)?,
    };
    writer.flush()?;

    Ok(totals)
}

/// Line printed to stderr when a run fails
fn failure_message(cli: &Cli, err: &scramble::Error) -> String {
    let action = if cli.encode { "encoding" } else { "decoding" };
    format!("Error {} input: {}", action, err)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level());
    debug!(encode = cli.encode, from_arg = cli.text.is_some(), "starting");

    match run(&cli) {
        Ok(totals) => {
            debug!(read = totals.read, written = totals.written, "done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            debug!(%err, encode = cli.encode, "run failed");
            eprintln!("{}", failure_message(&cli, &err));
            ExitCode::FAILURE
        }
    }
}
