//! RV32IMC instruction decoder CLI.
//!
//! Decodes one or more instruction words and prints, for each:
//! 1. **Disassembly:** The assembler text of the decoded instruction.
//! 2. **Trap outcome:** The exception the instruction raises when executed in
//!    the selected privilege mode, if any.
//!
//! With `--json` each word is printed as one JSON object per line instead.
//!
//! Examples:
//!   rvdecode 0x00a00513 0x4515
//!   rvdecode --mode u 0x30002573
//!   rvdecode --config rv32ec.json --json 0x852e

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use rvcore::common::error::ConfigError;
use rvcore::core::units::trap::{ExecState, TrapCandidate, exec_candidate};
use rvcore::isa::disasm::disassemble;
use rvcore::{CoreConfig, DecodedInstruction, PrivilegeMode, decode};

#[derive(Parser, Debug)]
#[command(
    name = "rvdecode",
    author,
    version,
    about = "Decode RV32IMC instruction words",
    long_about = "Decode 16- and 32-bit RISC-V instruction words, print their disassembly and \
                  the trap they raise in the chosen privilege mode.\n\nWords are hexadecimal \
                  with a 0x prefix or decimal. Set RUST_LOG=trace to see decoder verdicts."
)]
struct Cli {
    /// JSON core configuration file; built-in defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Privilege mode the instructions execute in (u, m or d).
    #[arg(short, long, default_value = "m", value_parser = parse_mode)]
    mode: PrivilegeMode,

    /// Print one JSON object per word instead of text.
    #[arg(long)]
    json: bool,

    /// Instruction words.
    #[arg(required = true, value_name = "WORD")]
    words: Vec<String>,
}

/// Failures reported by the front end.
#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("invalid instruction word '{0}'")]
    ParseWord(String),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// One decoded word as printed with `--json`.
#[derive(Debug, Serialize)]
struct Report<'a> {
    word: u32,
    text: &'a str,
    decoded: &'a DecodedInstruction,
    trap: Option<TrapCandidate>,
}

fn parse_mode(text: &str) -> Result<PrivilegeMode, String> {
    PrivilegeMode::parse(text).ok_or_else(|| format!("unknown privilege mode '{text}'"))
}

fn parse_word(text: &str) -> Result<u32, CliError> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(&hex.replace('_', ""), 16),
        None => text.parse::<u32>(),
    };
    parsed.map_err(|_| CliError::ParseWord(text.to_owned()))
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => CoreConfig::from_file(path)?,
        None => CoreConfig::default(),
    };
    debug!(?config, mode = %cli.mode, "configuration loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for text in &cli.words {
        let word = parse_word(text)?;
        let decoded = decode(word, &config);
        let state = ExecState {
            valid: true,
            instruction: word,
            mode: cli.mode,
            ..ExecState::default()
        };
        let candidate = exec_candidate(&decoded, &state, &config);
        let trap = (candidate.valid && !candidate.ret).then_some(candidate);
        let asm = disassemble(&decoded);

        if cli.json {
            let report = Report {
                word,
                text: &asm,
                decoded: &decoded,
                trap,
            };
            serde_json::to_writer(&mut out, &report)?;
            writeln!(out)?;
        } else if let Some(trap) = trap {
            writeln!(out, "{word:#010x}  {asm:<32} ; trap cause {}", trap.cause)?;
        } else {
            writeln!(out, "{word:#010x}  {asm}")?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rvdecode: {e}");
            ExitCode::FAILURE
        }
    }
}
