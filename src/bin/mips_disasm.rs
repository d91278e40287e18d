use anyhow::{Context, Result};
use bitread::{InstrType, Program};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

/// Disassemble hex-encoded MIPS machine words.
///
/// Words are read whitespace-separated until `ffffffff` or end of input.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// File of hex words; standard input when omitted
    input: Option<PathBuf>,

    /// Address of the first word, in hex
    #[arg(long, default_value = "400000", value_parser = parse_addr)]
    start_addr: u32,

    /// Print per-mnemonic counts after the listing
    #[arg(long)]
    summary: bool,
}

fn parse_addr(s: &str) -> std::result::Result<u32, String> {
    bitread::parse_hex_word(s).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let program = Program::read(reader).context("failed to read program")?;
    log::info!("decoded {} instructions", program.instructions.len());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    program.write_listing(&mut out, args.start_addr)?;

    if args.summary {
        let mut counts: Vec<(InstrType, usize)> = program.histogram().into_iter().collect();
        counts.sort();

        writeln!(out, "\nInstruction Summary:")?;
        writeln!(out, "--------------------")?;
        for (kind, count) in counts {
            writeln!(out, "{:<8} {}", kind.mnemonic(), count)?;
        }
    }

    out.flush()?;
    Ok(())
}
