//! `b64` — encode a file to base64 or decode it back.
//!
//! Usage:
//!   b64 (-e | --encode | -d | --decode) PATH [-o OUTPUT] [-p] [-v... | -q]
//!
//! The result goes to `<stem>_enc.txt` or `<stem>_dec.bin` next to the input
//! unless `--output` is given.

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use log::info;

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> anyhow::Result<()> {
    let options = b64::opts::parse_clap()?;
    b64::logging::init_logging(options.log_level).context("failed to set up logging")?;

    let summary = b64::run(&options, &mut io::stdout().lock())
        .with_context(|| format!("failed to {} {}", options.mode, options.input.display()))?;
    info!(
        "{} done: {} -> {} bytes",
        options.mode, summary.input_len, summary.output_len
    );
    Ok(())
}
