//! File-level driver around the base64 codec.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use b64_base64::{decode, encode, DecodeError, EncodeError};
use log::{debug, info};
use thiserror::Error;

use crate::opts::{Mode, Options};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to print the result")]
    Print(#[source] io::Error),
    #[error("cannot derive an output file name from {}", path.display())]
    NoFileName { path: PathBuf },
}

/// What a successful [`run`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub output: PathBuf,
    pub input_len: usize,
    pub output_len: usize,
}

// ── Output naming ─────────────────────────────────────────────────────────

/// Strips the last extension of `input`'s file name and appends the mode's
/// suffix, keeping the parent directory.
///
/// ```
/// use b64::{derive_output_path, Mode};
/// use std::path::Path;
///
/// let out = derive_output_path(Path::new("dir/photo.tar.gz"), Mode::Encode).unwrap();
/// assert_eq!(out, Path::new("dir/photo.tar_enc.txt"));
/// ```
pub fn derive_output_path(input: &Path, mode: Mode) -> Result<PathBuf, CliError> {
    let stem = input.file_stem().ok_or_else(|| CliError::NoFileName {
        path: input.to_path_buf(),
    })?;
    let mut name = stem.to_os_string();
    name.push(mode.suffix());
    Ok(input.with_file_name(name))
}

// ── Transcoding ───────────────────────────────────────────────────────────

/// Reads all of `path`, to its end rather than to its reported size.
fn read_input(path: &Path) -> Result<Vec<u8>, CliError> {
    let data = fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("{} is {} bytes", path.display(), data.len());
    Ok(data)
}

pub fn encode_file(path: &Path) -> Result<(usize, String), CliError> {
    let data = read_input(path)?;
    Ok((data.len(), encode(&data)?))
}

pub fn decode_file(path: &Path) -> Result<(usize, Vec<u8>), CliError> {
    let text = read_input(path)?;
    Ok((text.len(), decode(&text)?))
}

/// Runs one transcoding pass as described by `options`.
///
/// With `options.print`, the result is also written to `stdout`: encoded
/// text after an `Output:` line, decoded bytes as they are.
pub fn run<W: Write>(options: &Options, stdout: &mut W) -> Result<Summary, CliError> {
    let output = match &options.output {
        Some(path) => path.clone(),
        None => derive_output_path(&options.input, options.mode)?,
    };
    debug!("{} {} -> {}", options.mode, options.input.display(), output.display());

    let (input_len, result) = match options.mode {
        Mode::Encode => {
            let (len, text) = encode_file(&options.input)?;
            (len, text.into_bytes())
        }
        Mode::Decode => decode_file(&options.input)?,
    };

    if options.print {
        print_result(options.mode, &result, stdout).map_err(CliError::Print)?;
    }

    fs::write(&output, &result).map_err(|source| CliError::Write {
        path: output.clone(),
        source,
    })?;
    info!(
        "wrote {} bytes to {} ({} bytes in)",
        result.len(),
        output.display(),
        input_len
    );

    Ok(Summary {
        output,
        input_len,
        output_len: result.len(),
    })
}

fn print_result<W: Write>(mode: Mode, result: &[u8], stdout: &mut W) -> io::Result<()> {
    if mode == Mode::Encode {
        stdout.write_all(b"Output:\n")?;
        stdout.write_all(result)?;
        stdout.write_all(b"\n")?;
    } else {
        stdout.write_all(result)?;
    }
    stdout.flush()
}
