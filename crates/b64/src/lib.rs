//! `b64` — encode a file to line-wrapped base64, or decode it back.
//!
//! Provides the logic behind the `b64` binary:
//! - [`opts`]    — command-line parsing into [`opts::Options`]
//! - [`cli`]     — reading the input, transcoding, choosing and writing the output
//! - [`logging`] — stderr logging setup
//!
//! The transcoding itself lives in the `b64-base64` crate.

pub mod cli;
pub mod logging;
pub mod opts;

pub use cli::{derive_output_path, run, CliError, Summary};
pub use opts::{Mode, Options};
