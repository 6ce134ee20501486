//! Base64 encoding and decoding.
//!
//! This crate provides the classic line-wrapped base64 transcoding:
//! - Standard alphabet with `=` padding
//! - A CRLF line break after every 76 encoded symbols
//! - Decoding that skips embedded whitespace but rejects anything else
//!   outside the alphabet
//!
//! Both directions work over a whole, already-available buffer and return a
//! freshly allocated, exactly sized result. Nothing is ever returned on error.
//!
//! # Example
//!
//! ```
//! use b64_base64::{decode, encode};
//!
//! let data = b"hello world";
//! let encoded = encode(data).unwrap();
//! assert_eq!(encoded, "aGVsbG8gd29ybGQ=");
//! let decoded = decode(&encoded).unwrap();
//! assert_eq!(decoded.as_slice(), data);
//! ```

mod constants;
mod decode;
mod encode;

use thiserror::Error;

pub use constants::{ALPHABET, ALPHABET_BYTES, LINE_BREAK, LINE_LENGTH, PAD, PAD_BYTE};
pub use decode::{decode, decoded_len_upper_bound, Decoder};
pub use encode::{encode, encode_reader, encoded_len};

/// Error type for base64 encoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// There were no bytes to encode.
    #[error("Nothing to encode: input is empty")]
    EmptyInput,
    /// The output buffer could not be allocated.
    #[error("Could not allocate the output buffer")]
    AllocationFailed,
    /// The source ended before yielding its declared length.
    #[error("Input ended after {actual} of {expected} bytes")]
    TruncatedInput { expected: usize, actual: usize },
    /// The source failed for a reason other than ending early.
    #[error("Failed to read input: {0}")]
    Io(std::io::ErrorKind),
}

/// Error type for base64 decoding.
///
/// Positions are zero-based byte offsets into the unfiltered input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The output buffer could not be allocated.
    #[error("Could not allocate the output buffer")]
    AllocationFailed,
    /// The input ended in the middle of a 4-symbol block.
    #[error("Base64 input ends with an incomplete block of {leftover} symbol(s)")]
    TruncatedInput { leftover: usize },
    /// A byte outside the alphabet, `=` and the skipped whitespace.
    #[error("Invalid character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },
    /// A `=` where padding is not allowed, or a symbol after padding.
    #[error("Misplaced padding at position {position}")]
    InvalidPadding { position: usize },
}
