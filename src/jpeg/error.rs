// Copyright (c) 2026 The stegojpeg developers
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/stegojpeg/stegojpeg

//! Error type for the JPEG container codec.
//!
//! Variants split along the lines the steganography layer cares about:
//! [`JpegError::Truncated`] and [`JpegError::CorruptScan`] mean the byte
//! stream itself is damaged (surfaced as `malformed-stream`), everything
//! else means the container is outside what this baseline codec handles
//! (surfaced as `invalid-image`).

use std::fmt;

/// Failure while parsing or writing a baseline JPEG stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JpegError {
    /// The stream ended before the current segment or the scan completed.
    Truncated,
    /// No SOI marker at the start of the data.
    NotAJpeg,
    /// Progressive DCT (SOF2); this codec is baseline-only.
    Progressive,
    /// A frame or marker type this codec does not handle (lossless,
    /// arithmetic, differential, or unknown).
    UnhandledMarker(u8),
    /// Sample precision other than 8 bits per channel.
    Precision(u8),
    /// A segment's payload contradicts its length field or violates a
    /// field limit; the string names the offending structure.
    Segment(&'static str),
    /// Zero image dimension, or a sampling factor outside 1..=4.
    Geometry,
    /// A table slot outside 0..=3, an undefined table referenced from the
    /// scan header, or a code-length set that oversubscribes the code space.
    Table(&'static str),
    /// The scan header selects a component ID the frame never declared.
    UnknownComponent(u8),
    /// The entropy-coded data decoded to an invalid Huffman code or ran a
    /// coefficient index off the end of a block.
    CorruptScan,
    /// A symbol with no code in the active Huffman table (encode side).
    MissingCode(u8),
}

impl fmt::Display for JpegError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "JPEG stream truncated mid-segment or mid-scan"),
            Self::NotAJpeg => write!(f, "no SOI marker; input is not a JPEG stream"),
            Self::Progressive => write!(f, "progressive JPEG (SOF2) is not supported"),
            Self::UnhandledMarker(m) => write!(f, "unhandled marker 0xFF{m:02X}"),
            Self::Precision(p) => write!(f, "{p}-bit samples; only 8-bit baseline is supported"),
            Self::Segment(what) => write!(f, "malformed segment: {what}"),
            Self::Geometry => write!(f, "zero dimension or out-of-range sampling factor"),
            Self::Table(what) => write!(f, "bad table definition: {what}"),
            Self::UnknownComponent(id) => write!(f, "scan selects undeclared component {id}"),
            Self::CorruptScan => write!(f, "corrupt entropy-coded data"),
            Self::MissingCode(symbol) => write!(f, "no Huffman code for symbol {symbol:#04X}"),
        }
    }
}

impl std::error::Error for JpegError {}

pub type Result<T> = std::result::Result<T, JpegError>;
