// Copyright (c) 2026 The stegojpeg developers
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/stegojpeg/stegojpeg

//! Error types for the steganography pipeline.
//!
//! [`StegoError`] covers all failure modes from raster validation through
//! JPEG parsing and message extraction. [`StegoError::kind`] exposes the
//! stable taxonomy names surfaced to callers.

use core::fmt;

use crate::jpeg::error::JpegError;

/// Errors that can occur during steganographic encoding or decoding.
#[derive(Debug)]
pub enum StegoError {
    /// The input raster is unusable (wrong size, zero post-crop dimension)
    /// or the stored metadata is inconsistent.
    InvalidImage(&'static str),
    /// The JPEG container could not be parsed (bad headers, progressive,
    /// non-8-bit, unsupported structure).
    InvalidJpeg(JpegError),
    /// The entropy-coded scan data is corrupt or truncated.
    MalformedStream(JpegError),
    /// The message exceeds the cover image's embedding capacity.
    MessageTooLong {
        message_bytes: usize,
        capacity_bytes: usize,
    },
    /// The stored password does not match the supplied password.
    InvalidPassword,
    /// No message-length record is present, or the recorded length is not
    /// positive.
    NoHiddenMessage,
}

impl StegoError {
    /// Stable taxonomy name for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidImage(_) | Self::InvalidJpeg(_) => "invalid-image",
            Self::MalformedStream(_) => "malformed-stream",
            Self::MessageTooLong { .. } => "message-too-long",
            Self::InvalidPassword => "invalid-password",
            Self::NoHiddenMessage => "no-hidden-message",
        }
    }
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidImage(msg) => write!(f, "invalid image: {msg}"),
            Self::InvalidJpeg(e) => write!(f, "invalid image: {e}"),
            Self::MalformedStream(e) => write!(f, "malformed JPEG stream: {e}"),
            Self::MessageTooLong {
                message_bytes,
                capacity_bytes,
            } => write!(
                f,
                "message too long: {message_bytes} bytes exceed capacity of {capacity_bytes} bytes"
            ),
            Self::InvalidPassword => write!(f, "invalid password"),
            Self::NoHiddenMessage => write!(f, "no hidden message found in this image"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidJpeg(e) | Self::MalformedStream(e) => Some(e),
            _ => None,
        }
    }
}

impl From<JpegError> for StegoError {
    fn from(e: JpegError) -> Self {
        match e {
            // Scan-level corruption; everything else is a container problem.
            JpegError::CorruptScan | JpegError::Truncated => Self::MalformedStream(e),
            _ => Self::InvalidJpeg(e),
        }
    }
}
