// Copyright (c) 2026 The stegojpeg developers
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/stegojpeg/stegojpeg

//! Baseline JPEG coefficient codec.
//!
//! Writes standards-conformant baseline JPEG files from an RGB raster and
//! parses them back to quantized DCT coefficients without any pixel-domain
//! reconstruction. This is the foundation for steganographic embedding,
//! which operates entirely in the DCT domain.
//!
//! Supports:
//! - Baseline sequential DCT (SOF0/SOF1), 8-bit precision
//! - YCbCr 1:1:1 output; 1- or 3-component input with arbitrary sampling
//! - Restart markers (DRI/RST) on parse
//! - Typed COM sub-segments carrying embedding metadata
//!
//! Does NOT support:
//! - Progressive DCT (SOF2) -- rejected at parse time
//! - Arithmetic coding (SOF9+) -- rejected at parse time
//! - 12-bit precision -- rejected at parse time

pub mod bitio;
pub mod dct;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod huffman;
pub mod marker;
pub mod tables;
pub mod zigzag;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{JpegError, Result};
