// Copyright (c) 2026 The stegojpeg developers
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/stegojpeg/stegojpeg

//! # stegojpeg
//!
//! Baseline JPEG codec with DCT-domain steganographic embedding. Encodes an
//! RGB raster into a standards-conformant baseline JPEG while hiding a byte
//! sequence in the least-significant bits of selected quantized DCT
//! coefficients of the Cb plane, and parses the same byte stream back to
//! recover the hidden message.
//!
//! The JPEG layer (`jpeg` module) is a self-contained coefficient codec:
//! forward DCT, quality-scaled quantization, canonical Huffman coding, and
//! the full marker segment grammar (SOI, APP0, COM, DQT, SOF0, DHT, SOS,
//! DRI, RSTn, EOI). The steganography layer (`stego` module) adds the
//! pattern-cycling LSB embedding, the Caesar payload obfuscation, and the
//! AES-128-CBC password blob stored in a comment segment.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use stegojpeg::{encode, decode};
//!
//! let rgb: Vec<u8> = load_rgb_somehow(); // packed RGB8, w * h * 3 bytes
//! let stego = encode(&rgb, 64, 64, "secret message", "passphrase", 80).unwrap();
//! let message = decode(&stego, "passphrase").unwrap();
//! assert_eq!(message, "secret message");
//! ```

pub mod config;
pub mod jpeg;
pub mod stego;

pub use config::StegoConfig;
pub use jpeg::error::{JpegError, Result as JpegResult};
pub use stego::capacity::capacity;
pub use stego::error::StegoError;
pub use stego::pipeline::{
    analyze, analyze_with, decode, decode_with, encode, encode_with, StegoAnalysis,
};
