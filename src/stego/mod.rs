// Copyright (c) 2026 The stegojpeg developers
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/stegojpeg/stegojpeg

//! Steganographic embedding on top of the JPEG coefficient codec.
//!
//! The embedding hides message bits in the LSBs of quantized Cb-plane DCT
//! coefficients at 16 mid-frequency zigzag positions per MCU, cycling
//! through four fixed position patterns. Message bytes are obfuscated with
//! a position-dependent Caesar shift before embedding; the password is
//! stored AES-128-CBC-encrypted (Base64) in a typed comment segment and
//! checked by byte equality on decode.
//!
//! Neither layer is cryptographically strong; both are obfuscation and an
//! equality check, part of the on-disk format contract.

pub mod caesar;
pub mod capacity;
pub mod crypto;
pub mod embed;
pub mod error;
pub mod pipeline;

pub use error::StegoError;
pub use pipeline::{analyze, analyze_with, decode, decode_with, encode, encode_with, StegoAnalysis};
