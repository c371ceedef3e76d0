// Copyright (c) 2026 The stegojpeg developers
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/stegojpeg/stegojpeg

//! Encode / decode / analyze orchestration.
//!
//! `encode` crops the raster to whole blocks, checks capacity, obfuscates
//! the message, runs the JPEG transform, embeds the payload into the Cb
//! plane, and serializes the stego JPEG. `decode` parses the container,
//! verifies the stored password, decodes the scan, and extracts the
//! message. `analyze` reports embedding metadata from the headers alone.

use crate::config::{BITS_PER_MCU, BLOCK_SIZE, NUM_COMPONENTS, STEGO_CHANNEL, StegoConfig};
use crate::jpeg::{Decoder, Encoder};
use crate::stego::capacity::capacity;
use crate::stego::embed;
use crate::stego::error::StegoError;
use crate::stego::{caesar, crypto};

/// Embedding metadata reported by [`analyze`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StegoAnalysis {
    /// Image width in pixels.
    pub width: u16,
    /// Image height in pixels.
    pub height: u16,
    /// MCU grid columns.
    pub mcu_cols: usize,
    /// MCU grid rows.
    pub mcu_rows: usize,
    /// Embedded message length in bytes (0 when absent).
    pub message_length_bytes: i32,
    /// Whether a stored password record is present.
    pub has_password: bool,
    /// MCUs carrying payload bits: `ceil(8 * length / 16)`.
    pub used_mcus: usize,
    /// Total embedding capacity in bytes: `mcus * 2`.
    pub total_capacity: usize,
}

/// Hide `message` in `rgb` and return the stego JPEG bytes, using the
/// configuration from the process environment.
///
/// `rgb` is a packed RGB8 raster of `width * height * 3` bytes. Dimensions
/// are cropped down to multiples of 8 before encoding.
pub fn encode(
    rgb: &[u8],
    width: u32,
    height: u32,
    message: &str,
    password: &str,
    quality: u8,
) -> Result<Vec<u8>, StegoError> {
    encode_with(&StegoConfig::from_env(), rgb, width, height, message, password, quality)
}

/// [`encode`] with an explicit configuration.
pub fn encode_with(
    config: &StegoConfig,
    rgb: &[u8],
    width: u32,
    height: u32,
    message: &str,
    password: &str,
    quality: u8,
) -> Result<Vec<u8>, StegoError> {
    if (width as usize)
        .checked_mul(height as usize)
        .and_then(|p| p.checked_mul(3))
        .map_or(true, |need| rgb.len() < need)
    {
        return Err(StegoError::InvalidImage("raster shorter than width * height * 3"));
    }

    // Crop to whole 8×8 blocks (top-left window).
    let cropped_w = width as usize / BLOCK_SIZE * BLOCK_SIZE;
    let cropped_h = height as usize / BLOCK_SIZE * BLOCK_SIZE;
    if cropped_w == 0 || cropped_h == 0 {
        return Err(StegoError::InvalidImage("image smaller than one 8x8 block"));
    }
    if cropped_w > u16::MAX as usize || cropped_h > u16::MAX as usize {
        return Err(StegoError::InvalidImage("image dimension exceeds 65535"));
    }

    let capacity_bytes = capacity(cropped_w as u32, cropped_h as u32);
    let message_bytes = message.len();
    if message_bytes > capacity_bytes {
        return Err(StegoError::MessageTooLong {
            message_bytes,
            capacity_bytes,
        });
    }

    log::debug!(
        "encoding {message_bytes}-byte message into {cropped_w}x{cropped_h} cover \
         (capacity {capacity_bytes} bytes, quality {quality})"
    );

    let payload = caesar::encrypt(message, config.caesar_key);
    let password_blob = crypto::encrypt(&config.aes_key, &config.aes_iv, password);

    let encoder = Encoder::new(cropped_w as u16, cropped_h as u16, quality);
    let mut planes = encoder.transform(rgb, width as usize);
    embed::embed_payload(&mut planes[STEGO_CHANNEL], &payload);

    let bytes = encoder.write_jpeg(&planes, payload.len() as u32, &password_blob)?;
    Ok(bytes)
}

/// Extract the hidden message from a stego JPEG, using the configuration
/// from the process environment.
pub fn decode(jpeg_bytes: &[u8], password: &str) -> Result<String, StegoError> {
    decode_with(&StegoConfig::from_env(), jpeg_bytes, password)
}

/// [`decode`] with an explicit configuration.
pub fn decode_with(
    config: &StegoConfig,
    jpeg_bytes: &[u8],
    password: &str,
) -> Result<String, StegoError> {
    let mut decoder = Decoder::new(jpeg_bytes);
    decoder.read_headers()?;

    let stored_password = match decoder.password_blob() {
        Some(blob) => Some(
            crypto::decrypt(&config.aes_key, &config.aes_iv, blob)
                .map_err(|_| StegoError::InvalidImage("stored password blob is corrupt"))?,
        ),
        None => None,
    };
    if stored_password.as_deref() != Some(password) {
        return Err(StegoError::InvalidPassword);
    }

    let message_length = decoder.message_length();
    if message_length <= 0 {
        return Err(StegoError::NoHiddenMessage);
    }
    let message_length = message_length as usize;

    let total_mcus = decoder.mcu_cols() * decoder.mcu_rows();
    if embed::required_mcus(message_length) > total_mcus {
        return Err(StegoError::InvalidImage("declared message length exceeds capacity"));
    }

    let planes = decoder.decode_coefficients()?;
    if planes.len() < NUM_COMPONENTS {
        return Err(StegoError::InvalidImage("missing chroma components"));
    }

    log::debug!(
        "extracting {message_length}-byte message from {} MCUs",
        embed::required_mcus(message_length)
    );

    let payload = embed::extract_payload(&planes[STEGO_CHANNEL], message_length);
    Ok(caesar::decrypt(&payload, config.caesar_key))
}

/// Report embedding metadata for a stego JPEG without extracting the
/// message, using the configuration from the process environment.
pub fn analyze(jpeg_bytes: &[u8]) -> Result<StegoAnalysis, StegoError> {
    analyze_with(&StegoConfig::from_env(), jpeg_bytes)
}

/// [`analyze`] with an explicit configuration. No password is required, but
/// a present-and-corrupt password blob is still rejected.
pub fn analyze_with(
    config: &StegoConfig,
    jpeg_bytes: &[u8],
) -> Result<StegoAnalysis, StegoError> {
    let mut decoder = Decoder::new(jpeg_bytes);
    decoder.read_headers()?;

    let has_password = match decoder.password_blob() {
        Some(blob) => {
            crypto::decrypt(&config.aes_key, &config.aes_iv, blob)
                .map_err(|_| StegoError::InvalidImage("stored password blob is corrupt"))?;
            true
        }
        None => false,
    };

    let message_length = decoder.message_length();
    let used_mcus = if message_length > 0 {
        embed::required_mcus(message_length as usize)
    } else {
        0
    };
    let total_mcus = decoder.mcu_cols() * decoder.mcu_rows();

    Ok(StegoAnalysis {
        width: decoder.width(),
        height: decoder.height(),
        mcu_cols: decoder.mcu_cols(),
        mcu_rows: decoder.mcu_rows(),
        message_length_bytes: message_length,
        has_password,
        used_mcus,
        total_capacity: total_mcus * BITS_PER_MCU / 8,
    })
}
