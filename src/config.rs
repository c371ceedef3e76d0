// Copyright (c) 2026 The stegojpeg developers
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/stegojpeg/stegojpeg

//! Central configuration: pipeline constants and runtime crypto options.
//!
//! The crypto options (`STEGO_AES_KEY`, `STEGO_AES_IV`, `STEGO_CAESAR_KEY`)
//! are read from the process environment with silent fallback to compiled-in
//! defaults. AES values must be exactly 16 UTF-8 bytes; the Caesar key must
//! parse as an integer and is reduced to a byte.

/// JPEG block dimension (8×8 pixels).
pub const BLOCK_SIZE: usize = 8;
/// Coefficients per block (64).
pub const BLOCK_PIXELS: usize = BLOCK_SIZE * BLOCK_SIZE;

/// Number of colour components (Y, Cb, Cr).
pub const NUM_COMPONENTS: usize = 3;

/// Component index used for embedding (Cb = 1).
pub const STEGO_CHANNEL: usize = 1;

/// Bits embedded per MCU (16 zigzag positions).
pub const BITS_PER_MCU: usize = 16;

/// Comment type ID for generic attribution comments.
pub const COMMENT_TYPE_GENERIC: u8 = 0;
/// Comment type ID for the message byte-length record.
pub const COMMENT_TYPE_MSG_LEN: u8 = 1;
/// Comment type ID for the encrypted password blob.
pub const COMMENT_TYPE_PASSWORD: u8 = 2;

/// Attribution string carried in the type-0 comment segment.
pub const STEGO_ATTRIBUTION: &str = "created using gaurav's image-steganography";

/// Zigzag-index patterns used to embed / extract message bits.
///
/// Four patterns over the mid-frequency positions 25..=40 are cycled
/// MCU-by-MCU so that the touched coefficients are spread uniformly over
/// the 16 slots across the image.
pub const EMBEDDING_PATTERNS: [[usize; BITS_PER_MCU]; 4] = [
    [25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40],
    [40, 39, 38, 37, 36, 35, 34, 33, 32, 31, 30, 29, 28, 27, 26, 25],
    [28, 27, 26, 25, 29, 30, 31, 32, 33, 34, 35, 36, 40, 39, 38, 37],
    [25, 26, 27, 28, 36, 35, 34, 33, 32, 31, 30, 29, 37, 38, 39, 40],
];

const AES_PARAM_LEN: usize = 16;
const DEFAULT_AES_KEY: &[u8; AES_PARAM_LEN] = b"juccqhjyodhhfymt";
const DEFAULT_AES_IV: &[u8; AES_PARAM_LEN] = b"blnzllpshgivhxjk";
const DEFAULT_CAESAR_KEY: u8 = 2;

/// Runtime crypto configuration for the embedding pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StegoConfig {
    /// AES-128 key for the password blob (16 bytes, UTF-8).
    pub aes_key: [u8; AES_PARAM_LEN],
    /// AES-128 IV for the password blob (16 bytes, UTF-8).
    pub aes_iv: [u8; AES_PARAM_LEN],
    /// Base Caesar shift applied to the message before embedding.
    pub caesar_key: u8,
}

impl Default for StegoConfig {
    fn default() -> Self {
        Self {
            aes_key: *DEFAULT_AES_KEY,
            aes_iv: *DEFAULT_AES_IV,
            caesar_key: DEFAULT_CAESAR_KEY,
        }
    }
}

impl StegoConfig {
    /// Build a configuration from the process environment.
    ///
    /// Unset, empty, or invalid values fall back to the defaults without
    /// reporting an error.
    pub fn from_env() -> Self {
        Self {
            aes_key: aes_param(env_value("STEGO_AES_KEY").as_deref(), DEFAULT_AES_KEY),
            aes_iv: aes_param(env_value("STEGO_AES_IV").as_deref(), DEFAULT_AES_IV),
            caesar_key: caesar_param(env_value("STEGO_CAESAR_KEY").as_deref(), DEFAULT_CAESAR_KEY),
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an AES key/IV option. Anything other than exactly 16 UTF-8 bytes
/// falls back.
fn aes_param(value: Option<&str>, fallback: &[u8; AES_PARAM_LEN]) -> [u8; AES_PARAM_LEN] {
    let mut out = *fallback;
    if let Some(v) = value {
        let bytes = v.trim().as_bytes();
        if bytes.len() == AES_PARAM_LEN {
            out.copy_from_slice(bytes);
        }
    }
    out
}

/// Parse the Caesar key option. Non-numeric values fall back; numeric values
/// are reduced modulo 256.
fn caesar_param(value: Option<&str>, fallback: u8) -> u8 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .map(|v| (v & 0xFF) as u8)
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = StegoConfig::default();
        assert_eq!(&cfg.aes_key, b"juccqhjyodhhfymt");
        assert_eq!(&cfg.aes_iv, b"blnzllpshgivhxjk");
        assert_eq!(cfg.caesar_key, 2);
    }

    #[test]
    fn aes_param_accepts_exact_length() {
        let v = aes_param(Some("0123456789abcdef"), DEFAULT_AES_KEY);
        assert_eq!(&v, b"0123456789abcdef");
    }

    #[test]
    fn aes_param_rejects_wrong_length() {
        assert_eq!(&aes_param(Some("short"), DEFAULT_AES_KEY), DEFAULT_AES_KEY);
        assert_eq!(
            &aes_param(Some("0123456789abcdef0"), DEFAULT_AES_KEY),
            DEFAULT_AES_KEY
        );
        assert_eq!(&aes_param(None, DEFAULT_AES_KEY), DEFAULT_AES_KEY);
    }

    #[test]
    fn aes_param_trims_whitespace() {
        let v = aes_param(Some("  0123456789abcdef  "), DEFAULT_AES_KEY);
        assert_eq!(&v, b"0123456789abcdef");
    }

    #[test]
    fn caesar_param_parses() {
        assert_eq!(caesar_param(Some("7"), 2), 7);
        assert_eq!(caesar_param(Some(" 19 "), 2), 19);
    }

    #[test]
    fn caesar_param_masks_to_byte() {
        assert_eq!(caesar_param(Some("258"), 2), 2);
        assert_eq!(caesar_param(Some("511"), 2), 255);
    }

    #[test]
    fn caesar_param_falls_back_on_garbage() {
        assert_eq!(caesar_param(Some("abc"), 2), 2);
        assert_eq!(caesar_param(None, 2), 2);
    }

    #[test]
    fn patterns_cover_mid_frequencies() {
        for pattern in &EMBEDDING_PATTERNS {
            let mut seen = [false; BLOCK_PIXELS];
            for &idx in pattern {
                assert!((25..=40).contains(&idx));
                assert!(!seen[idx], "duplicate position {idx}");
                seen[idx] = true;
            }
        }
    }
}
