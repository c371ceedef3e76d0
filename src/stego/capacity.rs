// Copyright (c) 2026 The stegojpeg developers
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/stegojpeg/stegojpeg

//! Embedding capacity for a cover image.

use crate::config::{BITS_PER_MCU, BLOCK_SIZE};

/// Maximum number of message bytes an image of the given pixel dimensions
/// can carry: `(w/8) * (h/8) * 2`.
///
/// Dimensions are truncated to whole blocks, matching the encoder's crop.
pub fn capacity(width: u32, height: u32) -> usize {
    let mcus = (width as usize / BLOCK_SIZE) * (height as usize / BLOCK_SIZE);
    mcus * BITS_PER_MCU / 8
}
