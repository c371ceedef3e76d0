// Copyright (c) 2026 The stegojpeg developers
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/stegojpeg/stegojpeg

//! Canonical Huffman coding for JPEG entropy encoding and decoding.
//!
//! [`HuffmanEncodeTable`] builds the standard-procedure symbol→(code, size)
//! lookup (ITU-T T.81 Figures C.1–C.3). [`HuffmanDecodeTable`] decodes with
//! a 9-bit fast table and a canonical `max_code`/`delta` fallback for codes
//! of 10–16 bits.

use super::bitio::BitReader;
use super::error::{JpegError, Result};

/// Width of the fast decode lookup in bits.
pub const FAST_BITS: u8 = 9;

const FAST_SENTINEL: u16 = u16::MAX;

/// Huffman decode table with two-tier lookup.
///
/// Tier 1: 512-entry table mapping the next 9 bits to a symbol index.
/// Tier 2: canonical decode for longer codes via per-length `max_code`
/// bounds (left-aligned to 16 bits) and index deltas.
pub struct HuffmanDecodeTable {
    /// Fast lookup: symbol index for codes up to [`FAST_BITS`] long,
    /// [`FAST_SENTINEL`] for longer codes.
    fast: [u16; 1 << FAST_BITS],
    /// Symbol values in code-length order.
    values: Vec<u8>,
    /// Code length for each symbol index.
    sizes: Vec<u8>,
    /// Upper bound of canonical codes at each bit length, left-aligned to
    /// 16 bits. Index 17 is an always-true sentinel.
    max_code: [u32; 18],
    /// Delta converting a right-aligned code value to a symbol index.
    delta: [i32; 17],
}

impl HuffmanDecodeTable {
    /// Build a decode table from JPEG-style counts and symbols.
    ///
    /// `bits[i]` is the number of codes of length `i + 1`; `values` holds the
    /// symbols in order of increasing code length.
    pub fn build(bits: &[u8; 16], values: &[u8]) -> Result<Self> {
        let total: usize = bits.iter().map(|&b| b as usize).sum();
        if values.len() < total {
            return Err(JpegError::Table("symbol list shorter than the code-length counts"));
        }

        let mut sizes = Vec::with_capacity(total);
        for (len_idx, &count) in bits.iter().enumerate() {
            for _ in 0..count {
                sizes.push(len_idx as u8 + 1);
            }
        }

        // Canonical code assignment (ITU-T T.81 Annex C).
        let mut codes = vec![0u32; total];
        let mut max_code = [0u32; 18];
        let mut delta = [0i32; 17];
        let mut code = 0u32;
        let mut k = 0usize;
        for bit_len in 1..=16usize {
            delta[bit_len] = k as i32 - code as i32;
            while k < total && sizes[k] as usize == bit_len {
                codes[k] = code;
                k += 1;
                code += 1;
            }
            if code > (1u32 << bit_len) {
                return Err(JpegError::Table("code lengths oversubscribe the code space"));
            }
            max_code[bit_len] = code << (16 - bit_len);
            code <<= 1;
        }
        max_code[17] = u32::MAX;

        let mut fast = [FAST_SENTINEL; 1 << FAST_BITS];
        for i in 0..total {
            let size = sizes[i];
            if size <= FAST_BITS {
                let base = (codes[i] << (FAST_BITS - size)) as usize;
                let span = 1usize << (FAST_BITS - size);
                for entry in fast.iter_mut().skip(base).take(span) {
                    *entry = i as u16;
                }
            }
        }

        Ok(Self {
            fast,
            values: values[..total].to_vec(),
            sizes,
            max_code,
            delta,
        })
    }

    /// Decode one Huffman symbol from the bit stream.
    pub fn decode(&self, reader: &mut BitReader) -> Result<u8> {
        let peek = reader.peek_bits(FAST_BITS)?;
        let idx = self.fast[peek as usize];
        if idx != FAST_SENTINEL {
            let idx = idx as usize;
            reader.skip_bits(self.sizes[idx]);
            return Ok(self.values[idx]);
        }

        // Codes longer than FAST_BITS: compare the next 16 bits against the
        // left-aligned per-length bounds.
        let code = reader.peek_bits(16)? as u32;
        let mut len = (FAST_BITS + 1) as usize;
        while len <= 16 && code >= self.max_code[len] {
            len += 1;
        }
        if len > 16 {
            return Err(JpegError::CorruptScan);
        }
        let index = (code >> (16 - len)) as i32 + self.delta[len];
        if index < 0 || index as usize >= self.values.len() {
            return Err(JpegError::CorruptScan);
        }
        reader.skip_bits(len as u8);
        Ok(self.values[index as usize])
    }
}

/// Huffman encode table: symbol → (code, size) for all 256 symbol values.
pub struct HuffmanEncodeTable {
    /// Size 0 means the symbol has no code in this table.
    table: [(u16, u8); 256],
}

impl HuffmanEncodeTable {
    /// Build an encode table from JPEG-style counts and symbols.
    pub fn build(bits: &[u8; 16], values: &[u8]) -> Self {
        let mut table = [(0u16, 0u8); 256];
        let mut code: u32 = 0;
        let mut si = 0usize;

        for length in 1..=16u8 {
            let count = bits[(length - 1) as usize] as usize;
            for _ in 0..count {
                if si < values.len() {
                    table[values[si] as usize] = (code as u16, length);
                    si += 1;
                }
                code += 1;
            }
            code <<= 1;
        }

        Self { table }
    }

    /// Encode a symbol: returns (code, size).
    pub fn encode(&self, symbol: u8) -> Result<(u16, u8)> {
        let (code, size) = self.table[symbol as usize];
        if size == 0 {
            Err(JpegError::MissingCode(symbol))
        } else {
            Ok((code, size))
        }
    }
}

/// Extend a value from its JPEG "additional bits" representation.
///
/// Per ITU-T T.81 Table F.1: values below the half-range threshold are
/// negative.
pub fn extend_sign(value: u16, bits: u8) -> i16 {
    if bits == 0 {
        return 0;
    }
    let half = 1i32 << (bits - 1);
    if (value as i32) < half {
        (value as i32 - (1i32 << bits) + 1) as i16
    } else {
        value as i16
    }
}

/// Encode a signed value into JPEG "additional bits" representation.
/// Returns (magnitude_bits, category).
pub fn encode_value(value: i16) -> (u16, u8) {
    if value == 0 {
        return (0, 0);
    }
    let abs = value.unsigned_abs();
    let size = 16 - abs.leading_zeros() as u8;
    let bits = if value > 0 {
        value as u16
    } else {
        // Negative values use one's complement of the magnitude.
        (value - 1) as u16
    };
    (bits & ((1u16 << size) - 1), size)
}
