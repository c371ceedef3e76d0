// Copyright (c) 2026 The stegojpeg developers
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/stegojpeg/stegojpeg

//! Baseline JPEG encoder producing DCT-domain coefficient planes.
//!
//! The encode path is split in two so callers can modify coefficients
//! between the stages (steganographic embedding happens there):
//!
//! 1. [`Encoder::transform`] converts the RGB raster to YCbCr, applies the
//!    forward DCT and quality-scaled quantization per 8×8 block, and returns
//!    one zigzag-ordered coefficient plane per component.
//! 2. [`Encoder::write_jpeg`] serializes the planes into a complete baseline
//!    JPEG: SOI, APP0/JFIF, COM type 0 (attribution), COM type 1 (payload
//!    length), COM type 2 (encrypted password), DQT ×2, SOF0, DHT ×4, SOS,
//!    Huffman-coded scan data, EOI.

use super::bitio::BitWriter;
use super::dct::{ForwardDct, QuantTable};
use super::error::Result;
use super::huffman::{encode_value, HuffmanEncodeTable};
use super::marker;
use super::tables::{
    STD_AC_CHROMA_BITS, STD_AC_CHROMA_VALUES, STD_AC_LUMA_BITS, STD_AC_LUMA_VALUES,
    STD_DC_CHROMA_BITS, STD_DC_CHROMA_VALUES, STD_DC_LUMA_BITS, STD_DC_LUMA_VALUES,
};
use super::zigzag::to_zigzag;
use crate::config::{
    BITS_PER_MCU, BLOCK_PIXELS, BLOCK_SIZE, COMMENT_TYPE_GENERIC, COMMENT_TYPE_MSG_LEN,
    COMMENT_TYPE_PASSWORD, NUM_COMPONENTS, STEGO_ATTRIBUTION,
};

const COMPONENT_IDS: [u8; NUM_COMPONENTS] = [1, 2, 3];
const QUANT_TABLE_NUMBERS: [u8; NUM_COMPONENTS] = [0, 1, 1];
const DC_TABLE_NUMBERS: [u8; NUM_COMPONENTS] = [0, 1, 1];
const AC_TABLE_NUMBERS: [u8; NUM_COMPONENTS] = [0, 1, 1];

/// Indices into the four-table array: [DC luma, AC luma, DC chroma, AC chroma].
const TABLE_DC_LUMA: usize = 0;
const TABLE_AC_LUMA: usize = 1;
const TABLE_DC_CHROMA: usize = 2;
const TABLE_AC_CHROMA: usize = 3;

/// Baseline JPEG encoder for an image whose dimensions are multiples of 8.
pub struct Encoder {
    width: u16,
    height: u16,
    mcu_cols: usize,
    mcu_rows: usize,
    total_mcus: usize,
    /// Quantization values in zigzag order, matching coefficient order.
    quant_zigzag: [u16; 64],
}

impl Encoder {
    /// Create an encoder. `width` and `height` must be non-zero multiples
    /// of 8 (the orchestrator crops the raster beforehand).
    pub fn new(width: u16, height: u16, quality: u8) -> Self {
        debug_assert!(width > 0 && height > 0);
        debug_assert!(width % BLOCK_SIZE as u16 == 0 && height % BLOCK_SIZE as u16 == 0);

        let quant = QuantTable::for_quality(quality);
        let mcu_cols = width as usize / BLOCK_SIZE;
        let mcu_rows = height as usize / BLOCK_SIZE;

        Self {
            width,
            height,
            mcu_cols,
            mcu_rows,
            total_mcus: mcu_cols * mcu_rows,
            quant_zigzag: to_zigzag(&quant.values),
        }
    }

    /// Maximum payload bytes this image can carry.
    pub fn capacity_bytes(&self) -> usize {
        self.total_mcus * BITS_PER_MCU / 8
    }

    /// Number of 8×8 blocks per plane.
    pub fn total_mcus(&self) -> usize {
        self.total_mcus
    }

    /// Convert the raster to quantized, zigzag-ordered coefficient planes
    /// (Y, Cb, Cr), each `total_mcus * 64` values long.
    ///
    /// - `rgb`: packed RGB8 pixels; row `y` starts at `y * row_stride * 3`.
    /// - `row_stride`: raster row length in pixels (≥ `width`; larger when
    ///   the caller crops a wider source).
    pub fn transform(&self, rgb: &[u8], row_stride: usize) -> Vec<Vec<i16>> {
        let ycbcr = self.convert_to_ycbcr(rgb, row_stride);
        self.transform_planes(&ycbcr)
    }

    /// Serialize coefficient planes into a complete JPEG byte stream.
    ///
    /// - `planes`: the (possibly modified) output of [`Encoder::transform`].
    /// - `message_length`: byte count recorded in the type-1 comment.
    /// - `password_blob`: Base64 AES ciphertext for the type-2 comment.
    pub fn write_jpeg(
        &self,
        planes: &[Vec<i16>],
        message_length: u32,
        password_blob: &str,
    ) -> Result<Vec<u8>> {
        debug_assert_eq!(planes.len(), NUM_COMPONENTS);

        let mut out = Vec::new();
        write_soi(&mut out);
        write_jfif_segment(&mut out);
        write_attribution_segment(&mut out);
        write_message_length_segment(&mut out, message_length);
        write_password_segment(&mut out, password_blob);
        self.write_quantization_tables(&mut out);
        self.write_start_of_frame(&mut out);
        let tables = write_huffman_tables(&mut out);
        write_start_of_scan(&mut out);
        self.write_entropy_coded_data(&mut out, planes, &tables)?;
        write_eoi(&mut out);

        Ok(out)
    }

    /// RGB → YCbCr conversion, one byte plane per component.
    fn convert_to_ycbcr(&self, rgb: &[u8], row_stride: usize) -> [Vec<u8>; NUM_COMPONENTS] {
        let w = self.width as usize;
        let h = self.height as usize;
        let mut planes = [vec![0u8; w * h], vec![0u8; w * h], vec![0u8; w * h]];

        for y in 0..h {
            for x in 0..w {
                let src = (y * row_stride + x) * 3;
                let r = rgb[src] as f64;
                let g = rgb[src + 1] as f64;
                let b = rgb[src + 2] as f64;

                let dst = y * w + x;
                planes[0][dst] = clamp_pixel(0.299 * r + 0.587 * g + 0.114 * b);
                planes[1][dst] = clamp_pixel(-0.1687 * r - 0.3313 * g + 0.5 * b + 128.0);
                planes[2][dst] = clamp_pixel(0.5 * r - 0.4187 * g - 0.0813 * b + 128.0);
            }
        }

        planes
    }

    /// Level shift, forward DCT, quantize, and zigzag every block of every
    /// plane.
    fn transform_planes(&self, ycbcr: &[Vec<u8>; NUM_COMPONENTS]) -> Vec<Vec<i16>> {
        let dct = ForwardDct::new();
        let w = self.width as usize;
        let mut planes = Vec::with_capacity(NUM_COMPONENTS);

        for pixels in ycbcr.iter() {
            let mut coefficients = vec![0i16; self.total_mcus * BLOCK_PIXELS];
            let mut block = [[0i16; BLOCK_SIZE]; BLOCK_SIZE];

            for mcu_row in 0..self.mcu_rows {
                for mcu_col in 0..self.mcu_cols {
                    let base_y = mcu_row * BLOCK_SIZE;
                    let base_x = mcu_col * BLOCK_SIZE;

                    for (row, block_row) in block.iter_mut().enumerate() {
                        for (col, v) in block_row.iter_mut().enumerate() {
                            *v = pixels[(base_y + row) * w + base_x + col] as i16 - 128;
                        }
                    }

                    let dct_block = dct.transform(&block);
                    let mut flat = [0i16; BLOCK_PIXELS];
                    for (i, v) in flat.iter_mut().enumerate() {
                        *v = dct_block[i / BLOCK_SIZE][i % BLOCK_SIZE];
                    }
                    let zz = to_zigzag(&flat);

                    let offset = (mcu_row * self.mcu_cols + mcu_col) * BLOCK_PIXELS;
                    for (i, &coeff) in zz.iter().enumerate() {
                        let q = self.quant_zigzag[i] as f64;
                        coefficients[offset + i] = (coeff as f64 / q).round() as i16;
                    }
                }
            }

            planes.push(coefficients);
        }

        planes
    }

    /// Two DQT segments with table IDs 0 and 1 and identical payloads.
    ///
    /// Table 1 exists only so the chroma SOF0 entries can reference it; all
    /// planes are quantized with the same luminance-derived matrix.
    fn write_quantization_tables(&self, out: &mut Vec<u8>) {
        for table_id in 0..2u8 {
            out.push(0xFF);
            out.push(marker::DQT);
            out.push(0x00);
            out.push(0x43); // 2 length bytes + 1 header + 64 values
            out.push(table_id); // precision 0 (8-bit) in the high nibble
            for &v in &self.quant_zigzag {
                out.push(v as u8);
            }
        }
    }

    fn write_start_of_frame(&self, out: &mut Vec<u8>) {
        let segment_length = 8 + 3 * NUM_COMPONENTS as u16;
        out.push(0xFF);
        out.push(marker::SOF0);
        out.extend_from_slice(&segment_length.to_be_bytes());
        out.push(8); // sample precision
        out.extend_from_slice(&self.height.to_be_bytes());
        out.extend_from_slice(&self.width.to_be_bytes());
        out.push(NUM_COMPONENTS as u8);
        for i in 0..NUM_COMPONENTS {
            out.push(COMPONENT_IDS[i]);
            out.push(0x11); // 1×1 sampling
            out.push(QUANT_TABLE_NUMBERS[i]);
        }
    }

    fn write_entropy_coded_data(
        &self,
        out: &mut Vec<u8>,
        planes: &[Vec<i16>],
        tables: &[HuffmanEncodeTable; 4],
    ) -> Result<()> {
        let table_pairs: [(usize, usize); NUM_COMPONENTS] = [
            (TABLE_DC_LUMA, TABLE_AC_LUMA),
            (TABLE_DC_CHROMA, TABLE_AC_CHROMA),
            (TABLE_DC_CHROMA, TABLE_AC_CHROMA),
        ];
        let mut dc_predictions = [0i16; NUM_COMPONENTS];

        let mut writer = BitWriter::new();
        for mcu in 0..self.total_mcus {
            let offset = mcu * BLOCK_PIXELS;
            for (ci, plane) in planes.iter().enumerate() {
                let block = &plane[offset..offset + BLOCK_PIXELS];
                let (dc_idx, ac_idx) = table_pairs[ci];
                write_huffman_block(
                    &mut writer,
                    block,
                    dc_predictions[ci],
                    &tables[dc_idx],
                    &tables[ac_idx],
                )?;
                dc_predictions[ci] = block[0];
            }
        }

        out.extend_from_slice(&writer.flush());
        Ok(())
    }
}

/// Huffman-encode one zigzag-ordered block: differential DC, then
/// (run, size) AC symbols with ZRL and EOB.
fn write_huffman_block(
    writer: &mut BitWriter,
    coeffs: &[i16],
    previous_dc: i16,
    dc_table: &HuffmanEncodeTable,
    ac_table: &HuffmanEncodeTable,
) -> Result<()> {
    // DC coefficient (differential)
    let dc_diff = coeffs[0] - previous_dc;
    let (dc_bits, dc_category) = encode_value(dc_diff);
    let (code, size) = dc_table.encode(dc_category)?;
    writer.write_bits(code, size);
    if dc_category > 0 {
        writer.write_bits(dc_bits, dc_category);
    }

    // AC coefficients
    let mut zero_run = 0usize;
    for &coeff in &coeffs[1..BLOCK_PIXELS] {
        if coeff == 0 {
            zero_run += 1;
            continue;
        }
        while zero_run >= 16 {
            let (code, size) = ac_table.encode(0xF0)?; // ZRL
            writer.write_bits(code, size);
            zero_run -= 16;
        }
        let (ac_bits, ac_category) = encode_value(coeff);
        let symbol = ((zero_run as u8) << 4) | ac_category;
        let (code, size) = ac_table.encode(symbol)?;
        writer.write_bits(code, size);
        writer.write_bits(ac_bits, ac_category);
        zero_run = 0;
    }
    if zero_run > 0 {
        let (code, size) = ac_table.encode(0x00)?; // EOB
        writer.write_bits(code, size);
    }

    Ok(())
}

fn clamp_pixel(value: f64) -> u8 {
    (value as i32).clamp(0, 255) as u8
}

fn write_soi(out: &mut Vec<u8>) {
    out.push(0xFF);
    out.push(marker::SOI);
}

fn write_eoi(out: &mut Vec<u8>) {
    out.push(0xFF);
    out.push(marker::EOI);
}

/// APP0/JFIF segment: version 1.1, aspect-ratio units, 1×1 density,
/// no thumbnail.
fn write_jfif_segment(out: &mut Vec<u8>) {
    out.extend_from_slice(&[
        0xFF, marker::APP0, //
        0x00, 0x10, // length 16
        0x4A, 0x46, 0x49, 0x46, 0x00, // "JFIF\0"
        0x01, 0x01, // version 1.1
        0x00, // units
        0x00, 0x01, 0x00, 0x01, // density 1×1
        0x00, 0x00, // no thumbnail
    ]);
}

fn write_typed_comment(out: &mut Vec<u8>, type_id: u8, payload: &[u8]) {
    let segment_length = (2 + 1 + payload.len()) as u16;
    out.push(0xFF);
    out.push(marker::COM);
    out.extend_from_slice(&segment_length.to_be_bytes());
    out.push(type_id);
    out.extend_from_slice(payload);
}

fn write_attribution_segment(out: &mut Vec<u8>) {
    write_typed_comment(out, COMMENT_TYPE_GENERIC, STEGO_ATTRIBUTION.as_bytes());
}

fn write_message_length_segment(out: &mut Vec<u8>, payload_len: u32) {
    write_typed_comment(out, COMMENT_TYPE_MSG_LEN, &payload_len.to_be_bytes());
}

fn write_password_segment(out: &mut Vec<u8>, password_blob: &str) {
    write_typed_comment(out, COMMENT_TYPE_PASSWORD, password_blob.as_bytes());
}

/// Four DHT segments in file order: DC luma (0x00), AC luma (0x10),
/// DC chroma (0x01), AC chroma (0x11). Returns the encode tables in the
/// internal [DC luma, AC luma, DC chroma, AC chroma] order.
fn write_huffman_tables(out: &mut Vec<u8>) -> [HuffmanEncodeTable; 4] {
    write_dht_segment(out, 0x00, &STD_DC_LUMA_BITS, &STD_DC_LUMA_VALUES);
    write_dht_segment(out, 0x10, &STD_AC_LUMA_BITS, &STD_AC_LUMA_VALUES);
    write_dht_segment(out, 0x01, &STD_DC_CHROMA_BITS, &STD_DC_CHROMA_VALUES);
    write_dht_segment(out, 0x11, &STD_AC_CHROMA_BITS, &STD_AC_CHROMA_VALUES);

    [
        HuffmanEncodeTable::build(&STD_DC_LUMA_BITS, &STD_DC_LUMA_VALUES),
        HuffmanEncodeTable::build(&STD_AC_LUMA_BITS, &STD_AC_LUMA_VALUES),
        HuffmanEncodeTable::build(&STD_DC_CHROMA_BITS, &STD_DC_CHROMA_VALUES),
        HuffmanEncodeTable::build(&STD_AC_CHROMA_BITS, &STD_AC_CHROMA_VALUES),
    ]
}

fn write_dht_segment(out: &mut Vec<u8>, class_and_id: u8, bits: &[u8; 16], values: &[u8]) {
    let segment_length = (2 + 1 + 16 + values.len()) as u16;
    out.push(0xFF);
    out.push(marker::DHT);
    out.extend_from_slice(&segment_length.to_be_bytes());
    out.push(class_and_id);
    out.extend_from_slice(bits);
    out.extend_from_slice(values);
}

fn write_start_of_scan(out: &mut Vec<u8>) {
    let segment_length = (6 + 2 * NUM_COMPONENTS) as u16;
    out.push(0xFF);
    out.push(marker::SOS);
    out.extend_from_slice(&segment_length.to_be_bytes());
    out.push(NUM_COMPONENTS as u8);
    for i in 0..NUM_COMPONENTS {
        out.push(COMPONENT_IDS[i]);
        out.push((DC_TABLE_NUMBERS[i] << 4) | AC_TABLE_NUMBERS[i]);
    }
    out.push(0x00); // Ss
    out.push(0x3F); // Se = 63
    out.push(0x00); // Ah = Al = 0
}
