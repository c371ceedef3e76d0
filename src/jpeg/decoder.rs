// Copyright (c) 2026 The stegojpeg developers
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/stegojpeg/stegojpeg

//! Baseline JPEG decoder that extracts raw quantized DCT coefficients.
//!
//! Designed for steganographic extraction: the entropy-coded scan data is
//! decoded into zigzag-ordered coefficients per component without IDCT,
//! dequantization, or chroma upsampling. Header parsing also captures the
//! typed COM sub-segments carrying the embedded message length and the
//! encrypted password blob; decrypting the blob is the caller's concern.

use super::bitio::BitReader;
use super::error::{JpegError, Result};
use super::huffman::{extend_sign, HuffmanDecodeTable};
use super::marker;
use crate::config::{
    BLOCK_PIXELS, COMMENT_TYPE_MSG_LEN, COMMENT_TYPE_PASSWORD,
};

/// One colour component as declared by SOF, with the table references
/// resolved at SOS. Table references are indices into the decoder's
/// per-parse arrays, never owning handles.
#[derive(Debug, Clone)]
pub struct DecoderComponent {
    /// Component ID from SOF (typically 1=Y, 2=Cb, 3=Cr).
    pub id: u8,
    /// Horizontal sampling factor (1–4).
    pub h_sampling: u8,
    /// Vertical sampling factor (1–4).
    pub v_sampling: u8,
    /// Quantization table ID (0–3).
    pub quant_table_id: u8,
    /// DC Huffman table ID, resolved at SOS.
    dc_table: usize,
    /// AC Huffman table ID, resolved at SOS.
    ac_table: usize,
}

/// Streaming baseline JPEG parser and scan decoder over a byte slice.
pub struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,

    width: u16,
    height: u16,
    mcu_cols: usize,
    mcu_rows: usize,
    components: Vec<DecoderComponent>,
    /// Component indices in SOS order.
    scan_order: Vec<usize>,

    /// Dequantization tables in zigzag order, indexed by table ID.
    quant_tables: [[u8; BLOCK_PIXELS]; 4],
    dc_tables: [Option<HuffmanDecodeTable>; 4],
    ac_tables: [Option<HuffmanDecodeTable>; 4],

    restart_interval: u16,

    /// Byte offset of the first entropy-coded byte (set once SOS is parsed).
    scan_start: usize,
    headers_done: bool,

    message_length: i32,
    password_blob: Option<String>,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            width: 0,
            height: 0,
            mcu_cols: 0,
            mcu_rows: 0,
            components: Vec::new(),
            scan_order: Vec::new(),
            quant_tables: [[0u8; BLOCK_PIXELS]; 4],
            dc_tables: [None, None, None, None],
            ac_tables: [None, None, None, None],
            restart_interval: 0,
            scan_start: 0,
            headers_done: false,
            message_length: 0,
            password_blob: None,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn mcu_cols(&self) -> usize {
        self.mcu_cols
    }

    pub fn mcu_rows(&self) -> usize {
        self.mcu_rows
    }

    pub fn components(&self) -> &[DecoderComponent] {
        &self.components
    }

    /// Embedded message length in bytes from the type-1 COM, or 0 if absent.
    pub fn message_length(&self) -> i32 {
        self.message_length
    }

    /// Base64 AES ciphertext from the type-2 COM, if present.
    pub fn password_blob(&self) -> Option<&str> {
        self.password_blob.as_deref()
    }

    /// Dequantization table values (zigzag order) by table ID.
    pub fn quant_table(&self, id: usize) -> &[u8; BLOCK_PIXELS] {
        &self.quant_tables[id]
    }

    /// Parse all header segments up to and including SOS.
    ///
    /// After this returns the dimensions, components, embedded metadata, and
    /// Huffman/quantization tables are available and the cursor points at
    /// the entropy-coded scan data.
    pub fn read_headers(&mut self) -> Result<()> {
        // EOF while hunting for SOI means "not a JPEG", not a truncation.
        let first = self.read_marker().map_err(|_| JpegError::NotAJpeg)?;
        if first != marker::SOI {
            return Err(JpegError::NotAJpeg);
        }

        loop {
            let m = self.read_marker()?;
            match m {
                marker::SOF0 | marker::SOF1 => self.parse_sof()?,
                marker::SOF2 => return Err(JpegError::Progressive),
                marker::SOS => {
                    self.parse_sos()?;
                    self.scan_start = self.pos;
                    self.headers_done = true;
                    log::debug!(
                        "parsed JPEG headers: {}x{}, {} components, {} MCUs, message_length={}",
                        self.width,
                        self.height,
                        self.components.len(),
                        self.mcu_cols * self.mcu_rows,
                        self.message_length,
                    );
                    return Ok(());
                }
                marker::EOI => {
                    return Err(JpegError::Segment("EOI before any scan data"))
                }
                marker::DQT => self.parse_dqt()?,
                marker::DHT => self.parse_dht()?,
                marker::DRI => self.parse_dri()?,
                marker::COM => self.parse_com()?,
                marker::APP0..=marker::APP15 => self.skip_segment()?,
                // Lossless, differential, and arithmetic SOFs land here.
                _ => return Err(JpegError::UnhandledMarker(m)),
            }
        }
    }

    /// Decode the full scan into one zigzag-ordered coefficient buffer per
    /// scan component.
    ///
    /// Blocks are stored in block-raster order; with 1×1 sampling this is
    /// plain MCU order, 64 coefficients per block. A restart marker resets
    /// the DC predictions; a non-restart marker ends the scan early and
    /// leaves the remaining blocks zero.
    pub fn decode_coefficients(&mut self) -> Result<Vec<Vec<i16>>> {
        debug_assert!(self.headers_done, "read_headers must succeed first");

        let mut planes: Vec<Vec<i16>> = self
            .scan_order
            .iter()
            .map(|&ci| {
                let comp = &self.components[ci];
                let blocks = self.mcu_cols
                    * comp.h_sampling as usize
                    * self.mcu_rows
                    * comp.v_sampling as usize;
                vec![0i16; blocks * BLOCK_PIXELS]
            })
            .collect();

        let mut dc_predictions = vec![0i32; self.scan_order.len()];
        let mut reader = BitReader::new(self.data, self.scan_start);
        let mut mcus_until_restart = if self.restart_interval > 0 {
            self.restart_interval as usize
        } else {
            usize::MAX
        };

        'scan: for mcu_row in 0..self.mcu_rows {
            for mcu_col in 0..self.mcu_cols {
                for (si, &ci) in self.scan_order.iter().enumerate() {
                    let comp = &self.components[ci];
                    let dc_table = self.dc_tables[comp.dc_table]
                        .as_ref()
                        .ok_or(JpegError::Table("scan references an undefined DC table"))?;
                    let ac_table = self.ac_tables[comp.ac_table]
                        .as_ref()
                        .ok_or(JpegError::Table("scan references an undefined AC table"))?;

                    let h = comp.h_sampling as usize;
                    let v = comp.v_sampling as usize;
                    let row_blocks = self.mcu_cols * h;

                    for vb in 0..v {
                        for hb in 0..h {
                            let block_row = mcu_row * v + vb;
                            let block_col = mcu_col * h + hb;
                            let offset = (block_row * row_blocks + block_col) * BLOCK_PIXELS;
                            let block = &mut planes[si][offset..offset + BLOCK_PIXELS];
                            decode_block(
                                &mut reader,
                                dc_table,
                                ac_table,
                                &mut dc_predictions[si],
                                block,
                            )?;
                        }
                    }
                }

                mcus_until_restart -= 1;
                if mcus_until_restart == 0 {
                    match reader.check_restart_marker()? {
                        Some(rst) => {
                            log::trace!("restart marker RST{rst} at MCU row {mcu_row}");
                            for pred in &mut dc_predictions {
                                *pred = 0;
                            }
                            mcus_until_restart = self.restart_interval as usize;
                        }
                        // Scan terminated by a non-restart marker; remaining
                        // blocks stay zero.
                        None => break 'scan,
                    }
                }
            }
        }

        Ok(planes)
    }

    // --- header segment parsers ---

    /// Read the next marker code, skipping fill bytes. Non-0xFF bytes before
    /// the marker are skipped (resync), matching lenient baseline parsers.
    fn read_marker(&mut self) -> Result<u8> {
        loop {
            if self.pos + 1 >= self.data.len() {
                return Err(JpegError::Truncated);
            }
            if self.data[self.pos] != 0xFF {
                self.pos += 1;
                continue;
            }
            // Skip fill 0xFF bytes
            while self.pos + 1 < self.data.len() && self.data[self.pos + 1] == 0xFF {
                self.pos += 1;
            }
            if self.pos + 1 >= self.data.len() {
                return Err(JpegError::Truncated);
            }
            let m = self.data[self.pos + 1];
            self.pos += 2;
            if m == 0x00 {
                continue; // stuffed byte, not a marker
            }
            return Ok(m);
        }
    }

    fn read_u8(&mut self) -> Result<u8> {
        if self.pos >= self.data.len() {
            return Err(JpegError::Truncated);
        }
        let b = self.data[self.pos];
        self.pos += 1;
        Ok(b)
    }

    fn read_u16(&mut self) -> Result<u16> {
        Ok(((self.read_u8()? as u16) << 8) | self.read_u8()? as u16)
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.pos + len > self.data.len() {
            return Err(JpegError::Truncated);
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn segment_body_len(&mut self) -> Result<usize> {
        let length = self.read_u16()? as usize;
        if length < 2 {
            return Err(JpegError::Segment("length field below 2"));
        }
        Ok(length - 2)
    }

    fn skip_segment(&mut self) -> Result<()> {
        let len = self.segment_body_len()?;
        self.read_bytes(len)?;
        Ok(())
    }

    /// COM segment: first payload byte selects the sub-format.
    fn parse_com(&mut self) -> Result<()> {
        let mut remaining = self.segment_body_len()?;
        if remaining == 0 {
            return Ok(());
        }

        let type_id = self.read_u8()?;
        remaining -= 1;

        match type_id {
            COMMENT_TYPE_MSG_LEN => {
                if remaining < 4 {
                    return Err(JpegError::Segment("message-length comment shorter than 4 bytes"));
                }
                let bytes = self.read_bytes(4)?;
                self.message_length =
                    i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
                self.read_bytes(remaining - 4)?;
            }
            COMMENT_TYPE_PASSWORD => {
                let bytes = self.read_bytes(remaining)?;
                self.password_blob = Some(String::from_utf8_lossy(bytes).into_owned());
            }
            _ => {
                self.read_bytes(remaining)?;
            }
        }
        Ok(())
    }

    /// DQT segment: one or more 8-bit tables, values kept in zigzag order.
    fn parse_dqt(&mut self) -> Result<()> {
        let mut remaining = self.segment_body_len()?;
        while remaining >= 1 + BLOCK_PIXELS {
            let header = self.read_u8()?;
            let precision = header >> 4;
            let table_id = header & 0x0F;
            if precision != 0 {
                return Err(JpegError::Table("16-bit quantization values"));
            }
            if table_id > 3 {
                return Err(JpegError::Table("quantization slot outside 0..=3"));
            }
            let values = self.read_bytes(BLOCK_PIXELS)?;
            self.quant_tables[table_id as usize].copy_from_slice(values);
            remaining -= 1 + BLOCK_PIXELS;
        }
        if remaining != 0 {
            return Err(JpegError::Segment("DQT length does not cover its tables"));
        }
        Ok(())
    }

    /// DHT segment: one or more tables; each builds its decode structures.
    fn parse_dht(&mut self) -> Result<()> {
        let mut remaining = self.segment_body_len()?;
        while remaining > 17 {
            let header = self.read_u8()?;
            let class = header >> 4;
            let id = header & 0x0F;
            if class > 1 || id > 3 {
                return Err(JpegError::Table("Huffman class or slot outside range"));
            }

            let mut bits = [0u8; 16];
            bits.copy_from_slice(self.read_bytes(16)?);
            let total: usize = bits.iter().map(|&b| b as usize).sum();
            if remaining < 17 + total {
                return Err(JpegError::Segment("DHT length does not cover its tables"));
            }
            let values = self.read_bytes(total)?;
            let table = HuffmanDecodeTable::build(&bits, values)?;
            if class == 0 {
                self.dc_tables[id as usize] = Some(table);
            } else {
                self.ac_tables[id as usize] = Some(table);
            }
            remaining -= 17 + total;
        }
        if remaining != 0 {
            return Err(JpegError::Segment("DHT length does not cover its tables"));
        }
        Ok(())
    }

    fn parse_dri(&mut self) -> Result<()> {
        if self.segment_body_len()? != 2 {
            return Err(JpegError::Segment("DRI length must be 4"));
        }
        self.restart_interval = self.read_u16()?;
        Ok(())
    }

    fn parse_sof(&mut self) -> Result<()> {
        let body_len = self.segment_body_len()?;
        if body_len < 6 {
            return Err(JpegError::Segment("SOF shorter than its fixed fields"));
        }

        let precision = self.read_u8()?;
        if precision != 8 {
            return Err(JpegError::Precision(precision));
        }

        self.height = self.read_u16()?;
        self.width = self.read_u16()?;
        if self.width == 0 || self.height == 0 {
            return Err(JpegError::Geometry);
        }

        let num_components = self.read_u8()? as usize;
        if num_components != 1 && num_components != 3 {
            return Err(JpegError::Segment("component count is not 1 or 3"));
        }
        if body_len != 6 + 3 * num_components {
            return Err(JpegError::Segment("SOF length disagrees with component count"));
        }

        self.components.clear();
        let mut max_h = 1u8;
        let mut max_v = 1u8;

        for _ in 0..num_components {
            let id = self.read_u8()?;
            let sampling = self.read_u8()?;
            let quant_table_id = self.read_u8()?;
            let h_sampling = sampling >> 4;
            let v_sampling = sampling & 0x0F;

            if !(1..=4).contains(&h_sampling) || !(1..=4).contains(&v_sampling) {
                return Err(JpegError::Geometry);
            }
            if quant_table_id > 3 {
                return Err(JpegError::Table("quantization slot outside 0..=3"));
            }

            max_h = max_h.max(h_sampling);
            max_v = max_v.max(v_sampling);
            self.components.push(DecoderComponent {
                id,
                h_sampling,
                v_sampling,
                quant_table_id,
                dc_table: 0,
                ac_table: 0,
            });
        }

        let mcu_width = max_h as usize * 8;
        let mcu_height = max_v as usize * 8;
        self.mcu_cols = (self.width as usize + mcu_width - 1) / mcu_width;
        self.mcu_rows = (self.height as usize + mcu_height - 1) / mcu_height;
        Ok(())
    }

    fn parse_sos(&mut self) -> Result<()> {
        let body_len = self.segment_body_len()?;
        let num_components = self.read_u8()? as usize;
        if num_components < 1 || num_components > 4 {
            return Err(JpegError::Segment("SOS component count outside 1..=4"));
        }
        if body_len != 4 + 2 * num_components {
            return Err(JpegError::Segment("SOS length disagrees with component count"));
        }
        if self.components.is_empty() {
            return Err(JpegError::Segment("SOS before SOF"));
        }

        self.scan_order.clear();
        for _ in 0..num_components {
            let comp_id = self.read_u8()?;
            let table_spec = self.read_u8()?;
            let dc_id = (table_spec >> 4) as usize;
            let ac_id = (table_spec & 0x0F) as usize;
            if dc_id > 3 || ac_id > 3 {
                return Err(JpegError::Table("Huffman slot outside 0..=3"));
            }

            let ci = self
                .components
                .iter()
                .position(|c| c.id == comp_id)
                .ok_or(JpegError::UnknownComponent(comp_id))?;
            if self.dc_tables[dc_id].is_none() {
                return Err(JpegError::Table("scan references an undefined DC table"));
            }
            if self.ac_tables[ac_id].is_none() {
                return Err(JpegError::Table("scan references an undefined AC table"));
            }
            self.components[ci].dc_table = dc_id;
            self.components[ci].ac_table = ac_id;
            self.scan_order.push(ci);
        }

        let ss = self.read_u8()?;
        let se = self.read_u8()?;
        let ah_al = self.read_u8()?;
        if ss != 0 || se != 63 || ah_al != 0 {
            return Err(JpegError::Segment("spectral selection is not sequential 0..63"));
        }
        Ok(())
    }
}

/// Decode one 8×8 block into zigzag order: differential DC, then
/// (run, size) AC symbols until EOB or position 63.
fn decode_block(
    reader: &mut BitReader,
    dc_table: &HuffmanDecodeTable,
    ac_table: &HuffmanDecodeTable,
    dc_prediction: &mut i32,
    block: &mut [i16],
) -> Result<()> {
    block.fill(0);

    // DC coefficient (differential, quantized)
    let dc_category = dc_table.decode(reader)?;
    if dc_category > 0 {
        if dc_category > 15 {
            return Err(JpegError::CorruptScan);
        }
        let bits = reader.read_bits(dc_category)?;
        *dc_prediction += extend_sign(bits, dc_category) as i32;
    }
    block[0] = (*dc_prediction).clamp(i16::MIN as i32, i16::MAX as i32) as i16;

    // AC coefficients (quantized). k advances by the declared zero run and
    // moves past a position only when a coefficient is written there; ZRL
    // skips its sixteen zeros without any extra step.
    let mut k = 1usize;
    while k < BLOCK_PIXELS {
        let run_size = ac_table.decode(reader)?;
        let run = (run_size >> 4) as usize;
        let size = run_size & 0x0F;
        if size == 0 {
            if run_size != 0xF0 {
                break; // EOB
            }
            k += 16; // ZRL
            continue;
        }
        k += run;
        if k >= BLOCK_PIXELS {
            return Err(JpegError::CorruptScan);
        }
        let bits = reader.read_bits(size)?;
        block[k] = extend_sign(bits, size);
        k += 1;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jpeg::Encoder;

    fn gradient_rgb(w: usize, h: usize) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(w * h * 3);
        for y in 0..h {
            for x in 0..w {
                rgb.push(((x * 4 + y) % 256) as u8);
                rgb.push(((y * 3 + x * 2) % 256) as u8);
                rgb.push((((x + y) * 5) % 256) as u8);
            }
        }
        rgb
    }

    fn encode_gradient(w: u16, h: u16, quality: u8) -> Vec<u8> {
        let enc = Encoder::new(w, h, quality);
        let planes = enc.transform(&gradient_rgb(w as usize, h as usize), w as usize);
        enc.write_jpeg(&planes, 42, "cGFzc3dvcmQ=").unwrap()
    }

    #[test]
    fn headers_parse_own_output() {
        let bytes = encode_gradient(64, 48, 75);
        let mut dec = Decoder::new(&bytes);
        dec.read_headers().unwrap();
        assert_eq!(dec.width(), 64);
        assert_eq!(dec.height(), 48);
        assert_eq!(dec.mcu_cols(), 8);
        assert_eq!(dec.mcu_rows(), 6);
        assert_eq!(dec.components().len(), 3);
        assert_eq!(dec.message_length(), 42);
        assert_eq!(dec.password_blob(), Some("cGFzc3dvcmQ="));
    }

    #[test]
    fn coefficients_roundtrip_exactly() {
        let enc = Encoder::new(32, 32, 60);
        let rgb = gradient_rgb(32, 32);
        let planes = enc.transform(&rgb, 32);
        let bytes = enc.write_jpeg(&planes, 0, "x").unwrap();

        let mut dec = Decoder::new(&bytes);
        dec.read_headers().unwrap();
        let decoded = dec.decode_coefficients().unwrap();
        assert_eq!(decoded.len(), 3);
        for (plane, expected) in decoded.iter().zip(planes.iter()) {
            assert_eq!(plane, expected);
        }
    }

    #[test]
    fn modified_coefficients_survive_reencode() {
        let enc = Encoder::new(16, 16, 80);
        let rgb = gradient_rgb(16, 16);
        let mut planes = enc.transform(&rgb, 16);
        // Flip the LSB of a mid-frequency Cb coefficient in every block.
        for mcu in 0..4 {
            planes[1][mcu * 64 + 30] ^= 1;
        }
        let expected = planes[1].clone();
        let bytes = enc.write_jpeg(&planes, 0, "x").unwrap();

        let mut dec = Decoder::new(&bytes);
        dec.read_headers().unwrap();
        let decoded = dec.decode_coefficients().unwrap();
        assert_eq!(decoded[1], expected);
    }

    #[test]
    fn missing_soi_rejected() {
        let mut dec = Decoder::new(&[0x00, 0x01, 0x02]);
        assert_eq!(dec.read_headers(), Err(JpegError::NotAJpeg));
        let bytes = [0xFF, 0xDB, 0x00, 0x04, 0x00, 0x00];
        let mut dec = Decoder::new(&bytes);
        assert_eq!(dec.read_headers(), Err(JpegError::NotAJpeg));
    }

    #[test]
    fn progressive_rejected() {
        let bytes = [
            0xFF, 0xD8, // SOI
            0xFF, 0xC2, 0x00, 0x0B, 8, 0, 8, 0, 8, 1, 1, 0x11, 0, // SOF2
        ];
        let mut dec = Decoder::new(&bytes);
        assert_eq!(dec.read_headers(), Err(JpegError::Progressive));
    }

    #[test]
    fn twelve_bit_precision_rejected() {
        let bytes = [
            0xFF, 0xD8, //
            0xFF, 0xC0, 0x00, 0x0B, 12, 0, 8, 0, 8, 1, 1, 0x11, 0,
        ];
        let mut dec = Decoder::new(&bytes);
        assert_eq!(dec.read_headers(), Err(JpegError::Precision(12)));
    }

    #[test]
    fn eoi_before_sos_rejected() {
        let bytes = [0xFF, 0xD8, 0xFF, 0xD9];
        let mut dec = Decoder::new(&bytes);
        assert_eq!(
            dec.read_headers(),
            Err(JpegError::Segment("EOI before any scan data"))
        );
    }

    #[test]
    fn unknown_app_segments_skipped() {
        // APP5 with arbitrary payload before a valid stream.
        let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE5, 0x00, 0x06, 1, 2, 3, 4];
        bytes.extend_from_slice(&encode_gradient(8, 8, 80)[2..]);
        let mut dec = Decoder::new(&bytes);
        dec.read_headers().unwrap();
        assert_eq!(dec.width(), 8);
    }

    #[test]
    fn truncated_scan_is_detected() {
        let bytes = encode_gradient(64, 64, 75);
        // Cut the stream in the middle of the entropy-coded data.
        let mut dec = Decoder::new(&bytes[..bytes.len() - 40]);
        dec.read_headers().unwrap();
        assert_eq!(dec.decode_coefficients(), Err(JpegError::Truncated));
    }

    #[test]
    fn zrl_skips_exactly_sixteen_zeros() {
        use crate::jpeg::bitio::{BitReader, BitWriter};
        use crate::jpeg::huffman::HuffmanEncodeTable;
        use crate::jpeg::tables::{
            STD_AC_LUMA_BITS, STD_AC_LUMA_VALUES, STD_DC_LUMA_BITS, STD_DC_LUMA_VALUES,
        };

        // Hand-build a block's bitstream: zero DC diff, a ZRL, then a
        // run-2/size-1 symbol carrying +1, then EOB.
        let dc_enc = HuffmanEncodeTable::build(&STD_DC_LUMA_BITS, &STD_DC_LUMA_VALUES);
        let ac_enc = HuffmanEncodeTable::build(&STD_AC_LUMA_BITS, &STD_AC_LUMA_VALUES);
        let mut w = BitWriter::new();
        let (code, size) = dc_enc.encode(0).unwrap();
        w.write_bits(code, size);
        let (code, size) = ac_enc.encode(0xF0).unwrap();
        w.write_bits(code, size);
        let (code, size) = ac_enc.encode(0x21).unwrap();
        w.write_bits(code, size);
        w.write_bits(1, 1); // magnitude bit for +1
        let (code, size) = ac_enc.encode(0x00).unwrap();
        w.write_bits(code, size);
        let mut bytes = w.flush();
        bytes.extend_from_slice(&[0xFF, 0xD9]);

        let dc_dec = HuffmanDecodeTable::build(&STD_DC_LUMA_BITS, &STD_DC_LUMA_VALUES).unwrap();
        let ac_dec = HuffmanDecodeTable::build(&STD_AC_LUMA_BITS, &STD_AC_LUMA_VALUES).unwrap();
        let mut reader = BitReader::new(&bytes, 0);
        let mut prediction = 0i32;
        let mut block = [0i16; BLOCK_PIXELS];
        decode_block(&mut reader, &dc_dec, &ac_dec, &mut prediction, &mut block).unwrap();

        // ZRL zeros positions 1..=16, the run-2 symbol zeros 17..=18, and
        // the coefficient lands at 19.
        let mut expected = [0i16; BLOCK_PIXELS];
        expected[19] = 1;
        assert_eq!(block, expected);
    }

    #[test]
    fn mid_block_long_zero_runs_roundtrip() {
        // Coefficient patterns that force ZRL symbols in the middle of a
        // block, not just before EOB.
        let enc = Encoder::new(8, 8, 75);
        let mut planes = vec![vec![0i16; 64]; 3];
        planes[0][0] = 5;
        planes[0][21] = 7; // 20 zeros after the DC: one ZRL + run 4
        planes[1][0] = -3;
        planes[1][40] = -1; // 39 zeros: two ZRLs + run 7
        planes[2][63] = 2; // 62 zeros: three ZRLs + run 14
        let bytes = enc.write_jpeg(&planes, 0, "x").unwrap();

        let mut dec = Decoder::new(&bytes);
        dec.read_headers().unwrap();
        assert_eq!(dec.decode_coefficients().unwrap(), planes);
    }
}
