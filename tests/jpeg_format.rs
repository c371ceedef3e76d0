// Copyright (c) 2026 The stegojpeg developers
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/stegojpeg/stegojpeg

//! Structural checks on the encoder's byte stream: marker order, segment
//! layouts, and the byte-stuffing convention.

use stegojpeg::{encode_with, StegoConfig};

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

fn encode_sample() -> Vec<u8> {
    let cfg = StegoConfig::default();
    encode_with(&cfg, &gradient_rgb(64, 64), 64, 64, "format check", "pw", 80).unwrap()
}

/// Walk the header markers up to SOS, returning (marker, segment_start) pairs.
fn header_markers(bytes: &[u8]) -> Vec<(u8, usize)> {
    assert_eq!(&bytes[..2], &[0xFF, 0xD8], "missing SOI");
    let mut markers = Vec::new();
    let mut pos = 2;
    loop {
        assert_eq!(bytes[pos], 0xFF, "expected marker at {pos}");
        let m = bytes[pos + 1];
        markers.push((m, pos));
        let len = u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]) as usize;
        pos += 2 + len;
        if m == 0xDA {
            return markers;
        }
    }
}

#[test]
fn segment_order_matches_contract() {
    let bytes = encode_sample();
    let markers: Vec<u8> = header_markers(&bytes).iter().map(|&(m, _)| m).collect();
    assert_eq!(
        markers,
        vec![
            0xE0, // APP0
            0xFE, 0xFE, 0xFE, // COM type 0, 1, 2
            0xDB, 0xDB, // DQT ×2
            0xC0, // SOF0
            0xC4, 0xC4, 0xC4, 0xC4, // DHT ×4
            0xDA, // SOS
        ]
    );
}

#[test]
fn stream_ends_with_eoi() {
    let bytes = encode_sample();
    assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xD9]);
}

#[test]
fn comment_segments_carry_type_ids() {
    let bytes = encode_sample();
    let coms: Vec<usize> = header_markers(&bytes)
        .iter()
        .filter(|&&(m, _)| m == 0xFE)
        .map(|&(_, pos)| pos)
        .collect();
    assert_eq!(coms.len(), 3);
    for (i, &pos) in coms.iter().enumerate() {
        assert_eq!(bytes[pos + 4] as usize, i, "COM type ID out of order");
    }
    // Type 0 carries the attribution text.
    let com0_len = u16::from_be_bytes([bytes[coms[0] + 2], bytes[coms[0] + 3]]) as usize;
    let attribution = &bytes[coms[0] + 5..coms[0] + 2 + com0_len];
    assert_eq!(attribution, b"created using gaurav's image-steganography");
    // Type 1 carries the message length (12 bytes after Caesar, same length).
    let length = i32::from_be_bytes([
        bytes[coms[1] + 5],
        bytes[coms[1] + 6],
        bytes[coms[1] + 7],
        bytes[coms[1] + 8],
    ]);
    assert_eq!(length, "format check".len() as i32);
    // Type 2 carries ASCII Base64.
    let com2_len = u16::from_be_bytes([bytes[coms[2] + 2], bytes[coms[2] + 3]]) as usize;
    let blob = &bytes[coms[2] + 5..coms[2] + 2 + com2_len];
    assert!(blob.iter().all(|b| b.is_ascii()));
}

#[test]
fn dqt_segments_have_ids_0_and_1_with_identical_values() {
    let bytes = encode_sample();
    let dqts: Vec<usize> = header_markers(&bytes)
        .iter()
        .filter(|&&(m, _)| m == 0xDB)
        .map(|&(_, pos)| pos)
        .collect();
    assert_eq!(dqts.len(), 2);
    for (i, &pos) in dqts.iter().enumerate() {
        let len = u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]);
        assert_eq!(len, 0x43);
        assert_eq!(bytes[pos + 4], i as u8, "table ID");
    }
    let values_0 = &bytes[dqts[0] + 5..dqts[0] + 69];
    let values_1 = &bytes[dqts[1] + 5..dqts[1] + 69];
    assert_eq!(values_0, values_1, "DQT payloads must be identical");
    assert!(values_0.iter().all(|&v| v >= 1));
}

#[test]
fn sof0_declares_expected_geometry() {
    let bytes = encode_sample();
    let &(_, sof) = header_markers(&bytes)
        .iter()
        .find(|&&(m, _)| m == 0xC0)
        .unwrap();
    assert_eq!(bytes[sof + 4], 8, "precision");
    let height = u16::from_be_bytes([bytes[sof + 5], bytes[sof + 6]]);
    let width = u16::from_be_bytes([bytes[sof + 7], bytes[sof + 8]]);
    assert_eq!((width, height), (64, 64));
    assert_eq!(bytes[sof + 9], 3, "component count");
    // Components 1,2,3 with 1×1 sampling and quant tables 0,1,1.
    let expected = [(1u8, 0x11u8, 0u8), (2, 0x11, 1), (3, 0x11, 1)];
    for (i, &(id, sampling, qt)) in expected.iter().enumerate() {
        let base = sof + 10 + i * 3;
        assert_eq!(bytes[base], id);
        assert_eq!(bytes[base + 1], sampling);
        assert_eq!(bytes[base + 2], qt);
    }
}

#[test]
fn dht_segments_in_standard_order() {
    let bytes = encode_sample();
    let ids: Vec<u8> = header_markers(&bytes)
        .iter()
        .filter(|&&(m, _)| m == 0xC4)
        .map(|&(_, pos)| bytes[pos + 4])
        .collect();
    assert_eq!(ids, vec![0x00, 0x10, 0x01, 0x11]);
}

#[test]
fn sos_declares_table_assignments() {
    let bytes = encode_sample();
    let &(_, sos) = header_markers(&bytes)
        .iter()
        .find(|&&(m, _)| m == 0xDA)
        .unwrap();
    assert_eq!(bytes[sos + 4], 3, "scan component count");
    let expected = [(1u8, 0x00u8), (2, 0x11), (3, 0x11)];
    for (i, &(id, tables)) in expected.iter().enumerate() {
        let base = sos + 5 + i * 2;
        assert_eq!(bytes[base], id);
        assert_eq!(bytes[base + 1], tables);
    }
    let params = sos + 5 + 6;
    assert_eq!(bytes[params], 0x00, "Ss");
    assert_eq!(bytes[params + 1], 0x3F, "Se");
    assert_eq!(bytes[params + 2], 0x00, "AhAl");
}

#[test]
fn entropy_data_is_byte_stuffed() {
    let bytes = encode_sample();
    let &(_, sos) = header_markers(&bytes)
        .iter()
        .find(|&&(m, _)| m == 0xDA)
        .unwrap();
    let sos_len = u16::from_be_bytes([bytes[sos + 2], bytes[sos + 3]]) as usize;
    let scan_start = sos + 2 + sos_len;
    let scan_end = bytes.len() - 2; // EOI

    let mut pos = scan_start;
    while pos < scan_end {
        if bytes[pos] == 0xFF {
            assert_eq!(
                bytes[pos + 1],
                0x00,
                "unstuffed 0xFF inside entropy data at {pos}"
            );
            pos += 2;
        } else {
            pos += 1;
        }
    }
}
