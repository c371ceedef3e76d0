// Copyright (c) 2026 The stegojpeg developers
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/stegojpeg/stegojpeg

//! AES-128-CBC password blob encryption.
//!
//! The password supplied at encode time is stored inside the stego JPEG as
//! Base64-encoded AES-128-CBC ciphertext (PKCS#7 padding) in a type-2
//! comment segment. Key and IV are fixed 16-byte configuration values, so
//! this is an obfuscated equality token, not authenticated encryption.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// Failure decoding or decrypting a stored password blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptoError;

impl core::fmt::Display for CryptoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "stored password blob is not valid AES-128-CBC ciphertext")
    }
}

impl std::error::Error for CryptoError {}

/// Encrypt `plain_text` and return the Base64 ciphertext string.
pub fn encrypt(key: &[u8; 16], iv: &[u8; 16], plain_text: &str) -> String {
    let ciphertext = Aes128CbcEnc::new(key.into(), iv.into())
        .encrypt_padded_vec_mut::<Pkcs7>(plain_text.as_bytes());
    BASE64.encode(ciphertext)
}

/// Decrypt a Base64 ciphertext string produced by [`encrypt`].
pub fn decrypt(key: &[u8; 16], iv: &[u8; 16], cipher_text: &str) -> Result<String, CryptoError> {
    let ciphertext = BASE64.decode(cipher_text).map_err(|_| CryptoError)?;
    let plain = Aes128CbcDec::new(key.into(), iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| CryptoError)?;
    Ok(String::from_utf8_lossy(&plain).into_owned())
}
