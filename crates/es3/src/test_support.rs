//! Reference encoder used only by tests: the inverse of the decode pipeline.

use std::io::Write;

use aes::cipher::{block_padding::NoPadding, BlockEncryptMut, KeyIvInit};
use flate2::{write::GzEncoder, Compression};

use crate::crypto::{derive_es3_key, BLOCK_LEN, IV_LEN, KEY_LEN};

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;

/// Append PKCS7 padding to `data`.
pub fn pkcs7_pad(data: &[u8]) -> Vec<u8> {
    let pad = BLOCK_LEN - data.len() % BLOCK_LEN;
    let mut out = data.to_vec();
    out.resize(data.len() + pad, pad as u8);
    out
}

/// AES-128-CBC encrypt block-aligned `blocks` without adding padding.
pub fn encrypt_blocks(blocks: &[u8], key: &[u8; KEY_LEN], iv: &[u8; IV_LEN]) -> Vec<u8> {
    let mut buf = blocks.to_vec();
    let len = buf.len();
    Aes128CbcEnc::new_from_slices(key, iv)
        .unwrap()
        .encrypt_padded_mut::<NoPadding>(&mut buf, len)
        .unwrap();
    buf
}

/// Build a complete ES3 container for `plaintext`.
pub fn encrypt_es3(plaintext: &[u8], password: &[u8], iv: &[u8; IV_LEN]) -> Vec<u8> {
    let key = derive_es3_key(password, iv).unwrap();
    let mut out = iv.to_vec();
    out.extend(encrypt_blocks(&pkcs7_pad(plaintext), key.as_bytes(), iv));
    out
}

/// Gzip-compress `data`.
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}
