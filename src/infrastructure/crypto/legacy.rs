// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! OpenSSL `Salted__` 口令格式（旧数据，只解密）
//!
//! 布局：`"Salted__" | salt(8) | AES-256-CBC(PKCS#7)`，整体 base64。
//! 密钥和IV通过 EVP_BytesToKey(MD5, 1 轮) 从口令和盐派生。

use super::CryptoError;
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, KeyIvInit};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use md5::{Digest, Md5};

/// base64("Salted__") 的固定前缀
pub const MAGIC_PREFIX: &str = "U2FsdGVkX1";

const SALT_HEADER: &[u8] = b"Salted__";
const SALT_LEN: usize = 8;
const KEY_LEN: usize = 32;
const IV_LEN: usize = 16;
const BLOCK_LEN: usize = 16;

type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

pub fn is_legacy(value: &str) -> bool {
    value.starts_with(MAGIC_PREFIX)
}

/// 解密旧格式密文
///
/// 空明文同样视为失败：旧格式在密钥错误时可能恰好得到合法填充
pub fn decrypt(value: &str, passphrase: &str) -> Result<String, CryptoError> {
    let raw = STANDARD
        .decode(value.trim())
        .map_err(|e| CryptoError::Legacy(format!("invalid base64: {}", e)))?;

    if raw.len() < SALT_HEADER.len() + SALT_LEN || &raw[..SALT_HEADER.len()] != SALT_HEADER {
        return Err(CryptoError::Legacy("missing salt header".to_string()));
    }

    let salt = &raw[SALT_HEADER.len()..SALT_HEADER.len() + SALT_LEN];
    let ciphertext = &raw[SALT_HEADER.len() + SALT_LEN..];
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(CryptoError::Legacy("truncated ciphertext".to_string()));
    }

    let (key, iv) = evp_bytes_to_key(passphrase.as_bytes(), salt);
    let plaintext = Aes256CbcDec::new_from_slices(&key, &iv)
        .map_err(|e| CryptoError::Legacy(e.to_string()))?
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::Decryption)?;

    let plaintext = String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidUtf8)?;
    if plaintext.is_empty() {
        return Err(CryptoError::Legacy(
            "empty result - wrong key or corrupted data".to_string(),
        ));
    }

    Ok(plaintext)
}

/// OpenSSL EVP_BytesToKey，MD5，迭代 1 次
fn evp_bytes_to_key(passphrase: &[u8], salt: &[u8]) -> ([u8; KEY_LEN], [u8; IV_LEN]) {
    let mut derived = Vec::with_capacity(KEY_LEN + IV_LEN + 16);
    let mut previous: Vec<u8> = Vec::new();

    while derived.len() < KEY_LEN + IV_LEN {
        let mut hasher = Md5::new();
        hasher.update(&previous);
        hasher.update(passphrase);
        hasher.update(salt);
        previous = hasher.finalize().to_vec();
        derived.extend_from_slice(&previous);
    }

    let mut key = [0u8; KEY_LEN];
    let mut iv = [0u8; IV_LEN];
    key.copy_from_slice(&derived[..KEY_LEN]);
    iv.copy_from_slice(&derived[KEY_LEN..KEY_LEN + IV_LEN]);
    (key, iv)
}
