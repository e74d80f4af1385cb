// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 凭证令牌解密
//!
//! 存储中同时存在三种格式，按以下优先级识别：
//! 1. 空值：返回空字符串
//! 2. `base64(iv):base64(ciphertext||tag)`：AES-256-GCM，密钥为 SHA-256(secret)
//! 3. 以 `U2FsdGVkX1` 开头：OpenSSL `Salted__` 口令格式（旧数据）
//! 4. 其他：视为未加密的明文原样返回

pub mod legacy;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// AES-GCM 的 IV 长度（96 位）
pub const IV_LEN: usize = 12;

/// 新格式中 IV 和密文之间的分隔符
pub const SEPARATOR: char = ':';

/// 加解密错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// 认证标签校验失败或IV损坏
    #[error("decryption failed - wrong key or corrupted data")]
    Decryption,
    /// 旧格式解密失败
    #[error("legacy decryption failed: {0}")]
    Legacy(String),
    /// 解密结果不是 UTF-8
    #[error("decrypted value is not valid UTF-8")]
    InvalidUtf8,
    #[error("encryption failed")]
    Encryption,
}

/// 令牌加解密器
///
/// 在启动时由配置中的密钥构造一次，之后在凭证读取时共享
#[derive(Clone)]
pub struct TokenCipher {
    key: [u8; 32],
    passphrase: String,
}

impl TokenCipher {
    /// 创建新的加解密器
    ///
    /// # 参数
    ///
    /// * `secret` - 共享密钥，新格式用其 SHA-256 摘要作为 AES 密钥，旧格式直接作为口令
    pub fn new(secret: &str) -> Self {
        let key: [u8; 32] = Sha256::digest(secret.as_bytes()).into();
        Self {
            key,
            passphrase: secret.to_string(),
        }
    }

    /// 解密存储值
    ///
    /// # 返回值
    ///
    /// * `Ok(String)` - 明文（空输入得到空字符串，无法识别的格式原样返回）
    /// * `Err(CryptoError)` - 识别为密文但解密失败
    pub fn decrypt(&self, value: Option<&str>) -> Result<String, CryptoError> {
        let value = match value {
            Some(v) if !v.is_empty() => v,
            _ => return Ok(String::new()),
        };

        if let Some((iv, ciphertext)) = modern_segments(value) {
            return self.decrypt_modern(iv, ciphertext);
        }

        if legacy::is_legacy(value) {
            return legacy::decrypt(value, &self.passphrase);
        }

        Ok(value.to_string())
    }

    /// 以新格式加密
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        let iv: [u8; IV_LEN] = rand::random();
        let ciphertext = self
            .cipher()
            .encrypt(Nonce::from_slice(&iv), plaintext.as_bytes())
            .map_err(|_| CryptoError::Encryption)?;

        Ok(format!(
            "{}{}{}",
            STANDARD.encode(iv),
            SEPARATOR,
            STANDARD.encode(ciphertext)
        ))
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key))
    }

    fn decrypt_modern(&self, iv: &str, ciphertext: &str) -> Result<String, CryptoError> {
        let iv = STANDARD.decode(iv).map_err(|_| CryptoError::Decryption)?;
        let ciphertext = STANDARD
            .decode(ciphertext)
            .map_err(|_| CryptoError::Decryption)?;
        if iv.len() != IV_LEN {
            return Err(CryptoError::Decryption);
        }

        let plaintext = self
            .cipher()
            .decrypt(Nonce::from_slice(&iv), ciphertext.as_slice())
            .map_err(|_| CryptoError::Decryption)?;

        String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidUtf8)
    }
}

/// 按形状识别新格式：恰好两段非空内容，且只包含 base64 字母表字符
///
/// 识别后的解码失败视为密文损坏，而不是回退为明文
fn modern_segments(value: &str) -> Option<(&str, &str)> {
    let (iv, ciphertext) = value.split_once(SEPARATOR)?;
    if ciphertext.contains(SEPARATOR) || !is_base64_shaped(iv) || !is_base64_shaped(ciphertext) {
        return None;
    }
    Some((iv, ciphertext))
}

fn is_base64_shaped(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
}
