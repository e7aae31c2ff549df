//! 以循环密码对字节序列做按位异或混淆。
//!
//! 异或是自身的逆运算，因此 [`unscramble`] 与 [`scramble`] 完全相同。
//! 这只是混淆，不提供任何密码学安全性。

use crate::error::StegError;

/// 将 `bytes[i]` 与 `key[i % key.len()]` 异或，返回长度相同的新序列。
///
/// # Errors
///
/// `key` 为空时返回 [`StegError::EmptyPassword`]。
pub fn scramble(bytes: &[u8], key: &[u8]) -> Result<Vec<u8>, StegError> {
    if key.is_empty() {
        return Err(StegError::EmptyPassword);
    }

    Ok(bytes
        .iter()
        .zip(key.iter().cycle())
        .map(|(&byte, &k)| byte ^ k)
        .collect())
}

/// [`scramble`] 的逆运算。
pub fn unscramble(bytes: &[u8], key: &[u8]) -> Result<Vec<u8>, StegError> {
    scramble(bytes, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xors_against_repeating_key() {
        let out = scramble(&[0x01, 0x02, 0x03, 0x04, 0x05], &[0xFF, 0x0F]).unwrap();
        assert_eq!(out, vec![0xFE, 0x0D, 0xFC, 0x0B, 0xFA]);
    }

    #[test]
    fn key_longer_than_input_uses_prefix() {
        let out = scramble(b"ab", b"xyz-long-key").unwrap();
        assert_eq!(out, vec![b'a' ^ b'x', b'b' ^ b'y']);
    }

    #[test]
    fn unscramble_restores_input() {
        let data = b"The quick brown fox jumps over the lazy dog".to_vec();
        let key = b"secret";
        let scrambled = scramble(&data, key).unwrap();
        assert_ne!(scrambled, data);
        assert_eq!(unscramble(&scrambled, key).unwrap(), data);
    }

    #[test]
    fn empty_key_is_rejected() {
        assert_eq!(scramble(b"abc", b""), Err(StegError::EmptyPassword));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(scramble(b"", b"k").unwrap().is_empty());
    }
}
