//! # 消息编解码模块
//!
//! 将明文消息转换为待嵌入的比特流 (混淆后的字节 + 终止标记)，以及反向还原。
//! 比特流中每个元素是取值 0 或 1 的 `u8`，字节按最高位优先展开。

use crate::constants::{BITS_PER_BYTE, TERMINATOR, TERMINATOR_BITS};
use crate::error::StegError;
use crate::scrambler::{scramble, unscramble};
use log::{debug, warn};

/// 有序的比特序列，每个元素为 0 或 1。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bitstream(Vec<u8>);

impl Bitstream {
    /// 创建一个预留 `bits` 个比特空间的空比特流。
    pub fn with_capacity(bits: usize) -> Self {
        Self(Vec::with_capacity(bits))
    }

    /// 将字节按最高位优先展开为比特流。
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut bits = Vec::with_capacity(bytes.len() * BITS_PER_BYTE);
        for &byte in bytes {
            bits.extend((0..BITS_PER_BYTE).rev().map(|shift| (byte >> shift) & 1));
        }
        Self(bits)
    }

    /// 追加一个比特，只保留 `bit` 的最低位。
    pub fn push(&mut self, bit: u8) {
        self.0.push(bit & 1);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }

    /// 终止标记比特模式第一次出现的位置 (任意比特偏移，不要求字节对齐)。
    pub fn terminator_position(&self) -> Option<usize> {
        let pattern = Self::from_bytes(&TERMINATOR);
        self.0
            .windows(TERMINATOR_BITS)
            .position(|window| window == pattern.as_slice())
    }

    /// 每 8 个比特组成一个字节 (最高位优先)，末尾不足 8 位的部分被丢弃。
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0
            .chunks_exact(BITS_PER_BYTE)
            .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | bit))
            .collect()
    }
}

impl FromIterator<u8> for Bitstream {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        Self(iter.into_iter().map(|bit| bit & 1).collect())
    }
}

/// 找不到终止标记时的处理方式。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TerminatorPolicy {
    /// 将整个比特流视为消息内容 (结果通常是乱码)。
    #[default]
    Lenient,
    /// 返回 [`StegError::MissingTerminator`]。
    Strict,
}

/// 比特流的长度: `(message_len + 3) * 8`。
pub fn encoded_bit_len(message_len: usize) -> usize {
    (message_len + TERMINATOR.len()) * BITS_PER_BYTE
}

/// 用密码混淆消息，追加终止标记，并展开为比特流。
///
/// # Errors
///
/// 密码为空时返回 [`StegError::EmptyPassword`]。
pub fn encode(message: &[u8], password: &[u8]) -> Result<Bitstream, StegError> {
    let mut payload = scramble(message, password)?;
    payload.extend_from_slice(&TERMINATOR);

    let bits = Bitstream::from_bytes(&payload);
    debug!(
        "encoded {} message bytes into {} bits",
        message.len(),
        bits.len()
    );
    Ok(bits)
}

/// 从提取出的完整比特流中还原原始消息字节。
///
/// 截断第一次出现终止标记处及其之后的所有比特，按 8 位分组，
/// 再用密码反混淆。
///
/// # Errors
///
/// * 密码为空时返回 [`StegError::EmptyPassword`]。
/// * `policy` 为 [`TerminatorPolicy::Strict`] 且找不到终止标记时返回
///   [`StegError::MissingTerminator`]。
pub fn decode_bytes(
    bits: &Bitstream,
    password: &[u8],
    policy: TerminatorPolicy,
) -> Result<Vec<u8>, StegError> {
    if password.is_empty() {
        return Err(StegError::EmptyPassword);
    }

    let payload = match (bits.terminator_position(), policy) {
        (Some(end), _) => {
            debug!("termination marker found at bit {end}");
            Bitstream(bits.as_slice()[..end].to_vec())
        }
        (None, TerminatorPolicy::Strict) => return Err(StegError::MissingTerminator),
        (None, TerminatorPolicy::Lenient) => {
            warn!(
                "no termination marker in {} bits, decoding the whole stream",
                bits.len()
            );
            bits.clone()
        }
    };

    unscramble(&payload.to_bytes(), password)
}

/// 与 [`decode_bytes`] 相同，但将每个字节视为一个字符 (字节值即码位)。
pub fn decode(
    bits: &Bitstream,
    password: &[u8],
    policy: TerminatorPolicy,
) -> Result<String, StegError> {
    let bytes = decode_bytes(bits, password, policy)?;
    Ok(bytes_to_chars(&bytes))
}

/// 一个字节对应一个字符。
pub fn bytes_to_chars(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
