//! # 错误类型模块
//!
//! 隐写核心 (编码、嵌入、提取、解码) 所有可能失败的情形。
//! 命令处理层通过 `anyhow` 为这些错误附加上下文信息。

use thiserror::Error;

/// 隐写核心返回的错误。
///
/// 所有错误都在修改像素之前产生，失败时图像保持原样。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegError {
    /// 密码为空，无法进行按位异或 (取模除数为零)。
    #[error("The password must not be empty.")]
    EmptyPassword,

    /// 按容量规则计算，图像无法容纳这条消息。
    #[error("Not enough space in the image to hide the message. Required: {required} bits, Available: {available} bits")]
    CapacityExceeded { required: usize, available: usize },

    /// 容量规则放行了消息，但图像的实际像素数量不足以容纳全部比特。
    #[error("The image has only {pixels} pixels but the message needs {required} bits.")]
    GridTooSmall { required: usize, pixels: usize },

    /// 严格模式下，提取的比特流中找不到终止标记。
    #[error("No termination marker found in the image. It may not contain a hidden message.")]
    MissingTerminator,
}
