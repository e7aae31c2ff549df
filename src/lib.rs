//! # blue_lsb 库
//!
//! 本库包含蓝色通道 LSB 隐写工具的核心逻辑：
//! 密码混淆、消息编解码、像素级比特读写、容量检查，以及命令行处理层。

// 声明库包含的所有模块。

pub mod capacity;
pub mod cli;
pub mod codec;
pub mod constants;
pub mod error;
pub mod grid;
pub mod handler;
pub mod pixel;
pub mod scrambler;
pub mod steganography;

pub use error::StegError;
