/// 附加在混淆后消息末尾的终止标记 (不参与异或混淆)。
pub const TERMINATOR: [u8; 3] = [0x00, 0x00, 0x03];

/// 每个字节展开后的比特数。
pub const BITS_PER_BYTE: usize = 8;

/// 终止标记展开后的比特数: 3 * 8 = 24。
pub const TERMINATOR_BITS: usize = TERMINATOR.len() * BITS_PER_BYTE;

/// 蓝色通道在 RGB 像素中的下标。
pub const BLUE: usize = 2;

/// 未指定输出路径时，隐写结果图像文件名的前缀。
pub const DOCTORED_PREFIX: &str = "doctored_";
