use crate::constants::BLUE;
use image::Rgb;

/// 返回一个新像素，其蓝色通道的最低位等于 `bit`，其余所有位保持不变。
pub fn write_bit(pixel: Rgb<u8>, bit: u8) -> Rgb<u8> {
    let mut out = pixel;
    out[BLUE] = (pixel[BLUE] & 0xFE) | (bit & 1);
    out
}

/// 读取蓝色通道的最低位 (0 或 1)。
pub fn read_bit(pixel: Rgb<u8>) -> u8 {
    pixel[BLUE] & 0x01
}
