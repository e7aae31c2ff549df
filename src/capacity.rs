//! 判断像素网格是否有足够的比特容量来隐藏一条消息。
//!
//! 每个像素只在蓝色通道存 1 bit。默认规则沿用兼容行为，
//! 以 宽 * 宽 计算可用容量；[`CapacityRule::Area`] 使用真实的 宽 * 高。

use crate::codec::encoded_bit_len;
use crate::grid::PixelGrid;
use clap::ValueEnum;

/// 可用比特数的计算方式。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CapacityRule {
    /// 宽 * 宽，与已有隐写图像的检查结果保持一致。
    #[default]
    WidthSquared,
    /// 宽 * 高。
    Area,
}

impl CapacityRule {
    /// 按该规则计算网格可容纳的比特数。
    pub fn available_bits<G: PixelGrid + ?Sized>(self, grid: &G) -> usize {
        let width = grid.width() as usize;
        match self {
            CapacityRule::WidthSquared => width * width,
            CapacityRule::Area => width * grid.height() as usize,
        }
    }
}

/// 隐藏 `message_len` 字节所需的比特数 (含 3 字节终止标记)。
pub fn required_bits(message_len: usize) -> usize {
    encoded_bit_len(message_len)
}

/// 可用比特数不小于所需比特数时返回 `true`。
pub fn has_capacity<G: PixelGrid + ?Sized>(grid: &G, message: &[u8], rule: CapacityRule) -> bool {
    rule.available_bits(grid) >= required_bits(message.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn hi_fits_seven_by_seven_but_not_six_by_six() {
        assert!(has_capacity(&RgbImage::new(7, 7), b"Hi", CapacityRule::WidthSquared));
        assert!(!has_capacity(&RgbImage::new(6, 6), b"Hi", CapacityRule::WidthSquared));
    }

    #[test]
    fn boundary_is_inclusive() {
        // 8 * 8 = 64 = (5 + 3) * 8
        let grid = RgbImage::new(8, 1);
        assert!(has_capacity(&grid, b"12345", CapacityRule::WidthSquared));
        assert!(!has_capacity(&grid, b"123456", CapacityRule::WidthSquared));
    }

    #[test]
    fn width_squared_ignores_height() {
        let tall = RgbImage::new(2, 100);
        let wide = RgbImage::new(100, 2);
        assert_eq!(CapacityRule::WidthSquared.available_bits(&tall), 4);
        assert_eq!(CapacityRule::WidthSquared.available_bits(&wide), 10_000);
        assert_eq!(CapacityRule::Area.available_bits(&tall), 200);
        assert_eq!(CapacityRule::Area.available_bits(&wide), 200);
    }

    #[test]
    fn area_rule_boundary() {
        // 10 * 4 = 40 = (2 + 3) * 8
        let grid = RgbImage::new(10, 4);
        assert!(has_capacity(&grid, b"Hi", CapacityRule::Area));
        assert!(!has_capacity(&grid, b"Hi!", CapacityRule::Area));
    }

    #[test]
    fn required_bits_counts_terminator() {
        assert_eq!(required_bits(0), 24);
        assert_eq!(required_bits(2), 40);
    }
}
