//! # 隐写引擎
//!
//! 按行优先顺序遍历像素网格 (y 外层，x 内层)，
//! 逐像素在蓝色通道最低位写入或读取 1 bit。

use crate::capacity::{CapacityRule, has_capacity, required_bits};
use crate::codec::{self, Bitstream, TerminatorPolicy};
use crate::error::StegError;
use crate::grid::PixelGrid;
use crate::pixel::{read_bit, write_bit};
use log::debug;

/// 将比特流依次写入网格，返回实际写入的比特数。
///
/// 比特流写完后立即停止，之后的像素不会被触碰。
/// 网格先于比特流耗尽时静默停止，调用方应事先检查容量。
pub fn embed<G: PixelGrid + ?Sized>(grid: &mut G, bits: &Bitstream) -> usize {
    let (width, height) = (grid.width(), grid.height());
    let mut remaining = bits.iter();
    let mut written = 0;

    'rows: for y in 0..height {
        for x in 0..width {
            let Some(bit) = remaining.next() else {
                break 'rows;
            };
            let pixel = grid.get_rgb(x, y);
            grid.set_rgb(x, y, write_bit(pixel, bit));
            written += 1;
        }
    }

    debug!("embedded {written} of {} bits", bits.len());
    written
}

/// 读取网格中每个像素的蓝色最低位，得到长度为 W * H 的比特流。
pub fn extract<G: PixelGrid + ?Sized>(grid: &G) -> Bitstream {
    let (width, height) = (grid.width(), grid.height());
    let mut bits = Bitstream::with_capacity(grid.pixel_count());

    for y in 0..height {
        for x in 0..width {
            bits.push(read_bit(grid.get_rgb(x, y)));
        }
    }

    bits
}

/// 检查密码与容量后，将混淆过的消息写入网格。
///
/// # Errors
///
/// * [`StegError::EmptyPassword`]: 密码为空。
/// * [`StegError::CapacityExceeded`]: 按 `rule` 计算容量不足。
/// * [`StegError::GridTooSmall`]: 规则放行，但像素总数不足。
///
/// 任何错误都在写入像素之前返回，网格保持不变。
pub fn hide<G: PixelGrid + ?Sized>(
    grid: &mut G,
    message: &[u8],
    password: &[u8],
    rule: CapacityRule,
) -> Result<(), StegError> {
    if password.is_empty() {
        return Err(StegError::EmptyPassword);
    }

    let required = required_bits(message.len());
    if !has_capacity(&*grid, message, rule) {
        return Err(StegError::CapacityExceeded {
            required,
            available: rule.available_bits(&*grid),
        });
    }

    let pixels = grid.pixel_count();
    if pixels < required {
        return Err(StegError::GridTooSmall { required, pixels });
    }

    let bits = codec::encode(message, password)?;
    embed(grid, &bits);
    Ok(())
}

/// 提取网格中的全部比特并还原消息字节。
pub fn reveal<G: PixelGrid + ?Sized>(
    grid: &G,
    password: &[u8],
    policy: TerminatorPolicy,
) -> Result<Vec<u8>, StegError> {
    let bits = extract(grid);
    codec::decode_bytes(&bits, password, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn patterned_grid(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 7) as u8, (y * 13) as u8, (x * 31 + y * 17) as u8])
        })
    }

    #[test]
    fn round_trip_on_zeroed_grid() {
        let mut grid = RgbImage::new(20, 20);
        let bits = codec::encode(b"Hi there", b"k3y").unwrap();
        embed(&mut grid, &bits);

        let text = codec::decode(&extract(&grid), b"k3y", TerminatorPolicy::Strict).unwrap();
        assert_eq!(text, "Hi there");
    }

    #[test]
    fn embed_writes_row_major() {
        let mut grid = RgbImage::new(3, 2);
        let bits: Bitstream = [1, 0, 1, 1].into_iter().collect();
        assert_eq!(embed(&mut grid, &bits), 4);

        assert_eq!(grid.get_pixel(0, 0)[2], 1);
        assert_eq!(grid.get_pixel(1, 0)[2], 0);
        assert_eq!(grid.get_pixel(2, 0)[2], 1);
        assert_eq!(grid.get_pixel(0, 1)[2], 1);
    }

    #[test]
    fn pixels_after_bitstream_are_untouched() {
        let original = patterned_grid(16, 16);
        let mut grid = original.clone();
        let bits = codec::encode(b"Hi", b"k").unwrap();
        embed(&mut grid, &bits);

        let touched = bits.len();
        for (i, (before, after)) in original.pixels().zip(grid.pixels()).enumerate() {
            if i >= touched {
                assert_eq!(before, after, "pixel {i} changed");
            } else {
                assert_eq!(before[0], after[0]);
                assert_eq!(before[1], after[1]);
                assert_eq!(before[2] & 0xFE, after[2] & 0xFE);
            }
        }
    }

    #[test]
    fn embed_stops_when_grid_is_exhausted() {
        let mut grid = RgbImage::new(2, 2);
        let bits = codec::encode(b"Hi", b"k").unwrap();
        assert_eq!(embed(&mut grid, &bits), 4);
    }

    #[test]
    fn extract_reads_every_pixel() {
        let grid = patterned_grid(5, 3);
        assert_eq!(extract(&grid).len(), 15);
    }

    #[test]
    fn hide_and_reveal_on_patterned_grid() {
        let mut grid = patterned_grid(40, 40);
        hide(&mut grid, b"Meet at noon.", b"pass", CapacityRule::WidthSquared).unwrap();
        let bytes = reveal(&grid, b"pass", TerminatorPolicy::Lenient).unwrap();
        assert_eq!(bytes, b"Meet at noon.");
    }

    #[test]
    fn hide_rejects_small_grid_without_mutation() {
        let original = patterned_grid(6, 6);
        let mut grid = original.clone();
        let err = hide(&mut grid, b"Hi", b"k", CapacityRule::WidthSquared).unwrap_err();
        assert_eq!(
            err,
            StegError::CapacityExceeded {
                required: 40,
                available: 36
            }
        );
        assert_eq!(grid, original);
    }

    #[test]
    fn hide_accepts_seven_by_seven() {
        let mut grid = RgbImage::new(7, 7);
        hide(&mut grid, b"Hi", b"k", CapacityRule::WidthSquared).unwrap();
        let text = codec::decode(&extract(&grid), b"k", TerminatorPolicy::Strict).unwrap();
        assert_eq!(text, "Hi");
    }

    #[test]
    fn hide_rejects_empty_password_without_mutation() {
        let original = patterned_grid(10, 10);
        let mut grid = original.clone();
        assert_eq!(
            hide(&mut grid, b"Hi", b"", CapacityRule::WidthSquared),
            Err(StegError::EmptyPassword)
        );
        assert_eq!(grid, original);
    }

    #[test]
    fn hide_guards_wide_grids_under_width_squared() {
        // 10 * 10 = 100 bits allowed by the rule, but only 10 * 2 = 20 pixels exist.
        let original = patterned_grid(10, 2);
        let mut grid = original.clone();
        assert_eq!(
            hide(&mut grid, b"Hi", b"k", CapacityRule::WidthSquared),
            Err(StegError::GridTooSmall {
                required: 40,
                pixels: 20
            })
        );
        assert_eq!(grid, original);
    }

    #[test]
    fn area_rule_allows_tall_grids() {
        let mut grid = RgbImage::new(2, 40);
        assert!(hide(&mut grid, b"Hi", b"k", CapacityRule::WidthSquared).is_err());
        hide(&mut grid, b"Hi", b"k", CapacityRule::Area).unwrap();
        assert_eq!(reveal(&grid, b"k", TerminatorPolicy::Strict).unwrap(), b"Hi");
    }
}
