//! # 像素网格抽象
//!
//! 隐写核心只需要宽、高以及按 (x, y) 读写 RGB 像素的能力。
//! 这里为 `image` crate 的 RGB 与 RGBA 缓冲区实现该能力；
//! RGBA 图像写入时保留原有的 alpha 通道。

use image::{Rgb, RgbImage, Rgba, RgbaImage};

/// 可按行优先顺序 (y 外层，x 内层) 遍历的 RGB 像素网格，(0, 0) 为左上角。
pub trait PixelGrid {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn get_rgb(&self, x: u32, y: u32) -> Rgb<u8>;

    fn set_rgb(&mut self, x: u32, y: u32, pixel: Rgb<u8>);

    /// 像素总数 W * H。
    fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }
}

impl PixelGrid for RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn get_rgb(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.get_pixel(x, y)
    }

    fn set_rgb(&mut self, x: u32, y: u32, pixel: Rgb<u8>) {
        self.put_pixel(x, y, pixel);
    }
}

impl PixelGrid for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn get_rgb(&self, x: u32, y: u32) -> Rgb<u8> {
        let Rgba([r, g, b, _]) = *self.get_pixel(x, y);
        Rgb([r, g, b])
    }

    fn set_rgb(&mut self, x: u32, y: u32, pixel: Rgb<u8>) {
        let Rgb([r, g, b]) = pixel;
        let alpha = self.get_pixel(x, y)[3];
        self.put_pixel(x, y, Rgba([r, g, b, alpha]));
    }
}
