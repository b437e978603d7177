//! RGBA pixel storage
//!
//! Row-major `[R, G, B, A]` bytes backed by an [`RgbaImage`].

use crate::{FilterError, FilterResult};
use image::RgbaImage;
use std::path::Path;

pub const BYTES_PER_PIXEL: usize = 4;

/// Byte slot of a color channel inside one pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Channel {
    Red = 0,
    Green = 1,
    Blue = 2,
    Alpha = 3,
}

impl Channel {
    pub const fn offset(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes. The length must be exactly `width * height * 4`
    /// and both dimensions must be positive.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> FilterResult<Self> {
        let len = data.len();
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;

        if width == 0 || height == 0 || len != expected {
            return Err(FilterError::InvalidDimensions { width, height, len });
        }

        RgbaImage::from_raw(width, height, data)
            .map(|image| Self { image })
            .ok_or(FilterError::InvalidDimensions { width, height, len })
    }

    pub fn from_image(image: RgbaImage) -> FilterResult<Self> {
        let (width, height) = image.dimensions();
        Self::from_raw(width, height, image.into_raw())
    }

    /// Decode an image file into RGBA pixels
    pub fn open(path: impl AsRef<Path>) -> FilterResult<Self> {
        let image = image::open(path.as_ref())?.to_rgba8();
        Self::from_image(image)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte offset of the red channel of pixel `(x, y)`
    pub fn index(&self, x: u32, y: u32) -> usize {
        (x as usize + y as usize * self.width() as usize) * BYTES_PER_PIXEL
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y);
        let bytes = self.as_bytes();
        [bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]
    }

    pub fn get(&self, x: u32, y: u32, channel: Channel) -> u8 {
        self.as_bytes()[self.index(x, y) + channel.offset()]
    }

    pub fn set(&mut self, x: u32, y: u32, channel: Channel, value: u8) {
        let i = self.index(x, y) + channel.offset();
        self.as_bytes_mut()[i] = value;
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.image
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Average value of one channel over every pixel
    pub fn channel_mean(&self, channel: Channel) -> f64 {
        let (sum, count) = self
            .as_bytes()
            .chunks_exact(BYTES_PER_PIXEL)
            .fold((0u64, 0u64), |(sum, count), px| {
                (sum + px[channel.offset()] as u64, count + 1)
            });

        if count == 0 {
            0.0
        } else {
            sum as f64 / count as f64
        }
    }
}
