//! Stateless per-pixel arithmetic on a working buffer
//!
//! Every write goes through [`clamp`] and is stored as `u8`, so fractional
//! results truncate toward zero. Alpha is never written.

use crate::pixel_buffer::{Channel, PixelBuffer};

const COLOR_CHANNELS: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

/// Constrain `value` to `[0, 255]` and truncate into a byte
pub fn clamp(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

pub fn offset_channel(buffer: &mut PixelBuffer, x: u32, y: u32, amount: i32, channel: Channel) {
    let current = buffer.get(x, y, channel) as f64;
    buffer.set(x, y, channel, clamp(current + amount as f64));
}

pub fn offset_brightness(buffer: &mut PixelBuffer, x: u32, y: u32, amount: i32) {
    for channel in COLOR_CHANNELS {
        offset_channel(buffer, x, y, amount, channel);
    }
}

/// Replace R, G and B with their mean, read from the current buffer values
pub fn to_grayscale(buffer: &mut PixelBuffer, x: u32, y: u32) {
    let sum: f64 = COLOR_CHANNELS
        .iter()
        .map(|&channel| buffer.get(x, y, channel) as f64)
        .sum();
    let gray = clamp(sum / 3.0);

    for channel in COLOR_CHANNELS {
        buffer.set(x, y, channel, gray);
    }
}
