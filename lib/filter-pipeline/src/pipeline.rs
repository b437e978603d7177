//! Full-image recompute from the source buffer
//!
//! Each run copies the source into the working buffer, walks every pixel in
//! row-major order and applies the filters in [`FilterParameter::all`] order.
//! The grayscale check reads the global flag, so while grayscale is on the
//! brightness slot grays the pixel instead of offsetting it.

use crate::{
    FilterParameter, FilterResult, FilterState, OutputSink, PixelBuffer,
    channel_transform::{offset_brightness, offset_channel, to_grayscale},
};
use std::time::Instant;

#[derive(Debug, Default, Clone)]
pub struct FilterPipeline {
    working: Option<PixelBuffer>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer produced by the last run
    pub fn working(&self) -> Option<&PixelBuffer> {
        self.working.as_ref()
    }

    /// Drop the working buffer, e.g. when the source is replaced
    pub(crate) fn reset(&mut self) {
        self.working = None;
    }

    /// Rebuild the working buffer from `source`, filter it and present it.
    /// Without a source this is a no-op returning `Ok(false)`.
    pub fn recompute(
        &mut self,
        source: Option<&PixelBuffer>,
        state: &FilterState,
        sink: &mut dyn OutputSink,
    ) -> FilterResult<bool> {
        let Some(source) = source else {
            log::debug!("recompute skipped: no source image");
            return Ok(false);
        };

        let start = Instant::now();

        let working = self.working.insert(source.clone());
        apply_filters(working, state);
        debug_assert_eq!(working.len(), source.len());

        log::debug!(
            "filtered {}x{} in {:.3}ms",
            working.width(),
            working.height(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        sink.present(working.as_bytes(), working.width(), working.height())?;
        Ok(true)
    }
}

/// Filter a copy of `source` without presenting it
pub fn apply(source: &PixelBuffer, state: &FilterState) -> PixelBuffer {
    let mut working = source.clone();
    apply_filters(&mut working, state);
    working
}

fn apply_filters(working: &mut PixelBuffer, state: &FilterState) {
    let (width, height) = (working.width(), working.height());

    for y in 0..height {
        for x in 0..width {
            for &parameter in FilterParameter::all() {
                let amount = state.amount(parameter);
                match parameter.channel() {
                    Some(channel) => offset_channel(working, x, y, amount, channel),
                    None if state.grayscale() => to_grayscale(working, x, y),
                    None => offset_brightness(working, x, y, amount),
                }
            }
        }
    }
}
