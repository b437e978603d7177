//! Display surfaces fed by the pipeline

use crate::{FilterParameter, FilterResult, PixelBuffer};
use std::collections::BTreeMap;

/// Surface that presents a finished frame.
///
/// `pixels` is borrowed for the duration of the call only; a sink that keeps
/// the frame must copy the bytes into its own backing store.
pub trait OutputSink {
    fn present(&mut self, pixels: &[u8], width: u32, height: u32) -> FilterResult<()>;
}

/// Text labels showing the value of each numeric parameter
pub trait LabelSink {
    fn refresh_label(&mut self, parameter: FilterParameter, text: &str);
}

impl LabelSink for () {
    fn refresh_label(&mut self, _parameter: FilterParameter, _text: &str) {}
}

/// Keeps the last presented frame in memory
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    frame: Option<PixelBuffer>,
    presented: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> Option<&PixelBuffer> {
        self.frame.as_ref()
    }

    /// Number of frames presented so far
    pub fn presented(&self) -> usize {
        self.presented
    }
}

impl OutputSink for MemorySink {
    fn present(&mut self, pixels: &[u8], width: u32, height: u32) -> FilterResult<()> {
        self.frame = Some(PixelBuffer::from_raw(width, height, pixels.to_vec())?);
        self.presented += 1;
        Ok(())
    }
}

impl<T: OutputSink + ?Sized> OutputSink for Box<T> {
    fn present(&mut self, pixels: &[u8], width: u32, height: u32) -> FilterResult<()> {
        (**self).present(pixels, width, height)
    }
}

/// Latest label text per parameter
#[derive(Debug, Default, Clone)]
pub struct LabelBoard {
    labels: BTreeMap<FilterParameter, String>,
    refreshes: usize,
}

impl LabelBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self, parameter: FilterParameter) -> Option<&str> {
        self.labels.get(&parameter).map(String::as_str)
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes
    }
}

impl LabelSink for LabelBoard {
    fn refresh_label(&mut self, parameter: FilterParameter, text: &str) {
        self.labels.insert(parameter, text.to_string());
        self.refreshes += 1;
    }
}

impl<T: LabelSink + ?Sized> LabelSink for Box<T> {
    fn refresh_label(&mut self, parameter: FilterParameter, text: &str) {
        (**self).refresh_label(parameter, text)
    }
}
