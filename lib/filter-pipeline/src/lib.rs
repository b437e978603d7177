//! Live per-pixel color adjustment pipeline.
//!
//! A [`Session`] owns the immutable source pixels, the current [`FilterState`]
//! and the output sinks. Every accepted parameter change recomputes the whole
//! image from the source and hands the finished buffer to the [`OutputSink`].

pub mod channel_transform;
pub mod filter_state;
pub mod pipeline;
pub mod pixel_buffer;
pub mod session;
pub mod sink;

pub use filter_state::{FilterChange, FilterParameter, FilterState, RawValue};
pub use pipeline::FilterPipeline;
pub use pixel_buffer::{Channel, PixelBuffer};
pub use session::Session;
pub use sink::{LabelBoard, LabelSink, MemorySink, OutputSink};

pub type FilterResult<T> = Result<T, FilterError>;

#[derive(thiserror::Error, Debug)]
pub enum FilterError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Missing value for {0}")]
    MissingValue(FilterParameter),
    #[error("Type mismatch for {parameter}: expected {expected}")]
    TypeMismatch {
        parameter: FilterParameter,
        expected: &'static str,
    },
    #[error("Value {value} out of range for {parameter}")]
    OutOfRange {
        parameter: FilterParameter,
        value: f64,
    },
    #[error("Value of {0} unchanged")]
    NoOpIgnored(FilterParameter),
    #[error("No source image loaded")]
    NoSource,
    #[error("Invalid dimensions {width}x{height} for {len} bytes")]
    InvalidDimensions { width: u32, height: u32, len: usize },
    #[error("Sink error: {0}")]
    Sink(String),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}
