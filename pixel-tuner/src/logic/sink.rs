use filter_pipeline::{FilterError, FilterParameter, FilterResult, LabelSink, OutputSink, PixelBuffer};
use std::{collections::BTreeMap, path::PathBuf};

/// Writes presented frames to a PNG file
#[derive(Debug)]
pub struct PngSink {
    path: PathBuf,
    save_every_change: bool,
    frame: Option<PixelBuffer>,
    dirty: bool,
    written: usize,
}

impl PngSink {
    pub fn new(path: PathBuf, save_every_change: bool) -> Self {
        Self {
            path,
            save_every_change,
            frame: None,
            dirty: false,
            written: 0,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Write the latest frame if it has not been saved yet
    pub fn flush(&mut self) -> FilterResult<()> {
        if !self.dirty {
            return Ok(());
        }

        if let Some(frame) = &self.frame {
            frame.as_image().save(&self.path).map_err(|e| {
                FilterError::Sink(format!("save {} failed: {e}", self.path.display()))
            })?;
            self.written += 1;
            log::info!("saved {}", self.path.display());
        }

        self.dirty = false;
        Ok(())
    }
}

impl OutputSink for PngSink {
    fn present(&mut self, pixels: &[u8], width: u32, height: u32) -> FilterResult<()> {
        self.frame = Some(PixelBuffer::from_raw(width, height, pixels.to_vec())?);
        self.dirty = true;

        if self.save_every_change {
            self.flush()?;
        }

        Ok(())
    }
}

/// Prints a label whenever its text changes
#[derive(Debug, Default)]
pub struct ConsoleLabels {
    echo: bool,
    shown: BTreeMap<FilterParameter, String>,
}

impl ConsoleLabels {
    pub fn new(echo: bool) -> Self {
        Self {
            echo,
            shown: BTreeMap::new(),
        }
    }
}

impl LabelSink for ConsoleLabels {
    fn refresh_label(&mut self, parameter: FilterParameter, text: &str) {
        if self.shown.get(&parameter).map(String::as_str) == Some(text) {
            return;
        }

        if self.echo {
            println!("{parameter}: {text}");
        } else {
            log::debug!("label {parameter}: {text}");
        }

        self.shown.insert(parameter, text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_png_sink_writes_every_change() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.png");
        let mut sink = PngSink::new(path.clone(), true);

        sink.present(&[1, 2, 3, 255, 4, 5, 6, 255], 2, 1).unwrap();
        assert_eq!(sink.written(), 1);

        let saved = image::open(&path).unwrap().to_rgba8();
        assert_eq!(saved.as_raw(), &vec![1, 2, 3, 255, 4, 5, 6, 255]);

        // nothing pending
        sink.flush().unwrap();
        assert_eq!(sink.written(), 1);
    }

    #[test]
    fn test_png_sink_deferred() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.png");
        let mut sink = PngSink::new(path.clone(), false);

        sink.present(&[0; 4], 1, 1).unwrap();
        sink.present(&[9, 9, 9, 9], 1, 1).unwrap();
        assert!(!path.exists());

        sink.flush().unwrap();
        assert_eq!(sink.written(), 1);
        assert_eq!(image::open(&path).unwrap().to_rgba8().as_raw(), &vec![9, 9, 9, 9]);
    }

    #[test]
    fn test_png_sink_reports_save_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");
        let mut sink = PngSink::new(path, true);

        let err = sink.present(&[1, 2, 3, 255], 1, 1).unwrap_err();
        assert!(matches!(err, FilterError::Sink(ref msg) if msg.contains("out.png")));
        assert_eq!(sink.written(), 0);
    }

    #[test]
    fn test_console_labels_track_changes() {
        let mut labels = ConsoleLabels::new(false);
        labels.refresh_label(FilterParameter::Brightness, "0");
        labels.refresh_label(FilterParameter::Brightness, "0");
        labels.refresh_label(FilterParameter::Brightness, "5");
        assert_eq!(
            labels.shown.get(&FilterParameter::Brightness).map(String::as_str),
            Some("5")
        );
    }
}
