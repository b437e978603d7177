//! One-shot readiness gate for the source image
//!
//! Decoding runs on the blocking pool. Input handling awaits [`ImageReady::wait`]
//! before it touches the session.

use anyhow::{Context, Result, anyhow};
use filter_pipeline::PixelBuffer;
use std::path::PathBuf;
use tokio::sync::oneshot;

pub struct ImageReady {
    rx: oneshot::Receiver<Result<PixelBuffer>>,
}

impl ImageReady {
    pub fn load(path: PathBuf) -> Self {
        let (tx, rx) = oneshot::channel();

        tokio::task::spawn_blocking(move || {
            log::debug!("decoding {}", path.display());
            let result = PixelBuffer::open(&path)
                .with_context(|| format!("load image {} failed", path.display()));
            _ = tx.send(result);
        });

        Self { rx }
    }

    pub async fn wait(self) -> Result<PixelBuffer> {
        self.rx
            .await
            .map_err(|_| anyhow!("image loader exited before finishing"))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_ready_after_decode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.png");
        RgbaImage::from_pixel(3, 2, Rgba([7, 8, 9, 255]))
            .save(&path)
            .unwrap();

        let source = ImageReady::load(path).wait().await.unwrap();
        assert_eq!((source.width(), source.height()), (3, 2));
        assert_eq!(source.pixel(2, 1), [7, 8, 9, 255]);
    }

    #[tokio::test]
    async fn test_missing_image_fails() {
        let dir = tempdir().unwrap();
        let result = ImageReady::load(dir.path().join("nope.png")).wait().await;
        assert!(result.is_err());
    }
}
