use crate::capture::{CaptureError, FrameSource};
use crate::detect::CapturedImage;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Replays the still images of a directory in file-name order.
#[derive(Clone, Debug)]
pub struct ImageDirSource {
    pending: VecDeque<PathBuf>,
}

fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}

impl ImageDirSource {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, CaptureError> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && mime_for(&path).is_some() {
                paths.push(path);
            }
        }
        if paths.is_empty() {
            return Err(CaptureError::NoImages(dir.display().to_string()));
        }
        paths.sort();
        tracing::info!(dir = %dir.display(), images = paths.len(), "image source opened");
        Ok(Self {
            pending: paths.into(),
        })
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl FrameSource for ImageDirSource {
    fn next_image(&mut self) -> BoxFuture<'_, Result<Option<CapturedImage>, CaptureError>> {
        async move {
            let Some(path) = self.pending.pop_front() else {
                return Ok(None);
            };
            let mime = mime_for(&path).unwrap_or("application/octet-stream");
            let bytes = tokio::fs::read(&path).await?;
            tracing::trace!(path = %path.display(), bytes = bytes.len(), "image read");
            Ok(Some(CapturedImage::new(bytes, mime)))
        }
        .boxed()
    }
}
