//! First-frame extraction with ffmpeg.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use emma_shared::PreviewConfig;
use tokio::process::Command;
use tracing::debug;

use super::PreviewDeriver;
use super::error::PreviewError;
use crate::media::MediaAsset;

const FRAME_CONTENT_TYPE: &str = "image/jpeg";

/// Extracts the first decodable frame of a video as a JPEG.
///
/// The video is written to a scratch directory because ffmpeg needs a
/// seekable input. The directory is removed when the call returns, on
/// every path.
#[derive(Debug, Clone)]
pub struct FfmpegFrameExtractor {
    ffmpeg_path: PathBuf,
    timeout: Duration,
    scratch_root: Option<PathBuf>,
}

impl FfmpegFrameExtractor {
    /// Create an extractor for the given ffmpeg executable.
    #[must_use]
    pub fn new(ffmpeg_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            timeout,
            scratch_root: None,
        }
    }

    /// Create an extractor from preview configuration.
    #[must_use]
    pub fn from_config(config: &PreviewConfig) -> Self {
        Self::new(
            config.ffmpeg_path.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Create scratch directories under `root` instead of the system temp dir.
    #[must_use]
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    fn scratch_dir(&self) -> std::io::Result<tempfile::TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("emma-preview-");
        match &self.scratch_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
    }

    async fn run(&self, input: &Path, output: &Path) -> Result<(), PreviewError> {
        let mut command = Command::new(&self.ffmpeg_path);
        command
            .args(["-y", "-loglevel", "error", "-i"])
            .arg(input)
            .args(["-frames:v", "1", "-f", "image2"])
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let result = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| PreviewError::Timeout(self.timeout))?
            .map_err(|e| PreviewError::Spawn(e.to_string()))?;

        if !result.status.success() {
            return Err(PreviewError::ExitStatus {
                code: result.status.code(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

impl PreviewDeriver for FfmpegFrameExtractor {
    async fn derive_preview(&self, video: &[u8]) -> Result<MediaAsset, PreviewError> {
        let scratch = self.scratch_dir()?;
        let input = scratch.path().join("input");
        let output = scratch.path().join("frame.jpg");

        tokio::fs::write(&input, video).await?;
        self.run(&input, &output).await?;

        let frame = match tokio::fs::read(&output).await {
            Ok(frame) => frame,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        if frame.is_empty() {
            return Err(PreviewError::EmptyOutput);
        }

        debug!(
            video_bytes = video.len(),
            frame_bytes = frame.len(),
            "Extracted preview frame"
        );

        Ok(MediaAsset::new(frame, FRAME_CONTENT_TYPE))
    }
}
