// Screenshot - PNG capture of the current frame

use super::framebuffer::{FrameBuffer, SCREEN_HEIGHT, SCREEN_SIZE, SCREEN_WIDTH};
use chrono::Local;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Error type for screenshot capture
#[derive(Debug)]
pub enum ScreenshotError {
    /// Filesystem error creating the output file
    Io(std::io::Error),
    /// PNG encoding failed
    Encoding(png::EncodingError),
}

impl std::fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenshotError::Io(e) => write!(f, "failed to create screenshot file: {}", e),
            ScreenshotError::Encoding(e) => write!(f, "failed to encode screenshot: {}", e),
        }
    }
}

impl std::error::Error for ScreenshotError {}

impl From<std::io::Error> for ScreenshotError {
    fn from(e: std::io::Error) -> Self {
        ScreenshotError::Io(e)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(e: png::EncodingError) -> Self {
        ScreenshotError::Encoding(e)
    }
}

/// Save a frame as a timestamped PNG
///
/// Returns the path of the written file, e.g.
/// `screenshot_2026-08-01_14-30-05.png` in the working directory.
pub fn save_screenshot(frame: &FrameBuffer) -> Result<PathBuf, ScreenshotError> {
    let filename = format!(
        "screenshot_{}.png",
        Local::now().format("%Y-%m-%d_%H-%M-%S")
    );
    let path = PathBuf::from(filename);

    let file = File::create(&path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut rgba = vec![0u8; SCREEN_SIZE * 4];
    frame.to_rgba(&mut rgba);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&rgba)?;

    log::info!("screenshot saved to {}", path.display());
    Ok(path)
}
