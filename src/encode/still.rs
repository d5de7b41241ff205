use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use image::{
    ImageEncoder,
    codecs::{jpeg::JpegEncoder, png::PngEncoder},
};

use crate::foundation::{
    core::RgbaFrame,
    error::{GifstillError, GifstillResult},
};

/// Still-image output format for composited frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StillFormat {
    /// Lossless PNG, RGBA.
    Png,
    /// Lossy JPEG. The alpha channel is dropped; transparent pixels flatten
    /// to black.
    Jpeg {
        /// Encoder quality, 1 (smallest) to 100 (best).
        quality: u8,
    },
}

impl StillFormat {
    /// Build a JPEG format value, validating `quality` into 1..=100.
    pub fn jpeg(quality: u8) -> GifstillResult<Self> {
        if !(1..=100).contains(&quality) {
            return Err(GifstillError::validation(format!(
                "jpeg quality must be between 1 and 100, got {quality}"
            )));
        }
        Ok(Self::Jpeg { quality })
    }

    /// File extension for the format, including the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => ".png",
            Self::Jpeg { .. } => ".jpg",
        }
    }
}

/// Output file name for one composited frame:
/// `<base>_frame_<index>.<ext>`, with the index zero-padded to three digits.
pub fn still_file_name(base: &str, index: usize, format: StillFormat) -> String {
    format!("{base}_frame_{index:03}{}", format.extension())
}

/// Encode one composited frame to `writer` in `format`.
///
/// Encoder failures surface as [`GifstillError::Encode`], distinct from the
/// IO errors around opening the destination.
pub fn encode_still<W: Write>(
    frame: &RgbaFrame,
    format: StillFormat,
    writer: W,
) -> GifstillResult<()> {
    match format {
        StillFormat::Png => PngEncoder::new(writer)
            .write_image(
                &frame.data,
                frame.width,
                frame.height,
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| GifstillError::encode(format!("encode png: {e}")))?,
        StillFormat::Jpeg { quality } => {
            let rgb = drop_alpha(&frame.data);
            JpegEncoder::new_with_quality(writer, quality)
                .write_image(
                    &rgb,
                    frame.width,
                    frame.height,
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e| GifstillError::encode(format!("encode jpeg: {e}")))?
        }
    }
    Ok(())
}

/// Encode one composited frame to a file at `path`.
pub fn write_still(path: &Path, frame: &RgbaFrame, format: StillFormat) -> GifstillResult<()> {
    let file = File::create(path)
        .with_context(|| format!("create output file '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);
    encode_still(frame, format, &mut writer)?;
    writer
        .flush()
        .with_context(|| format!("flush output file '{}'", path.display()))?;
    Ok(())
}

fn drop_alpha(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }
    rgb
}

#[cfg(test)]
#[path = "../../tests/unit/encode/still.rs"]
mod tests;
