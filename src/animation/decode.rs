use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use anyhow::Context;

use crate::{
    animation::model::{Animation, Disposal, IndexedFrame},
    foundation::core::FrameRect,
    foundation::error::{GifstillError, GifstillResult},
};

/// Decode a GIF stream into an [`Animation`].
///
/// Frames keep their indexed form: palette indices plus the local palette
/// when one is present, the global palette otherwise. Disposal codes are
/// collected in lock-step with the frames. A malformed stream, a stream with
/// no frames, or a frame with no palette at all is reported as
/// [`GifstillError::Decode`].
pub fn decode_animation<R: Read>(reader: R) -> GifstillResult<Animation> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::Indexed);
    let mut decoder = options
        .read_info(reader)
        .map_err(|e| GifstillError::decode(format!("read gif header: {e}")))?;

    let screen_width = u32::from(decoder.width());
    let screen_height = u32::from(decoder.height());
    let global_palette = decoder.global_palette().map(<[u8]>::to_vec);

    let mut frames = Vec::new();
    let mut disposals = Vec::new();
    loop {
        let frame = match decoder.read_next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            Err(e) => {
                return Err(GifstillError::decode(format!(
                    "read gif frame {}: {e}",
                    frames.len()
                )));
            }
        };

        let palette = match (&frame.palette, &global_palette) {
            (Some(local), _) => local.clone(),
            (None, Some(global)) => global.clone(),
            (None, None) => {
                return Err(GifstillError::decode(format!(
                    "frame {} has no local palette and the stream has no global palette",
                    frames.len()
                )));
            }
        };

        disposals.push(Disposal::from(frame.dispose));
        frames.push(IndexedFrame {
            rect: FrameRect {
                left: u32::from(frame.left),
                top: u32::from(frame.top),
                width: u32::from(frame.width),
                height: u32::from(frame.height),
            },
            pixels: frame.buffer.to_vec(),
            palette,
            transparent: frame.transparent,
        });
    }

    if frames.is_empty() {
        return Err(GifstillError::decode("gif stream contains no frames"));
    }

    Ok(Animation {
        screen_width,
        screen_height,
        frames,
        disposals,
    })
}

/// Open `path` and decode it as a GIF animation.
pub fn decode_animation_from_path(path: &Path) -> GifstillResult<Animation> {
    let file = File::open(path).with_context(|| format!("open gif '{}'", path.display()))?;
    decode_animation(BufReader::new(file))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/decode.rs"]
mod tests;
