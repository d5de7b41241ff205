use crate::{
    animation::model::{Animation, Disposal, IndexedFrame},
    foundation::core::{FrameRect, RgbaFrame},
    foundation::error::{GifstillError, GifstillResult},
    render::blend,
};

/// How the compositing canvas is sized for a target frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CanvasBounds {
    /// Size the canvas to the target frame's own rectangle.
    ///
    /// This matches the common case where every frame covers the full
    /// logical screen. When per-frame rectangles diverge, earlier frames are
    /// clipped to the target's rectangle; use [`CanvasBounds::LogicalScreen`]
    /// for playback-accurate placement in that case.
    #[default]
    FrameBounds,
    /// Size the canvas to the animation's logical screen and honor each
    /// frame's own offset within it.
    LogicalScreen,
}

/// Reconstruct the fully-composited pixels visible at frame `index`.
///
/// Replays frames `0..=index` onto a fresh transparent canvas, applying each
/// frame's disposal code as it draws:
///
/// - [`Disposal::Keep`]: draw the frame source-over and leave it.
/// - [`Disposal::Background`]: clear the whole canvas to transparent, then
///   draw the frame. The clear is full-bounds, discarding all prior
///   composited content rather than just the frame's own footprint.
/// - [`Disposal::Previous`]: snapshot the canvas, draw the frame, then blend
///   the snapshot back source-over. The restore is a blend, not a copy:
///   wherever the snapshot is transparent the frame still shows through.
///   Frame 0 has no previous state and draws plainly.
///
/// The result depends only on frames `0..=index`. The canvas is allocated
/// per call and never retained, so repeated calls are bit-identical and
/// frames past `index` cannot affect the output.
#[tracing::instrument(skip(anim))]
pub fn composite_frame(
    anim: &Animation,
    index: usize,
    bounds: CanvasBounds,
) -> GifstillResult<RgbaFrame> {
    let Some(target) = anim.frames.get(index) else {
        return Err(GifstillError::validation(format!(
            "frame index {index} out of range for {}-frame animation",
            anim.frames.len()
        )));
    };

    let viewport = match bounds {
        CanvasBounds::FrameBounds => target.rect,
        CanvasBounds::LogicalScreen => FrameRect {
            left: 0,
            top: 0,
            width: anim.screen_width,
            height: anim.screen_height,
        },
    };
    let mut canvas = RgbaFrame::transparent(viewport.width, viewport.height);

    if index == 0 {
        draw_indexed_over(&mut canvas, viewport, target);
        return Ok(canvas);
    }

    for (i, frame) in anim.frames.iter().enumerate().take(index + 1) {
        match anim.disposal(i) {
            Disposal::Keep => draw_indexed_over(&mut canvas, viewport, frame),
            Disposal::Background => {
                canvas.clear();
                draw_indexed_over(&mut canvas, viewport, frame);
            }
            Disposal::Previous if i > 0 => {
                let snapshot = canvas.data.clone();
                draw_indexed_over(&mut canvas, viewport, frame);
                blend::over_in_place(&mut canvas.data, &snapshot)?;
            }
            Disposal::Previous => draw_indexed_over(&mut canvas, viewport, frame),
        }
    }

    Ok(canvas)
}

/// Blend `frame`'s pixels source-over onto `canvas`.
///
/// `viewport` is the canvas placement within the logical screen; the frame
/// draws at the overlap of its own rectangle with the viewport, preserving
/// absolute alignment. Transparent source pixels leave the canvas untouched.
fn draw_indexed_over(canvas: &mut RgbaFrame, viewport: FrameRect, frame: &IndexedFrame) {
    let x0 = frame.rect.left.max(viewport.left);
    let y0 = frame.rect.top.max(viewport.top);
    let x1 = frame.rect.right().min(viewport.right());
    let y1 = frame.rect.bottom().min(viewport.bottom());
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for y in y0..y1 {
        for x in x0..x1 {
            let src = frame.rgba_at(x - frame.rect.left, y - frame.rect.top);
            if src[3] == 0 {
                continue;
            }
            let offset =
                4 * ((y - viewport.top) as usize * viewport.width as usize
                    + (x - viewport.left) as usize);
            let dst = &mut canvas.data[offset..offset + 4];
            let blended = blend::over([dst[0], dst[1], dst[2], dst[3]], src);
            dst.copy_from_slice(&blended);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
