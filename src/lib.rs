//! Gifstill extracts fully-composited still frames from animated GIFs.
//!
//! A GIF stores each animation frame as an indexed-color patch plus a
//! disposal code describing how the canvas is treated around that frame's
//! draw. Saving a raw patch therefore rarely matches what a player shows.
//! Gifstill replays the disposal sequence and hands back the pixels a
//! compliant player would display at each frame index.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: [`decode_animation`] reads a GIF into an [`Animation`]
//!    (indexed frames plus lock-step disposal codes).
//! 2. **Composite**: [`composite_frame`] replays frames `0..=index` onto a
//!    fresh canvas and returns an [`RgbaFrame`].
//! 3. **Encode**: [`encode_still`] writes one frame as PNG or JPEG;
//!    [`extract_to_dir`] drives all three stages for every frame.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: compositing is a pure function of
//!   `(animation, index, bounds)`; no state is carried between frames.
//! - **No IO in the compositor**: file access lives in the decode/encode
//!   collaborators and the extraction pipeline, and one frame's write
//!   failure never aborts the rest of a batch.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod encode;
mod extract;
mod foundation;
mod render;

pub use animation::decode::{decode_animation, decode_animation_from_path};
pub use animation::model::{Animation, Disposal, IndexedFrame};
pub use encode::still::{StillFormat, encode_still, still_file_name, write_still};
pub use extract::pipeline::{ExtractOpts, ExtractStats, extract_frame, extract_to_dir};
pub use foundation::core::{FrameRect, RgbaFrame};
pub use foundation::error::{GifstillError, GifstillResult};
pub use render::composite::{CanvasBounds, composite_frame};
