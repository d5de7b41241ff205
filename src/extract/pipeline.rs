use std::path::Path;

use anyhow::Context;
use rayon::prelude::*;
use tracing::warn;

use crate::{
    animation::model::Animation,
    encode::still::{StillFormat, still_file_name, write_still},
    foundation::core::RgbaFrame,
    foundation::error::{GifstillError, GifstillResult},
    render::composite::{CanvasBounds, composite_frame},
};

/// Options for [`extract_to_dir`].
#[derive(Clone, Debug)]
pub struct ExtractOpts {
    /// Output encoding for every frame.
    pub format: StillFormat,
    /// Canvas sizing rule passed to the compositor.
    pub bounds: CanvasBounds,
    /// Composite and encode frames on a rayon pool.
    pub parallel: bool,
    /// Worker thread override (parallel mode only).
    pub threads: Option<usize>,
}

impl Default for ExtractOpts {
    fn default() -> Self {
        Self {
            format: StillFormat::Png,
            bounds: CanvasBounds::default(),
            parallel: false,
            threads: None,
        }
    }
}

/// Counters for one extraction run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Frames in the animation.
    pub frames_total: u64,
    /// Frames successfully written.
    pub frames_written: u64,
    /// Frames skipped after a composite, encode, or IO failure.
    pub frames_failed: u64,
}

/// Composite a single frame using the pipeline options.
///
/// Unlike [`extract_to_dir`], errors here propagate to the caller; there is
/// no batch to keep alive.
pub fn extract_frame(
    anim: &Animation,
    index: usize,
    opts: &ExtractOpts,
) -> GifstillResult<RgbaFrame> {
    composite_frame(anim, index, opts.bounds)
}

/// Composite every frame of `anim` and write the stills into `out_dir`.
///
/// Files are named `<base>_frame_<index>.<ext>` via [`still_file_name`]. A
/// failure on one frame is logged and counted, and extraction continues with
/// the next frame; only setup failures (creating `out_dir`, an unusable
/// thread count) abort the run. Each frame is an independent composite of
/// its own canvas, so parallel mode needs no coordination beyond the pool.
pub fn extract_to_dir(
    anim: &Animation,
    base: &str,
    out_dir: &Path,
    opts: &ExtractOpts,
) -> GifstillResult<ExtractStats> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir '{}'", out_dir.display()))?;

    let write_one = |index: usize| -> GifstillResult<()> {
        let frame = composite_frame(anim, index, opts.bounds)?;
        let path = out_dir.join(still_file_name(base, index, opts.format));
        write_still(&path, &frame, opts.format)
    };

    let results: Vec<(usize, GifstillResult<()>)> = if opts.parallel {
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| {
            (0..anim.len())
                .into_par_iter()
                .map(|i| (i, write_one(i)))
                .collect()
        })
    } else {
        (0..anim.len()).map(|i| (i, write_one(i))).collect()
    };

    let mut stats = ExtractStats {
        frames_total: anim.len() as u64,
        ..ExtractStats::default()
    };
    for (index, result) in results {
        match result {
            Ok(()) => stats.frames_written += 1,
            Err(e) => {
                warn!(frame = index, error = %e, "frame skipped");
                stats.frames_failed += 1;
            }
        }
    }
    Ok(stats)
}

fn build_thread_pool(threads: Option<usize>) -> GifstillResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(GifstillError::validation(
            "extract 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    Ok(builder
        .build()
        .map_err(anyhow::Error::new)
        .context("build rayon thread pool")?)
}
