//! Parallel nearest-palette lookup.

use std::num::NonZeroUsize;
use std::thread;

use tracing::debug;

use crate::kdtree::KdTree;

/// Pixels handled by one worker: one 1280×720 frame.
pub const DEFAULT_CHUNK_PIXELS: usize = 1280 * 720;

/// Upper bound on search workers: the available hardware parallelism.
pub fn max_workers() -> usize {
    thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

/// Number of workers used for `pixels` pixels in chunks of `chunk_pixels`,
/// never more than `max_workers` (at least 1).
#[inline]
pub fn worker_count(pixels: usize, chunk_pixels: usize, max_workers: usize) -> usize {
    pixels.div_ceil(chunk_pixels.max(1)).min(max_workers.max(1))
}

/// Replace every `(red[i], green[i], blue[i])` by its nearest tree point.
///
/// The three planes are split into matching contiguous chunks of
/// `chunk_pixels`; each chunk is rewritten in place by its own scoped
/// thread sharing the read-only tree. When that would need more than
/// [`max_workers`] threads, the chunks grow so exactly that many remain.
/// A single chunk runs on the calling thread.
///
/// # Panics
///
/// If the three planes differ in length.
pub fn nearest_colors(
    tree: &KdTree<i32, 3>,
    red: &mut [i32],
    green: &mut [i32],
    blue: &mut [i32],
    chunk_pixels: usize,
) {
    assert!(
        red.len() == green.len() && red.len() == blue.len(),
        "channel planes differ in length"
    );
    let pixels = red.len();
    let workers = worker_count(pixels, chunk_pixels, max_workers());
    let chunk = chunk_pixels.max(pixels.div_ceil(workers.max(1))).max(1);
    debug!(pixels, chunk, workers, "nearest color search");

    if workers <= 1 {
        map_chunk(tree, red, green, blue);
        return;
    }

    thread::scope(|scope| {
        let chunks = red
            .chunks_mut(chunk)
            .zip(green.chunks_mut(chunk))
            .zip(blue.chunks_mut(chunk));
        for ((r, g), b) in chunks {
            scope.spawn(move || map_chunk(tree, r, g, b));
        }
    });
}

fn map_chunk(tree: &KdTree<i32, 3>, red: &mut [i32], green: &mut [i32], blue: &mut [i32]) {
    for ((r, g), b) in red.iter_mut().zip(green.iter_mut()).zip(blue.iter_mut()) {
        let [nr, ng, nb] = tree.nearest(&[*r, *g, *b]);
        *r = nr;
        *g = ng;
        *b = nb;
    }
}
