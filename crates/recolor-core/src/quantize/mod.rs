//! Color-reduction modes and the pipeline that runs them.

mod error;
mod levels;
mod mode;
mod quantizer;
mod search;

pub use error::QuantizeError;
pub use levels::{equidistant_colors, equidistant_index, own_palette, reduce_levels, requantize};
pub use mode::Mode;
pub use quantizer::{Quantizer, DEFAULT_RESOLUTION};
pub use search::{max_workers, nearest_colors, worker_count, DEFAULT_CHUNK_PIXELS};
