//! Static k-d tree for nearest-neighbor lookup.
//!
//! The tree is built once from a fixed point set (typically a palette) and
//! only queried afterwards. Nodes live in a flat arena and refer to their
//! children by index.

mod error;
mod tree;

pub use error::KdTreeError;
pub use tree::{squared_distance, Coordinate, KdTree, Node};
