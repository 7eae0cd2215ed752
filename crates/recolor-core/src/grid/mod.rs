//! Dense 2-D grids, borrowed views and element-wise arithmetic.
//!
//! [`Grid`] is the container every image-processing stage works on: one
//! grid per color channel, one grid per edge map, one grid per kernel.

mod element;
mod error;
mod grid;
mod ops;
mod view;

pub use element::Element;
pub use error::GridError;
pub use grid::Grid;
pub use view::GridView;
