#![allow(clippy::module_inception)]

//! recolor-core: grid convolution and palette matching for color reduction
//!
//! This library holds the numeric core of the `recolor` tool: a generic 2-D
//! [`Grid`] with a convolution engine, Gaussian kernels, Sobel and
//! difference-of-Gaussians edge detection, a static [`KdTree`] for
//! nearest-color lookup, and the [`Quantizer`] pipeline that ties them
//! together.
//!
//! # Quick Start
//!
//! ```
//! use recolor_core::{Channels, Mode, Palette, Quantizer};
//!
//! let palette = Palette::new(vec![[0, 0, 0], [255, 0, 0], [255, 255, 255]]).unwrap();
//! let quantizer = Quantizer::new(Mode::Search).palette(palette);
//!
//! // 1×2 RGB image: dark red, near white
//! let pixels = [180, 20, 20, 240, 250, 245];
//! let mut channels = Channels::from_interleaved(&pixels, 1, 2, 3).unwrap();
//! quantizer.quantize(&mut channels).unwrap();
//!
//! assert_eq!(channels.to_interleaved().unwrap(), vec![255, 0, 0, 255, 255, 255]);
//! ```
//!
//! # Convolution
//!
//! Convolution is implemented as correlation (the kernel is not flipped)
//! over a zero-padded input, accumulated in `f64`:
//!
//! ```
//! use recolor_core::Grid;
//!
//! let image = Grid::filled(3, 3, 10.0f32);
//! let kernel = Grid::filled(3, 3, 1.0f32 / 9.0);
//! let out = image.convolve(&kernel).unwrap();
//!
//! assert!((out[(1, 1)] - 10.0).abs() < 1e-5);
//! assert!((out[(0, 0)] - 40.0 / 9.0).abs() < 1e-5);
//! ```
//!
//! Separable kernels go through
//! [`convolve_separable`](Grid::convolve_separable): a horizontal pass
//! followed by a vertical one, `O(2k)` per pixel instead of `O(k²)`.
//! Every form has a masked variant blending the filtered value with the
//! original: `out = filtered * mask + original * (1 - mask)`.
//!
//! # Modes
//!
//! | Mode          | Needs palette | Effect                                         |
//! |---------------|---------------|------------------------------------------------|
//! | `search`      | yes           | nearest palette color per pixel                |
//! | `equidistant` | yes           | greyscale indexes the brightness-sorted palette |
//! | `self`        | no            | each channel reduced to `resolution` levels    |
//! | `self-sort`   | no            | equidistant over the image's own colors        |
//! | `bw`          | no            | greyscale reduced to `resolution` levels       |

pub mod channels;
pub mod convolve;
pub mod dog;
pub mod edges;
pub mod grid;
pub mod kdtree;
pub mod kernel;
pub mod palette;
pub mod quantize;


pub use channels::Channels;
pub use dog::dog;
pub use edges::sobel;
pub use grid::{Element, Grid, GridError, GridView};
pub use kdtree::{KdTree, KdTreeError};
pub use kernel::{gaussian_kernel, gaussian_vector};
pub use palette::{Color, Palette, PaletteError};
pub use quantize::{Mode, QuantizeError, Quantizer};
