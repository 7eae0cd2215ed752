//! Test images.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use recolor::codec::RasterImage;

/// Seed shared by all random fixtures
pub const SEED: u64 = 0x5EED;

/// One flat color
pub fn solid(width: usize, height: usize, color: [u8; 3]) -> RasterImage {
    RasterImage {
        width,
        height,
        channels: 3,
        data: color.repeat(width * height),
    }
}

/// Grey ramp from black on the left to white on the right
pub fn horizontal_ramp(width: usize, height: usize) -> RasterImage {
    let mut data = Vec::with_capacity(width * height * 3);
    for _ in 0..height {
        for x in 0..width {
            let v = (x * 255 / width.saturating_sub(1).max(1)) as u8;
            data.extend_from_slice(&[v, v, v]);
        }
    }
    RasterImage {
        width,
        height,
        channels: 3,
        data,
    }
}

/// Left half black, right half white
pub fn vertical_step(width: usize, height: usize) -> RasterImage {
    let mut data = Vec::with_capacity(width * height * 3);
    for _ in 0..height {
        for x in 0..width {
            let v = if x < width / 2 { 0 } else { 255 };
            data.extend_from_slice(&[v, v, v]);
        }
    }
    RasterImage {
        width,
        height,
        channels: 3,
        data,
    }
}

/// Random RGB or RGBA pixels
pub fn noise(width: usize, height: usize, channels: usize) -> RasterImage {
    let mut rng = StdRng::seed_from_u64(SEED);
    RasterImage {
        width,
        height,
        channels,
        data: (0..width * height * channels).map(|_| rng.gen()).collect(),
    }
}

/// Add an alpha channel that counts up per pixel
pub fn with_alpha(image: &RasterImage) -> RasterImage {
    let data = image
        .data
        .chunks_exact(3)
        .enumerate()
        .flat_map(|(i, px)| [px[0], px[1], px[2], (i % 251) as u8])
        .collect();
    RasterImage {
        width: image.width,
        height: image.height,
        channels: 4,
        data,
    }
}
