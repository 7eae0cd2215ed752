//! Assertion helpers for tests.

use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use recolor::codec::RasterImage;

/// Distinct RGB triples of an image
pub fn distinct_colors(image: &RasterImage) -> BTreeSet<[u8; 3]> {
    image
        .data
        .chunks_exact(image.channels)
        .map(|px| [px[0], px[1], px[2]])
        .collect()
}

/// Assert two images have the same dimensions and layout
pub fn assert_same_shape(actual: &RasterImage, expected: &RasterImage) {
    assert_eq!(
        (actual.width, actual.height, actual.channels),
        (expected.width, expected.height, expected.channels),
        "Image shape changed"
    );
    assert_eq!(actual.data.len(), expected.data.len());
}

/// Assert every pixel of `image` is one of `palette`
pub fn assert_only_colors(image: &RasterImage, palette: &[[u8; 3]]) {
    for color in distinct_colors(image) {
        assert!(
            palette.contains(&color),
            "Color {color:?} is not in palette {palette:?}"
        );
    }
}

/// Assert the alpha channel of `actual` equals that of `expected`
pub fn assert_alpha_preserved(actual: &RasterImage, expected: &RasterImage) {
    assert!(expected.has_alpha(), "Expected image has no alpha channel");
    assert!(actual.has_alpha(), "Alpha channel was dropped");
    let alpha = |image: &RasterImage| -> Vec<u8> {
        image.data.chunks_exact(4).map(|px| px[3]).collect()
    };
    assert_eq!(alpha(actual), alpha(expected), "Alpha channel changed");
}

/// Assert every pixel is grey (r == g == b)
pub fn assert_greyscale(image: &RasterImage) {
    for (i, px) in image.data.chunks_exact(image.channels).enumerate() {
        assert!(
            px[0] == px[1] && px[1] == px[2],
            "Pixel {i} is not grey: {:?}",
            &px[..3]
        );
    }
}
