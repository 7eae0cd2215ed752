//! File-level tests for the convert pipeline.

mod common;

use common::{fixtures, TestWorkspace};
use pretty_assertions::assert_eq;
use recolor::error::{CodecError, PaletteFileError};
use recolor::services::ConvertError;
use recolor_core::Mode;

const PICO8: [[u8; 3]; 16] = [
    [0, 0, 0],
    [29, 43, 83],
    [126, 37, 83],
    [0, 135, 81],
    [171, 82, 54],
    [95, 87, 79],
    [194, 195, 199],
    [255, 241, 232],
    [255, 0, 77],
    [255, 163, 0],
    [255, 236, 39],
    [0, 228, 54],
    [41, 173, 255],
    [131, 118, 156],
    [255, 119, 168],
    [255, 204, 170],
];

#[test]
fn test_search_maps_onto_palette() {
    let ws = TestWorkspace::new();
    let image = fixtures::noise(40, 30, 3);
    let input = ws.write_image("noise.png", &image);

    let report = ws
        .converter
        .convert(&ws.convert_request(&input, Mode::Search, Some("pico8")))
        .unwrap();

    assert_eq!(report.output, ws.path("noise_pico8.png"));
    assert_eq!((report.width, report.height), (40, 30));
    let out = ws.read_image(&report.output);
    common::assert_same_shape(&out, &image);
    common::assert_only_colors(&out, &PICO8);
}

#[test]
fn test_search_picks_nearest_color() {
    let ws = TestWorkspace::new();
    let input = ws.write_image("grey.png", &fixtures::solid(5, 5, [200, 200, 200]));

    let report = ws
        .converter
        .convert(&ws.convert_request(&input, Mode::Search, Some("bw")))
        .unwrap();

    let out = ws.read_image(&report.output);
    assert_eq!(
        common::distinct_colors(&out).into_iter().collect::<Vec<_>>(),
        vec![[255, 255, 255]]
    );
}

#[test]
fn test_alpha_survives_every_mode() {
    let ws = TestWorkspace::new();
    let image = fixtures::with_alpha(&fixtures::noise(16, 12, 3));
    let input = ws.write_image("alpha.png", &image);

    for mode in Mode::ALL {
        let mut request = ws.convert_request(&input, mode, Some("gameboy"));
        request.output = Some(ws.path(&format!("alpha_{mode}.png")));
        request.blur_radius = 1;
        request.antialias_radius = 1;
        let report = ws.converter.convert(&request).unwrap();

        let out = ws.read_image(&report.output);
        common::assert_same_shape(&out, &image);
        common::assert_alpha_preserved(&out, &image);
    }
}

#[test]
fn test_equidistant_follows_brightness() {
    let ws = TestWorkspace::new();
    let input = ws.write_image("ramp.png", &fixtures::horizontal_ramp(64, 4));

    let report = ws
        .converter
        .convert(&ws.convert_request(&input, Mode::Equidistant, Some("grey4")))
        .unwrap();

    let out = ws.read_image(&report.output);
    let grey4 = [[0, 0, 0], [85, 85, 85], [170, 170, 170], [255, 255, 255]];
    common::assert_only_colors(&out, &grey4);
    assert_eq!(&out.data[..3], &[0, 0, 0]);
    assert_eq!(&out.data[out.data.len() - 3..], &[255, 255, 255]);
    // Every level is used by a full ramp
    assert_eq!(common::distinct_colors(&out).len(), 4);
}

#[test]
fn test_self_levels_per_channel() {
    let ws = TestWorkspace::new();
    let input = ws.write_image("noise.png", &fixtures::noise(20, 20, 3));

    let request = ws.convert_request(&input, Mode::SelfLevels, None);
    let report = ws.converter.convert(&request).unwrap();

    assert_eq!(report.output, ws.path("noise_self.png"));
    let out = ws.read_image(&report.output);
    assert!(out.data.iter().all(|&v| v == 0 || v == 255));
}

#[test]
fn test_black_white_three_levels() {
    let ws = TestWorkspace::new();
    let input = ws.write_image("noise.png", &fixtures::noise(20, 20, 3));

    let mut request = ws.convert_request(&input, Mode::BlackWhite, None);
    request.resolution = 3;
    let report = ws.converter.convert(&request).unwrap();

    let out = ws.read_image(&report.output);
    common::assert_greyscale(&out);
    assert!(out.data.iter().all(|&v| [0, 128, 255].contains(&v)));
}

#[test]
fn test_self_sort_limits_color_count() {
    let ws = TestWorkspace::new();
    let input = ws.write_image("noise.png", &fixtures::noise(24, 24, 3));

    let mut request = ws.convert_request(&input, Mode::SelfSort, None);
    request.resolution = 4;
    let report = ws.converter.convert(&request).unwrap();

    assert_eq!(report.output, ws.path("noise_self-sort.png"));
    let out = ws.read_image(&report.output);
    let colors = common::distinct_colors(&out);
    assert!(colors.len() <= 4, "got {} colors", colors.len());
    assert!(colors.len() >= 2);
}

#[test]
fn test_chunk_size_does_not_change_output() {
    let ws = TestWorkspace::new();
    let input = ws.write_image("noise.png", &fixtures::noise(50, 40, 3));

    let mut whole = ws.convert_request(&input, Mode::Search, Some("eink6"));
    whole.output = Some(ws.path("whole.png"));
    let mut chunked = whole.clone();
    chunked.output = Some(ws.path("chunked.png"));
    chunked.chunk_pixels = 97;

    let a = ws.converter.convert(&whole).unwrap();
    let b = ws.converter.convert(&chunked).unwrap();
    assert_eq!(ws.read_image(&a.output), ws.read_image(&b.output));
}

#[test]
fn test_optimized_output_keeps_pixels() {
    let ws = TestWorkspace::new();
    let input = ws.write_image("ramp.png", &fixtures::horizontal_ramp(32, 8));

    let mut plain = ws.convert_request(&input, Mode::Search, Some("gameboy"));
    plain.output = Some(ws.path("plain.png"));
    let mut optimized = plain.clone();
    optimized.output = Some(ws.path("optimized.png"));
    optimized.optimize = true;

    let a = ws.converter.convert(&plain).unwrap();
    let b = ws.converter.convert(&optimized).unwrap();
    assert_eq!(ws.read_image(&a.output), ws.read_image(&b.output));
}

#[test]
fn test_unknown_palette_writes_nothing() {
    let ws = TestWorkspace::new();
    let input = ws.write_image("grey.png", &fixtures::solid(4, 4, [9, 9, 9]));

    let result = ws
        .converter
        .convert(&ws.convert_request(&input, Mode::Search, Some("sunset")));

    assert!(matches!(
        result,
        Err(ConvertError::Palette(PaletteFileError::NotFound { name })) if name == "sunset"
    ));
    assert!(!ws.path("grey_sunset.png").exists());
}

#[test]
fn test_unsupported_output_format() {
    let ws = TestWorkspace::new();
    let input = ws.write_image("grey.png", &fixtures::solid(4, 4, [9, 9, 9]));

    let mut request = ws.convert_request(&input, Mode::SelfLevels, None);
    request.output = Some(ws.path("grey.jpg"));

    assert!(matches!(
        ws.converter.convert(&request),
        Err(ConvertError::Codec(CodecError::UnsupportedFormat { .. }))
    ));
}

#[test]
fn test_missing_and_corrupt_input() {
    let ws = TestWorkspace::new();

    let missing = ws.path("missing.png");
    assert!(matches!(
        ws.converter
            .convert(&ws.convert_request(&missing, Mode::SelfLevels, None)),
        Err(ConvertError::Codec(CodecError::Io(_)))
    ));

    let corrupt = ws.write_bytes("corrupt.png", b"\x89PNG but not really");
    assert!(matches!(
        ws.converter
            .convert(&ws.convert_request(&corrupt, Mode::SelfLevels, None)),
        Err(ConvertError::Codec(CodecError::Decode(_)))
    ));
}

#[test]
fn test_broken_section_does_not_affect_others() {
    let ws = TestWorkspace::with_palettes("[good]\n0 0 0\n255 255 255\n[bad]\n0 0\n");
    let input = ws.write_image("grey.png", &fixtures::solid(3, 3, [100, 100, 100]));

    assert!(ws
        .converter
        .convert(&ws.convert_request(&input, Mode::Search, Some("good")))
        .is_ok());
    assert!(matches!(
        ws.converter
            .convert(&ws.convert_request(&input, Mode::Search, Some("bad"))),
        Err(ConvertError::Palette(PaletteFileError::MalformedLine { line: 5, .. }))
    ));
}
