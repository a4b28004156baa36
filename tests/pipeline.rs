//! End-to-end tests for the rasterize -> extract -> CSV pipeline

use image::{Rgba, RgbaImage};
use insta::assert_debug_snapshot;
use pretty_assertions::assert_eq;

use svg_pixel_csv::{
    read_records, run, Opacity, PipelineConfig, PipelineError, PixelRecord, RasterOptions,
};

#[test]
fn test_two_pixel_example() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("example.png");
    let csv = dir.path().join("example.csv");

    let mut image = RgbaImage::new(2, 1);
    image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
    image.put_pixel(1, 0, Rgba([0, 0, 0, 0]));
    image.save(&png).unwrap();

    let config = PipelineConfig::new().with_png_path(&png).with_csv_output(&csv);
    let summary = run(&config).unwrap();
    assert_eq!(summary.records, 1);

    let output = std::fs::read_to_string(&csv).unwrap();
    assert_eq!(output, "x,y,r,g,b,opacity\r\n0,0,255,0,0,1.0\r\n");

    assert_debug_snapshot!(read_records(&csv).unwrap(), @r"
    [
        PixelRecord {
            x: 0,
            y: 0,
            r: 255,
            g: 0,
            b: 0,
            opacity: Opacity(
                10,
            ),
        },
    ]
    ");
}

#[test]
fn test_output_is_truncated() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("truncate.png");
    let csv = dir.path().join("truncate.csv");
    std::fs::write(&csv, "stale content that is much longer than the new file\n".repeat(50))
        .unwrap();
    RgbaImage::new(3, 3).save(&png).unwrap();

    let config = PipelineConfig::new().with_png_path(&png).with_csv_output(&csv);
    run(&config).unwrap();

    assert_eq!(std::fs::read_to_string(&csv).unwrap(), "x,y,r,g,b,opacity\r\n");
}

#[test]
fn test_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("roundtrip.png");
    let csv = dir.path().join("roundtrip.csv");

    let image = RgbaImage::from_fn(6, 4, |x, y| {
        Rgba([(x * 40) as u8, (y * 60) as u8, 7, ((x + y) * 30) as u8])
    });
    image.save(&png).unwrap();

    let config = PipelineConfig::new().with_png_path(&png).with_csv_output(&csv);
    let summary = run(&config).unwrap();

    let expected: Vec<PixelRecord> = image
        .enumerate_pixels()
        .filter(|(_, _, px)| px.0[3] > 0)
        .map(|(x, y, px)| PixelRecord::from_rgba(x, y, px.0))
        .collect();
    let parsed = read_records(&csv).unwrap();

    assert_eq!(summary.records, expected.len());
    assert_eq!(parsed, expected);
}

#[test]
fn test_rasterize_then_extract() {
    let dir = tempfile::tempdir().unwrap();
    let svg = dir.path().join("shape.svg");
    let png = dir.path().join("shape.png");
    let csv = dir.path().join("shape.csv");
    std::fs::write(
        &svg,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4">
            <rect x="0" y="0" width="2" height="4" fill="#00ff00"/>
        </svg>"##,
    )
    .unwrap();

    let config = PipelineConfig::new()
        .with_svg_input(&svg)
        .with_png_path(&png)
        .with_csv_output(&csv)
        .with_rasterize(true)
        .with_raster_options(RasterOptions::new().with_system_fonts(false));
    let summary = run(&config).unwrap();

    assert!(png.exists());
    assert_eq!(summary.records, 8);

    let parsed = read_records(&csv).unwrap();
    assert!(parsed.iter().all(|r| r.x < 2));
    assert!(parsed
        .iter()
        .all(|r| (r.r, r.g, r.b, r.opacity) == (0, 255, 0, Opacity::OPAQUE)));
}

#[test]
fn test_corrupt_png_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("corrupt.png");
    std::fs::write(&png, b"\x89PNG\r\n\x1a\nnot really a png").unwrap();

    let config = PipelineConfig::new()
        .with_png_path(&png)
        .with_csv_output(dir.path().join("corrupt.csv"));
    let err = run(&config).unwrap_err();

    assert!(matches!(err, PipelineError::Extract(_)));
    assert!(err.to_string().starts_with("extraction failed"));
}

#[test]
fn test_unwritable_output_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("unwritable.png");
    RgbaImage::from_pixel(1, 1, Rgba([1, 1, 1, 255])).save(&png).unwrap();

    let config = PipelineConfig::new()
        .with_png_path(&png)
        .with_csv_output(dir.path().join("no-such-dir").join("out.csv"));
    let err = run(&config).unwrap_err();

    assert!(matches!(err, PipelineError::Table(_)));
}
