// SPDX-License-Identifier: MPL-2.0

//! Integration tests for the overlay pipeline

use chrono::{Local, TimeZone};
use gpspic::backends::geocoding::AddressRecord;
use gpspic::backends::location::{LocationFix, ProviderKind};
use gpspic::overlay::{MapPlaceholder, OverlayContent, OverlayRenderer, OverlayStyle};
use gpspic::pipelines::photo::{PhotoCompositor, PhotoEncoder, write_atomically};
use image::{Rgba, RgbaImage};
use std::io::Write;

fn content() -> OverlayContent {
    let fix = LocationFix::new(40.6892, -74.0445, ProviderKind::Gps);
    let address = AddressRecord {
        locality: Some("New York".into()),
        admin_area: Some("NY".into()),
        country_name: Some("United States".into()),
        address_line: Some("Liberty Island, New York, NY 10004, USA".into()),
    };
    let captured_at = Local.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();
    OverlayContent::assemble(Some(&fix), &address, &captured_at, MapPlaceholder::Builtin)
}

fn photo(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 251) as u8, (y % 241) as u8, ((x + y) % 239) as u8, 255])
    })
}

#[test]
fn test_overlay_fits_every_photo_shape() {
    let renderer = OverlayRenderer::new(OverlayStyle::default(), None);

    for (w, h) in [(4032, 3024), (3024, 4032), (1080, 1920), (800, 200), (200, 800)] {
        let rendered = renderer.render(&content(), w as f32, h as f32).unwrap();
        let (ow, oh) = rendered.image.dimensions();

        assert!(ow as f32 <= w as f32 * 0.9, "{ow}x{oh} in {w}x{h}");
        assert!(oh as f32 <= h as f32 * 0.3, "{ow}x{oh} in {w}x{h}");

        let composited = PhotoCompositor::new()
            .composite(&photo(w, h), &rendered.image, rendered.size)
            .unwrap();
        assert_eq!(composited.dimensions(), (w, h));
    }
}

#[test]
fn test_same_inputs_give_identical_output() {
    let renderer = OverlayRenderer::new(OverlayStyle::default(), None);
    let compositor = PhotoCompositor::new();
    let source = photo(1080, 1920);

    let run = || {
        let rendered = renderer.render(&content(), 1080.0, 1920.0).unwrap();
        compositor
            .composite(&source, &rendered.image, rendered.size)
            .unwrap()
    };

    assert_eq!(run(), run());
}

#[tokio::test]
async fn test_failed_save_leaves_camera_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("2026-10-19-09-30-00-000-GPSPic.jpg");
    std::fs::write(&path, b"camera jpeg bytes").unwrap();

    let result = write_atomically(&path, |writer| {
        writer.write_all(&[0xFF, 0xD8, 0xFF])?;
        Err(gpspic::errors::PersistError::WriteFailed("disk full".into()))
    });
    assert!(result.is_err());
    assert_eq!(std::fs::read(&path).unwrap(), b"camera jpeg bytes");

    let saved = PhotoEncoder::default()
        .save(photo(64, 64), path.clone())
        .await
        .unwrap();
    assert_eq!(image::open(&saved).unwrap().width(), 64);
}
