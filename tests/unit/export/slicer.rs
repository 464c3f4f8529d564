use super::*;

fn cell_color(col: u32, row: u32) -> [u8; 4] {
    [(col * 60) as u8, (row * 60) as u8, 99, 255]
}

fn grid_atlas() -> AtlasImage {
    let mut img = image::RgbaImage::new(32, 32);
    for (x, y, px) in img.enumerate_pixels_mut() {
        *px = image::Rgba(cell_color(x / 8, y / 8));
    }
    AtlasImage::from(img)
}

fn req(state: AnimationState, offset: FrameOffset, quality: ExportQuality) -> ExportRequest {
    ExportRequest {
        grid: GridConfig::new(4, 4),
        state,
        offset,
        quality,
    }
}

#[test]
fn one_frame_per_column_with_fixed_delay() {
    let out = slice_animation(
        &grid_atlas(),
        &req(AnimationState::Attack, FrameOffset::ZERO, ExportQuality::Standard),
    );
    assert_eq!(out.frames.len(), 4);
    assert_eq!(out.factor, 1);
    assert_eq!(out.filename, "ANIMATION_Attack.gif");
    for (i, f) in out.frames.iter().enumerate() {
        assert_eq!(f.delay_ms, EXPORT_FRAME_DELAY_MS);
        assert_eq!((f.raster.width, f.raster.height), (8, 8));
        assert_eq!(f.raster.pixel(0, 0), cell_color(i as u32, 3));
        assert_eq!(f.raster.pixel(7, 7), cell_color(i as u32, 3));
    }
}

#[test]
fn upscale_multiplies_frame_size_and_offset() {
    let atlas = grid_atlas();
    let offset = FrameOffset::new(3, -2);
    let base = slice_animation(
        &atlas,
        &req(AnimationState::Run, offset, ExportQuality::Standard),
    );
    let up = slice_animation(
        &atlas,
        &req(AnimationState::Run, offset, ExportQuality::Upscaled),
    );
    assert_eq!(up.factor, 4);
    for (b, u) in base.frames.iter().zip(&up.frames) {
        assert_eq!(u.raster.width, b.raster.width * 4);
        assert_eq!(u.raster.height, b.raster.height * 4);
        for y in 0..b.raster.height as i64 {
            for x in 0..b.raster.width as i64 {
                let px = b.raster.pixel(x, y);
                assert_eq!(u.raster.pixel(x * 4, y * 4), px);
                assert_eq!(u.raster.pixel(x * 4 + 3, y * 4 + 3), px);
            }
        }
    }
}

#[test]
fn offset_crosses_into_neighbor_cell() {
    let out = slice_animation(
        &grid_atlas(),
        &req(
            AnimationState::Idle,
            FrameOffset::new(4, 0),
            ExportQuality::Standard,
        ),
    );
    let f0 = &out.frames[0].raster;
    assert_eq!(f0.pixel(0, 0), cell_color(0, 0));
    assert_eq!(f0.pixel(4, 0), cell_color(1, 0));
    // Last column runs off the atlas edge.
    let f3 = &out.frames[3].raster;
    assert_eq!(f3.pixel(4, 0), [0, 0, 0, 0]);
}

#[test]
fn repeated_export_is_identical() {
    let atlas = grid_atlas();
    let r = req(
        AnimationState::Jump,
        FrameOffset::new(-1, 1),
        ExportQuality::Upscaled,
    );
    assert_eq!(slice_animation(&atlas, &r), slice_animation(&atlas, &r));
}

#[test]
fn zero_cols_yields_no_frames() {
    let mut r = req(AnimationState::Idle, FrameOffset::ZERO, ExportQuality::Standard);
    r.grid = GridConfig::new(4, 0);
    assert!(slice_animation(&grid_atlas(), &r).frames.is_empty());
}

#[test]
fn static_export_is_whole_atlas_upscaled() {
    let atlas = grid_atlas();
    let out = slice_static(&atlas, ExportQuality::Upscaled, Some("Iron  Knight"));
    assert_eq!((out.raster.width, out.raster.height), (128, 128));
    assert_eq!(out.raster.pixel(127, 127), cell_color(3, 3));
    assert_eq!(out.filename, "ENTITY_Iron_Knight_4X.png");

    let plain = slice_static(&atlas, ExportQuality::Standard, None);
    assert_eq!(plain.raster, atlas.to_raster());
    assert_eq!(plain.filename, "ENTITY_UNKNOWN_1X.png");
}

#[test]
fn quality_factors() {
    assert_eq!(ExportQuality::Standard.factor(), 1);
    assert_eq!(ExportQuality::Upscaled.factor(), 4);
    assert_eq!(ExportQuality::from_upscale(false), ExportQuality::Standard);
}

#[test]
fn async_export_awaits_decode_once() {
    let atlas = grid_atlas();
    let r = req(AnimationState::Run, FrameOffset::ZERO, ExportQuality::Standard);
    let out = pollster::block_on(export_animation(async { Ok::<_, SpriteError>(atlas.clone()) }, &r)).unwrap();
    assert_eq!(out, slice_animation(&atlas, &r));
}

#[test]
fn async_export_fails_fast_on_decode_error() {
    let r = req(AnimationState::Run, FrameOffset::ZERO, ExportQuality::Standard);
    let err = pollster::block_on(export_animation(
        async { Err::<AtlasImage, _>(SpriteError::decode("truncated")) },
        &r,
    ))
    .unwrap_err();
    assert!(err.is_decode());

    let err = pollster::block_on(export_static(
        async { Err::<AtlasImage, _>(SpriteError::validation("wrong length")) },
        ExportQuality::Standard,
        None,
    ))
    .unwrap_err();
    assert!(err.is_decode());
}
