use super::*;
use crate::assets::atlas::AtlasImage;
use crate::foundation::core::PixelRect;
use crate::render::background::Theme;
use crate::render::compositor::{SkipReason, Zoom};

fn cell_color(col: u32, row: u32) -> [u8; 4] {
    [(col * 50) as u8, (row * 50) as u8, 7, 255]
}

fn ready_atlas() -> AtlasSlot {
    let mut img = image::RgbaImage::new(64, 64);
    for (x, y, px) in img.enumerate_pixels_mut() {
        *px = image::Rgba(cell_color(x / 16, y / 16));
    }
    AtlasSlot::Ready(AtlasImage::from(img))
}

fn session() -> PreviewSession {
    let mut cfg = SessionConfig::default();
    cfg.preview.zoom = Zoom::new(1);
    PreviewSession::from_config(&cfg)
}

#[test]
fn ticks_advance_and_draw_the_run_row() {
    let slot = ready_atlas();
    let mut s = session();
    assert_eq!(s.state(), AnimationState::Run);

    let out = s.tick(0.0, (32, 32), &slot);
    assert!(out.is_drawn());
    assert_eq!(s.status().frame, 0);

    let out = s.tick(125.0, (32, 32), &slot);
    assert_eq!(
        out,
        DrawOutcome::Drawn {
            source: PixelRect::new(16, 16, 16, 16),
            dest: PixelRect::new(8, 8, 16, 16),
        }
    );
    assert_eq!(s.compositor().surface().pixel(8, 8), cell_color(1, 1));
}

#[test]
fn pending_atlas_still_advances_the_clock() {
    let mut s = session();
    assert_eq!(
        s.tick(0.0, (32, 32), &AtlasSlot::Pending),
        DrawOutcome::Skipped(SkipReason::AtlasPending)
    );
    s.tick(130.0, (32, 32), &AtlasSlot::Pending);
    assert_eq!(s.status().frame, 1);
}

#[test]
fn step_pauses_and_wraps() {
    let mut s = session();
    s.tick(0.0, (8, 8), &AtlasSlot::Pending);
    s.step(StepDirection::Backward);
    assert!(!s.is_playing());
    assert_eq!(s.status().frame, 3);
    s.step(StepDirection::Forward);
    assert_eq!(s.status().frame, 0);
    s.step(StepDirection::Forward);
    assert_eq!(s.status().frame, 1);

    // Paused: time passing does not move the frame.
    s.tick(1_000.0, (8, 8), &AtlasSlot::Pending);
    s.tick(5_000.0, (8, 8), &AtlasSlot::Pending);
    assert_eq!(s.status().frame, 1);

    s.toggle_playing();
    assert!(s.is_playing());
}

#[test]
fn step_with_no_columns_is_a_no_op() {
    let mut s = session();
    s.set_grid(GridConfig::new(4, 0));
    s.step(StepDirection::Forward);
    assert_eq!(s.status().frame, 0);
}

#[test]
fn shrinking_the_grid_clamps_the_frame() {
    let mut s = session();
    s.step(StepDirection::Backward);
    assert_eq!(s.status().frame, 3);
    s.set_grid(GridConfig::new(4, 2));
    assert_eq!(s.status().frame, 1);
}

#[test]
fn presentation_toggles_cycle() {
    let mut s = PreviewSession::default();
    assert_eq!(s.status().zoom, 2);
    s.cycle_zoom();
    assert_eq!(s.status().zoom, 3);
    for _ in 0..6 {
        s.cycle_zoom();
    }
    assert_eq!(s.status().zoom, 1);

    assert_eq!(s.options().theme, Theme::Dark);
    s.cycle_theme();
    assert_eq!(s.options().theme, Theme::Phosphor);
    s.cycle_theme();
    assert_eq!(s.options().theme, Theme::Light);

    assert!(!s.options().show_grid);
    s.toggle_grid();
    assert!(s.options().show_grid);
}

#[test]
fn offsets_are_edited_per_state() {
    let mut s = session();
    s.nudge_offset(AnimationState::Run, 1, 0);
    assert_eq!(s.nudge_offset(AnimationState::Run, 1, -1), FrameOffset::new(2, -1));
    s.set_offset(AnimationState::Jump, FrameOffset::new(5, 5));
    assert_eq!(s.status().offset, FrameOffset::new(2, -1));

    s.reset_offset(AnimationState::Run);
    assert_eq!(s.offsets().get(AnimationState::Run), FrameOffset::ZERO);
    assert_eq!(s.offsets().get(AnimationState::Jump), FrameOffset::new(5, 5));

    s.reset_all_offsets();
    assert_eq!(*s.offsets(), OffsetTable::default());
}

#[test]
fn offset_moves_the_drawn_source() {
    let slot = ready_atlas();
    let mut s = session();
    s.set_offset(AnimationState::Run, FrameOffset::new(16, 0));
    let out = s.tick(0.0, (16, 16), &slot);
    assert_eq!(
        out,
        DrawOutcome::Drawn {
            source: PixelRect::new(16, 16, 16, 16),
            dest: PixelRect::new(0, 0, 16, 16),
        }
    );
}

#[test]
fn export_request_is_a_snapshot() {
    let mut s = session();
    s.set_offset(AnimationState::Run, FrameOffset::new(3, 4));
    let req = s.export_request(ExportQuality::Standard);
    s.nudge_offset(AnimationState::Run, 10, 10);
    s.set_state(AnimationState::Idle);
    assert_eq!(req.state, AnimationState::Run);
    assert_eq!(req.offset, FrameOffset::new(3, 4));
    assert_eq!(req.quality, ExportQuality::Standard);
    assert_eq!(req.grid, s.grid());
}

#[test]
fn state_switch_runs_an_eased_transition() {
    let mut s = session();
    s.set_transition_ms(100.0);
    s.set_easing(Ease::Linear);
    s.tick(0.0, (8, 8), &AtlasSlot::Pending);

    s.set_state(AnimationState::Attack);
    assert_eq!(s.status().row, 3);
    let snap = {
        s.tick(10.0, (8, 8), &AtlasSlot::Pending);
        s.snapshot()
    };
    assert_eq!(snap.previous_state, AnimationState::Run);
    assert_eq!(snap.transition_progress, 0.0);

    s.tick(60.0, (8, 8), &AtlasSlot::Pending);
    assert!((s.snapshot().transition_progress - 0.5).abs() < 1e-9);

    s.tick(110.0, (8, 8), &AtlasSlot::Pending);
    assert_eq!(s.snapshot().transition_progress, 1.0);
    assert_eq!(s.snapshot().previous_state, AnimationState::Attack);
}

#[test]
fn status_display_is_readable() {
    let s = session();
    let line = s.status().to_string();
    assert!(line.contains("Run"));
    assert!(line.contains("row 1"));
    assert!(line.contains("playing"));
}
