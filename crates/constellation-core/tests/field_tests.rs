mod common;

use common::{steady_at, DrawOp, RecordingCanvas};
use constellation_core::canvas::NullCanvas;
use constellation_core::config::FieldConfig;
use constellation_core::field::Field;
use constellation_core::palette::Theme;
use glam::Vec2;

fn make_field() -> Field {
    Field::new(FieldConfig::default(), 1234).unwrap()
}

// ---------------------------------------------------------------------------
// Population lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_new_field_is_empty() {
    let field = make_field();
    assert_eq!(field.particle_count(), 0);
    assert_eq!(field.viewport(), Vec2::ZERO);
    assert!((0.0..360.0).contains(&field.hue()));
    assert_eq!(field.theme(), Theme::Dark);
}

#[test]
fn test_resize_count_independent_of_previous_population() {
    let mut field = make_field();
    assert_eq!(field.resize(1000.0, 1000.0), 100);
    field.pointer_moved(10.0, 10.0);
    field.pointer_moved(20.0, 10.0);
    assert_eq!(field.particle_count(), 104);

    assert_eq!(field.resize(800.0, 600.0), 48);
    assert_eq!(field.steady_count(), 48);
    assert_eq!(field.trail_count(), 0, "resize is a full reset");
}

#[test]
fn test_resize_count_exact_on_large_viewport() {
    let mut field = make_field();
    assert_eq!(field.resize(4099.0, 4101.0), 1680);
    assert_eq!(field.steady_count(), 1680);
}

#[test]
fn test_zero_viewport_runs_empty() {
    let mut field = make_field();
    assert_eq!(field.resize(0.0, 0.0), 0);
    assert_eq!(field.resize(f32::NAN, 600.0), 0);

    let mut canvas = RecordingCanvas::default();
    field.tick(&mut canvas);

    assert_eq!(canvas.ops.len(), 1, "only the background is painted");
    assert_eq!(field.tick_count(), 1);
}

#[test]
fn test_pointer_moves_spawn_trails() {
    let mut field = make_field();
    field.resize(800.0, 600.0);

    field.pointer_moved(400.0, 300.0);
    field.pointer_moved(410.0, 300.0);

    assert_eq!(field.trail_count(), 4);
    assert_eq!(field.pointer().position, Some(Vec2::new(410.0, 300.0)));

    field.pointer_left();
    assert_eq!(field.pointer().position, None);
    assert_eq!(field.trail_count(), 4, "leaving does not remove trails");
}

#[test]
fn test_non_finite_pointer_ignored() {
    let mut field = make_field();
    field.pointer_moved(f32::NAN, 10.0);
    assert_eq!(field.trail_count(), 0);
    assert!(!field.pointer().is_active());
}

#[test]
fn test_trails_are_reaped_within_bounded_ticks() {
    let mut field = make_field();
    field.resize(800.0, 600.0);
    field.pointer_moved(400.0, 300.0);
    field.pointer_left();

    // Sizes start below 3.5 and shrink by 5% per tick, so every trail is
    // under the reap size after 70 ticks; max_life is below 100.
    for _ in 0..70 {
        field.tick(&mut NullCanvas);
    }
    assert_eq!(field.trail_count(), 0);
    assert_eq!(field.steady_count(), 48);
}

// ---------------------------------------------------------------------------
// Tick
// ---------------------------------------------------------------------------

#[test]
fn test_hue_advances_and_wraps() {
    let mut field = make_field();
    let start = field.hue();
    field.step();
    let expected = (start + 0.15) % 360.0;
    assert!((field.hue() - expected).abs() < 1e-3);

    for _ in 0..5000 {
        field.step();
        assert!((0.0..360.0).contains(&field.hue()));
    }
}

#[test]
fn test_tick_paints_background_first() {
    let mut field = make_field();
    field.resize(800.0, 600.0);

    let mut canvas = RecordingCanvas::default();
    field.tick(&mut canvas);

    assert_eq!(
        canvas.ops[0],
        DrawOp::Background {
            color: "#0a0a10".into(),
            size: Vec2::new(800.0, 600.0)
        }
    );
    assert_eq!(canvas.circles(), 48);
    assert_eq!(canvas.lines(), field.last_edges().len());
}

#[test]
fn test_background_fallback_and_override() {
    let mut field = make_field();
    assert_eq!(field.background().to_string(), "#0a0a10");

    field.set_theme(Theme::Light);
    assert_eq!(field.background().to_string(), "#e9ecef");

    field.set_background(Some("  rgb(1, 2, 3) ".into()));
    assert_eq!(field.background().to_string(), "rgb(1, 2, 3)");

    field.set_background(Some("".into()));
    assert_eq!(field.background().to_string(), "#e9ecef");
}

#[test]
fn test_theme_does_not_change_physics() {
    let mut dark = make_field();
    let mut light = make_field();
    light.set_theme(Theme::Light);
    for f in [&mut dark, &mut light] {
        f.resize(800.0, 600.0);
        f.pointer_moved(400.0, 300.0);
    }

    for _ in 0..30 {
        dark.tick(&mut NullCanvas);
        light.tick(&mut NullCanvas);
    }

    assert_eq!(dark.particles(), light.particles());
}

#[test]
fn test_every_particle_takes_global_hue() {
    let mut field = make_field();
    field.resize(800.0, 600.0);
    field.pointer_moved(100.0, 100.0);
    field.tick(&mut NullCanvas);

    let hue = field.hue();
    assert!(field.particles().iter().all(|p| p.base_hue == hue));
}

#[test]
fn test_steady_field_settles_without_pointer() {
    let mut field = make_field();
    field.resize(800.0, 600.0);
    field.particles_mut().clear();
    let mut p = steady_at(200.0, 200.0);
    p.position = Vec2::new(230.0, 180.0);
    field.particles_mut().push(p);

    for _ in 0..1500 {
        field.step();
    }

    let p = &field.particles()[0];
    assert!(p.position.distance(Vec2::new(200.0, 200.0)) < 0.5);
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn test_invalid_config_rejected() {
    let bad = FieldConfig {
        density_divisor: 0.0,
        ..FieldConfig::default()
    };
    assert!(Field::new(bad.clone(), 1).is_err());

    let mut field = make_field();
    field.resize(800.0, 600.0);
    assert!(field.set_config(bad).is_err());
    assert_eq!(field.config(), &FieldConfig::default(), "old config kept");
    assert_eq!(field.particle_count(), 48);
}

#[test]
fn test_density_change_reseeds() {
    let mut field = make_field();
    field.resize(800.0, 600.0);

    let config = FieldConfig {
        density_divisor: 5_000.0,
        pointer_radius: 60.0,
        ..FieldConfig::default()
    };
    field.set_config(config).unwrap();

    assert_eq!(field.particle_count(), 96);
    assert_eq!(field.pointer().radius, 60.0);
}

#[test]
fn test_snapshot_matches_particles() {
    let mut field = make_field();
    field.resize(800.0, 600.0);
    field.pointer_moved(5.0, 5.0);
    let count = field.particle_count();

    let snapshot = field.snapshot();
    assert_eq!(snapshot.len(), count);
    assert_eq!(bytemuck::cast_slice::<_, u8>(snapshot).len(), count * 20);
    assert_eq!(snapshot[count - 1].kind, 1.0);
}

#[test]
fn test_same_seed_same_field() {
    let mut a = make_field();
    let mut b = make_field();
    a.resize(640.0, 480.0);
    b.resize(640.0, 480.0);
    assert_eq!(a.particles(), b.particles());
}
