use constellation_core::config::{EdgeStrategy, FieldConfig};
use constellation_core::error::{ConfigError, ThemeError};
use constellation_core::palette::{edge_color, particle_color, Color, Theme};
use constellation_core::particle::{Particle, ParticleKind};
use glam::Vec2;

#[test]
fn test_config_default_values() {
    let config = FieldConfig::default();

    assert_eq!(config.max_speed, 1.2);
    assert_eq!(config.spring, 0.008);
    assert_eq!(config.damping, 0.96);
    assert_eq!(config.repel_strength, 0.15);
    assert_eq!(config.bounce, 0.5);
    assert_eq!(config.trail_decay, 0.95);
    assert_eq!(config.reap_size, 0.1);
    assert_eq!(config.density_divisor, 10_000.0);
    assert_eq!(config.trails_per_move, 2);
    assert_eq!(config.trail_jitter, 10.0);
    assert_eq!(config.pointer_radius, 120.0);
    assert_eq!(config.connect_distance, 100.0);
    assert_eq!(config.edge_alpha, 0.5);
    assert_eq!(config.edge_width, 0.4);
    assert_eq!(config.hue_step, 0.15);
    assert_eq!(config.edge_strategy, EdgeStrategy::Grid);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_validate_rejects_bad_values() {
    let cases = [
        FieldConfig { max_speed: 0.0, ..FieldConfig::default() },
        FieldConfig { density_divisor: -1.0, ..FieldConfig::default() },
        FieldConfig { connect_distance: f32::NAN, ..FieldConfig::default() },
        FieldConfig { pointer_radius: f32::INFINITY, ..FieldConfig::default() },
        FieldConfig { damping: 1.5, ..FieldConfig::default() },
        FieldConfig { trail_decay: 0.0, ..FieldConfig::default() },
        FieldConfig { spring: -0.1, ..FieldConfig::default() },
    ];
    for config in cases {
        assert!(config.validate().is_err(), "should reject {config:?}");
    }
}

#[test]
fn test_validate_names_the_field() {
    let config = FieldConfig {
        connect_distance: 0.0,
        ..FieldConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::NotPositive {
            name: "connect_distance",
            value: 0.0
        })
    );
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

#[test]
fn test_theme_parse() {
    assert_eq!(Theme::parse("dark"), Ok(Theme::Dark));
    assert_eq!(Theme::parse(" Light "), Ok(Theme::Light));
    assert_eq!("LIGHT".parse::<Theme>(), Ok(Theme::Light));
    assert_eq!(Theme::parse("sepia"), Err(ThemeError("sepia".into())));
}

#[test]
fn test_fallback_backgrounds() {
    assert_eq!(Theme::Dark.fallback_background(), "#0a0a10");
    assert_eq!(Theme::Light.fallback_background(), "#e9ecef");
    assert_eq!(Theme::default(), Theme::Dark);
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

#[test]
fn test_steady_palette() {
    let p = Particle::steady(Vec2::ZERO, 1.0, 10.0, 200.0);
    assert_eq!(particle_color(&p, Theme::Light).to_string(), "hsla(200, 60%, 55%, 0.6)");
    assert_eq!(particle_color(&p, Theme::Dark).to_string(), "hsla(20, 80%, 65%, 0.7)");
}

#[test]
fn test_trail_palette_fades() {
    let mut p = Particle::trail(Vec2::ZERO, 2.0, 10.0, 40, 100.0);
    assert_eq!(particle_color(&p, Theme::Dark).to_string(), "hsla(310, 100%, 75%, 1)");
    assert_eq!(particle_color(&p, Theme::Light).to_string(), "hsla(130, 90%, 65%, 0.8)");

    p.kind = ParticleKind::Trail { life: 20, max_life: 40 };
    assert_eq!(particle_color(&p, Theme::Dark).alpha(), Some(0.5));
    assert_eq!(particle_color(&p, Theme::Light).alpha(), Some(0.4));
}

#[test]
fn test_trail_and_steady_colors_differ() {
    let steady = Particle::steady(Vec2::ZERO, 1.0, 10.0, 0.0);
    let trail = Particle::trail(Vec2::ZERO, 1.0, 10.0, 40, 0.0);
    for theme in [Theme::Dark, Theme::Light] {
        assert_ne!(particle_color(&steady, theme), particle_color(&trail, theme));
    }
}

#[test]
fn test_edge_palette() {
    assert_eq!(edge_color(Theme::Dark, 0.5).to_string(), "rgba(200,200,255,0.5)");
    assert_eq!(edge_color(Theme::Light, 0.5).to_string(), "rgba(50,50,50,0.5)");
    assert_eq!(Color::Css("#fff".into()).alpha(), None);
}
