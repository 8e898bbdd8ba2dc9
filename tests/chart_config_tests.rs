use chart3d::api::{ChartConfig, ChartController};
use chart3d::core::{BarSeriesMargin, BarSpecs, ChartKind, Rect};
use chart3d::render::{NullRenderer, ShadowQuality};
use glam::Vec2;

#[test]
fn config_round_trips_through_json() {
    let config = ChartConfig::bars()
        .with_bounding_rect(Rect::new(10.0, 20.0, 800.0, 600.0))
        .with_shadow_quality(ShadowQuality::SoftHigh)
        .with_bar_specs(BarSpecs::new(2.0, Vec2::new(0.5, 0.25), false))
        .with_bar_series_margin(BarSeriesMargin::new(Vec2::new(0.1, 0.2)))
        .with_floor_level(-3.0);

    let json = config.to_json_pretty().expect("serializable");
    let restored = ChartConfig::from_json_str(&json).expect("parsable");
    assert_eq!(restored, config);
}

#[test]
fn controller_starts_from_config_values() {
    let config = ChartConfig::surface().with_margin(0.3);
    let chart = ChartController::<NullRenderer>::new(config).expect("valid config");
    assert_eq!(chart.kind(), ChartKind::Surface);
    assert_eq!(chart.margin(), 0.3);
    assert_eq!(chart.zoom_level(), 100.0);
    assert!(chart.grid_enabled());
}

#[test]
fn out_of_range_zoom_is_clamped_on_construction() {
    let mut config = ChartConfig::scatter();
    config.zoom_level = 5_000.0;
    let chart = ChartController::<NullRenderer>::new(config).expect("valid config");
    assert_eq!(chart.zoom_level(), 500.0);
}

#[test]
fn malformed_json_reports_parse_error() {
    let err = ChartConfig::from_json_str("{ \"kind\": ").expect_err("truncated json");
    assert!(err.to_string().contains("failed to parse config"));
}

#[test]
fn invalid_series_margin_is_rejected() {
    let json = r#"{ "kind": "Bars", "bar_series_margin": { "margin": [1.5, 0.0], "keep_series_uniform": false } }"#;
    assert!(ChartConfig::from_json_str(json).is_err());
}
