use approx::assert_relative_eq;
use chart3d::api::{ChangeTopic, ChartConfig, ChartController};
use chart3d::core::{Axis, AxisOrientation, AxisProperty};
use chart3d::interaction::{AxisInputConfig, AxisInputHandler};
use chart3d::render::NullRenderer;
use glam::Vec2;

fn surface_chart() -> ChartController<NullRenderer> {
    let mut chart = ChartController::new(ChartConfig::surface()).expect("valid config");
    chart.set_axis(
        AxisOrientation::X,
        Some(Axis::value().with_range(0.0, 100.0).expect("valid range")),
    );
    chart.set_axis(
        AxisOrientation::Z,
        Some(Axis::value().with_range(0.0, 100.0).expect("valid range")),
    );
    chart.attach_renderer(NullRenderer::default());
    chart.synchronize();
    chart
}

#[test]
fn wheel_updates_reach_the_renderer_through_change_tracking() {
    let mut chart = surface_chart();
    let config = AxisInputConfig::new(0.0, 100.0).with_min_ranges(20.0, 20.0);
    let mut handler = AxisInputHandler::for_controller(config, &chart).expect("valid limits");

    for update in handler.wheel(10.0) {
        update.apply_to(&mut chart).expect("valid range");
    }
    assert_eq!(chart.axis(AxisOrientation::X).range(), (10.0, 90.0));
    assert_eq!(chart.axis(AxisOrientation::Z).range(), (10.0, 90.0));

    let outcome = chart.synchronize();
    assert!(outcome.contains(ChangeTopic::Axis(AxisOrientation::X, AxisProperty::Range)));
    assert!(outcome.contains(ChangeTopic::Axis(AxisOrientation::Z, AxisProperty::Range)));
    assert!(outcome.contains(ChangeTopic::Data));
}

#[test]
fn drag_projection_follows_camera_rotation() {
    let mut chart = surface_chart();
    let config = AxisInputConfig::new(-1_000.0, 1_000.0).with_speed_modifier(1.0);
    let mut handler = AxisInputHandler::for_controller(config, &chart).expect("valid limits");

    handler.press(Vec2::ZERO);
    handler.begin_drag(AxisOrientation::Z);
    // At 90 degrees horizontal movement drives the Z axis.
    let update = handler
        .pointer_move(Vec2::new(10.0, 0.0), 90.0)
        .expect("dragging");
    assert_relative_eq!(update.min, 10.0, epsilon = 1e-4);
    assert_relative_eq!(update.max, 110.0, epsilon = 1e-4);

    update.apply_to(&mut chart).expect("valid range");
    let (min, max) = chart.axis(AxisOrientation::Z).range();
    assert_relative_eq!(max - min, 100.0, epsilon = 1e-4);
}

#[test]
fn dragging_never_leaves_the_area() {
    let chart = surface_chart();
    let mut handler =
        AxisInputHandler::for_controller(AxisInputConfig::new(0.0, 150.0), &chart).expect("valid");
    handler.press(Vec2::ZERO);
    handler.begin_drag(AxisOrientation::X);

    let update = handler
        .pointer_move(Vec2::new(-100.0, 0.0), 0.0)
        .expect("dragging");
    assert_relative_eq!(update.max, 150.0);
    assert_relative_eq!(update.min, 50.0);
}

#[test]
fn y_labels_do_not_start_a_drag() {
    let chart = surface_chart();
    let mut handler =
        AxisInputHandler::for_controller(AxisInputConfig::default(), &chart).expect("valid");
    handler.press(Vec2::ZERO);
    handler.begin_drag(AxisOrientation::Y);
    assert!(handler.pointer_move(Vec2::new(5.0, 5.0), 0.0).is_none());
}
