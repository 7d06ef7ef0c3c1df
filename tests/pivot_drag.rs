use std::f64::consts::FRAC_PI_4;

use latebake::{
    AxisConstraint, FromCenter, PivotDragSession, PivotDragState, Point, TransformParameters,
    Vec2, WorldVec, apply_to_point, solve_pivot_drag,
};

const IMAGE_W: u32 = 64;
const IMAGE_H: u32 = 64;

fn drag_state(scale_x: f64, scale_y: f64, angle: f64) -> PivotDragState {
    PivotDragState {
        scale_x,
        scale_y,
        angle_radians: angle,
        offset_x: 9.0,
        offset_y: -14.0,
        start_pivot_from_center: FromCenter(Vec2::new(6.0, -11.0)),
        image_width: IMAGE_W,
        image_height: IMAGE_H,
    }
}

/// The node transform the renderer would build from a drag state.
fn node_transform(state: &PivotDragState, pivot: FromCenter, offset: Vec2) -> TransformParameters {
    TransformParameters {
        offset_x: offset.x,
        offset_y: offset.y,
        angle_radians: state.angle_radians,
        scale_x: state.scale_x,
        scale_y: state.scale_y,
        pivot_x: pivot.0.x + f64::from(IMAGE_W) * 0.5,
        pivot_y: pivot.0.y + f64::from(IMAGE_H) * 0.5,
    }
}

#[test]
fn dragging_the_pivot_leaves_every_rendered_point_in_place() {
    let sample_points = [
        Point::new(0.0, 0.0),
        Point::new(63.0, 0.0),
        Point::new(20.0, 45.0),
        Point::new(32.0, 32.0),
    ];

    for &(sx, sy) in &[(1.0, 1.0), (2.0, 1.0), (0.5, 3.0), (-1.5, 0.75)] {
        for &angle in &[0.0, FRAC_PI_4, 1.9, -0.6] {
            let state = drag_state(sx, sy, angle);
            let update =
                solve_pivot_drag(state, WorldVec(Vec2::new(72.0, -33.0)), AxisConstraint::Free);

            let before = node_transform(
                &state,
                state.start_pivot_from_center,
                Vec2::new(state.offset_x, state.offset_y),
            )
            .to_affine();
            let after = node_transform(
                &state,
                update.pivot_from_center,
                Vec2::new(update.offset_x, update.offset_y),
            )
            .to_affine();

            for &q in &sample_points {
                let a = apply_to_point(before, q);
                let b = apply_to_point(after, q);
                assert!(
                    (a.x - b.x).abs() < 1e-8 && (a.y - b.y).abs() < 1e-8,
                    "image moved at {q:?} for sx={sx} sy={sy} angle={angle}"
                );
            }
        }
    }
}

#[test]
fn the_pivot_lands_exactly_where_the_cursor_went() {
    for &(sx, sy) in &[(1.0, 1.0), (2.0, 1.0), (0.5, 3.0)] {
        for &angle in &[0.0, FRAC_PI_4, 2.4] {
            let state = drag_state(sx, sy, angle);
            let delta = Vec2::new(-48.0, 19.0);
            let update = solve_pivot_drag(state, WorldVec(delta), AxisConstraint::Free);

            // A pivot's world position is its transformed pixel position.
            let pivot_px = |pivot: FromCenter| {
                Point::new(
                    pivot.0.x + f64::from(IMAGE_W) * 0.5,
                    pivot.0.y + f64::from(IMAGE_H) * 0.5,
                )
            };
            let before = node_transform(
                &state,
                state.start_pivot_from_center,
                Vec2::new(state.offset_x, state.offset_y),
            )
            .to_affine();
            let after = node_transform(
                &state,
                update.pivot_from_center,
                Vec2::new(update.offset_x, update.offset_y),
            )
            .to_affine();

            let old_world = apply_to_point(before, pivot_px(state.start_pivot_from_center));
            let new_world = apply_to_point(after, pivot_px(update.pivot_from_center));
            assert!(
                (new_world.x - (old_world.x + delta.x)).abs() < 1e-8
                    && (new_world.y - (old_world.y + delta.y)).abs() < 1e-8,
                "sx={sx} sy={sy} angle={angle}"
            );
        }
    }
}

#[test]
fn a_session_resolves_coalesced_events_to_one_atomic_update() {
    let state = drag_state(2.0, 1.0, FRAC_PI_4);
    let mut session = PivotDragSession::begin(state, AxisConstraint::Horizontal);

    // Many motion events arrive; only the latest cumulative delta matters.
    for step in 1..=20 {
        session.update(WorldVec(Vec2::new(f64::from(step) * 5.0, 3.0)));
    }
    let update = session.resolve();

    let direct = solve_pivot_drag(
        state,
        WorldVec(Vec2::new(100.0, 3.0)),
        AxisConstraint::Horizontal,
    );
    assert_eq!(update, direct);

    // The horizontal constraint dropped the vertical component entirely.
    let unconstrained = solve_pivot_drag(
        state,
        WorldVec(Vec2::new(100.0, 0.0)),
        AxisConstraint::Free,
    );
    assert_eq!(update, unconstrained);
}
