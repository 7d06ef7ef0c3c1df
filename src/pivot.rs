//! Closed-form solver for dragging a transform's pivot.
//!
//! Dragging must (a) land the pivot exactly under the cursor in world space
//! and (b) leave the rendered image visually stationary. Compensating the
//! offset naively still misplaces the pivot whenever scale is not 1 or the
//! angle is not 0; the fix is to carry the drag delta through the inverse of
//! the rotate-scale part before touching the pivot, then solve for the
//! offset shift that cancels the resulting image motion.

use crate::core::Vec2;
use crate::space::{FromCenter, LocalVec, NormalizedPivot, WorldVec};

/// Transform state captured when a pivot drag starts.
#[derive(Clone, Copy, Debug)]
pub struct PivotDragState {
    pub scale_x: f64,
    pub scale_y: f64,
    pub angle_radians: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub start_pivot_from_center: FromCenter,
    /// Source image size, for the normalized pivot convention.
    pub image_width: u32,
    pub image_height: u32,
}

/// Axis lock applied to the world-space drag delta before solving.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AxisConstraint {
    #[default]
    Free,
    Horizontal,
    Vertical,
}

impl AxisConstraint {
    fn apply(self, delta: WorldVec) -> WorldVec {
        match self {
            Self::Free => delta,
            Self::Horizontal => WorldVec(Vec2::new(delta.0.x, 0.0)),
            Self::Vertical => WorldVec(Vec2::new(0.0, delta.0.y)),
        }
    }
}

/// The solver's four outputs.
///
/// Callers must commit the whole struct as one atomic update before
/// triggering any re-render; applying pivot and offset as separate,
/// independently-recomputing writes produces a frame at an inconsistent
/// position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PivotDragUpdate {
    pub pivot_from_center: FromCenter,
    pub pivot_normalized: NormalizedPivot,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Solve one pivot drag against the captured start state.
pub fn solve_pivot_drag(
    state: PivotDragState,
    world_delta: WorldVec,
    constraint: AxisConstraint,
) -> PivotDragUpdate {
    let local = LocalVec::from_world(
        constraint.apply(world_delta),
        state.scale_x,
        state.scale_y,
        state.angle_radians,
    )
    .0;
    let pivot = FromCenter(state.start_pivot_from_center.0 + local);
    let (sin, cos) = state.angle_radians.sin_cos();

    // Moving the pivot by `local` shifts the rendered image; shifting the
    // offset by d - R·S·d with d = -local cancels it exactly.
    let d = -local;
    let rs_d = Vec2::new(
        cos * (state.scale_x * d.x) - sin * (state.scale_y * d.y),
        sin * (state.scale_x * d.x) + cos * (state.scale_y * d.y),
    );

    PivotDragUpdate {
        pivot_from_center: pivot,
        pivot_normalized: pivot.to_normalized(state.image_width, state.image_height),
        offset_x: state.offset_x + d.x - rs_d.x,
        offset_y: state.offset_y + d.y - rs_d.y,
    }
}

/// Coalesces interactive drag events.
///
/// Only the latest cumulative world delta since drag start is kept; each
/// [`PivotDragSession::resolve`] solves against the unchanged start
/// snapshot, so intermediate events can be dropped freely and the next
/// recompute is scheduled only after the resolved update is committed.
#[derive(Clone, Copy, Debug)]
pub struct PivotDragSession {
    state: PivotDragState,
    constraint: AxisConstraint,
    latest_delta: WorldVec,
}

impl PivotDragSession {
    pub fn begin(state: PivotDragState, constraint: AxisConstraint) -> Self {
        Self {
            state,
            constraint,
            latest_delta: WorldVec(Vec2::ZERO),
        }
    }

    /// Replace the pending delta with the latest cumulative one.
    pub fn update(&mut self, world_delta: WorldVec) {
        self.latest_delta = world_delta;
    }

    pub fn resolve(&self) -> PivotDragUpdate {
        solve_pivot_drag(self.state, self.latest_delta, self.constraint)
    }
}
