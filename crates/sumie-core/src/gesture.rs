//! Adapter from the normalized drag-callback protocol to reducer actions.
//!
//! The pointer/touch capture layer reports every drag through three
//! callbacks: `drag_started(x, y)`, `dragged(dx, dy, x, y)` and
//! `drag_ended(dx, dy)`, with `(x, y)` in canvas space and `(dx, dy)`
//! cumulative from the gesture's start. Which action each callback turns
//! into depends on the surface the gesture grabbed, so the driver carries
//! that binding for the lifetime of one gesture.

use thiserror::Error;

use crate::action::Action;
use crate::layer::LayerId;

/// Logical surface a drag gesture is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// Empty canvas: the drag creates and grows a new layer.
    Canvas,
    /// Body of an existing layer: the drag translates it.
    Layer(LayerId),
    /// Corner resize handle: the drag resizes around the layer center.
    ResizeHandle(LayerId),
    /// Rotation handle: the drag sets the absolute rotation angle.
    RotateHandle(LayerId),
    /// Arrow head handle: the drag vector becomes the arrow extent.
    ArrowHead(LayerId),
}

/// Protocol violations of the embedding input layer.
///
/// Gestures on one input channel are a strict start, update*, end
/// sequence; overlapping gestures are not supported.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GestureError {
    #[error("a drag gesture is already in progress")]
    AlreadyActive,
    #[error("no drag gesture is in progress")]
    NotActive,
}

/// Translates drag callbacks into actions for one input channel.
///
/// The driver is a pure mapping; the caller dispatches the returned action
/// into its session.
#[derive(Debug, Default)]
pub struct GestureDriver {
    active: Option<DragTarget>,
}

impl GestureDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// True between `drag_started` and `drag_ended`.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// A press began a drag on `target` at canvas position `(x, y)`.
    pub fn drag_started(
        &mut self,
        target: DragTarget,
        x: f64,
        y: f64,
    ) -> Result<Action, GestureError> {
        if self.active.is_some() {
            return Err(GestureError::AlreadyActive);
        }
        self.active = Some(target);
        Ok(match target {
            DragTarget::Canvas => Action::DragStarted { x, y },
            DragTarget::Layer(id)
            | DragTarget::ResizeHandle(id)
            | DragTarget::RotateHandle(id)
            | DragTarget::ArrowHead(id) => Action::MoveStarted { id, x, y },
        })
    }

    /// The pointer moved to `(x, y)`, a cumulative `(dx, dy)` from start.
    pub fn dragged(&mut self, dx: f64, dy: f64, x: f64, y: f64) -> Result<Action, GestureError> {
        let target = self.active.ok_or(GestureError::NotActive)?;
        Ok(match target {
            DragTarget::Canvas => Action::Drag { dx, dy },
            DragTarget::Layer(_) => Action::Moved { dx, dy },
            DragTarget::ResizeHandle(id) => Action::Resized { id, x, y },
            DragTarget::RotateHandle(id) => Action::Rotated { id, x, y },
            DragTarget::ArrowHead(_) => Action::ResizedArrow { x: dx, y: dy },
        })
    }

    /// The press was released; every target commits the gesture.
    pub fn drag_ended(&mut self, dx: f64, dy: f64) -> Result<Action, GestureError> {
        if self.active.take().is_none() {
            return Err(GestureError::NotActive);
        }
        Ok(Action::MoveEnded { dx, dy })
    }
}
