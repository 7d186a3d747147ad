//! The closed set of intents the reducer understands.

use serde::{Deserialize, Serialize};

use crate::layer::{LayerId, LayerKind};

/// One user intent, dispatched synchronously into the reducer.
///
/// Coordinates `(x, y)` are absolute canvas-space positions; `(dx, dy)` are
/// cumulative deltas from the start of the gesture, not frame-to-frame
/// increments. The set is closed: an unknown action cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Place a new layer of the active kind at the cursor.
    Create { x: f64, y: f64 },
    /// A canvas-level drag began: a new layer of the active kind starts
    /// growing at `(x, y)`.
    DragStarted { x: f64, y: f64 },
    /// Creation-drag update; the current layer's extent follows the delta.
    Drag { dx: f64, dy: f64 },
    /// A drag on an existing layer began.
    MoveStarted { id: LayerId, x: f64, y: f64 },
    /// Move update; every snapshotted layer translates by the delta.
    Moved { dx: f64, dy: f64 },
    /// The gesture finished: commit the current layer. The unit of undo.
    MoveEnded { dx: f64, dy: f64 },
    /// Resize handle dragged to `(x, y)` on the identified layer.
    Resized { id: LayerId, x: f64, y: f64 },
    /// Rotate handle dragged to `(x, y)` on the identified layer.
    Rotated { id: LayerId, x: f64, y: f64 },
    /// Arrow head dragged; the drag vector becomes the arrow extent.
    ResizedArrow { x: f64, y: f64 },
    /// Toolbar selection of the active tool.
    Select { item: LayerKind },
    Undo,
    Redo,
}

impl Action {
    /// Whether this action is enrolled in the version history.
    ///
    /// Undo operates at the granularity of one completed layer placement,
    /// so only the gesture-finalizing commit is tracked; in-progress drag,
    /// resize and rotate updates are not individually undoable.
    pub fn is_committal(&self) -> bool {
        matches!(self, Action::MoveEnded { .. })
    }
}
