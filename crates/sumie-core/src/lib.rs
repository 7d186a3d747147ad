//! Sumie Core Library
//!
//! Platform-agnostic layer state engine for the Sumie drawing surface: the
//! action vocabulary, the reducing state machine, the patch-based undo/redo
//! history, and the rotation-aware transform geometry. Rendering, pointer
//! capture and image export live outside this crate and talk to it only
//! through dispatched actions and the read-only state.

pub mod action;
pub mod geometry;
pub mod gesture;
pub mod history;
pub mod layer;
pub mod patch;
pub mod reducer;
pub mod state;

pub use action::Action;
pub use gesture::{DragTarget, GestureDriver, GestureError};
pub use history::{DEFAULT_HISTORY_CAPACITY, HistoryEntry, HistoryStore};
pub use layer::{DEFAULT_LAYER_SIZE, Layer, LayerId, LayerKind, NO_LAYER, Transform};
pub use patch::{Patch, PatchSet};
pub use reducer::{NoOpReason, Reduction, Session, reduce};
pub use state::CanvasState;
