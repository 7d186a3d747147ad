//! The authoritative canvas state.

use std::collections::HashMap;

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::layer::{Layer, LayerId, LayerKind, NO_LAYER, Transform};

/// Root aggregate of the drawing surface.
///
/// Replaced wholesale on every dispatched action; the rendering layer reads
/// `layers` after each transition and never mutates it. The three gesture
/// scratch fields (`initial_transforms`, `initial_mouse_position`,
/// `layer_center`) are populated when a gesture starts and cleared
/// atomically when it commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasState {
    /// Layers in render order; later entries paint on top.
    pub layers: Vec<Layer>,
    /// Layer bound to the in-progress gesture, or [`NO_LAYER`].
    pub current_layer_id: LayerId,
    /// Transform of each gesture participant, frozen at gesture start.
    pub initial_transforms: HashMap<LayerId, Transform>,
    /// Pointer position at gesture start.
    pub initial_mouse_position: Point,
    /// Absolute rotation center of each participant, frozen at gesture
    /// start. Resize and rotate pivot on this, not on a center recomputed
    /// mid-gesture.
    pub layer_center: HashMap<LayerId, Point>,
    /// Tool determining the kind of the next created layer.
    pub active_item: LayerKind,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasState {
    /// Session-start state: a single zero-extent arrow layer, no gesture in
    /// progress, arrow tool active.
    pub fn new() -> Self {
        Self {
            layers: vec![Layer {
                id: 1,
                width: 0.0,
                height: 0.0,
                position_x: 0.0,
                position_y: 0.0,
                rotate: 0.0,
                kind: LayerKind::Arrow,
            }],
            current_layer_id: NO_LAYER,
            initial_transforms: HashMap::new(),
            initial_mouse_position: Point::ZERO,
            layer_center: HashMap::new(),
            active_item: LayerKind::Arrow,
        }
    }

    /// Look up a live layer by id.
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    pub(crate) fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.id == id)
    }

    /// Id for the next created layer.
    ///
    /// A commit re-identifies its layer past the layer count, so the
    /// maximum live id is the base, not `layers.len()`.
    pub fn next_layer_id(&self) -> LayerId {
        self.layers.iter().map(|layer| layer.id).max().unwrap_or(0) + 1
    }

    /// True between a gesture's start and end callbacks.
    pub fn gesture_in_progress(&self) -> bool {
        !self.initial_transforms.is_empty()
    }

    pub(crate) fn clear_gesture_scratch(&mut self) {
        self.initial_transforms.clear();
        self.layer_center.clear();
        self.initial_mouse_position = Point::ZERO;
    }
}
