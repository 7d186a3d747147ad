//! Layer model: one placed shape and its geometric transform.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Identifier of a layer, unique within a session and stable for the
/// layer's lifetime. Ids start at 1; see [`NO_LAYER`].
pub type LayerId = u64;

/// Sentinel meaning "no layer is bound to the current gesture".
pub const NO_LAYER: LayerId = 0;

/// Extent of a freshly created layer before any drag has sized it.
pub const DEFAULT_LAYER_SIZE: f64 = 10.0;

/// Shape kinds, doubling as toolbar tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LayerKind {
    #[default]
    Arrow,
    Text,
    Rect,
    /// Color picker tool. Selectable in the toolbar but never rendered as a
    /// shape of its own.
    Color,
}

impl LayerKind {
    /// Resize-from-delta policy for an in-progress creation drag.
    ///
    /// Each kind owns its own policy so the reducer stays shape-agnostic.
    /// Rectangles grow from the cursor: a negative delta flips the anchor so
    /// the extent stays positive. Every other kind takes the raw cumulative
    /// delta as its extent; a negative width or height is a flipped shape,
    /// not an error.
    pub fn apply_drag(self, origin: &Transform, delta: Vec2, layer: &mut Layer) {
        match self {
            LayerKind::Rect => {
                if delta.x < 0.0 {
                    layer.width = -delta.x;
                    layer.position_x = origin.position_x + delta.x;
                } else {
                    layer.width = delta.x;
                }
                if delta.y < 0.0 {
                    layer.height = -delta.y;
                    layer.position_y = origin.position_y + delta.y;
                } else {
                    layer.height = delta.y;
                }
            }
            LayerKind::Arrow | LayerKind::Text | LayerKind::Color => {
                layer.width = delta.x;
                layer.height = delta.y;
            }
        }
    }
}

/// One drawn shape on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub width: f64,
    pub height: f64,
    /// Top-left anchor in canvas coordinates.
    pub position_x: f64,
    pub position_y: f64,
    /// Rotation in degrees around the layer center. Not normalized to
    /// [0, 360); gestures may accumulate past a full turn.
    pub rotate: f64,
    pub kind: LayerKind,
}

impl Layer {
    /// Create a layer of the default extent at `position`.
    pub fn new(id: LayerId, kind: LayerKind, position: Point) -> Self {
        Self {
            id,
            width: DEFAULT_LAYER_SIZE,
            height: DEFAULT_LAYER_SIZE,
            position_x: position.x,
            position_y: position.y,
            rotate: 0.0,
            kind,
        }
    }

    /// Center of the layer in canvas coordinates.
    pub fn absolute_center(&self) -> Point {
        Point::new(
            self.position_x + self.width / 2.0,
            self.position_y + self.height / 2.0,
        )
    }
}

/// The geometric projection of a layer, snapshotted when a gesture begins.
///
/// Gesture transitions compute against this frozen origin rather than the
/// live layer, so cumulative deltas stay deterministic no matter how many
/// intermediate events fire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub width: f64,
    pub height: f64,
    pub position_x: f64,
    pub position_y: f64,
    pub rotate: f64,
}

impl From<&Layer> for Transform {
    fn from(layer: &Layer) -> Self {
        Self {
            width: layer.width,
            height: layer.height,
            position_x: layer.position_x,
            position_y: layer.position_y,
            rotate: layer.rotate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_layer_defaults() {
        let layer = Layer::new(3, LayerKind::Rect, Point::new(30.0, 40.0));
        assert_eq!(layer.width, DEFAULT_LAYER_SIZE);
        assert_eq!(layer.height, DEFAULT_LAYER_SIZE);
        assert_eq!(layer.position_x, 30.0);
        assert_eq!(layer.position_y, 40.0);
        assert_eq!(layer.rotate, 0.0);
        assert_eq!(layer.kind, LayerKind::Rect);
    }

    #[test]
    fn test_absolute_center() {
        let mut layer = Layer::new(1, LayerKind::Rect, Point::new(10.0, 20.0));
        layer.width = 40.0;
        layer.height = 60.0;
        assert_eq!(layer.absolute_center(), Point::new(30.0, 50.0));
    }

    #[test]
    fn test_rect_drag_flips_anchor_on_negative_delta() {
        let mut layer = Layer::new(1, LayerKind::Rect, Point::new(100.0, 100.0));
        let origin = Transform::from(&layer);

        LayerKind::Rect.apply_drag(&origin, Vec2::new(-30.0, 25.0), &mut layer);

        assert_eq!(layer.width, 30.0);
        assert_eq!(layer.position_x, 70.0);
        assert_eq!(layer.height, 25.0);
        assert_eq!(layer.position_y, 100.0);
    }

    #[test]
    fn test_arrow_drag_keeps_signed_extent() {
        let mut layer = Layer::new(1, LayerKind::Arrow, Point::new(100.0, 100.0));
        let origin = Transform::from(&layer);

        LayerKind::Arrow.apply_drag(&origin, Vec2::new(-30.0, -40.0), &mut layer);

        // A flipped arrow points up-left; no normalization, no anchor shift.
        assert_eq!(layer.width, -30.0);
        assert_eq!(layer.height, -40.0);
        assert_eq!(layer.position_x, 100.0);
        assert_eq!(layer.position_y, 100.0);
    }

    #[test]
    fn test_transform_snapshot() {
        let mut layer = Layer::new(7, LayerKind::Text, Point::new(1.0, 2.0));
        layer.rotate = 45.0;
        let transform = Transform::from(&layer);
        assert_eq!(transform.position_x, 1.0);
        assert_eq!(transform.position_y, 2.0);
        assert_eq!(transform.rotate, 45.0);
    }
}
