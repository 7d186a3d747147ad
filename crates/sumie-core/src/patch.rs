//! Reversible state edits, derived per transition and replayed by undo/redo.

use std::collections::HashMap;

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::layer::{Layer, LayerId, LayerKind, Transform};
use crate::state::CanvasState;

/// One edit to a [`CanvasState`] field.
///
/// Granularity is per root field. The commit transition rebuilds the layer
/// list rather than editing it in place, so the list travels as a single
/// value; that also keeps a patch applicable after untracked transitions
/// have moved the state past the one it was diffed against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Patch {
    SetLayers(Vec<Layer>),
    SetCurrentLayer(LayerId),
    SetInitialTransforms(HashMap<LayerId, Transform>),
    SetInitialMousePosition(Point),
    SetLayerCenters(HashMap<LayerId, Point>),
    SetActiveItem(LayerKind),
}

/// Patches of one transition, applied in order.
pub type PatchSet = Vec<Patch>;

/// Replay a patch set onto a state.
pub fn apply(state: &mut CanvasState, patches: &[Patch]) {
    for patch in patches {
        match patch {
            Patch::SetLayers(layers) => state.layers = layers.clone(),
            Patch::SetCurrentLayer(id) => state.current_layer_id = *id,
            Patch::SetInitialTransforms(transforms) => {
                state.initial_transforms = transforms.clone();
            }
            Patch::SetInitialMousePosition(position) => {
                state.initial_mouse_position = *position;
            }
            Patch::SetLayerCenters(centers) => state.layer_center = centers.clone(),
            Patch::SetActiveItem(item) => state.active_item = *item,
        }
    }
}

/// Diff two states into a forward set (`old` → `new`) and a backward set
/// (`new` → `old`). Equal states produce two empty sets.
pub fn diff(old: &CanvasState, new: &CanvasState) -> (PatchSet, PatchSet) {
    let mut forward = PatchSet::new();
    let mut backward = PatchSet::new();

    if old.layers != new.layers {
        forward.push(Patch::SetLayers(new.layers.clone()));
        backward.push(Patch::SetLayers(old.layers.clone()));
    }
    if old.current_layer_id != new.current_layer_id {
        forward.push(Patch::SetCurrentLayer(new.current_layer_id));
        backward.push(Patch::SetCurrentLayer(old.current_layer_id));
    }
    if old.initial_transforms != new.initial_transforms {
        forward.push(Patch::SetInitialTransforms(new.initial_transforms.clone()));
        backward.push(Patch::SetInitialTransforms(old.initial_transforms.clone()));
    }
    if old.initial_mouse_position != new.initial_mouse_position {
        forward.push(Patch::SetInitialMousePosition(new.initial_mouse_position));
        backward.push(Patch::SetInitialMousePosition(old.initial_mouse_position));
    }
    if old.layer_center != new.layer_center {
        forward.push(Patch::SetLayerCenters(new.layer_center.clone()));
        backward.push(Patch::SetLayerCenters(old.layer_center.clone()));
    }
    if old.active_item != new.active_item {
        forward.push(Patch::SetActiveItem(new.active_item));
        backward.push(Patch::SetActiveItem(old.active_item));
    }

    (forward, backward)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::LayerKind;

    fn sample_layer(id: LayerId) -> Layer {
        Layer::new(id, LayerKind::Rect, Point::new(id as f64, id as f64))
    }

    #[test]
    fn test_diff_of_equal_states_is_empty() {
        let state = CanvasState::new();
        let (forward, backward) = diff(&state, &state.clone());
        assert!(forward.is_empty());
        assert!(backward.is_empty());
    }

    #[test]
    fn test_forward_replays_transition() {
        let old = CanvasState::new();
        let mut new = old.clone();
        new.layers.push(sample_layer(2));
        new.current_layer_id = 2;
        new.active_item = LayerKind::Text;

        let (forward, _) = diff(&old, &new);
        let mut replayed = old.clone();
        apply(&mut replayed, &forward);
        assert_eq!(replayed, new);
    }

    #[test]
    fn test_backward_inverts_transition() {
        let old = CanvasState::new();
        let mut new = old.clone();
        new.layers[0].width = 80.0;
        new.layers.push(sample_layer(2));
        new.initial_transforms
            .insert(2, Transform::from(&new.layers[1]));
        new.initial_mouse_position = Point::new(5.0, 6.0);
        new.layer_center.insert(2, Point::new(7.0, 8.0));

        let (_, backward) = diff(&old, &new);
        let mut reverted = new.clone();
        apply(&mut reverted, &backward);
        assert_eq!(reverted, old);
    }

    #[test]
    fn test_unchanged_fields_stay_out_of_the_diff() {
        let old = CanvasState::new();
        let mut new = old.clone();
        new.active_item = LayerKind::Rect;

        let (forward, backward) = diff(&old, &new);
        assert_eq!(forward, vec![Patch::SetActiveItem(LayerKind::Rect)]);
        assert_eq!(backward, vec![Patch::SetActiveItem(LayerKind::Arrow)]);
    }

    #[test]
    fn test_patch_survives_a_diverged_baseline() {
        // A backward patch taken at one commit must still apply cleanly
        // after later untracked transitions grew the layer list.
        let old = CanvasState::new();
        let mut new = old.clone();
        new.layers.push(sample_layer(2));
        let (_, backward) = diff(&old, &new);

        let mut diverged = new.clone();
        diverged.layers.push(sample_layer(3));
        apply(&mut diverged, &backward);
        assert_eq!(diverged, old);
    }
}
