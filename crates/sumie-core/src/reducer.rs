//! The state transition core: one action in, one new state out, with the
//! forward and backward patches of the transition as a by-product.

use kurbo::{Point, Vec2};
use log::{trace, warn};

use crate::action::Action;
use crate::geometry::{radian_to_degree, rotate_about};
use crate::history::HistoryStore;
use crate::layer::{Layer, LayerId, Transform};
use crate::patch::{self, PatchSet};
use crate::state::CanvasState;

/// Why a transition resolved to no state change.
///
/// An interactive surface must never crash on a stale reference, so these
/// degrade to accepted-but-inert actions; the session surfaces them through
/// its observer hook and the `log` facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// The action named a layer id that is not live.
    UnknownLayer { id: LayerId },
    /// No transform snapshot exists for the layer; the gesture never
    /// started or already ended.
    MissingTransform { id: LayerId },
    /// No rotation-center snapshot exists for the layer.
    MissingCenter { id: LayerId },
    /// Undo with nothing applied, or redo with nothing above the cursor.
    HistoryBoundary,
}

/// Result of reducing one action.
#[derive(Debug, Clone)]
pub struct Reduction {
    /// The next state; equal to the previous one when the action no-opped.
    pub state: CanvasState,
    /// Patches replaying the transition onto the previous state.
    pub forward: PatchSet,
    /// Patches reverting the transition from the next state.
    pub backward: PatchSet,
    /// Set when the transition degraded to a no-op.
    pub no_op: Option<NoOpReason>,
}

/// Pure transition function.
///
/// Applies the action's mutation recipe to a draft of the state and diffs
/// draft against original into forward/backward patch sets, whether or not
/// the action is history-tracked. [`Action::Undo`] and [`Action::Redo`]
/// pass through unchanged here; they are resolved by the [`Session`], which
/// owns the history store.
pub fn reduce(state: &CanvasState, action: &Action) -> Reduction {
    let mut draft = state.clone();
    let no_op = transition(&mut draft, action).err();
    let (forward, backward) = patch::diff(state, &draft);
    Reduction {
        state: draft,
        forward,
        backward,
        no_op,
    }
}

fn transition(state: &mut CanvasState, action: &Action) -> Result<(), NoOpReason> {
    match *action {
        Action::Create { x, y } => {
            let layer = Layer::new(state.next_layer_id(), state.active_item, Point::new(x, y));
            state.layers.push(layer);
            Ok(())
        }

        Action::DragStarted { x, y } => {
            let layer = Layer::new(state.next_layer_id(), state.active_item, Point::new(x, y));
            state.current_layer_id = layer.id;
            state.initial_transforms.insert(layer.id, Transform::from(&layer));
            state.initial_mouse_position = Point::new(x, y);
            state.layers.push(layer);
            Ok(())
        }

        Action::Drag { dx, dy } => {
            let id = state.current_layer_id;
            let Some(index) = state.layers.iter().position(|layer| layer.id == id) else {
                return Err(NoOpReason::UnknownLayer { id });
            };
            let origin = *state
                .initial_transforms
                .get(&id)
                .ok_or(NoOpReason::MissingTransform { id })?;
            let layer = &mut state.layers[index];
            let kind = layer.kind;
            kind.apply_drag(&origin, Vec2::new(dx, dy), layer);
            Ok(())
        }

        Action::MoveStarted { id, x, y } => {
            let Some(layer) = state.layer(id) else {
                return Err(NoOpReason::UnknownLayer { id });
            };
            let transform = Transform::from(layer);
            let center = layer.absolute_center();
            state.current_layer_id = id;
            state.initial_transforms.insert(id, transform);
            state.layer_center.insert(id, center);
            state.initial_mouse_position = Point::new(x, y);
            Ok(())
        }

        Action::Moved { dx, dy } => {
            for layer in &mut state.layers {
                if let Some(origin) = state.initial_transforms.get(&layer.id) {
                    layer.position_x = origin.position_x + dx;
                    layer.position_y = origin.position_y + dy;
                }
            }
            Ok(())
        }

        // The payload delta is not needed here: the layer already carries
        // its final geometry from the in-progress updates. Committing
        // re-stamps id and kind so a tool switched mid-gesture determines
        // the finished shape.
        Action::MoveEnded { .. } => {
            let id = state.current_layer_id;
            let Some(index) = state.layers.iter().position(|layer| layer.id == id) else {
                return Err(NoOpReason::UnknownLayer { id });
            };
            if !state.initial_transforms.contains_key(&id) {
                return Err(NoOpReason::MissingTransform { id });
            }
            let new_id = state.next_layer_id();
            let finished = state.layers.remove(index);
            state.layers.push(Layer {
                id: new_id,
                kind: state.active_item,
                ..finished
            });
            state.current_layer_id = new_id;
            state.clear_gesture_scratch();
            Ok(())
        }

        Action::Resized { id, x, y } => {
            let Some(index) = state.layers.iter().position(|layer| layer.id == id) else {
                return Err(NoOpReason::UnknownLayer { id });
            };
            let origin = *state
                .initial_transforms
                .get(&id)
                .ok_or(NoOpReason::MissingTransform { id })?;
            let center = *state
                .layer_center
                .get(&id)
                .ok_or(NoOpReason::MissingCenter { id })?;
            let layer = &mut state.layers[index];

            // Bring the cursor into the layer's unrotated frame before
            // comparing it against the original far corner.
            let cursor = rotate_about(Point::new(x, y), -layer.rotate, center);
            let far_corner = Point::new(
                origin.position_x + origin.width,
                origin.position_y + origin.height,
            );

            // Growing around a fixed center makes a unit of cursor travel
            // move the edge by half a unit, so the delta is doubled.
            let next_width = origin.width + (cursor.x - far_corner.x) * 2.0;
            let next_height = origin.height + (cursor.y - far_corner.y) * 2.0;

            layer.width = next_width;
            layer.height = next_height;
            layer.position_x = center.x - next_width / 2.0;
            layer.position_y = center.y - next_height / 2.0;
            Ok(())
        }

        Action::Rotated { id, x, y } => {
            let Some(index) = state.layers.iter().position(|layer| layer.id == id) else {
                return Err(NoOpReason::UnknownLayer { id });
            };
            let center = *state
                .layer_center
                .get(&id)
                .ok_or(NoOpReason::MissingCenter { id })?;
            let layer = &mut state.layers[index];

            // Absolute angle from center to cursor; rotation tracks the
            // cursor rather than accumulating deltas.
            let v = Point::new(x, y) - center;
            layer.rotate = radian_to_degree(v.y.atan2(v.x));
            Ok(())
        }

        Action::ResizedArrow { x, y } => {
            for layer in &mut state.layers {
                if let Some(origin) = state.initial_transforms.get(&layer.id) {
                    layer.width = origin.width + x;
                    layer.height = origin.height + y;
                }
            }
            Ok(())
        }

        Action::Select { item } => {
            state.active_item = item;
            Ok(())
        }

        // Resolved by the session against its history store.
        Action::Undo | Action::Redo => Ok(()),
    }
}

/// Callback observing transitions that resolved to no state change.
pub type NoOpObserver = Box<dyn FnMut(NoOpReason)>;

/// One drawing session: the authoritative state plus its undo history.
///
/// Dispatch is single-threaded and synchronous; each action is a
/// transaction, visible to readers as a whole or not at all.
pub struct Session {
    state: CanvasState,
    history: HistoryStore,
    no_op_observer: Option<NoOpObserver>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session with the default bounded history.
    pub fn new() -> Self {
        Self::with_history(HistoryStore::new())
    }

    /// Create a session with an explicitly configured history store.
    pub fn with_history(history: HistoryStore) -> Self {
        Self {
            state: CanvasState::new(),
            history,
            no_op_observer: None,
        }
    }

    /// Install a diagnostic hook for no-op transitions. The functional
    /// contract is unchanged: no-ops stay silent toward the user.
    pub fn set_no_op_observer(&mut self, observer: impl FnMut(NoOpReason) + 'static) {
        self.no_op_observer = Some(Box::new(observer));
    }

    /// The current state, read-only; re-rendered after every dispatch.
    pub fn state(&self) -> &CanvasState {
        &self.state
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Run one action through the reducer.
    ///
    /// A committal action that actually changed state is recorded in the
    /// history; a committal that degraded to a no-op records nothing, so
    /// undo never burns a press on an empty entry.
    pub fn dispatch(&mut self, action: Action) {
        trace!("dispatch {action:?}");
        match action {
            Action::Undo => match self.history.undo() {
                Some(patches) => patch::apply(&mut self.state, &patches),
                None => self.report(NoOpReason::HistoryBoundary),
            },
            Action::Redo => match self.history.redo() {
                Some(patches) => patch::apply(&mut self.state, &patches),
                None => self.report(NoOpReason::HistoryBoundary),
            },
            _ => {
                let Reduction {
                    state,
                    forward,
                    backward,
                    no_op,
                } = reduce(&self.state, &action);
                if let Some(reason) = no_op {
                    self.report(reason);
                }
                if action.is_committal() && !forward.is_empty() {
                    self.history.record(forward, backward);
                }
                self.state = state;
            }
        }
    }

    fn report(&mut self, reason: NoOpReason) {
        warn!("action ignored: {reason:?}");
        if let Some(observer) = &mut self.no_op_observer {
            observer(reason);
        }
    }
}
