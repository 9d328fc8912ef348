//! Mouse and keyboard interaction with the scene.
//!
//! This module implements the editing layer of the client: picking and
//! selection, grouping, cloning, deletion, light placement, keyboard camera
//! motion and drag mode switching.
//!
//! ## Architecture
//!
//! The editing state is the pair `(current_group, selection)` kept in
//! [`SelectionState`]. Every operation preserves the rule that each
//! selected entity is a direct child of the current group. The
//! [`InteractionController`] owns that state and is driven entirely by
//! events fired on the [`EventBus`](crate::events::EventBus).
//!
//! ## Modules
//!
//! - `state` - Selection set, current group and pick cycling
//! - `controller` - Controller construction and event wiring
//! - `bindings` - The keyboard table
//! - `select` - Ray picking and click selection
//! - `edit` - Clone, delete, lights and scene files
//! - `group` - Group, ungroup, enter and leave
//! - `camera` - Keyboard camera motion, wheel zoom and drag routing
//! - `coords` - Screen to world conversions

mod bindings;
mod camera;
mod controller;
pub mod coords;
mod edit;
mod group;
mod select;
mod state;

pub use bindings::{DragMode, KEY_BINDINGS, KeyAction, KeyBinding};
pub use controller::InteractionController;
pub use edit::clone_tree;
pub use select::{Pick, hover_entity};
pub use state::{PickCycle, SelectionState};
