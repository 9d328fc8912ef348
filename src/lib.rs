//! worldhost - interaction core of a 3D virtual-world client.
//!
//! Input devices publish typed events on an [`events::EventBus`]; the
//! [`input::InteractionController`] turns them into selection, grouping,
//! editing and camera motion on the [`scene::Scene`]. The [`app`] module
//! ties everything to a lockstep graphics/physics loop.

pub mod app;
pub mod constants;
pub mod device;
pub mod drag;
pub mod events;
pub mod export;
pub mod input;
pub mod notifications;
pub mod perf;
pub mod scene;
pub mod settings;
pub mod settings_watcher;
pub mod spatial_index;
pub mod types;
