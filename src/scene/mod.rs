//! Scene entity registry.
//!
//! Holds the client-side proxies of networked meshes, lights and cameras
//! and the parent/child hierarchy between them. Everything here runs on the
//! simulation thread; other threads feed it through `ProxyUpdateQueue`.

mod error;
mod proxy;
mod registry;
mod updates;

pub use error::{SceneError, SceneResult};
pub use proxy::{Entity, ProxyObject};
pub use registry::{RayHit, RayTrace, Scene};
pub use updates::{ProxyUpdate, ProxyUpdateQueue};
