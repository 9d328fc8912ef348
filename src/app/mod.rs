//! Client system - owns the scene, the input stack and the simulation loop.
//!
//! This module is organized into several submodules:
//! - `state` - The `ClientSystem` struct and its accessors
//! - `lifecycle` - Construction, the graphics tick and settings reload
//! - `sim` - The lockstep graphics/physics simulation loop

mod lifecycle;
mod sim;
mod state;

pub use sim::{SimulationLoop, TimeSteppedSimulation};
pub use state::{ClientSystem, LOCAL_PROXY_MANAGER};
