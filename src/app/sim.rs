//! Lockstep simulation loop.
//!
//! Every step runs one graphics tick and then, unless the operator turned
//! physics off, one physics tick at the same simulated time. The loop ends
//! when the graphics tick asks to stop.

use super::ClientSystem;
use crate::perf::TickKind;
use crate::profile_scope;
use crate::types::SimTime;
use tracing::{debug, info};

/// A simulation advanced in discrete ticks.
pub trait TimeSteppedSimulation {
    fn name(&self) -> &str;

    /// Advance to `now`. Returning false stops the loop.
    fn tick(&mut self, now: SimTime) -> bool;
}

impl TimeSteppedSimulation for ClientSystem {
    fn name(&self) -> &str {
        "graphics"
    }

    fn tick(&mut self, now: SimTime) -> bool {
        self.graphics_tick(now)
    }
}

pub struct SimulationLoop {
    client: ClientSystem,
    physics: Option<Box<dyn TimeSteppedSimulation>>,
    now: SimTime,
    step: SimTime,
}

impl SimulationLoop {
    /// Drive `client` with a fixed step of `step` seconds starting at
    /// `start`.
    pub fn new(client: ClientSystem, start: SimTime, step: SimTime) -> Self {
        Self {
            client,
            physics: None,
            now: start,
            step,
        }
    }

    pub fn with_physics(mut self, physics: Box<dyn TimeSteppedSimulation>) -> Self {
        info!(physics = physics.name(), "physics attached");
        self.physics = Some(physics);
        self
    }

    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn client(&self) -> &ClientSystem {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut ClientSystem {
        &mut self.client
    }

    pub fn into_client(self) -> ClientSystem {
        self.client
    }

    /// Advance one step. Returns false once the graphics side has stopped.
    pub fn step(&mut self) -> bool {
        profile_scope!("simulation_step");

        self.now += self.step;
        let now = self.now;

        self.client.ticks_mut().begin_tick(TickKind::Graphics);
        let keep_running = self.client.tick(now);
        self.client.ticks_mut().end_tick(TickKind::Graphics);
        if !keep_running {
            info!(now, "graphics stopped, ending simulation");
            return false;
        }

        let physics_enabled = self.client.controller().is_physics_enabled();
        if let Some(physics) = self.physics.as_mut() {
            if physics_enabled {
                self.client.ticks_mut().begin_tick(TickKind::Physics);
                if !physics.tick(now) {
                    debug!(physics = physics.name(), "physics tick reported stop");
                }
                self.client.ticks_mut().end_tick(TickKind::Physics);
            }
        }
        true
    }

    /// Step until the graphics side stops or `max_steps` have run. Returns
    /// the number of steps taken.
    pub fn run(&mut self, max_steps: Option<u64>) -> u64 {
        let mut steps = 0;
        while max_steps.is_none_or(|max| steps < max) {
            steps += 1;
            if !self.step() {
                break;
            }
        }
        self.client.ticks().log_summary_if_slow();
        steps
    }
}
