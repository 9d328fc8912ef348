//! Headless demo client.
//!
//! Builds a small scene, drives the interaction controller with scripted
//! mouse and keyboard input and runs the simulation loop for a few frames.
//! Pass a path to also save the resulting scene as CSV.

use anyhow::Context;
use glam::{DQuat, DVec3};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use worldhost::app::{ClientSystem, LOCAL_PROXY_MANAGER, SimulationLoop};
use worldhost::device::{MouseDevice, scancode};
use worldhost::perf::TickKind;
use worldhost::scene::{ProxyObject, ProxyUpdate};
use worldhost::settings::{ClientSettings, default_settings_path};
use worldhost::types::{Location, MeshInfo, ObjectId, ProxyKind};

/// Simulated seconds per frame.
const FRAME_STEP: f64 = 1.0 / 60.0;

fn main() -> anyhow::Result<()> {
    let mut settings = ClientSettings::load();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let save_path = std::env::args().nth(1).map(PathBuf::from);
    if let Some(path) = &save_path {
        settings.scene_export_path = path.clone();
    }

    let mut client = ClientSystem::new(settings, Location::default(), 0.0)?;
    if let Some(path) = default_settings_path() {
        if let Err(e) = client.watch_settings(path) {
            info!(error = %e, "settings hot-reload unavailable");
        }
    }
    client.attach_default_devices();

    // Objects arrive through the update queue the way remote objects would.
    let space = client.camera().space;
    let queue = client.update_queue();
    let mut crates = Vec::new();
    for (i, x) in [-3.0, 0.0, 3.0].into_iter().enumerate() {
        let id = ObjectId::random_in(space);
        queue.push(ProxyUpdate::Create(
            ProxyObject::new(
                id,
                LOCAL_PROXY_MANAGER,
                ProxyKind::Mesh(MeshInfo::new("meerkat:///models/crate.mesh").with_name(format!("crate{i}"))),
            )
            .with_location(Location::at(DVec3::new(x, 0.0, -10.0), DQuat::IDENTITY), 0.0),
        ));
        crates.push(id);
    }

    let mut sim = SimulationLoop::new(client, 0.0, FRAME_STEP);
    sim.run(Some(1));

    let (mouse, keyboard) = {
        let client = sim.client();
        (client.mouse(), client.keyboard())
    };
    let (Some(mouse), Some(keyboard)) = (mouse, keyboard) else {
        anyhow::bail!("default devices missing");
    };

    // Click the middle crate, add the others, then group them.
    {
        let client = sim.client_mut();
        let input = client.input_mut();
        input.mouse_button(mouse, MouseDevice::LEFT, true, 0.0, 0.0);
        input.mouse_button(mouse, MouseDevice::LEFT, false, 0.0, 0.0);
    }
    {
        let now = sim.now();
        let client = sim.client();
        let mut controller = client.controller_mut();
        controller.select_entity(crates[0], false, now);
        controller.select_entity(crates[2], false, now);
    }
    {
        let input = sim.client_mut().input_mut();
        input.key(keyboard, scancode::G, true);
        input.key(keyboard, scancode::G, false);
        // button 1 moves objects
        input.key(keyboard, scancode::W, true);
        input.key(keyboard, scancode::W, false);
        input.mouse_button(mouse, MouseDevice::LEFT, true, 0.0, 0.0);
        input.mouse_motion(mouse, 0.1, 0.0);
        input.mouse_motion(mouse, 0.2, 0.05);
        input.mouse_button(mouse, MouseDevice::LEFT, false, 0.2, 0.05);
    }
    sim.run(Some(30));

    if save_path.is_some() {
        let input = sim.client_mut().input_mut();
        input.key(keyboard, scancode::LCTRL, true);
        input.key(keyboard, scancode::S, true);
        input.key(keyboard, scancode::S, false);
        input.key(keyboard, scancode::LCTRL, false);
    }

    let client = sim.into_client();
    let controller = client.controller();
    info!(
        objects = client.scene().len(),
        selected = controller.selected_ids().len(),
        frames = client.frame_count(),
        avg_tick_ms = format!("{:.3}", client.ticks().average_tick_time(TickKind::Graphics)),
        "demo finished"
    );
    for notice in controller.notices().notices() {
        info!(level = notice.level.label(), message = %notice.message, "notice");
    }
    Ok(())
}
