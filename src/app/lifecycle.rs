//! Client lifecycle - construction, the per-frame graphics tick and
//! settings hot-reload.

use super::{ClientSystem, LOCAL_PROXY_MANAGER};
use crate::device::{InputDevicePtr, InputManager, KeyboardDevice, MouseDevice};
use crate::events::EventBus;
use crate::input::InteractionController;
use crate::notifications::Notice;
use crate::perf::TickMonitor;
use crate::profile_scope;
use crate::scene::{ProxyObject, ProxyUpdateQueue, Scene};
use crate::settings::ClientSettings;
use crate::settings_watcher::{SettingsEvent, SettingsWatcher};
use crate::types::{CameraInfo, Location, ObjectId, ProxyKind, SimTime};
use anyhow::Context;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

impl ClientSystem {
    /// Build a client with an empty scene holding only the operator's
    /// camera at `camera_location`.
    pub fn new(
        settings: ClientSettings,
        camera_location: Location,
        start_time: SimTime,
    ) -> anyhow::Result<Self> {
        let space = Uuid::new_v4();
        let camera = ObjectId::random_in(space);

        let mut scene = Scene::new();
        scene.add_proxy_manager(LOCAL_PROXY_MANAGER);
        scene
            .create_object(
                ProxyObject::new(
                    camera,
                    LOCAL_PROXY_MANAGER,
                    ProxyKind::Camera(CameraInfo::default()),
                )
                .with_location(camera_location, start_time),
            )
            .context("failed to create the operator camera")?;
        let scene = Rc::new(RefCell::new(scene));

        let bus = Rc::new(EventBus::new());
        let mut input = InputManager::new(bus.clone());
        input.set_drag_threshold(settings.drag_threshold);
        input.set_time(start_time);
        let controller =
            InteractionController::install(scene.clone(), bus.clone(), camera, &settings, start_time);

        info!(%space, %camera, "client system created");
        Ok(Self {
            scene,
            bus,
            input,
            controller,
            updates: ProxyUpdateQueue::new(),
            settings,
            settings_watcher: None,
            ticks: TickMonitor::new(),
            camera,
            mouse: None,
            keyboard: None,
            frame_count: 0,
            quit_requested: false,
        })
    }

    /// Reload settings whenever `path` changes on disk.
    pub fn watch_settings(&mut self, path: PathBuf) -> anyhow::Result<()> {
        let watcher = SettingsWatcher::new(path.clone())
            .with_context(|| format!("cannot watch {}", path.display()))?;
        self.settings_watcher = Some(watcher);
        Ok(())
    }

    /// Plug in a mouse and a keyboard. The controller attaches to both as
    /// they are announced.
    pub fn attach_default_devices(&mut self) {
        let mouse: InputDevicePtr = Rc::new(RefCell::new(MouseDevice::new("mouse")));
        let keyboard: InputDevicePtr = Rc::new(RefCell::new(KeyboardDevice::new("keyboard")));
        self.mouse = Some(self.input.add_device(mouse));
        self.keyboard = Some(self.input.add_device(keyboard));
    }

    /// One graphics frame at `now`. Returns false once the client wants to
    /// stop.
    pub fn graphics_tick(&mut self, now: SimTime) -> bool {
        profile_scope!("graphics_tick");

        let applied = {
            let mut scene = self.scene.borrow_mut();
            self.updates.apply_to(&mut scene, now)
        };
        if applied > 0 {
            debug!(applied, "proxy updates applied");
        }

        // Synthetic devices fire into the controller, which borrows the
        // scene itself.
        self.input.poll(now);

        {
            let mut controller = self.controller.borrow_mut();
            controller.prune_selection();
            controller.hilite_selection(now, false);
            controller.notices_mut().prune_expired();
        }

        self.check_settings_reload();
        self.frame_count += 1;
        !self.quit_requested
    }

    /// Check for settings file changes and reload if needed.
    pub fn check_settings_reload(&mut self) {
        let Some(watcher) = self.settings_watcher.as_mut() else {
            return;
        };
        let Some(event) = watcher.poll() else {
            return;
        };
        let path = watcher.path().to_path_buf();

        match event {
            SettingsEvent::Modified | SettingsEvent::Created => {
                info!(path = %path.display(), "settings file changed, reloading");
                self.apply_settings(ClientSettings::load_or_default(&path));
                self.controller
                    .borrow_mut()
                    .notices_mut()
                    .push(Notice::info("Settings reloaded"));
            }
            SettingsEvent::Deleted => {
                warn!(path = %path.display(), "settings file deleted");
                self.controller
                    .borrow_mut()
                    .notices_mut()
                    .push(Notice::warning("Settings file deleted"));
            }
            SettingsEvent::Error(e) => {
                error!(error = %e, "settings watch error");
            }
        }
    }

    /// Push new settings to the controller and the input manager.
    pub fn apply_settings(&mut self, settings: ClientSettings) {
        self.input.set_drag_threshold(settings.drag_threshold);
        self.controller.borrow_mut().apply_settings(&settings);
        self.settings = settings;
    }
}
