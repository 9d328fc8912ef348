//! Client state definition.

use crate::device::{DeviceId, InputManager};
use crate::events::EventBus;
use crate::input::InteractionController;
use crate::perf::TickMonitor;
use crate::scene::{ProxyUpdateQueue, Scene};
use crate::settings::ClientSettings;
use crate::settings_watcher::SettingsWatcher;
use crate::types::{ObjectId, ProxyManagerId};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// Proxy manager that owns objects created by this client.
pub const LOCAL_PROXY_MANAGER: ProxyManagerId = ProxyManagerId(0);

/// One running client: the scene graph, the operator's camera, the input
/// stack and the interaction controller, all on the simulation thread.
pub struct ClientSystem {
    pub(super) scene: Rc<RefCell<Scene>>,
    pub(super) bus: Rc<EventBus>,
    pub(super) input: InputManager,
    pub(super) controller: Rc<RefCell<InteractionController>>,
    /// Updates pushed by the network thread
    pub(super) updates: ProxyUpdateQueue,
    pub(super) settings: ClientSettings,
    /// Settings file watcher for hot-reload
    pub(super) settings_watcher: Option<SettingsWatcher>,
    pub(super) ticks: TickMonitor,
    pub(super) camera: ObjectId,
    /// Default mouse and keyboard, if attached
    pub(super) mouse: Option<DeviceId>,
    pub(super) keyboard: Option<DeviceId>,
    pub(super) frame_count: u64,
    pub(super) quit_requested: bool,
}

impl ClientSystem {
    pub fn scene(&self) -> Ref<'_, Scene> {
        self.scene.borrow()
    }

    pub fn scene_mut(&self) -> RefMut<'_, Scene> {
        self.scene.borrow_mut()
    }

    pub fn shared_scene(&self) -> Rc<RefCell<Scene>> {
        self.scene.clone()
    }

    pub fn bus(&self) -> &Rc<EventBus> {
        &self.bus
    }

    pub fn input(&self) -> &InputManager {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputManager {
        &mut self.input
    }

    pub fn controller(&self) -> Ref<'_, InteractionController> {
        self.controller.borrow()
    }

    pub fn controller_mut(&self) -> RefMut<'_, InteractionController> {
        self.controller.borrow_mut()
    }

    /// Handle for the network thread. Clones share the queue.
    pub fn update_queue(&self) -> ProxyUpdateQueue {
        self.updates.clone()
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn ticks(&self) -> &TickMonitor {
        &self.ticks
    }

    pub fn ticks_mut(&mut self) -> &mut TickMonitor {
        &mut self.ticks
    }

    pub fn camera(&self) -> ObjectId {
        self.camera
    }

    pub fn mouse(&self) -> Option<DeviceId> {
        self.mouse
    }

    pub fn keyboard(&self) -> Option<DeviceId> {
        self.keyboard
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Make the next graphics tick report that the client is done.
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }
}
