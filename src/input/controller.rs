//! The interaction controller and its event wiring.
//!
//! One controller exists per client. It is installed on the event bus once,
//! listens for device hot-plug, and registers the keyboard table and the
//! mouse wheel on every matching device that appears. Handlers hold a weak
//! reference to the controller, so dropping the last strong reference
//! silences them; `Drop` also revokes every subscription.

use super::bindings::{KEY_BINDINGS, KeyAction};
use super::state::{PickCycle, SelectionState};
use crate::device::{DeviceId, DeviceKind, InputDevicePtr, MouseDevice};
use crate::drag::DragDispatcher;
use crate::events::{
    ButtonEvent, DeviceEventKind, EventBus, EventKey, EventKind, EventResponse, InputEvent, SubscriptionId,
};
use crate::constants::DEFAULT_CAMERA_SPEED;
use crate::notifications::NoticeBoard;
use crate::scene::Scene;
use crate::settings::ClientSettings;
use crate::types::{ObjectId, SimTime};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::{Rc, Weak};
use tracing::{debug, info};

/// Mouse buttons that pick on click, and the direction each cycles in.
const PICK_BUTTONS: [(u32, i32); 2] = [(MouseDevice::LEFT, 1), (MouseDevice::RIGHT, -1)];

pub struct InteractionController {
    pub(super) scene: Rc<RefCell<Scene>>,
    pub(super) bus: Rc<EventBus>,
    /// The camera the operator looks through
    pub(super) camera: ObjectId,
    pub(super) selection: SelectionState,
    pub(super) picking: PickCycle,
    pub(super) drags: DragDispatcher,
    pub(super) camera_speed: f64,
    pub(super) speed_presets: [f64; 3],
    pub(super) world_scale: f64,
    pub(super) export_path: PathBuf,
    pub(super) import_path: PathBuf,
    pub(super) physics_enabled: bool,
    /// Reference time for the selection flash
    pub(super) start_time: SimTime,
    pub(super) notices: NoticeBoard,
    subscriptions: Vec<SubscriptionId>,
    device_subscriptions: BTreeMap<DeviceId, Vec<SubscriptionId>>,
    self_ref: Weak<RefCell<InteractionController>>,
}

impl InteractionController {
    fn new(
        scene: Rc<RefCell<Scene>>,
        bus: Rc<EventBus>,
        camera: ObjectId,
        settings: &ClientSettings,
        start_time: SimTime,
        self_ref: Weak<RefCell<InteractionController>>,
    ) -> Self {
        Self {
            scene,
            bus,
            camera,
            selection: SelectionState::new(),
            picking: PickCycle::default(),
            drags: DragDispatcher::new(),
            camera_speed: starting_speed(&settings.camera_speed_presets),
            speed_presets: settings.camera_speed_presets,
            world_scale: settings.world_scale,
            export_path: settings.scene_export_path.clone(),
            import_path: settings.scene_import_path.clone(),
            physics_enabled: true,
            start_time,
            notices: NoticeBoard::new(),
            subscriptions: Vec::new(),
            device_subscriptions: BTreeMap::new(),
            self_ref,
        }
    }

    /// Create a controller looking through `camera` and subscribe it to the
    /// device, click and drag events on `bus`.
    pub fn install(
        scene: Rc<RefCell<Scene>>,
        bus: Rc<EventBus>,
        camera: ObjectId,
        settings: &ClientSettings,
        start_time: SimTime,
    ) -> Rc<RefCell<Self>> {
        let controller = Rc::new_cyclic(|weak| {
            let mut this = Self::new(scene, bus, camera, settings, start_time, weak.clone());
            this.subscribe_core();
            RefCell::new(this)
        });
        info!(%camera, "interaction controller installed");
        controller
    }

    /// Wrap a controller method as a bus handler. The handler is a no-op
    /// once the controller is gone or while it is already borrowed.
    fn handler<F>(&self, f: F) -> impl Fn(&InputEvent) -> EventResponse + use<F>
    where
        F: Fn(&mut InteractionController, &InputEvent) -> EventResponse + 'static,
    {
        let weak = self.self_ref.clone();
        move |ev: &InputEvent| {
            let Some(strong) = weak.upgrade() else {
                return EventResponse::NotHandled;
            };
            let Ok(mut controller) = strong.try_borrow_mut() else {
                debug!("controller busy, event dropped");
                return EventResponse::NotHandled;
            };
            f(&mut controller, ev)
        }
    }

    fn subscribe_core(&mut self) {
        let devices = self.handler(|c, ev| match ev {
            InputEvent::Device(dev) => {
                match dev.kind {
                    DeviceEventKind::Added => c.attach_device(&dev.device),
                    DeviceEventKind::Removed => {
                        c.detach_device(dev.device_id());
                    }
                }
                EventResponse::NotHandled
            }
            _ => EventResponse::NotHandled,
        });
        let id = self.bus.subscribe(EventKey::kind(EventKind::Device), devices);
        self.subscriptions.push(id);

        let drags = self.handler(|c, ev| match ev {
            InputEvent::MouseDrag(drag) => c.do_drag(drag),
            _ => EventResponse::NotHandled,
        });
        let id = self.bus.subscribe(EventKey::kind(EventKind::MouseDrag), drags);
        self.subscriptions.push(id);

        for (button, direction) in PICK_BUTTONS {
            let clicks = self.handler(move |c, ev| match ev {
                InputEvent::MouseClick(click) => c.select_click(click, direction),
                _ => EventResponse::NotHandled,
            });
            let id = self.bus.subscribe(EventKey::mouse_click(button), clicks);
            self.subscriptions.push(id);
        }
    }

    /// Register the handlers a device needs. Keyboards get the key table,
    /// mice get the wheel. Devices attached twice are ignored.
    pub fn attach_device(&mut self, device: &InputDevicePtr) {
        let (id, kind) = {
            let dev = device.borrow();
            (dev.id(), dev.kind())
        };
        if self.device_subscriptions.contains_key(&id) {
            return;
        }
        let mut ids = Vec::new();
        match kind {
            DeviceKind::Keyboard => {
                for binding in KEY_BINDINGS {
                    let action = binding.action;
                    let key = EventKey::button(id, binding.code, binding.modifiers, binding.on_release);
                    let handler = self.handler(move |c, ev| match ev {
                        InputEvent::Button(button) => c.on_key(action, button),
                        _ => EventResponse::NotHandled,
                    });
                    ids.push(self.bus.subscribe(key, handler));
                }
            }
            DeviceKind::Mouse => {
                for axis in [MouseDevice::WHEELX, MouseDevice::WHEELY] {
                    let handler = self.handler(|c, ev| match ev {
                        InputEvent::Axis(axis) => c.wheel(axis),
                        _ => EventResponse::NotHandled,
                    });
                    ids.push(self.bus.subscribe(EventKey::axis(id, axis), handler));
                }
            }
            DeviceKind::Joystick | DeviceKind::Synthetic => {}
        }
        debug!(device = %id, ?kind, handlers = ids.len(), "device attached");
        self.device_subscriptions.insert(id, ids);
    }

    /// Revoke every subscription made for `device`.
    pub fn detach_device(&mut self, device: DeviceId) -> usize {
        let Some(ids) = self.device_subscriptions.remove(&device) else {
            return 0;
        };
        let revoked = ids.iter().filter(|id| self.bus.unsubscribe(**id)).count();
        debug!(%device, revoked, "device detached");
        revoked
    }

    fn on_key(&mut self, action: KeyAction, ev: &ButtonEvent) -> EventResponse {
        let now = ev.time;
        match action {
            KeyAction::MoveCamera => self.move_camera(ev),
            KeyAction::Group => self.group_selection(now),
            KeyAction::Ungroup => EventResponse::from_changed(self.do_ungroup(now) > 0),
            KeyAction::Delete => self.delete_selection(now),
            KeyAction::Clone => self.clone_selection(now),
            KeyAction::EnterGroup => self.enter_group(now),
            KeyAction::LeaveGroup => self.leave_group(now),
            KeyAction::CreateLight => self.create_light(now),
            KeyAction::ImportScene => self.import_scene(now),
            KeyAction::SaveScene => self.save_scene(now),
            KeyAction::DragMode(mode) => self.set_drag_mode(mode, now),
            KeyAction::TogglePhysics => self.toggle_physics(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn camera(&self) -> ObjectId {
        self.camera
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Selected ids in deterministic order.
    pub fn selected_ids(&self) -> Vec<ObjectId> {
        self.selection.ids()
    }

    pub fn current_group(&self) -> Option<ObjectId> {
        self.selection.current_group()
    }

    pub fn camera_speed(&self) -> f64 {
        self.camera_speed
    }

    pub fn world_scale(&self) -> f64 {
        self.world_scale
    }

    pub fn drags(&self) -> &DragDispatcher {
        &self.drags
    }

    pub fn is_physics_enabled(&self) -> bool {
        self.physics_enabled
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut NoticeBoard {
        &mut self.notices
    }

    pub fn attached_device_count(&self) -> usize {
        self.device_subscriptions.len()
    }

    /// Pick up reloaded settings. The current camera speed is kept unless
    /// it no longer matches a preset.
    pub fn apply_settings(&mut self, settings: &ClientSettings) {
        if !settings.camera_speed_presets.contains(&self.camera_speed) {
            self.camera_speed = starting_speed(&settings.camera_speed_presets);
        }
        self.speed_presets = settings.camera_speed_presets;
        self.world_scale = settings.world_scale;
        self.export_path = settings.scene_export_path.clone();
        self.import_path = settings.scene_import_path.clone();
        info!(world_scale = self.world_scale, "controller settings applied");
    }
}

/// The default speed when the presets offer it, else the middle preset.
fn starting_speed(presets: &[f64; 3]) -> f64 {
    if presets.contains(&DEFAULT_CAMERA_SPEED) {
        DEFAULT_CAMERA_SPEED
    } else {
        presets[1]
    }
}

impl Drop for InteractionController {
    fn drop(&mut self) {
        for id in self.subscriptions.drain(..) {
            self.bus.unsubscribe(id);
        }
        for (_, ids) in std::mem::take(&mut self.device_subscriptions) {
            for id in ids {
                self.bus.unsubscribe(id);
            }
        }
    }
}
