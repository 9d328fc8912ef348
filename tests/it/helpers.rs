//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestSceneBuilder` - Builder pattern for a client with named objects
//! - `TestWorld` - The built client plus mouse/keyboard shortcuts
//! - `screen_point()` - Where a world point appears on the default camera

#![allow(dead_code)]

use glam::{DQuat, DVec3};
use std::collections::{BTreeSet, HashMap};
use worldhost::app::{ClientSystem, LOCAL_PROXY_MANAGER};
use worldhost::device::{DeviceId, MouseDevice};
use worldhost::scene::ProxyObject;
use worldhost::settings::ClientSettings;
use worldhost::types::{CameraInfo, LightInfo, Location, MeshInfo, ObjectId, ProxyKind, SimTime};

// ============================================================================
// TestSceneBuilder - Builder pattern for creating test scenes
// ============================================================================

enum Shape {
    Mesh { uri: String, scale: f64 },
    Group,
    Light,
}

struct Planned {
    name: String,
    parent: Option<String>,
    position: DVec3,
    shape: Shape,
}

/// Builder for a client whose camera sits at the origin looking down -Z.
/// Objects are named; parents must be added before their children.
///
/// # Example
/// ```ignore
/// let world = TestSceneBuilder::new()
///     .group("cart", (0.0, 0.0, -10.0))
///     .child_mesh("wheel", "cart", (1.0, 0.0, 0.0))
///     .build();
/// ```
pub struct TestSceneBuilder {
    objects: Vec<Planned>,
    settings: ClientSettings,
}

impl Default for TestSceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSceneBuilder {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            settings: ClientSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ClientSettings) -> Self {
        self.settings = settings;
        self
    }

    /// A pickable unit box at a world position.
    pub fn mesh(self, name: &str, position: (f64, f64, f64)) -> Self {
        self.sized_mesh(name, position, 1.0)
    }

    /// A pickable box with half extent `scale`.
    pub fn sized_mesh(self, name: &str, position: (f64, f64, f64), scale: f64) -> Self {
        let uri = format!("meerkat:///{name}.mesh");
        self.add(name, None, position, Shape::Mesh { uri, scale })
    }

    /// A pickable unit box placed relative to an earlier object.
    pub fn child_mesh(self, name: &str, parent: &str, local: (f64, f64, f64)) -> Self {
        let uri = format!("meerkat:///{name}.mesh");
        self.add(name, Some(parent), local, Shape::Mesh { uri, scale: 1.0 })
    }

    /// An empty mesh used as a group.
    pub fn group(self, name: &str, position: (f64, f64, f64)) -> Self {
        self.add(name, None, position, Shape::Group)
    }

    /// An empty mesh placed relative to an earlier object.
    pub fn child_group(self, name: &str, parent: &str, local: (f64, f64, f64)) -> Self {
        self.add(name, Some(parent), local, Shape::Group)
    }

    pub fn light(self, name: &str, position: (f64, f64, f64)) -> Self {
        self.add(name, None, position, Shape::Light)
    }

    fn add(
        mut self,
        name: &str,
        parent: Option<&str>,
        position: (f64, f64, f64),
        shape: Shape,
    ) -> Self {
        self.objects.push(Planned {
            name: name.to_string(),
            parent: parent.map(str::to_string),
            position: DVec3::new(position.0, position.1, position.2),
            shape,
        });
        self
    }

    pub fn build(self) -> TestWorld {
        let mut client =
            ClientSystem::new(self.settings, Location::default(), 0.0).expect("client");
        client.attach_default_devices();
        let space = client.camera().space;

        let mut ids: HashMap<String, ObjectId> = HashMap::new();
        for planned in self.objects {
            let id = ObjectId::random_in(space);
            let kind = match planned.shape {
                Shape::Mesh { uri, scale } => ProxyKind::Mesh(
                    MeshInfo::new(uri)
                        .with_name(planned.name.clone())
                        .with_scale(DVec3::splat(scale)),
                ),
                Shape::Group => {
                    ProxyKind::Mesh(MeshInfo::default().with_name(planned.name.clone()))
                }
                Shape::Light => ProxyKind::Light(LightInfo::default()),
            };
            let parent = planned.parent.as_ref().map(|p| ids[p]);
            client
                .scene_mut()
                .create_object(
                    ProxyObject::new(id, LOCAL_PROXY_MANAGER, kind)
                        .with_parent(parent)
                        .with_location(Location::at(planned.position, DQuat::IDENTITY), 0.0),
                )
                .expect("create object");
            ids.insert(planned.name, id);
        }

        let mouse = client.mouse().expect("mouse");
        let keyboard = client.keyboard().expect("keyboard");
        TestWorld {
            client,
            ids,
            mouse,
            keyboard,
        }
    }
}

// ============================================================================
// TestWorld - built client plus input shortcuts
// ============================================================================

pub struct TestWorld {
    pub client: ClientSystem,
    pub ids: HashMap<String, ObjectId>,
    pub mouse: DeviceId,
    pub keyboard: DeviceId,
}

impl TestWorld {
    pub fn id(&self, name: &str) -> ObjectId {
        self.ids[name]
    }

    pub fn selected(&self) -> BTreeSet<ObjectId> {
        self.client.controller().selection().selected().clone()
    }

    /// Names of the selected objects that the builder created, sorted.
    pub fn selected_names(&self) -> Vec<String> {
        let selected = self.selected();
        let mut names: Vec<String> = self
            .ids
            .iter()
            .filter(|(_, id)| selected.contains(*id))
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    pub fn now(&self) -> SimTime {
        self.client.input().time()
    }

    /// Press and release a key while holding `modifiers` (scancodes).
    pub fn key(&mut self, modifiers: &[u32], code: u32) {
        let kb = self.keyboard;
        let input = self.client.input_mut();
        for m in modifiers {
            input.key(kb, *m, true);
        }
        input.key(kb, code, true);
        input.key(kb, code, false);
        for m in modifiers {
            input.key(kb, *m, false);
        }
    }

    /// Click a mouse button at a normalized screen position.
    pub fn click(&mut self, modifiers: &[u32], button: u32, x: f32, y: f32) {
        let (kb, mouse) = (self.keyboard, self.mouse);
        let input = self.client.input_mut();
        for m in modifiers {
            input.key(kb, *m, true);
        }
        input.mouse_button(mouse, button, true, x, y);
        input.mouse_button(mouse, button, false, x, y);
        for m in modifiers {
            input.key(kb, *m, false);
        }
    }

    /// Left click on the screen position of a world point.
    pub fn click_at(&mut self, modifiers: &[u32], world: (f64, f64, f64)) {
        let (x, y) = screen_point(world);
        self.click(modifiers, MouseDevice::LEFT, x, y);
    }

    /// Drag with `button` from `from` to `to` in normalized screen units.
    pub fn drag(&mut self, button: u32, from: (f32, f32), to: (f32, f32)) {
        let mouse = self.mouse;
        let input = self.client.input_mut();
        input.mouse_motion(mouse, from.0, from.1);
        input.mouse_button(mouse, button, true, from.0, from.1);
        let mid = ((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
        input.mouse_motion(mouse, mid.0, mid.1);
        input.mouse_motion(mouse, to.0, to.1);
        input.mouse_button(mouse, button, false, to.0, to.1);
    }

    pub fn global_position(&self, name: &str) -> DVec3 {
        self.client
            .scene()
            .global_location(self.id(name), self.now())
            .expect("object")
            .position
    }

    pub fn parent_of(&self, name: &str) -> Option<ObjectId> {
        self.client.scene().parent_of(self.id(name)).expect("object")
    }

    /// Every selected entity's parent is the current group.
    pub fn selection_is_consistent(&self) -> bool {
        self.client
            .controller()
            .selection()
            .is_consistent(&self.client.scene())
    }
}

/// Normalized screen coordinates of a world point for the default camera
/// at the origin looking down -Z.
pub fn screen_point(world: (f64, f64, f64)) -> (f32, f32) {
    let info = CameraInfo::default();
    let half_h = (info.fov_y * 0.5).tan();
    let half_w = half_h * info.aspect;
    let depth = -world.2;
    ((world.0 / depth / half_w) as f32, (world.1 / depth / half_h) as f32)
}
