//! Core types for the worldhost scene model.
//!
//! This module defines the identity, location and payload types shared by the
//! scene registry, the interaction controller and the scene export format.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Simulation time in seconds since client start.
pub type SimTime = f64;

/// RGB color with components nominally in [0, 1].
pub type Color = DVec3;

// ============================================================================
// Identity
// ============================================================================

/// Stable identity of a networked object: the space it lives in plus its
/// object reference within that space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId {
    pub space: Uuid,
    pub object: Uuid,
}

impl ObjectId {
    pub fn new(space: Uuid, object: Uuid) -> Self {
        Self { space, object }
    }

    /// A fresh random object reference in the given space.
    pub fn random_in(space: Uuid) -> Self {
        Self {
            space,
            object: Uuid::new_v4(),
        }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.space, self.object)
    }
}

/// Identifies the proxy manager (object host connection) that owns an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProxyManagerId(pub u32);

// ============================================================================
// Location
// ============================================================================

/// Position, orientation and motion of an object at a reference time.
///
/// The rotation axis is expressed in the object's own frame, so angular
/// motion composes on the right of the orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub position: DVec3,
    pub orientation: DQuat,
    pub velocity: DVec3,
    pub axis_of_rotation: DVec3,
    pub angular_speed: f64,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
            velocity: DVec3::ZERO,
            axis_of_rotation: DVec3::Y,
            angular_speed: 0.0,
        }
    }
}

impl Location {
    /// A stationary location.
    pub fn at(position: DVec3, orientation: DQuat) -> Self {
        Self {
            position,
            orientation,
            ..Default::default()
        }
    }

    /// Evaluate this location `dt` seconds after its reference time.
    pub fn extrapolate(&self, dt: f64) -> Location {
        let mut out = *self;
        out.position = self.position + self.velocity * dt;
        if self.angular_speed != 0.0 && self.axis_of_rotation.length_squared() > 0.0 {
            let spin = DQuat::from_axis_angle(
                self.axis_of_rotation.normalize(),
                self.angular_speed * dt,
            );
            out.orientation = (self.orientation * spin).normalize();
        }
        out
    }

    /// Interpret `self` as relative to `parent` and return the global location.
    pub fn to_global(&self, parent: &Location) -> Location {
        Location {
            position: parent.position + parent.orientation * self.position,
            orientation: (parent.orientation * self.orientation).normalize(),
            velocity: parent.velocity + parent.orientation * self.velocity,
            axis_of_rotation: self.axis_of_rotation,
            angular_speed: self.angular_speed,
        }
    }

    /// Express the global location `self` relative to the global `parent`.
    pub fn to_local(&self, parent: &Location) -> Location {
        let inv = parent.orientation.inverse();
        Location {
            position: inv * (self.position - parent.position),
            orientation: (inv * self.orientation).normalize(),
            velocity: inv * (self.velocity - parent.velocity),
            axis_of_rotation: self.axis_of_rotation,
            angular_speed: self.angular_speed,
        }
    }

    /// Viewing direction; objects look down their local -Z axis.
    pub fn forward(&self) -> DVec3 {
        self.orientation * DVec3::NEG_Z
    }

    pub fn right(&self) -> DVec3 {
        self.orientation * DVec3::X
    }

    pub fn up(&self) -> DVec3 {
        self.orientation * DVec3::Y
    }
}

// ============================================================================
// Object Payloads
// ============================================================================

/// Physics simulation mode of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PhysicalMode {
    #[default]
    Disabled,
    Static,
    DynamicBox,
    DynamicSphere,
    DynamicCylinder,
}

impl PhysicalMode {
    /// Subtype keyword used in scene files.
    pub fn as_subtype(self) -> &'static str {
        match self {
            PhysicalMode::Disabled => "graphiconly",
            PhysicalMode::Static => "staticmesh",
            PhysicalMode::DynamicBox => "dynamicbox",
            PhysicalMode::DynamicSphere => "dynamicsphere",
            PhysicalMode::DynamicCylinder => "dynamiccylinder",
        }
    }

    pub fn from_subtype(s: &str) -> Option<Self> {
        match s {
            "graphiconly" => Some(PhysicalMode::Disabled),
            "staticmesh" => Some(PhysicalMode::Static),
            "dynamicbox" => Some(PhysicalMode::DynamicBox),
            "dynamicsphere" => Some(PhysicalMode::DynamicSphere),
            "dynamiccylinder" => Some(PhysicalMode::DynamicCylinder),
            _ => None,
        }
    }
}

/// Collision and naming parameters attached to a mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalParameters {
    /// Scene name, may be empty
    pub name: String,
    pub mode: PhysicalMode,
    pub hull: DVec3,
    pub density: f64,
    pub friction: f64,
    pub bounce: f64,
    pub col_mask: i32,
    pub col_msg: i32,
}

impl Default for PhysicalParameters {
    fn default() -> Self {
        Self {
            name: String::new(),
            mode: PhysicalMode::Disabled,
            hull: DVec3::ONE,
            density: 0.0,
            friction: 0.0,
            bounce: 0.0,
            col_mask: 0,
            col_msg: 0,
        }
    }
}

/// Mesh payload: the mesh resource URI, its scale and physical parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshInfo {
    pub mesh: String,
    pub scale: DVec3,
    pub physical: PhysicalParameters,
}

impl Default for MeshInfo {
    fn default() -> Self {
        Self {
            mesh: String::new(),
            scale: DVec3::ONE,
            physical: PhysicalParameters::default(),
        }
    }
}

impl MeshInfo {
    pub fn new(mesh: impl Into<String>) -> Self {
        Self {
            mesh: mesh.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.physical.name = name.into();
        self
    }

    pub fn with_scale(mut self, scale: DVec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_mode(mut self, mode: PhysicalMode) -> Self {
        self.physical.mode = mode;
        self
    }

    /// Last path segment of the mesh URI.
    pub fn mesh_filename(&self) -> &str {
        self.mesh.rsplit('/').next().unwrap_or("")
    }

    /// Whether the URI carries a scheme such as `meerkat:` or `file:`.
    pub fn has_protocol(&self) -> bool {
        match self.mesh.find(':') {
            Some(idx) if idx > 0 => self.mesh[..idx]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LightType {
    Directional,
    #[default]
    Point,
    Spotlight,
}

impl LightType {
    pub fn as_subtype(self) -> &'static str {
        match self {
            LightType::Directional => "directional",
            LightType::Point => "point",
            LightType::Spotlight => "spotlight",
        }
    }

    pub fn from_subtype(s: &str) -> Option<Self> {
        match s {
            "directional" => Some(LightType::Directional),
            "point" => Some(LightType::Point),
            "spotlight" => Some(LightType::Spotlight),
            _ => None,
        }
    }
}

/// Light payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightInfo {
    pub kind: LightType,
    pub diffuse: Color,
    pub ambient: Color,
    pub specular: Color,
    pub shadow: Color,
    pub power: f64,
    pub range: f64,
    pub constant_falloff: f64,
    pub linear_falloff: f64,
    pub quadratic_falloff: f64,
    pub cone_inner: f64,
    pub cone_outer: f64,
    pub cone_falloff: f64,
    pub casts_shadow: bool,
}

impl Default for LightInfo {
    fn default() -> Self {
        Self {
            kind: LightType::Point,
            diffuse: DVec3::ONE,
            ambient: DVec3::ZERO,
            specular: DVec3::ZERO,
            shadow: DVec3::ZERO,
            power: 1.0,
            range: 100.0,
            constant_falloff: 1.0,
            linear_falloff: 0.0,
            quadratic_falloff: 0.0,
            cone_inner: 0.0,
            cone_outer: 0.0,
            cone_falloff: 0.0,
            casts_shadow: false,
        }
    }
}

impl LightInfo {
    /// Profile used for lights placed interactively from the keyboard.
    pub fn placed_default() -> Self {
        use crate::constants::light;
        Self {
            kind: LightType::Point,
            diffuse: light::DIFFUSE,
            ambient: light::AMBIENT,
            specular: DVec3::ZERO,
            shadow: DVec3::ZERO,
            power: light::POWER,
            range: light::RANGE,
            constant_falloff: light::FALLOFF.0,
            linear_falloff: light::FALLOFF.1,
            quadratic_falloff: light::FALLOFF.2,
            cone_inner: light::CONE.0,
            cone_outer: light::CONE.1,
            cone_falloff: light::CONE.2,
            casts_shadow: true,
        }
    }
}

/// Camera payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraInfo {
    /// Vertical field of view in radians
    pub fov_y: f64,
    /// Viewport width over height
    pub aspect: f64,
}

impl Default for CameraInfo {
    fn default() -> Self {
        Self {
            fov_y: std::f64::consts::FRAC_PI_3,
            aspect: 4.0 / 3.0,
        }
    }
}

/// Type-specific payload of a proxy object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProxyKind {
    Mesh(MeshInfo),
    Light(LightInfo),
    Camera(CameraInfo),
}

impl ProxyKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ProxyKind::Mesh(_) => "mesh",
            ProxyKind::Light(_) => "light",
            ProxyKind::Camera(_) => "camera",
        }
    }

    pub fn as_mesh(&self) -> Option<&MeshInfo> {
        match self {
            ProxyKind::Mesh(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_mesh_mut(&mut self) -> Option<&mut MeshInfo> {
        match self {
            ProxyKind::Mesh(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_light(&self) -> Option<&LightInfo> {
        match self {
            ProxyKind::Light(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_camera(&self) -> Option<&CameraInfo> {
        match self {
            ProxyKind::Camera(c) => Some(c),
            _ => None,
        }
    }
}
