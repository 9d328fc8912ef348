//! Client-wide constants.
//!
//! Centralizes the tuning values of the interaction layer so the controller,
//! the drag actions and the scene export agree on them.

// ============================================================================
// World & Camera
// ============================================================================

/// Default length of one world-scale unit in meters
pub const DEFAULT_WORLD_SCALE: f64 = 20.0;

/// Camera speed multipliers bound to the 1/2/3 keys
pub const CAMERA_SPEED_PRESETS: [f64; 3] = [0.25, 1.0, 5.0];

/// Camera speed multiplier at startup
pub const DEFAULT_CAMERA_SPEED: f64 = 1.0;

/// Vertical camera speed for PAGEUP/PAGEDOWN, as a fraction of world scale
pub const VERTICAL_MOVE_FACTOR: f64 = 0.25;

/// Arrow-key strafe speed, as a fraction of world scale
pub const STRAFE_MOVE_FACTOR: f64 = 0.25;

/// Scale applied to mouse wheel axis values before zooming
pub const WHEEL_ZOOM_FACTOR: f64 = 0.2;

// ============================================================================
// Selection & Picking
// ============================================================================

/// Two clicks closer than this (normalized screen units, per axis) count as
/// the same screen point for hit cycling
pub const PICK_TOLERANCE: f32 = 0.03125;

/// Mouse travel (normalized screen units) before a press becomes a drag
pub const DRAG_THRESHOLD: f32 = 0.01;

/// Selection flash period in milliseconds
pub const HILITE_PERIOD_MS: u64 = 1000;

/// Portion of the flash period during which the selection is hidden
pub const HILITE_HIDDEN_MS: u64 = 250;

// ============================================================================
// Editing
// ============================================================================

/// Clones are offset along +X by this fraction of the world scale
pub const CLONE_OFFSET_FACTOR: f64 = 0.5;

/// Name prefix for groups created from a named member
pub const GROUP_NAME_PREFIX: &str = "grp-";

/// Name used for groups and meshes without any usable name
pub const FALLBACK_GROUP_NAME: &str = "group";

// ============================================================================
// Drag Sensitivity
// ============================================================================

/// Radians of object rotation per normalized screen unit
pub const ROTATE_OBJECT_SENSITIVITY: f64 = std::f64::consts::PI;

/// Exponential scale rate per normalized screen unit
pub const SCALE_OBJECT_SENSITIVITY: f64 = 1.0;

/// Radians of camera yaw per normalized screen unit
pub const ROTATE_CAMERA_YAW_SENSITIVITY: f64 = std::f64::consts::PI;

/// Radians of camera pitch per normalized screen unit
pub const ROTATE_CAMERA_PITCH_SENSITIVITY: f64 = std::f64::consts::FRAC_PI_2;

/// World-scale units of zoom per normalized screen unit
pub const ZOOM_CAMERA_SENSITIVITY: f64 = 1.0;

// ============================================================================
// Scene Export
// ============================================================================

/// Default file name for scene saves
pub const DEFAULT_SCENE_EXPORT_PATH: &str = "scene_new.csv";

/// Orientations with a larger pitch (degrees) are written as quaternions
pub const EULER_PITCH_LIMIT_DEG: f64 = 89.0;

/// Length of the mesh file suffix (".mesh") trimmed when naming meshes
pub const MESH_SUFFIX_LEN: usize = 5;

/// Default profile for interactively placed lights.
pub mod light {
    use glam::{DQuat, DVec3};

    pub const DIFFUSE: DVec3 = DVec3::new(0.976471, 0.992157, 0.733333);
    pub const AMBIENT: DVec3 = DVec3::new(0.24, 0.25, 0.18);
    pub const POWER: f64 = 1.0;
    pub const RANGE: f64 = 75.0;
    /// Constant, linear and quadratic falloff
    pub const FALLOFF: (f64, f64, f64) = (1.0, 0.0, 0.03);
    /// Spotlight inner cone, outer cone and cone falloff
    pub const CONE: (f64, f64, f64) = (30.0, 40.0, 1.0);
    /// Placed lights point down and to the side
    pub const ORIENTATION: DQuat = DQuat::from_xyzw(0.0, -0.461779, 0.0, 0.886995);
}

/// Scene files larger than this (MB) are refused on import
pub const MAX_SCENE_IMPORT_SIZE_MB: u64 = 100;
