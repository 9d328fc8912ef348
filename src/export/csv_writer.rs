//! Scene export to the fixed-schema CSV format.
//!
//! Every row has exactly [`COLUMN_COUNT`] fields. Rows are ordered cameras
//! (by x), then lights (by x), then meshes (by physical name). Positions
//! and orientations are global at the export time.

use super::euler::quat_to_euler;
use super::{ExportError, ExportResult};
use crate::constants::{FALLBACK_GROUP_NAME, MESH_SUFFIX_LEN};
use crate::scene::{ProxyObject, Scene};
use crate::types::{Color, LightInfo, Location, MeshInfo, ObjectId, ProxyKind, SimTime};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

pub const HEADER: [&str; 40] = [
    "objtype", "subtype", "name", "parent", "pos_x", "pos_y", "pos_z", "orient_x", "orient_y",
    "orient_z", "orient_w", "scale_x", "scale_y", "scale_z", "hull_x", "hull_y", "hull_z",
    "density", "friction", "bounce", "colMask", "colMsg", "meshURI", "diffuse_x", "diffuse_y",
    "diffuse_z", "ambient", "specular_x", "specular_y", "specular_z", "shadowpower", "range",
    "constfall", "linearfall", "quadfall", "cone_in", "cone_out", "power", "cone_fall", "shadow",
];

pub const COLUMN_COUNT: usize = HEADER.len();

/// Scale `k` minimising `|source * k - target|`. A black source gives 0.
pub fn closest_power(source: Color, target: Color) -> f64 {
    let denom = source.length_squared();
    if denom <= f64::EPSILON {
        return 0.0;
    }
    source.dot(target) / denom
}

/// Unique mesh names for one export.
///
/// Unnamed meshes are named after their mesh file minus the suffix;
/// collisions get `.1`, `.2`, ... appended. A mesh keeps the first name it
/// was given for the rest of the export.
#[derive(Debug, Default)]
pub struct SceneNamer {
    used: HashSet<String>,
    assigned: HashMap<ObjectId, String>,
}

impl SceneNamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn physical_name(&mut self, id: ObjectId, mesh: &MeshInfo) -> String {
        if let Some(name) = self.assigned.get(&id) {
            return name.clone();
        }
        let base = if mesh.physical.name.is_empty() {
            let file = mesh.mesh_filename();
            if file.len() > MESH_SUFFIX_LEN {
                file.chars()
                    .take(file.chars().count().saturating_sub(MESH_SUFFIX_LEN))
                    .collect()
            } else {
                FALLBACK_GROUP_NAME.to_string()
            }
        } else {
            mesh.physical.name.clone()
        };

        let mut name = base.clone();
        let mut count = 1;
        while self.used.contains(&name) {
            name = format!("{base}.{count}");
            count += 1;
        }
        self.used.insert(name.clone());
        self.assigned.insert(id, name.clone());
        name
    }
}

/// One output row, padded to the full column count on completion.
struct Row(Vec<String>);

impl Row {
    fn new(objtype: &str, subtype: &str, name: &str, parent: &str) -> Self {
        let mut fields = Vec::with_capacity(COLUMN_COUNT);
        fields.extend([objtype, subtype, name, parent].map(String::from));
        Row(fields)
    }

    fn num(&mut self, v: f64) -> &mut Self {
        self.0.push(format!("{v:.6}"));
        self
    }

    fn vec3(&mut self, v: glam::DVec3) -> &mut Self {
        self.num(v.x).num(v.y).num(v.z)
    }

    fn text(&mut self, s: impl Into<String>) -> &mut Self {
        self.0.push(s.into());
        self
    }

    fn pad_to(&mut self, len: usize) -> &mut Self {
        while self.0.len() < len {
            self.0.push(String::new());
        }
        self
    }

    /// Position, orientation (Euler degrees or quaternion) and `orient_w`.
    fn placement(&mut self, loc: &Location) -> &mut Self {
        self.vec3(loc.position);
        let q = loc.orientation;
        match quat_to_euler(q) {
            Some(e) => self.num(e.pitch).num(e.yaw).num(e.roll).text(""),
            None => self.num(q.x).num(q.y).num(q.z).num(q.w),
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.pad_to(COLUMN_COUNT);
        self.0
    }
}

fn rank(kind: &ProxyKind) -> u8 {
    match kind {
        ProxyKind::Camera(_) => 0,
        ProxyKind::Light(_) => 1,
        ProxyKind::Mesh(_) => 2,
    }
}

fn export_order(a: &(&ProxyObject, Location), b: &(&ProxyObject, Location)) -> Ordering {
    let (pa, la) = a;
    let (pb, lb) = b;
    rank(&pa.kind)
        .cmp(&rank(&pb.kind))
        .then_with(|| match (&pa.kind, &pb.kind) {
            (ProxyKind::Mesh(ma), ProxyKind::Mesh(mb)) => ma.physical.name.cmp(&mb.physical.name),
            _ => la.position.x.total_cmp(&lb.position.x),
        })
        .then_with(|| pa.id.cmp(&pb.id))
}

fn light_row(light: &LightInfo, parent: &str, loc: &Location) -> Vec<String> {
    let mut row = Row::new("light", light.kind.as_subtype(), "", parent);
    row.placement(loc)
        .pad_to(23)
        .vec3(light.diffuse)
        .num(closest_power(light.diffuse, light.ambient))
        .vec3(light.specular)
        .num(closest_power(light.specular, light.shadow))
        .num(light.range)
        .num(light.constant_falloff)
        .num(light.linear_falloff)
        .num(light.quadratic_falloff)
        .num(light.cone_inner)
        .num(light.cone_outer)
        .num(light.power)
        .num(light.cone_falloff)
        .text(if light.casts_shadow { "1" } else { "0" });
    row.finish()
}

fn mesh_row(mesh: &MeshInfo, name: &str, parent: &str, loc: &Location) -> Vec<String> {
    let phys = &mesh.physical;
    let uri = if mesh.has_protocol() { mesh.mesh.as_str() } else { "" };
    let mut row = Row::new("mesh", phys.mode.as_subtype(), name, parent);
    row.placement(loc)
        .vec3(mesh.scale)
        .vec3(phys.hull)
        .num(phys.density)
        .num(phys.friction)
        .num(phys.bounce)
        .text(phys.col_mask.to_string())
        .text(phys.col_msg.to_string())
        .text(uri);
    row.finish()
}

/// Write every live object of `scene` at `time`. Returns the row count,
/// header excluded.
pub fn write_scene<W: Write>(scene: &Scene, time: SimTime, out: W) -> ExportResult<usize> {
    let mut writer = csv::WriterBuilder::new().from_writer(out);
    writer.write_record(HEADER)?;

    let mut objects: Vec<(&ProxyObject, Location)> = scene
        .entities()
        .filter_map(|e| {
            let loc = scene.global_location(e.id(), time)?;
            Some((&e.proxy, loc))
        })
        .collect();
    objects.sort_by(export_order);

    let mut namer = SceneNamer::new();
    for (proxy, loc) in &objects {
        let parent = match proxy.parent().and_then(|p| scene.proxy(p)) {
            Some(parent) => match &parent.kind {
                ProxyKind::Mesh(mesh) => namer.physical_name(parent.id, mesh),
                _ => String::new(),
            },
            None => String::new(),
        };
        let record = match &proxy.kind {
            ProxyKind::Light(light) => light_row(light, &parent, loc),
            ProxyKind::Mesh(mesh) => {
                let name = namer.physical_name(proxy.id, mesh);
                mesh_row(mesh, &name, &parent, loc)
            }
            ProxyKind::Camera(_) => {
                let mut row = Row::new("camera", "", "", &parent);
                row.placement(loc);
                row.finish()
            }
        };
        writer.write_record(&record)?;
    }
    writer.flush()?;
    debug!(rows = objects.len(), "scene written");
    Ok(objects.len())
}

/// Render the scene export as a string.
pub fn scene_to_string(scene: &Scene, time: SimTime) -> ExportResult<String> {
    let mut buf = Vec::new();
    write_scene(scene, time, &mut buf)?;
    String::from_utf8(buf).map_err(|e| ExportError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Save the scene to `path`, replacing it atomically. Nothing is touched
/// at `path` unless the whole export succeeds.
pub fn save_scene(scene: &Scene, path: &Path, time: SimTime) -> ExportResult<usize> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    let rows = write_scene(scene, time, tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    info!(path = %path.display(), rows, "scene saved");
    Ok(rows)
}
