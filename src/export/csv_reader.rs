//! Scene import from the CSV format written by `csv_writer`.
//!
//! Camera rows are skipped: the client already has its own camera. Parent
//! references are mesh names and are resolved after every row is read, so
//! a child may appear before its parent.

use super::euler::{EulerAngles, euler_to_quat};
use super::{ExportError, ExportResult, MAX_SCENE_IMPORT_SIZE_MB};
use crate::scene::{ProxyObject, Scene};
use crate::types::{
    LightInfo, LightType, Location, MeshInfo, ObjectId, PhysicalMode, PhysicalParameters,
    ProxyKind, ProxyManagerId, SimTime,
};
use glam::{DQuat, DVec3};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// One object read from a scene file. The location is global.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneRecord {
    pub name: String,
    pub parent: String,
    pub location: Location,
    pub kind: ProxyKind,
}

/// Column lookup by header name.
struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn new(headers: &csv::StringRecord) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_string(), i))
            .collect();
        Self { index }
    }

    fn get<'r>(&self, record: &'r csv::StringRecord, column: &str) -> &'r str {
        self.index
            .get(column)
            .and_then(|i| record.get(*i))
            .map(str::trim)
            .unwrap_or("")
    }
}

/// Parses the fields of one row, tagging errors with its line.
struct RowReader<'a> {
    columns: &'a Columns,
    record: &'a csv::StringRecord,
    line: usize,
}

impl RowReader<'_> {
    fn text(&self, column: &str) -> &str {
        self.columns.get(self.record, column)
    }

    fn invalid(&self, message: String) -> ExportError {
        ExportError::InvalidRow {
            line: self.line,
            message,
        }
    }

    fn num(&self, column: &str) -> ExportResult<f64> {
        let raw = self.text(column);
        raw.parse::<f64>()
            .map_err(|_| self.invalid(format!("bad {column} value '{raw}'")))
    }

    /// Empty cells take the default.
    fn num_or(&self, column: &str, default: f64) -> ExportResult<f64> {
        if self.text(column).is_empty() {
            Ok(default)
        } else {
            self.num(column)
        }
    }

    fn int_or(&self, column: &str, default: i32) -> ExportResult<i32> {
        let raw = self.text(column);
        if raw.is_empty() {
            return Ok(default);
        }
        raw.parse::<i32>()
            .map_err(|_| self.invalid(format!("bad {column} value '{raw}'")))
    }

    fn vec3(&self, prefix: &str) -> ExportResult<DVec3> {
        Ok(DVec3::new(
            self.num(&format!("{prefix}_x"))?,
            self.num(&format!("{prefix}_y"))?,
            self.num(&format!("{prefix}_z"))?,
        ))
    }

    fn vec3_or(&self, prefix: &str, default: DVec3) -> ExportResult<DVec3> {
        Ok(DVec3::new(
            self.num_or(&format!("{prefix}_x"), default.x)?,
            self.num_or(&format!("{prefix}_y"), default.y)?,
            self.num_or(&format!("{prefix}_z"), default.z)?,
        ))
    }

    /// An empty `orient_w` means the orientation is Euler degrees.
    fn location(&self) -> ExportResult<Location> {
        let position = self.vec3("pos")?;
        let orientation = if self.text("orient_w").is_empty() {
            euler_to_quat(EulerAngles {
                pitch: self.num_or("orient_x", 0.0)?,
                yaw: self.num_or("orient_y", 0.0)?,
                roll: self.num_or("orient_z", 0.0)?,
            })
        } else {
            let q = DQuat::from_xyzw(
                self.num("orient_x")?,
                self.num("orient_y")?,
                self.num("orient_z")?,
                self.num("orient_w")?,
            );
            if q.length_squared() <= f64::EPSILON {
                return Err(self.invalid("degenerate quaternion".to_string()));
            }
            q.normalize()
        };
        Ok(Location::at(position, orientation))
    }

    fn light(&self) -> ExportResult<LightInfo> {
        let subtype = self.text("subtype");
        let kind = LightType::from_subtype(subtype)
            .ok_or_else(|| self.invalid(format!("unknown light type '{subtype}'")))?;
        let diffuse = self.vec3_or("diffuse", DVec3::ONE)?;
        let specular = self.vec3_or("specular", DVec3::ZERO)?;
        Ok(LightInfo {
            kind,
            diffuse,
            ambient: diffuse * self.num_or("ambient", 0.0)?,
            specular,
            shadow: specular * self.num_or("shadowpower", 0.0)?,
            power: self.num_or("power", 1.0)?,
            range: self.num_or("range", 100.0)?,
            constant_falloff: self.num_or("constfall", 1.0)?,
            linear_falloff: self.num_or("linearfall", 0.0)?,
            quadratic_falloff: self.num_or("quadfall", 0.0)?,
            cone_inner: self.num_or("cone_in", 0.0)?,
            cone_outer: self.num_or("cone_out", 0.0)?,
            cone_falloff: self.num_or("cone_fall", 0.0)?,
            casts_shadow: matches!(self.text("shadow"), "1" | "true"),
        })
    }

    fn mesh(&self) -> ExportResult<MeshInfo> {
        let subtype = self.text("subtype");
        let mode = PhysicalMode::from_subtype(subtype)
            .ok_or_else(|| self.invalid(format!("unknown mesh type '{subtype}'")))?;
        let defaults = PhysicalParameters::default();
        Ok(MeshInfo {
            mesh: self.text("meshURI").to_string(),
            scale: self.vec3_or("scale", DVec3::ONE)?,
            physical: PhysicalParameters {
                name: self.text("name").to_string(),
                mode,
                hull: self.vec3_or("hull", defaults.hull)?,
                density: self.num_or("density", defaults.density)?,
                friction: self.num_or("friction", defaults.friction)?,
                bounce: self.num_or("bounce", defaults.bounce)?,
                col_mask: self.int_or("colMask", defaults.col_mask)?,
                col_msg: self.int_or("colMsg", defaults.col_msg)?,
            },
        })
    }
}

/// Parse scene records. Lines starting with `#` are ignored.
pub fn read_scene<R: Read>(input: R) -> ExportResult<Vec<SceneRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(input);
    let headers = reader.headers()?.clone();
    if headers.get(0).map(str::trim) != Some("objtype") {
        return Err(ExportError::EmptyFile);
    }
    let columns = Columns::new(&headers);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row = RowReader {
            columns: &columns,
            record: &record,
            line: record.position().map(|p| p.line() as usize).unwrap_or(0),
        };
        let kind = match row.text("objtype") {
            "light" => ProxyKind::Light(row.light()?),
            "mesh" => ProxyKind::Mesh(row.mesh()?),
            "camera" => {
                debug!(line = row.line, "skipping camera row");
                continue;
            }
            "" => continue,
            other => return Err(row.invalid(format!("unknown object type '{other}'"))),
        };
        records.push(SceneRecord {
            name: row.text("name").to_string(),
            parent: row.text("parent").to_string(),
            location: row.location()?,
            kind,
        });
    }
    Ok(records)
}

/// Read a scene file, refusing oversized files.
pub fn load_scene_file(path: &Path) -> ExportResult<Vec<SceneRecord>> {
    let size_mb = std::fs::metadata(path)?.len() / (1024 * 1024);
    if size_mb > MAX_SCENE_IMPORT_SIZE_MB {
        return Err(ExportError::TooLarge {
            size_mb,
            max_mb: MAX_SCENE_IMPORT_SIZE_MB,
        });
    }
    read_scene(File::open(path)?)
}

/// Create the records as new objects owned by `manager`, then attach
/// children to their named parents (keeping world placement). Unresolved
/// parent names leave the object at the world root.
pub fn import_records(
    scene: &mut Scene,
    records: Vec<SceneRecord>,
    manager: ProxyManagerId,
    space: Uuid,
    time: SimTime,
) -> ExportResult<Vec<ObjectId>> {
    let mut created = Vec::with_capacity(records.len());
    let mut by_name: HashMap<String, ObjectId> = HashMap::new();
    let mut pending_parents = Vec::new();

    for record in records {
        let id = ObjectId::random_in(space);
        let is_mesh = matches!(record.kind, ProxyKind::Mesh(_));
        scene.create_object(
            ProxyObject::new(id, manager, record.kind).with_location(record.location, time),
        )?;
        if is_mesh && !record.name.is_empty() {
            by_name.entry(record.name).or_insert(id);
        }
        if !record.parent.is_empty() {
            pending_parents.push((id, record.parent));
        }
        created.push(id);
    }

    for (id, parent_name) in pending_parents {
        match by_name.get(&parent_name) {
            Some(parent) => {
                if let Err(e) = scene.set_parent(id, Some(*parent), time) {
                    warn!(%id, parent = %parent_name, error = %e, "cannot attach imported object");
                }
            }
            None => warn!(%id, parent = %parent_name, "unknown parent in scene file"),
        }
    }
    info!(objects = created.len(), "scene imported");
    Ok(created)
}
