//! Scene export and import.
//!
//! The scene file is a fixed 40-column CSV. Orientation columns carry Euler
//! degrees when `orient_w` is empty and a quaternion otherwise.

mod csv_reader;
mod csv_writer;
mod error;
pub mod euler;

pub use csv_reader::{SceneRecord, import_records, load_scene_file, read_scene};
pub use csv_writer::{
    COLUMN_COUNT, HEADER, SceneNamer, closest_power, save_scene, scene_to_string, write_scene,
};
pub use error::{ExportError, ExportResult, MAX_SCENE_IMPORT_SIZE_MB};
