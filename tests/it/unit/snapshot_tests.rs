//! Snapshot tests using the insta crate.
//!
//! The scene file and settings formats are read by other tools, so their
//! exact text is pinned here. To update after an intentional change:
//! ```sh
//! cargo insta test --accept
//! ```

use glam::{DQuat, DVec3};
use uuid::Uuid;
use worldhost::export::scene_to_string;
use worldhost::scene::{ProxyObject, Scene};
use worldhost::settings::ClientSettings;
use worldhost::types::{LightInfo, Location, MeshInfo, ObjectId, ProxyKind, ProxyManagerId};

const MGR: ProxyManagerId = ProxyManagerId(1);

fn add(scene: &mut Scene, kind: ProxyKind, parent: Option<ObjectId>, at: (f64, f64, f64)) -> ObjectId {
    let id = ObjectId::random_in(Uuid::nil());
    let location = Location::at(DVec3::new(at.0, at.1, at.2), DQuat::IDENTITY);
    scene
        .create_object(
            ProxyObject::new(id, MGR, kind)
                .with_parent(parent)
                .with_location(location, 0.0),
        )
        .unwrap();
    id
}

#[test]
fn snapshot_scene_export() {
    let mut scene = Scene::new();
    scene.add_proxy_manager(MGR);
    add(&mut scene, ProxyKind::Light(LightInfo::default()), None, (1.0, 2.0, 3.0));
    let crate_id = add(
        &mut scene,
        ProxyKind::Mesh(MeshInfo::new("meerkat:///models/crate.mesh")),
        None,
        (0.0, 0.0, 0.0),
    );
    add(
        &mut scene,
        ProxyKind::Mesh(MeshInfo::new("file:wheel.mesh").with_name("wheel")),
        Some(crate_id),
        (1.0, 0.0, 0.0),
    );

    let csv = scene_to_string(&scene, 0.0).unwrap();
    insta::assert_snapshot!(csv.trim_end(), @r"
objtype,subtype,name,parent,pos_x,pos_y,pos_z,orient_x,orient_y,orient_z,orient_w,scale_x,scale_y,scale_z,hull_x,hull_y,hull_z,density,friction,bounce,colMask,colMsg,meshURI,diffuse_x,diffuse_y,diffuse_z,ambient,specular_x,specular_y,specular_z,shadowpower,range,constfall,linearfall,quadfall,cone_in,cone_out,power,cone_fall,shadow
light,point,,,1.000000,2.000000,3.000000,0.000000,0.000000,0.000000,,,,,,,,,,,,,,1.000000,1.000000,1.000000,0.000000,0.000000,0.000000,0.000000,0.000000,100.000000,1.000000,0.000000,0.000000,0.000000,0.000000,1.000000,0.000000,0
mesh,graphiconly,crate,,0.000000,0.000000,0.000000,0.000000,0.000000,0.000000,,1.000000,1.000000,1.000000,1.000000,1.000000,1.000000,0.000000,0.000000,0.000000,0,0,meerkat:///models/crate.mesh,,,,,,,,,,,,,,,,,
mesh,graphiconly,wheel,crate,1.000000,0.000000,0.000000,0.000000,0.000000,0.000000,,1.000000,1.000000,1.000000,1.000000,1.000000,1.000000,0.000000,0.000000,0.000000,0,0,file:wheel.mesh,,,,,,,,,,,,,,,,,
");
}

#[test]
fn snapshot_default_settings() {
    let json = serde_json::to_string_pretty(&ClientSettings::default()).unwrap();
    insta::assert_snapshot!(json, @r#"
{
  "world_scale": 20.0,
  "camera_speed_presets": [
    0.25,
    1.0,
    5.0
  ],
  "scene_export_path": "scene_new.csv",
  "scene_import_path": "scene_new.csv",
  "drag_threshold": 0.01,
  "log_filter": "worldhost=info"
}
"#);
}
