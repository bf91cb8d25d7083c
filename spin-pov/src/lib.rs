#![warn(unused_qualifications)]

//! [POV-Ray][1] export of atomistic spin snapshots
//!
//! Two files make up a visualization: a scene file ([`SCENE_FILE_NAME`]) with
//! camera, lighting and one `spinm<N>` macro per material, and one include
//! file per frame ([`frame_file_name`]) that invokes those macros for every
//! atom. The scene pulls in the include file for POV-Ray's `frame_number`,
//! so rendering an animation is a matter of running POV-Ray with
//! `+KFI<start> +KFF<final>`.
//!
//! The [POV-Ray scene language reference][2].
//!
//! [1]: https://www.povray.org/
//! [2]: https://www.povray.org/documentation/3.7.0/r3_0.html

pub mod camera;
pub mod color;
pub mod error;
pub mod format;
pub mod frame;
pub mod io;
pub mod naming;
pub mod scene;
pub mod snapshot;
pub mod style;

use std::path::{
    Path,
    PathBuf,
};

pub use crate::{
    camera::CameraPlacement,
    color::{
        FixedColor,
        SpinColor,
        SpinHue,
    },
    error::Error,
    frame::{
        ExportOptions,
        Frame,
        FrameExporter,
    },
    naming::{
        SCENE_FILE_NAME,
        frame_file_name,
    },
    scene::{
        SceneComposer,
        SceneDescription,
    },
    snapshot::Snapshot,
    style::{
        MaterialStyle,
        SceneSettings,
    },
};

/// Writes the include file for one frame into `dir`, using the default
/// (fixed blue) spin colour.
pub fn export_frame(
    dir: impl AsRef<Path>,
    frame_id: u32,
    snapshot: &Snapshot<'_>,
) -> Result<PathBuf, Error> {
    FrameExporter::new().export_frame(dir, frame_id, snapshot)
}

/// Writes the scene file into `dir`, using the default scene settings.
pub fn compose_scene(dir: impl AsRef<Path>, scene: &SceneDescription) -> Result<PathBuf, Error> {
    SceneComposer::default().compose_scene(dir, scene)
}
