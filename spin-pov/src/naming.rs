//! File naming shared by the frame exporter and the scene's include
//! directive.

pub const FRAME_FILE_PREFIX: &str = "spins-";
pub const FRAME_FILE_EXTENSION: &str = ".inc";

/// Frame ids are zero-padded to this many digits.
pub const FRAME_ID_WIDTH: usize = 8;

pub const SCENE_FILE_NAME: &str = "spins.pov";

/// POV-Ray's built-in frame counter when rendering an animation.
pub const FRAME_NUMBER_VARIABLE: &str = "frame_number";

/// Name of the include file for a frame, e.g. `spins-00000042.inc`.
pub fn frame_file_name(frame_id: u32) -> String {
    format!("{FRAME_FILE_PREFIX}{frame_id:0FRAME_ID_WIDTH$}{FRAME_FILE_EXTENSION}")
}

/// POV-Ray string expression that evaluates to [`frame_file_name`] of the
/// value of `variable` at render time.
///
/// `str(x, -8, 0)` formats `x` with zero padding to 8 characters and no
/// decimals.
pub fn frame_file_name_expression(variable: &str) -> String {
    format!(
        "concat(\"{FRAME_FILE_PREFIX}\", str({variable}, -{FRAME_ID_WIDTH}, 0), \"{FRAME_FILE_EXTENSION}\")"
    )
}
