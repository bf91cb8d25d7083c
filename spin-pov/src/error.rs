use nalgebra::Vector3;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("System extents must be positive and finite, but are {extents:?}")]
    DegenerateExtents { extents: Vector3<f64> },

    #[error(
        "Snapshot with {num_atoms} atoms needs {expected} {array} values, but {len} were given"
    )]
    SnapshotLength {
        array: &'static str,
        num_atoms: usize,
        expected: usize,
        len: usize,
    },

    #[error("Frame {frame_id} appears more than once in the batch")]
    DuplicateFrame { frame_id: u32 },

    #[error("Formatting error")]
    Fmt(#[from] std::fmt::Error),

    #[cfg(feature = "serde")]
    #[error("Invalid scene settings")]
    InvalidSettings(#[from] toml::de::Error),

    #[cfg(feature = "serde")]
    #[error("Could not serialize scene settings")]
    SerializeSettings(#[from] toml::ser::Error),
}
