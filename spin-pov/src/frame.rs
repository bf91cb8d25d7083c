use std::{
    collections::HashSet,
    fmt,
    fs::File,
    io::BufWriter,
    path::{
        Path,
        PathBuf,
    },
};

#[cfg(feature = "rayon")]
use rayon::iter::{
    IntoParallelRefIterator,
    ParallelIterator,
};

use crate::{
    Error,
    color::{
        FixedColor,
        SpinColor,
    },
    io::write_with,
    naming::frame_file_name,
    snapshot::{
        Atom,
        Snapshot,
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Report when a file is completely written.
    pub verbose: bool,
}

/// One frame of a batch export.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub id: u32,
    pub snapshot: Snapshot<'a>,
}

/// Writes per-frame include files with one `spinm<N>(...)` macro call per
/// atom.
#[derive(Clone, Debug, Default)]
pub struct FrameExporter<C = FixedColor> {
    color: C,
    options: ExportOptions,
}

impl FrameExporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C> FrameExporter<C> {
    pub fn with_color<D>(self, color: D) -> FrameExporter<D> {
        FrameExporter {
            color,
            options: self.options,
        }
    }

    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }
}

impl<C> FrameExporter<C>
where
    C: SpinColor,
{
    /// Writes one line per atom, e.g. `spinm0(0,0,0,0,0,1,0,0,1)`
    pub fn write_frame<W>(&self, snapshot: &Snapshot<'_>, out: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        for atom in snapshot.atoms() {
            self.write_atom(&atom, out)?;
        }
        Ok(())
    }

    pub fn write_atom<W>(&self, atom: &Atom, out: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        let [px, py, pz]: [f64; 3] = atom.position.coords.into();
        let [sx, sy, sz]: [f64; 3] = atom.spin.into();
        let (red, green, blue) = self.color.spin_color(&atom.spin).into_components();

        writeln!(
            out,
            "spinm{}({px},{py},{pz},{sx},{sy},{sz},{red},{green},{blue})",
            atom.material
        )
    }

    /// Writes the include file for `frame_id` into `dir`, replacing any
    /// existing file.
    pub fn export_frame(
        &self,
        dir: impl AsRef<Path>,
        frame_id: u32,
        snapshot: &Snapshot<'_>,
    ) -> Result<PathBuf, Error> {
        let path = dir.as_ref().join(frame_file_name(frame_id));
        tracing::info!(path = %path.display(), num_atoms = snapshot.num_atoms(), "Writing povray file");

        let writer = BufWriter::new(File::create(&path)?);
        let writer = write_with(writer, |out| self.write_frame(snapshot, out))?;
        writer.into_inner().map_err(|error| error.into_error())?;

        if self.options.verbose {
            tracing::info!(path = %path.display(), "done!");
        }
        else {
            tracing::debug!(path = %path.display(), "done!");
        }

        Ok(path)
    }
}

impl<C> FrameExporter<C>
where
    C: SpinColor + Sync,
{
    /// Exports a batch of frames. Frame ids must be distinct, since each one
    /// names its own file.
    ///
    /// With the `rayon` feature the files are written in parallel.
    pub fn export_frames(
        &self,
        dir: impl AsRef<Path>,
        frames: &[Frame<'_>],
    ) -> Result<Vec<PathBuf>, Error> {
        let dir = dir.as_ref();

        let mut seen = HashSet::with_capacity(frames.len());
        if let Some(frame) = frames.iter().find(|frame| !seen.insert(frame.id)) {
            return Err(Error::DuplicateFrame { frame_id: frame.id });
        }

        #[cfg(feature = "rayon")]
        let paths = frames
            .par_iter()
            .map(|frame| self.export_frame(dir, frame.id, &frame.snapshot))
            .collect();

        #[cfg(not(feature = "rayon"))]
        let paths = frames
            .iter()
            .map(|frame| self.export_frame(dir, frame.id, &frame.snapshot))
            .collect();

        paths
    }
}
