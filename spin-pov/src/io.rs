use std::{
    fmt,
    io,
};

/// Adapter from io::Write to fmt::Write that keeps the error
///
/// The scene and frame writers format into any [`fmt::Write`], so tests can
/// capture their output in a [`String`]. Files go through this adapter.
pub struct FmtWriter<W> {
    writer: W,
    error: Result<(), io::Error>,
}

impl<W> FmtWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: Ok(()),
        }
    }

    pub fn take_io_error(&mut self) -> Result<(), io::Error> {
        std::mem::replace(&mut self.error, Ok(()))
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> fmt::Write for FmtWriter<W>
where
    W: io::Write,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match self.writer.write_all(s.as_bytes()) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.error = Err(e);
                Err(fmt::Error)
            }
        }
    }
}

/// Runs `f` against `writer` and hands the writer back.
///
/// If `f` fails, the [`io::Error`] that caused it is returned. A formatting
/// error that didn't originate in `writer` becomes an [`io::Error`] of kind
/// [`io::ErrorKind::Other`].
pub fn write_with<W, F>(writer: W, f: F) -> Result<W, io::Error>
where
    W: io::Write,
    F: FnOnce(&mut FmtWriter<W>) -> fmt::Result,
{
    let mut fmt_writer = FmtWriter::new(writer);

    if f(&mut fmt_writer).is_err() {
        fmt_writer.take_io_error()?;
        return Err(io::Error::other("formatter error"));
    }

    Ok(fmt_writer.into_inner())
}
