//! Consumers of tailed output.

use std::io::{self, Write};

/// Receives the ordered chunks produced by a tail loop.
pub trait TailSink {
    /// Accepts one chunk.
    ///
    /// # Errors
    ///
    /// Returns the I/O error that prevented the chunk from being written.
    fn emit(&mut self, chunk: &str) -> io::Result<()>;
}

impl<S: TailSink + ?Sized> TailSink for &mut S {
    fn emit(&mut self, chunk: &str) -> io::Result<()> {
        (**self).emit(chunk)
    }
}

impl TailSink for Vec<String> {
    fn emit(&mut self, chunk: &str) -> io::Result<()> {
        self.push(chunk.to_owned());
        Ok(())
    }
}

/// Adapts any writer, flushing after each chunk.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    /// Wraps `writer`.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TailSink for WriterSink<W> {
    fn emit(&mut self, chunk: &str) -> io::Result<()> {
        self.writer.write_all(chunk.as_bytes())?;
        self.writer.flush()
    }
}

/// Default consumer writing to standard output.
#[must_use]
pub fn stdout_sink() -> WriterSink<io::Stdout> {
    WriterSink::new(io::stdout())
}
