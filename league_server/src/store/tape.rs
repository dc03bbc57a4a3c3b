//! Writer that replaces the whole content of its handle on every write.

use std::fs::File;
use std::io::{self, Cursor, Seek, SeekFrom, Write};

/// Handles that can be cut back to zero length.
pub trait Truncate {
    fn truncate(&mut self) -> io::Result<()>;

    /// Push written data down to durable storage, where that means anything.
    fn sync(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Truncate for File {
    fn truncate(&mut self) -> io::Result<()> {
        self.set_len(0)
    }

    fn sync(&mut self) -> io::Result<()> {
        self.sync_data()
    }
}

impl Truncate for Cursor<Vec<u8>> {
    fn truncate(&mut self) -> io::Result<()> {
        self.get_mut().clear();
        Ok(())
    }
}

/// A write sink where every `write` overwrites everything written before it.
///
/// The handle is truncated and rewound before the bytes go out, so a single
/// `write` call always leaves exactly `buf` behind. Encode into a buffer first
/// and hand the finished buffer over in one call; streaming an encoder into a
/// `Tape` would keep only the last chunk.
#[derive(Debug)]
pub struct Tape<F> {
    file: F,
}

impl<F> Tape<F>
where
    F: Write + Seek + Truncate,
{
    pub fn new(file: F) -> Self {
        Self { file }
    }

    pub fn sync(&mut self) -> io::Result<()> {
        self.file.sync()
    }

    pub fn get_ref(&self) -> &F {
        &self.file
    }

    pub fn get_mut(&mut self) -> &mut F {
        &mut self.file
    }

    pub fn into_inner(self) -> F {
        self.file
    }
}

impl<F> Write for Tape<F>
where
    F: Write + Seek + Truncate,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.truncate()?;
        self.file.seek(SeekFrom::Start(0))?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
