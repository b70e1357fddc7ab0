use std::{
    io::{Cursor, Read},
    ops::Deref,
};

use crate::binary::{Error, ErrorKind, ResultContextExt, ResultMapToBinaryErrorExt};

#[derive(Debug, Clone, Copy)]
pub struct Deserializer<R> {
    stream_len: u64,
    stream_position: u64,
    stream: R,
}

impl<R> Deserializer<R> {
    pub fn stream_len(&self) -> u64 {
        self.stream_len
    }

    pub fn stream_position(&self) -> u64 {
        self.stream_position
    }

    /// Upper bound on how many bytes are left, for sizing allocations.
    pub fn remaining_hint(&self) -> usize {
        usize::try_from(self.stream_len.saturating_sub(self.stream_position)).unwrap_or(usize::MAX)
    }

    pub fn read_bytes(&mut self, out_bytes: &mut [u8]) -> Result<(), Error>
    where
        R: Read,
    {
        self.stream
            .read_exact(out_bytes)
            .map_err_to_binary_error(ErrorKind::Deserialize)
            .with_context(|| format!("at stream position {:08x}", self.stream_position))?;
        self.stream_position += out_bytes.len() as u64;
        Ok(())
    }
}

impl<T> Deserializer<Cursor<T>>
where
    T: Deref<Target = [u8]>,
{
    pub fn from_buffer(buffer: T) -> Self {
        Self::from(Cursor::new(buffer))
    }
}

impl<T> From<Cursor<T>> for Deserializer<Cursor<T>>
where
    T: Deref<Target = [u8]>,
{
    fn from(cursor: Cursor<T>) -> Self {
        Self {
            stream_len: cursor.get_ref().len() as u64,
            stream_position: cursor.position(),
            stream: cursor,
        }
    }
}
