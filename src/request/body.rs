use std::io::{self, Cursor, Read};

/// Fully buffered request body exposed as a readable stream.
#[derive(Debug, Default)]
pub struct RequestBody {
    inner: Cursor<Vec<u8>>,
}

impl RequestBody {
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            inner: Cursor::new(bytes),
        }
    }

    /// Total length of the body, independent of how much has been read.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.get_ref()
    }

    /// Returns the whole body, including any part already read.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.inner.into_inner()
    }
}

impl Read for RequestBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}
