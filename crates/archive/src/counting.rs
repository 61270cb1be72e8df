use std::io::{self, Read};

/// Reader adapter that counts bytes and remembers whether the source
/// itself failed, so read failures can be told apart from write failures
/// surfacing through the same `io::Error` channel.
#[derive(Debug)]
pub(crate) struct CountingReader<R> {
    inner: R,
    bytes: u64,
    failed: bool,
}

impl<R: Read> CountingReader<R> {
    pub(crate) const fn new(inner: R) -> Self {
        Self {
            inner,
            bytes: 0,
            failed: false,
        }
    }

    pub(crate) const fn bytes_read(&self) -> u64 {
        self.bytes
    }

    pub(crate) const fn failed(&self) -> bool {
        self.failed
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner.read(buf) {
            Ok(read) => {
                self.bytes = self.bytes.saturating_add(read as u64);
                Ok(read)
            }
            Err(error) => {
                if error.kind() != io::ErrorKind::Interrupted {
                    self.failed = true;
                }
                Err(error)
            }
        }
    }
}
