use std::io;
use std::time::Duration;

use term_input::FdReader;

/// A byte stream that can be read with a bounded wait.
///
/// `Ok(None)` means nothing arrived within `timeout`; end of stream is
/// reported as an `UnexpectedEof` error.
pub trait ByteSource {
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>>;
}

impl ByteSource for FdReader {
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        FdReader::read_byte(self, timeout)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        (**self).read_byte(timeout)
    }
}
