//! Utilities for command handlers.

use std::io::{self, ErrorKind, Write};

/// Writer that treats a closed downstream pipe as success.
///
/// `kforge generate req.yaml | head -3` should exit quietly once `head` stops
/// reading, not fail with EPIPE.
pub struct BrokenPipeGuard<W> {
	inner: W,
}

impl<W> BrokenPipeGuard<W> {
	pub fn new(inner: W) -> Self {
		Self { inner }
	}
}

fn ignore_broken_pipe<T>(result: io::Result<T>, closed: T) -> io::Result<T> {
	match result {
		Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(closed),
		other => other,
	}
}

impl<W: Write> Write for BrokenPipeGuard<W> {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		ignore_broken_pipe(self.inner.write(buf), buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		ignore_broken_pipe(self.inner.flush(), ())
	}
}

/// Writer whose reader has gone away.
#[cfg(test)]
pub struct ClosedPipe;

#[cfg(test)]
impl Write for ClosedPipe {
	fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
		Err(io::Error::from(ErrorKind::BrokenPipe))
	}

	fn flush(&mut self) -> io::Result<()> {
		Err(io::Error::from(ErrorKind::BrokenPipe))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_broken_pipe_is_swallowed() {
		let mut writer = BrokenPipeGuard::new(ClosedPipe);
		writer.write_all(b"kind: Pod\n").unwrap();
		writer.flush().unwrap();
	}

	#[test]
	fn test_other_errors_pass_through() {
		struct Denied;
		impl Write for Denied {
			fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
				Err(io::Error::from(ErrorKind::PermissionDenied))
			}
			fn flush(&mut self) -> io::Result<()> {
				Ok(())
			}
		}

		let err = BrokenPipeGuard::new(Denied).write_all(b"x").unwrap_err();
		assert_eq!(err.kind(), ErrorKind::PermissionDenied);
	}
}
