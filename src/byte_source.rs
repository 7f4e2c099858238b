// The byte source is consumed, not defined, by the core per spec §6 — a
// file-backed, paged implementation is an external collaborator. This module
// gives the trait a concrete shape plus the in-memory implementation the
// rest of this crate's tests (and any caller who has already buffered a
// block) use directly.

use crate::error::{Error, Result};

/// Pure input: total size, and random-access reads with a well-defined
/// end-of-stream error. No write path, matching the crate's read-only scope.
pub trait ByteSource {
	fn size(&self) -> u64;

	/// Fills `buf` entirely from `offset`, or fails with
	/// `Error::OutOfBounds` if the source is shorter than `offset + buf.len()`.
	fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()>;
}

/// A `ByteSource` over an in-memory buffer.
pub struct SliceSource<'a> {
	bytes: &'a [u8],
}

impl<'a> SliceSource<'a> {
	pub fn new(bytes: &'a [u8]) -> Self {
		SliceSource { bytes }
	}
}

impl<'a> ByteSource for SliceSource<'a> {
	fn size(&self) -> u64 {
		self.bytes.len() as u64
	}

	fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
		let start = usize::try_from(offset)
			.map_err(|_| Error::OutOfBounds(format!("SliceSource::read_at: offset {} overflows usize", offset)))?;
		let end = start.checked_add(buf.len()).ok_or_else(|| {
			Error::OutOfBounds(format!("SliceSource::read_at: offset {} + len {} overflows", start, buf.len()))
		})?;
		let slice = self
			.bytes
			.get(start..end)
			.ok_or_else(|| Error::OutOfBounds(format!("SliceSource::read_at: range {}..{} exceeds source of size {}", start, end, self.bytes.len())))?;
		buf.copy_from_slice(slice);
		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn reads_in_bounds() {
		let source = SliceSource::new(&[1, 2, 3, 4, 5]);
		assert_eq!(source.size(), 5);
		let mut buf = [0u8; 3];
		source.read_at(1, &mut buf).unwrap();
		assert_eq!(buf, [2, 3, 4]);
	}

	#[test]
	fn rejects_out_of_bounds_reads() {
		let source = SliceSource::new(&[1, 2, 3]);
		let mut buf = [0u8; 2];
		assert!(matches!(source.read_at(2, &mut buf), Err(Error::OutOfBounds(_))));
	}
}
