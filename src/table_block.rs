// Table block decoder (spec §4.3). Grounded on
// `original_source/libpff/libpff_table_block.c`'s
// `libpff_table_block_read_values`/`libpff_table_block_read_index`: read the
// back-index offset, walk its boundary array, build non-overlapping slots
// rejecting any inversion. The original stores the parsed values in a
// `libpff_array_t` (`libpff_array_resize(table_block->values_array, ...)`
// around `libpff_table_block.c:504`), which is why the slots below live in
// `DynamicArray` rather than a plain `Vec`. The teacher's `table.rs` decodes
// its own (different) on-disk value layout the same way: one leading-offset
// read, then a scan building an owned sequence of `(offset, size)` pairs,
// logging the block layout as it goes.

use log::{trace, warn};

use crate::array::DynamicArray;
use crate::display;
use crate::error::{Error, Result};
use crate::range::{Range, IS_SPARSE, IS_TAINTED};

/// A `(offset, size)` pair locating one value payload within a table block,
/// relative to the block's own base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
	pub offset: u16,
	pub size: u16,
}

impl Slot {
	pub fn end(&self) -> u16 {
		self.offset + self.size
	}
}

/// An immutable, fully parsed table block: its slots plus enough of the
/// trailer layout to re-derive the original bytes for round-trip checks.
/// Slots are carried as `Range`s so a slot with no payload bytes (`IS_SPARSE`)
/// or one adjoining unaccounted trailing space before the back-index
/// (`IS_TAINTED`) can say so; a block whose own bounds checks fail is never
/// returned at all; see `DESIGN.md` for why `IS_CORRUPTED` has no producer
/// here.
#[derive(Debug, Clone)]
pub struct TableBlock {
	pub index_offset: u16,
	pub number_of_unused_index_offsets: u16,
	values: DynamicArray<Range>,
}

fn read_u16_le(bytes: &[u8], at: usize) -> Result<u16> {
	let chunk: [u8; 2] = bytes
		.get(at..at + 2)
		.ok_or_else(|| Error::OutOfBounds(format!("table_block: u16 read at {} exceeds block of size {}", at, bytes.len())))?
		.try_into()
		.unwrap();
	Ok(u16::from_le_bytes(chunk))
}

impl TableBlock {
	/// Parses `bytes` as a table block, per spec §4.3. Every bounds or
	/// ordering failure is fatal and the partial slot sequence is discarded.
	pub fn parse(bytes: &[u8]) -> Result<TableBlock> {
		let block_size = bytes.len();
		let index_offset = read_u16_le(bytes, 0)?;
		trace!(target: "pff::table_block", "index_offset = {}", index_offset);

		if index_offset == 0 {
			warn!(target: "pff::table_block", "index_offset is zero, bytes = {}", display::hex(bytes));
			return Err(Error::Corruption("table_block: index_offset is zero".to_string()));
		}
		let index_offset_usize = index_offset as usize;
		if index_offset_usize + 4 > block_size {
			return Err(Error::OutOfBounds(format!(
				"table_block: index_offset {} + 4 exceeds block of size {}",
				index_offset, block_size
			)));
		}

		let number_of_index_offsets = read_u16_le(bytes, index_offset_usize)?;
		let number_of_unused_index_offsets = read_u16_le(bytes, index_offset_usize + 2)?;
		trace!(
			target: "pff::table_block",
			"number_of_index_offsets = {}, number_of_unused_index_offsets = {}",
			number_of_index_offsets, number_of_unused_index_offsets
		);

		let n = number_of_index_offsets as usize;
		let boundary_bytes_len = (n + 1)
			.checked_mul(2)
			.ok_or_else(|| Error::OutOfBounds("table_block: boundary array length overflows".to_string()))?;
		let boundary_start = index_offset_usize + 4;
		if boundary_start
			.checked_add(boundary_bytes_len)
			.map_or(true, |end| end > block_size)
		{
			return Err(Error::OutOfBounds(format!(
				"table_block: boundary array of {} offsets starting at {} exceeds block of size {}",
				n + 1,
				boundary_start,
				block_size
			)));
		}

		let mut boundaries = Vec::with_capacity(n + 1);
		for i in 0..=n {
			boundaries.push(read_u16_le(bytes, boundary_start + i * 2)?);
		}
		trace!(target: "pff::table_block", "boundaries = {}", display::hex(&bytes[boundary_start..boundary_start + boundary_bytes_len]));

		let mut values = DynamicArray::new();
		for pair in boundaries.windows(2) {
			let (start, end) = (pair[0], pair[1]);
			if start > end {
				warn!(target: "pff::table_block", "boundary pair ({}, {}) is non-monotonic", start, end);
				return Err(Error::Corruption(format!(
					"table_block: boundary pair ({}, {}) is non-monotonic",
					start, end
				)));
			}
			let size = end - start;
			let flags = if size == 0 { IS_SPARSE } else { 0 };
			values.append_entry(Range::new(start as u64, size as u64, flags))?;
		}

		let final_end = *boundaries.last().unwrap();
		if final_end > index_offset {
			warn!(target: "pff::table_block", "final boundary {} exceeds index_offset {}", final_end, index_offset);
			return Err(Error::Corruption(format!(
				"table_block: final boundary {} exceeds index_offset {}",
				final_end, index_offset
			)));
		}
		if final_end < index_offset {
			// Dead space between the last slot and the back-index: not an
			// inversion, but worth flagging on whichever slot it trails.
			trace!(target: "pff::table_block", "{} bytes of unaccounted space before index_offset", index_offset - final_end);
			let last_index = values.len().wrapping_sub(1);
			if let Ok(Some(last)) = values.get_entry_by_index(last_index) {
				let tainted = Range::new(last.offset, last.size, last.flags() | IS_TAINTED);
				values.set_entry_by_index(last_index, Some(tainted))?;
			}
		}

		Ok(TableBlock { index_offset, number_of_unused_index_offsets, values })
	}

	/// Number of slots in the block.
	pub fn slot_count(&self) -> usize {
		self.values.number_of_entries()
	}

	/// The `index`th slot's range, flags included.
	pub fn range(&self, index: usize) -> Result<Range> {
		self.values
			.get_entry_by_index(index)?
			.copied()
			.ok_or_else(|| Error::OutOfBounds(format!("table_block: slot {} is unset", index)))
	}

	/// The `index`th slot as a plain `(offset, size)` pair, flags dropped.
	pub fn slot(&self, index: usize) -> Result<Slot> {
		let range = self.range(index)?;
		Ok(Slot { offset: range.offset as u16, size: range.size as u16 })
	}

	/// All slots in order, flags dropped. Convenience for callers that don't
	/// need per-slot `Range` flags.
	pub fn slots(&self) -> Vec<Slot> {
		self.values.iter().map(|range| Slot { offset: range.offset as u16, size: range.size as u16 }).collect()
	}

	/// Re-serialises the back-index trailer (`index_offset`'s bytes onward)
	/// that would have produced these slots, for the round-trip property in
	/// spec §8.
	pub fn reencode_trailer(&self) -> Vec<u8> {
		let slots = self.slots();
		let mut out = Vec::new();
		out.extend_from_slice(&(slots.len() as u16).to_le_bytes());
		out.extend_from_slice(&self.number_of_unused_index_offsets.to_le_bytes());
		if let Some(first) = slots.first() {
			out.extend_from_slice(&first.offset.to_le_bytes());
		} else {
			// An empty table block still carries its lone boundary value.
			out.extend_from_slice(&self.index_offset.to_le_bytes());
		}
		for slot in &slots {
			out.extend_from_slice(&slot.end().to_le_bytes());
		}
		out
	}
}
