// Name-to-id map value decoder (spec §4.5). Grounded on
// `original_source/libpff/libpff_debug.c`'s name-to-id map value printer,
// which switches on `(entry_type, value_type)` the same way, and on
// `libfmapi_class_identifier`-style GUID-array decoding for the class-ID
// list case. `verify_crc32` rides the `crc32fast` dependency the teacher
// already pulls in for its own checksum verification in `table.rs`.

use log::{debug, trace};

use crate::byte_stream::{read_guid_le, Guid};
use crate::display;
use crate::error::{Error, Result};
use crate::list::OrderedList;

const VALUE_TYPE_MULTI_BINARY: u32 = 0x0102;
const ENTRY_TYPE_BUCKET_COUNT: u32 = 0x0001;
const VALUE_TYPE_BUCKET_COUNT: u32 = 0x0003;
const ENTRY_TYPE_CLASS_ID_LIST: u32 = 0x0002;
const ENTRY_TYPE_ENTRY_LIST: u32 = 0x0003;
const ENTRY_TYPE_VALIDATION_THRESHOLD: u32 = 0x1000;

/// One binding in an entry or validation list: `(value_or_reference,
/// type_and_flags, number)`, spec §6's name-to-id entry layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
	pub value_or_reference: u32,
	pub type_and_flags: u16,
	pub number: u16,
}

impl Entry {
	/// Bit 0 of `type_and_flags`: true means `value_or_reference` points
	/// into a string pool rather than holding an immediate value (entry
	/// lists), or means the slot holds a crc rather than a value
	/// (validation lists).
	pub fn is_reference_or_crc(&self) -> bool {
		self.type_and_flags & 0x0001 != 0
	}
}

/// A decoded name-to-id map value (spec §3). The class-id/entry/validation
/// lists are built as `OrderedList`s rather than `Vec`s: libpff threads the
/// same bindings through its own list type (`libfmapi_class_identifier`'s
/// GUID array walk, `libpff_debug.c`'s entry walk) on the way to the debug
/// printer this module is grounded on.
#[derive(Debug, Clone, PartialEq)]
pub enum NameToIdValue {
	BucketCount(u32),
	ClassIdList(OrderedList<Guid>),
	EntryList(OrderedList<Entry>),
	ValidationList(OrderedList<Entry>),
	/// Anything not matching a recognised `(entry_type, value_type)` shape,
	/// or a recognised shape whose length fails the size-modulus check.
	Opaque(Vec<u8>),
}

fn parse_guids(bytes: &[u8]) -> Result<OrderedList<Guid>> {
	let mut list = OrderedList::new();
	for chunk in bytes.chunks_exact(16) {
		list.append(read_guid_le(chunk.try_into().unwrap()))?;
	}
	Ok(list)
}

fn parse_entries(bytes: &[u8]) -> Result<OrderedList<Entry>> {
	let mut list = OrderedList::new();
	for chunk in bytes.chunks_exact(8) {
		list.append(Entry {
			value_or_reference: u32::from_le_bytes(chunk[0..4].try_into().unwrap()),
			type_and_flags: u16::from_le_bytes(chunk[4..6].try_into().unwrap()),
			number: u16::from_le_bytes(chunk[6..8].try_into().unwrap()),
		})?;
	}
	Ok(list)
}

/// Decodes one name-to-id map value, per the dispatch table in spec §4.5.
pub fn decode(entry_type: u32, value_type: u32, bytes: &[u8]) -> Result<NameToIdValue> {
	trace!(target: "pff::name_to_id", "entry_type = 0x{:04x}, value_type = 0x{:04x}, bytes = {}", entry_type, value_type, display::hex(bytes));

	if value_type != VALUE_TYPE_MULTI_BINARY {
		if entry_type == ENTRY_TYPE_BUCKET_COUNT && value_type == VALUE_TYPE_BUCKET_COUNT {
			let chunk: [u8; 4] = bytes
				.get(0..4)
				.ok_or_else(|| Error::OutOfBounds(format!("name_to_id: bucket count needs 4 bytes, got {}", bytes.len())))?
				.try_into()
				.unwrap();
			return Ok(NameToIdValue::BucketCount(u32::from_le_bytes(chunk)));
		}
		debug!(target: "pff::name_to_id", "entry_type 0x{:04x}/value_type 0x{:04x} doesn't match a recognised shape, treating as opaque", entry_type, value_type);
		return Ok(NameToIdValue::Opaque(bytes.to_vec()));
	}

	match entry_type {
		ENTRY_TYPE_CLASS_ID_LIST => {
			if bytes.len() % 16 == 0 {
				Ok(NameToIdValue::ClassIdList(parse_guids(bytes)?))
			} else {
				debug!(target: "pff::name_to_id", "class-id list length {} is not a multiple of 16, rejecting as opaque", bytes.len());
				Ok(NameToIdValue::Opaque(bytes.to_vec()))
			}
		}
		ENTRY_TYPE_ENTRY_LIST => {
			if bytes.len() % 8 == 0 {
				Ok(NameToIdValue::EntryList(parse_entries(bytes)?))
			} else {
				debug!(target: "pff::name_to_id", "entry list length {} is not a multiple of 8, rejecting as opaque", bytes.len());
				Ok(NameToIdValue::Opaque(bytes.to_vec()))
			}
		}
		_ if entry_type >= ENTRY_TYPE_VALIDATION_THRESHOLD => {
			if bytes.len() % 8 == 0 {
				Ok(NameToIdValue::ValidationList(parse_entries(bytes)?))
			} else {
				debug!(target: "pff::name_to_id", "validation list length {} is not a multiple of 8, rejecting as opaque", bytes.len());
				Ok(NameToIdValue::Opaque(bytes.to_vec()))
			}
		}
		_ => Ok(NameToIdValue::Opaque(bytes.to_vec())),
	}
}

/// Verifies `data` against an expected CRC-32 (IEEE polynomial), as used by
/// validation-list entries whose `type_and_flags` selects the crc variant.
pub fn verify_crc32(expected: u32, data: &[u8]) -> bool {
	crc32fast::hash(data) == expected
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn decodes_bucket_count() {
		let bytes = 42u32.to_le_bytes();
		let value = decode(ENTRY_TYPE_BUCKET_COUNT, VALUE_TYPE_BUCKET_COUNT, &bytes).unwrap();
		assert_eq!(value, NameToIdValue::BucketCount(42));
	}

	#[test]
	fn decodes_class_id_list_of_two_guids() {
		let mut bytes = vec![0u8; 32];
		bytes[0] = 0x01;
		bytes[16] = 0x02;
		let value = decode(ENTRY_TYPE_CLASS_ID_LIST, VALUE_TYPE_MULTI_BINARY, &bytes).unwrap();
		match value {
			NameToIdValue::ClassIdList(guids) => {
				assert_eq!(guids.len(), 2);
				assert_eq!(guids.get_by_index(0).unwrap().data1, 0x01);
				assert_eq!(guids.get_by_index(1).unwrap().data1, 0x02);
			}
			other => panic!("expected ClassIdList, got {:?}", other),
		}
	}

	#[test]
	fn class_id_list_with_bad_length_is_opaque() {
		let bytes = vec![0u8; 31];
		let value = decode(ENTRY_TYPE_CLASS_ID_LIST, VALUE_TYPE_MULTI_BINARY, &bytes).unwrap();
		assert_eq!(value, NameToIdValue::Opaque(bytes));
	}

	#[test]
	fn decodes_entry_list() {
		let mut bytes = vec![0u8; 16];
		bytes[0..4].copy_from_slice(&0x1234u32.to_le_bytes());
		bytes[4..6].copy_from_slice(&0x0001u16.to_le_bytes());
		bytes[6..8].copy_from_slice(&7u16.to_le_bytes());
		let value = decode(ENTRY_TYPE_ENTRY_LIST, VALUE_TYPE_MULTI_BINARY, &bytes).unwrap();
		match value {
			NameToIdValue::EntryList(entries) => {
				assert_eq!(entries.len(), 2);
				assert_eq!(entries.get_by_index(0).unwrap().value_or_reference, 0x1234);
				assert!(entries.get_by_index(0).unwrap().is_reference_or_crc());
			}
			other => panic!("expected EntryList, got {:?}", other),
		}
	}

	#[test]
	fn decodes_validation_list_for_high_entry_types() {
		let bytes = vec![0u8; 8];
		let value = decode(0x1001, VALUE_TYPE_MULTI_BINARY, &bytes).unwrap();
		assert!(matches!(value, NameToIdValue::ValidationList(_)));
	}

	#[test]
	fn unrecognised_shape_is_opaque() {
		let bytes = vec![1, 2, 3];
		let value = decode(0x0099, VALUE_TYPE_MULTI_BINARY, &bytes).unwrap();
		assert_eq!(value, NameToIdValue::Opaque(bytes));
	}

	#[test]
	fn crc32_round_trips() {
		let data = b"name-to-id map payload";
		let crc = crc32fast::hash(data);
		assert!(verify_crc32(crc, data));
		assert!(!verify_crc32(crc.wrapping_add(1), data));
	}
}
