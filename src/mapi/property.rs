// MAPI property dispatcher: `(entry_type, value_type)` plus raw bytes to a
// typed value (spec §2's data-flow paragraph, §4.5's dispatch table).
// Scalar value-type codes below are the standard MAPI property types
// (`PT_BOOLEAN`, `PT_LONG`, ...); grounded on the dispatch-by-type-code
// shape of `original_source/libpff/libpff_debug.c`'s value printer, which
// switches on the same codes before formatting a value for display.

use log::trace;

use crate::byte_stream::{read_guid_le, Guid};
use crate::error::{Error, Result};
use crate::name_to_id::{self, NameToIdValue};
use crate::one_off::{self, OneOff};
use crate::options::Options;
use crate::string_bridge;

const PT_I2: u32 = 0x0002;
const PT_LONG: u32 = 0x0003;
const PT_DOUBLE: u32 = 0x0005;
const PT_BOOLEAN: u32 = 0x000b;
const PT_I8: u32 = 0x0014;
const PT_STRING8: u32 = 0x001e;
const PT_UNICODE: u32 = 0x001f;
const PT_CLSID: u32 = 0x0048;
const PT_BINARY: u32 = 0x0102;

/// What kind of specialised decoding, if any, a `PT_BINARY` value's bytes
/// need before they can be surfaced as a typed value. This is the tag the
/// containing property set supplies alongside `(entry_type, value_type)`
/// (spec §2): the dispatcher cannot tell a one-off identifier or a
/// name-to-id entry apart from a plain binary blob by shape alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composite {
	None,
	NameToId,
	OneOff,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
	Boolean(bool),
	I16(i16),
	I32(i32),
	I64(i64),
	F64(f64),
	Utf8String(String),
	Binary(Vec<u8>),
	ClassId(Guid),
	NameToId(NameToIdValue),
	OneOff(OneOff),
}

fn fixed<const N: usize>(bytes: &[u8], what: &str) -> Result<[u8; N]> {
	bytes
		.get(0..N)
		.ok_or_else(|| Error::OutOfBounds(format!("mapi::property: {} needs {} bytes, got {}", what, N, bytes.len())))?
		.try_into()
		.map_err(|_| Error::OutOfBounds(format!("mapi::property: {} slice conversion failed", what)))
}

/// Dispatches one `(entry_type, value_type)`-tagged value to its typed
/// form. `composite` steers `PT_BINARY` values toward the one-off or
/// name-to-id decoders; `entry_type` is otherwise only consulted by those
/// decoders themselves (per §4.5's own dispatch on `entry_type`).
pub fn dispatch(entry_type: u32, value_type: u32, bytes: &[u8], composite: Composite, options: &Options) -> Result<PropertyValue> {
	trace!(target: "pff::mapi::property", "entry_type = 0x{:04x}, value_type = 0x{:04x}, composite = {:?}, {} bytes", entry_type, value_type, composite, bytes.len());
	match value_type {
		PT_BOOLEAN => {
			let byte = *bytes.first().ok_or_else(|| Error::OutOfBounds("mapi::property: PT_BOOLEAN needs 1 byte".to_string()))?;
			Ok(PropertyValue::Boolean(byte != 0))
		}
		PT_I2 => Ok(PropertyValue::I16(i16::from_le_bytes(fixed(bytes, "PT_I2")?))),
		PT_LONG => Ok(PropertyValue::I32(i32::from_le_bytes(fixed(bytes, "PT_LONG")?))),
		PT_I8 => Ok(PropertyValue::I64(i64::from_le_bytes(fixed(bytes, "PT_I8")?))),
		PT_DOUBLE => Ok(PropertyValue::F64(f64::from_le_bytes(fixed(bytes, "PT_DOUBLE")?))),
		PT_STRING8 => Ok(PropertyValue::Utf8String(string_bridge::codepage_bytes_to_utf8(
			bytes,
			options.default_codepage,
			options.surrogate_policy,
		)?)),
		PT_UNICODE => Ok(PropertyValue::Utf8String(string_bridge::utf16le_bytes_to_utf8(bytes, options.surrogate_policy)?)),
		PT_CLSID => Ok(PropertyValue::ClassId(read_guid_le(&fixed(bytes, "PT_CLSID")?))),
		PT_BINARY => match composite {
			Composite::NameToId => Ok(PropertyValue::NameToId(name_to_id::decode(entry_type, value_type, bytes)?)),
			Composite::OneOff => Ok(PropertyValue::OneOff(one_off::OneOff::parse(bytes)?)),
			Composite::None => Ok(PropertyValue::Binary(bytes.to_vec())),
		},
		_ => Err(Error::Unsupported(format!("mapi::property: unrecognised value_type 0x{:04x} for entry_type 0x{:04x}", value_type, entry_type))),
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn options() -> Options {
		Options::default()
	}

	#[test]
	fn dispatches_scalars() {
		assert_eq!(dispatch(0, PT_BOOLEAN, &[1], Composite::None, &options()).unwrap(), PropertyValue::Boolean(true));
		assert_eq!(dispatch(0, PT_I2, &7i16.to_le_bytes(), Composite::None, &options()).unwrap(), PropertyValue::I16(7));
		assert_eq!(dispatch(0, PT_LONG, &(-5i32).to_le_bytes(), Composite::None, &options()).unwrap(), PropertyValue::I32(-5));
		assert_eq!(dispatch(0, PT_I8, &42i64.to_le_bytes(), Composite::None, &options()).unwrap(), PropertyValue::I64(42));
	}

	#[test]
	fn dispatches_unicode_string() {
		let bytes = [0x41, 0x00, 0x00, 0x00]; // "A\0" UTF-16LE
		let value = dispatch(0, PT_UNICODE, &bytes, Composite::None, &options()).unwrap();
		assert_eq!(value, PropertyValue::Utf8String("A\u{0}".to_string()));
	}

	#[test]
	fn dispatches_binary_without_composite_hint_as_opaque() {
		let bytes = vec![1, 2, 3, 4];
		let value = dispatch(0x0002, PT_BINARY, &bytes, Composite::None, &options()).unwrap();
		assert_eq!(value, PropertyValue::Binary(bytes));
	}

	#[test]
	fn dispatches_binary_as_name_to_id_when_tagged() {
		let mut bytes = vec![0u8; 16];
		bytes[0] = 0xAA;
		let value = dispatch(0x0002, PT_BINARY, &bytes, Composite::NameToId, &options()).unwrap();
		assert!(matches!(value, PropertyValue::NameToId(NameToIdValue::ClassIdList(_))));
	}

	#[test]
	fn dispatches_binary_as_one_off_when_tagged() {
		let bytes = [0x00, 0x00, 0x00, 0x00, b'A', 0x00, b'B', 0x00, b'C', 0x00];
		let value = dispatch(0, PT_BINARY, &bytes, Composite::OneOff, &options()).unwrap();
		assert!(matches!(value, PropertyValue::OneOff(_)));
	}

	#[test]
	fn pt_unicode_respects_strict_surrogate_policy() {
		let bytes = [0x00, 0xd8]; // lone high surrogate, no pairing low surrogate
		let lossy = Options { surrogate_policy: crate::options::SurrogatePolicy::Lossy, ..Options::default() };
		let strict = Options { surrogate_policy: crate::options::SurrogatePolicy::Strict, ..Options::default() };
		assert!(dispatch(0, PT_UNICODE, &bytes, Composite::None, &lossy).is_ok());
		assert!(matches!(dispatch(0, PT_UNICODE, &bytes, Composite::None, &strict), Err(Error::Unsupported(_))));
	}

	#[test]
	fn rejects_unrecognised_value_type() {
		assert!(matches!(dispatch(0, 0x9999, &[], Composite::None, &options()), Err(Error::Unsupported(_))));
	}
}
