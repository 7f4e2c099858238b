// Codepage and UTF-16 stream conversions (spec §4.6). The codepage tables
// live in `codepages`; this module turns them (plus UTF-16's surrogate-pair
// rules) into the decode/encode entry points the one-off and MAPI property
// decoders call through.
//
// `size_from`/`copy_from` pairs are required to agree for the same input
// (spec §8); here they share one underlying conversion rather than
// duplicating the walk, so agreement holds by construction.

pub mod codepages;

use crate::error::{Error, Result};
use crate::options::{Codepage, SurrogatePolicy};

const REPLACEMENT_CHARACTER: char = '\u{fffd}';

fn high_surrogate(unit: u16) -> bool {
	(0xd800..=0xdbff).contains(&unit)
}

fn low_surrogate(unit: u16) -> bool {
	(0xdc00..=0xdfff).contains(&unit)
}

/// Splits a little-endian UTF-16 byte stream into code units. `bytes` must
/// have even length.
pub fn utf16_units_from_le_bytes(bytes: &[u8]) -> Result<Vec<u16>> {
	if bytes.len() % 2 != 0 {
		return Err(Error::InvalidArgument(format!("string_bridge: UTF-16 byte stream has odd length {}", bytes.len())));
	}
	Ok(bytes.chunks_exact(2).map(|pair| u16::from_le_bytes([pair[0], pair[1]])).collect())
}

fn le_bytes_from_utf16_units(units: &[u16]) -> Vec<u8> {
	let mut out = Vec::with_capacity(units.len() * 2);
	for unit in units {
		out.extend_from_slice(&unit.to_le_bytes());
	}
	out
}

/// Decodes a UTF-16 code-unit sequence to UTF-8, handling surrogate pairs
/// per `policy`.
pub fn utf8_from_utf16_units(units: &[u16], policy: SurrogatePolicy) -> Result<String> {
	let mut out = String::with_capacity(units.len());
	let mut i = 0;
	while i < units.len() {
		let unit = units[i];
		if high_surrogate(unit) {
			if let Some(&next) = units.get(i + 1) {
				if low_surrogate(next) {
					let scalar = 0x10000 + ((unit as u32 - 0xd800) << 10) + (next as u32 - 0xdc00);
					out.push(char::from_u32(scalar).expect("valid surrogate pair yields a valid scalar value"));
					i += 2;
					continue;
				}
			}
			match policy {
				SurrogatePolicy::Lossy => out.push(REPLACEMENT_CHARACTER),
				SurrogatePolicy::Strict => return Err(Error::Unsupported(format!("string_bridge: unpaired high surrogate 0x{:04x}", unit))),
			}
			i += 1;
		} else if low_surrogate(unit) {
			match policy {
				SurrogatePolicy::Lossy => out.push(REPLACEMENT_CHARACTER),
				SurrogatePolicy::Strict => return Err(Error::Unsupported(format!("string_bridge: unpaired low surrogate 0x{:04x}", unit))),
			}
			i += 1;
		} else {
			out.push(char::from_u32(unit as u32).expect("non-surrogate code unit is a valid scalar value"));
			i += 1;
		}
	}
	Ok(out)
}

/// Encodes a UTF-8 string to UTF-16 code units. Always succeeds: UTF-16
/// covers every Unicode scalar value, surrogate pairs included.
pub fn utf16_units_from_utf8(s: &str) -> Vec<u16> {
	s.encode_utf16().collect()
}

/// Decodes a little-endian UTF-16 byte stream directly to UTF-8, honouring
/// `policy` for unpaired surrogates (spec §4.6).
pub fn utf16le_bytes_to_utf8(bytes: &[u8], policy: SurrogatePolicy) -> Result<String> {
	let units = utf16_units_from_le_bytes(bytes)?;
	utf8_from_utf16_units(&units, policy)
}

/// Decodes a little-endian UTF-16 byte stream to its code units, without
/// collapsing surrogate pairs.
pub fn utf16le_bytes_to_utf16_units(bytes: &[u8]) -> Result<Vec<u16>> {
	utf16_units_from_le_bytes(bytes)
}

/// Encodes a UTF-8 string to little-endian UTF-16 bytes.
pub fn utf8_to_utf16le_bytes(s: &str) -> Vec<u8> {
	le_bytes_from_utf16_units(&utf16_units_from_utf8(s))
}

/// Decodes a single-byte codepage stream to UTF-8. A byte the codepage table
/// has no mapping for (signalled by its `0xfffd` sentinel) substitutes the
/// replacement character under `Lossy`, or is fatal under `Strict` (spec §4.6).
pub fn codepage_bytes_to_utf8(bytes: &[u8], codepage: Codepage, policy: SurrogatePolicy) -> Result<String> {
	let units = codepage_bytes_to_utf16_units(bytes, codepage, policy)?;
	utf8_from_utf16_units(&units, policy)
}

/// Decodes a single-byte codepage stream to UTF-16 code units (each byte
/// widened through the codepage table; single-byte codepages never produce
/// surrogate pairs). Same unmappable-byte handling as `codepage_bytes_to_utf8`.
pub fn codepage_bytes_to_utf16_units(bytes: &[u8], codepage: Codepage, policy: SurrogatePolicy) -> Result<Vec<u16>> {
	let mut out = Vec::with_capacity(bytes.len());
	for &byte in bytes {
		let code_point = codepages::decode_byte(codepage, byte);
		if code_point == REPLACEMENT_CHARACTER as u16 && policy == SurrogatePolicy::Strict {
			return Err(Error::Unsupported(format!("string_bridge: byte 0x{:02x} has no mapping in {:?}", byte, codepage)));
		}
		out.push(code_point);
	}
	Ok(out)
}

/// Encodes a UTF-8 string to codepage bytes. Code points outside the
/// codepage's coverage (including anything beyond the BMP) substitute
/// `0x1a` under `SurrogatePolicy::Lossy`, or fail under `Strict`.
pub fn codepage_bytes_from_utf8(s: &str, codepage: Codepage, policy: SurrogatePolicy) -> Result<Vec<u8>> {
	let mut out = Vec::with_capacity(s.len());
	for ch in s.chars() {
		let scalar = ch as u32;
		let mapped = u16::try_from(scalar).ok().and_then(|code_point| codepages::encode_char(codepage, code_point));
		match mapped {
			Some(byte) => out.push(byte),
			None => match policy {
				SurrogatePolicy::Lossy => out.push(codepages::ASCII_SUBSTITUTE),
				SurrogatePolicy::Strict => return Err(Error::Unsupported(format!("string_bridge: code point U+{:06x} is not representable in {:?}", scalar, codepage))),
			},
		}
	}
	Ok(out)
}

/// Number of UTF-8 bytes `codepage_bytes_to_utf8` would produce for `bytes`.
pub fn size_from_codepage_to_utf8(bytes: &[u8], codepage: Codepage, policy: SurrogatePolicy) -> Result<usize> {
	Ok(codepage_bytes_to_utf8(bytes, codepage, policy)?.len())
}

/// Writes the UTF-8 conversion of `bytes` into `out`, returning the number
/// of bytes written. Always equal to `size_from_codepage_to_utf8` for the
/// same input, since both go through the same conversion.
pub fn copy_from_codepage_to_utf8(bytes: &[u8], codepage: Codepage, policy: SurrogatePolicy, out: &mut Vec<u8>) -> Result<usize> {
	let decoded = codepage_bytes_to_utf8(bytes, codepage, policy)?;
	out.extend_from_slice(decoded.as_bytes());
	Ok(decoded.len())
}

/// Number of UTF-8 bytes `utf16le_bytes_to_utf8` would produce for `bytes`.
pub fn size_from_utf16le_to_utf8(bytes: &[u8], policy: SurrogatePolicy) -> Result<usize> {
	Ok(utf16le_bytes_to_utf8(bytes, policy)?.len())
}

/// Writes the UTF-8 conversion of a little-endian UTF-16 stream into `out`,
/// returning the number of bytes written.
pub fn copy_from_utf16le_to_utf8(bytes: &[u8], policy: SurrogatePolicy, out: &mut Vec<u8>) -> Result<usize> {
	let decoded = utf16le_bytes_to_utf8(bytes, policy)?;
	out.extend_from_slice(decoded.as_bytes());
	Ok(decoded.len())
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn utf16_round_trips_bmp_text() {
		let units = utf16_units_from_utf8("hello");
		let back = utf8_from_utf16_units(&units, SurrogatePolicy::Strict).unwrap();
		assert_eq!(back, "hello");
	}

	#[test]
	fn utf16_round_trips_astral_character() {
		let text = "\u{1f600}"; // outside the BMP, requires a surrogate pair
		let units = utf16_units_from_utf8(text);
		assert_eq!(units.len(), 2);
		let back = utf8_from_utf16_units(&units, SurrogatePolicy::Strict).unwrap();
		assert_eq!(back, text);
	}

	#[test]
	fn unpaired_high_surrogate_is_lossy_replaced() {
		let units = [0xd800];
		let decoded = utf8_from_utf16_units(&units, SurrogatePolicy::Lossy).unwrap();
		assert_eq!(decoded, "\u{fffd}");
	}

	#[test]
	fn unpaired_surrogate_is_fatal_in_strict_mode() {
		let units = [0xd800];
		assert!(matches!(utf8_from_utf16_units(&units, SurrogatePolicy::Strict), Err(Error::Unsupported(_))));
	}

	#[test]
	fn codepage_inversion_holds_without_substitution() {
		let bytes = b"Hello, World!";
		let decoded = codepage_bytes_to_utf8(bytes, Codepage::Windows1252, SurrogatePolicy::Strict).unwrap();
		let encoded = codepage_bytes_from_utf8(&decoded, Codepage::Windows1252, SurrogatePolicy::Strict).unwrap();
		assert_eq!(encoded, bytes);
	}

	#[test]
	fn codepage_unmappable_byte_substitutes_under_lossy() {
		let decoded = codepage_bytes_to_utf8(&[0x81], Codepage::Windows1252, SurrogatePolicy::Lossy).unwrap();
		assert_eq!(decoded, "\u{fffd}");
	}

	#[test]
	fn codepage_unmappable_byte_is_fatal_in_strict_mode() {
		let result = codepage_bytes_to_utf8(&[0x81], Codepage::Windows1252, SurrogatePolicy::Strict);
		assert!(matches!(result, Err(Error::Unsupported(_))));
	}

	#[test]
	fn codepage_unmappable_char_substitutes_under_lossy() {
		let encoded = codepage_bytes_from_utf8("\u{1f600}", Codepage::Windows1252, SurrogatePolicy::Lossy).unwrap();
		assert_eq!(encoded, vec![codepages::ASCII_SUBSTITUTE]);
	}

	#[test]
	fn codepage_unmappable_char_is_fatal_in_strict_mode() {
		let result = codepage_bytes_from_utf8("\u{1f600}", Codepage::Windows1252, SurrogatePolicy::Strict);
		assert!(matches!(result, Err(Error::Unsupported(_))));
	}

	#[test]
	fn size_from_and_copy_from_agree() {
		let bytes = b"caf\xe9"; // 0xe9 decodes under Windows-1252
		let size = size_from_codepage_to_utf8(bytes, Codepage::Windows1252, SurrogatePolicy::Lossy).unwrap();
		let mut out = Vec::new();
		let copied = copy_from_codepage_to_utf8(bytes, Codepage::Windows1252, SurrogatePolicy::Lossy, &mut out).unwrap();
		assert_eq!(size, copied);
		assert_eq!(out.len(), size);
	}

	#[test]
	fn rejects_odd_length_utf16_stream() {
		assert!(matches!(utf16_units_from_le_bytes(&[0x00]), Err(Error::InvalidArgument(_))));
	}
}
