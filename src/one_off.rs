// One-off entry identifier decoder (spec §4.4). Grounded on
// `original_source/libfmapi/libfmapi_one_off_entry_identifier.c`: version
// check, flags mask check, then three null-terminated fields scanned
// byte-at-a-time or u16-at-a-time depending on the UNICODE flag. Service
// provider constants are the two fixed GUIDs from
// `libfmapi_service_provider_identifier.c`.

use log::{trace, warn};

use crate::byte_stream::Guid;
use crate::display;
use crate::error::{Error, Result};
use crate::options::{Codepage, SurrogatePolicy};
use crate::string_bridge;

/// Record carries no rich-text formatting information for its recipient.
pub const FLAG_NO_RICH_INFO: u16 = 0x0001;
/// Unnamed flag bit observed alongside `NO_RICH_INFO` in real-world files.
pub const FLAG_UNSPECIFIED_0X1000: u16 = 0x1000;
/// The three string fields are little-endian UTF-16 rather than codepage bytes.
pub const FLAG_UNICODE: u16 = 0x8000;

const SUPPORTED_FLAGS: u16 = FLAG_NO_RICH_INFO | FLAG_UNSPECIFIED_0X1000 | FLAG_UNICODE;

/// The one-off entry identifier's service provider GUID.
pub const SERVICE_PROVIDER_ONE_OFF_ENTRY_IDENTIFIER: Guid = Guid {
	data1: 0xa41f_2b81,
	data2: 0xa3be,
	data3: 0x1910,
	data4: [0x9d, 0x6e, 0x00, 0xdd, 0x01, 0x0f, 0x54, 0x02],
};

/// The X.500 address service provider GUID.
pub const SERVICE_PROVIDER_X500_ADDRESS: Guid = Guid {
	data1: 0xc840_a7dc,
	data2: 0x42c0,
	data3: 0x1a10,
	data4: [0xb4, 0xb9, 0x08, 0x00, 0x2b, 0x2f, 0xe1, 0x82],
};

/// A single scanned field: its owned bytes including the terminator, and
/// whether they're UTF-16 (`unicode`) or codepage-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OwnedField {
	bytes: Vec<u8>,
	unicode: bool,
}

impl OwnedField {
	fn utf8(&self, codepage: Codepage, policy: SurrogatePolicy) -> Result<String> {
		if self.unicode {
			string_bridge::utf16le_bytes_to_utf8(&self.bytes, policy)
		} else {
			string_bridge::codepage_bytes_to_utf8(&self.bytes, codepage, policy)
		}
	}

	fn utf16(&self, codepage: Codepage, policy: SurrogatePolicy) -> Result<Vec<u16>> {
		if self.unicode {
			string_bridge::utf16le_bytes_to_utf16_units(&self.bytes)
		} else {
			string_bridge::codepage_bytes_to_utf16_units(&self.bytes, codepage, policy)
		}
	}
}

/// A decoded one-off entry identifier: version/flags plus the three scanned
/// string fields. The three buffers are owned exclusively by this record.
#[derive(Debug, Clone)]
pub struct OneOff {
	pub version: u16,
	pub flags: u16,
	display_name: OwnedField,
	address_type: OwnedField,
	email_address: OwnedField,
}

fn scan_field(bytes: &[u8], unicode: bool) -> Result<(OwnedField, usize)> {
	if unicode {
		let mut cursor = 0usize;
		loop {
			let chunk: [u8; 2] = match bytes.get(cursor..cursor + 2) {
				Some(chunk) => chunk.try_into().unwrap(),
				None => {
					warn!(target: "pff::one_off", "unicode field ran off the end without a terminator, scanned = {}", display::hex(&bytes[..cursor]));
					return Err(Error::Corruption("one_off: unicode field ran off the end without a terminator".to_string()));
				}
			};
			cursor += 2;
			if u16::from_le_bytes(chunk) == 0 {
				break;
			}
		}
		Ok((OwnedField { bytes: bytes[..cursor].to_vec(), unicode: true }, cursor))
	} else {
		let mut cursor = 0usize;
		loop {
			let byte = match bytes.get(cursor) {
				Some(&byte) => byte,
				None => {
					warn!(target: "pff::one_off", "field ran off the end without a terminator, scanned = {}", display::hex(&bytes[..cursor]));
					return Err(Error::Corruption("one_off: field ran off the end without a terminator".to_string()));
				}
			};
			cursor += 1;
			if byte == 0 {
				break;
			}
		}
		Ok((OwnedField { bytes: bytes[..cursor].to_vec(), unicode: false }, cursor))
	}
}

impl OneOff {
	/// Parses `bytes` as a one-off entry identifier (spec §4.4). `bytes`
	/// must be at least 4 bytes (version + flags); the three fields follow.
	pub fn parse(bytes: &[u8]) -> Result<OneOff> {
		if bytes.len() < 4 {
			return Err(Error::OutOfBounds(format!("one_off: input of {} bytes is shorter than the 4-byte header", bytes.len())));
		}
		let version = u16::from_le_bytes(bytes[0..2].try_into().unwrap());
		if version != 0 {
			warn!(target: "pff::one_off", "unsupported version {}", version);
			return Err(Error::Unsupported(format!("one_off: unsupported version {}", version)));
		}
		let flags = u16::from_le_bytes(bytes[2..4].try_into().unwrap());
		if flags & !SUPPORTED_FLAGS != 0 {
			warn!(target: "pff::one_off", "unsupported flag bits 0x{:04x}", flags & !SUPPORTED_FLAGS);
			return Err(Error::Unsupported(format!("one_off: unsupported flag bits 0x{:04x}", flags & !SUPPORTED_FLAGS)));
		}
		let unicode = flags & FLAG_UNICODE != 0;
		trace!(target: "pff::one_off", "version = {}, flags = 0x{:04x}, unicode = {}", version, flags, unicode);

		let mut cursor = 4usize;
		let (display_name, advanced) = scan_field(&bytes[cursor..], unicode)?;
		cursor += advanced;
		let (address_type, advanced) = scan_field(&bytes[cursor..], unicode)?;
		cursor += advanced;
		let (email_address, advanced) = scan_field(&bytes[cursor..], unicode)?;
		cursor += advanced;
		let _residual = &bytes[cursor..];

		Ok(OneOff { version, flags, display_name, address_type, email_address })
	}

	pub fn is_unicode(&self) -> bool {
		self.flags & FLAG_UNICODE != 0
	}

	/// UTF-8 bytes of `display_name`, including the decoded terminator.
	/// `codepage` is ignored in Unicode mode. `policy` governs unmappable
	/// bytes (codepage mode) or unpaired surrogates (Unicode mode).
	pub fn get_utf8_display_name(&self, codepage: Codepage, policy: SurrogatePolicy) -> Result<String> {
		self.display_name.utf8(codepage, policy)
	}

	pub fn get_utf8_address_type(&self, codepage: Codepage, policy: SurrogatePolicy) -> Result<String> {
		self.address_type.utf8(codepage, policy)
	}

	pub fn get_utf8_email_address(&self, codepage: Codepage, policy: SurrogatePolicy) -> Result<String> {
		self.email_address.utf8(codepage, policy)
	}

	pub fn get_utf16_display_name(&self, codepage: Codepage, policy: SurrogatePolicy) -> Result<Vec<u16>> {
		self.display_name.utf16(codepage, policy)
	}

	pub fn get_utf16_address_type(&self, codepage: Codepage, policy: SurrogatePolicy) -> Result<Vec<u16>> {
		self.address_type.utf16(codepage, policy)
	}

	pub fn get_utf16_email_address(&self, codepage: Codepage, policy: SurrogatePolicy) -> Result<Vec<u16>> {
		self.email_address.utf16(codepage, policy)
	}
}
