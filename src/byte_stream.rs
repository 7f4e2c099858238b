// Little-endian byte-stream primitives (spec §4.7).
//
// All decoders here are non-failing: they take a fixed-size array reference,
// so bounds are enforced by the type system at the call site, which must
// slice (and therefore bounds-check) first.

/// A 16-byte GUID, stored as its four little-endian fields plus the raw
/// 8-byte clock-sequence-and-node tail, matching the wire layout in spec §6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Guid {
	pub data1: u32,
	pub data2: u16,
	pub data3: u16,
	pub data4: [u8; 8],
}

impl Guid {
	/// Canonical 8-4-4-4-12 lowercase display form.
	pub fn to_display_string(&self) -> String {
		format!(
			"{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
			self.data1,
			self.data2,
			self.data3,
			self.data4[0],
			self.data4[1],
			self.data4[2],
			self.data4[3],
			self.data4[4],
			self.data4[5],
			self.data4[6],
			self.data4[7],
		)
	}
}

impl std::fmt::Display for Guid {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.to_display_string())
	}
}

#[inline]
pub fn read_u16_le(bytes: &[u8; 2]) -> u16 {
	u16::from_le_bytes(*bytes)
}

#[inline]
pub fn read_u32_le(bytes: &[u8; 4]) -> u32 {
	u32::from_le_bytes(*bytes)
}

#[inline]
pub fn read_u64_le(bytes: &[u8; 8]) -> u64 {
	u64::from_le_bytes(*bytes)
}

#[inline]
pub fn read_guid_le(bytes: &[u8; 16]) -> Guid {
	Guid {
		data1: u32::from_le_bytes(bytes[0..4].try_into().unwrap()),
		data2: u16::from_le_bytes(bytes[4..6].try_into().unwrap()),
		data3: u16::from_le_bytes(bytes[6..8].try_into().unwrap()),
		data4: bytes[8..16].try_into().unwrap(),
	}
}
