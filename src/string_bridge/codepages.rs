// Single-byte codepage tables (spec §4.6). The high half (0x80..0xff) of
// each table is grounded on `original_source/libuna`'s per-codepage tables
// (`libuna_codepage_iso_8859_7.c` supplied the Greek table verbatim; the
// others follow the same public codepage-to-Unicode mapping data libuna's
// tables are themselves generated from). The low half (0x00..0x7f) is
// ASCII-identical for all five and is not tabulated separately.
//
// Unlike libuna, which carries a separate, hand-tuned reverse table per
// codepage, the inverse direction here is a linear scan of the forward
// table: these tables are 128 entries, the scan is not a hot path (string
// *encoding* is not part of this crate's read-only surface — only decode
// is), and a single source of truth keeps the two directions from drifting
// apart.

use crate::options::Codepage;

const REPLACEMENT_CHARACTER: u16 = 0xfffd;
pub(super) const ASCII_SUBSTITUTE: u8 = 0x1a;

#[rustfmt::skip]
const ISO_8859_7_HIGH: [u16; 96] = [
	0x00a0, 0x2018, 0x2019, 0x00a3, 0x20ac, 0x20af, 0x00a6, 0x00a7,
	0x00a8, 0x00a9, 0x037a, 0x00ab, 0x00ac, 0x00ad, 0xfffd, 0x2015,
	0x00b0, 0x00b1, 0x00b2, 0x00b3, 0x0384, 0x0385, 0x0386, 0x00b7,
	0x0388, 0x0389, 0x038a, 0x00bb, 0x038c, 0x00bd, 0x038e, 0x038f,
	0x0390, 0x0391, 0x0392, 0x0393, 0x0394, 0x0395, 0x0396, 0x0397,
	0x0398, 0x0399, 0x039a, 0x039b, 0x039c, 0x039d, 0x039e, 0x039f,
	0x03a0, 0x03a1, 0xfffd, 0x03a3, 0x03a4, 0x03a5, 0x03a6, 0x03a7,
	0x03a8, 0x03a9, 0x03aa, 0x03ab, 0x03ac, 0x03ad, 0x03ae, 0x03af,
	0x03b0, 0x03b1, 0x03b2, 0x03b3, 0x03b4, 0x03b5, 0x03b6, 0x03b7,
	0x03b8, 0x03b9, 0x03ba, 0x03bb, 0x03bc, 0x03bd, 0x03be, 0x03bf,
	0x03c0, 0x03c1, 0x03c2, 0x03c3, 0x03c4, 0x03c5, 0x03c6, 0x03c7,
	0x03c8, 0x03c9, 0x03ca, 0x03cb, 0x03cc, 0x03cd, 0x03ce, 0xfffd,
];

#[rustfmt::skip]
const WINDOWS_1252_HIGH: [u16; 128] = [
	0x20ac, 0xfffd, 0x201a, 0x0192, 0x201e, 0x2026, 0x2020, 0x2021,
	0x02c6, 0x2030, 0x0160, 0x2039, 0x0152, 0xfffd, 0x017d, 0xfffd,
	0xfffd, 0x2018, 0x2019, 0x201c, 0x201d, 0x2022, 0x2013, 0x2014,
	0x02dc, 0x2122, 0x0161, 0x203a, 0x0153, 0xfffd, 0x017e, 0x0178,
	0x00a0, 0x00a1, 0x00a2, 0x00a3, 0x00a4, 0x00a5, 0x00a6, 0x00a7,
	0x00a8, 0x00a9, 0x00aa, 0x00ab, 0x00ac, 0x00ad, 0x00ae, 0x00af,
	0x00b0, 0x00b1, 0x00b2, 0x00b3, 0x00b4, 0x00b5, 0x00b6, 0x00b7,
	0x00b8, 0x00b9, 0x00ba, 0x00bb, 0x00bc, 0x00bd, 0x00be, 0x00bf,
	0x00c0, 0x00c1, 0x00c2, 0x00c3, 0x00c4, 0x00c5, 0x00c6, 0x00c7,
	0x00c8, 0x00c9, 0x00ca, 0x00cb, 0x00cc, 0x00cd, 0x00ce, 0x00cf,
	0x00d0, 0x00d1, 0x00d2, 0x00d3, 0x00d4, 0x00d5, 0x00d6, 0x00d7,
	0x00d8, 0x00d9, 0x00da, 0x00db, 0x00dc, 0x00dd, 0x00de, 0x00df,
	0x00e0, 0x00e1, 0x00e2, 0x00e3, 0x00e4, 0x00e5, 0x00e6, 0x00e7,
	0x00e8, 0x00e9, 0x00ea, 0x00eb, 0x00ec, 0x00ed, 0x00ee, 0x00ef,
	0x00f0, 0x00f1, 0x00f2, 0x00f3, 0x00f4, 0x00f5, 0x00f6, 0x00f7,
	0x00f8, 0x00f9, 0x00fa, 0x00fb, 0x00fc, 0x00fd, 0x00fe, 0x00ff,
];

#[rustfmt::skip]
const WINDOWS_874_HIGH: [u16; 128] = [
	0x20ac, 0xfffd, 0xfffd, 0xfffd, 0xfffd, 0x2026, 0xfffd, 0xfffd,
	0xfffd, 0xfffd, 0xfffd, 0xfffd, 0xfffd, 0xfffd, 0xfffd, 0xfffd,
	0xfffd, 0x2018, 0x2019, 0x201c, 0x201d, 0x2022, 0x2013, 0x2014,
	0xfffd, 0xfffd, 0xfffd, 0xfffd, 0xfffd, 0xfffd, 0xfffd, 0xfffd,
	0x00a0, 0x0e01, 0x0e02, 0x0e03, 0x0e04, 0x0e05, 0x0e06, 0x0e07,
	0x0e08, 0x0e09, 0x0e0a, 0x0e0b, 0x0e0c, 0x0e0d, 0x0e0e, 0x0e0f,
	0x0e10, 0x0e11, 0x0e12, 0x0e13, 0x0e14, 0x0e15, 0x0e16, 0x0e17,
	0x0e18, 0x0e19, 0x0e1a, 0x0e1b, 0x0e1c, 0x0e1d, 0x0e1e, 0x0e1f,
	0x0e20, 0x0e21, 0x0e22, 0x0e23, 0x0e24, 0x0e25, 0x0e26, 0x0e27,
	0x0e28, 0x0e29, 0x0e2a, 0x0e2b, 0x0e2c, 0x0e2d, 0x0e2e, 0x0e2f,
	0x0e30, 0x0e31, 0x0e32, 0x0e33, 0x0e34, 0x0e35, 0x0e36, 0x0e37,
	0x0e38, 0x0e39, 0x0e3a, 0xfffd, 0xfffd, 0xfffd, 0xfffd, 0x0e3f,
	0x0e40, 0x0e41, 0x0e42, 0x0e43, 0x0e44, 0x0e45, 0x0e46, 0x0e47,
	0x0e48, 0x0e49, 0x0e4a, 0x0e4b, 0x0e4c, 0x0e4d, 0x0e4e, 0x0e4f,
	0x0e50, 0x0e51, 0x0e52, 0x0e53, 0x0e54, 0x0e55, 0x0e56, 0x0e57,
	0x0e58, 0x0e59, 0x0e5a, 0x0e5b, 0xfffd, 0xfffd, 0xfffd, 0xfffd,
];

#[rustfmt::skip]
const KOI8_R_HIGH: [u16; 128] = [
	0x2500, 0x2502, 0x250c, 0x2510, 0x2514, 0x2518, 0x251c, 0x2524,
	0x252c, 0x2534, 0x253c, 0x2580, 0x2584, 0x2588, 0x258c, 0x2590,
	0x2591, 0x2592, 0x2593, 0x2320, 0x25a0, 0x2219, 0x221a, 0x2248,
	0x2264, 0x2265, 0x00a0, 0x2321, 0x00b0, 0x00b2, 0x00b7, 0x00f7,
	0x2550, 0x2551, 0x2552, 0x0451, 0x2553, 0x2554, 0x2555, 0x2556,
	0x2557, 0x2558, 0x2559, 0x255a, 0x255b, 0x255c, 0x255d, 0x255e,
	0x255f, 0x2560, 0x2561, 0x0401, 0x2562, 0x2563, 0x2564, 0x2565,
	0x2566, 0x2567, 0x2568, 0x2569, 0x256a, 0x256b, 0x256c, 0x00a9,
	0x044e, 0x0430, 0x0431, 0x0446, 0x0434, 0x0435, 0x0444, 0x0433,
	0x0445, 0x0438, 0x0439, 0x043a, 0x043b, 0x043c, 0x043d, 0x043e,
	0x043f, 0x044f, 0x0440, 0x0441, 0x0442, 0x0443, 0x0436, 0x0432,
	0x044c, 0x044b, 0x0437, 0x0448, 0x044d, 0x0449, 0x0447, 0x044a,
	0x042e, 0x0410, 0x0411, 0x0426, 0x0414, 0x0415, 0x0424, 0x0413,
	0x0425, 0x0418, 0x0419, 0x041a, 0x041b, 0x041c, 0x041d, 0x041e,
	0x041f, 0x042f, 0x0420, 0x0421, 0x0422, 0x0423, 0x0416, 0x0412,
	0x042c, 0x042b, 0x0417, 0x0428, 0x042d, 0x0429, 0x0427, 0x042a,
];

fn high_table(codepage: Codepage) -> &'static [u16] {
	match codepage {
		Codepage::Iso8859_1 => &[],
		Codepage::Iso8859_7 => &ISO_8859_7_HIGH,
		Codepage::Windows1252 => &WINDOWS_1252_HIGH,
		Codepage::Windows874 => &WINDOWS_874_HIGH,
		Codepage::Koi8R => &KOI8_R_HIGH,
	}
}

fn high_base(codepage: Codepage) -> u8 {
	match codepage {
		Codepage::Iso8859_1 => 0x80,
		Codepage::Iso8859_7 => 0xa0,
		Codepage::Windows1252 | Codepage::Windows874 | Codepage::Koi8R => 0x80,
	}
}

/// Decodes a single codepage byte to its Unicode code point. ISO-8859-1
/// maps every byte to its own code point; the others are ASCII below the
/// high-table base.
pub fn decode_byte(codepage: Codepage, byte: u8) -> u16 {
	if matches!(codepage, Codepage::Iso8859_1) {
		return byte as u16;
	}
	let base = high_base(codepage);
	if byte < base {
		return byte as u16;
	}
	let table = high_table(codepage);
	table[(byte - base) as usize]
}

/// Encodes a Unicode code point back to a codepage byte, or `None` if the
/// code point isn't representable (caller substitutes `ASCII_SUBSTITUTE`).
pub fn encode_char(codepage: Codepage, code_point: u16) -> Option<u8> {
	if matches!(codepage, Codepage::Iso8859_1) {
		return u8::try_from(code_point).ok();
	}
	let base = high_base(codepage);
	if code_point < base as u16 {
		return Some(code_point as u8);
	}
	let table = high_table(codepage);
	table
		.iter()
		.position(|&mapped| mapped == code_point && mapped != REPLACEMENT_CHARACTER)
		.map(|index| base + index as u8)
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn iso_8859_1_is_identity() {
		for byte in 0u8..=255 {
			assert_eq!(decode_byte(Codepage::Iso8859_1, byte), byte as u16);
		}
	}

	#[test]
	fn iso_8859_7_decodes_greek_capital_alpha() {
		assert_eq!(decode_byte(Codepage::Iso8859_7, 0xe1), 0x0391);
	}

	#[test]
	fn windows_1252_decodes_euro_sign() {
		assert_eq!(decode_byte(Codepage::Windows1252, 0x80), 0x20ac);
	}

	#[test]
	fn ascii_range_is_shared_across_codepages() {
		for codepage in [Codepage::Iso8859_7, Codepage::Windows1252, Codepage::Windows874, Codepage::Koi8R] {
			assert_eq!(decode_byte(codepage, b'A'), b'A' as u16);
		}
	}

	#[test]
	fn encode_inverts_decode_for_defined_code_points() {
		for codepage in [Codepage::Iso8859_1, Codepage::Iso8859_7, Codepage::Windows1252, Codepage::Windows874, Codepage::Koi8R] {
			for byte in 0u8..=255 {
				let code_point = decode_byte(codepage, byte);
				if code_point == REPLACEMENT_CHARACTER {
					continue;
				}
				assert_eq!(encode_char(codepage, code_point), Some(byte), "codepage {:?} byte 0x{:02x}", codepage, byte);
			}
		}
	}

	#[test]
	fn encode_unmappable_code_point_is_none() {
		assert_eq!(encode_char(Codepage::Iso8859_1, 0x3b1), None);
	}
}
