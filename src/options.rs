// Decoder configuration, threaded by shared reference into the string bridge
// and the MAPI property dispatcher. Mirrors the teacher's `ColumnOptions`,
// passed as `&Options` into `ValueTable::open`/`Column::open` and never
// mutated by the decoders that receive it.

/// Single-byte codepage identifiers this crate understands (spec §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codepage {
	Iso8859_1,
	Iso8859_7,
	Windows1252,
	Windows874,
	Koi8R,
}

/// How the string bridge handles an unmappable byte or an unpaired surrogate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurrogatePolicy {
	/// Substitute `0xfffd` (decode) / `0x1a` (encode) and continue.
	Lossy,
	/// Fail with `Error::Unsupported` on the first unmappable unit.
	Strict,
}

#[derive(Debug, Clone, Copy)]
pub struct Options {
	pub default_codepage: Codepage,
	pub surrogate_policy: SurrogatePolicy,
}

impl Default for Options {
	fn default() -> Self {
		Options { default_codepage: Codepage::Windows1252, surrogate_policy: SurrogatePolicy::Lossy }
	}
}
