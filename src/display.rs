// Logging helpers. Kept separate from the decoders so `log::trace!` call
// sites stay one-liners, the same split the teacher makes between
// `table.rs`'s tracing and its small `display` helper module.

/// Renders `bytes` as a lowercase hex string, for use in `log::trace!`/`debug!`
/// call sites. Not on any decode hot path.
pub fn hex(bytes: &[u8]) -> String {
	hex::encode(bytes)
}
