use std::borrow::Cow;

/// Any error that may happen during decoding
///
/// The [`kind`](DeError::kind) tells apart input that simply ended too early
/// (more bytes may fix it) from input that does not match the schema.
#[derive(thiserror::Error)]
#[error("{}", inner.value)]
pub struct DeError {
	inner: Box<ErrorInner>,
}

impl std::fmt::Debug for DeError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DeError")
			.field("kind", &self.inner.kind)
			.field("message", &self.inner.value)
			.finish()
	}
}

struct ErrorInner {
	kind: DeErrorKind,
	value: Cow<'static, str>,
}

/// The two kinds of decoding failures
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeErrorKind {
	/// A read would have crossed the end of the buffer
	///
	/// This is recoverable: presenting the same bytes again followed by more
	/// input may succeed.
	InsufficientBytes,
	/// The bytes do not match the schema (invalid union or enum index,
	/// unterminated varint, negative length...)
	///
	/// More input can never fix this.
	Malformed,
}

impl DeError {
	/// If you need a dynamic string use `DeError::custom(format_args!(...))`
	pub(crate) fn new(s: &'static str) -> Self {
		Self::with_kind(DeErrorKind::Malformed, Cow::Borrowed(s))
	}

	pub(crate) fn custom(msg: std::fmt::Arguments<'_>) -> Self {
		Self::with_kind(
			DeErrorKind::Malformed,
			match msg.as_str() {
				Some(s) => Cow::Borrowed(s),
				None => Cow::Owned(msg.to_string()),
			},
		)
	}

	pub(crate) fn unexpected_eof() -> Self {
		Self::with_kind(
			DeErrorKind::InsufficientBytes,
			Cow::Borrowed("Unexpected end of slice while decoding"),
		)
	}

	fn with_kind(kind: DeErrorKind, value: Cow<'static, str>) -> Self {
		Self {
			inner: Box::new(ErrorInner { kind, value }),
		}
	}

	/// Whether this error was caused by a read crossing the end of the buffer
	/// or by data that does not match the schema
	pub fn kind(&self) -> DeErrorKind {
		self.inner.kind
	}

	/// Shorthand for `self.kind() == DeErrorKind::InsufficientBytes`
	pub fn is_insufficient_bytes(&self) -> bool {
		self.kind() == DeErrorKind::InsufficientBytes
	}
}
