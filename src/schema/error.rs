use std::borrow::Cow;

/// Failure to build a [`Schema`](crate::Schema): either the JSON itself is
/// invalid, or it does not describe a supported avro schema
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct SchemaError {
	inner: Box<ErrorKind>,
}

#[derive(thiserror::Error, Debug)]
enum ErrorKind {
	#[error(transparent)]
	Json(serde_json::Error),
	#[error("{0}")]
	Invalid(Cow<'static, str>),
}

impl SchemaError {
	pub(crate) fn new(s: &'static str) -> Self {
		Self::invalid(Cow::Borrowed(s))
	}

	pub(crate) fn msg(s: std::fmt::Arguments<'_>) -> Self {
		Self::invalid(match s.as_str() {
			Some(s) => Cow::Borrowed(s),
			None => Cow::Owned(s.to_string()),
		})
	}

	fn invalid(message: Cow<'static, str>) -> Self {
		Self {
			inner: Box::new(ErrorKind::Invalid(message)),
		}
	}
}

impl From<serde_json::Error> for SchemaError {
	fn from(e: serde_json::Error) -> Self {
		Self {
			inner: Box::new(ErrorKind::Json(e)),
		}
	}
}
