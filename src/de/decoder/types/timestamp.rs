use super::*;

use chrono::{DateTime, TimeZone, Utc};

/// A `long` holding nanoseconds since the Unix epoch
///
/// Every `i64` maps to a valid instant (roughly years 1677 to 2262).
pub(in super::super) fn read_timestamp(
	state: &mut DecoderState<'_, '_>,
) -> Result<DateTime<Utc>, DeError> {
	let nanos: i64 = state.read_varint()?;
	Ok(Utc.timestamp_nanos(nanos))
}
