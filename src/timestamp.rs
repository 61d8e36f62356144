//! Conversions between Unix time and the 60-bit RFC 4122 timestamp, which counts
//! 100-nanosecond ticks since the Gregorian calendar epoch (1582-10-15T00:00:00Z).

/// The number of 100 ns ticks between the Gregorian epoch 1582-10-15 00:00:00
/// and the Unix epoch 1970-01-01 00:00:00.
pub(crate) const GREGORIAN_OFFSET: i64 = 0x01B2_1DD2_1381_4000;

/// Converts nanoseconds since the Unix epoch into Gregorian ticks, truncating
/// sub-tick remainders toward negative infinity.
pub(crate) const fn from_unix_nanos(ns: i64) -> i64 {
    ns.div_euclid(100) + GREGORIAN_OFFSET
}

/// Converts Gregorian ticks back into nanoseconds since the Unix epoch.
///
/// Tick counts more than about 292 years past the Unix epoch exceed the `i64`
/// nanosecond range and wrap.
pub(crate) const fn to_unix_nanos(ticks: i64) -> i64 {
    (ticks - GREGORIAN_OFFSET).wrapping_mul(100)
}

/// Returns the signed number of nanoseconds between the Unix epoch and `t`.
#[cfg(feature = "std")]
pub(crate) fn unix_nanos_of(t: std::time::SystemTime) -> i64 {
    match t.duration_since(std::time::UNIX_EPOCH) {
        Ok(d) => d.as_nanos() as i64,
        Err(e) => -(e.duration().as_nanos() as i64),
    }
}
