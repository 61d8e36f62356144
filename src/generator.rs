//! Time-ordered UUID generator and related types.

use crate::{timestamp, Error, TimeUuid};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// The maximum value of the 60-bit timestamp field.
const MAX_TICKS: u64 = (1 << 60) - 1;

/// The maximum value of the 48-bit node field.
const MAX_NODE: u64 = (1 << 48) - 1;

/// A trait that defines the minimum random number generator interface for [`V1Generator`].
pub trait RandSource {
    /// Returns the next random `u64`.
    fn next_u64(&mut self) -> u64;
}

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct RandAdapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> RandSource for RandAdapter<T> {
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }
}

/// Represents a version 1 UUID generator that fills the clock sequence and node fields of each
/// identifier with fresh random bits.
///
/// This type provides the interface to customize the random number generator backing the
/// identifiers. The generator keeps no stateful counter, so two identifiers created for the same
/// tick are distinct with overwhelming probability but have no defined relative order.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::OsRng;
/// use std::time::SystemTime;
/// use timeuuid::V1Generator;
///
/// let mut g = V1Generator::with_rng(OsRng);
/// let x = g.generate(SystemTime::now());
/// let y = g.generate(SystemTime::now());
/// assert_ne!(x, y);
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct V1Generator<R> {
    /// The random number generator used by the generator.
    rng: R,
}

impl<R: RandSource> V1Generator<R> {
    /// Creates a generator instance.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generates a new identifier for the specified instant.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn generate(&mut self, time: std::time::SystemTime) -> TimeUuid {
        self.generate_from_unix_nanos(timestamp::unix_nanos_of(time))
    }

    /// Generates a new identifier for the specified Unix timestamp in nanoseconds.
    ///
    /// The timestamp is stored with 100 ns granularity, rounding toward negative infinity.
    pub fn generate_from_unix_nanos(&mut self, unix_ns: i64) -> TimeUuid {
        let bits = self.rng.next_u64();
        TimeUuid::from_fields_v1(time_ticks(unix_ns), (bits >> 51) as u16, bits & MAX_NODE)
    }
}

impl<T: RngCore> V1Generator<RandAdapter<T>> {
    /// Creates a generator instance that utilizes the specified [`rand`] crate RNG.
    pub const fn with_rng(rng: T) -> Self {
        Self::new(RandAdapter(rng))
    }
}

impl TimeUuid {
    /// Creates an identifier for the specified instant with a trailing section derived
    /// deterministically from an eight-byte salt.
    ///
    /// The same salt always yields the same clock sequence and node fields, so identifiers
    /// built with it differ only in their timestamp section and sort in timestamp order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::time::{Duration, UNIX_EPOCH};
    /// use timeuuid::TimeUuid;
    ///
    /// let t = UNIX_EPOCH + Duration::from_secs(1_366_458_000);
    /// let a = TimeUuid::from_time_salted(t, b"node-007")?;
    /// let b = TimeUuid::from_time_salted(t + Duration::from_nanos(100), b"node-007")?;
    /// assert_eq!(a.as_bytes()[8..], b.as_bytes()[8..]);
    /// assert!(a < b);
    /// # Ok::<(), timeuuid::Error>(())
    /// ```
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn from_time_salted(time: std::time::SystemTime, salt: &[u8]) -> Result<Self, Error> {
        Self::from_unix_nanos_salted(timestamp::unix_nanos_of(time), salt)
    }

    /// Creates an identifier for the specified Unix timestamp in nanoseconds with a trailing
    /// section derived deterministically from an eight-byte salt.
    ///
    /// The salt is taken as a big-endian seed for a [`ChaCha12Rng`] whose first output fills
    /// the clock sequence and node fields.
    pub fn from_unix_nanos_salted(unix_ns: i64, salt: &[u8]) -> Result<Self, Error> {
        match <[u8; 8]>::try_from(salt) {
            Ok(seed) => {
                let bits = ChaCha12Rng::seed_from_u64(u64::from_be_bytes(seed)).next_u64();
                Ok(Self::from_fields_v1(
                    time_ticks(unix_ns),
                    (bits >> 51) as u16,
                    bits & MAX_NODE,
                ))
            }
            Err(_) => Err(Error::InvalidSaltLength(salt.len())),
        }
    }
}

/// Converts nanoseconds since the Unix epoch into the low 60 bits of the Gregorian tick count.
const fn time_ticks(unix_ns: i64) -> u64 {
    timestamp::from_unix_nanos(unix_ns) as u64 & MAX_TICKS
}

#[cfg(test)]
mod tests_generate {
    use super::{RandSource, V1Generator, MAX_NODE};
    use crate::{timestamp::GREGORIAN_OFFSET, TimeUuid};

    struct FixedSource(u64);

    impl RandSource for FixedSource {
        fn next_u64(&mut self) -> u64 {
            self.0
        }
    }

    /// Splits random bits across the clock sequence and node fields
    #[test]
    fn splits_random_bits_across_the_clock_sequence_and_node_fields() {
        let offset = GREGORIAN_OFFSET as u64;

        let mut g = V1Generator::new(FixedSource(0));
        assert_eq!(
            g.generate_from_unix_nanos(0),
            TimeUuid::from_fields_v1(offset, 0, 0)
        );

        let mut g = V1Generator::new(FixedSource(u64::MAX));
        assert_eq!(
            g.generate_from_unix_nanos(0),
            TimeUuid::from_fields_v1(offset, 0x1fff, MAX_NODE)
        );

        let mut g = V1Generator::new(FixedSource(0x0123_4567_89ab_cdef));
        assert_eq!(
            g.generate_from_unix_nanos(0),
            TimeUuid::from_fields_v1(offset, 0x24, 0x4567_89ab_cdef)
        );
    }

    /// Round-trips tick-aligned timestamps through the generated identifier
    #[test]
    fn round_trips_tick_aligned_timestamps_through_the_generated_identifier() {
        let mut g = V1Generator::new(FixedSource(0x0123_4567_89ab_cdef));
        for ns in [
            0i64,
            100,
            -100,
            886_630_433_151_182_500,
            1_366_458_000_000_000_000,
            -9_000_000_000_000_000_000,
            9_000_000_000_000_000_000,
        ] {
            assert_eq!(g.generate_from_unix_nanos(ns).nanoseconds(), ns);
        }

        // sub-tick precision floors toward negative infinity
        assert_eq!(g.generate_from_unix_nanos(250).nanoseconds(), 200);
        assert_eq!(g.generate_from_unix_nanos(-250).nanoseconds(), -300);
    }

    /// Fills trailing sections with fresh random bits
    #[cfg(feature = "std")]
    #[test]
    fn fills_trailing_sections_with_fresh_random_bits() {
        let mut g = V1Generator::with_rng(rand::thread_rng());
        let ns = 886_630_433_151_182_500i64;
        let mut prev = g.generate_from_unix_nanos(ns);
        for _ in 0..1_000 {
            let curr = g.generate_from_unix_nanos(ns);
            assert_eq!(curr.nanoseconds(), ns);
            assert_eq!(curr.version(), 1);
            assert_eq!(curr.variant(), 4);
            assert_ne!(curr, prev);
            prev = curr;
        }
    }

    /// Encodes the specified system time
    #[cfg(feature = "std")]
    #[test]
    fn encodes_the_specified_system_time() {
        use std::time::{Duration, UNIX_EPOCH};

        let mut g = V1Generator::with_rng(rand::thread_rng());
        let t = UNIX_EPOCH + Duration::from_secs(1_366_458_000);
        let e = g.generate(t);
        assert_eq!(e.time(), t);
        assert_eq!(e.nanoseconds(), 1_366_458_000_000_000_000);
    }
}
