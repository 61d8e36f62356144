//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::{generator::RandSource, timestamp, TimeUuid};
use inner::GlobalGenInner;
use rand::{rngs::OsRng, RngCore, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// Returns the lock handle of process-wide global generator, creating one if none exists.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
        .lock()
        .expect("timeuuid: could not lock global generator")
}

/// Generates a time-ordered UUID object for the current instant.
///
/// This function employs a process-wide global generator whose clock sequence and node fields
/// are read from the operating system's entropy source. On Unix, this function resets the
/// generator when the process ID changes (i.e., upon process forks) to keep forked processes
/// from sharing the fallback random stream.
///
/// # Examples
///
/// ```rust
/// let uuid = timeuuid::timeuuid();
/// println!("{}", uuid); // e.g., "8c41737a-f452-11ed-80b4-00c04fd430c8"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
///
/// let uuid_string: String = timeuuid::timeuuid().to_string();
/// ```
pub fn timeuuid() -> TimeUuid {
    lock_global_gen()
        .get_mut()
        .generate(std::time::SystemTime::now())
}

impl TimeUuid {
    /// Creates an identifier for the specified instant with random clock sequence and node
    /// fields, employing the process-wide global generator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::time::{Duration, UNIX_EPOCH};
    /// use timeuuid::TimeUuid;
    ///
    /// let t = UNIX_EPOCH + Duration::from_secs(1_366_458_000);
    /// let e = TimeUuid::from_time(t);
    /// assert_eq!(e.time(), t);
    /// ```
    pub fn from_time(time: std::time::SystemTime) -> Self {
        lock_global_gen().get_mut().generate(time)
    }

    /// Creates an identifier for the specified Unix timestamp in nanoseconds with random clock
    /// sequence and node fields, employing the process-wide global generator.
    pub fn from_unix_nanos(unix_ns: i64) -> Self {
        lock_global_gen().get_mut().generate_from_unix_nanos(unix_ns)
    }
}

/// The default [`RandSource`] that reads the operating system's entropy source for each draw
/// and falls back on a time-seeded pseudo-random stream when the entropy source fails.
#[derive(Debug, Default)]
pub struct DefaultRandSource {
    fallback: Option<ChaCha12Rng>,
}

impl RandSource for DefaultRandSource {
    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        match OsRng.try_fill_bytes(&mut bytes) {
            Ok(()) => u64::from_be_bytes(bytes),
            Err(_) => self.fallback_rng().next_u64(),
        }
    }
}

impl DefaultRandSource {
    /// Returns the fallback stream, seeding it on first use with the wall clock and the
    /// process ID.
    fn fallback_rng(&mut self) -> &mut ChaCha12Rng {
        self.fallback.get_or_insert_with(|| {
            let now = timestamp::unix_nanos_of(std::time::SystemTime::now());
            ChaCha12Rng::seed_from_u64(now as u64 ^ u64::from(std::process::id()))
        })
    }
}

mod inner {
    use super::DefaultRandSource;
    use crate::generator::V1Generator;

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        generator: V1Generator<DefaultRandSource>,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: V1Generator::new(DefaultRandSource::default()),
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner [`V1Generator`] instance, reseting the
        /// generator state on Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> &mut V1Generator<DefaultRandSource> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                *self = Default::default();
            }
            &mut self.generator
        }
    }
}
