//! A Rust implementation of time-ordered UUIDs in the RFC 4122 version 1 layout
//!
//! ```rust
//! use timeuuid::timeuuid;
//!
//! let uuid = timeuuid();
//! println!("{}", uuid); // e.g. "8c41737a-f452-11ed-80b4-00c04fd430c8"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//! ```
//!
//! Identifiers embed a 60-bit timestamp that counts 100 ns ticks since the Gregorian calendar
//! epoch (1582-10-15 00:00:00 UTC), so two of them created for different instants compare in
//! time order regardless of their random content. The [`Ord`] implementation reads the
//! timestamp before the byte content, which makes [`TimeUuid`] usable as a sortable key in
//! ordered collections and external stores.
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           time_low                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           time_mid            |  ver  |       time_high       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! | var |        clock_seq        |             node              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             node                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The `time_low`, `time_mid`, and `time_high` fields carry the least significant 32 bits,
//!   the middle 16 bits, and the most significant 12 bits of the 60-bit timestamp,
//!   respectively.
//! - The 4-bit `ver` field is set at `0001`.
//! - The 3-bit `var` field is set at `100`.
//! - The 13-bit `clock_seq` and 48-bit `node` fields are filled with cryptographically strong
//!   random numbers, or derived deterministically from a caller-provided salt.
//!
//! Because the trailing 61 bits are random rather than stateful, identifiers created for the
//! same tick are distinct with overwhelming probability but have no defined relative order.
//!
//! # Explicit instants and salts
//!
//! The crate also creates identifiers for explicit instants, optionally with a trailing
//! section derived from an eight-byte salt so that replays yield the identical identifier:
//!
//! ```rust
//! use std::time::{Duration, UNIX_EPOCH};
//! use timeuuid::TimeUuid;
//!
//! let t = UNIX_EPOCH + Duration::from_secs(1_366_458_000);
//! let a = TimeUuid::from_time(t);
//! let b = TimeUuid::from_time_salted(t, b"node-007")?;
//! assert_eq!(a.time(), t);
//! assert_eq!(a.nanoseconds(), b.nanoseconds());
//! assert_eq!(b, TimeUuid::from_time_salted(t, b"node-007")?);
//! # Ok::<(), timeuuid::Error>(())
//! ```
//!
//! # Crate features
//!
//! Default features:
//!
//! - `std` integrates the library with, among others, the system clock to read timestamps
//!   from [`SystemTime`](std::time::SystemTime) values; without `std`, this crate provides
//!   limited functionality available under `no_std` environments
//! - `global_gen` (implies `std`) enables the primary [`timeuuid()`] function, the
//!   [`TimeUuid::from_time()`] and [`TimeUuid::from_unix_nanos()`] shortcuts, and the
//!   process-wide global generator under the hood
//!
//! Optional features:
//!
//! - `serde` enables the serialization and deserialization of [`TimeUuid`] objects
//! - `uuid` enables the conversion from/to the popular [`uuid`] crate's
//!   [`Uuid`](uuid::Uuid) type

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod id;
pub use id::{Error, TimeUuid};

pub mod generator;
pub use generator::{RandAdapter, RandSource, V1Generator};

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{timeuuid, DefaultRandSource};

mod timestamp;
