#[cfg(not(feature = "std"))]
use core as std;

use std::{cmp, fmt, ops, str};

use crate::timestamp;

/// Represents a time-ordered Universally Unique IDentifier in the RFC 4122 version 1 layout.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct TimeUuid([u8; 16]);

impl TimeUuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates an identifier from a 16-byte slice, copying its content.
    pub fn from_slice(src: &[u8]) -> Result<Self, Error> {
        match <[u8; 16]>::try_from(src) {
            Ok(bytes) => Ok(Self(bytes)),
            Err(_) => Err(Error::InvalidLength(src.len())),
        }
    }

    /// Creates a UUID byte array from a 60-bit Gregorian tick count, a 13-bit clock sequence,
    /// and a 48-bit node field, setting the version and variant bits accordingly.
    pub const fn from_fields_v1(ticks: u64, clock_seq: u16, node: u64) -> Self {
        if ticks >= 1 << 60 || clock_seq >= 1 << 13 || node >= 1 << 48 {
            panic!("invalid field value");
        }

        Self([
            (ticks >> 24) as u8,
            (ticks >> 16) as u8,
            (ticks >> 8) as u8,
            ticks as u8,
            (ticks >> 40) as u8,
            (ticks >> 32) as u8,
            0x10 | (ticks >> 56) as u8,
            (ticks >> 48) as u8,
            0x80 | (clock_seq >> 8) as u8,
            clock_seq as u8,
            (node >> 40) as u8,
            (node >> 32) as u8,
            (node >> 24) as u8,
            (node >> 16) as u8,
            (node >> 8) as u8,
            node as u8,
        ])
    }

    /// Returns the version number encoded in the upper four bits of the seventh byte.
    pub const fn version(&self) -> u8 {
        self.0[6] >> 4
    }

    /// Returns the variant number encoded in the upper three bits of the ninth byte.
    pub const fn variant(&self) -> u8 {
        self.0[8] >> 5
    }

    /// Returns the 60-bit timestamp field as a count of 100 ns ticks since the Gregorian epoch,
    /// reassembled from the scattered time_low, time_mid, and time_hi segments.
    const fn ticks(&self) -> u64 {
        let b = &self.0;
        ((b[6] & 0x0f) as u64) << 56
            | (b[7] as u64) << 48
            | (b[4] as u64) << 40
            | (b[5] as u64) << 32
            | (b[0] as u64) << 24
            | (b[1] as u64) << 16
            | (b[2] as u64) << 8
            | b[3] as u64
    }

    /// Returns the number of nanoseconds between the Unix epoch and the instant encoded in the
    /// timestamp field, with 100 ns granularity.
    ///
    /// Timestamps more than about 292 years past the Unix epoch exceed the `i64` nanosecond
    /// range and wrap.
    pub const fn nanoseconds(&self) -> i64 {
        timestamp::to_unix_nanos(self.ticks() as i64)
    }

    /// Returns the instant encoded in the timestamp field.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn time(&self) -> std::time::SystemTime {
        let ns = self.nanoseconds();
        if ns >= 0 {
            std::time::UNIX_EPOCH + std::time::Duration::from_nanos(ns as u64)
        } else {
            std::time::UNIX_EPOCH - std::time::Duration::from_nanos(ns.unsigned_abs())
        }
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// structure that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// This method is primarily for `no_std` environments where heap-allocated string types are
    /// not readily available. Use the [`fmt::Display`] trait usually to get the 8-4-4-4-12
    /// canonical hexadecimal string representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use timeuuid::TimeUuid;
    ///
    /// let x = "6ba7b811-9dad-11d1-80b4-00c04fd430c8".parse::<TimeUuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "6ba7b811-9dad-11d1-80b4-00c04fd430c8");
    /// assert_eq!(format!("{}", y), "6ba7b811-9dad-11d1-80b4-00c04fd430c8");
    /// # Ok::<(), timeuuid::Error>(())
    /// ```
    pub fn encode(&self) -> impl ops::Deref<Target = str> + fmt::Display {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 36];
        let mut buf_iter = buffer.iter_mut();
        for i in 0..16 {
            let e = self.0[i] as usize;
            *buf_iter.next().unwrap() = DIGITS[e >> 4];
            *buf_iter.next().unwrap() = DIGITS[e & 15];
            if i == 3 || i == 5 || i == 7 || i == 9 {
                *buf_iter.next().unwrap() = b'-';
            }
        }
        debug_assert!(buffer.is_ascii());
        TimeUuidStr(buffer)
    }
}

impl fmt::Display for TimeUuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for TimeUuid {
    type Err = Error;

    /// Creates an object from a hexadecimal string representation, ignoring hyphens.
    ///
    /// The canonical 8-4-4-4-12 form is accepted along with any other arrangement of exactly
    /// 32 hexadecimal digits and any number of hyphens.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use timeuuid::TimeUuid;
    ///
    /// let a = "6ba7b811-9dad-11d1-80b4-00c04fd430c8".parse::<TimeUuid>()?;
    /// let b = "6ba7b8119dad11d180b400c04fd430c8".parse::<TimeUuid>()?;
    /// assert_eq!(a, b);
    /// # Ok::<(), timeuuid::Error>(())
    /// ```
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let mut dst = [0u8; 16];
        let mut digits = 0;
        for c in src.chars() {
            if c == '-' {
                continue;
            }
            let d = match c.to_digit(16) {
                Some(d) => d as u8,
                None => return Err(Error::InvalidCharacter(c)),
            };
            if digits < 32 {
                dst[digits / 2] = (dst[digits / 2] << 4) | d;
            }
            digits += 1;
        }
        if digits == 32 {
            Ok(Self(dst))
        } else {
            Err(Error::InvalidStringLength(digits))
        }
    }
}

impl Ord for TimeUuid {
    /// Orders identifiers by the embedded timestamp first, then by the trailing eight bytes,
    /// and finally by the leading eight bytes so that distinct identifiers never compare as
    /// equal.
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.ticks()
            .cmp(&other.ticks())
            .then_with(|| self.0[8..].cmp(&other.0[8..]))
            .then_with(|| self.0[..8].cmp(&other.0[..8]))
    }
}

impl PartialOrd for TimeUuid {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl From<TimeUuid> for [u8; 16] {
    fn from(src: TimeUuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for TimeUuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl TryFrom<&[u8]> for TimeUuid {
    type Error = Error;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(src)
    }
}

impl AsRef<[u8]> for TimeUuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<TimeUuid> for u128 {
    fn from(src: TimeUuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for TimeUuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

/// Concrete return type of [`TimeUuid::encode()`] containing the stack-allocated 8-4-4-4-12
/// string representation.
struct TimeUuidStr([u8; 36]);

impl ops::Deref for TimeUuidStr {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        debug_assert!(self.0.is_ascii());
        unsafe { str::from_utf8_unchecked(&self.0) }
    }
}

impl fmt::Display for TimeUuidStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

/// Error converting an invalid byte, string, or salt representation into a [`TimeUuid`].
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Error {
    /// A byte slice did not hold exactly 16 bytes.
    InvalidLength(usize),

    /// A string representation did not hold exactly 32 hexadecimal digits.
    InvalidStringLength(usize),

    /// A string representation held a character other than a hexadecimal digit or a hyphen.
    InvalidCharacter(char),

    /// A salt did not hold exactly eight bytes.
    InvalidSaltLength(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidLength(n) => write!(f, "invalid byte length: {} (expected 16)", n),
            Error::InvalidStringLength(n) => {
                write!(f, "invalid number of hexadecimal digits: {} (expected 32)", n)
            }
            Error::InvalidCharacter(c) => {
                write!(f, "invalid character in string representation: {:?}", c)
            }
            Error::InvalidSaltLength(n) => write!(f, "invalid salt length: {} (expected 8)", n),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod std_ext {
    use super::{Error, TimeUuid};

    impl From<TimeUuid> for String {
        fn from(src: TimeUuid) -> Self {
            src.to_string()
        }
    }

    impl TryFrom<String> for TimeUuid {
        type Error = Error;

        fn try_from(src: String) -> Result<Self, Self::Error> {
            src.parse()
        }
    }

    impl std::error::Error for Error {}
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::TimeUuid;

    impl From<TimeUuid> for uuid::Uuid {
        fn from(src: TimeUuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for TimeUuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, TimeUuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for TimeUuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for TimeUuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = TimeUuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            Self::Value::from_slice(value).map_err(de::Error::custom)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::TimeUuid;
        use serde_test::{assert_tokens, Configure, Token};

        /// Serializes and deserializes prepared cases correctly
        #[test]
        fn serializes_and_deserializes_prepared_cases_correctly() {
            let cases = [
                ("00000000-0000-0000-0000-000000000000", &[0u8; 16]),
                (
                    "6ba7b810-9dad-11d1-80b4-00c04fd430c8",
                    &[
                        107, 167, 184, 16, 157, 173, 17, 209, 128, 180, 0, 192, 79, 212, 48, 200,
                    ],
                ),
                (
                    "6ba7b811-9dad-11d1-80b4-00c04fd430c8",
                    &[
                        107, 167, 184, 17, 157, 173, 17, 209, 128, 180, 0, 192, 79, 212, 48, 200,
                    ],
                ),
                (
                    "00000000-0000-1000-8000-000000000000",
                    &[0, 0, 0, 0, 0, 0, 16, 0, 128, 0, 0, 0, 0, 0, 0, 0],
                ),
                (
                    "ffffffff-ffff-1fff-9fff-ffffffffffff",
                    &[
                        255, 255, 255, 255, 255, 255, 31, 255, 159, 255, 255, 255, 255, 255, 255,
                        255,
                    ],
                ),
            ];

            for (text, bytes) in cases {
                let e = text.parse::<TimeUuid>().unwrap();
                assert_tokens(&e.readable(), &[Token::String(text)]);
                assert_tokens(&e.compact(), &[Token::Bytes(bytes)]);
            }
        }
    }
}
