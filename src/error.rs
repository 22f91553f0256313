/* SPDX-License-Identifier: MPL-2.0 */
/*! Error type shared by construction, serialization and verification. */

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /** Every global seed attempt failed; the key set or the tuning parameters are
     * pathological. Retrying with a different [crate::BuildConfig] may succeed. */
    #[error("construction failed for {keys} keys after {attempts} seed attempts")]
    ConstructionFailure { attempts: u32, keys: usize },

    /** A key was added twice; the first value is kept */
    #[error("duplicate key {:?}", String::from_utf8_lossy(.key))]
    DuplicateKey { key: Vec<u8> },

    /** Truncated input, or a length field pointing outside the region */
    #[error("corrupt table at byte {offset}: {reason}")]
    CorruptFormat { offset: usize, reason: String },

    /** A stored key does not resolve to the slot it is stored at */
    #[error("key stored at slot {slot} does not hash to that slot")]
    Misplaced { slot: usize },

    /** A key, value or entry count does not fit the 32-bit length fields */
    #[error("{what} of length {len} exceeds the 32-bit length field")]
    TooLarge { what: &'static str, len: usize },

    #[error("invalid build configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn corrupt(offset: usize, reason: impl Into<String>) -> Error {
        Error::CorruptFormat {
            offset,
            reason: reason.into(),
        }
    }
}
