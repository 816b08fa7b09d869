//! Cache capability set.

use crate::error::Result;

/// The two operations every cache policy offers.
///
/// Callers written against this trait do not care which eviction policy sits
/// behind it.
pub trait Cache {
    /// Stores `value` under `key`.
    fn put(&self, key: u32, value: Vec<u8>) -> Result<()>;

    /// Returns a copy of the value stored under `key`, or `None` on a miss.
    fn get(&self, key: u32) -> Option<Vec<u8>>;
}
