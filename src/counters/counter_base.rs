use crate::error::Result;

/// A structure that counts how often each key occurs in a stream.
pub trait FrequencyCounter {
    /// Records `quantity` more occurrences of `key`.
    ///
    /// Negative quantities are rejected with `SketchError::InvalidQuantity`.
    fn add<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K, quantity: i64) -> Result<()>;

    /// Returns the (possibly approximate) number of occurrences of `key`.
    fn estimate<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> u64;
}
