//! Inbound Ports (Driving Ports)
//!
//! The common surface shared by the Bloom and Cuckoo filters. Code that only
//! needs "insert" and "might contain" can be written once against this trait.

use crate::error::FilterError;
use crate::metrics::FilterKind;

/// Approximate membership API (Driving Port)
///
/// `contains` may return false positives but never false negatives for items
/// that are still stored.
pub trait MembershipFilter {
    /// Record `item` as a member
    fn insert(&mut self, item: &[u8]) -> Result<(), FilterError>;

    /// Test whether `item` might be a member
    fn contains(&self, item: &[u8]) -> Result<bool, FilterError>;

    /// Which filter family backs this implementation
    fn kind(&self) -> FilterKind;

    /// Insert every item, stopping at the first failure
    ///
    /// Returns the number of items inserted before the failure, together
    /// with the error if one occurred.
    fn insert_all<'a, I>(&mut self, items: I) -> (usize, Option<FilterError>)
    where
        I: IntoIterator<Item = &'a [u8]>,
        Self: Sized,
    {
        let mut inserted = 0;
        for item in items {
            if let Err(e) = self.insert(item) {
                return (inserted, Some(e));
            }
            inserted += 1;
        }
        (inserted, None)
    }
}
