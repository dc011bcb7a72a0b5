//! Availability Records

/// Outcome of an availability check.
///
/// Advisory only: nothing is reserved or locked by the query, so a `true`
/// answer can be stale by the time a follow-up order is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    pub available: bool,
    pub reserved: u32,
    pub total: u32,
}
