//! Interval arithmetic for rental reservations.
//!
//! Availability is never tracked as a running counter: the number of units
//! committed for a product over a window is recomputed from the active
//! order items whose rental window intersects it.

use jiff::civil::Date;

/// A closed date interval; both endpoints are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    #[must_use]
    pub const fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// Closed-interval overlap test: touching endpoints count as
    /// overlapping, so a checkout day coinciding with a pickup day
    /// still conflicts.
    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}

/// One active order item for a product, as read from the order store.
///
/// Carries both the item's own (optional) dates and the parent order's
/// window, so the effective interval can be resolved uniformly here
/// regardless of data vintage.
#[derive(Debug, Clone)]
pub struct ActiveReservation {
    pub quantity: u32,
    pub item_start: Option<Date>,
    pub item_end: Option<Date>,
    pub order_start: Date,
    pub order_end: Date,
}

impl ActiveReservation {
    /// The interval the overlap test actually uses: the item's own dates
    /// where present, the parent order's otherwise, resolved per field.
    #[must_use]
    pub fn effective_range(&self) -> DateRange {
        DateRange::new(
            self.item_start.unwrap_or(self.order_start),
            self.item_end.unwrap_or(self.order_end),
        )
    }
}

/// Units already committed against `range` across all reservations.
///
/// Every reservation is considered independently; an order holding several
/// items for the same product contributes each of them.
#[must_use]
pub fn reserved_quantity(reservations: &[ActiveReservation], range: DateRange) -> u32 {
    reservations
        .iter()
        .filter(|reservation| reservation.effective_range().overlaps(range))
        .map(|reservation| reservation.quantity)
        .sum()
}
