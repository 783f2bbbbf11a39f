//! `mapf-reservation`: the space-time reservation table.
//!
//! Already-planned agents claim `(tick, vertex)` and `(tick, from → to)`
//! slots here; the single-agent planner queries it to stay clear of them.
//! See [`table`] for the layout and blocking rules.

pub mod table;

#[cfg(test)]
mod tests;

pub use table::{Reservation, ReservationTable};
