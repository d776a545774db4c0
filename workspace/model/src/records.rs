//! Record types for the three base tables.
//!
//! One module per table: calendar availability rows, listing rows, and
//! neighbourhood boundary features. The loader in [`crate::dataset`] produces
//! vectors of these; they never change after loading.

pub mod calendar;
pub mod listing;
pub mod neighbourhood;

pub mod prelude {
    //! A prelude module for easy importing of all record types.
    pub use super::calendar::CalendarRecord;
    pub use super::listing::Listing;
    pub use super::neighbourhood::Neighbourhood;
}
