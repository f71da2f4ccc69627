//! Sub-components owned by the application state.
//!
//! Each widget keeps its own state, takes input through `update` and draws
//! itself with a `render` that only borrows it.

pub mod list;
pub mod spinner;
pub mod viewport;

pub use list::{EntryList, FilterState, ListRow};
pub use spinner::Spinner;
pub use viewport::Viewport;
