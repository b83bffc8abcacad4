//! Pure derivations and local interaction state used by the screens.
//!
//! Nothing in here talks to the backend. Stores hold raw results; these
//! helpers turn them into what a screen draws.
//!
//! - [`paginate`] / [`PageCursor`]: fixed-size rows and limit/offset paging
//! - [`RingBuffer`]: bounded snapshot history
//! - [`rolling_average`] / [`PerformanceSummary`]: monitoring aggregates
//! - [`Debouncer`]: search input buffering
//! - [`ListCursor`]: list selection and scroll

mod debounce;
mod list_cursor;
mod pagination;
mod ring_buffer;
mod stats;

pub use debounce::Debouncer;
pub use list_cursor::ListCursor;
pub use pagination::{paginate, row_count, PageCursor, Row};
pub use ring_buffer::RingBuffer;
pub use stats::{metric, rolling_average, PerformanceSummary};
