//! Statistics over the solve log
//!
//! Dashboard summary numbers, the time histogram and the running-best
//! series behind the progress charts. All of it is derived on demand from
//! the solves passed in.

mod distribution;
mod progress;
mod summary;

pub use distribution::{time_buckets, TimeBucket};
pub use progress::{filter_by_range, progress_series, ProgressKind, ProgressPoint, TimeRange};
pub use summary::SessionSummary;
