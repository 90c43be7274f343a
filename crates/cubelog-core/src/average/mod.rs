//! WCA rolling-average engine.
//!
//! - [`average_window`] trims and averages one window of times
//! - [`best_window`] slides it over a chronological sequence
//! - [`compute_best_averages`] sorts a solve log and finds the best Ao5 / Ao12
//!
//! Nothing here fails or allocates state between calls. Malformed times are
//! DNF, and "not enough data" and "only DNF windows" both surface as `None`.

pub mod legacy;
mod orchestrator;
mod search;
mod window;

pub use orchestrator::{
    best_average_of, chronological, compute_best_averages, current_average_of, normalized_times,
    BestAverages,
};
pub use search::{best_window, current_window};
pub use window::{average_window, WindowResult};
