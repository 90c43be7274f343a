//! # Cubelog Core Library
//!
//! This library provides the core logic for cubelog, a speedcubing solve log.
//! Every operation is available through the standalone `cubelog` CLI, which is
//! a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Time codec**: Normalizes raw solve times (seconds, `mm:ss.xx`, DNF)
//!   into milliseconds and renders them back
//! - **Averaging engine**: WCA trimmed means over sliding windows, with the
//!   best Ao5 / Ao12 of a whole log
//! - **Statistics**: Session summary, time distribution and progress series
//! - **Storage**: SQLite solve and blog storage, TOML configuration and
//!   JSON / CSV backups
//!
//! ## Key Components
//!
//! - [`compute_best_averages`]: Best Ao5 / Ao12 of a solve log
//! - [`Database`]: Solve and blog persistence
//! - [`Config`]: Application configuration management

pub mod average;
pub mod blog;
pub mod error;
pub mod solve;
pub mod stats;
pub mod storage;
pub mod time;

pub use average::{average_window, best_window, compute_best_averages, BestAverages, WindowResult};
pub use blog::{Post, PostEdit, PostFilter};
pub use error::{ConfigError, CoreError, DatabaseError, ImportError, ValidationError};
pub use solve::{RawTime, Solve};
pub use stats::{ProgressKind, SessionSummary, TimeRange};
pub use storage::{Config, Database};
pub use time::NormalizedTime;
