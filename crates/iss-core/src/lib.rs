//! `iss-core`: everything the notifier does except the command line.
//!
//! ```text
//! Monitor::run ── tick ──▶ PositionFetcher::fetch
//!                     │
//!                     ├──▶ overhead::is_overhead      (pure, lat/lon box)
//!                     │
//!                     ├──▶ DaylightChecker::is_dark   (only when overhead)
//!                     │
//!                     └──▶ Mailer::send               (only when also dark)
//! ```

pub mod config;
pub mod daylight;
pub mod error;
pub mod http;
pub mod io;
pub mod monitor;
pub mod notify;
pub mod overhead;
pub mod position;
pub mod types;

pub use error::{NotifierError, Result};
pub use monitor::Monitor;
pub use notify::{Mailer, Notification, SmtpMailer};
pub use types::{Coordinates, SatellitePosition, TickOutcome};
