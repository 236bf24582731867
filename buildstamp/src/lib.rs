//! Generates `lib/config/build_timestamp.h` for firmware builds.
//!
//! ```text
//! #pragma once
//! constexpr const char* BUILD_TIMESTAMP = "2024-03-05 14:22:01";
//! ```

pub mod clock;
pub mod config;
pub mod emitter;
pub mod error;
pub mod header;

pub use clock::{Clock, FixedClock, LocalClock};
pub use config::{BuildstampConfig, Cli, HeaderConfig};
pub use emitter::{EmitReport, TimestampHeaderEmitter};
pub use error::{EmitError, Result};
pub use header::BuildTimestamp;
