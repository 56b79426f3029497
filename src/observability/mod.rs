//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! registry mutations / selections
//!     → tracing events with structured fields
//!     → logging.rs subscriber (env filter + fmt layer)
//! ```

pub mod logging;
