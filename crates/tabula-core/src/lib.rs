//! Core systems for Tabula.
//!
//! This crate provides the foundational pieces shared by the Tabula client
//! crates:
//!
//! - **Timers**: one-shot timers driven by caller-supplied time
//! - **Debouncing**: [`Debouncer`] and its tokio-driven [`DebounceTask`]
//! - **Signal/Slot System**: synchronous change notification
//! - **Property System**: values with change detection
//! - **Logging**: `tracing` targets and span helpers
//!
//! # Debounce Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use tabula_core::Debouncer;
//!
//! let t0 = Instant::now();
//! let mut query = Debouncer::new(String::new(), Duration::from_millis(500));
//! query.push("lee".to_string(), t0);
//!
//! // Still typing: nothing is committed.
//! assert_eq!(query.poll(t0 + Duration::from_millis(100)), None);
//!
//! // Quiet for the full delay: the value is committed.
//! assert_eq!(query.poll(t0 + Duration::from_millis(500)), Some("lee".to_string()));
//! ```
//!
//! # Signal Example
//!
//! ```
//! use tabula_core::Signal;
//!
//! let page_changed = Signal::<usize>::new();
//! page_changed.connect(|page| println!("now on page {page}"));
//! page_changed.emit(2);
//! ```

pub mod debounce;
mod error;
pub mod logging;
pub mod property;
pub mod signal;
pub mod timer;

pub use debounce::{DebounceTask, Debouncer};
pub use error::{CoreError, Result, TimerError};
pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use timer::{TimerId, TimerManager};
