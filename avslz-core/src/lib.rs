//! # AVS-LZ Core
//!
//! Core components shared by the AVS-LZ encoder and decoder.
//!
//! - [`window`]: Sliding window (history ring buffer)
//! - [`config`]: Structural parameters of the stream format
//! - [`error`]: Error types
//!
//! ## Example
//!
//! ```rust
//! use avslz_core::{LzConfig, Window};
//!
//! let config = LzConfig::AVS;
//! let mut window = Window::new(config.window_size);
//!
//! for &b in b"abc" {
//!     window.put(b);
//! }
//! assert_eq!(window.back(3), b'a');
//! assert_eq!(config.max_match(), 18);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod window;

// Re-exports for convenience
pub use config::{LzConfig, TOKENS_PER_BLOCK};
pub use error::{AvsLzError, Result};
pub use window::Window;
