//! Top-level wiring: options in, compiled reactive app out.

mod app;

pub use app::{App, AppOptions};
