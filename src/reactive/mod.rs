//! The reactive data side of the engine.
//!
//! This module provides the pieces that turn a plain data object into a
//! change-propagating store:
//! - Values: dynamically typed data ([`Value`], [`Data`])
//! - Observation: recursive accessor wrapping ([`Store`])
//! - Dependency sets: per-property watcher registries ([`Dep`])
//! - Watchers: live path-to-callback bindings ([`Watcher`])

mod dep;
mod observe;
mod store;
mod value;
mod watcher;

pub use dep::Dep;
pub use store::Store;
pub use value::{Data, Value};
pub use watcher::Watcher;
