//! Runtime support for watcher evaluation.
//!
//! This module provides the coordination slot used to attribute reactive
//! property reads to the watcher currently evaluating, plus scoped runtime
//! contexts for isolation.

mod context;

pub use context::ReactiveRuntime;
