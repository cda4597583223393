//! Application bootstrap
//!
//! The [`Bootstrapper`] sequences the startup of an application: container
//! setup, descriptor loading, provider registration, alias registration,
//! preloads, provider boot, and the concurrent ready/shutdown hook phases.

pub mod bootstrapper;
pub mod preloads;

pub use bootstrapper::Bootstrapper;
pub use preloads::{FsPreloadHandler, PreloadHandler};
