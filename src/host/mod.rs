//! Host implementations of [`crate::core::host::AppHost`].

pub mod local;

pub use local::{Layout, LocalHost};
