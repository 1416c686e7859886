//! `appwipe` removes application-owned storage: caches, databases,
//! preferences, files and caller-supplied directories.
//!
//! The deletion primitives live in [`core::cleaner`]. Policy functions that
//! decide which locations are targeted, and in what order, live in
//! [`core::cleaner_orchestrator`] and [`core::wipe`]. Everything platform
//! specific sits behind the [`core::host::AppHost`] trait.

pub mod logger;

pub mod cli;
pub mod core;
pub mod host;
pub mod utils;
