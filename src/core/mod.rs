//! Core library components.
//!
//! Input resolution, secret selection, the vault client, the runner sink,
//! and the download orchestration that ties them together.

pub mod cloud;
pub mod constants;
pub mod domain;
pub mod download;
pub mod params;
pub mod runner;
pub mod selection;
pub mod types;
pub mod vault;
