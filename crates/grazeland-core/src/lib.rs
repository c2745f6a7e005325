//! Discrete-time predator-prey agent-based model.
//!
//! A herd of grazers consumes a renewable toroidal resource field while a
//! pack of hunters pursues them. The crate is the interaction engine only:
//! per-agent state transitions, pairwise proximity checks, and the fixed
//! per-iteration update cycle. Loading rasters from disk, argument parsing,
//! and any rendering live in the driving layer.

pub mod agent;
pub mod config;
pub mod control;
pub mod field;
pub mod world;
