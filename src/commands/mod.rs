//! CLI command implementations

pub mod backfill;
pub mod calendar;
pub mod list;
pub mod new;
pub mod prune;
pub mod retag;
pub mod routes;
pub mod sync;
