// Library root: the prospect data model and every derived-statistics engine
// the board, profile and comparison views are computed from.

pub mod attributes;
pub mod board;
pub mod compare;
pub mod consensus;
pub mod format;
pub mod join;
pub mod model;
pub mod performance;
pub mod session;
pub mod snapshot;
pub mod stats;
