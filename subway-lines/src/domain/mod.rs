//! Domain types for subway line maintenance.
//!
//! The types here enforce their invariants at construction and mutation
//! time, so code that receives them can trust a chain is always a single
//! simple path. Persistence and transport concerns live with external
//! collaborators; this module only deals in identities and distances.

mod chain;
mod error;
mod line;
mod segment;
mod station;

pub use chain::SegmentChain;
pub use error::ChainError;
pub use line::{Line, LineId};
pub use segment::Segment;
pub use station::{Station, StationId};
