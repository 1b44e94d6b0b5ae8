//! Domain error types.
//!
//! Every variant is a rejected-operation error: the failed call leaves
//! the chain exactly as it was. Mapping each kind to a response code is
//! the calling layer's job; the core only guarantees the kind is
//! unambiguous.

/// Domain-level errors for chain validation and mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    /// Segment construction with a zero distance or identical endpoints
    #[error("invalid segment: {0}")]
    InvalidSegment(&'static str),

    /// The new segment touches none of the chain's stations, or matches
    /// no valid terminal/split position
    #[error("segment does not connect to the chain")]
    DisconnectedInsert,

    /// Both stations of the new segment are already connected via the chain
    #[error("both stations are already connected on this line")]
    RedundantInsert,

    /// A split would leave no room for the remainder of the split segment
    #[error("inserted distance {inserted} must be shorter than the existing segment's {existing}")]
    OverlengthInsert {
        /// Distance of the segment being inserted
        inserted: u32,
        /// Distance of the segment it would split
        existing: u32,
    },

    /// A line must always retain at least one segment
    #[error("cannot remove a station from a line with a single segment")]
    ChainTooShort,

    /// The station is not an endpoint of any segment in the chain
    #[error("station is not part of this line")]
    StationNotFound,
}
