//! Line aggregate.
//!
//! A `Line` owns its [`SegmentChain`] by value and stamps its own id
//! onto every segment it creates, so segments refer back to their line
//! by identifier rather than by an owning reference.

use std::fmt;

use super::{ChainError, Segment, SegmentChain, Station};

/// Opaque, stable line identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(pub u64);

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A transit line: name, display colour and the chain of its segments.
#[derive(Debug, Clone)]
pub struct Line {
    id: LineId,
    name: String,
    color: String,
    chain: SegmentChain,
}

impl Line {
    /// Creates a line with an empty chain.
    pub fn new(id: LineId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            chain: SegmentChain::new(),
        }
    }

    /// Creates a line seeded with its first segment.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidSegment`] if the seed segment is
    /// malformed.
    pub fn with_segment(
        id: LineId,
        name: impl Into<String>,
        color: impl Into<String>,
        up: Station,
        down: Station,
        distance: u32,
    ) -> Result<Self, ChainError> {
        let mut line = Self::new(id, name, color);
        line.add_segment(up, down, distance)?;
        Ok(line)
    }

    /// Returns the stable identity.
    pub fn id(&self) -> LineId {
        self.id
    }

    /// Returns the line name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display colour.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Read access to the underlying chain.
    pub fn chain(&self) -> &SegmentChain {
        &self.chain
    }

    /// Builds a segment stamped with this line's id and splices it into
    /// the chain.
    ///
    /// # Errors
    ///
    /// Propagates segment construction and chain insertion failures
    /// unchanged; see [`SegmentChain::add`].
    pub fn add_segment(
        &mut self,
        up: Station,
        down: Station,
        distance: u32,
    ) -> Result<(), ChainError> {
        let segment = Segment::new(self.id, up, down, distance)?;
        self.chain.add(segment)
    }

    /// Removes a station from the line's chain; see
    /// [`SegmentChain::remove`].
    pub fn remove_station(&mut self, station: &Station) -> Result<(), ChainError> {
        self.chain.remove(station)
    }

    /// Partial rename: `None` leaves the corresponding field untouched.
    pub fn update(&mut self, name: Option<String>, color: Option<String>) {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(color) = color {
            self.color = color;
        }
    }

    /// Stations in traversal order.
    pub fn stations(&self) -> Vec<&Station> {
        self.chain.ordered_stations()
    }

    /// Station display names in traversal order.
    pub fn station_names(&self) -> Vec<String> {
        self.chain.station_names()
    }

    /// Sum of segment distances along the line.
    pub fn total_distance(&self) -> u64 {
        self.chain.total_distance()
    }
}
