//! Track segment value object.

use std::hash::{Hash, Hasher};

use super::{ChainError, LineId, Station};

/// One directed edge between two stations on a line.
///
/// Immutable after construction. Equality and hashing use
/// `(line, up station, down station)` — distance deliberately does not
/// participate, which is what lets a chain detect a duplicate edge even
/// when it is proposed with a different length.
///
/// # Invariants
///
/// - `up_station != down_station`
/// - `distance > 0`
///
/// # Examples
///
/// ```
/// use subway_lines::domain::{LineId, Segment, Station, StationId};
///
/// let giheung = Station::new(StationId(1), "Giheung");
/// let singal = Station::new(StationId(2), "Singal");
/// let segment = Segment::new(LineId(1), giheung, singal, 10).unwrap();
/// assert_eq!(segment.distance(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct Segment {
    line: LineId,
    up_station: Station,
    down_station: Station,
    distance: u32,
}

impl Segment {
    /// Construct a segment, validating its invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidSegment`] if `distance` is zero or
    /// the two stations share an identity.
    pub fn new(
        line: LineId,
        up_station: Station,
        down_station: Station,
        distance: u32,
    ) -> Result<Self, ChainError> {
        if distance == 0 {
            return Err(ChainError::InvalidSegment("distance must be positive"));
        }
        if up_station.id() == down_station.id() {
            return Err(ChainError::InvalidSegment(
                "up and down stations must differ",
            ));
        }

        Ok(Self {
            line,
            up_station,
            down_station,
            distance,
        })
    }

    /// The line this segment belongs to.
    pub fn line(&self) -> LineId {
        self.line
    }

    /// The station at the up end of the edge.
    pub fn up_station(&self) -> &Station {
        &self.up_station
    }

    /// The station at the down end of the edge.
    pub fn down_station(&self) -> &Station {
        &self.down_station
    }

    /// Edge length, always positive.
    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// True if `station` is this segment's up station.
    pub fn has_same_up(&self, station: &Station) -> bool {
        self.up_station == *station
    }

    /// True if `station` is this segment's down station.
    pub fn has_same_down(&self, station: &Station) -> bool {
        self.down_station == *station
    }

    /// True if `station` is either endpoint.
    pub fn has_station(&self, station: &Station) -> bool {
        self.has_same_up(station) || self.has_same_down(station)
    }

    /// Both endpoints, up first.
    pub fn endpoints(&self) -> [&Station; 2] {
        [&self.up_station, &self.down_station]
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.line == other.line
            && self.up_station == other.up_station
            && self.down_station == other.down_station
    }
}

impl Eq for Segment {}

impl Hash for Segment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.line.hash(state);
        self.up_station.hash(state);
        self.down_station.hash(state);
    }
}
