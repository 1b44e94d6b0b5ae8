//! Station identity types.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Opaque, stable station identifier.
///
/// Assigned by the external catalog that owns station lifecycles; the
/// chain only ever compares these, it never mints them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationId(pub u64);

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A station on the network.
///
/// Identity-bearing entity: two `Station` values are equal exactly when
/// their ids are equal. The display name is carried along for listings
/// but never participates in equality or hashing.
///
/// # Examples
///
/// ```
/// use subway_lines::domain::{Station, StationId};
///
/// let a = Station::new(StationId(7), "Gangnam");
/// let b = Station::new(StationId(7), "Gangnam (renamed)");
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct Station {
    id: StationId,
    name: String,
}

impl Station {
    /// Creates a station with the given identity and display name.
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the stable identity.
    pub fn id(&self) -> StationId {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Station {}

impl Hash for Station {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
