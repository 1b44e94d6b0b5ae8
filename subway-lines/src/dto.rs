//! Serialisable views for response building.
//!
//! Outbound snapshots of domain state, consumed by whatever presentation
//! layer sits above the core. Inbound request types are deliberately
//! absent; request validation happens before the core is called.

use serde::Serialize;

use crate::domain::{Line, Segment, Station};

/// A station as rendered to callers.
#[derive(Debug, Clone, Serialize)]
pub struct StationView {
    /// Stable station id
    pub id: u64,

    /// Display name
    pub name: String,
}

impl StationView {
    fn from_station(station: &Station) -> Self {
        Self {
            id: station.id().0,
            name: station.name().to_string(),
        }
    }
}

/// A segment as rendered to callers.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentView {
    /// Up-end station id
    pub up_station_id: u64,

    /// Down-end station id
    pub down_station_id: u64,

    /// Segment length
    pub distance: u32,
}

impl SegmentView {
    fn from_segment(segment: &Segment) -> Self {
        Self {
            up_station_id: segment.up_station().id().0,
            down_station_id: segment.down_station().id().0,
            distance: segment.distance(),
        }
    }
}

/// A line with its stations and segments in traversal order.
#[derive(Debug, Clone, Serialize)]
pub struct LineView {
    /// Stable line id
    pub id: u64,

    /// Line name
    pub name: String,

    /// Display colour
    pub color: String,

    /// Stations in up-to-down order
    pub stations: Vec<StationView>,

    /// Segments in up-to-down order
    pub segments: Vec<SegmentView>,

    /// Sum of segment distances
    pub total_distance: u64,
}

impl LineView {
    /// Snapshot a line for presentation.
    pub fn from_line(line: &Line) -> Self {
        Self {
            id: line.id().0,
            name: line.name().to_string(),
            color: line.color().to_string(),
            stations: line
                .stations()
                .into_iter()
                .map(StationView::from_station)
                .collect(),
            segments: line
                .chain()
                .ordered_segments()
                .into_iter()
                .map(SegmentView::from_segment)
                .collect(),
            total_distance: line.total_distance(),
        }
    }
}
