//! Segment chain maintenance.
//!
//! A [`SegmentChain`] owns the segments of one line and enforces the
//! single-simple-path topology: every successful mutation leaves exactly
//! one up-end, exactly one down-end, and no branches, cycles or
//! duplicate edges. Storage is an unordered `Vec`; ordering is
//! reconstructed on demand by walking down-station to up-station links,
//! which is O(n²) for a full traversal and fine at the few dozen
//! segments a line ever has.

use std::collections::HashSet;

use tracing::{debug, trace};

use super::{ChainError, Segment, Station, StationId};

/// The segments of one line, kept as a single simple path.
///
/// All validation happens before any structural mutation, so a failed
/// [`add`](SegmentChain::add) or [`remove`](SegmentChain::remove) leaves
/// the chain unchanged. The chain performs no locking; callers serialize
/// writers externally.
#[derive(Debug, Clone, Default)]
pub struct SegmentChain {
    segments: Vec<Segment>,
}

impl SegmentChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of segments in the chain.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True if the chain holds no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True if any segment has `station` as either endpoint.
    pub fn contains_station(&self, station: &Station) -> bool {
        self.segments.iter().any(|s| s.has_station(station))
    }

    /// Inserts a new segment into the chain.
    ///
    /// An empty chain accepts any segment; that segment defines both
    /// termini. Otherwise the segment must extend a terminus or split an
    /// existing segment it shares exactly one endpoint with.
    ///
    /// # Errors
    ///
    /// - [`ChainError::DisconnectedInsert`] if the segment touches no
    ///   current station, or no terminal/split position matches
    /// - [`ChainError::RedundantInsert`] if both endpoints are already
    ///   connected via the chain
    /// - [`ChainError::OverlengthInsert`] if a split would not leave a
    ///   positive remainder
    pub fn add(&mut self, segment: Segment) -> Result<(), ChainError> {
        if self.segments.is_empty() {
            debug!(
                up = %segment.up_station().id(),
                down = %segment.down_station().id(),
                "seeding empty chain"
            );
            self.segments.push(segment);
            return Ok(());
        }

        let has_up = self.contains_station(segment.up_station());
        let has_down = self.contains_station(segment.down_station());

        match (has_up, has_down) {
            (false, false) => Err(ChainError::DisconnectedInsert),
            (true, true) => Err(ChainError::RedundantInsert),
            (true, false) => self.insert_downward(segment),
            (false, true) => self.insert_upward(segment),
        }
    }

    /// The known station is the new segment's up end: append at the
    /// down terminus, or split the segment currently departing from it.
    fn insert_downward(&mut self, segment: Segment) -> Result<(), ChainError> {
        if self.down_end_station()?.id() == segment.up_station().id() {
            trace!(station = %segment.up_station().id(), "appending at down end");
            self.segments.push(segment);
            return Ok(());
        }

        let target = self.split_target(|s| s.has_same_up(segment.up_station()))?;
        let existing = &self.segments[target];
        let remainder = self.split_remainder(&segment, existing)?;
        let complement = Segment::new(
            existing.line(),
            segment.down_station().clone(),
            existing.down_station().clone(),
            remainder,
        )?;
        debug!(
            at = %segment.up_station().id(),
            inserted = segment.distance(),
            remainder,
            "splitting segment on shared up station"
        );
        self.segments.swap_remove(target);
        self.segments.push(segment);
        self.segments.push(complement);
        Ok(())
    }

    /// The known station is the new segment's down end: prepend at the
    /// up terminus, or split the segment currently arriving at it.
    fn insert_upward(&mut self, segment: Segment) -> Result<(), ChainError> {
        if self.up_end_station()?.id() == segment.down_station().id() {
            trace!(station = %segment.down_station().id(), "prepending at up end");
            self.segments.push(segment);
            return Ok(());
        }

        let target = self.split_target(|s| s.has_same_down(segment.down_station()))?;
        let existing = &self.segments[target];
        let remainder = self.split_remainder(&segment, existing)?;
        let complement = Segment::new(
            existing.line(),
            existing.up_station().clone(),
            segment.up_station().clone(),
            remainder,
        )?;
        debug!(
            at = %segment.down_station().id(),
            inserted = segment.distance(),
            remainder,
            "splitting segment on shared down station"
        );
        self.segments.swap_remove(target);
        self.segments.push(complement);
        self.segments.push(segment);
        Ok(())
    }

    /// Index of the unique segment matching the split predicate.
    ///
    /// Uniqueness holds because at most one segment departs from (or
    /// arrives at) any station on a simple path; asserted rather than
    /// assumed.
    fn split_target(&self, pred: impl Fn(&Segment) -> bool) -> Result<usize, ChainError> {
        let mut candidates = self
            .segments
            .iter()
            .enumerate()
            .filter(|(_, s)| pred(s))
            .map(|(i, _)| i);
        let first = candidates.next().ok_or(ChainError::DisconnectedInsert)?;
        debug_assert!(
            candidates.next().is_none(),
            "simple path broken: two segments share a directed endpoint"
        );
        Ok(first)
    }

    /// Length left over for the complement segment after a split.
    fn split_remainder(&self, inserted: &Segment, existing: &Segment) -> Result<u32, ChainError> {
        existing
            .distance()
            .checked_sub(inserted.distance())
            .filter(|remainder| *remainder > 0)
            .ok_or(ChainError::OverlengthInsert {
                inserted: inserted.distance(),
                existing: existing.distance(),
            })
    }

    /// Removes a station from the chain.
    ///
    /// Removing a terminus drops its segment; removing an interior
    /// station merges its two adjacent segments into one spanning
    /// segment with the summed distance.
    ///
    /// # Errors
    ///
    /// - [`ChainError::ChainTooShort`] if only one segment remains
    /// - [`ChainError::StationNotFound`] if the station is not on the
    ///   chain
    /// - [`ChainError::InvalidSegment`] if an interior merge's summed
    ///   distance would overflow
    pub fn remove(&mut self, station: &Station) -> Result<(), ChainError> {
        if self.segments.len() <= 1 {
            return Err(ChainError::ChainTooShort);
        }
        if !self.contains_station(station) {
            return Err(ChainError::StationNotFound);
        }

        let up_end = self.up_end_station()?.id();
        let down_end = self.down_end_station()?.id();

        // Exactly one branch applies: a station is a sole up-end, a sole
        // down-end, or has both a predecessor and a successor.
        if station.id() == up_end {
            trace!(station = %station.id(), "trimming up end");
            self.drop_segment(|s| s.has_same_up(station))
        } else if station.id() == down_end {
            trace!(station = %station.id(), "trimming down end");
            self.drop_segment(|s| s.has_same_down(station))
        } else {
            self.merge_around(station)
        }
    }

    fn drop_segment(&mut self, pred: impl Fn(&Segment) -> bool) -> Result<(), ChainError> {
        let idx = self
            .segments
            .iter()
            .position(pred)
            .ok_or(ChainError::StationNotFound)?;
        self.segments.swap_remove(idx);
        Ok(())
    }

    /// Replaces the two segments meeting at an interior station with one
    /// segment covering their combined span.
    fn merge_around(&mut self, station: &Station) -> Result<(), ChainError> {
        let before_idx = self
            .segments
            .iter()
            .position(|s| s.has_same_down(station))
            .ok_or(ChainError::StationNotFound)?;
        let after_idx = self
            .segments
            .iter()
            .position(|s| s.has_same_up(station))
            .ok_or(ChainError::StationNotFound)?;

        let before = &self.segments[before_idx];
        let after = &self.segments[after_idx];
        let distance = before
            .distance()
            .checked_add(after.distance())
            .ok_or(ChainError::InvalidSegment("merged distance overflows"))?;
        let merged = Segment::new(
            before.line(),
            before.up_station().clone(),
            after.down_station().clone(),
            distance,
        )?;
        debug!(
            station = %station.id(),
            merged_distance = merged.distance(),
            "merging segments around interior station"
        );

        // Remove the higher index first so the lower stays valid.
        let (hi, lo) = if before_idx > after_idx {
            (before_idx, after_idx)
        } else {
            (after_idx, before_idx)
        };
        self.segments.swap_remove(hi);
        self.segments.swap_remove(lo);
        self.segments.push(merged);
        Ok(())
    }

    /// The unique station appearing only as an up-station.
    ///
    /// Computed by set-subtraction over all endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::StationNotFound`] on an empty chain rather
    /// than an arbitrary value.
    pub fn up_end_station(&self) -> Result<&Station, ChainError> {
        let down_ids: HashSet<StationId> =
            self.segments.iter().map(|s| s.down_station().id()).collect();
        self.segments
            .iter()
            .map(Segment::up_station)
            .find(|s| !down_ids.contains(&s.id()))
            .ok_or(ChainError::StationNotFound)
    }

    /// The unique station appearing only as a down-station.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::StationNotFound`] on an empty chain.
    pub fn down_end_station(&self) -> Result<&Station, ChainError> {
        let up_ids: HashSet<StationId> =
            self.segments.iter().map(|s| s.up_station().id()).collect();
        self.segments
            .iter()
            .map(Segment::down_station)
            .find(|s| !up_ids.contains(&s.id()))
            .ok_or(ChainError::StationNotFound)
    }

    /// Segments in up-to-down traversal order.
    ///
    /// The canonical traversal behind every station, name and distance
    /// listing. Walks from the up end, repeatedly taking the segment
    /// whose up-station is the previous segment's down-station. Returns
    /// an empty vec on an empty chain.
    pub fn ordered_segments(&self) -> Vec<&Segment> {
        let Ok(start) = self.up_end_station() else {
            return Vec::new();
        };

        let mut ordered = Vec::with_capacity(self.segments.len());
        let mut cursor = start;
        while ordered.len() < self.segments.len() {
            let Some(next) = self.segments.iter().find(|s| s.has_same_up(cursor)) else {
                break;
            };
            ordered.push(next);
            cursor = next.down_station();
        }
        ordered
    }

    /// Distinct stations in traversal order.
    pub fn ordered_stations(&self) -> Vec<&Station> {
        let mut stations: Vec<&Station> = Vec::with_capacity(self.segments.len() + 1);
        for segment in self.ordered_segments() {
            for station in segment.endpoints() {
                if stations.last() != Some(&station) {
                    stations.push(station);
                }
            }
        }
        stations
    }

    /// Display names of the stations in traversal order.
    pub fn station_names(&self) -> Vec<String> {
        self.ordered_stations()
            .into_iter()
            .map(|s| s.name().to_string())
            .collect()
    }

    /// Sum of segment distances along the traversal.
    pub fn total_distance(&self) -> u64 {
        self.ordered_segments()
            .iter()
            .map(|s| u64::from(s.distance()))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LineId;

    const LINE: LineId = LineId(21);

    fn station(id: u64, name: &str) -> Station {
        Station::new(StationId(id), name)
    }

    fn segment(up: &Station, down: &Station, distance: u32) -> Segment {
        Segment::new(LINE, up.clone(), down.clone(), distance).unwrap()
    }

    /// Chain Giheung -(10)- Singal -(9)- Jeongja, as in most cases below.
    fn base_chain() -> (SegmentChain, Station, Station, Station) {
        let giheung = station(11, "Giheung");
        let singal = station(12, "Singal");
        let jeongja = station(13, "Jeongja");

        let mut chain = SegmentChain::new();
        chain.add(segment(&giheung, &singal, 10)).unwrap();
        chain.add(segment(&singal, &jeongja, 9)).unwrap();
        (chain, giheung, singal, jeongja)
    }

    fn names(chain: &SegmentChain) -> Vec<String> {
        chain.station_names()
    }

    fn distances(chain: &SegmentChain) -> Vec<u32> {
        chain
            .ordered_segments()
            .iter()
            .map(|s| s.distance())
            .collect()
    }

    #[test]
    fn empty_chain_accepts_first_segment() {
        let mut chain = SegmentChain::new();
        assert!(chain.is_empty());

        let a = station(1, "A");
        let b = station(2, "B");
        chain.add(segment(&a, &b, 10)).unwrap();

        assert_eq!(chain.len(), 1);
        assert_eq!(chain.up_end_station().unwrap(), &a);
        assert_eq!(chain.down_end_station().unwrap(), &b);
    }

    #[test]
    fn terminus_queries_fail_on_empty_chain() {
        let chain = SegmentChain::new();
        assert_eq!(chain.up_end_station(), Err(ChainError::StationNotFound));
        assert_eq!(chain.down_end_station(), Err(ChainError::StationNotFound));
        assert!(chain.ordered_segments().is_empty());
        assert!(chain.ordered_stations().is_empty());
        assert_eq!(chain.total_distance(), 0);
    }

    #[test]
    fn split_on_shared_down_station() {
        let (mut chain, _, _, jeongja) = base_chain();
        let guseong = station(14, "Guseong");

        chain.add(segment(&guseong, &jeongja, 3)).unwrap();

        assert_eq!(names(&chain), ["Giheung", "Singal", "Guseong", "Jeongja"]);
        assert_eq!(distances(&chain), [10, 6, 3]);
    }

    #[test]
    fn split_on_shared_up_station() {
        let (mut chain, giheung, ..) = base_chain();
        let guseong = station(14, "Guseong");

        chain.add(segment(&giheung, &guseong, 4)).unwrap();

        assert_eq!(names(&chain), ["Giheung", "Guseong", "Singal", "Jeongja"]);
        assert_eq!(distances(&chain), [4, 6, 9]);
    }

    #[test]
    fn prepend_at_up_end() {
        let (mut chain, giheung, ..) = base_chain();
        let guseong = station(14, "Guseong");

        chain.add(segment(&guseong, &giheung, 3)).unwrap();

        assert_eq!(names(&chain), ["Guseong", "Giheung", "Singal", "Jeongja"]);
        assert_eq!(distances(&chain), [3, 10, 9]);
    }

    #[test]
    fn append_at_down_end() {
        let (mut chain, _, _, jeongja) = base_chain();
        let guseong = station(14, "Guseong");

        chain.add(segment(&jeongja, &guseong, 3)).unwrap();

        assert_eq!(names(&chain), ["Giheung", "Singal", "Jeongja", "Guseong"]);
        assert_eq!(distances(&chain), [10, 9, 3]);
    }

    #[test]
    fn split_rejects_equal_or_longer_distance() {
        for distance in [9, 10, 11] {
            let (mut chain, _, _, jeongja) = base_chain();
            let guseong = station(14, "Guseong");

            let err = chain.add(segment(&guseong, &jeongja, distance)).unwrap_err();
            assert_eq!(
                err,
                ChainError::OverlengthInsert {
                    inserted: distance,
                    existing: 9,
                }
            );
            // Rejected insert leaves the chain untouched
            assert_eq!(distances(&chain), [10, 9]);
        }
    }

    #[test]
    fn reject_when_both_stations_already_connected() {
        let (mut chain, giheung, _, jeongja) = base_chain();

        let err = chain.add(segment(&giheung, &jeongja, 10)).unwrap_err();
        assert_eq!(err, ChainError::RedundantInsert);
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn reject_duplicate_of_existing_segment() {
        let (mut chain, giheung, singal, _) = base_chain();

        let err = chain.add(segment(&giheung, &singal, 10)).unwrap_err();
        assert_eq!(err, ChainError::RedundantInsert);
    }

    #[test]
    fn reject_when_neither_station_known() {
        let (mut chain, ..) = base_chain();
        let suwon = station(21, "Suwon");
        let ori = station(22, "Ori");

        let err = chain.add(segment(&suwon, &ori, 10)).unwrap_err();
        assert_eq!(err, ChainError::DisconnectedInsert);
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn remove_up_end_trims_first_segment() {
        let (mut chain, giheung, ..) = base_chain();

        chain.remove(&giheung).unwrap();

        assert_eq!(names(&chain), ["Singal", "Jeongja"]);
        assert_eq!(distances(&chain), [9]);
    }

    #[test]
    fn remove_down_end_trims_last_segment() {
        let (mut chain, _, _, jeongja) = base_chain();

        chain.remove(&jeongja).unwrap();

        assert_eq!(names(&chain), ["Giheung", "Singal"]);
        assert_eq!(distances(&chain), [10]);
    }

    #[test]
    fn remove_interior_station_merges_segments() {
        let (mut chain, _, singal, _) = base_chain();

        chain.remove(&singal).unwrap();

        assert_eq!(names(&chain), ["Giheung", "Jeongja"]);
        assert_eq!(distances(&chain), [19]);
        assert_eq!(chain.total_distance(), 19);
    }

    #[test]
    fn remove_interior_rejected_when_merged_distance_overflows() {
        let a = station(1, "A");
        let b = station(2, "B");
        let c = station(3, "C");

        let mut chain = SegmentChain::new();
        chain.add(segment(&a, &b, 3_000_000_000)).unwrap();
        chain.add(segment(&b, &c, 3_000_000_000)).unwrap();

        let err = chain.remove(&b).unwrap_err();
        assert_eq!(
            err,
            ChainError::InvalidSegment("merged distance overflows")
        );
        // Rejected merge leaves the chain untouched
        assert_eq!(names(&chain), ["A", "B", "C"]);
        assert_eq!(distances(&chain), [3_000_000_000, 3_000_000_000]);
    }

    #[test]
    fn remove_rejected_with_single_segment() {
        let mut chain = SegmentChain::new();
        let a = station(1, "A");
        let b = station(2, "B");
        chain.add(segment(&a, &b, 10)).unwrap();

        assert_eq!(chain.remove(&a), Err(ChainError::ChainTooShort));
        assert_eq!(chain.remove(&b), Err(ChainError::ChainTooShort));
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn remove_rejected_for_unknown_station() {
        let (mut chain, ..) = base_chain();
        let samga = station(135, "Samga");

        assert_eq!(chain.remove(&samga), Err(ChainError::StationNotFound));
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn size_guard_checked_before_membership() {
        // A single-segment chain rejects removal even of a known station
        let mut chain = SegmentChain::new();
        let a = station(1, "A");
        let b = station(2, "B");
        chain.add(segment(&a, &b, 10)).unwrap();
        let elsewhere = station(3, "C");

        assert_eq!(chain.remove(&elsewhere), Err(ChainError::ChainTooShort));
    }

    #[test]
    fn ordered_segments_is_restartable() {
        let (chain, ..) = base_chain();

        let first = chain.ordered_segments();
        let second = chain.ordered_segments();
        assert_eq!(first, second);
        assert_eq!(first.len(), chain.len());
    }

    #[test]
    fn ordering_is_independent_of_insertion_order() {
        // Build the same path by splitting and prepending rather than
        // appending; the traversal must come out identical.
        let giheung = station(11, "Giheung");
        let singal = station(12, "Singal");
        let jeongja = station(13, "Jeongja");

        let mut chain = SegmentChain::new();
        chain.add(segment(&giheung, &jeongja, 19)).unwrap();
        chain.add(segment(&giheung, &singal, 10)).unwrap();

        assert_eq!(names(&chain), ["Giheung", "Singal", "Jeongja"]);
        assert_eq!(distances(&chain), [10, 9]);
        assert_eq!(chain.total_distance(), 19);
    }

    #[test]
    fn total_distance_matches_ordered_sum() {
        let (mut chain, _, _, jeongja) = base_chain();
        let guseong = station(14, "Guseong");
        chain.add(segment(&jeongja, &guseong, 7)).unwrap();

        assert_eq!(chain.total_distance(), 26);
        let sum: u64 = chain
            .ordered_segments()
            .iter()
            .map(|s| u64::from(s.distance()))
            .sum();
        assert_eq!(chain.total_distance(), sum);
    }

    #[test]
    fn contains_station_checks_both_endpoints() {
        let (chain, giheung, singal, jeongja) = base_chain();
        assert!(chain.contains_station(&giheung));
        assert!(chain.contains_station(&singal));
        assert!(chain.contains_station(&jeongja));
        assert!(!chain.contains_station(&station(99, "Nowhere")));
    }
}
