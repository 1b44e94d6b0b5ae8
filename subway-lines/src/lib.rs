//! Subway line segment-chain core.
//!
//! Models a transit line as an ordered chain of track segments between
//! stations and keeps that chain consistent as segments are inserted or
//! removed: splicing at either end, splitting an existing segment,
//! merging around a removed station, and producing the canonical
//! up-to-down traversal used by every listing.

pub mod domain;
pub mod dto;
