//! Export of laid out topologies.

pub mod svg;
