//! Topograph Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Topograph
//! renderer. It includes:
//!
//! - **Topology**: The in-memory application topology ([`topology`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: SVG drawing definitions for strokes, labels and layers ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod topology;
