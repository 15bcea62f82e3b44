//! Cadenza Core Types
//!
//! This crate provides the foundational value types shared by the Cadenza
//! layout engine. It includes:
//!
//! - **Identifiers**: String-interned element identities ([`identifier::Id`])
//! - **Geometry**: Points, horizontal extents and facsimile zones ([`geometry`] module)
//! - **Data**: Encoding-level enumerations such as alignment and render mode ([`data`] module)

pub mod data;
pub mod geometry;
pub mod identifier;
