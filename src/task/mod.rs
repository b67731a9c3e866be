//! Task generation and lifecycle management for Skillquest.
//!
//! A task is generated by the oracle for one owner, validated at the trust
//! boundary in [`validation`], stored as `pending`, and then moved by its
//! owner through `accepted` or `rejected`. Accepted tasks can be flagged as
//! completed, soft-deleted, or completed automatically by a high-scoring
//! submission analysis. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Oracle output validation in [`validation`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;
