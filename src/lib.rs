//! Skillquest: AI-assisted learning task recommendation.
//!
//! This crate provides the core of a task-recommendation service. A user
//! names a skill and the hours available, a generation oracle proposes one
//! learning task, and the task then moves through a strict lifecycle
//! (pending, accepted or rejected, completed) with an AI-scored submission
//! review that can complete it automatically.
//!
//! # Architecture
//!
//! Skillquest follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, APIs, etc.)
//!
//! # Modules
//!
//! - [`oracle`]: Text-in/text-out generation gateway and response sanitising
//! - [`task`]: Task generation, validation, lifecycle and submission analysis
//! - [`config`]: Environment-driven configuration

pub mod config;
pub mod oracle;
pub mod task;
