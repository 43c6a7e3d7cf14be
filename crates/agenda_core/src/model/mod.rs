//! Agenda records read by the timing engine.
//!
//! # Responsibility
//! - Define the topic and meeting shapes handed over by persistence.
//! - Normalize type-ambiguous numeric and instant fields at the boundary.
//!
//! # Invariants
//! - Every topic is identified by a stable `TopicId`.
//! - Deletion is represented by soft-delete tombstones, not hard delete.

pub mod instant;
pub mod lenient;
pub mod meeting;
pub mod minutes;
pub mod topic;
