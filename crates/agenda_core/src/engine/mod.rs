//! Agenda timing engine.
//!
//! # Responsibility
//! - Lay out topic slots, analyze the scheduled-end boundary and run the
//!   live countdown as pure functions of their inputs.
//!
//! # Invariants
//! - No function here mutates its inputs or performs I/O.
//! - Identical inputs and clock sample always give identical outputs.
//! - Malformed data degrades to a documented default; nothing returns errors.

pub mod layout;
pub mod ordering;
pub mod overrun;
pub mod timer;
