//! Core use-case services.
//!
//! # Responsibility
//! - Compose engine components into presentation-ready values.
//! - Keep callers decoupled from individual engine functions.

pub mod agenda_service;
