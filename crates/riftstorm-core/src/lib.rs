//! Core types and definitions for the RIFTSTORM simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, host commands and input, configuration, views, events,
//! and tuning constants. It contains no simulation logic.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod input;
pub mod loadout;
pub mod state;
pub mod types;
