//! High-level backend operations mapped to domain entities.

pub mod client;

pub use client::{AlertDraft, AlertFilter, RescueClient};
