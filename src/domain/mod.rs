//! Strict domain entities.
//!
//! Everything in this module is a validated value object: enums instead of
//! string tags, typed timestamps instead of raw strings, and sequences that
//! are never "absent". The loosely-typed wire shapes live in [`crate::wire`]
//! and are converted here through total, infallible mappings.

pub mod alert;
pub mod notification;
pub mod user;

pub use alert::{Alert, AlertStatus, EmergencyType};
pub use notification::{AlertNotification, NotificationType};
pub use user::{AuthTokens, UserProfile, UserRole};
