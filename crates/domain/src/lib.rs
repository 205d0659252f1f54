//! # battm-domain
//!
//! Pure domain model for the battm battery monitor.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Bounds** (the user-configured `min_charge` / `max_charge` pair)
//! - Define **Samples** (one instantaneous battery reading)
//! - Define **Alerts** (the notification produced when a threshold is crossed)
//! - Define the **threshold policy** deciding whether a sample qualifies
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod alert;
pub mod bounds;
pub mod policy;
pub mod sample;
