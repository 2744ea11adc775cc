//! Provider SDK
//!
//! The pieces a Terraform-style provider is assembled from:
//!
//! - [`schema`]: attribute trees, derived from `schemars` models
//! - [`validators`]: value constraints, including Kubernetes metadata rules
//! - [`value`]: translation of configuration values into manifest fields
//! - [`validate`]: configuration validation against a schema
//! - [`resource`]: the [`Resource`] lifecycle trait and its messages
//! - [`server`]: the [`ProviderServer`] registry driving resources
//! - [`diagnostics`]: problem reports returned instead of errors
//!
//! # Features
//!
//! - `test-util`: deterministic clocks ([`FixedClock`], [`SequenceClock`],
//!   [`BrokenClock`]) for tests

pub mod clock;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod path;
pub mod resource;
pub mod schema;
pub mod server;
pub mod validate;
pub mod validators;
pub mod value;
#[cfg(feature = "test-util")]
pub mod mock;

pub use clock::{Clock, SystemClock};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::SdkError;
pub use path::AttributePath;
pub use resource::*;
pub use schema::{Attribute, AttributeKind, Attributes, Element, Requirement, Schema};
pub use server::{ApplyResponse, ProviderServer};
pub use validators::Validator;
#[cfg(feature = "test-util")]
pub use mock::{BrokenClock, FixedClock, SequenceClock};
