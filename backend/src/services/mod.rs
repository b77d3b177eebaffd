//! Service layer for request handling.
//!
//! This module contains the logic that sits between the HTTP handlers and the
//! filesystem archives or the astronomy collaborator. Nothing here knows about
//! HTTP; handlers translate requests into these calls and route the
//! [`ServiceError`] results through the dispatcher.

pub mod astro;
pub mod error;
pub mod field_lines;
pub mod locator;
pub mod resolver;
pub mod validation;

pub use astro::{AstroService, EventPositionQuery, RemoteAstroService, UnconfiguredAstroService};
pub use error::{ServiceError, ServiceResult};
pub use field_lines::FieldLineArchive;
pub use locator::ResourceLocationBuilder;
pub use resolver::{resolve, scan_candidates};
pub use validation::{require, validate, ParameterSource};
