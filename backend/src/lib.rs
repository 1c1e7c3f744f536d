//! Complaint lookup backend.
//!
//! Council staff authenticate with an API token and read complaints scoped
//! to their own district, either by filing office or by resident district.
//! The crate follows a hexagonal layout: [`domain`] holds types, services
//! and ports, [`inbound`] the actix-web adapter and [`outbound`] the Diesel
//! repositories.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
