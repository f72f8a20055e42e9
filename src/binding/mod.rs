//! # Binding Module
//!
//! The binding compiler: everything derived from a single HTTP binding before
//! any source text is produced.
//!
//! - **[`path`]** - parses a path template into its router form (`/v1/users/{id}`)
//!   and interpolation form (`/v1/users/{}`)
//! - **[`binder`]** - decides which request fields come from the query, the body
//!   and the path, and in which order
//! - **[`mux`]** - decides how the binding is registered on advanced and basic routers
//!
//! The three results must agree with each other: a placeholder the router
//! extracts is a path stage field of the binder and an argument of the client
//! path builder, in the same order.
//!
//! ```rust
//! use rpcgate::binding::PathTemplate;
//!
//! let tmpl = PathTemplate::parse("/v1/users/{id}").unwrap();
//! assert_eq!(tmpl.router_form(), "/v1/users/{id}");
//! assert_eq!(tmpl.interpolation_form(), "/v1/users/{}");
//! assert_eq!(tmpl.interpolate(&["42"]).as_deref(), Some("/v1/users/42"));
//! ```

pub mod binder;
pub mod mux;
pub mod path;

pub use binder::{BindingPlan, Source, Stage};
pub use mux::{check_router_target, BasicArm, MuxPlan, RouterTarget};
pub use path::{PathTemplate, PathTemplateError, Segment, INTERPOLATION_MARKER};
