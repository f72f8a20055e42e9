//! # Descriptor Module
//!
//! The input model of the generator: files, services, methods and their HTTP
//! bindings. The model is built once per invocation from a descriptor document
//! (YAML or JSON) and is immutable afterwards; every emitter reads it, none
//! writes it.
//!
//! ```text
//! FileDescriptor
//! └── ServiceDescriptor
//!     └── MethodDescriptor
//!         └── Binding ── PathParam
//! ```
//!
//! ## Document Format
//!
//! ```yaml
//! files:
//!   - name: users.proto
//!     swagger: users.swagger.json
//!     services:
//!       - name: Users
//!         methods:
//!           - name: GetUser
//!             request: GetUserRequest
//!             response: User
//!             bindings:
//!               - method: GET
//!                 path: /v1/users/{id}
//!                 path_params: [{ field: id, type: string }]
//! ```

mod build;
mod load;
mod types;

pub use build::*;
pub use load::*;
pub use types::*;
