use crate::descriptor::{Binding, FileDescriptor};
use crate::error::GenerateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Router capability the generated `register_http` is written against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum RouterTarget {
    /// Decide at registration time from the router handed in (both arms emitted)
    #[default]
    Probe,
    /// Only routers with named-segment support are accepted
    Advanced,
    /// Only literal-path routers are expected; path parameters are rejected up front
    Basic,
}

impl fmt::Display for RouterTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterTarget::Probe => write!(f, "probe"),
            RouterTarget::Advanced => write!(f, "advanced"),
            RouterTarget::Basic => write!(f, "basic"),
        }
    }
}

/// What the basic-router arm does with one binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicArm {
    /// Registered on the literal pattern; the handler checks the verb and
    /// answers 405 on mismatch
    Literal,
    /// Registered on the literal pattern with a handler that panics on first
    /// request: named segments cannot be extracted
    Unsupported,
}

/// Registration of one binding against each router capability level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MuxPlan {
    /// Registered by verb + pattern on an advanced router; `false` when the
    /// target is basic-only and the advanced arm is not emitted
    pub advanced: bool,
    /// `None` when the target is advanced-only and the basic arm is not emitted
    pub basic: Option<BasicArm>,
}

impl MuxPlan {
    pub fn for_binding(target: RouterTarget, binding: &Binding) -> Self {
        let basic = match target {
            RouterTarget::Advanced => None,
            RouterTarget::Probe | RouterTarget::Basic if binding.has_path_params() => {
                Some(BasicArm::Unsupported)
            }
            RouterTarget::Probe | RouterTarget::Basic => Some(BasicArm::Literal),
        };
        Self {
            advanced: target != RouterTarget::Basic,
            basic,
        }
    }
}

/// Reject path-parameter bindings when the target router is basic-only.
///
/// This moves the "path parameters unsupported" failure from the first
/// request to generation time.
pub fn check_router_target(
    files: &[FileDescriptor],
    target: RouterTarget,
) -> Result<(), GenerateError> {
    if target != RouterTarget::Basic {
        return Ok(());
    }
    match files
        .iter()
        .flat_map(|f| f.bindings())
        .find(|(_, _, b)| b.has_path_params())
    {
        Some((svc, m, b)) => Err(GenerateError::PathParamsUnsupported {
            service: svc.name.clone(),
            method: m.name.clone(),
            index: b.index,
            path: b.path.router_form().to_string(),
        }),
        None => Ok(()),
    }
}
