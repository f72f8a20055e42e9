use askama::Template;

use super::context::{ImportContext, DESC, PROTO, RUNTIME};
use super::naming::{method_fn_name, type_path, ServiceNames};
use super::project::descriptor_module_name;
use crate::config::GeneratorConfig;
use crate::descriptor::{FileDescriptor, ServiceDescriptor};
use crate::error::GenerateError;

/// One RPC stub of the scaffold
#[derive(Debug, Clone)]
pub struct ScaffoldMethod {
    /// Trait method name (`get_user`)
    pub fn_name: String,
    /// Qualified request type
    pub request: String,
    /// Qualified response type
    pub response: String,
    /// `Users.GetUser`, used in the not-implemented status
    pub label: String,
}

/// One service of the scaffold
#[derive(Debug, Clone)]
pub struct ScaffoldService {
    pub service_trait: String,
    pub impl_type: String,
    /// Qualified tonic service trait
    pub trait_path: String,
    /// Qualified descriptor type from the descriptor unit
    pub desc_type: String,
    pub methods: Vec<ScaffoldMethod>,
}

impl ScaffoldService {
    fn new(ctx: &ImportContext, svc: &ServiceDescriptor) -> Self {
        let names = ServiceNames::new(svc);
        let methods = svc
            .methods
            .iter()
            .map(|m| ScaffoldMethod {
                fn_name: method_fn_name(m),
                request: ctx.qualify(PROTO, &type_path(&m.request_type)),
                response: ctx.qualify(PROTO, &type_path(&m.response_type)),
                label: format!("{}.{}", svc.name, m.name),
            })
            .collect();
        Self {
            trait_path: ctx.qualify(
                PROTO,
                &format!("{}::{}", names.server_mod, names.service_trait),
            ),
            desc_type: ctx.qualify(DESC, &names.desc),
            service_trait: names.service_trait,
            impl_type: names.impl_type,
            methods,
        }
    }
}

/// Template data for the implementation scaffold unit
#[derive(Template)]
#[template(path = "impl.rs.txt", escape = "none")]
pub struct ImplTemplateData {
    /// Input file name
    pub source: String,
    pub use_lines: Vec<String>,
    /// Qualified path of the tonic re-export
    pub tonic: String,
    pub services: Vec<ScaffoldService>,
}

/// Render the implementation scaffold of one file: a constructor and a
/// not-implemented stub per RPC.
pub fn render_impl_unit(
    file: &FileDescriptor,
    config: &GeneratorConfig,
) -> Result<String, GenerateError> {
    let ctx = ImportContext::new(&config.runtime_crate, &config.proto_module)
        .with_desc(&format!("super::{}", descriptor_module_name(file)));
    let data = ImplTemplateData {
        source: file.name.clone(),
        use_lines: ctx.use_lines(),
        tonic: ctx.qualify(RUNTIME, "tonic"),
        services: file
            .services
            .iter()
            .map(|svc| ScaffoldService::new(&ctx, svc))
            .collect(),
    };
    Ok(data.render()?)
}
