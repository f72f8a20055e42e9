use super::client::emit_client;
use super::context::{ImportContext, RUNTIME};
use super::docs::emit_swagger_const;
use super::registrar::emit_desc;
use super::unmarshal::emit_patterns;
use crate::config::GeneratorConfig;
use crate::descriptor::FileDescriptor;

pub const GENERATED_HEADER: &str = "// Code generated by rpcgate-gen. DO NOT EDIT.";

/// Header, imports and the runtime version assertion.
pub fn emit_header(ctx: &ImportContext, file: &FileDescriptor) -> String {
    let mut out = String::new();
    out.push_str(GENERATED_HEADER);
    out.push('\n');
    out.push_str(&format!("// source: {}\n\n", file.name));
    out.push_str("#![allow(dead_code, clippy::all)]\n\n");
    for line in ctx.use_lines() {
        out.push_str(&line);
        out.push('\n');
    }
    out.push('\n');
    out.push_str("// Fails to compile against an incompatible runtime crate.\n");
    out.push_str(&format!(
        "const _: () = {};\n",
        ctx.qualify(RUNTIME, "IS_VERSION_1")
    ));
    out
}

/// The descriptor unit of one file.
///
/// Sections are concatenated in a fixed order (header, descriptor types,
/// documentation blob, clients, per-binding items) so the same model always
/// renders to the same bytes.
pub fn render_descriptor_unit(file: &FileDescriptor, config: &GeneratorConfig) -> String {
    let ctx = ImportContext::new(&config.runtime_crate, &config.proto_module);
    let mut sections = vec![emit_header(&ctx, file)];
    sections.extend(
        file.services
            .iter()
            .map(|svc| emit_desc(&ctx, svc, config.router)),
    );
    sections.push(emit_swagger_const(file.swagger.as_deref()));
    sections.extend(file.services.iter().map(|svc| emit_client(&ctx, svc)));
    sections.extend(
        file.services
            .iter()
            .map(|svc| emit_patterns(&ctx, svc))
            .filter(|s| !s.is_empty()),
    );
    sections.join("\n")
}
