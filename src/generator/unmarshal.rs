//! Per-binding items of the descriptor unit: the route pattern, the client
//! path builder, the lookup tables and the request unmarshaler, plus the
//! HTTP handler that ties the unmarshaler to the RPC call.
//!
//! The pattern and the builder come from one [`PathTemplate`] and the
//! unmarshaler from one [`BindingPlan`], so the server and the client always
//! agree on which fields travel in the path.
//!
//! [`PathTemplate`]: crate::binding::PathTemplate

use super::context::{ImportContext, PROTO, RUNTIME};
use super::naming::{method_fn_name, sanitize_rust_identifier, type_path, BindingNames, ServiceNames};
use super::writer::{fmt_literal, str_literal, CodeBuf};
use crate::binding::{BindingPlan, Stage};
use crate::descriptor::{Binding, MethodDescriptor, ServiceDescriptor};

/// Stage context attached to binder errors.
pub const QUERY_CONTEXT: &str = "couldn't populate field from query";
pub const BODY_CONTEXT: &str = "couldn't read request body";
pub const PATH_CONTEXT: &str = "couldn't populate field from path";

/// `pub const PATTERN_USERS_GET_USER_0: &str = "/v1/users/{id}";`
pub fn emit_pattern(names: &BindingNames, b: &Binding) -> String {
    format!(
        "pub const {}: &str = {};\n",
        names.pattern,
        str_literal(b.path.router_form())
    )
}

/// The client path builder: one positional argument per path param, in
/// declared order, formatted into the interpolation form.
pub fn emit_builder(names: &BindingNames, b: &Binding) -> String {
    let args: Vec<String> = b
        .path_params
        .iter()
        .map(|p| {
            format!(
                "{}: {}",
                sanitize_rust_identifier(&p.field),
                p.ty.rust_arg_type().unwrap_or("&str")
            )
        })
        .collect();
    let mut buf = CodeBuf::new();
    buf.open(format!(
        "pub fn {}({}) -> String {{",
        names.builder,
        args.join(", ")
    ));
    if b.has_path_params() {
        let values: Vec<String> = b
            .path_params
            .iter()
            .map(|p| sanitize_rust_identifier(&p.field))
            .collect();
        buf.line(format!(
            "format!({}, {})",
            str_literal(&b.path.interpolation_form()),
            values.join(", ")
        ));
    } else {
        buf.line(format!("{}.to_string()", str_literal(b.path.router_form())));
    }
    buf.close("}");
    buf.finish()
}

/// Module-level tables read by the unmarshaler.
///
/// The explicit-parameter table is left out entirely under the wildcard
/// marker, along with the query stage that reads it.
pub fn emit_tables(names: &BindingNames, plan: &BindingPlan) -> String {
    let mut buf = CodeBuf::new();
    if let Some(table) = plan.query_table() {
        buf.line(format!(
            "static {}: &[&str] = &[{}];",
            names.bound_params,
            quoted_list(table)
        ));
    }
    if !plan.path_fields().is_empty() {
        buf.line(format!(
            "static {}: &[&str] = &[{}];",
            names.path_params,
            quoted_list(plan.path_fields())
        ));
    }
    buf.finish()
}

fn quoted_list(items: &[String]) -> String {
    items
        .iter()
        .map(|s| str_literal(s))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The decode routine of one binding, stages in plan order.
pub fn emit_unmarshaler(
    ctx: &ImportContext,
    names: &BindingNames,
    m: &MethodDescriptor,
    b: &Binding,
    plan: &BindingPlan,
) -> String {
    let request = ctx.qualify(PROTO, &type_path(&m.request_type));
    let rt = |item: &str| ctx.qualify(RUNTIME, item);
    let inbound = if plan.decodes_body() { "inbound" } else { "_inbound" };
    let params = if plan.path_fields().is_empty() {
        "_params"
    } else {
        "params"
    };

    let req = if plan.query_table().is_some() || plan.decodes_body() {
        "req"
    } else {
        "_req"
    };

    let mut buf = CodeBuf::new();
    buf.line(format!("fn {}(", names.unmarshaler))
        .line(format!("    {}: &{},", req, rt("Request")))
        .line(format!("    {}: &{},", params, rt("PathParams")))
        .line(format!("    {}: &dyn {},", inbound, rt("Marshaler")))
        .open(format!(") -> Result<{}, {}> {{", request, rt("BindError")));
    buf.line(format!("let mut msg = {}::default();", request));

    for stage in plan.stages() {
        match stage {
            Stage::Query { .. } => {
                buf.open(format!(
                    "for (key, value) in {}(req) {{",
                    rt("first_query_values")
                ))
                .open(format!(
                    "if {}.contains(&key.to_lowercase().as_str()) {{",
                    names.bound_params
                ))
                .line("continue;")
                .close("}");
                buf.line(format!("{}(&mut msg, &key, &value)", rt("populate_field")))
                    .line(format!(
                        "    .map_err(|err| {}::new({}, err))?;",
                        rt("BindError"),
                        str_literal(QUERY_CONTEXT)
                    ))
                    .close("}");
            }
            Stage::Body => {
                buf.line("inbound")
                    .line("    .unmarshal(req.body(), &mut msg)")
                    .line(format!(
                        "    .map_err(|err| {}::new({}, err))?;",
                        rt("BindError"),
                        str_literal(BODY_CONTEXT)
                    ));
            }
            Stage::Path { .. } => {
                buf.open("if params.is_empty() {")
                    .line(format!(
                        "panic!({});",
                        fmt_literal(&format!(
                            "path parameters unsupported: {} {} needs a router with named segments",
                            b.method,
                            b.path.router_form()
                        ))
                    ))
                    .close("}");
                buf.open(format!("for &field in {} {{", names.path_params))
                    .line("let value = params")
                    .line("    .get(field)")
                    .line(format!(
                        "    .ok_or_else(|| {}::missing(field))?;",
                        rt("BindError")
                    ))
                    .line(format!("{}(&mut msg, field, value)", rt("populate_field")))
                    .line(format!(
                        "    .map_err(|err| {}::new({}, err))?;",
                        rt("BindError"),
                        str_literal(PATH_CONTEXT)
                    ))
                    .close("}");
            }
        }
    }
    buf.line("Ok(msg)");
    buf.close("}");
    buf.finish()
}

/// The handler closure of one binding.
///
/// Content negotiation runs once; the inbound marshaler feeds the unmarshaler
/// and the outbound one encodes the reply or the error.
pub fn emit_handler(
    ctx: &ImportContext,
    svc_names: &ServiceNames,
    names: &BindingNames,
    m: &MethodDescriptor,
) -> String {
    let rt = |item: &str| ctx.qualify(RUNTIME, item);
    let trait_path = ctx.qualify(
        PROTO,
        &format!("{}::{}", svc_names.server_mod, svc_names.service_trait),
    );

    let mut buf = CodeBuf::new();
    buf.open(format!(
        "move |req: {}, params: &{}| -> {} {{",
        rt("Request"),
        rt("PathParams"),
        rt("Response")
    ));
    buf.line(format!(
        "let (inbound, outbound) = {}(&req);",
        rt("marshaler_for_request")
    ));
    buf.open(format!(
        "let request = match {}(&req, params, inbound.as_ref()) {{",
        names.unmarshaler
    ))
    .line("Ok(request) => request,")
    .open("Err(err) => {")
    .line(format!(
        "return {}(outbound.as_ref(), {}::bad_request(err).context(\"couldn't parse request\"));",
        rt("error_response"),
        rt("Error")
    ))
    .close("}")
    .close("};");
    buf.open(format!(
        "let reply = match {}({}::{}(&*svc, {}::new(request))) {{",
        rt("block_on"),
        trait_path,
        method_fn_name(m),
        rt("tonic::Request")
    ))
    .line("Ok(reply) => reply.into_inner(),")
    .open("Err(status) => {")
    .line(format!(
        "return {}(outbound.as_ref(), {}::from(status).context(\"returned from handler\"));",
        rt("error_response"),
        rt("Error")
    ))
    .close("}")
    .close("};");
    buf.open("match outbound.marshal(&reply) {")
        .line(format!(
            "Ok(body) => {}(outbound.as_ref(), body),",
            rt("ok_response")
        ))
        .line(format!(
            "Err(err) => {}(outbound.as_ref(), {}::internal(err).context(\"couldn't write response\")),",
            rt("error_response"),
            rt("Error")
        ))
        .close("}");
    buf.close("}");
    buf.finish()
}

/// Every per-binding item of a service, in declaration order.
pub fn emit_patterns(ctx: &ImportContext, svc: &ServiceDescriptor) -> String {
    let mut sections = Vec::new();
    for m in &svc.methods {
        for b in &m.bindings {
            let names = BindingNames::new(svc, m, b);
            let plan = BindingPlan::for_binding(b);
            let mut section = emit_pattern(&names, b);
            section.push('\n');
            section.push_str(&emit_builder(&names, b));
            let tables = emit_tables(&names, &plan);
            if !tables.is_empty() {
                section.push('\n');
                section.push_str(&tables);
            }
            section.push('\n');
            section.push_str(&emit_unmarshaler(ctx, &names, m, b, &plan));
            sections.push(section);
        }
    }
    sections.join("\n")
}
