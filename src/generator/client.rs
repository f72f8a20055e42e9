use super::context::{ImportContext, PROTO, RUNTIME};
use super::naming::{method_fn_name, sanitize_rust_identifier, type_path, BindingNames, ServiceNames};
use super::writer::{str_literal, CodeBuf};
use crate::descriptor::{MethodDescriptor, ServiceDescriptor};

/// The blocking HTTP client of one service.
///
/// Each method calls the first binding of its RPC; a method without bindings
/// fails with an unsupported error instead of guessing a route.
pub fn emit_client(ctx: &ImportContext, svc: &ServiceDescriptor) -> String {
    let names = ServiceNames::new(svc);
    let transport = ctx.qualify(RUNTIME, "blocking::Client");

    let mut buf = CodeBuf::new();
    buf.line(format!(
        "/// HTTP client for `{}`, one blocking round trip per call.",
        names.service_trait
    ));
    buf.open(format!("pub struct {} {{", names.client))
        .line(format!("client: {},", transport))
        .line("base: String,")
        .close("}");
    buf.blank();
    buf.open(format!("impl {} {{", names.client));
    buf.open(format!(
        "pub fn new(client: {}, base: &str) -> Self {{",
        transport
    ))
    .line("let base = base.strip_suffix('/').unwrap_or(base).to_string();")
    .line("Self { client, base }")
    .close("}");
    for m in &svc.methods {
        buf.blank();
        buf.block(&emit_client_method(ctx, svc, m));
    }
    buf.close("}");
    buf.finish()
}

fn emit_client_method(ctx: &ImportContext, svc: &ServiceDescriptor, m: &MethodDescriptor) -> String {
    let rt = |item: &str| ctx.qualify(RUNTIME, item);
    let request = ctx.qualify(PROTO, &type_path(&m.request_type));
    let response = ctx.qualify(PROTO, &type_path(&m.response_type));
    let client_error = rt("ClientError");

    let mut buf = CodeBuf::new();
    let Some(b) = m.bindings.first() else {
        buf.open(format!(
            "pub fn {}(&self, _req: &{}) -> Result<{}, {}> {{",
            method_fn_name(m),
            request,
            response,
            client_error
        ))
        .line(format!(
            "Err({}::unsupported({}, {}))",
            client_error,
            str_literal(&svc.name),
            str_literal(&m.name)
        ))
        .close("}");
        return buf.finish();
    };

    let names = BindingNames::new(svc, m, b);
    let args: Vec<String> = b
        .path_params
        .iter()
        .map(|p| {
            let field = sanitize_rust_identifier(&p.field);
            if p.ty.passed_by_ref() {
                format!("&req.{}", field)
            } else {
                format!("req.{}", field)
            }
        })
        .collect();
    let verb = b.method.as_str();

    buf.open(format!(
        "pub fn {}(&self, req: &{}) -> Result<{}, {}> {{",
        method_fn_name(m),
        request,
        response,
        client_error
    ));
    buf.line(format!("let path = {}({});", names.builder, args.join(", ")));
    buf.line("let url = format!(\"{}{}\", self.base, path);");
    buf.line(format!("let body = {}(req)", rt("marshal_request")))
        .line(format!(
            "    .map_err(|err| {}::new(\"can't marshal request\", err))?;",
            client_error
        ));
    buf.line("let resp = self")
        .line("    .client")
        .line(format!("    .request({}, &url)", rt(&format!("http::Method::{}", verb))))
        .line(format!(
            "    .header({}, {})",
            rt("http::header::CONTENT_TYPE"),
            rt("JSON_CONTENT_TYPE")
        ))
        .line(format!(
            "    .header({}, {})",
            rt("http::header::ACCEPT"),
            rt("JSON_CONTENT_TYPE")
        ))
        .line("    .body(body)")
        .line("    .send()")
        .line(format!(
            "    .map_err(|err| {}::new(\"can't initiate HTTP request\", err))?;",
            client_error
        ));
    buf.line("let status = resp.status();");
    buf.open("if status.as_u16() >= 400 {")
        .line("let text = resp.text().unwrap_or_default();")
        .line(format!(
            "return Err({}::status({}, &url, status.as_u16(), text));",
            client_error,
            str_literal(verb)
        ))
        .close("}");
    buf.line("let bytes = resp")
        .line("    .bytes()")
        .line(format!(
            "    .map_err(|err| {}::new(\"error from client\", err))?;",
            client_error
        ));
    buf.line(format!("{}(&bytes)", rt("unmarshal_response")))
        .line(format!(
            "    .map_err(|err| {}::new(\"can't unmarshal response\", err))",
            client_error
        ));
    buf.close("}");
    buf.finish()
}
