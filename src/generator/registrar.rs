use super::context::{ImportContext, PROTO, RUNTIME};
use super::docs::emit_swagger_accessor;
use super::naming::{BindingNames, ServiceNames};
use super::unmarshal::emit_handler;
use super::writer::{fmt_literal, CodeBuf};
use crate::binding::{BasicArm, MuxPlan, RouterTarget};
use crate::descriptor::{Binding, MethodDescriptor, ServiceDescriptor};

/// The descriptor type of one service: constructor, gRPC registration,
/// documentation accessor and HTTP registration.
pub fn emit_desc(ctx: &ImportContext, svc: &ServiceDescriptor, target: RouterTarget) -> String {
    let names = ServiceNames::new(svc);
    let service_trait = ctx.qualify(
        PROTO,
        &format!("{}::{}", names.server_mod, names.service_trait),
    );
    let server = ctx.qualify(PROTO, &format!("{}::{}", names.server_mod, names.server));

    let mut buf = CodeBuf::new();
    buf.line(format!(
        "/// Binds one `{}` implementation to gRPC and HTTP servers.",
        names.service_trait
    ));
    buf.open(format!("pub struct {}<S> {{", names.desc))
        .line("svc: std::sync::Arc<S>,")
        .close("}");
    buf.blank();
    buf.line(format!("impl<S> {}<S>", names.desc))
        .line("where")
        .line(format!("    S: {},", service_trait))
        .open("{");

    buf.open("pub fn new(svc: S) -> Self {")
        .open("Self {")
        .line("svc: std::sync::Arc::new(svc),")
        .close("}")
        .close("}");
    buf.blank();

    buf.open(format!(
        "pub fn register_grpc(&self, server: &mut {}) {{",
        ctx.qualify(RUNTIME, "GrpcServer")
    ))
    .line(format!(
        "server.add_service({}::from_arc(std::sync::Arc::clone(&self.svc)));",
        server
    ))
    .close("}");
    buf.blank();

    buf.block(&emit_swagger_accessor(ctx));
    buf.blank();
    buf.block(&emit_register_http(ctx, svc, &names, target));
    buf.close("}");
    buf.finish()
}

/// `register_http`, shaped by the router target.
///
/// `probe` dispatches per binding on the router variant handed in;
/// `advanced` and `basic` unwrap the one variant they accept up front.
pub fn emit_register_http(
    ctx: &ImportContext,
    svc: &ServiceDescriptor,
    names: &ServiceNames,
    target: RouterTarget,
) -> String {
    let mux = ctx.qualify(RUNTIME, "Mux");
    let bindings: Vec<(&MethodDescriptor, &Binding)> = svc
        .methods
        .iter()
        .flat_map(|m| m.bindings.iter().map(move |b| (m, b)))
        .collect();

    let mut buf = CodeBuf::new();
    if bindings.is_empty() {
        buf.line(format!(
            "pub fn register_http(&self, _mux: &mut {}) {{}}",
            mux
        ));
        return buf.finish();
    }

    buf.open(format!("pub fn register_http(&self, mux: &mut {}) {{", mux));
    match target {
        RouterTarget::Probe => {}
        RouterTarget::Advanced => {
            buf.open("let router = match mux {")
                .line(format!("{}::Advanced(router) => router,", mux))
                .line(format!(
                    "{}::Basic(_) => panic!({}),",
                    mux,
                    fmt_literal(&format!(
                        "path parameters unsupported: {} was generated for routers with named segments",
                        names.desc
                    ))
                ))
                .close("};");
        }
        RouterTarget::Basic => {
            buf.open("let router = match mux {")
                .line(format!("{}::Basic(router) => router,", mux))
                .line(format!(
                    "{}::Advanced(_) => panic!({}),",
                    mux,
                    fmt_literal(&format!(
                        "{} was generated for literal-path routers only",
                        names.desc
                    ))
                ))
                .close("};");
        }
    }

    for (i, (m, b)) in bindings.iter().enumerate() {
        if i > 0 {
            buf.blank();
        }
        let binding_names = BindingNames::new(svc, m, b);
        let plan = MuxPlan::for_binding(target, b);
        buf.open("{");
        buf.line("let svc = std::sync::Arc::clone(&self.svc);");
        let handler = emit_handler(ctx, names, &binding_names, m);
        buf.block(&format!("let handler = {};", handler.trim_end()));
        match (plan.advanced, plan.basic) {
            (true, Some(arm)) => {
                buf.open("match mux {");
                buf.open(format!("{}::Advanced(router) => {{", mux));
                buf.block(&advanced_route(ctx, &binding_names, b));
                buf.close("}");
                buf.open(format!("{}::Basic(router) => {{", mux));
                buf.block(&basic_route(ctx, &binding_names, b, arm));
                buf.close("}");
                buf.close("}");
            }
            (true, None) => {
                buf.block(&advanced_route(ctx, &binding_names, b));
            }
            (false, Some(arm)) => {
                buf.block(&basic_route(ctx, &binding_names, b, arm));
            }
            // MuxPlan always carries at least one arm
            (false, None) => {}
        }
        buf.close("}");
    }
    buf.close("}");
    buf.finish()
}

fn verb(ctx: &ImportContext, b: &Binding) -> String {
    ctx.qualify(RUNTIME, &format!("http::Method::{}", b.method.as_str()))
}

fn advanced_route(ctx: &ImportContext, names: &BindingNames, b: &Binding) -> String {
    format!(
        "router.route({}, {}, handler);\n",
        verb(ctx, b),
        names.pattern
    )
}

fn basic_route(ctx: &ImportContext, names: &BindingNames, b: &Binding, arm: BasicArm) -> String {
    let signature = format!(
        "req: {}, params: &{}| -> {}",
        ctx.qualify(RUNTIME, "Request"),
        ctx.qualify(RUNTIME, "PathParams"),
        ctx.qualify(RUNTIME, "Response")
    );
    let mut buf = CodeBuf::new();
    match arm {
        BasicArm::Literal => {
            buf.open(format!(
                "router.handle({}, move |{} {{",
                names.pattern, signature
            ))
            .open(format!("if req.method() != {} {{", verb(ctx, b)))
            .line(format!(
                "return {}();",
                ctx.qualify(RUNTIME, "method_not_allowed")
            ))
            .close("}")
            .line("handler(req, params)")
            .close("});");
        }
        BasicArm::Unsupported => {
            buf.open(format!(
                "router.handle({}, |_{} {{",
                names.pattern,
                signature.replacen("params", "_params", 1)
            ))
            .line(format!(
                "panic!({})",
                fmt_literal(&format!(
                    "path parameters unsupported: {} {} needs a router with named segments",
                    b.method,
                    b.path.router_form()
                ))
            ))
            .close("});");
        }
    }
    buf.finish()
}
