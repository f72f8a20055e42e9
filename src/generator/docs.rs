//! Embedded API documentation.

use super::context::{ImportContext, RUNTIME};
use super::writer::CodeBuf;

pub const SWAGGER_CONST: &str = "SWAGGER_DEF";

/// Render `blob` as a byte-string literal. Every byte survives unchanged.
pub fn byte_literal(blob: &[u8]) -> String {
    format!("b\"{}\"", blob.escape_ascii())
}

/// The unit-level constant holding the documentation blob.
///
/// A file without a blob gets an empty constant so the accessor keeps the
/// same shape.
pub fn emit_swagger_const(blob: Option<&[u8]>) -> String {
    let mut buf = CodeBuf::new();
    buf.line(format!(
        "static {}: &[u8] = {};",
        SWAGGER_CONST,
        byte_literal(blob.unwrap_or_default())
    ));
    buf.finish()
}

/// The `swagger_def` accessor of a descriptor type.
///
/// With no options the blob is returned as is; otherwise it is parsed, every
/// option applied in order and the document re-serialized.
pub fn emit_swagger_accessor(ctx: &ImportContext) -> String {
    let option = ctx.qualify(RUNTIME, "SwaggerOption");
    let json = ctx.qualify(RUNTIME, "serde_json");
    let mut buf = CodeBuf::new();
    buf.open(format!(
        "pub fn swagger_def(&self, options: &[{}]) -> Vec<u8> {{",
        option
    ));
    buf.open("if options.is_empty() {")
        .line(format!("return {}.to_vec();", SWAGGER_CONST))
        .close("}");
    buf.open(format!(
        "let mut spec: {}::Value = match {}::from_slice({}) {{",
        json, json, SWAGGER_CONST
    ))
    .line("Ok(spec) => spec,")
    .line("Err(err) => panic!(\"Bad swagger definition: {}\", err),")
    .close("};");
    buf.open("for option in options {")
        .line("option.apply(&mut spec);")
        .close("}");
    buf.open(format!("match {}::to_vec(&spec) {{", json))
        .line("Ok(out) => out,")
        .line("Err(err) => panic!(\"Failed marshal swagger definition: {}\", err),")
        .close("}");
    buf.close("}");
    buf.finish()
}
