use super::load::{RawBinding, RawDocument, RawMethod};
use super::types::{
    BodyPolicy, Binding, ExplicitParams, FieldType, FileDescriptor, MethodDescriptor, PathParam,
    ServiceDescriptor,
};
use crate::binding::PathTemplate;
use crate::error::GenerateError;
use crate::linter::{binding_location, LintIssue};
use http::Method;
use tracing::debug;

/// Verbs a binding may use.
const SUPPORTED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
];

fn parse_method(verb: &str) -> Option<Method> {
    let upper = verb.trim().to_ascii_uppercase();
    SUPPORTED_METHODS
        .iter()
        .find(|m| m.as_str() == upper)
        .cloned()
}

/// Build the immutable descriptor model from a parsed document.
///
/// `blobs` holds the documentation blob of each file, aligned with
/// `doc.files`; missing entries mean no blob. Every conversion problem is
/// collected before failing so the caller can report them all at once.
pub fn build_files(
    doc: &RawDocument,
    blobs: Vec<Option<Vec<u8>>>,
) -> Result<Vec<FileDescriptor>, GenerateError> {
    let mut issues = Vec::new();
    let mut blobs = blobs.into_iter();
    let mut files = Vec::with_capacity(doc.files.len());

    for raw_file in &doc.files {
        let mut services = Vec::with_capacity(raw_file.services.len());
        for raw_svc in &raw_file.services {
            let methods = raw_svc
                .methods
                .iter()
                .map(|raw_m| build_method(&mut issues, &raw_file.name, &raw_svc.name, raw_m))
                .collect();
            services.push(ServiceDescriptor {
                name: raw_svc.name.clone(),
                methods,
            });
        }
        files.push(FileDescriptor {
            name: raw_file.name.clone(),
            services,
            swagger: blobs.next().flatten(),
        });
    }

    if !issues.is_empty() {
        return Err(GenerateError::Invalid(issues));
    }
    Ok(files)
}

fn build_method(
    issues: &mut Vec<LintIssue>,
    file: &str,
    service: &str,
    raw: &RawMethod,
) -> MethodDescriptor {
    let bindings = raw
        .bindings
        .iter()
        .enumerate()
        .filter_map(|(index, raw_b)| {
            let location = binding_location(file, service, &raw.name, index);
            build_binding(issues, &location, index, raw_b)
        })
        .collect();
    MethodDescriptor {
        name: raw.name.clone(),
        request_type: raw.request.clone(),
        response_type: raw.response.clone(),
        bindings,
    }
}

fn build_binding(
    issues: &mut Vec<LintIssue>,
    location: &str,
    index: usize,
    raw: &RawBinding,
) -> Option<Binding> {
    let method = parse_method(&raw.method);
    if method.is_none() {
        issues.push(
            LintIssue::error(
                location,
                "unknown_verb",
                format!("unsupported HTTP verb '{}'", raw.method),
            )
            .with_suggestion("use one of GET, POST, PUT, DELETE, PATCH"),
        );
    }

    let path = match PathTemplate::parse(&raw.path) {
        Ok(path) => Some(path),
        Err(err) => {
            issues.push(LintIssue::error(
                location,
                "invalid_template",
                format!("{}: {}", raw.path, err),
            ));
            None
        }
    };

    let mut path_params = Vec::with_capacity(raw.path_params.len());
    for p in &raw.path_params {
        match FieldType::parse(&p.ty) {
            Some(ty) => path_params.push(PathParam {
                field: p.field.clone(),
                ty,
            }),
            None => issues.push(LintIssue::error(
                location,
                "unknown_field_type",
                format!("path param '{}' has unknown type '{}'", p.field, p.ty),
            )),
        }
    }

    let body = BodyPolicy::from_annotation(raw.body.as_deref());
    let explicit_params = match &raw.explicit_params {
        Some(names) => ExplicitParams::from_names(names.iter().cloned()),
        None => ExplicitParams::derive(&path_params, &body),
    };

    let binding = Binding {
        index,
        method: method?,
        path: path?,
        path_params,
        body,
        explicit_params,
    };
    debug!(
        location = %location,
        method = %binding.method,
        path = %binding.path,
        body = %binding.body,
        "Built binding"
    );
    Some(binding)
}
