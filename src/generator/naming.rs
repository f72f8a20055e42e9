//! Identifiers of the generated code.
//!
//! Every per-binding item is namespaced by service, method and binding index
//! so two bindings of one method never collide.

use crate::descriptor::{Binding, MethodDescriptor, ServiceDescriptor};

const KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "else", "enum", "extern", "false", "fn", "for", "if",
    "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static",
    "struct", "trait", "true", "type", "unsafe", "use", "where", "while", "async", "await", "dyn",
    "abstract", "become", "box", "do", "final", "macro", "override", "priv", "typeof", "unsized",
    "virtual", "yield", "try", "gen",
];

/// Keywords that cannot be written as raw identifiers.
const RESERVED: &[&str] = &["crate", "self", "Self", "super", "_"];

/// Convert a `CamelCase` or `mixed_Case` name to `snake_case`.
///
/// Acronyms stay together: `HTTPServer` → `http_server`, `GetV2User` → `get_v2_user`.
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == '.' || c == ' ' || c == '_' {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }
        if c.is_uppercase() {
            let prev = if i > 0 { chars.get(i - 1) } else { None };
            let next = chars.get(i + 1);
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
                _ => false,
            };
            if boundary && !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out.trim_end_matches('_').to_string()
}

/// `get_user` → `GetUser`
pub fn to_camel_case(s: &str) -> String {
    to_snake_case(s)
        .split('_')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Make `name` usable as a value identifier (field access, argument name).
///
/// Invalid characters become underscores, keywords become raw identifiers and
/// the few keywords that cannot be raw get a trailing underscore.
pub fn sanitize_rust_identifier(name: &str) -> String {
    let mut s: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if s.is_empty() {
        s.push('_');
    }
    if s.starts_with(|c: char| c.is_ascii_digit()) {
        s.insert(0, '_');
    }
    if RESERVED.contains(&s.as_str()) {
        s.push('_');
        return s;
    }
    if KEYWORDS.contains(&s.as_str()) {
        return format!("r#{}", s);
    }
    s
}

/// Message type name relative to the proto module: `v1.User` → `v1::User`.
pub fn type_path(name: &str) -> String {
    name.trim_start_matches('.').replace('.', "::")
}

/// Names shared by the items of one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceNames {
    /// `UsersDesc`
    pub desc: String,
    /// `UsersHttpClient`
    pub client: String,
    /// `users_server`, the tonic-generated module
    pub server_mod: String,
    /// `UsersServer`
    pub server: String,
    /// `Users`, the tonic service trait
    pub service_trait: String,
    /// `UsersImpl`, the scaffold type
    pub impl_type: String,
}

impl ServiceNames {
    pub fn new(svc: &ServiceDescriptor) -> Self {
        let camel = to_camel_case(&svc.name);
        Self {
            desc: format!("{}Desc", camel),
            client: format!("{}HttpClient", camel),
            server_mod: format!("{}_server", to_snake_case(&svc.name)),
            server: format!("{}Server", camel),
            service_trait: camel.clone(),
            impl_type: format!("{}Impl", camel),
        }
    }
}

/// `get_user`, the method name on the tonic trait and the client.
pub fn method_fn_name(m: &MethodDescriptor) -> String {
    sanitize_rust_identifier(&to_snake_case(&m.name))
}

/// Names of the items emitted for one binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingNames {
    /// `PATTERN_USERS_GET_USER_0`
    pub pattern: String,
    /// `pattern_users_get_user_0_builder`
    pub builder: String,
    /// `unmarshaler_users_get_user_0`
    pub unmarshaler: String,
    /// `BOUND_PARAMS_USERS_GET_USER_0`
    pub bound_params: String,
    /// `PATH_PARAMS_USERS_GET_USER_0`
    pub path_params: String,
}

impl BindingNames {
    pub fn new(svc: &ServiceDescriptor, m: &MethodDescriptor, b: &Binding) -> Self {
        let snake = format!(
            "{}_{}_{}",
            to_snake_case(&svc.name),
            to_snake_case(&m.name),
            b.index
        );
        let shouty = snake.to_uppercase();
        Self {
            pattern: format!("PATTERN_{}", shouty),
            builder: format!("pattern_{}_builder", snake),
            unmarshaler: format!("unmarshaler_{}", snake),
            bound_params: format!("BOUND_PARAMS_{}", shouty),
            path_params: format!("PATH_PARAMS_{}", shouty),
        }
    }
}
