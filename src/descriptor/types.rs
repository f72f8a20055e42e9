use crate::binding::PathTemplate;
use http::Method;
use std::fmt;

/// One input file. Produces one descriptor unit and, optionally, one
/// implementation scaffold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Source file name as given in the input (e.g. `api/users.proto`)
    pub name: String,
    pub services: Vec<ServiceDescriptor>,
    /// Documentation blob embedded verbatim in the descriptor unit
    pub swagger: Option<Vec<u8>>,
}

impl FileDescriptor {
    /// File name without directories or extension: `api/users.proto` → `users`.
    pub fn stem(&self) -> &str {
        let base = self.name.rsplit('/').next().unwrap_or(&self.name);
        match base.rfind('.') {
            Some(dot) if dot > 0 => &base[..dot],
            _ => base,
        }
    }

    /// Every binding of the file with its owning service and method, in declaration order.
    pub fn bindings(
        &self,
    ) -> impl Iterator<Item = (&ServiceDescriptor, &MethodDescriptor, &Binding)> + '_ {
        self.services.iter().flat_map(|svc| {
            svc.methods
                .iter()
                .flat_map(move |m| m.bindings.iter().map(move |b| (svc, m, b)))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub name: String,
    pub methods: Vec<MethodDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    /// Request message type name, relative to the proto module
    pub request_type: String,
    /// Response message type name, relative to the proto module
    pub response_type: String,
    /// HTTP exposures of this method; empty means gRPC only
    pub bindings: Vec<Binding>,
}

/// One HTTP exposure of an RPC method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Position within the owning method's bindings
    pub index: usize,
    pub method: Method,
    pub path: PathTemplate,
    /// One entry per placeholder, in template order
    pub path_params: Vec<PathParam>,
    pub body: BodyPolicy,
    pub explicit_params: ExplicitParams,
}

impl Binding {
    pub fn has_path_params(&self) -> bool {
        !self.path_params.is_empty()
    }
}

/// How the request body feeds the request message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BodyPolicy {
    /// The body is never read
    #[default]
    None,
    /// `body: "*"`: the whole message is decoded from the body
    WholeBody,
    /// `body: "<field>"`: a named field is body-bound
    Field(String),
}

impl BodyPolicy {
    /// Parse the annotation value: empty means no body, `*` the whole message.
    pub fn from_annotation(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => BodyPolicy::None,
            Some(ExplicitParams::WILDCARD) => BodyPolicy::WholeBody,
            Some(field) => BodyPolicy::Field(field.to_string()),
        }
    }

    pub fn consumes_body(&self) -> bool {
        !matches!(self, BodyPolicy::None)
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            BodyPolicy::Field(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for BodyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyPolicy::None => write!(f, "none"),
            BodyPolicy::WholeBody => write!(f, "*"),
            BodyPolicy::Field(name) => write!(f, "{}", name),
        }
    }
}

/// Fields excluded from query binding, or the wildcard marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplicitParams {
    /// No exclusion table: every query key is eligible
    Wildcard,
    /// Field names already bound by the path or the body
    Fields(Vec<String>),
}

impl ExplicitParams {
    pub const WILDCARD: &'static str = "*";

    /// Build from annotation names; any `*` entry turns the set into the wildcard.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields = Vec::new();
        for name in names {
            let name = name.into();
            if name == Self::WILDCARD {
                return ExplicitParams::Wildcard;
            }
            if !fields.contains(&name) {
                fields.push(name);
            }
        }
        ExplicitParams::Fields(fields)
    }

    /// The set implied by a binding when the input does not spell it out.
    pub fn derive(path_params: &[PathParam], body: &BodyPolicy) -> Self {
        match body {
            BodyPolicy::WholeBody => ExplicitParams::Wildcard,
            _ => Self::from_names(
                path_params
                    .iter()
                    .map(|p| p.field.clone())
                    .chain(body.field().map(str::to_string)),
            ),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, ExplicitParams::Wildcard)
    }

    /// Lower-cased, sorted, de-duplicated names for the emitted lookup table.
    ///
    /// `None` for the wildcard: no table is emitted at all.
    pub fn table(&self) -> Option<Vec<String>> {
        match self {
            ExplicitParams::Wildcard => None,
            ExplicitParams::Fields(fields) => {
                let mut names: Vec<String> = fields.iter().map(|f| f.to_lowercase()).collect();
                names.sort();
                names.dedup();
                Some(names)
            }
        }
    }

    /// Whether a query key is skipped during query binding (case-insensitive).
    pub fn excludes(&self, key: &str) -> bool {
        match self {
            ExplicitParams::Wildcard => false,
            ExplicitParams::Fields(fields) => {
                let key = key.to_lowercase();
                fields.iter().any(|f| f.to_lowercase() == key)
            }
        }
    }
}

/// A path placeholder and the request field it populates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParam {
    pub field: String,
    pub ty: FieldType,
}

/// Protobuf field kinds, as carried by path parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Double,
    Float,
    Int64,
    Uint64,
    Int32,
    Fixed64,
    Fixed32,
    Bool,
    String,
    Group,
    Message,
    Bytes,
    Uint32,
    Enum,
    Sfixed32,
    Sfixed64,
    Sint32,
    Sint64,
}

impl FieldType {
    /// Accepts both the short proto spelling (`int32`) and the descriptor
    /// constant (`TYPE_INT32`).
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let name = lower.strip_prefix("type_").unwrap_or(&lower);
        let ty = match name {
            "double" => FieldType::Double,
            "float" => FieldType::Float,
            "int64" => FieldType::Int64,
            "uint64" => FieldType::Uint64,
            "int32" => FieldType::Int32,
            "fixed64" => FieldType::Fixed64,
            "fixed32" => FieldType::Fixed32,
            "bool" => FieldType::Bool,
            "string" => FieldType::String,
            "group" => FieldType::Group,
            "message" => FieldType::Message,
            "bytes" => FieldType::Bytes,
            "uint32" => FieldType::Uint32,
            "enum" => FieldType::Enum,
            "sfixed32" => FieldType::Sfixed32,
            "sfixed64" => FieldType::Sfixed64,
            "sint32" => FieldType::Sint32,
            "sint64" => FieldType::Sint64,
            _ => return None,
        };
        Some(ty)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Double => "double",
            FieldType::Float => "float",
            FieldType::Int64 => "int64",
            FieldType::Uint64 => "uint64",
            FieldType::Int32 => "int32",
            FieldType::Fixed64 => "fixed64",
            FieldType::Fixed32 => "fixed32",
            FieldType::Bool => "bool",
            FieldType::String => "string",
            FieldType::Group => "group",
            FieldType::Message => "message",
            FieldType::Bytes => "bytes",
            FieldType::Uint32 => "uint32",
            FieldType::Enum => "enum",
            FieldType::Sfixed32 => "sfixed32",
            FieldType::Sfixed64 => "sfixed64",
            FieldType::Sint32 => "sint32",
            FieldType::Sint64 => "sint64",
        }
    }

    /// Argument type of the client path builder for this kind.
    ///
    /// `None` for kinds that cannot be rendered into a path segment.
    pub fn rust_arg_type(&self) -> Option<&'static str> {
        match self {
            FieldType::Double => Some("f64"),
            FieldType::Float => Some("f32"),
            FieldType::Int64 | FieldType::Sfixed64 | FieldType::Sint64 => Some("i64"),
            FieldType::Uint64 | FieldType::Fixed64 => Some("u64"),
            FieldType::Int32 | FieldType::Sfixed32 | FieldType::Sint32 | FieldType::Enum => {
                Some("i32")
            }
            FieldType::Uint32 | FieldType::Fixed32 => Some("u32"),
            FieldType::Bool => Some("bool"),
            FieldType::String => Some("&str"),
            FieldType::Group | FieldType::Message | FieldType::Bytes => None,
        }
    }

    /// Whether the builder argument is a borrow of the request field.
    pub fn passed_by_ref(&self) -> bool {
        matches!(self, FieldType::String)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
