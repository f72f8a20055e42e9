use crate::descriptor::{BodyPolicy, Binding, ExplicitParams};
use std::collections::BTreeMap;
use std::fmt;

/// Where a request field gets its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Query,
    Body,
    Path,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Query => write!(f, "query"),
            Source::Body => write!(f, "body"),
            Source::Path => write!(f, "path"),
        }
    }
}

/// One step of the emitted decode routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Populate fields from query keys not in the lower-cased `excluded`
    /// table. Absent under the wildcard marker.
    Query { excluded: Vec<String> },
    /// Decode the body into the whole request with the negotiated marshaler
    Body,
    /// Populate fields from router-extracted segments, in declared order
    Path { fields: Vec<String> },
}

/// Decode plan for one binding.
///
/// Stages always run query → body → path: later stages overwrite fields set
/// by earlier ones, so path segments win every conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingPlan {
    stages: Vec<Stage>,
    body: BodyPolicy,
    explicit: ExplicitParams,
}

impl BindingPlan {
    pub fn for_binding(binding: &Binding) -> Self {
        let mut stages = Vec::with_capacity(3);
        if let Some(excluded) = binding.explicit_params.table() {
            stages.push(Stage::Query { excluded });
        }
        if binding.body.consumes_body() {
            stages.push(Stage::Body);
        }
        if binding.has_path_params() {
            stages.push(Stage::Path {
                fields: binding.path_params.iter().map(|p| p.field.clone()).collect(),
            });
        }
        Self {
            stages,
            body: binding.body.clone(),
            explicit: binding.explicit_params.clone(),
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// The query exclusion table, `None` under the wildcard marker where the
    /// query string is not read at all.
    pub fn query_table(&self) -> Option<&[String]> {
        self.stages.iter().find_map(|s| match s {
            Stage::Query { excluded } => Some(excluded.as_slice()),
            _ => None,
        })
    }

    pub fn decodes_body(&self) -> bool {
        self.stages.contains(&Stage::Body)
    }

    pub fn path_fields(&self) -> &[String] {
        self.stages
            .iter()
            .find_map(|s| match s {
                Stage::Path { fields } => Some(fields.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// Classify a request field into the source that finally sets it.
    ///
    /// Returns `None` for a field bound by neither the path nor the body that
    /// the query cannot set either (excluded, or no query stage).
    pub fn source_of(&self, field: &str) -> Option<Source> {
        if self.path_fields().iter().any(|f| f == field) {
            return Some(Source::Path);
        }
        match &self.body {
            BodyPolicy::WholeBody => return Some(Source::Body),
            BodyPolicy::Field(name) if name == field => return Some(Source::Body),
            _ => {}
        }
        if self.query_table().is_none() || self.explicit.excludes(field) {
            None
        } else {
            Some(Source::Query)
        }
    }

    /// Reference semantics of the emitted decode routine over flat string
    /// fields.
    ///
    /// `query` keeps only the first value per key, `body` stands for the
    /// decoded message, `path` for the router-extracted segments.
    pub fn evaluate(
        &self,
        query: &[(&str, &str)],
        body: Option<&BTreeMap<String, String>>,
        path: &[(&str, &str)],
    ) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        for stage in &self.stages {
            match stage {
                Stage::Query { excluded } => {
                    let mut seen = Vec::new();
                    for (key, value) in query {
                        if seen.contains(key) {
                            continue;
                        }
                        seen.push(*key);
                        let lower = key.to_lowercase();
                        if excluded.contains(&lower) {
                            continue;
                        }
                        out.insert(key.to_string(), value.to_string());
                    }
                }
                Stage::Body => {
                    if let Some(body) = body {
                        for (k, v) in body {
                            out.insert(k.clone(), v.clone());
                        }
                    }
                }
                Stage::Path { fields } => {
                    for field in fields {
                        if let Some((_, value)) = path.iter().find(|(k, _)| k == field) {
                            out.insert(field.clone(), value.to_string());
                        }
                    }
                }
            }
        }
        out
    }
}

impl fmt::Display for BindingPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .stages
            .iter()
            .map(|s| match s {
                Stage::Query { excluded } if excluded.is_empty() => "query".to_string(),
                Stage::Query { excluded } => format!("query(-{})", excluded.join(",")),
                Stage::Body => "body".to_string(),
                Stage::Path { fields } => format!("path({})", fields.join(",")),
            })
            .collect();
        if parts.is_empty() {
            return f.write_str("none");
        }
        f.write_str(&parts.join(" -> "))
    }
}
