use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Placeholder names are field paths: identifiers optionally joined by dots.
static PLACEHOLDER_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("Failed to compile placeholder regex")
});

/// Positional marker used in the interpolation form (a `format!` argument slot).
pub const INTERPOLATION_MARKER: &str = "{}";

/// One token of a parsed path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied verbatim into both derived forms
    Literal(String),
    /// A `{name}` placeholder bound to a request field
    Param(String),
}

/// Error returned when a path template cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathTemplateError {
    /// Templates are absolute: they must start with `/`
    MissingLeadingSlash,
    /// A `{` was opened but never closed
    UnclosedPlaceholder {
        /// Byte offset of the opening brace
        offset: usize,
    },
    /// A `}` appeared outside of a placeholder
    UnexpectedClose {
        /// Byte offset of the stray brace
        offset: usize,
    },
    /// `{}` with nothing inside
    EmptyPlaceholder {
        /// Byte offset of the opening brace
        offset: usize,
    },
    /// Placeholder content is not a field path (e.g. `{name=shelves/*}`)
    InvalidPlaceholder {
        /// The offending placeholder content
        name: String,
    },
}

impl fmt::Display for PathTemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathTemplateError::MissingLeadingSlash => {
                write!(f, "path template must start with '/'")
            }
            PathTemplateError::UnclosedPlaceholder { offset } => {
                write!(f, "placeholder opened at offset {} is never closed", offset)
            }
            PathTemplateError::UnexpectedClose { offset } => {
                write!(f, "unexpected '}}' at offset {}", offset)
            }
            PathTemplateError::EmptyPlaceholder { offset } => {
                write!(f, "empty placeholder at offset {}", offset)
            }
            PathTemplateError::InvalidPlaceholder { name } => {
                write!(
                    f,
                    "placeholder '{{{}}}' is not a field path; only '{{field}}' placeholders are supported",
                    name
                )
            }
        }
    }
}

impl std::error::Error for PathTemplateError {}

/// A parsed HTTP path template such as `/v1/users/{id}`.
///
/// Both derived forms come from the same parsed value, so they can never drift
/// apart: the router form is the template itself, the interpolation form swaps
/// every placeholder for [`INTERPOLATION_MARKER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    template: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parse a template, splitting it into literal and placeholder segments.
    pub fn parse(template: &str) -> Result<Self, PathTemplateError> {
        if !template.starts_with('/') {
            return Err(PathTemplateError::MissingLeadingSlash);
        }

        let mut segments = Vec::with_capacity(template.matches('{').count() * 2 + 1);
        let mut literal = String::new();
        let mut rest = template.char_indices();

        while let Some((offset, c)) = rest.next() {
            match c {
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, inner) in rest.by_ref() {
                        match inner {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => return Err(PathTemplateError::UnclosedPlaceholder { offset }),
                            other => name.push(other),
                        }
                    }
                    if !closed {
                        return Err(PathTemplateError::UnclosedPlaceholder { offset });
                    }
                    if name.is_empty() {
                        return Err(PathTemplateError::EmptyPlaceholder { offset });
                    }
                    if !PLACEHOLDER_NAME.is_match(&name) {
                        return Err(PathTemplateError::InvalidPlaceholder { name });
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Param(name));
                }
                '}' => return Err(PathTemplateError::UnexpectedClose { offset }),
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            template: template.to_string(),
            segments,
        })
    }

    /// The pattern handed to the router: the template, unchanged.
    pub fn router_form(&self) -> &str {
        &self.template
    }

    /// The pattern used to build a concrete path on the client side.
    ///
    /// `/v1/users/{id}/posts/{post}` becomes `/v1/users/{}/posts/{}`.
    pub fn interpolation_form(&self) -> String {
        let mut out = String::with_capacity(self.template.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Param(_) => out.push_str(INTERPOLATION_MARKER),
            }
        }
        out
    }

    /// Parsed segments in template order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names in occurrence order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    pub fn param_count(&self) -> usize {
        self.param_names().count()
    }

    pub fn has_params(&self) -> bool {
        self.param_count() > 0
    }

    /// Substitute `values` for the placeholders of the router form.
    ///
    /// Returns `None` when the number of values differs from the number of
    /// placeholders.
    pub fn expand(&self, values: &[&str]) -> Option<String> {
        if values.len() != self.param_count() {
            return None;
        }
        let mut values = values.iter();
        let mut out = String::with_capacity(self.template.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Param(_) => out.push_str(values.next()?),
            }
        }
        Some(out)
    }

    /// Fill the markers of the interpolation form with `values`, in order.
    ///
    /// Mirrors what the emitted `format!` call does at runtime.
    pub fn interpolate(&self, values: &[&str]) -> Option<String> {
        let form = self.interpolation_form();
        let parts: Vec<&str> = form.split(INTERPOLATION_MARKER).collect();
        if parts.len() != values.len() + 1 {
            return None;
        }
        let mut out = String::with_capacity(form.len());
        for (i, part) in parts.iter().enumerate() {
            out.push_str(part);
            if let Some(value) = values.get(i) {
                out.push_str(value);
            }
        }
        Some(out)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

impl std::str::FromStr for PathTemplate {
    type Err = PathTemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
