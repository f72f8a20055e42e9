use super::build::build_files;
use super::types::FileDescriptor;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Descriptor document as written by the front end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub files: Vec<RawFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFile {
    pub name: String,
    /// Documentation blob, relative to the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swagger: Option<PathBuf>,
    #[serde(default)]
    pub services: Vec<RawService>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawService {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<RawMethod>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMethod {
    pub name: String,
    pub request: String,
    pub response: String,
    #[serde(default)]
    pub bindings: Vec<RawBinding>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBinding {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub path_params: Vec<RawPathParam>,
    /// `None`/empty: no body, `*`: whole message, otherwise a field name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Derived from path params and body when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit_params: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPathParam {
    pub field: String,
    #[serde(rename = "type")]
    pub ty: String,
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false)
}

/// Parse a descriptor document without resolving documentation blobs.
pub fn parse_document(path: &Path) -> anyhow::Result<RawDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read descriptor document: {}", path.display()))?;
    let doc: RawDocument = if is_yaml(path) {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML descriptors: {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON descriptors: {}", path.display()))?
    };
    Ok(doc)
}

/// Read the documentation blobs referenced by `doc`, relative to `base_dir`.
///
/// The result is aligned with `doc.files`.
pub fn read_blobs(doc: &RawDocument, base_dir: &Path) -> anyhow::Result<Vec<Option<Vec<u8>>>> {
    doc.files
        .iter()
        .map(|file| match &file.swagger {
            None => Ok(None),
            Some(rel) => {
                let blob_path = base_dir.join(rel);
                let bytes = std::fs::read(&blob_path).with_context(|| {
                    format!(
                        "Failed to read documentation blob for {}: {}",
                        file.name,
                        blob_path.display()
                    )
                })?;
                debug!(file = %file.name, blob = %blob_path.display(), bytes = bytes.len(), "Loaded documentation blob");
                Ok(Some(bytes))
            }
        })
        .collect()
}

/// Load and validate a descriptor document (YAML or JSON).
///
/// # Errors
///
/// Returns an error if the document cannot be read or parsed, a blob is
/// missing, or the model fails to build (unknown verbs, malformed templates).
pub fn load_descriptors(path: &Path) -> anyhow::Result<Vec<FileDescriptor>> {
    let doc = parse_document(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let blobs = read_blobs(&doc, base_dir)?;
    let files = build_files(&doc, blobs)?;
    info!(
        document = %path.display(),
        files = files.len(),
        services = files.iter().map(|f| f.services.len()).sum::<usize>(),
        bindings = files.iter().map(|f| f.bindings().count()).sum::<usize>(),
        "Descriptor model loaded"
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yaml() {
        assert!(is_yaml(Path::new("api.yaml")));
        assert!(is_yaml(Path::new("dir/api.yml")));
        assert!(!is_yaml(Path::new("api.json")));
        assert!(!is_yaml(Path::new("api")));
    }

    #[test]
    fn test_raw_binding_defaults() {
        let raw: RawBinding = serde_yaml::from_str("method: GET\npath: /v1/ping\n").unwrap();
        assert!(raw.path_params.is_empty());
        assert!(raw.body.is_none());
        assert!(raw.explicit_params.is_none());
    }
}
