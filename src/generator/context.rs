use std::collections::BTreeMap;

/// Alias of the runtime support crate in generated code.
pub const RUNTIME: &str = "rt";
/// Alias of the module holding the prost/tonic generated types.
pub const PROTO: &str = "pb";
/// Alias of the descriptor unit, used by the scaffold.
pub const DESC: &str = "desc";

/// Paths that cannot be renamed with `use path as alias;`.
const RELATIVE_ROOTS: [&str; 3] = ["super", "self", "crate"];

/// Import aliases of one output unit.
///
/// Built once per generation pass and handed to every emission rule, which
/// writes qualified names through [`ImportContext::qualify`] instead of
/// hard-coding module paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportContext {
    aliases: BTreeMap<&'static str, String>,
}

impl ImportContext {
    pub fn new(runtime_crate: &str, proto_module: &str) -> Self {
        let mut aliases = BTreeMap::new();
        aliases.insert(RUNTIME, runtime_crate.to_string());
        aliases.insert(PROTO, proto_module.to_string());
        Self { aliases }
    }

    /// Add the path of the descriptor unit (scaffold units only).
    pub fn with_desc(mut self, desc_module: &str) -> Self {
        self.aliases.insert(DESC, desc_module.to_string());
        self
    }

    pub fn path_of(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    fn is_relative_root(path: &str) -> bool {
        RELATIVE_ROOTS.contains(&path)
    }

    /// Qualified name of `item` under `alias`.
    ///
    /// `qualify("pb", "User")` is `pb::User`, or `super::User` when the proto
    /// module is `super` itself and no alias line can be written for it.
    pub fn qualify(&self, alias: &str, item: &str) -> String {
        match self.aliases.get(alias) {
            Some(path) if Self::is_relative_root(path) => format!("{}::{}", path, item),
            _ => format!("{}::{}", alias, item),
        }
    }

    /// `use` lines of the unit, sorted by alias.
    pub fn use_lines(&self) -> Vec<String> {
        self.aliases
            .iter()
            .filter(|(_, path)| !Self::is_relative_root(path))
            .map(|(alias, path)| {
                if path.rsplit("::").next() == Some(*alias) {
                    format!("use {};", path)
                } else {
                    format!("use {} as {};", path, alias)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_aliases() {
        let ctx = ImportContext::new("rpcgate_runtime", "super");
        assert_eq!(ctx.use_lines(), vec!["use rpcgate_runtime as rt;"]);
        assert_eq!(ctx.qualify(RUNTIME, "Mux"), "rt::Mux");
        assert_eq!(ctx.qualify(PROTO, "User"), "super::User");
    }

    #[test]
    fn test_named_proto_module() {
        let ctx = ImportContext::new("rpcgate_runtime", "crate::proto::users");
        assert_eq!(
            ctx.use_lines(),
            vec!["use crate::proto::users as pb;", "use rpcgate_runtime as rt;"]
        );
        assert_eq!(ctx.qualify(PROTO, "User"), "pb::User");
    }

    #[test]
    fn test_alias_matching_last_segment() {
        let ctx = ImportContext::new("crate::rt", "super").with_desc("super::users_rpcgate");
        assert_eq!(
            ctx.use_lines(),
            vec!["use super::users_rpcgate as desc;", "use crate::rt;"]
        );
        assert_eq!(ctx.path_of(DESC), Some("super::users_rpcgate"));
    }
}
