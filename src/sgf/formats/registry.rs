//! Format registry for collection output
//!
//! Each output format implements [Formatter] and is looked up by name, or by the extension of
//! an output path, in a [FormatRegistry].

use crate::sgf::parsing::{Collection, Warning};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("unknown format '{name}'; available: {}", .available.join(", "))]
    UnknownFormat { name: String, available: Vec<String> },
    #[error("could not encode collection as {format}: {message}")]
    Encode { format: String, message: String },
}

/// A way of rendering a parsed collection
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "sgf", "treeviz")
    fn name(&self) -> &str;

    /// File extension, without the dot, of files written in this format
    fn extension(&self) -> &str;

    fn serialize(&self, collection: &Collection) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }

    /// Whether the rendered output already includes the collection's warnings
    fn carries_warnings(&self) -> bool {
        false
    }
}

/// Named formatters; registering a name again replaces the earlier formatter
pub struct FormatRegistry {
    formatters: BTreeMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formatters: BTreeMap::new(),
        }
    }

    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Formatter, FormatError> {
        self.formatters
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::UnknownFormat {
                name: name.to_string(),
                available: self.list_formats(),
            })
    }

    /// The formatter whose extension matches the path's, e.g. `json` for `game.json`
    pub fn for_path(&self, path: &Path) -> Option<&dyn Formatter> {
        let extension = path.extension()?.to_str()?;
        self.formatters
            .values()
            .map(|f| f.as_ref())
            .find(|f| f.extension().eq_ignore_ascii_case(extension))
    }

    pub fn serialize(&self, collection: &Collection, format: &str) -> Result<String, FormatError> {
        self.get(format)?.serialize(collection)
    }

    /// Warnings that rendering in `format` would leave out, and so need reporting elsewhere
    pub fn unrendered_warnings<'c>(
        &self,
        collection: &'c Collection,
        format: &str,
    ) -> Result<&'c [Warning], FormatError> {
        if self.get(format)?.carries_warnings() {
            Ok(&[])
        } else {
            Ok(&collection.warnings)
        }
    }

    /// All registered format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        self.formatters.keys().cloned().collect()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::SgfFormatter);
        registry.register(super::TreevizFormatter);
        registry.register(super::JsonFormatter);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sgf::parse;

    struct GameCount;
    impl Formatter for GameCount {
        fn name(&self) -> &str {
            "count"
        }
        fn extension(&self) -> &str {
            "txt"
        }
        fn serialize(&self, collection: &Collection) -> Result<String, FormatError> {
            Ok(collection.game_trees.len().to_string())
        }
    }

    #[test]
    fn test_defaults() {
        let registry = FormatRegistry::default();
        assert_eq!(registry.list_formats(), vec!["json", "sgf", "treeviz"]);
        assert!(registry.get("treeviz").is_ok());
    }

    #[test]
    fn test_register_custom() {
        let mut registry = FormatRegistry::new();
        assert!(registry.list_formats().is_empty());
        registry.register(GameCount);

        let collection = parse("(;B[aa])(;W[bb])").unwrap();
        assert_eq!(registry.serialize(&collection, "count"), Ok("2".to_string()));
        assert_eq!(registry.get("count").unwrap().description(), "");
    }

    #[test]
    fn test_unknown_format_lists_the_available_ones() {
        let registry = FormatRegistry::with_defaults();
        let error = registry
            .serialize(&Collection::default(), "xml")
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "unknown format 'xml'; available: json, sgf, treeviz"
        );
    }

    #[test]
    fn test_format_for_output_path() {
        let registry = FormatRegistry::with_defaults();
        let name = |path: &str| registry.for_path(Path::new(path)).map(|f| f.name().to_string());
        assert_eq!(name("out/game.json"), Some("json".to_string()));
        assert_eq!(name("copy.SGF"), Some("sgf".to_string()));
        assert_eq!(name("tree.txt"), Some("treeviz".to_string()));
        assert_eq!(name("notes.md"), None);
        assert_eq!(name("no-extension"), None);
    }

    #[test]
    fn test_unrendered_warnings_depend_on_format() {
        let registry = FormatRegistry::with_defaults();
        let collection = parse("(;LONG[x])").unwrap();
        assert_eq!(collection.warnings.len(), 1);

        let left_out = |format: &str| registry.unrendered_warnings(&collection, format).unwrap();
        assert_eq!(left_out("sgf"), collection.warnings.as_slice());
        assert_eq!(left_out("treeviz"), collection.warnings.as_slice());
        assert!(left_out("json").is_empty());
        assert!(registry.unrendered_warnings(&collection, "xml").is_err());
    }
}
