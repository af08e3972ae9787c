//! Collaborators handed to passes at construction time
//!
//! The pipeline itself never looks inside these; they are carried from the
//! builder to the [`PassFactory`](crate::factory::PassFactory) so each pass
//! can be wired with what it needs.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

/// Names of the types templates may declare
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: BTreeSet<String>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the primitive types
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for name in ["any", "?", "null", "bool", "int", "float", "string", "html", "uri", "css", "js", "attributes"] {
            registry.register(name);
        }
        registry
    }

    pub fn register(&mut self, name: impl Into<String>) {
        self.types.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains(name)
    }
}

/// How unresolved plugin functions are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PluginMode {
    #[default]
    RequireDefinitions,
    AllowUndefined,
}

/// Resolves plugin (extern) function names
#[derive(Debug, Clone, Default)]
pub struct PluginResolver {
    functions: BTreeSet<String>,
    pub mode: PluginMode,
}

impl PluginResolver {
    pub fn new(mode: PluginMode) -> Self {
        Self {
            functions: BTreeSet::new(),
            mode,
        }
    }

    pub fn register_function(&mut self, name: impl Into<String>) {
        self.functions.insert(name.into());
    }

    pub fn resolves(&self, name: &str) -> bool {
        self.functions.contains(name) || self.mode == PluginMode::AllowUndefined
    }
}

/// A `|directive` applied to print commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintDirective {
    pub name: String,
    pub valid_arg_counts: Vec<usize>,
    /// Escaping directives suppress the autoescaper's own escaping
    pub cancels_autoescape: bool,
}

impl PrintDirective {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            valid_arg_counts: vec![0],
            cancels_autoescape: false,
        }
    }
}

/// Print directives keyed by name (including the leading `|`)
pub type PrintDirectiveMap = BTreeMap<String, PrintDirective>;

/// A semantic problem found by a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Name of the reporting pass
    pub pass: String,
    pub file: String,
    pub message: String,
}

/// Sink for diagnostics reported by passes
///
/// Reporting never alters control flow: the pipeline keeps running
/// subsequent passes regardless of what has been reported.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);

    fn error_count(&self) -> usize;
}

/// Error reporter that keeps every diagnostic in memory
#[derive(Debug, Default)]
pub struct CollectingErrorReporter {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor returning the shared handle passes expect
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Snapshot of everything reported so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .map(|diagnostics| diagnostics.clone())
            .unwrap_or_default()
    }
}

impl ErrorReporter for CollectingErrorReporter {
    fn report(&self, diagnostic: Diagnostic) {
        if let Ok(mut diagnostics) = self.diagnostics.lock() {
            diagnostics.push(diagnostic);
        }
    }

    fn error_count(&self) -> usize {
        self.diagnostics
            .lock()
            .map(|diagnostics| diagnostics.len())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_reporter() {
        let reporter = CollectingErrorReporter::shared();
        assert_eq!(reporter.error_count(), 0);

        reporter.report(Diagnostic {
            pass: "ResolveNames".to_string(),
            file: "a.soy".to_string(),
            message: "unknown variable $foo".to_string(),
        });

        assert_eq!(reporter.error_count(), 1);
        assert_eq!(reporter.diagnostics()[0].pass, "ResolveNames");
    }

    #[test]
    fn test_plugin_resolver_modes() {
        let mut strict = PluginResolver::new(PluginMode::RequireDefinitions);
        strict.register_function("formatNum");
        assert!(strict.resolves("formatNum"));
        assert!(!strict.resolves("unknownFn"));

        let lenient = PluginResolver::new(PluginMode::AllowUndefined);
        assert!(lenient.resolves("unknownFn"));
    }

    #[test]
    fn test_type_registry_builtins() {
        let registry = TypeRegistry::with_builtins();
        assert!(registry.contains("string"));
        assert!(!registry.contains("my.Proto"));
    }
}
