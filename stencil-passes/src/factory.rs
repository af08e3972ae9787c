//! Pass construction
//!
//! The pipeline decides *which* passes run; the surrounding compiler
//! decides *what* each pass does. A [`PassFactory`] turns each selected
//! pass id into a runnable pass, given the collaborators in [`PassSetup`].

use std::sync::Arc;

use stencil_config::{ConformanceConfig, GeneralOptions, LoggingConfig};

use crate::catalog::{FilePassId, FileSetPassId};
use crate::deps::{ErrorReporter, PluginResolver, PrintDirectiveMap, TypeRegistry};
use crate::pass::{FilePass, FileSetPass};

/// Everything a pass may be constructed with
///
/// Borrowed from the builder for the duration of `build`; factories clone
/// the `Arc`s they want to keep.
pub struct PassSetup<'a> {
    pub type_registry: &'a Arc<TypeRegistry>,
    pub plugin_resolver: Option<&'a Arc<PluginResolver>>,
    pub print_directives: &'a Arc<PrintDirectiveMap>,
    pub error_reporter: &'a Arc<dyn ErrorReporter>,
    pub options: &'a GeneralOptions,
    pub conformance: &'a ConformanceConfig,
    pub logging: &'a LoggingConfig,
    /// Whether legacy `v1Expression()` is allowed
    pub allow_v1_expression: bool,
    /// False when all type checking is disabled; `KeyCommand` needs this
    pub type_checking_enabled: bool,
}

impl std::fmt::Debug for PassSetup<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassSetup")
            .field("options", &self.options)
            .field("allow_v1_expression", &self.allow_v1_expression)
            .field("type_checking_enabled", &self.type_checking_enabled)
            .finish_non_exhaustive()
    }
}

/// Creates the pass behind each pass id
///
/// Each returned pass must report the id's name from
/// [`CompilerPass::name`](crate::pass::CompilerPass::name).
pub trait PassFactory {
    fn file_pass(&self, id: FilePassId, setup: &PassSetup<'_>) -> Box<dyn FilePass>;

    fn fileset_pass(&self, id: FileSetPassId, setup: &PassSetup<'_>) -> Box<dyn FileSetPass>;
}
