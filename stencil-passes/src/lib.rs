//! Stencil Passes
//!
//! Decides which compiler passes run for a configuration, in what order,
//! and runs them.
//!
//! Passes are arranged into four phases:
//!
//! - Single-file passes: AST rewriting and validation that only needs one
//!   file, such as name and type resolution.
//! - Cross-template checks: validation of the relationships between
//!   templates, such as call and visibility checks.
//! - Autoescaping: contextual escaping, which may add synthetic templates.
//! - Simplification: desugaring and optimization, last so they can simplify
//!   whatever earlier passes produced.
//!
//! The first phase forms the single-file list; the other three run, in that
//! order, as the fileset list.
//!
//! ```rust,ignore
//! use stencil_passes::{PipelineBuilder, TemplateRegistry};
//!
//! let pipeline = PipelineBuilder::new()
//!     .type_registry(types)
//!     .print_directives(directives)
//!     .error_reporter(reporter)
//!     .general_options(options)
//!     .build(&factory)?;
//!
//! for file in &mut file_set.files {
//!     pipeline.run_single_file_passes(file, &file_set.id_generator);
//! }
//! let registry = TemplateRegistry::from_file_set(&file_set);
//! pipeline.run_whole_fileset_passes(&mut file_set, &registry);
//! ```

pub mod ast;
pub mod builder;
pub mod catalog;
pub mod context;
pub mod deps;
pub mod error;
pub mod factory;
pub mod pass;
pub mod passes;
pub mod pipeline;
pub mod registry;
pub mod templates;

pub use ast::{FileNode, FileSetNode, IdGenerator, Node, NodeId, TemplateNode, Visibility};
pub use builder::PipelineBuilder;
pub use catalog::{is_known_pass, FilePassId, FileSetPassId, PassName, PassPhase};
pub use context::AssemblyContext;
pub use deps::{
    CollectingErrorReporter, Diagnostic, ErrorReporter, PluginMode, PluginResolver,
    PrintDirective, PrintDirectiveMap, TypeRegistry,
};
pub use error::PipelineError;
pub use factory::{PassFactory, PassSetup};
pub use pass::{CompilerPass, FilePass, FileSetPass, PassResult};
pub use passes::{builtin_fileset_pass, CombineConsecutiveRawTextNodesPass, DesugarHtmlNodesPass};
pub use pipeline::{PassPlan, Pipeline};
pub use registry::ContinuationRegistry;
pub use templates::{TemplateMetadata, TemplateRegistry};

pub use stencil_config::{ContinuationRule, GeneralOptions, PassConfig, TriState};
