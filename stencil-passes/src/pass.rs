//! Pass traits and types
//!
//! A pass is one named unit of tree analysis or transformation. There are
//! exactly two shapes: [`FilePass`] sees a single file, [`FileSetPass`]
//! sees every file plus the template registry.

use crate::ast::{FileNode, IdGenerator};
use crate::templates::TemplateRegistry;

/// Signal returned by a fileset pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassResult {
    /// Run the next pass
    #[default]
    Continue,
    /// Skip every remaining fileset pass
    Stop,
}

impl PassResult {
    pub fn is_stop(&self) -> bool {
        *self == PassResult::Stop
    }
}

/// Behavior shared by both pass shapes
pub trait CompilerPass: Send + Sync {
    /// Stable name, unique within a pipeline
    ///
    /// Derived from the pass role without the `Pass` suffix, e.g.
    /// `"ResolveNames"`. Continuation rules are looked up by this name.
    fn name(&self) -> &'static str;

    /// A short description of what this pass does
    fn description(&self) -> &'static str {
        "(undocumented pass)"
    }
}

/// A pass that operates on one file in isolation
///
/// Implementations must not read or write any file other than `file`; the
/// only state shared with other files is the id generator. That is what
/// lets a driver run the single-file phase for several files in parallel.
pub trait FilePass: CompilerPass {
    /// Run the pass
    ///
    /// Problems are reported through the pass's error reporter, never by
    /// aborting: later passes still run over the same file.
    fn run(&self, file: &mut FileNode, id_generator: &IdGenerator);
}

/// A pass that operates on the whole file set
pub trait FileSetPass: CompilerPass {
    /// Run the pass
    ///
    /// `files` may be extended with synthetic files, e.g. template variants
    /// produced by the autoescaper.
    fn run(
        &self,
        files: &mut Vec<FileNode>,
        id_generator: &IdGenerator,
        registry: &TemplateRegistry,
    ) -> PassResult;
}
