//! Assembled pipeline
//!
//! [`PassPlan`] is the selected pass order; [`Pipeline`] holds the
//! instantiated passes and runs them. Both are immutable once built, so a
//! pipeline can be cached and shared by every compilation that uses the
//! same configuration.

use serde::Serialize;
use tracing::{debug, trace};

use crate::ast::{FileNode, FileSetNode, IdGenerator};
use crate::catalog::{FilePassId, FileSetPassId};
use crate::pass::{FilePass, FileSetPass, PassResult};
use crate::templates::TemplateRegistry;

/// Pass ids in execution order, per list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassPlan {
    pub single_file_passes: Vec<FilePassId>,
    pub cross_template_checking_passes: Vec<FileSetPassId>,
}

impl PassPlan {
    pub fn single_file_names(&self) -> Vec<&'static str> {
        self.single_file_passes.iter().map(|id| id.name()).collect()
    }

    pub fn fileset_names(&self) -> Vec<&'static str> {
        self.cross_template_checking_passes
            .iter()
            .map(|id| id.name())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.single_file_passes.is_empty() && self.cross_template_checking_passes.is_empty()
    }
}

/// The two ordered pass lists and their executors
pub struct Pipeline {
    single_file_passes: Vec<Box<dyn FilePass>>,
    cross_template_checking_passes: Vec<Box<dyn FileSetPass>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("single_file_passes", &self.single_file_pass_names())
            .field(
                "cross_template_checking_passes",
                &self.cross_template_checking_pass_names(),
            )
            .finish()
    }
}

impl Pipeline {
    pub(crate) fn new(
        single_file_passes: Vec<Box<dyn FilePass>>,
        cross_template_checking_passes: Vec<Box<dyn FileSetPass>>,
    ) -> Self {
        Self {
            single_file_passes,
            cross_template_checking_passes,
        }
    }

    /// Run every single-file pass over `file`, in order
    ///
    /// There is no early exit: a pass that reported diagnostics does not
    /// keep the following passes from running, so one compilation surfaces
    /// as many problems as possible.
    pub fn run_single_file_passes(&self, file: &mut FileNode, id_generator: &IdGenerator) {
        for pass in &self.single_file_passes {
            trace!(target: "stencil::single_file", pass = pass.name(), file = %file.path, "running pass");
            pass.run(file, id_generator);
        }
    }

    /// Run the fileset passes (cross-template checks, autoescaping and
    /// simplification) over the whole set
    ///
    /// Stops at the first pass returning [`PassResult::Stop`] and reports
    /// that back; nothing after it runs.
    pub fn run_whole_fileset_passes(
        &self,
        file_set: &mut FileSetNode,
        registry: &TemplateRegistry,
    ) -> PassResult {
        let FileSetNode {
            files,
            id_generator,
        } = file_set;
        for pass in &self.cross_template_checking_passes {
            trace!(target: "stencil::fileset", pass = pass.name(), files = files.len(), "running pass");
            if pass.run(files, id_generator, registry).is_stop() {
                debug!(target: "stencil::fileset", pass = pass.name(), "pass requested stop");
                return PassResult::Stop;
            }
        }
        PassResult::Continue
    }

    pub fn single_file_pass_names(&self) -> Vec<&'static str> {
        self.single_file_passes.iter().map(|p| p.name()).collect()
    }

    pub fn cross_template_checking_pass_names(&self) -> Vec<&'static str> {
        self.cross_template_checking_passes
            .iter()
            .map(|p| p.name())
            .collect()
    }
}
