//! 测试辅助工具
//!
//! A pass factory whose passes record every run, plus a fully wired builder.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use stencil_passes::{
    builtin_fileset_pass, CollectingErrorReporter, CompilerPass, Diagnostic, ErrorReporter,
    FileNode, FilePass, FilePassId, FileSetPass, FileSetPassId, GeneralOptions, IdGenerator,
    Node, PassFactory, PassResult, PassSetup, PipelineBuilder, PrintDirective,
    PrintDirectiveMap, TemplateNode, TemplateRegistry, TypeRegistry,
};

/// Names of the passes that ran, in run order
pub type RunLog = Arc<Mutex<Vec<String>>>;

pub fn ran(log: &RunLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

#[derive(Default)]
pub struct RecordingFactory {
    pub log: RunLog,
    /// This fileset pass returns STOP
    pub stop_at: Option<FileSetPassId>,
    /// Wrap the built-in simplification passes instead of no-op bodies
    pub use_builtins: bool,
    /// Every single-file pass reports one diagnostic
    pub report_from_every_pass: bool,
}

struct RecordingFilePass {
    name: &'static str,
    log: RunLog,
    reporter: Arc<dyn ErrorReporter>,
    report: bool,
}

impl CompilerPass for RecordingFilePass {
    fn name(&self) -> &'static str {
        self.name
    }
}

impl FilePass for RecordingFilePass {
    fn run(&self, file: &mut FileNode, _id_generator: &IdGenerator) {
        self.log.lock().unwrap().push(self.name.to_string());
        if self.report {
            self.reporter.report(Diagnostic {
                pass: self.name.to_string(),
                file: file.path.clone(),
                message: "synthetic diagnostic".to_string(),
            });
        }
    }
}

struct RecordingFileSetPass {
    name: &'static str,
    log: RunLog,
    result: PassResult,
    inner: Option<Box<dyn FileSetPass>>,
}

impl CompilerPass for RecordingFileSetPass {
    fn name(&self) -> &'static str {
        self.name
    }
}

impl FileSetPass for RecordingFileSetPass {
    fn run(
        &self,
        files: &mut Vec<FileNode>,
        id_generator: &IdGenerator,
        registry: &TemplateRegistry,
    ) -> PassResult {
        self.log.lock().unwrap().push(self.name.to_string());
        if let Some(inner) = &self.inner {
            inner.run(files, id_generator, registry);
        }
        self.result
    }
}

impl PassFactory for RecordingFactory {
    fn file_pass(&self, id: FilePassId, setup: &PassSetup<'_>) -> Box<dyn FilePass> {
        Box::new(RecordingFilePass {
            name: id.name(),
            log: self.log.clone(),
            reporter: setup.error_reporter.clone(),
            report: self.report_from_every_pass,
        })
    }

    fn fileset_pass(&self, id: FileSetPassId, _setup: &PassSetup<'_>) -> Box<dyn FileSetPass> {
        let result = if self.stop_at == Some(id) {
            PassResult::Stop
        } else {
            PassResult::Continue
        };
        let inner = if self.use_builtins {
            builtin_fileset_pass(id)
        } else {
            None
        };
        Box::new(RecordingFileSetPass {
            name: id.name(),
            log: self.log.clone(),
            result,
            inner,
        })
    }
}

/// A builder with every required collaborator set
pub fn wired_builder(reporter: Arc<CollectingErrorReporter>) -> PipelineBuilder {
    let mut directives = PrintDirectiveMap::new();
    directives.insert("|escapeHtml".to_string(), PrintDirective::new("|escapeHtml"));
    PipelineBuilder::new()
        .type_registry(Arc::new(TypeRegistry::with_builtins()))
        .print_directives(Arc::new(directives))
        .error_reporter(reporter)
        .general_options(GeneralOptions::default())
}

/// Two small files with html tags and raw text runs
pub fn sample_file_set() -> stencil_passes::FileSetNode {
    let mut set = stencil_passes::FileSetNode::new(IdGenerator::starting_at(100));
    set.add_file(
        FileNode::new("greeting.soy").with_template(TemplateNode::new(1, "ns.greeting").with_body(vec![
            Node::HtmlTag { id: 2, name: "p".to_string(), closing: false },
            Node::raw_text(3, "Hello, "),
            Node::Print { id: 4, expr: "$name".to_string() },
            Node::HtmlTag { id: 5, name: "p".to_string(), closing: true },
        ])),
    );
    set.add_file(
        FileNode::new("page.soy").with_template(TemplateNode::new(6, "ns.page").with_body(vec![
            Node::raw_text(7, "<main>"),
            Node::Call { id: 8, callee: "ns.greeting".to_string() },
            Node::raw_text(9, "</main>"),
        ])),
    );
    set
}
