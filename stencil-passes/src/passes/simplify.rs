//! Simplification passes
//!
//! Run at the very end of the fileset phase, after everything that may
//! rewrite template bodies.

use crate::ast::{FileNode, IdGenerator, Node};
use crate::pass::{CompilerPass, FileSetPass, PassResult};
use crate::templates::TemplateRegistry;

/// Turns html tag nodes back into raw text
///
/// Every code generation backend except one expects plain text here.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesugarHtmlNodesPass;

impl CompilerPass for DesugarHtmlNodesPass {
    fn name(&self) -> &'static str {
        "DesugarHtmlNodes"
    }

    fn description(&self) -> &'static str {
        "Replace html tag nodes with raw text"
    }
}

impl FileSetPass for DesugarHtmlNodesPass {
    fn run(
        &self,
        files: &mut Vec<FileNode>,
        _id_generator: &IdGenerator,
        _registry: &TemplateRegistry,
    ) -> PassResult {
        for template in files.iter_mut().flat_map(|f| f.templates.iter_mut()) {
            for node in template.body.iter_mut() {
                if let Node::HtmlTag { id, name, closing } = node {
                    let text = if *closing {
                        format!("</{name}>")
                    } else {
                        format!("<{name}>")
                    };
                    *node = Node::raw_text(*id, text);
                }
            }
        }
        PassResult::Continue
    }
}

/// Merges runs of adjacent raw text nodes into one
///
/// The merged node keeps the id of the first node in the run.
#[derive(Debug, Default, Clone, Copy)]
pub struct CombineConsecutiveRawTextNodesPass;

impl CompilerPass for CombineConsecutiveRawTextNodesPass {
    fn name(&self) -> &'static str {
        "CombineConsecutiveRawTextNodes"
    }

    fn description(&self) -> &'static str {
        "Merge adjacent raw text nodes"
    }
}

impl FileSetPass for CombineConsecutiveRawTextNodesPass {
    fn run(
        &self,
        files: &mut Vec<FileNode>,
        _id_generator: &IdGenerator,
        _registry: &TemplateRegistry,
    ) -> PassResult {
        for template in files.iter_mut().flat_map(|f| f.templates.iter_mut()) {
            let body = std::mem::take(&mut template.body);
            let mut merged: Vec<Node> = Vec::with_capacity(body.len());
            for node in body {
                if let Node::RawText { text, .. } = &node {
                    if let Some(Node::RawText { text: previous, .. }) = merged.last_mut() {
                        previous.push_str(text);
                        continue;
                    }
                }
                merged.push(node);
            }
            template.body = merged;
        }
        PassResult::Continue
    }
}
