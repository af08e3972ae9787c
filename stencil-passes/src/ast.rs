//! Syntax tree types the passes operate on
//!
//! Only the shape the orchestrator and the built-in simplification passes
//! need. Parsing and the full node vocabulary belong to the front end.

use std::sync::atomic::{AtomicU32, Ordering};

/// Node identifier, unique across a whole file set
pub type NodeId = u32;

/// Hands out node ids for synthetic nodes
///
/// One generator is shared by every file of a file set, so ids stay unique
/// even when files are processed independently (or on different threads).
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: AtomicU32,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start handing out ids at `first`, e.g. after the parser's own ids
    pub fn starting_at(first: NodeId) -> Self {
        Self {
            next: AtomicU32::new(first),
        }
    }

    /// Allocate a fresh id
    pub fn gen_id(&self) -> NodeId {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// A node in a template body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text emitted as-is
    RawText { id: NodeId, text: String },
    /// An HTML open or close tag, `<name>` / `</name>`
    HtmlTag {
        id: NodeId,
        name: String,
        closing: bool,
    },
    /// `{print expr}`
    Print { id: NodeId, expr: String },
    /// `{call callee /}`
    Call { id: NodeId, callee: String },
}

impl Node {
    pub fn raw_text(id: NodeId, text: impl Into<String>) -> Self {
        Node::RawText {
            id,
            text: text.into(),
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            Node::RawText { id, .. }
            | Node::HtmlTag { id, .. }
            | Node::Print { id, .. }
            | Node::Call { id, .. } => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateNode {
    pub id: NodeId,
    /// Fully qualified name, e.g. `ns.foo.bar`
    pub name: String,
    pub visibility: Visibility,
    pub body: Vec<Node>,
}

impl TemplateNode {
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            visibility: Visibility::Public,
            body: Vec::new(),
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_body(mut self, body: Vec<Node>) -> Self {
        self.body = body;
        self
    }
}

/// One source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    pub path: String,
    pub templates: Vec<TemplateNode>,
}

impl FileNode {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            templates: Vec::new(),
        }
    }

    pub fn with_template(mut self, template: TemplateNode) -> Self {
        self.templates.push(template);
        self
    }
}

/// The whole compilation unit: every file plus the shared id generator
#[derive(Debug, Default)]
pub struct FileSetNode {
    pub files: Vec<FileNode>,
    pub id_generator: IdGenerator,
}

impl FileSetNode {
    pub fn new(id_generator: IdGenerator) -> Self {
        Self {
            files: Vec::new(),
            id_generator,
        }
    }

    pub fn add_file(&mut self, file: FileNode) {
        self.files.push(file);
    }
}
