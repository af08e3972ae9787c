//! Built-in pass implementations
//!
//! Most passes are supplied by the surrounding compiler through a
//! [`PassFactory`](crate::factory::PassFactory). The simplification passes
//! below only need the tree shape defined in [`crate::ast`], so they ship
//! with the pipeline and factories can hand them out directly.

mod simplify;

pub use simplify::{CombineConsecutiveRawTextNodesPass, DesugarHtmlNodesPass};

use crate::catalog::FileSetPassId;
use crate::pass::FileSetPass;

/// The built-in implementation for `id`, if there is one
pub fn builtin_fileset_pass(id: FileSetPassId) -> Option<Box<dyn FileSetPass>> {
    match id {
        FileSetPassId::DesugarHtmlNodes => Some(Box::new(DesugarHtmlNodesPass)),
        FileSetPassId::CombineConsecutiveRawTextNodes => {
            Some(Box::new(CombineConsecutiveRawTextNodesPass))
        }
        _ => None,
    }
}
