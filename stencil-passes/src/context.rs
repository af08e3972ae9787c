//! Assembly context
//!
//! The state that only exists while one pipeline is being assembled: the
//! draining continuation registry and whether a rule has already halted
//! assembly. It is created by the builder for a single plan and consumed
//! by [`AssemblyContext::finish`].

use stencil_config::ContinuationRule;
use tracing::{debug, trace};

use crate::catalog::PassName;
use crate::error::PipelineError;
use crate::registry::ContinuationRegistry;

#[derive(Debug)]
pub struct AssemblyContext {
    registry: ContinuationRegistry,
    building: bool,
}

impl AssemblyContext {
    pub fn new(registry: ContinuationRegistry) -> Self {
        Self {
            registry,
            building: true,
        }
    }

    /// Offer one candidate pass to `target`
    ///
    /// The candidate's rule is consumed even when assembly has already
    /// halted, so rules for passes after the halt point never count as
    /// unmatched.
    pub fn add_pass<T: PassName>(&mut self, pass: T, target: &mut Vec<T>) {
        let rule = self.registry.take(pass.name());
        if !self.building {
            trace!(target: "stencil::assembly", pass = pass.name(), "dropped, assembly halted");
            return;
        }
        match rule {
            None => {
                trace!(target: "stencil::assembly", pass = pass.name(), "admitted");
                target.push(pass);
            }
            Some(ContinuationRule::StopAfterPass) => {
                debug!(target: "stencil::assembly", pass = pass.name(), "admitted, halting after it");
                target.push(pass);
                self.building = false;
            }
            Some(ContinuationRule::StopBeforePass) => {
                debug!(target: "stencil::assembly", pass = pass.name(), "halting before it");
                self.building = false;
            }
        }
    }

    /// Whether no rule has halted assembly yet
    pub fn is_building(&self) -> bool {
        self.building
    }

    /// End assembly; every registered rule must have met its pass
    pub fn finish(self) -> Result<(), PipelineError> {
        if self.registry.is_empty() {
            Ok(())
        } else {
            Err(PipelineError::UnmatchedContinuationRules {
                rules: self.registry.describe(),
                names: self.registry.names(),
            })
        }
    }
}
