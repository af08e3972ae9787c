//! Pipeline builder
//!
//! Collects compiler configuration and assembles the pass lists. Selection
//! is one hand-maintained total order of candidates (see [`PipelineBuilder::select`]);
//! there is no dependency inference, so ordering constraints between passes
//! are kept by keeping this order.

use std::sync::Arc;

use stencil_config::{
    ConformanceConfig, ContinuationRule, GeneralOptions, LoggingConfig, PassConfig, TriState,
};
use tracing::debug;

use crate::catalog::{FilePassId, FileSetPassId};
use crate::context::AssemblyContext;
use crate::deps::{ErrorReporter, PluginResolver, PrintDirectiveMap, TypeRegistry};
use crate::error::PipelineError;
use crate::factory::{PassFactory, PassSetup};
use crate::pipeline::{PassPlan, Pipeline};
use crate::registry::ContinuationRegistry;

/// Builder for configuring the pipeline
///
/// # Example
/// ```rust,ignore
/// use stencil_passes::PipelineBuilder;
///
/// let pipeline = PipelineBuilder::new()
///     .type_registry(types)
///     .print_directives(directives)
///     .error_reporter(reporter)
///     .general_options(options)
///     .optimize(false)
///     .build(&factory)?;
/// ```
pub struct PipelineBuilder {
    type_registry: Option<Arc<TypeRegistry>>,
    plugin_resolver: Option<Arc<PluginResolver>>,
    print_directives: Option<Arc<PrintDirectiveMap>>,
    error_reporter: Option<Arc<dyn ErrorReporter>>,
    options: Option<GeneralOptions>,
    allow_unknown_globals: bool,
    allow_v1_expression: bool,
    disable_all_type_checking: bool,
    desugar_html_nodes: bool,
    optimize: bool,
    conformance: ConformanceConfig,
    logging: LoggingConfig,
    autoescaper_enabled: bool,
    add_html_attributes_for_debugging: bool,
    continuation_rules: ContinuationRegistry,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self {
            type_registry: None,
            plugin_resolver: None,
            print_directives: None,
            error_reporter: None,
            options: None,
            allow_unknown_globals: false,
            allow_v1_expression: false,
            disable_all_type_checking: false,
            desugar_html_nodes: true,
            optimize: true,
            conformance: ConformanceConfig::default(),
            logging: LoggingConfig::default(),
            autoescaper_enabled: true,
            add_html_attributes_for_debugging: true,
            continuation_rules: ContinuationRegistry::new(),
        }
    }
}

impl std::fmt::Debug for PipelineBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("options", &self.options)
            .field("allow_unknown_globals", &self.allow_unknown_globals)
            .field("allow_v1_expression", &self.allow_v1_expression)
            .field("disable_all_type_checking", &self.disable_all_type_checking)
            .field("desugar_html_nodes", &self.desugar_html_nodes)
            .field("optimize", &self.optimize)
            .field("autoescaper_enabled", &self.autoescaper_enabled)
            .field("add_html_attributes_for_debugging", &self.add_html_attributes_for_debugging)
            .field("continuation_rules", &self.continuation_rules)
            .finish_non_exhaustive()
    }
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a loaded pass config
    ///
    /// Collaborators (type registry, print directives, error reporter) are
    /// not part of the document and still have to be set before `build`.
    pub fn from_config(config: &PassConfig) -> Self {
        let mut builder = Self::new()
            .general_options(config.options.clone())
            .desugar_html_nodes(config.desugar_html_nodes)
            .optimize(config.optimize)
            .autoescaper_enabled(config.autoescaper_enabled)
            .add_html_attributes_for_debugging(config.add_html_attributes_for_debugging)
            .conformance_config(config.conformance.clone())
            .logging_config(config.logging.clone());
        if config.disable_all_type_checking {
            builder = builder.disable_all_type_checking();
        }
        if config.allow_unknown_globals {
            builder = builder.allow_unknown_globals();
        }
        if config.allow_v1_expression {
            builder = builder.allow_v1_expression();
        }
        for (name, rule) in &config.continuation_rules {
            builder = builder.add_pass_continuation_rule(name.clone(), *rule);
        }
        builder
    }

    pub fn error_reporter(mut self, error_reporter: Arc<dyn ErrorReporter>) -> Self {
        self.error_reporter = Some(error_reporter);
        self
    }

    pub fn print_directives(mut self, print_directives: Arc<PrintDirectiveMap>) -> Self {
        self.print_directives = Some(print_directives);
        self
    }

    pub fn type_registry(mut self, type_registry: Arc<TypeRegistry>) -> Self {
        self.type_registry = Some(type_registry);
        self
    }

    pub fn plugin_resolver(mut self, plugin_resolver: Arc<PluginResolver>) -> Self {
        self.plugin_resolver = Some(plugin_resolver);
        self
    }

    pub fn general_options(mut self, options: GeneralOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Disable every pass that enforces or relies on type information
    ///
    /// Meant for tools like message extraction that run without a
    /// configured type registry.
    pub fn disable_all_type_checking(mut self) -> Self {
        self.disable_all_type_checking = true;
        self
    }

    /// Allow unknown global references (legacy templates only)
    pub fn allow_unknown_globals(mut self) -> Self {
        self.allow_unknown_globals = true;
        self
    }

    /// Allow `v1Expression()` (legacy templates only)
    pub fn allow_v1_expression(mut self) -> Self {
        self.allow_v1_expression = true;
        self
    }

    /// Whether html nodes are turned back into raw text before code
    /// generation. Defaults to `true`.
    pub fn desugar_html_nodes(mut self, desugar_html_nodes: bool) -> Self {
        self.desugar_html_nodes = desugar_html_nodes;
        self
    }

    /// Whether the optimizer may run. Defaults to `true`; the general
    /// options must also enable it.
    pub fn optimize(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }

    pub fn add_html_attributes_for_debugging(mut self, add: bool) -> Self {
        self.add_html_attributes_for_debugging = add;
        self
    }

    pub fn conformance_config(mut self, conformance: ConformanceConfig) -> Self {
        self.conformance = conformance;
        self
    }

    pub fn logging_config(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }

    /// Enable or disable the autoescaper. Enabled by default.
    pub fn autoescaper_enabled(mut self, enabled: bool) -> Self {
        self.autoescaper_enabled = enabled;
        self
    }

    /// Halt assembly before or after the named pass
    ///
    /// Overwrites any rule previously registered for the same name. The
    /// name is the pass role without the `Pass` suffix, e.g.
    /// `"ResolveNames"`.
    pub fn add_pass_continuation_rule(
        mut self,
        pass_name: impl Into<String>,
        rule: ContinuationRule,
    ) -> Self {
        self.continuation_rules.insert(pass_name, rule);
        self
    }

    /// Select and order the passes without instantiating them
    pub fn plan(mut self) -> Result<PassPlan, PipelineError> {
        self.assemble()
    }

    /// Assemble the pipeline, creating each selected pass with `factory`
    pub fn build(mut self, factory: &dyn PassFactory) -> Result<Pipeline, PipelineError> {
        if self.type_registry.is_none() {
            return Err(PipelineError::MissingField("type registry"));
        }
        if self.print_directives.is_none() {
            return Err(PipelineError::MissingField("print directives"));
        }
        if self.error_reporter.is_none() {
            return Err(PipelineError::MissingField("error reporter"));
        }
        let plan = self.assemble()?;

        let (Some(type_registry), Some(print_directives), Some(error_reporter), Some(options)) = (
            self.type_registry.as_ref(),
            self.print_directives.as_ref(),
            self.error_reporter.as_ref(),
            self.options.as_ref(),
        ) else {
            return Err(PipelineError::MissingField("general options"));
        };
        let setup = PassSetup {
            type_registry,
            plugin_resolver: self.plugin_resolver.as_ref(),
            print_directives,
            error_reporter,
            options,
            conformance: &self.conformance,
            logging: &self.logging,
            allow_v1_expression: self.allow_v1_expression,
            type_checking_enabled: !self.disable_all_type_checking,
        };

        let single_file_passes = plan
            .single_file_passes
            .iter()
            .map(|&id| {
                let pass = factory.file_pass(id, &setup);
                check_name(id.name(), pass.name())?;
                Ok(pass)
            })
            .collect::<Result<Vec<_>, PipelineError>>()?;
        let cross_template_checking_passes = plan
            .cross_template_checking_passes
            .iter()
            .map(|&id| {
                let pass = factory.fileset_pass(id, &setup);
                check_name(id.name(), pass.name())?;
                Ok(pass)
            })
            .collect::<Result<Vec<_>, PipelineError>>()?;

        Ok(Pipeline::new(single_file_passes, cross_template_checking_passes))
    }

    fn assemble(&mut self) -> Result<PassPlan, PipelineError> {
        let registry = std::mem::take(&mut self.continuation_rules);
        let options = self
            .options
            .as_ref()
            .ok_or(PipelineError::MissingField("general options"))?;

        let mut ctx = AssemblyContext::new(registry);
        let plan = self.select(options, &mut ctx);
        ctx.finish()?;

        debug!(
            target: "stencil::assembly",
            single_file = plan.single_file_passes.len(),
            fileset = plan.cross_template_checking_passes.len(),
            "pipeline assembled"
        );
        Ok(plan)
    }

    /// The fixed candidate order
    ///
    /// Several passes depend on earlier ones: name resolution before type
    /// resolution, placeholder insertion before anything inspecting message
    /// placeholders, globals rewriting before the unknown-globals check.
    fn select(&self, options: &GeneralOptions, ctx: &mut AssemblyContext) -> PassPlan {
        let type_checking = !self.disable_all_type_checking;
        let mut single = Vec::new();
        ctx.add_pass(FilePassId::EnforceExperimentalFeatures, &mut single);
        ctx.add_pass(FilePassId::ResolveHeaderParamTypes, &mut single);
        ctx.add_pass(FilePassId::BasicHtmlValidation, &mut single);
        ctx.add_pass(FilePassId::ResolvePlugins, &mut single);
        ctx.add_pass(FilePassId::SoyConformance, &mut single);
        ctx.add_pass(FilePassId::ContentSecurityPolicyNonceInjection, &mut single);
        ctx.add_pass(FilePassId::InsertMsgPlaceholderNodes, &mut single);
        ctx.add_pass(FilePassId::RewriteRemainders, &mut single);
        ctx.add_pass(FilePassId::RewriteGenderMsgs, &mut single);
        ctx.add_pass(FilePassId::CalculateMsgSubstitutionInfo, &mut single);
        ctx.add_pass(FilePassId::CheckNonEmptyMsgNodes, &mut single);
        ctx.add_pass(FilePassId::VeRewrite, &mut single);
        ctx.add_pass(FilePassId::RewriteGlobals, &mut single);
        ctx.add_pass(FilePassId::Xid, &mut single);
        ctx.add_pass(FilePassId::V1Expression, &mut single);
        ctx.add_pass(FilePassId::ResolveNames, &mut single);
        ctx.add_pass(FilePassId::MsgWithIdFunction, &mut single);
        ctx.add_pass(FilePassId::CheckEscapingSanityFile, &mut single);
        ctx.add_pass(FilePassId::StrictHtmlValidation, &mut single);
        if self.add_html_attributes_for_debugging {
            ctx.add_pass(FilePassId::AddDebugAttributes, &mut single);
        }
        if type_checking {
            ctx.add_pass(FilePassId::CheckDeclaredTypes, &mut single);
            ctx.add_pass(FilePassId::ResolveExpressionTypes, &mut single);
            ctx.add_pass(FilePassId::VeLogRewrite, &mut single);
            ctx.add_pass(FilePassId::VeLogValidation, &mut single);
        }
        ctx.add_pass(FilePassId::ResolvePackageRelativeCssNames, &mut single);
        if !self.allow_unknown_globals {
            ctx.add_pass(FilePassId::CheckGlobals, &mut single);
        }
        ctx.add_pass(FilePassId::ValidateAliases, &mut single);
        if options.strict_autoescaping_required == TriState::Enabled {
            ctx.add_pass(FilePassId::AssertStrictAutoescaping, &mut single);
        }
        ctx.add_pass(FilePassId::KeyCommand, &mut single);
        ctx.add_pass(FilePassId::SoyElement, &mut single);

        // Cross-template checks.
        let mut fileset = Vec::new();
        ctx.add_pass(FileSetPassId::CheckTemplateHeaderVars, &mut fileset);
        if type_checking {
            ctx.add_pass(FileSetPassId::CheckTemplateCalls, &mut fileset);
        }
        ctx.add_pass(FileSetPassId::CheckTemplateVisibility, &mut fileset);
        ctx.add_pass(FileSetPassId::CheckDelegates, &mut fileset);
        if options.allow_external_calls == TriState::Disabled {
            ctx.add_pass(FileSetPassId::StrictDeps, &mut fileset);
        }

        // Autoescaping. Contextual usage checks need both escaping contexts
        // and types.
        if self.autoescaper_enabled {
            ctx.add_pass(FileSetPassId::Autoescaper, &mut fileset);
            if type_checking {
                ctx.add_pass(FileSetPassId::CheckBadContextualUsage, &mut fileset);
            }
        }

        // Simplification. Raw text combining must stay last: both passes
        // before it can leave adjacent raw text nodes behind.
        if self.desugar_html_nodes {
            ctx.add_pass(FileSetPassId::DesugarHtmlNodes, &mut fileset);
        }
        // TODO: collapse into a single optimizer switch once every caller
        // sets `GeneralOptions::optimizer_enabled` instead of `optimize`.
        if self.optimize && options.optimizer_enabled {
            ctx.add_pass(FileSetPassId::Optimization, &mut fileset);
        }
        ctx.add_pass(FileSetPassId::CombineConsecutiveRawTextNodes, &mut fileset);

        PassPlan {
            single_file_passes: single,
            cross_template_checking_passes: fileset,
        }
    }
}

fn check_name(expected: &'static str, actual: &'static str) -> Result<(), PipelineError> {
    if expected == actual {
        Ok(())
    } else {
        Err(PipelineError::PassNameMismatch { expected, actual })
    }
}
