//! Pass catalog
//!
//! Every pass the pipeline knows about, as a closed set of identities.
//! `ALL` lists each kind in the fixed assembly order; the builder walks the
//! same order and only decides which entries are candidates.

use serde::{Serialize, Serializer};

/// Something assembly can admit or drop by name
///
/// Lets `AssemblyContext::add_pass` take either id kind; both impls forward
/// to the inherent `name`, which stays the single definition.
pub trait PassName {
    fn name(&self) -> &'static str;
}

/// Logical phase a pass belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PassPhase {
    /// AST rewriting and validation needing one file's content
    SingleFile,
    /// Validation needing the template registry
    CrossTemplate,
    /// Contextual escaping; may synthesize templates
    Autoescaping,
    /// Tree simplification, always last
    Simplification,
}

impl PassPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            PassPhase::SingleFile => "single_file",
            PassPhase::CrossTemplate => "cross_template",
            PassPhase::Autoescaping => "autoescaping",
            PassPhase::Simplification => "simplification",
        }
    }
}

impl std::fmt::Display for PassPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-file passes, in assembly order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilePassId {
    EnforceExperimentalFeatures,
    ResolveHeaderParamTypes,
    BasicHtmlValidation,
    ResolvePlugins,
    SoyConformance,
    ContentSecurityPolicyNonceInjection,
    InsertMsgPlaceholderNodes,
    RewriteRemainders,
    RewriteGenderMsgs,
    CalculateMsgSubstitutionInfo,
    CheckNonEmptyMsgNodes,
    VeRewrite,
    RewriteGlobals,
    Xid,
    V1Expression,
    ResolveNames,
    MsgWithIdFunction,
    CheckEscapingSanityFile,
    StrictHtmlValidation,
    AddDebugAttributes,
    CheckDeclaredTypes,
    ResolveExpressionTypes,
    VeLogRewrite,
    VeLogValidation,
    ResolvePackageRelativeCssNames,
    CheckGlobals,
    ValidateAliases,
    AssertStrictAutoescaping,
    KeyCommand,
    SoyElement,
}

impl FilePassId {
    pub const ALL: [FilePassId; 30] = [
        FilePassId::EnforceExperimentalFeatures,
        FilePassId::ResolveHeaderParamTypes,
        FilePassId::BasicHtmlValidation,
        FilePassId::ResolvePlugins,
        FilePassId::SoyConformance,
        FilePassId::ContentSecurityPolicyNonceInjection,
        FilePassId::InsertMsgPlaceholderNodes,
        FilePassId::RewriteRemainders,
        FilePassId::RewriteGenderMsgs,
        FilePassId::CalculateMsgSubstitutionInfo,
        FilePassId::CheckNonEmptyMsgNodes,
        FilePassId::VeRewrite,
        FilePassId::RewriteGlobals,
        FilePassId::Xid,
        FilePassId::V1Expression,
        FilePassId::ResolveNames,
        FilePassId::MsgWithIdFunction,
        FilePassId::CheckEscapingSanityFile,
        FilePassId::StrictHtmlValidation,
        FilePassId::AddDebugAttributes,
        FilePassId::CheckDeclaredTypes,
        FilePassId::ResolveExpressionTypes,
        FilePassId::VeLogRewrite,
        FilePassId::VeLogValidation,
        FilePassId::ResolvePackageRelativeCssNames,
        FilePassId::CheckGlobals,
        FilePassId::ValidateAliases,
        FilePassId::AssertStrictAutoescaping,
        FilePassId::KeyCommand,
        FilePassId::SoyElement,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FilePassId::EnforceExperimentalFeatures => "EnforceExperimentalFeatures",
            FilePassId::ResolveHeaderParamTypes => "ResolveHeaderParamTypes",
            FilePassId::BasicHtmlValidation => "BasicHtmlValidation",
            FilePassId::ResolvePlugins => "ResolvePlugins",
            FilePassId::SoyConformance => "SoyConformance",
            FilePassId::ContentSecurityPolicyNonceInjection => "ContentSecurityPolicyNonceInjection",
            FilePassId::InsertMsgPlaceholderNodes => "InsertMsgPlaceholderNodes",
            FilePassId::RewriteRemainders => "RewriteRemainders",
            FilePassId::RewriteGenderMsgs => "RewriteGenderMsgs",
            FilePassId::CalculateMsgSubstitutionInfo => "CalculateMsgSubstitutionInfo",
            FilePassId::CheckNonEmptyMsgNodes => "CheckNonEmptyMsgNodes",
            FilePassId::VeRewrite => "VeRewrite",
            FilePassId::RewriteGlobals => "RewriteGlobals",
            FilePassId::Xid => "Xid",
            FilePassId::V1Expression => "V1Expression",
            FilePassId::ResolveNames => "ResolveNames",
            FilePassId::MsgWithIdFunction => "MsgWithIdFunction",
            FilePassId::CheckEscapingSanityFile => "CheckEscapingSanityFile",
            FilePassId::StrictHtmlValidation => "StrictHtmlValidation",
            FilePassId::AddDebugAttributes => "AddDebugAttributes",
            FilePassId::CheckDeclaredTypes => "CheckDeclaredTypes",
            FilePassId::ResolveExpressionTypes => "ResolveExpressionTypes",
            FilePassId::VeLogRewrite => "VeLogRewrite",
            FilePassId::VeLogValidation => "VeLogValidation",
            FilePassId::ResolvePackageRelativeCssNames => "ResolvePackageRelativeCssNames",
            FilePassId::CheckGlobals => "CheckGlobals",
            FilePassId::ValidateAliases => "ValidateAliases",
            FilePassId::AssertStrictAutoescaping => "AssertStrictAutoescaping",
            FilePassId::KeyCommand => "KeyCommand",
            FilePassId::SoyElement => "SoyElement",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }

    pub fn phase(&self) -> PassPhase {
        PassPhase::SingleFile
    }

    /// Whether the pass needs (or enforces) type information
    pub fn is_type_dependent(&self) -> bool {
        matches!(
            self,
            FilePassId::CheckDeclaredTypes
                | FilePassId::ResolveExpressionTypes
                | FilePassId::VeLogRewrite
                | FilePassId::VeLogValidation
        )
    }
}

/// Fileset passes, in assembly order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileSetPassId {
    CheckTemplateHeaderVars,
    CheckTemplateCalls,
    CheckTemplateVisibility,
    CheckDelegates,
    StrictDeps,
    Autoescaper,
    CheckBadContextualUsage,
    DesugarHtmlNodes,
    Optimization,
    CombineConsecutiveRawTextNodes,
}

impl FileSetPassId {
    pub const ALL: [FileSetPassId; 10] = [
        FileSetPassId::CheckTemplateHeaderVars,
        FileSetPassId::CheckTemplateCalls,
        FileSetPassId::CheckTemplateVisibility,
        FileSetPassId::CheckDelegates,
        FileSetPassId::StrictDeps,
        FileSetPassId::Autoescaper,
        FileSetPassId::CheckBadContextualUsage,
        FileSetPassId::DesugarHtmlNodes,
        FileSetPassId::Optimization,
        FileSetPassId::CombineConsecutiveRawTextNodes,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FileSetPassId::CheckTemplateHeaderVars => "CheckTemplateHeaderVars",
            FileSetPassId::CheckTemplateCalls => "CheckTemplateCalls",
            FileSetPassId::CheckTemplateVisibility => "CheckTemplateVisibility",
            FileSetPassId::CheckDelegates => "CheckDelegates",
            FileSetPassId::StrictDeps => "StrictDeps",
            FileSetPassId::Autoescaper => "Autoescaper",
            FileSetPassId::CheckBadContextualUsage => "CheckBadContextualUsage",
            FileSetPassId::DesugarHtmlNodes => "DesugarHtmlNodes",
            FileSetPassId::Optimization => "Optimization",
            FileSetPassId::CombineConsecutiveRawTextNodes => "CombineConsecutiveRawTextNodes",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }

    pub fn phase(&self) -> PassPhase {
        match self {
            FileSetPassId::CheckTemplateHeaderVars
            | FileSetPassId::CheckTemplateCalls
            | FileSetPassId::CheckTemplateVisibility
            | FileSetPassId::CheckDelegates
            | FileSetPassId::StrictDeps => PassPhase::CrossTemplate,
            FileSetPassId::Autoescaper | FileSetPassId::CheckBadContextualUsage => {
                PassPhase::Autoescaping
            }
            FileSetPassId::DesugarHtmlNodes
            | FileSetPassId::Optimization
            | FileSetPassId::CombineConsecutiveRawTextNodes => PassPhase::Simplification,
        }
    }

    pub fn is_type_dependent(&self) -> bool {
        matches!(
            self,
            FileSetPassId::CheckTemplateCalls | FileSetPassId::CheckBadContextualUsage
        )
    }
}

impl PassName for FilePassId {
    fn name(&self) -> &'static str {
        FilePassId::name(self)
    }
}

impl PassName for FileSetPassId {
    fn name(&self) -> &'static str {
        FileSetPassId::name(self)
    }
}

impl std::fmt::Display for FilePassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::fmt::Display for FileSetPassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for FilePassId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl Serialize for FileSetPassId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Whether `name` names any pass at all, regardless of configuration
pub fn is_known_pass(name: &str) -> bool {
    FilePassId::from_name(name).is_some() || FileSetPassId::from_name(name).is_some()
}
