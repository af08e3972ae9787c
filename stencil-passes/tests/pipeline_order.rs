//! Pass order for representative configurations

use stencil_passes::{
    FilePassId, FileSetPassId, GeneralOptions, PassConfig, PassPhase, PipelineBuilder, TriState,
};

const DEFAULT_SINGLE_FILE: &[&str] = &[
    "EnforceExperimentalFeatures",
    "ResolveHeaderParamTypes",
    "BasicHtmlValidation",
    "ResolvePlugins",
    "SoyConformance",
    "ContentSecurityPolicyNonceInjection",
    "InsertMsgPlaceholderNodes",
    "RewriteRemainders",
    "RewriteGenderMsgs",
    "CalculateMsgSubstitutionInfo",
    "CheckNonEmptyMsgNodes",
    "VeRewrite",
    "RewriteGlobals",
    "Xid",
    "V1Expression",
    "ResolveNames",
    "MsgWithIdFunction",
    "CheckEscapingSanityFile",
    "StrictHtmlValidation",
    "AddDebugAttributes",
    "CheckDeclaredTypes",
    "ResolveExpressionTypes",
    "VeLogRewrite",
    "VeLogValidation",
    "ResolvePackageRelativeCssNames",
    "CheckGlobals",
    "ValidateAliases",
    "KeyCommand",
    "SoyElement",
];

const DEFAULT_FILESET: &[&str] = &[
    "CheckTemplateHeaderVars",
    "CheckTemplateCalls",
    "CheckTemplateVisibility",
    "CheckDelegates",
    "Autoescaper",
    "CheckBadContextualUsage",
    "DesugarHtmlNodes",
    "Optimization",
    "CombineConsecutiveRawTextNodes",
];

fn default_builder() -> PipelineBuilder {
    PipelineBuilder::new().general_options(GeneralOptions::default())
}

fn position(names: &[&str], name: &str) -> usize {
    names
        .iter()
        .position(|n| *n == name)
        .unwrap_or_else(|| panic!("{} not in {:?}", name, names))
}

#[test]
fn test_default_order() {
    let plan = default_builder().plan().unwrap();
    assert_eq!(plan.single_file_names(), DEFAULT_SINGLE_FILE);
    assert_eq!(plan.fileset_names(), DEFAULT_FILESET);
}

#[test]
fn test_every_optional_pass_enabled() {
    let options = GeneralOptions {
        strict_autoescaping_required: TriState::Enabled,
        allow_external_calls: TriState::Disabled,
        ..GeneralOptions::default()
    };
    let plan = PipelineBuilder::new().general_options(options).plan().unwrap();

    // Every catalog entry is selected, in catalog order.
    assert_eq!(plan.single_file_passes, FilePassId::ALL);
    assert_eq!(plan.cross_template_checking_passes, FileSetPassId::ALL);

    let single = plan.single_file_names();
    assert_eq!(
        position(&single, "AssertStrictAutoescaping") + 1,
        position(&single, "KeyCommand")
    );
    let fileset = plan.fileset_names();
    assert_eq!(position(&fileset, "StrictDeps"), position(&fileset, "CheckDelegates") + 1);
}

#[test]
fn test_minimal_pipeline() {
    let plan = default_builder()
        .disable_all_type_checking()
        .allow_unknown_globals()
        .add_html_attributes_for_debugging(false)
        .autoescaper_enabled(false)
        .desugar_html_nodes(false)
        .optimize(false)
        .plan()
        .unwrap();

    assert_eq!(plan.single_file_passes.len(), 23);
    assert_eq!(
        plan.fileset_names(),
        vec![
            "CheckTemplateHeaderVars",
            "CheckTemplateVisibility",
            "CheckDelegates",
            "CombineConsecutiveRawTextNodes",
        ]
    );
}

#[test]
fn test_type_checking_on_optimizer_off() {
    let plan = default_builder().optimize(false).plan().unwrap();

    let fileset = plan.fileset_names();
    assert_eq!(
        &fileset[fileset.len() - 2..],
        &["DesugarHtmlNodes", "CombineConsecutiveRawTextNodes"]
    );
    assert!(!fileset.contains(&"Optimization"));

    let single = plan.single_file_names();
    let resolve_types: Vec<_> = single
        .iter()
        .filter(|n| **n == "ResolveExpressionTypes")
        .collect();
    assert_eq!(resolve_types.len(), 1);
    assert!(position(&single, "ResolveNames") < position(&single, "ResolveExpressionTypes"));
}

#[test]
fn test_disabling_type_checking_removes_exactly_type_dependent_passes() {
    let full = default_builder().plan().unwrap();
    let untyped = default_builder().disable_all_type_checking().plan().unwrap();

    let removed: Vec<FilePassId> = full
        .single_file_passes
        .iter()
        .copied()
        .filter(|id| !untyped.single_file_passes.contains(id))
        .collect();
    assert!(removed.iter().all(|id| id.is_type_dependent()));
    assert_eq!(removed.len(), 4);

    let removed: Vec<FileSetPassId> = full
        .cross_template_checking_passes
        .iter()
        .copied()
        .filter(|id| !untyped.cross_template_checking_passes.contains(id))
        .collect();
    assert_eq!(
        removed,
        vec![FileSetPassId::CheckTemplateCalls, FileSetPassId::CheckBadContextualUsage]
    );

    // What remains keeps its relative order.
    let kept: Vec<FilePassId> = full
        .single_file_passes
        .iter()
        .copied()
        .filter(|id| !id.is_type_dependent())
        .collect();
    assert_eq!(untyped.single_file_passes, kept);
}

#[test]
fn test_disabling_autoescaper_removes_contextual_checks() {
    let plan = default_builder().autoescaper_enabled(false).plan().unwrap();
    let fileset = plan.fileset_names();
    assert!(!fileset.contains(&"Autoescaper"));
    assert!(!fileset.contains(&"CheckBadContextualUsage"));
    assert!(fileset.contains(&"CheckTemplateCalls"));
}

#[test]
fn test_unknown_globals_skip_the_globals_check_only() {
    let plan = default_builder().allow_unknown_globals().plan().unwrap();
    let single = plan.single_file_names();
    assert!(!single.contains(&"CheckGlobals"));
    assert!(single.contains(&"RewriteGlobals"));
    assert_eq!(single.len(), DEFAULT_SINGLE_FILE.len() - 1);
}

#[test]
fn test_ordering_constraints_hold_for_every_toggle() {
    let toggles = [
        default_builder().plan().unwrap(),
        default_builder().allow_unknown_globals().plan().unwrap(),
        default_builder().add_html_attributes_for_debugging(false).plan().unwrap(),
        default_builder().autoescaper_enabled(false).plan().unwrap(),
        default_builder().desugar_html_nodes(false).plan().unwrap(),
    ];
    for plan in &toggles {
        let single = plan.single_file_names();
        assert!(position(&single, "ResolveNames") < position(&single, "ResolveExpressionTypes"));
        assert!(position(&single, "InsertMsgPlaceholderNodes") < position(&single, "CheckNonEmptyMsgNodes"));
        if single.contains(&"CheckGlobals") {
            assert!(position(&single, "RewriteGlobals") < position(&single, "CheckGlobals"));
        }

        let fileset = plan.fileset_names();
        assert_eq!(fileset.last(), Some(&"CombineConsecutiveRawTextNodes"));
        let phases: Vec<PassPhase> = plan
            .cross_template_checking_passes
            .iter()
            .map(|id| id.phase())
            .collect();
        let mut sorted = phases.clone();
        sorted.sort();
        assert_eq!(phases, sorted);
    }
}

#[test]
fn test_plan_from_json_config() {
    let config = PassConfig::from_json(
        r#"{
            "autoescaper_enabled": false,
            "options": { "allow_external_calls": "disabled" }
        }"#,
    )
    .unwrap();
    let plan = PipelineBuilder::from_config(&config).plan().unwrap();
    assert_eq!(
        plan.fileset_names(),
        vec![
            "CheckTemplateHeaderVars",
            "CheckTemplateCalls",
            "CheckTemplateVisibility",
            "CheckDelegates",
            "StrictDeps",
            "DesugarHtmlNodes",
            "Optimization",
            "CombineConsecutiveRawTextNodes",
        ]
    );
}

#[test]
fn test_plan_serializes_as_names() {
    let plan = default_builder()
        .add_pass_continuation_rule("EnforceExperimentalFeatures", stencil_passes::ContinuationRule::StopAfterPass)
        .plan()
        .unwrap();
    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "single_file_passes": ["EnforceExperimentalFeatures"],
            "cross_template_checking_passes": []
        })
    );
}
