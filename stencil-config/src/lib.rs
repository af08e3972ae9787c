//! Stencil Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It serves as the shared configuration vocabulary between the pass
//! orchestrator and the command line front end.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A three-valued option where "not set" is distinct from "off"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriState {
    Enabled,
    Disabled,
    #[default]
    Unset,
}

/// General compiler options shared by every backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralOptions {
    /// Experimental language features the templates may use
    pub experimental_features: Vec<String>,
    /// Globals whose values are known at compile time
    pub compile_time_globals: BTreeMap<String, serde_json::Value>,
    /// Whether every template must use strict autoescaping
    pub strict_autoescaping_required: TriState,
    /// Whether templates may call templates outside their declared deps
    pub allow_external_calls: TriState,
    /// General switch for the tree optimizer
    ///
    /// Checked together with the builder's own `optimize` flag; both must
    /// agree for the optimizer to run.
    pub optimizer_enabled: bool,
}

impl Default for GeneralOptions {
    fn default() -> Self {
        Self {
            experimental_features: Vec::new(),
            compile_time_globals: BTreeMap::new(),
            strict_autoescaping_required: TriState::Unset,
            allow_external_calls: TriState::Unset,
            optimizer_enabled: true,
        }
    }
}

/// A single conformance requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConformanceRequirement {
    pub name: String,
    #[serde(default)]
    pub error_message: String,
    /// Files exempt from this requirement (path prefixes)
    #[serde(default)]
    pub whitelist: Vec<String>,
}

/// Validated conformance configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConformanceConfig {
    pub requirements: Vec<ConformanceRequirement>,
}

impl ConformanceConfig {
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

/// An element that may be logged through the `velog` machinery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggableElement {
    pub name: String,
    pub id: i64,
    #[serde(default)]
    pub proto_type: Option<String>,
}

/// Validated logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub elements: Vec<LoggableElement>,
}

impl LoggingConfig {
    pub fn element(&self, name: &str) -> Option<&LoggableElement> {
        self.elements.iter().find(|e| e.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Where pipeline assembly halts relative to a named pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContinuationRule {
    /// The named pass and everything after it are left out
    StopBeforePass,
    /// The named pass is kept, everything after it is left out
    StopAfterPass,
}

impl ContinuationRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContinuationRule::StopBeforePass => "STOP_BEFORE_PASS",
            ContinuationRule::StopAfterPass => "STOP_AFTER_PASS",
        }
    }
}

impl std::fmt::Display for ContinuationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pass selection flags as a loadable document
///
/// Mirrors the pipeline builder's setters; the defaults are the builder defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassConfig {
    pub disable_all_type_checking: bool,
    pub allow_unknown_globals: bool,
    pub allow_v1_expression: bool,
    pub desugar_html_nodes: bool,
    pub optimize: bool,
    pub autoescaper_enabled: bool,
    pub add_html_attributes_for_debugging: bool,
    pub options: GeneralOptions,
    pub conformance: ConformanceConfig,
    pub logging: LoggingConfig,
    /// Pass name -> rule
    pub continuation_rules: BTreeMap<String, ContinuationRule>,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            disable_all_type_checking: false,
            allow_unknown_globals: false,
            allow_v1_expression: false,
            desugar_html_nodes: true,
            optimize: true,
            autoescaper_enabled: true,
            add_html_attributes_for_debugging: true,
            options: GeneralOptions::default(),
            conformance: ConformanceConfig::default(),
            logging: LoggingConfig::default(),
            continuation_rules: BTreeMap::new(),
        }
    }
}

impl PassConfig {
    /// Parse a config document from JSON
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Execution phase enum for phase-specific log configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Pipeline assembly inside the builder
    Assembly,
    /// Single-file passes
    SingleFile,
    /// Whole-fileset passes
    FileSet,
}

impl Phase {
    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Assembly => "assembly",
            Phase::SingleFile => "single_file",
            Phase::FileSet => "fileset",
        }
    }

    /// Get the log target name for this phase
    pub fn target(&self) -> String {
        format!("stencil::{}", self.as_str())
    }

    pub const ALL: [Phase; 3] = [Phase::Assembly, Phase::SingleFile, Phase::FileSet];
}
