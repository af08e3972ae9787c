//! CLI 配置
//!
//! 日志配置：全局级别加上每个阶段的可选覆盖

use stencil_config::Phase;
use tracing::Level;

/// CLI 日志配置
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub global: Level,
    pub assembly: Option<Level>,
    pub single_file: Option<Level>,
    pub fileset: Option<Level>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: Level::WARN,
            assembly: None,
            single_file: None,
            fileset: None,
        }
    }
}

impl LogConfig {
    pub fn with_global(global: Level) -> Self {
        Self {
            global,
            ..Self::default()
        }
    }

    /// Get log level for a specific phase
    pub fn level_for(&self, phase: Phase) -> Level {
        let level = match phase {
            Phase::Assembly => self.assembly,
            Phase::SingleFile => self.single_file,
            Phase::FileSet => self.fileset,
        };
        level.unwrap_or(self.global)
    }

    pub fn set(&mut self, phase: Phase, level: Level) {
        match phase {
            Phase::Assembly => self.assembly = Some(level),
            Phase::SingleFile => self.single_file = Some(level),
            Phase::FileSet => self.fileset = Some(level),
        }
    }
}

/// Parse log level string
pub fn parse_level(s: &str) -> Option<Level> {
    match s.to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

/// Parse a `phase=level` override, e.g. `assembly=trace`
pub fn parse_phase_level(s: &str) -> Option<(Phase, Level)> {
    let (phase, level) = s.split_once('=')?;
    let phase = Phase::ALL.into_iter().find(|p| p.as_str() == phase)?;
    Some((phase, parse_level(level)?))
}
