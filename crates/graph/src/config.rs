use serde::{Deserialize, Serialize};

/// Limits a caller may impose on a solve
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Wall-clock budget in milliseconds, checked once per recursion level
    #[serde(default)]
    pub deadline_ms: Option<u64>,

    /// Maximum number of cycle contractions
    #[serde(default)]
    pub max_contractions: Option<usize>,
}

impl SolverConfig {
    /// No deadline and no contraction limit
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Stop with an error once `ms` milliseconds have elapsed
    pub fn with_deadline(ms: u64) -> Self {
        Self {
            deadline_ms: Some(ms),
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.deadline_ms == Some(0) {
            return Err("deadline_ms must be > 0".to_string());
        }

        if self.max_contractions == Some(0) {
            return Err("max_contractions must be > 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = SolverConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config, SolverConfig::unbounded());
    }

    #[test]
    fn test_config_validation() {
        assert!(SolverConfig::with_deadline(0).validate().is_err());
        assert!(SolverConfig::with_deadline(250).validate().is_ok());

        let config = SolverConfig {
            max_contractions: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_deserializes_with_missing_fields() {
        let config: SolverConfig = serde_json::from_str(r#"{"deadline_ms": 40}"#).unwrap();
        assert_eq!(config.deadline_ms, Some(40));
        assert_eq!(config.max_contractions, None);
    }
}
