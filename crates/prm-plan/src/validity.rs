use prm_core::{Architecture, Configuration, INPUT_LAYER, OUTPUT_LAYER};

/// Reason a configuration fails validity, reported in planner logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The sequence lacks the `Input` token.
    MissingInput,
    /// The sequence lacks the `Output` token.
    MissingOutput,
    /// `layer` appears without `requires` earlier in the sequence.
    UnmetDependency {
        /// Dependent layer.
        layer: String,
        /// Dependency that did not precede it.
        requires: String,
    },
    /// Token cost exceeds `maxTokens`.
    TokenBudget,
    /// Confidence threshold is below `minConfidence`.
    ConfidenceFloor,
}

/// Returns the first violation of `config` against `architecture`, if any.
///
/// The layer at the first position is never dependency-checked.
pub fn first_violation(config: &Configuration, architecture: &Architecture) -> Option<Violation> {
    let layers = &config.layer_sequence;
    if !layers.iter().any(|layer| layer == INPUT_LAYER) {
        return Some(Violation::MissingInput);
    }
    if !layers.iter().any(|layer| layer == OUTPUT_LAYER) {
        return Some(Violation::MissingOutput);
    }

    for (idx, layer) in layers.iter().enumerate().skip(1) {
        let preceding = &layers[..idx];
        for dep in architecture.dependencies_of(layer) {
            if !preceding.contains(dep) {
                return Some(Violation::UnmetDependency {
                    layer: layer.clone(),
                    requires: dep.clone(),
                });
            }
        }
    }

    if let Some(constraints) = &architecture.constraints {
        if let Some(max_tokens) = constraints.max_tokens {
            if config.token_cost > max_tokens {
                return Some(Violation::TokenBudget);
            }
        }
        if let Some(min_confidence) = constraints.min_confidence {
            if config.confidence_threshold < min_confidence {
                return Some(Violation::ConfidenceFloor);
            }
        }
    }
    None
}

/// Whether `config` satisfies every rule of `architecture`.
pub fn is_valid(config: &Configuration, architecture: &Architecture) -> bool {
    first_violation(config, architecture).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use prm_core::Constraints;

    fn architecture() -> Architecture {
        Architecture::default()
            .with_dependency("Synthesis", &["Analysis"])
            .with_dependency("Analysis", &["Perception"])
            .with_constraints(Constraints {
                max_tokens: Some(2000.0),
                min_confidence: Some(0.5),
            })
    }

    #[test]
    fn ordered_dependencies_pass() {
        let config = Configuration::new("a", &["Input", "Perception", "Analysis", "Output"], 0.8, 2);
        assert!(is_valid(&config, &architecture()));
    }

    #[test]
    fn missing_predecessor_is_reported() {
        let config = Configuration::new("b", &["Input", "Analysis", "Synthesis", "Output"], 0.7, 1);
        assert_eq!(
            first_violation(&config, &architecture()),
            Some(Violation::UnmetDependency {
                layer: "Analysis".into(),
                requires: "Perception".into(),
            })
        );
    }

    #[test]
    fn dependency_after_dependent_fails() {
        let config = Configuration::new(
            "c",
            &["Input", "Analysis", "Perception", "Output"],
            0.7,
            1,
        );
        assert!(!is_valid(&config, &architecture()));
    }

    #[test]
    fn first_position_is_not_dependency_checked() {
        let config = Configuration::new("d", &["Analysis", "Input", "Output"], 0.7, 1);
        assert!(is_valid(&config, &architecture()));
    }

    #[test]
    fn constraints_apply_only_when_present() {
        let config = Configuration::new("e", &["Input", "Output"], 0.1, 1).with_token_cost(5000.0);
        assert_eq!(
            first_violation(&config, &architecture()),
            Some(Violation::TokenBudget)
        );
        assert!(is_valid(&config, &Architecture::default()));

        let partial = Architecture::default().with_constraints(Constraints {
            max_tokens: None,
            min_confidence: Some(0.5),
        });
        assert_eq!(
            first_violation(&config, &partial),
            Some(Violation::ConfidenceFloor)
        );
    }

    #[test]
    fn missing_io_tokens_fail() {
        let arch = Architecture::default();
        let no_output = Configuration::new("f", &["Input", "Perception"], 0.9, 1);
        assert_eq!(first_violation(&no_output, &arch), Some(Violation::MissingOutput));
        let no_input = Configuration::new("g", &["Perception", "Output"], 0.9, 1);
        assert_eq!(first_violation(&no_input, &arch), Some(Violation::MissingInput));
    }
}
