#![allow(dead_code)]

use prm_core::{Architecture, Configuration, Constraints};

pub fn cognitive_architecture() -> Architecture {
    Architecture::default()
        .with_dependency("Synthesis", &["Analysis"])
        .with_dependency("Analysis", &["Perception"])
        .with_constraints(Constraints {
            max_tokens: Some(2000.0),
            min_confidence: Some(0.5),
        })
}

pub fn config_a() -> Configuration {
    Configuration::new("A", &["Input", "Perception", "Analysis", "Output"], 0.8, 2)
}

pub fn config_b() -> Configuration {
    Configuration::new("B", &["Input", "Analysis", "Synthesis", "Output"], 0.7, 1)
}

pub fn config_b_grounded() -> Configuration {
    Configuration::new(
        "B2",
        &["Input", "Perception", "Analysis", "Synthesis", "Output"],
        0.7,
        1,
    )
}
