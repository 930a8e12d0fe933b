#![allow(dead_code)]

use prm_core::{Path, PathMetrics};

pub fn path(id: &str, probability: f64, cost: f64, length: f64, entropy: f64) -> Path {
    Path::from_metrics(
        id,
        PathMetrics {
            path_probability: probability,
            total_cost: cost,
            path_length: length,
            entropy,
        },
    )
}

pub fn candidates() -> Vec<Path> {
    vec![
        path("balanced", 0.72, 180.0, 4.0, 0.35),
        path("direct", 0.91, 120.0, 2.0, 0.10),
        path("detour", 0.40, 420.0, 7.0, 0.90),
        path("cheap", 0.55, 90.0, 5.0, 0.60),
    ]
}
