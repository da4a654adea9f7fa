//! Config validation: unknown-key detection with Levenshtein suggestions
//! and cross-table consistency checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

use crate::types::Metric;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " — did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `AppConfig`.
///
/// Maintained by hand to match the struct hierarchy in `app_config.rs`.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [server]
        "server",
        "server.addr",
        // [prediction]
        "prediction",
        "prediction.endpoint",
        "prediction.timeout_secs",
        // [standard_ranges]
        "standard_ranges",
        "standard_ranges.temperature",
        "standard_ranges.temperature.min",
        "standard_ranges.temperature.max",
        "standard_ranges.pressure",
        "standard_ranges.pressure.min",
        "standard_ranges.pressure.max",
        "standard_ranges.residence_time_1",
        "standard_ranges.residence_time_1.min",
        "standard_ranges.residence_time_1.max",
        "standard_ranges.residence_time_2",
        "standard_ranges.residence_time_2.min",
        "standard_ranges.residence_time_2.max",
        // [gauges]
        "gauges",
        "gauges.yield",
        "gauges.yield.max",
        "gauges.yield.medium",
        "gauges.yield.good",
        "gauges.temperature",
        "gauges.temperature.max",
        "gauges.temperature.medium",
        "gauges.temperature.good",
        "gauges.pressure",
        "gauges.pressure.max",
        "gauges.pressure.medium",
        "gauges.pressure.good",
        "gauges.residence_time_1",
        "gauges.residence_time_1.max",
        "gauges.residence_time_1.medium",
        "gauges.residence_time_1.good",
        "gauges.residence_time_2",
        "gauges.residence_time_2.max",
        "gauges.residence_time_2.medium",
        "gauges.residence_time_2.good",
        // [yield_tiers]
        "yield_tiers",
        "yield_tiers.manageable",
        "yield_tiers.high",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for &k in known {
        let dist = levenshtein(unknown, k);
        if dist > 3 {
            continue;
        }
        // Ties break alphabetically so the suggestion is stable across runs.
        let better = match best {
            None => true,
            Some((best_key, best_dist)) => dist < best_dist || (dist == best_dist && k < best_key),
        };
        if better {
            best = Some((k, dist));
        }
    }
    best.map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys — it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new(); // parse errors are handled by serde later
    };

    let known = known_config_keys();
    let mut warnings = Vec::new();

    for key in walk_toml_keys(&value, "") {
        if !known.contains(key.as_str()) {
            let suggestion = suggest_correction(&key, &known);
            warnings.push(ValidationWarning {
                message: format!("Unknown config key '{key}'"),
                field: key,
                suggestion,
            });
        }
    }

    warnings
}

// ============================================================================
// Threshold Consistency
// ============================================================================

/// Cross-table checks on a parsed, valid `AppConfig`.
///
/// - The headline yield tiers and the yield gauge bands are configured
///   separately; when they disagree the operator sees a "manageable" message
///   next to a red gauge (or similar). Flagged, never unified.
/// - A standard range whose upper bound lies beyond its gauge's scale means
///   an in-range input pins the needle.
pub fn check_threshold_consistency(config: &super::AppConfig) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let tiers = &config.yield_tiers;
    let gauge = &config.gauges.yield_percent;
    if (tiers.manageable - gauge.medium).abs() > f64::EPSILON {
        warnings.push(ValidationWarning {
            field: "yield_tiers.manageable".to_string(),
            message: format!(
                "yield_tiers.manageable = {} differs from gauges.yield.medium = {}; \
                 the headline message and the yield gauge will disagree",
                tiers.manageable, gauge.medium
            ),
            suggestion: None,
        });
    }
    if (tiers.high - gauge.good).abs() > f64::EPSILON {
        warnings.push(ValidationWarning {
            field: "yield_tiers.high".to_string(),
            message: format!(
                "yield_tiers.high = {} differs from gauges.yield.good = {}; \
                 the headline message and the yield gauge will disagree",
                tiers.high, gauge.good
            ),
            suggestion: None,
        });
    }

    for metric in Metric::INPUTS {
        let Some(range) = config.standard_ranges.get(metric) else {
            continue;
        };
        let g = config.gauges.get(metric);
        if range.max > g.max {
            warnings.push(ValidationWarning {
                field: format!("gauges.{}.max", metric.config_key()),
                message: format!(
                    "gauges.{key}.max = {} is below standard_ranges.{key}.max = {}; \
                     in-range values will exceed the gauge scale",
                    g.max,
                    range.max,
                    key = metric.config_key()
                ),
                suggestion: None,
            });
        }
    }

    warnings
}

// ============================================================================
// Tests
// ============================================================================
