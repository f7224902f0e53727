//! Coconut variety predictions.

use serde::{Deserialize, Serialize};

const UNKNOWN: &str = "Unknown";

/// Reference information for one variety key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarietyInfo {
    pub class_name: &'static str,
    pub lifespan: &'static str,
    pub definition: &'static str,
}

/// Known variety keys. The last three are recognized but never valid.
pub const VARIETIES: &[(&str, VarietyInfo)] = &[
    (
        "Baybay Tall Coconut",
        VarietyInfo {
            class_name: "Baybay Tall Coconut",
            lifespan: "60-90 years",
            definition:
                "A tall coconut variety commonly grown for its strong trunk and high yield.",
        },
    ),
    (
        "Catigan Dwarf Coconut",
        VarietyInfo {
            class_name: "Catigan Dwarf Coconut",
            lifespan: "60-90 years",
            definition:
                "A dwarf coconut variety known for early fruiting and consistent nut production.",
        },
    ),
    (
        "Laguna Tall Coconut",
        VarietyInfo {
            class_name: "Laguna Tall Coconut",
            lifespan: "60-90 years",
            definition: "A tall coconut variety recognized for its durability and adaptability.",
        },
    ),
    (
        "Tacunan Dwarf Coconut",
        VarietyInfo {
            class_name: "Tacunan Dwarf Coconut",
            lifespan: "60-90 years",
            definition: "A compact dwarf coconut variety valued for its high-quality nuts.",
        },
    ),
    (
        "Unknown Tall",
        VarietyInfo {
            class_name: "Unknown Tall Coconut",
            lifespan: "Unknown",
            definition: "Possibly from a tall coconut group.",
        },
    ),
    (
        "Unknown Dwarf",
        VarietyInfo {
            class_name: "Unknown Dwarf Coconut",
            lifespan: "Unknown",
            definition: "Possibly from a dwarf coconut group.",
        },
    ),
    (
        "NotCoconut",
        VarietyInfo {
            class_name: "Invalid Image",
            lifespan: "None",
            definition: "None",
        },
    ),
];

const NOT_VALID: [&str; 3] = ["Unknown Tall", "Unknown Dwarf", "NotCoconut"];

fn unknown() -> String {
    UNKNOWN.to_string()
}

/// Request body for `POST /api/predict`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    #[serde(default = "unknown", alias = "class_name")]
    pub class_name: String,
    #[serde(default = "unknown")]
    pub location: String,
}

/// Prediction result, also the stored record for valid results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub class_name: String,
    pub lifespan: String,
    pub definition: String,
    pub location: String,
    pub confidence: f64,
    pub is_valid: bool,
}

impl Prediction {
    /// Look the class up in [`VARIETIES`] and score it.
    pub fn evaluate(request: &PredictionRequest) -> Self {
        let key = request.class_name.as_str();
        let known = VARIETIES.iter().find(|(k, _)| *k == key).map(|(_, info)| info);
        let is_valid = known.is_some() && !NOT_VALID.contains(&key);

        let (class_name, lifespan, definition) = match known {
            Some(info) => (
                info.class_name.to_string(),
                info.lifespan.to_string(),
                info.definition.to_string(),
            ),
            None => (
                key.to_string(),
                UNKNOWN.to_string(),
                "No info available".to_string(),
            ),
        };

        Self {
            class_name,
            lifespan,
            definition,
            location: request.location.clone(),
            confidence: if is_valid { 1.0 } else { 0.0 },
            is_valid,
        }
    }
}
