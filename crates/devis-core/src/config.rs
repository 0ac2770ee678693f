use serde::{Deserialize, Serialize};

/// Fallback values and keyword sets used by the derivation engine.
///
/// Everything that used to be a magic literal lives here, so defaults are
/// testable and overridable in one place. The engine takes this by
/// reference and never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivationConfig {
    /// Strip width in meters when absent or unparseable.
    pub strip_default_width: f64,

    /// Strip length in meters when absent or unparseable.
    pub strip_default_length: f64,

    /// Strip quantity when absent or unparseable.
    pub strip_default_quantity: u32,

    pub default_product_name: String,
    pub default_shape: String,
    pub default_soil_type: String,
    pub default_orientation: String,

    /// Lowercase keywords matched as substrings of the soil type.
    /// Carries both French and English variants.
    pub soft_ground_keywords: Vec<String>,

    /// Geotextile is ordered with this waste margin over the gross area.
    pub geotextile_waste_factor: f64,

    /// Area covered by one geotextile roll, in m².
    pub geotextile_roll_area_m2: f64,

    /// Linear meters of joint tape per junction.
    pub joint_tape_ml_per_junction: u32,

    /// Area one bottle of cleaner covers, in m².
    pub cleaner_coverage_m2: f64,

    /// Minimum price difference for a discount to count as real.
    pub discount_epsilon: f64,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            strip_default_width: 4.0,
            strip_default_length: 10.0,
            strip_default_quantity: 1,
            default_product_name: "Gazon synthétique".to_string(),
            default_shape: "Rectangle".to_string(),
            default_soil_type: "terre".to_string(),
            default_orientation: "horizontal".to_string(),
            soft_ground_keywords: [
                "terre", "sable", "meuble", "gazon", "pelouse", "earth", "dirt", "sand",
                "loose", "lawn", "turf",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            geotextile_waste_factor: 1.15,
            geotextile_roll_area_m2: 25.0,
            joint_tape_ml_per_junction: 8,
            cleaner_coverage_m2: 50.0,
            discount_epsilon: 0.01,
        }
    }
}
