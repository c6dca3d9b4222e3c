use std::collections::HashMap;

use serde::Deserialize;

/// Pricing rule for one provider+API pair.
///
/// Page-priced rules carry `unit = "page"` and `price_usd`; token-priced
/// rules carry USD rates per million input/output tokens. Missing numeric
/// fields read as 0 so a partial entry never fails to load.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PricingRule {
    #[serde(default)]
    pub(crate) unit: Option<String>,
    #[serde(default)]
    pub(crate) price_usd: f64,
    #[serde(default)]
    pub(crate) input_per_1m: f64,
    #[serde(default)]
    pub(crate) output_per_1m: f64,
}

/// provider name -> api/model name -> rule
pub(crate) type PricingTable = HashMap<String, HashMap<String, PricingRule>>;
