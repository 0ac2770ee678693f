use serde::Deserialize;

/// Untrusted quote payload as posted by callers.
///
/// Every sub-record and every field is optional: absence never fails, the
/// derivation engine substitutes documented defaults instead. Wire keys are
/// the French names of the quoting frontend; fields that historically
/// appeared under two names are modeled as two fields so the fallback chain
/// stays explicit (serde aliases would reject payloads carrying both).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteInput {
    pub client: Option<ClientInfo>,
    #[serde(rename = "produit")]
    pub product: Option<ProductInfo>,
    pub terrain: Option<TerrainInfo>,
    #[serde(rename = "calepinage")]
    pub layout: Option<LayoutPlan>,
    pub questionnaire: Option<Questionnaire>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientInfo {
    #[serde(rename = "prenom")]
    pub first_name: Option<String>,
    #[serde(rename = "nom")]
    pub last_name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "telephone")]
    pub phone: Option<String>,
    #[serde(rename = "tel")]
    pub phone_alt: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductInfo {
    #[serde(rename = "nom")]
    pub name: Option<String>,
    #[serde(rename = "image")]
    pub image_url: Option<String>,
    #[serde(rename = "prix")]
    pub unit_price: Option<Scalar>,
    #[serde(rename = "prix_m2")]
    pub price_per_m2: Option<Scalar>,
    #[serde(rename = "prix_original")]
    pub original_price: Option<Scalar>,
    #[serde(rename = "prix_barre")]
    pub struck_price: Option<Scalar>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TerrainInfo {
    #[serde(rename = "forme")]
    pub shape: Option<String>,
    #[serde(rename = "surface_nette")]
    pub net_area: Option<Scalar>,
    #[serde(rename = "surface")]
    pub area: Option<Scalar>,
    #[serde(rename = "surface_brute")]
    pub gross_area: Option<Scalar>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutPlan {
    #[serde(rename = "les")]
    pub strips: Option<Vec<Strip>>,
    #[serde(rename = "rouleaux")]
    pub rolls: Option<Vec<Strip>>,
    pub orientation: Option<String>,
    #[serde(rename = "chutes_percent")]
    pub waste_percent: Option<Scalar>,
    #[serde(rename = "perte_percent")]
    pub loss_percent: Option<Scalar>,
    #[serde(rename = "nb_jonctions")]
    pub junction_count: Option<Scalar>,
    #[serde(rename = "jonctions")]
    pub junctions: Option<Scalar>,
    #[serde(rename = "svg")]
    pub diagram_markup: Option<String>,
}

/// One roll/panel of material ("lé") in the cutting plan.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Strip {
    #[serde(rename = "largeur")]
    pub width: Option<Scalar>,
    #[serde(rename = "longueur")]
    pub length: Option<Scalar>,
    #[serde(rename = "quantite")]
    pub quantity: Option<Scalar>,
    #[serde(rename = "ref")]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Questionnaire {
    #[serde(rename = "type_sol")]
    pub soil_type: Option<String>,
    #[serde(rename = "sol")]
    pub soil: Option<String>,
    /// Pets flag: bool, or "oui"/"non"-style text.
    #[serde(rename = "has_animaux")]
    pub has_pets: Option<Scalar>,
    /// Free-form pets answer: bool, or "oui"/"non"-style text.
    #[serde(rename = "animaux")]
    pub pets: Option<Scalar>,
}

/// A scalar that may arrive as a JSON number, string, or bool.
///
/// The quoting frontend is not consistent about types ("12,5 m²" territory),
/// so both prices and dimensions come through this. Accessors never fail;
/// an unparseable value surfaces as `None` and the caller applies the
/// configured default.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Scalar {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Text(s) => s.trim().parse().ok(),
            Scalar::Bool(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_deserializes() {
        let quote: QuoteInput = serde_json::from_str("{}").unwrap();
        assert!(quote.client.is_none());
        assert!(quote.layout.is_none());
    }

    #[test]
    fn scalar_accepts_number_or_string() {
        let n: Scalar = serde_json::from_str("12.5").unwrap();
        assert_eq!(n.as_f64(), Some(12.5));

        let s: Scalar = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(s.as_f64(), Some(12.5));

        let junk: Scalar = serde_json::from_str("\"douze\"").unwrap();
        assert_eq!(junk.as_f64(), None);
    }

    #[test]
    fn scalar_text_accessor() {
        let s: Scalar = serde_json::from_str("\"oui\"").unwrap();
        assert_eq!(s.as_text(), Some("oui"));

        let n: Scalar = serde_json::from_str("1").unwrap();
        assert_eq!(n.as_text(), None);
    }

    #[test]
    fn alias_fields_both_accepted() {
        let quote: QuoteInput = serde_json::from_str(
            r#"{"produit": {"prix": 29.9, "prix_m2": "31"}, "client": {"tel": "0601020304"}}"#,
        )
        .unwrap();
        let product = quote.product.unwrap();
        assert_eq!(product.unit_price.unwrap().as_f64(), Some(29.9));
        assert_eq!(product.price_per_m2.unwrap().as_f64(), Some(31.0));
        assert_eq!(quote.client.unwrap().phone_alt.as_deref(), Some("0601020304"));
    }
}
