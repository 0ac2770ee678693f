//! Quote normalizer & derivation engine.
//!
//! `derive` is a total function: any quote shape, including an empty one,
//! yields a complete field map and flag set. Missing or unparseable values
//! fall back to `DerivationConfig` defaults; nothing here returns an error.

use jiff::Zoned;

use crate::config::DerivationConfig;
use crate::format::format_number;
use crate::models::quote::{QuoteInput, Scalar, Strip};

/// Ordered map of template placeholder keys to formatted display values.
///
/// The key set is closed and stable across versions: consumers match on
/// exact names, so new fields may be added but existing keys never removed.
#[derive(Debug, Clone)]
pub struct DerivedFields(Vec<(&'static str, String)>);

impl DerivedFields {
    pub fn new(pairs: Vec<(&'static str, String)>) -> Self {
        Self(pairs)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Named booleans controlling conditional sections of the document.
///
/// Complementary pairs (SOL_MEUBLE/SOL_DUR, PRODUIT_IMAGE/NO_PRODUIT_IMAGE)
/// are both emitted: the assembler has no "else" construct.
#[derive(Debug, Clone)]
pub struct SectionFlags(Vec<(&'static str, bool)>);

impl SectionFlags {
    pub fn new(pairs: Vec<(&'static str, bool)>) -> Self {
        Self(pairs)
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> {
        self.0.iter().copied()
    }
}

fn scalar_f64(value: &Option<Scalar>) -> Option<f64> {
    value.as_ref().and_then(Scalar::as_f64)
}

/// A loose yes/no answer counts as yes when it is `true` or "oui"/"yes" text.
fn is_affirmative(value: &Option<Scalar>) -> bool {
    match value.as_ref() {
        Some(Scalar::Bool(b)) => *b,
        Some(other) => other
            .as_text()
            .is_some_and(|s| s.eq_ignore_ascii_case("oui") || s.eq_ignore_ascii_case("yes")),
        None => false,
    }
}

struct StripDims {
    width: f64,
    length: f64,
    quantity: u32,
    reference: String,
    area: f64,
}

fn strip_dims(strip: &Strip, position: usize, config: &DerivationConfig) -> StripDims {
    // A non-numeric dimension falls back per-field; the strip is never dropped.
    let width = scalar_f64(&strip.width).unwrap_or(config.strip_default_width);
    let length = scalar_f64(&strip.length).unwrap_or(config.strip_default_length);
    let quantity = scalar_f64(&strip.quantity)
        .map(|q| q.max(0.0) as u32)
        .unwrap_or(config.strip_default_quantity);
    let reference = strip
        .reference
        .clone()
        .unwrap_or_else(|| format!("L{}", position + 1));
    let area = width * length * f64::from(quantity);
    StripDims {
        width,
        length,
        quantity,
        reference,
        area,
    }
}

/// Derive display fields and section flags from a raw quote.
pub fn derive(quote: &QuoteInput, config: &DerivationConfig) -> (DerivedFields, SectionFlags) {
    let client = quote.client.clone().unwrap_or_default();
    let product = quote.product.clone().unwrap_or_default();
    let terrain = quote.terrain.clone().unwrap_or_default();
    let layout = quote.layout.clone().unwrap_or_default();
    let questionnaire = quote.questionnaire.clone().unwrap_or_default();

    // Client
    let first_name = client.first_name.unwrap_or_default();
    let last_name = client.last_name.unwrap_or_default();
    let full_name = {
        let joined = format!("{first_name} {last_name}");
        let trimmed = joined.trim();
        if trimmed.is_empty() {
            "Client".to_string()
        } else {
            trimmed.to_string()
        }
    };
    let email = client.email.unwrap_or_default();
    let phone = client.phone.or(client.phone_alt).unwrap_or_default();

    // Product
    let product_name = product
        .name
        .unwrap_or_else(|| config.default_product_name.clone());
    let product_image = product.image_url.unwrap_or_default();
    let unit_price = scalar_f64(&product.unit_price)
        .or_else(|| scalar_f64(&product.price_per_m2))
        .unwrap_or(0.0);
    let original_price = scalar_f64(&product.original_price)
        .or_else(|| scalar_f64(&product.struck_price))
        .unwrap_or(0.0);

    // Terrain
    let shape = terrain.shape.unwrap_or_else(|| config.default_shape.clone());
    let net_area = scalar_f64(&terrain.net_area)
        .or_else(|| scalar_f64(&terrain.area))
        .unwrap_or(0.0);
    let gross_area = scalar_f64(&terrain.gross_area).unwrap_or(net_area);

    // Layout
    let strips = layout.strips.or(layout.rolls).unwrap_or_default();
    let orientation = layout
        .orientation
        .unwrap_or_else(|| config.default_orientation.clone());
    let waste_percent = scalar_f64(&layout.waste_percent)
        .or_else(|| scalar_f64(&layout.loss_percent))
        .unwrap_or(0.0);
    // An explicit value wins even when it is 0; only absence falls back to
    // strip_count - 1.
    let junction_count = scalar_f64(&layout.junction_count)
        .or_else(|| scalar_f64(&layout.junctions))
        .map(|n| n.max(0.0) as u32)
        .unwrap_or(strips.len().saturating_sub(1) as u32);
    let diagram = layout.diagram_markup.unwrap_or_default();

    // Questionnaire
    let soil_type = questionnaire
        .soil_type
        .or(questionnaire.soil)
        .unwrap_or_else(|| config.default_soil_type.clone());
    let has_pets =
        is_affirmative(&questionnaire.has_pets) || is_affirmative(&questionnaire.pets);
    let soil_lower = soil_type.to_lowercase();
    let is_soft_ground = config
        .soft_ground_keywords
        .iter()
        .any(|kw| soil_lower.contains(kw.as_str()));

    // Pricing
    let has_discount = original_price > unit_price
        && (original_price - unit_price) > config.discount_epsilon;
    let discount_percent = if has_discount {
        ((original_price - unit_price) / original_price * 100.0).round() as i64
    } else {
        0
    };
    let total_price = gross_area * unit_price;

    // Cutting plan: table rows, lay order, and the ordered area.
    let mut strip_area_sum = 0.0;
    let mut rows = String::new();
    let mut lay_order = String::new();
    for (i, strip) in strips.iter().enumerate() {
        let dims = strip_dims(strip, i, config);
        strip_area_sum += dims.area;

        rows.push_str(&format!(
            "<tr><td><span class=\"le-badge\">{}</span></td>\
             <td>{}x {:.0}m × {:.2}m</td>\
             <td style=\"text-align:right;\">{:.0} m²</td></tr>",
            dims.reference, dims.quantity, dims.width, dims.length, dims.area
        ));

        if i > 0 {
            lay_order.push_str("<span class=\"ordre-arrow\">›</span>");
        }
        lay_order.push_str(&format!(
            "<span class=\"ordre-item\"><span class=\"le-badge\">{}</span> {} \
             <span class=\"dim\">{:.0}m × {:.1}m</span></span> ",
            i + 1,
            dims.reference,
            dims.width,
            dims.length
        ));
    }
    // TOTAL_M2 stays at the raw sum; only the ordered area falls back.
    let area_to_order = if strip_area_sum == 0.0 {
        gross_area
    } else {
        strip_area_sum
    };

    // Accessory quantities
    let geo_m2 = (gross_area * config.geotextile_waste_factor).ceil();
    let geo_rolls = (geo_m2 / config.geotextile_roll_area_m2).ceil();
    let geo_qty = format!("{geo_m2:.0} m² ({geo_rolls:.0} rouleaux)");
    // Widened so an absurd junction count cannot overflow the multiply.
    let tape_ml = u64::from(junction_count) * u64::from(config.joint_tape_ml_per_junction);
    let tape_qty = format!("{tape_ml} ml ({junction_count} unités)");
    let cleaner_bottles = (gross_area / config.cleaner_coverage_m2).ceil().max(1.0);
    let cleaner_qty = format!("{cleaner_bottles:.0} bouteille(s)");
    let nails_qty = "1 boîte(s)".to_string();

    // Display labels
    let soil_label = if is_soft_ground {
        "Sol meuble (terre, sable)"
    } else {
        "Sol dur (béton, dalle)"
    };
    let orient_h = if orientation == "horizontal" {
        "orient-active"
    } else {
        "orient-inactive"
    };
    let orient_v = if orientation == "vertical" {
        "orient-active"
    } else {
        "orient-inactive"
    };

    let today = Zoned::now();
    let date = format!("{:02}/{:02}/{}", today.day(), today.month(), today.year());
    let year = today.year().to_string();

    let flags = SectionFlags::new(vec![
        ("EMAIL", !email.is_empty()),
        ("TELEPHONE", !phone.is_empty()),
        ("ANIMAUX", has_pets),
        ("SOL_MEUBLE", is_soft_ground),
        ("SOL_DUR", !is_soft_ground),
        ("HAS_REMISE", has_discount),
        ("PRODUIT_IMAGE", !product_image.is_empty()),
        ("NO_PRODUIT_IMAGE", product_image.is_empty()),
        ("JONCTIONS", junction_count > 0),
        ("SVG", !diagram.is_empty()),
    ]);

    let fields = DerivedFields::new(vec![
        ("NOM_COMPLET", full_name),
        ("PRENOM", first_name),
        ("NOM", last_name),
        ("EMAIL", email),
        ("TELEPHONE", phone),
        ("PRODUIT_NOM", product_name),
        ("PRODUIT_IMAGE", product_image),
        ("PRIX", format_number(unit_price, 2)),
        ("PRIX_ORIGINAL", format_number(original_price, 2)),
        ("REMISE_PCT", discount_percent.to_string()),
        ("FORME", shape),
        ("SURFACE", format_number(gross_area, 2)),
        ("SURFACE_NETTE", format_number(net_area, 2)),
        ("SURFACE_COMMANDER", format_number(area_to_order, 2)),
        ("TOTAL", format_number(total_price, 2)),
        ("TYPE_SOL", soil_type),
        ("SOL_LABEL", soil_label.to_string()),
        (
            "ANIMAUX_OUI_NON",
            if has_pets { "oui" } else { "non" }.to_string(),
        ),
        ("NB_JONCTIONS", junction_count.to_string()),
        ("CHUTES_PCT", format_number(waste_percent, 1)),
        ("ORIENT_H_CLASS", orient_h.to_string()),
        ("ORIENT_V_CLASS", orient_v.to_string()),
        ("SVG_CALEPINAGE", diagram),
        ("ROULEAUX_ROWS", rows),
        ("ORDRE_POSE", lay_order),
        ("TOTAL_M2", format_number(strip_area_sum, 2)),
        ("GEO_QTY", geo_qty),
        ("JONC_QTY", tape_qty),
        ("CLOUS_QTY", nails_qty),
        ("NETTOYANT_QTY", cleaner_qty),
        ("DATE", date),
        ("ANNEE", year),
    ]);

    (fields, flags)
}
