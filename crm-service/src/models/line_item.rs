//! Line items and the GST configuration shared by invoices and quotations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specification {
    pub name: String,
    pub value: String,
}

/// One line on a financial document. Quantity and rate may be absent on
/// partially filled drafts; calculations treat them as zero. The line total
/// is never stored, always recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hsn_sac: Option<String>,
    #[serde(default)]
    pub quantity: Option<Decimal>,
    #[serde(default)]
    pub rate: Option<Decimal>,
    #[serde(default = "default_gst_percentage")]
    pub gst_percentage: Decimal,
    #[serde(default)]
    pub specifications: Vec<Specification>,
}

pub fn default_gst_percentage() -> Decimal {
    Decimal::from(18)
}

impl LineItem {
    /// quantity x rate, with missing sides treated as zero.
    pub fn line_total(&self) -> Decimal {
        self.quantity.unwrap_or_default() * self.rate.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GstType {
    Intrastate,
    Interstate,
}

impl Default for GstType {
    fn default() -> Self {
        GstType::Intrastate
    }
}

/// GST configuration and the breakdown stored back on the document after
/// every recomputation. Manual fields, when set, take precedence over the
/// auto-calculated amounts.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GstDetails {
    #[serde(default)]
    pub gst_type: GstType,
    #[serde(default)]
    pub sgst: Decimal,
    #[serde(default)]
    pub cgst: Decimal,
    #[serde(default)]
    pub igst: Decimal,
    #[serde(default)]
    pub calculated_total_gst: Decimal,
    #[serde(default)]
    pub manual_gst_amount: Option<Decimal>,
    #[serde(default)]
    pub manual_sgst_percentage: Option<Decimal>,
    #[serde(default)]
    pub manual_cgst_percentage: Option<Decimal>,
}
