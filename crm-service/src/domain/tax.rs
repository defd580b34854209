//! Subtotal, GST breakdown, and total computation.
//!
//! Pure function of the line items and the GST configuration. Services call
//! it on every create and on every update that touches items, the GST type,
//! the discount, or any manual override, so stored totals never go stale.

use crate::models::{GstDetails, GstType, LineItem};
use crm_core::error::AppError;
use rust_decimal::{Decimal, RoundingStrategy};

/// Computed monetary summary. All values rounded to 2 decimal places,
/// half-away-from-zero, applied to the final values only so per-line
/// rounding error cannot compound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Totals {
    pub sub_total: Decimal,
    pub calculated_total_gst: Decimal,
    pub sgst: Decimal,
    pub cgst: Decimal,
    pub igst: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

fn round2(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Compute totals for the given items under `gst`, less `discount_amount`
/// (zero for quotations, which have no discount path).
pub fn compute(
    items: &[LineItem],
    gst: &GstDetails,
    discount_amount: Decimal,
) -> Result<Totals, AppError> {
    for item in items {
        if item.quantity.unwrap_or_default() < Decimal::ZERO {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "line item quantity must not be negative"
            )));
        }
        if item.rate.unwrap_or_default() < Decimal::ZERO {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "line item rate must not be negative"
            )));
        }
    }
    if discount_amount < Decimal::ZERO {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "discount must not be negative"
        )));
    }

    let sub_total: Decimal = items.iter().map(LineItem::line_total).sum();
    let calculated_total_gst: Decimal = items
        .iter()
        .map(|item| item.line_total() * item.gst_percentage / HUNDRED)
        .sum();

    let half = calculated_total_gst / Decimal::TWO;
    let (mut sgst, mut cgst, igst) = match gst.gst_type {
        GstType::Intrastate => (half, half, Decimal::ZERO),
        GstType::Interstate => (Decimal::ZERO, Decimal::ZERO, calculated_total_gst),
    };

    // Override precedence: absolute manual amount beats manual percentages
    // beats the auto-calculated GST. Percentages only apply intrastate; an
    // unset side falls back to its auto-calculated half.
    let tax = if let Some(manual) = gst.manual_gst_amount {
        manual
    } else if gst.gst_type == GstType::Intrastate
        && (gst.manual_sgst_percentage.is_some() || gst.manual_cgst_percentage.is_some())
    {
        sgst = gst
            .manual_sgst_percentage
            .map(|pct| sub_total * pct / HUNDRED)
            .unwrap_or(half);
        cgst = gst
            .manual_cgst_percentage
            .map(|pct| sub_total * pct / HUNDRED)
            .unwrap_or(half);
        sgst + cgst
    } else {
        calculated_total_gst
    };

    let total = sub_total + tax - discount_amount;

    Ok(Totals {
        sub_total: round2(sub_total),
        calculated_total_gst: round2(calculated_total_gst),
        sgst: round2(sgst),
        cgst: round2(cgst),
        igst: round2(igst),
        tax: round2(tax),
        total: round2(total),
    })
}

/// Write a computed summary back onto the document's GST breakdown.
pub fn apply(gst: &mut GstDetails, totals: &Totals) {
    gst.sgst = totals.sgst;
    gst.cgst = totals.cgst;
    gst.igst = totals.igst;
    gst.calculated_total_gst = totals.calculated_total_gst;
}
