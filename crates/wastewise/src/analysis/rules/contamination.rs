use super::thresholds::{
    CONTAMINATION_ACTION_RATE_PCT, CONTAMINATION_FULL_MIN_CHARGES, CONTAMINATION_FULL_RATE_PCT,
    CONTAMINATION_FULL_REDUCTION, CONTAMINATION_LIGHT_REDUCTION, CONTAMINATION_PROGRAM_SETUP_COST,
};
use crate::analysis::domain::{Financials, Recommendation, RecommendationKind};

/// Contamination charges as a percentage of total spend.
pub fn contamination_rate(contamination_charges: f64, total_spend: f64) -> f64 {
    if total_spend <= 0.0 {
        return 0.0;
    }
    contamination_charges * 100.0 / total_spend
}

pub fn contamination_plan(financials: &Financials, total_spend: f64) -> Option<Recommendation> {
    let charges = financials.contamination_charges;
    let rate = contamination_rate(charges, total_spend);
    if rate <= CONTAMINATION_ACTION_RATE_PCT {
        return None;
    }

    if rate > CONTAMINATION_FULL_RATE_PCT && charges > CONTAMINATION_FULL_MIN_CHARGES {
        let monthly_savings = charges * CONTAMINATION_FULL_REDUCTION;
        let recommendation = Recommendation::new(
            RecommendationKind::Contamination,
            "Contamination Reduction Program",
            format!(
                "Contamination is {rate:.1}% of spend (${charges:.2}/month). Full program: \
                 signage $500, resident education $300, monitoring $50/month; expected 50% \
                 charge reduction."
            ),
            monthly_savings,
        );

        return Some(if monthly_savings > 0.0 {
            recommendation.with_payback(CONTAMINATION_PROGRAM_SETUP_COST / monthly_savings)
        } else {
            recommendation
        });
    }

    Some(Recommendation::new(
        RecommendationKind::Contamination,
        "Contamination Light Intervention",
        format!(
            "Contamination is {rate:.1}% of spend (${charges:.2}/month). Refresh signage and \
             send resident reminders; expected 25% charge reduction."
        ),
        charges * CONTAMINATION_LIGHT_REDUCTION,
    ))
}
