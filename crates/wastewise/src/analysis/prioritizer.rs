use super::domain::Recommendation;
use serde::Serialize;
use std::cmp::Ordering;

/// A recommendation with the rank it was assigned when its run was prioritized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRecommendation {
    priority: u32,
    #[serde(flatten)]
    recommendation: Recommendation,
}

impl RankedRecommendation {
    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn recommendation(&self) -> &Recommendation {
        &self.recommendation
    }

    pub fn into_recommendation(self) -> Recommendation {
        self.recommendation
    }
}

/// Orders by annual savings descending, then payback ascending with no payback last.
/// Ranks are dense starting at 1; equal keys keep their input order.
pub fn prioritize(mut recommendations: Vec<Recommendation>) -> Vec<RankedRecommendation> {
    recommendations.sort_by(compare);

    recommendations
        .into_iter()
        .zip(1u32..)
        .map(|(recommendation, priority)| RankedRecommendation {
            priority,
            recommendation,
        })
        .collect()
}

fn compare(left: &Recommendation, right: &Recommendation) -> Ordering {
    right
        .annual_savings()
        .total_cmp(&left.annual_savings())
        .then_with(|| payback_key(left).total_cmp(&payback_key(right)))
}

fn payback_key(recommendation: &Recommendation) -> f64 {
    recommendation.payback_months().unwrap_or(f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::domain::RecommendationKind;

    fn recommendation(title: &str, annual: f64, payback: Option<f64>) -> Recommendation {
        let rec = Recommendation::new(RecommendationKind::Bulk, title, "", annual / 12.0);
        match payback {
            Some(months) => rec.with_payback(months),
            None => rec,
        }
    }

    fn sample() -> Vec<Recommendation> {
        vec![
            recommendation("first", 1_000.0, None),
            recommendation("second", 5_000.0, Some(3.0)),
            recommendation("third", 5_000.0, Some(1.0)),
        ]
    }

    #[test]
    fn orders_by_savings_then_payback() {
        let ranked = prioritize(sample());

        let titles: Vec<_> = ranked
            .iter()
            .map(|entry| entry.recommendation().title())
            .collect();
        assert_eq!(titles, ["third", "second", "first"]);

        let priorities: Vec<_> = ranked.iter().map(RankedRecommendation::priority).collect();
        assert_eq!(priorities, [1, 2, 3]);
    }

    #[test]
    fn missing_payback_sorts_after_any_payback() {
        let ranked = prioritize(vec![
            recommendation("none", 2_400.0, None),
            recommendation("slow", 2_400.0, Some(48.0)),
        ]);
        assert_eq!(ranked[0].recommendation().title(), "slow");
        assert_eq!(ranked[1].recommendation().title(), "none");
    }

    #[test]
    fn ties_keep_input_order() {
        let ranked = prioritize(vec![
            recommendation("a", 600.0, None),
            recommendation("b", 600.0, None),
        ]);
        assert_eq!(ranked[0].recommendation().title(), "a");
        assert_eq!(ranked[1].recommendation().title(), "b");
    }

    #[test]
    fn reprioritizing_reproduces_the_same_ranking() {
        let first = prioritize(sample());
        let second = prioritize(
            first
                .clone()
                .into_iter()
                .map(RankedRecommendation::into_recommendation)
                .collect(),
        );
        assert_eq!(first, second);
    }

    #[test]
    fn ranked_entries_serialize_flat() {
        let ranked = prioritize(vec![recommendation("only", 1_200.0, None)]);
        let value = serde_json::to_value(&ranked[0]).expect("serializes");
        assert_eq!(value["priority"], 1);
        assert_eq!(value["title"], "only");
        assert_eq!(value["annual_savings"], 1_200.0);
    }
}
