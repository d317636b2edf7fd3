//! Insight ranking and read state
//!
//! All functions return new collections; the input slice is never modified.

use crate::models::{FinancialInsight, InsightType, Priority};

fn newest_first(insights: &[FinancialInsight]) -> Vec<FinancialInsight> {
    let mut sorted = insights.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// The `count` most recent insights, newest first.
///
/// Insights sharing a timestamp keep their input order.
pub fn rank_insights(insights: &[FinancialInsight], count: usize) -> Vec<FinancialInsight> {
    let mut ranked = newest_first(insights);
    ranked.truncate(count);
    ranked
}

pub fn unread_insights(insights: &[FinancialInsight]) -> Vec<FinancialInsight> {
    insights.iter().filter(|i| !i.read).cloned().collect()
}

pub fn has_unread(insights: &[FinancialInsight]) -> bool {
    insights.iter().any(|i| !i.read)
}

/// Copy of `insights` with the insight `id` marked read.
///
/// Unknown ids and already-read insights leave the collection unchanged.
pub fn mark_insight_read(insights: &[FinancialInsight], id: &str) -> Vec<FinancialInsight> {
    insights
        .iter()
        .cloned()
        .map(|mut insight| {
            if insight.id == id {
                insight.mark_read();
            }
            insight
        })
        .collect()
}

pub fn insights_by_type(insights: &[FinancialInsight], insight_type: InsightType) -> Vec<FinancialInsight> {
    insights
        .iter()
        .filter(|i| i.insight_type == insight_type)
        .cloned()
        .collect()
}

pub fn insights_by_priority(insights: &[FinancialInsight], priority: Priority) -> Vec<FinancialInsight> {
    insights
        .iter()
        .filter(|i| i.priority == priority)
        .cloned()
        .collect()
}

/// Highest priority first, then newest first
pub fn prioritized_insights(insights: &[FinancialInsight]) -> Vec<FinancialInsight> {
    let mut sorted = insights.to_vec();
    sorted.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| b.date.cmp(&a.date)));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn insight(id: &str, day: u32, priority: Priority, read: bool) -> FinancialInsight {
        FinancialInsight {
            id: id.to_string(),
            title: format!("Insight {}", id),
            description: String::new(),
            insight_type: InsightType::Tip,
            priority,
            date: Utc.with_ymd_and_hms(2025, 5, day, 10, 0, 0).unwrap(),
            read,
        }
    }

    fn ids(insights: &[FinancialInsight]) -> Vec<&str> {
        insights.iter().map(|i| i.id.as_str()).collect()
    }

    fn sample() -> Vec<FinancialInsight> {
        vec![
            insight("1", 23, Priority::Medium, false),
            insight("2", 22, Priority::High, false),
            insight("3", 21, Priority::Medium, true),
            insight("4", 22, Priority::Low, false),
        ]
    }

    #[test]
    fn test_rank_newest_first_and_stable() {
        let ranked = rank_insights(&sample(), 10);
        assert_eq!(ids(&ranked), vec!["1", "2", "4", "3"]);

        assert_eq!(ids(&rank_insights(&sample(), 2)), vec!["1", "2"]);
        assert!(rank_insights(&sample(), 0).is_empty());
        assert!(rank_insights(&[], 3).is_empty());
    }

    #[test]
    fn test_rank_is_idempotent() {
        let once = rank_insights(&sample(), 4);
        let twice = rank_insights(&once, 4);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_mark_read() {
        let insights = sample();
        let updated = mark_insight_read(&insights, "2");
        assert!(updated[1].read);
        assert!(!insights[1].read);
        assert_eq!(unread_insights(&updated).len(), 2);

        // Idempotent, and unknown ids are ignored
        assert_eq!(mark_insight_read(&updated, "2"), updated);
        assert_eq!(mark_insight_read(&insights, "missing"), insights);
    }

    #[test]
    fn test_filters_and_priority_order() {
        let insights = sample();
        assert!(has_unread(&insights));
        assert_eq!(ids(&insights_by_priority(&insights, Priority::Medium)), vec!["1", "3"]);
        assert_eq!(insights_by_type(&insights, InsightType::Alert).len(), 0);
        assert_eq!(ids(&prioritized_insights(&insights)), vec!["2", "1", "3", "4"]);

        let all_read: Vec<_> = insights
            .iter()
            .map(|i| FinancialInsight { read: true, ..i.clone() })
            .collect();
        assert!(!has_unread(&all_read));
    }
}
