//! Weekly campaign aggregator tests.

use beefops_core::campaign::{self, CampaignData, WeeklyInput};

/// Per-week rows carry summed interactions and a 1-decimal rate.
#[test]
fn weekly_rows_match_embedded_counts() {
    let report = campaign::aggregate(&CampaignData::default());

    let interactions: Vec<u64> = report.rows.iter().map(|r| r.interactions).collect();
    assert_eq!(interactions, vec![320, 365, 390, 420, 465, 500, 450, 540]);

    let rates: Vec<f64> = report.rows.iter().map(|r| r.conversion_pct).collect();
    assert_eq!(rates, vec![10.9, 11.0, 11.3, 11.9, 13.3, 13.6, 12.9, 14.4]);

    assert_eq!(report.rows[0].label, "Week 1");
    assert_eq!(report.rows[7].label, "Week 8");
}

/// Campaign conversion is total purchases over total interactions:
/// 435 / 3450 = 12.6%, i.e. +1.6 pp against the previous 11.0%.
#[test]
fn aggregate_conversion_uses_summed_totals() {
    let s = campaign::aggregate(&CampaignData::default()).summary;

    assert_eq!(s.total_interactions, 3_450);
    assert_eq!(s.total_purchases, 435);
    assert_eq!(s.aggregate_conversion_pct, 12.6);
    assert_eq!(s.previous_conversion_pct, 11.0);
    assert_eq!(s.delta_pp, 1.6);
}

/// The mean of weekly rates (12.4%) must NOT be what is reported.
#[test]
fn aggregate_conversion_is_not_mean_of_weekly_rates() {
    let report = campaign::aggregate(&CampaignData::default());
    let mean: f64 =
        report.rows.iter().map(|r| r.conversion_pct).sum::<f64>() / report.rows.len() as f64;
    let mean = (mean * 10.0).round() / 10.0;

    assert_eq!(mean, 12.4);
    assert_ne!(report.summary.aggregate_conversion_pct, mean);
}

/// A week with no interactions converts at 0%, not NaN.
#[test]
fn zero_interaction_week_converts_at_zero() {
    let data = CampaignData {
        weeks: vec![
            WeeklyInput { label: "quiet".into(), whatsapp: 0, email: 0, purchases: 3 },
            WeeklyInput { label: "busy".into(), whatsapp: 50, email: 50, purchases: 10 },
        ],
        previous_conversion_pct: 11.0,
    };
    let report = campaign::aggregate(&data);

    assert_eq!(report.rows[0].conversion_pct, 0.0);
    assert_eq!(report.rows[1].conversion_pct, 10.0);
    assert_eq!(report.summary.aggregate_conversion_pct, 13.0);
}

/// All-zero campaigns report 0% and a negative delta.
#[test]
fn all_zero_campaign_reports_negative_delta() {
    let data = CampaignData {
        weeks: vec![WeeklyInput { label: "w".into(), whatsapp: 0, email: 0, purchases: 0 }],
        previous_conversion_pct: 11.0,
    };
    let s = campaign::aggregate(&data).summary;

    assert_eq!(s.aggregate_conversion_pct, 0.0);
    assert_eq!(s.delta_pp, -11.0);
}

#[test]
fn empty_campaign_fails_validation() {
    let data = CampaignData { weeks: vec![], previous_conversion_pct: 11.0 };
    assert!(data.validate().is_err());
    assert!(CampaignData::default().validate().is_ok());
}

/// Counts whose sums overflow are refused by validation, and
/// aggregating them anyway saturates instead of panicking.
#[test]
fn overflowing_counts_are_refused_and_saturate() {
    let data = CampaignData {
        weeks: vec![
            WeeklyInput { label: "a".into(), whatsapp: u64::MAX, email: 1, purchases: 1 },
            WeeklyInput { label: "b".into(), whatsapp: 10, email: 10, purchases: u64::MAX },
        ],
        previous_conversion_pct: 11.0,
    };
    assert!(data.validate().is_err());

    let report = campaign::aggregate(&data);
    assert_eq!(report.rows[0].interactions, u64::MAX);
    assert_eq!(report.summary.total_interactions, u64::MAX);
    assert_eq!(report.summary.total_purchases, u64::MAX);

    let summed_too_far = CampaignData {
        weeks: vec![
            WeeklyInput { label: "a".into(), whatsapp: u64::MAX / 2, email: 0, purchases: 0 },
            WeeklyInput { label: "b".into(), whatsapp: u64::MAX / 2, email: 2, purchases: 0 },
        ],
        previous_conversion_pct: 11.0,
    };
    assert!(summed_too_far.validate().is_err());
}
