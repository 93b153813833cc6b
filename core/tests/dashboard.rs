//! Dashboard state tests: command relay, eager recompute, snapshots.

use beefops_core::{
    assumptions::{AssumptionSet, Parameter},
    command::DashboardCommand,
    engine::Dashboard,
    event::DashboardEvent,
    macro_roi,
    snapshot::FOOTER_NOTE,
};

/// A slider move yields AssumptionChanged then MacroRecomputed, and the
/// macro result is already current when apply returns.
#[test]
fn set_assumption_recomputes_synchronously() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut dash = Dashboard::with_defaults();
    let before = dash.macro_result().total_impact;

    let events = dash.set(Parameter::WasteCutPp, 2.0).unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0],
        DashboardEvent::AssumptionChanged {
            parameter: Parameter::WasteCutPp,
            old_value: 1.0,
            new_value: 2.0,
            clamped:   false,
        }
    );
    let after = dash.macro_result().total_impact;
    assert_eq!(events[1], DashboardEvent::MacroRecomputed { total_impact: after });
    assert!(after > before, "more waste cut should raise impact");
    assert_eq!(*dash.macro_result(), macro_roi::compute(dash.assumptions()));
}

/// Out-of-range input is constrained, flagged, and still recomputed.
#[test]
fn clamped_input_is_flagged() {
    let mut dash = Dashboard::with_defaults();
    let events = dash
        .apply(DashboardCommand::SetAssumption { parameter: Parameter::PricePerKg, value: 2_500.0 })
        .unwrap();

    match &events[0] {
        DashboardEvent::AssumptionChanged { new_value, clamped, .. } => {
            assert_eq!(*new_value, 1_000.0);
            assert!(*clamped);
        }
        other => panic!("unexpected first event {other:?}"),
    }
    assert_eq!(dash.assumptions().price_per_kg, 1_000.0);
}

/// A rejected command changes nothing and emits nothing.
#[test]
fn rejected_command_leaves_state_untouched() {
    let mut dash = Dashboard::with_defaults();
    let before = *dash.macro_result();

    assert!(dash.set(Parameter::AnnualKg, f64::NAN).is_err());
    assert_eq!(*dash.assumptions(), AssumptionSet::default());
    assert_eq!(*dash.macro_result(), before);
}

#[test]
fn reset_restores_default_figures() {
    let mut dash = Dashboard::with_defaults();
    let original = *dash.macro_result();
    dash.set(Parameter::SeasonalShare, 0.5).unwrap();
    dash.set(Parameter::VolumeRetention, 0.9).unwrap();
    assert_ne!(*dash.macro_result(), original);

    let events = dash.apply(DashboardCommand::ResetAssumptions).unwrap();
    assert_eq!(events[0], DashboardEvent::AssumptionsReset);
    assert_eq!(*dash.macro_result(), original);
}

/// Campaign and upsell results do not depend on the sliders.
#[test]
fn campaign_and_upsell_ignore_assumption_changes() {
    let mut dash = Dashboard::with_defaults();
    let campaign = dash.campaign().clone();
    let channels = dash.channels().to_vec();

    dash.set(Parameter::PricePerKg, 900.0).unwrap();

    assert_eq!(*dash.campaign(), campaign);
    assert_eq!(dash.channels(), channels.as_slice());
}

/// The KPI cards render the demo figures with the display conventions.
#[test]
fn snapshot_cards_use_display_conventions() {
    let snap = Dashboard::with_defaults().snapshot();

    let macro_values: Vec<&str> = snap.macro_cards.iter().map(|c| c.value.as_str()).collect();
    assert_eq!(
        macro_values,
        vec!["MX$ 2,196,000,000", "MX$ 19,520,000", "MX$ 9,387,900", "MX$ 28,907,900"]
    );
    assert_eq!(snap.macro_cards[1].delta.as_deref(), Some("1.0 pp"));
    assert_eq!(snap.macro_cards[2].delta.as_deref(), Some("1.5%"));

    assert_eq!(snap.campaign_cards[0].value, "12.6%");
    assert_eq!(snap.campaign_cards[1].value, "+1.6 pp");
    assert_eq!(snap.campaign_cards[1].delta.as_deref(), Some("12.6% vs 11.0%"));
    assert!(snap.campaign_cards[1].good);

    assert_eq!(snap.channels.len(), 2);
    assert_eq!(snap.channels[0].card.title, "Monthly upsell: Physical stores (rate 8%)");
    assert_eq!(snap.channels[0].card.value, "MX$ 8,112,640");
    assert_eq!(snap.channels[0].card.delta.as_deref(), Some("Lift vs base: 8.0%"));
    assert_eq!(snap.channels[1].card.title, "Monthly upsell: Web (rate 12%)");
    assert_eq!(snap.channels[1].card.value, "MX$ 4,563,360");

    assert_eq!(snap.footer, FOOTER_NOTE);
}

/// Chart series line up with the rows they were built from.
#[test]
fn snapshot_series_follow_rows() {
    let snap = Dashboard::with_defaults().snapshot();

    let names: Vec<&str> = snap.interaction_series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Email clicks", "WhatsApp chats"]);
    assert_eq!(snap.interaction_series[0].points[0].value, 200.0);
    assert_eq!(snap.interaction_series[1].points[7].value, 260.0);
    assert_eq!(snap.conversion_series.points.len(), 8);
    assert_eq!(snap.conversion_series.points[7].value, 14.4);

    let store_series = &snap.channels[0].series;
    assert_eq!(store_series[0].name, "Base sales");
    assert_eq!(store_series[1].name, "Upsell");
    assert_eq!(store_series[0].points[11].label, "Dec");
}

/// Snapshots and commands serialize with their snake_case tags.
#[test]
fn snapshot_and_commands_serialize() {
    let mut dash = Dashboard::with_defaults();
    let events = dash.set(Parameter::BaseWastePct, 12.0).unwrap();

    let event_json = serde_json::to_value(&events[0]).unwrap();
    assert_eq!(event_json["type"], "assumption_changed");
    assert_eq!(event_json["parameter"], "base_waste_pct");
    assert_eq!(events[0].type_name(), "assumption_changed");

    let cmd: DashboardCommand = serde_json::from_str(
        r#"{"cmd":"set_assumption","parameter":"near_expiry_factor","value":0.7}"#,
    )
    .unwrap();
    assert_eq!(
        cmd,
        DashboardCommand::SetAssumption { parameter: Parameter::NearExpiryFactor, value: 0.7 }
    );

    let snap = serde_json::to_value(dash.snapshot()).unwrap();
    assert_eq!(snap["assumptions"][2]["display"], "12.0%");
    assert_eq!(snap["campaign"]["summary"]["delta_pp"], 1.6);
}
