use jiff::Timestamp;

use crate::{
    error::PlannerError,
    models::{Plan, PlanSummary, Prescription, QuotaSpec, QuotaTemplate, SlotId, TagQuota},
};

fn fixed_time() -> Timestamp {
    Timestamp::from_second(1640995200).unwrap() // 2022-01-01 00:00:00 UTC
}

fn push_day() -> Plan {
    Plan::draft("Push day", fixed_time())
        .with_exercise(
            "Bench Press",
            Some("Chest".to_string()),
            Prescription::new("3", "8", "60kg", "90s"),
        )
        .with_exercise("Dips", Some("Chest".to_string()), Prescription::default())
        .with_exercise("Overhead Press", Some("Shoulders".to_string()), Prescription::default())
        .with_exercise("Stretching", None, Prescription::default())
}

#[test]
fn test_quota_spec_parsing() {
    assert_eq!("Chest=2".parse::<QuotaSpec>().unwrap(), QuotaSpec::new("Chest", 2));
    assert_eq!("Back:3".parse::<QuotaSpec>().unwrap(), QuotaSpec::new("Back", 3));
    assert_eq!(" Legs = 0 ".parse::<QuotaSpec>().unwrap(), QuotaSpec::new("Legs", 0));
    assert_eq!("Legs=-1".parse::<QuotaSpec>().unwrap().count, -1);

    assert!("Chest".parse::<QuotaSpec>().is_err());
    assert!("Chest=two".parse::<QuotaSpec>().is_err());
}

#[test]
fn test_tag_quota_rules() {
    assert!(TagQuota::new("Chest", 1).is_ok());
    assert!(matches!(
        TagQuota::new("  ", 1),
        Err(PlannerError::InvalidInput { ref field, .. }) if field == "tag"
    ));
    assert!(matches!(
        TagQuota::new("Chest", 0),
        Err(PlannerError::InvalidInput { ref field, .. }) if field == "count"
    ));
    assert!(TagQuota::try_from(QuotaSpec::new("Chest", -2)).is_err());
}

#[test]
fn test_tag_quota_serde_goes_through_validation() {
    let quota: TagQuota = serde_json::from_str(r#"{"tag":"Back","count":2}"#).unwrap();
    assert_eq!(quota.tag(), "Back");
    assert_eq!(quota.count(), 2);

    assert_eq!(
        serde_json::to_string(&quota).unwrap(),
        r#"{"tag":"Back","count":2}"#
    );

    assert!(serde_json::from_str::<TagQuota>(r#"{"tag":"Back","count":0}"#).is_err());
    assert!(serde_json::from_str::<TagQuota>(r#"{"tag":"","count":1}"#).is_err());
}

#[test]
fn test_template_validation() {
    let quotas = vec![TagQuota::new("Chest", 2).unwrap()];

    let template = QuotaTemplate::new("t1", "  Upper body  ", quotas.clone(), fixed_time()).unwrap();
    assert_eq!(template.name, "Upper body");
    assert_eq!(template.quota_specs(), vec![QuotaSpec::new("Chest", 2)]);

    assert!(QuotaTemplate::new("t1", "   ", quotas.clone(), fixed_time()).is_err());
    assert!(QuotaTemplate::new("", "Upper", quotas.clone(), fixed_time()).is_err());
    assert!(QuotaTemplate::new("t1", "Upper", Vec::new(), fixed_time()).is_err());

    let fifty = "x".repeat(50);
    assert!(QuotaTemplate::new("t1", &fifty, quotas.clone(), fixed_time()).is_ok());
    let fifty_one = "x".repeat(51);
    assert!(matches!(
        QuotaTemplate::new("t1", &fifty_one, quotas, fixed_time()),
        Err(PlannerError::InvalidInput { ref field, .. }) if field == "name"
    ));
}

#[test]
fn test_slots_are_unique_and_monotonic() {
    let mut plan = push_day();
    let slots: Vec<SlotId> = plan.exercises.iter().map(|e| e.slot).collect();
    assert_eq!(slots, vec![SlotId(1), SlotId(2), SlotId(3), SlotId(4)]);
    assert_eq!(plan.next_slot, 5);

    // A stale counter never hands out a slot already in use
    plan.next_slot = 2;
    assert_eq!(plan.allocate_slot(), SlotId(5));
    assert_eq!(plan.allocate_slot(), SlotId(6));
}

#[test]
fn test_with_pin_leaves_original_untouched() {
    let plan = push_day();

    let pinned = plan.with_pin(1, true).unwrap();
    assert!(pinned.is_pinned(SlotId(2)));
    assert_eq!(pinned.pinned_count(), 1);
    assert_eq!(plan.pinned_count(), 0);

    let unpinned = pinned.with_pin(1, false).unwrap();
    assert!(unpinned.pin_status.is_empty());

    assert!(matches!(
        plan.with_pin(4, true),
        Err(PlannerError::InvalidInput { ref field, .. }) if field == "position"
    ));
}

#[test]
fn test_prune_pins_drops_stale_entries() {
    let mut plan = push_day();
    plan.pin_status.insert(SlotId(1), true);
    plan.pin_status.insert(SlotId(2), false);
    plan.pin_status.insert(SlotId(99), true);

    plan.prune_pins();
    assert_eq!(plan.pin_status.len(), 1);
    assert!(plan.is_pinned(SlotId(1)));
}

#[test]
fn test_plan_exercise_keys() {
    let plan = push_day();
    assert_eq!(plan.tags(), vec!["Chest", "Shoulders"]);
    assert!(plan.exercises[0].has_tag("Chest"));
    assert!(plan.exercises[3].key().is_none());

    let mut blank = plan.exercises[0].clone();
    blank.tag = Some("   ".to_string());
    assert_eq!(blank.tag(), None);
}

#[test]
fn test_plan_serde_defaults() {
    let json = r#"{
        "name": "Imported",
        "created_at": "2022-01-01T00:00:00Z",
        "updated_at": "2022-01-01T00:00:00Z"
    }"#;
    let plan: Plan = serde_json::from_str(json).unwrap();
    assert_eq!(plan.id, 0);
    assert!(!plan.is_generated);
    assert_eq!(plan.next_slot, 1);
    assert!(plan.exercises.is_empty());
}

#[test]
fn test_plan_display() {
    let mut plan = push_day().with_pin(0, true).unwrap();
    plan.id = 12;

    let output = plan.to_string();
    assert!(output.starts_with("# 12. Push day\n"));
    assert!(output.contains("## Exercises"));
    assert!(output.contains("1. **Bench Press** [Chest] - sets 3, reps 8, weight 60kg, rest 90s 📌"));
    assert!(output.contains("2. **Dips** [Chest]\n"));
    assert!(output.contains("4. **Stretching**\n"));

    let draft = Plan::draft("Scratch", fixed_time());
    let output = draft.to_string();
    assert!(output.starts_with("# Scratch (unsaved)"));
    assert!(output.contains("No exercises in this plan."));
}

#[test]
fn test_plan_summary() {
    let mut plan = push_day().with_pin(2, true).unwrap();
    plan.id = 4;

    let summary = PlanSummary::from(&plan);
    assert_eq!(summary.total_exercises, 4);
    assert_eq!(summary.pinned_exercises, 1);
    assert_eq!(summary.tags, vec!["Chest", "Shoulders"]);

    let output = summary.to_string();
    assert!(output.contains("### 4. Push day"));
    assert!(output.contains("- Exercises: 4 (1 pinned)"));
}
