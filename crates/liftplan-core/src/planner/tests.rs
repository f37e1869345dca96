//! Tests for the planner module.

use rand::{rngs::StdRng, SeedableRng};
use tempfile::TempDir;

use super::*;
use crate::{
    generator::{RerollHistory, RerollOutcome},
    models::QuotaSpec,
    params::{
        DeletePlan, GenerateWorkout, Id, ImportPlans, NewExercise, NewPlan, PinSlot, RerollSlot,
        SaveTemplate, TemplateId,
    },
};

/// Helper function to create a test planner
async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

fn exercise(name: &str, tag: &str) -> NewExercise {
    NewExercise {
        name: name.to_string(),
        tag: Some(tag.to_string()),
        prescription: Default::default(),
    }
}

async fn seed(planner: &Planner) {
    planner
        .import_plans(ImportPlans::Many(vec![
            NewPlan {
                name: "Push".to_string(),
                exercises: vec![
                    exercise("Bench Press", "Chest"),
                    exercise("Dips", "Chest"),
                    exercise("Fly", "Chest"),
                ],
            },
            NewPlan {
                name: "Pull".to_string(),
                exercises: vec![exercise("Row", "Back"), exercise("Pull-up", "Back")],
            },
        ]))
        .await
        .expect("Failed to import plans");
}

#[tokio::test]
async fn test_import_and_list() {
    let (_temp_dir, planner) = create_test_planner().await;
    seed(&planner).await;

    let summaries = planner.list_plans().await.expect("Failed to list plans");
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries.0[0].name, "Push");
    assert_eq!(summaries.0[0].total_exercises, 3);
    assert_eq!(summaries.0[1].tags, vec!["Back"]);
}

#[tokio::test]
async fn test_import_rejects_blank_names() {
    let (_temp_dir, planner) = create_test_planner().await;

    let result = planner
        .import_plans(ImportPlans::One(NewPlan {
            name: "  ".to_string(),
            exercises: vec![],
        }))
        .await;
    assert!(matches!(result, Err(PlannerError::InvalidInput { .. })));
    assert!(planner.list_plans().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_is_not_stored_until_saved() {
    let (_temp_dir, planner) = create_test_planner().await;
    seed(&planner).await;
    let mut rng = StdRng::seed_from_u64(7);

    let generation = planner
        .generate_workout(
            &GenerateWorkout {
                quotas: vec![QuotaSpec::new("Chest", 2), QuotaSpec::new("Back", 1)],
                ..Default::default()
            },
            &mut rng,
        )
        .await
        .unwrap();

    assert!(generation.report.valid);
    let workout = generation.workout.expect("workout should be drawn");
    assert_eq!(workout.plan.exercises.len(), 3);
    assert_eq!(workout.plan.id, 0);
    assert_eq!(planner.list_plans().await.unwrap().len(), 2);

    let saved = planner.save_generated(&workout.plan).await.unwrap();
    assert_ne!(saved.id, 0);
    let loaded = planner.get_plan(&Id { id: saved.id }).await.unwrap().unwrap();
    assert!(loaded.is_generated);
    assert_eq!(loaded.quotas, workout.plan.quotas);
}

#[tokio::test]
async fn test_strict_generation_skips_draw() {
    let (_temp_dir, planner) = create_test_planner().await;
    seed(&planner).await;
    let mut rng = StdRng::seed_from_u64(7);

    let params = GenerateWorkout {
        quotas: vec![QuotaSpec::new("Chest", 1), QuotaSpec::new("Legs", 1)],
        template: None,
        strict: true,
    };
    let generation = planner.generate_workout(&params, &mut rng).await.unwrap();
    assert!(!generation.report.valid);
    assert!(generation.workout.is_none());

    let lenient = GenerateWorkout {
        strict: false,
        ..params
    };
    let generation = planner.generate_workout(&lenient, &mut rng).await.unwrap();
    let workout = generation.workout.unwrap();
    assert_eq!(workout.plan.exercises.len(), 1);
    assert!(workout.plan.exercises[0].has_tag("Chest"));
}

#[tokio::test]
async fn test_pin_and_regenerate_round_trip() {
    let (_temp_dir, planner) = create_test_planner().await;
    seed(&planner).await;
    let mut rng = StdRng::seed_from_u64(11);

    let generation = planner
        .generate_workout(
            &GenerateWorkout {
                quotas: vec![QuotaSpec::new("Chest", 2)],
                ..Default::default()
            },
            &mut rng,
        )
        .await
        .unwrap();
    let saved = planner.save_generated(&generation.workout.unwrap().plan).await.unwrap();

    let pinned = planner
        .set_pin(&PinSlot {
            plan_id: saved.id,
            position: 0,
            pinned: true,
        })
        .await
        .unwrap();
    let kept = pinned.exercises[0].clone();
    assert!(pinned.is_pinned(kept.slot));

    for _ in 0..5 {
        let workout = planner.regenerate_plan(&Id { id: saved.id }, &mut rng).await.unwrap();
        assert_eq!(workout.plan.exercises[0], kept);
        assert_eq!(workout.plan.exercises.len(), 2);
        assert_ne!(workout.plan.exercises[1].name, kept.name);
    }
}

#[tokio::test]
async fn test_regenerate_requires_quotas() {
    let (_temp_dir, planner) = create_test_planner().await;
    seed(&planner).await;
    let mut rng = StdRng::seed_from_u64(3);

    let result = planner.regenerate_plan(&Id { id: 1 }, &mut rng).await;
    assert!(matches!(result, Err(PlannerError::InvalidInput { .. })));

    let result = planner.regenerate_plan(&Id { id: 99 }, &mut rng).await;
    assert!(matches!(result, Err(PlannerError::PlanNotFound { id: 99 })));
}

#[tokio::test]
async fn test_reroll_stores_replacement() {
    let (_temp_dir, planner) = create_test_planner().await;
    seed(&planner).await;
    let mut rng = StdRng::seed_from_u64(5);

    let generation = planner
        .generate_workout(
            &GenerateWorkout {
                quotas: vec![QuotaSpec::new("Back", 1)],
                ..Default::default()
            },
            &mut rng,
        )
        .await
        .unwrap();
    let saved = planner.save_generated(&generation.workout.unwrap().plan).await.unwrap();
    let drawn = saved.exercises[0].name.clone();

    let outcome = planner
        .reroll_slot(
            &RerollSlot {
                plan_id: saved.id,
                position: 0,
            },
            &RerollHistory::default(),
            &mut rng,
        )
        .await
        .unwrap();

    let RerollOutcome::Replaced { plan, previous, chosen, history } = outcome else {
        panic!("expected a replacement");
    };
    assert_eq!(previous.name, drawn);
    assert_ne!(chosen.name, drawn);
    assert!(["Row", "Pull-up"].contains(&chosen.name.as_str()));
    assert!(history.contains(0, &previous));

    let stored = planner.get_plan(&Id { id: saved.id }).await.unwrap().unwrap();
    assert_eq!(stored.exercises, plan.exercises);
}

#[tokio::test]
async fn test_reroll_rejects_imported_plan() {
    let (_temp_dir, planner) = create_test_planner().await;
    seed(&planner).await;
    let mut rng = StdRng::seed_from_u64(5);
    let before = planner.get_plan(&Id { id: 2 }).await.unwrap().unwrap();

    let result = planner
        .reroll_slot(
            &RerollSlot {
                plan_id: 2,
                position: 0,
            },
            &RerollHistory::default(),
            &mut rng,
        )
        .await;
    assert!(matches!(result, Err(PlannerError::InvalidInput { .. })));

    let after = planner.get_plan(&Id { id: 2 }).await.unwrap().unwrap();
    assert_eq!(after.exercises, before.exercises);

    let pool = planner.exercise_pool().await.unwrap();
    assert_eq!(pool.available("Back"), 2);
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let (_temp_dir, planner) = create_test_planner().await;
    seed(&planner).await;

    let result = planner
        .delete_plan_with_confirmation(&DeletePlan {
            id: 1,
            confirmed: false,
        })
        .await;
    assert!(matches!(result, Err(PlannerError::InvalidInput { .. })));

    let deleted = planner
        .delete_plan_with_confirmation(&DeletePlan {
            id: 1,
            confirmed: true,
        })
        .await
        .unwrap();
    assert_eq!(deleted.map(|plan| plan.name), Some("Push".to_string()));

    let missing = planner
        .delete_plan_with_confirmation(&DeletePlan {
            id: 1,
            confirmed: true,
        })
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_template_lifecycle() {
    let (_temp_dir, planner) = create_test_planner().await;
    seed(&planner).await;

    let write = planner
        .save_template(&SaveTemplate {
            name: "Upper".to_string(),
            quotas: vec![QuotaSpec::new("Chest", 2), QuotaSpec::new("Back", 5)],
        })
        .await
        .unwrap();
    assert!(write.storage.success);

    let id = TemplateId {
        id: write.template.id.clone(),
    };
    assert_eq!(
        planner.template_quotas(&id).await.unwrap(),
        vec![QuotaSpec::new("Chest", 2), QuotaSpec::new("Back", 5)]
    );

    let (_, report) = planner.check_template(&id).await.unwrap();
    assert!(!report.valid);
    assert_eq!(report.feasible.len(), 1);

    let removed = planner.delete_template(&id).await.unwrap();
    assert_eq!(removed.template.name, "Upper");
    assert!(planner.list_templates().await.unwrap().is_empty());
    assert!(matches!(
        planner.template_quotas(&id).await,
        Err(PlannerError::TemplateNotFound { .. })
    ));
}

#[tokio::test]
async fn test_invalid_template_is_not_saved() {
    let (_temp_dir, planner) = create_test_planner().await;

    let too_long = planner
        .save_template(&SaveTemplate {
            name: "x".repeat(51),
            quotas: vec![QuotaSpec::new("Chest", 1)],
        })
        .await;
    assert!(matches!(too_long, Err(PlannerError::InvalidInput { .. })));

    let zero = planner
        .save_template(&SaveTemplate {
            name: "Zero".to_string(),
            quotas: vec![QuotaSpec::new("Chest", 0)],
        })
        .await;
    assert!(matches!(zero, Err(PlannerError::InvalidInput { .. })));

    assert!(planner.list_templates().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_from_template() {
    let (_temp_dir, planner) = create_test_planner().await;
    seed(&planner).await;
    let mut rng = StdRng::seed_from_u64(1);

    let write = planner
        .save_template(&SaveTemplate {
            name: "Back day".to_string(),
            quotas: vec![QuotaSpec::new("Back", 2)],
        })
        .await
        .unwrap();

    let generation = planner
        .generate_workout(
            &GenerateWorkout {
                template: Some(write.template.id),
                ..Default::default()
            },
            &mut rng,
        )
        .await
        .unwrap();
    let workout = generation.workout.unwrap();
    assert!(workout.plan.exercises.iter().all(|e| e.has_tag("Back")));
    assert_eq!(workout.plan.exercises.len(), 2);

    let missing = planner
        .generate_workout(
            &GenerateWorkout {
                template: Some("nope".to_string()),
                ..Default::default()
            },
            &mut rng,
        )
        .await;
    assert!(matches!(missing, Err(PlannerError::TemplateNotFound { .. })));
}
