//! Property tests: budget, lock and checkpoint invariants hold for any
//! sequence of build operations

use proptest::prelude::*;
use skillforge::build::{BuildSession, BuildSubject, SubjectKind};
use skillforge::core::config::BudgetConfig;
use skillforge::core::types::{AllocationKey, AttributeKind};
use skillforge::progression::{purchase_cost, refund_value};
use skillforge::skills::{load_skill_catalog_file, SkillCatalog, SKILL_POINT_CAP};
use skillforge::stats::LocationHp;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Op {
    SetAttribute(usize, i32),
    Allocate(usize, i32),
    Lock,
    Checkpoint,
    Rollback,
    ChallengeRating(u32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0usize..6, -10i32..60).prop_map(|(a, v)| Op::SetAttribute(a, v)),
        8 => (0usize..64, -2i32..14).prop_map(|(k, p)| Op::Allocate(k, p)),
        1 => Just(Op::Lock),
        1 => Just(Op::Checkpoint),
        1 => Just(Op::Rollback),
        1 => (1u32..=50).prop_map(Op::ChallengeRating),
    ]
}

fn catalog() -> Arc<SkillCatalog> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/skills/core.toml");
    load_skill_catalog_file(&path).unwrap()
}

fn all_keys(catalog: &SkillCatalog) -> Vec<AllocationKey> {
    catalog.iter().flat_map(|s| catalog.lineages(&s.id)).collect()
}

proptest! {
    #[test]
    fn prop_invariants_hold(ops in prop::collection::vec(op_strategy(), 0..80)) {
        let catalog = catalog();
        let keys = all_keys(&catalog);
        let config = BudgetConfig::default();
        let session = BuildSession::new(catalog, config);
        let mut subject = BuildSubject::new(SubjectKind::PlayerCharacter, "Prop");
        let mut was_locked = false;

        for op in ops {
            let before = subject.clone();
            let result = match op {
                Op::SetAttribute(a, v) => session
                    .set_attribute(&mut subject, AttributeKind::all()[a], v)
                    .map(|_| ()),
                Op::Allocate(k, p) => session.allocate(&mut subject, &keys[k % keys.len()], p),
                Op::Lock => session.lock(&mut subject),
                Op::Checkpoint => session.checkpoint(&mut subject),
                Op::Rollback => session.rollback(&mut subject),
                Op::ChallengeRating(cr) => session.set_challenge_rating(&mut subject, cr),
            };
            if result.is_err() {
                prop_assert_eq!(&subject, &before);
            }

            prop_assert!(subject.attributes.total() <= config.attribute_point_budget);
            if subject.is_locked() {
                if !was_locked {
                    prop_assert_eq!(subject.allocations.total(), config.skill_point_budget);
                }
                for (key, floor) in subject.progression.checkpoint.iter() {
                    prop_assert!(subject.allocations.get(key) >= floor);
                }
            } else {
                prop_assert!(!was_locked);
                prop_assert!(subject.allocations.total() <= config.skill_point_budget);
                for (_, points) in subject.allocations.iter() {
                    prop_assert!(points <= SKILL_POINT_CAP);
                }
            }
            was_locked = subject.is_locked();
        }
    }

    #[test]
    fn prop_refund_retraces_purchase(start in 0u32..40, steps in 0u32..20) {
        let bought: u32 = (start..start + steps).map(purchase_cost).sum();
        prop_assert_eq!(refund_value(start + steps, start), bought);
    }

    #[test]
    fn prop_location_split_sums(total in -50i32..5000) {
        let split = LocationHp::split(total);
        prop_assert_eq!(split.total(), total);
        prop_assert_eq!(split.left_arm, split.right_leg);
    }
}
