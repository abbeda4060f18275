//! Integration tests for locking and the XP economy

use skillforge::build::{BuildSession, BuildSubject, SubjectKind};
use skillforge::core::config::BudgetConfig;
use skillforge::core::error::BuildError;
use skillforge::core::types::{AllocationKey, SkillId};
use skillforge::skills::load_skill_catalog_file;
use std::path::PathBuf;

fn session() -> BuildSession {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/skills/core.toml");
    BuildSession::new(load_skill_catalog_file(&path).unwrap(), BudgetConfig::default())
}

fn key(path: &[&str]) -> AllocationKey {
    AllocationKey::from_path(path.iter().map(|s| SkillId::from(*s)).collect()).unwrap()
}

/// Spend 49 points across five tier-1 skills
fn nearly_spent(session: &BuildSession) -> BuildSubject {
    let mut subject = BuildSubject::new(SubjectKind::PlayerCharacter, "Vex");
    for skill in ["swordsmanship", "archery", "athletics", "stealth"] {
        session.allocate(&mut subject, &key(&[skill]), 10).unwrap();
    }
    session.allocate(&mut subject, &key(&["lore"]), 9).unwrap();
    subject
}

fn locked(session: &BuildSession, cr: u32) -> BuildSubject {
    let mut subject = nearly_spent(session);
    session.allocate(&mut subject, &key(&["lore"]), 10).unwrap();
    session.lock(&mut subject).unwrap();
    session.set_challenge_rating(&mut subject, cr).unwrap();
    subject
}

/// Test 1: Lock only at exactly the budget
#[test]
fn test_lock_exact_budget() {
    let session = session();
    let mut subject = nearly_spent(&session);

    let err = session.lock(&mut subject).unwrap_err();
    assert!(matches!(err, BuildError::InvalidLockTransition { spent: 49, budget: 50 }));
    assert!(!subject.is_locked());

    session.allocate(&mut subject, &key(&["lore"]), 10).unwrap();
    subject.progression.xp_spent = 3;
    session.lock(&mut subject).unwrap();
    assert!(subject.is_locked());
    assert_eq!(subject.progression.xp_spent, 0);
    assert_eq!(subject.progression.xp_checkpoint, 0);
    assert_eq!(subject.progression.checkpoint, subject.allocations);
}

/// Test 2: Locked builds buy single steps with XP
#[test]
fn test_xp_purchases() {
    let session = session();
    let mut subject = locked(&session, 5);
    assert_eq!(session.available_xp(&subject), 125);

    // Past the starting cap of 10
    assert_eq!(session.next_cost(&subject, &key(&["lore"])), 10);
    session.allocate(&mut subject, &key(&["lore"]), 11).unwrap();
    session.allocate(&mut subject, &key(&["lore"]), 12).unwrap();
    assert_eq!(subject.progression.xp_spent, 21);

    let err = session.allocate(&mut subject, &key(&["lore"]), 14).unwrap_err();
    assert!(matches!(err, BuildError::InvalidXpStep { current: 12, attempted: 14, .. }));

    session.allocate(&mut subject, &key(&["languages"]), 1).unwrap();
    assert_eq!(subject.progression.xp_spent, 31);
    assert_eq!(session.remaining_xp(&subject), 94);
}

/// Test 3: Buying 0 to 3 then refunding 3 to 0 is XP-neutral
#[test]
fn test_cost_refund_inverse() {
    let session = session();
    let mut subject = locked(&session, 10);
    let before = subject.progression.xp_spent;

    for points in 1..=3 {
        session.allocate(&mut subject, &key(&["languages"]), points).unwrap();
    }
    assert_eq!(subject.progression.xp_spent - before, 13);

    session.allocate(&mut subject, &key(&["languages"]), 0).unwrap();
    assert_eq!(subject.progression.xp_spent, before);
    assert_eq!(subject.allocations.get(&key(&["languages"])), 0);
}

/// Test 4: Not enough XP leaves the build unchanged
#[test]
fn test_insufficient_xp() {
    let session = session();
    let mut subject = locked(&session, 1);
    let before = subject.clone();

    let err = session.allocate(&mut subject, &key(&["languages"]), 1).unwrap_err();
    assert!(matches!(err, BuildError::InsufficientXp { cost: 10, remaining: 0, .. }));
    assert_eq!(subject, before);
}

/// Test 5: Checkpoints raise the floor and cannot be undone
#[test]
fn test_checkpoint_floor() {
    let session = session();
    let mut subject = locked(&session, 10);

    let err = session.allocate(&mut subject, &key(&["stealth"]), 9).unwrap_err();
    assert!(matches!(err, BuildError::LockViolation { attempted: 9, limit: 10, .. }));

    session.allocate(&mut subject, &key(&["stealth"]), 11).unwrap();
    session.allocate(&mut subject, &key(&["languages"]), 1).unwrap();
    session.checkpoint(&mut subject).unwrap();
    assert_eq!(subject.progression.xp_checkpoint, 20);

    assert!(session.allocate(&mut subject, &key(&["stealth"]), 10).is_err());
    assert!(session.allocate(&mut subject, &key(&["languages"]), 0).is_err());

    // Growth above the new floor can still be sold back
    session.allocate(&mut subject, &key(&["stealth"]), 12).unwrap();
    session.allocate(&mut subject, &key(&["stealth"]), 11).unwrap();
    assert_eq!(subject.progression.xp_spent, 20);
}

/// Test 6: Rollback refunds everything since the checkpoint
#[test]
fn test_rollback() {
    let session = session();
    let mut subject = locked(&session, 10);
    let floor = subject.allocations.clone();

    session.allocate(&mut subject, &key(&["archery"]), 11).unwrap();
    session.allocate(&mut subject, &key(&["darkvision"]), 1).unwrap();
    session.rollback(&mut subject).unwrap();

    assert_eq!(subject.allocations, floor);
    assert_eq!(subject.progression.xp_spent, 0);
}

/// Test 7: XP growth can reach the tier threshold and open tier-2 skills
#[test]
fn test_xp_growth_unlocks_next_tier() {
    let session = session();
    let mut subject = locked(&session, 20);
    let riposte: SkillId = "riposte".into();
    assert!(!session.is_unlocked(&subject, &riposte));

    for points in 11..=25 {
        session.allocate(&mut subject, &key(&["swordsmanship"]), points).unwrap();
    }
    // 10 + 11 + ... + 24
    assert_eq!(subject.progression.xp_spent, 255);
    assert!(session.is_unlocked(&subject, &riposte));
    session
        .allocate(&mut subject, &key(&["swordsmanship", "riposte"]), 1)
        .unwrap();
    assert_eq!(
        session.rank(&subject, &key(&["swordsmanship", "riposte"])).unwrap(),
        26
    );
}

/// Test 8: Checkpoint needs a locked build
#[test]
fn test_checkpoint_before_lock() {
    let session = session();
    let mut subject = nearly_spent(&session);
    assert!(matches!(session.checkpoint(&mut subject), Err(BuildError::NotLocked)));
    assert_eq!(session.available_xp(&subject), 0);
}
