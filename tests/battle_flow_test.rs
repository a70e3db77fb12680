//! Integration test: Encounter -> Battle -> Rewards
//!
//! Walks a full slime fight through the battle state machine and checks
//! that gold, exp, kill quests and the save state all move together.

use epic_rpg::character::skills::{knows_skill, learn_skill, SkillId};
use epic_rpg::combat::logic::{
    ActionKind, Battle, BattleEvent, BattleOutcome, BattlePhase, HeroAction, TurnResult,
};
use epic_rpg::combat::types::{EnemyKind, HeroSnapshot, Side};
use epic_rpg::core::balance::BalanceConfig;
use epic_rpg::items::inventory::{count, equip};
use epic_rpg::items::types::{ItemId, Slot};
use epic_rpg::quests::tracker::{complete_and_reward, status};
use epic_rpg::quests::types::{QuestId, QuestStatus};
use epic_rpg::{GameError, SaveState};

fn start(state: &SaveState, kind: EnemyKind, config: &BalanceConfig) -> Battle {
    Battle::start(kind, HeroSnapshot::from_state(state), config)
}

/// Alternates hero attacks and enemy turns until the battle ends.
fn fight_by_attacking(battle: &mut Battle, state: &mut SaveState) -> Vec<BattleEvent> {
    let mut all = Vec::new();
    while !battle.is_over() {
        let events = match battle.phase() {
            BattlePhase::HeroTurn => battle.hero_act(state, HeroAction::Attack).unwrap(),
            BattlePhase::EnemyTurn => battle.enemy_act(state).unwrap(),
            BattlePhase::Victory | BattlePhase::Defeat => unreachable!(),
        };
        all.extend(events);
    }
    all
}

// =========================================================================
// Full slime fight from a fresh save
// =========================================================================

#[test]
fn test_slime_fight_end_to_end() {
    let config = BalanceConfig::default();
    let mut state = SaveState::new(0);
    let mut battle = start(&state, EnemyKind::Slime, &config);
    assert_eq!(battle.phase(), BattlePhase::HeroTurn);

    battle.hero_act(&mut state, HeroAction::Attack).unwrap();
    assert_eq!(battle.enemy().current_hp, 90);
    battle.enemy_act(&mut state).unwrap();
    assert_eq!(state.hp, 70);

    battle.hero_act(&mut state, HeroAction::Attack).unwrap();
    assert_eq!(battle.enemy().current_hp, 30);
    battle.enemy_act(&mut state).unwrap();
    assert_eq!(state.hp, 40);

    let events = battle.hero_act(&mut state, HeroAction::Attack).unwrap();

    assert_eq!(
        events[0],
        BattleEvent::Turn(TurnResult {
            actor: Side::Hero,
            action: ActionKind::Attack,
            damage_dealt: 30,
            hp_restored: 0,
            target_hp_after: 0,
        })
    );
    let Some(BattleEvent::Victory(rewards)) = events.last() else {
        panic!("expected a victory event, got {events:?}");
    };
    assert_eq!(rewards.exp, 100);
    assert_eq!(rewards.gold, 50);
    assert_eq!(rewards.levels_gained, 0);
    assert_eq!(rewards.quests_advanced, vec![QuestId::Slimes]);

    assert_eq!(state.exp, 100);
    assert_eq!(state.gold, 50);
    assert_eq!(state.level, 1);
    assert_eq!(state.quest(QuestId::Slimes).unwrap().progress, 1);
    assert_eq!(state.quest(QuestId::Goblins).unwrap().progress, 0);
    assert!(matches!(battle.outcome(), Some(BattleOutcome::Victory(_))));
}

#[test]
fn test_second_victory_levels_up() {
    let config = BalanceConfig::default();
    let mut state = SaveState::new(0);
    state.exp = 150;

    let mut battle = start(&state, EnemyKind::Slime, &config);
    let events = fight_by_attacking(&mut battle, &mut state);

    let Some(BattleEvent::Victory(rewards)) = events.last() else {
        panic!("expected victory");
    };
    assert_eq!(rewards.levels_gained, 1);
    assert_eq!(state.level, 2);
    assert_eq!(state.exp, 250);
    assert_eq!(state.max_hp, 130);
    assert_eq!(state.hp, state.max_hp);
    assert!(knows_skill(&state, SkillId::PowerStrike));
    assert!(!knows_skill(&state, SkillId::Mend));
}

#[test]
fn test_goblin_kill_advances_only_goblin_quest() {
    let config = BalanceConfig::default();
    let mut state = SaveState::new(0);
    let mut battle = start(&state, EnemyKind::Goblin, &config);

    fight_by_attacking(&mut battle, &mut state);

    assert_eq!(battle.phase(), BattlePhase::Victory);
    assert_eq!(state.quest(QuestId::Goblins).unwrap().progress, 1);
    assert_eq!(state.quest(QuestId::Slimes).unwrap().progress, 0);
}

// =========================================================================
// Defeat and input after the end
// =========================================================================

#[test]
fn test_defeat_grants_nothing() {
    let config = BalanceConfig::default();
    let mut state = SaveState::new(0);
    state.hp = 30;
    let mut battle = start(&state, EnemyKind::Goblin, &config);

    let events = fight_by_attacking(&mut battle, &mut state);

    assert_eq!(events.last(), Some(&BattleEvent::Defeat));
    assert_eq!(state.hp, 0);
    assert_eq!(state.gold, 0);
    assert_eq!(state.exp, 0);
    assert_eq!(
        battle.hero_act(&mut state, HeroAction::Attack),
        Err(GameError::InvalidAction("battle is already over"))
    );
}

#[test]
fn test_duplicate_input_after_victory_pays_once() {
    let config = BalanceConfig::default();
    let mut state = SaveState::new(0);
    let mut battle = start(&state, EnemyKind::Slime, &config);
    fight_by_attacking(&mut battle, &mut state);

    for _ in 0..3 {
        assert!(battle.hero_act(&mut state, HeroAction::Attack).is_err());
        assert!(battle.enemy_act(&mut state).is_err());
    }

    assert_eq!(state.gold, 50);
    assert_eq!(state.exp, 100);
}

// =========================================================================
// Speed ordering
// =========================================================================

#[test]
fn test_faster_enemy_opens_the_battle() {
    let config = BalanceConfig {
        enemy_speed: 150,
        ..Default::default()
    };
    let mut state = SaveState::new(0);
    let mut battle = start(&state, EnemyKind::Slime, &config);

    assert_eq!(battle.phase(), BattlePhase::EnemyTurn);
    assert_eq!(battle.turn_order(), vec![Side::Enemy, Side::Hero]);
    battle.enemy_act(&mut state).unwrap();
    assert_eq!(battle.phase(), BattlePhase::HeroTurn);
}

#[test]
fn test_equal_speed_keeps_hero_first() {
    let config = BalanceConfig {
        enemy_speed: 100,
        ..Default::default()
    };
    let state = SaveState::new(0);
    let battle = start(&state, EnemyKind::Slime, &config);

    assert_eq!(battle.phase(), BattlePhase::HeroTurn);
}

// =========================================================================
// Items, skills and quests around a battle
// =========================================================================

#[test]
fn test_potion_then_quest_turn_in() {
    let config = BalanceConfig::default();
    let mut state = SaveState::new(0);
    state.hp = 20;
    let mut battle = start(&state, EnemyKind::Slime, &config);

    battle.hero_act(&mut state, HeroAction::UseHealItem).unwrap();
    assert_eq!(state.hp, 70);
    assert_eq!(count(&state, ItemId::Potion), 0);
    assert_eq!(
        battle.enemy_act(&mut state).map(|_| state.hp),
        Ok(40)
    );
    assert_eq!(
        battle.hero_act(&mut state, HeroAction::UseHealItem),
        Err(GameError::NoPotionAvailable)
    );

    state.quests.get_mut(&QuestId::Slimes).unwrap().progress = 5;
    assert_eq!(
        status(&state, QuestId::Slimes),
        Some(QuestStatus::ReadyToTurnIn)
    );
    complete_and_reward(&mut state, QuestId::Slimes, 500).unwrap();
    assert_eq!(status(&state, QuestId::Slimes), Some(QuestStatus::Completed));
    assert_eq!(
        complete_and_reward(&mut state, QuestId::Slimes, 500),
        Err(GameError::AlreadyCompleted(QuestId::Slimes))
    );
    assert_eq!(state.gold, 500);
}

#[test]
fn test_power_strike_shortens_the_fight() {
    let config = BalanceConfig::default();
    let mut state = SaveState::new(0);
    learn_skill(&mut state, SkillId::PowerStrike);
    let mut battle = start(&state, EnemyKind::Slime, &config);

    battle
        .hero_act(&mut state, HeroAction::CastSkill(SkillId::PowerStrike))
        .unwrap();
    battle.enemy_act(&mut state).unwrap();
    battle
        .hero_act(&mut state, HeroAction::CastSkill(SkillId::PowerStrike))
        .unwrap();

    assert_eq!(battle.phase(), BattlePhase::Victory);
    assert_eq!(state.mp, 10);
}

#[test]
fn test_equip_requires_ownership() {
    let mut state = SaveState::new(0);
    state.equipment.clear();

    assert_eq!(equip(&mut state, Slot::Weapon, ItemId::Sword), Ok(None));
    assert_eq!(state.equipped(Slot::Weapon), Some(ItemId::Sword));

    state.inventory.clear();
    state.equipment.clear();
    assert_eq!(
        equip(&mut state, Slot::Weapon, ItemId::Sword),
        Err(GameError::ItemNotOwned(ItemId::Sword))
    );
    assert_eq!(state.equipped(Slot::Weapon), None);
}
