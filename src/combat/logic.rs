//! Turn-based battle state machine.
//!
//! `Init -> HeroTurn <-> EnemyTurn -> Victory | Defeat`
//!
//! The hero's HP lives in [`SaveState`]; the battle keeps a mirror in its
//! hero unit for presentation. Every action returns the events it produced
//! so the caller can animate them. Victory and Defeat are terminal: any
//! later action fails with `InvalidAction`, so duplicate input delivery
//! cannot pay out twice.

use super::turn_queue::TurnQueue;
use super::types::{BattleUnit, EnemyKind, HeroSnapshot, Side};
use crate::character::progression::{gain_exp, heal, spend_mp, take_damage};
use crate::character::skills::{knows_skill, SkillId};
use crate::core::balance::BalanceConfig;
use crate::core::error::{GameError, GameResult};
use crate::core::game_state::SaveState;
use crate::items::inventory::{consume, owns};
use crate::items::types::ItemId;
use crate::quests::tracker::advance_kill_quests;
use crate::quests::types::QuestId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    HeroTurn,
    EnemyTurn,
    Victory,
    Defeat,
}

impl BattlePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BattlePhase::Victory | BattlePhase::Defeat)
    }
}

/// One player choice during the hero's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroAction {
    Attack,
    UseHealItem,
    CastSkill(SkillId),
}

/// What a turn did, for either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Attack,
    UseHealItem,
    Skill(SkillId),
}

impl From<HeroAction> for ActionKind {
    fn from(action: HeroAction) -> Self {
        match action {
            HeroAction::Attack => ActionKind::Attack,
            HeroAction::UseHealItem => ActionKind::UseHealItem,
            HeroAction::CastSkill(skill) => ActionKind::Skill(skill),
        }
    }
}

/// Result of a single resolved action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnResult {
    pub actor: Side,
    pub action: ActionKind,
    pub damage_dealt: u32,
    pub hp_restored: u32,
    /// HP of whoever the action targeted (the opponent for attacks, the
    /// actor for heals).
    pub target_hp_after: u32,
}

/// What the hero earned from a won battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleRewards {
    pub enemy: EnemyKind,
    pub exp: u64,
    pub gold: u64,
    pub levels_gained: u32,
    pub quests_advanced: Vec<QuestId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEvent {
    Turn(TurnResult),
    Victory(BattleRewards),
    Defeat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory(BattleRewards),
    Defeat,
}

/// A single hero-vs-enemy battle.
#[derive(Debug, Clone)]
pub struct Battle {
    enemy_kind: EnemyKind,
    hero: BattleUnit,
    enemy: BattleUnit,
    queue: TurnQueue,
    phase: BattlePhase,
    outcome: Option<BattleOutcome>,
    config: BalanceConfig,
}

impl Battle {
    /// Sets up units and the turn queue (hero queued first) and hands the
    /// first turn to whoever is fastest.
    pub fn start(enemy_kind: EnemyKind, hero: HeroSnapshot, config: &BalanceConfig) -> Self {
        let hero = hero.to_unit(config);
        let enemy = enemy_kind.spawn(config);

        let mut queue = TurnQueue::new();
        queue.push(Side::Hero, hero.speed);
        queue.push(Side::Enemy, enemy.speed);

        let mut battle = Self {
            enemy_kind,
            hero,
            enemy,
            queue,
            phase: BattlePhase::HeroTurn,
            outcome: None,
            config: config.clone(),
        };
        battle.next_turn();
        tracing::debug!(enemy = %enemy_kind, phase = ?battle.phase, "battle started");
        battle
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<&BattleOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn enemy_kind(&self) -> EnemyKind {
        self.enemy_kind
    }

    pub fn hero(&self) -> &BattleUnit {
        &self.hero
    }

    pub fn enemy(&self) -> &BattleUnit {
        &self.enemy
    }

    pub fn turn_order(&self) -> Vec<Side> {
        self.queue.order()
    }

    /// Changes a combatant's speed; applies from the next turn on.
    pub fn set_speed(&mut self, side: Side, speed: u32) {
        match side {
            Side::Hero => self.hero.speed = speed,
            Side::Enemy => self.enemy.speed = speed,
        }
        self.queue.set_speed(side, speed);
    }

    /// Resolves the hero's chosen action.
    ///
    /// A failed action (no potion, not enough MP, ...) leaves the turn with
    /// the hero.
    pub fn hero_act(
        &mut self,
        state: &mut SaveState,
        action: HeroAction,
    ) -> GameResult<Vec<BattleEvent>> {
        self.expect_phase(BattlePhase::HeroTurn)?;
        self.sync_hero(state);

        let turn = match action {
            HeroAction::Attack => {
                let damage = self.config.hero_attack_damage(state.level);
                self.strike_enemy(ActionKind::Attack, damage)
            }
            HeroAction::UseHealItem => {
                if !owns(state, ItemId::Potion) {
                    return Err(GameError::NoPotionAvailable);
                }
                let used = consume(state, ItemId::Potion, &self.config)?;
                self.hero_heal_result(state, ActionKind::UseHealItem, used.hp_restored)
            }
            HeroAction::CastSkill(skill) => {
                if !knows_skill(state, skill) {
                    return Err(GameError::SkillNotLearned(skill));
                }
                spend_mp(state, skill.mp_cost(&self.config))?;
                match skill {
                    SkillId::PowerStrike => {
                        let damage = self
                            .config
                            .hero_attack_damage(state.level)
                            .saturating_add(self.config.power_strike_bonus_damage);
                        self.strike_enemy(ActionKind::Skill(skill), damage)
                    }
                    SkillId::Mend => {
                        let restored = heal(state, self.config.mend_heal);
                        self.hero_heal_result(state, ActionKind::Skill(skill), restored)
                    }
                }
            }
        };
        self.sync_hero(state);

        Ok(self.resolve(state, turn))
    }

    /// The enemy acts now. Scheduling the delay before this call is the
    /// caller's job.
    pub fn enemy_act(&mut self, state: &mut SaveState) -> GameResult<Vec<BattleEvent>> {
        self.expect_phase(BattlePhase::EnemyTurn)?;
        self.sync_hero(state);

        let damage_dealt = take_damage(state, self.enemy.attack_power);
        self.sync_hero(state);

        let turn = TurnResult {
            actor: Side::Enemy,
            action: ActionKind::Attack,
            damage_dealt,
            hp_restored: 0,
            target_hp_after: state.hp,
        };
        Ok(self.resolve(state, turn))
    }

    fn expect_phase(&self, expected: BattlePhase) -> GameResult<()> {
        if self.phase == expected {
            return Ok(());
        }
        if self.phase.is_terminal() {
            Err(GameError::InvalidAction("battle is already over"))
        } else if expected == BattlePhase::HeroTurn {
            Err(GameError::InvalidAction("not the hero's turn"))
        } else {
            Err(GameError::InvalidAction("not the enemy's turn"))
        }
    }

    fn sync_hero(&mut self, state: &SaveState) {
        self.hero.current_hp = state.hp;
        self.hero.max_hp = state.max_hp;
    }

    fn strike_enemy(&mut self, action: ActionKind, damage: u32) -> TurnResult {
        let damage_dealt = self.enemy.take_damage(damage);
        TurnResult {
            actor: Side::Hero,
            action,
            damage_dealt,
            hp_restored: 0,
            target_hp_after: self.enemy.current_hp,
        }
    }

    fn hero_heal_result(&self, state: &SaveState, action: ActionKind, restored: u32) -> TurnResult {
        TurnResult {
            actor: Side::Hero,
            action,
            damage_dealt: 0,
            hp_restored: restored,
            target_hp_after: state.hp,
        }
    }

    /// Checks for a terminal state (enemy first), otherwise passes the turn.
    fn resolve(&mut self, state: &mut SaveState, turn: TurnResult) -> Vec<BattleEvent> {
        let mut events = vec![BattleEvent::Turn(turn)];

        if !self.enemy.is_alive() {
            let rewards = self.grant_victory(state);
            self.phase = BattlePhase::Victory;
            self.outcome = Some(BattleOutcome::Victory(rewards.clone()));
            events.push(BattleEvent::Victory(rewards));
        } else if state.hp == 0 {
            self.phase = BattlePhase::Defeat;
            self.outcome = Some(BattleOutcome::Defeat);
            tracing::info!(enemy = %self.enemy_kind, "hero was defeated");
            events.push(BattleEvent::Defeat);
        } else {
            self.next_turn();
        }
        events
    }

    fn next_turn(&mut self) {
        self.phase = match self.queue.next_actor() {
            Some(Side::Enemy) => BattlePhase::EnemyTurn,
            _ => BattlePhase::HeroTurn,
        };
    }

    fn grant_victory(&mut self, state: &mut SaveState) -> BattleRewards {
        state.gold = state.gold.saturating_add(self.config.victory_gold);
        let quests_advanced = advance_kill_quests(state, self.enemy_kind);
        let levels_gained = gain_exp(state, self.config.victory_exp, &self.config);
        self.sync_hero(state);

        tracing::info!(
            enemy = %self.enemy_kind,
            exp = self.config.victory_exp,
            gold = self.config.victory_gold,
            levels_gained,
            "battle won"
        );
        BattleRewards {
            enemy: self.enemy_kind,
            exp: self.config.victory_exp,
            gold: self.config.victory_gold,
            levels_gained,
            quests_advanced,
        }
    }
}
