//! A play session: owns the save state and wires the components together.
//!
//! The session is always in exactly one mode. The overworld owns the
//! autosave and encounter timers; a battle owns the enemy-turn timer.
//! Switching modes cancels the timers of the mode being left, so a stale
//! callback can never fire into the wrong state. The presentation layer
//! feeds elapsed time through [`Session::tick`] and player choices through
//! [`Session::hero_action`], and renders the returned events.

use super::balance::BalanceConfig;
use super::error::{GameError, GameResult};
use super::game_state::SaveState;
use super::offline::{apply_offline_reward, OfflineReport};
use super::scheduler::{Scheduler, TaskId, TaskKind};
use crate::character::save::SaveManager;
use crate::combat::encounter::{next_encounter_delay_ms, roll_encounter};
use crate::combat::logic::{Battle, BattleEvent, BattlePhase, HeroAction};
use crate::combat::types::{EnemyKind, HeroSnapshot};
use crate::items::inventory::{add_item, consume, ConsumeResult};
use crate::items::types::ItemId;
use crate::quests::tracker::complete_and_reward;
use crate::quests::types::QuestId;
use rand::Rng;

/// The session's active context.
#[derive(Debug, Clone)]
pub enum Mode {
    Overworld,
    Battle(Battle),
    /// The hero fell; only [`Session::restart`] is accepted.
    Defeated,
}

/// Something the presentation layer may want to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Saved,
    /// The write failed; it is retried on the next autosave.
    SaveFailed,
    /// An encounter roll hit. Call [`Session::enter_battle`] to fight it.
    EncounterTriggered(EnemyKind),
    BattleStarted { enemy: EnemyKind, hero_first: bool },
    Battle(BattleEvent),
    ReturnedToOverworld,
}

pub struct Session<R: Rng> {
    state: SaveState,
    store: SaveManager,
    config: BalanceConfig,
    scheduler: Scheduler,
    rng: R,
    mode: Mode,
    autosave_task: Option<TaskId>,
    encounter_task: Option<TaskId>,
    enemy_turn_task: Option<TaskId>,
    save_pending: bool,
    playtime_remainder_ms: u64,
}

impl<R: Rng> Session<R> {
    /// Loads (fail-soft), applies the offline reward once, persists the new
    /// login stamp and enters the overworld. A save that was written after
    /// a defeat (0 HP) resumes in [`Mode::Defeated`].
    pub fn start(
        store: SaveManager,
        config: BalanceConfig,
        rng: R,
        now_epoch_ms: i64,
    ) -> (Self, OfflineReport) {
        let mut state = store.load(now_epoch_ms);
        let report = apply_offline_reward(&mut state, now_epoch_ms, &config);

        let mut session = Self {
            state,
            store,
            config,
            scheduler: Scheduler::new(),
            rng,
            mode: Mode::Overworld,
            autosave_task: None,
            encounter_task: None,
            enemy_turn_task: None,
            save_pending: false,
            playtime_remainder_ms: 0,
        };
        session.persist();
        if session.state.hp == 0 {
            session.enter_defeated();
        } else {
            session.enter_overworld();
        }
        tracing::info!(
            level = session.state.level,
            gold = session.state.gold,
            "session started"
        );
        (session, report)
    }

    pub fn state(&self) -> &SaveState {
        &self.state
    }

    /// Direct access for out-of-battle screens (inventory, dialogue).
    pub fn state_mut(&mut self) -> &mut SaveState {
        &mut self.state
    }

    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn battle(&self) -> Option<&Battle> {
        match &self.mode {
            Mode::Battle(battle) => Some(battle),
            _ => None,
        }
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn store(&self) -> &SaveManager {
        &self.store
    }

    /// True while a failed write is waiting for the next autosave.
    pub fn save_pending(&self) -> bool {
        self.save_pending
    }

    /// Advances time, accruing playtime and firing due timers.
    pub fn tick(&mut self, dt_ms: u64) -> Vec<SessionEvent> {
        if !matches!(self.mode, Mode::Defeated) {
            self.accrue_playtime(dt_ms);
        }
        self.scheduler.advance(dt_ms);

        let mut events = Vec::new();
        while let Some((_, kind)) = self.scheduler.pop_due() {
            match kind {
                TaskKind::Autosave => {
                    events.push(self.persist());
                    if matches!(self.mode, Mode::Defeated) && !self.save_pending {
                        self.cancel_autosave();
                    }
                }
                TaskKind::EncounterCheck => {
                    self.encounter_task = None;
                    let chance = self.config.encounter_chance;
                    if let Some(enemy) = roll_encounter(&mut self.rng, chance) {
                        tracing::debug!(%enemy, "encounter triggered");
                        events.push(SessionEvent::EncounterTriggered(enemy));
                    }
                    self.schedule_encounter();
                }
                TaskKind::EnemyTurn => {
                    self.enemy_turn_task = None;
                    events.extend(self.run_enemy_turn());
                }
            }
        }
        events
    }

    /// Leaves the overworld and starts a battle against `enemy`.
    pub fn enter_battle(&mut self, enemy: EnemyKind) -> GameResult<Vec<SessionEvent>> {
        match self.mode {
            Mode::Overworld => {}
            Mode::Battle(_) => return Err(GameError::InvalidAction("already in battle")),
            Mode::Defeated => return Err(GameError::InvalidAction("hero is defeated")),
        }
        if self.state.hp == 0 {
            return Err(GameError::InvalidAction("hero has no hp left"));
        }

        self.leave_overworld();
        let battle = Battle::start(enemy, HeroSnapshot::from_state(&self.state), &self.config);
        let hero_first = battle.phase() == BattlePhase::HeroTurn;
        self.mode = Mode::Battle(battle);
        if !hero_first {
            self.schedule_enemy_turn();
        }

        Ok(vec![SessionEvent::BattleStarted { enemy, hero_first }])
    }

    /// Resolves the hero's action in the current battle.
    pub fn hero_action(&mut self, action: HeroAction) -> GameResult<Vec<SessionEvent>> {
        let Mode::Battle(battle) = &mut self.mode else {
            return Err(GameError::InvalidAction("not in battle"));
        };
        let events = battle.hero_act(&mut self.state, action)?;
        Ok(self.after_battle_step(events))
    }

    /// Turns in a quest for its standard reward and saves.
    pub fn turn_in_quest(&mut self, id: QuestId) -> GameResult<u64> {
        let def = id.def();
        complete_and_reward(&mut self.state, id, def.reward_gold)?;
        if let Some(item) = def.reward_item {
            add_item(&mut self.state, item);
        }
        self.persist();
        Ok(def.reward_gold)
    }

    /// Uses a consumable outside of battle. In a battle items go through
    /// [`Session::hero_action`].
    pub fn use_item(&mut self, item: ItemId) -> GameResult<ConsumeResult> {
        if !matches!(self.mode, Mode::Overworld) {
            return Err(GameError::InvalidAction("items can only be used in the overworld"));
        }
        consume(&mut self.state, item, &self.config)
    }

    /// Starts over with a fresh save after a defeat.
    pub fn restart(&mut self, now_epoch_ms: i64) -> GameResult<()> {
        if !matches!(self.mode, Mode::Defeated) {
            return Err(GameError::InvalidAction("restart is only allowed after a defeat"));
        }
        self.state = SaveState::new(now_epoch_ms);
        self.persist();
        self.enter_overworld();
        tracing::info!("session restarted");
        Ok(())
    }

    fn accrue_playtime(&mut self, dt_ms: u64) {
        let total = self.playtime_remainder_ms.saturating_add(dt_ms);
        self.state.playtime_seconds = self.state.playtime_seconds.saturating_add(total / 1000);
        self.playtime_remainder_ms = total % 1000;
    }

    fn persist(&mut self) -> SessionEvent {
        match self.store.save(&self.state) {
            Ok(()) => {
                self.save_pending = false;
                SessionEvent::Saved
            }
            Err(e) => {
                tracing::warn!("save failed, will retry on next autosave: {}", e);
                self.save_pending = true;
                SessionEvent::SaveFailed
            }
        }
    }

    fn enter_overworld(&mut self) {
        self.cancel_all();
        self.mode = Mode::Overworld;
        self.schedule_autosave();
        self.schedule_encounter();
    }

    /// Stops all timers. Autosave keeps running only while a write is
    /// still pending, and stops after the first successful retry.
    fn enter_defeated(&mut self) {
        self.cancel_all();
        self.mode = Mode::Defeated;
        if self.save_pending {
            self.schedule_autosave();
        }
    }

    fn schedule_autosave(&mut self) {
        self.cancel_autosave();
        self.autosave_task = Some(
            self.scheduler
                .schedule_repeating(TaskKind::Autosave, self.config.autosave_interval_ms),
        );
    }

    fn cancel_autosave(&mut self) {
        if let Some(id) = self.autosave_task.take() {
            self.scheduler.cancel(id);
        }
    }

    fn leave_overworld(&mut self) {
        self.cancel_autosave();
        if let Some(id) = self.encounter_task.take() {
            self.scheduler.cancel(id);
        }
    }

    fn cancel_all(&mut self) {
        self.leave_overworld();
        if let Some(id) = self.enemy_turn_task.take() {
            self.scheduler.cancel(id);
        }
    }

    fn schedule_encounter(&mut self) {
        if !matches!(self.mode, Mode::Overworld) {
            return;
        }
        let delay = next_encounter_delay_ms(&mut self.rng, &self.config);
        self.encounter_task = Some(self.scheduler.schedule_once(TaskKind::EncounterCheck, delay));
    }

    fn schedule_enemy_turn(&mut self) {
        if let Some(id) = self.enemy_turn_task.take() {
            self.scheduler.cancel(id);
        }
        self.enemy_turn_task = Some(
            self.scheduler
                .schedule_once(TaskKind::EnemyTurn, self.config.enemy_turn_delay_ms),
        );
    }

    fn run_enemy_turn(&mut self) -> Vec<SessionEvent> {
        let Mode::Battle(battle) = &mut self.mode else {
            return Vec::new();
        };
        match battle.enemy_act(&mut self.state) {
            Ok(events) => self.after_battle_step(events),
            Err(e) => {
                tracing::debug!("ignoring stale enemy turn: {}", e);
                Vec::new()
            }
        }
    }

    /// Schedules the next enemy turn or closes out a finished battle.
    fn after_battle_step(&mut self, battle_events: Vec<BattleEvent>) -> Vec<SessionEvent> {
        let mut events: Vec<SessionEvent> =
            battle_events.into_iter().map(SessionEvent::Battle).collect();

        let phase = match &self.mode {
            Mode::Battle(battle) => battle.phase(),
            _ => return events,
        };
        match phase {
            BattlePhase::HeroTurn => {}
            BattlePhase::EnemyTurn => self.schedule_enemy_turn(),
            BattlePhase::Victory => {
                events.push(self.persist());
                self.enter_overworld();
                events.push(SessionEvent::ReturnedToOverworld);
            }
            BattlePhase::Defeat => {
                events.push(self.persist());
                self.enter_defeated();
            }
        }
        events
    }
}
