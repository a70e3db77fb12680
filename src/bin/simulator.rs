//! Epic RPG Headless Session Simulator
//!
//! Drives a real [`Session`] with a scripted player: every encounter is
//! fought, the hero heals when low, and finished quests are turned in.
//! Useful for checking balance changes in `balance.json`.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --minutes N     Session minutes to simulate (default: 60)
//!   --seed N        RNG seed (default: 42)
//!   --runs N        Number of runs with incrementing seeds (default: 1)
//!   --verbose       Debug logging to stderr
//!   --quiet         Only final summary line
//!   --use-save      Play on the real save file instead of a throwaway one
//!   --write-balance Write the active balance to ~/.epic-rpg/balance.json and exit

use epic_rpg::character::save::SaveManager;
use epic_rpg::character::skills::{knows_skill, SkillId};
use epic_rpg::combat::logic::{BattleEvent, BattlePhase, HeroAction};
use epic_rpg::core::balance::BalanceConfig;
use epic_rpg::core::session::{Mode, Session, SessionEvent};
use epic_rpg::items::inventory::owns;
use epic_rpg::items::types::ItemId;
use epic_rpg::quests::types::{QuestId, QuestStatus};
use epic_rpg::quests::tracker::status;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

/// Simulation step; matches a 10 Hz presentation loop.
const STEP_MS: u64 = 100;

// ── CLI Configuration ────────────────────────────────────────────────

struct SimConfig {
    minutes: u64,
    seed: u64,
    runs: u32,
    verbose: bool,
    quiet: bool,
    write_balance: bool,
    use_save: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            minutes: 60,
            seed: 42,
            runs: 1,
            verbose: false,
            quiet: false,
            write_balance: false,
            use_save: false,
        }
    }
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> T {
    match value.and_then(|v| v.parse().ok()) {
        Some(n) => n,
        None => {
            eprintln!("{flag} requires a number");
            print_usage();
            std::process::exit(1);
        }
    }
}

fn parse_args() -> SimConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = SimConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--minutes" => {
                i += 1;
                config.minutes = parse_number("--minutes", args.get(i));
            }
            "--seed" => {
                i += 1;
                config.seed = parse_number("--seed", args.get(i));
            }
            "--runs" => {
                i += 1;
                config.runs = parse_number("--runs", args.get(i));
            }
            "--verbose" => config.verbose = true,
            "--quiet" => config.quiet = true,
            "--write-balance" => config.write_balance = true,
            "--use-save" => config.use_save = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }
    config
}

fn print_usage() {
    eprintln!(
        "Epic RPG Headless Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --minutes N     Session minutes to simulate (default: 60)\n\
         \x20 --seed N        RNG seed (default: 42)\n\
         \x20 --runs N        Number of runs with incrementing seeds (default: 1)\n\
         \x20 --verbose       Debug logging to stderr\n\
         \x20 --quiet         Only final summary line\n\
         \x20 --use-save      Play on the real save file\n\
         \x20 --write-balance Write the active balance file and exit\n\
         \x20 --help, -h      Show this help"
    );
}

// ── Simulation Statistics ────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
struct SimStats {
    encounters: u64,
    victories: u64,
    defeats: u64,
    potions_used: u64,
    ethers_used: u64,
    skills_cast: u64,
    levels_gained: u64,
    quests_completed: u64,
    saves: u64,
    save_failures: u64,
    final_level: u32,
    final_exp: u64,
    final_gold: u64,
    final_playtime_seconds: u64,
}

impl SimStats {
    fn record(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Saved => self.saves += 1,
            SessionEvent::SaveFailed => self.save_failures += 1,
            SessionEvent::EncounterTriggered(_) => self.encounters += 1,
            SessionEvent::Battle(BattleEvent::Victory(rewards)) => {
                self.victories += 1;
                self.levels_gained += u64::from(rewards.levels_gained);
            }
            SessionEvent::Battle(BattleEvent::Defeat) => self.defeats += 1,
            SessionEvent::Battle(BattleEvent::Turn(_))
            | SessionEvent::BattleStarted { .. }
            | SessionEvent::ReturnedToOverworld => {}
        }
    }
}

// ── Scripted Player ──────────────────────────────────────────────────

/// Heal below 40% HP when possible, otherwise hit as hard as MP allows.
fn choose_action(session: &Session<StdRng>) -> HeroAction {
    let state = session.state();
    let config = session.config();

    if state.hp * 10 < state.max_hp * 4 {
        if owns(state, ItemId::Potion) {
            return HeroAction::UseHealItem;
        }
        if knows_skill(state, SkillId::Mend) && state.mp >= SkillId::Mend.mp_cost(config) {
            return HeroAction::CastSkill(SkillId::Mend);
        }
    }
    if knows_skill(state, SkillId::PowerStrike)
        && state.mp >= SkillId::PowerStrike.mp_cost(config)
    {
        return HeroAction::CastSkill(SkillId::PowerStrike);
    }
    HeroAction::Attack
}

fn turn_in_ready_quests(session: &mut Session<StdRng>, stats: &mut SimStats) {
    for id in QuestId::ALL {
        if status(session.state(), id) == Some(QuestStatus::ReadyToTurnIn)
            && session.turn_in_quest(id).is_ok()
        {
            stats.quests_completed += 1;
        }
    }
}

/// Tops up MP between fights once a skill is known and MP runs short.
fn use_ether_if_low(session: &mut Session<StdRng>, stats: &mut SimStats) {
    let state = session.state();
    let knows_any = SkillId::ALL.iter().any(|s| knows_skill(state, *s));
    if knows_any
        && state.mp < SkillId::PowerStrike.mp_cost(session.config())
        && owns(state, ItemId::Ether)
        && session.use_item(ItemId::Ether).is_ok()
    {
        stats.ethers_used += 1;
    }
}

fn run_simulation(config: &SimConfig, seed: u64) -> SimStats {
    let scratch_path = std::env::temp_dir().join(format!(
        "epic-rpg-sim-{}-{}.dat",
        std::process::id(),
        seed
    ));
    let store = if config.use_save {
        match SaveManager::new() {
            Ok(store) => store,
            Err(e) => {
                eprintln!("Could not open the save directory: {e}");
                std::process::exit(1);
            }
        }
    } else {
        let _ = std::fs::remove_file(&scratch_path);
        SaveManager::with_path(&scratch_path)
    };

    let now = chrono::Utc::now().timestamp_millis();
    let (mut session, _) = Session::start(
        store,
        BalanceConfig::load_or_default(),
        StdRng::seed_from_u64(seed),
        now,
    );

    let mut stats = SimStats::default();
    let total_ms = config.minutes.saturating_mul(60_000);
    let mut elapsed = 0;

    while elapsed < total_ms {
        let mut events = session.tick(STEP_MS);
        elapsed += STEP_MS;

        let triggered = events.iter().find_map(|e| match e {
            SessionEvent::EncounterTriggered(kind) => Some(*kind),
            _ => None,
        });
        if let Some(kind) = triggered {
            if let Ok(started) = session.enter_battle(kind) {
                events.extend(started);
            }
        }

        let hero_turn = session
            .battle()
            .is_some_and(|b| b.phase() == BattlePhase::HeroTurn);
        if hero_turn {
            let action = choose_action(&session);
            match session.hero_action(action) {
                Ok(battle_events) => {
                    match action {
                        HeroAction::UseHealItem => stats.potions_used += 1,
                        HeroAction::CastSkill(_) => stats.skills_cast += 1,
                        HeroAction::Attack => {}
                    }
                    events.extend(battle_events);
                }
                Err(e) => tracing::warn!("scripted action {:?} rejected: {}", action, e),
            }
        }

        for event in &events {
            stats.record(event);
        }
        if events.contains(&SessionEvent::ReturnedToOverworld) {
            turn_in_ready_quests(&mut session, &mut stats);
            use_ether_if_low(&mut session, &mut stats);
        }
        if matches!(session.mode(), Mode::Defeated) {
            let restart_at = now.saturating_add(elapsed as i64);
            if let Err(e) = session.restart(restart_at) {
                tracing::warn!("restart failed: {}", e);
            }
        }
    }

    let state = session.state();
    stats.final_level = state.level;
    stats.final_exp = state.exp;
    stats.final_gold = state.gold;
    stats.final_playtime_seconds = state.playtime_seconds;

    if !config.use_save {
        let _ = std::fs::remove_file(&scratch_path);
    }
    stats
}

fn print_summary(stats: &SimStats, seed: u64, config: &SimConfig) {
    println!("=== Simulation Summary (seed={seed}, {} min) ===", config.minutes);
    println!("Encounters:        {}", stats.encounters);
    println!("Victories:         {}", stats.victories);
    println!("Defeats:           {}", stats.defeats);
    println!("Potions used:      {}", stats.potions_used);
    println!("Ethers used:       {}", stats.ethers_used);
    println!("Skills cast:       {}", stats.skills_cast);
    println!("Levels gained:     {}", stats.levels_gained);
    println!("Quests completed:  {}", stats.quests_completed);
    println!("Saves:             {} ({} failed)", stats.saves, stats.save_failures);
    println!("--- Final State ---");
    println!(
        "Level {}  EXP {}  Gold {}  Playtime {}s",
        stats.final_level, stats.final_exp, stats.final_gold, stats.final_playtime_seconds
    );
}

fn main() {
    let config = parse_args();

    let level = if config.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    if config.write_balance {
        match BalanceConfig::load_or_default().save() {
            Ok(()) => eprintln!("Balance written to ~/.epic-rpg/balance.json"),
            Err(e) => {
                eprintln!("Could not write balance file: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if !config.quiet {
        eprintln!(
            "Epic RPG Simulator: {} min x {} run(s), seed={}",
            config.minutes, config.runs, config.seed
        );
    }

    for run in 0..config.runs {
        let seed = config.seed + u64::from(run);
        let stats = run_simulation(&config, seed);

        if config.quiet || config.runs > 1 {
            println!(
                "  Run {} (seed={seed}): L{} gold={} wins={} losses={} quests={}",
                run + 1,
                stats.final_level,
                stats.final_gold,
                stats.victories,
                stats.defeats,
                stats.quests_completed,
            );
        } else {
            print_summary(&stats, seed, &config);
        }
    }
}
