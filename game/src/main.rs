use log::info;

use tilematch::agent::{MatchGame, SessionAction};
use tilematch::match_core::find_matching_swap;
use tilematch::settings::SettingsStore;
use tilematch_engine::HeadlessRunner;

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse::<u64>().ok())
}

/// Plays one round headlessly: spin, then one matching swap per second of
/// the clock until time runs out.
fn autoplay(runner: &mut HeadlessRunner<MatchGame>) {
    runner.step(SessionAction::Spin);

    while runner.state().phase().is_active() {
        let swap = runner.state().board().and_then(find_matching_swap);
        if let Some((from, to)) = swap {
            runner.step(SessionAction::Select(from));
            runner.step(SessionAction::Select(to));
        }
        runner.step(SessionAction::Tick);
    }

    while runner.state().is_resolving() {
        runner.step(SessionAction::AdvanceCascade);
    }
}

fn main() {
    env_logger::init();

    let settings = SettingsStore::from_env().load().immediate();
    let seed = env_u64("TILEMATCH_SEED")
        .or(settings.seed)
        .unwrap_or_else(rand::random);
    let game = MatchGame::new(settings, seed);
    let mut runner = HeadlessRunner::with_history_limit(game, settings.history_limit);

    autoplay(&mut runner);

    let session = runner.state();
    info!(
        "seed {seed}: {} swaps, {} cascade passes",
        session.swaps(),
        session.cascade_passes()
    );
    println!(
        "frame {} multiplier {} score {} payout {}",
        runner.frame(),
        session.multiplier().map(|m| m.to_string()).unwrap_or_default(),
        session.score(),
        session.payout().unwrap_or_default()
    );
}
