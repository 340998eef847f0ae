use serde::{Deserialize, Serialize};
use tilematch_engine::GameLogic;

use crate::match_core::Position;
use crate::session::Session;
use crate::settings::GameSettings;

/// Every way a host can drive a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionAction {
    Spin,
    /// Spin with a forced draw in `[0, 1)`.
    SpinWithDraw(f64),
    Tick,
    Select(Position),
    AdvanceCascade,
    Reset,
    Noop,
}

#[derive(Debug, Clone)]
pub struct MatchGame {
    settings: GameSettings,
    seed: u64,
}

impl MatchGame {
    pub fn new(settings: GameSettings, seed: u64) -> Self {
        Self { settings, seed }
    }

    /// Uses the configured seed, falling back to `fallback_seed`.
    pub fn from_settings(settings: GameSettings, fallback_seed: u64) -> Self {
        let seed = settings.seed.unwrap_or(fallback_seed);
        Self::new(settings, seed)
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl GameLogic for MatchGame {
    type State = Session;
    type Input = SessionAction;

    fn initial_state(&self) -> Self::State {
        Session::new(&self.settings, self.seed)
    }

    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State {
        let mut next = state.clone();
        apply_action(&mut next, input);
        next
    }
}

pub fn apply_action(session: &mut Session, action: SessionAction) {
    match action {
        SessionAction::Spin => {
            session.spin();
        }
        SessionAction::SpinWithDraw(draw) => {
            session.spin_with_draw(draw);
        }
        SessionAction::Tick => {
            session.tick();
        }
        SessionAction::Select(pos) => {
            session.select(pos);
        }
        SessionAction::AdvanceCascade => {
            session.advance_cascade();
        }
        SessionAction::Reset => {
            session.reset();
        }
        SessionAction::Noop => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::SessionPhase;

    #[test]
    fn step_leaves_previous_snapshot_untouched() {
        let game = MatchGame::new(GameSettings::default(), 5);
        let initial = game.initial_state();
        let spun = game.step(&initial, SessionAction::SpinWithDraw(0.1));

        assert_eq!(initial.phase(), SessionPhase::PreGame);
        assert!(initial.board().is_none());
        assert_eq!(spun.phase(), SessionPhase::Active);
        assert!(spun.board().is_some());
    }

    #[test]
    fn same_seed_replays_identically() {
        let game = MatchGame::new(GameSettings::default(), 77);
        let a = game.step(&game.initial_state(), SessionAction::Spin);
        let b = game.step(&game.initial_state(), SessionAction::Spin);
        assert_eq!(a, b);
    }

    #[test]
    fn configured_seed_wins_over_fallback() {
        let game = MatchGame::from_settings(GameSettings::default().with_seed(9), 1);
        assert_eq!(game.seed(), 9);
        let game = MatchGame::from_settings(GameSettings::default(), 1);
        assert_eq!(game.seed(), 1);
    }
}
