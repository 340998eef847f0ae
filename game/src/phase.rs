use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
    #[default]
    PreGame,
    Active,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseEvent {
    Spin,
    TimeUp,
    Reset,
}

/// Work the session has to do after a phase change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseEffect {
    None,
    /// Draw the multiplier, restart the countdown and deal a fresh board.
    StartRound,
    /// Freeze input; the payout becomes final once any cascade settles.
    FinalizePayout,
    /// Drop board, score, multiplier and selection.
    ClearSession,
}

impl SessionPhase {
    /// Pure transition function for the session phase machine.
    pub fn handle(self, event: PhaseEvent) -> (SessionPhase, PhaseEffect) {
        match (self, event) {
            (SessionPhase::PreGame, PhaseEvent::Spin) => {
                (SessionPhase::Active, PhaseEffect::StartRound)
            }
            (SessionPhase::Active, PhaseEvent::TimeUp) => {
                (SessionPhase::Ended, PhaseEffect::FinalizePayout)
            }
            (SessionPhase::Active | SessionPhase::Ended, PhaseEvent::Reset) => {
                (SessionPhase::PreGame, PhaseEffect::ClearSession)
            }

            // Ignore irrelevant events in the current phase.
            (phase, _) => (phase, PhaseEffect::None),
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, SessionPhase::Active)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::Ended)
    }

    pub fn label(self) -> &'static str {
        match self {
            SessionPhase::PreGame => "preGame",
            SessionPhase::Active => "active",
            SessionPhase::Ended => "ended",
        }
    }
}
