use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::match_core::{
    Cascade, Grid, PassOutcome, Payout, Position, RandomSource, Rng, Score, generate_board,
    try_swap,
};
use crate::multiplier::Multiplier;
use crate::phase::{PhaseEffect, PhaseEvent, SessionPhase};
use crate::round_timer::RoundTimer;
use crate::settings::{CascadeMode, GameSettings};

/// Cells the player has picked for the next swap attempt, in pick order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pending: Option<Position>,
}

impl Selection {
    pub fn positions(&self) -> Vec<Position> {
        self.pending.into_iter().collect()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.pending == Some(pos)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Adds a pick. The second pick completes the pair and empties the
    /// selection.
    fn push(&mut self, pos: Position) -> Option<(Position, Position)> {
        match self.pending.take() {
            Some(first) => Some((first, pos)),
            None => {
                self.pending = Some(pos);
                None
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    NotActive,
    Resolving,
    OutOfBounds,
    EmptyCell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectOutcome {
    Ignored(IgnoreReason),
    Pending(Position),
    /// The pair was not orthogonally adjacent; nothing changed.
    Rejected { from: Position, to: Position },
    /// The swap was applied. `gained` covers the passes that already ran;
    /// `settled` is false while a stepped cascade still has passes left.
    Swapped {
        from: Position,
        to: Position,
        gained: Score,
        settled: bool,
    },
}

/// Serializable view of a session for hosts and renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub time_left: u32,
    pub multiplier: Option<u32>,
    pub score: f64,
    pub payout: Option<f64>,
    pub terminal: bool,
    pub resolving: bool,
    pub board: Option<Grid>,
    pub selected: Vec<Position>,
}

/// One timed round of the game: multiplier spin, countdown, board and score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    phase: SessionPhase,
    timer: RoundTimer,
    multiplier: Option<Multiplier>,
    score: Score,
    board: Option<Grid>,
    selection: Selection,
    cascade: Option<Cascade>,
    cascade_mode: CascadeMode,
    max_cascade_passes: u32,
    rng: Rng,
    swaps: u32,
    cascade_passes: u32,
}

impl Session {
    pub fn new(settings: &GameSettings, seed: u64) -> Self {
        Self {
            phase: SessionPhase::PreGame,
            timer: RoundTimer::new(settings.round_secs.max(1)),
            multiplier: None,
            score: Score::ZERO,
            board: None,
            selection: Selection::default(),
            cascade: None,
            cascade_mode: settings.cascade_mode,
            max_cascade_passes: settings.max_cascade_passes.max(1),
            rng: Rng::new(seed),
            swaps: 0,
            cascade_passes: 0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn time_left(&self) -> u32 {
        self.timer.remaining_secs()
    }

    pub fn round_secs(&self) -> u32 {
        self.timer.limit_secs()
    }

    pub fn multiplier(&self) -> Option<Multiplier> {
        self.multiplier
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Score times multiplier, once a multiplier has been drawn.
    pub fn payout(&self) -> Option<Payout> {
        self.multiplier.map(|m| self.score.times(m.factor()))
    }

    pub fn board(&self) -> Option<&Grid> {
        self.board.as_ref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// True while a cascade still has passes to run. Selections are ignored
    /// until it settles.
    pub fn is_resolving(&self) -> bool {
        self.cascade.is_some()
    }

    pub fn cascade_mode(&self) -> CascadeMode {
        self.cascade_mode
    }

    pub fn swaps(&self) -> u32 {
        self.swaps
    }

    pub fn cascade_passes(&self) -> u32 {
        self.cascade_passes
    }

    /// Replaces the live board. Only meaningful while a round is running.
    pub fn set_board_for_test(&mut self, board: Grid) {
        if self.board.is_some() {
            self.board = Some(board);
            self.cascade = None;
            self.selection.clear();
        }
    }

    pub fn spin(&mut self) -> Option<Multiplier> {
        if self.phase != SessionPhase::PreGame {
            return None;
        }
        let draw = self.rng.next_unit();
        self.spin_with_draw(draw)
    }

    /// Spin with a caller-provided draw in `[0, 1)` instead of the session's
    /// own random source.
    pub fn spin_with_draw(&mut self, draw: f64) -> Option<Multiplier> {
        let (next, effect) = self.phase.handle(PhaseEvent::Spin);
        if effect != PhaseEffect::StartRound {
            return None;
        }
        self.phase = next;

        let multiplier = Multiplier::from_draw(draw);
        self.multiplier = Some(multiplier);
        self.timer.reset();
        self.score = Score::ZERO;
        self.selection.clear();
        self.cascade = None;
        self.board = Some(generate_board(&mut self.rng));
        info!(
            "round started: multiplier {multiplier}, {}s on the clock",
            self.timer.limit_secs()
        );
        Some(multiplier)
    }

    /// One second of the countdown. Returns `true` on the tick that ends the
    /// round.
    pub fn tick(&mut self) -> bool {
        if !self.phase.is_active() || !self.timer.tick() {
            return false;
        }
        let (next, effect) = self.phase.handle(PhaseEvent::TimeUp);
        self.phase = next;
        if effect == PhaseEffect::FinalizePayout {
            self.selection.clear();
            info!(
                "time is up: score {}, payout {}{}",
                self.score,
                self.payout().unwrap_or_default(),
                if self.is_resolving() {
                    " (cascade still resolving)"
                } else {
                    ""
                }
            );
        }
        true
    }

    pub fn select(&mut self, pos: Position) -> SelectOutcome {
        if !self.phase.is_active() {
            return SelectOutcome::Ignored(IgnoreReason::NotActive);
        }
        if self.is_resolving() {
            return SelectOutcome::Ignored(IgnoreReason::Resolving);
        }
        if !pos.is_in_bounds() {
            return SelectOutcome::Ignored(IgnoreReason::OutOfBounds);
        }
        let Some(board) = self.board else {
            return SelectOutcome::Ignored(IgnoreReason::NotActive);
        };
        if !matches!(board.get(pos), Some(Some(_))) {
            return SelectOutcome::Ignored(IgnoreReason::EmptyCell);
        }

        let Some((from, to)) = self.selection.push(pos) else {
            return SelectOutcome::Pending(pos);
        };
        let Some(candidate) = try_swap(&board, from, to) else {
            debug!("swap {from} -> {to} rejected");
            return SelectOutcome::Rejected { from, to };
        };

        self.swaps += 1;
        self.board = Some(candidate);
        let before = self.score;
        let mut cascade = Cascade::new(candidate);
        self.run_pass(&mut cascade);
        if self.cascade_mode == CascadeMode::Immediate {
            while !cascade.is_settled() && cascade.passes() < self.max_cascade_passes {
                self.run_pass(&mut cascade);
            }
        }
        self.park(cascade);

        let gained = Score::from_matched((self.score.thirds() - before.thirds()) as usize);
        debug!("swap {from} -> {to} accepted, +{gained}");
        SelectOutcome::Swapped {
            from,
            to,
            gained,
            settled: !self.is_resolving(),
        }
    }

    /// Runs the next pass of the in-flight cascade, if any. Keeps working
    /// after the round has ended so a started cascade always completes.
    pub fn advance_cascade(&mut self) -> Option<PassOutcome> {
        let mut cascade = self.cascade.take()?;
        let outcome = self.run_pass(&mut cascade);
        self.park(cascade);
        Some(outcome)
    }

    pub fn reset(&mut self) -> bool {
        let (next, effect) = self.phase.handle(PhaseEvent::Reset);
        if effect != PhaseEffect::ClearSession {
            return false;
        }
        self.phase = next;
        self.timer.reset();
        self.multiplier = None;
        self.score = Score::ZERO;
        self.board = None;
        self.selection.clear();
        self.cascade = None;
        self.swaps = 0;
        self.cascade_passes = 0;
        info!("session reset");
        true
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            time_left: self.time_left(),
            multiplier: self.multiplier.map(Multiplier::factor),
            score: self.score.value(),
            payout: self.payout().map(Payout::value),
            terminal: self.is_terminal(),
            resolving: self.is_resolving(),
            board: self.board,
            selected: self.selection.positions(),
        }
    }

    fn run_pass(&mut self, cascade: &mut Cascade) -> PassOutcome {
        let outcome = cascade.advance_one_pass(&mut self.rng);
        if let PassOutcome::Cleared { gained, grid, .. } = &outcome {
            self.score += *gained;
            self.board = Some(*grid);
            self.cascade_passes += 1;
        }
        outcome
    }

    fn park(&mut self, cascade: Cascade) {
        self.cascade = if cascade.is_settled() {
            None
        } else if cascade.passes() >= self.max_cascade_passes {
            warn!(
                "cascade stopped after {} passes with matches remaining",
                cascade.passes()
            );
            None
        } else {
            Some(cascade)
        };
    }
}
