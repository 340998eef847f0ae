pub mod agent;
pub mod protocol;

use std::collections::VecDeque;

/// Default number of snapshots a [`Timeline`] keeps before dropping the oldest.
pub const DEFAULT_HISTORY_LIMIT: usize = 4_096;

/// Bounded snapshot history with a movable cursor.
///
/// Recording while the cursor is behind the newest snapshot discards the
/// snapshots after it. Once `limit` snapshots are stored the oldest one is
/// dropped, so `frame` numbers stay monotonic while `history()` only covers
/// the retained window.
#[derive(Debug, Clone)]
pub struct Timeline<State> {
    states: VecDeque<State>,
    cursor: usize,
    dropped: usize,
    limit: usize,
}

impl<State> Timeline<State> {
    pub fn new(initial_state: State) -> Self {
        Self::with_limit(initial_state, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_limit(initial_state: State, limit: usize) -> Self {
        let mut states = VecDeque::new();
        states.push_back(initial_state);
        Self {
            states,
            cursor: 0,
            dropped: 0,
            limit: limit.max(1),
        }
    }

    /// Absolute frame number of the cursor.
    pub fn frame(&self) -> usize {
        self.dropped + self.cursor
    }

    /// Absolute frame number of the oldest retained snapshot.
    pub fn first_frame(&self) -> usize {
        self.dropped
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self) -> &State {
        &self.states[self.cursor]
    }

    pub fn history(&self) -> impl Iterator<Item = &State> {
        self.states.iter()
    }

    pub fn can_rewind(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_forward(&self) -> bool {
        self.cursor + 1 < self.states.len()
    }

    pub fn rewind(&mut self, frames: usize) -> usize {
        self.cursor = self.cursor.saturating_sub(frames);
        self.frame()
    }

    pub fn forward(&mut self, frames: usize) -> usize {
        let max_cursor = self.states.len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add(frames).min(max_cursor);
        self.frame()
    }

    pub fn record(&mut self, state: State) -> usize {
        self.states.truncate(self.cursor + 1);
        self.states.push_back(state);
        self.cursor += 1;
        while self.states.len() > self.limit {
            self.states.pop_front();
            self.cursor -= 1;
            self.dropped += 1;
        }
        self.frame()
    }
}

/// A game expressed as pure transitions over immutable snapshots.
pub trait GameLogic {
    type State;
    type Input;

    fn initial_state(&self) -> Self::State;
    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State;
}

#[derive(Debug)]
pub struct HeadlessRunner<G: GameLogic> {
    game: G,
    timeline: Timeline<G::State>,
}

impl<G: GameLogic> HeadlessRunner<G> {
    pub fn new(game: G) -> Self {
        Self::with_history_limit(game, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(game: G, limit: usize) -> Self {
        let initial_state = game.initial_state();
        Self {
            game,
            timeline: Timeline::with_limit(initial_state, limit),
        }
    }

    pub fn frame(&self) -> usize {
        self.timeline.frame()
    }

    pub fn state(&self) -> &G::State {
        self.timeline.state()
    }

    pub fn timeline(&self) -> &Timeline<G::State> {
        &self.timeline
    }

    pub fn step(&mut self, input: G::Input) -> usize {
        let next_state = self.game.step(self.timeline.state(), input);
        self.timeline.record(next_state)
    }

    pub fn rewind(&mut self, frames: usize) -> usize {
        self.timeline.rewind(frames)
    }

    pub fn forward(&mut self, frames: usize) -> usize {
        self.timeline.forward(frames)
    }
}
