use log::debug;

use crate::{GameLogic, HeadlessRunner};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentCommand<I> {
    Step(I),
    GetState,
    GetHistory,
    Rewind { frames: usize },
    Forward { frames: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentResponse<S> {
    State { frame: usize, state: S },
    /// Every retained snapshot, oldest first; `first_frame` numbers the first.
    History { first_frame: usize, history: Vec<S> },
}

/// Owns a [`HeadlessRunner`] and answers host commands with cloned snapshots.
pub struct AgentHost<G>
where
    G: GameLogic,
{
    runner: HeadlessRunner<G>,
}

impl<G> AgentHost<G>
where
    G: GameLogic,
    G::State: Clone,
{
    pub fn new(game: G) -> Self {
        Self {
            runner: HeadlessRunner::new(game),
        }
    }

    pub fn with_history_limit(game: G, limit: usize) -> Self {
        Self {
            runner: HeadlessRunner::with_history_limit(game, limit),
        }
    }

    pub fn handle(&mut self, command: AgentCommand<G::Input>) -> AgentResponse<G::State> {
        match command {
            AgentCommand::Step(input) => {
                let frame = self.runner.step(input);
                self.current(frame)
            }
            AgentCommand::GetState => self.current(self.runner.frame()),
            AgentCommand::GetHistory => AgentResponse::History {
                first_frame: self.runner.timeline().first_frame(),
                history: self.runner.timeline().history().cloned().collect(),
            },
            AgentCommand::Rewind { frames } => {
                let frame = self.runner.rewind(frames);
                debug!("agent host rewound {frames} frame(s) to {frame}");
                self.current(frame)
            }
            AgentCommand::Forward { frames } => {
                let frame = self.runner.forward(frames);
                debug!("agent host moved forward {frames} frame(s) to {frame}");
                self.current(frame)
            }
        }
    }

    pub fn runner(&self) -> &HeadlessRunner<G> {
        &self.runner
    }

    fn current(&self, frame: usize) -> AgentResponse<G::State> {
        AgentResponse::State {
            frame,
            state: self.runner.state().clone(),
        }
    }
}
