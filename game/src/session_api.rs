use std::fmt;

use tilematch_engine::agent::{AgentCommand, AgentHost, AgentResponse};
use tilematch_engine::protocol::{
    ActionDescriptor, ActionRequest, CellRef, GridView, Manifest, Snapshot, Stat, TimelineInfo,
};

use crate::agent::{MatchGame, SessionAction};
use crate::match_core::{BOARD_SIZE, Position};
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    UnknownActionId(String),
    MissingPosition(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::UnknownActionId(id) => write!(f, "unknown actionId: {id}"),
            ApiError::MissingPosition(id) => write!(f, "action {id} needs row and col"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Host-facing facade over one recorded session.
pub struct ApiSession {
    host: AgentHost<MatchGame>,
}

impl ApiSession {
    pub fn new(game: MatchGame) -> Self {
        let limit = game.settings().history_limit;
        Self {
            host: AgentHost::with_history_limit(game, limit),
        }
    }

    pub fn manifest(&self) -> Manifest {
        Manifest {
            title: "Tile Match".to_string(),
            board_size: BOARD_SIZE,
            actions: vec![
                action("spin", "Spin", false),
                action("tick", "Tick 1s", false),
                action("select", "Select Cell", true),
                action("advanceCascade", "Advance Cascade", false),
                action("reset", "Restart", false),
                action("noop", "Noop", false),
            ],
        }
    }

    pub fn timeline(&self) -> TimelineInfo {
        let tl = self.host.runner().timeline();
        TimelineInfo {
            frame: tl.frame(),
            first_frame: tl.first_frame(),
            history_len: tl.len(),
            can_rewind: tl.can_rewind(),
            can_forward: tl.can_forward(),
        }
    }

    pub fn session(&self) -> &Session {
        self.host.runner().state()
    }

    pub fn state(&mut self) -> Snapshot {
        snapshot_from_response(self.host.handle(AgentCommand::GetState))
    }

    pub fn step(&mut self, request: &ActionRequest) -> Result<Snapshot, ApiError> {
        let action = action_from_request(request)?;
        Ok(self.apply(action))
    }

    pub fn apply(&mut self, action: SessionAction) -> Snapshot {
        snapshot_from_response(self.host.handle(AgentCommand::Step(action)))
    }

    /// Records a reset of the live session. Its random source keeps going,
    /// so the next spin draws a new multiplier and board.
    pub fn reset(&mut self) -> Snapshot {
        self.apply(SessionAction::Reset)
    }

    pub fn rewind(&mut self, frames: usize) -> Snapshot {
        snapshot_from_response(self.host.handle(AgentCommand::Rewind { frames }))
    }

    pub fn forward(&mut self, frames: usize) -> Snapshot {
        snapshot_from_response(self.host.handle(AgentCommand::Forward { frames }))
    }

    /// Every retained frame, oldest first.
    pub fn history(&mut self) -> Vec<Snapshot> {
        match self.host.handle(AgentCommand::GetHistory) {
            AgentResponse::History {
                first_frame,
                history,
            } => history
                .iter()
                .enumerate()
                .map(|(offset, session)| snapshot_from_session(first_frame + offset, session))
                .collect(),
            AgentResponse::State { frame, state } => vec![snapshot_from_session(frame, &state)],
        }
    }

    /// Ticks the countdown if a round is running; otherwise records nothing.
    pub fn pump_tick(&mut self) -> Option<Snapshot> {
        self.session()
            .phase()
            .is_active()
            .then(|| self.apply(SessionAction::Tick))
    }

    /// Runs the next cascade pass if one is pending; otherwise records nothing.
    pub fn pump_cascade(&mut self) -> Option<Snapshot> {
        self.session()
            .is_resolving()
            .then(|| self.apply(SessionAction::AdvanceCascade))
    }
}

fn action(id: &str, label: &str, targets_cell: bool) -> ActionDescriptor {
    ActionDescriptor {
        id: id.to_string(),
        label: label.to_string(),
        targets_cell,
    }
}

pub fn action_from_request(request: &ActionRequest) -> Result<SessionAction, ApiError> {
    let id = request.action_id.as_str();
    match id {
        "spin" => Ok(SessionAction::Spin),
        "tick" => Ok(SessionAction::Tick),
        "select" => match (request.row, request.col) {
            (Some(row), Some(col)) => Ok(SessionAction::Select(Position::new(row, col))),
            _ => Err(ApiError::MissingPosition(id.to_string())),
        },
        "advanceCascade" => Ok(SessionAction::AdvanceCascade),
        "reset" => Ok(SessionAction::Reset),
        "noop" => Ok(SessionAction::Noop),
        _ => Err(ApiError::UnknownActionId(id.to_string())),
    }
}

fn snapshot_from_response(response: AgentResponse<Session>) -> Snapshot {
    match response {
        AgentResponse::State { frame, state } => snapshot_from_session(frame, &state),
        AgentResponse::History {
            first_frame,
            history,
        } => {
            let frame = first_frame + history.len().saturating_sub(1);
            match history.last() {
                Some(state) => snapshot_from_session(frame, state),
                None => Snapshot {
                    frame,
                    stats: Vec::new(),
                    grid: None,
                    state: serde_json::Value::Null,
                },
            }
        }
    }
}

pub fn snapshot_from_session(frame: usize, session: &Session) -> Snapshot {
    let view = session.snapshot();
    let state = serde_json::to_value(&view).unwrap_or(serde_json::Value::Null);

    let stats = vec![
        stat("phase", session.phase().label()),
        stat("timeLeft", session.time_left()),
        stat_opt("multiplier", session.multiplier().map(|m| m.to_string())),
        stat("score", session.score()),
        stat_opt("payout", session.payout().map(|p| p.to_string())),
        stat("resolving", session.is_resolving()),
        stat("swaps", session.swaps()),
    ];

    let grid = session.board().map(|board| GridView {
        cells: board
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map(|symbol| symbol.glyph().to_string()))
                    .collect()
            })
            .collect(),
        highlighted: session
            .selection()
            .positions()
            .into_iter()
            .map(|pos| CellRef {
                row: pos.row,
                col: pos.col,
            })
            .collect(),
    });

    Snapshot {
        frame,
        stats,
        grid,
        state,
    }
}

fn stat(label: impl Into<String>, value: impl ToString) -> Stat {
    Stat {
        label: label.into(),
        value: value.to_string(),
    }
}

fn stat_opt(label: impl Into<String>, value: Option<String>) -> Stat {
    Stat {
        label: label.into(),
        value: value.unwrap_or_else(|| "-".to_string()),
    }
}
