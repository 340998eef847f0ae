pub mod agent;
pub mod http_api;
pub mod match_core;
pub mod multiplier;
pub mod phase;
pub mod round_timer;
pub mod session;
pub mod session_api;
pub mod settings;
