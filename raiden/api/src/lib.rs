//! A high level crate which runs the dispute of Raiden channels: it feeds close, update,
//! punish and settle requests through the channel state machine and only commits the new
//! channel state once the resulting transactions are confirmed on chain.
pub mod config;
pub mod dispute;
pub mod errors;
pub mod event_handler;
