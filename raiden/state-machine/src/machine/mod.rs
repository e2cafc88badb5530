#![warn(clippy::missing_docs_in_private_items)]

pub mod channel;
