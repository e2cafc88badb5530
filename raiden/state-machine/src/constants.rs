use crate::types::ChannelStatus;

pub const DEFAULT_SETTLE_TIMEOUT: u64 = 500;
pub const DEFAULT_PUNISH_WINDOW: u64 = 100;
pub const SECRET_LENGTH: u8 = 32;

pub const CHANNEL_STATES_PRIOR_TO_CLOSE: [ChannelStatus; 1] = [ChannelStatus::Opened];

/// States in which the settlement of a channel is still being disputed.
pub const CHANNEL_STATES_UNDER_DISPUTE: [ChannelStatus; 3] =
	[ChannelStatus::Closed, ChannelStatus::Updated, ChannelStatus::Punished];
