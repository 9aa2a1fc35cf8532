//! Inbound commands to the application service.
//!
//! The accessory-protocol task submits [`AppCommand`]s to the shared
//! [`COMMANDS`] queue; the control loop drains it between ticks so every
//! command lands as one mutation before the next cycle.
//!
//! ```text
//! ┌───────────────┐  AppCommand  ┌──────────────┐
//! │ Protocol task │─────────────▶│ Control loop │
//! └───────────────┘   COMMANDS   └──────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};

/// Commands that external adapters can send into the application core.
///
/// Values are raw wire values; validation happens in the service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppCommand {
    /// Requested heating mode (0 = OFF, 1 = HEAT).
    SetMode(i32),

    /// Requested target temperature in °C.
    SetTarget(f32),

    /// Mode and target written together by one client request.
    Update {
        mode: Option<i32>,
        target_c: Option<f32>,
    },
}

/// Acceptance for one command. `None` = field not present. A command is
/// applied whole or not at all, so present fields share one verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandOutcome {
    pub mode: Option<bool>,
    pub target: Option<bool>,
}

impl CommandOutcome {
    /// Every field that was present was accepted.
    pub fn all_accepted(self) -> bool {
        self.mode.unwrap_or(true) && self.target.unwrap_or(true)
    }
}

/// Queue depth. A client cannot usefully send more than a handful of
/// writes per control tick.
pub const COMMAND_DEPTH: usize = 8;

/// Bounded command mailbox shared between the protocol task and the loop.
pub struct CommandQueue {
    channel: Channel<CriticalSectionRawMutex, AppCommand, COMMAND_DEPTH>,
}

impl CommandQueue {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Non-blocking submit. Hands the command back if the queue is full.
    pub fn submit(&self, cmd: AppCommand) -> Result<(), AppCommand> {
        self.channel.try_send(cmd).map_err(|TrySendError::Full(c)| c)
    }

    /// Pop the oldest pending command, if any.
    pub fn try_next(&self) -> Option<AppCommand> {
        self.channel.try_receive().ok()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Inbound command queue: protocol task → control loop.
pub static COMMANDS: CommandQueue = CommandQueue::new();
