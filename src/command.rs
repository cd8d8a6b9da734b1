//! Control commands as data.
//!
//! The `World` methods are the primary surface; [`Command`] exists so input
//! layers and replays can queue, serialize and apply them uniformly.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, FireOutcome, World};
use crate::error::Result;

/// One validated control input for a ship.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Thrust { ship: EntityId, amount: f64 },
    Turn { ship: EntityId, angle: f64 },
    Fire { ship: EntityId },
    SetThruster { ship: EntityId, active: bool },
}

impl Command {
    /// The ship the command is addressed to.
    pub fn ship(&self) -> EntityId {
        match *self {
            Command::Thrust { ship, .. }
            | Command::Turn { ship, .. }
            | Command::Fire { ship }
            | Command::SetThruster { ship, .. } => ship,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Command::Thrust { .. } => "thrust",
            Command::Turn { .. } => "turn",
            Command::Fire { .. } => "fire",
            Command::SetThruster { .. } => "set_thruster",
        }
    }
}

impl World {
    /// Apply one command. Only `Fire` produces an outcome.
    ///
    /// A refused command is reported to the observer before the error is returned.
    pub fn apply(&mut self, cmd: Command) -> Result<Option<FireOutcome>> {
        let res = match cmd {
            Command::Thrust { ship, amount } => self.thrust(ship, amount).map(|()| None),
            Command::Turn { ship, angle } => self.turn(ship, angle).map(|()| None),
            Command::Fire { ship } => self.fire(ship).map(Some),
            Command::SetThruster { ship, active } => {
                self.set_thruster_active(ship, active).map(|()| None)
            }
        };
        if let Err(e) = &res {
            let what = format!("{} for {}", cmd.name(), cmd.ship());
            self.notify_rejected(&what, &e.to_string());
        }
        res
    }

    /// Apply a batch in order, stopping at the first refusal.
    pub fn apply_all<I>(&mut self, cmds: I) -> Result<Vec<FireOutcome>>
    where
        I: IntoIterator<Item = Command>,
    {
        let mut fired = Vec::new();
        for cmd in cmds {
            if let Some(out) = self.apply(cmd)? {
                fired.push(out);
            }
        }
        Ok(fired)
    }
}
