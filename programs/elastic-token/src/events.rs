//! Event logging for the elastic token
//!
//! Ledger operations report what they did through an [`EventSink`]. Tests and
//! off-chain callers collect into a `Vec`; the processor writes every event to
//! the program log.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{msg, pubkey::Pubkey};

/// Event type discriminator
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Transfer = 1,
    Approval = 2,
    Rebase = 3,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum TokenEvent {
    /// Value-unit movement. `from` is the zero key on mint, `to` on burn.
    Transfer {
        from: Pubkey,
        to: Pubkey,
        amount: u128,
    },

    /// Absolute allowance after the update, in value units
    Approval {
        owner: Pubkey,
        spender: Pubkey,
        amount: u128,
    },

    Rebase {
        epoch: i64,
        prev_scaling_factor: u128,
        new_scaling_factor: u128,
    },
}

impl TokenEvent {
    pub fn event_type(&self) -> EventType {
        match self {
            TokenEvent::Transfer { .. } => EventType::Transfer,
            TokenEvent::Approval { .. } => EventType::Approval,
            TokenEvent::Rebase { .. } => EventType::Rebase,
        }
    }
}

pub trait EventSink {
    fn emit(&mut self, event: TokenEvent);
}

impl EventSink for Vec<TokenEvent> {
    fn emit(&mut self, event: TokenEvent) {
        self.push(event);
    }
}

/// Writes events to the program log.
#[derive(Debug, Default)]
pub struct ProgramLogSink {
    pub emitted: u32,
}

impl EventSink for ProgramLogSink {
    fn emit(&mut self, event: TokenEvent) {
        msg!("ELASTIC_TOKEN_EVENT");
        msg!("TYPE:{:?}", event.event_type());

        if let Ok(data) = event.try_to_vec() {
            msg!("DATA:{}", bs58::encode(&data).into_string());
        }
        self.emitted += 1;
    }
}
