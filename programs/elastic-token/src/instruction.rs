use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::error::ElasticTokenError;

/// Amounts are value units unless the variant says otherwise.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum ElasticTokenInstruction {
    /// Initialize the ledger account
    /// Accounts:
    /// 0. `[signer]` Owner
    /// 1. `[writable]` Ledger account (program owned, zeroed)
    Initialize {
        name: String,
        symbol: String,
        decimals: u8,
    },

    /// Mint underlying units. A zero `account` fails before the owner check.
    /// Accounts:
    /// 0. `[signer]` Owner
    /// 1. `[writable]` Ledger account
    Mint {
        account: Pubkey,
        underlying_amount: u128,
    },

    /// Burn underlying units
    /// Accounts:
    /// 0. `[signer]` Owner
    /// 1. `[writable]` Ledger account
    Burn {
        account: Pubkey,
        underlying_amount: u128,
    },

    /// Accounts:
    /// 0. `[signer]` Sender
    /// 1. `[writable]` Ledger account
    Transfer {
        to: Pubkey,
        amount: u128,
    },

    /// Accounts:
    /// 0. `[signer]` Holder granting the allowance
    /// 1. `[writable]` Ledger account
    Approve {
        spender: Pubkey,
        amount: u128,
    },

    /// Accounts:
    /// 0. `[signer]` Holder granting the allowance
    /// 1. `[writable]` Ledger account
    IncreaseAllowance {
        spender: Pubkey,
        amount: u128,
    },

    /// Accounts:
    /// 0. `[signer]` Holder granting the allowance
    /// 1. `[writable]` Ledger account
    DecreaseAllowance {
        spender: Pubkey,
        amount: u128,
    },

    /// Accounts:
    /// 0. `[signer]` Spender
    /// 1. `[writable]` Ledger account
    TransferFrom {
        from: Pubkey,
        to: Pubkey,
        amount: u128,
    },

    /// Accounts:
    /// 0. `[signer]` Owner
    /// 1. `[writable]` Ledger account
    SetRebaser {
        rebaser: Pubkey,
    },

    /// `index_delta` has 18 decimals
    /// Accounts:
    /// 0. `[signer]` Rebaser
    /// 1. `[writable]` Ledger account
    Rebase {
        index_delta: u128,
        positive: bool,
    },
}

impl ElasticTokenInstruction {
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        if input.is_empty() {
            return Err(ProgramError::InvalidInstructionData);
        }
        Self::try_from_slice(input).map_err(|_| ElasticTokenError::InvalidInstruction.into())
    }

    pub fn pack(&self) -> Vec<u8> {
        // Borsh writes the variant index as the leading tag byte
        self.try_to_vec().unwrap_or_default()
    }
}

fn build(program_id: &Pubkey, signer: &Pubkey, ledger: &Pubkey, data: ElasticTokenInstruction) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*signer, true),
            AccountMeta::new(*ledger, false),
        ],
        data: data.pack(),
    }
}

pub fn initialize(
    program_id: &Pubkey,
    owner: &Pubkey,
    ledger: &Pubkey,
    name: &str,
    symbol: &str,
    decimals: u8,
) -> Instruction {
    build(
        program_id,
        owner,
        ledger,
        ElasticTokenInstruction::Initialize {
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals,
        },
    )
}

pub fn mint(
    program_id: &Pubkey,
    owner: &Pubkey,
    ledger: &Pubkey,
    account: &Pubkey,
    underlying_amount: u128,
) -> Instruction {
    build(
        program_id,
        owner,
        ledger,
        ElasticTokenInstruction::Mint {
            account: *account,
            underlying_amount,
        },
    )
}

pub fn burn(
    program_id: &Pubkey,
    owner: &Pubkey,
    ledger: &Pubkey,
    account: &Pubkey,
    underlying_amount: u128,
) -> Instruction {
    build(
        program_id,
        owner,
        ledger,
        ElasticTokenInstruction::Burn {
            account: *account,
            underlying_amount,
        },
    )
}

pub fn transfer(
    program_id: &Pubkey,
    sender: &Pubkey,
    ledger: &Pubkey,
    to: &Pubkey,
    amount: u128,
) -> Instruction {
    build(
        program_id,
        sender,
        ledger,
        ElasticTokenInstruction::Transfer { to: *to, amount },
    )
}

pub fn approve(
    program_id: &Pubkey,
    holder: &Pubkey,
    ledger: &Pubkey,
    spender: &Pubkey,
    amount: u128,
) -> Instruction {
    build(
        program_id,
        holder,
        ledger,
        ElasticTokenInstruction::Approve { spender: *spender, amount },
    )
}

pub fn increase_allowance(
    program_id: &Pubkey,
    holder: &Pubkey,
    ledger: &Pubkey,
    spender: &Pubkey,
    amount: u128,
) -> Instruction {
    build(
        program_id,
        holder,
        ledger,
        ElasticTokenInstruction::IncreaseAllowance { spender: *spender, amount },
    )
}

pub fn decrease_allowance(
    program_id: &Pubkey,
    holder: &Pubkey,
    ledger: &Pubkey,
    spender: &Pubkey,
    amount: u128,
) -> Instruction {
    build(
        program_id,
        holder,
        ledger,
        ElasticTokenInstruction::DecreaseAllowance { spender: *spender, amount },
    )
}

pub fn transfer_from(
    program_id: &Pubkey,
    spender: &Pubkey,
    ledger: &Pubkey,
    from: &Pubkey,
    to: &Pubkey,
    amount: u128,
) -> Instruction {
    build(
        program_id,
        spender,
        ledger,
        ElasticTokenInstruction::TransferFrom {
            from: *from,
            to: *to,
            amount,
        },
    )
}

pub fn set_rebaser(
    program_id: &Pubkey,
    owner: &Pubkey,
    ledger: &Pubkey,
    rebaser: &Pubkey,
) -> Instruction {
    build(
        program_id,
        owner,
        ledger,
        ElasticTokenInstruction::SetRebaser { rebaser: *rebaser },
    )
}

pub fn rebase(
    program_id: &Pubkey,
    rebaser: &Pubkey,
    ledger: &Pubkey,
    index_delta: u128,
    positive: bool,
) -> Instruction {
    build(
        program_id,
        rebaser,
        ledger,
        ElasticTokenInstruction::Rebase { index_delta, positive },
    )
}
