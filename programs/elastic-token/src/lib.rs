// Elastic supply token for the volatility index platform
// Native Solana implementation - NO ANCHOR

use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    msg,
    pubkey::Pubkey,
};

pub mod constants;
pub mod error;
pub mod events;
pub mod instruction;
pub mod math;
pub mod processor;
pub mod state;

use crate::processor::Processor;

solana_program::declare_id!("E1ast1cToken11111111111111111111111111111111");

#[cfg(not(feature = "no-entrypoint"))]
solana_program::entrypoint!(process);

pub fn process(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    msg!("Elastic Token Program entrypoint");
    Processor::process(program_id, accounts, instruction_data)
}
