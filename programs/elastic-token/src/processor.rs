use solana_program::{
    account_info::{next_account_info, AccountInfo},
    clock::{Clock, UnixTimestamp},
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
    sysvar::Sysvar,
};

use crate::{
    error::ElasticTokenError,
    events::{EventSink, ProgramLogSink, TokenEvent},
    instruction::ElasticTokenInstruction,
    state::ScalingLedger,
};

pub struct Processor;

impl Processor {
    pub fn process(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        instruction_data: &[u8],
    ) -> ProgramResult {
        let instruction = ElasticTokenInstruction::unpack(instruction_data)?;

        let account_info_iter = &mut accounts.iter();
        let caller_info = next_account_info(account_info_iter)?;
        let ledger_info = next_account_info(account_info_iter)?;

        if !caller_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }
        if ledger_info.owner != program_id {
            return Err(ElasticTokenError::InvalidAccountOwner.into());
        }
        if !ledger_info.is_writable {
            return Err(ProgramError::InvalidAccountData);
        }

        let mut ledger = ScalingLedger::unpack(&ledger_info.data.borrow()[..])?;

        if let ElasticTokenInstruction::Initialize { name, symbol, decimals } = instruction {
            msg!("Instruction: Initialize");
            if ledger.is_valid() {
                return Err(ElasticTokenError::AccountAlreadyInitialized.into());
            }
            let ledger = ScalingLedger::new(*caller_info.key, name, symbol, decimals)?;
            ledger.pack_into(&mut ledger_info.data.borrow_mut()[..])?;
            msg!("Ledger {} initialized for {} ({})", ledger_info.key, ledger.name(), ledger.symbol());
            return Ok(());
        }

        if !ledger.is_valid() {
            return Err(ElasticTokenError::AccountNotInitialized.into());
        }

        let epoch = match instruction {
            ElasticTokenInstruction::Rebase { .. } => Clock::get()?.unix_timestamp,
            _ => 0,
        };

        let mut events: Vec<TokenEvent> = Vec::new();
        Self::apply(&mut ledger, caller_info.key, instruction, epoch, &mut events)?;

        // Nothing is written back or logged unless the operation succeeded
        ledger.pack_into(&mut ledger_info.data.borrow_mut()[..])?;

        let mut sink = ProgramLogSink::default();
        for event in events {
            sink.emit(event);
        }
        msg!("{} event(s) emitted", sink.emitted);
        Ok(())
    }

    /// Apply one instruction to an initialized ledger on behalf of `caller`.
    pub fn apply(
        ledger: &mut ScalingLedger,
        caller: &Pubkey,
        instruction: ElasticTokenInstruction,
        epoch: UnixTimestamp,
        sink: &mut impl EventSink,
    ) -> ProgramResult {
        match instruction {
            ElasticTokenInstruction::Initialize { .. } => {
                return Err(ElasticTokenError::AccountAlreadyInitialized.into());
            }

            ElasticTokenInstruction::Mint { account, underlying_amount } => {
                msg!("Instruction: Mint");
                Self::require_recipient(&account)?;
                Self::require_owner(ledger, caller)?;
                ledger.mint(&account, underlying_amount, sink)?;
            }

            ElasticTokenInstruction::Burn { account, underlying_amount } => {
                msg!("Instruction: Burn");
                Self::require_recipient(&account)?;
                Self::require_owner(ledger, caller)?;
                ledger.burn(&account, underlying_amount, sink)?;
            }

            ElasticTokenInstruction::Transfer { to, amount } => {
                msg!("Instruction: Transfer");
                ledger.transfer(caller, &to, amount, sink)?;
            }

            ElasticTokenInstruction::Approve { spender, amount } => {
                msg!("Instruction: Approve");
                ledger.approve(caller, &spender, amount, sink)?;
            }

            ElasticTokenInstruction::IncreaseAllowance { spender, amount } => {
                msg!("Instruction: IncreaseAllowance");
                ledger.increase_allowance(caller, &spender, amount, sink)?;
            }

            ElasticTokenInstruction::DecreaseAllowance { spender, amount } => {
                msg!("Instruction: DecreaseAllowance");
                ledger.decrease_allowance(caller, &spender, amount, sink)?;
            }

            ElasticTokenInstruction::TransferFrom { from, to, amount } => {
                msg!("Instruction: TransferFrom");
                ledger.transfer_from(caller, &from, &to, amount, sink)?;
            }

            ElasticTokenInstruction::SetRebaser { rebaser } => {
                msg!("Instruction: SetRebaser");
                ledger.set_rebaser(caller, rebaser)?;
            }

            ElasticTokenInstruction::Rebase { index_delta, positive } => {
                msg!("Instruction: Rebase");
                ledger.rebase(caller, index_delta, positive, epoch, sink)?;
            }
        }

        Ok(())
    }

    fn require_recipient(account: &Pubkey) -> Result<(), ElasticTokenError> {
        if *account == Pubkey::default() {
            return Err(ElasticTokenError::InvalidRecipient);
        }
        Ok(())
    }

    fn require_owner(ledger: &ScalingLedger, caller: &Pubkey) -> Result<(), ElasticTokenError> {
        if ledger.owner() != caller {
            msg!("Caller {} is not the ledger owner", caller);
            return Err(ElasticTokenError::NotOwner);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_with_owner() -> (ScalingLedger, Pubkey) {
        let owner = Pubkey::new_unique();
        let ledger = ScalingLedger::new(owner, "TestToken".to_string(), "ELT".to_string(), 18).unwrap();
        (ledger, owner)
    }

    #[test]
    fn test_mint_and_burn_are_owner_gated() {
        let (mut ledger, owner) = ledger_with_owner();
        let alice = Pubkey::new_unique();
        let mut events: Vec<TokenEvent> = Vec::new();

        let mint = ElasticTokenInstruction::Mint { account: alice, underlying_amount: 100 };
        assert_eq!(
            Processor::apply(&mut ledger, &alice, mint.clone(), 0, &mut events),
            Err(ElasticTokenError::NotOwner.into())
        );
        Processor::apply(&mut ledger, &owner, mint, 0, &mut events).unwrap();

        let burn = ElasticTokenInstruction::Burn { account: alice, underlying_amount: 40 };
        assert!(Processor::apply(&mut ledger, &alice, burn.clone(), 0, &mut events).is_err());
        Processor::apply(&mut ledger, &owner, burn, 0, &mut events).unwrap();

        assert_eq!(ledger.balance_of_underlying(&alice), 60);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_zero_account_is_rejected_before_owner_gate() {
        let (mut ledger, _owner) = ledger_with_owner();
        let stranger = Pubkey::new_unique();
        let mut events: Vec<TokenEvent> = Vec::new();

        let mint = ElasticTokenInstruction::Mint { account: Pubkey::default(), underlying_amount: 40 };
        assert_eq!(
            Processor::apply(&mut ledger, &stranger, mint, 0, &mut events),
            Err(ElasticTokenError::InvalidRecipient.into())
        );
        let burn = ElasticTokenInstruction::Burn { account: Pubkey::default(), underlying_amount: 40 };
        assert_eq!(
            Processor::apply(&mut ledger, &stranger, burn, 0, &mut events),
            Err(ElasticTokenError::InvalidRecipient.into())
        );
        assert!(events.is_empty());
    }

    #[test]
    fn test_rebase_uses_supplied_epoch() {
        let (mut ledger, owner) = ledger_with_owner();
        let mut events: Vec<TokenEvent> = Vec::new();

        Processor::apply(
            &mut ledger,
            &owner,
            ElasticTokenInstruction::SetRebaser { rebaser: owner },
            0,
            &mut events,
        )
        .unwrap();
        Processor::apply(
            &mut ledger,
            &owner,
            ElasticTokenInstruction::Rebase { index_delta: 0, positive: true },
            1_700_000_000,
            &mut events,
        )
        .unwrap();

        match &events[0] {
            TokenEvent::Rebase { epoch, prev_scaling_factor, new_scaling_factor } => {
                assert_eq!(*epoch, 1_700_000_000);
                assert_eq!(prev_scaling_factor, new_scaling_factor);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_initialize_on_live_ledger_fails() {
        let (mut ledger, owner) = ledger_with_owner();
        let mut events: Vec<TokenEvent> = Vec::new();
        let result = Processor::apply(
            &mut ledger,
            &owner,
            ElasticTokenInstruction::Initialize {
                name: "Again".to_string(),
                symbol: "AG".to_string(),
                decimals: 6,
            },
            0,
            &mut events,
        );
        assert_eq!(result, Err(ElasticTokenError::AccountAlreadyInitialized.into()));
    }
}
