use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
};
use std::collections::BTreeMap;

use crate::{
    constants::{INITIAL_SCALING_FACTOR, LEDGER_DISCRIMINATOR, MAX_NAME_LEN, MAX_SYMBOL_LEN},
    error::{ElasticTokenError, LedgerResult},
    events::{EventSink, TokenEvent},
    math::scaling,
};

/// Elastic supply ledger
///
/// Balances are held in underlying units and never move on a rebase; the
/// scaling factor turns them into the value units every public amount is
/// expressed in. Allowances are plain value amounts and are not rescaled.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct ScalingLedger {
    /// Account discriminator
    pub discriminator: [u8; 8],

    /// Is initialized flag
    pub is_initialized: bool,

    owner: Pubkey,
    rebaser: Option<Pubkey>,

    name: String,
    symbol: String,
    decimals: u8,

    /// Fixed point with 24 decimals (1e24 = 1.0)
    scaling_factor: u128,

    /// Sum of all underlying balances
    init_supply: u128,

    balances: BTreeMap<Pubkey, u128>,
    allowances: BTreeMap<(Pubkey, Pubkey), u128>,
}

impl ScalingLedger {
    /// Serialized size of everything but the two maps
    pub const HEADER_LEN: usize = 8 + // discriminator
        1 + // is_initialized
        32 + // owner
        1 + 32 + // rebaser
        4 + MAX_NAME_LEN + // name
        4 + MAX_SYMBOL_LEN + // symbol
        1 + // decimals
        16 + // scaling_factor
        16 + // init_supply
        4 + // balances length
        4; // allowances length

    pub const BALANCE_ENTRY_LEN: usize = 32 + 16;
    pub const ALLOWANCE_ENTRY_LEN: usize = 32 + 32 + 16;

    pub fn new(owner: Pubkey, name: String, symbol: String, decimals: u8) -> LedgerResult<Self> {
        if name.is_empty() || name.len() > MAX_NAME_LEN || symbol.is_empty() || symbol.len() > MAX_SYMBOL_LEN {
            return Err(ElasticTokenError::InvalidTokenMetadata);
        }

        Ok(Self {
            discriminator: LEDGER_DISCRIMINATOR,
            is_initialized: true,
            owner,
            rebaser: None,
            name,
            symbol,
            decimals,
            scaling_factor: INITIAL_SCALING_FACTOR,
            init_supply: 0,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
        })
    }

    /// Account size needed to hold `holders` balances and `approvals` allowances
    pub fn space_for(holders: usize, approvals: usize) -> usize {
        Self::HEADER_LEN
            + holders * Self::BALANCE_ENTRY_LEN
            + approvals * Self::ALLOWANCE_ENTRY_LEN
    }

    /// Decode from account data. Trailing bytes are ignored.
    pub fn unpack(data: &[u8]) -> Result<Self, ProgramError> {
        Self::deserialize(&mut &data[..]).map_err(|_| ProgramError::InvalidAccountData)
    }

    pub fn pack_into(&self, data: &mut [u8]) -> Result<(), ProgramError> {
        let bytes = self
            .try_to_vec()
            .map_err(|e| ProgramError::BorshIoError(e.to_string()))?;
        if bytes.len() > data.len() {
            msg!("Ledger needs {} bytes, account holds {}", bytes.len(), data.len());
            return Err(ProgramError::AccountDataTooSmall);
        }
        data[..bytes.len()].copy_from_slice(&bytes);
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.is_initialized && self.discriminator == LEDGER_DISCRIMINATOR
    }

    // Accessors

    pub fn owner(&self) -> &Pubkey {
        &self.owner
    }

    pub fn rebaser(&self) -> Option<&Pubkey> {
        self.rebaser.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn scaling_factor(&self) -> u128 {
        self.scaling_factor
    }

    pub fn max_scaling_factor(&self) -> u128 {
        scaling::max_scaling_factor(self.init_supply)
    }

    pub fn init_supply(&self) -> u128 {
        self.init_supply
    }

    /// Value-space supply, derived on every read
    pub fn total_supply(&self) -> LedgerResult<u128> {
        self.underlying_to_value(self.init_supply)
    }

    pub fn balance_of(&self, account: &Pubkey) -> LedgerResult<u128> {
        self.underlying_to_value(self.balance_of_underlying(account))
    }

    pub fn balance_of_underlying(&self, account: &Pubkey) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> u128 {
        self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0)
    }

    pub fn holder_count(&self) -> usize {
        self.balances.len()
    }

    pub fn allowance_count(&self) -> usize {
        self.allowances.len()
    }

    pub fn underlying_to_value(&self, underlying: u128) -> LedgerResult<u128> {
        scaling::underlying_to_value(underlying, self.scaling_factor)
    }

    pub fn value_to_underlying(&self, value: u128) -> LedgerResult<u128> {
        scaling::value_to_underlying(value, self.scaling_factor)
    }

    // Supply

    pub fn mint(
        &mut self,
        account: &Pubkey,
        underlying_amount: u128,
        sink: &mut impl EventSink,
    ) -> LedgerResult<()> {
        if *account == Pubkey::default() {
            return Err(ElasticTokenError::InvalidRecipient);
        }

        let value = self.underlying_to_value(underlying_amount)?;
        let new_supply = self.init_supply
            .checked_add(underlying_amount)
            .ok_or(ElasticTokenError::ArithmeticOverflow)?;
        let new_balance = self.balance_of_underlying(account)
            .checked_add(underlying_amount)
            .ok_or(ElasticTokenError::ArithmeticOverflow)?;

        // The current factor has to stay representable for the larger supply
        if self.scaling_factor > scaling::max_scaling_factor(new_supply) {
            return Err(ElasticTokenError::ArithmeticOverflow);
        }

        self.init_supply = new_supply;
        self.set_balance(account, new_balance);

        msg!("Minted {} underlying ({} value) to {}", underlying_amount, value, account);

        sink.emit(TokenEvent::Transfer {
            from: Pubkey::default(),
            to: *account,
            amount: value,
        });
        Ok(())
    }

    pub fn burn(
        &mut self,
        account: &Pubkey,
        underlying_amount: u128,
        sink: &mut impl EventSink,
    ) -> LedgerResult<()> {
        if *account == Pubkey::default() {
            return Err(ElasticTokenError::InvalidRecipient);
        }

        let balance = self.balance_of_underlying(account);
        if balance < underlying_amount {
            return Err(ElasticTokenError::InsufficientBalance);
        }

        let value = self.underlying_to_value(underlying_amount)?;
        self.init_supply = self.init_supply
            .checked_sub(underlying_amount)
            .ok_or(ElasticTokenError::ArithmeticOverflow)?;
        self.set_balance(account, balance - underlying_amount);

        msg!("Burned {} underlying ({} value) from {}", underlying_amount, value, account);

        sink.emit(TokenEvent::Transfer {
            from: *account,
            to: Pubkey::default(),
            amount: value,
        });
        Ok(())
    }

    // Transfers

    pub fn transfer(
        &mut self,
        sender: &Pubkey,
        to: &Pubkey,
        value_amount: u128,
        sink: &mut impl EventSink,
    ) -> LedgerResult<()> {
        if *to == Pubkey::default() {
            return Err(ElasticTokenError::InvalidRecipient);
        }

        let underlying = scaling::value_to_underlying_ceil(value_amount, self.scaling_factor)?;
        self.move_underlying(sender, to, underlying)?;

        sink.emit(TokenEvent::Transfer {
            from: *sender,
            to: *to,
            amount: value_amount,
        });
        Ok(())
    }

    pub fn transfer_from(
        &mut self,
        spender: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        value_amount: u128,
        sink: &mut impl EventSink,
    ) -> LedgerResult<()> {
        if *from == Pubkey::default() || *to == Pubkey::default() {
            return Err(ElasticTokenError::InvalidRecipient);
        }

        let allowance = self.allowance(from, spender);
        if allowance < value_amount {
            return Err(ElasticTokenError::InsufficientAllowance);
        }

        let underlying = scaling::value_to_underlying_ceil(value_amount, self.scaling_factor)?;
        if self.balance_of_underlying(from) < underlying {
            return Err(ElasticTokenError::InsufficientBalance);
        }

        self.set_allowance(from, spender, allowance - value_amount);
        self.move_underlying(from, to, underlying)?;

        sink.emit(TokenEvent::Transfer {
            from: *from,
            to: *to,
            amount: value_amount,
        });
        Ok(())
    }

    fn move_underlying(&mut self, from: &Pubkey, to: &Pubkey, underlying: u128) -> LedgerResult<()> {
        let from_balance = self.balance_of_underlying(from);
        if from_balance < underlying {
            return Err(ElasticTokenError::InsufficientBalance);
        }
        if from == to {
            return Ok(());
        }

        let to_balance = self.balance_of_underlying(to)
            .checked_add(underlying)
            .ok_or(ElasticTokenError::ArithmeticOverflow)?;

        self.set_balance(from, from_balance - underlying);
        self.set_balance(to, to_balance);
        Ok(())
    }

    // Allowances

    pub fn approve(
        &mut self,
        owner: &Pubkey,
        spender: &Pubkey,
        value_amount: u128,
        sink: &mut impl EventSink,
    ) -> LedgerResult<()> {
        self.set_allowance(owner, spender, value_amount);
        sink.emit(TokenEvent::Approval {
            owner: *owner,
            spender: *spender,
            amount: value_amount,
        });
        Ok(())
    }

    pub fn increase_allowance(
        &mut self,
        owner: &Pubkey,
        spender: &Pubkey,
        delta: u128,
        sink: &mut impl EventSink,
    ) -> LedgerResult<()> {
        let allowance = self.allowance(owner, spender)
            .checked_add(delta)
            .ok_or(ElasticTokenError::ArithmeticOverflow)?;
        self.approve(owner, spender, allowance, sink)
    }

    pub fn decrease_allowance(
        &mut self,
        owner: &Pubkey,
        spender: &Pubkey,
        delta: u128,
        sink: &mut impl EventSink,
    ) -> LedgerResult<()> {
        let allowance = self.allowance(owner, spender)
            .checked_sub(delta)
            .ok_or(ElasticTokenError::InsufficientAllowance)?;
        self.approve(owner, spender, allowance, sink)
    }

    // Rebase

    pub fn set_rebaser(&mut self, caller: &Pubkey, rebaser: Pubkey) -> LedgerResult<()> {
        if *caller != self.owner {
            return Err(ElasticTokenError::NotOwner);
        }
        self.rebaser = Some(rebaser);
        msg!("Rebaser set to {}", rebaser);
        Ok(())
    }

    /// Move the scaling factor by `index_delta` (18 decimals) of itself.
    ///
    /// Returns the new scaling factor. Upward moves stop at
    /// [`Self::max_scaling_factor`].
    pub fn rebase(
        &mut self,
        caller: &Pubkey,
        index_delta: u128,
        positive: bool,
        epoch: i64,
        sink: &mut impl EventSink,
    ) -> LedgerResult<u128> {
        if self.rebaser != Some(*caller) {
            return Err(ElasticTokenError::NotAllowed);
        }
        if self.init_supply == 0 && index_delta != 0 {
            return Err(ElasticTokenError::DegenerateRebase);
        }

        let prev_scaling_factor = self.scaling_factor;
        let delta = match scaling::rebase_delta(prev_scaling_factor, index_delta) {
            Ok(delta) => delta,
            // Too large for u128 still means "raise to the cap"
            Err(_) if positive => u128::MAX,
            Err(e) => return Err(e),
        };

        let new_scaling_factor = if positive {
            let max = self.max_scaling_factor();
            let raised = prev_scaling_factor.saturating_add(delta);
            if raised > max {
                msg!("Scaling factor capped at {}", max);
            }
            raised.min(max)
        } else {
            let lowered = prev_scaling_factor
                .checked_sub(delta)
                .ok_or(ElasticTokenError::ArithmeticOverflow)?;
            if lowered == 0 {
                return Err(ElasticTokenError::DegenerateRebase);
            }
            lowered
        };

        self.scaling_factor = new_scaling_factor;

        msg!(
            "Rebase at {}: scaling factor {} -> {}",
            epoch,
            prev_scaling_factor,
            new_scaling_factor
        );

        sink.emit(TokenEvent::Rebase {
            epoch,
            prev_scaling_factor,
            new_scaling_factor,
        });
        Ok(new_scaling_factor)
    }

    fn set_balance(&mut self, account: &Pubkey, underlying: u128) {
        if underlying == 0 {
            self.balances.remove(account);
        } else {
            self.balances.insert(*account, underlying);
        }
    }

    fn set_allowance(&mut self, owner: &Pubkey, spender: &Pubkey, value: u128) {
        if value == 0 {
            self.allowances.remove(&(*owner, *spender));
        } else {
            self.allowances.insert((*owner, *spender), value);
        }
    }
}
