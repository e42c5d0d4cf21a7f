use num_derive::FromPrimitive;
use solana_program::{
    decode_error::DecodeError,
    program_error::{PrintProgramError, ProgramError},
};
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, FromPrimitive, PartialEq, Eq)]
pub enum ElasticTokenError {
    #[error("Zero address")]
    InvalidRecipient = 0,

    #[error("Insufficient balance")]
    InsufficientBalance = 1,

    #[error("Insufficient allowance")]
    InsufficientAllowance = 2,

    #[error("Not allowed")]
    NotAllowed = 3,

    #[error("Ownable: caller is not the owner")]
    NotOwner = 4,

    #[error("Rebase of an empty supply")]
    DegenerateRebase = 5,

    #[error("Arithmetic overflow")]
    ArithmeticOverflow = 6,

    #[error("Invalid instruction")]
    InvalidInstruction = 7,

    #[error("Account not initialized")]
    AccountNotInitialized = 8,

    #[error("Account already initialized")]
    AccountAlreadyInitialized = 9,

    #[error("Invalid account owner")]
    InvalidAccountOwner = 10,

    #[error("Invalid token metadata")]
    InvalidTokenMetadata = 11,
}

/// Result of a ledger operation
pub type LedgerResult<T> = Result<T, ElasticTokenError>;

impl PrintProgramError for ElasticTokenError {
    fn print<E>(&self) {
        use solana_program::msg;
        msg!("ElasticTokenError: {}", self);
    }
}

impl From<ElasticTokenError> for ProgramError {
    fn from(e: ElasticTokenError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for ElasticTokenError {
    fn type_of() -> &'static str {
        "ElasticTokenError"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    #[test]
    fn test_error_codes_round_trip_through_program_error() {
        let err: ProgramError = ElasticTokenError::NotAllowed.into();
        assert_eq!(err, ProgramError::Custom(3));

        let decoded = ElasticTokenError::from_u32(3).unwrap();
        assert_eq!(decoded, ElasticTokenError::NotAllowed);
    }

    #[test]
    fn test_reason_strings_are_stable() {
        assert_eq!(ElasticTokenError::InvalidRecipient.to_string(), "Zero address");
        assert_eq!(ElasticTokenError::NotAllowed.to_string(), "Not allowed");
        assert_eq!(
            ElasticTokenError::NotOwner.to_string(),
            "Ownable: caller is not the owner"
        );
    }
}
