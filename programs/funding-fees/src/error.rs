use num_derive::FromPrimitive;
use solana_program::{
    decode_error::DecodeError,
    program_error::{PrintProgramError, ProgramError},
};
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, FromPrimitive, PartialEq, Eq)]
pub enum FundingFeeError {
    #[error("CVI value out of range")]
    InvalidCviValue = 0,

    #[error("Heartbeat must be positive")]
    InvalidHeartbeat = 1,

    #[error("Division by zero")]
    DivisionByZero = 2,

    #[error("Arithmetic overflow")]
    ArithmeticOverflow = 3,
}

/// Result of a fee computation
pub type FeeResult<T> = Result<T, FundingFeeError>;

impl PrintProgramError for FundingFeeError {
    fn print<E>(&self) {
        use solana_program::msg;
        msg!("FundingFeeError: {}", self);
    }
}

impl From<FundingFeeError> for ProgramError {
    fn from(e: FundingFeeError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for FundingFeeError {
    fn type_of() -> &'static str {
        "FundingFeeError"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    #[test]
    fn test_error_codes() {
        let err: ProgramError = FundingFeeError::DivisionByZero.into();
        assert_eq!(err, ProgramError::Custom(2));
        assert_eq!(FundingFeeError::from_u32(0), Some(FundingFeeError::InvalidCviValue));
        assert_eq!(FundingFeeError::from_u32(4), None);
    }
}
