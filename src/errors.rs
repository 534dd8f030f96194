use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FinanceError {
    #[error("invalid money literal: {input}")]
    ParseMoney {
        input: String,
    },

    #[error("invalid percentage literal: {input}")]
    ParsePercentage {
        input: String,
    },

    #[error("invalid loan terms: {message}")]
    InvalidLoanTerms {
        message: String,
    },

    #[error("invalid balloon term: {balloon_term_months} months on a {term_months} month loan")]
    InvalidBalloonTerm {
        balloon_term_months: u32,
        term_months: u32,
    },

    #[error("no loan options to compare")]
    NoLoanOptions,
}

pub type Result<T> = std::result::Result<T, FinanceError>;
