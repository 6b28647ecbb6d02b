pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParsePieceSeedError {
    #[display("invalid piece seed: expected 32 hex digits, got {_0}")]
    InvalidLength(#[error(not(source))] usize),
    #[display("invalid piece seed: {_0:?} is not a hex number")]
    InvalidDigit(#[error(not(source))] String),
}
