//! Accounts domain module (savings and checking accounts).
//!
//! This crate contains the business rules for deposits, withdrawals, and the
//! savings-to-checking transfer, implemented purely as deterministic domain
//! logic (no IO, no HTTP, no storage).

pub mod account;
pub mod transfer;

pub use account::{
    Account, AccountCommand, AccountEvent, AccountKind, AccountOpened, DepositFunds,
    FundsDeposited, FundsWithdrawn, OpenAccount, WithdrawFunds, SAVINGS_MINIMUM_BALANCE,
};
pub use transfer::{transfer, TransferEvents, TRANSFER_AMOUNT};
