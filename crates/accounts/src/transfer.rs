//! Savings-to-checking transfer.
//!
//! A two-account operation decided entirely before anything is applied: the
//! savings withdrawal is decided first, through the savings account's own
//! withdrawal policy, and only then the checking deposit. Callers apply both
//! event sets together, so a rejected withdrawal leaves both accounts
//! untouched.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use minibank_core::{Aggregate, DomainError, Money};

use crate::account::{
    Account, AccountCommand, AccountEvent, DepositFunds, WithdrawFunds,
};

/// Amount moved by the scripted demo transfer.
pub const TRANSFER_AMOUNT: Money = Money::from_units(300);

/// Events for both sides of an accepted transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferEvents {
    pub savings: Vec<AccountEvent>,
    pub checking: Vec<AccountEvent>,
}

/// Decide a transfer of `amount` from a savings account to a checking
/// account.
///
/// Precondition: the savings balance covers the amount. The withdrawal is
/// then decided by the savings policy, which additionally holds the
/// minimum-balance floor, so a transfer can be rejected even when the raw
/// balance is sufficient. In that case no event is emitted for either side.
pub fn transfer(
    savings: &Account,
    checking: &Account,
    amount: Money,
    txn_id: Uuid,
    occurred_at: DateTime<Utc>,
) -> Result<TransferEvents, DomainError> {
    if !savings.kind().is_savings() {
        return Err(DomainError::validation(
            "transfer source must be a savings account",
        ));
    }
    if !checking.kind().is_checking() {
        return Err(DomainError::validation(
            "transfer destination must be a checking account",
        ));
    }

    if savings.balance() < amount {
        return Err(DomainError::invariant(
            "transfer not possible, insufficient funds in savings account",
        ));
    }

    let withdrawal = savings.handle(&AccountCommand::WithdrawFunds(WithdrawFunds {
        account_id: savings.account_id().clone(),
        txn_id,
        amount,
        occurred_at,
    }))?;

    let deposit = checking.handle(&AccountCommand::DepositFunds(DepositFunds {
        account_id: checking.account_id().clone(),
        txn_id,
        amount,
        occurred_at,
    }))?;

    Ok(TransferEvents {
        savings: withdrawal,
        checking: deposit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AccountKind, OpenAccount};
    use minibank_core::{AccountId, InterestRate};

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn open_savings(balance_units: i64) -> Account {
        open_account(
            "S123",
            "John Doe",
            balance_units,
            AccountKind::Savings {
                interest_rate: InterestRate::from_basis_points(200).unwrap(),
            },
        )
    }

    fn open_checking(balance_units: i64) -> Account {
        open_account(
            "C456",
            "Jane Doe",
            balance_units,
            AccountKind::Checking {
                overdraft_limit: Money::from_units(500),
            },
        )
    }

    fn open_account(code: &str, holder: &str, balance_units: i64, kind: AccountKind) -> Account {
        let id = AccountId::new(code).unwrap();
        let mut account = Account::empty(id.clone());
        let events = account
            .handle(&AccountCommand::OpenAccount(OpenAccount {
                account_id: id,
                holder: holder.to_string(),
                kind,
                initial_balance: Money::from_units(balance_units),
                occurred_at: test_time(),
            }))
            .unwrap();
        for e in &events {
            account.apply(e);
        }
        account
    }

    fn apply_all(account: &mut Account, events: &[AccountEvent]) {
        for e in events {
            account.apply(e);
        }
    }

    #[test]
    fn transfer_moves_the_amount_between_accounts() {
        let mut savings = open_savings(1_500);
        let mut checking = open_checking(1_000);

        let events = transfer(
            &savings,
            &checking,
            TRANSFER_AMOUNT,
            Uuid::now_v7(),
            test_time(),
        )
        .unwrap();
        apply_all(&mut savings, &events.savings);
        apply_all(&mut checking, &events.checking);

        assert_eq!(savings.balance(), Money::from_units(1_200));
        assert_eq!(checking.balance(), Money::from_units(1_300));
    }

    #[test]
    fn transfer_rejects_insufficient_savings_balance() {
        let savings = open_savings(250);
        let checking = open_checking(1_000);

        let err = transfer(
            &savings,
            &checking,
            TRANSFER_AMOUNT,
            Uuid::now_v7(),
            test_time(),
        )
        .unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) if msg.contains("insufficient funds") => {}
            _ => panic!("Expected insufficient-funds rejection"),
        }
        assert_eq!(savings.balance(), Money::from_units(250));
        assert_eq!(checking.balance(), Money::from_units(1_000));
    }

    #[test]
    fn transfer_is_rejected_when_the_savings_floor_would_break() {
        // 350 covers the amount, but 350 - 300 = 50 is below the savings
        // minimum balance, so the whole transfer is rejected and neither
        // side moves.
        let savings = open_savings(350);
        let checking = open_checking(1_000);

        let err = transfer(
            &savings,
            &checking,
            TRANSFER_AMOUNT,
            Uuid::now_v7(),
            test_time(),
        )
        .unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) if msg.contains("minimum balance") => {}
            _ => panic!("Expected minimum-balance rejection"),
        }
        assert_eq!(savings.balance(), Money::from_units(350));
        assert_eq!(checking.balance(), Money::from_units(1_000));
    }

    #[test]
    fn transfer_requires_savings_source_and_checking_destination() {
        let savings = open_savings(1_500);
        let checking = open_checking(1_000);

        let err = transfer(
            &checking,
            &savings,
            TRANSFER_AMOUNT,
            Uuid::now_v7(),
            test_time(),
        )
        .unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for swapped account kinds"),
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: a transfer either moves exactly the amount, keeping
            /// the combined balance constant, or moves nothing at all.
            #[test]
            fn transfer_conserves_the_combined_balance(
                savings_units in 0i64..5_000i64,
                checking_units in 0i64..5_000i64,
            ) {
                let mut savings = open_savings(savings_units);
                let mut checking = open_checking(checking_units);
                let total_before = savings.balance().saturating_add(checking.balance());

                match transfer(&savings, &checking, TRANSFER_AMOUNT, Uuid::now_v7(), test_time()) {
                    Ok(events) => {
                        apply_all(&mut savings, &events.savings);
                        apply_all(&mut checking, &events.checking);
                        prop_assert_eq!(
                            savings.balance(),
                            Money::from_units(savings_units).saturating_sub(TRANSFER_AMOUNT)
                        );
                        prop_assert_eq!(
                            checking.balance(),
                            Money::from_units(checking_units).saturating_add(TRANSFER_AMOUNT)
                        );
                    }
                    Err(_) => {
                        prop_assert_eq!(savings.balance(), Money::from_units(savings_units));
                        prop_assert_eq!(checking.balance(), Money::from_units(checking_units));
                    }
                }

                let total_after = savings.balance().saturating_add(checking.balance());
                prop_assert_eq!(total_before, total_after);
            }

            /// Property: transfers are accepted exactly when the savings
            /// balance covers both the amount and the minimum balance floor.
            #[test]
            fn transfer_acceptance_matches_the_savings_policy(
                savings_units in 0i64..1_000i64,
            ) {
                let savings = open_savings(savings_units);
                let checking = open_checking(1_000);

                let accepted = transfer(
                    &savings,
                    &checking,
                    TRANSFER_AMOUNT,
                    Uuid::now_v7(),
                    test_time(),
                )
                .is_ok();
                let balance = Money::from_units(savings_units);
                let expected = balance >= TRANSFER_AMOUNT
                    && balance.saturating_sub(TRANSFER_AMOUNT) >= crate::account::SAVINGS_MINIMUM_BALANCE;

                prop_assert_eq!(accepted, expected);
            }
        }
    }
}
