//! The scripted demo scenario.

use std::io::Write;

use chrono::Utc;
use uuid::Uuid;

use minibank_accounts::{
    transfer, Account, AccountCommand, AccountKind, DepositFunds, OpenAccount, WithdrawFunds,
    TRANSFER_AMOUNT,
};
use minibank_core::{AccountId, Aggregate, InterestRate, Money};

/// Run the fixed demo sequence, writing the report to `out`.
///
/// Opens a savings and a checking account, shows both, deposits into savings
/// and withdraws from checking, shows both again, then moves the standard
/// transfer amount from savings to checking and shows the final state.
/// Rejected operations are written to the report and the script continues.
pub fn run(out: &mut dyn Write) -> anyhow::Result<()> {
    let mut savings = open_account(
        "S123",
        "John Doe",
        Money::from_units(1_000),
        AccountKind::Savings {
            interest_rate: InterestRate::from_basis_points(200)?,
        },
    )?;
    let mut checking = open_account(
        "C456",
        "Jane Doe",
        Money::from_units(2_000),
        AccountKind::Checking {
            overdraft_limit: Money::from_units(500),
        },
    )?;

    show(&savings, &checking, out)?;

    let deposit_cmd = deposit(&savings, Money::from_units(500));
    execute(&mut savings, deposit_cmd, out)?;
    let withdraw_cmd = withdraw(&checking, Money::from_units(1_000));
    execute(&mut checking, withdraw_cmd, out)?;

    writeln!(out, "Account Details after deposit and withdrawal:")?;
    show(&savings, &checking, out)?;

    match transfer(
        &savings,
        &checking,
        TRANSFER_AMOUNT,
        Uuid::now_v7(),
        Utc::now(),
    ) {
        Ok(events) => {
            for e in &events.savings {
                savings.apply(e);
            }
            for e in &events.checking {
                checking.apply(e);
            }
            tracing::debug!(amount = %TRANSFER_AMOUNT, "transfer applied");
        }
        Err(rejection) => {
            tracing::debug!(%rejection, "transfer rejected");
            writeln!(out, "{rejection}")?;
        }
    }

    writeln!(out, "Account Details after transfer:")?;
    show(&savings, &checking, out)?;

    Ok(())
}

fn open_account(
    code: &str,
    holder: &str,
    initial_balance: Money,
    kind: AccountKind,
) -> anyhow::Result<Account> {
    let account_id = AccountId::new(code)?;
    let mut account = Account::empty(account_id.clone());
    let events = account.handle(&AccountCommand::OpenAccount(OpenAccount {
        account_id,
        holder: holder.to_string(),
        kind,
        initial_balance,
        occurred_at: Utc::now(),
    }))?;
    for e in &events {
        account.apply(e);
    }
    tracing::debug!(account = %account.account_id(), "account opened");
    Ok(account)
}

fn deposit(account: &Account, amount: Money) -> AccountCommand {
    AccountCommand::DepositFunds(DepositFunds {
        account_id: account.account_id().clone(),
        txn_id: Uuid::now_v7(),
        amount,
        occurred_at: Utc::now(),
    })
}

fn withdraw(account: &Account, amount: Money) -> AccountCommand {
    AccountCommand::WithdrawFunds(WithdrawFunds {
        account_id: account.account_id().clone(),
        txn_id: Uuid::now_v7(),
        amount,
        occurred_at: Utc::now(),
    })
}

/// Apply the command if accepted; report the rejection and continue if not.
fn execute(
    account: &mut Account,
    command: AccountCommand,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match account.handle(&command) {
        Ok(events) => {
            for e in &events {
                account.apply(e);
            }
        }
        Err(rejection) => {
            tracing::debug!(account = %account.account_id(), %rejection, "command rejected");
            writeln!(out, "{rejection}")?;
        }
    }
    Ok(())
}

fn show(savings: &Account, checking: &Account, out: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(out, "{}", savings.describe())?;
    writeln!(out)?;
    writeln!(out, "{}", checking.describe())?;
    writeln!(out)?;
    Ok(())
}
