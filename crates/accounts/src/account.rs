use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use minibank_core::{Aggregate, AggregateRoot, AccountId, DomainError, Event, InterestRate, Money};

/// Balance a savings account must retain after any withdrawal.
pub const SAVINGS_MINIMUM_BALANCE: Money = Money::from_units(100);

/// Account kind, carrying the variant-specific terms.
///
/// A closed set: every account is either a savings account (with an interest
/// rate that is stored and displayed, never compounded here) or a checking
/// account (with an overdraft limit). The withdrawal policy lives with the
/// kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccountKind {
    Savings { interest_rate: InterestRate },
    Checking { overdraft_limit: Money },
}

impl AccountKind {
    /// Human-readable account type label.
    pub fn label(&self) -> &'static str {
        match self {
            AccountKind::Savings { .. } => "Savings Account",
            AccountKind::Checking { .. } => "Checking Account",
        }
    }

    pub fn is_savings(&self) -> bool {
        matches!(self, AccountKind::Savings { .. })
    }

    pub fn is_checking(&self) -> bool {
        matches!(self, AccountKind::Checking { .. })
    }

    /// Variant withdrawal policy: decide whether `amount` may leave an
    /// account currently holding `balance`.
    ///
    /// Savings must keep [`SAVINGS_MINIMUM_BALANCE`] after the withdrawal;
    /// checking may go negative down to its overdraft limit.
    fn check_withdrawal(&self, balance: Money, amount: Money) -> Result<(), DomainError> {
        match self {
            AccountKind::Savings { .. } => {
                if balance.checked_sub(amount)? < SAVINGS_MINIMUM_BALANCE {
                    return Err(DomainError::invariant(
                        "withdrawal not possible, minimum balance must be maintained",
                    ));
                }
            }
            AccountKind::Checking { overdraft_limit } => {
                if amount > balance.checked_add(*overdraft_limit)? {
                    return Err(DomainError::invariant(
                        "withdrawal not possible, amount exceeds overdraft limit",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Aggregate root: a bank account (savings or checking).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    holder: String,
    balance: Money,
    kind: AccountKind,
    version: u64,
    opened: bool,
}

impl Account {
    /// Create an empty, not-yet-opened aggregate instance for rehydration.
    pub fn empty(id: AccountId) -> Self {
        Self {
            id,
            holder: String::new(),
            balance: Money::ZERO,
            kind: AccountKind::Checking {
                overdraft_limit: Money::ZERO,
            },
            version: 0,
            opened: false,
        }
    }

    pub fn account_id(&self) -> &AccountId {
        &self.id
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn is_open(&self) -> bool {
        self.opened
    }

    /// Multi-line summary for console display: type label, id, holder,
    /// balance, and the variant-specific terms. Pure read.
    pub fn describe(&self) -> String {
        let mut lines = vec![
            format!("Account Details for {} (ID: {}):", self.kind.label(), self.id),
            format!("   Holder: {}", self.holder),
            format!("   Balance: {}", self.balance),
        ];
        lines.push(match self.kind {
            AccountKind::Savings { interest_rate } => {
                format!("   Interest Rate: {interest_rate}")
            }
            AccountKind::Checking { overdraft_limit } => {
                format!("   Overdraft Limit: {overdraft_limit}")
            }
        });
        lines.join("\n")
    }
}

impl AggregateRoot for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: OpenAccount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAccount {
    pub account_id: AccountId,
    pub holder: String,
    pub kind: AccountKind,
    pub initial_balance: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DepositFunds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositFunds {
    pub account_id: AccountId,
    /// Caller-supplied transaction id (audit handle; keeps `handle` pure).
    pub txn_id: Uuid,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Command: WithdrawFunds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawFunds {
    pub account_id: AccountId,
    pub txn_id: Uuid,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountCommand {
    OpenAccount(OpenAccount),
    DepositFunds(DepositFunds),
    WithdrawFunds(WithdrawFunds),
}

/// Event: AccountOpened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountOpened {
    pub account_id: AccountId,
    pub holder: String,
    pub kind: AccountKind,
    pub initial_balance: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Event: FundsDeposited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundsDeposited {
    pub account_id: AccountId,
    pub txn_id: Uuid,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Event: FundsWithdrawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundsWithdrawn {
    pub account_id: AccountId,
    pub txn_id: Uuid,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountEvent {
    AccountOpened(AccountOpened),
    FundsDeposited(FundsDeposited),
    FundsWithdrawn(FundsWithdrawn),
}

impl Event for AccountEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AccountEvent::AccountOpened(_) => "accounts.account.opened",
            AccountEvent::FundsDeposited(_) => "accounts.account.funds_deposited",
            AccountEvent::FundsWithdrawn(_) => "accounts.account.funds_withdrawn",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            AccountEvent::AccountOpened(e) => e.occurred_at,
            AccountEvent::FundsDeposited(e) => e.occurred_at,
            AccountEvent::FundsWithdrawn(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Account {
    type Command = AccountCommand;
    type Event = AccountEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            AccountEvent::AccountOpened(e) => {
                self.id = e.account_id.clone();
                self.holder = e.holder.clone();
                self.kind = e.kind;
                self.balance = e.initial_balance;
                self.opened = true;
            }
            AccountEvent::FundsDeposited(e) => {
                self.balance = self.balance.saturating_add(e.amount);
            }
            AccountEvent::FundsWithdrawn(e) => {
                self.balance = self.balance.saturating_sub(e.amount);
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            AccountCommand::OpenAccount(cmd) => self.handle_open(cmd),
            AccountCommand::DepositFunds(cmd) => self.handle_deposit(cmd),
            AccountCommand::WithdrawFunds(cmd) => self.handle_withdraw(cmd),
        }
    }
}

impl Account {
    fn ensure_open(&self) -> Result<(), DomainError> {
        if !self.opened {
            return Err(DomainError::not_found());
        }
        Ok(())
    }

    fn ensure_account_id(&self, account_id: &AccountId) -> Result<(), DomainError> {
        if &self.id != account_id {
            return Err(DomainError::invariant("account_id mismatch"));
        }
        Ok(())
    }

    fn handle_open(&self, cmd: &OpenAccount) -> Result<Vec<AccountEvent>, DomainError> {
        if self.opened {
            return Err(DomainError::conflict("account already exists"));
        }

        if cmd.holder.trim().is_empty() {
            return Err(DomainError::validation("holder name cannot be empty"));
        }

        if cmd.initial_balance.is_negative() {
            return Err(DomainError::validation("initial balance cannot be negative"));
        }

        if let AccountKind::Checking { overdraft_limit } = cmd.kind {
            if overdraft_limit.is_negative() {
                return Err(DomainError::validation("overdraft limit cannot be negative"));
            }
        }

        Ok(vec![AccountEvent::AccountOpened(AccountOpened {
            account_id: cmd.account_id.clone(),
            holder: cmd.holder.clone(),
            kind: cmd.kind,
            initial_balance: cmd.initial_balance,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_deposit(&self, cmd: &DepositFunds) -> Result<Vec<AccountEvent>, DomainError> {
        self.ensure_open()?;
        self.ensure_account_id(&cmd.account_id)?;

        if cmd.amount.is_negative() {
            return Err(DomainError::validation("deposit amount cannot be negative"));
        }

        // Deposits are otherwise unconditional; only reject an unrepresentable balance.
        self.balance.checked_add(cmd.amount)?;

        Ok(vec![AccountEvent::FundsDeposited(FundsDeposited {
            account_id: cmd.account_id.clone(),
            txn_id: cmd.txn_id,
            amount: cmd.amount,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_withdraw(&self, cmd: &WithdrawFunds) -> Result<Vec<AccountEvent>, DomainError> {
        self.ensure_open()?;
        self.ensure_account_id(&cmd.account_id)?;

        if cmd.amount.is_negative() {
            return Err(DomainError::validation(
                "withdrawal amount cannot be negative",
            ));
        }

        self.kind.check_withdrawal(self.balance, cmd.amount)?;

        Ok(vec![AccountEvent::FundsWithdrawn(FundsWithdrawn {
            account_id: cmd.account_id.clone(),
            txn_id: cmd.txn_id,
            amount: cmd.amount,
            occurred_at: cmd.occurred_at,
        })])
    }
}
