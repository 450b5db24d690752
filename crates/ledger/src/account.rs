use serde::{Deserialize, Serialize};

use tallyerp_core::{AccountId, Entity};

/// High-level account kind (determines normal balance side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

impl AccountKind {
    pub const ALL: [AccountKind; 5] = [
        AccountKind::Asset,
        AccountKind::Liability,
        AccountKind::Equity,
        AccountKind::Revenue,
        AccountKind::Expense,
    ];

    /// Whether a debit increases this account's balance.
    ///
    /// Asset and Expense accounts carry a debit-normal balance; Liability,
    /// Equity and Revenue accounts carry a credit-normal balance.
    pub fn increases_on_debit(self) -> bool {
        matches!(self, AccountKind::Asset | AccountKind::Expense)
    }
}

impl core::str::FromStr for AccountKind {
    type Err = tallyerp_core::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asset" => Ok(AccountKind::Asset),
            "liability" => Ok(AccountKind::Liability),
            "equity" => Ok(AccountKind::Equity),
            "revenue" => Ok(AccountKind::Revenue),
            "expense" => Ok(AccountKind::Expense),
            other => Err(tallyerp_core::DomainError::validation(format!(
                "unknown account kind '{other}'"
            ))),
        }
    }
}

/// A node in the chart of accounts.
///
/// `name` and `code` are unique across all accounts. Once `is_system` is set
/// (only the seeding path sets it), `name`, `code` and `kind` are immutable
/// and the account cannot be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String, // e.g. "Cash"
    pub code: String, // e.g. "1000"
    pub kind: AccountKind,
    pub description: String,
    pub is_active: bool,
    pub is_system: bool,
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Input for creating an account. Callers can never request `is_system`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    pub name: String,
    pub code: String,
    pub kind: AccountKind,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Partial update of an account. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub name: Option<String>,
    pub code: Option<String>,
    pub kind: Option<AccountKind>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Well-known account roles the event poster books against.
///
/// Roles replace by-name string lookups at posting time: they are resolved
/// once (at bootstrap) into stable account ids, and seeding fails hard if a
/// role cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Cash,
    AccountsReceivable,
    Inventory,
    AccountsPayable,
    SalesTaxPayable,
    SalesRevenue,
    CostOfGoodsSold,
}

impl AccountRole {
    pub const ALL: [AccountRole; 7] = [
        AccountRole::Cash,
        AccountRole::AccountsReceivable,
        AccountRole::Inventory,
        AccountRole::AccountsPayable,
        AccountRole::SalesTaxPayable,
        AccountRole::SalesRevenue,
        AccountRole::CostOfGoodsSold,
    ];

    /// Display name of the seeded account (also the registry lookup key).
    pub fn display_name(self) -> &'static str {
        match self {
            AccountRole::Cash => "Cash",
            AccountRole::AccountsReceivable => "Accounts Receivable",
            AccountRole::Inventory => "Inventory",
            AccountRole::AccountsPayable => "Accounts Payable",
            AccountRole::SalesTaxPayable => "Sales Tax Payable",
            AccountRole::SalesRevenue => "Sales Revenue",
            AccountRole::CostOfGoodsSold => "Cost of Goods Sold",
        }
    }

    /// Default account code used when seeding creates the account.
    pub fn default_code(self) -> &'static str {
        match self {
            AccountRole::Cash => "1000",
            AccountRole::AccountsReceivable => "1200",
            AccountRole::Inventory => "1400",
            AccountRole::AccountsPayable => "2000",
            AccountRole::SalesTaxPayable => "2200",
            AccountRole::SalesRevenue => "4000",
            AccountRole::CostOfGoodsSold => "5000",
        }
    }

    pub fn kind(self) -> AccountKind {
        match self {
            AccountRole::Cash | AccountRole::AccountsReceivable | AccountRole::Inventory => {
                AccountKind::Asset
            }
            AccountRole::AccountsPayable | AccountRole::SalesTaxPayable => AccountKind::Liability,
            AccountRole::SalesRevenue => AccountKind::Revenue,
            AccountRole::CostOfGoodsSold => AccountKind::Expense,
        }
    }
}

impl core::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_balance_side_per_kind() {
        assert!(AccountKind::Asset.increases_on_debit());
        assert!(AccountKind::Expense.increases_on_debit());
        assert!(!AccountKind::Liability.increases_on_debit());
        assert!(!AccountKind::Equity.increases_on_debit());
        assert!(!AccountKind::Revenue.increases_on_debit());
    }

    #[test]
    fn account_kind_parses_case_insensitively() {
        assert_eq!("Asset".parse::<AccountKind>().unwrap(), AccountKind::Asset);
        assert_eq!(
            "revenue".parse::<AccountKind>().unwrap(),
            AccountKind::Revenue
        );
        assert!("cashflow".parse::<AccountKind>().is_err());
    }

    #[test]
    fn roles_cover_the_seven_well_known_accounts() {
        let names: Vec<_> = AccountRole::ALL.iter().map(|r| r.display_name()).collect();
        assert_eq!(names.len(), 7);
        assert!(names.contains(&"Accounts Receivable"));
        assert!(names.contains(&"Sales Tax Payable"));
    }
}
