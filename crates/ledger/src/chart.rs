//! Chart of accounts registry.
//!
//! Accounts are created by administrators or by startup seeding of the
//! well-known system accounts. System accounts keep their `name`, `code` and
//! `kind` for life and can never be deleted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use tallyerp_core::{AccountId, DomainError, DomainResult};

use crate::account::{Account, AccountRole, AccountUpdate, NewAccount};

/// In-memory registry of accounts, keyed by id, unique by name and code.
#[derive(Debug, Default, Clone)]
pub struct ChartOfAccounts {
    accounts: HashMap<AccountId, Account>,
}

impl ChartOfAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a non-system account.
    ///
    /// Fails with `Duplicate` on a name or code collision and with
    /// `Validation` when a required field is empty.
    pub fn create(&mut self, new: NewAccount) -> DomainResult<Account> {
        let name = new.name.trim().to_string();
        let code = new.code.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("account name is required"));
        }
        if code.is_empty() {
            return Err(DomainError::validation("account code is required"));
        }
        self.ensure_unique(&name, &code, None)?;

        let account = Account {
            id: AccountId::new(),
            name,
            code,
            kind: new.kind,
            description: new.description,
            is_active: new.is_active,
            is_system: false,
        };
        self.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    /// Update an account.
    ///
    /// System accounts accept only `description`/`is_active` changes; an
    /// attempt to change `name`, `code` or `kind` fails with
    /// `ImmutableAccount`. Non-system accounts re-validate uniqueness of a
    /// changed name/code against all *other* accounts.
    pub fn update(&mut self, id: AccountId, update: AccountUpdate) -> DomainResult<Account> {
        let current = self.accounts.get(&id).ok_or(DomainError::NotFound)?.clone();

        if current.is_system {
            let protected_change = update.name.as_ref().is_some_and(|n| *n != current.name)
                || update.code.as_ref().is_some_and(|c| *c != current.code)
                || update.kind.is_some_and(|k| k != current.kind);
            if protected_change {
                return Err(DomainError::immutable(format!(
                    "name, code and kind of system account '{}' cannot be changed",
                    current.name
                )));
            }
        }

        let name = update.name.unwrap_or_else(|| current.name.clone());
        let code = update.code.unwrap_or_else(|| current.code.clone());
        let name = name.trim().to_string();
        let code = code.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("account name is required"));
        }
        if code.is_empty() {
            return Err(DomainError::validation("account code is required"));
        }
        if name != current.name || code != current.code {
            self.ensure_unique(&name, &code, Some(id))?;
        }

        let account = self
            .accounts
            .get_mut(&id)
            .ok_or(DomainError::NotFound)?;
        account.name = name;
        account.code = code;
        if let Some(kind) = update.kind {
            account.kind = kind;
        }
        if let Some(description) = update.description {
            account.description = description;
        }
        if let Some(is_active) = update.is_active {
            account.is_active = is_active;
        }
        Ok(account.clone())
    }

    /// Delete a non-system account.
    ///
    /// No dependent-entry check is performed: deleting an account referenced
    /// by historical entries leaves those lines' account links dangling.
    pub fn delete(&mut self, id: AccountId) -> DomainResult<()> {
        let account = self.accounts.get(&id).ok_or(DomainError::NotFound)?;
        if account.is_system {
            return Err(DomainError::immutable(format!(
                "system account '{}' cannot be deleted",
                account.name
            )));
        }
        self.accounts.remove(&id);
        Ok(())
    }

    pub fn get(&self, id: AccountId) -> DomainResult<&Account> {
        self.accounts.get(&id).ok_or(DomainError::NotFound)
    }

    pub fn find(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    /// All accounts, sorted by code.
    pub fn list(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        accounts
    }

    /// Look up an account by its exact display name.
    ///
    /// Returns `None` rather than an error so callers can degrade gracefully.
    pub fn resolve_by_name(&self, name: &str) -> Option<&Account> {
        self.accounts.values().find(|a| a.name == name)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Seed the well-known system accounts and resolve their role bindings.
    ///
    /// Idempotent: an account that already carries a role's name is adopted
    /// (and promoted to a system account) instead of recreated; missing ones
    /// are created with the role's default code. Seeding is the only path
    /// that sets `is_system`.
    ///
    /// Fails hard when a role cannot be resolved to a usable account, e.g.
    /// when an existing account carries a role name with the wrong kind.
    pub fn seed_system_accounts(&mut self) -> DomainResult<RoleBindings> {
        for role in AccountRole::ALL {
            let existing = self
                .resolve_by_name(role.display_name())
                .map(|a| (a.id, a.kind));
            match existing {
                Some((id, kind)) => {
                    if kind != role.kind() {
                        return Err(DomainError::validation(format!(
                            "account '{}' exists with kind {:?}, expected {:?}",
                            role.display_name(),
                            kind,
                            role.kind()
                        )));
                    }
                    if let Some(account) = self.accounts.get_mut(&id) {
                        account.is_system = true;
                    }
                }
                None => {
                    let name = role.display_name().to_string();
                    let code = role.default_code().to_string();
                    self.ensure_unique(&name, &code, None)?;
                    let account = Account {
                        id: AccountId::new(),
                        name,
                        code,
                        kind: role.kind(),
                        description: format!("System account: {}", role.display_name()),
                        is_active: true,
                        is_system: true,
                    };
                    self.accounts.insert(account.id, account);
                }
            }
        }
        RoleBindings::resolve(self)
    }

    fn ensure_unique(
        &self,
        name: &str,
        code: &str,
        exclude: Option<AccountId>,
    ) -> DomainResult<()> {
        for account in self.accounts.values() {
            if Some(account.id) == exclude {
                continue;
            }
            if account.name == name {
                return Err(DomainError::duplicate(format!(
                    "account name '{name}' is already in use"
                )));
            }
            if account.code == code {
                return Err(DomainError::duplicate(format!(
                    "account code '{code}' is already in use"
                )));
            }
        }
        Ok(())
    }
}

/// Role → account bindings, resolved once at bootstrap.
///
/// The event poster books against these instead of looking accounts up by
/// display name per event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBindings {
    bindings: HashMap<AccountRole, AccountId>,
}

impl RoleBindings {
    /// No bindings at all. Every posting through these is skipped.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolve every role against the chart; hard error on the first miss.
    pub fn resolve(chart: &ChartOfAccounts) -> DomainResult<Self> {
        let mut bindings = HashMap::new();
        for role in AccountRole::ALL {
            let account = chart.resolve_by_name(role.display_name()).ok_or_else(|| {
                DomainError::validation(format!(
                    "required account '{}' is not configured",
                    role.display_name()
                ))
            })?;
            bindings.insert(role, account.id);
        }
        Ok(Self { bindings })
    }

    pub fn bind(&mut self, role: AccountRole, account_id: AccountId) {
        self.bindings.insert(role, account_id);
    }

    pub fn account(&self, role: AccountRole) -> Option<AccountId> {
        self.bindings.get(&role).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountKind;

    fn new_account(name: &str, code: &str, kind: AccountKind) -> NewAccount {
        NewAccount {
            name: name.to_string(),
            code: code.to_string(),
            kind,
            description: String::new(),
            is_active: true,
        }
    }

    #[test]
    fn create_rejects_duplicate_name_and_code() {
        let mut chart = ChartOfAccounts::new();
        chart
            .create(new_account("Petty Cash", "1010", AccountKind::Asset))
            .unwrap();

        let err = chart
            .create(new_account("Petty Cash", "1020", AccountKind::Asset))
            .unwrap_err();
        assert!(matches!(err, DomainError::Duplicate(_)));

        let err = chart
            .create(new_account("Till Float", "1010", AccountKind::Asset))
            .unwrap_err();
        assert!(matches!(err, DomainError::Duplicate(_)));
    }

    #[test]
    fn create_requires_name_and_code() {
        let mut chart = ChartOfAccounts::new();
        let err = chart
            .create(new_account("  ", "1010", AccountKind::Asset))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        let err = chart
            .create(new_account("Petty Cash", "", AccountKind::Asset))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn created_accounts_are_never_system() {
        let mut chart = ChartOfAccounts::new();
        let account = chart
            .create(new_account("Petty Cash", "1010", AccountKind::Asset))
            .unwrap();
        assert!(!account.is_system);
    }

    #[test]
    fn system_account_protected_fields_are_immutable() {
        let mut chart = ChartOfAccounts::new();
        let bindings = chart.seed_system_accounts().unwrap();
        let inventory = bindings.account(AccountRole::Inventory).unwrap();

        let err = chart
            .update(
                inventory,
                AccountUpdate {
                    name: Some("Stock on Hand".to_string()),
                    ..AccountUpdate::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::ImmutableAccount(_)));

        let err = chart
            .update(
                inventory,
                AccountUpdate {
                    kind: Some(AccountKind::Expense),
                    ..AccountUpdate::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::ImmutableAccount(_)));

        // description / is_active stay mutable, and passing the current
        // value of a protected field is not a change.
        let updated = chart
            .update(
                inventory,
                AccountUpdate {
                    name: Some("Inventory".to_string()),
                    description: Some("Stock at cost".to_string()),
                    is_active: Some(false),
                    ..AccountUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.description, "Stock at cost");
        assert!(!updated.is_active);
    }

    #[test]
    fn update_revalidates_uniqueness_against_other_accounts() {
        let mut chart = ChartOfAccounts::new();
        let a = chart
            .create(new_account("Petty Cash", "1010", AccountKind::Asset))
            .unwrap();
        chart
            .create(new_account("Till Float", "1020", AccountKind::Asset))
            .unwrap();

        let err = chart
            .update(
                a.id,
                AccountUpdate {
                    code: Some("1020".to_string()),
                    ..AccountUpdate::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Duplicate(_)));

        // Keeping its own name/code is fine.
        chart
            .update(
                a.id,
                AccountUpdate {
                    name: Some("Petty Cash".to_string()),
                    code: Some("1010".to_string()),
                    ..AccountUpdate::default()
                },
            )
            .unwrap();
    }

    #[test]
    fn delete_removes_non_system_and_protects_system() {
        let mut chart = ChartOfAccounts::new();
        let bindings = chart.seed_system_accounts().unwrap();
        let misc = chart
            .create(new_account("Suspense", "9999", AccountKind::Expense))
            .unwrap();

        chart.delete(misc.id).unwrap();
        assert!(chart.find(misc.id).is_none());

        let inventory = bindings.account(AccountRole::Inventory).unwrap();
        let err = chart.delete(inventory).unwrap_err();
        assert!(matches!(err, DomainError::ImmutableAccount(_)));
    }

    #[test]
    fn seeding_is_idempotent_and_adopts_existing_accounts() {
        let mut chart = ChartOfAccounts::new();
        let cash = chart
            .create(new_account("Cash", "1000", AccountKind::Asset))
            .unwrap();
        assert!(!cash.is_system);

        let first = chart.seed_system_accounts().unwrap();
        let second = chart.seed_system_accounts().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.account(AccountRole::Cash), Some(cash.id));
        assert!(chart.get(cash.id).unwrap().is_system);
        assert_eq!(chart.len(), 7);
    }

    #[test]
    fn seeding_fails_hard_on_a_role_with_wrong_kind() {
        let mut chart = ChartOfAccounts::new();
        chart
            .create(new_account("Inventory", "1400", AccountKind::Expense))
            .unwrap();
        let err = chart.seed_system_accounts().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn resolve_by_name_returns_none_for_unknown_accounts() {
        let chart = ChartOfAccounts::new();
        assert!(chart.resolve_by_name("Accounts Receivable").is_none());
    }
}
