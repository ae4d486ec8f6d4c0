use std::fmt;

use super::amount::Money;

/// Phone number an account is registered under
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Phone(String);

impl Phone {
    pub fn new(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Phone {
    fn from(phone: &str) -> Self {
        Self(phone.to_string())
    }
}

/// Wallet account with private fields enforcing invariants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: i64,
    phone: Phone,
    balance: Money,
}

impl Account {
    /// Create a new account with zero balance
    pub fn new(id: i64, phone: Phone) -> Self {
        Self {
            id,
            phone,
            balance: Money::zero(),
        }
    }

    /// Rebuild an account from persisted state
    pub fn restore(id: i64, phone: Phone, balance: Money) -> Self {
        Self { id, phone, balance }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    // Internal mutation methods for use by operations and storage
    pub(crate) fn set_balance(&mut self, balance: Money) {
        self.balance = balance;
    }

    pub(crate) fn set_phone(&mut self, phone: Phone) {
        self.phone = phone;
    }
}
