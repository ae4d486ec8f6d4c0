use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use super::amount::Money;
use super::error::DomainError;

/// Lifecycle status of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Ok,
    Fail,
    InProgress,
}

impl PaymentStatus {
    /// Text form used in dump files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Fail => "FAIL",
            Self::InProgress => "INPROGRESS",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "OK" => Ok(Self::Ok),
            "FAIL" => Ok(Self::Fail),
            "INPROGRESS" => Ok(Self::InProgress),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

/// Free-form payment category ("auto", "food", ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaymentCategory(String);

impl PaymentCategory {
    pub fn new(category: impl Into<String>) -> Self {
        Self(category.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PaymentCategory {
    fn from(category: &str) -> Self {
        Self(category.to_string())
    }
}

/// A payment made from an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub id: String,
    pub account_id: i64,
    pub amount: Money,
    pub category: PaymentCategory,
    pub status: PaymentStatus,
}

impl Payment {
    /// Create a fresh in-progress payment with a random id
    pub fn new(account_id: i64, amount: Money, category: PaymentCategory) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account_id,
            amount,
            category,
            status: PaymentStatus::InProgress,
        }
    }
}

/// Saved payment template that can be paid again by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub id: String,
    pub account_id: i64,
    pub name: String,
    pub amount: Money,
    pub category: PaymentCategory,
}

impl Favorite {
    /// Capture a payment as a named template
    pub fn from_payment(payment: &Payment, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account_id: payment.account_id,
            name: name.into(),
            amount: payment.amount,
            category: payment.category.clone(),
        }
    }
}
