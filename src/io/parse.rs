use std::str::FromStr;

use super::error::IoError;
use crate::domain::{Account, Favorite, Money, Payment, PaymentCategory, PaymentStatus, Phone};

/// Fields of one `;`-separated dump line
///
/// Works over both the sync and async csv record types by borrowing their
/// fields as plain string slices.
#[derive(Debug)]
pub struct DumpRecord<'a> {
    fields: Vec<&'a str>,
}

impl<'a> DumpRecord<'a> {
    pub fn new(fields: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    /// True for blank lines and trailing separators
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|field| field.trim().is_empty())
    }

    fn field(&self, index: usize, name: &str) -> Result<&'a str, IoError> {
        self.fields
            .get(index)
            .copied()
            .ok_or_else(|| IoError::MissingField(name.to_string()))
    }

    fn number<T: FromStr>(&self, index: usize, name: &str) -> Result<T, IoError> {
        let value = self.field(index, name)?;
        value.trim().parse().map_err(|_| IoError::InvalidNumber {
            field: name.to_string(),
            value: value.to_string(),
        })
    }

    /// `id;phone;balance;`
    pub fn account(&self) -> Result<Account, IoError> {
        let id = self.number(0, "id")?;
        let phone = Phone::new(self.field(1, "phone")?);
        let balance: Money = self.number(2, "balance")?;
        Ok(Account::restore(id, phone, balance))
    }

    /// `id;account_id;amount;category;status;`
    pub fn payment(&self) -> Result<Payment, IoError> {
        let status = self.field(4, "status")?;
        Ok(Payment {
            id: self.field(0, "id")?.to_string(),
            account_id: self.number(1, "account_id")?,
            amount: self.number(2, "amount")?,
            category: PaymentCategory::new(self.field(3, "category")?),
            status: status
                .parse::<PaymentStatus>()
                .map_err(|_| IoError::InvalidStatus(status.to_string()))?,
        })
    }

    /// `id;account_id;name;amount;category`
    pub fn favorite(&self) -> Result<Favorite, IoError> {
        Ok(Favorite {
            id: self.field(0, "id")?.to_string(),
            account_id: self.number(1, "account_id")?,
            name: self.field(2, "name")?.to_string(),
            amount: self.number(3, "amount")?,
            category: PaymentCategory::new(self.field(4, "category")?.trim_end()),
        })
    }
}

pub fn account_line(account: &Account) -> String {
    format!(
        "{};{};{};\n",
        account.id(),
        account.phone(),
        account.balance()
    )
}

pub fn payment_line(payment: &Payment) -> String {
    format!(
        "{};{};{};{};{};\n",
        payment.id, payment.account_id, payment.amount, payment.category, payment.status
    )
}

pub fn favorite_line(favorite: &Favorite) -> String {
    format!(
        "{};{};{};{};{}\n",
        favorite.id, favorite.account_id, favorite.name, favorite.amount, favorite.category
    )
}
