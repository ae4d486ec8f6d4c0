use super::account::Account;
use super::amount::Money;
use super::error::DomainError;

/// Apply a deposit to an account
pub fn apply_deposit(account: &mut Account, amount: Money) -> Result<(), DomainError> {
    if !amount.is_positive() {
        return Err(DomainError::InvalidAmount);
    }

    let new_balance = account
        .balance()
        .checked_add(amount)
        .ok_or(DomainError::Overflow)?;

    account.set_balance(new_balance);
    Ok(())
}

/// Debit an account for a payment
///
/// There is no funds check: the balance is allowed to go negative.
pub fn apply_payment(account: &mut Account, amount: Money) -> Result<(), DomainError> {
    if !amount.is_positive() {
        return Err(DomainError::InvalidAmount);
    }

    let new_balance = account
        .balance()
        .checked_sub(amount)
        .ok_or(DomainError::Overflow)?;

    account.set_balance(new_balance);
    Ok(())
}

/// Return the amount of a rejected payment to its account
pub fn apply_refund(account: &mut Account, amount: Money) -> Result<(), DomainError> {
    let new_balance = account
        .balance()
        .checked_add(amount)
        .ok_or(DomainError::Overflow)?;

    account.set_balance(new_balance);
    Ok(())
}
