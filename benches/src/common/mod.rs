#![allow(dead_code)]

use std::sync::Arc;

use wallet::prelude::*;

/// Deterministic payment amounts between 1 and 1,000 minor units
pub fn amounts(len: usize) -> Vec<Money> {
    (0..len)
        .map(|i| Money::from_minor((i % 1_000) as i64 + 1))
        .collect()
}

pub fn shared_amounts(len: usize) -> Arc<[Money]> {
    amounts(len).into()
}

/// Service with `num_accounts` funded accounts and `payments_per_account`
/// payments on each
pub fn populated_service(num_accounts: usize, payments_per_account: usize) -> WalletService {
    let service = WalletService::new();

    for i in 0..num_accounts {
        let account = service
            .register_account(Phone::new(format!("+992{i:09}")))
            .unwrap();
        service
            .deposit(account.id(), Money::from_minor(1_000_000))
            .unwrap();

        for j in 0..payments_per_account {
            service
                .pay(
                    account.id(),
                    Money::from_minor((j % 100) as i64 + 1),
                    PaymentCategory::from("bench"),
                )
                .unwrap();
        }
    }

    service
}
