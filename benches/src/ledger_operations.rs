mod common;

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rayon::prelude::*;
use wallet::prelude::*;

/// Registration plus first deposit
fn bench_register_and_deposit(c: &mut Criterion) {
    let mut group = c.benchmark_group("register_and_deposit");

    for num_accounts in [100, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_accounts),
            &num_accounts,
            |b, &num_accounts| {
                b.iter_batched(
                    WalletService::new,
                    |service| {
                        for i in 0..num_accounts {
                            let account = service
                                .register_account(Phone::new(format!("+{i}")))
                                .unwrap();
                            service
                                .deposit(account.id(), Money::from_minor(100))
                                .unwrap();
                        }
                        black_box(service)
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

/// Payments spread over accounts from many rayon threads
fn bench_concurrent_payments(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_payments");

    for num_accounts in [1, 16, 256] {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_accounts),
            &num_accounts,
            |b, &num_accounts| {
                b.iter_batched(
                    || common::populated_service(num_accounts, 0),
                    |service| {
                        (0..10_000i64).into_par_iter().for_each(|i| {
                            let account_id = i % num_accounts as i64 + 1;
                            service
                                .pay(
                                    account_id,
                                    Money::from_minor(1),
                                    PaymentCategory::from("bench"),
                                )
                                .unwrap();
                        });
                        black_box(service)
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

/// Reject and repeat against a populated ledger
fn bench_reject_and_repeat(c: &mut Criterion) {
    c.bench_function("reject_and_repeat", |b| {
        b.iter_batched(
            || {
                let service = common::populated_service(10, 100);
                let ids: Vec<_> = service.payments().into_iter().map(|p| p.id).collect();
                (service, ids)
            },
            |(service, ids)| {
                for id in &ids {
                    service.repeat(id).unwrap();
                    service.reject(id).unwrap();
                }
                black_box(service)
            },
            BatchSize::SmallInput,
        );
    });
}

/// Per-account total over a ledger with many accounts
fn bench_sum_payments(c: &mut Criterion) {
    let service = common::populated_service(100, 1_000);

    c.bench_function("sum_payments_one_account", |b| {
        b.iter(|| black_box(service.sum_payments(black_box(50)).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_register_and_deposit,
    bench_concurrent_payments,
    bench_reject_and_repeat,
    bench_sum_payments
);
criterion_main!(benches);
