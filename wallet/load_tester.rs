use rust_decimal::Decimal;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use wallet::Wallet;
use wallet::types::{Asset, Transaction};

/// Load testing tool for sustained wallet throughput
fn main() {
    println!("=== Wallet Load Testing ===\n");

    test_sustained_deposits();
    test_mixed_workload();
    test_concurrent_access();
    test_large_batches();
}

fn asset_for(n: u64) -> Asset {
    Asset::ALL[(n % Asset::ALL.len() as u64) as usize]
}

fn test_sustained_deposits() {
    println!("📈 Testing sustained deposits...");

    let duration = Duration::from_secs(10);
    let start = Instant::now();
    let wallet = Wallet::new();
    let mut operations: u64 = 0;

    while start.elapsed() < duration {
        let amount = Decimal::new(1 + (operations % 100) as i64, 2);
        wallet
            .deposit(asset_for(operations), amount)
            .expect("positive deposit");
        operations += 1;
    }

    let elapsed = start.elapsed();
    let ops_per_second = operations as f64 / elapsed.as_secs_f64();

    println!("   Operations: {}", operations);
    println!("   Duration: {:.2}s", elapsed.as_secs_f64());
    println!("   Throughput: {:.0} ops/sec", ops_per_second);
    println!("   Balances: {}\n", wallet.snapshot());
}

fn test_mixed_workload() {
    println!("🔄 Testing mixed workload...");

    let duration = Duration::from_secs(10);
    let start = Instant::now();
    let wallet = Wallet::new();

    let mut operations: u64 = 0;
    let mut withdrawals = 0;
    let mut rejected = 0;
    let mut snapshots = 0;

    while start.elapsed() < duration {
        let asset = asset_for(operations);
        match operations % 4 {
            0 | 1 => {
                wallet
                    .deposit(asset, Decimal::new(150, 2))
                    .expect("positive deposit");
            }
            2 => {
                // Sized to fail now and then
                let ok = wallet
                    .withdraw(asset, Decimal::new(275, 2))
                    .expect("positive withdrawal");
                if ok {
                    withdrawals += 1;
                } else {
                    rejected += 1;
                }
            }
            _ => {
                let _ = wallet.snapshot();
                snapshots += 1;
            }
        }
        operations += 1;
    }

    let elapsed = start.elapsed();
    let ops_per_second = operations as f64 / elapsed.as_secs_f64();

    println!("   Operations: {}", operations);
    println!("   Withdrawals: {}", withdrawals);
    println!("   Rejected withdrawals: {}", rejected);
    println!("   Snapshots: {}", snapshots);
    println!("   Duration: {:.2}s", elapsed.as_secs_f64());
    println!("   Throughput: {:.0} ops/sec", ops_per_second);
    println!("   Balances: {}\n", wallet.snapshot());
}

fn test_concurrent_access() {
    println!("⚡ Testing concurrent access...");

    let wallet = Arc::new(Wallet::new());
    let operations = Arc::new(AtomicU64::new(0));
    let deposited = Arc::new(AtomicU64::new(0));
    let withdrawn = Arc::new(AtomicU64::new(0));
    let duration = Duration::from_secs(5);

    let num_threads = 4;
    let mut handles = vec![];

    for thread_id in 0..num_threads {
        let wallet = Arc::clone(&wallet);
        let ops_clone = Arc::clone(&operations);
        let deposited = Arc::clone(&deposited);
        let withdrawn = Arc::clone(&withdrawn);

        let handle = thread::spawn(move || {
            let start = Instant::now();
            let mut local_ops: u64 = 0;

            while start.elapsed() < duration {
                // Even threads deposit, odd threads withdraw, all on USD
                if thread_id % 2 == 0 {
                    wallet
                        .deposit(Asset::Usd, Decimal::ONE)
                        .expect("positive deposit");
                    deposited.fetch_add(1, Ordering::Relaxed);
                } else if wallet
                    .withdraw(Asset::Usd, Decimal::ONE)
                    .expect("positive withdrawal")
                {
                    withdrawn.fetch_add(1, Ordering::Relaxed);
                }
                local_ops += 1;
            }

            ops_clone.fetch_add(local_ops, Ordering::Relaxed);
        });

        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let total_ops = operations.load(Ordering::Relaxed);
    let ops_per_second = total_ops as f64 / duration.as_secs_f64();
    let expected =
        deposited.load(Ordering::Relaxed) as i64 - withdrawn.load(Ordering::Relaxed) as i64;
    let balances = wallet.snapshot();

    println!("   Threads: {}", num_threads);
    println!("   Total operations: {}", total_ops);
    println!("   Duration: {:.2}s", duration.as_secs_f64());
    println!("   Throughput: {:.0} ops/sec", ops_per_second);
    println!(
        "   USD balance: {} (expected {}) {}",
        balances.usd,
        expected,
        if balances.usd == Decimal::from(expected) {
            "✅"
        } else {
            "❌"
        }
    );
    println!();
}

fn test_large_batches() {
    println!("📦 Testing large batches...");

    let wallet = Wallet::new();
    let batch: Vec<Transaction> = (0..50_000u64)
        .map(|i| {
            let asset = asset_for(i);
            if i % 5 == 4 {
                Transaction::withdraw(asset, Decimal::new(3, 0)).expect("positive withdrawal")
            } else {
                Transaction::deposit(asset, Decimal::new(1, 0)).expect("positive deposit")
            }
        })
        .collect();

    let start = Instant::now();
    for round in 1..=5 {
        let balances = wallet.process(&batch).expect("validated batch");
        let elapsed = start.elapsed();
        let ops_per_second = (round * batch.len()) as f64 / elapsed.as_secs_f64();
        println!("   Round {}: {:.0} tx/sec, {}", round, ops_per_second, balances);
    }

    let elapsed = start.elapsed();
    println!(
        "   Final: {} transactions in {:.2}s\n",
        5 * batch.len(),
        elapsed.as_secs_f64()
    );
}
