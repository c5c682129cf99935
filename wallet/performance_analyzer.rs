use std::fs;
use std::path::Path;

/// Converts Criterion benchmark results for the wallet into ops/sec
fn main() {
    let benchmark_dir = "target/criterion";

    if !Path::new(benchmark_dir).exists() {
        println!("No benchmark results found. Run 'cargo bench' first.");
        return;
    }

    println!("=== Wallet Performance Analysis ===\n");

    let benchmarks = [
        "apply_one_deposit",
        "apply_one_rejected_withdraw",
        "wallet_deposit_withdraw",
        "wallet_snapshot",
    ];

    for benchmark in &benchmarks {
        analyze_benchmark(benchmark_dir, benchmark, 1);
    }

    // Batch benchmarks measure a whole batch per iteration
    let throughput_dir = format!("{}/throughput", benchmark_dir);
    if Path::new(&throughput_dir).exists() {
        println!("\n=== Batch Throughput ===");
        for size in [100u64, 1_000, 10_000] {
            analyze_benchmark(&throughput_dir, &format!("apply_all/{}", size), size);
            analyze_benchmark(&throughput_dir, &format!("wallet_process/{}", size), size);
        }
    }
}

/// Transactions per second for one measured iteration covering `elements` transactions
fn ops_per_second(nanoseconds: f64, elements: u64) -> f64 {
    elements as f64 * 1_000_000_000.0 / nanoseconds
}

fn analyze_benchmark(base_dir: &str, benchmark_name: &str, elements: u64) {
    let estimates_path = format!("{}/{}/new/estimates.json", base_dir, benchmark_name);

    if !Path::new(&estimates_path).exists() {
        println!("❌ {} - No results found", benchmark_name);
        return;
    }

    let content = match fs::read_to_string(&estimates_path) {
        Ok(content) => content,
        Err(e) => {
            println!("❌ {} - Error reading results: {}", benchmark_name, e);
            return;
        }
    };

    let Ok(estimates) = serde_json::from_str::<serde_json::Value>(&content) else {
        println!("❌ {} - Malformed estimates.json", benchmark_name);
        return;
    };

    let Some(mean) = estimates.get("mean") else {
        return;
    };

    if let Some(nanoseconds) = mean.get("point_estimate").and_then(|v| v.as_f64()) {
        println!("📊 {}:", benchmark_name);
        println!("   Time per iteration: {:.2} μs", nanoseconds / 1000.0);
        println!(
            "   Transactions per second: {:.0} ops/sec",
            ops_per_second(nanoseconds, elements)
        );

        if let Some(ci) = mean.get("confidence_interval") {
            if let (Some(lower), Some(upper)) = (
                ci.get("lower_bound").and_then(|v| v.as_f64()),
                ci.get("upper_bound").and_then(|v| v.as_f64()),
            ) {
                // A lower time bound is the upper ops bound
                println!(
                    "   95% CI: {:.0} - {:.0} ops/sec",
                    ops_per_second(upper, elements),
                    ops_per_second(lower, elements)
                );
            }
        }
        println!();
    }
}
