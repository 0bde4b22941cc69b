//! Build and run a few pipelines.
//!
//! ```sh
//! AMALFI_LOG=debug cargo run -p amalfi --example pipelines
//! ```

use amalfi::prelude::*;
use amalfi::utils::{block_on_pipeline, tracing};
use std::sync::Arc;
use std::time::Duration;

fn add_one(x: i32) -> i32 {
    x + 1
}

fn multiply_by_two(x: i32) -> i32 {
    x * 2
}

fn greet(name: String) -> String {
    format!("Hello, {name}")
}

async fn emphasize(s: String) -> String {
    tokio::time::sleep(Duration::from_millis(100)).await;
    s.to_uppercase() + "!"
}

fn main() -> Result<()> {
    tracing::init()?;
    let settings = Settings::from_env()?;

    let pipeline = pipe(1) | add_one | multiply_by_two;
    println!("{}", pipeline.run());

    let greeting = apipe("Alice".to_string()).step_sync(greet).step(emphasize);
    println!("{}", block_on_pipeline(&greeting)?);

    let doubled = stream(0..10).map(multiply_by_two).collect();
    println!("{doubled:?}");

    let memo = Arc::new(Memo::from_settings(&settings)?);
    let square = memoize(Arc::clone(&memo), |x: u64| x * x);
    let squares = pipe(vec![2_u64, 3, 2, 2]).step(map_(square)).run();
    println!("{squares:?} ({:?})", memo.stats());

    let lengths = apipe(vec!["Alice", "Bob", "Charlie"])
        .step(amap_buffered(settings.max_concurrency, |name: &'static str| {
            emphasize(name.to_string())
        }))
        .step_sync(map_(|s: String| s.len()))
        .step_sync(fold_(|acc: usize, n: usize| acc + n, 0));
    println!("{}", block_on_pipeline(&lengths)?);

    Ok(())
}
