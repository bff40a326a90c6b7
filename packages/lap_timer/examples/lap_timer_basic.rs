//! Profiles a trivial checkpoint and a variable sleep, then prints both histograms.
//!
//! Run with: `cargo run --example lap_timer_basic`.
#![expect(
    clippy::arithmetic_side_effects,
    reason = "this is example code that does not need production-level safety"
)]

use std::thread;
use std::time::Duration;

use lap_timer::Profiler;

const ITERATIONS: usize = 50;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut profiler = Profiler::new(2, ITERATIONS).expect("valid profiler dimensions");

    for i in 0..ITERATIONS {
        profiler.reset().expect("clock is readable");

        // Slot 0: nothing happens between reset and sample.
        profiler.sample().expect("clock is readable");

        // Slot 1: sleeps between 0 and 1.2 milliseconds.
        let micros = u64::try_from(i % 13).expect("small value fits") * 100;
        thread::sleep(Duration::from_micros(micros));
        profiler.sample().expect("clock is readable");

        profiler.advance();
    }

    println!("slot 0: empty checkpoint, slot 1: variable sleep");
    println!();
    profiler.print_report();
}
