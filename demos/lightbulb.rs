//! Light Bulb
//!
//! Drives the two-state bulb on a fixed cadence. Every third step nothing is
//! requested, so the active state simply runs again.
//!
//! Key concepts:
//! - Driver owns the cadence; the machine only steps when asked
//! - On/off status is read from the machine, never tracked separately
//! - Output goes through a closure sink
//!
//! Run with: cargo run --example lightbulb
//! Set RUST_LOG=lumen=debug to see registry and transition tracing.

use lumen::bulb::LightBulb;
use lumen::MachineEvent;
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const CYCLES: usize = 10;
const CADENCE: Duration = Duration::from_millis(250);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut bulb = LightBulb::with_sink(|event: MachineEvent| println!("{event}"))?;

    println!("Starting:\n");
    for step in 1..=CYCLES {
        thread::sleep(CADENCE);
        println!("Step {step}:");

        if step % 3 == 0 {
            println!("Nothing happened.");
        } else {
            bulb.toggle()?;
        }

        bulb.step()?;
        println!("(bulb is {})\n", if bulb.is_on() { "on" } else { "off" });
    }

    println!("Path: {}", bulb.fsm().history().get_path().join(" -> "));
    Ok(())
}
