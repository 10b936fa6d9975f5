//! Driver Demo
//!
//! Feeds the same key script to the terminal and browser drivers, then runs
//! the unified specifications against both.
//!
//! Run with: cargo run --example driver_demo

use keycalc::driver::{run_full_specification, CalculatorDriver, TuiDriver};
use keycalc::web::{DomEvent, WebDriver};

fn show(name: &str, driver: &dyn CalculatorDriver) {
    println!(
        "   {name:<4} display={:<10} history={:<14} active={}",
        driver.display_text(),
        format!("{:?}", driver.history_text()),
        driver
            .active_operator()
            .map_or_else(|| "-".to_string(), |op| op.glyph().to_string()),
    );
}

fn main() {
    println!("keycalc driver demo");
    println!("───────────────────");

    let mut tui = TuiDriver::new();
    let mut web = WebDriver::new();

    for script in ["12", "+", "30", "=", "*", "2", "-", "=", "/0=", "5"] {
        println!("\n> {script}");
        tui.type_keys(script);
        web.type_keys(script);
        show("tui", &tui);
        show("web", &web);
    }

    println!("\nDOM events recorded by the web driver:");
    for event in web.dom().event_history().iter().take(6) {
        match event {
            DomEvent::Click { element_id } => println!("   click   #{element_id}"),
            DomEvent::KeyDown { key } => println!("   keydown {key}"),
        }
    }

    print!("\nrun_full_specification on TuiDriver ... ");
    run_full_specification(&mut TuiDriver::new());
    println!("ok");

    print!("run_full_specification on WebDriver ... ");
    run_full_specification(&mut WebDriver::new());
    println!("ok");
}
