//! Traffic Light State Machine
//!
//! This example drives a three-state traffic light through one full cycle.
//!
//! Key concepts:
//! - Named states and named events
//! - Per-state enter hooks and per-event after hooks
//! - Context-wide hooks that run ahead of the per-entity ones
//! - DOT export of the transition graph
//!
//! Run with: RUST_LOG=hookfsm=debug cargo run --example traffic_light

use hookfsm::{Context, Event, State};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Traffic Light State Machine ===\n");

    let mut ctx = Context::new(
        State::new("green").on_enter(|_, _| println!("enter_green")),
        "crossing-12",
    );
    let green = ctx.current_id();
    let states = [
        State::new("yellow").on_enter(|_, _| println!("enter_yellow")),
        State::new("red").on_enter(|_, _| println!("enter_red")),
    ];
    let mut ids = Vec::new();
    for state in states {
        match ctx.add_state(state) {
            Ok(id) => ids.push(id),
            Err(err) => {
                eprintln!("failed to add state: {err}");
                return;
            }
        }
    }
    let (yellow, red) = (ids[0], ids[1]);

    let events = [
        Event::new("warn", green, yellow).on_after(|_, _| println!("after_warn")),
        Event::new("stop", yellow, red).on_after(|_, _| println!("after_stop")),
        Event::new("ready", red, yellow).on_after(|_, _| println!("after_ready")),
        Event::new("go", yellow, green).on_after(|_, _| println!("after_go")),
    ];
    for event in events {
        if let Err(err) = ctx.add_event(event) {
            eprintln!("failed to add event: {err}");
            return;
        }
    }

    ctx.on_before_event(|_, e| println!("fsm: before emit event `{}`", e.name()));
    ctx.on_leave_state(|_, s| println!("fsm: leave state `{}`", s.name()));
    ctx.on_enter_state(|_, s| println!("fsm: enter state `{}`", s.name()));
    ctx.on_after_event(|_, e| println!("fsm: after emit event `{}`", e.name()));

    for name in ["warn", "stop", "ready", "go"] {
        if let Err(err) = ctx.emit(name) {
            eprintln!("{err}");
        }
        println!();
    }

    // Not reachable from green; logged and rejected
    if let Err(err) = ctx.emit("stop") {
        println!("rejected: {err}\n");
    }

    println!("Light {} is {}", ctx.data(), ctx.current());
    println!("Path: {}\n", ctx.history().path().join(" -> "));

    if let Err(err) = ctx.print() {
        eprintln!("failed to print graph: {err}");
    }

    println!("\n=== Example Complete ===");
}
