//! foldwatch - replay a scroll/resize scenario against a simulated page
//!
//! ```text
//! foldwatch [-v] <scenario.json>
//! ```
//!
//! Prints `t=<ms> dispatch <label>` per dispatched element and the final
//! loader status as JSON.

mod scenario;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use foldwatch_core::app::LoaderBuilder;
use foldwatch_core::domain::HostEvent;
use foldwatch_core::impls::{NodeId, Recorder};
use foldwatch_core::ports::{Clock, ManualClock};

use crate::scenario::{Scenario, Stage, Step};

#[derive(Debug, Parser)]
#[command(name = "foldwatch")]
#[command(about = "Replay a scroll/resize scenario against a simulated page")]
struct Args {
    /// Log scans, dispatches and listener changes
    #[arg(short, long)]
    verbose: bool,
    /// Path to the scenario JSON file
    scenario: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = if args.verbose {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    simple_logger::init_with_level(level)?;

    let raw = std::fs::read_to_string(&args.scenario)
        .with_context(|| format!("reading {}", args.scenario.display()))?;
    let scenario: Scenario = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", args.scenario.display()))?;

    let mut stage = Stage::build(&scenario.page, &scenario.elements)?;
    let clock = ManualClock::at_epoch();
    let recorder: Recorder<NodeId> = Recorder::new();

    let mut loader = LoaderBuilder::new(stage.page.clone())
        .config(scenario.options)
        .clock(clock.clone())
        .populate(recorder.clone())
        .build()
        .context("building loader")?;

    let start = clock.now();
    let mut reported = 0;
    let mut report = |stage: &Stage| {
        let dispatched = recorder.dispatched();
        for node in &dispatched[reported..] {
            let t = (clock.now() - start).num_milliseconds();
            println!("t={t} dispatch {}", stage.label(*node));
        }
        reported = dispatched.len();
    };

    loader.tick().context("initial tick")?;
    report(&stage);

    for (index, step) in scenario.steps.into_iter().enumerate() {
        log::debug!("step {index}: {step:?}");
        match step {
            Step::Scroll(top) => {
                stage.page.scroll_to(top);
                loader.handle_event(HostEvent::Scroll)?;
            }
            Step::Resize(height) => {
                stage.page.set_viewport_height(height);
                loader.handle_event(HostEvent::Resize)?;
            }
            Step::Orientation(angle) => {
                stage.page.set_orientation(Some(angle));
                loader.handle_event(HostEvent::OrientationChange)?;
            }
            Step::AdvanceMs(ms) => clock.advance_ms(ms),
            Step::Insert(element) => {
                stage.insert(&element)?;
            }
            Step::RequestLoad => loader.request_load(),
            Step::DomContentLoaded => loader.handle_event(HostEvent::DomContentLoaded)?,
            Step::Load => loader.handle_event(HostEvent::Load)?,
            Step::Tick => {}
        }
        loader
            .tick()
            .with_context(|| format!("tick after step {index}"))?;
        report(&stage);
    }

    println!("{}", serde_json::to_string_pretty(&loader.status())?);
    Ok(())
}
