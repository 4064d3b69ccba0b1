//! Terminal front end for the wheel: Enter spins, `n`/`m` rig the next spin,
//! and the relay's history is shown whenever it changes.

use std::time::Duration;

use anyhow::Context;
use spin_wheel::{
    client::{HistoryView, HttpRelay, MonotonicClock, RigBanner, SpinSequencer, Trigger},
    config::AppConfig,
    wheel::{Outcome, SpinEvent},
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    time::{MissedTickBehavior, interval},
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const FRAME: Duration = Duration::from_millis(50);

const HELP: &str = "\
commands:
  <enter> | s | spin   spin the wheel
  n                    rig the next spin to DARK
  m                    rig the next spin to LIGHT
  h | history          show this session's winners
  q | quit             exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Spin,
    Rig(Outcome),
    History,
    Quit,
    Help,
}

impl Command {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "" | "s" | "spin" => Command::Spin,
            "n" => Command::Rig(Outcome::Dark),
            "m" => Command::Rig(Outcome::Light),
            "h" | "history" => Command::History,
            "q" | "quit" => Command::Quit,
            _ => Command::Help,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let timing = config.timing();
    let relay = HttpRelay::new(config.relay_url()).context("building relay client")?;
    info!(relay = %relay.base_url(), "wheel console ready");

    let mut sequencer = SpinSequencer::new(relay, MonotonicClock::start(), timing);
    println!("{HELP}");

    let mut frames = interval(FRAME);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut history_poll = interval(timing.history_poll);
    history_poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let mut shown_history: Option<HistoryView> = None;
    let mut shown_banner: Option<RigBanner> = None;

    loop {
        tokio::select! {
            _ = frames.tick() => {
                for event in sequencer.advance().await {
                    render_event(&event);
                }
                let banner = sequencer.banner();
                if banner != shown_banner {
                    if let Some(banner) = banner {
                        println!(">> {}", banner.text());
                    }
                    shown_banner = banner;
                }
            }
            _ = history_poll.tick() => {
                let view = sequencer.refresh_history().await;
                if shown_history.as_ref() != Some(&view) {
                    println!("recent spins: {}", view.lines().join(", "));
                    shown_history = Some(view);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                match Command::parse(&line) {
                    Command::Spin => match sequencer.trigger().await {
                        Trigger::Started(_) => println!("spinning..."),
                        Trigger::Ignored => println!("the wheel is still spinning"),
                    },
                    Command::Rig(outcome) => match sequencer.rig_shortcut(outcome).await {
                        Ok(Some(message)) => println!("{message}"),
                        Ok(None) => println!("cannot rig while the wheel is spinning"),
                        Err(err) => warn!(error = %err, "failed to rig next spin"),
                    },
                    Command::History => {
                        println!("this session: {}", sequencer.history().view().lines().join(", "));
                    }
                    Command::Quit => break,
                    Command::Help => println!("{HELP}"),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    info!("wheel console stopped");
    Ok(())
}

fn render_event(event: &SpinEvent) {
    match event {
        SpinEvent::Decelerating { .. } => println!("slowing down..."),
        SpinEvent::Landed(result) => {
            let (background, text) = result.reported.colors();
            println!(
                "Winner: {} (background {background}, text {text})",
                result.reported
            );
        }
        SpinEvent::Resumed { .. } => println!("ready for the next spin"),
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn,spin_wheel=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
