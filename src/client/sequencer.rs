use std::time::Duration;

use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info, warn};

use crate::{
    client::{
        clock::Clock,
        history::{HistoryView, SpinHistory},
        relay::{Relay, RelayError},
    },
    wheel::{Outcome, SpinEvent, SpinMachine, SpinPhase, SpinPlan, SpinResult, SpinTiming},
};

/// What happened to a spin trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    /// A spin was already running; nothing changed.
    Ignored,
    /// A new spin started.
    Started(SpinPlan),
}

/// Transient "next spin" indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RigBanner {
    /// Outcome the next spin is forced to.
    pub outcome: Outcome,
    until: Duration,
}

impl RigBanner {
    /// Banner text.
    pub fn text(&self) -> String {
        format!("NEXT SPIN: {}", self.outcome)
    }
}

/// Runs the spin sequence against a relay: rig check, staged animation,
/// winner report and history bookkeeping.
///
/// Single-owner and cooperative: the caller feeds it triggers and frame ticks
/// from one task, so "ignore while spinning" is the only guard needed.
pub struct SpinSequencer<R, C> {
    relay: R,
    clock: C,
    machine: SpinMachine,
    rng: StdRng,
    banner: Option<RigBanner>,
    history: SpinHistory,
    last_result: Option<SpinResult>,
}

impl<R: Relay, C: Clock> SpinSequencer<R, C> {
    /// Create an idle sequencer seeded from the operating system.
    pub fn new(relay: R, clock: C, timing: SpinTiming) -> Self {
        Self::with_rng(relay, clock, timing, StdRng::from_os_rng())
    }

    /// Create an idle sequencer using `rng` for segment choices.
    pub fn with_rng(relay: R, clock: C, timing: SpinTiming, rng: StdRng) -> Self {
        let machine = SpinMachine::new(timing, clock.now());
        Self {
            relay,
            clock,
            machine,
            rng,
            banner: None,
            history: SpinHistory::new(),
            last_result: None,
        }
    }

    /// Start a spin unless one is already running.
    ///
    /// A pending rig is consumed from the relay first; if the relay cannot be
    /// reached the spin goes ahead unrigged.
    pub async fn trigger(&mut self) -> Trigger {
        if self.machine.is_spinning() {
            debug!(phase = ?self.machine.phase(), "spin trigger ignored");
            return Trigger::Ignored;
        }

        let forced = match self.relay.next_outcome().await {
            Ok(forced) => forced,
            Err(err) => {
                warn!(error = %err, "failed to check rigged outcome; spinning unrigged");
                None
            }
        };

        let now = self.clock.now();
        if let Some(outcome) = forced {
            self.show_banner(outcome, now);
        }

        match self.machine.start(now, forced, &mut self.rng) {
            Ok(plan) => {
                info!(spin_id = %plan.id, forced = ?plan.forced, segment = plan.segment, "spin started");
                Trigger::Started(plan)
            }
            Err(err) => {
                debug!(error = %err, "spin trigger ignored");
                Trigger::Ignored
            }
        }
    }

    /// Frame callback: advance the wheel to the current time and handle any
    /// transitions that fired.
    pub async fn advance(&mut self) -> Vec<SpinEvent> {
        let events = self.machine.tick(self.clock.now());
        for event in &events {
            match event {
                SpinEvent::Landed(result) => self.finish_spin(*result).await,
                SpinEvent::Resumed { id, rotation } => {
                    debug!(spin_id = %id, rotation, "idle loop resumed");
                }
                SpinEvent::Decelerating { .. } => {}
            }
        }
        events
    }

    /// Keyboard shortcut: rig the next spin through the relay.
    ///
    /// Ignored while a spin is running, in which case `Ok(None)` is returned.
    pub async fn rig_shortcut(&mut self, outcome: Outcome) -> Result<Option<String>, RelayError> {
        if self.machine.is_spinning() {
            debug!(%outcome, "rig shortcut ignored while spinning");
            return Ok(None);
        }

        let message = self.relay.rig(outcome).await?;
        let now = self.clock.now();
        self.show_banner(outcome, now);
        Ok(Some(message))
    }

    /// Poll the file-backed history.
    pub async fn refresh_history(&self) -> HistoryView {
        HistoryView::from_fetch(self.relay.recent().await)
    }

    /// Current wheel rotation in degrees.
    pub fn rotation(&self) -> f64 {
        self.machine.rotation_at(self.clock.now())
    }

    /// Current wheel phase.
    pub fn phase(&self) -> SpinPhase {
        self.machine.phase()
    }

    /// Rig banner, while it is still visible.
    pub fn banner(&self) -> Option<RigBanner> {
        let now = self.clock.now();
        self.banner.filter(|banner| now < banner.until)
    }

    /// Winners of this session, newest first.
    pub fn history(&self) -> &SpinHistory {
        &self.history
    }

    /// Result of the most recent completed spin.
    pub fn last_result(&self) -> Option<SpinResult> {
        self.last_result
    }

    fn show_banner(&mut self, outcome: Outcome, now: Duration) {
        self.banner = Some(RigBanner {
            outcome,
            until: now + self.machine.timing().rig_banner,
        });
    }

    async fn finish_spin(&mut self, result: SpinResult) {
        info!(
            spin_id = %result.id,
            winner = %result.reported,
            landed_index = result.landed_index,
            rigged = result.forced.is_some(),
            "spin landed"
        );

        if let Err(err) = self.relay.report(result.reported).await {
            debug!(error = %err, "winner report failed; file history will miss this spin");
        }
        self.history.record(result.reported);
        self.last_result = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    };

    use futures::future::BoxFuture;

    use super::*;
    use crate::wheel::{SEGMENTS, segment::winning_index, segment::normalize};

    #[derive(Default)]
    struct FakeInner {
        pending: Option<Outcome>,
        offline: bool,
        reject_reports: bool,
        outcome_checks: usize,
        reported: Vec<Outcome>,
    }

    #[derive(Clone, Default)]
    struct FakeRelay {
        inner: Arc<Mutex<FakeInner>>,
    }

    impl FakeRelay {
        fn with(configure: impl FnOnce(&mut FakeInner)) -> Self {
            let relay = Self::default();
            configure(&mut relay.inner.lock().unwrap());
            relay
        }

        fn inspect<T>(&self, read: impl FnOnce(&FakeInner) -> T) -> T {
            read(&self.inner.lock().unwrap())
        }
    }

    fn offline_error(path: &str) -> RelayError {
        RelayError::Unreachable {
            path: path.into(),
            message: "connection refused".into(),
        }
    }

    impl Relay for FakeRelay {
        fn next_outcome(&self) -> BoxFuture<'static, Result<Option<Outcome>, RelayError>> {
            let inner = self.inner.clone();
            Box::pin(async move {
                let mut inner = inner.lock().unwrap();
                inner.outcome_checks += 1;
                if inner.offline {
                    return Err(offline_error("/next-outcome"));
                }
                Ok(inner.pending.take())
            })
        }

        fn rig(&self, outcome: Outcome) -> BoxFuture<'static, Result<String, RelayError>> {
            let inner = self.inner.clone();
            Box::pin(async move {
                let mut inner = inner.lock().unwrap();
                if inner.offline {
                    return Err(offline_error("/rig"));
                }
                inner.pending = Some(outcome);
                Ok(format!("Next spin will be {outcome}"))
            })
        }

        fn report(&self, outcome: Outcome) -> BoxFuture<'static, Result<(), RelayError>> {
            let inner = self.inner.clone();
            Box::pin(async move {
                let mut inner = inner.lock().unwrap();
                if inner.offline || inner.reject_reports {
                    return Err(offline_error("/log"));
                }
                inner.reported.push(outcome);
                Ok(())
            })
        }

        fn recent(&self) -> BoxFuture<'static, Result<Vec<String>, RelayError>> {
            let inner = self.inner.clone();
            Box::pin(async move {
                let inner = inner.lock().unwrap();
                if inner.offline {
                    return Err(offline_error("/logs"));
                }
                Ok(inner
                    .reported
                    .iter()
                    .rev()
                    .take(5)
                    .map(|o| o.label().to_string())
                    .collect())
            })
        }
    }

    #[derive(Clone, Default)]
    struct ManualClock {
        millis: Arc<AtomicU64>,
    }

    impl ManualClock {
        fn set_secs(&self, secs: f64) {
            self.millis.store((secs * 1_000.0) as u64, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Duration {
            Duration::from_millis(self.millis.load(Ordering::SeqCst))
        }
    }

    fn sequencer(relay: &FakeRelay, clock: &ManualClock, seed: u64) -> SpinSequencer<FakeRelay, ManualClock> {
        SpinSequencer::with_rng(
            relay.clone(),
            clock.clone(),
            SpinTiming::default(),
            StdRng::seed_from_u64(seed),
        )
    }

    fn landed(events: &[SpinEvent]) -> Option<SpinResult> {
        events.iter().find_map(|event| match event {
            SpinEvent::Landed(result) => Some(*result),
            _ => None,
        })
    }

    #[tokio::test]
    async fn rigged_spin_reports_forced_outcome() {
        for forced in [Outcome::Dark, Outcome::Light] {
            let relay = FakeRelay::with(|inner| inner.pending = Some(forced));
            let clock = ManualClock::default();
            let mut seq = sequencer(&relay, &clock, 5);

            clock.set_secs(1.0);
            let plan = match seq.trigger().await {
                Trigger::Started(plan) => plan,
                Trigger::Ignored => panic!("spin should start"),
            };
            assert_eq!(plan.forced, Some(forced));
            assert_eq!(seq.banner().map(|b| b.text()), Some(format!("NEXT SPIN: {forced}")));

            clock.set_secs(3.5);
            assert!(seq.banner().is_none());
            assert!(seq.advance().await.is_empty());
            assert_eq!(seq.phase(), SpinPhase::Accelerating);

            clock.set_secs(4.0);
            seq.advance().await;
            assert_eq!(seq.phase(), SpinPhase::Decelerating);

            clock.set_secs(7.0);
            let result = landed(&seq.advance().await).expect("spin should land");
            assert_eq!(result.reported, forced);
            assert_eq!(relay.inspect(|inner| inner.reported.clone()), vec![forced]);
            assert_eq!(seq.history().entries().collect::<Vec<_>>(), vec![forced]);
            assert_eq!(seq.phase(), SpinPhase::Settling);

            clock.set_secs(10.5);
            seq.advance().await;
            assert_eq!(seq.phase(), SpinPhase::Idle);
            assert!((seq.rotation() - normalize(result.final_angle)).abs() < 1e-9);
        }
    }

    #[tokio::test]
    async fn fair_spin_reports_segment_under_pointer() {
        for seed in 0..10 {
            let relay = FakeRelay::default();
            let clock = ManualClock::default();
            let mut seq = sequencer(&relay, &clock, seed);

            clock.set_secs(0.75);
            assert!(matches!(seq.trigger().await, Trigger::Started(plan) if plan.forced.is_none()));
            assert!(seq.banner().is_none());

            clock.set_secs(30.0);
            let result = landed(&seq.advance().await).unwrap();
            let under_pointer = SEGMENTS[winning_index(result.final_angle)].outcome;
            assert_eq!(result.reported, under_pointer);
            assert_eq!(relay.inspect(|inner| inner.reported.clone()), vec![under_pointer]);
            assert_eq!(seq.phase(), SpinPhase::Idle);
        }
    }

    #[tokio::test]
    async fn trigger_during_spin_is_ignored_without_consuming_rig() {
        let relay = FakeRelay::default();
        let clock = ManualClock::default();
        let mut seq = sequencer(&relay, &clock, 1);

        assert!(matches!(seq.trigger().await, Trigger::Started(_)));
        relay.inner.lock().unwrap().pending = Some(Outcome::Dark);

        clock.set_secs(1.0);
        assert_eq!(seq.trigger().await, Trigger::Ignored);
        assert_eq!(relay.inspect(|inner| inner.outcome_checks), 1);
        assert_eq!(relay.inspect(|inner| inner.pending), Some(Outcome::Dark));

        clock.set_secs(4.0);
        assert_eq!(seq.trigger().await, Trigger::Ignored);
        clock.set_secs(20.0);
        seq.advance().await;

        match seq.trigger().await {
            Trigger::Started(plan) => assert_eq!(plan.forced, Some(Outcome::Dark)),
            Trigger::Ignored => panic!("idle wheel should spin"),
        }
    }

    #[tokio::test]
    async fn offline_relay_degrades_to_unrigged_spin() {
        let relay = FakeRelay::with(|inner| {
            inner.offline = true;
            inner.pending = Some(Outcome::Light);
        });
        let clock = ManualClock::default();
        let mut seq = sequencer(&relay, &clock, 8);

        match seq.trigger().await {
            Trigger::Started(plan) => assert_eq!(plan.forced, None),
            Trigger::Ignored => panic!("spin should start"),
        }
        clock.set_secs(15.0);
        let result = landed(&seq.advance().await).unwrap();

        // the report failed, the local history still shows the spin
        assert!(relay.inspect(|inner| inner.reported.is_empty()));
        assert_eq!(seq.history().len(), 1);
        assert_eq!(seq.last_result(), Some(result));
        assert_eq!(seq.refresh_history().await, HistoryView::Loading);
    }

    #[tokio::test]
    async fn rejected_report_is_ignored() {
        let relay = FakeRelay::with(|inner| inner.reject_reports = true);
        let clock = ManualClock::default();
        let mut seq = sequencer(&relay, &clock, 2);

        seq.trigger().await;
        clock.set_secs(15.0);
        assert!(landed(&seq.advance().await).is_some());
        assert_eq!(seq.refresh_history().await, HistoryView::Empty);
        assert_eq!(seq.history().len(), 1);
    }

    #[tokio::test]
    async fn rig_shortcut_sets_relay_slot_only_when_idle() {
        let relay = FakeRelay::default();
        let clock = ManualClock::default();
        let mut seq = sequencer(&relay, &clock, 4);

        let message = seq.rig_shortcut(Outcome::Light).await.unwrap();
        assert_eq!(message.as_deref(), Some("Next spin will be LIGHT"));
        assert_eq!(seq.banner().map(|b| b.outcome), Some(Outcome::Light));
        assert_eq!(relay.inspect(|inner| inner.pending), Some(Outcome::Light));

        seq.trigger().await;
        assert_eq!(seq.rig_shortcut(Outcome::Dark).await.unwrap(), None);
        assert_eq!(relay.inspect(|inner| inner.pending), None);
    }

    #[tokio::test]
    async fn history_keeps_latest_five_spins() {
        let relay = FakeRelay::default();
        let clock = ManualClock::default();
        let mut seq = sequencer(&relay, &clock, 6);

        let mut now = 0.0;
        let mut winners = Vec::new();
        for _ in 0..7 {
            clock.set_secs(now);
            seq.trigger().await;
            now += 10.0;
            clock.set_secs(now);
            winners.push(landed(&seq.advance().await).unwrap().reported);
        }

        let expected: Vec<_> = winners.iter().rev().take(5).copied().collect();
        assert_eq!(seq.history().entries().collect::<Vec<_>>(), expected);
        let expected_labels: Vec<String> = expected.iter().map(|o| o.label().to_string()).collect();
        assert_eq!(seq.refresh_history().await, HistoryView::Entries(expected_labels));
    }
}
