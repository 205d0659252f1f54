//! Monitor loop: samples the battery on a fixed schedule and raises alerts.
//!
//! Every cycle reads a fresh [`Sample`], reads the current [`Bounds`](battm_domain::bounds::Bounds)
//! from the [`BoundsStore`], evaluates the threshold policy and, when a
//! condition qualifies, hands one [`NotificationEvent`] to the notifier on
//! a detached task. The schedule never waits for the notifier.

use std::sync::Arc;
use std::time::Duration;

use battm_domain::alert::{AlertKind, NotificationEvent};
use battm_domain::policy::{self, RepeatPolicy};
use battm_domain::sample::Sample;
use battm_domain::time;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::bounds_store::BoundsStore;
use crate::ports::{BatterySensor, Notifier, SettingsRepository};
use crate::sampling::read_with_timeout;

/// Scheduling knobs for the [`MonitorLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Time between two cycles.
    pub interval: Duration,
    /// Upper bound on one sensor read.
    pub sensor_timeout: Duration,
    /// Whether an unchanged condition re-alerts every cycle.
    pub repeat: RepeatPolicy,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            sensor_timeout: Duration::from_secs(5),
            repeat: RepeatPolicy::EveryCycle,
        }
    }
}

/// What a single cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The sensor was unavailable; nothing was evaluated.
    Skipped,
    /// The sample did not meet any condition.
    Quiet(Sample),
    /// The condition still holds but was already announced
    /// ([`RepeatPolicy::OncePerCrossing`] only).
    Suppressed(AlertKind),
    /// An alert was dispatched.
    Alerted(NotificationEvent),
}

/// Periodic threshold monitor.
pub struct MonitorLoop<S, N, R> {
    sensor: S,
    notifier: Arc<N>,
    bounds: Arc<BoundsStore<R>>,
    config: MonitorConfig,
    last_alert: Option<AlertKind>,
}

impl<S, N, R> MonitorLoop<S, N, R>
where
    S: BatterySensor + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
    R: SettingsRepository + Send + Sync + 'static,
{
    pub fn new(
        sensor: S,
        notifier: Arc<N>,
        bounds: Arc<BoundsStore<R>>,
        config: MonitorConfig,
    ) -> Self {
        Self {
            sensor,
            notifier,
            bounds,
            config,
            last_alert: None,
        }
    }

    /// Spawn the loop. The first cycle runs immediately.
    ///
    /// The loop never returns on its own; abort the handle to stop it.
    pub fn start(self) -> JoinHandle<()> {
        tracing::info!(
            interval_secs = self.config.interval.as_secs(),
            repeat = ?self.config.repeat,
            "battery monitor started"
        );
        tokio::spawn(self.run())
    }

    async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.cycle().await;
        }
    }

    /// Run one cycle: sample, read bounds, evaluate, maybe dispatch.
    pub async fn cycle(&mut self) -> CycleOutcome {
        let sample = match read_with_timeout(&self.sensor, self.config.sensor_timeout).await {
            Ok(sample) => sample,
            Err(err) => {
                tracing::warn!(error = ?err, "battery sample unavailable, skipping cycle");
                return CycleOutcome::Skipped;
            }
        };
        let bounds = self.bounds.get();

        tracing::debug!(
            percent = sample.percent(),
            power_plugged = sample.power_plugged(),
            min_charge = bounds.min_charge(),
            max_charge = bounds.max_charge(),
            "battery sampled"
        );

        let Some(kind) = policy::evaluate(sample, bounds) else {
            self.last_alert = None;
            return CycleOutcome::Quiet(sample);
        };

        if self.config.repeat == RepeatPolicy::OncePerCrossing && self.last_alert == Some(kind) {
            tracing::debug!(%kind, "condition already announced, suppressing");
            return CycleOutcome::Suppressed(kind);
        }
        self.last_alert = Some(kind);

        let event = NotificationEvent::new(kind, sample.percent(), time::now());
        tracing::info!(
            alert_id = %event.id,
            %kind,
            percent = event.percent,
            "charge threshold crossed, dispatching alert"
        );
        self.dispatch(event.clone());
        CycleOutcome::Alerted(event)
    }

    fn dispatch(&self, event: NotificationEvent) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(err) = notifier.notify(&event).await {
                tracing::warn!(alert_id = %event.id, error = ?err, "alert dispatch failed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battm_domain::bounds::{Bounds, BoundsCandidate};
    use battm_domain::error::BattmError;
    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::mpsc;

    // ── Fakes ──────────────────────────────────────────────────────

    #[derive(Debug, thiserror::Error)]
    #[error("no battery")]
    struct NoBattery;

    /// Replays scripted readings, repeating the last one forever.
    struct ScriptedSensor {
        script: Mutex<VecDeque<Option<Sample>>>,
        reads: AtomicUsize,
    }

    impl ScriptedSensor {
        fn new(script: impl IntoIterator<Item = Option<Sample>>) -> Self {
            Self {
                script: Mutex::new(script.into_iter().collect()),
                reads: AtomicUsize::new(0),
            }
        }

        fn always(sample: Sample) -> Self {
            Self::new([Some(sample)])
        }
    }

    impl BatterySensor for ScriptedSensor {
        fn read(&self) -> impl Future<Output = Result<Sample, BattmError>> + Send {
            self.reads.fetch_add(1, Ordering::SeqCst);
            let mut script = self.script.lock().unwrap();
            let next = if script.len() > 1 {
                script.pop_front().flatten()
            } else {
                script.front().copied().flatten()
            };
            let result = next.ok_or_else(|| BattmError::SensorUnavailable(Box::new(NoBattery)));
            async { result }
        }
    }

    struct StuckSensor;

    impl BatterySensor for StuckSensor {
        fn read(&self) -> impl Future<Output = Result<Sample, BattmError>> + Send {
            std::future::pending()
        }
    }

    struct RecordingNotifier {
        tx: mpsc::UnboundedSender<NotificationEvent>,
        delay: Duration,
    }

    impl RecordingNotifier {
        fn new() -> (Self, mpsc::UnboundedReceiver<NotificationEvent>) {
            Self::slow(Duration::ZERO)
        }

        fn slow(delay: Duration) -> (Self, mpsc::UnboundedReceiver<NotificationEvent>) {
            let (tx, rx) = mpsc::unbounded_channel();
            (Self { tx, delay }, rx)
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(
            &self,
            event: &NotificationEvent,
        ) -> impl Future<Output = Result<(), BattmError>> + Send {
            let tx = self.tx.clone();
            let delay = self.delay;
            let event = event.clone();
            async move {
                tokio::time::sleep(delay).await;
                let _ = tx.send(event);
                Ok(())
            }
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("no audio device")]
    struct NoAudio;

    struct FailingNotifier;

    impl Notifier for FailingNotifier {
        async fn notify(&self, _event: &NotificationEvent) -> Result<(), BattmError> {
            Err(BattmError::Notification(Box::new(NoAudio)))
        }
    }

    #[derive(Default)]
    struct InMemorySettingsRepo;

    impl SettingsRepository for InMemorySettingsRepo {
        async fn load(&self) -> Result<Option<Bounds>, BattmError> {
            Ok(None)
        }

        async fn save(&self, _bounds: Bounds) -> Result<(), BattmError> {
            Ok(())
        }
    }

    fn store() -> Arc<BoundsStore<InMemorySettingsRepo>> {
        Arc::new(BoundsStore::new(
            InMemorySettingsRepo,
            Bounds::new(20, 85).unwrap(),
        ))
    }

    fn monitor<S, N>(sensor: S, notifier: N) -> MonitorLoop<S, N, InMemorySettingsRepo>
    where
        S: BatterySensor + Send + Sync + 'static,
        N: Notifier + Send + Sync + 'static,
    {
        MonitorLoop::new(
            sensor,
            Arc::new(notifier),
            store(),
            MonitorConfig::default(),
        )
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<NotificationEvent>) -> Vec<NotificationEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    // ── Single cycles ──────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn should_alert_overcharge_when_plugged_above_max() {
        let (notifier, mut rx) = RecordingNotifier::new();
        let mut monitor = monitor(ScriptedSensor::always(Sample::new(90, true)), notifier);

        let outcome = monitor.cycle().await;

        let CycleOutcome::Alerted(event) = outcome else {
            panic!("expected an alert, got {outcome:?}");
        };
        assert_eq!(event.kind, AlertKind::Overcharge);
        assert_eq!(event.percent, 90);
        assert!(event.message.contains("90%"));

        let delivered = rx.recv().await.unwrap();
        assert_eq!(delivered.id, event.id);
    }

    #[tokio::test(start_paused = true)]
    async fn should_alert_undercharge_when_unplugged_below_min() {
        let (notifier, mut rx) = RecordingNotifier::new();
        let mut monitor = monitor(ScriptedSensor::always(Sample::new(15, false)), notifier);

        let outcome = monitor.cycle().await;

        let CycleOutcome::Alerted(event) = outcome else {
            panic!("expected an alert, got {outcome:?}");
        };
        assert_eq!(event.kind, AlertKind::Undercharge);
        assert_eq!(event.percent, 15);
        assert_eq!(rx.recv().await.unwrap().kind, AlertKind::Undercharge);
    }

    #[tokio::test(start_paused = true)]
    async fn should_stay_quiet_between_bounds() {
        let (notifier, mut rx) = RecordingNotifier::new();
        let sample = Sample::new(50, true);
        let mut monitor = monitor(ScriptedSensor::always(sample), notifier);

        assert_eq!(monitor.cycle().await, CycleOutcome::Quiet(sample));
        tokio::task::yield_now().await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn should_skip_cycle_when_sensor_unavailable() {
        let (notifier, mut rx) = RecordingNotifier::new();
        let mut monitor = monitor(ScriptedSensor::new([None]), notifier);

        assert_eq!(monitor.cycle().await, CycleOutcome::Skipped);
        tokio::task::yield_now().await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn should_skip_cycle_when_sensor_read_hangs() {
        let (notifier, _rx) = RecordingNotifier::new();
        let mut monitor = monitor(StuckSensor, notifier);

        assert_eq!(monitor.cycle().await, CycleOutcome::Skipped);
    }

    #[tokio::test(start_paused = true)]
    async fn should_use_bounds_updated_between_cycles() {
        let (notifier, _rx) = RecordingNotifier::new();
        let bounds = store();
        let mut monitor = MonitorLoop::new(
            ScriptedSensor::always(Sample::new(80, true)),
            Arc::new(notifier),
            Arc::clone(&bounds),
            MonitorConfig::default(),
        );

        assert!(matches!(monitor.cycle().await, CycleOutcome::Quiet(_)));

        let _ = bounds.set(BoundsCandidate::new(20, 80)).await.unwrap();

        assert!(matches!(monitor.cycle().await, CycleOutcome::Alerted(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn should_re_alert_every_cycle_by_default() {
        let (notifier, mut rx) = RecordingNotifier::new();
        let mut monitor = monitor(ScriptedSensor::always(Sample::new(95, true)), notifier);

        for _ in 0..3 {
            assert!(matches!(monitor.cycle().await, CycleOutcome::Alerted(_)));
        }
        tokio::task::yield_now().await;
        assert_eq!(drain(&mut rx).len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn should_alert_once_per_crossing_when_configured() {
        let (notifier, _rx) = RecordingNotifier::new();
        let sensor = ScriptedSensor::new([
            Some(Sample::new(90, true)),
            Some(Sample::new(91, true)),
            None,
            Some(Sample::new(92, true)),
            Some(Sample::new(60, false)),
            Some(Sample::new(93, true)),
        ]);
        let config = MonitorConfig {
            repeat: RepeatPolicy::OncePerCrossing,
            ..MonitorConfig::default()
        };
        let mut monitor = MonitorLoop::new(sensor, Arc::new(notifier), store(), config);

        assert!(matches!(monitor.cycle().await, CycleOutcome::Alerted(_)));
        assert_eq!(
            monitor.cycle().await,
            CycleOutcome::Suppressed(AlertKind::Overcharge)
        );
        assert_eq!(monitor.cycle().await, CycleOutcome::Skipped);
        assert_eq!(
            monitor.cycle().await,
            CycleOutcome::Suppressed(AlertKind::Overcharge)
        );
        assert!(matches!(monitor.cycle().await, CycleOutcome::Quiet(_)));
        assert!(matches!(monitor.cycle().await, CycleOutcome::Alerted(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn should_survive_notifier_failure() {
        let mut monitor = monitor(
            ScriptedSensor::always(Sample::new(10, false)),
            FailingNotifier,
        );

        assert!(matches!(monitor.cycle().await, CycleOutcome::Alerted(_)));
        tokio::task::yield_now().await;
        assert!(matches!(monitor.cycle().await, CycleOutcome::Alerted(_)));
    }

    // ── Scheduling ─────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn should_cycle_on_fixed_interval() {
        let (notifier, mut rx) = RecordingNotifier::new();
        let sensor = Arc::new(ScriptedSensor::always(Sample::new(90, true)));
        let handle = monitor(Arc::clone(&sensor), notifier).start();

        tokio::time::sleep(Duration::from_secs(181)).await;

        assert_eq!(sensor.reads.load(Ordering::SeqCst), 4);
        assert_eq!(drain(&mut rx).len(), 4);
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn should_proceed_on_schedule_after_skipped_cycle() {
        let (notifier, mut rx) = RecordingNotifier::new();
        let sensor = Arc::new(ScriptedSensor::new([None, Some(Sample::new(12, false))]));
        let handle = monitor(Arc::clone(&sensor), notifier).start();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(sensor.reads.load(Ordering::SeqCst), 1);
        assert!(drain(&mut rx).is_empty());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(sensor.reads.load(Ordering::SeqCst), 2);
        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, AlertKind::Undercharge);
        assert!(!handle.is_finished());
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_wait_for_slow_notifier() {
        let (notifier, mut rx) = RecordingNotifier::slow(Duration::from_secs(3600));
        let sensor = Arc::new(ScriptedSensor::always(Sample::new(99, true)));
        let handle = monitor(Arc::clone(&sensor), notifier).start();

        tokio::time::sleep(Duration::from_secs(121)).await;

        assert_eq!(sensor.reads.load(Ordering::SeqCst), 3);
        assert!(drain(&mut rx).is_empty());
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_when_aborted() {
        let (notifier, _rx) = RecordingNotifier::new();
        let sensor = Arc::new(ScriptedSensor::always(Sample::new(50, false)));
        let handle = monitor(Arc::clone(&sensor), notifier).start();

        tokio::time::sleep(Duration::from_secs(1)).await;
        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());

        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(sensor.reads.load(Ordering::SeqCst), 1);
    }
}
