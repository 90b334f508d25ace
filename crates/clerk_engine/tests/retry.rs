use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use clerk_engine::{
    lookup_with_retry, EngineEvent, LookupError, LookupFailureKind, LookupOutcome, NullSink,
    ProgressSink, RetryPolicy, Sleeper, StatusLookup,
};
use pretty_assertions::assert_eq;

/// Lookup stub that replays a scripted sequence of attempt results.
struct ScriptedLookup {
    script: Mutex<VecDeque<Result<LookupOutcome, LookupError>>>,
    calls: Mutex<u32>,
}

impl ScriptedLookup {
    fn new(script: Vec<Result<LookupOutcome, LookupError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(0),
        }
    }

    fn calls(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl StatusLookup for ScriptedLookup {
    async fn lookup(&self, _number: &str) -> Result<LookupOutcome, LookupError> {
        *self.calls.lock().unwrap() += 1;
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted attempt available")
    }
}

/// Sleeper that records requested delays instead of waiting.
#[derive(Default)]
struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<EngineEvent>>,
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn transient(message: &str) -> LookupError {
    LookupError::new(LookupFailureKind::Network, message)
}

fn policy(max_attempts: u32, initial_delay: Duration) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        initial_delay,
    }
}

#[tokio::test]
async fn two_failures_then_success_sleeps_d_then_2d() {
    let lookup = ScriptedLookup::new(vec![
        Err(transient("connection reset")),
        Err(transient("connection reset")),
        Ok(LookupOutcome::Rejected),
    ]);
    let sleeper = RecordingSleeper::default();
    let initial = Duration::from_millis(50);

    let outcome =
        lookup_with_retry(&lookup, "800/1/2024", &policy(3, initial), &sleeper, &NullSink).await;

    assert_eq!(outcome, LookupOutcome::Rejected);
    assert_eq!(lookup.calls(), 3);
    assert_eq!(sleeper.delays(), vec![initial, initial * 2]);
}

#[tokio::test]
async fn exhaustion_returns_transient_error_after_exactly_max_attempts() {
    let lookup = ScriptedLookup::new(vec![
        Err(transient("dns failure")),
        Err(transient("dns failure")),
        Err(transient("dns failure, still")),
    ]);
    let sleeper = RecordingSleeper::default();
    let initial = Duration::from_millis(10);

    let outcome =
        lookup_with_retry(&lookup, "800/2/2024", &policy(3, initial), &sleeper, &NullSink).await;

    assert_eq!(lookup.calls(), 3);
    // No sleep after the final attempt.
    assert_eq!(sleeper.delays(), vec![initial, initial * 2]);
    match outcome {
        LookupOutcome::TransientError { detail, attempts } => {
            assert_eq!(attempts, 3);
            assert!(detail.contains("dns failure, still"), "detail: {detail}");
        }
        other => panic!("expected TransientError, got {other:?}"),
    }
}

#[tokio::test]
async fn classified_outcomes_do_not_retry() {
    for outcome in [
        LookupOutcome::NotFound,
        LookupOutcome::Rejected,
        LookupOutcome::Pending,
        LookupOutcome::Unrecognized {
            status: "Dikembalikan".to_string(),
        },
    ] {
        let lookup = ScriptedLookup::new(vec![Ok(outcome.clone())]);
        let sleeper = RecordingSleeper::default();

        let result = lookup_with_retry(
            &lookup,
            "800/3/2024",
            &policy(3, Duration::from_millis(10)),
            &sleeper,
            &NullSink,
        )
        .await;

        assert_eq!(result, outcome);
        assert_eq!(lookup.calls(), 1);
        assert!(sleeper.delays().is_empty());
    }
}

#[tokio::test]
async fn retry_events_announce_each_wait() {
    let lookup = ScriptedLookup::new(vec![
        Err(transient("timeout")),
        Ok(LookupOutcome::Pending),
    ]);
    let sleeper = RecordingSleeper::default();
    let sink = RecordingSink::default();
    let initial = Duration::from_millis(25);

    lookup_with_retry(&lookup, "800/4/2024", &policy(3, initial), &sleeper, &sink).await;

    let events = sink.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            EngineEvent::LookupStarted {
                number: "800/4/2024".to_string(),
                attempt: 1,
            },
            EngineEvent::LookupRetrying {
                number: "800/4/2024".to_string(),
                attempt: 1,
                delay: initial,
            },
            EngineEvent::LookupStarted {
                number: "800/4/2024".to_string(),
                attempt: 2,
            },
        ]
    );
}

#[tokio::test]
async fn zero_max_attempts_still_runs_once() {
    let lookup = ScriptedLookup::new(vec![Ok(LookupOutcome::NotFound)]);
    let sleeper = RecordingSleeper::default();

    let outcome = lookup_with_retry(
        &lookup,
        "800/5/2024",
        &policy(0, Duration::from_millis(10)),
        &sleeper,
        &NullSink,
    )
    .await;

    assert_eq!(outcome, LookupOutcome::NotFound);
    assert_eq!(lookup.calls(), 1);
}
