use std::io;
use std::sync::{Arc, Mutex};

use csv_analyzer::ingestion::{
    load_from_path, CompositeObserver, LoadContext, LoadObserver, LoadOptions, LoadSeverity,
    LoadStats, TracingObserver,
};
use csv_analyzer::LoadError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<LoadStats>>,
    failures: Mutex<Vec<LoadSeverity>>,
    alerts: Mutex<Vec<LoadSeverity>>,
}

impl LoadObserver for RecordingObserver {
    fn on_success(&self, _ctx: &LoadContext, stats: LoadStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &LoadError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &LoadError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn options(observer: Arc<dyn LoadObserver>) -> LoadOptions {
    LoadOptions {
        observer: Some(observer),
        alert_at_or_above: LoadSeverity::Critical,
        ..Default::default()
    }
}

#[test]
fn observer_receives_failure_and_alert_on_missing_file() {
    let obs = Arc::new(RecordingObserver::default());

    // Missing file -> NotFound -> Critical
    let _ = load_from_path("tests/fixtures/does_not_exist.csv", &options(obs.clone())).unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![LoadSeverity::Critical]);
    assert_eq!(*obs.alerts.lock().unwrap(), vec![LoadSeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_malformed_content() {
    let obs = Arc::new(RecordingObserver::default());

    let _ = load_from_path("tests/fixtures/ragged.csv", &options(obs.clone())).unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![LoadSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn composite_observer_fans_out_success() {
    let a = Arc::new(RecordingObserver::default());
    let b = Arc::new(RecordingObserver::default());
    let composite = Arc::new(CompositeObserver::new(vec![a.clone(), b.clone()]));

    let ds = load_from_path("tests/fixtures/people.csv", &options(composite)).unwrap();

    let expected = LoadStats {
        rows: ds.row_count(),
        columns: ds.column_count(),
    };
    assert_eq!(*a.successes.lock().unwrap(), vec![expected]);
    assert_eq!(*b.successes.lock().unwrap(), vec![expected]);
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn tracing_observer_leaves_failures_to_the_caller() {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let err = tracing::subscriber::with_default(subscriber, || {
        load_from_path("tests/fixtures/does_not_exist.csv", &options(Arc::new(TracingObserver)))
            .unwrap_err()
    });
    assert!(matches!(err, LoadError::NotFound { .. }));

    let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    assert!(!logs.contains("ERROR"), "{logs}");
    assert!(!logs.contains("WARN"), "{logs}");
    assert_eq!(logs.lines().filter(|l| l.contains("DEBUG")).count(), 2, "{logs}");
    assert!(!logs.contains('\u{1b}'), "ANSI escape in log output: {logs}");
}
