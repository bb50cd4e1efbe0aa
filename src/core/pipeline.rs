//! Record pipeline: enrichment and filtering before dispatch
//!
//! A pipeline is an ordered list of stages. Each stage takes a record and
//! either hands it on (possibly modified) or drops it by returning `None`.
//! The pipeline runs once per log call, before any sink sees the record.

use super::record::{LogRecord, HOST_NAME_FIELD, USER_ID_FIELD};
use std::fmt;

/// One step of the record pipeline
pub trait Stage: Send + Sync {
    fn apply(&self, record: LogRecord) -> Option<LogRecord>;

    fn name(&self) -> &str {
        "stage"
    }
}

impl<F> Stage for F
where
    F: Fn(LogRecord) -> Option<LogRecord> + Send + Sync,
{
    fn apply(&self, record: LogRecord) -> Option<LogRecord> {
        self(record)
    }

    fn name(&self) -> &str {
        "custom"
    }
}

/// Process-scoped values stamped onto every record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub host_name: String,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, host_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            host_name: host_name.into(),
        }
    }

    /// Snapshot the machine host name for the given user id
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self::new(user_id, local_host_name())
    }
}

/// Machine host name, or `"unknown"` if it is not valid UTF-8
pub fn local_host_name() -> String {
    gethostname::gethostname()
        .into_string()
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Sets `userId` and `hostName` on every record. Never drops.
#[derive(Debug, Clone)]
pub struct Enrich {
    identity: Identity,
}

impl Enrich {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl Stage for Enrich {
    fn apply(&self, mut record: LogRecord) -> Option<LogRecord> {
        record
            .fields
            .set(USER_ID_FIELD, self.identity.user_id.as_str());
        record
            .fields
            .set(HOST_NAME_FIELD, self.identity.host_name.as_str());
        Some(record)
    }

    fn name(&self) -> &str {
        "enrich"
    }
}

/// Drops records flagged private
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnorePrivate;

impl Stage for IgnorePrivate {
    fn apply(&self, record: LogRecord) -> Option<LogRecord> {
        if record.private {
            None
        } else {
            Some(record)
        }
    }

    fn name(&self) -> &str {
        "ignore_private"
    }
}

/// Ordered chain of stages, shared by all sinks
#[derive(Default)]
pub struct RecordPipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl RecordPipeline {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Enrichment followed by the privacy filter
    pub fn standard(identity: Identity) -> Self {
        Self::new().stage(Enrich::new(identity)).stage(IgnorePrivate)
    }

    #[must_use]
    pub fn stage<S: Stage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn push(&mut self, stage: Box<dyn Stage>) {
        self.stages.push(stage);
    }

    /// Run all stages in order, stopping at the first one that drops
    pub fn run(&self, record: LogRecord) -> Option<LogRecord> {
        self.stages
            .iter()
            .try_fold(record, |record, stage| stage.apply(record))
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl fmt::Debug for RecordPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.stages.iter().map(|s| s.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn identity() -> Identity {
        Identity::new("2123409", "test-host")
    }

    #[test]
    fn test_enrich_sets_identity() {
        let record = Enrich::new(identity())
            .apply(LogRecord::new("info", "hello"))
            .unwrap();
        assert_eq!(record.user_id(), Some("2123409"));
        assert_eq!(record.host_name(), Some("test-host"));
    }

    #[test]
    fn test_enrich_is_idempotent() {
        let stage = Enrich::new(identity());
        let once = stage.apply(LogRecord::new("info", "hello")).unwrap();
        let twice = stage.apply(once.clone()).unwrap();

        assert_eq!(once.fields, twice.fields);
        assert_eq!(twice.fields.len(), 2);
    }

    #[test]
    fn test_enrich_overrides_caller_value() {
        let mut record = LogRecord::new("info", "spoof");
        record.fields.set(USER_ID_FIELD, "someone-else");
        let record = Enrich::new(identity()).apply(record).unwrap();
        assert_eq!(record.user_id(), Some("2123409"));
    }

    #[test]
    fn test_ignore_private() {
        assert!(IgnorePrivate
            .apply(LogRecord::new("security", "x").with_private(true))
            .is_none());
        assert!(IgnorePrivate.apply(LogRecord::new("security", "x")).is_some());
    }

    #[test]
    fn test_pipeline_short_circuits() {
        let after_filter = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&after_filter);

        let pipeline = RecordPipeline::standard(identity()).stage(move |record: LogRecord| {
            counter.fetch_add(1, Ordering::SeqCst);
            Some(record)
        });

        assert!(pipeline
            .run(LogRecord::new("security", "x").with_private(true))
            .is_none());
        assert_eq!(after_filter.load(Ordering::SeqCst), 0);

        assert!(pipeline.run(LogRecord::new("security", "x")).is_some());
        assert_eq!(after_filter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_stages_run_in_order() {
        let pipeline = RecordPipeline::new()
            .stage(|mut r: LogRecord| {
                r.message.push('a');
                Some(r)
            })
            .stage(|mut r: LogRecord| {
                r.message.push('b');
                Some(r)
            });

        let record = pipeline.run(LogRecord::new("info", "")).unwrap();
        assert_eq!(record.message, "ab");
        assert_eq!(format!("{:?}", pipeline), r#"["custom", "custom"]"#);
    }

    #[test]
    fn test_empty_pipeline_passes_through() {
        let pipeline = RecordPipeline::new();
        let record = LogRecord::new("debug", "m").with_private(true);
        assert_eq!(pipeline.run(record.clone()), Some(record));
    }
}
