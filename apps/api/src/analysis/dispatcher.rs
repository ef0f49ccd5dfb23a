//! Dispatcher — runs at most one analysis per session against the completion backend.
//!
//! A session is one open form page. Overlapping submissions from the same
//! session are rejected with `AnalysisError::Busy` rather than queued; other
//! sessions are unaffected. The session's in-flight entry is held by a guard,
//! so it is released on every exit path, including when the caller drops the
//! future.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Serialize;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::report::{parse_report, AnalysisReport};
use crate::analysis::request::AnalysisRequest;
use crate::analysis::AnalysisError;
use crate::llm_client::CompletionBackend;

/// A finished analysis and the facts about the input it was built from.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub input_chars: usize,
    pub truncated: bool,
    pub report: AnalysisReport,
}

#[derive(Clone)]
pub struct Dispatcher {
    backend: Arc<dyn CompletionBackend>,
    /// Sessions with an analysis in flight.
    in_flight: Arc<DashMap<String, ()>>,
    max_input_chars: usize,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn CompletionBackend>, max_input_chars: usize) -> Self {
        Self {
            backend,
            in_flight: Arc::new(DashMap::new()),
            max_input_chars,
        }
    }

    /// Validates `raw`, sends it once, and parses the reply.
    /// Empty input returns before anything is sent or marked in flight.
    pub async fn dispatch(&self, session: &str, raw: &str) -> Result<Analysis, AnalysisError> {
        let request = AnalysisRequest::new(raw, self.max_input_chars)?;
        let _guard = InFlightGuard::acquire(&self.in_flight, session).ok_or(AnalysisError::Busy)?;

        let analysis_id = Uuid::new_v4();
        let span = info_span!("analysis", %analysis_id, session);

        async move {
            info!(
                "Dispatching analysis ({} chars{})",
                request.char_count(),
                if request.was_truncated() { ", truncated" } else { "" }
            );

            let result = self.run(&request).await;

            match &result {
                Ok(report) => info!(
                    "Analysis complete: score={} verdict={}",
                    report.score,
                    report.verdict.label()
                ),
                Err(e) => error!("Analysis failed: {e}"),
            }

            result.map(|report| Analysis {
                analysis_id,
                analyzed_at: Utc::now(),
                input_chars: request.char_count(),
                truncated: request.was_truncated(),
                report,
            })
        }
        .instrument(span)
        .await
    }

    async fn run(&self, request: &AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
        let reply = self.backend.complete(request.as_completion()).await?;
        Ok(parse_report(&reply)?)
    }
}

/// Holds one session's in-flight entry; removes it on drop.
struct InFlightGuard<'a> {
    sessions: &'a DashMap<String, ()>,
    session: String,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(sessions: &'a DashMap<String, ()>, session: &str) -> Option<Self> {
        match sessions.entry(session.to_string()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(());
                Some(Self {
                    sessions,
                    session: session.to_string(),
                })
            }
        }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.sessions.remove(&self.session);
    }
}
