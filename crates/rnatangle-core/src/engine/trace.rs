use crate::core::models::loops::LoopKind;

/// Diagnostic events emitted by the detection pipeline.
///
/// Replaces ambient debug flags: callers that want visibility pass a reporter
/// in; everyone else pays nothing.
#[derive(Debug, Clone)]
pub enum TraceEvent {
    PhaseStart {
        name: &'static str,
    },
    PhaseFinish,

    /// Result of the optional pseudoknot pre-filter.
    MainLayerExtracted {
        kept: usize,
        dropped: usize,
    },
    LoopsBuilt {
        count: usize,
    },
    SurfaceBuilt {
        loop_id: usize,
        kind: LoopKind,
        testable: bool,
        triangles: usize,
    },
    Hit {
        loop_id: usize,
        segment_id: usize,
    },

    Message(String),
}

pub type TraceCallback<'a> = Box<dyn Fn(TraceEvent) + Send + Sync + 'a>;

/// Callback-based diagnostics sink for the detection pipeline.
#[derive(Default)]
pub struct TraceReporter<'a> {
    callback: Option<TraceCallback<'a>>,
}

impl<'a> TraceReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: TraceCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: TraceEvent) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
