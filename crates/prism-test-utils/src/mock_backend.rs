//! Scripted generation backend for testing.
//!
//! [`MockGenerationBackend`] answers requests on a fixed script and
//! records every call, without threads or a GPU.

use parking_lot::Mutex;
use prism_charts::{
    ChartError, ChartResult, GenerationBackend, GenerationRequest, GenerationResponse, RequestId,
    generate_boxes,
};
use std::sync::Arc;

/// Records a backend call for verification in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationCall {
    Submit { id: RequestId, box_count: usize },
    Poll { id: RequestId },
}

/// How the backend answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockMode {
    /// The first poll returns the result.
    Immediate,
    /// The result appears on the `n`th poll of a request.
    DeliverAfter(u32),
    /// Never answers.
    Stall,
    /// The first `n` polls return a result flagged invalid.
    InvalidFirst(u32),
    /// Every submit fails.
    RejectSubmits,
}

#[derive(Debug)]
struct Pending {
    id: RequestId,
    request: GenerationRequest,
    polls: u32,
}

#[derive(Debug)]
struct MockState {
    mode: MockMode,
    calls: Vec<GenerationCall>,
    pending: Option<Pending>,
}

/// Mock implementation of [`GenerationBackend`].
///
/// # Example
///
/// ```rust
/// use prism_charts::{GenerationBackend, GenerationRequest};
/// use prism_test_utils::MockGenerationBackend;
///
/// let mut backend = MockGenerationBackend::immediate();
/// let request = GenerationRequest {
///     row_count: 1,
///     col_count: 2,
///     cell_width: 10.0,
///     cell_height: 10.0,
///     spacing_x: 3.0,
///     spacing_y: 3.0,
///     heights: vec![4.0, 8.0],
/// };
/// backend.submit(0, request).unwrap();
///
/// let response = backend.poll(0).unwrap();
/// assert!(response.valid);
/// assert_eq!(backend.count_polls(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockGenerationBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockGenerationBackend {
    pub fn new(mode: MockMode) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                mode,
                calls: Vec::new(),
                pending: None,
            })),
        }
    }

    pub fn immediate() -> Self {
        Self::new(MockMode::Immediate)
    }

    pub fn deliver_after(polls: u32) -> Self {
        Self::new(MockMode::DeliverAfter(polls))
    }

    pub fn stalled() -> Self {
        Self::new(MockMode::Stall)
    }

    pub fn invalid_first(polls: u32) -> Self {
        Self::new(MockMode::InvalidFirst(polls))
    }

    /// Change the script. Applies to the pending request too.
    pub fn set_mode(&self, mode: MockMode) {
        self.state.lock().mode = mode;
    }

    /// Get a copy of all recorded calls.
    pub fn calls(&self) -> Vec<GenerationCall> {
        self.state.lock().calls.clone()
    }

    /// Ids of every accepted submit, in order.
    pub fn submitted_ids(&self) -> Vec<RequestId> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                GenerationCall::Submit { id, .. } => Some(*id),
                GenerationCall::Poll { .. } => None,
            })
            .collect()
    }

    pub fn count_submits(&self) -> usize {
        self.submitted_ids().len()
    }

    pub fn count_polls(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| matches!(call, GenerationCall::Poll { .. }))
            .count()
    }

    /// Id of the request the backend is working on.
    pub fn pending_id(&self) -> Option<RequestId> {
        self.state.lock().pending.as_ref().map(|p| p.id)
    }
}

impl GenerationBackend for MockGenerationBackend {
    fn submit(&mut self, id: RequestId, request: GenerationRequest) -> ChartResult<()> {
        let mut state = self.state.lock();
        if state.mode == MockMode::RejectSubmits {
            return Err(ChartError::UnsupportedInput {
                chart: "mock",
                input: "generation request",
            });
        }
        state.calls.push(GenerationCall::Submit {
            id,
            box_count: request.box_count(),
        });
        state.pending = Some(Pending {
            id,
            request,
            polls: 0,
        });
        Ok(())
    }

    fn poll(&mut self, id: RequestId) -> Option<GenerationResponse> {
        let mut state = self.state.lock();
        state.calls.push(GenerationCall::Poll { id });
        let mode = state.mode;

        let pending = state.pending.as_mut().filter(|p| p.id == id)?;
        pending.polls += 1;
        let (deliver, valid) = match mode {
            MockMode::Immediate => (true, true),
            MockMode::DeliverAfter(n) => (pending.polls >= n, true),
            MockMode::Stall | MockMode::RejectSubmits => (false, true),
            MockMode::InvalidFirst(n) => (true, pending.polls > n),
        };
        if !deliver {
            return None;
        }

        let mut response = generate_boxes(&pending.request).ok()?;
        response.valid = valid;
        if valid {
            state.pending = None;
        }
        Some(response)
    }
}
