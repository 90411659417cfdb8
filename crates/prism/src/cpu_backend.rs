//! Box-grid generation on the [`TaskPool`].

use crate::task_pool::TaskPool;
use async_executor::Task;
use futures_lite::future;
use prism_charts::{
    ChartResult, GenerationBackend, GenerationRequest, GenerationResponse, RequestId,
    generate_boxes,
};
use std::sync::Arc;

/// A [`GenerationBackend`] that builds the box grid on worker threads.
///
/// Produces the same vertex layout a compute pass would: 24 vertices and
/// 36 indices per box. Only the latest submission is kept; submitting again
/// cancels the previous task.
pub struct CpuBoxBackend {
    pool: Arc<TaskPool>,
    pending: Option<(RequestId, Task<ChartResult<GenerationResponse>>)>,
}

impl std::fmt::Debug for CpuBoxBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuBoxBackend")
            .field("pool", &self.pool)
            .field("pending", &self.pending.as_ref().map(|(id, _)| *id))
            .finish()
    }
}

impl CpuBoxBackend {
    pub fn new(pool: Arc<TaskPool>) -> Self {
        Self {
            pool,
            pending: None,
        }
    }

    pub fn pending_id(&self) -> Option<RequestId> {
        self.pending.as_ref().map(|(id, _)| *id)
    }
}

impl GenerationBackend for CpuBoxBackend {
    fn submit(&mut self, id: RequestId, request: GenerationRequest) -> ChartResult<()> {
        request.validate()?;
        let boxes = request.box_count();
        let task = self.pool.spawn(async move { generate_boxes(&request) });
        if let Some((previous, _)) = self.pending.replace((id, task)) {
            tracing::debug!("Cancelled generation task {}", previous);
        }
        tracing::trace!("Spawned generation task {} for {} boxes", id, boxes);
        Ok(())
    }

    fn poll(&mut self, id: RequestId) -> Option<GenerationResponse> {
        let (pending, task) = self.pending.as_mut()?;
        if *pending != id {
            return None;
        }
        let result = future::block_on(future::poll_once(task))?;
        self.pending = None;
        match result {
            Ok(response) => Some(response),
            Err(err) => {
                tracing::warn!("Generation task {} failed: {}", id, err);
                None
            }
        }
    }
}
