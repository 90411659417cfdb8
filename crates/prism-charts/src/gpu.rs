//! GPU geometry generation handoff.
//!
//! A [`GenerationBackend`] builds box-grid geometry somewhere else (a
//! compute pass, a worker pool) and hands the result back when polled.
//! [`GeometryGenerator`] owns the backend for one chart and enforces the
//! handoff rules:
//! - At most one request is outstanding.
//! - [`set_parameters`](GeometryGenerator::set_parameters) marks the
//!   outstanding request stale; its result is dropped when it arrives.
//! - A response with `valid == false` is partially written and is treated
//!   as not ready yet.
//! - A request unanswered for [`GenerationConfig::poll_budget`] frames is
//!   abandoned; [`retry`](GeometryGenerator::retry) resubmits it.

use crate::error::{ChartError, ChartResult};
use glam::{Vec2, Vec3, Vec4};
use prism_core::profiling::profile_function;
use prism_mesh::{BOX_INDEX_COUNT, BOX_VERTEX_COUNT, BoxSpec, LinearColor, MeshSection, build_box};

/// Identifies one submitted request.
pub type RequestId = u64;

/// Generation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Frames to wait for a result before giving up on a request.
    pub poll_budget: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { poll_budget: 120 }
    }
}

/// Box-grid parameters sent to a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub row_count: u32,
    pub col_count: u32,
    /// Box extent along X.
    pub cell_width: f32,
    /// Box extent along Y.
    pub cell_height: f32,
    pub spacing_x: f32,
    pub spacing_y: f32,
    /// Row-major box heights, `row_count * col_count` of them.
    pub heights: Vec<f32>,
}

impl GenerationRequest {
    pub fn box_count(&self) -> usize {
        self.row_count as usize * self.col_count as usize
    }

    pub fn expected_vertices(&self) -> usize {
        self.box_count() * BOX_VERTEX_COUNT
    }

    pub fn expected_indices(&self) -> usize {
        self.box_count() * BOX_INDEX_COUNT
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.heights.len() != self.box_count() {
            return Err(ChartError::HeightCountMismatch {
                expected: self.box_count(),
                actual: self.heights.len(),
            });
        }
        Ok(())
    }

    /// World origin of box `(row, col)`.
    pub fn cell_origin(&self, row: u32, col: u32) -> Vec3 {
        Vec3::new(
            col as f32 * (self.cell_width + self.spacing_x),
            row as f32 * (self.cell_height + self.spacing_y),
            0.0,
        )
    }
}

/// Geometry returned by a backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationResponse {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub colors: Vec<LinearColor>,
    pub tangents: Vec<Vec4>,
    /// Set once every buffer is completely written.
    pub valid: bool,
}

impl GenerationResponse {
    /// Copy the buffers into a mesh section.
    pub fn to_section(&self) -> MeshSection {
        MeshSection {
            vertices: self.vertices.clone(),
            indices: self.indices.clone(),
            normals: self.normals.clone(),
            uvs: self.uvs.clone(),
            tangents: self.tangents.clone(),
            colors: self.colors.clone(),
        }
    }
}

/// Build the response a backend is expected to produce, on the CPU.
pub fn generate_boxes(request: &GenerationRequest) -> ChartResult<GenerationResponse> {
    profile_function!();
    request.validate()?;

    let mut section = MeshSection::with_capacity(request.expected_vertices(), request.expected_indices());
    for row in 0..request.row_count {
        for col in 0..request.col_count {
            let height = request.heights[(row * request.col_count + col) as usize];
            build_box(
                &mut section,
                &BoxSpec::flat(
                    request.cell_origin(row, col),
                    request.cell_width,
                    request.cell_height,
                    height,
                    LinearColor::WHITE,
                ),
            );
        }
    }

    Ok(GenerationResponse {
        vertices: section.vertices,
        indices: section.indices,
        normals: section.normals,
        uvs: section.uvs,
        colors: section.colors,
        tangents: section.tangents,
        valid: true,
    })
}

/// Something that turns requests into geometry asynchronously.
pub trait GenerationBackend: Send {
    /// Start work on a request.
    fn submit(&mut self, id: RequestId, request: GenerationRequest) -> ChartResult<()>;

    /// Result for `id`, if one has arrived.
    fn poll(&mut self, id: RequestId) -> Option<GenerationResponse>;
}

/// Where the generator is in its request cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationStatus {
    #[default]
    Idle,
    Pending,
    Ready,
    TimedOut,
}

#[derive(Debug, Clone)]
struct Outstanding {
    id: RequestId,
    request: GenerationRequest,
    frames: u32,
    stale: bool,
}

/// Owns a backend and the single outstanding request of one chart.
pub struct GeometryGenerator {
    backend: Box<dyn GenerationBackend>,
    config: GenerationConfig,
    next_id: RequestId,
    queued: Option<GenerationRequest>,
    outstanding: Option<Outstanding>,
    last_request: Option<GenerationRequest>,
    status: GenerationStatus,
}

impl std::fmt::Debug for GeometryGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeometryGenerator")
            .field("config", &self.config)
            .field("next_id", &self.next_id)
            .field("queued", &self.queued.is_some())
            .field("outstanding", &self.outstanding.as_ref().map(|o| o.id))
            .field("status", &self.status)
            .finish()
    }
}

impl GeometryGenerator {
    pub fn new(backend: Box<dyn GenerationBackend>, config: GenerationConfig) -> Self {
        Self {
            backend,
            config,
            next_id: 0,
            queued: None,
            outstanding: None,
            last_request: None,
            status: GenerationStatus::Idle,
        }
    }

    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    pub fn outstanding_id(&self) -> Option<RequestId> {
        self.outstanding.as_ref().map(|o| o.id)
    }

    pub fn has_queued(&self) -> bool {
        self.queued.is_some()
    }

    /// Queue new parameters. Any outstanding request becomes stale.
    pub fn set_parameters(&mut self, request: GenerationRequest) -> ChartResult<()> {
        if let Err(err) = request.validate() {
            tracing::warn!("Generation request rejected: {}", err);
            return Err(err);
        }
        if let Some(outstanding) = &mut self.outstanding {
            tracing::debug!("Request {} is now stale", outstanding.id);
            outstanding.stale = true;
        }
        self.last_request = Some(request.clone());
        self.queued = Some(request);
        Ok(())
    }

    /// Resubmit the last request after a timeout.
    pub fn retry(&mut self) -> bool {
        if self.outstanding.is_some() || self.queued.is_some() {
            return false;
        }
        match &self.last_request {
            Some(request) => {
                self.queued = Some(request.clone());
                true
            }
            None => false,
        }
    }

    fn submit_queued(&mut self) -> ChartResult<()> {
        let Some(request) = self.queued.take() else {
            return Ok(());
        };
        let id = self.next_id;
        self.next_id += 1;
        self.backend.submit(id, request.clone()).inspect_err(|e| {
            tracing::error!("Generation backend refused request {}: {}", id, e);
            self.status = GenerationStatus::Idle;
        })?;
        tracing::debug!("Submitted generation request {}", id);
        self.outstanding = Some(Outstanding {
            id,
            request,
            frames: 0,
            stale: false,
        });
        self.status = GenerationStatus::Pending;
        Ok(())
    }

    /// Advance one frame. Returns a fresh, valid result when one arrives.
    pub fn update(&mut self) -> ChartResult<Option<GenerationResponse>> {
        profile_function!();

        let Some(mut outstanding) = self.outstanding.take() else {
            self.submit_queued()?;
            return Ok(None);
        };

        outstanding.frames += 1;
        match self.backend.poll(outstanding.id) {
            Some(_) if outstanding.stale => {
                tracing::debug!("Discarding stale result {}", outstanding.id);
                self.status = GenerationStatus::Idle;
                self.submit_queued()?;
                return Ok(None);
            }
            Some(response) if response.valid => {
                if response.vertices.len() != outstanding.request.expected_vertices()
                    || response.indices.len() != outstanding.request.expected_indices()
                {
                    tracing::warn!(
                        "Generation result {} has {} vertices / {} indices, expected {} / {}",
                        outstanding.id,
                        response.vertices.len(),
                        response.indices.len(),
                        outstanding.request.expected_vertices(),
                        outstanding.request.expected_indices()
                    );
                    self.status = GenerationStatus::Idle;
                    return Ok(None);
                }
                self.status = GenerationStatus::Ready;
                return Ok(Some(response));
            }
            Some(_) | None => {}
        }

        if outstanding.frames >= self.config.poll_budget {
            if outstanding.stale {
                self.status = GenerationStatus::Idle;
                self.submit_queued()?;
                return Ok(None);
            }
            tracing::warn!(
                "Generation request {} unanswered after {} frames",
                outstanding.id,
                outstanding.frames
            );
            self.status = GenerationStatus::TimedOut;
            return Err(ChartError::GenerationTimedOut {
                request_id: outstanding.id,
                frames: outstanding.frames,
            });
        }

        self.outstanding = Some(outstanding);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Answers each request after a fixed number of polls.
    #[derive(Default)]
    struct DelayedBackend {
        delay: u32,
        pending: HashMap<RequestId, (GenerationRequest, u32)>,
        submitted: Vec<RequestId>,
    }

    impl GenerationBackend for DelayedBackend {
        fn submit(&mut self, id: RequestId, request: GenerationRequest) -> ChartResult<()> {
            self.submitted.push(id);
            self.pending.insert(id, (request, 0));
            Ok(())
        }

        fn poll(&mut self, id: RequestId) -> Option<GenerationResponse> {
            let (request, polls) = self.pending.get_mut(&id)?;
            *polls += 1;
            if *polls > self.delay {
                generate_boxes(request).ok()
            } else {
                None
            }
        }
    }

    fn request(rows: u32, cols: u32) -> GenerationRequest {
        GenerationRequest {
            row_count: rows,
            col_count: cols,
            cell_width: 10.0,
            cell_height: 10.0,
            spacing_x: 3.0,
            spacing_y: 3.0,
            heights: vec![5.0; (rows * cols) as usize],
        }
    }

    #[test]
    fn test_generate_boxes_sizes() {
        let response = generate_boxes(&request(2, 3)).unwrap();
        assert_eq!(response.vertices.len(), 6 * 24);
        assert_eq!(response.indices.len(), 6 * 36);
        assert!(response.valid);
        assert!(response.to_section().is_consistent());
    }

    #[test]
    fn test_height_count_mismatch() {
        let mut bad = request(2, 2);
        bad.heights.pop();
        assert!(matches!(
            generate_boxes(&bad),
            Err(ChartError::HeightCountMismatch { expected: 4, actual: 3 })
        ));
    }

    #[test]
    fn test_result_arrives_after_delay() {
        let backend = DelayedBackend {
            delay: 2,
            ..Default::default()
        };
        let mut generator = GeometryGenerator::new(Box::new(backend), GenerationConfig::default());
        generator.set_parameters(request(1, 2)).unwrap();

        assert!(generator.update().unwrap().is_none(), "frame 0 submits");
        assert_eq!(generator.status(), GenerationStatus::Pending);
        assert!(generator.update().unwrap().is_none());
        assert!(generator.update().unwrap().is_none());
        let response = generator.update().unwrap().unwrap();
        assert_eq!(response.vertices.len(), 48);
        assert_eq!(generator.status(), GenerationStatus::Ready);
    }

    #[test]
    fn test_timeout_then_retry() {
        let backend = DelayedBackend {
            delay: u32::MAX,
            ..Default::default()
        };
        let mut generator =
            GeometryGenerator::new(Box::new(backend), GenerationConfig { poll_budget: 3 });
        generator.set_parameters(request(1, 1)).unwrap();
        generator.update().unwrap();
        generator.update().unwrap();
        generator.update().unwrap();
        assert!(matches!(
            generator.update(),
            Err(ChartError::GenerationTimedOut { request_id: 0, frames: 3 })
        ));
        assert_eq!(generator.status(), GenerationStatus::TimedOut);
        assert_eq!(generator.outstanding_id(), None);

        assert!(generator.retry());
        generator.update().unwrap();
        assert_eq!(generator.outstanding_id(), Some(1));
    }
}
