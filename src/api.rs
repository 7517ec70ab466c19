//! Request/response contract of the cutting service.
//!
//! Transport-agnostic: callers hand in a parsed [`CutRequest`] and receive a
//! [`CutResponse`] or an [`ErrorResponse`], both ready for JSON encoding.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{OptimizeError, PieceId, RunError};
use crate::model::{OptimizationResult, Piece, PieceKind, Placement, Sheet, SheetSummary};
use crate::optimizer::{CutConfig, optimize_with_config};
use crate::runner::optimize_with_deadline;

/// One element to cut.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRequest {
    pub id: PieceId,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub allow_rotation: Option<bool>,
    #[serde(default, rename = "type")]
    pub kind: Option<PieceKind>,
}

impl ElementRequest {
    fn into_piece(self) -> Piece {
        Piece {
            id: self.id,
            width: self.width,
            height: self.height,
            allow_rotation: self.allow_rotation.unwrap_or(true),
            kind: self.kind,
        }
    }
}

/// Cutting request as sent by the design tool.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CutRequest {
    pub sheet_width: f64,
    pub sheet_height: f64,
    #[serde(default)]
    pub elements: Vec<ElementRequest>,
    #[serde(default)]
    pub allow_rotation: Option<bool>,
    #[serde(default)]
    pub max_sheets: Option<usize>,
}

/// Inputs of one optimizer run.
#[derive(Clone, Debug)]
pub struct CutJob {
    pub sheet: Sheet,
    pub pieces: Vec<Piece>,
    pub config: CutConfig,
}

impl CutRequest {
    /// Applies request-level options on top of the process configuration.
    pub fn apply_overrides(&self, mut config: CutConfig) -> CutConfig {
        if let Some(allow_rotation) = self.allow_rotation {
            config.allow_rotation = allow_rotation;
        }
        if let Some(max_sheets) = self.max_sheets {
            config.max_sheets = max_sheets;
        }
        config
    }

    /// Splits the request into optimizer inputs. Values are validated by the
    /// optimizer, so nothing is rejected here.
    pub fn into_job(self, base: CutConfig) -> CutJob {
        let config = self.apply_overrides(base);
        CutJob {
            sheet: Sheet {
                width: self.sheet_width,
                height: self.sheet_height,
            },
            pieces: self
                .elements
                .into_iter()
                .map(ElementRequest::into_piece)
                .collect(),
            config,
        }
    }
}

/// A placed element in the response.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedElement {
    pub id: PieceId,
    pub sheet_index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotated: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<PieceKind>,
}

impl From<Placement> for PlacedElement {
    fn from(p: Placement) -> Self {
        Self {
            id: p.piece_id,
            sheet_index: p.sheet_index,
            x: p.x,
            y: p.y,
            width: p.width,
            height: p.height,
            rotated: p.rotated,
            kind: p.kind,
        }
    }
}

/// Statistics of one sheet in the response.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetReport {
    pub index: usize,
    pub placed_count: usize,
    pub used_area: f64,
    pub free_area: f64,
    pub free_region_count: usize,
    pub utilization: f64,
}

impl From<SheetSummary> for SheetReport {
    fn from(s: SheetSummary) -> Self {
        Self {
            index: s.index,
            placed_count: s.placed_count,
            used_area: s.used_area,
            free_area: s.free_area,
            free_region_count: s.free_region_count,
            utilization: s.utilization,
        }
    }
}

/// Successful cutting response.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CutResponse {
    pub placements: Vec<PlacedElement>,
    pub sheet_count: usize,
    pub waste: f64,
    pub sheets: Vec<SheetReport>,
}

impl CutResponse {
    pub fn from_result(result: OptimizationResult) -> Self {
        let sheet_count = result.sheet_count();
        let waste = result.waste();
        let OptimizationResult {
            placements, sheets, ..
        } = result;

        Self {
            placements: placements.into_iter().map(PlacedElement::from).collect(),
            sheet_count,
            waste,
            sheets: sheets.into_iter().map(SheetReport::from).collect(),
        }
    }
}

/// Error body returned for failed requests.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    /// Same text as `details`, for clients that read `message`.
    pub message: String,
    pub details: String,
    pub piece_ids: Vec<PieceId>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>, code: impl Into<String>, details: impl Into<String>) -> Self {
        let details = details.into();
        Self {
            error: error.into(),
            code: code.into(),
            message: details.clone(),
            details,
            piece_ids: Vec::new(),
        }
    }

    /// Request body that is not valid JSON or misses required fields.
    pub fn invalid_json(err: &serde_json::Error) -> Self {
        Self::new("Invalid JSON data", "invalid_json", err.to_string())
    }

    pub fn from_optimize_error(err: &OptimizeError) -> Self {
        let error = match err {
            OptimizeError::Validation(_) => "Invalid input data",
            OptimizeError::CapacityExceeded { .. } => "Sheet limit reached",
            OptimizeError::Cancelled => "Optimization cancelled",
        };
        Self {
            piece_ids: err.piece_ids(),
            ..Self::new(error, err.code(), err.to_string())
        }
    }

    pub fn from_run_error(err: &RunError) -> Self {
        match err {
            RunError::Optimize(inner) => Self::from_optimize_error(inner),
            RunError::DeadlineExceeded { .. } => {
                Self::new("Deadline exceeded", err.code(), err.to_string())
            }
            RunError::Worker(_) => Self::new("Internal error", err.code(), err.to_string()),
        }
    }
}

/// Parses a request body.
pub fn parse_request(body: &str) -> Result<CutRequest, ErrorResponse> {
    serde_json::from_str(body).map_err(|err| ErrorResponse::invalid_json(&err))
}

/// Handles a cutting request synchronously.
pub fn handle_cut(request: CutRequest, config: CutConfig) -> Result<CutResponse, ErrorResponse> {
    let job = request.into_job(config);
    info!(elements = job.pieces.len(), "new cut request");
    optimize_with_config(job.sheet, job.pieces, job.config)
        .map(CutResponse::from_result)
        .map_err(|err| ErrorResponse::from_optimize_error(&err))
}

/// Handles a cutting request on the blocking pool under an optional deadline.
pub async fn handle_cut_with_deadline(
    request: CutRequest,
    config: CutConfig,
    deadline: Option<Duration>,
) -> Result<CutResponse, ErrorResponse> {
    let job = request.into_job(config);
    info!(elements = job.pieces.len(), "new cut request");
    optimize_with_deadline(job.sheet, job.pieces, job.config, deadline)
        .await
        .map(CutResponse::from_result)
        .map_err(|err| ErrorResponse::from_run_error(&err))
}
