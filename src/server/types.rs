//! API Data Transfer Objects

use crate::classify::CategoryProbabilities;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ClassifyRunParams {
    pub pworkers: Option<usize>,
    pub cworkers: Option<usize>,
    pub directory: Option<String>,
    pub threshold: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct TextFilesParams {
    pub cworkers: Option<usize>,
    pub directory: Option<String>,
    pub threshold: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ClassifyRunResponse {
    pub status: String,
    /// Identifier correlating the run's log lines.
    pub run: String,
    pub pworkers: usize,
    pub cworkers: usize,
    pub directory: String,
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub text: String,
    pub threshold: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub probabilities: CategoryProbabilities,
    pub categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExportParams {
    pub workers: Option<usize>,
    pub directory: Option<String>,
    pub output: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub status: String,
    pub workers: usize,
    pub written: usize,
}

#[derive(Debug, Deserialize)]
pub struct RelatedDocumentsParams {
    pub city_a: Option<String>,
    pub city_b: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RelatedDocumentsResponse {
    pub status: String,
    pub documents: Vec<String>,
}
