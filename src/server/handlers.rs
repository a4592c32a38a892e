use super::types::{
    ClassifyRunParams, ClassifyRunResponse, ExportParams, ExportResponse, PredictRequest,
    PredictResponse, RelatedDocumentsParams, RelatedDocumentsResponse, TextFilesParams,
};
use crate::classify::{categories_above, Classifier};
use crate::gathering::prefetch::run_export_workers;
use crate::gathering::RelevanceFilter;
use crate::pipeline::{PipelineOrchestrator, SourceMode, WorkQueue};
use crate::storage::{InMemoryRelationStore, LogOnlyStore, RelationStore};
use axum::extract::Query;
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::path::Path;
use std::sync::Arc;

/// Runs the full index pipeline without persistence; results are only
/// logged. Useful for sizing a corpus before committing it to the graph.
pub async fn handle_classify_log_only(
    Query(params): Query<ClassifyRunParams>,
    Extension(orchestrator): Extension<Arc<PipelineOrchestrator>>,
) -> (StatusCode, Json<ClassifyRunResponse>) {
    let run = uuid::Uuid::new_v4().to_string();
    run_index_pipeline(&orchestrator, params, Arc::new(LogOnlyStore), run).await
}

/// Runs the full index pipeline against the relation graph. Refused when
/// the store is not connected.
pub async fn handle_classify_to_database(
    Query(params): Query<ClassifyRunParams>,
    Extension(orchestrator): Extension<Arc<PipelineOrchestrator>>,
    Extension(store): Extension<Arc<dyn RelationStore>>,
) -> (StatusCode, Json<ClassifyRunResponse>) {
    let run = uuid::Uuid::new_v4().to_string();
    if !store.connected() {
        tracing::error!("No graph store connection, refusing run {}", run);
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ClassifyRunResponse {
                status: "store_unavailable".to_string(),
                run,
                pworkers: 0,
                cworkers: 0,
                directory: params.directory.unwrap_or_default(),
            }),
        );
    }

    run_index_pipeline(&orchestrator, params, store, run).await
}

async fn run_index_pipeline(
    orchestrator: &Arc<PipelineOrchestrator>,
    params: ClassifyRunParams,
    store: Arc<dyn RelationStore>,
    run: String,
) -> (StatusCode, Json<ClassifyRunResponse>) {
    let directory = match params.directory {
        Some(directory) => directory,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ClassifyRunResponse {
                    status: "missing_directory".to_string(),
                    run,
                    pworkers: 0,
                    cworkers: 0,
                    directory: String::new(),
                }),
            );
        }
    };

    let pworkers = params.pworkers.unwrap_or(1);
    let cworkers = params.cworkers.unwrap_or(1);
    let threshold = params
        .threshold
        .unwrap_or(orchestrator.config().category_threshold);

    tracing::info!(
        "Run {}: classifying indices from {} ({} producers, {} consumers)",
        run,
        directory,
        pworkers,
        cworkers
    );

    let queue = Arc::new(WorkQueue::new());
    let producers = orchestrator.run_producers(pworkers, Path::new(&directory), &queue);
    let consumers = orchestrator.run_consumers(cworkers, &queue, threshold, store, SourceMode::Index);

    orchestrator.join_and_signal(producers, consumers).await;
    tracing::info!("Run {} completed", run);

    (
        StatusCode::OK,
        Json(ClassifyRunResponse {
            status: "completed".to_string(),
            run,
            pworkers,
            cworkers,
            directory,
        }),
    )
}

/// Runs the file pipeline variant over pre-fetched page files. Refused when
/// the store is not connected.
pub async fn handle_classify_textfiles(
    Query(params): Query<TextFilesParams>,
    Extension(orchestrator): Extension<Arc<PipelineOrchestrator>>,
    Extension(store): Extension<Arc<dyn RelationStore>>,
) -> (StatusCode, Json<ClassifyRunResponse>) {
    let run = uuid::Uuid::new_v4().to_string();
    if !store.connected() {
        tracing::error!("No graph store connection, refusing run {}", run);
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ClassifyRunResponse {
                status: "store_unavailable".to_string(),
                run,
                pworkers: 0,
                cworkers: 0,
                directory: params.directory.unwrap_or_default(),
            }),
        );
    }

    let directory = match params.directory {
        Some(directory) => directory,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ClassifyRunResponse {
                    status: "missing_directory".to_string(),
                    run,
                    pworkers: 0,
                    cworkers: 0,
                    directory: String::new(),
                }),
            );
        }
    };

    let cworkers = params.cworkers.unwrap_or(1);
    let threshold = params
        .threshold
        .unwrap_or(orchestrator.config().category_threshold);

    tracing::info!(
        "Run {}: classifying page files from {} ({} consumers)",
        run,
        directory,
        cworkers
    );

    let queue = Arc::new(WorkQueue::new());
    let producers = orchestrator.run_file_reader(Path::new(&directory), &queue);
    let consumers =
        orchestrator.run_consumers(cworkers, &queue, threshold, store, SourceMode::Prefetched);

    orchestrator.join_file_workers(producers, consumers).await;
    tracing::info!("Run {} completed", run);

    (
        StatusCode::OK,
        Json(ClassifyRunResponse {
            status: "completed".to_string(),
            run,
            pworkers: 1,
            cworkers,
            directory,
        }),
    )
}

/// Downloads every relevant page referenced by an index directory into
/// pre-fetched page files for later file-pipeline runs.
pub async fn handle_export_textfiles(
    Query(params): Query<ExportParams>,
    Extension(filter): Extension<Arc<RelevanceFilter>>,
) -> (StatusCode, Json<ExportResponse>) {
    let (directory, output) = match (params.directory, params.output) {
        (Some(directory), Some(output)) => (directory, output),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ExportResponse {
                    status: "missing_directory_or_output".to_string(),
                    workers: 0,
                    written: 0,
                }),
            );
        }
    };

    let workers = params.workers.unwrap_or(1);
    let handles = run_export_workers(
        filter.clone(),
        workers,
        Path::new(&directory),
        Path::new(&output),
    );

    let mut written = 0usize;
    for handle in handles {
        match handle.await {
            Ok(count) => written += count,
            Err(err) => tracing::error!("Export worker crashed: {}", err),
        }
    }

    (
        StatusCode::OK,
        Json(ExportResponse {
            status: "completed".to_string(),
            workers,
            written,
        }),
    )
}

/// Category probabilities and selected categories for a posted text.
pub async fn handle_predict(
    Extension(classifier): Extension<Arc<dyn Classifier>>,
    Extension(orchestrator): Extension<Arc<PipelineOrchestrator>>,
    Json(request): Json<PredictRequest>,
) -> Json<PredictResponse> {
    let probabilities = classifier.probabilities(&request.text);
    let threshold = request
        .threshold
        .unwrap_or(orchestrator.config().category_threshold);
    let categories = categories_above(&probabilities, threshold);

    Json(PredictResponse {
        probabilities,
        categories,
    })
}

/// Documents supporting the relation between two places.
pub async fn handle_related_documents(
    Query(params): Query<RelatedDocumentsParams>,
    Extension(store): Extension<Arc<InMemoryRelationStore>>,
) -> (StatusCode, Json<RelatedDocumentsResponse>) {
    let (city_a, city_b) = match (params.city_a, params.city_b) {
        (Some(city_a), Some(city_b)) => (city_a, city_b),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(RelatedDocumentsResponse {
                    status: "missing_city_pair".to_string(),
                    documents: Vec::new(),
                }),
            );
        }
    };

    let documents = store.related_documents(&city_a, &city_b, params.limit.unwrap_or(300));

    (
        StatusCode::OK,
        Json(RelatedDocumentsResponse {
            status: "ok".to_string(),
            documents,
        }),
    )
}

pub async fn handle_health() -> StatusCode {
    StatusCode::OK
}
