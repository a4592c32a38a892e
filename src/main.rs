use axum::{
    routing::{get, post},
    Extension, Router,
};
use citygraph::classify::{Classifier, KeywordClassifier};
use citygraph::config::AppConfig;
use citygraph::gathering::{PageDownloader, RelevanceFilter};
use citygraph::matching::PlaceMatcher;
use citygraph::pipeline::PipelineOrchestrator;
use citygraph::server::handlers::{
    handle_classify_log_only, handle_classify_textfiles, handle_classify_to_database,
    handle_export_textfiles, handle_health, handle_predict, handle_related_documents,
};
use citygraph::storage::{InMemoryRelationStore, RelationStore};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = AppConfig::from_env()?;
    let places = load_places(&config)?;
    tracing::info!("Vocabulary holds {} place names", places.len());

    // 1. Gathering and matching:
    let downloader = Arc::new(PageDownloader::new(config.gathering.clone()));
    let matcher = Arc::new(PlaceMatcher::new_with_cap(
        places,
        config.pipeline.max_occurrences,
    ));
    let filter = Arc::new(RelevanceFilter::new(downloader.clone(), matcher.clone()));

    // 2. Classification and storage:
    let classifier: Arc<dyn Classifier> = Arc::new(KeywordClassifier::with_default_vocabulary());
    let memory_store = Arc::new(InMemoryRelationStore::new());
    let graph_store: Arc<dyn RelationStore> = memory_store.clone();

    // 3. Pipeline engine:
    let orchestrator = PipelineOrchestrator::new(
        downloader.clone(),
        matcher.clone(),
        classifier.clone(),
        config.pipeline.clone(),
    );

    // 4. HTTP Router:
    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/classify/log_only", get(handle_classify_log_only))
        .route("/classify/to_database", get(handle_classify_to_database))
        .route("/classify/textfiles", get(handle_classify_textfiles))
        .route("/classify/predict", post(handle_predict))
        .route("/gather/textfiles", post(handle_export_textfiles))
        .route("/relations/document_info", get(handle_related_documents))
        .layer(Extension(orchestrator))
        .layer(Extension(filter))
        .layer(Extension(classifier))
        .layer(Extension(memory_store))
        .layer(Extension(graph_store));

    tracing::info!("HTTP server listening on {}", config.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Loads the place vocabulary: one name per line from the configured file,
/// or the built-in list of the largest Dutch municipalities.
fn load_places(config: &AppConfig) -> anyhow::Result<Vec<String>> {
    match &config.places_file {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|err| {
                anyhow::anyhow!("cannot read places file {}: {}", path.display(), err)
            })?;
            let places: Vec<String> = content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();
            if places.is_empty() {
                anyhow::bail!("places file {} is empty", path.display());
            }
            Ok(places)
        }
        None => Ok(default_place_names()),
    }
}

fn default_place_names() -> Vec<String> {
    [
        "Amsterdam",
        "Rotterdam",
        "Den Haag",
        "Utrecht",
        "Eindhoven",
        "Tilburg",
        "Groningen",
        "Almere",
        "Breda",
        "Nijmegen",
        "Enschede",
        "Haarlem",
        "Arnhem",
        "Zaanstad",
        "Amersfoort",
        "Apeldoorn",
        "Delft",
        "Leiden",
        "Maastricht",
        "Zwolle",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}
