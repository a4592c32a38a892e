//! Gathering Module Tests
//!
//! Covers index-line parsing (sort-key prefixes, status filtering,
//! malformed lines, the gzip variant), descriptor serialization, markup
//! stripping, and the degrade-to-empty fetch contract.

#[cfg(test)]
mod tests {
    use crate::config::GatheringConfig;
    use crate::gathering::downloader::PageDownloader;
    use crate::gathering::indices::{descriptors_from_file, parse_index_lines};
    use crate::gathering::prefetch::{
        parse_prefetched, prefetched_from_file, run_export_workers, write_prefetched_file,
    };
    use crate::gathering::selector::RelevanceFilter;
    use crate::gathering::types::IndexDescriptor;
    use crate::matching::PlaceMatcher;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use std::sync::Arc;
    use std::time::Duration;

    const INDEX_LINE: &str = "nl,example)/ 20170102030405 {\"url\": \"http://example.nl/\", \
        \"mime\": \"text/html\", \"status\": \"200\", \"digest\": \"SHA1AAAA\", \
        \"length\": \"4372\", \"offset\": \"597167247\", \
        \"filename\": \"crawl-data/segment-1/warc/part-00001.warc.gz\"}";

    fn local_downloader() -> PageDownloader {
        PageDownloader::new(GatheringConfig {
            // Nothing listens here; every fetch fails fast.
            data_prefix: "http://127.0.0.1:9/".to_string(),
            index_endpoint: "http://127.0.0.1:9/".to_string(),
            request_timeout: Duration::from_millis(500),
            fetch_attempts: 1,
        })
    }

    // ============================================================
    // TEST 1: Index line parsing
    // ============================================================

    #[test]
    fn test_parse_line_discards_sort_key_prefix() {
        let descriptors = parse_index_lines(INDEX_LINE);

        assert_eq!(descriptors.len(), 1);
        let descriptor = &descriptors[0];
        assert_eq!(descriptor.offset, 597167247);
        assert_eq!(descriptor.length, 4372);
        assert_eq!(descriptor.status, "200");
        assert_eq!(descriptor.digest.as_deref(), Some("SHA1AAAA"));
        assert_eq!(
            descriptor.filename,
            "crawl-data/segment-1/warc/part-00001.warc.gz"
        );
    }

    #[test]
    fn test_parse_lines_drops_non_200_entries() {
        let content = format!(
            "{}\nnl,gone)/ 20170102 {{\"status\": \"404\", \"length\": \"10\", \
             \"offset\": \"0\", \"filename\": \"crawl-data/x.warc.gz\"}}\n",
            INDEX_LINE
        );

        let descriptors = parse_index_lines(&content);

        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].status, "200");
    }

    #[test]
    fn test_parse_lines_skips_malformed_entries() {
        let content = format!(
            "this line has no payload\n{}\nnl,bad)/ {{\"status\": \"200\", broken json\n",
            INDEX_LINE
        );

        let descriptors = parse_index_lines(&content);

        // Malformed lines are skipped, not fatal.
        assert_eq!(descriptors.len(), 1);
    }

    #[test]
    fn test_parse_lines_accepts_bare_numbers() {
        let content = "{\"status\": 200, \"length\": 12, \"offset\": 34, \
                       \"filename\": \"crawl-data/y.warc.gz\"}";

        let descriptors = parse_index_lines(content);

        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].offset, 34);
        assert_eq!(descriptors[0].length, 12);
    }

    // ============================================================
    // TEST 2: Index files, plain and gzip
    // ============================================================

    #[test]
    fn test_descriptors_from_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("indices.txt");
        std::fs::write(&path, format!("{}\n{}\n", INDEX_LINE, INDEX_LINE)).unwrap();

        let descriptors = descriptors_from_file(&path).unwrap();

        assert_eq!(descriptors.len(), 2);
    }

    #[test]
    fn test_descriptors_from_gz_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("indices.gz");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(format!("{}\n{}\n", INDEX_LINE, INDEX_LINE).as_bytes())
            .unwrap();
        std::fs::write(&path, encoder.finish().unwrap()).unwrap();

        let descriptors = descriptors_from_file(&path).unwrap();

        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0], descriptors[1]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = descriptors_from_file(&dir.path().join("does-not-exist.txt"));
        assert!(result.is_err());
    }

    // ============================================================
    // TEST 3: Descriptor serialization
    // ============================================================

    #[test]
    fn test_descriptor_round_trip() {
        let descriptors = parse_index_lines(INDEX_LINE);
        let serialized = serde_json::to_string(&descriptors[0]).unwrap();

        let restored: IndexDescriptor = serde_json::from_str(&serialized).unwrap();

        assert_eq!(restored, descriptors[0]);
    }

    #[test]
    fn test_digest_key_falls_back_to_coordinates() {
        let content = "{\"status\": \"200\", \"length\": \"5\", \"offset\": \"100\", \
                       \"filename\": \"crawl-data/z.warc.gz\"}";
        let descriptor = &parse_index_lines(content)[0];

        assert_eq!(descriptor.digest, None);
        assert_eq!(descriptor.digest_key(), "crawl-data/z.warc.gz:100");
    }

    // ============================================================
    // TEST 4: Markup stripping
    // ============================================================

    #[test]
    fn test_archive_to_text_strips_headers_and_markup() {
        let downloader = local_downloader();
        let record = b"WARC/1.0\r\nWARC-Type: response\r\n\r\nHTTP/1.1 200 OK\r\n\r\n\
            <html><head><title>Steden</title>\
            <script>var x = 1;</script><style>body { color: red; }</style></head>\
            <body><p>Amsterdam &amp; Rotterdam</p></body></html>";

        let text = downloader.archive_to_text(record);

        assert_eq!(text, "Steden Amsterdam & Rotterdam");
    }

    #[test]
    fn test_archive_without_html_yields_empty_text() {
        let downloader = local_downloader();
        let record = b"WARC/1.0\r\nContent-Type: application/pdf\r\n\r\nbinary payload";

        assert_eq!(downloader.archive_to_text(record), "");
    }

    // ============================================================
    // TEST 5: Pre-fetched page files
    // ============================================================

    #[test]
    fn test_prefetched_file_round_trip() {
        let descriptor = &parse_index_lines(INDEX_LINE)[0];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("W0-0.txt");

        write_prefetched_file(descriptor, "Amsterdam en Rotterdam", &path).unwrap();
        let (restored, text) = prefetched_from_file(&path).unwrap();

        assert_eq!(&restored, descriptor);
        assert_eq!(text, "Amsterdam en Rotterdam");
    }

    #[test]
    fn test_prefetched_without_descriptor_line_is_an_error() {
        assert!(parse_prefetched("not json\nsome text\n").is_err());
    }

    // ============================================================
    // TEST 6: Relevance filtering and export against a local archive
    // ============================================================

    fn gzip(content: &str) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(content.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    #[tokio::test]
    async fn test_export_workers_write_relevant_pages_only() {
        // A local stand-in for the archive host; the route shape mirrors
        // descriptor filenames.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = axum::Router::new().route(
            "/archive/:name",
            axum::routing::get(|axum::extract::Path(name): axum::extract::Path<String>| async move {
                if name.starts_with("two") {
                    gzip("<html><body>Utrecht ligt dichtbij Amersfoort</body></html>")
                } else {
                    gzip("<html><body>Alleen Utrecht</body></html>")
                }
            }),
        );
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let downloader = Arc::new(PageDownloader::new(GatheringConfig {
            data_prefix: format!("http://{}/", addr),
            index_endpoint: format!("http://{}/", addr),
            request_timeout: Duration::from_millis(800),
            fetch_attempts: 1,
        }));
        let matcher = Arc::new(PlaceMatcher::new(vec![
            "Utrecht".to_string(),
            "Amersfoort".to_string(),
        ]));
        let filter = Arc::new(RelevanceFilter::new(downloader, matcher));

        let index_dir = tempfile::tempdir().unwrap();
        let line = |digest: &str, name: &str| {
            format!(
                "nl,x)/ 20170102 {{\"status\": \"200\", \"digest\": \"{}\", \"length\": \"900\", \
                 \"offset\": \"0\", \"filename\": \"archive/{}\"}}\n",
                digest, name
            )
        };
        std::fs::write(
            index_dir.path().join("indices.txt"),
            format!("{}{}", line("e1", "two.warc.gz"), line("e2", "one.warc.gz")),
        )
        .unwrap();

        let output_dir = tempfile::tempdir().unwrap();
        let handles = run_export_workers(filter.clone(), 2, index_dir.path(), output_dir.path());
        let mut written = 0usize;
        for handle in handles {
            written += handle.await.unwrap();
        }
        server.abort();

        // Only the page with two places was exported, and it round-trips.
        assert_eq!(written, 1);
        let files: Vec<_> = std::fs::read_dir(output_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(files.len(), 1);
        let (descriptor, text) = prefetched_from_file(&files[0]).unwrap();
        assert_eq!(descriptor.digest.as_deref(), Some("e1"));
        assert!(text.contains("Utrecht"));
        assert!(text.contains("Amersfoort"));
    }

    // ============================================================
    // TEST 7: Fetch failures degrade to empty text
    // ============================================================

    #[tokio::test]
    async fn test_fetch_text_degrades_on_network_failure() {
        let downloader = local_downloader();
        let descriptor = &parse_index_lines(INDEX_LINE)[0];

        let text = downloader.fetch_text(descriptor).await;

        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_download_indices_propagates_network_failure() {
        let downloader = local_downloader();

        let result = downloader
            .download_indices("example.nl", "CC-MAIN-2017-04-index")
            .await;

        assert!(result.is_err());
    }
}
