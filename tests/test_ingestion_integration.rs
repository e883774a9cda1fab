//! Integration tests for file ingestion, shared access and file export
//!
//! Key integration points tested:
//! - Reading a dataset from disk through the shared coordinator
//! - Concurrent readers while an ingestion commits
//! - Rejection of a second ingestion while one is in flight
//! - JSON and CSV export files readable by their own parsers

#[cfg(test)]
mod ingestion_integration_tests {
    use climaflow::aggregator_core::{
        ClimateCoordinator, ExportFormat, ExportWriter, IngestError, Observation, Scenario,
        SharedCoordinator,
    };
    use std::io::Write;
    use std::path::{Path, PathBuf};

    const HEADER: &str = "Year,Country,ISO.alpha-3,Total.CO2,Per.Capita.CO2,Population,Temp_Change";

    fn write_dataset(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        path
    }

    fn create_test_rows() -> Vec<&'static str> {
        vec![
            "2010,Norway,NOR,40,8,5000000,0.5",
            "2011,Norway,NOR,42,8.2,5050000,0.6",
            "2012,Norway,NOR,44,8.4,5100000,0.7",
            "2010,\"Korea, Republic of\",KOR,500,10,50000000,0.4",
            "2011,\"Korea, Republic of\",KOR,520,10.3,50100000,0.3",
            "2012,\"Korea, Republic of\",KOR,540,10.6,50200000,0.8",
            "2012,Nowhere,,,,,",
        ]
    }

    #[tokio::test]
    async fn test_ingest_file_through_shared_coordinator() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_dataset(temp_dir.path(), "climate.csv", &create_test_rows());

        let shared = SharedCoordinator::new(ClimateCoordinator::new());
        let summary = shared.ingest_file(&path).await.unwrap();

        assert_eq!(summary.row_count, 7);
        assert_eq!(summary.observation_count, 6);
        assert_eq!(summary.rejected_rows, 1);
        assert_eq!(summary.country_count, 2);

        let coordinator = shared.read().await;
        assert_eq!(coordinator.search_countries("korea"), vec!["Korea, Republic of"]);
        assert_eq!(coordinator.global_stats().unwrap().top_emitters[0].country, "Korea, Republic of");
        assert_eq!(coordinator.generate_projection(Scenario::Current).len(), 11);
    }

    #[tokio::test]
    async fn test_readers_see_committed_state() {
        let temp_dir = tempfile::tempdir().unwrap();
        let first = write_dataset(temp_dir.path(), "first.csv", &["2000,Chad,TCD,1,0.1,10000000,0.2"]);
        let second = write_dataset(temp_dir.path(), "second.csv", &create_test_rows());

        let shared = SharedCoordinator::new(ClimateCoordinator::new());
        shared.ingest_file(&first).await.unwrap();
        shared.ingest_file(&second).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..4 {
            let reader = shared.clone();
            handles.push(tokio::spawn(async move {
                let coordinator = reader.read().await;
                (coordinator.observations().len(), coordinator.data_by_country("Chad").len())
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap(), (6, 0));
        }
    }

    #[tokio::test]
    async fn test_failed_ingestion_keeps_previous_data() {
        let temp_dir = tempfile::tempdir().unwrap();
        let good = write_dataset(temp_dir.path(), "good.csv", &create_test_rows());
        let bad = temp_dir.path().join("bad.csv");
        std::fs::write(&bad, b"Year,Country,Total.CO2\n2013,\xff\xfe,1\n").unwrap();

        let shared = SharedCoordinator::new(ClimateCoordinator::new());
        shared.ingest_file(&good).await.unwrap();

        let result = shared.ingest_file(&bad).await;
        assert!(matches!(result, Err(IngestError::Csv(_))));
        assert!(!shared.is_ingesting());

        let coordinator = shared.read().await;
        assert_eq!(coordinator.observations().len(), 6);
        assert_eq!(coordinator.year_range().max, 2012);
    }

    #[tokio::test]
    async fn test_second_ingestion_rejected_while_writer_waits() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_dataset(temp_dir.path(), "climate.csv", &create_test_rows());
        let shared = SharedCoordinator::new(ClimateCoordinator::new());

        // Holding a read guard parks the first ingestion on the write lock
        let guard = shared.read().await;
        let first = {
            let shared = shared.clone();
            let path = path.clone();
            tokio::spawn(async move { shared.ingest_file(&path).await })
        };
        while !shared.is_ingesting() {
            tokio::task::yield_now().await;
        }

        let second = shared.ingest_file(&path).await;
        assert!(matches!(second, Err(IngestError::IngestionInProgress)));

        drop(guard);
        let summary = first.await.unwrap().unwrap();
        assert_eq!(summary.observation_count, 6);
        assert!(!shared.is_ingesting());
    }

    #[tokio::test]
    async fn test_export_files_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_dataset(temp_dir.path(), "climate.csv", &create_test_rows());

        let mut coordinator = ClimateCoordinator::new();
        coordinator.ingest_file(&path).await.unwrap();

        let json_path = temp_dir.path().join("out").join("observations.json");
        let mut json = ExportWriter::new(ExportFormat::Json, json_path.clone()).unwrap();
        json.write_observations(coordinator.observations()).await.unwrap();
        json.flush().await.unwrap();

        let parsed: Vec<Observation> =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed.as_slice(), coordinator.observations());

        let csv_path = temp_dir.path().join("out").join("observations.csv");
        let mut csv = ExportWriter::new(ExportFormat::Csv, csv_path.clone()).unwrap();
        csv.write_observations(coordinator.observations()).await.unwrap();
        csv.flush().await.unwrap();

        let mut reader = csv::Reader::from_path(&csv_path).unwrap();
        let rows: Vec<Observation> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows.as_slice(), coordinator.observations());
    }
}
