use eml_url_extract::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_eml(dir: &Path, name: &str, body: &str) {
    fs::create_dir_all(dir).unwrap();
    let raw = format!(
        "From: sender@example.com\r\n\
         To: femi@example.com\r\n\
         Subject: Test\r\n\
         Content-Type: text/plain\r\n\
         \r\n\
         {body}\r\n"
    );
    fs::write(dir.join(name), raw).unwrap();
}

fn config_for(tmp: &TempDir) -> BatchConfig {
    BatchConfig {
        input_root: tmp.path().join("emails"),
        results_path: tmp.path().join("out/results.json"),
        summary_path: tmp.path().join("out/summary.json"),
        workers: 2,
        ..BatchConfig::default()
    }
}

fn read_summary(config: &BatchConfig) -> BatchSummary {
    serde_json::from_str(&fs::read_to_string(&config.summary_path).unwrap()).unwrap()
}

#[test]
fn test_batch_overlapping_urls() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("emails");
    write_eml(&root.join("spam"), "a.eml", "Click http://u1.example and http://u2.example");
    write_eml(&root.join("good"), "b.eml", "See http://u2.example or http://u3.example");
    let config = config_for(&tmp);

    let results = BatchCoordinator::new(config.clone()).run().unwrap();

    assert_eq!(results.len(), 2);
    for r in &results {
        assert_eq!(r.url_count, r.urls.len());
    }

    let summary = read_summary(&config);
    assert_eq!(summary.total_emails_processed, 2);
    assert_eq!(summary.total_urls_extracted, 4);
    assert_eq!(summary.unique_urls_count, 3);

    let written: Vec<FileResult> =
        serde_json::from_str(&fs::read_to_string(&config.results_path).unwrap()).unwrap();
    assert_eq!(written.len(), 2);
}

#[test]
fn test_batch_resolves_directories_ignoring_case() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("emails");
    write_eml(&root.join("spam"), "one.EML", "http://lower.example");
    write_eml(&root.join("GOOD"), "two.eml", "http://upper.example");
    write_eml(&root.join("spam"), "notes.txt", "http://ignored.example");
    let config = BatchConfig {
        categories: vec!["Spam".into(), "good".into()],
        ..config_for(&tmp)
    };

    let coordinator = BatchCoordinator::new(config);
    let files = coordinator.discover();

    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("spam/one.EML"));
    assert!(files[1].ends_with("GOOD/two.eml"));

    let results = coordinator.run().unwrap();
    let mut urls: Vec<&str> = results
        .iter()
        .flat_map(|r| r.urls.iter().map(String::as_str))
        .collect();
    urls.sort_unstable();
    assert_eq!(urls, ["http://lower.example", "http://upper.example"]);
}

#[test]
fn test_batch_missing_category_is_skipped() {
    let tmp = TempDir::new().unwrap();
    write_eml(&tmp.path().join("emails/spam"), "a.eml", "http://only.example");
    let config = config_for(&tmp);

    let results = BatchCoordinator::new(config.clone()).run().unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(read_summary(&config).total_emails_processed, 1);
}

#[test]
fn test_batch_empty_corpus_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("emails/spam")).unwrap();
    let config = config_for(&tmp);

    let results = BatchCoordinator::new(config.clone()).run().unwrap();

    assert!(results.is_empty());
    assert!(!config.results_path.exists());
    assert!(!config.summary_path.exists());
}

#[test]
fn test_batch_missing_root_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let config = config_for(&tmp);

    let results = BatchCoordinator::new(config.clone()).run().unwrap();

    assert!(results.is_empty());
    assert!(!config.summary_path.exists());
}

#[cfg(unix)]
#[test]
fn test_batch_unreadable_file_counts_as_empty() {
    let tmp = TempDir::new().unwrap();
    let spam = tmp.path().join("emails/spam");
    write_eml(&spam, "ok.eml", "http://fine.example");
    std::os::unix::fs::symlink(tmp.path().join("gone.eml"), spam.join("broken.eml")).unwrap();
    let config = config_for(&tmp);

    let results = BatchCoordinator::new(config.clone()).run().unwrap();

    assert_eq!(results.len(), 2);
    let broken = results
        .iter()
        .find(|r| r.file.ends_with("broken.eml"))
        .unwrap();
    assert_eq!(broken.url_count, 0);

    let summary = read_summary(&config);
    assert_eq!(summary.total_emails_processed, 2);
    assert_eq!(summary.total_urls_extracted, 1);
}

#[test]
fn test_batch_many_files_single_worker() {
    let tmp = TempDir::new().unwrap();
    let spam = tmp.path().join("emails/spam");
    for i in 0..25 {
        write_eml(&spam, &format!("m{i}.eml"), &format!("http://site{i}.example http://shared.example"));
    }
    let config = BatchConfig {
        workers: 1,
        queue_depth: 1,
        ..config_for(&tmp)
    };

    let results = BatchCoordinator::new(config.clone()).run().unwrap();

    assert_eq!(results.len(), 25);
    let summary = read_summary(&config);
    assert_eq!(summary.total_urls_extracted, 50);
    assert_eq!(summary.unique_urls_count, 26);
    assert!(summary.unique_urls_count <= summary.total_urls_extracted);
}

#[test]
fn test_batch_output_write_failure_is_fatal() {
    let tmp = TempDir::new().unwrap();
    write_eml(&tmp.path().join("emails/spam"), "a.eml", "http://x.example");
    fs::write(tmp.path().join("blocker"), "file, not a directory").unwrap();
    let config = BatchConfig {
        results_path: tmp.path().join("blocker/results.json"),
        ..config_for(&tmp)
    };

    let err = BatchCoordinator::new(config).run().unwrap_err();

    assert!(matches!(err, ExtractError::OutputWrite { .. }));
}

#[test]
fn test_extract_file_single_message() {
    let tmp = TempDir::new().unwrap();
    write_eml(tmp.path(), "one.eml", "http://a.example http://a.example https://b.example");

    let urls = extract_file(&tmp.path().join("one.eml")).unwrap();

    assert_eq!(urls.into_vec(), ["http://a.example", "https://b.example"]);
}

#[test]
fn test_process_file_missing_is_empty() {
    let tmp = TempDir::new().unwrap();

    let r = process_file(&tmp.path().join("absent.eml"));

    assert_eq!(r.url_count, 0);
    assert!(r.urls.is_empty());
}

#[test]
fn test_config_from_json_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.json");
    fs::write(&path, r#"{"input_root": "corpus", "workers": 3}"#).unwrap();

    let config = BatchConfig::from_json_file(&path).unwrap();

    assert_eq!(config.input_root, Path::new("corpus"));
    assert_eq!(config.worker_count(), 3);
    assert_eq!(config.categories, ["spam", "good"]);
    assert_eq!(config.extension, "eml");
}

#[test]
fn test_config_rejects_empty_categories() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.json");
    fs::write(&path, r#"{"categories": []}"#).unwrap();

    let err = BatchConfig::from_json_file(&path).unwrap_err();

    assert!(matches!(err, ExtractError::Config { .. }));
}

#[test]
fn test_default_worker_count_nonzero() {
    assert!(BatchConfig::default().worker_count() >= 1);
}
