use std::fs;

use storage::fs::FsSource;
use storage::{QuestionSource, SourceError, SourceLocation};

const CATALOG: &str = r#"{
  "chapters": [
    {"id": 1, "title": "Ancient medicine", "instructor": "Dr. Li", "date": "2024-09-02",
     "description": "Origins", "questionCount": 2, "fileName": "week1.json", "week": "W1"},
    {"id": "w2", "title": "Renaissance", "sourceFile": "week2.json"}
  ]
}"#;

const WEEK1: &str = r#"{"questions": [
  {"question": "Q1", "options": [{"text": "a", "isCorrect": true}, {"text": "b", "isCorrect": false}]},
  {"question": "Q2", "options": [{"text": "a", "isCorrect": false}, {"text": "b", "isCorrect": true}],
   "explanation": "because"}
]}"#;

const WEEK2: &str = r#"[
  {"question": "Q3", "options": [{"text": "x", "isCorrect": true, "reason": "it is x"}]}
]"#;

fn layout() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("chapters.json"), CATALOG).unwrap();
    fs::create_dir_all(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data/week1.json"), WEEK1).unwrap();
    fs::write(dir.path().join("data/week2.json"), WEEK2).unwrap();
    dir
}

#[tokio::test]
async fn loads_catalog_and_both_bank_shapes() {
    let dir = layout();
    let source = FsSource::new(dir.path());

    let catalog = source.load_catalog().await.unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog[1].id.value(), "w2");

    let week1 = source.load_bank("week1.json").await.unwrap();
    assert_eq!(week1.len(), 2);
    assert_eq!(week1[1].explanation.as_deref(), Some("because"));

    let all = source.load_all_banks(&catalog).await.unwrap();
    let prompts: Vec<_> = all.iter().map(|q| q.prompt.as_str()).collect();
    assert_eq!(prompts, vec!["Q1", "Q2", "Q3"]);
}

#[tokio::test]
async fn missing_bank_is_transport_error_with_locator() {
    let dir = layout();
    let source = FsSource::new(dir.path());

    let err = source.load_bank("week9.json").await.unwrap_err();
    assert!(matches!(err, SourceError::Transport { .. }));
    assert_eq!(err.locator(), "week9.json");
}

#[tokio::test]
async fn malformed_bank_fails_the_whole_aggregate() {
    let dir = layout();
    fs::write(dir.path().join("data/week2.json"), "{ not json").unwrap();
    let source = SourceLocation::Directory(dir.path().to_path_buf())
        .open()
        .unwrap();

    let catalog = source.load_catalog().await.unwrap();
    let err = source.load_all_banks(&catalog).await.unwrap_err();
    assert!(matches!(err, SourceError::Parse { .. }));
    assert_eq!(err.locator(), "week2.json");
}

#[tokio::test]
async fn missing_catalog_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let source = FsSource::new(dir.path());
    let err = source.load_catalog().await.unwrap_err();
    assert_eq!(err.locator(), "chapters.json");
}
