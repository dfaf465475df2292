use git2::{Repository, Signature, Time};
use repo_analyzer::{
    AnalyzerConfig, AnalyzerError, BranchDetail, Capabilities, RepoAnalyzer, RepoSource, ReportFormat,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn commit(repo: &Repository, author: &str, seconds: i64, file_name: &str, content: &str) {
    let workdir = repo.workdir().unwrap().to_path_buf();
    let file_path = workdir.join(file_name);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(file_name)).unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();

    let signature = Signature::new(author, "test@example.com", &Time::new(seconds, 0)).unwrap();
    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<_> = parent.iter().collect();
    {
        let tree = repo.find_tree(tree_id).unwrap();
        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            &format!("Add {}", file_name),
            &tree,
            &parents,
        )
        .unwrap();
    }
}

/// Three commits: two by A, one by B
fn setup_test_repo_at(path: &Path) -> Repository {
    let repo = Repository::init(path).unwrap();
    commit(&repo, "A", 1_675_242_000, "app.py", "def run():\n    return 1\n");
    commit(&repo, "A", 1_677_747_600, "web/index.js", "function go() {}\n");
    commit(&repo, "B", 1_677_751_200, "src/main.rs", "fn main() {\n    println!(\"Hello\");\n}\n");
    repo
}

fn setup_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    setup_test_repo_at(temp_dir.path());
    temp_dir
}

fn analyzer(config: AnalyzerConfig) -> RepoAnalyzer {
    RepoAnalyzer::new(config, Capabilities::default())
}

#[test]
fn test_full_workflow() {
    let temp_dir = setup_test_repo();
    let reports = temp_dir.path().join("out");
    let config = AnalyzerConfig {
        report: Some(ReportFormat::Json),
        branches: Some(BranchDetail::Stats),
        complexity: true,
        reports_dir: Some(reports.clone()),
        ..Default::default()
    };

    let mut out = Vec::new();
    let outcome = analyzer(config)
        .run(&RepoSource::Local(temp_dir.path().to_path_buf()), &mut out)
        .unwrap();

    let repo = &outcome.data.repo;
    assert_eq!(repo.total_commits, 3);
    assert_eq!(repo.authors.get("A"), Some(2));
    assert_eq!(repo.authors.get("B"), Some(1));
    assert_eq!(repo.commit_dates.len(), 3);
    assert!(repo.commit_dates.windows(2).all(|pair| pair[0] >= pair[1]));

    let complexity = outcome.data.complexity.as_ref().unwrap();
    assert_eq!(complexity["app.py"].functions, Some(1));
    assert_eq!(complexity["web/index.js"].functions, Some(1));

    let languages = &outcome.data.languages;
    assert!(languages.contains_key("Python"));
    assert!(languages.contains_key("Rust"));
    assert!(languages.contains_key("JavaScript"));

    let report_path = outcome.report_path.unwrap();
    assert!(report_path.starts_with(&reports));
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(report_path).unwrap()).unwrap();
    assert_eq!(value["repo"]["total_commits"], 3);
    assert_eq!(value["repo"]["authors"]["A"], 2);
    assert!(value["repo"]["branches"].is_object());
}

#[test]
#[cfg(feature = "html")]
fn test_markdown_and_html_reports() {
    let temp_dir = setup_test_repo();
    let reports = temp_dir.path().join("out");

    for format in [ReportFormat::Md, ReportFormat::Html] {
        let config = AnalyzerConfig {
            report: Some(format),
            complexity: true,
            reports_dir: Some(reports.clone()),
            ..Default::default()
        };
        let mut out = Vec::new();
        let outcome = analyzer(config)
            .run(&RepoSource::Local(temp_dir.path().to_path_buf()), &mut out)
            .unwrap();

        let content = fs::read_to_string(outcome.report_path.unwrap()).unwrap();
        assert!(!content.is_empty());
    }

    assert!(reports.join("REPORT.md").is_file());
    assert!(reports.join("charts").is_dir());
    let html_reports = fs::read_dir(&reports)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "html"))
        .count();
    assert_eq!(html_reports, 1);
}

#[test]
fn test_reports_inside_repo_do_not_feed_back() {
    let temp_dir = setup_test_repo();
    let config = AnalyzerConfig {
        report: Some(ReportFormat::Md),
        complexity: true,
        reports_dir: Some(temp_dir.path().join("out")),
        ..Default::default()
    };
    let app = analyzer(config);
    let source = RepoSource::Local(temp_dir.path().to_path_buf());

    let first = app.run(&source, &mut Vec::new()).unwrap();
    assert!(temp_dir.path().join("out/REPORT.md").is_file());
    let second = app.run(&source, &mut Vec::new()).unwrap();

    assert_eq!(first.data.languages, second.data.languages);
    assert!(!second.data.languages.contains_key("Markdown"));
    let complexity = second.data.complexity.unwrap();
    assert!(complexity.keys().all(|file| !file.starts_with("out/")));
}

#[test]
fn test_html_unavailable_still_completes() {
    let temp_dir = setup_test_repo();
    let config = AnalyzerConfig {
        report: Some(ReportFormat::Html),
        ..Default::default()
    };
    let capabilities = Capabilities {
        html: None,
        ..Capabilities::default()
    };

    let mut out = Vec::new();
    let outcome = RepoAnalyzer::new(config, capabilities)
        .run(&RepoSource::Local(temp_dir.path().to_path_buf()), &mut out)
        .unwrap();

    let console = String::from_utf8(out).unwrap();
    assert!(console.contains("HTML reporting not available"));
    assert!(console.contains("Analysis complete!"));
    assert!(outcome.report_path.is_none());
    assert!(!temp_dir.path().join(".analysis_reports").exists());
}

#[test]
fn test_empty_repository_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    Repository::init(temp_dir.path()).unwrap();
    let config = AnalyzerConfig {
        report: Some(ReportFormat::Json),
        ..Default::default()
    };

    let mut out = Vec::new();
    let result = analyzer(config).run(&RepoSource::Local(temp_dir.path().to_path_buf()), &mut out);

    assert!(matches!(result, Err(AnalyzerError::EmptyRepository(_))));
    assert!(!temp_dir.path().join(".analysis_reports").exists());
}

#[test]
fn test_clone_from_url_source() {
    let temp_dir = TempDir::new().unwrap();
    let origin = temp_dir.path().join("origin.git");
    fs::create_dir_all(&origin).unwrap();
    setup_test_repo_at(&origin);

    let clone_dir = temp_dir.path().join("clones");
    let config = AnalyzerConfig {
        clone_dir: clone_dir.clone(),
        ..Default::default()
    };
    let source = RepoSource::detect(origin.to_str().unwrap());
    assert!(matches!(source, RepoSource::Url(_)));

    let mut out = Vec::new();
    let outcome = analyzer(config).run(&source, &mut out).unwrap();

    assert_eq!(outcome.data.repo.total_commits, 3);
    assert!(outcome.data.repo.path.starts_with(&clone_dir));
    let clone_name = outcome.data.repo.repo_name();
    assert!(clone_name.starts_with("origin_"));
}

#[test]
fn test_clone_failure_aborts_without_reports() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.git");
    let clone_dir = temp_dir.path().join("clones");
    let config = AnalyzerConfig {
        report: Some(ReportFormat::Json),
        clone_dir: clone_dir.clone(),
        ..Default::default()
    };

    let mut out = Vec::new();
    let result = analyzer(config).run(&RepoSource::Url(missing.to_string_lossy().into_owned()), &mut out);

    assert!(matches!(result, Err(AnalyzerError::Clone { .. })));
    let reports_written = walkdir::WalkDir::new(&clone_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .any(|entry| entry.file_name() == ".analysis_reports");
    assert!(!reports_written);
}
