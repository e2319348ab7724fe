//! CLI integration tests for sift commands.
//!
//! These tests focus on exit codes and the parts of the output other tools
//! would rely on, not on exact formatting.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::Command;
use predicates::prelude::*;

/// Config with two fields, searching `body` by default.
const TWO_FIELDS: &str = r#"
root = true

[parser]
fields = ["title", "body", "id"]
default_fields = ["body"]
tokenized_fields = ["title", "body"]

[analysis.fields]
id = "keyword"
"#;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to get a sift command.
fn sift() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("sift").unwrap()
}

/// Helper to run `sift` in `cwd` with HOME isolated to `home`.
fn sift_in(home: &Path, cwd: &Path) -> Command {
    let mut cmd = sift();
    cmd.env("HOME", home).env_remove("SIFT_LOG").current_dir(cwd);
    cmd
}

/// A home directory and a separate project directory.
struct Workspace {
    /// Temporary root holding both.
    root: tempfile::TempDir,
}

impl Workspace {
    /// Creates both directories.
    fn new() -> Self {
        let root = temp_dir();
        fs::create_dir_all(root.path().join("home")).unwrap();
        fs::create_dir_all(root.path().join("project")).unwrap();
        Self { root }
    }

    /// The isolated home directory.
    fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    /// The project directory commands run in.
    fn project(&self) -> PathBuf {
        self.root.path().join("project")
    }

    /// Writes the project `.sift.toml`.
    fn with_config(self, content: &str) -> Self {
        fs::write(self.project().join(".sift.toml"), content).unwrap();
        self
    }

    /// A sift command running in the project directory.
    fn cmd(&self) -> Command {
        sift_in(&self.home(), &self.project())
    }
}

mod parse {
    use super::*;

    #[test]
    fn prints_tree_for_fallback_field() {
        Workspace::new()
            .cmd()
            .args(["parse", "Rust"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Term(body:\"rust\")"));
    }

    #[test]
    fn query_string_output() {
        Workspace::new()
            .with_config(TWO_FIELDS)
            .cmd()
            .args([
                "parse",
                "-q",
                "title:(Rust OR Go) +\"Error Handling\"~2 -deprecated^2",
            ])
            .assert()
            .success()
            .stdout("(title:rust title:go) +\"error handling\"~2 -deprecated^2\n");
    }

    #[test]
    fn field_flags_override_config() {
        Workspace::new()
            .with_config(TWO_FIELDS)
            .cmd()
            .args([
                "parse",
                "--fields",
                "summary",
                "--default-fields",
                "summary",
                "-q",
                "hello",
            ])
            .assert()
            .success()
            .stdout("hello\n");
    }

    #[test]
    fn keyword_field_is_not_analyzed() {
        Workspace::new()
            .with_config(TWO_FIELDS)
            .cmd()
            .args(["parse", "id:AB-12"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Term(id:\"AB-12\")"));
    }

    #[test]
    fn json_output_format() {
        let output = Workspace::new()
            .with_config(TWO_FIELDS)
            .cmd()
            .args(["parse", "--json", "title:rust", "a AND"])
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        let queries = json["queries"].as_array().unwrap();
        assert_eq!(queries.len(), 2);

        assert_eq!(queries[0]["input"], "title:rust");
        assert_eq!(queries[0]["query"]["type"], "term");
        assert_eq!(queries[0]["query"]["field"], "title");
        assert_eq!(queries[0]["query"]["term"], "rust");
        assert_eq!(queries[0]["query_string"], "title:rust");
        assert!(queries[0].get("error").is_none());

        assert!(queries[1].get("query").is_none());
        assert_eq!(queries[1]["error"]["message"], "unexpected end of query");
        assert_eq!(queries[1]["error"]["position"], 5);
    }

    #[test]
    fn syntax_error_shows_context() {
        Workspace::new()
            .cmd()
            .args(["parse", "\"unterminated phrase"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("query syntax error"))
            .stderr(predicate::str::contains("hint:"));
    }

    #[test]
    fn continues_after_failed_query() {
        Workspace::new()
            .cmd()
            .args(["parse", "a AND", "rust"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("# rust"))
            .stdout(predicate::str::contains("Term(body:\"rust\")"))
            .stderr(predicate::str::contains("unexpected end of query"));
    }

    #[test]
    fn lenient_flag_accepts_bad_syntax() {
        Workspace::new()
            .cmd()
            .args(["parse", "--lenient", "[x"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Term(body:\"x\")"));
    }

    #[test]
    fn lenient_config_accepts_bad_syntax() {
        Workspace::new()
            .with_config("root = true\n[parser]\nlenient = true\n")
            .cmd()
            .args(["parse", "a AND"])
            .assert()
            .success();
    }

    #[test]
    fn clean_flag_repairs_input() {
        Workspace::new()
            .cmd()
            .args(["parse", "--clean", "-q", "\"big fox"])
            .assert()
            .success()
            .stdout("\"big fox\"\n");
    }

    #[test]
    fn and_flag_requires_every_term() {
        Workspace::new()
            .cmd()
            .args(["parse", "--and", "-q", "red fox"])
            .assert()
            .success()
            .stdout("+red +fox\n");
    }

    #[test]
    fn empty_query_is_empty_tree() {
        Workspace::new()
            .cmd()
            .args(["parse", ""])
            .assert()
            .success()
            .stdout("Empty\n");
    }

    #[test]
    fn unknown_analyzer_fails() {
        Workspace::new()
            .cmd()
            .args(["parse", "-a", "klingon", "rust"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("klingon"));
    }

    #[test]
    fn requires_a_query() {
        Workspace::new().cmd().arg("parse").assert().failure();
    }

    #[test]
    fn fails_on_invalid_config() {
        Workspace::new()
            .with_config("[parser\n")
            .cmd()
            .args(["parse", "rust"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}

mod clean {
    use super::*;

    #[test]
    fn closes_quotes_and_parentheses() {
        Workspace::new()
            .cmd()
            .args(["clean", "((a b"])
            .assert()
            .success()
            .stdout("((a b))\n");

        Workspace::new()
            .cmd()
            .args(["clean", "a) b"])
            .assert()
            .success()
            .stdout("(a) b\n");
    }

    #[test]
    fn works_with_invalid_config() {
        Workspace::new()
            .with_config("not toml at all [")
            .cmd()
            .args(["clean", "\"hello world"])
            .assert()
            .success()
            .stdout("\"hello world\"\n");
    }
}

mod tokens {
    use super::*;

    #[test]
    fn shows_table() {
        Workspace::new()
            .cmd()
            .args(["tokens", "Quick Brown Fox"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Position"))
            .stdout(predicate::str::contains("quick"))
            .stdout(predicate::str::contains("brown"))
            .stdout(predicate::str::contains("fox"));
    }

    #[test]
    fn json_output_format() {
        let output = Workspace::new()
            .cmd()
            .args(["tokens", "--json", "-a", "english", "running dogs"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["field"], "body");
        let tokens = json["tokens"].as_array().unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0]["text"], "run");
        assert_eq!(tokens[0]["position"], 0);
        assert_eq!(tokens[1]["text"], "dog");
        assert_eq!(tokens[1]["position"], 1);
    }

    #[test]
    fn uses_per_field_analyzer() {
        let output = Workspace::new()
            .with_config(TWO_FIELDS)
            .cmd()
            .args(["tokens", "--json", "-f", "id", "AB-12 x"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["field"], "id");
        assert_eq!(json["tokens"][0]["text"], "AB-12 x");
    }

    #[test]
    fn reports_no_tokens() {
        Workspace::new()
            .cmd()
            .args(["tokens", "!!!"])
            .assert()
            .success()
            .stdout(predicate::str::contains("no tokens"));
    }
}

mod config {
    use super::*;

    #[test]
    fn shows_defaults_without_config() {
        Workspace::new()
            .cmd()
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("no configuration files found"))
            .stdout(predicate::str::contains("[parser]"))
            .stdout(predicate::str::contains("max_clauses = 512"));
    }

    #[test]
    fn shows_merged_settings() {
        Workspace::new()
            .with_config(TWO_FIELDS)
            .cmd()
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains(".sift.toml"))
            .stdout(predicate::str::contains("\"title\""))
            .stdout(predicate::str::contains("keyword"));
    }

    #[test]
    fn includes_global_config() {
        let ws = Workspace::new();
        fs::write(
            ws.home().join(".sift.toml"),
            "[analysis]\nanalyzer = \"english\"\n",
        )
        .unwrap();

        ws.cmd()
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("analyzer = \"english\""));
    }
}

mod check {
    use super::*;

    #[test]
    fn passes_with_valid_config() {
        Workspace::new()
            .with_config(TWO_FIELDS)
            .cmd()
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("No issues found."));
    }

    #[test]
    fn warns_without_fields() {
        Workspace::new()
            .cmd()
            .arg("check")
            .assert()
            .failure()
            .stdout(predicate::str::contains("no fields are defined"))
            .stdout(predicate::str::contains("Hint:"));
    }

    #[test]
    fn warns_on_unlisted_default_field() {
        Workspace::new()
            .with_config("root = true\n[parser]\nfields = [\"title\"]\ndefault_fields = [\"body\"]\n")
            .cmd()
            .arg("check")
            .assert()
            .failure()
            .stdout(predicate::str::contains("default field 'body'"));
    }

    #[test]
    fn fails_on_unknown_analyzer() {
        Workspace::new()
            .with_config("root = true\n[parser]\nfields = [\"body\"]\n[analysis]\nanalyzer = \"klingon\"\n")
            .cmd()
            .arg("check")
            .assert()
            .failure()
            .stdout(predicate::str::contains("klingon"));
    }

    #[test]
    fn fails_on_invalid_toml() {
        Workspace::new()
            .with_config("[parser\nfields = 1\n")
            .cmd()
            .arg("check")
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let ws = Workspace::new();
        ws.cmd()
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("Created"));

        let contents = fs::read_to_string(ws.project().join(".sift.toml")).unwrap();
        assert!(contents.contains("# [parser]"));
        assert!(contents.contains("# root = true"));
    }

    #[test]
    fn created_config_loads() {
        let ws = Workspace::new();
        ws.cmd().arg("init").assert().success();
        ws.cmd()
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("analyzer = \"standard\""));
    }

    #[test]
    fn fails_if_config_exists() {
        let ws = Workspace::new().with_config("existing");
        ws.cmd()
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("--force"));

        let contents = fs::read_to_string(ws.project().join(".sift.toml")).unwrap();
        assert_eq!(contents, "existing");
    }

    #[test]
    fn force_overwrites_existing() {
        let ws = Workspace::new().with_config("old content");
        ws.cmd().args(["init", "--force"]).assert().success();

        let contents = fs::read_to_string(ws.project().join(".sift.toml")).unwrap();
        assert!(contents.contains("# [parser]"));
    }

    #[test]
    fn global_writes_to_home() {
        let ws = Workspace::new();
        ws.cmd().args(["init", "--global"]).assert().success();

        assert!(ws.home().join(".sift.toml").exists());
        assert!(!ws.project().join(".sift.toml").exists());
    }

    #[test]
    fn home_directory_means_global() {
        let ws = Workspace::new();
        sift_in(&ws.home(), &ws.home())
            .arg("init")
            .assert()
            .success();

        let contents = fs::read_to_string(ws.home().join(".sift.toml")).unwrap();
        assert!(!contents.contains("root = true"));
    }
}

mod help {
    use super::*;

    #[test]
    fn top_level_lists_commands() {
        sift()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("parse"))
            .stdout(predicate::str::contains("tokens"));
    }

    #[test]
    fn parse_help_shows_syntax() {
        sift()
            .args(["parse", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("QUERY SYNTAX"));
    }
}
