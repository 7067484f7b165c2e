use std::fs;

use notelog::{fmt::MarkdownWriter, parser, Classifier, LinkStyle, Logger};
use time::macros::date;

const LOG: &str = "\
1111111aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa
Fix: Simple fix. Closes #2

==END==
2222222bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb
Docs: Updated the README.

==END==
3333333ccccccccccccccccccccccccccccccccc
Merge pull request #7 from ckeditor/t/6

Feature: Introduced the new API. Thanks @CKEditor.

The description of the feature.

BREAKING CHANGE: The old API is gone. See #5.

==END==
4444444ddddddddddddddddddddddddddddddddd
WIP

==END==
";

fn project(cfg: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{
            "name": "ckeditor5-dev",
            "bugs": "https://github.com/ckeditor/ckeditor5-dev/issues",
            "repository": "ckeditor/ckeditor5-dev"
        }"#,
    )
    .unwrap();
    fs::write(dir.path().join(".notelog.toml"), cfg).unwrap();
    dir
}

#[test]
fn full_changelog() {
    let dir = project("[notelog]\n");
    let classifier = Classifier::from_file(dir.path().join(".notelog.toml")).unwrap();
    assert!(classifier.display_logs);
    assert_eq!(
        classifier.repository.as_deref(),
        Some("https://github.com/ckeditor/ckeditor5-dev")
    );

    let mut log_out = Vec::new();
    let mut md = Vec::new();
    {
        let mut log = classifier.logger(&mut log_out).colors(false);
        let mut writer = MarkdownWriter::new(&mut md);
        let release = classifier.release("1.0.0").date(date!(2017-04-05));
        classifier
            .write_changelog_with(&mut writer, &release, parser::parse_log(LOG), &mut log)
            .unwrap();
    }

    assert_eq!(
        String::from_utf8(log_out).unwrap(),
        "* 1111111 \"Fix: Simple fix. Closes #2\" INCLUDED\n\
         * 2222222 \"Docs: Updated the README.\" SKIPPED\n\
         * 3333333 \"Merge pull request #7 from ckeditor/t/6\" INCLUDED\n\
         * 4444444 \"WIP\" INVALID\n"
    );

    let repo = "https://github.com/ckeditor/ckeditor5-dev";
    let bugs = "https://github.com/ckeditor/ckeditor5-dev/issues";
    let c1 = format!("[1111111]({repo}/commit/1111111aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa)");
    let c3 = format!("[3333333]({repo}/commit/3333333ccccccccccccccccccccccccccccccccc)");
    assert_eq!(
        String::from_utf8(md).unwrap(),
        format!(
            "## 1.0.0 (2017-04-05)\n\
             \n### Bug fixes\n\n\
             * Simple fix. Closes [#2]({bugs}/2) ({c1})\n\
             \n### Features\n\n\
             * Introduced the new API. Thanks [@CKEditor](https://github.com/CKEditor). ({c3})\n\
             \n  The description of the feature.\n\n\
             \n### BREAKING CHANGES\n\n\
             * The old API is gone. See [#5]({bugs}/5). ({c3})\n"
        )
    );
}

#[test]
fn configured_types_and_quiet_logs() {
    let dir = project(
        r#"
[notelog]
display-logs = false
link-style = "gitlab"
repository = "https://gitlab.com/org/repo"

[types.Docs]
label = "Documentation"
public = true
"#,
    );
    let classifier = Classifier::from_file(dir.path().join(".notelog.toml")).unwrap();
    assert_eq!(classifier.link_style, LinkStyle::Gitlab);
    assert_eq!(classifier.repository.as_deref(), Some("https://gitlab.com/org/repo"));

    let mut out = Vec::new();
    let included = classifier
        .classify_all(parser::parse_log(LOG), &mut classifier.logger(&mut out))
        .unwrap();

    assert!(out.is_empty());
    let types = included
        .iter()
        .filter_map(|c| c.commit_type.as_deref())
        .collect::<Vec<_>>();
    assert_eq!(types, vec!["Bug fixes", "Documentation", "Features"]);
}

#[test]
fn missing_bugs_url_fails_loudly() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("package.json"), r#"{ "name": "pkg" }"#).unwrap();
    fs::write(dir.path().join(".notelog.toml"), "").unwrap();
    let classifier = Classifier::from_file(dir.path().join(".notelog.toml")).unwrap();

    let mut commits = parser::parse_log(LOG);
    let before = commits.clone();
    let mut out = Vec::new();
    let res = classifier.classify(&mut commits[0], &mut Logger::new(&mut out, true));

    let err = res.unwrap_err();
    assert_eq!(err.to_string(), "package descriptor must declare a bugs URL");
    assert_eq!(commits, before);
    assert!(out.is_empty());
}

#[test]
fn unknown_type_in_config() {
    let dir = project("[types.Chore]\npublic = true\n");
    let res = Classifier::from_file(dir.path().join(".notelog.toml"));

    assert_eq!(
        res.unwrap_err().to_string(),
        "unrecognized commit type in config: Chore"
    );
}
