//! Turns raw commit messages into [`Commit`] records.
//!
//! Headers follow `<Type>: <Subject>`. The footer starts at the first note
//! keyword (`BREAKING CHANGE:`, `NOTE:`, ...) or closing reference
//! (`Closes #12`) and runs to the end of the message.

use log::debug;

use crate::commit::{Commit, Commits, Note, Reference};

/// The separator placed after each entry by
/// `git log --format=%H%n%B%n==END==`
pub const LOG_ENTRY_END: &str = "==END==";

/// Parses a single commit message.
///
/// # Example
///
/// ```
/// # use notelog::parser::parse_commit;
/// let commit = parse_commit("684997d0", "Fix: Simple fix. Closes #2");
///
/// assert_eq!(commit.commit_type.as_deref(), Some("Fix"));
/// assert_eq!(commit.subject.as_deref(), Some("Simple fix. Closes #2"));
/// ```
pub fn parse_commit(hash: &str, message: &str) -> Commit {
    let mut lines = message.trim_start_matches('\n').lines();
    let header = lines.next().unwrap_or("").trim_end().to_owned();

    let (commit_type, subject) = match regex!(r"^([^:]+): (.+)$").captures(&header) {
        Some(caps) => (
            caps.get(1).map(|m| m.as_str().to_owned()),
            caps.get(2).map(|m| m.as_str().to_owned()),
        ),
        None => (None, None),
    };

    let rest = lines.collect::<Vec<_>>();
    let footer_start = rest
        .iter()
        .position(|line| is_note_line(line) || is_reference_line(line))
        .unwrap_or(rest.len());

    let body = block(&rest[..footer_start]);
    let footer = block(&rest[footer_start..]);

    let (notes, references) = match footer.as_deref() {
        Some(footer) => (parse_notes(footer), parse_references(footer)),
        None => (vec![], vec![]),
    };

    debug!(
        "Parsed commit {hash}: type {commit_type:?}, {} notes, {} references",
        notes.len(),
        references.len()
    );

    Commit {
        hash: hash.to_owned(),
        header,
        commit_type,
        subject,
        body,
        footer,
        notes,
        references,
    }
}

/// Parses the output of `git log --format=%H%n%B%n==END==`
pub fn parse_log(output: &str) -> Commits {
    output
        .split(LOG_ENTRY_END)
        .map(|entry| entry.trim_matches('\n'))
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (hash, message) = entry.split_once('\n').unwrap_or((entry, ""));
            parse_commit(hash.trim(), message)
        })
        .collect()
}

fn is_note_line(line: &str) -> bool {
    note_keyword().is_match(line)
}

fn is_reference_line(line: &str) -> bool {
    regex!(r"(?i)^\s*(?:close[sd]?|fix(?:e[sd])?|resolve[sd]?)\s+#\d+").is_match(line)
}

fn note_keyword() -> &'static regex::Regex {
    regex!(r"^((?:MAJOR |MINOR )?BREAKING CHANGES?|NOTE):\s*(.*)$")
}

fn reference_keyword() -> &'static regex::Regex {
    regex!(r"(?i)\b(close[sd]?|fix(?:e[sd])?|resolve[sd]?)\s+((?:#\d+(?:,\s*)?)+)")
}

// Joins the lines, dropping leading and trailing blank ones
fn block(lines: &[&str]) -> Option<String> {
    let text = lines.join("\n");
    let text = text.trim_matches('\n').trim_end();
    if text.is_empty() {
        None
    } else {
        Some(text.to_owned())
    }
}

fn parse_notes(footer: &str) -> Vec<Note> {
    let mut notes: Vec<Note> = vec![];
    let mut open = false;
    for line in footer.lines() {
        if let Some(caps) = note_keyword().captures(line) {
            notes.push(Note::new(&caps[1], caps[2].trim()));
            open = true;
        } else if is_reference_line(line) {
            open = false;
        } else if open {
            if let Some(note) = notes.last_mut() {
                if !note.text.is_empty() {
                    note.text.push('\n');
                }
                note.text.push_str(line);
            }
        }
    }
    for note in &mut notes {
        note.text = note.text.trim().to_owned();
    }
    notes
}

fn parse_references(footer: &str) -> Vec<Reference> {
    let mut references = vec![];
    for line in footer.lines() {
        for caps in reference_keyword().captures_iter(line) {
            let action = caps[1].to_owned();
            for issue in regex!(r"#(\d+)").captures_iter(&caps[2]) {
                references.push(Reference {
                    action: Some(action.clone()),
                    issue: issue[1].to_owned(),
                    raw: line.trim().to_owned(),
                    prefix: "#".to_owned(),
                });
            }
        }
    }
    references
}
