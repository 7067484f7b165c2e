use std::io;

use log::debug;
use time::macros::format_description;

use crate::{
    commit::{short_hash, Commit},
    error::Result,
    fmt::{indent, nest, FormatWriter, Release},
    sectionmap::{NoteEntry, SectionMap},
};

/// Wraps a `std::io::Write` object to write changelog output in a Markdown
/// format
///
/// # Example
///
/// ```no_run
/// # use std::fs::File;
/// # use notelog::{Classifier, fmt::MarkdownWriter};
/// let classifier = Classifier::new().unwrap();
///
/// // Create a file to hold our results, which the MarkdownWriter will wrap
/// // (note, .unwrap() is only used to keep the example short and concise)
/// let mut file = File::create("CHANGELOG.md").unwrap();
/// let mut writer = MarkdownWriter::new(&mut file);
/// ```
pub struct MarkdownWriter<'a>(&'a mut dyn io::Write);

impl<'a> MarkdownWriter<'a> {
    /// Creates a new instance of the `MarkdownWriter` struct using a
    /// `std::io::Write` object.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use std::io::BufWriter;
    /// # use notelog::fmt::MarkdownWriter;
    /// // Create a MarkdownWriter to wrap stdout
    /// let out = std::io::stdout();
    /// let mut out_buf = BufWriter::new(out.lock());
    /// let mut writer = MarkdownWriter::new(&mut out_buf);
    /// ```
    pub fn new<T: io::Write + 'a>(writer: &'a mut T) -> MarkdownWriter<'a> {
        MarkdownWriter(writer)
    }

    fn write_header(&mut self, release: &Release) -> Result<()> {
        let date = release.date.format(format_description!("[year]-[month]-[day]"))?;
        writeln!(self.0, "## {} ({date})", release.version).map_err(Into::into)
    }

    /// Writes the commits of one section
    fn write_section(&mut self, release: &Release, title: &str, entries: &[Commit]) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }
        debug!("Writing section: {title}");

        write!(self.0, "\n### {title}\n\n")?;

        for entry in entries {
            let subject = entry.subject.as_deref().unwrap_or(&entry.header);
            writeln!(self.0, "* {subject} ({})", commit_ref(release, &entry.hash, entry.short_hash()))?;

            if let Some(body) = entry.body.as_deref() {
                write!(self.0, "\n{}\n\n", nest(body))?;
            }
        }

        Ok(())
    }

    /// Writes the notes collected under one title
    fn write_notes(&mut self, release: &Release, title: &str, notes: &[NoteEntry]) -> Result<()> {
        debug!("Writing notes: {title}");
        write!(self.0, "\n### {title}\n\n")?;

        for note in notes {
            let mut lines = note.text.lines();
            let first = lines.next().unwrap_or("");
            write!(self.0, "* {first}")?;
            for line in lines {
                write!(self.0, "\n{}", indent(line))?;
            }
            writeln!(self.0, " ({})", commit_ref(release, &note.hash, short_hash(&note.hash)))?;
        }

        Ok(())
    }
}

// `[abc1234](<commit link>)`, or just the short hash without a repository
fn commit_ref(release: &Release, hash: &str, short: &str) -> String {
    match release.repository.as_deref() {
        Some(repo) if !repo.is_empty() => {
            format!("[{short}]({})", release.link_style.commit_link(hash, repo))
        }
        _ => short.to_owned(),
    }
}

impl<'a> FormatWriter for MarkdownWriter<'a> {
    fn write_changelog(&mut self, release: &Release, sm: &SectionMap) -> Result<()> {
        self.write_header(release)?;

        if sm.is_empty() {
            debug!("There are no sections to write");
            write!(self.0, "\nInternal changes only (updated dependencies, documentation, etc.).\n")?;
        }

        for (title, entries) in &sm.sections {
            self.write_section(release, title, entries)?;
        }
        for (title, notes) in &sm.notes {
            self.write_notes(release, title, notes)?;
        }

        self.0.flush().map_err(Into::into)
    }
}
