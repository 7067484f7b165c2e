use std::{
    env, io,
    path::{Path, PathBuf},
};

use log::debug;

use crate::{
    commit::{normalize_note_title, Commit, Commits},
    commit_type::{Outcome, TypeTable},
    config::RawCfg,
    error::{Error, Result},
    fmt::{indent, FormatWriter, Release},
    link_style::{link_issues, link_users, LinkStyle},
    logger::Logger,
    package::PackageDescriptor,
    sectionmap::SectionMap,
    DEFAULT_CONFIG_FILE, DEFAULT_PACKAGE_FILE,
};

/// Decides which commits make it into a changelog and normalizes the ones
/// that do.
#[derive(Debug, Clone)]
pub struct Classifier {
    /// The descriptor the issue tracker URL is read from
    pub package: PackageDescriptor,
    /// Commit types, their section labels and whether they are public
    pub types: TypeTable,
    /// Whether informational lines are written (Defaults to `true`)
    pub display_logs: bool,
    /// The repository used for the base of commit links (Defaults to the
    /// `repository` field of the package descriptor)
    pub repository: Option<String>,
    /// The link style to used for commit links
    pub link_style: LinkStyle,
}

impl Classifier {
    /// Creates a `Classifier` from the default `.notelog.toml` configuration
    /// file in the current working directory.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use notelog::Classifier;
    /// let classifier = Classifier::new().unwrap();
    /// ```
    pub fn new() -> Result<Self> {
        debug!("Creating default classifier with new()");
        Classifier::from_file(DEFAULT_CONFIG_FILE)
    }

    /// Creates a `Classifier` with the default type table for the given
    /// package descriptor.
    ///
    /// # Example
    ///
    /// ```
    /// # use notelog::{Classifier, PackageDescriptor};
    /// let pkg: PackageDescriptor = r#"{ "bugs": "https://github.com/org/repo/issues" }"#
    ///     .parse()
    ///     .unwrap();
    /// let classifier = Classifier::with_package(pkg);
    /// ```
    pub fn with_package(package: PackageDescriptor) -> Self {
        Classifier {
            repository: package.repository_url(),
            package,
            types: TypeTable::default(),
            display_logs: true,
            link_style: LinkStyle::default(),
        }
    }

    /// Creates a `Classifier` from a TOML configuration file. The package
    /// descriptor is looked up relative to the directory of the file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use notelog::Classifier;
    /// let classifier = Classifier::from_file("/myproject/.notelog.toml").unwrap();
    /// ```
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        debug!("Creating classifier with \n\tfile: {:?}", file.as_ref());
        let cfg_file = if file.as_ref().is_relative() {
            let cwd = env::current_dir().map_err(|_| Error::CurrentDir)?;
            cwd.join(file.as_ref())
        } else {
            file.as_ref().to_path_buf()
        };
        let cfg = RawCfg::from_file(&cfg_file)?;

        let mut dir = cfg_file.clone();
        dir.pop();
        let package_file: PathBuf = dir.join(
            cfg.notelog
                .package
                .as_deref()
                .unwrap_or(DEFAULT_PACKAGE_FILE),
        );

        let mut classifier = Classifier::with_package(PackageDescriptor::from_path(package_file)?)
            .display_logs(cfg.notelog.display_logs)
            .link_style(cfg.notelog.link_style);
        if let Some(repo) = cfg.notelog.repository {
            classifier.repository = Some(repo);
        }
        for (name, ty) in cfg.types {
            classifier.types.set(&name, ty.label, ty.public)?;
        }

        debug!("Returning classifier:\n{:?}", classifier);
        Ok(classifier)
    }

    /// Sets the commit type table
    pub fn types(mut self, types: TypeTable) -> Self {
        self.types = types;
        self
    }

    /// Sets whether informational lines are written by loggers created with
    /// `Classifier::logger`
    pub fn display_logs(mut self, display: bool) -> Self {
        self.display_logs = display;
        self
    }

    /// Sets the repository used for the base of commit links
    ///
    /// **NOTE:** Leave off the trailing `.git`
    pub fn repository<S: Into<String>>(mut self, r: S) -> Self {
        self.repository = Some(r.into());
        self
    }

    /// Sets the link style to use for commit links
    pub fn link_style(mut self, l: LinkStyle) -> Self {
        self.link_style = l;
        self
    }

    /// Creates a logger honoring `display_logs`
    pub fn logger<'a, T: io::Write>(&self, out: &'a mut T) -> Logger<'a> {
        Logger::new(out, self.display_logs)
    }

    /// Describes a release for a `FormatWriter`, dated today
    pub fn release<S: Into<String>>(&self, version: S) -> Release {
        Release::new(version)
            .repository(self.repository.clone())
            .link_style(self.link_style)
    }

    /// Classifies a commit and normalizes it in place, writing one summary
    /// line to `log`.
    ///
    /// Fails only when the package descriptor has no bugs URL, in which case
    /// the commit is left untouched and nothing is logged.
    ///
    /// # Example
    ///
    /// ```
    /// # use notelog::{Classifier, Commit, Logger, Outcome, PackageDescriptor};
    /// let pkg: PackageDescriptor = r#"{ "bugs": "https://github.com/org/repo/issues" }"#
    ///     .parse()
    ///     .unwrap();
    /// let classifier = Classifier::with_package(pkg);
    ///
    /// let mut commit = Commit {
    ///     hash: "684997d0eb2eca76b9e058fb1c3fa00b50059cdc".into(),
    ///     header: "Fix: Simple fix. Closes #2".into(),
    ///     commit_type: Some("Fix".into()),
    ///     subject: Some("Simple fix. Closes #2".into()),
    ///     ..Commit::default()
    /// };
    ///
    /// let mut out = Vec::new();
    /// let outcome = classifier
    ///     .classify(&mut commit, &mut Logger::new(&mut out, true))
    ///     .unwrap();
    ///
    /// assert_eq!(outcome, Outcome::Included);
    /// assert_eq!(commit.commit_type.as_deref(), Some("Bug fixes"));
    /// assert_eq!(
    ///     commit.subject.as_deref(),
    ///     Some("Simple fix. Closes [#2](https://github.com/org/repo/issues/2)")
    /// );
    /// ```
    pub fn classify(&self, commit: &mut Commit, log: &mut Logger) -> Result<Outcome> {
        let bugs_url = self.package.bugs_url().ok_or(Error::MissingBugsUrl)?;
        let header = commit.header.clone();

        for note in &mut commit.notes {
            note.title = normalize_note_title(&note.title).to_owned();
        }

        unwrap_merge(commit);

        if let Some(subject) = commit.subject.as_mut() {
            *subject = link_references(subject, bugs_url);
        }
        for note in &mut commit.notes {
            note.text = link_references(&note.text, bugs_url);
        }

        let outcome = self.types.classify(commit.commit_type.as_deref());
        if outcome.is_included() {
            let label = commit
                .commit_type
                .as_deref()
                .and_then(|name| self.types.get(name))
                .map(|entry| entry.label.clone());
            commit.commit_type = label;
        }

        log.info(&format!(
            "* {} \"{}\" {}",
            commit.short_hash(),
            header,
            outcome.paint(log.colors_enabled())
        ))?;

        Ok(outcome)
    }

    /// Classifies every commit and keeps only the included ones
    pub fn classify_all(&self, commits: Commits, log: &mut Logger) -> Result<Commits> {
        let mut included = Vec::with_capacity(commits.len());
        for mut commit in commits {
            if self.classify(&mut commit, log)?.is_included() {
                included.push(commit);
            }
        }
        debug!("{} commits included", included.len());
        Ok(included)
    }

    /// Classifies the commits and writes the included ones with a specified
    /// `FormatWriter` format
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use notelog::{Classifier, fmt::MarkdownWriter, parser};
    /// # use std::io;
    /// let classifier = Classifier::new().unwrap();
    /// let commits = parser::parse_log(&std::fs::read_to_string("git.log").unwrap());
    ///
    /// let mut stderr = io::stderr();
    /// let mut log = classifier.logger(&mut stderr);
    ///
    /// let out = io::stdout();
    /// let mut out_buf = io::BufWriter::new(out.lock());
    /// let mut writer = MarkdownWriter::new(&mut out_buf);
    ///
    /// classifier
    ///     .write_changelog_with(&mut writer, &classifier.release("1.0.0"), commits, &mut log)
    ///     .unwrap();
    /// ```
    pub fn write_changelog_with<W>(
        &self,
        writer: &mut W,
        release: &Release,
        commits: Commits,
        log: &mut Logger,
    ) -> Result<()>
    where
        W: FormatWriter,
    {
        debug!("Writing changelog from writer");
        let sm = SectionMap::from_commits(self.classify_all(commits, log)?, &self.types);

        writer.write_changelog(release, &sm)
    }
}

fn link_references(text: &str, bugs_url: &str) -> String {
    link_issues(&link_users(text), bugs_url)
}

fn is_merge_header(header: &str) -> bool {
    regex!(r"^Merge (?:pull request #\d+ from \S+|branch '[^']+')").is_match(header)
}

// Promotes the first `<Type>: <Subject>` line of a merge commit's body to the
// commit itself. That line is dropped from the body only when it is the first
// one.
fn unwrap_merge(commit: &mut Commit) {
    if !is_merge_header(&commit.header) {
        return;
    }
    let Some(body) = commit.body.as_deref() else {
        return;
    };

    let lines = body.lines().collect::<Vec<_>>();
    let Some((idx, commit_type, subject)) = lines.iter().enumerate().find_map(|(idx, line)| {
        regex!(r"^(\w+): (.+)$")
            .captures(line.trim())
            .map(|caps| (idx, caps[1].to_owned(), caps[2].to_owned()))
    }) else {
        debug!("Merge commit {} has no embedded commit", commit.hash);
        return;
    };

    let first = lines.iter().position(|line| !line.trim().is_empty());
    let rest = if first == Some(idx) {
        &lines[idx + 1..]
    } else {
        &lines[..]
    };
    let rest = rest.join("\n");
    let rest = rest.trim_matches('\n').trim_end();
    let body = if rest.is_empty() {
        None
    } else {
        Some(indent(rest))
    };

    debug!("Unwrapped merge commit {} as {commit_type}", commit.hash);
    commit.commit_type = Some(commit_type);
    commit.subject = Some(subject);
    commit.body = body;
}
