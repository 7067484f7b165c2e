use indexmap::IndexMap;

use crate::{
    commit::{normalize_note_title, Commit, BREAKING_CHANGES},
    commit_type::TypeTable,
};

/// A note together with the commit that carried it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    pub text: String,
    pub hash: String,
}

/// A struct which holds the sections of a changelog, i.e. section labels ->
/// commits and note titles -> notes
#[derive(Debug, Default)]
pub struct SectionMap {
    /// Included commits, keyed by the label of their type in type table order
    pub sections: IndexMap<String, Vec<Commit>>,
    /// Notes keyed by title, `BREAKING CHANGES` first
    pub notes: IndexMap<String, Vec<NoteEntry>>,
}

impl SectionMap {
    /// Creates a section map from classified commits, which we can then
    /// iterate through and write
    ///
    /// # Example
    ///
    /// ```
    /// # use notelog::{Commit, SectionMap, TypeTable};
    /// let commit = Commit {
    ///     hash: "684997d0eb2eca76b9e058fb1c3fa00b50059cdc".into(),
    ///     commit_type: Some("Bug fixes".into()),
    ///     subject: Some("Simple fix.".into()),
    ///     ..Commit::default()
    /// };
    /// let sm = SectionMap::from_commits(vec![commit], &TypeTable::default());
    ///
    /// assert_eq!(sm.sections.keys().collect::<Vec<_>>(), vec!["Bug fixes"]);
    /// ```
    pub fn from_commits(commits: Vec<Commit>, types: &TypeTable) -> SectionMap {
        let mut sm = SectionMap {
            sections: types.public_labels().map(|l| (l.to_owned(), vec![])).collect(),
            notes: IndexMap::new(),
        };
        sm.notes.insert(BREAKING_CHANGES.to_owned(), vec![]);

        for entry in commits {
            for note in &entry.notes {
                sm.notes
                    .entry(normalize_note_title(&note.title).to_owned())
                    .or_default()
                    .push(NoteEntry {
                        text: note.text.clone(),
                        hash: entry.hash.clone(),
                    });
            }
            let label = entry.commit_type.clone().unwrap_or_default();
            sm.sections.entry(label).or_default().push(entry);
        }

        sm.sections.retain(|_, commits| !commits.is_empty());
        sm.notes.retain(|_, notes| !notes.is_empty());
        sm
    }

    pub fn is_empty(&self) -> bool { self.sections.is_empty() && self.notes.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::Note;

    fn commit(label: &str, subject: &str, notes: Vec<Note>) -> Commit {
        Commit {
            hash: format!("{subject}0000000"),
            commit_type: Some(label.into()),
            subject: Some(subject.into()),
            notes,
            ..Commit::default()
        }
    }

    #[test]
    fn sections_follow_type_order() {
        let commits = vec![
            commit("Other changes", "c", vec![]),
            commit("Features", "b", vec![]),
            commit("Bug fixes", "a", vec![]),
            commit("Features", "d", vec![]),
        ];
        let sm = SectionMap::from_commits(commits, &TypeTable::default());

        assert_eq!(
            sm.sections.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["Bug fixes", "Features", "Other changes"]
        );
        let features = sm.sections["Features"]
            .iter()
            .filter_map(|c| c.subject.as_deref())
            .collect::<Vec<_>>();
        assert_eq!(features, vec!["b", "d"]);
    }

    #[test]
    fn breaking_changes_form_one_group() {
        let commits = vec![
            commit("Features", "a", vec![Note::new("NOTE", "note")]),
            commit("Features", "b", vec![Note::new("BREAKING CHANGE", "one")]),
            commit("Bug fixes", "c", vec![Note::new("BREAKING CHANGES", "two")]),
        ];
        let sm = SectionMap::from_commits(commits, &TypeTable::default());

        assert_eq!(
            sm.notes.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["BREAKING CHANGES", "NOTE"]
        );
        let texts = sm.notes["BREAKING CHANGES"]
            .iter()
            .map(|n| n.text.as_str())
            .collect::<Vec<_>>();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[test]
    fn empty() {
        let sm = SectionMap::from_commits(vec![], &TypeTable::default());
        assert!(sm.is_empty());
    }
}
