use std::{result::Result as StdResult, str::FromStr};

use strum::{Display, EnumString};

/// Determines the hyperlink style used in commit links. Defaults to
/// `LinkStyle::Github`
///
/// # Example
///
/// ```
/// # use notelog::LinkStyle;
/// let style: LinkStyle = "gitlab".parse().unwrap();
/// assert_eq!(style, LinkStyle::Gitlab);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum LinkStyle {
    #[default]
    Github,
    Gitlab,
    Stash,
    Cgit,
    Gitweb,
}

impl<'de> serde::de::Deserialize<'de> for LinkStyle {
    fn deserialize<D>(deserializer: D) -> StdResult<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl LinkStyle {
    /// Gets a hyperlink url to a commit in the specified format.
    ///
    /// # Example
    /// ```
    /// # use notelog::LinkStyle;
    /// let link = LinkStyle::Github;
    /// let commit = link.commit_link("123abc891234567890abcdefabc4567898724", "https://github.com/ckeditor/ckeditor5-dev");
    ///
    /// assert_eq!("https://github.com/ckeditor/ckeditor5-dev/commit/123abc891234567890abcdefabc4567898724", commit);
    /// ```
    ///
    /// # Example
    /// Note that for `LinkStyle::Gitweb` the actual repository name has to be
    /// given as part of the parameter string of the URL:
    ///
    /// ```
    /// # use notelog::LinkStyle;
    /// let link = LinkStyle::Gitweb;
    /// let commit = link.commit_link("deadbeef", "http://example.com/gitweb/?p=foo.git");
    ///
    /// assert_eq!("http://example.com/gitweb/?p=foo.git;a=commit;h=deadbeef", commit);
    /// ```
    pub fn commit_link<S: AsRef<str>>(&self, hash: S, repo: S) -> String {
        let (hash, link) = (hash.as_ref(), repo.as_ref());
        match *self {
            LinkStyle::Github | LinkStyle::Gitlab => format!("{link}/commit/{hash}"),
            LinkStyle::Stash => format!("{link}/commits/{hash}"),
            LinkStyle::Cgit => format!("{link}/commit/?id={hash}"),
            LinkStyle::Gitweb => format!("{link};a=commit;h={hash}"),
        }
    }
}

/// Replaces every bare `#<digits>` with a markdown link into the issue
/// tracker. References that are already linked, or that sit inside the text
/// of an existing markdown link, are left alone.
///
/// # Example
///
/// ```
/// # use notelog::link_style::link_issues;
/// let text = link_issues("Simple fix. Closes #2", "https://github.com/org/repo/issues");
///
/// assert_eq!(text, "Simple fix. Closes [#2](https://github.com/org/repo/issues/2)");
/// ```
pub fn link_issues(text: &str, bugs_url: &str) -> String {
    regex!(r"\[[^\]]*\]\([^)]*\)|(^|[^\[\w&])#(\d+)")
        .replace_all(text, |caps: &regex::Captures| match (caps.get(1), caps.get(2)) {
            (Some(pre), Some(issue)) => {
                let issue = issue.as_str();
                format!("{}[#{issue}]({bugs_url}/{issue})", pre.as_str())
            }
            _ => caps[0].to_owned(),
        })
        .into_owned()
}

/// Replaces every `@<username>` mention with a link to the GitHub profile.
/// An `@` that follows a word character (an e-mail address) is not a mention,
/// and existing markdown links are copied as they are.
///
/// # Example
///
/// ```
/// # use notelog::link_style::link_users;
/// let text = link_users("Thanks to @CKEditor!");
///
/// assert_eq!(text, "Thanks to [@CKEditor](https://github.com/CKEditor)!");
/// ```
pub fn link_users(text: &str) -> String {
    regex!(r"\[[^\]]*\]\([^)]*\)|(^|[^\[\w/.])@([\w-]+)")
        .replace_all(text, |caps: &regex::Captures| match (caps.get(1), caps.get(2)) {
            (Some(pre), Some(user)) => {
                let user = user.as_str();
                format!("{}[@{user}](https://github.com/{user})", pre.as_str())
            }
            _ => caps[0].to_owned(),
        })
        .into_owned()
}
