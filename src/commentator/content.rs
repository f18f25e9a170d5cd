//! Markdown rendering for posted comments.

use crate::devops::models::ThreadContext;
use crate::validation::{MatchedCommit, ResultContext};

const MAX_LIST_ITEMS: usize = 10;
const COMMIT_HASH_LENGTH: usize = 7;
const MAX_COMMIT_MESSAGE_LENGTH: usize = 72;
const ELLIPSIS: char = '\u{2026}';
const MORE_MARKER: &str = "And more...";

const FILES_SUMMARY: &str = "Changed files matching the glob expression";
const COMMITS_SUMMARY: &str = "Commits not matching the commit expression";

/// Renders the comment text followed by collapsible evidence sections.
///
/// A single matched file is not listed; it anchors the thread instead (see
/// [`thread_context`]).
pub(crate) fn render(comment: &str, context: &ResultContext) -> String {
    let mut content = comment.to_owned();

    if let Some(files) = context.files.as_deref().filter(|files| files.len() != 1) {
        push_section(&mut content, FILES_SUMMARY, files, |file| file.clone());
    }

    if let Some(commits) = context.commits.as_deref() {
        push_section(&mut content, COMMITS_SUMMARY, commits, commit_line);
    }

    content
}

/// Anchors the thread to the matched file when there is exactly one.
pub(crate) fn thread_context(context: &ResultContext) -> Option<ThreadContext> {
    match context.files.as_deref() {
        Some([file]) => Some(ThreadContext {
            file_path: file.clone(),
        }),
        _ => None,
    }
}

fn push_section<T>(content: &mut String, summary: &str, items: &[T], line: impl Fn(&T) -> String) {
    if items.is_empty() {
        return;
    }

    let mut bullets: Vec<String> = items
        .iter()
        .take(MAX_LIST_ITEMS)
        .map(|item| format!("* {}", line(item)))
        .collect();
    if items.len() > MAX_LIST_ITEMS {
        bullets.push(format!("* {MORE_MARKER}"));
    }

    content.push_str("\n\n<details>\n<summary><i>");
    content.push_str(summary);
    content.push_str("</i></summary>\n\n");
    content.push_str(&bullets.join("\n"));
    content.push_str("\n\n</details>");
}

fn commit_line(commit: &MatchedCommit) -> String {
    let hash: String = commit.hash.chars().take(COMMIT_HASH_LENGTH).collect();
    let message = ellipsis(&commit.message, MAX_COMMIT_MESSAGE_LENGTH);
    format!("`{hash} {message}`")
}

/// Truncates `text` to `max_chars` characters, marking the cut.
fn ellipsis(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let mut output: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        output.push(ELLIPSIS);
    }
    output
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ellipsis, render, thread_context};
    use crate::validation::{MatchedCommit, ResultContext};

    fn files(count: usize) -> Vec<String> {
        (1..=count).map(|index| format!("/src/file{index}.rs")).collect()
    }

    fn commits(count: usize) -> Vec<MatchedCommit> {
        (1..=count)
            .map(|index| MatchedCommit {
                hash: format!("{index:040}"),
                message: format!("change {index}"),
            })
            .collect()
    }

    #[test]
    fn bare_comment_without_evidence() {
        assert_eq!(render("Hello", &ResultContext::default()), "Hello");
    }

    #[test]
    fn single_file_is_anchored_not_listed() {
        let context = ResultContext::default().with_files(files(1));

        assert_eq!(render("Hello", &context), "Hello");
        assert_eq!(
            thread_context(&context).map(|anchor| anchor.file_path),
            Some("/src/file1.rs".to_owned())
        );
    }

    #[rstest]
    #[case::none(0)]
    #[case::two(2)]
    #[case::many(11)]
    fn only_a_single_file_anchors_the_thread(#[case] count: usize) {
        let context = ResultContext::default().with_files(files(count));

        assert_eq!(thread_context(&context), None);
    }

    #[test]
    fn several_files_render_a_collapsible_section() {
        let context = ResultContext::default().with_files(files(2));

        insta::assert_snapshot!(render("Please review.", &context), @r"
        Please review.

        <details>
        <summary><i>Changed files matching the glob expression</i></summary>

        * /src/file1.rs
        * /src/file2.rs

        </details>
        ");
    }

    #[rstest]
    #[case::at_limit(10, false)]
    #[case::over_limit(11, true)]
    #[case::far_over_limit(25, true)]
    fn file_list_is_capped(#[case] count: usize, #[case] truncated: bool) {
        let context = ResultContext::default().with_files(files(count));

        let content = render("Hello", &context);

        assert_eq!(content.matches("\n* /src/").count(), count.min(10));
        assert_eq!(content.contains("* And more..."), truncated);
        assert!(!content.contains("/src/file11.rs"));
    }

    #[test]
    fn commit_entries_are_shortened() {
        let long_message = "x".repeat(80);
        let context = ResultContext::default().with_commits(vec![MatchedCommit {
            hash: "0123456789abcdef".to_owned(),
            message: long_message,
        }]);

        let content = render("Hello", &context);

        let expected = format!("* `0123456 {}\u{2026}`", "x".repeat(72));
        assert!(content.contains(&expected), "unexpected content: {content}");
        assert!(content.contains("<summary><i>Commits not matching the commit expression</i>"));
    }

    #[test]
    fn commit_list_is_capped() {
        let context = ResultContext::default().with_commits(commits(12));

        let content = render("Hello", &context);

        assert_eq!(content.matches("\n* `").count(), 10);
        assert!(content.ends_with("* And more...\n\n</details>"));
    }

    #[test]
    fn files_section_precedes_commits_section() {
        let context = ResultContext::default()
            .with_files(files(2))
            .with_commits(commits(1));

        let content = render("Hello", &context);

        let files_at = content.find("Changed files").unwrap_or(usize::MAX);
        let commits_at = content.find("Commits not matching").unwrap_or(0);
        assert!(files_at < commits_at);
    }

    #[test]
    fn empty_commit_list_renders_nothing() {
        let context = ResultContext::default().with_commits(Vec::new());

        assert_eq!(render("Hello", &context), "Hello");
    }

    #[rstest]
    #[case::short("fix typo", 72, "fix typo")]
    #[case::exact("abc", 3, "abc")]
    #[case::long("abcdef", 3, "abc\u{2026}")]
    #[case::multibyte("héllo wörld", 5, "héllo\u{2026}")]
    fn ellipsis_counts_characters(
        #[case] text: &str,
        #[case] max_chars: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(ellipsis(text, max_chars), expected);
    }
}
