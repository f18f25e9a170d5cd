//! Azure Pipelines logging-command output.

use std::io::{self, Write};

use super::TaskResult;

/// Writes the `task.complete` logging command for `result`.
///
/// # Errors
///
/// Returns any error raised by `writer`.
pub fn report(result: &TaskResult, writer: &mut impl Write) -> io::Result<()> {
    let outcome = if result.succeeded {
        "Succeeded"
    } else {
        "Failed"
    };
    writeln!(
        writer,
        "##vso[task.complete result={outcome};]{}",
        escape_message(&result.message)
    )
}

/// Escapes text so that it stays on a single logging-command line.
#[must_use]
pub fn escape_message(message: &str) -> String {
    message
        .replace('%', "%AZP25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{escape_message, report};
    use crate::task::TaskResult;

    #[rstest]
    #[case::plain("All good", "All good")]
    #[case::percent("100% done", "100%AZP25 done")]
    #[case::newlines("line one\r\nline two", "line one%0D%0Aline two")]
    #[case::escape_sequence_is_not_reinterpreted("%0A", "%AZP250A")]
    fn escapes_reserved_characters(#[case] message: &str, #[case] expected: &str) {
        assert_eq!(escape_message(message), expected);
    }

    #[rstest]
    #[case::succeeded(
        TaskResult::success("One or more conditions were not met"),
        "##vso[task.complete result=Succeeded;]One or more conditions were not met\n"
    )]
    #[case::failed(
        TaskResult::failure("No valid authentication type found"),
        "##vso[task.complete result=Failed;]No valid authentication type found\n"
    )]
    fn writes_completion_command(#[case] result: TaskResult, #[case] expected: &str) {
        let mut output = Vec::new();

        report(&result, &mut output).expect("writing to a buffer should succeed");

        assert_eq!(String::from_utf8_lossy(&output), expected);
    }
}
