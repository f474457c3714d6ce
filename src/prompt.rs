//! Option prompting with abbreviation support.
//!
//! The single validation rule of the dialogue: case-insensitive prefix
//! matching against an ordered option list, retrying until a match. The
//! retry loop has no attempt cap; the only exits are a valid answer or an
//! I/O failure on the underlying console.

use crate::console::Console;
use crate::error::Result;
use tracing::debug;

/// Ask the user to pick one of `options`, returning the canonical option.
///
/// Input is lowercased; when `strip_separators` is set, spaces, hyphens and
/// underscores are removed from both the input and a per-comparison copy of
/// each option. A non-empty normalized input matches an option when it is a
/// prefix of the normalized option; the first matching option in the
/// original order wins. Empty input never matches.
pub fn choose<S: AsRef<str>>(
    console: &mut dyn Console,
    options: &[S],
    strip_separators: bool,
) -> Result<String> {
    let question = format!("Would you like to see data for {}?", join_options(options));
    loop {
        console.write_line(&question);
        let input = normalize(&console.read_line()?, strip_separators);
        if input.is_empty() {
            console.write_line("Invalid input.\n");
            continue;
        }
        let matched = options
            .iter()
            .find(|option| normalize(option.as_ref(), strip_separators).starts_with(&input));
        match matched {
            Some(option) => {
                let option = option.as_ref().to_string();
                debug!(choice = %option, "input accepted");
                console.write_line(&format!("You chose {option}.\n"));
                return Ok(option);
            }
            None => console.write_line("Invalid input.\n"),
        }
    }
}

/// Join options as `"A, B, or C"` for the question line.
fn join_options<S: AsRef<str>>(options: &[S]) -> String {
    match options {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [head @ .., last] => format!(
            "{}, or {}",
            head.iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(", "),
            last.as_ref()
        ),
    }
}

fn normalize(text: &str, strip_separators: bool) -> String {
    let mut normalized = text.to_lowercase();
    if strip_separators {
        normalized.retain(|c| !matches!(c, ' ' | '-' | '_'));
    }
    normalized
}
