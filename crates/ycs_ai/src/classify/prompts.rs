/// Numbered comment block, one comment per entry, text inserted verbatim.
pub fn comment_block<S: AsRef<str>>(comments: &[S]) -> String {
    comments
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {}", i + 1, c.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn sentiment_prompt<S: AsRef<str>>(language_hint: &str, comments: &[S]) -> String {
    let comment_block = comment_block(comments);
    let count = comments.len();
    format!(
        r#"You are a sentiment classifier. Classify each of the following {language_hint} YouTube comments as either:

- Good (positive/neutral)
- Bad (negative/abusive/offensive/harsh)

Respond with a numbered list of labels ("Good" or "Bad") corresponding to each comment in order.
There are {count} comments; return exactly {count} lines.

Comments:
{comment_block}

Return format:
1. Good
2. Bad
3. Good
... and so on.
"#
    )
}
