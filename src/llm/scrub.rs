use crate::error::LlmError;
use std::borrow::Cow;

const MAX_API_ERROR_CHARS: usize = 200;

/// Token prefixes whose following characters are treated as a secret.
const SECRET_PREFIXES: [&str; 8] = [
    "sk-",
    "sk_",
    "Bearer ",
    "api_key=",
    "api-key=",
    "\"api_key\":\"",
    "\"access_token\":\"",
    "token=",
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+' | '/' | '=')
}

fn token_end(input: &str, from: usize) -> usize {
    input[from..]
        .char_indices()
        .find(|&(_, c)| !is_secret_char(c))
        .map_or(input.len(), |(i, _)| from + i)
}

fn redact_after(scrubbed: &mut String, marker: &str) {
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let start = search_from + rel;
        let value_start = start + marker.len();
        let end = token_end(scrubbed, value_start);

        // Bare marker with no value.
        if end == value_start {
            search_from = value_start;
            continue;
        }

        scrubbed.replace_range(value_start..end, "[REDACTED]");
        search_from = value_start + "[REDACTED]".len();
    }
}

/// Redact credential-looking tokens from text bound for logs or clients.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    if !SECRET_PREFIXES.iter().any(|prefix| input.contains(prefix)) {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for prefix in SECRET_PREFIXES {
        redact_after(&mut scrubbed, prefix);
    }
    Cow::Owned(scrubbed)
}

/// Sanitize API error text by scrubbing secrets and truncating length.
pub fn sanitize_api_error(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input);

    if scrubbed.chars().count() <= MAX_API_ERROR_CHARS {
        return scrubbed.into_owned();
    }

    let cut = scrubbed
        .char_indices()
        .nth(MAX_API_ERROR_CHARS)
        .map_or(scrubbed.len(), |(i, _)| i);
    format!("{}...", &scrubbed[..cut])
}

/// Build a sanitized provider error from a failed HTTP response.
pub async fn api_error(provider: &str, response: reqwest::Response) -> LlmError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read provider error body>".to_string());
    LlmError::Api {
        provider: provider.to_string(),
        status,
        message: sanitize_api_error(&body),
    }
}
