//! Title extraction from problem URLs

/// Title used when the URL has no recognizable problem slug
pub const FALLBACK_TITLE: &str = "LeetCode Problem";

const PROBLEMS_PATH: &str = "leetcode.com/problems/";

/// Derive a title from a LeetCode problem URL.
///
/// `https://leetcode.com/problems/two-sum/` becomes `Two Sum`. Anything
/// without a `leetcode.com/problems/<slug>` segment gets [`FALLBACK_TITLE`].
pub fn title_from_url(url: &str) -> String {
    let Some(start) = url.find(PROBLEMS_PATH) else {
        return FALLBACK_TITLE.to_string();
    };

    let slug = url[start + PROBLEMS_PATH.len()..]
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();

    let words: Vec<String> = slug
        .split('-')
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect();

    if words.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        words.join(" ")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
