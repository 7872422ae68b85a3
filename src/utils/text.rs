//! Text cleanup helpers for descriptions and download-URL slugs.

use regex::Regex;
use std::sync::OnceLock;

fn html_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("invalid HTML tag regex"))
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("invalid whitespace regex"))
}

fn slug_strip_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Keep word characters, whitespace and hyphens; everything else goes.
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("invalid slug strip regex"))
}

fn slug_collapse_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s-]+").expect("invalid slug collapse regex"))
}

/// Strip HTML tags from a volume description, decode the common entities
/// and collapse runs of whitespace into single spaces.
pub fn clean_description(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let text = html_tag_re().replace_all(raw, "");
    let text = text
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    whitespace_re().replace_all(&text, " ").trim().to_string()
}

/// Fold common Latin diacritics to their ASCII base letter.
///
/// Catalog titles in this corpus are mostly Spanish, so the table covers
/// the Latin-1 and Latin Extended-A letters that actually occur there.
/// Characters without a mapping pass through unchanged.
pub fn fold_diacritics(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'ā' => 'a',
            'é' | 'è' | 'ê' | 'ë' | 'ē' => 'e',
            'í' | 'ì' | 'î' | 'ï' | 'ī' => 'i',
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ō' => 'o',
            'ú' | 'ù' | 'û' | 'ü' | 'ū' => 'u',
            'ñ' => 'n',
            'ç' => 'c',
            'ý' | 'ÿ' => 'y',
            'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' | 'Ā' => 'A',
            'É' | 'È' | 'Ê' | 'Ë' | 'Ē' => 'E',
            'Í' | 'Ì' | 'Î' | 'Ï' | 'Ī' => 'I',
            'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' | 'Ō' => 'O',
            'Ú' | 'Ù' | 'Û' | 'Ü' | 'Ū' => 'U',
            'Ñ' => 'N',
            'Ç' => 'C',
            other => other,
        })
        .collect()
}

/// Convert a volume title into the slug used by synthesized download URLs.
///
/// Lowercases, folds diacritics to ASCII, strips remaining
/// non-alphanumerics, collapses whitespace/hyphen runs into single
/// underscores, caps the result at 100 characters and trims stray
/// underscores at both ends.
pub fn title_slug(title: &str) -> String {
    if title.is_empty() {
        return String::new();
    }

    let slug = fold_diacritics(&title.to_lowercase());
    let slug = slug_strip_re().replace_all(&slug, "");
    let slug = slug_collapse_re().replace_all(&slug, "_");
    let slug: String = slug.chars().take(100).collect();

    slug.trim_matches('_').to_string()
}
