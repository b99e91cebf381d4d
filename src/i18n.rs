//! Locale selection for UI strings

/// Switch the UI language. Unknown locales fall back to English at lookup.
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

pub fn available_locales() -> Vec<&'static str> {
    rust_i18n::available_locales!()
}

/// Pick the startup locale: an explicit choice wins, then `LANG`-style
/// environment variables, else English.
pub fn init(explicit: Option<&str>) {
    let locale = explicit
        .map(str::to_string)
        .or_else(locale_from_env)
        .unwrap_or_else(|| "en".to_string());
    tracing::debug!("Using locale {}", locale);
    set_locale(&locale);
}

fn locale_from_env() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
        .and_then(|value| parse_env_locale(&value))
}

/// `de_DE.UTF-8` -> `de`; `C` and `POSIX` mean no preference
fn parse_env_locale(value: &str) -> Option<String> {
    let language = value.split(['_', '.', '@']).next()?.to_lowercase();
    match language.as_str() {
        "" | "c" | "posix" => None,
        _ => Some(language),
    }
}
