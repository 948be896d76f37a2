// ==========================================
// Internationalization (i18n)
// ==========================================
// rust-i18n, Brazilian Portuguese (default) and English
// ==========================================
// Note: the rust_i18n::i18n! macro is invoked in lib.rs
// ==========================================

/// Current locale
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Sets the locale
///
/// # Parameters
/// - locale: "pt-BR" or "en"
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// Translates a message without arguments
///
/// # Example
/// ```no_run
/// use roteiro_pcp::i18n::t;
/// let msg = t("api.decode_error");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// Translates a message with `%{name}` arguments
///
/// # Example
/// ```no_run
/// use roteiro_pcp::i18n::t_with_args;
/// let msg = t_with_args("api.not_found", &[("id", "ab12cd34")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
