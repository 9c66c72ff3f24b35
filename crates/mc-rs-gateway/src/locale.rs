//! Player-facing text lookup.
//!
//! Full language packs are supplied by the host; the gateway only needs a
//! [`Locale`] to resolve its own keys. Keys the client resolves itself are
//! written with a leading `%` and passed through untouched.

use std::collections::HashMap;

/// Resolves a translation key for a player's locale.
pub trait Locale: Send + Sync {
    /// Translate `key`, substituting `{0}`, `{1}`, ... with `args`.
    /// Unknown keys come back unchanged.
    fn translate(&self, key: &str, locale: &str, args: &[&str]) -> String;
}

/// English strings for every key the gateway emits.
pub struct BuiltinLocale {
    strings: HashMap<&'static str, &'static str>,
}

const EN_US: &[(&str, &str)] = &[
    ("gateway.auth.login.form.notice.title", "Java Edition sign-in required"),
    (
        "gateway.auth.login.form.notice.desc",
        "This server requires a Java Edition account. Sign in with Microsoft to continue.",
    ),
    ("gateway.auth.login.form.notice.btn_login.microsoft", "Sign in with Microsoft"),
    ("gateway.auth.login.form.notice.btn_disconnect", "Disconnect"),
    ("gateway.auth.login.form.disconnect", "You left the sign-in screen."),
    ("gateway.auth.login.form.expired", "Sign-in expired"),
    (
        "gateway.auth.login.save_token.warning",
        "The gateway can remember your Java Edition sign-in so you don't have to enter a code next time.",
    ),
    (
        "gateway.auth.login.save_token.expired",
        "Your saved Java Edition sign-in has expired.",
    ),
    (
        "gateway.auth.login.save_token.proceed",
        "Press OK to sign in again.",
    ),
    (
        "gateway.auth.login.timeout",
        "You have {0} seconds to finish signing in.",
    ),
    ("gateway.auth.login.unavailable", "Java Edition sign-in is not available on this gateway."),
    ("gateway.auth.login.failed", "Java Edition sign-in failed: {0}"),
    ("gateway.auth.login.timed_out", "Sign-in took too long."),
    (
        "gateway.network.encryption.line_1",
        "A client failed the encryption handshake. Your runtime may not support P-384 keys.",
    ),
    (
        "gateway.network.encryption.line_2",
        "Further handshake failures will not be reported.",
    ),
    ("gateway.network.backend_closed", "The backend server closed the connection: {0}"),
];

impl BuiltinLocale {
    pub fn new() -> Self {
        Self {
            strings: EN_US.iter().copied().collect(),
        }
    }
}

impl Default for BuiltinLocale {
    fn default() -> Self {
        Self::new()
    }
}

impl Locale for BuiltinLocale {
    fn translate(&self, key: &str, _locale: &str, args: &[&str]) -> String {
        match self.strings.get(key) {
            Some(template) => substitute(template, args),
            None => key.to_string(),
        }
    }
}

fn substitute(template: &str, args: &[&str]) -> String {
    let mut out = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{i}}}"), arg);
    }
    out
}

/// Translate multi-line form text one line at a time.
///
/// Lines starting with `%` are client-side keys and stay as they are. Every
/// line, including the last, ends with `\n`; lines of one character or
/// fewer are emptied.
pub fn translate_lines(locale: &dyn Locale, text: &str, language: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut out = String::with_capacity(text.len());
    for line in text.split('\n') {
        if line.chars().count() > 1 {
            if line.starts_with('%') {
                out.push_str(line);
            } else {
                out.push_str(&locale.translate(line, language, &[]));
            }
        }
        out.push('\n');
    }
    // `split` yields a trailing empty piece for text ending in '\n'.
    if text.ends_with('\n') {
        out.pop();
    }
    out
}
