use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Characters stripped from client-supplied filenames before storage:
    /// whitespace, path separators and anything outside a conservative
    /// filename alphabet.
    /// - "mi foto.png" becomes "mifoto.png"
    /// - "../etc/passwd" becomes "..etcpasswd"
    static ref FILENAME_FORBIDDEN: Regex = Regex::new(r"[^A-Za-z0-9._-]+").unwrap();
}

/// Reduce an uploaded filename to a safe form for on-disk storage.
///
/// The result contains no whitespace and no path separators; callers still
/// prefix it with a random token so sanitized collisions cannot clash.
pub fn sanitize_filename(original: &str) -> String {
    FILENAME_FORBIDDEN.replace_all(original, "").into_owned()
}

/// Whether a stored-file name may be resolved against the upload root.
///
/// Rejects empty names, path separators and parent-directory references so a
/// request can never address a file outside the upload directory.
pub fn is_safe_filename(name: &str) -> bool {
    !name.is_empty() && !name.contains('/') && !name.contains('\\') && !name.contains("..")
}
