//! Preview image lookup
//!
//! A snippet `foo.scss` may ship with `foo.png`, `foo.jpg`, ... next to it.
//! When several exist, the extension listed first wins regardless of the
//! order the directory returns them in.

use globset::GlobBuilder;
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::path::Path;

/// Image extensions in priority order
pub const DEFAULT_PREVIEW_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Brace-alternation glob matching `<base>.<ext>` for every extension
pub fn preview_glob(base: &str, extensions: &[String]) -> String {
    format!("{}.{{{}}}", globset::escape(base), extensions.join(","))
}

/// File name of the preview image for `snippet_path` inside `dir`
///
/// `snippet_path` must end in `.<suffix>`; anything else has no preview.
/// The chosen file must be readable.
pub fn find_preview(
    dir: &Path,
    snippet_path: &str,
    suffix: &str,
    extensions: &[String],
) -> Option<String> {
    if extensions.is_empty() {
        return None;
    }
    let base = snippet_path.strip_suffix(&format!(".{}", suffix))?;
    if base.is_empty() {
        return None;
    }

    let matcher = GlobBuilder::new(&preview_glob(base, extensions))
        .literal_separator(true)
        .build()
        .ok()?
        .compile_matcher();

    let present: BTreeSet<String> = fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| matcher.is_match(name))
        .collect();

    let name = extensions
        .iter()
        .map(|ext| format!("{}.{}", base, ext))
        .find(|candidate| present.contains(candidate))?;

    File::open(dir.join(&name)).ok().map(|_| name)
}
