/// Finds the file a wikilink target refers to among `paths`.
///
/// Matching is case-insensitive and ignores a `.md` extension on either side.
/// A bare target matches by file stem; a target with folders (`notes/today`)
/// must match the trailing path segments. `\` separators are treated as `/`.
/// Returns the first match in `paths` order.
pub fn resolve_wikilink<'a, P: AsRef<str>>(target: &str, paths: &'a [P]) -> Option<&'a P> {
    let wanted = normalize(target.trim());
    if wanted.is_empty() {
        return None;
    }

    paths.iter().find(|path| {
        let candidate = normalize(path.as_ref());
        candidate == wanted
            || candidate
                .strip_suffix(wanted.as_str())
                .is_some_and(|prefix| prefix.ends_with('/'))
    })
}

fn normalize(path: &str) -> String {
    let path = path
        .strip_suffix(".md")
        .or_else(|| path.strip_suffix(".MD"))
        .unwrap_or(path);
    path.replace('\\', "/").to_lowercase()
}
