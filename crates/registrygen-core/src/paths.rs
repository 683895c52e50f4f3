//! Path string helpers
//!
//! All paths handled by the engine are forward-slash strings. Identity of a
//! file is its root-relative form: the path cut at the first `/src` segment
//! and prefixed with `.`, e.g. `/work/app/src/ui/button.tsx` becomes
//! `./src/ui/button.tsx`.

const SRC_MARKER: &str = "/src";

/// Truncate a path to start at the source root marker
///
/// Paths without the marker are returned unchanged. Already truncated paths
/// are left as they are.
pub fn to_root_relative(full_path: &str) -> String {
    match full_path.find(SRC_MARKER) {
        Some(index) => format!(".{}", &full_path[index..]),
        None => full_path.to_string(),
    }
}

/// Resolve a `./` or `../` reference against the directory of `current_file`
///
/// Each leading `../` walks one directory up. Any other specifier is returned
/// unchanged.
pub fn resolve_relative(specifier: &str, current_file: &str) -> String {
    let current_dir = match current_file.rfind('/') {
        Some(index) => &current_file[..index],
        None => "",
    };

    if let Some(rest) = specifier.strip_prefix("./") {
        return format!("{}/{}", current_dir, rest);
    }

    if specifier.starts_with("../") {
        let mut rest = specifier;
        let mut levels = 0;
        while let Some(stripped) = rest.strip_prefix("../") {
            rest = stripped;
            levels += 1;
        }

        let segments: Vec<&str> = current_dir.split('/').collect();
        let keep = segments.len().saturating_sub(levels);
        return format!("{}/{}", segments[..keep].join("/"), rest);
    }

    specifier.to_string()
}

/// Whether a specifier is written relative to the importing file
pub fn is_relative(specifier: &str) -> bool {
    specifier.starts_with("./") || specifier.starts_with("../")
}

/// Install target of a file entry: the first `.` becomes `~`
///
/// For root-relative paths this turns `./src/x.ts` into `~/src/x.ts`, the
/// project-root form consumers of the manifest expect.
pub fn install_target(path: &str) -> String {
    path.replacen('.', "~", 1)
}
