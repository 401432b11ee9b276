//! Module path helpers
//!
//! Generated loaders always receive forward-slash paths that start with `./`
//! or `../`, independent of the platform the build runs on.

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` components and fold `..` where possible.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Relative path from directory `base` to `path`, both normalized first.
pub fn diff_paths(path: &Path, base: &Path) -> PathBuf {
    let path = normalize(path);
    let base = normalize(base);

    let mut path_iter = path.components().peekable();
    let mut base_iter = base.components().peekable();

    while let (Some(a), Some(b)) = (path_iter.peek(), base_iter.peek()) {
        if a != b {
            break;
        }
        path_iter.next();
        base_iter.next();
    }

    let mut out = PathBuf::new();
    for _ in base_iter {
        out.push("..");
    }
    for component in path_iter {
        out.push(component.as_os_str());
    }
    out
}

/// Convert a path to a forward-slash string
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Relative module path from `from` to `to`, forward slashes, `./` prefixed
pub fn relative_module_path(from: &Path, to: &Path) -> String {
    let rel = to_slash(&diff_paths(to, from));
    if rel.is_empty() {
        "./".to_string()
    } else if rel == ".." || rel.starts_with("../") {
        rel
    } else {
        format!("./{}", rel)
    }
}

/// Human-readable label for a source file: relative to the project root,
/// with a leading `node_modules/` removed
pub fn module_label(project_root: &Path, source: &Path) -> String {
    let rel = to_slash(&diff_paths(source, project_root));
    rel.strip_prefix("node_modules/")
        .map(str::to_string)
        .unwrap_or(rel)
}

/// Whether `path` lies inside `root` (lexically)
pub fn is_within(path: &Path, root: &Path) -> bool {
    normalize(path).starts_with(normalize(root))
}
