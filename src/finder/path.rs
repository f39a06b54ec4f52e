//! Path joining used while descending
//!
//! Child paths are built by appending the entry name to the parent path with
//! exactly one separator. The buffer grows as needed, so nothing is truncated.

use std::ffi::{OsStr, OsString};
use std::path::{is_separator, Path, PathBuf, MAIN_SEPARATOR_STR};

/// Join `base` and `name` with a single separator.
///
/// No separator is added when `base` is empty or already ends with one.
pub fn join(base: &Path, name: &OsStr) -> PathBuf {
    let base = base.as_os_str();
    let mut joined = OsString::with_capacity(base.len() + name.len() + 1);
    joined.push(base);
    if !base.is_empty() && !ends_with_separator(base) {
        joined.push(MAIN_SEPARATOR_STR);
    }
    joined.push(name);
    PathBuf::from(joined)
}

fn ends_with_separator(path: &OsStr) -> bool {
    path.as_encoded_bytes()
        .last()
        .is_some_and(|&b| b.is_ascii() && is_separator(b as char))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(base: &str, name: &str) -> PathBuf {
        join(Path::new(base), OsStr::new(name))
    }

    #[test]
    fn test_join_adds_one_separator() {
        let expected = format!("root{}a.txt", MAIN_SEPARATOR_STR);
        assert_eq!(joined("root", "a.txt"), PathBuf::from(expected));
    }

    #[test]
    fn test_join_keeps_trailing_separator() {
        assert_eq!(joined("root/", "a.txt"), PathBuf::from("root/a.txt"));
        assert_eq!(joined("/", "etc"), PathBuf::from("/etc"));
    }

    #[test]
    fn test_join_empty_base() {
        assert_eq!(joined("", "a.txt"), PathBuf::from("a.txt"));
    }

    #[test]
    fn test_join_long_path_is_not_truncated() {
        let base = "d/".repeat(3000);
        let path = joined(&base, "leaf.txt");
        assert_eq!(path.as_os_str().len(), base.len() + "leaf.txt".len());
        assert!(path.ends_with("leaf.txt"));
    }
}
