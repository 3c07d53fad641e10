//! Finding post files under the posts directory.
//!
//! Posts are grouped into arbitrary subfolders (by vertical, by week, ...),
//! so lookups walk the whole tree. The walk respects `.gitignore` and is
//! sorted by file name so the first match is stable.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

/// Find the post whose file stem equals `post_id`, ignoring ASCII case.
pub fn find_post_file(posts_dir: &Path, post_id: &str) -> Option<PathBuf> {
    markdown_files(posts_dir).find(|path| stem_of(path).eq_ignore_ascii_case(post_id))
}

/// Find the first post whose file stem contains `needle`, ignoring case.
pub fn find_markdown_by_stem(posts_dir: &Path, needle: &str) -> Option<PathBuf> {
    let needle = needle.to_uppercase();
    markdown_files(posts_dir).find(|path| stem_of(path).to_uppercase().contains(&needle))
}

fn markdown_files(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkBuilder::new(root)
        .sort_by_file_name(std::cmp::Ord::cmp)
        .build()
        .flatten()
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(ignore::DirEntry::into_path)
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
