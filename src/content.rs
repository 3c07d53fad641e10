//! Post content on disk: locating markdown posts and reading them.
//!
//! Both the scheduler and the video pipeline read posts from the same
//! `posts/` directory; this module is the one place that knows its shape.

mod locate;
mod markdown;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

pub use locate::{find_markdown_by_stem, find_post_file};
pub use markdown::{extract_metadata, extract_post_copy, extract_title};

use crate::model::ScheduledPost;

/// Errors that can occur while reading post content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("post file not found: {0}")]
    NotFound(PathBuf),

    #[error("could not extract post content from: {0}")]
    NoPostCopy(PathBuf),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: io::Error,
    },
}

pub type Result<T> = core::result::Result<T, ContentError>;

/// Read a markdown file into its raw text.
pub fn read_markdown(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ContentError::NotFound(path.to_path_buf())
        } else {
            ContentError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Read a post file, requiring a fenced post-copy block.
///
/// Used where the copied text must be exact: publishing.
pub fn read_post_strict(path: &Path) -> Result<ScheduledPost> {
    let text = read_markdown(path)?;
    let body = extract_post_copy(&text).ok_or_else(|| ContentError::NoPostCopy(path.to_path_buf()))?;
    Ok(assemble(path, &text, body))
}

/// Read a post file, falling back to the whole file when no fence is present.
///
/// Used where any prose will do: prompt rendering and narration.
pub fn read_post_lenient(path: &Path) -> Result<ScheduledPost> {
    let text = read_markdown(path)?;
    let body = extract_post_copy(&text).unwrap_or_else(|| text.clone());
    Ok(assemble(path, &text, body))
}

/// Title for listings: first `# ` heading, else the file stem.
pub fn title_of(path: &Path) -> Result<String> {
    let text = read_markdown(path)?;
    Ok(extract_title(&text).unwrap_or_else(|| stem(path)))
}

fn assemble(path: &Path, text: &str, body: String) -> ScheduledPost {
    ScheduledPost {
        id: stem(path),
        path: path.to_path_buf(),
        title: extract_title(text).unwrap_or_else(|| stem(path)),
        metadata: extract_metadata(text),
        body,
    }
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
