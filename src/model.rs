//! Core data model for Handraiser.
//!
//! Posts are authored by hand as markdown; everything here is a read-only view
//! of them, or a description of what the video pipeline produces from them.

mod post;
mod schedule;
mod video;

pub use post::{PostContent, PostMetadata, ScheduledPost, truncate_chars};
pub use schedule::Schedule;
pub use video::{
    GenerationReport, NarrationMode, VideoArtifact, VideoRequest, VideoStyle, VoiceScript,
};
