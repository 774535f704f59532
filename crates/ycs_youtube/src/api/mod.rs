use serde::Deserialize;
use ycs_core::domain::{Comment, VideoId};
use ycs_core::error::AppError;

pub mod youtube_data;

/// One `commentThreads.list` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThreadsRequest {
    pub video_id: VideoId,
    pub max_results: u32,
    pub page_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadsPage {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl CommentThreadsPage {
    pub fn into_comments(self) -> Vec<Comment> {
        self.items.into_iter().map(CommentThread::into_comment).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThread {
    pub snippet: CommentThreadSnippet,
}

impl CommentThread {
    pub fn into_comment(self) -> Comment {
        let s = self.snippet.top_level_comment.snippet;
        Comment::new(s.author_display_name, s.text_display)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub top_level_comment: TopLevelComment,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopLevelComment {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    #[serde(default)]
    pub author_display_name: String,
    #[serde(default)]
    pub text_display: String,
}

/// Paginated comment-listing API. Implemented over HTTP by [`youtube_data::YoutubeDataApi`].
pub trait CommentThreadsApi {
    fn list_comment_threads(
        &self,
        req: &CommentThreadsRequest,
    ) -> Result<CommentThreadsPage, AppError>;
}
