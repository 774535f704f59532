use std::path::Path;

use tracing::{info, warn};
use ycs_core::domain::{Comment, Dataset, VideoId};
use ycs_core::error::AppError;
use ycs_core::store::save_comments;

use crate::api::{CommentThreadsApi, CommentThreadsRequest};

/// Largest page the comment-listing API serves.
pub const PAGE_SIZE: u32 = 100;

/// Page through top-level comments until `max_comments` are collected or the API runs out.
///
/// Input is validated before any request is made. Any failure mid-pagination is returned
/// as-is rather than truncating the result.
pub fn fetch_comments(
    api: &dyn CommentThreadsApi,
    video_url_or_id: &str,
    max_comments: usize,
) -> Result<Dataset, AppError> {
    let video_id = VideoId::parse(video_url_or_id)?;
    let mut comments: Vec<Comment> = Vec::with_capacity(max_comments.min(10_000));
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;

    while comments.len() < max_comments {
        let remaining = max_comments - comments.len();
        let req = CommentThreadsRequest {
            video_id: video_id.clone(),
            max_results: u32::try_from(remaining).unwrap_or(PAGE_SIZE).min(PAGE_SIZE),
            page_token: page_token.clone(),
        };
        let page = api.list_comment_threads(&req)?;
        pages += 1;

        let next = page.next_page_token.clone().filter(|t| !t.is_empty());
        let mut batch = page.into_comments();
        batch.truncate(remaining);
        info!(video_id = %video_id, page = pages, received = batch.len(), "fetched comment page");
        comments.extend(batch);

        match next {
            None => break,
            Some(token) if page_token.as_deref() == Some(token.as_str()) => {
                warn!(video_id = %video_id, "comment API repeated its page token; stopping");
                break;
            }
            Some(token) => page_token = Some(token),
        }
    }

    if comments.len() < max_comments {
        info!(
            video_id = %video_id,
            requested = max_comments,
            available = comments.len(),
            "video has fewer comments than requested"
        );
    }
    Ok(Dataset::new(Some(video_id), comments))
}

/// Fetch, then persist to `path` as `Author,Comment` CSV. The dataset is returned as well.
pub fn scrape_to_file(
    api: &dyn CommentThreadsApi,
    video_url_or_id: &str,
    max_comments: usize,
    path: &Path,
) -> Result<Dataset, AppError> {
    let dataset = fetch_comments(api, video_url_or_id, max_comments)?;
    save_comments(path, &dataset.comments)?;
    Ok(dataset)
}
