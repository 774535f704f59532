pub mod api;
pub mod fetch;

#[cfg(test)]
mod tests {
    use super::api::youtube_data::YoutubeDataApi;
    use super::api::CommentThreadsPage;

    #[test]
    fn requires_https_or_loopback_base_url() {
        assert!(YoutubeDataApi::new("https://www.googleapis.com/youtube/v3", "k").is_ok());
        assert!(YoutubeDataApi::new("https://www.googleapis.com/youtube/v3/", "k").is_ok());
        assert!(YoutubeDataApi::new("http://127.0.0.1:8080", "k").is_ok());

        assert!(YoutubeDataApi::new("http://www.googleapis.com/youtube/v3", "k").is_err());
        assert!(YoutubeDataApi::new("http://127.0.0.1.evil.com:8080", "k").is_err());
        assert!(YoutubeDataApi::new("ftp://example.com", "k").is_err());
        assert!(YoutubeDataApi::new("https://", "k").is_err());
        assert!(YoutubeDataApi::new("https://user@evil.com/youtube/v3", "k").is_err());
    }

    #[test]
    fn requires_non_empty_api_key() {
        let err = YoutubeDataApi::new("https://www.googleapis.com/youtube/v3", "  ")
            .expect_err("empty key");
        assert_eq!(err.code, "CONFIG_MISSING_KEY");
    }

    #[test]
    fn decodes_comment_thread_page() {
        let json = r#"{
          "kind": "youtube#commentThreadListResponse",
          "nextPageToken": "QURTSl9p",
          "items": [
            {"snippet": {"topLevelComment": {"snippet": {
              "authorDisplayName": "@ravi",
              "textDisplay": "Super <b>movie</b> 🔥",
              "likeCount": 3
            }}}}
          ]
        }"#;
        let page: CommentThreadsPage = serde_json::from_str(json).expect("decode");
        assert_eq!(page.next_page_token.as_deref(), Some("QURTSl9p"));
        let comments = page.into_comments();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].author, "@ravi");
        assert_eq!(comments[0].text, "Super <b>movie</b> 🔥");
    }

    #[test]
    fn decodes_last_page_without_token_or_items() {
        let page: CommentThreadsPage = serde_json::from_str("{}").expect("decode");
        assert!(page.next_page_token.is_none());
        assert!(page.items.is_empty());
    }
}
