use blog_client::{
    blog_api_test::{MockBlogApi, MockCall, MockResult},
    ApiError, Article, ArticleQuery, BlogApi, NewTag, Tag,
};
use chrono::{TimeZone, Utc};

fn tag(id: u64, name: &str) -> Tag {
    Tag {
        id,
        name: name.to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
    }
}

fn article(id: u64, title: &str) -> Article {
    let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    Article {
        id,
        title: title.to_string(),
        content: format!("{title} content"),
        tags: vec![],
        comments: vec![],
        created_at,
        updated_at: created_at,
        is_published: true,
        is_recent: false,
        comments_count: None,
    }
}

#[tokio::test]
async fn mock_blog_api_tracks_calls_and_returns_results_in_order() {
    let api = MockBlogApi::new();
    api.enqueue(vec![article(1, "Rust Basics")])
        .enqueue(ApiError::NotFound)
        .enqueue(tag(3, "async"));

    let articles = api
        .list_articles(&ArticleQuery::default())
        .await
        .expect("first call succeeds");
    assert_eq!(articles, vec![article(1, "Rust Basics")]);

    let err = api.get_article(9).await.expect_err("second call errors");
    assert!(err.is_not_found());

    let created = api
        .create_tag(&NewTag {
            name: "async".to_string(),
        })
        .await
        .expect("third call succeeds");
    assert_eq!(created, tag(3, "async"));

    assert_eq!(
        api.tracked_calls(),
        vec![
            MockCall::ListArticles(ArticleQuery::default()),
            MockCall::GetArticle(9),
            MockCall::CreateTag(NewTag {
                name: "async".to_string()
            }),
        ]
    );

    api.reset();
    assert!(api.tracked_calls().is_empty());

    api.enqueue(MockResult::ok());
    api.restore();
    assert_eq!(api.pending_results(), 0);

    let err = api.list_tags().await.expect_err("queue is empty");
    match err {
        ApiError::Invariant(message) => assert_eq!(message, "no mocked results available"),
        other => panic!("unexpected error variant: {other:?}"),
    }
}

#[tokio::test]
async fn mock_blog_api_rejects_results_of_the_wrong_shape() {
    let api = MockBlogApi::new();
    api.enqueue(tag(1, "rust"));

    let err = api
        .get_article(1)
        .await
        .expect_err("a tag is not an article");
    assert!(matches!(err, ApiError::Invariant(_)), "{err:?}");
}

#[tokio::test]
async fn deferred_results_resolve_when_responded() {
    let api = MockBlogApi::new();
    let (deferred, responder) = MockResult::deferred();
    api.enqueue(deferred).enqueue(MockResult::ok());

    let (first, second) = tokio::join!(api.list_tags(), async {
        let deleted = api.delete_article(4).await;
        responder.respond(vec![tag(1, "rust")]);
        deleted
    });

    assert_eq!(first.expect("deferred resolves"), vec![tag(1, "rust")]);
    second.expect("delete succeeds");
}
