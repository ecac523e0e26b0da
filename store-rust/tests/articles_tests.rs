mod common;

use blog_client::{
    blog_api_test::{MockBlogApi, MockCall, MockResult},
    ApiError, ArticlePatch, ArticleQuery, NewArticle, TagInput,
};
use blog_store::{ArticlesStore, FetchOutcome, LoadStatus, StoreError};
use common::{article, ids};
use std::sync::Arc;

fn new_article(title: &str) -> NewArticle {
    NewArticle {
        title: title.to_string(),
        content: "Long enough content.".to_string(),
        tags: vec![TagInput::new("rust")],
    }
}

#[tokio::test]
async fn mount_fetches_once_and_becomes_ready() {
    let api = Arc::new(MockBlogApi::new());
    api.enqueue(vec![article(1, "Rust Basics"), article(2, "Go Intro")]);

    let store = ArticlesStore::mount(api.clone()).await;

    assert_eq!(
        api.tracked_calls(),
        vec![MockCall::ListArticles(ArticleQuery::default())]
    );
    assert_eq!(ids(&store.articles()), vec![1, 2]);
    assert!(!store.loading());
    assert_eq!(store.error(), None);
    assert_eq!(store.status(), LoadStatus::Ready);
}

#[tokio::test]
async fn new_store_is_idle_and_empty_until_fetched() {
    let api = Arc::new(MockBlogApi::new());
    let store = ArticlesStore::new(api.clone());

    assert_eq!(store.status(), LoadStatus::Idle);
    assert!(store.articles().is_empty());
    assert!(api.tracked_calls().is_empty());
}

#[tokio::test]
async fn first_fetch_starts_empty_and_loading() {
    let api = Arc::new(MockBlogApi::new());
    let (deferred, responder) = MockResult::deferred();
    api.enqueue(deferred);
    let store = ArticlesStore::new(api.clone());

    let (outcome, ()) = tokio::join!(store.fetch_articles(), async {
        assert!(store.loading());
        assert_eq!(store.status(), LoadStatus::Loading);
        assert!(store.articles().is_empty());
        responder.respond(vec![article(1, "Rust Basics")]);
    });

    assert_eq!(outcome, FetchOutcome::Applied);
    assert_eq!(ids(&store.articles()), vec![1]);
    assert!(!store.loading());
}

#[tokio::test]
async fn refetch_keeps_previous_articles_visible_while_loading() {
    let api = Arc::new(MockBlogApi::new());
    api.enqueue(vec![article(1, "Rust Basics")]);
    let store = ArticlesStore::mount(api.clone()).await;

    let (deferred, responder) = MockResult::deferred();
    api.enqueue(deferred);

    let (outcome, ()) = tokio::join!(store.fetch_articles(), async {
        assert!(store.loading());
        assert_eq!(ids(&store.articles()), vec![1]);
        responder.respond(vec![article(1, "Rust Basics"), article(3, "Async")]);
    });

    assert_eq!(outcome, FetchOutcome::Applied);
    assert_eq!(ids(&store.articles()), vec![1, 3]);
}

#[tokio::test]
async fn failed_fetch_preserves_data_and_records_error() {
    let api = Arc::new(MockBlogApi::new());
    api.enqueue(vec![article(1, "Rust Basics")])
        .enqueue(ApiError::ServerUnavailable);
    let store = ArticlesStore::mount(api.clone()).await;

    let outcome = store.fetch_articles().await;

    assert_eq!(outcome, FetchOutcome::Failed);
    assert_eq!(ids(&store.articles()), vec![1]);
    assert!(!store.loading());
    assert_eq!(store.status(), LoadStatus::Errored);
    assert_eq!(
        store.error().as_deref(),
        Some("Server error. Please try again later.")
    );

    api.enqueue(vec![article(2, "Go Intro")]);
    assert_eq!(store.fetch_articles().await, FetchOutcome::Applied);
    assert_eq!(store.error(), None);
    assert_eq!(ids(&store.articles()), vec![2]);
}

#[tokio::test]
async fn create_article_prepends_persisted_entity() {
    let api = Arc::new(MockBlogApi::new());
    api.enqueue(vec![article(1, "Rust Basics"), article(2, "Go Intro")])
        .enqueue(article(42, "Borrowing"));
    let store = ArticlesStore::mount(api.clone()).await;

    let created = store
        .create_article(&new_article("Borrowing"))
        .await
        .expect("create succeeds");

    assert_eq!(created.id, 42);
    assert_eq!(store.articles()[0].id, 42);
    assert_eq!(ids(&store.articles()), vec![42, 1, 2]);
    assert_eq!(
        api.tracked_calls().last(),
        Some(&MockCall::CreateArticle(new_article("Borrowing")))
    );
}

#[tokio::test]
async fn failed_create_records_error_and_leaves_list_alone() {
    let api = Arc::new(MockBlogApi::new());
    api.enqueue(vec![article(1, "Rust Basics")])
        .enqueue(ApiError::BadRequest("Duplicate tag names are not allowed.".to_string()));
    let store = ArticlesStore::mount(api.clone()).await;

    let err = store
        .create_article(&new_article("Borrowing"))
        .await
        .expect_err("create fails");

    assert!(matches!(err, StoreError::Api(ApiError::BadRequest(_))), "{err:?}");
    assert_eq!(err.to_string(), "Duplicate tag names are not allowed.");
    assert_eq!(ids(&store.articles()), vec![1]);
    assert_eq!(
        store.error().as_deref(),
        Some("Duplicate tag names are not allowed.")
    );
}

#[tokio::test]
async fn update_article_replaces_in_place() {
    let api = Arc::new(MockBlogApi::new());
    api.enqueue(vec![
        article(1, "Rust Basics"),
        article(2, "Go Intro"),
        article(3, "Async"),
    ])
    .enqueue(article(2, "Go In Depth"));
    let store = ArticlesStore::mount(api.clone()).await;

    let patch = ArticlePatch {
        title: Some("Go In Depth".to_string()),
        ..Default::default()
    };
    let updated = store
        .update_article(2, &patch)
        .await
        .expect("update succeeds");

    assert_eq!(updated.title, "Go In Depth");
    let articles = store.articles();
    assert_eq!(ids(&articles), vec![1, 2, 3]);
    assert_eq!(articles[1].title, "Go In Depth");
    assert_eq!(
        api.tracked_calls().last(),
        Some(&MockCall::UpdateArticle(2, patch))
    );
}

#[tokio::test]
async fn failed_update_records_error() {
    let api = Arc::new(MockBlogApi::new());
    api.enqueue(vec![article(1, "Rust Basics")])
        .enqueue(ApiError::NotFound);
    let store = ArticlesStore::mount(api.clone()).await;

    let err = store
        .update_article(9, &ArticlePatch::default())
        .await
        .expect_err("update fails");

    assert!(err.is_not_found());
    assert_eq!(store.error().as_deref(), Some("Resource not found"));
    assert_eq!(store.articles()[0].title, "Rust Basics");
}

#[tokio::test]
async fn delete_article_removes_entity() {
    let api = Arc::new(MockBlogApi::new());
    api.enqueue(vec![article(5, "Five"), article(7, "Seven"), article(9, "Nine")])
        .enqueue(MockResult::ok());
    let store = ArticlesStore::mount(api.clone()).await;

    store.delete_article(7).await.expect("delete succeeds");

    assert!(store.articles().iter().all(|a| a.id != 7));
    assert_eq!(ids(&store.articles()), vec![5, 9]);
}

#[tokio::test]
async fn failed_delete_leaves_list_unchanged_and_records_error() {
    let api = Arc::new(MockBlogApi::new());
    api.enqueue(vec![article(5, "Five"), article(7, "Seven")])
        .enqueue(ApiError::ServerUnavailable);
    let store = ArticlesStore::mount(api.clone()).await;
    let before = store.articles();

    let err = store.delete_article(7).await.expect_err("delete fails");

    assert!(matches!(err, StoreError::Api(ApiError::ServerUnavailable)));
    assert_eq!(store.articles(), before);
    assert!(store.error().is_some());
}

#[tokio::test]
async fn mutation_clears_previous_error() {
    let api = Arc::new(MockBlogApi::new());
    api.enqueue(ApiError::ServerUnavailable)
        .enqueue(article(42, "Borrowing"));
    let store = ArticlesStore::mount(api.clone()).await;
    assert!(store.error().is_some());

    store
        .create_article(&new_article("Borrowing"))
        .await
        .expect("create succeeds");

    assert_eq!(store.error(), None);
    assert_eq!(ids(&store.articles()), vec![42]);
}

#[tokio::test]
async fn only_the_latest_fetch_is_applied() {
    let api = Arc::new(MockBlogApi::new());
    let (stale, stale_responder) = MockResult::deferred();
    api.enqueue(stale).enqueue(vec![article(2, "Fresh")]);
    let store = ArticlesStore::new(api.clone());

    let (first, second) = tokio::join!(store.fetch_articles(), async {
        let outcome = store.fetch_articles().await;
        stale_responder.respond(vec![article(1, "Stale")]);
        outcome
    });

    assert_eq!(second, FetchOutcome::Applied);
    assert_eq!(first, FetchOutcome::Superseded);
    assert_eq!(ids(&store.articles()), vec![2]);
    assert!(!store.loading());
}

#[tokio::test]
async fn disposed_store_ignores_in_flight_results() {
    let api = Arc::new(MockBlogApi::new());
    api.enqueue(vec![article(1, "Rust Basics")]);
    let store = ArticlesStore::mount(api.clone()).await;

    let (deferred, responder) = MockResult::deferred();
    api.enqueue(deferred);

    let (outcome, ()) = tokio::join!(store.fetch_articles(), async {
        store.dispose();
        responder.respond(vec![article(2, "Late")]);
    });

    assert_eq!(outcome, FetchOutcome::Discarded);
    assert_eq!(ids(&store.articles()), vec![1]);
    assert_eq!(store.fetch_articles().await, FetchOutcome::Discarded);
}

#[tokio::test]
async fn subscribers_observe_new_snapshots() {
    let api = Arc::new(MockBlogApi::new());
    api.enqueue(vec![article(1, "Rust Basics")]);
    let store = ArticlesStore::new(api.clone());
    let mut receiver = store.subscribe();

    store.fetch_articles().await;

    assert!(receiver.has_changed().expect("store alive"));
    let snapshot = receiver.borrow_and_update().clone();
    assert_eq!(snapshot.status, LoadStatus::Ready);
    assert_eq!(ids(&snapshot.items), vec![1]);
}

#[tokio::test]
async fn query_is_forwarded_to_the_backend() {
    let api = Arc::new(MockBlogApi::new());
    api.enqueue(vec![article(1, "Rust Basics")]);
    let query = ArticleQuery {
        search: Some("rust".to_string()),
        ordering: Some("-created_at".to_string()),
    };

    let store = ArticlesStore::new(api.clone()).with_query(query.clone());
    store.fetch_articles().await;

    assert_eq!(api.tracked_calls(), vec![MockCall::ListArticles(query)]);
}
