use blog_store::{AppConfig, ArticleDetail, DetailStatus};
use dotenvy::dotenv;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Usage: `comment <article-id> [text]`. Prints the article's comments and
/// posts `text` when given.
#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let id: u64 = args
        .next()
        .expect("article id is required")
        .parse()
        .expect("article id must be a number");

    let config = AppConfig::from_env().unwrap();
    let api = Arc::new(config.client().unwrap());
    let detail = ArticleDetail::mount(api, id)
        .await
        .with_comments_enabled(config.features.comments);

    if detail.status() != DetailStatus::Loaded {
        println!("{}", detail.status().message().unwrap_or_default());
        return;
    }

    if let Some(text) = args.next() {
        if let Err(error) = detail.submit_comment(&text).await {
            eprintln!("{error}");
        }
    }

    let state = detail.snapshot();
    if let Some(article) = &state.article {
        println!("{}", article.title);
    }
    for comment in state.comments() {
        println!("- {} ({})", comment.content(), comment.created_at());
    }
}
