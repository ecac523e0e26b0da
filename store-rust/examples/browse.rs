use blog_store::{AppConfig, ArticleFilter, ArticlesStore, ListView, TagsStore};
use dotenvy::dotenv;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Usage: `browse [search] [query-string]`, e.g. `browse rust "tag=web%20dev"`.
#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::from_env().unwrap();
    let api = Arc::new(config.client().unwrap());

    let articles = ArticlesStore::mount(api.clone()).await;
    let tags = TagsStore::mount(api).await;

    if let Some(error) = articles.error() {
        eprintln!("{error}");
        return;
    }

    let mut args = std::env::args().skip(1);
    let search = args.next().unwrap_or_default();
    let query = args.next().unwrap_or_default();
    let filter = ArticleFilter::from_query(search, &query);

    let all = articles.articles();
    let view = ListView::derive(&all, &filter);
    println!("{} ({})", config.app_name, config.environment);
    match view.empty_reason {
        Some(reason) => println!("{}", reason.message()),
        None => {
            for article in view.articles {
                println!("#{} {}", article.id, article.title);
            }
        }
    }

    let names: Vec<String> = tags.tags().into_iter().map(|tag| tag.name).collect();
    println!("Tags: {}", names.join(", "));
}
