use blog_client::{ArticleQuery, BlogApi, BlogClient, BlogClientOptions};
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = BlogClient::new(BlogClientOptions {
        base_url: std::env::var("API_BASE_URL").ok(),
        ..Default::default()
    })
    .unwrap();

    let query = ArticleQuery {
        search: std::env::args().nth(1),
        ordering: Some("-created_at".to_string()),
    };

    let articles = client.list_articles(&query).await.unwrap();
    for article in &articles {
        let tags: Vec<&str> = article.tags.iter().map(|tag| tag.name.as_str()).collect();
        println!("#{} {} [{}]", article.id, article.title, tags.join(", "));
    }

    let tags = client.list_tags().await.unwrap();
    println!("{} articles, {} tags", articles.len(), tags.len());
}
