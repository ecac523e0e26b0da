#![allow(dead_code)]

use blog_client::{Article, Comment, Tag};
use chrono::{DateTime, TimeZone, Utc};

pub fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
}

pub fn tag(id: u64, name: &str) -> Tag {
    Tag {
        id,
        name: name.to_string(),
        created_at: timestamp(),
    }
}

pub fn article(id: u64, title: &str) -> Article {
    Article {
        id,
        title: title.to_string(),
        content: format!("{title} explained in detail."),
        tags: vec![],
        comments: vec![],
        created_at: timestamp(),
        updated_at: timestamp(),
        is_published: true,
        is_recent: false,
        comments_count: None,
    }
}

pub fn comment(id: u64, article: u64, content: &str) -> Comment {
    Comment {
        id,
        article,
        content: content.to_string(),
        author_name: "Anonymous".to_string(),
        created_at: timestamp(),
        is_approved: true,
    }
}

pub fn ids(articles: &[Article]) -> Vec<u64> {
    articles.iter().map(|a| a.id).collect()
}
