//! Localized read views: one language selected out of each bilingual pair,
//! dates rendered per locale. Pure projections of the domain entities.

use serde::Serialize;
use uuid::Uuid;

use domains::lang::format_date;
use domains::models::{Article, DailyTopic};
use domains::Lang;

#[derive(Debug, Serialize)]
pub struct ArticleSummary {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub author: String,
    pub main_image_url: Option<String>,
    pub read_time_minutes: i32,
    pub is_featured: bool,
    pub published: String,
}

impl ArticleSummary {
    pub fn project(article: &Article, lang: Lang) -> Self {
        Self {
            id: article.id,
            title: article.title.pick(lang).to_string(),
            excerpt: article.excerpt.pick(lang).to_string(),
            category: article.category.pick(lang).to_string(),
            author: article.author_name.pick(lang).to_string(),
            main_image_url: article.main_image_url.clone(),
            read_time_minutes: article.read_time_minutes,
            is_featured: article.is_featured,
            published: format_date(article.created_at.date_naive(), lang),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TopicView {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub read_time_minutes: i32,
    pub date: String,
}

impl TopicView {
    pub fn project(topic: &DailyTopic, lang: Lang) -> Self {
        Self {
            id: topic.id,
            title: topic.title.pick(lang).to_string(),
            content: topic.content.pick(lang).to_string(),
            image_url: topic.image_url.clone(),
            read_time_minutes: topic.read_time_minutes,
            date: format_date(topic.date, lang),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use domains::Bilingual;

    fn topic() -> DailyTopic {
        DailyTopic {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2026, 3, 8).unwrap(),
            title: Bilingual::new("Тема дня", "Topic of the day"),
            content: Bilingual::new("зміст", "content"),
            image_url: None,
            read_time_minutes: 2,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn projection_selects_one_language() {
        let t = topic();
        let uk = TopicView::project(&t, Lang::Uk);
        assert_eq!(uk.title, "Тема дня");
        assert_eq!(uk.date, "8 березня 2026");

        let en = TopicView::project(&t, Lang::En);
        assert_eq!(en.title, "Topic of the day");
        assert_eq!(en.date, "March 8, 2026");
    }

    #[test]
    fn projecting_twice_is_stable() {
        let t = topic();
        let first = TopicView::project(&t, Lang::En);
        let second = TopicView::project(&t, Lang::En);
        assert_eq!(first.title, second.title);
        assert_eq!(first.date, second.date);
    }
}
