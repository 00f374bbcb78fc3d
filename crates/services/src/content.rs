//! # Content service
//!
//! Typed reads and admin-gated writes for every content collection:
//! articles, the daily topic, talents, the document archive, the team
//! roster, static pages and newsletter subscribers. Each collection is an
//! independent bilingual CRUD resource; there is nothing cross-cutting here
//! beyond the admin gate on writes.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use domains::models::*;
use domains::ports::*;
use domains::{DomainError, DomainResult, Page};

use crate::access::AccessGate;

#[derive(Clone)]
pub struct ContentService {
    articles: Arc<dyn ArticleRepo>,
    topics: Arc<dyn DailyTopicRepo>,
    talents: Arc<dyn TalentRepo>,
    archive: Arc<dyn ArchiveRepo>,
    team: Arc<dyn TeamRepo>,
    pages: Arc<dyn PageRepo>,
    subscribers: Arc<dyn SubscriberRepo>,
    gate: AccessGate,
}

impl ContentService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        articles: Arc<dyn ArticleRepo>,
        topics: Arc<dyn DailyTopicRepo>,
        talents: Arc<dyn TalentRepo>,
        archive: Arc<dyn ArchiveRepo>,
        team: Arc<dyn TeamRepo>,
        pages: Arc<dyn PageRepo>,
        subscribers: Arc<dyn SubscriberRepo>,
        gate: AccessGate,
    ) -> Self {
        Self {
            articles,
            topics,
            talents,
            archive,
            team,
            pages,
            subscribers,
            gate,
        }
    }

    // ── Articles ────────────────────────────────────────────────────────

    pub async fn article(&self, id: Uuid) -> DomainResult<Article> {
        self.articles.get(id).await
    }

    pub async fn articles(&self, page: u32) -> DomainResult<Page<Article>> {
        self.articles.list(page).await
    }

    pub async fn featured_articles(&self) -> DomainResult<Vec<Article>> {
        self.articles.featured(FEATURED_LIMIT).await
    }

    /// Up to three articles from the same category, the given one excluded.
    pub async fn related_articles(&self, article: &Article) -> DomainResult<Vec<Article>> {
        self.articles.related(&article.category.uk, article.id).await
    }

    pub async fn create_article(
        &self,
        who: Option<&UserIdentity>,
        new: NewArticle,
    ) -> DomainResult<Article> {
        self.gate.require_admin(who)?;
        if new.title.is_empty() || new.content.is_empty() {
            return Err(DomainError::Validation("title and content are required".into()));
        }
        self.articles.create(new).await
    }

    pub async fn update_article(
        &self,
        who: Option<&UserIdentity>,
        id: Uuid,
        patch: ArticlePatch,
    ) -> DomainResult<Article> {
        self.gate.require_admin(who)?;
        self.articles.update(id, patch).await
    }

    pub async fn delete_article(&self, who: Option<&UserIdentity>, id: Uuid) -> DomainResult<()> {
        self.gate.require_admin(who)?;
        self.articles.delete(id).await
    }

    // ── Daily topic ─────────────────────────────────────────────────────

    /// Today's topic: the most recent entry with `date <= today`.
    pub async fn topic_of_the_day(&self) -> DomainResult<Option<DailyTopic>> {
        self.topics.current(Utc::now().date_naive()).await
    }

    pub async fn topic_for(&self, date: NaiveDate) -> DomainResult<DailyTopic> {
        self.topics.by_date(date).await
    }

    pub async fn topics(&self, page: u32) -> DomainResult<Page<DailyTopic>> {
        self.topics.list(page).await
    }

    /// One topic per date: saving for an existing date overwrites it.
    pub async fn save_topic(
        &self,
        who: Option<&UserIdentity>,
        new: NewDailyTopic,
    ) -> DomainResult<DailyTopic> {
        self.gate.require_admin(who)?;
        if new.title.is_empty() {
            return Err(DomainError::Validation("title is required".into()));
        }
        self.topics.upsert(new).await
    }

    pub async fn delete_topic(&self, who: Option<&UserIdentity>, id: Uuid) -> DomainResult<()> {
        self.gate.require_admin(who)?;
        self.topics.delete(id).await
    }

    // ── Talents ─────────────────────────────────────────────────────────

    pub async fn talent_categories(&self) -> DomainResult<Vec<TalentCategory>> {
        self.talents.categories().await
    }

    pub async fn talents(
        &self,
        category_id: Option<Uuid>,
        page: u32,
    ) -> DomainResult<Page<Talent>> {
        self.talents.list(category_id, page).await
    }

    pub async fn talent(&self, id: Uuid) -> DomainResult<Talent> {
        self.talents.get(id).await
    }

    pub async fn create_talent(
        &self,
        who: Option<&UserIdentity>,
        new: NewTalent,
    ) -> DomainResult<Talent> {
        self.gate.require_admin(who)?;
        if new.name.is_empty() {
            return Err(DomainError::Validation("name is required".into()));
        }
        self.talents.create(new).await
    }

    pub async fn update_talent(
        &self,
        who: Option<&UserIdentity>,
        id: Uuid,
        new: NewTalent,
    ) -> DomainResult<Talent> {
        self.gate.require_admin(who)?;
        self.talents.update(id, new).await
    }

    pub async fn delete_talent(&self, who: Option<&UserIdentity>, id: Uuid) -> DomainResult<()> {
        self.gate.require_admin(who)?;
        self.talents.delete(id).await
    }

    // ── Archive ─────────────────────────────────────────────────────────

    pub async fn archive_categories(&self) -> DomainResult<Vec<ArchiveCategory>> {
        self.archive.categories().await
    }

    pub async fn archive_documents(
        &self,
        category_id: Option<Uuid>,
        page: u32,
    ) -> DomainResult<Page<ArchiveDocument>> {
        self.archive.documents(category_id, page).await
    }

    pub async fn archive_document(&self, id: Uuid) -> DomainResult<ArchiveDocument> {
        self.archive.get(id).await
    }

    pub async fn create_document(
        &self,
        who: Option<&UserIdentity>,
        new: NewArchiveDocument,
    ) -> DomainResult<ArchiveDocument> {
        self.gate.require_admin(who)?;
        if new.file_url.trim().is_empty() {
            return Err(DomainError::Validation("file_url is required".into()));
        }
        self.archive.create(new).await
    }

    pub async fn update_document(
        &self,
        who: Option<&UserIdentity>,
        id: Uuid,
        new: NewArchiveDocument,
    ) -> DomainResult<ArchiveDocument> {
        self.gate.require_admin(who)?;
        self.archive.update(id, new).await
    }

    pub async fn delete_document(&self, who: Option<&UserIdentity>, id: Uuid) -> DomainResult<()> {
        self.gate.require_admin(who)?;
        self.archive.delete(id).await
    }

    // ── Team & pages ────────────────────────────────────────────────────

    pub async fn team(&self) -> DomainResult<Vec<TeamMember>> {
        self.team.list().await
    }

    pub async fn save_team_member(
        &self,
        who: Option<&UserIdentity>,
        id: Option<Uuid>,
        new: NewTeamMember,
    ) -> DomainResult<TeamMember> {
        self.gate.require_admin(who)?;
        match id {
            Some(id) => self.team.update(id, new).await,
            None => self.team.create(new).await,
        }
    }

    pub async fn delete_team_member(
        &self,
        who: Option<&UserIdentity>,
        id: Uuid,
    ) -> DomainResult<()> {
        self.gate.require_admin(who)?;
        self.team.delete(id).await
    }

    pub async fn page(&self, slug: &str) -> DomainResult<StaticPage> {
        self.pages.by_slug(slug).await
    }

    pub async fn save_page(
        &self,
        who: Option<&UserIdentity>,
        slug: &str,
        content_uk: serde_json::Value,
        content_en: serde_json::Value,
    ) -> DomainResult<StaticPage> {
        self.gate.require_admin(who)?;
        self.pages.upsert(slug, content_uk, content_en).await
    }

    // ── Newsletter roll ─────────────────────────────────────────────────

    pub async fn subscribe(&self, email: &str) -> DomainResult<NewsletterSubscriber> {
        let email = email.trim().to_ascii_lowercase();
        if !email.contains('@') || email.len() < 3 {
            return Err(DomainError::Validation("invalid email address".into()));
        }
        self.subscribers.subscribe(&email).await
    }

    pub async fn unsubscribe(&self, email: &str) -> DomainResult<()> {
        self.subscribers.unsubscribe(email.trim()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::Bilingual;

    fn gate_without_bans() -> AccessGate {
        AccessGate::new(Arc::new(MockBanRepo::new()))
    }

    fn service(articles: MockArticleRepo) -> ContentService {
        ContentService::new(
            Arc::new(articles),
            Arc::new(MockDailyTopicRepo::new()),
            Arc::new(MockTalentRepo::new()),
            Arc::new(MockArchiveRepo::new()),
            Arc::new(MockTeamRepo::new()),
            Arc::new(MockPageRepo::new()),
            Arc::new(MockSubscriberRepo::new()),
            gate_without_bans(),
        )
    }

    fn article(id: Uuid) -> Article {
        Article {
            id,
            title: Bilingual::new("Заголовок", "Title"),
            excerpt: Bilingual::new("", ""),
            content: Bilingual::new("текст", "text"),
            pdf_url_uk: None,
            pdf_url_en: None,
            category: Bilingual::new("Новини", "News"),
            author_name: Bilingual::new("Олена", "Olena"),
            author_bio: Bilingual::new("", ""),
            author_photo_url: None,
            main_image_url: None,
            read_time_minutes: 4,
            is_featured: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn related_uses_category_and_excludes_self() {
        let current = article(Uuid::new_v4());
        let expected_exclude = current.id;
        let mut articles = MockArticleRepo::new();
        articles
            .expect_related()
            .withf(move |category, exclude| category == "Новини" && *exclude == expected_exclude)
            .returning(|_, _| Ok(vec![]));

        let svc = service(articles);
        assert!(svc.related_articles(&current).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn writes_are_admin_gated() {
        let mut articles = MockArticleRepo::new();
        articles.expect_delete().never();
        let svc = service(articles);

        let res = svc.delete_article(None, Uuid::new_v4()).await;
        assert!(matches!(res, Err(DomainError::Unauthorized(_))));

        let member = UserIdentity {
            id: Uuid::new_v4(),
            username: "taras".into(),
            email: "taras@example.com".into(),
            role: Role::Member,
        };
        let res = svc.delete_article(Some(&member), Uuid::new_v4()).await;
        assert!(matches!(res, Err(DomainError::Forbidden(_))));
    }

    #[tokio::test]
    async fn bilingual_round_trip_via_create() {
        let mut articles = MockArticleRepo::new();
        articles.expect_create().returning(|new| {
            let mut a = article(Uuid::new_v4());
            a.title = new.title;
            a.content = new.content;
            Ok(a)
        });
        let svc = service(articles);

        let admin = UserIdentity {
            id: Uuid::new_v4(),
            username: "admin".into(),
            email: "admin@example.com".into(),
            role: Role::Admin,
        };
        let mut new = NewArticle {
            title: Bilingual::new("A", "B"),
            excerpt: Bilingual::default(),
            content: Bilingual::new("x", "y"),
            pdf_url_uk: None,
            pdf_url_en: None,
            category: Bilingual::new("Новини", "News"),
            author_name: Bilingual::default(),
            author_bio: Bilingual::default(),
            author_photo_url: None,
            main_image_url: None,
            read_time_minutes: 1,
            is_featured: false,
        };
        new.author_name = Bilingual::new("Олена", "Olena");

        let created = svc.create_article(Some(&admin), new).await.unwrap();
        assert_eq!(created.title, Bilingual::new("A", "B"));
    }

    #[tokio::test]
    async fn subscribe_validates_email_first() {
        let mut subs = MockSubscriberRepo::new();
        subs.expect_subscribe().never();
        let svc = ContentService::new(
            Arc::new(MockArticleRepo::new()),
            Arc::new(MockDailyTopicRepo::new()),
            Arc::new(MockTalentRepo::new()),
            Arc::new(MockArchiveRepo::new()),
            Arc::new(MockTeamRepo::new()),
            Arc::new(MockPageRepo::new()),
            Arc::new(subs),
            gate_without_bans(),
        );
        assert!(matches!(
            svc.subscribe("not-an-email").await,
            Err(DomainError::Validation(_))
        ));
    }
}
