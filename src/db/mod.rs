use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{blogs, contacts, hero_slides, job_positions, newsletter_subscriptions,
    notification_banners, recruitments, testimonials};

pub mod migrator;
pub mod repositories;

pub use repositories::RepoError;
pub use repositories::blog::BlogInput;
pub use repositories::banner::BannerInput;
pub use repositories::contact::ContactInput;
pub use repositories::hero_slide::HeroSlideInput;
pub use repositories::job_position::JobPositionInput;
pub use repositories::newsletter::SubscriptionStats;
pub use repositories::recruitment::{RecruitmentInput, RecruitmentWithPosition};
pub use repositories::testimonial::TestimonialInput;
pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        // Pooled in-memory SQLite connections each open their own database,
        // so an in-memory store must stay on a single connection.
        let (max_connections, min_connections) = if db_url.contains(":memory:") {
            (1, 1)
        } else {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn blog_repo(&self) -> repositories::blog::BlogRepository {
        repositories::blog::BlogRepository::new(self.conn.clone())
    }

    fn contact_repo(&self) -> repositories::contact::ContactRepository {
        repositories::contact::ContactRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn job_position_repo(&self) -> repositories::job_position::JobPositionRepository {
        repositories::job_position::JobPositionRepository::new(self.conn.clone())
    }

    fn recruitment_repo(&self) -> repositories::recruitment::RecruitmentRepository {
        repositories::recruitment::RecruitmentRepository::new(self.conn.clone())
    }

    fn newsletter_repo(&self) -> repositories::newsletter::NewsletterRepository {
        repositories::newsletter::NewsletterRepository::new(self.conn.clone())
    }

    fn hero_slide_repo(&self) -> repositories::hero_slide::HeroSlideRepository {
        repositories::hero_slide::HeroSlideRepository::new(self.conn.clone())
    }

    fn testimonial_repo(&self) -> repositories::testimonial::TestimonialRepository {
        repositories::testimonial::TestimonialRepository::new(self.conn.clone())
    }

    fn banner_repo(&self) -> repositories::banner::BannerRepository {
        repositories::banner::BannerRepository::new(self.conn.clone())
    }

    // ========== Blogs ==========

    pub async fn list_blogs(&self) -> Result<Vec<blogs::Model>> {
        self.blog_repo().list_all().await
    }

    pub async fn list_published_blogs(&self) -> Result<Vec<blogs::Model>> {
        self.blog_repo().list_published().await
    }

    pub async fn get_blog(&self, id: i32) -> Result<Option<blogs::Model>> {
        self.blog_repo().get(id).await
    }

    pub async fn get_blog_by_slug(&self, slug: &str) -> Result<Option<blogs::Model>> {
        self.blog_repo().get_by_slug(slug).await
    }

    pub async fn create_blog(&self, input: BlogInput) -> Result<blogs::Model> {
        self.blog_repo().create(input).await
    }

    pub async fn update_blog(&self, id: i32, input: BlogInput) -> Result<blogs::Model> {
        self.blog_repo().update(id, input).await
    }

    pub async fn delete_blog(&self, id: i32) -> Result<bool> {
        self.blog_repo().delete(id).await
    }

    // ========== Contacts ==========

    pub async fn list_contacts(&self) -> Result<Vec<contacts::Model>> {
        self.contact_repo().list_all().await
    }

    pub async fn get_contact(&self, id: i32) -> Result<Option<contacts::Model>> {
        self.contact_repo().get(id).await
    }

    pub async fn create_contact(&self, input: ContactInput) -> Result<contacts::Model> {
        self.contact_repo().create(input).await
    }

    pub async fn update_contact_status(&self, id: i32, status: &str) -> Result<bool> {
        self.contact_repo().update_status(id, status).await
    }

    pub async fn delete_contact(&self, id: i32) -> Result<bool> {
        self.contact_repo().delete(id).await
    }

    // ========== Users ==========

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list_all().await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn verify_credentials(&self, username: &str, password: &str) -> Result<Option<User>> {
        self.user_repo().verify_credentials(username, password).await
    }

    pub async fn create_user(&self, username: &str, password: &str, role: &str) -> Result<User> {
        self.user_repo().create(username, password, role).await
    }

    pub async fn update_user_password(&self, id: i32, new_password: &str) -> Result<()> {
        self.user_repo().update_password(id, new_password).await
    }

    pub async fn delete_user(&self, id: i32) -> Result<bool> {
        self.user_repo().delete(id).await
    }

    // ========== Job positions ==========

    pub async fn list_job_positions(&self) -> Result<Vec<job_positions::Model>> {
        self.job_position_repo().list_all().await
    }

    pub async fn list_active_job_positions(&self) -> Result<Vec<job_positions::Model>> {
        self.job_position_repo().list_active().await
    }

    pub async fn list_featured_job_positions(&self) -> Result<Vec<job_positions::Model>> {
        self.job_position_repo().list_featured().await
    }

    pub async fn get_job_position(&self, id: i32) -> Result<Option<job_positions::Model>> {
        self.job_position_repo().get(id).await
    }

    pub async fn create_job_position(&self, input: JobPositionInput) -> Result<job_positions::Model> {
        self.job_position_repo().create(input).await
    }

    pub async fn update_job_position(
        &self,
        id: i32,
        input: JobPositionInput,
    ) -> Result<job_positions::Model> {
        self.job_position_repo().update(id, input).await
    }

    pub async fn toggle_job_position_active(&self, id: i32, active: bool) -> Result<bool> {
        self.job_position_repo().toggle_active(id, active).await
    }

    pub async fn toggle_job_position_featured(&self, id: i32, featured: bool) -> Result<bool> {
        self.job_position_repo().toggle_featured(id, featured).await
    }

    pub async fn delete_job_position(&self, id: i32) -> Result<bool> {
        self.job_position_repo().delete(id).await
    }

    // ========== Recruitments ==========

    pub async fn list_recruitments(&self) -> Result<Vec<RecruitmentWithPosition>> {
        self.recruitment_repo().list_all().await
    }

    pub async fn list_recruitments_for_position(
        &self,
        position_id: i32,
    ) -> Result<Vec<RecruitmentWithPosition>> {
        self.recruitment_repo().list_for_position(position_id).await
    }

    pub async fn get_recruitment(&self, id: i32) -> Result<Option<recruitments::Model>> {
        self.recruitment_repo().get(id).await
    }

    pub async fn create_recruitment(&self, input: RecruitmentInput) -> Result<recruitments::Model> {
        self.recruitment_repo().create(input).await
    }

    pub async fn update_recruitment_status(&self, id: i32, status: &str) -> Result<bool> {
        self.recruitment_repo().update_status(id, status).await
    }

    pub async fn delete_recruitment(&self, id: i32) -> Result<bool> {
        self.recruitment_repo().delete(id).await
    }

    // ========== Newsletter ==========

    pub async fn list_subscriptions(&self) -> Result<Vec<newsletter_subscriptions::Model>> {
        self.newsletter_repo().list_all().await
    }

    pub async fn get_subscription(&self, id: i32) -> Result<Option<newsletter_subscriptions::Model>> {
        self.newsletter_repo().get(id).await
    }

    pub async fn get_subscription_by_email(
        &self,
        email: &str,
    ) -> Result<Option<newsletter_subscriptions::Model>> {
        self.newsletter_repo().get_by_email(email).await
    }

    pub async fn list_active_subscriptions_by_kind(
        &self,
        kind: &str,
    ) -> Result<Vec<newsletter_subscriptions::Model>> {
        self.newsletter_repo().list_active_by_kind(kind).await
    }

    pub async fn subscribe(
        &self,
        email: &str,
        kind: &str,
        source: Option<&str>,
        metadata: Option<String>,
    ) -> Result<newsletter_subscriptions::Model> {
        self.newsletter_repo().subscribe(email, kind, source, metadata).await
    }

    pub async fn resubscribe(&self, email: &str) -> Result<bool> {
        self.newsletter_repo().resubscribe(email).await
    }

    pub async fn unsubscribe(&self, email: &str) -> Result<bool> {
        self.newsletter_repo().unsubscribe(email).await
    }

    pub async fn delete_subscription(&self, id: i32) -> Result<bool> {
        self.newsletter_repo().delete(id).await
    }

    pub async fn subscription_stats(&self) -> Result<Vec<SubscriptionStats>> {
        self.newsletter_repo().stats().await
    }

    // ========== Hero slides ==========

    pub async fn list_hero_slides(&self) -> Result<Vec<hero_slides::Model>> {
        self.hero_slide_repo().list_all().await
    }

    pub async fn list_active_hero_slides(&self) -> Result<Vec<hero_slides::Model>> {
        self.hero_slide_repo().list_active().await
    }

    pub async fn get_hero_slide(&self, id: i32) -> Result<Option<hero_slides::Model>> {
        self.hero_slide_repo().get(id).await
    }

    pub async fn create_hero_slide(&self, input: HeroSlideInput) -> Result<hero_slides::Model> {
        self.hero_slide_repo().create(input).await
    }

    pub async fn update_hero_slide(&self, id: i32, input: HeroSlideInput) -> Result<hero_slides::Model> {
        self.hero_slide_repo().update(id, input).await
    }

    pub async fn deactivate_hero_slide(&self, id: i32) -> Result<bool> {
        self.hero_slide_repo().deactivate(id).await
    }

    pub async fn activate_only_hero_slide(&self, id: i32) -> Result<bool> {
        self.hero_slide_repo().activate_only(id).await
    }

    pub async fn delete_hero_slide(&self, id: i32) -> Result<bool> {
        self.hero_slide_repo().delete(id).await
    }

    // ========== Testimonials ==========

    pub async fn list_testimonials(&self) -> Result<Vec<testimonials::Model>> {
        self.testimonial_repo().list_all().await
    }

    pub async fn list_active_testimonials(&self) -> Result<Vec<testimonials::Model>> {
        self.testimonial_repo().list_active().await
    }

    pub async fn list_featured_testimonials(&self) -> Result<Vec<testimonials::Model>> {
        self.testimonial_repo().list_featured().await
    }

    pub async fn get_testimonial(&self, id: i32) -> Result<Option<testimonials::Model>> {
        self.testimonial_repo().get(id).await
    }

    pub async fn create_testimonial(&self, input: TestimonialInput) -> Result<testimonials::Model> {
        self.testimonial_repo().create(input).await
    }

    pub async fn update_testimonial(
        &self,
        id: i32,
        input: TestimonialInput,
    ) -> Result<testimonials::Model> {
        self.testimonial_repo().update(id, input).await
    }

    pub async fn toggle_testimonial_active(&self, id: i32, active: bool) -> Result<bool> {
        self.testimonial_repo().toggle_active(id, active).await
    }

    pub async fn toggle_testimonial_featured(&self, id: i32, featured: bool) -> Result<bool> {
        self.testimonial_repo().toggle_featured(id, featured).await
    }

    pub async fn delete_testimonial(&self, id: i32) -> Result<bool> {
        self.testimonial_repo().delete(id).await
    }

    // ========== Notification banners ==========

    pub async fn list_banners(&self) -> Result<Vec<notification_banners::Model>> {
        self.banner_repo().list_all().await
    }

    pub async fn list_active_banners(&self) -> Result<Vec<notification_banners::Model>> {
        self.banner_repo().list_active().await
    }

    pub async fn get_banner(&self, id: i32) -> Result<Option<notification_banners::Model>> {
        self.banner_repo().get(id).await
    }

    pub async fn create_banner(&self, input: BannerInput) -> Result<notification_banners::Model> {
        self.banner_repo().create(input).await
    }

    pub async fn update_banner(&self, id: i32, input: BannerInput) -> Result<notification_banners::Model> {
        self.banner_repo().update(id, input).await
    }

    pub async fn deactivate_banner(&self, id: i32) -> Result<bool> {
        self.banner_repo().deactivate(id).await
    }

    pub async fn activate_only_banner(&self, id: i32) -> Result<bool> {
        self.banner_repo().activate_only(id).await
    }

    pub async fn delete_banner(&self, id: i32) -> Result<bool> {
        self.banner_repo().delete(id).await
    }
}
