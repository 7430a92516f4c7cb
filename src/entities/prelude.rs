pub use super::blogs::Entity as Blogs;
pub use super::contacts::Entity as Contacts;
pub use super::hero_slides::Entity as HeroSlides;
pub use super::job_positions::Entity as JobPositions;
pub use super::newsletter_subscriptions::Entity as NewsletterSubscriptions;
pub use super::notification_banners::Entity as NotificationBanners;
pub use super::recruitments::Entity as Recruitments;
pub use super::testimonials::Entity as Testimonials;
pub use super::users::Entity as Users;
