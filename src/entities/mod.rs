pub mod prelude;

pub mod blogs;
pub mod contacts;
pub mod hero_slides;
pub mod job_positions;
pub mod newsletter_subscriptions;
pub mod notification_banners;
pub mod recruitments;
pub mod testimonials;
pub mod users;
