use serde::{Deserialize, Serialize};

use crate::auth::Identity;
use crate::db::RecruitmentWithPosition;
use crate::entities::{
    blogs, contacts, hero_slides, job_positions, newsletter_subscriptions, notification_banners,
    recruitments, testimonials,
};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Identity,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct BlogDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub content: String,
    /// Rendered HTML, included on single-blog reads only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_html: Option<String>,
    pub author: String,
    pub slug: String,
    pub hero_image: Option<String>,
    pub status: String,
    pub pub_date: String,
    pub updated_date: String,
}

impl BlogDto {
    pub fn from_model(model: blogs::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            content_html: None,
            content: model.content,
            author: model.author,
            slug: model.slug,
            hero_image: model.hero_image,
            status: model.status,
            pub_date: model.pub_date,
            updated_date: model.updated_date,
        }
    }

    pub fn from_model_rendered(model: blogs::Model) -> Self {
        let content_html = crate::markdown::markdown_to_html(&model.content);
        let mut dto = Self::from_model(model);
        dto.content_html = Some(content_html);
        dto
    }
}

pub type ContactDto = contacts::Model;

#[derive(Debug, Serialize)]
pub struct JobPositionDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub department: String,
    pub location: String,
    pub employment_type: String,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub experience_min: i32,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<job_positions::Model> for JobPositionDto {
    fn from(model: job_positions::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            department: model.department,
            location: model.location,
            employment_type: model.employment_type,
            salary_min: model.salary_min,
            salary_max: model.salary_max,
            requirements: serde_json::from_str(&model.requirements).unwrap_or_default(),
            responsibilities: serde_json::from_str(&model.responsibilities).unwrap_or_default(),
            experience_min: model.experience_min,
            is_active: model.is_active,
            is_featured: model.is_featured,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecruitmentDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    /// Title of the linked job position; `None` for legacy rows and for
    /// applications whose position has since been deleted.
    pub position_title: Option<String>,
    pub position_id: Option<i32>,
    pub experience: Option<String>,
    pub salary_expectation: Option<String>,
    pub cv_path: Option<String>,
    pub cover_letter: Option<String>,
    pub status: String,
    pub created_at: String,
}

impl RecruitmentDto {
    pub fn from_row((model, position_title): RecruitmentWithPosition) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            position: model.position,
            position_title,
            position_id: model.position_id,
            experience: model.experience,
            salary_expectation: model.salary_expectation,
            cv_path: model.cv_path,
            cover_letter: model.cover_letter,
            status: model.status,
            created_at: model.created_at,
        }
    }
}

impl From<recruitments::Model> for RecruitmentDto {
    fn from(model: recruitments::Model) -> Self {
        Self::from_row((model, None))
    }
}

#[derive(Debug, Serialize)]
pub struct SubscriptionDto {
    pub id: i32,
    pub email: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub source: Option<String>,
    pub subscribed_at: String,
    pub unsubscribed_at: Option<String>,
}

impl From<newsletter_subscriptions::Model> for SubscriptionDto {
    fn from(model: newsletter_subscriptions::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            kind: model.kind,
            status: model.status,
            source: model.source,
            subscribed_at: model.subscribed_at,
            unsubscribed_at: model.unsubscribed_at,
        }
    }
}

pub type HeroSlideDto = hero_slides::Model;
pub type TestimonialDto = testimonials::Model;
pub type BannerDto = notification_banners::Model;

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub role: String,
    pub created_at: String,
}

impl From<crate::db::User> for UserDto {
    fn from(user: crate::db::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub filename: String,
    pub size: usize,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}
