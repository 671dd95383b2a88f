pub mod applications;
pub mod auth;
pub mod companies;
pub mod health;
pub mod jobs;
pub mod profile;
pub mod swagger;
