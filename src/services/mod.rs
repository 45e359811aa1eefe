// src/services/mod.rs
pub mod auth_service;
pub mod bootstrap_service;
pub mod class_service;
pub mod dashboard_service;
pub mod report_service;
pub mod student_service;
pub mod user_service;

#[cfg(test)]
pub(crate) mod test_support;
