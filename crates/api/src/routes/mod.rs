pub mod announcement;
pub mod auth;
pub mod erlc;
pub mod loa;
pub mod moderation_log;
pub mod notification;
pub mod reminder;
pub mod shift;
pub mod training;
