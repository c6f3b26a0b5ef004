pub mod announcement;
pub mod base;
pub mod loa;
pub mod moderation_log;
pub mod notification;
pub mod reminder;
pub mod shift;
pub mod training;

pub use announcement::AnnouncementDao;
pub use base::{DaoError, DaoResult};
pub use loa::LoaDao;
pub use moderation_log::ModerationLogDao;
pub use notification::NotificationDao;
pub use reminder::ReminderDao;
pub use shift::{ShiftDao, ShiftError};
pub use training::TrainingDao;
