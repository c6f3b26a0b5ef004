mod announcement;
mod loa;
mod moderation_log;
mod notification;
mod reminder;
mod shift;
mod training;

pub use announcement::*;
pub use loa::*;
pub use moderation_log::*;
pub use notification::*;
pub use reminder::*;
pub use shift::*;
pub use training::*;
