use dutydesk_config::Settings;
use dutydesk_services::{
    AuthService, DiscordService, ErlcClient, RankPolicy, ReminderDispatcher,
    dao::{
        announcement::AnnouncementDao, loa::LoaDao, moderation_log::ModerationLogDao,
        notification::NotificationDao, reminder::ReminderDao, shift::ShiftDao,
        training::TrainingDao,
    },
};
use mongodb::Database;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub settings: Settings,
    pub auth: Arc<AuthService>,
    pub rank: Arc<RankPolicy>,
    pub discord: Arc<DiscordService>,
    pub erlc: Arc<ErlcClient>,
    pub shifts: Arc<ShiftDao>,
    pub reminders: Arc<ReminderDao>,
    pub dispatcher: Arc<ReminderDispatcher>,
    pub announcements: Arc<AnnouncementDao>,
    pub logs: Arc<ModerationLogDao>,
    pub notifications: Arc<NotificationDao>,
    pub loa: Arc<LoaDao>,
    pub training: Arc<TrainingDao>,
}

impl AppState {
    pub fn new(db: Database, settings: Settings) -> Self {
        let auth = Arc::new(AuthService::new(settings.session.clone()));
        let rank = Arc::new(RankPolicy::from_settings(&settings.roles));
        let discord = Arc::new(DiscordService::new(settings.discord.clone()));
        let erlc = Arc::new(ErlcClient::new(settings.erlc.clone()));
        let shifts = Arc::new(ShiftDao::new(&db));
        let reminders = Arc::new(ReminderDao::new(&db));
        let dispatcher = Arc::new(ReminderDispatcher::new(
            Arc::clone(&reminders),
            Arc::clone(&erlc),
        ));
        let announcements = Arc::new(AnnouncementDao::new(&db));
        let logs = Arc::new(ModerationLogDao::new(&db));
        let notifications = Arc::new(NotificationDao::new(&db));
        let loa = Arc::new(LoaDao::new(&db));
        let training = Arc::new(TrainingDao::new(&db));

        Self {
            db,
            settings,
            auth,
            rank,
            discord,
            erlc,
            shifts,
            reminders,
            dispatcher,
            announcements,
            logs,
            notifications,
            loa,
            training,
        }
    }
}
