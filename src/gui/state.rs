use crate::core::{
    Config, Notice, NoticeLevel, asset::UploadPolicy, route::Router, session::Session,
};

#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub session: Session,
    pub router: Router,
    notices: Vec<(u64, Notice)>,
    next_notice: u64,
    /// Notices with an id below this already have a dismiss timer.
    scheduled: u64,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session: Session::default(),
            router: Router::new(),
            notices: Vec::new(),
            next_notice: 0,
            scheduled: 0,
        }
    }

    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy::new(&self.config.uploads)
    }

    pub fn notify(&mut self, notice: Notice) -> u64 {
        match notice.level {
            NoticeLevel::Error => tracing::warn!(title = %notice.title, "{}", notice.description),
            _ => tracing::info!(title = %notice.title, "{}", notice.description),
        }
        let id = self.next_notice;
        self.next_notice += 1;
        self.notices.push((id, notice));
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.notices.retain(|(notice_id, _)| *notice_id != id);
    }

    pub fn notices(&self) -> &[(u64, Notice)] {
        &self.notices
    }

    /// Ids of notices raised since the last call.
    pub fn drain_fresh(&mut self) -> Vec<u64> {
        let fresh = self
            .notices
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| *id >= self.scheduled)
            .collect();
        self.scheduled = self.next_notice;
        fresh
    }
}
