use super::GenerateContentRequest;
use super::ScheduleRequest;
use super::UploadRequest;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerateJob {
    Content(GenerateContentRequest),
    Upload(UploadRequest),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishJob {
    pub content: String,
    pub account_id: String,
}

/// Which of the two schedule entry points started a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduleOrigin {
    Modal,
    Page,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleJob {
    pub origin: ScheduleOrigin,
    pub request: ScheduleRequest,
    pub refresh_upcoming: bool,
}

/// Side effects requested by the UI, executed by the actions service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Generate(GenerateJob),
    Copy(String),
    Publish(PublishJob),
    Schedule(ScheduleJob),
    FetchUpcoming,
    FetchDashboard,
}
