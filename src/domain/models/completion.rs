use super::ApiError;
use super::DashboardSummary;
use super::PublishResponse;
use super::ScheduleOrigin;
use super::ScheduleResponse;
use super::UpcomingPost;

/// The result of running an `Action`.
#[derive(Debug)]
pub enum Completion {
    Generated(Result<String, ApiError>),
    Copied(anyhow::Result<()>),
    Published(Result<PublishResponse, ApiError>),
    Scheduled {
        origin: ScheduleOrigin,
        refresh_upcoming: bool,
        result: Result<ScheduleResponse, ApiError>,
    },
    Upcoming(Result<Vec<UpcomingPost>, ApiError>),
    Dashboard(Result<DashboardSummary, ApiError>),
}
