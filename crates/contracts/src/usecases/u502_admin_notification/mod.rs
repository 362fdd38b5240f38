pub mod request;
pub mod response;

pub use request::NotificationRequest;
pub use response::NotificationSummary;

use crate::usecases::common::UseCaseMetadata;

pub struct AdminNotification;

impl UseCaseMetadata for AdminNotification {
    fn usecase_index() -> &'static str {
        "u502"
    }

    fn usecase_name() -> &'static str {
        "admin_notification"
    }

    fn display_name() -> &'static str {
        "Рассылка уведомлений администраторам"
    }
}
