pub mod callback;
pub mod events;

pub use callback::{Button, CallbackAction};
pub use events::{InboundEvent, UserId};

use crate::usecases::common::UseCaseMetadata;

pub struct ClientLookup;

impl UseCaseMetadata for ClientLookup {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "client_lookup"
    }

    fn display_name() -> &'static str {
        "Поиск ресторана в боте"
    }

    fn description() -> &'static str {
        "Нечёткий поиск клиента по названию с уточнением варианта через кнопки"
    }
}
