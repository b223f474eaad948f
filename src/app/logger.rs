use std::sync::LazyLock;

use crate::app::constants::APP_LOGGER_NAME;
use crate::logger::Logger;

pub static LOGGER: LazyLock<Logger> = LazyLock::new(|| Logger::new(APP_LOGGER_NAME));
