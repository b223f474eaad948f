pub const APP_LOGGER_NAME: &str = "@gtag/app";
pub const APP_TITLE: &str = "gtag-route-analytics";

pub const SIMULATED_ERROR_MESSAGE: &str = "Simulated error for testing";
pub const ERROR_MESSAGE_PARAM: &str = "error_message";
