pub const ANALYTICS_LOGGER_NAME: &str = "@gtag/analytics";

/// Script source the site identifier is appended to as the `id` query value.
pub const GTAG_URL: &str = "https://www.googletagmanager.com/gtag/js";

pub const DEFAULT_DATA_LAYER_NAME: &str = "dataLayer";
pub const GTAG_FUNCTION_NAME: &str = "gtag";

pub const TITLE_DATA_KEY: &str = "title";
pub const TITLE_SEPARATOR: &str = "-";

pub const PAGE_VIEW_EVENT: &str = "page_view";
pub const PAGE_TITLE_PARAM: &str = "page_title";
pub const PAGE_PATH_PARAM: &str = "page_path";
pub const PAGE_LOCATION_PARAM: &str = "page_location";

pub const EVENT_CATEGORY_PARAM: &str = "event_category";
pub const EVENT_ACTION_PARAM: &str = "event_action";
pub const EVENT_LABEL_PARAM: &str = "event_label";
pub const EVENT_VALUE_PARAM: &str = "value";
pub const ERROR_CATEGORY_PARAM: &str = "error_category";
pub const ERROR_ACTION_PARAM: &str = "error_action";
