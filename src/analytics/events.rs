//! Fixed taxonomy of trackable actions and errors.
//!
//! Every variant maps to a constant string that is sent verbatim to gtag. The error enums mirror
//! the event enums so callers can route both through [`Analytics::track_custom_event`].
//!
//! [`Analytics::track_custom_event`]: crate::analytics::Analytics::track_custom_event

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::analytics::error::{invalid_argument, AnalyticsError};

/// Free-form parameters attached to a gtag event.
pub type EventParams = Map<String, Value>;

macro_rules! tracking_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = AnalyticsError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    other => Err(invalid_argument(format!(
                        "`{other}` is not a known {}",
                        stringify!($name)
                    ))),
                }
            }
        }
    };
}

tracking_enum!(
    /// Categories of user interactions.
    EventCategory {
        PageViews => "page_views",
        ButtonClicks => "button_clicks",
        FormSubmissions => "form_submissions",
        VideoPlays => "video_plays",
        Downloads => "downloads",
        ProductViews => "product_views",
        ExternalLinkClicks => "external_link_clicks",
    }
);

tracking_enum!(
    EventAction {
        SubmitButton => "submit_button",
        ContactForm => "contact_form",
        PromoVideo => "promo_video",
        ExampleDownload => "example_download",
        ViewedProduct => "viewed_product",
        OpenedExternalLink => "opened_external_link",
    }
);

tracking_enum!(
    /// Categories of reported errors.
    ErrorCategory {
        General => "error_general",
        PageNotFound => "error_page_not_found",
        Validation => "error_validation",
    }
);

tracking_enum!(
    ErrorAction {
        UnhandledException => "error_unhandled_exception",
        UserError => "error_user_error",
    }
);

/// Either an [`EventCategory`] or an [`ErrorCategory`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrackingCategory {
    Event(EventCategory),
    Error(ErrorCategory),
}

impl TrackingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingCategory::Event(category) => category.as_str(),
            TrackingCategory::Error(category) => category.as_str(),
        }
    }
}

impl From<EventCategory> for TrackingCategory {
    fn from(value: EventCategory) -> Self {
        TrackingCategory::Event(value)
    }
}

impl From<ErrorCategory> for TrackingCategory {
    fn from(value: ErrorCategory) -> Self {
        TrackingCategory::Error(value)
    }
}

impl fmt::Display for TrackingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Either an [`EventAction`] or an [`ErrorAction`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrackingAction {
    Event(EventAction),
    Error(ErrorAction),
}

impl TrackingAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingAction::Event(action) => action.as_str(),
            TrackingAction::Error(action) => action.as_str(),
        }
    }
}

impl From<EventAction> for TrackingAction {
    fn from(value: EventAction) -> Self {
        TrackingAction::Event(value)
    }
}

impl From<ErrorAction> for TrackingAction {
    fn from(value: ErrorAction) -> Self {
        TrackingAction::Error(value)
    }
}

impl fmt::Display for TrackingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
