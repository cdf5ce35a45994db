use serde::{Deserialize, Serialize};

/// Colour family of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Neutral,
    Info,
    Warning,
    Success,
    Danger,
}

impl BadgeVariant {
    /// CSS modifier, e.g. `badge badge--success`
    pub fn css_class(self) -> &'static str {
        match self {
            BadgeVariant::Neutral => "badge badge--neutral",
            BadgeVariant::Info => "badge badge--info",
            BadgeVariant::Warning => "badge badge--warning",
            BadgeVariant::Success => "badge badge--success",
            BadgeVariant::Danger => "badge badge--danger",
        }
    }
}
