//! Feature definitions for the launcher grid.

use serde::{Deserialize, Serialize};

use super::chat::ChatThread;
use super::group::GroupRoster;
use crate::config::GroupConfig;

/// Trip-planning features that open in their own window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Map,
    Chat,
    Expense,
    Photo,
    Group,
    Plan,
}

impl Feature {
    /// Stable window id for this feature.
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Map => "map",
            Feature::Chat => "chat",
            Feature::Expense => "expense",
            Feature::Photo => "photo",
            Feature::Group => "group",
            Feature::Plan => "plan",
        }
    }

    /// Parse a feature from its id (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "map" => Some(Feature::Map),
            "chat" => Some(Feature::Chat),
            "expense" => Some(Feature::Expense),
            "photo" => Some(Feature::Photo),
            "group" => Some(Feature::Group),
            "plan" => Some(Feature::Plan),
            _ => None,
        }
    }

    /// All features, in launcher grid order.
    pub fn all() -> &'static [Feature] {
        &[
            Feature::Map,
            Feature::Chat,
            Feature::Expense,
            Feature::Photo,
            Feature::Group,
            Feature::Plan,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Feature::Map => "Map",
            Feature::Chat => "Chat",
            Feature::Expense => "Expenses",
            Feature::Photo => "Photo album",
            Feature::Group => "Group",
            Feature::Plan => "Trip plan",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Feature::Map => "Recommended spots on OpenStreetMap",
            Feature::Chat => "Talk with your travel companions in real time",
            Feature::Expense => "Track spending with automatic bill splitting",
            Feature::Photo => "Slideshow videos with background music",
            Feature::Group => "Manage and invite trip members",
            Feature::Plan => "Schedule and budget",
        }
    }

    /// Glyph name shown on the taskbar while minimized.
    pub fn icon(&self) -> &'static str {
        match self {
            Feature::Map => "map-pin",
            Feature::Chat => "message-circle",
            Feature::Expense => "calculator",
            Feature::Photo => "camera",
            Feature::Group => "users",
            Feature::Plan => "plane",
        }
    }

    /// Accent color of the launcher card.
    pub fn color(&self) -> &'static str {
        match self {
            Feature::Map => "#3498db",
            Feature::Chat => "#2ecc71",
            Feature::Expense => "#e74c3c",
            Feature::Photo => "#9b59b6",
            Feature::Group => "#f39c12",
            Feature::Plan => "#1abc9c",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!(
                "Unknown feature '{}'. Supported: {}",
                s,
                Feature::all()
                    .iter()
                    .map(|f| f.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
    }
}

/// Body of a feature window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureContent {
    /// Group chat.
    Chat(ChatThread),
    /// Member management for one trip group.
    GroupManagement(GroupRoster),
    /// Feature still under development.
    Placeholder { description: String },
}

impl FeatureContent {
    /// Fresh body for a newly launched `feature`.
    pub fn initial(feature: Feature, group: &GroupConfig) -> Self {
        match feature {
            Feature::Chat => FeatureContent::Chat(ChatThread::new()),
            Feature::Group => FeatureContent::GroupManagement(GroupRoster::from_config(group)),
            _ => FeatureContent::Placeholder {
                description: feature.description().to_string(),
            },
        }
    }

    /// One-line text rendering of the body.
    pub fn summary(&self) -> String {
        match self {
            FeatureContent::Chat(thread) => match thread.last() {
                Some(last) => format!(
                    "Group chat, {} message(s), last {} {}: {}",
                    thread.len(),
                    last.time_label(),
                    last.sender,
                    last.text
                ),
                None => "Group chat, no messages yet".to_string(),
            },
            FeatureContent::GroupManagement(roster) => {
                let mut summary = format!(
                    "Members of {} ({}): {} member(s), {} invited",
                    roster.settings().name,
                    roster.group_id(),
                    roster.members().len(),
                    roster.invitations().len()
                );
                if let Some(member) = roster.pending_removal() {
                    summary.push_str(&format!(", remove {}? (confirm/cancel)", member.name));
                }
                summary
            }
            FeatureContent::Placeholder { description } => {
                format!("{} - coming soon", description)
            }
        }
    }
}
