//! Feature launchers.
//!
//! Each launcher builds the [`WindowSpec`] for its feature. Ids are stable
//! per feature, so launching the same feature twice refreshes and restores
//! its window instead of opening a second one.

pub mod chat;
pub mod errors;
pub mod group;
pub mod types;

pub use chat::{ChatMessage, ChatThread};
pub use errors::GroupError;
pub use group::{GroupMember, GroupRoster, GroupSettings, GroupToggle, MemberRole};
pub use types::{Feature, FeatureContent};

use crate::config::GroupConfig;
use crate::windows::{WindowSize, WindowSpec};

/// Build the window for `feature` with fresh content.
pub fn launch(feature: Feature, group: &GroupConfig) -> WindowSpec<FeatureContent> {
    feature_window(feature, FeatureContent::initial(feature, group))
}

/// Build the window for `feature` around existing `content`.
///
/// Re-opening with updated content refreshes the window in place.
/// Chat and group management get dedicated large windows; everything else
/// opens a medium placeholder.
pub fn feature_window(feature: Feature, content: FeatureContent) -> WindowSpec<FeatureContent> {
    let size = match feature {
        Feature::Chat | Feature::Group => WindowSize::Large,
        _ => WindowSize::Medium,
    };

    tracing::debug!(
        event = "core.features.launch_prepared",
        feature = feature.as_str(),
        size = size.as_str()
    );

    WindowSpec::new(feature.as_str(), feature.title(), content)
        .with_icon(feature.icon())
        .with_size(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_opens_large_with_chat_content() {
        let spec = launch(Feature::Chat, &GroupConfig::default());
        assert_eq!(spec.id, "chat");
        assert_eq!(spec.size, Some(WindowSize::Large));
        assert_eq!(spec.content, FeatureContent::Chat(ChatThread::new()));
        assert_eq!(spec.icon.as_deref(), Some("message-circle"));
    }

    #[test]
    fn test_group_uses_configured_group() {
        let group = GroupConfig {
            name: Some("Hokkaido".to_string()),
            id: Some("hokkaido-2025".to_string()),
        };
        let spec = launch(Feature::Group, &group);
        let FeatureContent::GroupManagement(roster) = &spec.content else {
            panic!("expected group content, got {:?}", spec.content);
        };
        assert_eq!(roster.settings().name, "Hokkaido");
        assert_eq!(roster.group_id(), "hokkaido-2025");
        assert!(roster.members().is_empty());
        assert_eq!(spec.size, Some(WindowSize::Large));
    }

    #[test]
    fn test_feature_window_carries_given_content() {
        let mut thread = ChatThread::new();
        thread.send("Aoi", "hello");
        let spec = feature_window(Feature::Chat, FeatureContent::Chat(thread.clone()));
        assert_eq!(spec.content, FeatureContent::Chat(thread));
        assert_eq!(spec.size, Some(WindowSize::Large));
    }

    #[test]
    fn test_other_features_open_medium_placeholder() {
        for feature in [Feature::Map, Feature::Expense, Feature::Photo, Feature::Plan] {
            let spec = launch(feature, &GroupConfig::default());
            assert_eq!(spec.size, Some(WindowSize::Medium));
            assert!(matches!(spec.content, FeatureContent::Placeholder { .. }));
            assert_eq!(spec.title, feature.title());
        }
    }
}
