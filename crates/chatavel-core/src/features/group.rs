//! Member roster and settings behind the group management window.
//!
//! Members are addressed by id or by email (case-insensitive). Removing a
//! member takes two steps: [`GroupRoster::request_removal`] marks one member,
//! and [`GroupRoster::confirm_removal`] or [`GroupRoster::cancel_removal`]
//! settles it. The owner can neither be removed nor have their role changed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::errors::GroupError;
use crate::auth::memory::looks_like_email;
use crate::config::GroupConfig;

const INVITE_BASE_URL: &str = "https://chatavel.app/join";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Owner,
    Admin,
    Member,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Owner => "owner",
            MemberRole::Admin => "admin",
            MemberRole::Member => "member",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "owner" => Some(MemberRole::Owner),
            "admin" => Some(MemberRole::Admin),
            "member" => Some(MemberRole::Member),
            _ => None,
        }
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

impl GroupMember {
    fn new(name: &str, email: &str, role: MemberRole) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            joined_at: Utc::now(),
        }
    }

    fn matches(&self, key: &str) -> bool {
        self.id == key || self.email.eq_ignore_ascii_case(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSettings {
    pub name: String,
    pub description: String,
    /// Listed in search, anyone can ask to join.
    pub is_public: bool,
    pub allow_member_invites: bool,
}

/// Boolean switches on the settings tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupToggle {
    Public,
    MemberInvites,
}

impl GroupToggle {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupToggle::Public => "public",
            GroupToggle::MemberInvites => "member-invites",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "public" => Some(GroupToggle::Public),
            "member-invites" | "invites" => Some(GroupToggle::MemberInvites),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRoster {
    group_id: String,
    settings: GroupSettings,
    members: Vec<GroupMember>,
    invitations: Vec<String>,
    pending_removal: Option<String>,
}

impl GroupRoster {
    /// Empty private group. Members may invite others.
    pub fn new(group_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            settings: GroupSettings {
                name: name.into(),
                description: String::new(),
                is_public: false,
                allow_member_invites: true,
            },
            members: Vec::new(),
            invitations: Vec::new(),
            pending_removal: None,
        }
    }

    pub fn from_config(group: &GroupConfig) -> Self {
        Self::new(group.id(), group.name())
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn settings(&self) -> &GroupSettings {
        &self.settings
    }

    pub fn members(&self) -> &[GroupMember] {
        &self.members
    }

    pub fn invitations(&self) -> &[String] {
        &self.invitations
    }

    pub fn member(&self, key: &str) -> Option<&GroupMember> {
        self.members.iter().find(|m| m.matches(key))
    }

    pub fn owner(&self) -> Option<&GroupMember> {
        self.members.iter().find(|m| m.role == MemberRole::Owner)
    }

    /// Member currently waiting for removal confirmation.
    pub fn pending_removal(&self) -> Option<&GroupMember> {
        let id = self.pending_removal.as_deref()?;
        self.members.iter().find(|m| m.id == id)
    }

    pub fn invite_link(&self) -> String {
        format!("{}/{}", INVITE_BASE_URL, self.group_id)
    }

    /// Seat the group owner. No-op once an owner exists.
    pub fn add_owner(&mut self, name: &str, email: &str) -> bool {
        if self.owner().is_some() {
            return false;
        }
        self.members
            .insert(0, GroupMember::new(name, email, MemberRole::Owner));
        info!(
            event = "core.group.owner_added",
            group_id = %self.group_id,
            email = email
        );
        true
    }

    /// Record an email invitation.
    pub fn invite(&mut self, email: &str) -> Result<(), GroupError> {
        let email = email.trim();
        if !looks_like_email(email) {
            return Err(GroupError::InvalidEmail {
                email: email.to_string(),
            });
        }
        if self.member(email).is_some() {
            return Err(GroupError::AlreadyMember {
                email: email.to_string(),
            });
        }
        if self.invitation_index(email).is_some() {
            return Err(GroupError::AlreadyInvited {
                email: email.to_string(),
            });
        }

        self.invitations.push(email.to_string());
        info!(
            event = "core.group.invite_sent",
            group_id = %self.group_id,
            email = email,
            pending = self.invitations.len()
        );
        Ok(())
    }

    /// Turn a pending invitation into a member with the `member` role.
    pub fn accept_invitation(&mut self, email: &str, name: &str) -> Result<&GroupMember, GroupError> {
        let index = self
            .invitation_index(email)
            .ok_or_else(|| GroupError::NotInvited {
                email: email.to_string(),
            })?;
        let email = self.invitations.remove(index);

        info!(
            event = "core.group.member_joined",
            group_id = %self.group_id,
            email = %email
        );
        self.members
            .push(GroupMember::new(name, &email, MemberRole::Member));
        self.members.last().ok_or(GroupError::MemberNotFound { member: email })
    }

    /// Switch a member between admin and member. Returns whether the role
    /// changed.
    pub fn change_role(&mut self, key: &str, role: MemberRole) -> Result<bool, GroupError> {
        if role == MemberRole::Owner {
            return Err(GroupError::OwnerRoleNotAssignable);
        }
        let member = self.editable_member_mut(key)?;
        if member.role == role {
            return Ok(false);
        }

        let from = member.role;
        member.role = role;
        info!(
            event = "core.group.role_changed",
            member_id = %member.id,
            from = from.as_str(),
            to = role.as_str()
        );
        Ok(true)
    }

    /// Mark a member for removal. Replaces any earlier pending request.
    pub fn request_removal(&mut self, key: &str) -> Result<&GroupMember, GroupError> {
        let id = self.editable_member_mut(key)?.id.clone();
        info!(event = "core.group.removal_requested", member_id = %id);
        self.pending_removal = Some(id);
        self.pending_removal()
            .ok_or_else(|| GroupError::MemberNotFound {
                member: key.to_string(),
            })
    }

    pub fn confirm_removal(&mut self) -> Result<GroupMember, GroupError> {
        let id = self
            .pending_removal
            .take()
            .ok_or(GroupError::NoPendingRemoval)?;
        let index = self
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or(GroupError::MemberNotFound { member: id })?;

        let removed = self.members.remove(index);
        info!(
            event = "core.group.member_removed",
            member_id = %removed.id,
            member_count = self.members.len()
        );
        Ok(removed)
    }

    /// Drop the pending removal. Returns whether one was pending.
    pub fn cancel_removal(&mut self) -> bool {
        self.pending_removal.take().is_some()
    }

    pub fn rename(&mut self, name: &str) -> Result<(), GroupError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GroupError::EmptyGroupName);
        }
        self.settings.name = name.to_string();
        info!(event = "core.group.renamed", group_id = %self.group_id, name = name);
        Ok(())
    }

    pub fn set_description(&mut self, description: &str) {
        self.settings.description = description.trim().to_string();
    }

    pub fn set_toggle(&mut self, toggle: GroupToggle, enabled: bool) {
        match toggle {
            GroupToggle::Public => self.settings.is_public = enabled,
            GroupToggle::MemberInvites => self.settings.allow_member_invites = enabled,
        }
        info!(
            event = "core.group.setting_changed",
            setting = toggle.as_str(),
            enabled = enabled
        );
    }

    fn invitation_index(&self, email: &str) -> Option<usize> {
        self.invitations
            .iter()
            .position(|invited| invited.eq_ignore_ascii_case(email))
    }

    fn editable_member_mut(&mut self, key: &str) -> Result<&mut GroupMember, GroupError> {
        let member = self
            .members
            .iter_mut()
            .find(|m| m.matches(key))
            .ok_or_else(|| GroupError::MemberNotFound {
                member: key.to_string(),
            })?;
        if member.role == MemberRole::Owner {
            return Err(GroupError::OwnerLocked {
                member: member.email.clone(),
            });
        }
        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip_group() -> GroupRoster {
        let mut roster = GroupRoster::new("okinawa-2025", "Okinawa");
        roster.add_owner("Tanaka", "tanaka@example.com");
        roster.invite("sato@example.com").unwrap();
        roster.accept_invitation("sato@example.com", "Sato").unwrap();
        roster
    }

    #[test]
    fn test_invite_validates_email() {
        let mut roster = GroupRoster::new("g", "G");
        assert!(matches!(
            roster.invite("not-an-email"),
            Err(GroupError::InvalidEmail { .. })
        ));
        assert!(matches!(roster.invite("   "), Err(GroupError::InvalidEmail { .. })));
        assert!(roster.invitations().is_empty());

        roster.invite("  yamada@example.com ").unwrap();
        assert_eq!(roster.invitations(), ["yamada@example.com"]);
    }

    #[test]
    fn test_invite_rejects_duplicates() {
        let mut roster = trip_group();
        assert!(matches!(
            roster.invite("SATO@example.com"),
            Err(GroupError::AlreadyMember { .. })
        ));

        roster.invite("yamada@example.com").unwrap();
        assert!(matches!(
            roster.invite("yamada@example.com"),
            Err(GroupError::AlreadyInvited { .. })
        ));
    }

    #[test]
    fn test_accept_requires_invitation() {
        let mut roster = trip_group();
        assert!(matches!(
            roster.accept_invitation("stranger@example.com", "X"),
            Err(GroupError::NotInvited { .. })
        ));

        roster.invite("yamada@example.com").unwrap();
        let member = roster
            .accept_invitation("yamada@example.com", "Yamada")
            .unwrap();
        assert_eq!(member.role, MemberRole::Member);
        assert!(roster.invitations().is_empty());
        assert_eq!(roster.members().len(), 3);
    }

    #[test]
    fn test_change_role() {
        let mut roster = trip_group();
        assert!(roster.change_role("sato@example.com", MemberRole::Admin).unwrap());
        assert_eq!(roster.member("sato@example.com").unwrap().role, MemberRole::Admin);
        assert!(!roster.change_role("sato@example.com", MemberRole::Admin).unwrap());

        let id = roster.member("sato@example.com").unwrap().id.clone();
        assert!(roster.change_role(&id, MemberRole::Member).unwrap());
    }

    #[test]
    fn test_owner_is_locked() {
        let mut roster = trip_group();
        assert!(matches!(
            roster.change_role("tanaka@example.com", MemberRole::Member),
            Err(GroupError::OwnerLocked { .. })
        ));
        assert!(matches!(
            roster.request_removal("tanaka@example.com"),
            Err(GroupError::OwnerLocked { .. })
        ));
        assert!(matches!(
            roster.change_role("sato@example.com", MemberRole::Owner),
            Err(GroupError::OwnerRoleNotAssignable)
        ));
    }

    #[test]
    fn test_removal_needs_confirmation() {
        let mut roster = trip_group();
        roster.request_removal("sato@example.com").unwrap();
        assert_eq!(roster.members().len(), 2);
        assert_eq!(roster.pending_removal().unwrap().name, "Sato");

        let removed = roster.confirm_removal().unwrap();
        assert_eq!(removed.email, "sato@example.com");
        assert_eq!(roster.members().len(), 1);
        assert!(roster.pending_removal().is_none());
        assert!(matches!(
            roster.confirm_removal(),
            Err(GroupError::NoPendingRemoval)
        ));
    }

    #[test]
    fn test_cancel_removal_keeps_member() {
        let mut roster = trip_group();
        roster.request_removal("sato@example.com").unwrap();
        assert!(roster.cancel_removal());
        assert!(!roster.cancel_removal());
        assert_eq!(roster.members().len(), 2);
    }

    #[test]
    fn test_unknown_member() {
        let mut roster = trip_group();
        assert!(matches!(
            roster.request_removal("ghost@example.com"),
            Err(GroupError::MemberNotFound { .. })
        ));
    }

    #[test]
    fn test_settings() {
        let mut roster = trip_group();
        assert!(matches!(roster.rename("  "), Err(GroupError::EmptyGroupName)));
        roster.rename("Okinawa trip").unwrap();
        roster.set_description("Four days in Naha");
        roster.set_toggle(GroupToggle::Public, true);
        roster.set_toggle(GroupToggle::MemberInvites, false);

        let settings = roster.settings();
        assert_eq!(settings.name, "Okinawa trip");
        assert_eq!(settings.description, "Four days in Naha");
        assert!(settings.is_public);
        assert!(!settings.allow_member_invites);
    }

    #[test]
    fn test_single_owner_and_invite_link() {
        let mut roster = trip_group();
        assert!(!roster.add_owner("Other", "other@example.com"));
        assert_eq!(roster.owner().unwrap().name, "Tanaka");
        assert_eq!(roster.invite_link(), "https://chatavel.app/join/okinawa-2025");
    }
}
