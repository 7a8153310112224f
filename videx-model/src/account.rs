use chrono::{DateTime, Utc};

use crate::email::EmailAddress;
use crate::error::ModelError;
use crate::handle::Handle;
use crate::ids::{ChannelID, UserID};
use crate::invites::{ChannelRole, ReceivedInvites, SentInvites};
use crate::media::MediaHandle;

/// Publicly visible face shared by users and channels.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccountPublic {
    pub handle: Handle,
    pub display_name: String,
    pub avatar: Option<MediaHandle>,
    pub verified: bool,
    pub trusted: bool,
    pub banned: bool,
}

impl AccountPublic {
    pub fn new(handle: Handle, display_name: impl Into<String>) -> Self {
        Self {
            handle,
            display_name: display_name.into(),
            avatar: None,
            verified: false,
            trusted: false,
            banned: false,
        }
    }
}

/// Per-user preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserSettings {
    pub autoplay: bool,
    pub locale: String,
    pub email_notifications: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            autoplay: true,
            locale: "en".to_string(),
            email_notifications: true,
        }
    }
}

/// Per-channel preferences applied to new content.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelSettings {
    pub locale: String,
    pub comments_enabled: bool,
    pub default_unlisted: bool,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            comments_enabled: true,
            default_unlisted: false,
        }
    }
}

/// User fields that never leave the owning account's own sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserPrivate {
    pub email: EmailAddress,
    pub settings: UserSettings,
    pub invites: ReceivedInvites,
}

/// A person's account, with one membership list per channel role.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct User {
    pub id: UserID,
    pub public: AccountPublic,
    pub private: UserPrivate,
    /// Channels this user owns.
    pub channels: Vec<ChannelID>,
    pub collaborations: Vec<ChannelID>,
    pub contributions: Vec<ChannelID>,
    pub administering: Vec<ChannelID>,
    pub moderating: Vec<ChannelID>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        id: UserID,
        public: AccountPublic,
        email: EmailAddress,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            public,
            private: UserPrivate {
                email,
                settings: UserSettings::default(),
                invites: ReceivedInvites::default(),
            },
            channels: Vec::new(),
            collaborations: Vec::new(),
            contributions: Vec::new(),
            administering: Vec::new(),
            moderating: Vec::new(),
            created_at,
        }
    }

    pub fn memberships(&self, role: ChannelRole) -> &Vec<ChannelID> {
        match role {
            ChannelRole::Owner => &self.channels,
            ChannelRole::Collaborator => &self.collaborations,
            ChannelRole::Contributor => &self.contributions,
            ChannelRole::Admin => &self.administering,
            ChannelRole::Moderator => &self.moderating,
        }
    }

    fn memberships_mut(&mut self, role: ChannelRole) -> &mut Vec<ChannelID> {
        match role {
            ChannelRole::Owner => &mut self.channels,
            ChannelRole::Collaborator => &mut self.collaborations,
            ChannelRole::Contributor => &mut self.contributions,
            ChannelRole::Admin => &mut self.administering,
            ChannelRole::Moderator => &mut self.moderating,
        }
    }

    pub fn owns(&self, channel: &ChannelID) -> bool {
        self.channels.contains(channel)
    }

    /// Note an incoming invitation. Returns false when one is already
    /// pending.
    pub fn record_invite(&mut self, channel: ChannelID, role: ChannelRole) -> bool {
        self.private.invites.add(role, channel)
    }

    /// Accept a pending invitation, moving the channel into the matching
    /// membership list. Accepting an invitation that is not pending is a
    /// no-op and returns false.
    pub fn accept_invite(&mut self, channel: ChannelID, role: ChannelRole) -> bool {
        if !self.private.invites.remove(role, &channel) {
            return false;
        }
        let memberships = self.memberships_mut(role);
        if !memberships.contains(&channel) {
            memberships.push(channel);
        }
        true
    }

    /// Record a granted membership directly (the accept path on the channel
    /// document already removed the pending invite there).
    pub fn record_membership(&mut self, channel: ChannelID, role: ChannelRole) -> bool {
        let memberships = self.memberships_mut(role);
        if memberships.contains(&channel) {
            return false;
        }
        memberships.push(channel);
        true
    }

    /// Drop a single role's membership. Returns false when it was not held.
    pub fn remove_membership(&mut self, channel: &ChannelID, role: ChannelRole) -> bool {
        let memberships = self.memberships_mut(role);
        let before = memberships.len();
        memberships.retain(|c| c != channel);
        memberships.len() != before
    }

    /// Strip every membership of and pending invite from the given channel.
    /// Used when a channel is deleted.
    pub fn revoke_channel(&mut self, channel: &ChannelID) {
        for role in ChannelRole::ALL {
            self.memberships_mut(role).retain(|c| c != channel);
            self.private.invites.remove(role, channel);
        }
    }
}

/// Channel fields visible to channel staff only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelPrivate {
    pub settings: ChannelSettings,
    pub invites: SentInvites,
}

/// A channel account, with one membership list per role.
///
/// Invariant: `owners` is never empty. Every mutation path that could drain
/// it answers [`ModelError::LastOwner`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel {
    pub id: ChannelID,
    pub public: AccountPublic,
    pub private: ChannelPrivate,
    pub owners: Vec<UserID>,
    pub collaborators: Vec<UserID>,
    pub contributors: Vec<UserID>,
    pub admins: Vec<UserID>,
    pub moderators: Vec<UserID>,
    pub created_at: DateTime<Utc>,
}

impl Channel {
    /// A channel is born with its founder as sole owner, so the owner
    /// invariant holds from the first write.
    pub fn new(
        id: ChannelID,
        public: AccountPublic,
        founder: UserID,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            public,
            private: ChannelPrivate::default(),
            owners: vec![founder],
            collaborators: Vec::new(),
            contributors: Vec::new(),
            admins: Vec::new(),
            moderators: Vec::new(),
            created_at,
        }
    }

    pub fn members(&self, role: ChannelRole) -> &Vec<UserID> {
        match role {
            ChannelRole::Owner => &self.owners,
            ChannelRole::Collaborator => &self.collaborators,
            ChannelRole::Contributor => &self.contributors,
            ChannelRole::Admin => &self.admins,
            ChannelRole::Moderator => &self.moderators,
        }
    }

    fn members_mut(&mut self, role: ChannelRole) -> &mut Vec<UserID> {
        match role {
            ChannelRole::Owner => &mut self.owners,
            ChannelRole::Collaborator => &mut self.collaborators,
            ChannelRole::Contributor => &mut self.contributors,
            ChannelRole::Admin => &mut self.admins,
            ChannelRole::Moderator => &mut self.moderators,
        }
    }

    pub fn is_owner(&self, user: &UserID) -> bool {
        self.owners.contains(user)
    }

    /// Highest role the user holds, in [`ChannelRole::ALL`] precedence order.
    pub fn role_of(&self, user: &UserID) -> Option<ChannelRole> {
        ChannelRole::ALL
            .into_iter()
            .find(|role| self.members(*role).contains(user))
    }

    /// Note an outgoing invitation. Returns false when one is already
    /// pending or the user already holds the role.
    pub fn record_invite(&mut self, user: UserID, role: ChannelRole) -> bool {
        if self.members(role).contains(&user) {
            return false;
        }
        self.private.invites.add(role, user)
    }

    pub fn withdraw_invite(&mut self, user: &UserID, role: ChannelRole) -> bool {
        self.private.invites.remove(role, user)
    }

    /// Accept side of the invitation on the channel document: drop the
    /// pending invite and grant the membership. No-op (false) when nothing
    /// was pending.
    pub fn accept_invite(&mut self, user: UserID, role: ChannelRole) -> bool {
        if !self.private.invites.remove(role, &user) {
            return false;
        }
        let members = self.members_mut(role);
        if !members.contains(&user) {
            members.push(user);
        }
        true
    }

    /// Grant a membership directly. Returns false when already held.
    pub fn add_member(&mut self, user: UserID, role: ChannelRole) -> bool {
        let members = self.members_mut(role);
        if members.contains(&user) {
            return false;
        }
        members.push(user);
        true
    }

    /// Revoke one role. Removing the last owner is rejected.
    pub fn remove_member(&mut self, user: &UserID, role: ChannelRole) -> Result<bool, ModelError> {
        if role == ChannelRole::Owner && self.owners == [*user] {
            return Err(ModelError::LastOwner);
        }
        let members = self.members_mut(role);
        let before = members.len();
        members.retain(|u| u != user);
        Ok(members.len() != before)
    }

    /// Strip the user from every role and pending invite. Used when a user
    /// account is deleted; rejected if they are the sole owner.
    pub fn remove_everywhere(&mut self, user: &UserID) -> Result<bool, ModelError> {
        if self.owners == [*user] {
            return Err(ModelError::LastOwner);
        }
        let mut removed = false;
        for role in ChannelRole::ALL {
            removed |= self.remove_member(user, role)?;
            removed |= self.private.invites.remove(role, user);
        }
        Ok(removed)
    }
}
