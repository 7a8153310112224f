use std::fmt::Display;
use std::fmt::Formatter;

use crate::ids::{ChannelID, UserID};

/// Roles an account can hold on a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChannelRole {
    Owner,
    Collaborator,
    Contributor,
    Admin,
    Moderator,
}

impl ChannelRole {
    pub const ALL: [ChannelRole; 5] = [
        ChannelRole::Owner,
        ChannelRole::Collaborator,
        ChannelRole::Contributor,
        ChannelRole::Admin,
        ChannelRole::Moderator,
    ];
}

impl Display for ChannelRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelRole::Owner => write!(f, "owner"),
            ChannelRole::Collaborator => write!(f, "collaborator"),
            ChannelRole::Contributor => write!(f, "contributor"),
            ChannelRole::Admin => write!(f, "admin"),
            ChannelRole::Moderator => write!(f, "moderator"),
        }
    }
}

/// Pending invitations, one list per role.
///
/// The channel keeps the invited user ids ([`SentInvites`]), the user keeps
/// the inviting channel ids ([`ReceivedInvites`]); an accepted invite leaves
/// both lists and enters the matching membership lists.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InviteLists<T> {
    pub owners: Vec<T>,
    pub collaborators: Vec<T>,
    pub contributors: Vec<T>,
    pub admins: Vec<T>,
    pub moderators: Vec<T>,
}

impl<T> Default for InviteLists<T> {
    fn default() -> Self {
        Self {
            owners: Vec::new(),
            collaborators: Vec::new(),
            contributors: Vec::new(),
            admins: Vec::new(),
            moderators: Vec::new(),
        }
    }
}

impl<T: PartialEq> InviteLists<T> {
    pub fn list(&self, role: ChannelRole) -> &Vec<T> {
        match role {
            ChannelRole::Owner => &self.owners,
            ChannelRole::Collaborator => &self.collaborators,
            ChannelRole::Contributor => &self.contributors,
            ChannelRole::Admin => &self.admins,
            ChannelRole::Moderator => &self.moderators,
        }
    }

    pub fn list_mut(&mut self, role: ChannelRole) -> &mut Vec<T> {
        match role {
            ChannelRole::Owner => &mut self.owners,
            ChannelRole::Collaborator => &mut self.collaborators,
            ChannelRole::Contributor => &mut self.contributors,
            ChannelRole::Admin => &mut self.admins,
            ChannelRole::Moderator => &mut self.moderators,
        }
    }

    pub fn contains(&self, role: ChannelRole, value: &T) -> bool {
        self.list(role).contains(value)
    }

    /// Record an invitation. Returns false when one is already pending.
    pub fn add(&mut self, role: ChannelRole, value: T) -> bool {
        if self.contains(role, &value) {
            return false;
        }
        self.list_mut(role).push(value);
        true
    }

    /// Withdraw an invitation. Returns false when none was pending.
    pub fn remove(&mut self, role: ChannelRole, value: &T) -> bool {
        let list = self.list_mut(role);
        let before = list.len();
        list.retain(|v| v != value);
        list.len() != before
    }
}

/// Invitations a channel has extended, keyed by the invited user.
pub type SentInvites = InviteLists<UserID>;

/// Invitations a user has received, keyed by the inviting channel.
pub type ReceivedInvites = InviteLists<ChannelID>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_remove_round_trip() {
        let mut invites = SentInvites::default();
        let user = UserID::new();

        assert!(invites.add(ChannelRole::Moderator, user));
        assert!(!invites.add(ChannelRole::Moderator, user));
        assert!(invites.contains(ChannelRole::Moderator, &user));

        assert!(invites.remove(ChannelRole::Moderator, &user));
        assert!(!invites.remove(ChannelRole::Moderator, &user));
    }

    #[test]
    fn roles_are_tracked_independently() {
        let mut invites = ReceivedInvites::default();
        let channel = ChannelID::new();

        invites.add(ChannelRole::Owner, channel);
        assert!(invites.contains(ChannelRole::Owner, &channel));
        assert!(!invites.contains(ChannelRole::Admin, &channel));
    }
}
