//! Role-based permission checks for channel operations
//!
//! Channels carry their own membership lists, so authorization is resolved
//! against the channel document itself rather than a global role store.
//! Every check walks the same ladder:
//!
//! 1. **Self rule**: a user may always manage their own account.
//! 2. **Owner rule**: channel owners may do anything to their channel and
//!    its content.
//! 3. **Role table**: other members are allowed exactly what the table
//!    grants their highest role.
//! 4. **Deny**: everyone else is refused.
//!
//! The table is explicit about every role/action pair it grants; anything
//! absent is denied, so adding a new action defaults closed.
//!
//! ## Example
//!
//! ```
//! use videx_core::rbac::{Action, Authorizer};
//! use videx_model::chrono::Utc;
//! use videx_model::{AccountPublic, Channel, ChannelID, Handle, UserID};
//!
//! let founder = UserID::new();
//! let channel = Channel::new(
//!     ChannelID::new(),
//!     AccountPublic::new(Handle::new("making-noise").unwrap(), "Making Noise"),
//!     founder,
//!     Utc::now(),
//! );
//!
//! let auth = Authorizer::standard();
//! assert!(auth.allowed(&founder, &channel, Action::DeleteChannel));
//! assert!(!auth.allowed(&UserID::new(), &channel, Action::CreateContent));
//! ```

use std::collections::HashSet;

use videx_model::{Channel, ChannelRole, UserID};

/// Actions a channel member can attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Edit the channel's public face or settings.
    UpdateChannel,
    /// Delete the channel outright.
    DeleteChannel,
    /// Invite, withdraw, or remove members.
    ManageRoles,
    /// Upload videos or create shows and playlists under the channel.
    CreateContent,
    /// Edit existing content metadata or collection structure.
    UpdateContent,
    /// Delete content.
    DeleteContent,
    /// Promote content.
    Promote,
    /// Moderation actions on the channel's surfaces.
    Moderate,
}

impl Action {
    /// Every known action.
    pub const ALL: [Action; 8] = [
        Action::UpdateChannel,
        Action::DeleteChannel,
        Action::ManageRoles,
        Action::CreateContent,
        Action::UpdateContent,
        Action::DeleteContent,
        Action::Promote,
        Action::Moderate,
    ];

    /// Short name used in denial messages and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::UpdateChannel => "update channel",
            Action::DeleteChannel => "delete channel",
            Action::ManageRoles => "manage roles",
            Action::CreateContent => "create content",
            Action::UpdateContent => "update content",
            Action::DeleteContent => "delete content",
            Action::Promote => "promote",
            Action::Moderate => "moderate",
        }
    }
}

/// Grants per non-owner role. Owners never consult the table.
#[derive(Debug, Clone, Default)]
pub struct RoleTable {
    grants: HashSet<(ChannelRole, Action)>,
}

impl RoleTable {
    /// A table that grants nothing: every non-owner is denied everything.
    pub fn owners_only() -> Self {
        RoleTable::default()
    }

    /// The default grants for channel staff.
    pub fn standard() -> Self {
        RoleTable::default()
            .allow(ChannelRole::Collaborator, Action::CreateContent)
            .allow(ChannelRole::Collaborator, Action::UpdateContent)
            .allow(ChannelRole::Contributor, Action::CreateContent)
            .allow(ChannelRole::Admin, Action::UpdateChannel)
            .allow(ChannelRole::Admin, Action::ManageRoles)
            .allow(ChannelRole::Admin, Action::CreateContent)
            .allow(ChannelRole::Admin, Action::UpdateContent)
            .allow(ChannelRole::Admin, Action::DeleteContent)
            .allow(ChannelRole::Admin, Action::Promote)
            .allow(ChannelRole::Admin, Action::Moderate)
            .allow(ChannelRole::Moderator, Action::Moderate)
    }

    /// Grants one role/action pair.
    pub fn allow(mut self, role: ChannelRole, action: Action) -> Self {
        self.grants.insert((role, action));
        self
    }

    /// Whether the table grants this role the action.
    pub fn allows(&self, role: ChannelRole, action: Action) -> bool {
        self.grants.contains(&(role, action))
    }
}

/// Resolves whether an acting user may perform an action.
#[derive(Debug, Clone)]
pub struct Authorizer {
    table: RoleTable,
}

impl Authorizer {
    /// An authorizer over a custom role table.
    pub fn new(table: RoleTable) -> Self {
        Authorizer { table }
    }

    /// Owners only: no delegated grants at all.
    pub fn owners_only() -> Self {
        Authorizer::new(RoleTable::owners_only())
    }

    /// The standard staff grants.
    pub fn standard() -> Self {
        Authorizer::new(RoleTable::standard())
    }

    /// Whether `actor` may perform `action` on `channel`.
    pub fn allowed(&self, actor: &UserID, channel: &Channel, action: Action) -> bool {
        if channel.is_owner(actor) {
            return true;
        }
        match channel.role_of(actor) {
            Some(role) => self.table.allows(role, action),
            None => false,
        }
    }

    /// Whether `actor` may manage the account `subject`. Accounts are only
    /// ever managed by themselves.
    pub fn allowed_on_user(&self, actor: &UserID, subject: &UserID) -> bool {
        actor == subject
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use videx_model::chrono::Utc;
    use videx_model::{AccountPublic, ChannelID, Handle};

    fn channel_with_founder() -> (Channel, UserID) {
        let founder = UserID::new();
        let channel = Channel::new(
            ChannelID::new(),
            AccountPublic::new(Handle::new("garage-lab").unwrap(), "Garage Lab"),
            founder,
            Utc::now(),
        );
        (channel, founder)
    }

    #[test]
    fn owners_pass_every_check() {
        let (channel, founder) = channel_with_founder();
        let auth = Authorizer::owners_only();
        for action in Action::ALL {
            assert!(auth.allowed(&founder, &channel, action), "{}", action.as_str());
        }
    }

    #[test]
    fn owners_only_denies_every_other_role() {
        let (mut channel, _) = channel_with_founder();
        let admin = UserID::new();
        channel.add_member(admin, ChannelRole::Admin);

        let auth = Authorizer::owners_only();
        for action in Action::ALL {
            assert!(!auth.allowed(&admin, &channel, action), "{}", action.as_str());
        }
    }

    #[test]
    fn strangers_are_denied() {
        let (channel, _) = channel_with_founder();
        let stranger = UserID::new();
        assert!(!Authorizer::standard().allowed(&stranger, &channel, Action::Moderate));
    }

    #[test]
    fn standard_grants_follow_the_table() {
        let (mut channel, _) = channel_with_founder();
        let collaborator = UserID::new();
        let moderator = UserID::new();
        channel.add_member(collaborator, ChannelRole::Collaborator);
        channel.add_member(moderator, ChannelRole::Moderator);

        let auth = Authorizer::standard();
        assert!(auth.allowed(&collaborator, &channel, Action::CreateContent));
        assert!(!auth.allowed(&collaborator, &channel, Action::DeleteChannel));
        assert!(!auth.allowed(&collaborator, &channel, Action::ManageRoles));
        assert!(auth.allowed(&moderator, &channel, Action::Moderate));
        assert!(!auth.allowed(&moderator, &channel, Action::CreateContent));
    }

    #[test]
    fn nobody_but_owners_deletes_a_channel() {
        let (mut channel, _) = channel_with_founder();
        let admin = UserID::new();
        channel.add_member(admin, ChannelRole::Admin);
        assert!(!Authorizer::standard().allowed(&admin, &channel, Action::DeleteChannel));
    }

    #[test]
    fn accounts_manage_only_themselves() {
        let auth = Authorizer::standard();
        let alice = UserID::new();
        let bob = UserID::new();
        assert!(auth.allowed_on_user(&alice, &alice));
        assert!(!auth.allowed_on_user(&alice, &bob));
    }
}
