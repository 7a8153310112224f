//! Channel management: founding, staffing, and deletion.
//!
//! Role changes touch two documents (the channel's member lists and the
//! user's membership lists). Writes go channel first, then user, with a
//! compensating write on the channel if the user side fails, so the pair
//! converges instead of drifting.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};
use videx_model::{
    AccountPublic, Channel, ChannelID, ChannelRole, Handle, SentInvites, UserID,
};

use crate::api_types::{CreateChannelRequest, RoleRequest, UpdateChannelRequest};
use crate::error::{Error, Result};
use crate::rbac::{Action, Authorizer};
use crate::services::{forbidden, validate_display_name};
use crate::store::AccountStore;

/// Channel lifecycle and role management.
pub struct ChannelService {
    accounts: Arc<dyn AccountStore>,
    authorizer: Authorizer,
}

impl fmt::Debug for ChannelService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelService")
            .field("accounts", &Arc::strong_count(&self.accounts))
            .finish()
    }
}

impl ChannelService {
    /// A channel service with the standard staff grants.
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        ChannelService {
            accounts,
            authorizer: Authorizer::standard(),
        }
    }

    /// Swaps in a custom grant table.
    pub fn with_authorizer(mut self, authorizer: Authorizer) -> Self {
        self.authorizer = authorizer;
        self
    }

    async fn require_channel(&self, id: &ChannelID) -> Result<Channel> {
        self.accounts
            .channel(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("channel {id}")))
    }

    fn authorize(&self, actor: &UserID, channel: &Channel, action: Action) -> Result<()> {
        if self.authorizer.allowed(actor, channel, action) {
            Ok(())
        } else {
            Err(forbidden(action))
        }
    }

    /// Founds a channel with the acting user as its sole owner.
    pub async fn create(&self, actor: UserID, body: CreateChannelRequest) -> Result<Channel> {
        let mut founder = self.accounts.user(&actor).await?.ok_or(Error::Unauthorized)?;
        let handle = Handle::new(&body.handle)?;
        validate_display_name(&body.display_name)?;

        let mut public = AccountPublic::new(handle, body.display_name);
        public.avatar = body.avatar;
        let channel = Channel::new(ChannelID::new(), public, actor, Utc::now());

        self.accounts.insert_channel(channel.clone()).await?;

        founder.record_membership(channel.id, ChannelRole::Owner);
        if let Err(err) = self.accounts.update_user(founder).await {
            warn!(channel = %channel.id, error = %err, "rolling back channel creation");
            if let Err(undo) = self.accounts.delete_channel(&channel.id).await {
                error!(channel = %channel.id, error = %undo, "channel creation rollback failed");
            }
            return Err(err.into());
        }

        info!(channel = %channel.id, founder = %actor, handle = %channel.public.handle, "founded channel");
        Ok(channel)
    }

    /// Updates a channel's public face or settings.
    pub async fn update(
        &self,
        actor: UserID,
        id: ChannelID,
        body: UpdateChannelRequest,
    ) -> Result<Channel> {
        let mut channel = self.require_channel(&id).await?;
        self.authorize(&actor, &channel, Action::UpdateChannel)?;

        if let Some(handle) = body.handle {
            channel.public.handle = Handle::new(handle)?;
        }
        if let Some(display_name) = body.display_name {
            validate_display_name(&display_name)?;
            channel.public.display_name = display_name;
        }
        if let Some(avatar) = body.avatar {
            channel.public.avatar = Some(avatar);
        }
        if let Some(settings) = body.settings {
            channel.private.settings = settings;
        }

        self.accounts.update_channel(channel.clone()).await?;
        debug!(channel = %id, "updated channel");
        Ok(channel)
    }

    /// Deletes a channel. Owners only.
    ///
    /// Every member and invitee loses their link to the channel; the
    /// channel's content is left behind and drops out of listings once its
    /// owning channel no longer resolves.
    pub async fn delete(&self, actor: UserID, id: ChannelID) -> Result<()> {
        let channel = self.require_channel(&id).await?;
        self.authorize(&actor, &channel, Action::DeleteChannel)?;

        let mut affected: Vec<UserID> = Vec::new();
        for role in ChannelRole::ALL {
            for user in channel.members(role) {
                if !affected.contains(user) {
                    affected.push(*user);
                }
            }
            for user in channel.private.invites.list(role) {
                if !affected.contains(user) {
                    affected.push(*user);
                }
            }
        }

        for user_id in &affected {
            let Some(mut user) = self.accounts.user(user_id).await? else {
                continue;
            };
            user.revoke_channel(&id);
            self.accounts.update_user(user).await?;
        }

        self.accounts.delete_channel(&id).await?;
        info!(channel = %id, members = affected.len(), "deleted channel");
        Ok(())
    }

    /// The channel's pending invitations, visible to role managers.
    pub async fn invites(&self, actor: UserID, id: ChannelID) -> Result<SentInvites> {
        let channel = self.require_channel(&id).await?;
        self.authorize(&actor, &channel, Action::ManageRoles)?;
        Ok(channel.private.invites)
    }

    /// Invites a user into a role. Re-inviting an already pending or
    /// already holding user is a no-op.
    pub async fn invite(&self, actor: UserID, id: ChannelID, request: RoleRequest) -> Result<()> {
        let mut channel = self.require_channel(&id).await?;
        self.authorize(&actor, &channel, Action::ManageRoles)?;

        let mut user = self
            .accounts
            .user(&request.user)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user {}", request.user)))?;

        if !channel.record_invite(request.user, request.role) {
            debug!(channel = %id, user = %request.user, role = %request.role, "invite already pending or role already held");
            return Ok(());
        }
        user.record_invite(id, request.role);

        self.accounts.update_channel(channel).await?;
        if let Err(err) = self.accounts.update_user(user).await {
            warn!(channel = %id, user = %request.user, error = %err, "compensating failed invite");
            let mut fresh = self.require_channel(&id).await?;
            fresh.withdraw_invite(&request.user, request.role);
            if let Err(undo) = self.accounts.update_channel(fresh).await {
                error!(channel = %id, error = %undo, "invite compensation failed");
            }
            return Err(err.into());
        }

        info!(channel = %id, user = %request.user, role = %request.role, "sent invite");
        Ok(())
    }

    /// Withdraws a pending invitation from both sides. No-op when nothing
    /// was pending.
    pub async fn withdraw_invite(
        &self,
        actor: UserID,
        id: ChannelID,
        request: RoleRequest,
    ) -> Result<()> {
        let mut channel = self.require_channel(&id).await?;
        self.authorize(&actor, &channel, Action::ManageRoles)?;

        if channel.withdraw_invite(&request.user, request.role) {
            self.accounts.update_channel(channel).await?;
        }
        if let Some(mut user) = self.accounts.user(&request.user).await? {
            if user.private.invites.remove(request.role, &id) {
                self.accounts.update_user(user).await?;
            }
        }
        debug!(channel = %id, user = %request.user, role = %request.role, "withdrew invite");
        Ok(())
    }

    /// Accepts a pending invitation as the acting user, granting the role
    /// on both documents. Accepting an invite that no longer exists is a
    /// no-op, so retries and racing withdrawals stay harmless.
    pub async fn accept_invite(
        &self,
        actor: UserID,
        id: ChannelID,
        role: ChannelRole,
    ) -> Result<()> {
        let mut channel = self.require_channel(&id).await?;
        let mut user = self.accounts.user(&actor).await?.ok_or(Error::Unauthorized)?;

        if !channel.accept_invite(actor, role) {
            // Nothing pending on the channel side. Clear a stale mirror on
            // the user document so the pair converges.
            if user.private.invites.remove(role, &id) {
                self.accounts.update_user(user).await?;
            }
            debug!(channel = %id, user = %actor, role = %role, "no pending invite to accept");
            return Ok(());
        }
        if !user.accept_invite(id, role) {
            // The user document lost the invite; still grant the membership
            // so the two sides converge.
            user.record_membership(id, role);
        }

        self.accounts.update_channel(channel).await?;
        if let Err(err) = self.accounts.update_user(user).await {
            warn!(channel = %id, user = %actor, error = %err, "compensating failed invite acceptance");
            if let Ok(mut fresh) = self.require_channel(&id).await {
                // The inviter's owner set is unchanged, so this cannot trip
                // the last-owner guard.
                let _ = fresh.remove_member(&actor, role);
                fresh.record_invite(actor, role);
                if let Err(undo) = self.accounts.update_channel(fresh).await {
                    error!(channel = %id, error = %undo, "acceptance compensation failed");
                }
            }
            return Err(err.into());
        }

        info!(channel = %id, user = %actor, role = %role, "accepted invite");
        Ok(())
    }

    /// Revokes one role from a member. Role managers can remove anyone;
    /// members can always remove themselves. Removing the last owner is
    /// refused.
    pub async fn remove_member(
        &self,
        actor: UserID,
        id: ChannelID,
        request: RoleRequest,
    ) -> Result<()> {
        let mut channel = self.require_channel(&id).await?;
        if actor != request.user {
            self.authorize(&actor, &channel, Action::ManageRoles)?;
        }

        if !channel.remove_member(&request.user, request.role)? {
            return Ok(());
        }

        self.accounts.update_channel(channel).await?;
        if let Some(mut user) = self.accounts.user(&request.user).await? {
            user.remove_membership(&id, request.role);
            if let Err(err) = self.accounts.update_user(user).await {
                warn!(channel = %id, user = %request.user, error = %err, "compensating failed member removal");
                if let Ok(mut fresh) = self.require_channel(&id).await {
                    fresh.add_member(request.user, request.role);
                    if let Err(undo) = self.accounts.update_channel(fresh).await {
                        error!(channel = %id, error = %undo, "member removal compensation failed");
                    }
                }
                return Err(err.into());
            }
        }

        info!(channel = %id, user = %request.user, role = %request.role, "removed member");
        Ok(())
    }
}
