//! User account management.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use videx_model::{
    AccountPublic, ChannelID, ChannelRole, EmailAddress, Handle, ReceivedInvites, User, UserID,
};

use crate::api_types::{CreateUserRequest, UpdateUserRequest};
use crate::error::{Error, Result};
use crate::rbac::Authorizer;
use crate::services::validate_display_name;
use crate::store::AccountStore;

/// Registration, profile updates, and account deletion for users.
pub struct UserService {
    accounts: Arc<dyn AccountStore>,
    authorizer: Authorizer,
}

impl fmt::Debug for UserService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserService")
            .field("accounts", &Arc::strong_count(&self.accounts))
            .finish()
    }
}

impl UserService {
    /// A user service over the given account store.
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        UserService {
            accounts,
            authorizer: Authorizer::standard(),
        }
    }

    async fn require_user(&self, id: &UserID) -> Result<User> {
        self.accounts
            .user(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user {id}")))
    }

    fn own_account(&self, actor: &UserID, target: &UserID) -> Result<()> {
        if self.authorizer.allowed_on_user(actor, target) {
            Ok(())
        } else {
            Err(Error::Forbidden(
                "accounts are managed by their owner".to_string(),
            ))
        }
    }

    /// Registers a new user. The handle and email must both be free;
    /// a collision rejects the whole registration and stores nothing.
    pub async fn register(&self, body: CreateUserRequest) -> Result<User> {
        let handle = Handle::new(&body.handle)?;
        validate_display_name(&body.display_name)?;
        let email = EmailAddress::new(&body.email)?;

        let mut public = AccountPublic::new(handle, body.display_name);
        public.avatar = body.avatar;
        let user = User::new(UserID::new(), public, email, Utc::now());

        self.accounts.insert_user(user.clone()).await?;
        info!(user = %user.id, handle = %user.public.handle, "registered user");
        Ok(user)
    }

    /// Updates a user's own account. Handle and email changes go through
    /// the same uniqueness rules as registration.
    pub async fn update(
        &self,
        actor: UserID,
        target: UserID,
        body: UpdateUserRequest,
    ) -> Result<User> {
        self.own_account(&actor, &target)?;
        let mut user = self.require_user(&target).await?;

        if let Some(handle) = body.handle {
            user.public.handle = Handle::new(handle)?;
        }
        if let Some(display_name) = body.display_name {
            validate_display_name(&display_name)?;
            user.public.display_name = display_name;
        }
        if let Some(email) = body.email {
            user.private.email = EmailAddress::new(email)?;
        }
        if let Some(avatar) = body.avatar {
            user.public.avatar = Some(avatar);
        }
        if let Some(settings) = body.settings {
            user.private.settings = settings;
        }

        self.accounts.update_user(user.clone()).await?;
        debug!(user = %target, "updated user account");
        Ok(user)
    }

    /// The user's pending invitations, visible to the user alone.
    pub async fn invites(&self, actor: UserID, target: UserID) -> Result<ReceivedInvites> {
        self.own_account(&actor, &target)?;
        let user = self.require_user(&target).await?;
        Ok(user.private.invites)
    }

    /// Deletes a user account.
    ///
    /// Refused while the user is the sole owner of any channel; ownership
    /// must be handed over or the channel deleted first. Otherwise the user
    /// is stripped from every channel's membership and invite lists before
    /// the account record goes away.
    pub async fn delete(&self, actor: UserID, target: UserID) -> Result<()> {
        self.own_account(&actor, &target)?;
        let user = self.require_user(&target).await?;

        // Validate before mutating anything, so a refusal leaves the graph
        // untouched.
        for channel_id in &user.channels {
            if let Some(channel) = self.accounts.channel(channel_id).await? {
                if channel.owners == [target] {
                    return Err(Error::LastOwner);
                }
            }
        }

        let mut affected: Vec<ChannelID> = Vec::new();
        for role in ChannelRole::ALL {
            for id in user.memberships(role) {
                if !affected.contains(id) {
                    affected.push(*id);
                }
            }
            for id in user.private.invites.list(role) {
                if !affected.contains(id) {
                    affected.push(*id);
                }
            }
        }

        for channel_id in &affected {
            let Some(mut channel) = self.accounts.channel(channel_id).await? else {
                continue;
            };
            if channel.remove_everywhere(&target)? {
                self.accounts.update_channel(channel).await?;
            }
        }

        self.accounts.delete_user(&target).await?;
        info!(user = %target, channels = affected.len(), "deleted user account");
        Ok(())
    }
}
