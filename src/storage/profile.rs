//! User profile keys

use crate::storage::codec::{CodecError, read_record, write_record};
use crate::storage::kv::KeyValueStore;

pub const USER_NAME_KEY: &str = "userName";
pub const AVATAR_KEY: &str = "profileImage";

/// Name shown when none has been set
pub const DEFAULT_USER_NAME: &str = "User";

/// Display name and avatar reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user_name: String,
    pub avatar: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            user_name: DEFAULT_USER_NAME.to_string(),
            avatar: None,
        }
    }
}

impl Profile {
    /// Load the profile; unreadable values fall back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        let user_name = read_record::<String>(store, USER_NAME_KEY)
            .unwrap_or_else(|e| {
                log::warn!("Failed to read user name: {}", e);
                None
            })
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_NAME.to_string());

        let avatar = read_record::<String>(store, AVATAR_KEY)
            .unwrap_or_else(|e| {
                log::warn!("Failed to read avatar: {}", e);
                None
            })
            .filter(|avatar| !avatar.is_empty());

        Profile { user_name, avatar }
    }

    /// Store a new display name; blank names are ignored
    pub fn set_user_name(
        &mut self,
        store: &mut impl KeyValueStore,
        name: &str,
    ) -> Result<bool, CodecError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }
        write_record(store, USER_NAME_KEY, name)?;
        self.user_name = name.to_string();
        Ok(true)
    }

    pub fn set_avatar(
        &mut self,
        store: &mut impl KeyValueStore,
        avatar: &str,
    ) -> Result<(), CodecError> {
        write_record(store, AVATAR_KEY, avatar)?;
        self.avatar = Some(avatar.to_string()).filter(|a| !a.is_empty());
        Ok(())
    }

    /// Up to two uppercase initials of the display name
    pub fn initials(&self) -> String {
        self.user_name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}
