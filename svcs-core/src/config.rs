use crate::error::{Error, Result};
use crate::storage::Storage;
use tracing::debug;

/// Username configuration, kept as a single line in `config.txt`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub username: Option<String>,
}

impl Config {
    pub fn load(storage: &Storage) -> Result<Self> {
        let username = storage
            .read_text(&storage.config_path())?
            .map(|text| text.trim().to_string())
            .filter(|name| !name.is_empty());

        Ok(Self { username })
    }

    /// Store `name` as the username and return the stored value.
    pub fn set_username(storage: &Storage, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyUsername);
        }

        storage
            .backend()
            .write(&storage.config_path(), name.as_bytes())?;
        debug!("Username set to {}", name);

        Ok(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> Storage {
        let storage = Storage::in_memory();
        storage.init().unwrap();
        storage
    }

    #[test]
    fn test_missing_config() {
        let storage = storage();
        assert_eq!(Config::load(&storage).unwrap().username, None);
    }

    #[test]
    fn test_set_and_load() {
        let storage = storage();
        let stored = Config::set_username(&storage, "  alice\n").unwrap();

        assert_eq!(stored, "alice");
        assert_eq!(
            Config::load(&storage).unwrap().username.as_deref(),
            Some("alice")
        );
    }

    #[test]
    fn test_overwrite() {
        let storage = storage();
        Config::set_username(&storage, "alice").unwrap();
        Config::set_username(&storage, "bob").unwrap();

        assert_eq!(
            Config::load(&storage).unwrap().username.as_deref(),
            Some("bob")
        );
    }

    #[test]
    fn test_empty_name_rejected() {
        let storage = storage();
        assert!(matches!(
            Config::set_username(&storage, "   "),
            Err(Error::EmptyUsername)
        ));
    }

    #[test]
    fn test_blank_file_means_unset() {
        let storage = storage();
        storage
            .backend()
            .write(&storage.config_path(), b"\n")
            .unwrap();

        assert_eq!(Config::load(&storage).unwrap().username, None);
    }
}
