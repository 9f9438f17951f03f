use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Session file name in the data directory
const SESSION_FILE: &str = "session.json";

/// The persisted session: bearer token plus the ids needed by every page.
/// Created at login, destroyed at logout. The token's lifetime is owned by
/// the backend - an expired token shows up as a 401, which routes back to
/// the login form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub user_id: String,
    pub email: String,
}

pub struct Session {
    data_dir: PathBuf,
    pub data: Option<SessionData>,
}

impl Session {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            data: None,
        }
    }

    /// Load session from disk. Returns whether one was found.
    pub fn load(&mut self) -> Result<bool> {
        let path = self.session_path();
        if path.exists() {
            let contents =
                std::fs::read_to_string(&path).context("Failed to read session file")?;
            let data: SessionData =
                serde_json::from_str(&contents).context("Failed to parse session file")?;
            self.data = Some(data);
            return Ok(true);
        }
        Ok(false)
    }

    /// Save session to disk.
    pub fn save(&self) -> Result<()> {
        if let Some(ref data) = self.data {
            let path = self.session_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = serde_json::to_string_pretty(data)?;
            std::fs::write(path, contents)?;
        }
        Ok(())
    }

    /// Clear session data in memory and on disk (logout).
    pub fn clear(&mut self) -> Result<()> {
        self.data = None;
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Replace the session with freshly issued data.
    pub fn update(&mut self, data: SessionData) {
        self.data = Some(data);
    }

    pub fn token(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.token.as_str())
    }

    pub fn user_id(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.user_id.as_str())
    }

    pub fn is_valid(&self) -> bool {
        self.data.is_some()
    }

    fn session_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_disk() {
        let dir = std::env::temp_dir().join(format!("foodcourt-session-{}", std::process::id()));

        let mut session = Session::new(dir.clone());
        session.update(SessionData {
            token: "tok".to_string(),
            user_id: "u-1".to_string(),
            email: "sam@example.com".to_string(),
        });
        session.save().unwrap();

        let mut restored = Session::new(dir.clone());
        assert!(restored.load().unwrap());
        assert_eq!(restored.token(), Some("tok"));
        assert_eq!(restored.user_id(), Some("u-1"));

        restored.clear().unwrap();
        assert!(!restored.is_valid());

        let mut gone = Session::new(dir.clone());
        assert!(!gone.load().unwrap());

        let _ = std::fs::remove_dir_all(dir);
    }
}
