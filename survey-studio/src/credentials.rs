use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use survey_form::{AccessToken, CredentialStore};

/// Access token persisted in a file readable only by the current user.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.survey-studio/token`
    pub fn default_location() -> anyhow::Result<Self> {
        Ok(Self::new(crate::config::config_dir()?.join("token")))
    }
}

impl CredentialStore for TokenFile {
    type Error = io::Error;

    fn get(&self) -> Option<AccessToken> {
        let token = fs::read_to_string(&self.path).ok()?;
        let token = token.trim();
        (!token.is_empty()).then(|| AccessToken::new(token))
    }

    fn set(&mut self, token: AccessToken) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        // `mode` only applies on creation; tighten a file left by an older run
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(token.expose().as_bytes())?;
        tracing::debug!(path = %self.path.display(), "stored access token");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("survey-studio-{}-{name}", std::process::id()))
            .join("token")
    }

    #[test]
    fn set_get_clear() {
        let mut store = TokenFile::new(scratch("roundtrip"));
        assert!(store.get().is_none());

        store.set(AccessToken::new("abc123")).unwrap();
        assert_eq!(store.get().unwrap().expose(), "abc123");
        assert!(store.is_authenticated());

        store.clear().unwrap();
        assert!(store.get().is_none());
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn token_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let path = scratch("mode");
        let mut store = TokenFile::new(&path);
        store.set(AccessToken::new("secret")).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn existing_token_file_is_tightened() {
        use std::os::unix::fs::PermissionsExt;

        let path = scratch("widened");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let mut store = TokenFile::new(&path);
        store.set(AccessToken::new("fresh")).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.get().unwrap().expose(), "fresh");
        store.clear().unwrap();
    }
}
