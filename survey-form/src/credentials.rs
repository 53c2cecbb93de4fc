use std::convert::Infallible;

use survey_form_types::{AccessToken, CredentialStore};

/// Credential store that keeps the token for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentials {
    token: Option<AccessToken>,
}

impl MemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: AccessToken) -> Self {
        Self { token: Some(token) }
    }
}

impl CredentialStore for MemoryCredentials {
    type Error = Infallible;

    fn get(&self) -> Option<AccessToken> {
        self.token.clone()
    }

    fn set(&mut self, token: AccessToken) -> Result<(), Self::Error> {
        self.token = Some(token);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.token = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_clear() {
        let mut store = MemoryCredentials::new();
        assert!(!store.is_authenticated());
        store.set(AccessToken::new("abc")).unwrap();
        assert_eq!(store.get().unwrap().expose(), "abc");
        store.clear().unwrap();
        assert!(store.get().is_none());
    }
}
