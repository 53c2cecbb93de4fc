use survey_form_types::{EmailAddress, ParticipantError};

/// Validated, duplicate-free list of participant emails in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantList {
    emails: Vec<EmailAddress>,
}

impl ParticipantList {
    pub fn new() -> Self {
        Self { emails: Vec::new() }
    }

    /// Validate `raw` and append it.
    ///
    /// Format is checked before duplicates, so malformed input always reports
    /// `InvalidFormat`.
    pub fn add(&mut self, raw: &str) -> Result<&EmailAddress, ParticipantError> {
        let email = EmailAddress::parse(raw)?;
        self.push(email)
    }

    /// Append an already validated address.
    pub fn push(&mut self, email: EmailAddress) -> Result<&EmailAddress, ParticipantError> {
        if self.emails.contains(&email) {
            return Err(ParticipantError::Duplicate(email.as_str().to_string()));
        }
        self.emails.push(email);
        Ok(&self.emails[self.emails.len() - 1])
    }

    /// Remove the entry at `index`. Entries are never edited in place.
    pub fn remove(&mut self, index: usize) -> Option<EmailAddress> {
        (index < self.emails.len()).then(|| self.emails.remove(index))
    }

    pub fn contains(&self, email: &EmailAddress) -> bool {
        self.emails.contains(email)
    }

    pub fn as_slice(&self) -> &[EmailAddress] {
        &self.emails
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmailAddress> {
        self.emails.iter()
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn to_vec(&self) -> Vec<EmailAddress> {
        self.emails.clone()
    }
}

impl FromIterator<EmailAddress> for ParticipantList {
    /// Later duplicates are dropped.
    fn from_iter<I: IntoIterator<Item = EmailAddress>>(iter: I) -> Self {
        let mut list = Self::new();
        for email in iter {
            let _ = list.push(email);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed() {
        let mut list = ParticipantList::new();
        assert!(matches!(
            list.add("notanemail"),
            Err(ParticipantError::InvalidFormat(_))
        ));
        assert!(list.is_empty());
    }

    #[test]
    fn accepts_then_rejects_duplicate() {
        let mut list = ParticipantList::new();
        assert_eq!(list.add("a@b.co").unwrap().as_str(), "a@b.co");
        assert_eq!(
            list.add("a@b.co"),
            Err(ParticipantError::Duplicate("a@b.co".to_string()))
        );
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn duplicate_check_uses_trimmed_value() {
        let mut list = ParticipantList::new();
        list.add("x@y.com").unwrap();
        assert!(matches!(
            list.add(" x@y.com "),
            Err(ParticipantError::Duplicate(_))
        ));
    }

    #[test]
    fn remove_then_re_add() {
        let mut list = ParticipantList::new();
        list.add("a@b.co").unwrap();
        list.add("c@d.co").unwrap();
        assert_eq!(list.remove(0).unwrap().as_str(), "a@b.co");
        assert!(list.remove(5).is_none());
        list.add("a@b.co").unwrap();
        let emails: Vec<&str> = list.iter().map(EmailAddress::as_str).collect();
        assert_eq!(emails, ["c@d.co", "a@b.co"]);
    }

    #[test]
    fn collect_drops_duplicates() {
        let list: ParticipantList = ["a@b.co", "a@b.co", "c@d.co"]
            .into_iter()
            .map(|e| EmailAddress::parse(e).unwrap())
            .collect();
        assert_eq!(list.len(), 2);
    }
}
