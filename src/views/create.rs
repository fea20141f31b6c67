//! Poll creation form
//!
//! Draft state with option-count bounds, field validation and the submit
//! flow.

use std::collections::HashSet;
use thiserror::Error;

use crate::chain::{ChainResult, TransactionReceipt};
use crate::session::{Notification, Session};

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 10;

/// Refused option add/remove
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    #[error("You can add up to 10 options")]
    MaximumReached,

    #[error("At least 2 options are required")]
    MinimumRequired,
}

impl DraftError {
    pub fn title(&self) -> &'static str {
        match self {
            DraftError::MaximumReached => "Maximum Reached",
            DraftError::MinimumRequired => "Minimum Required",
        }
    }

    pub fn notification(&self) -> Notification {
        Notification::destructive(self.title(), self.to_string())
    }
}

/// Field-level validation messages
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("poll draft is invalid")]
pub struct ValidationErrors {
    pub title: Option<String>,
    pub options: Option<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.options.is_none()
    }
}

/// Title and options, trimmed and checked, ready to submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPoll {
    pub title: String,
    pub options: Vec<String>,
}

/// Form state of a poll being written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollDraft {
    pub title: String,
    options: Vec<String>,
}

impl Default for PollDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            options: vec![String::new(); MIN_OPTIONS],
        }
    }
}

impl PollDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn can_add_option(&self) -> bool {
        self.options.len() < MAX_OPTIONS
    }

    pub fn can_remove_option(&self) -> bool {
        self.options.len() > MIN_OPTIONS
    }

    /// e.g. `3/10 options`
    pub fn count_label(&self) -> String {
        format!("{}/{} options", self.options.len(), MAX_OPTIONS)
    }

    pub fn add_option(&mut self) -> Result<(), DraftError> {
        if !self.can_add_option() {
            return Err(DraftError::MaximumReached);
        }
        self.options.push(String::new());
        Ok(())
    }

    pub fn remove_option(&mut self, index: usize) -> Result<(), DraftError> {
        if !self.can_remove_option() {
            return Err(DraftError::MinimumRequired);
        }
        if index < self.options.len() {
            self.options.remove(index);
        }
        Ok(())
    }

    pub fn set_option(&mut self, index: usize, value: impl Into<String>) {
        if let Some(option) = self.options.get_mut(index) {
            *option = value.into();
        }
    }

    pub fn validate(&self) -> Result<ValidPoll, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.title = Some("Title is required".to_string());
        }

        let options: Vec<String> = self.options.iter().map(|o| o.trim().to_string()).collect();
        let unique: HashSet<&str> = options.iter().map(String::as_str).collect();

        if options.len() < MIN_OPTIONS {
            errors.options = Some(DraftError::MinimumRequired.to_string());
        } else if options.len() > MAX_OPTIONS {
            errors.options = Some(DraftError::MaximumReached.to_string());
        } else if unique.len() != options.len() {
            errors.options = Some("Options must be unique".to_string());
        } else if options.iter().any(String::is_empty) {
            errors.options = Some("All options must be filled".to_string());
        }

        if errors.is_empty() {
            Ok(ValidPoll {
                title: title.to_string(),
                options,
            })
        } else {
            Err(errors)
        }
    }
}

/// Submit a validated poll and wait for it to be mined.
///
/// On success the caller navigates back to the list.
pub async fn submit_poll(session: &Session, poll: &ValidPoll) -> ChainResult<TransactionReceipt> {
    let notifier = session.notifier();

    match send_and_confirm(session, poll).await {
        Ok(receipt) => {
            notifier.notify(Notification::info("Success", "Poll created successfully!"));
            tracing::info!(tx = %receipt.transaction_hash, title = %poll.title, "Poll created");
            Ok(receipt)
        }
        Err(e) => {
            tracing::error!(error = %e, "Error creating poll");
            notifier.notify(Notification::destructive(
                "Error",
                "Failed to create poll. Please try again.",
            ));
            Err(e)
        }
    }
}

async fn send_and_confirm(session: &Session, poll: &ValidPoll) -> ChainResult<TransactionReceipt> {
    let pending = session.create_poll(&poll.title, &poll.options).await?;
    session.notifier().notify(Notification::info(
        "Creating Poll",
        "Transaction submitted. Please wait for confirmation.",
    ));
    pending.confirm().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainAdapter;
    use crate::session::ChainChangePolicy;
    use crate::testing::{adapter_config, Fixture, ALICE};
    use std::rc::Rc;

    fn filled(title: &str, options: &[&str]) -> PollDraft {
        let mut draft = PollDraft::new();
        draft.title = title.to_string();
        while draft.options().len() < options.len() {
            draft.add_option().unwrap();
        }
        for (i, option) in options.iter().enumerate() {
            draft.set_option(i, *option);
        }
        draft
    }

    #[test]
    fn test_new_draft_has_two_empty_options() {
        let draft = PollDraft::new();
        assert_eq!(draft.options(), &["", ""]);
        assert_eq!(draft.count_label(), "2/10 options");
        assert!(!draft.can_remove_option());
    }

    #[test]
    fn test_option_bounds() {
        let mut draft = PollDraft::new();
        assert_eq!(draft.remove_option(0), Err(DraftError::MinimumRequired));

        for _ in MIN_OPTIONS..MAX_OPTIONS {
            draft.add_option().unwrap();
        }
        assert_eq!(draft.options().len(), MAX_OPTIONS);
        assert_eq!(draft.add_option(), Err(DraftError::MaximumReached));

        draft.set_option(3, "keep");
        draft.remove_option(2).unwrap();
        assert_eq!(draft.options().len(), MAX_OPTIONS - 1);
        assert_eq!(draft.options()[2], "keep");

        let notice = DraftError::MaximumReached.notification();
        assert_eq!(notice.title, "Maximum Reached");
        assert_eq!(notice.description, "You can add up to 10 options");
        assert_eq!(
            DraftError::MinimumRequired.to_string(),
            "At least 2 options are required"
        );
    }

    #[test]
    fn test_validation_messages() {
        let errors = filled("  ", &["Yes", "No"]).validate().unwrap_err();
        assert_eq!(errors.title.as_deref(), Some("Title is required"));
        assert!(errors.options.is_none());

        let errors = filled("Lunch", &["Pizza", "   "]).validate().unwrap_err();
        assert_eq!(errors.options.as_deref(), Some("All options must be filled"));

        let errors = filled("Lunch", &["Pizza", " Pizza "]).validate().unwrap_err();
        assert_eq!(errors.options.as_deref(), Some("Options must be unique"));

        let errors = filled("Lunch", &["", "", "Soup"]).validate().unwrap_err();
        assert_eq!(errors.options.as_deref(), Some("Options must be unique"));
    }

    #[test]
    fn test_valid_draft_is_trimmed() {
        let valid = filled(" Lunch? ", &[" Pizza", "Soup ", "Salad"])
            .validate()
            .unwrap();

        assert_eq!(valid.title, "Lunch?");
        assert_eq!(valid.options, vec!["Pizza", "Soup", "Salad"]);
    }

    async fn connected(fixture: &Fixture) -> Session {
        let adapter = Rc::new(ChainAdapter::new(
            Some(fixture.wallet.clone()),
            adapter_config(),
        ));
        let session = Session::new(adapter, fixture.notifier.clone(), ChainChangePolicy::Reload);
        session.connect().await.unwrap();
        fixture.notifier.clear();
        session
    }

    #[tokio::test]
    async fn test_submit_creates_poll() {
        let fixture = Fixture::new(vec![ALICE]);
        let session = connected(&fixture).await;
        let valid = filled("Lunch?", &["Pizza", "Soup"]).validate().unwrap();

        let receipt = submit_poll(&session, &valid).await.unwrap();

        assert!(receipt.success);
        assert_eq!(fixture.wallet.poll_count(), 1);
        assert_eq!(
            fixture.notifier.titles(),
            vec!["Transaction Sent", "Creating Poll", "Success"]
        );

        let poll = session.get_poll(0).await.unwrap();
        assert_eq!(poll.title, "Lunch?");
        assert_eq!(poll.option_names, vec!["Pizza", "Soup"]);
        assert_eq!(poll.creator, Some(ALICE));
    }

    #[tokio::test]
    async fn test_submit_failure_notifies() {
        let fixture = Fixture::new(vec![ALICE]);
        let session = connected(&fixture).await;
        fixture.wallet.reject_transactions(true);
        let valid = filled("Lunch?", &["Pizza", "Soup"]).validate().unwrap();

        assert!(submit_poll(&session, &valid).await.is_err());

        assert_eq!(fixture.wallet.poll_count(), 0);
        assert_eq!(fixture.notifier.titles(), vec!["Error", "Error"]);
        assert_eq!(
            fixture.notifier.last().unwrap().description,
            "Failed to create poll. Please try again."
        );
    }
}
