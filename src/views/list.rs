//! Poll listing
//!
//! Fetches the listing, hydrates every entry concurrently and filters the
//! result for display.

use futures_util::future::join_all;
use std::str::FromStr;

use crate::chain::{ChainResult, Poll};
use crate::session::Session;

/// Number of options shown on a poll card
pub const CARD_PREVIEW_OPTIONS: usize = 3;

/// Fetch all polls with their details.
///
/// A failed detail read leaves that entry as its listing summary; the other
/// entries are unaffected. A failed listing read is returned as the error.
pub async fn load_poll_list(session: &Session) -> ChainResult<Vec<Poll>> {
    let summaries = session.list_polls().await?;
    let adapter = session.adapter();

    let hydrated = join_all(summaries.into_iter().map(|summary| async move {
        match adapter.get_poll(summary.id).await {
            Ok(poll) => poll,
            Err(e) => {
                tracing::warn!(poll_id = summary.id, error = %e, "Showing poll summary without details");
                summary
            }
        }
    }))
    .await;

    tracing::debug!(count = hydrated.len(), "Poll list loaded");
    Ok(hydrated)
}

/// Status filter on the list page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollFilter {
    #[default]
    All,
    Active,
    Ended,
}

impl PollFilter {
    pub const ALL: [PollFilter; 3] = [PollFilter::All, PollFilter::Active, PollFilter::Ended];

    pub fn matches(&self, poll: &Poll) -> bool {
        match self {
            PollFilter::All => true,
            PollFilter::Active => poll.active,
            PollFilter::Ended => !poll.active,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PollFilter::All => "all",
            PollFilter::Active => "active",
            PollFilter::Ended => "ended",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PollFilter::All => "All",
            PollFilter::Active => "Active",
            PollFilter::Ended => "Ended",
        }
    }
}

impl FromStr for PollFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(PollFilter::All),
            "active" => Ok(PollFilter::Active),
            "ended" => Ok(PollFilter::Ended),
            other => Err(format!("unknown poll filter: {}", other)),
        }
    }
}

/// Search text plus status filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub search: String,
    pub filter: PollFilter,
}

impl ListQuery {
    pub fn new(search: impl Into<String>, filter: PollFilter) -> Self {
        Self {
            search: search.into(),
            filter,
        }
    }

    /// Case-insensitive title substring match combined with the status filter
    pub fn matches(&self, poll: &Poll) -> bool {
        let needle = self.search.to_lowercase();
        poll.title.to_lowercase().contains(&needle) && self.filter.matches(poll)
    }

    pub fn apply<'a>(&self, polls: &'a [Poll]) -> Vec<&'a Poll> {
        polls.iter().filter(|poll| self.matches(poll)).collect()
    }

    pub fn is_narrowed(&self) -> bool {
        !self.search.is_empty() || self.filter != PollFilter::All
    }

    /// Message shown when nothing matches
    pub fn empty_state(&self) -> EmptyState {
        let hint = if self.is_narrowed() {
            "Try adjusting your search or filter"
        } else {
            "Create your first poll to get started"
        };
        EmptyState {
            title: "No polls found",
            hint,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub hint: &'static str,
}

/// Option preview shown on a poll card
#[derive(Debug, Clone, PartialEq)]
pub enum CardPreview {
    /// Details did not load; the card says so
    Pending,
    Options {
        summary: String,
        shown: Vec<String>,
        more: Option<String>,
    },
}

impl CardPreview {
    pub fn for_poll(poll: &Poll) -> Self {
        if !poll.is_hydrated() {
            return CardPreview::Pending;
        }

        let count = poll.option_names.len();
        let more = count
            .checked_sub(CARD_PREVIEW_OPTIONS)
            .filter(|extra| *extra > 0)
            .map(|extra| format!("+{} more options", extra));

        CardPreview::Options {
            summary: format!("{} options available", count),
            shown: poll
                .option_names
                .iter()
                .take(CARD_PREVIEW_OPTIONS)
                .cloned()
                .collect(),
            more,
        }
    }
}

/// Badge text for a poll's status
pub fn status_label(poll: &Poll) -> &'static str {
    if poll.active {
        "Active"
    } else {
        "Ended"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainAdapter;
    use crate::session::ChainChangePolicy;
    use crate::testing::{adapter_config, Fixture, ALICE, BOB};
    use std::collections::HashSet;
    use std::rc::Rc;

    async fn connected_session(fixture: &Fixture) -> Session {
        let adapter = Rc::new(ChainAdapter::new(
            Some(fixture.wallet.clone()),
            adapter_config(),
        ));
        let session = Session::new(adapter, fixture.notifier.clone(), ChainChangePolicy::Reload);
        session.connect().await.unwrap();
        session
    }

    fn poll(id: u64, title: &str, active: bool) -> Poll {
        let mut poll = Poll::summary(id, title);
        poll.active = active;
        poll
    }

    #[tokio::test]
    async fn test_load_hydrates_every_poll() {
        let fixture = Fixture::new(vec![ALICE]);
        fixture.wallet.seed_poll(ALICE, "Tabs or spaces?", &["Tabs", "Spaces"], true, &[2, 5]);
        fixture.wallet.seed_poll(BOB, "Best editor?", &["Vim", "Emacs", "Helix"], false, &[1, 1, 1]);
        let session = connected_session(&fixture).await;

        let polls = load_poll_list(&session).await.unwrap();

        assert_eq!(polls.len(), 2);
        assert!(polls.iter().all(Poll::is_hydrated));
        assert_eq!(polls[0].option_votes, vec![2, 5]);
        assert_eq!(polls[1].creator, Some(BOB));

        let ids: HashSet<_> = polls.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), polls.len());
    }

    #[tokio::test]
    async fn test_failed_hydration_falls_back_to_summary() {
        let fixture = Fixture::new(vec![ALICE]);
        fixture.wallet.seed_poll(ALICE, "First", &["A", "B"], true, &[0, 0]);
        fixture.wallet.seed_poll(ALICE, "Second", &["C", "D"], true, &[1, 0]);
        fixture.wallet.seed_poll(ALICE, "Third", &["E", "F"], true, &[0, 3]);
        fixture.wallet.break_poll(1);
        let session = connected_session(&fixture).await;
        fixture.notifier.clear();

        let polls = load_poll_list(&session).await.unwrap();

        assert_eq!(polls[1], Poll::summary(1, "Second"));
        assert!(polls[0].is_hydrated());
        assert!(polls[2].is_hydrated());
        assert_eq!(polls[2].option_votes, vec![0, 3]);
        assert!(fixture.notifier.titles().is_empty());
    }

    #[tokio::test]
    async fn test_load_requires_connection() {
        let fixture = Fixture::new(vec![ALICE]);
        let adapter = Rc::new(ChainAdapter::new(
            Some(fixture.wallet.clone()),
            adapter_config(),
        ));
        let session = Session::new(adapter, fixture.notifier.clone(), ChainChangePolicy::Reload);

        assert!(load_poll_list(&session).await.is_err());
        assert_eq!(fixture.notifier.titles(), vec!["Error"]);
    }

    #[test]
    fn test_search_and_filter() {
        let polls = vec![
            poll(0, "Favourite Rust crate", true),
            poll(1, "Lunch options", false),
            poll(2, "rust edition", false),
        ];

        let query = ListQuery::new("RUST", PollFilter::All);
        let ids: Vec<_> = query.apply(&polls).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 2]);

        let query = ListQuery::new("rust", PollFilter::Ended);
        let ids: Vec<_> = query.apply(&polls).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);

        let query = ListQuery::new("", PollFilter::Active);
        let ids: Vec<_> = query.apply(&polls).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0]);
    }

    #[test]
    fn test_empty_state_depends_on_query() {
        assert_eq!(
            ListQuery::default().empty_state().hint,
            "Create your first poll to get started"
        );
        assert_eq!(
            ListQuery::new("", PollFilter::Ended).empty_state().hint,
            "Try adjusting your search or filter"
        );
        assert_eq!(
            ListQuery::new("x", PollFilter::All).empty_state().title,
            "No polls found"
        );
    }

    #[test]
    fn test_filter_parsing() {
        for filter in PollFilter::ALL {
            assert_eq!(filter.as_str().parse::<PollFilter>().unwrap(), filter);
        }
        assert!("archived".parse::<PollFilter>().is_err());
    }

    #[test]
    fn test_card_preview() {
        assert_eq!(CardPreview::for_poll(&poll(0, "Pending", false)), CardPreview::Pending);

        let mut five = poll(1, "Many", true);
        five.option_names = ["A", "B", "C", "D", "E"].iter().map(|s| s.to_string()).collect();
        five.option_votes = vec![0; 5];
        match CardPreview::for_poll(&five) {
            CardPreview::Options { summary, shown, more } => {
                assert_eq!(summary, "5 options available");
                assert_eq!(shown, vec!["A", "B", "C"]);
                assert_eq!(more.as_deref(), Some("+2 more options"));
            }
            CardPreview::Pending => panic!("expected options"),
        }

        let mut three = poll(2, "Few", true);
        three.option_names = vec!["X".into(), "Y".into(), "Z".into()];
        three.option_votes = vec![0; 3];
        assert!(matches!(
            CardPreview::for_poll(&three),
            CardPreview::Options { more: None, .. }
        ));
        assert_eq!(status_label(&three), "Active");
    }
}
