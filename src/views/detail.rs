//! Poll detail
//!
//! Tally rows, vote availability and the vote / end-poll flows for one poll.

use std::rc::Rc;

use crate::chain::{ChainResult, Poll, PollId};
use crate::session::{Notification, Session};
use crate::storage::VotedPolls;

/// One option row of the results panel
#[derive(Debug, Clone, PartialEq)]
pub struct OptionTally {
    pub index: usize,
    pub label: String,
    pub votes: u64,
    pub percentage: f64,
}

impl OptionTally {
    /// e.g. `3 votes (75.0%)`
    pub fn votes_label(&self) -> String {
        format!("{} votes ({:.1}%)", self.votes, self.percentage)
    }
}

pub fn tally(poll: &Poll) -> Vec<OptionTally> {
    poll.option_names
        .iter()
        .enumerate()
        .map(|(index, label)| OptionTally {
            index,
            label: label.clone(),
            votes: poll.votes_for(index),
            percentage: poll.percentage(index),
        })
        .collect()
}

/// What the voting panel offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAvailability {
    Open,
    AlreadyVoted,
    Ended,
}

impl VoteAvailability {
    pub fn prompt(&self) -> &'static str {
        match self {
            VoteAvailability::Ended => "This poll has ended and is no longer accepting votes",
            _ => "Select an option to vote",
        }
    }

    /// Text shown instead of the option buttons
    pub fn message(&self) -> Option<&'static str> {
        match self {
            VoteAvailability::Open => None,
            VoteAvailability::AlreadyVoted => Some("Thank you for voting!"),
            VoteAvailability::Ended => {
                Some("This poll has ended and is no longer accepting votes.")
            }
        }
    }
}

/// Vote and end-poll flows for the detail page
#[derive(Clone)]
pub struct PollDetailController {
    session: Rc<Session>,
    voted: VotedPolls,
    poll_id: PollId,
}

impl PollDetailController {
    pub fn new(session: Rc<Session>, voted: VotedPolls, poll_id: PollId) -> Self {
        Self {
            session,
            voted,
            poll_id,
        }
    }

    pub fn poll_id(&self) -> PollId {
        self.poll_id
    }

    pub async fn load(&self) -> ChainResult<Poll> {
        self.session.get_poll(self.poll_id).await
    }

    pub fn has_voted(&self) -> bool {
        self.voted.contains(self.poll_id)
    }

    pub fn availability(&self, poll: &Poll) -> VoteAvailability {
        if !poll.active {
            VoteAvailability::Ended
        } else if self.has_voted() {
            VoteAvailability::AlreadyVoted
        } else {
            VoteAvailability::Open
        }
    }

    pub fn is_creator(&self, poll: &Poll) -> bool {
        poll.is_created_by(self.session.account())
    }

    /// End-poll control is offered to the creator of an active poll
    pub fn can_end(&self, poll: &Poll) -> bool {
        poll.active && self.is_creator(poll)
    }

    /// Vote, wait for confirmation, remember the vote and refetch.
    ///
    /// Returns `Ok(None)` without touching the chain when the poll has ended.
    pub async fn cast_vote(&self, poll: &Poll, option_index: usize) -> ChainResult<Option<Poll>> {
        if !poll.active {
            return Ok(None);
        }

        match self.submit_vote(option_index).await {
            Ok(()) => {
                self.notify(Notification::info(
                    "Vote Submitted",
                    "Your vote has been recorded successfully!",
                ));
                if let Err(e) = self.voted.record(self.poll_id) {
                    tracing::warn!(poll_id = self.poll_id, error = %e, "Could not remember vote");
                }
                self.load().await.map(Some)
            }
            Err(e) => {
                tracing::error!(poll_id = self.poll_id, option_index, error = %e, "Error voting");
                self.notify(Notification::destructive(
                    "Voting Failed",
                    "There was an error submitting your vote",
                ));
                Err(e)
            }
        }
    }

    async fn submit_vote(&self, option_index: usize) -> ChainResult<()> {
        let pending = self.session.vote(self.poll_id, option_index).await?;
        pending.confirm().await?;
        Ok(())
    }

    /// End the poll, wait for confirmation and refetch
    pub async fn end_poll(&self) -> ChainResult<Poll> {
        match self.submit_end().await {
            Ok(()) => {
                self.notify(Notification::info(
                    "Poll Ended",
                    "The poll has been closed successfully!",
                ));
                self.load().await
            }
            Err(e) => {
                tracing::error!(poll_id = self.poll_id, error = %e, "Error ending poll");
                self.notify(Notification::destructive(
                    "Action Failed",
                    "There was an error ending the poll",
                ));
                Err(e)
            }
        }
    }

    async fn submit_end(&self) -> ChainResult<()> {
        let pending = self.session.end_poll(self.poll_id).await?;
        pending.confirm().await?;
        Ok(())
    }

    fn notify(&self, notification: Notification) {
        self.session.notifier().notify(notification);
    }
}
