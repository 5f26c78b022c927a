use chrono::{DateTime, Utc};

/// One user's upvote on one post. At most one exists per (user, post) pair.
#[derive(Debug, Clone)]
pub(crate) struct Vote {
    pub(crate) user_id: i64,
    pub(crate) post_id: i64,
    pub(crate) created_at: DateTime<Utc>,
}

/// Vote state of a post as seen by the acting user after a vote change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct VoteSummary {
    pub(crate) post_id: i64,
    pub(crate) vote_count: i64,
    pub(crate) voted: bool,
}
