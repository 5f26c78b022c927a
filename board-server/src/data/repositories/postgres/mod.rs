pub(crate) mod comment_repository;
pub(crate) mod post_repository;
pub(crate) mod user_repository;
pub(crate) mod vote_repository;

const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";
