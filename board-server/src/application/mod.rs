pub(crate) mod auth_service;
pub(crate) mod board_service;
pub(crate) mod clock;
pub(crate) mod comment_service;
pub(crate) mod vote_service;
