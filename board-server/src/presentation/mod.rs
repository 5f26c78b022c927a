use std::sync::Arc;

use sqlx::PgPool;

use crate::application::auth_service::AuthService;
use crate::application::board_service::BoardService;
use crate::application::clock::Clock;
use crate::application::comment_service::CommentService;
use crate::application::vote_service::VoteService;
use crate::data::repositories::postgres::comment_repository::PostgresCommentRepository;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::data::repositories::postgres::user_repository::PostgresUserRepository;
use crate::data::repositories::postgres::vote_repository::PostgresVoteRepository;
use crate::infrastructure::jwt::JwtService;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<PostgresUserRepository>>,
    pub(crate) board_service: Arc<BoardService<PostgresPostRepository>>,
    pub(crate) vote_service: Arc<VoteService<PostgresVoteRepository>>,
    pub(crate) comment_service: Arc<CommentService<PostgresCommentRepository>>,
    pub(crate) jwt: Arc<JwtService>,
}

impl AppState {
    /// Wires every service to PostgreSQL repositories sharing `pool`.
    pub(crate) fn new(pool: PgPool, jwt: Arc<JwtService>, clock: Arc<dyn Clock>) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(
                PostgresUserRepository::new(pool.clone()),
                Arc::clone(&jwt),
            )),
            board_service: Arc::new(BoardService::new(
                PostgresPostRepository::new(pool.clone()),
                clock,
            )),
            vote_service: Arc::new(VoteService::new(PostgresVoteRepository::new(pool.clone()))),
            comment_service: Arc::new(CommentService::new(PostgresCommentRepository::new(pool))),
            jwt,
        }
    }
}
