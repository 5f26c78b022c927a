use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::handlers::auth::{MemberDto, SessionDto, SignInDto, SignUpDto};
use crate::presentation::handlers::comments::{
    CommentDto, CreateCommentDto, ListCommentsResponseDto,
};
use crate::presentation::handlers::posts::{
    CreatePostDto, ListPostsQuery, ListPostsResponseDto, ListSort, PostDetailDto, PostDto,
    RankedPostDto, UpdatePostDto,
};
use crate::presentation::handlers::votes::VoteDto;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::auth::register,
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::get_post,
        crate::presentation::handlers::posts::create_post,
        crate::presentation::handlers::posts::update_post,
        crate::presentation::handlers::posts::delete_post,
        crate::presentation::handlers::votes::upvote,
        crate::presentation::handlers::votes::withdraw_vote,
        crate::presentation::handlers::comments::list_comments,
        crate::presentation::handlers::comments::create_comment
    ),
    components(
        schemas(
            SignUpDto,
            SignInDto,
            SessionDto,
            MemberDto,
            CreatePostDto,
            UpdatePostDto,
            ListPostsQuery,
            ListSort,
            PostDto,
            RankedPostDto,
            PostDetailDto,
            ListPostsResponseDto,
            VoteDto,
            CreateCommentDto,
            CommentDto,
            ListCommentsResponseDto
        )
    ),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "posts", description = "Posts, ranked by decayed popularity"),
        (name = "votes", description = "One upvote per member and post"),
        (name = "comments", description = "Post comments, newest first")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::ApiDoc;

    #[test]
    fn document_lists_vote_and_comment_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/posts"));
        assert!(doc.paths.paths.contains_key("/api/posts/{id}/votes"));
        assert!(doc.paths.paths.contains_key("/api/posts/{id}/comments"));
    }
}
