/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Authentication (`/api/auth`)
 * - `POST /register`, `POST /login`, `POST /refresh`, `GET /me`
 * - `GET /creator/{username}`, `POST /verify-profile`, `PUT /creator/profile`
 *
 * ## Recruiting
 * - `/api/jobs`, `/api/applications`, `/api/employers`, `/api/job-seekers`
 *
 * ## Creator platform
 * - `/api/content`, `/api/interactions`, `/api/messages`, `/api/users`
 */

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

use crate::backend::applications::{
    submit_application, submit_public_application, update_application_status,
};
use crate::backend::auth::{
    get_creator_profile, get_me, login, refresh, register, update_profile, verify_profile,
};
use crate::backend::content;
use crate::backend::interactions::{
    add_comment, delete_comment, toggle_comment_like, toggle_post_like,
};
use crate::backend::jobs::{create_job, delete_job, get_job, list_jobs, update_job};
use crate::backend::messaging::{
    create_conversation, get_conversations, get_messages, get_unread_count, send_message,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::profiles::{
    get_employer_jobs, get_employer_profile, get_job_applications, get_job_seeker_applications,
    get_job_seeker_profile, update_employer_profile, update_job_seeker_profile,
};
use crate::backend::server::state::AppState;
use crate::backend::social::{follow_user, get_followers, get_following, unfollow_user};

/// Body limit of post uploads (100 MB video plus form overhead)
const CONTENT_BODY_LIMIT: usize = 110 * 1024 * 1024;

/// Body limit of verification uploads (two 10 MB documents)
const VERIFICATION_BODY_LIMIT: usize = 25 * 1024 * 1024;

/// Body limit of résumé and profile image uploads (5 MB files)
const SMALL_UPLOAD_BODY_LIMIT: usize = 6 * 1024 * 1024;

/// Configure API routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
/// * `app_state` - State handed to `auth_middleware` on protected routers
///
/// # Returns
///
/// Router with API routes configured
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/auth/me", get(get_me))
        .route("/api/auth/creator/{username}", get(get_creator_profile))
        .route(
            "/api/auth/verify-profile",
            post(verify_profile).layer(DefaultBodyLimit::max(VERIFICATION_BODY_LIMIT)),
        )
        .route(
            "/api/auth/creator/profile",
            put(update_profile).layer(DefaultBodyLimit::max(SMALL_UPLOAD_BODY_LIMIT)),
        )
        // Jobs: reads are public, writes check the employer in the handler
        .route("/api/jobs", get(list_jobs).post(create_job))
        .route(
            "/api/jobs/{id}",
            get(get_job).put(update_job).delete(delete_job),
        )
        // Applications
        .route("/api/applications", post(submit_application))
        .route(
            "/api/applications/public",
            post(submit_public_application).layer(DefaultBodyLimit::max(SMALL_UPLOAD_BODY_LIMIT)),
        )
        .route("/api/applications/{id}/status", put(update_application_status))
        .nest("/api/employers", employer_routes(app_state))
        .nest("/api/job-seekers", job_seeker_routes(app_state))
        .nest("/api/content", content_routes(app_state))
        .nest("/api/interactions", interaction_routes(app_state))
        .nest("/api/messages", message_routes(app_state))
        .nest("/api/users", user_routes(app_state))
}

/// Apply `auth_middleware` to every route of `router`
fn authenticated(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    router.route_layer(from_fn_with_state(app_state.clone(), auth_middleware))
}

fn employer_routes(app_state: &AppState) -> Router<AppState> {
    authenticated(
        Router::new()
            .route(
                "/{id}",
                get(get_employer_profile).put(update_employer_profile),
            )
            .route("/{id}/jobs", get(get_employer_jobs))
            .route(
                "/{id}/jobs/{job_id}/applications",
                get(get_job_applications),
            ),
        app_state,
    )
}

fn job_seeker_routes(app_state: &AppState) -> Router<AppState> {
    authenticated(
        Router::new()
            .route(
                "/{id}",
                get(get_job_seeker_profile).put(update_job_seeker_profile),
            )
            .route("/{id}/applications", get(get_job_seeker_applications)),
        app_state,
    )
}

/// Creator pages and single posts are readable without an account; private
/// posts are redacted or refused for such viewers.
fn content_routes(app_state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/creator/{username}/posts", get(content::get_creator_posts))
        .route("/posts/{post_id}", get(content::get_post));

    let protected = authenticated(
        Router::new()
            .route(
                "/upload",
                post(content::create_post).layer(DefaultBodyLimit::max(CONTENT_BODY_LIMIT)),
            )
            .route(
                "/creator/posts",
                get(content::get_own_posts)
                    .post(content::create_post)
                    .layer(DefaultBodyLimit::max(CONTENT_BODY_LIMIT)),
            )
            .route(
                "/creator/posts/{post_id}",
                put(content::update_post)
                    .delete(content::delete_post)
                    .layer(DefaultBodyLimit::max(CONTENT_BODY_LIMIT)),
            )
            .route("/creator/stats", get(content::get_creator_stats))
            .route("/subscriber/feed", get(content::get_subscriber_feed))
            .route(
                "/subscriber/purchase/{post_id}",
                post(content::purchase_post),
            ),
        app_state,
    );

    public.merge(protected)
}

fn interaction_routes(app_state: &AppState) -> Router<AppState> {
    authenticated(
        Router::new()
            .route("/posts/{post_id}/comments", post(add_comment))
            .route("/posts/{post_id}/like", post(toggle_post_like))
            .route(
                "/posts/{post_id}/comments/{comment_id}/like",
                post(toggle_comment_like),
            )
            .route(
                "/posts/{post_id}/comments/{comment_id}",
                axum::routing::delete(delete_comment),
            ),
        app_state,
    )
}

fn message_routes(app_state: &AppState) -> Router<AppState> {
    authenticated(
        Router::new()
            .route(
                "/conversations",
                get(get_conversations).post(create_conversation),
            )
            .route(
                "/conversations/{conversation_id}/messages",
                get(get_messages),
            )
            .route("/messages", post(send_message))
            .route("/unread", get(get_unread_count)),
        app_state,
    )
}

fn user_routes(app_state: &AppState) -> Router<AppState> {
    authenticated(
        Router::new()
            .route("/follow/{username}", post(follow_user))
            .route("/unfollow/{username}", post(unfollow_user))
            .route("/{username}/followers", get(get_followers))
            .route("/{username}/following", get(get_following)),
        app_state,
    )
}
