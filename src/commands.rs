//! Subcommands: one per forum view, dispatched against a bootstrapped session.
//!
//! DESIGN
//! ======
//! `main` bootstraps the session before dispatch, the same way the web app
//! does on mount. Commands that need a signed-in user go through
//! [`require_user`], which applies the shared route guard. Actions that
//! change memberships refresh the session before showing the result.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use clap::{Args, Subcommand};
use session::forms::{
    LOGIN_FAILED_MESSAGE, REGISTER_FAILED_MESSAGE, REGISTERED_MESSAGE, validate_comment, validate_group,
    validate_login, validate_post, validate_post_update, validate_registration,
};
use session::types::UserProfile;
use session::{
    GuardDecision, Membership, RefreshOutcome, SessionError, SessionStore, TokenStore, Transport,
    assemble_feed, received_comments,
};

use crate::error::CliError;
use crate::render::{self, Output};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and remember the token.
    Login {
        username: String,
        #[arg(long, env = "MURAL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored token.
    Logout,
    /// Create an account.
    Register {
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "MURAL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Show the signed-in user.
    Whoami,
    /// Show the profile page: forums, posts, and comments received.
    Profile,
    /// Posts from every joined forum, grouped by forum.
    Feed,
    Groups(GroupsCommand),
    Posts(PostsCommand),
    Comments(CommentsCommand),
}

#[derive(Args, Debug)]
pub struct GroupsCommand {
    #[command(subcommand)]
    pub command: GroupsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum GroupsSubcommand {
    List,
    Show {
        group_id: i64,
    },
    Create {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Join {
        group_id: i64,
    },
    Leave {
        group_id: i64,
    },
    /// Delete a forum and all of its posts (creator only).
    Delete {
        group_id: i64,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
pub struct PostsCommand {
    #[command(subcommand)]
    pub command: PostsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PostsSubcommand {
    Create {
        /// Target forum; defaults to the first forum you joined.
        #[arg(long)]
        group: Option<i64>,
        #[arg(long)]
        title: String,
        #[arg(long)]
        text: String,
    },
    Show {
        post_id: i64,
    },
    /// Edit a post; omitted fields keep their current value.
    Edit {
        post_id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        text: Option<String>,
    },
    Delete {
        post_id: i64,
        #[arg(long)]
        yes: bool,
    },
    /// Posts written by a user.
    By {
        author_id: i64,
    },
}

#[derive(Args, Debug)]
pub struct CommentsCommand {
    #[command(subcommand)]
    pub command: CommentsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CommentsSubcommand {
    Add {
        post_id: i64,
        text: String,
    },
    Delete {
        comment_id: i64,
        #[arg(long)]
        yes: bool,
    },
}

/// Reads a password when none was given on the command line.
pub type PasswordPrompt<'a> = &'a dyn Fn() -> std::io::Result<String>;

/// Run one command against a bootstrapped session.
///
/// # Errors
///
/// Any API, storage, or validation failure, rendered for the user.
pub async fn run<T: Transport, S: TokenStore>(
    store: &SessionStore<T, S>,
    command: Command,
    prompt: PasswordPrompt<'_>,
) -> Result<Output, CliError> {
    match command {
        Command::Login { username, password } => login(store, &username, password, prompt).await,
        Command::Logout => {
            store.logout()?;
            Ok(Output::message("Signed out."))
        }
        Command::Register { username, email, password } => {
            let password = match password {
                Some(password) => password,
                None => prompt()?,
            };
            let registration = validate_registration(&username, &email, &password)?;
            let author = store
                .api()
                .register(&registration)
                .await
                .map_err(|e| CliError::api(&e, REGISTER_FAILED_MESSAGE))?;
            Output::from_value(format!("{REGISTERED_MESSAGE}\nRun `mural login {}`.", author.username), &author)
        }
        Command::Whoami => {
            let user = require_user(store)?;
            Output::from_value(render::whoami(&user), &user)
        }
        Command::Profile => profile(store).await,
        Command::Feed => feed(store).await,
        Command::Groups(groups) => run_groups(store, groups.command).await,
        Command::Posts(posts) => run_posts(store, posts.command).await,
        Command::Comments(comments) => run_comments(store, comments.command).await,
    }
}

/// The signed-in user, or [`CliError::NotSignedIn`] when the guard redirects.
///
/// # Errors
///
/// [`CliError::NotSignedIn`] unless the guard allows.
pub fn require_user<T: Transport, S: TokenStore>(store: &SessionStore<T, S>) -> Result<UserProfile, CliError> {
    match store.guard() {
        GuardDecision::Allow => store.user().ok_or(CliError::NotSignedIn),
        GuardDecision::Pending | GuardDecision::Redirect(_) => Err(CliError::NotSignedIn),
    }
}

fn confirm(yes: bool, what: &str) -> Result<(), CliError> {
    if yes { Ok(()) } else { Err(CliError::Unconfirmed(what.to_owned())) }
}

async fn refresh_session<T: Transport, S: TokenStore>(store: &SessionStore<T, S>) {
    if let RefreshOutcome::Retained(error) = store.refresh().await {
        tracing::debug!(%error, "continuing with previous profile");
    }
}

// =============================================================================
// AUTH
// =============================================================================

async fn login<T: Transport, S: TokenStore>(
    store: &SessionStore<T, S>,
    username: &str,
    password: Option<String>,
    prompt: PasswordPrompt<'_>,
) -> Result<Output, CliError> {
    let password = match password {
        Some(password) => password,
        None => prompt()?,
    };
    let credentials = validate_login(username, &password)?;
    match store.login(&credentials.username, &credentials.password).await {
        Ok(user) => Output::from_value(format!("Signed in as {}.", user.username), &user),
        Err(SessionError::Api(error)) if error.is_connectivity() => Err(error.into()),
        Err(SessionError::Api(error)) => {
            tracing::debug!(%error, "login rejected");
            Err(CliError::Api(LOGIN_FAILED_MESSAGE.to_owned()))
        }
        Err(error) => Err(error.into()),
    }
}

async fn profile<T: Transport, S: TokenStore>(store: &SessionStore<T, S>) -> Result<Output, CliError> {
    let user = require_user(store)?;
    let posts = store.api().author_posts(user.id).await?;
    let received = received_comments(&posts);
    let text = render::profile(&user, &posts, &received);
    Ok(Output::new(text, serde_json::json!({ "user": user, "posts": posts })))
}

async fn feed<T: Transport, S: TokenStore>(store: &SessionStore<T, S>) -> Result<Output, CliError> {
    let user = require_user(store)?;
    let posts = store.api().feed_posts().await.map_err(|e| CliError::api(&e, "Could not load your feed."))?;
    let json = serde_json::to_value(&posts)?;
    let sections = assemble_feed(&user, posts);
    Ok(Output::new(render::feed(&sections, user.id), json))
}

// =============================================================================
// GROUPS
// =============================================================================

async fn run_groups<T: Transport, S: TokenStore>(
    store: &SessionStore<T, S>,
    command: GroupsSubcommand,
) -> Result<Output, CliError> {
    match command {
        GroupsSubcommand::List => {
            let groups = store.api().list_groups().await?;
            Output::from_value(render::groups(&groups), &groups)
        }
        GroupsSubcommand::Show { group_id } => show_group(store, group_id).await,
        GroupsSubcommand::Create { name, description } => {
            require_user(store)?;
            let group = validate_group(&name, &description)?;
            let created = store.api().create_group(&group).await?;
            refresh_session(store).await;
            show_group(store, created.id).await
        }
        GroupsSubcommand::Join { group_id } => {
            require_user(store)?;
            let ack = store.api().join_group(group_id).await?;
            tracing::info!(group_id, message = %ack.message, "joined forum");
            refresh_session(store).await;
            show_group(store, group_id).await
        }
        GroupsSubcommand::Leave { group_id } => {
            require_user(store)?;
            let ack = store.api().leave_group(group_id).await?;
            tracing::info!(group_id, message = %ack.message, "left forum");
            refresh_session(store).await;
            show_group(store, group_id).await
        }
        GroupsSubcommand::Delete { group_id, yes } => {
            require_user(store)?;
            confirm(yes, "deleting a forum removes all of its posts")?;
            store.api().delete_group(group_id).await?;
            refresh_session(store).await;
            Ok(Output::message(format!("Forum #{group_id} deleted.")))
        }
    }
}

async fn show_group<T: Transport, S: TokenStore>(
    store: &SessionStore<T, S>,
    group_id: i64,
) -> Result<Output, CliError> {
    let details = store
        .api()
        .group_details(group_id)
        .await
        .map_err(|e| CliError::api(&e, "Could not load the forum."))?;
    let membership = Membership::of(&details, store.user().as_ref());
    Output::from_value(render::group_details(&details, membership), &details)
}

// =============================================================================
// POSTS & COMMENTS
// =============================================================================

async fn run_posts<T: Transport, S: TokenStore>(
    store: &SessionStore<T, S>,
    command: PostsSubcommand,
) -> Result<Output, CliError> {
    let user = require_user(store)?;
    match command {
        PostsSubcommand::Create { group, title, text } => {
            let group_id = group.or_else(|| user.groups.first().map(|summary| summary.id));
            let post = validate_post(&title, &text, group_id)?;
            let created = store.api().create_post(&post).await?;
            Output::from_value(render::post(&created, Some(user.id)), &created)
        }
        PostsSubcommand::Show { post_id } => {
            let post = store.api().get_post(post_id).await?;
            Output::from_value(render::post(&post, Some(user.id)), &post)
        }
        PostsSubcommand::Edit { post_id, title, text } => {
            let current = store
                .api()
                .get_post(post_id)
                .await
                .map_err(|e| CliError::api(&e, "Could not load the post for editing."))?;
            let update = validate_post_update(
                title.as_deref().unwrap_or(&current.title),
                text.as_deref().unwrap_or(&current.text),
            )?;
            let updated = store.api().update_post(post_id, &update).await?;
            Output::from_value(render::post(&updated, Some(user.id)), &updated)
        }
        PostsSubcommand::Delete { post_id, yes } => {
            confirm(yes, "this deletes the post")?;
            store.api().delete_post(post_id).await?;
            Ok(Output::message(format!("Post #{post_id} deleted.")))
        }
        PostsSubcommand::By { author_id } => {
            let posts = store.api().author_posts(author_id).await?;
            let text: String = posts.iter().map(|post| render::post(post, Some(user.id))).collect();
            let text = if text.is_empty() { "No posts.\n".to_owned() } else { text };
            Output::from_value(text, &posts)
        }
    }
}

async fn run_comments<T: Transport, S: TokenStore>(
    store: &SessionStore<T, S>,
    command: CommentsSubcommand,
) -> Result<Output, CliError> {
    require_user(store)?;
    match command {
        CommentsSubcommand::Add { post_id, text } => {
            let comment = validate_comment(&text)?;
            let created = store.api().add_comment(post_id, &comment).await?;
            Output::from_value(format!("Comment #{} added to post #{post_id}.", created.id), &created)
        }
        CommentsSubcommand::Delete { comment_id, yes } => {
            confirm(yes, "this deletes the comment")?;
            store.api().delete_comment(comment_id).await?;
            Ok(Output::message(format!("Comment #{comment_id} deleted.")))
        }
    }
}
