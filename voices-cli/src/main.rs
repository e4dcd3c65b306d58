use std::fs;
use std::io;
use std::path::Path;
use std::process;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use voices_client::{PostDetail, PostInput, PostSummary, User, VoicesClient, VoicesClientError};

const SESSION_FILE: &str = ".voices_session";
const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";

/// The logged-in account, remembered between invocations the way the web
/// frontend keeps it in local storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Session {
    user_id: i64,
    name: String,
    email: String,
}

#[derive(Debug, Parser)]
#[command(name = "voices-cli", version, about = "CLI client for voices-server")]
struct Cli {
    /// Server address.
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register an account.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in and remember the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the remembered session.
    Logout,
    /// Show the logged-in account.
    Whoami,
    /// Publish a post (requires login).
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        institution: String,
        /// Image paths returned by `upload`, repeatable.
        #[arg(long = "image")]
        images: Vec<String>,
    },
    /// Show one post with comments.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// List the newest posts.
    Recent {
        #[arg(long, default_value_t = 10)]
        limit: i64,
    },
    /// List the most supported posts.
    Trending {
        #[arg(long, default_value_t = 10)]
        limit: i64,
    },
    /// List your own posts (requires login).
    Mine,
    /// Update a post (requires login).
    ///
    /// Omitted fields keep their current values.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        institution: Option<String>,
    },
    /// Delete a post (requires login).
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Toggle support on a post (requires login).
    Like {
        #[arg(long)]
        id: i64,
    },
    /// Comment on a post (requires login).
    Comment {
        #[arg(long)]
        post_id: i64,
        #[arg(long)]
        content: String,
    },
    /// Delete your own comment (requires login).
    Uncomment {
        #[arg(long)]
        id: i64,
    },
    /// Upload an image and print its public path (requires login).
    Upload {
        #[arg(long)]
        file: String,
    },
    /// Show platform statistics.
    Stats,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let server = normalize_server(cli.server.unwrap_or_else(|| DEFAULT_SERVER.to_string()));
    let client = VoicesClient::new(server);

    match cli.command {
        Command::Register {
            name,
            email,
            password,
        } => {
            client
                .register(&name, &email, &password)
                .await
                .map_err(map_client_error)?;
            println!("Registered. Log in with `voices-cli login --email {email} --password ...`");
        }
        Command::Login { email, password } => {
            let user = client
                .login(&email, &password)
                .await
                .map_err(map_client_error)?;
            persist_session(&user).context("failed to save session")?;
            println!("Logged in as {} <{}> (id={})", user.name, user.email, user.id);
        }
        Command::Logout => {
            clear_session().context("failed to remove session")?;
            println!("Logged out");
        }
        Command::Whoami => {
            let session = require_session()?;
            let user = client
                .user_info(session.user_id)
                .await
                .map_err(map_client_error)?;
            print_user(&user);
        }
        Command::Create {
            title,
            content,
            category,
            institution,
            images,
        } => {
            let session = require_session()?;
            let post_id = client
                .create_post(
                    session.user_id,
                    &PostInput {
                        title,
                        content,
                        category,
                        institution,
                        images,
                    },
                )
                .await
                .map_err(map_client_error)?;
            println!("Post created: id={post_id}");
        }
        Command::Get { id } => {
            let viewer = load_session()
                .context("failed to read session")?
                .map(|session| session.user_id);
            let post = client.get_post(id, viewer).await.map_err(map_client_error)?;
            print_post(&post);
        }
        Command::Recent { limit } => {
            let posts = client
                .recent_posts(Some(limit))
                .await
                .map_err(map_client_error)?;
            print_list(&posts);
        }
        Command::Trending { limit } => {
            let posts = client
                .trending_posts(Some(limit))
                .await
                .map_err(map_client_error)?;
            print_list(&posts);
        }
        Command::Mine => {
            let session = require_session()?;
            let posts = client
                .user_posts(session.user_id)
                .await
                .map_err(map_client_error)?;
            print_list(&posts);
        }
        Command::Update {
            id,
            title,
            content,
            category,
            institution,
        } => {
            let session = require_session()?;
            // Fill in anything the user left out from the current post.
            let current = client
                .get_post(id, Some(session.user_id))
                .await
                .map_err(map_client_error)?;
            let updated = client
                .update_post(
                    session.user_id,
                    id,
                    &PostInput {
                        title: title.unwrap_or(current.title),
                        content: content.unwrap_or(current.content),
                        category: category.unwrap_or(current.category),
                        institution: institution.unwrap_or(current.institution),
                        images: current.images,
                    },
                )
                .await
                .map_err(map_client_error)?;
            print_post(&updated);
        }
        Command::Delete { id } => {
            let session = require_session()?;
            client
                .delete_post(session.user_id, id)
                .await
                .map_err(map_client_error)?;
            println!("Post deleted: id={id}");
        }
        Command::Like { id } => {
            let session = require_session()?;
            let toggle = client
                .toggle_like(id, session.user_id)
                .await
                .map_err(map_client_error)?;
            if toggle.liked {
                println!("Supported post {id} ({} total)", toggle.likes_count);
            } else {
                println!("Removed support from post {id} ({} total)", toggle.likes_count);
            }
        }
        Command::Comment { post_id, content } => {
            let session = require_session()?;
            let comment = client
                .create_comment(post_id, session.user_id, &content)
                .await
                .map_err(map_client_error)?;
            println!("Comment added: id={}", comment.id);
        }
        Command::Uncomment { id } => {
            let session = require_session()?;
            let post_id = client
                .delete_comment(id, session.user_id)
                .await
                .map_err(map_client_error)?;
            println!("Comment deleted from post {post_id}");
        }
        Command::Upload { file } => {
            require_session()?;
            let data = fs::read(&file).with_context(|| format!("failed to read {file}"))?;
            let filename = Path::new(&file)
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| anyhow!("invalid file name: {file}"))?;
            let mime = mime_for(filename)
                .ok_or_else(|| anyhow!("only jpg, jpeg, png and gif files can be uploaded"))?;
            let path = client
                .upload_image(filename, mime, data)
                .await
                .map_err(map_client_error)?;
            println!("Uploaded: {path}");
        }
        Command::Stats => {
            let stats = client.platform_stats().await.map_err(map_client_error)?;
            println!("posts: {}", stats.total_posts);
            println!("institutions: {}", stats.total_institutions);
            println!("users: {}", stats.total_users);
        }
    }

    Ok(())
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn mime_for(filename: &str) -> Option<&'static str> {
    let ext = Path::new(filename).extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

fn parse_session(raw: &str) -> Option<Session> {
    serde_json::from_str(raw.trim()).ok()
}

fn load_session() -> io::Result<Option<Session>> {
    if !Path::new(SESSION_FILE).exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(SESSION_FILE)?;
    Ok(parse_session(&raw))
}

fn require_session() -> Result<Session> {
    load_session()
        .context("failed to read session")?
        .ok_or_else(|| anyhow!("not logged in: run `voices-cli login ...` first"))
}

fn persist_session(user: &User) -> io::Result<()> {
    let session = Session {
        user_id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
    };
    let raw = serde_json::to_string(&session)?;
    fs::write(SESSION_FILE, raw)
}

fn clear_session() -> io::Result<()> {
    if Path::new(SESSION_FILE).exists() {
        fs::remove_file(SESSION_FILE)?;
    }
    Ok(())
}

fn map_client_error(err: VoicesClientError) -> anyhow::Error {
    let message = match err {
        VoicesClientError::Unauthorized(message) => message,
        VoicesClientError::Forbidden(message) => message,
        VoicesClientError::NotFound(message) => message,
        VoicesClientError::InvalidRequest(message) => message,
        VoicesClientError::Http(err) => format!("http error: {err}"),
    };
    anyhow!(message)
}

fn print_user(user: &User) {
    println!("id: {}", user.id);
    println!("name: {}", user.name);
    println!("email: {}", user.email);
    println!("registered: {}", user.created_at);
}

fn print_post(post: &PostDetail) {
    println!("[{}] {}", post.id, post.title);
    println!(
        "by {} | {} | {} | {} supports",
        post.user.name, post.institution, post.category, post.likes
    );
    println!("{}", post.content);
    for image in &post.images {
        println!("image: {image}");
    }
    if post.comments.is_empty() {
        println!("(no comments)");
    } else {
        println!("comments:");
        for comment in &post.comments {
            println!("  [{}] {}: {}", comment.id, comment.user.name, comment.content);
        }
    }
}

fn print_list(posts: &[PostSummary]) {
    if posts.is_empty() {
        println!("(no posts)");
        return;
    }
    for post in posts {
        println!(
            "- [{}] {} (by {}, {} supports, {} comments)",
            post.id, post.title, post.user.name, post.likes_count, post.comments_count
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{mime_for, normalize_server, parse_session};

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://example.com:8080".to_string());
        assert_eq!(s, "https://example.com:8080");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let s = normalize_server("127.0.0.1:9999".to_string());
        assert_eq!(s, "http://127.0.0.1:9999");
    }

    #[test]
    fn parse_session_roundtrips() {
        let session = parse_session(r#"{"user_id":7,"name":"Alice","email":"a@x.com"}"#)
            .expect("session must parse");
        assert_eq!(session.user_id, 7);
        assert_eq!(session.name, "Alice");
    }

    #[test]
    fn parse_session_rejects_garbage() {
        assert!(parse_session("not json").is_none());
    }

    #[test]
    fn mime_for_maps_known_extensions() {
        assert_eq!(mime_for("a.JPG"), Some("image/jpeg"));
        assert_eq!(mime_for("a.png"), Some("image/png"));
        assert_eq!(mime_for("a.gif"), Some("image/gif"));
        assert_eq!(mime_for("a.webp"), None);
        assert_eq!(mime_for("noext"), None);
    }
}
