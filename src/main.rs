use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use session_client::{
    ActionResult, ApiError, AuthProvider, ClientConfig, ConfigError, FileTokenStore, HttpAuthApi, Role, StoreError,
    TokenStore,
};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("api client setup failed: {0}")]
    Api(#[from] ApiError),
    #[error("token store failed: {0}")]
    Store(#[from] StoreError),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "session-cli", about = "Session and editor-request client for the auth API")]
struct Cli {
    /// Overrides `AUTH_API_BASE_URL`.
    #[arg(long)]
    base_url: Option<String>,

    /// Overrides `AUTH_TOKEN_PATH`.
    #[arg(long)]
    token_path: Option<PathBuf>,

    /// Do not send the stored fallback token as a bearer credential.
    #[arg(long, default_value_t = false)]
    no_bearer: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the current session.
    Me,
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "AUTH_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "AUTH_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, default_value = "Viewer")]
        role: Role,
    },
    /// Ask to be promoted to Editor.
    RequestEditor,
    /// List pending editor requests (admin).
    EditorRequests,
    Approve {
        user_id: String,
    },
    Reject {
        user_id: String,
    },
    Logout,
}

#[tokio::main]
async fn main() -> Result<ExitCode, CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    tracing::debug!(base_url = %config.base_url, token_path = %config.token_path.display(), "config resolved");

    let tokens = Arc::new(FileTokenStore::new(config.token_path.clone()));
    let bearer = if config.bearer_fallback { tokens.load()? } else { None };
    let api = Arc::new(HttpAuthApi::new(&config.base_url)?.with_bearer_token(bearer));
    let auth = AuthProvider::connect(api, tokens).await;

    let succeeded = match cli.command {
        Command::Me => {
            print_json(&session_json(&auth))?;
            auth.is_authenticated()
        }
        Command::Login { email, password } => report(auth.login(&email, &password).await)?,
        Command::Register { username, email, password, role } => {
            report(auth.register(&username, &email, &password, role).await)?
        }
        Command::RequestEditor => report(auth.request_editor_role().await)?,
        Command::EditorRequests => report(auth.list_editor_requests().await)?,
        Command::Approve { user_id } => report(auth.approve_editor_request(&user_id).await)?,
        Command::Reject { user_id } => report(auth.reject_editor_request(&user_id).await)?,
        Command::Logout => {
            auth.logout().await;
            print_json(&session_json(&auth))?;
            true
        }
    };

    Ok(if succeeded { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn resolve_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        base_url.trim_end_matches('/').clone_into(&mut config.base_url);
    }
    if let Some(token_path) = &cli.token_path {
        config.token_path.clone_from(token_path);
    }
    if cli.no_bearer {
        config.bearer_fallback = false;
    }
    Ok(config)
}

fn session_json(auth: &AuthProvider) -> Value {
    let state = auth.snapshot();
    json!({
        "authenticated": state.is_authenticated(),
        "user": state.user,
        "isAdmin": state.is_admin(),
        "isEditor": state.is_editor(),
        "isViewer": state.is_viewer(),
    })
}

fn report(result: ActionResult) -> Result<bool, CliError> {
    print_json(&result)?;
    Ok(result.is_success())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
