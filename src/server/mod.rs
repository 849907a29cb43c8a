//! Static file server for local development.
//!
//! Serves files below a root directory with a content type guessed from the
//! extension. `/` maps to `index.html`.

mod mime;

use mime::mime_type_for;

use std::io::ErrorKind;
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Build the router serving files from `root`.
pub fn router(root: impl Into<PathBuf>) -> Router {
    Router::new()
        .fallback(serve_file)
        .with_state(Arc::new(root.into()))
}

/// Bind to `addr` and serve `root` until the process exits.
pub async fn serve(addr: SocketAddr, root: PathBuf) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    let local_addr = listener.local_addr()?;

    info!("Serving {}", root.display());
    info!("Server running at http://{}/", local_addr);

    axum::serve(listener, router(root))
        .await
        .context("Server error")
}

/// Map a request path to a file below `root`.
///
/// Returns `None` for paths that would leave the root.
fn resolve_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = request_path.trim_start_matches('/');
    let relative = if relative.is_empty() {
        "index.html"
    } else {
        relative
    };

    let mut resolved = root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(resolved)
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain")],
        "404 Not Found",
    )
        .into_response()
}

async fn serve_file(State(root): State<Arc<PathBuf>>, uri: Uri) -> Response {
    let pathname = uri.path();
    info!("request {} pathname {}", uri, pathname);

    let Some(path) = resolve_path(&root, pathname) else {
        warn!("Rejected path outside the served root: {}", pathname);
        return not_found();
    };

    match tokio::fs::read(&path).await {
        Ok(content) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, mime_type_for(&path))],
            content,
        )
            .into_response(),
        Err(err) if err.kind() == ErrorKind::NotFound => not_found(),
        Err(err) => {
            warn!("Failed to read {}: {}", path.display(), err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!(
                    "Sorry, check with the site admin for error: {:?} ..\n",
                    err.kind()
                ),
            )
                .into_response()
        }
    }
}
