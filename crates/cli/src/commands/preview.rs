use crate::site::{Site, load_collections};
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Path as UrlPath, State},
    http::{StatusCode, header},
    response::{
        Html, IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use garden_content::ContentSource;
use garden_core::{Error as GardenError, Garden};
use garden_generator::{RSS_CONTENT_TYPE, build_feed, render_index, render_post, render_rss};
use notify::{Event as NotifyEvent, EventKind, RecursiveMode, Watcher};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::sync::broadcast;
use tower_http::{services::ServeDir, trace::TraceLayer};

#[derive(Clone)]
struct AppState {
    garden: Arc<Garden>,
    source: Arc<dyn ContentSource>,
    reload_tx: broadcast::Sender<()>,
}

/// Start preview server with hot reload for local development.
///
/// Every request loads content fresh from disk, so edits show up on the
/// next reload without restarting. Changes to garden.toml need a restart.
pub async fn run(path: PathBuf, port: u16) -> Result<()> {
    println!("🌱 Starting preview server...");
    println!("   Site: {}", path.display());

    let site = Site::load(&path)?;
    let content_root = site.source.root().to_path_buf();

    println!("   ✓ Loaded: {}", site.garden.site.title);
    println!("   ✓ Collections: {}", site.garden.collection_names().join(", "));

    let (reload_tx, _) = broadcast::channel::<()>(100);

    let state = AppState {
        garden: Arc::new(site.garden),
        source: Arc::new(site.source),
        reload_tx: reload_tx.clone(),
    };

    let public_dir = path.join("public");
    let app = router(state).fallback_service(ServeDir::new(public_dir));

    // Start file watcher
    let watcher_tx = reload_tx.clone();
    tokio::spawn(async move {
        if let Err(e) = watch_files(content_root, watcher_tx).await {
            tracing::error!("file watcher error: {e:#}");
        }
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\n🚀 Preview ready at: http://localhost:{}", port);
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(index_handler))
        .route(&state.garden.feed.route(), get(feed_handler))
        .route("/_reload", get(sse_handler));

    // Only configured collections get post routes; anything else falls through
    for name in state.garden.collection_names() {
        let collection = name.to_string();
        router = router.route(
            &format!("/{}/{{*slug}}", name),
            get(
                move |State(state): State<AppState>, UrlPath(slug): UrlPath<String>| {
                    post_handler(state, collection.clone(), slug)
                },
            ),
        );
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

fn error_response(status: StatusCode, err: GardenError) -> Response {
    tracing::error!(%status, "request failed: {}", err);
    (status, err.to_string()).into_response()
}

/// Pages answer 404 for collections that are not configured
fn page_error(err: GardenError) -> Response {
    let status = match &err {
        GardenError::UnknownCollection(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, err)
}

/// Feed endpoint: fetch, build and render on every request.
/// Any failure is a 500; a partial feed is never served.
async fn feed_handler(State(state): State<AppState>) -> Response {
    let posts = match state.source.get_collection(&state.garden.feed.collection).await {
        Ok(posts) => posts,
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, e),
    };

    let document = build_feed(&posts, &state.garden.site);
    match render_rss(&document) {
        Ok(xml) => ([(header::CONTENT_TYPE, RSS_CONTENT_TYPE)], xml).into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}

async fn index_handler(State(state): State<AppState>) -> Response {
    match load_collections(state.source.as_ref(), &state.garden).await {
        Ok(collections) => Html(render_index(
            &state.garden.site,
            &state.garden.feed.route(),
            &collections,
            true,
        ))
        .into_response(),
        Err(e) => page_error(e),
    }
}

/// Post page. Drafts are served too so they can be previewed.
async fn post_handler(state: AppState, collection: String, slug: String) -> Response {
    let slug = slug.trim_end_matches('/');
    let posts = match state.source.get_collection(&collection).await {
        Ok(posts) => posts,
        Err(e) => return page_error(e),
    };

    match posts.iter().find(|post| post.slug == slug) {
        Some(post) => Html(render_post(
            &state.garden.site,
            &state.garden.feed.route(),
            post,
            true,
        ))
        .into_response(),
        None => (StatusCode::NOT_FOUND, format!("No post '{}' in '{}'", slug, collection))
            .into_response(),
    }
}

/// Watch for file changes and trigger reload
async fn watch_files(path: PathBuf, reload_tx: broadcast::Sender<()>) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut watcher =
        notify::recommended_watcher(move |res: Result<NotifyEvent, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.blocking_send(event);
            }
        })?;

    watcher.watch(&path, RecursiveMode::Recursive)?;

    while let Some(event) = rx.recv().await {
        match event.kind {
            EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_) => {
                // Filter out temporary files and hidden files
                if event.paths.iter().any(|p| {
                    let filename = p.file_name().unwrap_or_default().to_string_lossy();
                    !filename.starts_with('.') && !filename.ends_with('~')
                }) {
                    println!("   📝 Content changed, reloading...");
                    let _ = reload_tx.send(());
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// SSE endpoint for hot reload
async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl futures::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let mut rx = state.reload_tx.subscribe();

    let stream = async_stream::stream! {
        loop {
            if rx.recv().await.is_ok() {
                yield Ok(Event::default().data("reload"));
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}
