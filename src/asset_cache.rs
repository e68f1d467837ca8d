//! The offline asset cache.
//!
//! A fixed manifest of static assets is read into a named cache when the
//! server starts. Requests for those paths are answered from the cache first,
//! everything else falls through to the static directory. The service worker
//! in `static/service-worker.js` does the same in the browser.
//!
//! The cache is never invalidated. Change [CACHE_NAME] or [ASSET_MANIFEST] to
//! ship new assets.

use std::{
    collections::HashMap,
    fmt::Debug,
    path::{Component, Path, PathBuf},
    sync::Arc,
};

use axum::{
    body::Bytes,
    extract::{Request, State},
    http::{Method, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::Error;

/// The name of the cache, shared with the service worker.
pub const CACHE_NAME: &str = "budget-cache";

/// The root-relative paths that are cached on install.
pub const ASSET_MANIFEST: [&str; 7] = [
    "/offline.html",
    "/style.css",
    "/app.js",
    "/service-worker.js",
    "/manifest.json",
    "/icon-192.png",
    "/icon-512.png",
];

/// Somewhere assets can be fetched from.
pub trait AssetSource: Debug {
    /// Fetch the asset at the root-relative `path`.
    ///
    /// # Errors
    /// Returns an [Error::AssetFetchError] if the asset cannot be read.
    fn fetch(&self, path: &str) -> Result<Bytes, Error>;
}

/// Serves assets from a directory on disk.
#[derive(Debug, Clone)]
pub struct StaticDir {
    root: PathBuf,
}

impl StaticDir {
    /// Create a source that reads files under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory assets are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for StaticDir {
    fn fetch(&self, path: &str) -> Result<Bytes, Error> {
        let relative_path = Path::new(path.trim_start_matches('/'));

        if relative_path
            .components()
            .any(|component| !matches!(component, Component::Normal(_)))
        {
            return Err(Error::AssetFetchError {
                path: path.to_owned(),
                reason: "path must stay inside the static directory".to_owned(),
            });
        }

        std::fs::read(self.root.join(relative_path))
            .map(Bytes::from)
            .map_err(|error| Error::AssetFetchError {
                path: path.to_owned(),
                reason: error.to_string(),
            })
    }
}

/// A named set of assets held in memory.
#[derive(Debug, Clone, Default)]
pub struct AssetCache {
    name: String,
    assets: HashMap<String, Bytes>,
}

impl AssetCache {
    /// Fetch every path in `paths` from `source` and store it under `name`.
    ///
    /// # Errors
    /// Returns the first fetch error. Nothing is cached in that case.
    pub fn install<S>(name: &str, paths: &[&str], source: &S) -> Result<Self, Error>
    where
        S: AssetSource + ?Sized,
    {
        let mut assets = HashMap::with_capacity(paths.len());

        for &path in paths {
            let body = source.fetch(path)?;
            assets.insert(path.to_owned(), body);
        }

        Ok(Self {
            name: name.to_owned(),
            assets,
        })
    }

    /// A cache with nothing in it, used when install fails.
    pub fn empty(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            assets: HashMap::new(),
        }
    }

    /// The cached asset stored under exactly `path`.
    pub fn get(&self, path: &str) -> Option<&Bytes> {
        self.assets.get(path)
    }

    /// The name of the cache.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of cached assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether the cache has no assets.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

fn content_type_for(path: &str) -> &'static str {
    match Path::new(path).extension().and_then(|extension| extension.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Answer GET requests for cached paths from `cache`, pass everything else on.
pub async fn cache_first(
    State(cache): State<Arc<AssetCache>>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::GET {
        let path = request.uri().path();

        if let Some(body) = cache.get(path) {
            tracing::debug!("serving {path} from {}", cache.name());
            return ([(CONTENT_TYPE, content_type_for(path))], body.clone()).into_response();
        }
    }

    next.run(request).await
}
