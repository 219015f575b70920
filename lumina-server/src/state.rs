//! Application state

use anyhow::{Context, Result};
use lumina_core::reader::{validate_budget, ReaderSession, DEFAULT_PAGE_CHAR_BUDGET};
use lumina_core::store::FileStore;
use lumina_core::storefront::{Catalog, Storefront, User};
use lumina_core::types::Announcement;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

/// Server settings read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory for persisted storefront state
    pub data_path: PathBuf,

    /// Characters per page for spread reader sessions
    pub page_char_budget: i64,

    /// Address to listen on
    pub addr: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("./lumina_data"),
            page_char_budget: DEFAULT_PAGE_CHAR_BUDGET,
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

impl Config {
    /// Read `LUMINA_DATA_PATH`, `LUMINA_PAGE_CHAR_BUDGET` and `LUMINA_ADDR`,
    /// falling back to defaults for unset variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("LUMINA_DATA_PATH") {
            config.data_path = PathBuf::from(path);
        }

        if let Ok(budget) = std::env::var("LUMINA_PAGE_CHAR_BUDGET") {
            let budget: i64 = budget
                .trim()
                .parse()
                .with_context(|| format!("LUMINA_PAGE_CHAR_BUDGET is not a number: {}", budget))?;
            validate_budget(budget).context("LUMINA_PAGE_CHAR_BUDGET must be positive")?;
            config.page_char_budget = budget;
        }

        if let Ok(addr) = std::env::var("LUMINA_ADDR") {
            config.addr = addr
                .parse()
                .with_context(|| format!("LUMINA_ADDR is not a socket address: {}", addr))?;
        }

        Ok(config)
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Catalog plus persisted reader state
    pub storefront: Storefront,

    /// Characters per page for new reader sessions
    pub page_char_budget: i64,

    /// Signed-in reader, if any
    pub user: Arc<RwLock<Option<User>>>,

    /// Open spread reader sessions
    pub sessions: Arc<RwLock<HashMap<Uuid, ReaderSession>>>,

    /// Channel for SSE events
    pub event_tx: broadcast::Sender<ServerEvent>,
}

/// Server-sent events
#[derive(Debug, Clone)]
pub enum ServerEvent {
    /// A book was added to a library by upload
    BookUploaded {
        publisher: String,
        id: String,
        title: String,
    },

    /// A catalog book was bought
    BookPurchased { publisher: String, id: String },

    /// A book was sent as a gift
    GiftSent { book_id: String, recipient: String },

    /// Simulated push notification
    Notification { announcement: Announcement },

    /// An error occurred
    Error { message: String },
}

impl AppState {
    /// Create application state from config, storing data under `config.data_path`
    pub async fn new(config: &Config) -> Result<Self> {
        tokio::fs::create_dir_all(&config.data_path)
            .await
            .with_context(|| format!("Failed to create {}", config.data_path.display()))?;

        let store = Arc::new(FileStore::new(config.data_path.join("store")));
        Ok(Self::with_store(store, config))
    }

    /// Create application state over an existing store
    pub fn with_store(store: Arc<dyn lumina_core::store::KeyValueStore>, config: &Config) -> Self {
        let (event_tx, _) = broadcast::channel(100);

        Self {
            storefront: Storefront::new(store, Arc::new(Catalog::builtin())),
            page_char_budget: config.page_char_budget,
            user: Arc::new(RwLock::new(None)),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            event_tx,
        }
    }

    /// The signed-in user, if any
    pub async fn current_user(&self) -> Option<User> {
        self.user.read().await.clone()
    }

    /// Subscribe to server events
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.event_tx.subscribe()
    }

    /// Broadcast an event
    pub fn broadcast(&self, event: ServerEvent) {
        // Ignore errors (no subscribers)
        let _ = self.event_tx.send(event);
    }
}
