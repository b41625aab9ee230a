//! Table view: loads media entries once per mount and renders them as a grid.
//!
//! # Design
//! The hosting UI drives the lifecycle: it calls `mount` when the view first
//! appears, `reload` to fetch again, and `unmount` when the view goes away.
//! Rendering is a plain function of the current state (`render`), so any
//! display widget can consume the resulting `Grid`.
//!
//! The view is the recovery boundary for load failures. An HTTP failure, a
//! transport fault or an unparseable body all end in `ViewState::Failed`,
//! logged, and never escape as an error.

use tracing::{error, info};

use crate::client::{RequestClient, RequestOptions};
use crate::error::LoadError;
use crate::http::Headers;
use crate::transport::Transport;
use crate::types::MediaEntry;

/// Lifecycle of one load.
#[derive(Debug, Default)]
pub enum ViewState {
    #[default]
    Unloaded,
    Loading,
    Loaded(Vec<MediaEntry>),
    Failed(LoadError),
}

impl ViewState {
    /// Loaded entries, or an empty slice in every other state.
    pub fn items(&self) -> &[MediaEntry] {
        match self {
            ViewState::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            ViewState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// One display column bound to a field path of `MediaEntry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub path: &'static str,
    pub header: &'static str,
    /// Width hint in em.
    pub width_em: u16,
    pub sortable: bool,
}

/// Columns of the media table.
pub const COLUMNS: [Column; 3] = [
    Column {
        path: "name",
        header: "Name",
        width_em: 9,
        sortable: true,
    },
    Column {
        path: "genre",
        header: "Genre",
        width_em: 9,
        sortable: true,
    },
    Column {
        path: "rating",
        header: "Rating",
        width_em: 15,
        sortable: true,
    },
];

/// Rendered structure handed to the display widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<'a> {
    pub columns: &'static [Column],
    /// Rows in load order. The widget sorts if it wants to.
    pub rows: &'a [MediaEntry],
    pub multi_sort: bool,
    /// Status shown instead of or next to the rows, e.g. while loading.
    pub notice: Option<String>,
}

/// Render a view state into a grid.
pub fn render(state: &ViewState) -> Grid<'_> {
    let notice = match state {
        ViewState::Unloaded | ViewState::Loaded(_) => None,
        ViewState::Loading => Some("Loading…".to_string()),
        ViewState::Failed(err) => Some(format!("Could not load entries: {err}")),
    };
    Grid {
        columns: &COLUMNS,
        rows: state.items(),
        multi_sort: true,
        notice,
    }
}

/// A table of media entries fetched from `resources`.
#[derive(Debug)]
pub struct TableView<T> {
    client: RequestClient<T>,
    resources: Option<String>,
    state: ViewState,
    mounted: bool,
}

impl<T: Transport> TableView<T> {
    /// A view that will query `resources` when mounted. An empty address is
    /// treated as missing.
    pub fn new(client: RequestClient<T>, resources: Option<String>) -> Self {
        Self {
            client,
            resources: resources.filter(|r| !r.trim().is_empty()),
            state: ViewState::Unloaded,
            mounted: false,
        }
    }

    pub fn client(&self) -> &RequestClient<T> {
        &self.client
    }

    pub fn resources(&self) -> Option<&str> {
        self.resources.as_deref()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn items(&self) -> &[MediaEntry] {
        self.state.items()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Load entries the first time the view is mounted. Later calls within
    /// the same mount are no-ops. A load that was dropped before finishing
    /// does not count, so the next `mount` loads again.
    pub async fn mount(&mut self) -> &ViewState {
        if !self.mounted {
            self.load().await;
            self.mounted = true;
        }
        &self.state
    }

    /// Discard the current entries and load again.
    pub async fn reload(&mut self) -> &ViewState {
        self.state = ViewState::Unloaded;
        self.mounted = true;
        self.load().await;
        &self.state
    }

    /// Drop loaded entries and return to `Unloaded`. The next `mount` loads
    /// again.
    pub fn unmount(&mut self) {
        self.state = ViewState::Unloaded;
        self.mounted = false;
    }

    pub fn render(&self) -> Grid<'_> {
        render(&self.state)
    }

    async fn load(&mut self) {
        self.state = ViewState::Loading;
        self.state = match self.fetch().await {
            Ok(items) => {
                info!(resources = self.resources(), count = items.len(), "loaded media entries");
                ViewState::Loaded(items)
            }
            Err(err) => {
                error!(resources = self.resources(), error = %err, "failed to load media entries");
                ViewState::Failed(err)
            }
        };
    }

    async fn fetch(&self) -> Result<Vec<MediaEntry>, LoadError> {
        let resources = self.resources.as_deref().ok_or(LoadError::MissingResources)?;
        let response = self
            .client
            .get(resources, Headers::new(), RequestOptions::new())
            .await?;
        response.json().map_err(LoadError::Parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientConfig;
    use crate::error::{ClientError, TransportError};
    use crate::http::{HttpMethod, HttpResponse};
    use crate::testing::ScriptedTransport;

    const SERIES: &str = "http://localhost:5000/media/type/Serie";

    fn view(responses: Vec<HttpResponse>) -> TableView<ScriptedTransport> {
        let client = RequestClient::new(ScriptedTransport::with_responses(responses));
        TableView::new(client, Some(SERIES.to_string()))
    }

    #[tokio::test]
    async fn mount_loads_entries_in_response_order() {
        let mut view = view(vec![HttpResponse::new(
            200,
            r#"[{"name":"Show B","genre":"Comedy","rating":6},{"name":"Show A","genre":"Drama","rating":8.1}]"#,
        )]);
        assert!(matches!(view.state(), ViewState::Unloaded));

        view.mount().await;

        let names: Vec<&str> = view.items().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Show B", "Show A"]);
        let sent = view.client().transport().sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, HttpMethod::Get);
        assert_eq!(sent[0].url, SERIES);
    }

    #[tokio::test]
    async fn single_entry_equals_the_served_object() {
        let mut view = view(vec![HttpResponse::new(
            200,
            r#"[{"name":"Show A","genre":"Drama","rating":8.1}]"#,
        )]);
        view.mount().await;
        assert_eq!(view.items(), &[MediaEntry::new("Show A", "Drama", 8.1)]);
    }

    #[tokio::test]
    async fn empty_array_is_loaded_not_failed() {
        let mut view = view(vec![HttpResponse::new(200, "[]")]);
        view.mount().await;
        assert!(matches!(view.state(), ViewState::Loaded(items) if items.is_empty()));
    }

    #[tokio::test]
    async fn mount_twice_loads_once() {
        let mut view = view(vec![HttpResponse::new(200, "[]")]);
        view.mount().await;
        view.mount().await;
        assert_eq!(view.client().transport().sent().len(), 1);
        assert!(matches!(view.state(), ViewState::Loaded(_)));
    }

    /// Hangs forever on the first send, then answers from the script.
    #[derive(Debug, Default)]
    struct StallFirst {
        calls: std::sync::atomic::AtomicUsize,
        inner: ScriptedTransport,
    }

    impl Transport for StallFirst {
        async fn send(&self, request: crate::http::HttpRequest) -> Result<HttpResponse, TransportError> {
            if self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst) == 0 {
                return std::future::pending().await;
            }
            self.inner.send(request).await
        }
    }

    #[tokio::test]
    async fn mount_after_dropped_load_loads_again() {
        let transport = StallFirst::default();
        transport.inner.push_response(HttpResponse::new(200, r#"[{"name":"A","genre":"Drama","rating":1}]"#));
        let mut view = TableView::new(RequestClient::new(transport), Some(SERIES.to_string()));

        tokio::select! {
            biased;
            _ = view.mount() => panic!("first load should still be in flight"),
            _ = std::future::ready(()) => {}
        }
        assert!(matches!(view.state(), ViewState::Loading));
        assert!(!view.is_mounted());

        view.mount().await;
        assert_eq!(view.items().len(), 1);
        assert!(view.is_mounted());
    }

    #[tokio::test]
    async fn malformed_json_fails_without_panicking() {
        let mut view = view(vec![HttpResponse::new(200, "[{not json")]);
        view.mount().await;
        assert!(matches!(view.state(), ViewState::Failed(LoadError::Parse(_))));
        assert!(view.items().is_empty());
    }

    #[tokio::test]
    async fn non_array_payload_fails() {
        let mut view = view(vec![HttpResponse::new(200, r#"{"name":"Show A"}"#)]);
        view.mount().await;
        assert!(matches!(view.state(), ViewState::Failed(LoadError::Parse(_))));
    }

    #[tokio::test]
    async fn http_failure_is_recorded() {
        let mut view = view(vec![HttpResponse::new(404, "")]);
        view.mount().await;
        let err = view.state().error().unwrap();
        assert_eq!(err.http_error().map(|e| e.status()), Some(404));
        assert!(view.render().notice.unwrap().contains("404"));
    }

    #[tokio::test]
    async fn transport_fault_is_recorded() {
        let transport = ScriptedTransport::new();
        transport.push_failure(TransportError::new("dns lookup failed"));
        let mut view = TableView::new(RequestClient::new(transport), Some(SERIES.to_string()));
        view.mount().await;
        assert!(matches!(
            view.state(),
            ViewState::Failed(LoadError::Request(ClientError::Transport(_)))
        ));
    }

    #[tokio::test]
    async fn missing_resources_fails_at_mount() {
        let client = RequestClient::new(ScriptedTransport::new());
        let mut view = TableView::new(client, Some("   ".to_string()));
        assert!(view.resources().is_none());
        view.mount().await;
        assert!(matches!(view.state(), ViewState::Failed(LoadError::MissingResources)));
        assert!(view.client().transport().sent().is_empty());
    }

    #[tokio::test]
    async fn reload_replaces_previous_items() {
        let mut view = view(vec![
            HttpResponse::new(200, r#"[{"name":"Old","genre":"Drama","rating":1}]"#),
            HttpResponse::new(200, r#"[{"name":"New","genre":"Drama","rating":2}]"#),
        ]);
        view.mount().await;
        assert_eq!(view.items()[0].name, "Old");

        view.reload().await;
        assert_eq!(view.items().len(), 1);
        assert_eq!(view.items()[0].name, "New");
    }

    #[tokio::test]
    async fn unmount_discards_items_and_allows_remount() {
        let mut view = view(vec![
            HttpResponse::new(200, r#"[{"name":"A","genre":"Drama","rating":1}]"#),
            HttpResponse::new(200, "[]"),
        ]);
        view.mount().await;
        view.unmount();
        assert!(!view.is_mounted());
        assert!(view.items().is_empty());

        view.mount().await;
        assert!(matches!(view.state(), ViewState::Loaded(items) if items.is_empty()));
    }

    #[tokio::test]
    async fn configured_client_flags_reach_the_load_request() {
        let transport = ScriptedTransport::with_responses([HttpResponse::new(200, "[]")]);
        let config = ClientConfig {
            include_credentials: true,
            use_cors_mode: false,
        };
        let mut view = TableView::new(RequestClient::with_config(transport, config), Some(SERIES.to_string()));
        view.mount().await;
        let sent = view.client().transport().last_sent().unwrap();
        assert_eq!(sent.credentials, Some(crate::http::Credentials::Include));
        assert_eq!(sent.mode, None);
    }

    #[test]
    fn render_binds_three_width_hinted_columns() {
        let grid = render(&ViewState::Unloaded);
        let paths: Vec<&str> = grid.columns.iter().map(|c| c.path).collect();
        assert_eq!(paths, vec!["name", "genre", "rating"]);
        let widths: Vec<u16> = grid.columns.iter().map(|c| c.width_em).collect();
        assert_eq!(widths, vec![9, 9, 15]);
        assert!(grid.multi_sort);
        assert!(grid.rows.is_empty());
        assert!(grid.notice.is_none());
    }

    #[test]
    fn render_shows_loading_notice() {
        let grid = render(&ViewState::Loading);
        assert_eq!(grid.notice.as_deref(), Some("Loading…"));
    }
}
