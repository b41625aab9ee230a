//! Core of the FancyFilms media table.
//!
//! # Overview
//! `RequestClient` sends JSON requests through an injected `Transport` and
//! turns non-2xx responses into `HttpError`. `TableView` uses it to load one
//! list of `MediaEntry` values per mount and renders them as a `Grid` for a
//! display widget.
//!
//! # Design
//! - `RequestClient` holds no mutable state; its configuration is fixed at
//!   construction and per-call overrides go through `RequestOptions`.
//! - Requests are built as plain data (`build_request`) before they are sent,
//!   so construction is testable without a server.
//! - The transport is a trait. `ReqwestTransport` talks to the network;
//!   `testing::ScriptedTransport` replays canned responses.
//! - `TableView` is the recovery boundary: load failures end in
//!   `ViewState::Failed` and are logged.

pub mod client;
pub mod error;
pub mod http;
pub mod testing;
pub mod transport;
pub mod types;
pub mod view;

pub use client::{ClientConfig, RequestClient, RequestOptions};
pub use error::{ClientError, HttpError, LoadError, TransportError};
pub use http::{Credentials, Headers, HttpMethod, HttpRequest, HttpResponse, RequestMode};
pub use transport::{ReqwestTransport, Transport};
pub use types::{Cell, MediaEntry, Rating};
pub use view::{render, Column, Grid, TableView, ViewState, COLUMNS};
