// Library root
// -----------
// This crate exposes the library surface behind the `bobolink` binary.
//
// Module responsibilities:
// - `config`: process-wide settings resolved once from the environment.
// - `error`: the error type shared by every library module.
// - `transport`: blocking HTTP calls against the service root, with
//   HTTP Basic auth and outcome classification.
// - `api`: one method per remote operation (accounts, tokens, bookmarks,
//   search) and the typed wire records.
// - `credentials`: the saved email/token pair.
// - `render`: search hit highlighting for the terminal.
// - `cli` / `ui`: argument model and the interactive command flows.
pub mod api;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod render;
pub mod transport;
pub mod ui;

pub use api::{ApiClient, SearchField, SearchHit, User};
pub use config::Config;
pub use credentials::{CredentialStore, Credentials};
pub use error::{Error, Result};
