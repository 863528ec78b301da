// CLI module: argument model for every subcommand, parsed with clap's
// derive API. Flows live in `ui`.

use crate::api::SearchField;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bobolink", version, about = "Bobolink - dump links, search them later.")]
pub struct Cli {
    /// Log requests and responses to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Create a new bobolink user
    Signup {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Fetch an API token and write the credentials file
    ///
    /// Rerun at any time to refresh the token.
    Configure {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Add bookmarks to your store; they become searchable immediately
    ///
    /// Re-adding an existing URL refreshes its searchable content.
    Add {
        /// Whitespace separated list of URLs
        urls: Vec<String>,
    },
    /// Delete bookmarks from your store
    Delete {
        /// Whitespace separated list of URLs
        urls: Vec<String>,
    },
    /// Print every stored bookmark URL
    Export,
    /// Search your bookmarks
    ///
    /// Without --field the text content of each bookmarked page is searched
    /// and matches are highlighted. Support for highlighting varies by terminal.
    Search {
        query: String,
        #[arg(long, value_enum, help = "The bookmark field to search on")]
        field: Option<SearchField>,
        #[arg(long, help = "Only print the URL of each match")]
        url_only: bool,
    },
    /// Reset a forgotten password
    ///
    /// Without --token a reset token is mailed to you first.
    ResetPassword {
        #[arg(long)]
        email: Option<String>,
        #[arg(long, help = "Reset token received by email")]
        token: Option<String>,
        #[arg(long)]
        new_password: Option<String>,
    },
}

impl Cmd {
    /// Short description used when reporting a failure.
    pub fn action(&self) -> &'static str {
        match self {
            Cmd::Signup { .. } => "creating user",
            Cmd::Configure { .. } => "configuring environment",
            Cmd::Add { .. } => "adding bookmarks",
            Cmd::Delete { .. } => "deleting bookmarks",
            Cmd::Export => "exporting bookmarks",
            Cmd::Search { .. } => "searching bookmarks",
            Cmd::ResetPassword { .. } => "resetting password",
        }
    }
}
