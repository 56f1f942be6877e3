/// GitHub adapters
mod gh_cli;

pub use gh_cli::GhCliPullRequestSource;
