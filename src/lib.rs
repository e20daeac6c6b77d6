pub mod args;

use std::time::Duration;

use attribution::{AttributionRunner, AttributionSession, RunReport};
use clients::api::Result;
use github_client::GithubClientBuilder;

pub use args::Args;

/// Builds the GitHub client, runs one attribution walk for `args.username`
/// and returns the final report. Notices raised along the way are printed to
/// stderr while the run proceeds. Returns `None` when no run started (empty
/// username) or the run task failed outright.
pub async fn run_attribution(args: Args) -> Result<Option<RunReport>> {
    let mut builder = GithubClientBuilder::default().with_github_url(&args.api_url);
    if let Some(token) = args.api_token {
        builder = builder.try_with_token(token)?;
    }
    let client = builder.build()?;

    let runner = AttributionRunner::new(client, Duration::from_millis(args.pacing_ms));
    let (notice_tx, mut notice_rx) = tokio::sync::mpsc::channel(16);
    let mut session = AttributionSession::new(runner, notice_tx);

    let printer = tokio::spawn(async move {
        while let Some(notice) = notice_rx.recv().await {
            eprintln!("{}", notice);
        }
    });

    session.start(args.username);
    let report = session.wait().await;

    // Dropping the session closes the notice channel.
    drop(session);
    let _ = printer.await;

    Ok(report)
}
