use attribution::RunReport;
use attribution_app::Args;
use clap::Parser;
use clients::api::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    env_logger::init();
    let args = Args::parse();

    if let Some(report) = attribution_app::run_attribution(args).await? {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &RunReport) {
    let state = &report.state;
    println!("status: {:?}", report.status);
    println!(
        "repositories: {}/{}\tcommits: {}\tfinished: {}",
        state.repos_processed(),
        state.repos_discovered(),
        state.commits_processed(),
        state.is_finished()
    );
    for (name, repo) in state.username_mapping() {
        println!("username\t{}\t{}", name, repo);
    }
    for (email, repo) in state.email_mapping() {
        println!("email\t{}\t{}", email, repo);
    }
    for (identity, repo) in state.unknown_mapping() {
        println!("unknown\t{}\t{}", identity, repo);
    }
}
