use clap::Parser;
use secrecy::SecretString;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// GitHub username whose commit authorship gets attributed
    #[clap(short, long, env)]
    pub username: String,

    /// API OAuth access token
    #[clap(short, long, env)]
    pub api_token: Option<SecretString>,

    /// Repository API URL
    #[clap(long, env, default_value = "https://api.github.com")]
    pub api_url: String,

    /// Pause between repository requests in milliseconds
    #[clap(long, env, default_value_t = 2000)]
    pub pacing_ms: u64,
}
