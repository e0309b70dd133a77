use clap::Parser;
use database::Database;

pub mod money;
pub mod period;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Config,
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:expense_tracker.db")]
    pub database_url: String,

    #[arg(long, env = "PORT", default_value = "3001")]
    pub port: u16,
}
