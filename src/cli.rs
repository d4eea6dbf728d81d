use clap::Parser;

pub const DEFAULT_PORT: u16 = 4000;

#[derive(Parser, Debug)]
#[command(name = "hobbyist")]
#[command(
    author,
    version,
    about = "A GraphQL API for users, their posts and their hobbies"
)]
pub struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}
