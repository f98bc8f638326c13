mod commands;
mod input;
mod output;
mod terminal;

use commands::CommandLine;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CommandLine::parse_args();

    logging::init(args.verbose);
    print::banner();

    commands::sweep::run(args).await
}
