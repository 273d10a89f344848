use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use geheimezender::api::StreamClient;
use geheimezender::error::Error;
use geheimezender::error::Result;
use geheimezender::player::play_stream;
use geheimezender::player::DEFAULT_PLAYER;
use geheimezender::schema::FileFormat;
use geheimezender::select::choose_stream;
use geheimezender::select::print_streams;
use log::debug;

#[derive(Parser)]
struct Opts {
    /// Full filesystem path to the preferred player
    #[arg(long, default_value = DEFAULT_PLAYER)]
    player: PathBuf,
    /// File format to play from the options the website gives
    #[arg(long, value_enum, default_value_t)]
    filetype: FileFormat,
}

#[tokio::main]
async fn main() -> ExitCode {
    pretty_env_logger::init();

    let opts = Opts::parse();
    let result = match StreamClient::with_default_url() {
        Ok(client) => run(&client, &opts).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("{e:?}");
            report(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(client: &StreamClient, opts: &Opts) -> Result<()> {
    let streams = client.fetch_streams().await?;
    if streams.is_empty() {
        return Err(Error::EmptyResult);
    }

    let stdout = io::stdout();
    print_streams(&streams, stdout.lock())?;
    let stream = choose_stream(&streams, io::stdin().lock(), stdout.lock())?;

    let mut stdout = stdout.lock();
    writeln!(stdout, "\nPlaying {}", stream.title())?;
    stdout.flush()?;
    drop(stdout);

    play_stream(stream, opts.filetype, &opts.player)
}

fn report(e: &Error) {
    match e {
        Error::EmptyResult => println!("{e}"),
        e if e.is_playback() => println!("Error playing stream:\n{e}"),
        Error::Network(_) | Error::HttpStatus { .. } | Error::Parse(_) | Error::InvalidUrl(_) => {
            println!("Error fetching streams:\n{e}")
        }
        e => println!("{e}"),
    }
}
