//! MPD protocol client
//!
//! The daemon speaks a line-based text protocol. Commands issued from the
//! input handlers are fire-and-forget: they are pushed onto a channel and a
//! background task owns the connection, writes each command, and drains the
//! `OK`/`ACK` reply. Failures are logged, never surfaced to the caller.

use anyhow::{Context, Result, bail};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::model::song::{SharedSong, Song};

/// Commands the client can send to the daemon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MpdCommand {
    Add(String),
    Play(Option<usize>),
    Pause,
    Stop,
    Next,
    Previous,
    Delete(usize),
    Clear,
}

impl MpdCommand {
    fn to_line(&self) -> String {
        match self {
            MpdCommand::Add(uri) => format!("add \"{}\"", escape(uri)),
            MpdCommand::Play(Some(pos)) => format!("play {}", pos),
            MpdCommand::Play(None) => "play".to_string(),
            MpdCommand::Pause => "pause".to_string(),
            MpdCommand::Stop => "stop".to_string(),
            MpdCommand::Next => "next".to_string(),
            MpdCommand::Previous => "previous".to_string(),
            MpdCommand::Delete(pos) => format!("delete {}", pos),
            MpdCommand::Clear => "clear".to_string(),
        }
    }
}

fn escape(argument: &str) -> String {
    argument.replace('\\', "\\\\").replace('"', "\\\"")
}

#[derive(Clone)]
pub struct MpdClient {
    tx: mpsc::UnboundedSender<MpdCommand>,
}

impl MpdClient {
    /// Creates a detached handle and the receiving end of its command
    /// stream. `connect` wires the receiver to a real connection; tests
    /// inspect it directly.
    pub(crate) fn pair() -> (Self, UnboundedReceiver<MpdCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Connects to the daemon and spawns the command-writer task.
    pub async fn connect(host: &str, port: u16) -> Result<Self> {
        let stream = TcpStream::connect((host, port))
            .await
            .with_context(|| format!("connecting to mpd at {}:{}", host, port))?;
        let mut reader = BufReader::new(stream);

        let mut banner = String::new();
        reader.read_line(&mut banner).await?;
        if !banner.starts_with("OK MPD") {
            bail!("unexpected greeting from {}:{}: {}", host, port, banner.trim_end());
        }
        tracing::info!(host, port, banner = banner.trim_end(), "connected to mpd");

        let (client, rx) = Self::pair();
        tokio::spawn(run_connection(reader, rx));
        Ok(client)
    }

    /// Queues a command for the daemon. Fire-and-forget: delivery and the
    /// daemon's reply are handled by the connection task.
    pub fn send(&self, command: MpdCommand) {
        tracing::debug!(?command, "mpd command");
        if self.tx.send(command).is_err() {
            tracing::warn!("mpd connection task has gone away, command dropped");
        }
    }

    /// Fetches the daemon's whole database over a short-lived second
    /// connection. Called once at startup to seed the browse listing.
    pub async fn load_library(host: &str, port: u16) -> Result<Vec<SharedSong>> {
        let stream = TcpStream::connect((host, port))
            .await
            .with_context(|| format!("connecting to mpd at {}:{}", host, port))?;
        let mut reader = BufReader::new(stream);

        let mut banner = String::new();
        reader.read_line(&mut banner).await?;
        if !banner.starts_with("OK MPD") {
            bail!("unexpected greeting from {}:{}: {}", host, port, banner.trim_end());
        }

        reader.get_mut().write_all(b"listallinfo\n").await?;

        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).await? == 0 {
                bail!("mpd closed the connection during listallinfo");
            }
            let line = line.trim_end().to_string();
            if line == "OK" {
                break;
            }
            if line.starts_with("ACK") {
                bail!("listallinfo failed: {}", line);
            }
            lines.push(line);
        }

        let library = parse_library_response(&lines);
        tracing::info!(songs = library.len(), "library loaded");
        Ok(library)
    }
}

/// Writes each queued command and drains the reply so the stream stays in
/// step. `ACK` replies are logged and swallowed.
async fn run_connection(
    mut reader: BufReader<TcpStream>,
    mut rx: UnboundedReceiver<MpdCommand>,
) {
    while let Some(command) = rx.recv().await {
        let line = command.to_line();
        if let Err(e) = reader.get_mut().write_all(format!("{}\n", line).as_bytes()).await {
            tracing::warn!(error = %e, command = %line, "mpd write failed");
            return;
        }

        let mut reply = String::new();
        match reader.read_line(&mut reply).await {
            Ok(0) => {
                tracing::warn!("mpd closed the connection");
                return;
            }
            Ok(_) => {
                let reply = reply.trim_end();
                if reply.starts_with("ACK") {
                    tracing::warn!(command = %line, reply, "mpd rejected command");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "mpd read failed");
                return;
            }
        }
    }
}

/// Turns `listallinfo` response lines into songs. A `file:` line starts a
/// new entry; tag lines fill in the most recent one.
fn parse_library_response(lines: &[String]) -> Vec<SharedSong> {
    let mut songs: Vec<Song> = Vec::new();
    for line in lines {
        let Some((key, value)) = line.split_once(": ") else {
            continue;
        };
        match key {
            "file" => songs.push(Song::new(value)),
            "Artist" => {
                if let Some(song) = songs.last_mut() {
                    song.artist = value.to_string();
                }
            }
            "Title" => {
                if let Some(song) = songs.last_mut() {
                    song.title = value.to_string();
                }
            }
            "Album" => {
                if let Some(song) = songs.last_mut() {
                    song.album = value.to_string();
                }
            }
            "Time" => {
                if let Some(song) = songs.last_mut() {
                    song.duration_secs = value.parse().unwrap_or(0);
                }
            }
            // directory:, Last-Modified:, Genre:, ... are not needed
            _ => {}
        }
    }
    songs.into_iter().map(std::sync::Arc::new).collect()
}
