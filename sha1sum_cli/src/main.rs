use std::fs::File;
use std::io::{ErrorKind, Read, Seek};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sha1sum::{DigestContext, DIGEST_LEN};

/// Prints the SHA-1 digest of a file, reusing one digest context per round.
#[derive(Parser)]
#[command(name = "sha1sum")]
#[command(version, about, long_about = None)]
struct Cli {
    /// File to hash
    path: PathBuf,

    /// How many times to hash the file
    #[arg(short, long, default_value_t = 2)]
    rounds: usize,

    /// Size of each read passed to the digest context
    #[arg(short, long, default_value = "8192")]
    chunk_size: NonZeroUsize,

    /// Print the digest without the leading 0x
    #[arg(long)]
    no_prefix: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_module("sha1sum", log::LevelFilter::Trace)
            .format_timestamp_millis()
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let mut file = File::open(&cli.path)
        .with_context(|| format!("Failed to open {}", cli.path.display()))?;
    let mut buffer = vec![0; cli.chunk_size.get()];
    let mut ctx = DigestContext::create(None).context("Error creating checksum")?;

    for _ in 0..cli.rounds {
        let mut checksum = [0; DIGEST_LEN];
        let leftover = feed(&mut file, &mut buffer, &mut ctx)
            .with_context(|| format!("Error reading from {}", cli.path.display()))?;
        ctx.finish(&buffer[..leftover], &mut checksum)?;

        if cli.no_prefix {
            println!("{}", hex::encode(checksum));
        } else {
            println!("0x{}", hex::encode(checksum));
        }

        file.rewind()?;
        ctx.reset()?;
    }

    ctx.destroy()?;
    Ok(())
}

/// Passes every full buffer to `update` and returns how many bytes of the
/// final, partial buffer are still waiting for `finish`. Interrupted reads
/// are retried.
fn feed<R: Read>(file: &mut R, buffer: &mut [u8], ctx: &mut DigestContext) -> Result<usize> {
    let mut chunk_len = 0;
    loop {
        let n = match file.read(&mut buffer[chunk_len..]) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        if n == 0 {
            return Ok(chunk_len);
        }
        chunk_len += n;
        if chunk_len == buffer.len() {
            ctx.update(buffer)?;
            chunk_len = 0;
        }
    }
}
