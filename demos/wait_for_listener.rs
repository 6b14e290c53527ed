use futures::StreamExt;
use std::net::SocketAddr;
use std::time::Duration;
use test_retry::{timer, times, Panic, RetryStrategy};
use tokio::net::{TcpListener, TcpStream};

/// Binds `addr` only after `delay`, like a server that is slow to start.
async fn listen_later(addr: SocketAddr, delay: Duration) -> anyhow::Result<()> {
    tokio::time::sleep(delay).await;
    let listener = TcpListener::bind(addr).await?;
    let (_socket, peer) = listener.accept().await?;
    eprintln!("accepted {peer}");
    Ok(())
}

async fn connect(addr: SocketAddr) -> anyhow::Result<TcpStream> {
    Ok(TcpStream::connect(addr).await?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // grab a free port, then release it for the late listener
    let addr = TcpListener::bind("127.0.0.1:0").await?.local_addr()?;
    let server = tokio::spawn(listen_later(addr, Duration::from_millis(200)));

    let mut attempts = Box::pin(timer().attempts(Panic));
    while let Some(attempt) = attempts.next().await {
        match connect(addr).await {
            Ok(stream) => {
                eprintln!("connected to {} on attempt {attempt}", stream.peer_addr()?);
                break;
            }
            Err(e) => eprintln!("attempt {attempt}: {e:#}"),
        }
    }
    server.await??;

    // the blocking loop, for synchronous tests
    let mut retry = times(3);
    let mut polls = 0;
    while retry.next(&mut Panic) {
        polls += 1;
        if polls == 2 {
            break;
        }
    }
    eprintln!("ready after {polls} polls, {} attempts left", retry.remaining());

    Ok(())
}
