use std::{future::Future, net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use log::{info, warn};
use tokio::{net::TcpListener, select, spawn, time::sleep};

use crate::{
    shutdown::ShutdownController,
    zoo::{
        adapter::tcp,
        domain::AllocationEngine,
        port::{EnclosureRegistry, SpeciesCatalog},
    },
};

pub async fn bind(port: u16) -> anyhow::Result<TcpListener> {
    TcpListener::bind(SocketAddr::new([0, 0, 0, 0].into(), port))
        .await
        .with_context(|| format!("cannot listen on port {port}"))
}

/// Pause after the n-th consecutive failed accept, doubling from 50ms up to 2s.
fn accept_backoff(consecutive_failures: u32) -> Duration {
    let millis = 50u64.saturating_mul(1 << consecutive_failures.saturating_sub(1).min(6));
    Duration::from_millis(millis.min(2_000))
}

/// Serve queries until `stop` resolves, then wait for every open connection
/// to wind down.
pub async fn serve<Catalog, Registry>(
    listener: TcpListener,
    engine: Arc<AllocationEngine<Catalog, Registry>>,
    stop: impl Future<Output = ()>,
) where
    Catalog: SpeciesCatalog + Send + Sync + 'static,
    Registry: EnclosureRegistry + Send + Sync + 'static,
{
    let shutdown = ShutdownController::new();
    tokio::pin!(stop);
    let mut failures = 0;

    for client_id in 0.. {
        let (tcp_stream, socket_addr) = select! {
            conn = listener.accept() => match conn {
                Ok(conn) => conn,
                Err(e) => {
                    failures += 1;
                    let pause = accept_backoff(failures);
                    warn!("failed to accept client {client_id}: {e}, retrying in {pause:?}");
                    select! {
                        _ = sleep(pause) => continue,
                        _ = &mut stop => break
                    }
                }
            },
            _ = &mut stop => break
        };
        failures = 0;
        info!("Connected to client {client_id} at {socket_addr}");

        let shutdown_token = shutdown.token();
        let engine = engine.clone();

        spawn(async move {
            match tcp::handle_connection(tcp_stream, shutdown_token, client_id, engine).await {
                Ok(_) => info!("handler finished for client {client_id}"),
                Err(e) => warn!("handler error for client {client_id}: {e}"),
            }
        });
    }

    info!("shutting down");
    shutdown.shutdown().await;
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
        net::TcpStream,
        sync::oneshot,
        time::timeout,
    };

    use crate::zoo::create_engine;

    use super::*;

    #[test]
    fn backoff_grows_then_caps() {
        assert_eq!(accept_backoff(1), Duration::from_millis(50));
        assert_eq!(accept_backoff(2), Duration::from_millis(100));
        assert_eq!(accept_backoff(3), Duration::from_millis(200));
        assert_eq!(accept_backoff(6), Duration::from_millis(1_600));
        assert_eq!(accept_backoff(7), Duration::from_secs(2));
        assert_eq!(accept_backoff(u32::MAX), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn serves_until_stopped() {
        let _ = env_logger::builder().is_test(true).try_init();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let engine = Arc::new(create_engine(None).unwrap());
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let server = spawn(serve(listener, engine, async move {
            stop_rx.await.ok();
        }));

        let mut clients = vec![];
        for _ in 0..2 {
            let stream = TcpStream::connect(addr).await.unwrap();
            let (read, mut write) = stream.into_split();
            let mut lines = BufReader::new(read).lines();

            write.write_all(b"GAZELA 1\n").await.unwrap();
            assert_eq!(
                lines.next_line().await.unwrap().unwrap(),
                "Recinto 1 (espaço livre: 4 total: 10); Recinto 3 (espaço livre: 3 total: 7)"
            );
            clients.push((lines, write));
        }

        stop_tx.send(()).unwrap();
        timeout(Duration::from_secs(5), server)
            .await
            .unwrap()
            .unwrap();

        for (mut lines, _write) in clients {
            assert!(lines.next_line().await.unwrap().is_none());
        }
    }
}
