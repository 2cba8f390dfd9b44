// src/main.rs
use itchfeed::config::AppConfig;
use itchfeed::dispatch::{process_packet, MessageSink};
use itchfeed::market::Market;
use itchfeed::messages::Message;
use itchfeed::util::BarrierFlag;
use itchfeed::{metrics, net};
use log::{error, info, trace, warn};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Datagrams never exceed the MTU; the recv arena lives on the stack.
const MAX_DATAGRAM: usize = 1500;

/// Binary-side consumer: surfaces session-level events in the log and keeps
/// the rest of the stream at trace for ad-hoc inspection.
struct FeedLogger;

impl MessageSink for FeedLogger {
    fn on_message(&mut self, msg: &Message) {
        match msg {
            Message::SystemEvent(m) => {
                info!("system event {:?} at {}", m.event_code, m.header.timestamp)
            }
            Message::StockTradingAction(m) => info!(
                "{} trading state {:?} ({:?})",
                m.symbol, m.trading_state, m.reason
            ),
            Message::OperationalHalt(m) => {
                info!("{} operational halt {:?} on {:?}", m.symbol, m.action, m.market_code)
            }
            Message::MwcbStatus(m) => warn!("MWCB breached {:?}", m.breached_level),
            other => trace!("{:?}", other),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cfg_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    // Load config before logger to allow JSON formatting choice
    let cfg = AppConfig::from_file(&cfg_path)?;

    if cfg.general.json_logs {
        let mut b =
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
        b.format(|buf, record| {
            use std::io::Write;
            let ts = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
            writeln!(
                buf,
                "{{\"ts\":\"{}\",\"level\":\"{}\",\"target\":\"{}\",\"msg\":\"{}\"}}",
                ts,
                record.level(),
                record.target(),
                record.args().to_string().replace('"', "'")
            )
        })
        .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    info!("loaded config: {:?}", cfg);

    let shutdown = Arc::new(BarrierFlag::default());
    {
        let s = shutdown.clone();
        ctrlc::set_handler(move || {
            s.raise();
        })?;
    }

    let metrics_handle = cfg
        .metrics
        .as_ref()
        .map(|m| metrics::spawn_http(m.bind.clone()));

    let sock = net::build_mcast_socket(&cfg.channel)?;
    // A finite timeout keeps the loop responsive to ctrl-c between bursts.
    sock.set_read_timeout(Some(Duration::from_millis(cfg.general.recv_timeout_ms)))?;
    info!(
        "joined {}:{} on {}",
        cfg.channel.group, cfg.channel.port, cfg.channel.iface_addr
    );

    let mut market = Market::new();
    let mut sink = FeedLogger;

    let mut buf = [0u8; MAX_DATAGRAM];
    let mut expected_seq: Option<u64> = None;
    let mut total_pkts: u64 = 0;
    let mut total_msgs: u64 = 0;
    let mut total_errors: u64 = 0;
    let mut total_gaps: u64 = 0;

    let snap_every = Duration::from_millis(cfg.general.stats_interval_ms);
    let mut last_snap = Instant::now();

    while !shutdown.is_raised() {
        let n = match sock.recv_from(&mut buf) {
            Ok((n, _src)) => n,
            Err(e)
                if e.kind() == ErrorKind::WouldBlock
                    || e.kind() == ErrorKind::TimedOut
                    || e.kind() == ErrorKind::Interrupted =>
            {
                if last_snap.elapsed() >= snap_every {
                    log_stats(&market, total_pkts, total_msgs, total_errors, total_gaps);
                    last_snap = Instant::now();
                }
                continue;
            }
            Err(e) => {
                error!("recv failed: {e}");
                return Err(e.into());
            }
        };

        metrics::inc_rx(n);
        total_pkts += 1;

        match process_packet(&buf[..n], &mut market, &mut sink) {
            Ok(outcome) => {
                total_msgs += outcome.delivered as u64;
                total_errors += outcome.errors as u64;

                // Gap detection only; replay is an upstream concern. A
                // heartbeat carries the current sequence and zero messages,
                // so the arithmetic below is stable across them.
                let seq = outcome.header.sequence_number;
                if let Some(expected) = expected_seq {
                    if seq != expected {
                        warn!(
                            "sequence gap on session {}: expected {expected}, got {seq}",
                            outcome.header.session
                        );
                        metrics::inc_seq_gap();
                        total_gaps += 1;
                    }
                }
                expected_seq = Some(seq + outcome.header.msg_count as u64);
            }
            Err(e) => {
                warn!("dropped datagram: {e}");
                metrics::inc_decode_error(e.kind());
                total_errors += 1;
            }
        }

        if last_snap.elapsed() >= snap_every {
            log_stats(&market, total_pkts, total_msgs, total_errors, total_gaps);
            last_snap = Instant::now();
        }
    }

    log_stats(&market, total_pkts, total_msgs, total_errors, total_gaps);

    // Gracefully stop metrics HTTP (poke /shutdown and join)
    if let Some(m) = &cfg.metrics {
        request_http_shutdown(&m.bind);
    }
    if let Some(h) = metrics_handle {
        let _ = h.join();
    }
    info!("clean shutdown");
    Ok(())
}

fn log_stats(market: &Market, pkts: u64, msgs: u64, errors: u64, gaps: u64) {
    let live = market.live_orders();
    metrics::set_live_orders(live);
    info!("pkts={pkts} msgs={msgs} errors={errors} gaps={gaps} live_orders={live}");
}

fn request_http_shutdown(addr: &str) {
    use std::io::Write;
    if let Ok(mut s) = std::net::TcpStream::connect(addr) {
        let _ =
            s.write_all(b"GET /shutdown HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        let _ = s.flush();
    }
}
