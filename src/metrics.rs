// src/metrics.rs
use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use std::net::ToSocketAddrs;
use std::thread;

static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

static RX_PACKETS: Lazy<IntCounter> = Lazy::new(|| {
    let c = IntCounter::new("rx_packets", "Datagrams received").expect("rx_packets");
    REGISTRY.register(Box::new(c.clone())).ok();
    c
});

static RX_BYTES: Lazy<IntCounter> = Lazy::new(|| {
    let c = IntCounter::new("rx_bytes", "Bytes received").expect("rx_bytes");
    REGISTRY.register(Box::new(c.clone())).ok();
    c
});

static DECODE_MSGS: Lazy<IntCounter> = Lazy::new(|| {
    let c = IntCounter::new("decode_messages", "Messages decoded and delivered")
        .expect("decode_messages");
    REGISTRY.register(Box::new(c.clone())).ok();
    c
});

static DECODE_ERRORS: Lazy<IntCounterVec> = Lazy::new(|| {
    let c = IntCounterVec::new(
        Opts::new("decode_errors", "Framing/decoding failures by kind"),
        &["kind"],
    )
    .expect("decode_errors");
    REGISTRY.register(Box::new(c.clone())).ok();
    c
});

static SEQ_GAPS: Lazy<IntCounter> = Lazy::new(|| {
    let c = IntCounter::new(
        "sequence_gaps",
        "Datagram sequence discontinuities (out-of-band recovery advisable)",
    )
    .expect("sequence_gaps");
    REGISTRY.register(Box::new(c.clone())).ok();
    c
});

static DUP_ADDS: Lazy<IntCounter> = Lazy::new(|| {
    let c = IntCounter::new(
        "book_duplicate_adds",
        "Add messages that re-used a live order reference number",
    )
    .expect("book_duplicate_adds");
    REGISTRY.register(Box::new(c.clone())).ok();
    c
});

static BOOK_LIVE_ORDERS: Lazy<IntGauge> = Lazy::new(|| {
    let g = IntGauge::new(
        "book_live_orders",
        "Number of resting orders across all securities",
    )
    .expect("book_live_orders");
    REGISTRY.register(Box::new(g.clone())).ok();
    g
});

pub fn inc_rx(bytes: usize) {
    RX_PACKETS.inc();
    RX_BYTES.inc_by(bytes as u64);
}

pub fn inc_decode_msgs(n: u64) {
    DECODE_MSGS.inc_by(n);
}

pub fn inc_decode_error(kind: &str) {
    DECODE_ERRORS.with_label_values(&[kind]).inc();
}

pub fn inc_seq_gap() {
    SEQ_GAPS.inc();
}

pub fn inc_duplicate_add() {
    DUP_ADDS.inc();
}

pub fn set_live_orders(n: usize) {
    BOOK_LIVE_ORDERS.set(n as i64);
}

pub fn spawn_http<A: ToSocketAddrs + Send + 'static>(addr: A) -> thread::JoinHandle<()> {
    let addr_string = addr
        .to_socket_addrs()
        .ok()
        .and_then(|mut it| it.next())
        .map(|s| s.to_string())
        .unwrap_or_else(|| "0.0.0.0:9090".to_string());

    thread::spawn(move || {
        let server = tiny_http::Server::http(&addr_string).expect("start metrics http");
        log::info!("prometheus metrics listening on http://{addr_string}/metrics");
        let encoder = TextEncoder::new();
        loop {
            if let Ok(req) = server.recv() {
                let url = req.url().to_string();
                if url == "/metrics" {
                    let metric_families = REGISTRY.gather();
                    let mut buf = Vec::with_capacity(16 * 1024);
                    encoder.encode(&metric_families, &mut buf).ok();
                    let resp = tiny_http::Response::from_data(buf)
                        .with_status_code(200)
                        .with_header(
                            tiny_http::Header::from_bytes(
                                &b"Content-Type"[..],
                                &b"text/plain; version=0.0.4"[..],
                            )
                            .unwrap(),
                        );
                    let _ = req.respond(resp);
                } else if url == "/live" || url == "/healthz" {
                    let _ =
                        req.respond(tiny_http::Response::from_string("OK").with_status_code(200));
                } else if url == "/shutdown" {
                    let _ =
                        req.respond(tiny_http::Response::from_string("BYE").with_status_code(200));
                    break;
                } else {
                    let _ = req.respond(tiny_http::Response::empty(404));
                }
            }
        }
    })
}
