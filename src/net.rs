// src/net.rs
use crate::config::ChannelCfg;
use anyhow::Context;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};

pub fn build_mcast_socket(cfg: &ChannelCfg) -> anyhow::Result<UdpSocket> {
    let sock = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))
        .context("socket")?;

    sock.set_reuse_address(true).ok();
    if cfg.reuse_port {
        #[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))]
        sock.set_reuse_port(true).ok();
    }

    // Bind to wildcard:port for multicast RX
    let bind_addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), cfg.port);
    sock.bind(&bind_addr.into()).context("bind")?;

    // Increase receive buffer to tolerate bursts
    if cfg.recv_buffer_bytes > 0 {
        let _ = sock.set_recv_buffer_size(cfg.recv_buffer_bytes as usize);
    }

    // Join multicast group on specified interface
    sock.join_multicast_v4(&cfg.group, &cfg.iface_addr)
        .context("join_multicast_v4")?;

    Ok(sock.into())
}
