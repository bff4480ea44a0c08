use std::io;
use std::mem;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::os::fd::{AsRawFd, BorrowedFd, FromRawFd, OwnedFd};
use libc::{
    socket, bind, setsockopt, sendto, send,
    AF_INET, AF_INET6, AF_PACKET, SOCK_RAW, IPPROTO_IP, IPPROTO_RAW, IP_HDRINCL,
    sockaddr, sockaddr_in, sockaddr_in6, sockaddr_ll, socklen_t, c_int, c_void,
};

fn check(ret: c_int) -> io::Result<c_int> {
    if ret < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(ret)
}

/// Wraps the descriptor returned by `socket(2)` so it closes on drop.
fn owned_socket(domain: c_int, ty: c_int, protocol: c_int) -> io::Result<OwnedFd> {
    let fd = check(unsafe { socket(domain, ty, protocol) })?;
    // SAFETY: `fd` was just returned by socket(2) and has no other owner.
    Ok(unsafe { OwnedFd::from_raw_fd(fd) })
}

fn check_len(ret: isize) -> io::Result<usize> {
    if ret < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(ret as usize)
}

/// Raw IPv4 socket that takes complete IP headers from the caller (`IP_HDRINCL`).
pub fn open_raw_ipv4() -> io::Result<OwnedFd> {
    let fd = owned_socket(AF_INET, SOCK_RAW, IPPROTO_RAW)?;

    let on: c_int = 1;
    check(unsafe {
        setsockopt(
            fd.as_raw_fd(),
            IPPROTO_IP,
            IP_HDRINCL,
            &on as *const _ as *const c_void,
            mem::size_of::<c_int>() as socklen_t,
        )
    })?;
    Ok(fd)
}

/// Raw IPv6 socket. With `IPPROTO_RAW` Linux expects the IPv6 header in the buffer.
pub fn open_raw_ipv6() -> io::Result<OwnedFd> {
    owned_socket(AF_INET6, SOCK_RAW, IPPROTO_RAW)
}

/// `AF_PACKET` socket bound to `ifindex`. Frames sent on it must carry their
/// own link-layer header.
pub fn open_packet_socket(ifindex: u32) -> io::Result<OwnedFd> {
    // Protocol 0: transmit only, the socket receives nothing.
    let fd = owned_socket(AF_PACKET, SOCK_RAW, 0)?;

    let mut sa: sockaddr_ll = unsafe { mem::zeroed() };
    sa.sll_family = AF_PACKET as u16;
    sa.sll_ifindex = ifindex as c_int;

    check(unsafe {
        bind(fd.as_raw_fd(), &sa as *const _ as *const sockaddr, mem::size_of::<sockaddr_ll>() as socklen_t)
    })?;
    Ok(fd)
}

pub fn send_to_v4(fd: BorrowedFd<'_>, buf: &[u8], dst: Ipv4Addr) -> io::Result<usize> {
    let mut sa: sockaddr_in = unsafe { mem::zeroed() };
    sa.sin_family = AF_INET as libc::sa_family_t;
    sa.sin_addr.s_addr = u32::from_ne_bytes(dst.octets());

    let ret = unsafe {
        sendto(
            fd.as_raw_fd(),
            buf.as_ptr() as *const c_void,
            buf.len(),
            0,
            &sa as *const _ as *const sockaddr,
            mem::size_of::<sockaddr_in>() as socklen_t,
        )
    };
    check_len(ret)
}

pub fn send_to_v6(fd: BorrowedFd<'_>, buf: &[u8], dst: Ipv6Addr) -> io::Result<usize> {
    let mut sa: sockaddr_in6 = unsafe { mem::zeroed() };
    sa.sin6_family = AF_INET6 as libc::sa_family_t;
    sa.sin6_addr.s6_addr = dst.octets();

    let ret = unsafe {
        sendto(
            fd.as_raw_fd(),
            buf.as_ptr() as *const c_void,
            buf.len(),
            0,
            &sa as *const _ as *const sockaddr,
            mem::size_of::<sockaddr_in6>() as socklen_t,
        )
    };
    check_len(ret)
}

/// Sends on a bound or connected socket.
pub fn send_frame(fd: BorrowedFd<'_>, buf: &[u8]) -> io::Result<usize> {
    let ret = unsafe { send(fd.as_raw_fd(), buf.as_ptr() as *const c_void, buf.len(), 0) };
    check_len(ret)
}
