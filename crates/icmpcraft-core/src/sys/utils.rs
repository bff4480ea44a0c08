use std::ffi::CString;
use std::fs;
use std::io;

pub fn if_nametoindex(name: &str) -> io::Result<u32> {
    let name_cstr = CString::new(name).map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "Invalid interface name"))?;
    let idx = unsafe { libc::if_nametoindex(name_cstr.as_ptr()) };
    if idx == 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(idx)
}

fn read_sysfs(name: &str, attr: &str) -> io::Result<String> {
    if name.is_empty() || name.contains('/') {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "Invalid interface name"));
    }
    let text = fs::read_to_string(format!("/sys/class/net/{name}/{attr}"))?;
    Ok(text.trim().to_string())
}

/// Current MTU of interface `name`.
pub fn interface_mtu(name: &str) -> io::Result<usize> {
    let text = read_sysfs(name, "mtu")?;
    text.parse()
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, format!("Unparsable MTU {text:?}")))
}

/// Hardware address of interface `name`.
pub fn interface_mac(name: &str) -> io::Result<[u8; 6]> {
    parse_mac(&read_sysfs(name, "address")?)
}

/// Parses `aa:bb:cc:dd:ee:ff`.
pub fn parse_mac(text: &str) -> io::Result<[u8; 6]> {
    let invalid = || io::Error::new(io::ErrorKind::InvalidData, format!("Unparsable MAC address {text:?}"));

    let mut mac = [0u8; 6];
    let mut parts = text.split(':');
    for byte in mac.iter_mut() {
        let part = parts.next().ok_or_else(invalid)?;
        if part.len() != 2 {
            return Err(invalid());
        }
        *byte = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
    }
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok(mac)
}
