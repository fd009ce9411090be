//! Terminal output of matched addresses.

use std::io::Write;
use std::net::IpAddr;

/// Write one address per line.
pub fn write_address<W: Write>(out: &mut W, addr: &IpAddr) -> std::io::Result<()> {
    writeln!(out, "{addr}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_address() {
        let mut out = Vec::new();
        write_address(&mut out, &"10.0.0.5".parse().unwrap()).unwrap();
        write_address(&mut out, &"fd00::5".parse().unwrap()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "10.0.0.5\nfd00::5\n");
    }

    #[test]
    fn test_write_address_canonical_form() {
        let mut out = Vec::new();
        write_address(&mut out, &"FD00:0:0::5".parse().unwrap()).unwrap();
        write_address(&mut out, &"::ffff:10.0.0.5".parse().unwrap()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "fd00::5\n::ffff:10.0.0.5\n");
    }
}
