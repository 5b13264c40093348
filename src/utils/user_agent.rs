/*!
Builds the `USER-AGENT` string sent on SSDP `M-SEARCH` requests, of the
form `OS/version UPnP/1.1 product/version`.
*/

use lazy_static::lazy_static;

const PRODUCT_NAME: &str = env!("CARGO_PKG_NAME");
const PRODUCT_VERSION: &str = env!("CARGO_PKG_VERSION");

lazy_static! {
    static ref USER_AGENT: String = format!("{}/{} UPnP/1.1 {}/{}", os::name(), os::version(), PRODUCT_NAME, PRODUCT_VERSION);
}

pub fn make() -> &'static str {
    &USER_AGENT
}

#[cfg(target_os = "macos")]
mod os {
    use std::process::Command;

    pub fn name() -> String {
        run("sw_vers", "-productName")
    }

    pub fn version() -> String {
        run("sw_vers", "-productVersion")
    }

    fn run(cmd: &str, arg: &str) -> String {
        Command::new(cmd)
            .arg(arg)
            .output()
            .ok()
            .and_then(|out| String::from_utf8(out.stdout).ok())
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

#[cfg(all(not(target_os = "macos"), target_family = "unix"))]
mod os {
    use std::process::Command;

    pub fn name() -> String {
        run("uname", "-o")
    }

    pub fn version() -> String {
        run("uname", "-r")
    }

    fn run(cmd: &str, arg: &str) -> String {
        Command::new(cmd)
            .arg(arg)
            .output()
            .ok()
            .and_then(|out| String::from_utf8(out.stdout).ok())
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

#[cfg(target_family = "windows")]
mod os {
    pub fn name() -> String {
        "Windows".to_string()
    }

    pub fn version() -> String {
        "0".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_embeds_product_name_and_version() {
        let ua = make();
        assert!(ua.contains(PRODUCT_NAME));
        assert!(ua.contains(PRODUCT_VERSION));
        assert!(ua.contains("UPnP/1.1"));
    }
}
