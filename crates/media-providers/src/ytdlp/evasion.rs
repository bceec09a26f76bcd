use rand::seq::SliceRandom;
use std::path::PathBuf;

/// Anti-blocking measure attached to a single yt-dlp invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Evasion {
    Cookies(PathBuf),
    Proxy(String),
}

impl Evasion {
    /// A random cookie file when any are configured, the proxy otherwise.
    /// Never both.
    pub fn choose(cookies: &[PathBuf], proxy: Option<&str>) -> Option<Evasion> {
        if let Some(file) = cookies.choose(&mut rand::thread_rng()) {
            return Some(Evasion::Cookies(file.clone()));
        }

        proxy
            .map(str::trim)
            .filter(|proxy| !proxy.is_empty())
            .map(|proxy| Evasion::Proxy(proxy.to_string()))
    }

    pub fn to_args(&self) -> [String; 2] {
        match self {
            Evasion::Cookies(file) => ["--cookies".into(), file.to_string_lossy().to_string()],
            Evasion::Proxy(proxy) => ["--proxy".into(), proxy.clone()],
        }
    }
}
