use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "LabLens";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default log filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    "info,lablens=debug".to_string()
}

/// Listen port, from the PORT environment variable (default 5000).
pub fn listen_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000)
}

/// Get the application data directory.
/// ~/LabLens/ on all platforms (user-visible).
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(APP_NAME)
}

/// Where the most recently rendered report PDF is persisted.
/// A single fixed location, overwritten on each successful analysis.
pub fn report_path() -> PathBuf {
    app_data_dir().join("lab_report.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("LabLens"));
    }

    #[test]
    fn report_path_under_app_data() {
        let path = report_path();
        assert!(path.starts_with(app_data_dir()));
        assert!(path.ends_with("lab_report.pdf"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
