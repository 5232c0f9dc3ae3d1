use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};

pub fn progress_bar(len: u64) -> ProgressBar {
    ProgressBar::new(len).with_style(
        ProgressStyle::with_template("[{elapsed_precise}] {human_pos}/{human_len} {percent}% (eta {eta})")
            .expect("hardcoded"),
    )
}

/// `orders.xlsx` -> `orders.kml`, next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("kml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path() {
        assert_eq!(
            default_output_path(Path::new("data/orders.xlsx")),
            Path::new("data/orders.kml")
        );
        assert_eq!(
            default_output_path(Path::new("orders")),
            Path::new("orders.kml")
        );
        assert_eq!(
            default_output_path(Path::new("spring.2024.ods")),
            Path::new("spring.2024.kml")
        );
    }
}
