use indicatif::{ProgressBar, ProgressStyle};

const PROGRESS_TEMPLATE: &str =
    "{msg}\n[{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

const INDETERMINATE_PROGRESS_TEMPLATE: &str = "{msg}\n{spinner:.green} {bytes} ({bytes_per_sec})";

/// Progress bar for one datafile; a spinner when the size is unknown.
pub fn create_download_progress(total_size: u64, message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let (pb, style) = if total_size > 0 {
        (
            ProgressBar::new(total_size),
            ProgressStyle::with_template(PROGRESS_TEMPLATE),
        )
    } else {
        (
            ProgressBar::new_spinner(),
            ProgressStyle::with_template(INDETERMINATE_PROGRESS_TEMPLATE),
        )
    };

    match style {
        Ok(style) => pb.set_style(style.progress_chars("#>-")),
        Err(e) => tracing::debug!("Invalid progress template: {}", e),
    }
    pb.set_message(message.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_progress() {
        let pb = create_download_progress(100, "file.tab", false);
        assert!(pb.is_hidden());
    }

    #[test]
    fn test_sized_progress_tracks_length() {
        let pb = create_download_progress(2048, "file.tab", true);
        pb.inc(1024);

        assert_eq!(pb.length(), Some(2048));
        assert_eq!(pb.position(), 1024);
    }

    #[test]
    fn test_unknown_size_uses_spinner() {
        let pb = create_download_progress(0, "file.tab", true);

        assert_eq!(pb.length(), None);
    }
}
