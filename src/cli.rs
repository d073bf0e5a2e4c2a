//! Command-line arguments.

use crate::editor::{Editor, Settings};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

/// A minimal modal text viewer.
#[derive(Clone, Debug, Parser)]
#[command(name = "jkl", about = "Terminal text viewer with vi-style movement", version)]
pub struct Cli {
    /// Files to open; the first one is shown
    pub files: Vec<PathBuf>,

    /// Cells per tab character
    #[arg(long, env = "JKL_TAB_WIDTH", default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..))]
    pub tab_width: u16,

    /// Lines kept visible above and below the cursor
    #[arg(long, env = "JKL_SCROLL_OFFSET", default_value_t = 3)]
    pub scroll_offset: u16,

    /// Draw without the outer border
    #[arg(long, env = "JKL_NO_BORDERS")]
    pub no_borders: bool,

    /// Idle redraws per second, 0 to redraw as fast as possible
    #[arg(long, env = "JKL_FPS", default_value_t = 60)]
    pub fps: u32,

    /// Write logs to this file
    #[arg(long, env = "JKL_LOG")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Editor settings selected by the flags.
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            borders: !self.no_borders,
            tab_width: usize::from(self.tab_width),
            scroll_offset: usize::from(self.scroll_offset),
            ..Settings::default()
        }
    }

    /// Pause between idle redraws.
    #[must_use]
    pub fn redraw_interval(&self) -> Duration {
        if self.fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(1) / self.fps
        }
    }

    /// Apply the settings to `editor` and open the files.
    pub fn apply(&self, editor: &mut Editor) {
        *editor.settings_mut() = self.settings();
        editor.open_files(&self.files);
    }
}

/// Parse `args` (including the program name).
///
/// `--help` and `--version` come back as errors whose `exit()` prints to
/// stdout and exits 0; anything else prints usage to stderr and exits 2.
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::MemoryFiles;
    use clap::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let cli = parse_args(["jkl"]).unwrap();
        assert!(cli.files.is_empty());
        assert_eq!(cli.settings(), Settings::default());
        assert_eq!(cli.redraw_interval(), Duration::from_secs(1) / 60);
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = parse_args([
            "jkl",
            "--tab-width",
            "8",
            "--scroll-offset",
            "0",
            "--no-borders",
            "--fps",
            "0",
            "a.txt",
            "b.txt",
        ])
        .unwrap();

        let settings = cli.settings();
        assert_eq!(settings.tab_width, 8);
        assert_eq!(settings.scroll_offset, 0);
        assert!(!settings.borders);
        assert_eq!(cli.redraw_interval(), Duration::ZERO);
        assert_eq!(cli.files, [PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
    }

    #[test]
    fn test_rejects_zero_tab_width() {
        assert!(parse_args(["jkl", "--tab-width", "0"]).is_err());
    }

    #[test]
    fn test_help_and_unknown_flag() {
        let err = parse_args(["jkl", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);

        let err = parse_args(["jkl", "--bogus"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn test_apply_opens_first_file() {
        let cli = parse_args(["jkl", "--tab-width", "2", "b", "a"]).unwrap();
        let mut editor = Editor::new(MemoryFiles::new().with_file("a", "A").with_file("b", "B"));
        cli.apply(&mut editor);

        assert_eq!(editor.settings().tab_width, 2);
        assert_eq!(editor.buffers().len(), 2);
        let current = editor.current_buffer().and_then(|id| editor.buffer(id)).unwrap();
        assert_eq!(current.filename(), "b");
    }

    #[test]
    fn test_command_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
