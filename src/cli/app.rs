//! Clipboard command runners

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;
use tracing::debug;

use crate::application::ports::{ConfigStore, FlavorEvent, FlavorListener, NativeClipboard};
use crate::application::SystemClipboard;
use crate::domain::config::AppConfig;
use crate::domain::{ClipboardError, DataFlavor};
use crate::infrastructure::clipboard::{decode_png, encode_png, ImageCodecError};
use crate::infrastructure::logging::log_level_from_env;
use crate::infrastructure::XdgConfigStore;

use super::args::{Commands, CopyTarget, PasteArgs, PasteAs};
use super::presenter::{format_flavors, Presenter};

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding the file list delimiter
pub const DELIMITER_ENV: &str = "SYSCLIP_DELIMITER";

/// Failure of a clipboard command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error(transparent)]
    Image(#[from] ImageCodecError),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("Clipboard holds no {0}")]
    Absent(&'static str),

    #[error("{0}")]
    Usage(String),

    #[error("Failed to wait for Ctrl-C: {0}")]
    Signal(#[source] std::io::Error),

    #[error("No desktop clipboard reachable, copied content would be lost on exit")]
    NoDesktopClipboard,
}

impl CommandError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Process exit code for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => EXIT_USAGE_ERROR,
            _ => EXIT_ERROR,
        }
    }
}

/// Run a clipboard command and report the outcome
pub async fn run_command<C: NativeClipboard>(
    command: Commands,
    clipboard: &SystemClipboard<C>,
    config: &AppConfig,
    presenter: &Presenter,
) -> ExitCode {
    match execute(command, clipboard, config, presenter).await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}

/// Dispatch a clipboard command
pub async fn execute<C: NativeClipboard>(
    command: Commands,
    clipboard: &SystemClipboard<C>,
    config: &AppConfig,
    presenter: &Presenter,
) -> Result<(), CommandError> {
    if clipboard.native().is_process_local() {
        presenter.warn(&format!(
            "Desktop clipboard unavailable, using the process-local {} clipboard",
            clipboard.name()
        ));
        if matches!(command, Commands::Copy { .. }) {
            return Err(CommandError::NoDesktopClipboard);
        }
    }

    match command {
        Commands::Copy { target } => run_copy(target, clipboard, presenter).await,
        Commands::Paste(args) => run_paste(&args, clipboard, config, presenter).await,
        Commands::Clear => {
            clipboard.clear();
            presenter.success("Clipboard cleared");
            Ok(())
        }
        Commands::Status { has } => run_status(has, clipboard, presenter),
        Commands::Watch => run_watch(clipboard, presenter).await,
        Commands::Config { .. } => Err(CommandError::Usage(
            "config commands do not use the clipboard".to_string(),
        )),
    }
}

/// Execute `copy`
pub async fn run_copy<C: NativeClipboard>(
    target: CopyTarget,
    clipboard: &SystemClipboard<C>,
    presenter: &Presenter,
) -> Result<(), CommandError> {
    match target {
        CopyTarget::Text { text } => {
            let text = match text {
                Some(text) => text,
                None => read_stdin().await?,
            };
            clipboard.copy_text(Some(&text))?;
            presenter.success(&format!("Copied {} characters", text.chars().count()));
        }
        CopyTarget::Files { paths } => {
            let mut files = Vec::with_capacity(paths.len());
            for path in &paths {
                let absolute = tokio::fs::canonicalize(path)
                    .await
                    .map_err(|e| CommandError::io(path, e))?;
                files.push(absolute);
            }
            clipboard.copy_files(Some(files.as_slice()))?;
            presenter.success(&format!("Copied {} file(s)", files.len()));
        }
        CopyTarget::Image { path } => {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|e| CommandError::io(&path, e))?;
            let image = decode_png(&bytes)?;
            let (width, height) = (image.width(), image.height());
            clipboard.copy_image(Some(image))?;
            presenter.success(&format!("Copied {}x{} image", width, height));
        }
    }
    Ok(())
}

/// Execute `paste`
pub async fn run_paste<C: NativeClipboard>(
    args: &PasteArgs,
    clipboard: &SystemClipboard<C>,
    config: &AppConfig,
    presenter: &Presenter,
) -> Result<(), CommandError> {
    if args.shape == PasteAs::Image && args.output.is_none() {
        return Err(CommandError::Usage(
            "--as image requires --output <PNG>".to_string(),
        ));
    }

    match args.shape {
        PasteAs::Text => {
            let text = clipboard.as_text()?.ok_or(CommandError::Absent("text"))?;
            presenter.output_inline(&text);
        }
        PasteAs::String => {
            let text = clipboard.as_string()?.ok_or(CommandError::Absent("string"))?;
            presenter.output_inline(&text);
        }
        PasteAs::Files => {
            let delimiter = match &args.delimiter {
                Some(delimiter) => unescape(delimiter),
                None => config.delimiter_or_default().to_string(),
            };
            let names = clipboard
                .as_filenames_with(&delimiter)?
                .ok_or(CommandError::Absent("file list"))?;
            presenter.output(&names);
        }
        PasteAs::Image => {
            let image = clipboard.as_image()?.ok_or(CommandError::Absent("image"))?;
            if let Some(output) = &args.output {
                let png = encode_png(&image)?;
                tokio::fs::write(output, png)
                    .await
                    .map_err(|e| CommandError::io(output, e))?;
                presenter.success(&format!(
                    "Wrote {}x{} image to {}",
                    image.width(),
                    image.height(),
                    output.display()
                ));
            }
        }
    }
    Ok(())
}

/// Execute `status`, failing when `has` names a flavor that is not present
pub fn run_status<C: NativeClipboard>(
    has: Option<DataFlavor>,
    clipboard: &SystemClipboard<C>,
    presenter: &Presenter,
) -> Result<(), CommandError> {
    if let Some(flavor) = has {
        let present = clipboard.is_flavor_available(flavor)?;
        presenter.key_value(flavor.as_str(), &present.to_string());
        return if present {
            Ok(())
        } else {
            Err(CommandError::Absent(flavor.as_str()))
        };
    }

    let flavors = clipboard.available_flavors()?;
    presenter.key_value("clipboard", clipboard.name());
    presenter.key_value("empty", &flavors.is_empty().to_string());
    presenter.key_value("flavors", &format_flavors(&flavors));
    Ok(())
}

/// Execute `watch`: print flavor changes until Ctrl-C
pub async fn run_watch<C: NativeClipboard>(
    clipboard: &SystemClipboard<C>,
    presenter: &Presenter,
) -> Result<(), CommandError> {
    let (tx, mut rx) = mpsc::unbounded_channel::<FlavorEvent>();
    let listener: Arc<dyn FlavorListener> = Arc::new(move |event: &FlavorEvent| {
        let _ = tx.send(event.clone());
    });
    clipboard.add_flavor_listener(Arc::clone(&listener));
    presenter.info(&format!(
        "Watching {} clipboard, press Ctrl-C to stop",
        clipboard.name()
    ));

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let result = loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(event) => presenter.flavor_event(&event),
                None => break Ok(()),
            },
            signal = &mut ctrl_c => break signal.map_err(CommandError::Signal),
        }
    };

    clipboard.remove_flavor_listener(&listener);
    debug!("watch finished");
    result
}

/// Expand `\n`, `\r`, `\t` and `\\` so separators can be typed in a shell
pub(crate) fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

async fn read_stdin() -> Result<String, CommandError> {
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .map_err(CommandError::Stdin)?;
    Ok(text)
}

/// Config values taken from the environment
pub fn env_config() -> AppConfig {
    AppConfig {
        delimiter: env::var(DELIMITER_ENV).ok().map(|d| unescape(&d)),
        log_level: log_level_from_env(),
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|e| {
        debug!(error = %e, "ignoring unreadable config file");
        AppConfig::empty()
    });

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryClipboard;

    fn facade() -> SystemClipboard<InMemoryClipboard> {
        SystemClipboard::new(InMemoryClipboard::new())
    }

    #[test]
    fn usage_errors_exit_with_two() {
        assert_eq!(CommandError::Usage("bad".into()).exit_code(), EXIT_USAGE_ERROR);
        assert_eq!(CommandError::Absent("text").exit_code(), EXIT_ERROR);
        assert_eq!(
            CommandError::from(ClipboardError::Unavailable("busy".into())).exit_code(),
            EXIT_ERROR
        );
    }

    #[tokio::test]
    async fn copy_text_then_paste_reads_it_back() {
        let clipboard = facade();
        let presenter = Presenter::new();

        run_copy(
            CopyTarget::Text {
                text: Some("hello".to_string()),
            },
            &clipboard,
            &presenter,
        )
        .await
        .unwrap();

        assert_eq!(clipboard.as_string().unwrap(), Some("hello".to_string()));
    }

    #[tokio::test]
    async fn copy_files_stores_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        std::fs::write(&file, "x").unwrap();
        let clipboard = facade();

        run_copy(
            CopyTarget::Files { paths: vec![file.clone()] },
            &clipboard,
            &Presenter::new(),
        )
        .await
        .unwrap();

        let files = clipboard.as_files().unwrap().unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].is_absolute());
        assert!(files[0].ends_with("a.txt"));
    }

    #[tokio::test]
    async fn copy_missing_file_fails_without_touching_clipboard() {
        let clipboard = facade();
        clipboard.copy_text(Some("keep")).unwrap();

        let err = run_copy(
            CopyTarget::Files {
                paths: vec![PathBuf::from("/definitely/not/here.txt")],
            },
            &clipboard,
            &Presenter::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CommandError::Io { .. }));
        assert_eq!(clipboard.as_string().unwrap(), Some("keep".to_string()));
    }

    #[tokio::test]
    async fn paste_image_without_output_is_usage_error() {
        let args = PasteArgs {
            shape: PasteAs::Image,
            delimiter: None,
            output: None,
        };
        let err = run_paste(&args, &facade(), &AppConfig::empty(), &Presenter::new())
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), EXIT_USAGE_ERROR);
    }

    #[tokio::test]
    async fn paste_absent_shape_is_error() {
        let clipboard = facade();
        clipboard.copy_text(Some("only text")).unwrap();
        let args = PasteArgs {
            shape: PasteAs::Files,
            delimiter: Some(",".to_string()),
            output: None,
        };

        let err = run_paste(&args, &clipboard, &AppConfig::empty(), &Presenter::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Absent("file list")));
    }

    #[tokio::test]
    async fn image_round_trips_through_png_files() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.png");
        let clipboard = facade();
        let image = crate::domain::ImageData::from_rgba8(1, 1, vec![1u8, 2, 3, 4]).unwrap();
        clipboard.copy_image(Some(image.clone())).unwrap();

        let args = PasteArgs {
            shape: PasteAs::Image,
            delimiter: None,
            output: Some(output.clone()),
        };
        run_paste(&args, &clipboard, &AppConfig::empty(), &Presenter::new())
            .await
            .unwrap();

        clipboard.clear();
        run_copy(CopyTarget::Image { path: output }, &clipboard, &Presenter::new())
            .await
            .unwrap();
        assert_eq!(clipboard.as_image().unwrap(), Some(image));
    }

    #[test]
    fn status_reports_in_memory_clipboard() {
        assert!(run_status(None, &facade(), &Presenter::new()).is_ok());
    }

    #[test]
    fn status_has_fails_for_missing_flavor() {
        let clipboard = facade();
        clipboard.copy_text(Some("x")).unwrap();
        let presenter = Presenter::new();

        assert!(run_status(Some(DataFlavor::Text), &clipboard, &presenter).is_ok());
        let err = run_status(Some(DataFlavor::Image), &clipboard, &presenter).unwrap_err();
        assert!(matches!(err, CommandError::Absent("image")));
        assert_eq!(err.exit_code(), EXIT_ERROR);
    }

    #[tokio::test]
    async fn copy_is_refused_without_desktop_clipboard() {
        let clipboard = facade();
        let command = Commands::Copy {
            target: CopyTarget::Text {
                text: Some("lost".to_string()),
            },
        };

        let err = execute(command, &clipboard, &AppConfig::empty(), &Presenter::new())
            .await
            .unwrap_err();

        assert!(matches!(err, CommandError::NoDesktopClipboard));
        assert_eq!(err.exit_code(), EXIT_ERROR);
        assert_eq!(clipboard.as_string().unwrap(), None);
    }

    #[tokio::test]
    async fn read_commands_still_run_without_desktop_clipboard() {
        let clipboard = facade();
        clipboard.copy_text(Some("local")).unwrap();

        execute(
            Commands::Status { has: None },
            &clipboard,
            &AppConfig::empty(),
            &Presenter::new(),
        )
        .await
        .unwrap();
        execute(Commands::Clear, &clipboard, &AppConfig::empty(), &Presenter::new())
            .await
            .unwrap();
        assert!(clipboard.is_empty().unwrap());
    }
}
