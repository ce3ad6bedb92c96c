//! Slash commands typed into the composer.
//!
//! The terminal has no file picker, so attachments go through commands:
//!
//! - `/attach <path>`: queue a file (images, PDFs and audio only)
//! - `/detach <n>`: drop pending attachment number `n` (1-based)
//! - `/done`: mark the active exchange as completed
//!
//! A line starting with `//` is a message that begins with a literal `/`.

use std::path::{Path, PathBuf};

use crate::core::composer::PendingFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerCommand {
    Attach(PathBuf),
    Detach(usize),
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Usage(&'static str),
    Unsupported(String),
    Unknown(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Usage(usage) => write!(f, "Uso: {usage}"),
            CommandError::Unsupported(name) => {
                write!(f, "Tipo não suportado: {name} (imagens, PDF ou áudio)")
            }
            CommandError::Unknown(cmd) => write!(f, "Comando desconhecido: {cmd}"),
        }
    }
}

/// Parse a composer line. Returns `None` when the line is a regular message.
pub fn parse(line: &str) -> Option<Result<ComposerCommand, CommandError>> {
    let line = line.trim();
    let rest = line.strip_prefix('/')?;
    if rest.starts_with('/') {
        return None;
    }
    let (name, arg) = rest
        .split_once(char::is_whitespace)
        .map(|(n, a)| (n, a.trim()))
        .unwrap_or((rest, ""));

    Some(match name {
        "attach" if arg.is_empty() => Err(CommandError::Usage("/attach <caminho>")),
        "attach" => Ok(ComposerCommand::Attach(PathBuf::from(arg))),
        "detach" => match arg.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(ComposerCommand::Detach(n - 1)),
            _ => Err(CommandError::Usage("/detach <número>")),
        },
        "done" => Ok(ComposerCommand::Done),
        other => Err(CommandError::Unknown(format!("/{other}"))),
    })
}

/// For an escaped `//...` line, the message text with one slash removed.
pub fn literal(line: &str) -> Option<String> {
    let trimmed = line.trim_start();
    trimmed
        .starts_with("//")
        .then(|| trimmed[1..].to_string())
}

/// MIME type for a path, limited to what the picker accepts
/// (`image/*`, `.pdf`, `audio/*`).
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        "m4a" => "audio/mp4",
        "webm" => "audio/webm",
        _ => return None,
    };
    Some(mime)
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: PathBuf) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path,
    }
}

/// Turn a path into a pending attachment, rejecting unsupported types.
pub fn pending_file(path: PathBuf) -> Result<PendingFile, CommandError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime = mime_for_path(&path).ok_or_else(|| CommandError::Unsupported(name.clone()))?;
    Ok(PendingFile::new(name, mime, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(parse("Olá"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn double_slash_escapes_a_leading_slash() {
        assert_eq!(parse("//s não entendi"), None);
        assert_eq!(literal("//s não entendi"), Some("/s não entendi".into()));
        assert_eq!(literal("  //done"), Some("/done".into()));
        assert_eq!(literal("/done"), None);
        assert_eq!(literal("Olá"), None);
    }

    #[test]
    fn parses_attach_and_detach() {
        assert_eq!(
            parse("/attach ~/fotos/tela.png"),
            Some(Ok(ComposerCommand::Attach(PathBuf::from("~/fotos/tela.png"))))
        );
        assert_eq!(parse("/detach 2"), Some(Ok(ComposerCommand::Detach(1))));
        assert_eq!(parse(" /done "), Some(Ok(ComposerCommand::Done)));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(matches!(parse("/attach"), Some(Err(CommandError::Usage(_)))));
        assert!(matches!(parse("/detach 0"), Some(Err(CommandError::Usage(_)))));
        assert!(matches!(parse("/detach x"), Some(Err(CommandError::Usage(_)))));
        assert!(matches!(parse("/call"), Some(Err(CommandError::Unknown(_)))));
    }

    #[test]
    fn picker_filters_extensions() {
        assert_eq!(mime_for_path(Path::new("a.PDF")), Some("application/pdf"));
        assert_eq!(mime_for_path(Path::new("voz.ogg")), Some("audio/ogg"));
        assert_eq!(mime_for_path(Path::new("notas.txt")), None);
        assert_eq!(mime_for_path(Path::new("sem_extensao")), None);
    }

    #[test]
    fn expands_home_prefix_only() {
        let plain = PathBuf::from("/tmp/a.png");
        assert_eq!(expand_home(plain.clone()), plain);
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(PathBuf::from("~/a.png")), home.join("a.png"));
        }
    }

    #[test]
    fn pending_file_uses_file_name() {
        let file = pending_file(PathBuf::from("/tmp/roteiro.pdf")).unwrap();
        assert_eq!(file.name, "roteiro.pdf");
        assert_eq!(file.mime, "application/pdf");
        assert!(matches!(
            pending_file(PathBuf::from("/tmp/x.exe")),
            Err(CommandError::Unsupported(_))
        ));
    }
}
