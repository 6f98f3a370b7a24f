use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

type LogFile = Arc<RwLock<Option<File>>>;

/// Hands out stderr writers that also mirror into the optional log file.
#[derive(Clone, Default)]
struct TeeMakeWriter {
    file: LogFile,
}

struct TeeWriter {
    file: LogFile,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for TeeMakeWriter {
    type Writer = TeeWriter;

    fn make_writer(&'a self) -> Self::Writer {
        TeeWriter {
            file: self.file.clone(),
        }
    }
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = io::stderr().write(buf)?;
        let mut guard = self.file.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(file) = guard.as_mut() {
            let _ = file.write_all(&buf[..written]);
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        let mut guard = self.file.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(file) = guard.as_mut() {
            let _ = file.flush();
        }
        Ok(())
    }
}

static WRITER: OnceLock<TeeMakeWriter> = OnceLock::new();

/// Installs the global subscriber. `RUST_LOG` overrides the `info` default.
pub fn init() {
    let _ = tracing_log::LogTracer::init();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let writer = WRITER.get_or_init(TeeMakeWriter::default).clone();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .try_init();
}

/// Starts (or stops, with `None`) mirroring log output into a file.
pub fn set_log_file(log_file: Option<&Path>) -> io::Result<()> {
    let writer = WRITER.get_or_init(TeeMakeWriter::default);
    let file = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            Some(OpenOptions::new().create(true).append(true).open(path)?)
        }
        None => None,
    };
    *writer.file.write().unwrap_or_else(PoisonError::into_inner) = file;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tee_writer_mirrors_into_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let handle = file.reopen().unwrap();

        let mut writer = TeeWriter {
            file: Arc::new(RwLock::new(Some(handle))),
        };
        writer.write_all(b"hello log\n").unwrap();
        writer.flush().unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents, "hello log\n");
    }

    #[test]
    fn set_log_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.log");
        set_log_file(Some(&path)).unwrap();
        assert!(path.exists());
        set_log_file(None).unwrap();
    }
}
