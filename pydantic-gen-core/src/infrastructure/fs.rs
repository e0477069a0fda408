use crate::infrastructure::error::InfrastructureError;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Content of the `__init__.py` written into new output packages.
const INIT_FILE_CONTENT: &str = "\n";

/// Write content to a file atomically using a temporary file.
///
/// The temporary file lives next to the target so the final rename never
/// crosses a filesystem: the generated module is either complete or absent.
/// An existing target keeps its permissions, a new one gets the mode of a
/// plain `fs::write` (0o666 less the umask).
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut temp_file = builder.tempfile_in(parent).map_err(InfrastructureError::Io)?;

    if let Ok(existing) = fs::metadata(path) {
        temp_file
            .as_file()
            .set_permissions(existing.permissions())
            .map_err(InfrastructureError::Io)?;
    }

    temp_file
        .write_all(content.as_ref())
        .map_err(InfrastructureError::Io)?;

    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

/// Creates `dir` when it is missing and, if asked to, turns it into a
/// Python package with an `__init__.py`.
///
/// Returns `true` when the directory was created. An existing directory is
/// left untouched; an existing file at `dir` is an error.
pub fn ensure_package_dir(dir: &Path, init_file: bool) -> Result<bool, InfrastructureError> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(InfrastructureError::NotADirectory(dir.to_path_buf()));
        }
        return Ok(false);
    }

    fs::create_dir_all(dir)?;
    if init_file {
        atomic_write(dir.join("__init__.py"), INIT_FILE_CONTENT)?;
    }
    tracing::debug!(dir = %dir.display(), init_file, "Created output package");
    Ok(true)
}
