// mariage-core/src/infrastructure/fs.rs

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::infrastructure::error::InfrastructureError;

/// Write a file atomically: the content goes to a temporary file in the target's
/// directory, which is then renamed over the target.
///
/// Readers see either the previous file or the complete new one, never a partial
/// write. If `fill` fails the temporary file is discarded and the target is untouched.
pub fn atomic_write_with<P, F>(path: P, fill: F) -> Result<(), InfrastructureError>
where
    P: AsRef<Path>,
    F: FnOnce(&mut dyn Write) -> Result<(), InfrastructureError>,
{
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    // Same directory so the final rename never crosses filesystems
    let temp_file = tempfile::NamedTempFile::new_in(parent)?;

    {
        let mut out = BufWriter::new(temp_file.as_file());
        fill(&mut out)?;
        out.flush()?;
    }
    temp_file.as_file().sync_all()?;

    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    atomic_write_with(path, |out| {
        out.write_all(content.as_ref())?;
        Ok(())
    })
}

pub fn ensure_dir(dir: &Path) -> Result<(), InfrastructureError> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_overwrites_existing() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("type_acte.csv");

        atomic_write(&file_path, "id;libelle\n")?;
        atomic_write(&file_path, "id;libelle\n1;Mariage\n")?;

        assert_eq!(fs::read_to_string(file_path)?, "id;libelle\n1;Mariage\n");
        Ok(())
    }

    #[test]
    fn test_failed_fill_leaves_previous_content() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("personne.csv");
        atomic_write(&file_path, "previous")?;

        let result = atomic_write_with(&file_path, |out| {
            out.write_all(b"half a ta")?;
            Err(InfrastructureError::ConfigError("boom".into()))
        });

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&file_path)?, "previous");
        // No stray temporary files left behind
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn test_ensure_dir_creates_nested() -> Result<()> {
        let dir = tempdir()?;
        let nested = dir.path().join("data/processed");
        ensure_dir(&nested)?;
        assert!(nested.is_dir());
        Ok(())
    }
}
