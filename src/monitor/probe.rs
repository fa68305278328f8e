//! Volume free-space queries

use std::io;
use std::path::Path;

/// Source of the free space available on the volume holding a directory
pub trait SpaceProbe: Send + Sync {
    /// Bytes available to unprivileged users on the volume containing `directory`
    fn free_bytes(&self, directory: &Path) -> io::Result<u64>;
}

/// Queries the operating system for the volume's free space
#[derive(Debug, Clone, Copy, Default)]
pub struct VolumeProbe;

#[cfg(unix)]
impl SpaceProbe for VolumeProbe {
    #[allow(clippy::unnecessary_cast)]
    fn free_bytes(&self, directory: &Path) -> io::Result<u64> {
        use std::ffi::CString;
        use std::os::unix::ffi::OsStrExt;

        let c_path = CString::new(directory.as_os_str().as_bytes())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        // SAFETY: statvfs only writes into the zeroed struct we own, and the
        // path is a valid NUL-terminated string for the duration of the call.
        let stat = unsafe {
            let mut stat: libc::statvfs = std::mem::zeroed();
            if libc::statvfs(c_path.as_ptr(), &mut stat) != 0 {
                return Err(io::Error::last_os_error());
            }
            stat
        };

        Ok((stat.f_bavail as u64).saturating_mul(stat.f_frsize as u64))
    }
}

#[cfg(not(unix))]
impl SpaceProbe for VolumeProbe {
    fn free_bytes(&self, _directory: &Path) -> io::Result<u64> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "free space queries are only supported on unix",
        ))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_volume_reports_free_space() {
        let temp_dir = TempDir::new().unwrap();
        let free = VolumeProbe.free_bytes(temp_dir.path()).unwrap();
        assert!(free > 0);
    }

    #[test]
    fn test_volume_missing_directory() {
        let result = VolumeProbe.free_bytes(Path::new("/nonexistent/logwarden/logs"));
        assert!(result.is_err());
    }
}
