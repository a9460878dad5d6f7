use anyhow::{bail, Result};

/// Disk space measurements in bytes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DiskSpace {
    pub total: u64,
    pub used: u64,
}

/// Get disk space info via statvfs. `used` counts blocks not free, so space
/// reserved for root is reported as used.
#[cfg(unix)]
#[allow(unsafe_code)]
pub(crate) fn get_disk_space(mount_path: &str) -> Result<DiskSpace> {
    use std::ffi::CString;

    let c_path = CString::new(mount_path)?;
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };

    let ret = unsafe { libc::statvfs(c_path.as_ptr(), &raw mut stat) };
    if ret != 0 {
        bail!("statvfs failed for {}: {}", mount_path, std::io::Error::last_os_error());
    }

    let block_size = stat.f_frsize as u64;
    let total = stat.f_blocks as u64 * block_size;
    let free = stat.f_bfree as u64 * block_size;

    Ok(DiskSpace { total, used: total.saturating_sub(free) })
}

#[cfg(not(unix))]
pub(crate) fn get_disk_space(mount_path: &str) -> Result<DiskSpace> {
    bail!("disk space sampling is not supported on this platform ({mount_path})")
}
