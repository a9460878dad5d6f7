use anyhow::{Context, Result};

/// Pseudo and virtual filesystems that never fill up in a meaningful way.
const SKIP_FS: &[&str] = &[
    "proc", "sysfs", "devpts", "tmpfs", "devtmpfs", "cgroup", "cgroup2",
    "pstore", "efivarfs", "securityfs", "debugfs", "tracefs", "bpf",
    "hugetlbfs", "mqueue", "fusectl", "configfs", "binfmt_misc",
    "overlay", "nsfs", "rpc_pipefs", "autofs", "squashfs",
];

const SKIP_MOUNT_PREFIX: &[&str] = &["/proc", "/sys", "/dev", "/run/user", "/snap"];

/// One line of the kernel mount table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MountEntry {
    pub device: String,
    pub mount: String,
    pub fs_type: String,
}

impl MountEntry {
    fn is_real(&self) -> bool {
        !SKIP_FS.contains(&self.fs_type.as_str())
            && !SKIP_MOUNT_PREFIX.iter().any(|p| self.mount.starts_with(p))
            && !self.device.starts_with("/dev/loop")
    }
}

/// Parse `/proc/mounts` content. Octal escapes (`\040` for space) in mount
/// paths are decoded.
pub(crate) fn parse_mount_table(contents: &str) -> Vec<MountEntry> {
    contents
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let device = fields.next()?;
            let mount = fields.next()?;
            let fs_type = fields.next()?;
            Some(MountEntry {
                device: device.to_string(),
                mount: unescape_mount(mount),
                fs_type: fs_type.to_string(),
            })
        })
        .collect()
}

fn unescape_mount(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() {
            if let Some(code) = std::str::from_utf8(&bytes[i + 1..i + 4])
                .ok()
                .and_then(|oct| u8::from_str_radix(oct, 8).ok())
            {
                out.push(code);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Select the mounts to sample.
///
/// With `configured` empty, every real filesystem in the mount table is
/// returned, sorted by mount point and deduplicated (bind mounts repeat).
/// Otherwise exactly the configured mounts are returned, with their
/// filesystem type filled in when the table knows it.
pub(crate) fn discover_mounts(table: &[MountEntry], configured: &[String]) -> Vec<MountEntry> {
    if !configured.is_empty() {
        return configured
            .iter()
            .map(|mount| {
                table.iter().rev().find(|e| &e.mount == mount).cloned().unwrap_or_else(|| {
                    MountEntry { device: String::new(), mount: mount.clone(), fs_type: String::new() }
                })
            })
            .collect();
    }

    let mut mounts: Vec<MountEntry> = table.iter().filter(|e| e.is_real()).cloned().collect();
    mounts.sort_by(|a, b| a.mount.cmp(&b.mount));
    mounts.dedup_by(|a, b| a.mount == b.mount);
    mounts
}

/// Read the live mount table.
pub(crate) fn read_mount_table() -> Result<Vec<MountEntry>> {
    let contents =
        std::fs::read_to_string("/proc/mounts").context("Failed to read /proc/mounts")?;
    Ok(parse_mount_table(&contents))
}
