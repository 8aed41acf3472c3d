/*
[INPUT]:  Agent key material and a storage directory
[OUTPUT]: Session-scoped persistence of the delegated key
[POS]:    Storage layer - agent key lifecycle (provision to logout)
[UPDATE]: When key storage format or file naming conventions change
*/

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use alloy_primitives::Address;
use tracing::debug;

const KEY_FILE: &str = "agent.key";
const ADDRESS_FILE: &str = "agent.addr";

/// Session-scoped store for the delegated signing key.
///
/// Holds at most one agent: each provisioning overwrites the previous key
/// (last write wins, no locking; concurrent writers are an accepted race).
/// `clear` removes the material at logout.
#[derive(Debug, Clone)]
pub struct SessionKeyStore {
    dir: PathBuf,
}

impl SessionKeyStore {
    /// Create a store rooted at the given directory
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Default per-user data directory
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("hyperperp")
    }

    /// Persist the agent secret and address, overwriting any previous agent
    pub fn save(&self, secret: &[u8; 32], address: Address) -> io::Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let key_path = self.dir.join(KEY_FILE);
        fs::write(&key_path, hex::encode(secret))?;
        restrict_permissions(&key_path)?;

        fs::write(self.dir.join(ADDRESS_FILE), address.to_checksum(None))?;
        debug!(agent = %address, "agent key persisted");
        Ok(())
    }

    /// Load the stored agent secret, if any
    pub fn load_secret(&self) -> Option<[u8; 32]> {
        let content = fs::read_to_string(self.dir.join(KEY_FILE)).ok()?;
        let bytes = hex::decode(content.trim()).ok()?;
        bytes.try_into().ok()
    }

    /// Load the stored agent address, if any
    pub fn agent_address(&self) -> Option<Address> {
        let content = fs::read_to_string(self.dir.join(ADDRESS_FILE)).ok()?;
        content.trim().parse().ok()
    }

    /// Remove all stored key material (logout)
    pub fn clear(&self) -> io::Result<()> {
        for file in [KEY_FILE, ADDRESS_FILE] {
            match fs::remove_file(self.dir.join(file)) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o600);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
