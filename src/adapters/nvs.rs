//! NVS (Non-Volatile Storage) adapter.
//!
//! Implements both [`ByteStore`] and [`ConfigPort`] for the IRLatch
//! system.
//!
//! The byte store is an EEPROM-style emulation: a small fixed page held
//! in RAM and mirrored to a single NVS blob on every write. ESP-IDF
//! commits NVS blobs atomically, so a settings write survives power
//! loss as either the old or the new page — never a torn one. On host
//! targets the page lives purely in memory (dev/test only).
//!
//! Config validation happens here, before persistence: invalid ranges
//! are rejected, not clamped, so a corrupt blob can never smuggle in
//! dangerous operating parameters.

use crate::app::ports::{ByteStore, ConfigError, ConfigPort, StorageError};
use crate::config::SystemConfig;
use core::cell::RefCell;
use log::info;
#[cfg(target_os = "espidf")]
use log::warn;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
const NVS_NAMESPACE: &str = "irlatch";

/// Emulated EEPROM page size. Both settings offsets (0 and 100) plus
/// four bytes each fit with generous headroom.
pub const PAGE_SIZE: usize = 512;

#[cfg(target_os = "espidf")]
const MAX_BLOB_SIZE: usize = 4000;

pub struct NvsAdapter {
    /// RAM mirror of the persisted page; reads always come from here.
    page: RefCell<Vec<u8>>,
    #[cfg(not(target_os = "espidf"))]
    cfg_blob: RefCell<Option<Vec<u8>>>,
}

impl NvsAdapter {
    /// Create the adapter, initialising NVS flash and loading the page
    /// mirror (zeroes on first boot).
    ///
    /// Returns `Err(ConfigError::IoError)` if flash initialisation
    /// fails unrecoverably. On first boot or after a version mismatch
    /// the NVS partition is erased and re-initialised automatically.
    pub fn new() -> Result<Self, ConfigError> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: nvs_flash_init / nvs_flash_erase are called from the
            // single main-task context before any concurrent NVS access.
            let ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES || ret == ESP_ERR_NVS_NEW_VERSION_FOUND {
                warn!("NVS: erasing and re-initialising flash partition");
                let ret2 = unsafe { nvs_flash_erase() };
                if ret2 != ESP_OK {
                    return Err(ConfigError::IoError);
                }
                let ret3 = unsafe { nvs_flash_init() };
                if ret3 != ESP_OK {
                    return Err(ConfigError::IoError);
                }
            } else if ret != ESP_OK {
                return Err(ConfigError::IoError);
            }

            let page = Self::load_page_blob().unwrap_or_else(|| vec![0u8; PAGE_SIZE]);
            info!("NvsAdapter: ESP-IDF NVS initialised ({} byte page)", page.len());
            Ok(Self {
                page: RefCell::new(page),
            })
        }

        #[cfg(not(target_os = "espidf"))]
        {
            info!("NvsAdapter: simulation backend");
            Ok(Self {
                page: RefCell::new(vec![0u8; PAGE_SIZE]),
                cfg_blob: RefCell::new(None),
            })
        }
    }

    /// Open an NVS namespace, execute a closure with the handle, then close.
    #[cfg(target_os = "espidf")]
    fn with_nvs_handle<F, T>(write: bool, f: F) -> Result<T, i32>
    where
        F: FnOnce(nvs_handle_t) -> Result<T, i32>,
    {
        let mut ns_buf = [0u8; 16];
        let ns_bytes = NVS_NAMESPACE.as_bytes();
        let len = ns_bytes.len().min(15);
        ns_buf[..len].copy_from_slice(&ns_bytes[..len]);

        let mut handle: nvs_handle_t = 0;
        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };

        let ret = unsafe { nvs_open(ns_buf.as_ptr() as *const _, mode, &mut handle) };
        if ret != ESP_OK {
            return Err(ret);
        }

        let result = f(handle);
        unsafe {
            nvs_close(handle);
        }
        result
    }

    #[cfg(target_os = "espidf")]
    fn load_page_blob() -> Option<Vec<u8>> {
        let result = Self::with_nvs_handle(false, |handle| {
            let key_cstr = b"eeprom\0";
            let mut size: usize = 0;

            // First call: get size
            let ret = unsafe {
                nvs_get_blob(
                    handle,
                    key_cstr.as_ptr() as *const _,
                    core::ptr::null_mut(),
                    &mut size,
                )
            };
            if ret != ESP_OK || size == 0 || size > MAX_BLOB_SIZE {
                return Err(ret);
            }

            let mut buf = vec![0u8; size];
            let ret = unsafe {
                nvs_get_blob(
                    handle,
                    key_cstr.as_ptr() as *const _,
                    buf.as_mut_ptr() as *mut _,
                    &mut size,
                )
            };
            if ret != ESP_OK {
                return Err(ret);
            }
            Ok(buf)
        });

        match result {
            Ok(mut buf) => {
                buf.resize(PAGE_SIZE, 0);
                Some(buf)
            }
            Err(_) => None,
        }
    }

    #[cfg(target_os = "espidf")]
    fn store_blob(key: &'static [u8], data: &[u8]) -> Result<(), StorageError> {
        let result = Self::with_nvs_handle(true, |handle| {
            let ret = unsafe {
                nvs_set_blob(
                    handle,
                    key.as_ptr() as *const _,
                    data.as_ptr() as *const _,
                    data.len(),
                )
            };
            if ret != ESP_OK {
                return Err(ret);
            }
            let ret = unsafe { nvs_commit(handle) };
            if ret != ESP_OK {
                return Err(ret);
            }
            Ok(())
        });
        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("NvsAdapter: blob write error {}", e);
                Err(StorageError::IoError)
            }
        }
    }
}

fn validate_config(cfg: &SystemConfig) -> Result<(), ConfigError> {
    if cfg.timeout_floor_ms == 0 {
        return Err(ConfigError::ValidationFailed("timeout_floor_ms must be > 0"));
    }
    if cfg.timeout_floor_ms > cfg.timeout_default_ms {
        return Err(ConfigError::ValidationFailed(
            "timeout_floor_ms must be <= timeout_default_ms",
        ));
    }
    if cfg.timeout_default_ms > cfg.timeout_ceiling_ms {
        return Err(ConfigError::ValidationFailed(
            "timeout_default_ms must be <= timeout_ceiling_ms",
        ));
    }
    if cfg.timeout_ceiling_ms > 60_000 {
        return Err(ConfigError::ValidationFailed(
            "timeout_ceiling_ms must be <= 60000",
        ));
    }
    if cfg.timeout_step_ms == 0 || cfg.timeout_step_ms > cfg.timeout_ceiling_ms {
        return Err(ConfigError::ValidationFailed(
            "timeout_step_ms must be in 1..=timeout_ceiling_ms",
        ));
    }
    if !(100..=10_000).contains(&cfg.adjust_repeat_ms) {
        return Err(ConfigError::ValidationFailed(
            "adjust_repeat_ms must be 100–10000",
        ));
    }
    if cfg.match_debounce_ms >= cfg.timeout_floor_ms {
        return Err(ConfigError::ValidationFailed(
            "match_debounce_ms must be < timeout_floor_ms",
        ));
    }
    if !(10..=1_000).contains(&cfg.blink_on_ms) || !(10..=1_000).contains(&cfg.blink_off_ms) {
        return Err(ConfigError::ValidationFailed(
            "blink durations must be 10–1000",
        ));
    }
    if cfg.blink_on_ms + cfg.blink_off_ms >= cfg.adjust_repeat_ms {
        return Err(ConfigError::ValidationFailed(
            "blink total must be < adjust_repeat_ms",
        ));
    }
    Ok(())
}

impl ByteStore for NvsAdapter {
    fn read_at(&self, offset: usize, buf: &mut [u8]) -> Result<usize, StorageError> {
        let page = self.page.borrow();
        let end = offset.checked_add(buf.len()).ok_or(StorageError::OutOfBounds)?;
        if end > page.len() {
            return Err(StorageError::OutOfBounds);
        }
        buf.copy_from_slice(&page[offset..end]);
        Ok(buf.len())
    }

    fn write_at(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError> {
        let end = offset.checked_add(data.len()).ok_or(StorageError::OutOfBounds)?;
        {
            let mut page = self.page.borrow_mut();
            if end > page.len() {
                return Err(StorageError::OutOfBounds);
            }
            page[offset..end].copy_from_slice(data);
        }

        #[cfg(target_os = "espidf")]
        Self::store_blob(b"eeprom\0", &self.page.borrow())?;

        Ok(())
    }
}

impl ConfigPort for NvsAdapter {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        #[cfg(not(target_os = "espidf"))]
        {
            if let Some(bytes) = self.cfg_blob.borrow().as_deref() {
                let cfg: SystemConfig =
                    postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted)?;
                info!("NvsAdapter: loaded config from store");
                Ok(cfg)
            } else {
                info!("NvsAdapter: no stored config, using defaults");
                Ok(SystemConfig::default())
            }
        }

        #[cfg(target_os = "espidf")]
        {
            let result = Self::with_nvs_handle(false, |handle| {
                let key_cstr = b"syscfg\0";
                let mut size: usize = 0;

                let ret = unsafe {
                    nvs_get_blob(
                        handle,
                        key_cstr.as_ptr() as *const _,
                        core::ptr::null_mut(),
                        &mut size,
                    )
                };
                if ret == ESP_ERR_NVS_NOT_FOUND {
                    return Err(ESP_ERR_NVS_NOT_FOUND);
                }
                if ret != ESP_OK || size == 0 || size > MAX_BLOB_SIZE {
                    return Err(ret);
                }

                let mut buf = vec![0u8; size];
                let ret = unsafe {
                    nvs_get_blob(
                        handle,
                        key_cstr.as_ptr() as *const _,
                        buf.as_mut_ptr() as *mut _,
                        &mut size,
                    )
                };
                if ret != ESP_OK {
                    return Err(ret);
                }
                Ok(buf)
            });

            match result {
                Ok(bytes) => {
                    let cfg: SystemConfig =
                        postcard::from_bytes(&bytes).map_err(|_| ConfigError::Corrupted)?;
                    info!("NvsAdapter: loaded config from NVS ({} bytes)", bytes.len());
                    Ok(cfg)
                }
                Err(e) if e == ESP_ERR_NVS_NOT_FOUND => {
                    info!("NvsAdapter: no stored config, using defaults");
                    Ok(SystemConfig::default())
                }
                Err(e) => {
                    warn!("NvsAdapter: NVS read error {}, using defaults", e);
                    Ok(SystemConfig::default())
                }
            }
        }
    }

    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError> {
        validate_config(config)?;

        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;

        #[cfg(not(target_os = "espidf"))]
        {
            *self.cfg_blob.borrow_mut() = Some(bytes);
            info!("NvsAdapter: config saved (simulation)");
            Ok(())
        }

        #[cfg(target_os = "espidf")]
        {
            Self::store_blob(b"syscfg\0", &bytes).map_err(|_| ConfigError::IoError)?;
            info!("NvsAdapter: config saved to NVS ({} bytes)", bytes.len());
            Ok(())
        }
    }
}
