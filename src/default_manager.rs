//! Process-wide default font manager.
//!
//! The default manager is built on first use from the platform factory and
//! then shared for the rest of the process. It is never torn down.

use fontmgr_traits::FontManager;
use once_cell::sync::OnceCell;

use crate::config::{BackendKind, FontManagerConfig};

/// Builds the platform's font manager, or `None` if the platform has none.
pub type PlatformFactory = fn() -> Option<FontManager>;

/// A lazily built, shared font manager.
///
/// The factory runs at most once, even when several threads ask for the
/// manager at the same time; afterwards `get` is a lock-free read.
pub struct DefaultManager {
    cell: OnceCell<FontManager>,
    factory: PlatformFactory,
}

impl DefaultManager {
    pub const fn new(factory: PlatformFactory) -> Self {
        Self {
            cell: OnceCell::new(),
            factory,
        }
    }

    /// Returns a new reference to the shared manager, building it on first use.
    pub fn get(&self) -> FontManager {
        self.cell
            .get_or_init(|| create_default(self.factory))
            .clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

fn create_default(factory: PlatformFactory) -> FontManager {
    match factory() {
        Some(manager) => {
            log::debug!("Default font manager: {}", manager.backend_name());
            manager
        }
        None => {
            log::info!("No platform font backend available; using EmptyFontManager");
            FontManager::empty()
        }
    }
}

static DEFAULT_MANAGER: DefaultManager = DefaultManager::new(platform_factory);

/// Returns a reference to the process-wide default font manager.
///
/// Every call returns a handle to the same instance.
pub fn ref_default() -> FontManager {
    DEFAULT_MANAGER.get()
}

/// The platform factory used by [`ref_default`].
///
/// Reads [`FontManagerConfig`] from the environment. A broken configuration
/// is logged and replaced by the defaults.
pub fn platform_factory() -> Option<FontManager> {
    let config = FontManagerConfig::from_env().unwrap_or_else(|e| {
        log::warn!("Ignoring invalid font manager config: {}", e);
        FontManagerConfig::default()
    });
    create_platform_manager(&config)
}

/// Builds the backend selected by `config`, or `None` if it selects none or
/// the backend is not compiled in.
pub fn create_platform_manager(config: &FontManagerConfig) -> Option<FontManager> {
    match config.backend {
        BackendKind::Empty => None,
        BackendKind::System => system_manager(config),
    }
}

#[cfg(feature = "system-fonts")]
fn system_manager(config: &FontManagerConfig) -> Option<FontManager> {
    let backend = fontmgr_system::SystemFontManager::new(&config.system_options());
    Some(FontManager::new(backend))
}

#[cfg(not(feature = "system-fonts"))]
fn system_manager(_config: &FontManagerConfig) -> Option<FontManager> {
    log::debug!("Built without the system-fonts feature; no system backend");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontmgr_traits::InMemoryFontManager;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_missing_backend_falls_back_to_empty() {
        static EMPTY: DefaultManager = DefaultManager::new(|| None);
        assert!(!EMPTY.is_initialized());

        let manager = EMPTY.get();
        assert!(EMPTY.is_initialized());
        assert_eq!(manager.backend_name(), "EmptyFontManager");
        assert_eq!(manager.count_families(), 0);
    }

    #[test]
    fn test_factory_runs_once() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        fn counting_factory() -> Option<FontManager> {
            CALLS.fetch_add(1, Ordering::SeqCst);
            Some(FontManager::new(InMemoryFontManager::new()))
        }
        static COUNTED: DefaultManager = DefaultManager::new(counting_factory);

        let first = COUNTED.get();
        let second = COUNTED.get();
        assert!(FontManager::ptr_eq(&first, &second));
        assert_eq!(first.backend_name(), "InMemoryFontManager");
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_backend_kind_yields_none() {
        let config = FontManagerConfig {
            backend: BackendKind::Empty,
            ..FontManagerConfig::default()
        };
        assert!(create_platform_manager(&config).is_none());
    }

    #[cfg(feature = "system-fonts")]
    #[test]
    fn test_system_backend_kind_builds_system_manager() {
        let config = FontManagerConfig {
            backend: BackendKind::System,
            load_system_fonts: false,
            font_dirs: Vec::new(),
        };
        let manager = create_platform_manager(&config).unwrap();
        assert_eq!(manager.backend_name(), "SystemFontManager");
        assert_eq!(manager.count_families(), 0);
    }
}
