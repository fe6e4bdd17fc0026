//! # Runtime Startup
//!
//! ```text
//! start()
//!   ├─ CLEO version gate
//!   ├─ host identifier ──> build layout
//!   ├─ script space symbol
//!   ├─ accessor patch (re3 / reVC only)
//!   ├─ pool headers ──> three HandlePools
//!   └─ text ring symbols ──> DrawRing
//! ```

use scm_core::{CoreError, EntityCategory, HandlePool, PoolBindings, RawMemory, ValueStore};
use scm_shared::{BuildLayout, CleoVersion, Host};
use scm_ui::DrawRing;

use crate::bootstrap::patch_script_var_accessor;
use crate::config::RuntimeConfig;
use crate::error::RuntimeError;

/// Everything a script needs, resolved once against one host build.
pub struct Runtime<'m, M: RawMemory + ?Sized> {
    host: Host,
    cleo: CleoVersion,
    layout: BuildLayout,
    script_space: usize,
    vehicles: HandlePool<'m, M>,
    characters: HandlePool<'m, M>,
    objects: HandlePool<'m, M>,
    store: ValueStore<'m, M>,
    ring: DrawRing<'m, M>,
}

impl<'m, M: RawMemory + ?Sized> Runtime<'m, M> {
    /// Starts the runtime for the host identified by `host`.
    ///
    /// # Errors
    ///
    /// Any failure is fatal and leaves host memory untouched, except that
    /// a pool or ring failure after the re3/reVC patch keeps the patch.
    ///
    /// - [`scm_shared::SharedError::VersionTooOld`] / `MalformedVersion`
    /// - [`scm_shared::SharedError::UnsupportedHost`] for unknown or
    ///   unsupported hosts
    /// - [`CoreError::SymbolNotFound`] for any unresolved symbol, including
    ///   a script space that resolves to zero
    /// - [`CoreError::InvalidPoolHeader`] for a broken pool header
    pub fn start(
        memory: &'m M,
        host: &str,
        cleo_version: &str,
        config: &RuntimeConfig,
    ) -> Result<Self, RuntimeError> {
        let cleo = CleoVersion::parse(cleo_version)?;
        cleo.require(config.min_version()?)?;
        let host: Host = host.parse()?;
        let table = config.layout_table()?;
        let layout = table.get(host)?.clone();
        tracing::info!("starting on {} with CLEO {}", host, cleo);

        Self::with_layout(memory, host, cleo, layout)
    }

    /// Starts against an explicit layout, skipping the version gate.
    ///
    /// # Errors
    ///
    /// Same as [`Self::start`] minus the version and host checks.
    pub fn with_layout(
        memory: &'m M,
        host: Host,
        cleo: CleoVersion,
        layout: BuildLayout,
    ) -> Result<Self, RuntimeError> {
        let script_space = resolve_nonzero(memory, &layout.script_space)?;
        tracing::debug!("script space at {:#x}", script_space);

        if host.needs_script_var_patch() {
            let name = layout.script_var_accessor.as_deref().ok_or_else(|| {
                CoreError::SymbolNotFound(format!("script variable accessor for {host}"))
            })?;
            let accessor = resolve_nonzero(memory, name)?;
            patch_script_var_accessor(memory, accessor, script_space)?;
        }

        let bindings = PoolBindings::resolve(memory, &layout)?;
        let vehicles = HandlePool::new(memory, EntityCategory::Vehicle, &bindings)?;
        let characters = HandlePool::new(memory, EntityCategory::Character, &bindings)?;
        let objects = HandlePool::new(memory, EntityCategory::Object, &bindings)?;
        tracing::info!(
            "pools bound: {} vehicles, {} characters, {} objects",
            vehicles.capacity(),
            characters.capacity(),
            objects.capacity()
        );

        let store = ValueStore::new(memory, script_space);
        let ring = DrawRing::resolve(memory, &layout)?;
        tracing::debug!("text ring of {} slots", ring.capacity());

        Ok(Self {
            host,
            cleo,
            layout,
            script_space,
            vehicles,
            characters,
            objects,
            store,
            ring,
        })
    }

    /// Host build this runtime is bound to.
    #[must_use]
    pub fn host(&self) -> Host {
        self.host
    }

    /// CLEO version reported at startup.
    #[must_use]
    pub fn cleo_version(&self) -> CleoVersion {
        self.cleo
    }

    /// Layout the runtime was resolved from.
    #[must_use]
    pub fn layout(&self) -> &BuildLayout {
        &self.layout
    }

    /// Address of the script global variable space.
    #[must_use]
    pub fn script_space(&self) -> usize {
        self.script_space
    }

    /// Vehicle handles.
    #[must_use]
    pub fn vehicles(&self) -> &HandlePool<'m, M> {
        &self.vehicles
    }

    /// Character handles.
    #[must_use]
    pub fn characters(&self) -> &HandlePool<'m, M> {
        &self.characters
    }

    /// Object handles.
    #[must_use]
    pub fn objects(&self) -> &HandlePool<'m, M> {
        &self.objects
    }

    /// Handle pool for `category`.
    #[must_use]
    pub fn pool(&self, category: EntityCategory) -> &HandlePool<'m, M> {
        match category {
            EntityCategory::Vehicle => &self.vehicles,
            EntityCategory::Character => &self.characters,
            EntityCategory::Object => &self.objects,
        }
    }

    /// Script global variables.
    #[must_use]
    pub fn store(&self) -> &ValueStore<'m, M> {
        &self.store
    }

    /// Drawable text slots.
    #[must_use]
    pub fn ring(&self) -> &DrawRing<'m, M> {
        &self.ring
    }

    /// Mutable ring, for [`DrawRing::set_palette`].
    pub fn ring_mut(&mut self) -> &mut DrawRing<'m, M> {
        &mut self.ring
    }
}

fn resolve_nonzero<M: RawMemory + ?Sized>(memory: &M, name: &str) -> Result<usize, CoreError> {
    memory
        .resolve_symbol(name)
        .filter(|&address| address != 0)
        .ok_or_else(|| CoreError::SymbolNotFound(name.to_owned()))
}
