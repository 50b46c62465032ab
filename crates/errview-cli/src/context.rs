use crate::args::OutputFormat;
use crate::presentation::ConsoleRenderer;
use anyhow::{Result, anyhow};
use errview_runtime::{CacheKey, Config, ErrView, resolve_workspace_path};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

/// Per-invocation state shared by the handlers. The configuration and the
/// `ErrView` are only built when a handler first asks for them.
pub struct ExecutionContext {
    data_dir: PathBuf,
    sources: Vec<String>,
    key: CacheKey,
    pub format: OutputFormat,
    config: OnceCell<Config>,
    errview: OnceCell<ErrView>,
}

impl ExecutionContext {
    pub fn new(
        data_dir: Option<&str>,
        sources: Vec<String>,
        session: Option<String>,
        format: OutputFormat,
    ) -> Result<Self> {
        let data_dir = resolve_workspace_path(data_dir)?;
        let key = match session {
            Some(id) => CacheKey::session(id),
            None => CacheKey::Process,
        };

        Ok(Self {
            data_dir,
            sources,
            key,
            format,
            config: OnceCell::new(),
            errview: OnceCell::new(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    pub fn renderer(&self) -> ConsoleRenderer {
        ConsoleRenderer::new(self.format)
    }

    pub fn config(&self) -> Result<&Config> {
        self.config.get_or_try_init(|| {
            let config_path = ErrView::config_path(&self.data_dir);
            let config = Config::load_from(&config_path)
                .map_err(|e| anyhow!("Failed to load {}: {}", config_path.display(), e))?;
            Ok(config.with_sources(self.sources.clone()))
        })
    }

    pub fn errview(&self) -> Result<&ErrView> {
        self.errview.get_or_try_init(|| {
            let config = self.config()?.clone();
            Ok(ErrView::from_config(config)?)
        })
    }
}
