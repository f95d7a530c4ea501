//! LoaderBuilder - ローダーの構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装（`clock` で型パラメータを差し替える）
//! - 起動時検証（Fail-fast 設計）: オプション不正や scope root 不在は `build()` で返す

use super::environment::EnvironmentContext;
use super::loader::ViewportDeferredLoader;
use crate::domain::{ConfigError, LoaderConfig, LoaderError};
use crate::ports::{Clock, Host, NoopPopulate, Populate, SystemClock};

/// LoaderBuilder はローダーを構築
///
/// # 使用例
/// ```ignore
/// let mut loader = LoaderBuilder::new(page)
///     .config(LoaderConfig::new(Marker::new("lazy")?, 50.0))
///     .populate(|el: &Element| fill(el))
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - `build()` 時に `LoaderConfig::validate` を実行
/// - ドキュメントが既に ready なら bootstrap まで行うので、`root` が見つからなければここで失敗する
pub struct LoaderBuilder<H: Host, C: Clock = SystemClock> {
    host: H,
    clock: C,
    config: LoaderConfig,
    environment: Option<EnvironmentContext>,
    populate: Box<dyn Populate<H::Element>>,
}

/// BuildError はローダー構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid loader options: {0}")]
    Config(#[from] ConfigError),

    #[error("loader bootstrap failed: {0}")]
    Bootstrap(#[from] LoaderError),
}

impl<H: Host> LoaderBuilder<H, SystemClock> {
    /// Default options, system clock, no-op callback, environment probed at build time.
    pub fn new(host: H) -> Self {
        Self {
            host,
            clock: SystemClock,
            config: LoaderConfig::default(),
            environment: None,
            populate: Box::new(NoopPopulate),
        }
    }
}

impl<H: Host, C: Clock> LoaderBuilder<H, C> {
    pub fn config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn clock<C2: Clock>(self, clock: C2) -> LoaderBuilder<H, C2> {
        LoaderBuilder {
            host: self.host,
            clock,
            config: self.config,
            environment: self.environment,
            populate: self.populate,
        }
    }

    /// Use a pre-built environment instead of probing the host.
    pub fn environment(mut self, environment: EnvironmentContext) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn populate<P>(mut self, populate: P) -> Self
    where
        P: Populate<H::Element> + 'static,
    {
        self.populate = Box::new(populate);
        self
    }

    pub fn build(self) -> Result<ViewportDeferredLoader<H, C>, BuildError> {
        self.config.validate()?;
        let environment = self
            .environment
            .unwrap_or_else(|| EnvironmentContext::probe(&self.host));
        let loader = ViewportDeferredLoader::new(
            self.config,
            self.host,
            self.clock,
            environment,
            self.populate,
        )?;
        log::debug!("[{}] built", loader.id());
        Ok(loader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Phase;
    use crate::domain::Marker;
    use crate::impls::InMemoryPage;
    use crate::ports::{ManualClock, ReadyState};

    #[test]
    fn build_with_defaults_succeeds() {
        let page = InMemoryPage::new(800.0);
        let loader = LoaderBuilder::new(page).build();
        assert!(loader.is_ok());
    }

    #[test]
    fn build_fails_on_invalid_options() {
        let page = InMemoryPage::new(800.0);
        let result = LoaderBuilder::new(page)
            .config(LoaderConfig::new(Marker::default(), f64::NAN))
            .build();
        assert!(matches!(
            result,
            Err(BuildError::Config(ConfigError::NonFiniteFoldDistance(_)))
        ));
    }

    #[test]
    fn build_fails_when_root_is_missing_on_ready_document() {
        let page = InMemoryPage::new(800.0);
        let mut config = LoaderConfig::default();
        config.root = Some("feed".into());

        let result = LoaderBuilder::new(page).config(config).build();
        match result {
            Err(BuildError::Bootstrap(LoaderError::RootNotFound(id))) => assert_eq!(id, "feed"),
            other => panic!("expected RootNotFound, got {:?}", other.map(|l| l.status())),
        }
    }

    #[test]
    fn missing_root_surfaces_on_dom_content_loaded_when_document_is_loading() {
        let page = InMemoryPage::new(800.0);
        page.set_ready_state(ReadyState::Loading);
        let mut config = LoaderConfig::default();
        config.root = Some("feed".into());

        let mut loader = LoaderBuilder::new(page.clone())
            .config(config)
            .clock(ManualClock::at_epoch())
            .build()
            .expect("nothing resolved yet");
        assert_eq!(loader.phase(), Phase::Constructed);

        page.set_ready_state(ReadyState::Interactive);
        let err = loader
            .handle_event(crate::domain::HostEvent::DomContentLoaded)
            .unwrap_err();
        assert!(matches!(err, LoaderError::RootNotFound(_)));
    }

    #[test]
    fn explicit_environment_is_used() {
        let page = InMemoryPage::new(800.0);
        page.set_orientation(Some(0));
        let loader = LoaderBuilder::new(page)
            .environment(EnvironmentContext::detached())
            .build()
            .unwrap();
        assert!(!loader.environment().orientation_supported());
    }

    #[test]
    fn loader_ids_carry_clock_timestamp() {
        let clock = ManualClock::at_epoch();
        clock.advance_ms(42);
        let loader = LoaderBuilder::new(InMemoryPage::new(800.0))
            .clock(clock)
            .build()
            .unwrap();
        assert_eq!(loader.id().as_ulid().timestamp_ms(), 42);
    }
}
