use crate::config::UploadConfig;
use crate::core::catalog::VersionCatalogClient;
use crate::core::executor::UploadExecutor;
use crate::core::game_version::GameVersionResolver;
use crate::core::local_version::LocalVersionResolver;
use crate::core::request::{PreparedRequest, UploadRequestBuilder};
use crate::domain::model::UploadOutcome;
use crate::domain::ports::BuildContext;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use tracing::Level;

/// Runs catalog lookup, request assembly and upload for one build.
#[derive(Debug, Clone, Default)]
pub struct Uploader {
    builder: UploadRequestBuilder,
    executor: UploadExecutor,
}

impl Uploader {
    pub fn new() -> Self {
        Self {
            builder: UploadRequestBuilder::new(),
            executor: UploadExecutor::new(),
        }
    }

    /// Everything up to, but not including, the upload itself.
    pub async fn prepare<B: BuildContext>(&self, context: &B) -> Result<PreparedRequest> {
        let config = Self::load_config(context)?;
        self.prepare_with(context, &config).await
    }

    pub async fn run<B: BuildContext>(&self, context: &B) -> Result<UploadOutcome> {
        let config = Self::load_config(context)?;
        context.log(Level::INFO, "Uploading project to BukkitDev");

        let request = self.prepare_with(context, &config).await?;
        context.log(Level::DEBUG, &format!("POST {}", request.url));

        let outcome = self.executor.execute(request).await?;
        match &outcome {
            UploadOutcome::Success => context.log(Level::INFO, &outcome.to_string()),
            UploadOutcome::ValidationError(body) => {
                context.log(Level::ERROR, "There was an error in uploading the plugin");
                context.log(Level::ERROR, body);
            }
            UploadOutcome::UnexpectedStatus(_) => context.log(Level::WARN, &outcome.to_string()),
            _ => context.log(Level::ERROR, &outcome.to_string()),
        }

        Ok(outcome)
    }

    fn load_config<B: BuildContext>(context: &B) -> Result<UploadConfig> {
        let config = context.configuration()?;
        config.validate()?;
        Ok(config)
    }

    async fn prepare_with<B: BuildContext>(
        &self,
        context: &B,
        config: &UploadConfig,
    ) -> Result<PreparedRequest> {
        let resolver = GameVersionResolver::new(
            VersionCatalogClient::new(config.catalog_url.clone()),
            LocalVersionResolver::new(config.match_policy),
        );
        let game_version = resolver.resolve(&config.game, &config.dependencies).await?;
        context.log(
            Level::DEBUG,
            &format!("Resolved {} game version id {}", config.game, game_version),
        );

        let target = config.target()?;
        let metadata = config.metadata(game_version);
        self.builder
            .build(&target, &metadata, config.artifact.as_deref(), &config.api_key)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::TomlConfig;
    use crate::utils::error::UploadError;
    use std::sync::Mutex;

    struct RecordingContext {
        config: TomlConfig,
        lines: Mutex<Vec<(Level, String)>>,
    }

    impl BuildContext for RecordingContext {
        fn configuration(&self) -> Result<UploadConfig> {
            UploadConfig::from_layers(self.config.clone())
        }

        fn log(&self, level: Level, message: &str) {
            self.lines.lock().unwrap().push((level, message.to_string()));
        }
    }

    #[tokio::test]
    async fn test_invalid_configuration_stops_before_network() {
        let mut config = TomlConfig::default();
        config.project.slug = Some("banhammer".to_string());
        config.project.version = Some("1.0".to_string());
        config.upload.api_key = Some("  ".to_string());
        // unreachable: any request would fail with a transport error instead
        config.game.catalog_url = Some("http://127.0.0.1:1/game-versions.json".to_string());

        let context = RecordingContext {
            config,
            lines: Mutex::new(Vec::new()),
        };

        let err = Uploader::new().run(&context).await.unwrap_err();
        assert!(matches!(err, UploadError::InvalidConfigValueError { .. }));
        assert!(context.lines.lock().unwrap().is_empty());
    }
}
