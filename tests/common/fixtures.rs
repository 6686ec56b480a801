//! Test fixtures and data factories

use super::FakeTaskApi;
use chrono::{TimeZone, Utc};
use taskgate::core::remote::NamedEntity;
use taskgate::Config;

/// Factory for fake workspaces
pub struct WorkspaceFactory;

impl WorkspaceFactory {
    /// Workspace id used by [`WorkspaceFactory::config`]
    pub const WORKSPACE_ID: &'static str = "1200";

    /// Two containers with a realistic mix of decorated and plain names
    pub fn standard() -> FakeTaskApi {
        let march = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let may = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();

        FakeTaskApi::new()
            .with_container(
                "1301",
                "🚀 Product Launch",
                vec![
                    NamedEntity::new("5001", "Launch Plan"),
                    NamedEntity::new("5002", "launch plan"),
                    NamedEntity::new("5003", "📣 Press release"),
                    NamedEntity::new("5004", "Retro notes").updated(march),
                ],
            )
            .with_container(
                "1302",
                "Platform",
                vec![
                    NamedEntity::new("6001", "Retro notes").updated(may),
                    NamedEntity::new("6002", "Migrate billing ✅"),
                    NamedEntity::new("6003", ""),
                ],
            )
    }

    /// Names 0..n as `Task n`, all in one container
    pub fn numbered(count: usize) -> FakeTaskApi {
        let items = (0..count)
            .map(|n| NamedEntity::new(format!("{}", 9000 + n), format!("Task {}", n)))
            .collect();
        FakeTaskApi::new().with_container("1400", "Numbered", items)
    }

    /// Configuration with short retry delays for fast tests
    pub fn config() -> Config {
        let mut config = Config::default();
        config.api.workspace_id = Self::WORKSPACE_ID.to_string();
        config.batch.retry_delay_ms = 10;
        config.batch.max_retry_delay_ms = 100;
        config
    }
}
