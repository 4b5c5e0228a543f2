use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::json;

use scrutiny_contracts::{
    DashboardErrorKind, DeviceRepository, PoolRepository, SettingsRepository, SnapshotRepository,
};
use scrutiny_types::{
    AppConfigUpdate, AttributeId, DurationKey, SortStrategy, TitleScheme, Wwn, attribute_rows,
};

const WWN: &str = "0x5000c500a8f7c8c8";

struct SnapshotDir(PathBuf);

impl SnapshotDir {
    fn new(name: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "scrutiny-snapshot-{name}-{}-{nanos}",
            std::process::id()
        ));
        fs::create_dir_all(path.join("details")).unwrap();
        fs::create_dir_all(path.join("zfs")).unwrap();
        Self(path)
    }

    fn write(&self, relative: &str, value: serde_json::Value) {
        fs::write(self.0.join(relative), serde_json::to_vec(&value).unwrap()).unwrap();
    }
}

impl Drop for SnapshotDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

fn populated(name: &str) -> SnapshotDir {
    let dir = SnapshotDir::new(name);
    dir.write(
        "summary.json",
        json!({
            "success": true,
            "data": { "summary": {
                WWN: {
                    "device": { "wwn": WWN, "device_name": "sda", "device_type": "ata",
                                "model_name": "Samsung SSD 870 EVO 1TB", "device_protocol": "ATA" },
                    "smart": { "temp": 35, "power_on_hours": 8760 }
                }
            }}
        }),
    );
    dir.write(
        "temp_week.json",
        json!({
            "success": true,
            "data": { "temp_history": {
                WWN: [{ "date": "2024-03-01T10:00:00Z", "temp": 35 }]
            }}
        }),
    );
    dir.write(
        &format!("details/{WWN}.json"),
        json!({
            "success": true,
            "data": {
                "device": { "wwn": WWN, "device_name": "sda", "device_protocol": "ATA" },
                "smart_results": [{
                    "date": "2024-03-01T10:00:00Z",
                    "attrs": {
                        "5": { "attribute_id": 5, "value": 100, "thresh": 10, "raw_value": 0 },
                        "9": { "attribute_id": 9, "value": 99, "thresh": 0, "raw_value": 8760,
                               "transformed_value": 8760 }
                    }
                }]
            },
            "metadata": {
                "5": { "display_name": "Reallocated Sectors Count", "critical": true,
                       "display_type": "raw" },
                "9": { "display_name": "Power On Hours", "critical": false }
            }
        }),
    );
    dir.write(
        "zfs_summary.json",
        json!({ "data": { "pools": {
            "tank-guid": { "guid": "tank-guid", "name": "tank", "status": "DEGRADED" }
        }}}),
    );
    dir.write(
        "zfs/tank-guid.json",
        json!({ "success": true, "data": {
            "pool": { "guid": "tank-guid", "name": "tank", "status": "DEGRADED" },
            "metrics_history": []
        }}),
    );
    dir.write(
        "settings.json",
        json!({
            "success": true,
            "settings": { "dashboard_display": "serial_id", "dashboard_sort": "name" },
            "version": "1.4.0"
        }),
    );
    dir
}

#[tokio::test]
async fn reads_saved_responses() {
    let dir = populated("reads");
    let repo = SnapshotRepository::new(&dir.0);
    let wwn: Wwn = WWN.parse().unwrap();

    let summary = repo.summary().await.unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(
        summary[0].device.display_title(TitleScheme::Name),
        "/dev/sda - Samsung SSD 870 EVO 1TB"
    );

    let history = repo.temperature_history(DurationKey::Week).await.unwrap();
    assert_eq!(history[WWN].len(), 1);

    let details = repo.device_details(&wwn).await.unwrap();
    let table = attribute_rows(&details, true);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.hidden_count, 1);
    assert_eq!(table.rows[0].id, &AttributeId::from(5));

    let pools = repo.pools().await.unwrap();
    assert_eq!(pools[0].name, "tank");
    let pool = repo.pool_details("tank-guid").await.unwrap();
    assert!(pool.metrics_history.is_empty());

    let settings = repo.settings().await.unwrap();
    assert_eq!(settings.version, "1.4.0");
    assert_eq!(settings.dashboard_display, TitleScheme::SerialNumber);
    assert_eq!(settings.dashboard_sort, SortStrategy::Status);
}

#[tokio::test]
async fn commands_are_unsupported() {
    let dir = populated("commands");
    let repo = SnapshotRepository::new(&dir.0);
    let wwn: Wwn = WWN.parse().unwrap();

    let error = DeviceRepository::mute(&repo, &wwn).await.unwrap_err();
    assert_eq!(error.kind, DashboardErrorKind::Unsupported);

    let error = PoolRepository::delete(&repo, "tank-guid").await.unwrap_err();
    assert_eq!(error.kind, DashboardErrorKind::Unsupported);

    let error = repo
        .save_settings(&AppConfigUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(error.kind, DashboardErrorKind::Unsupported);
}

#[tokio::test]
async fn missing_files_are_not_found() {
    let dir = SnapshotDir::new("missing");
    let repo = SnapshotRepository::new(&dir.0);

    let error = repo.summary().await.unwrap_err();
    assert_eq!(error.kind, DashboardErrorKind::NotFound);
    assert!(error.message.contains("summary.json"));
}

#[tokio::test]
async fn malformed_files_are_internal_errors() {
    let dir = SnapshotDir::new("malformed");
    fs::write(dir.0.join("settings.json"), b"{ not json").unwrap();
    let repo = SnapshotRepository::new(&dir.0);

    let error = repo.settings().await.unwrap_err();
    assert_eq!(error.kind, DashboardErrorKind::Internal);
}

#[tokio::test]
async fn pool_guids_stay_inside_the_snapshot() {
    let dir = populated("guids");
    dir.write("escape.json", json!({ "success": true, "data": { "pool": { "name": "x" } } }));
    let repo = SnapshotRepository::new(&dir.0);

    for guid in ["../escape", "..", "zfs/../escape", "a\\b", ""] {
        let error = repo.pool_details(guid).await.unwrap_err();
        assert_eq!(error.kind, DashboardErrorKind::InvalidInput, "{guid}");
    }
}
