// SPDX-License-Identifier: GPL-3.0-only

//! Seed data for the demo repository

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use scrutiny_types::{
    AppConfig, AttributeId, AttributeMetadata, AttributeStatus, CollectorSettings, DeviceDetails,
    DeviceModel, DeviceSummary, DisplayType, LineStroke, MetricsSettings, NotifyLevel,
    PoweredOnHoursUnit, SmartAttribute, SmartResult, SmartSummary, SortStrategy,
    StatusFilterAttributes, StatusThreshold, TemperatureSample, TemperatureUnit, ThemeMode,
    TitleScheme, ZfsCapacitySample, ZfsPool, ZfsPoolStatus, ZfsVdev,
};

const HISTORY_DAYS: i64 = 30;
const SMART_RESULTS: i64 = 10;

struct SeedDevice {
    wwn: &'static str,
    name: &'static str,
    uuid: &'static str,
    serial_id: &'static str,
    manufacturer: &'static str,
    model: &'static str,
    interface_type: &'static str,
    interface_speed: &'static str,
    serial: &'static str,
    firmware: &'static str,
    rpm: u32,
    capacity: u64,
    form_factor: &'static str,
    protocol: &'static str,
    device_type: &'static str,
    label: &'static str,
    host: &'static str,
    status: u32,
    /// Base temperature, power-on hours and temperature variance
    smart: Option<(i64, u64, i64)>,
}

const DEVICES: [SeedDevice; 7] = [
    SeedDevice {
        wwn: "0x5000c500a8f7c8c8",
        name: "sda",
        uuid: "f8d5e4c3-b2a1-4567-8901-2345678901ab",
        serial_id: "ata-Samsung_SSD_870_EVO_1TB_S5YJNX0R123456",
        manufacturer: "Samsung",
        model: "Samsung SSD 870 EVO 1TB",
        interface_type: "SATA",
        interface_speed: "6.0 Gb/s",
        serial: "S5YJNX0R123456",
        firmware: "SVT02B6Q",
        rpm: 0,
        capacity: 1_000_204_886_016,
        form_factor: "2.5 inches",
        protocol: "ATA",
        device_type: "ata",
        label: "System Drive",
        host: "localhost",
        status: 0,
        smart: Some((35, 8760, 3)),
    },
    SeedDevice {
        wwn: "0x5000c500a8f7d9d9",
        name: "sdb",
        uuid: "a1b2c3d4-e5f6-7890-1234-567890abcdef",
        serial_id: "ata-WDC_WD40EFRX-68N32N0_WD-WX12D81F5678",
        manufacturer: "Western Digital",
        model: "WD Red Plus 4TB",
        interface_type: "SATA",
        interface_speed: "6.0 Gb/s",
        serial: "WD-WX12D81F5678",
        firmware: "82.00A82",
        rpm: 5400,
        capacity: 4_000_787_030_016,
        form_factor: "3.5 inches",
        protocol: "ATA",
        device_type: "ata",
        label: "Data Drive",
        host: "localhost",
        status: 0,
        smart: Some((42, 15000, 4)),
    },
    SeedDevice {
        wwn: "0x5000c500d1e2f3a4",
        name: "sdc",
        uuid: "b2c3d4e5-f6a7-8901-2345-67890abcdef1",
        serial_id: "ata-TOSHIBA_HDWE150_Y9GVK7BNFBXS",
        manufacturer: "Toshiba",
        model: "TOSHIBA HDWE150",
        interface_type: "SATA",
        interface_speed: "6.0 Gb/s",
        serial: "Y9GVK7BNFBXS",
        firmware: "FP2A",
        rpm: 7200,
        capacity: 5_000_981_078_016,
        form_factor: "3.5 inches",
        protocol: "ATA",
        device_type: "ata",
        label: "",
        host: "localhost",
        status: 0,
        smart: Some((38, 12000, 4)),
    },
    SeedDevice {
        wwn: "0x5000c500e2f3a4b5",
        name: "sdd",
        uuid: "c3d4e5f6-a7b8-9012-3456-7890abcdef12",
        serial_id: "ata-ST5000DM000-1FK178_Z8J0ABCD",
        manufacturer: "Seagate",
        model: "ST5000DM000-1FK178",
        interface_type: "SATA",
        interface_speed: "6.0 Gb/s",
        serial: "Z8J0ABCD",
        firmware: "CC26",
        rpm: 5900,
        capacity: 5_000_981_078_016,
        form_factor: "3.5 inches",
        protocol: "ATA",
        device_type: "ata",
        label: "",
        host: "localhost",
        status: 0,
        smart: Some((36, 18000, 3)),
    },
    SeedDevice {
        wwn: "0x50014ee2b5c7e123",
        name: "nvme0n1",
        uuid: "d4e5f6a7-b8c9-0123-4567-890abcdef123",
        serial_id: "nvme-Samsung_SSD_980_PRO_2TB_S69ANF0R789012",
        manufacturer: "Samsung",
        model: "Samsung SSD 980 PRO 2TB",
        interface_type: "NVMe",
        interface_speed: "PCIe 4.0 x4",
        serial: "S69ANF0R789012",
        firmware: "5B2QGXA7",
        rpm: 0,
        capacity: 2_000_398_934_016,
        form_factor: "M.2",
        protocol: "NVMe",
        device_type: "nvme",
        label: "Fast Storage",
        host: "workstation",
        status: 0,
        smart: Some((45, 5000, 6)),
    },
    SeedDevice {
        wwn: "0x5000c500b3a8e456",
        name: "sdc",
        uuid: "e5f6a7b8-c9d0-1234-5678-90abcdef1234",
        serial_id: "ata-ST8000VN004-2M2101_ZCT2M5JK",
        manufacturer: "Seagate",
        model: "Seagate IronWolf 8TB",
        interface_type: "SATA",
        interface_speed: "6.0 Gb/s",
        serial: "ZCT2M5JK",
        firmware: "SC60",
        rpm: 7200,
        capacity: 8_001_563_222_016,
        form_factor: "3.5 inches",
        protocol: "ATA",
        device_type: "ata",
        label: "",
        host: "nas",
        status: 1,
        smart: Some((48, 25000, 5)),
    },
    // Registered by the collector but never reported SMART data
    SeedDevice {
        wwn: "0x50014ee2c1d2e3f4",
        name: "sde",
        uuid: "",
        serial_id: "ata-WDC_WD80EFAX-68KNBN0_VAGXXXXX",
        manufacturer: "Western Digital",
        model: "WDC WD80EFAX-68KNBN0",
        interface_type: "SATA",
        interface_speed: "6.0 Gb/s",
        serial: "VAGXXXXX",
        firmware: "81.00A81",
        rpm: 5400,
        capacity: 8_001_563_222_016,
        form_factor: "3.5 inches",
        protocol: "ATA",
        device_type: "sat",
        label: "",
        host: "nas",
        status: 0,
        smart: None,
    },
];

/// Generator seeded from an id, so every run yields the same series per device
fn rng_for(id: &str) -> StdRng {
    let mut seed = [0u8; 32];
    for (slot, byte) in seed.iter_mut().zip(id.bytes().cycle()) {
        *slot = byte;
    }
    StdRng::from_seed(seed)
}

/// Offset in `-variance..variance`
fn wobble(rng: &mut StdRng, variance: i64) -> i64 {
    if variance <= 0 {
        return 0;
    }
    rng.random_range(-variance..variance)
}

/// One reading per day over the last month, clamped to 20..=80 °C
pub(crate) fn temperature_history(
    wwn: &str,
    base: i64,
    variance: i64,
    anchor: DateTime<Utc>,
) -> Vec<TemperatureSample> {
    let mut rng = rng_for(wwn);
    (0..=HISTORY_DAYS)
        .rev()
        .map(|days_ago| TemperatureSample {
            date: anchor - TimeDelta::days(days_ago),
            temp: (base + wobble(&mut rng, variance)).clamp(20, 80) as f64,
        })
        .collect()
}

/// One capacity sample per day over the last month, clamped to 30..=95 %
pub(crate) fn capacity_history(pool: &ZfsPool, anchor: DateTime<Utc>) -> Vec<ZfsCapacitySample> {
    let mut rng = rng_for(&pool.guid);
    let base = pool.capacity_percent.round() as i64;

    (0..=HISTORY_DAYS)
        .rev()
        .map(|days_ago| {
            let capacity = (base + wobble(&mut rng, 2)).clamp(30, 95) as u64;
            let allocated = pool.size / 100 * capacity;
            ZfsCapacitySample {
                date: anchor - TimeDelta::days(days_ago),
                size: pool.size,
                allocated,
                free: pool.size - allocated,
                capacity_percent: capacity as f64,
                fragmentation: rng.random_range(5..15),
                status: ZfsPoolStatus::Online,
            }
        })
        .collect()
}

pub(crate) fn devices(anchor: DateTime<Utc>) -> Vec<DeviceSummary> {
    DEVICES
        .iter()
        .map(|seed| {
            let device = DeviceModel {
                wwn: seed.wwn.to_string(),
                device_name: seed.name.to_string(),
                device_uuid: seed.uuid.to_string(),
                device_serial_id: seed.serial_id.to_string(),
                label: seed.label.to_string(),
                host_id: seed.host.to_string(),
                manufacturer: seed.manufacturer.to_string(),
                model_name: seed.model.to_string(),
                interface_type: seed.interface_type.to_string(),
                interface_speed: seed.interface_speed.to_string(),
                serial_number: seed.serial.to_string(),
                firmware: seed.firmware.to_string(),
                rotational_speed: seed.rpm,
                capacity: seed.capacity,
                form_factor: seed.form_factor.to_string(),
                smart_support: seed.smart.is_some(),
                device_protocol: seed.protocol.to_string(),
                device_type: seed.device_type.to_string(),
                device_status: seed.status,
                ..Default::default()
            };

            match seed.smart {
                Some((temp, power_on_hours, variance)) => DeviceSummary {
                    device,
                    smart: Some(SmartSummary {
                        collector_date: Some(anchor),
                        temp: Some(temp as f64),
                        power_on_hours: Some(power_on_hours),
                    }),
                    temp_history: temperature_history(seed.wwn, temp, variance, anchor),
                },
                None => DeviceSummary {
                    device,
                    ..Default::default()
                },
            }
        })
        .collect()
}

fn vdev(id: u64, pool_guid: &str, parent_id: Option<u64>, name: &str, kind: &str) -> ZfsVdev {
    ZfsVdev {
        id,
        pool_guid: pool_guid.to_string(),
        parent_id,
        name: name.to_string(),
        vdev_type: kind.to_string(),
        status: ZfsPoolStatus::Online,
        path: if kind == "disk" {
            format!("/dev/{name}")
        } else {
            String::new()
        },
        ..Default::default()
    }
}

pub(crate) fn pools(anchor: DateTime<Utc>) -> Vec<ZfsPool> {
    let tank = ZfsPool {
        guid: "tank-guid-12345".to_string(),
        name: "tank".to_string(),
        host_id: "nas".to_string(),
        label: "Main Storage Pool".to_string(),
        status: ZfsPoolStatus::Online,
        size: 8_000_000_000_000,
        allocated: 5_200_000_000_000,
        free: 2_800_000_000_000,
        fragmentation: 8,
        capacity_percent: 65.0,
        scrub_state: "finished".to_string(),
        scrub_start: Some(anchor - TimeDelta::days(7)),
        scrub_end: Some(anchor - TimeDelta::hours(7 * 24 - 2)),
        scrub_percent: 100.0,
        vdevs: vec![ZfsVdev {
            children: vec![
                vdev(2, "tank-guid-12345", Some(1), "sda", "disk"),
                vdev(3, "tank-guid-12345", Some(1), "sdb", "disk"),
            ],
            ..vdev(1, "tank-guid-12345", None, "tank", "mirror")
        }],
        created_at: Some(anchor - TimeDelta::days(365)),
        updated_at: Some(anchor),
        ..Default::default()
    };

    let degraded = ZfsVdev {
        status: ZfsPoolStatus::Degraded,
        read_errors: 3,
        checksum_errors: 1,
        ..vdev(6, "backup-guid-67890", Some(4), "sdd", "disk")
    };
    let backup = ZfsPool {
        guid: "backup-guid-67890".to_string(),
        name: "backup".to_string(),
        host_id: "nas".to_string(),
        status: ZfsPoolStatus::Degraded,
        size: 12_000_000_000_000,
        allocated: 10_200_000_000_000,
        free: 1_800_000_000_000,
        fragmentation: 15,
        capacity_percent: 85.0,
        scrub_state: "scanning".to_string(),
        scrub_start: Some(anchor - TimeDelta::hours(2)),
        scrub_percent: 42.5,
        scrub_errors: 3,
        total_read_errors: 3,
        total_checksum_errors: 1,
        vdevs: vec![ZfsVdev {
            status: ZfsPoolStatus::Degraded,
            read_errors: 3,
            checksum_errors: 1,
            children: vec![
                vdev(5, "backup-guid-67890", Some(4), "sdc", "disk"),
                degraded,
                vdev(7, "backup-guid-67890", Some(4), "sde", "disk"),
            ],
            ..vdev(4, "backup-guid-67890", None, "backup", "raidz1")
        }],
        created_at: Some(anchor - TimeDelta::days(500)),
        updated_at: Some(anchor),
        ..Default::default()
    };

    vec![tank, backup]
}

pub(crate) fn settings() -> AppConfig {
    AppConfig {
        version: "0.8.0-web".to_string(),
        commit: "dev".to_string(),
        date: String::new(),
        dashboard_display: TitleScheme::Name,
        dashboard_sort: SortStrategy::Status,
        temperature_unit: TemperatureUnit::Celsius,
        file_size_si_units: false,
        powered_on_hours_unit: PoweredOnHoursUnit::Humanize,
        line_stroke: LineStroke::Smooth,
        theme: ThemeMode::Dark,
        metrics: MetricsSettings {
            status_threshold: StatusThreshold::Both,
            status_filter_attributes: StatusFilterAttributes::All,
            notify_level: NotifyLevel::Fail,
            repeat_notifications: false,
        },
        collector: CollectorSettings::default(),
    }
}

fn metadata(
    display_name: &str,
    critical: bool,
    display_type: DisplayType,
    description: &str,
) -> AttributeMetadata {
    AttributeMetadata {
        display_name: display_name.to_string(),
        ideal: "low".to_string(),
        critical,
        description: description.to_string(),
        transform_value_unit: None,
        display_type,
    }
}

fn ata_metadata() -> BTreeMap<AttributeId, AttributeMetadata> {
    BTreeMap::from([
        (
            AttributeId::from(5),
            metadata(
                "Reallocated Sectors Count",
                true,
                DisplayType::Raw,
                "Count of sectors remapped to the spare area after read, write or verify errors.",
            ),
        ),
        (
            AttributeId::from(9),
            metadata(
                "Power On Hours",
                true,
                DisplayType::Transformed,
                "Count of hours in power-on state.",
            ),
        ),
        (
            AttributeId::from(12),
            metadata(
                "Power Cycle Count",
                false,
                DisplayType::Raw,
                "Count of full power on/off cycles.",
            ),
        ),
        (
            AttributeId::from(177),
            metadata(
                "Wear Leveling Count",
                true,
                DisplayType::Normalized,
                "Program/erase cycles consumed, as a percentage of the rated endurance.",
            ),
        ),
        (
            AttributeId::from(194),
            metadata(
                "Temperature",
                true,
                DisplayType::Transformed,
                "Current internal temperature of the drive.",
            ),
        ),
        (
            AttributeId::from(195),
            metadata(
                "Hardware ECC Recovered",
                true,
                DisplayType::Raw,
                "Count of errors corrected by the drive's hardware ECC.",
            ),
        ),
    ])
}

fn nvme_metadata() -> BTreeMap<AttributeId, AttributeMetadata> {
    BTreeMap::from([
        (
            AttributeId::new("critical_warning"),
            metadata(
                "Critical Warning",
                true,
                DisplayType::Normalized,
                "Bit field of critical controller warnings.",
            ),
        ),
        (
            AttributeId::new("temperature"),
            metadata(
                "Temperature",
                false,
                DisplayType::Normalized,
                "Composite controller temperature.",
            ),
        ),
        (
            AttributeId::new("available_spare"),
            metadata(
                "Available Spare",
                true,
                DisplayType::Normalized,
                "Remaining spare capacity as a percentage.",
            ),
        ),
        (
            AttributeId::new("percentage_used"),
            metadata(
                "Percentage Used",
                true,
                DisplayType::Normalized,
                "Estimate of the rated life used.",
            ),
        ),
        (
            AttributeId::new("media_errors"),
            metadata(
                "Media Errors",
                true,
                DisplayType::Normalized,
                "Unrecovered data integrity errors.",
            ),
        ),
    ])
}

fn attribute(id: AttributeId, value: i64, thresh: i64, raw: i64) -> (AttributeId, SmartAttribute) {
    let attribute = SmartAttribute {
        attribute_id: Some(id.clone()),
        value,
        thresh,
        worst: Some(value),
        raw_value: Some(raw),
        raw_string: Some(raw.to_string()),
        transformed_value: Some(raw),
        ..Default::default()
    };
    (id, attribute)
}

fn failing(mut entry: (AttributeId, SmartAttribute), reason: &str) -> (AttributeId, SmartAttribute) {
    entry.1.status = AttributeStatus(1);
    entry.1.status_reason = Some(reason.to_string());
    entry.1.when_failed = Some("FAILING_NOW".to_string());
    entry
}

fn smart_attributes(
    summary: &DeviceSummary,
    temp: i64,
    power_on_hours: u64,
    cycles: i64,
    age: i64,
) -> BTreeMap<AttributeId, SmartAttribute> {
    let failed = summary.device.device_status != 0;

    if summary.device.device_protocol == "NVMe" {
        return BTreeMap::from([
            attribute(AttributeId::new("critical_warning"), 0, 0, 0),
            attribute(AttributeId::new("temperature"), temp, 0, temp),
            attribute(AttributeId::new("available_spare"), 100, 10, 100),
            attribute(AttributeId::new("percentage_used"), 3 + age / 4, 0, 3 + age / 4),
            attribute(AttributeId::new("media_errors"), 0, 0, 0),
        ]);
    }

    let reallocated = if failed {
        failing(
            attribute(AttributeId::from(5), 5, 10, 1240 - age * 8),
            "Attribute is failing manufacturer SMART threshold",
        )
    } else {
        attribute(AttributeId::from(5), 100, 10, 0)
    };

    BTreeMap::from([
        reallocated,
        attribute(AttributeId::from(9), 99, 0, power_on_hours as i64),
        attribute(AttributeId::from(12), 99, 0, cycles),
        attribute(AttributeId::from(177), 99 - age / 2, 0, 14 + age / 3),
        attribute(AttributeId::from(194), 65, 0, temp),
        attribute(AttributeId::from(195), 200, 0, 0),
    ])
}

/// SMART history for a device: one result every three days, newest first
pub(crate) fn device_details(summary: &DeviceSummary, anchor: DateTime<Utc>) -> DeviceDetails {
    let metadata = if summary.device.device_protocol == "NVMe" {
        nvme_metadata()
    } else {
        ata_metadata()
    };

    let Some(smart) = summary.smart.as_ref() else {
        return DeviceDetails {
            device: summary.device.clone(),
            smart_results: Vec::new(),
            metadata,
        };
    };

    let mut rng = rng_for(&summary.device.wwn);
    let base_temp = smart.temp.map_or(35, |temp| temp.round() as i64);
    let power_on_hours = smart.power_on_hours.unwrap_or(8760);

    let smart_results = (0..SMART_RESULTS)
        .map(|age| {
            let temp = base_temp + wobble(&mut rng, 5);
            let hours = power_on_hours.saturating_sub(age as u64 * 72);
            let cycles = 245 - age;
            SmartResult {
                date: anchor - TimeDelta::days(age * 3),
                device_wwn: summary.device.wwn.clone(),
                device_protocol: summary.device.device_protocol.clone(),
                temp: Some(temp as f64),
                power_on_hours: Some(hours),
                power_cycle_count: Some(cycles as u64),
                attrs: smart_attributes(summary, temp, hours, cycles, age),
            }
        })
        .collect();

    DeviceDetails {
        device: summary.device.clone(),
        smart_results,
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wobble_stays_in_range() {
        let mut rng = rng_for("0x5000c500a8f7c8c8");
        for _ in 0..100 {
            let offset = wobble(&mut rng, 4);
            assert!((-4..4).contains(&offset), "offset {offset}");
        }
        assert_eq!(wobble(&mut rng, 0), 0);
    }

    #[test]
    fn series_depend_only_on_the_id() {
        let draw = |id: &str| {
            let mut rng = rng_for(id);
            (0..40).map(|_| wobble(&mut rng, 6)).collect::<Vec<_>>()
        };
        assert_eq!(draw("tank-guid-12345"), draw("tank-guid-12345"));
        assert_ne!(draw("tank-guid-12345"), draw("backup-guid-67890"));
    }

    #[test]
    fn every_seed_device_gets_a_full_month() {
        let anchor = Utc::now();
        for summary in devices(anchor) {
            let expected = if summary.has_smart_data() { 31 } else { 0 };
            assert_eq!(summary.temp_history.len(), expected, "{}", summary.device.wwn);
            if summary.has_smart_data() {
                assert_eq!(device_details(&summary, anchor).smart_results.len(), 10);
            }
        }
        for pool in pools(anchor) {
            assert_eq!(capacity_history(&pool, anchor).len(), 31);
        }
    }

    #[test]
    fn histories_are_deterministic_and_clamped() {
        let anchor = Utc::now();
        let first = temperature_history("0x5000c500a8f7c8c8", 79, 6, anchor);
        let second = temperature_history("0x5000c500a8f7c8c8", 79, 6, anchor);

        assert_eq!(first, second);
        assert_eq!(first.len(), 31);
        assert!(first.iter().all(|sample| (20.0..=80.0).contains(&sample.temp)));
        assert_eq!(first.last().map(|sample| sample.date), Some(anchor));
    }

    #[test]
    fn capacity_history_is_clamped() {
        let anchor = Utc::now();
        let pool = ZfsPool {
            guid: "full".to_string(),
            size: 1_000,
            capacity_percent: 99.0,
            ..Default::default()
        };

        let history = capacity_history(&pool, anchor);
        assert_eq!(history.len(), 31);
        assert!(history.iter().all(|s| (30.0..=95.0).contains(&s.capacity_percent)));
        assert!(history.iter().all(|s| s.allocated + s.free == 1_000));
    }

    #[test]
    fn seed_includes_failed_and_no_data_devices() {
        let devices = devices(Utc::now());
        assert!(devices.iter().any(|d| d.device.device_status != 0));
        assert!(devices.iter().any(|d| !d.has_smart_data()));
    }

    #[test]
    fn failed_device_has_failing_attribute() {
        let anchor = Utc::now();
        let devices = devices(anchor);
        let failed = devices
            .iter()
            .find(|d| d.device.device_status != 0)
            .unwrap();

        let details = device_details(failed, anchor);
        let latest = details.latest_result().unwrap();
        assert!(latest.attrs[&AttributeId::from(5)].status.smart_failed());
        assert_eq!(details.smart_results.len(), 10);
        assert!(details.smart_results[0].date > details.smart_results[1].date);
    }
}
